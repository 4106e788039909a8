//! tilecodec - Convert palettes and tiles to native retro console formats
//!
//! A command-line front end for inspecting targets and producing or
//! previewing native palette and tile data.

use clap::{Parser, Subcommand};
use image::GrayImage;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tilecodec::{
    pack_native_colors, pack_native_tile, reduce_colors, unpack_native_tiles, Rgba, Target,
};
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser)]
#[command(name = "tilecodec")]
#[command(version)]
#[command(about = "Convert palettes and tiles to native retro console formats", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the hardware constants of a target
    Info {
        /// Target (snes, snes_mode7, gb, gbc, pce, pce_sprite)
        target: Target,
    },

    /// Reduce and pack colors into a native palette
    Palette {
        /// Target (snes, snes_mode7, gb, gbc, pce, pce_sprite)
        target: Target,

        /// Colors as RRGGBB or RRGGBBAA hex values
        #[arg(required = true)]
        colors: Vec<String>,

        /// Output binary file (default: hex words on stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Pack a grayscale PNG whose pixel values are palette indices into native tiles
    Tiles {
        /// Input PNG file
        input: PathBuf,

        /// Target (snes, snes_mode7, gb, gbc, pce, pce_sprite)
        target: Target,

        /// Bits per pixel (default: the target's default)
        #[arg(short, long)]
        bpp: Option<usize>,

        /// Output file (default: input with .bin extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render native tile data as a grayscale PNG sheet
    Preview {
        /// Input native tile file
        input: PathBuf,

        /// Target (snes, snes_mode7, gb, gbc, pce)
        target: Target,

        /// Bits per pixel (default: the target's default)
        #[arg(short, long)]
        bpp: Option<usize>,

        /// Tiles per row in the sheet
        #[arg(short, long, default_value = "16")]
        columns: usize,

        /// Output PNG file (default: input with .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(std::env::var("RUST_LOG").ok().as_deref()))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { target } => print_info(target),

        Commands::Palette {
            target,
            colors,
            output,
        } => {
            let colors = colors
                .iter()
                .map(|c| parse_color(c))
                .collect::<CliResult<Vec<_>>>()?;
            let bytes = pack_native_colors(&reduce_colors(&colors, target), target);

            match output {
                Some(path) => {
                    fs::write(&path, &bytes)?;
                    tracing::info!("Written {} bytes to '{}'", bytes.len(), path.display());
                }
                None => {
                    let mut stdout = io::stdout().lock();
                    for word in bytes.chunks_exact(2) {
                        writeln!(stdout, "{:04x}", u16::from_le_bytes([word[0], word[1]]))?;
                    }
                }
            }
        }

        Commands::Tiles {
            input,
            target,
            bpp,
            output,
        } => {
            let bpp = checked_bpp(target, bpp)?;
            let output = output.unwrap_or_else(|| input.with_extension("bin"));
            tracing::info!("Converting {:?} -> {:?} ({target}, {bpp}bpp)", input, output);

            let bytes = pack_image_tiles(&input, target, bpp)?;
            fs::write(&output, &bytes)?;
            tracing::info!("Written {} bytes to '{}'", bytes.len(), output.display());
        }

        Commands::Preview {
            input,
            target,
            bpp,
            columns,
            output,
        } => {
            let bpp = checked_bpp(target, bpp)?;
            let output = output.unwrap_or_else(|| input.with_extension("png"));
            let data = fs::read(&input)
                .map_err(|e| format!("Failed to read '{}': {}", input.display(), e))?;
            tracing::info!("Decoding {} bytes of {target} tiles", data.len());

            let sheet = render_sheet(&data, target, bpp, columns.max(1))?;
            sheet.save(&output)?;
            tracing::info!(
                "Decoded: {}x{} pixels -> '{}'",
                sheet.width(),
                sheet.height(),
                output.display()
            );
        }
    }

    Ok(())
}

/// `RUST_LOG` directives when set and valid, `info` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

fn print_info(target: Target) {
    let caps = target.capabilities();
    let count = |n: usize| {
        if n == 0 {
            "-".to_string()
        } else {
            n.to_string()
        }
    };

    println!("target:           {target}");
    println!("bpp:              {} (legal: {:?})", caps.default_bpp, caps.legal_bpps);
    println!("tile size:        {0}x{0}", caps.default_tile_size);
    println!("max tiles:        {}", count(caps.max_tile_count));
    println!("map size:         {}", count(caps.default_map_size));
    println!("palettes:         {}", caps.default_palette_count);
    println!("tile flipping:    {}", caps.tile_flipping);
    println!("shared color 0:   bg {}, sprites {}", caps.col0_shared, caps.col0_shared_for_sprites);
}

/// Parses `RRGGBB` or `RRGGBBAA`, with an optional leading `#`.
fn parse_color(text: &str) -> CliResult<Rgba> {
    let hex = text.strip_prefix('#').unwrap_or(text);
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("Invalid color '{text}': not a hex value").into());
    }
    let value = u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid color '{text}': {e}"))?;
    match hex.len() {
        6 => Ok(Rgba::from_u32(0xff00_0000 | value)),
        8 => Ok(Rgba::from_u32(value.rotate_right(8))),
        _ => Err(format!("Invalid color '{text}': expected RRGGBB or RRGGBBAA").into()),
    }
}

fn checked_bpp(target: Target, bpp: Option<usize>) -> CliResult<usize> {
    let bpp = bpp.unwrap_or(target.default_bpp());
    if !target.bpp_allowed(bpp) {
        return Err(format!(
            "{bpp}bpp is not supported by {target} (legal: {:?})",
            target.legal_bpps()
        )
        .into());
    }
    Ok(bpp)
}

/// Cuts the image into tiles row by row and packs each one.
fn pack_image_tiles(input: &Path, target: Target, bpp: usize) -> CliResult<Vec<u8>> {
    let img = image::open(input)
        .map_err(|e| format!("Failed to open '{}': {}", input.display(), e))?
        .to_luma8();
    let (width, height) = (img.width() as usize, img.height() as usize);
    let tile_size = target.default_tile_size();

    if width % tile_size != 0 || height % tile_size != 0 {
        return Err(format!(
            "Image size {width}x{height} is not a multiple of the {tile_size}x{tile_size} tile size"
        )
        .into());
    }

    let max_index = (1usize << bpp) - 1;
    let pixels = img.as_raw();
    let mut out = Vec::new();
    let mut tile = Vec::with_capacity(tile_size * tile_size);
    let mut tile_count = 0;

    for ty in (0..height).step_by(tile_size) {
        for tx in (0..width).step_by(tile_size) {
            tile.clear();
            for y in ty..ty + tile_size {
                tile.extend_from_slice(&pixels[y * width + tx..y * width + tx + tile_size]);
            }
            if let Some(&index) = tile.iter().find(|&&i| i as usize > max_index) {
                return Err(format!(
                    "Tile at ({tx}, {ty}) uses index {index}, above {max_index} for {bpp}bpp"
                )
                .into());
            }
            out.extend(pack_native_tile(&tile, target, bpp, tile_size, tile_size)?);
            tile_count += 1;
        }
    }

    let max_tiles = target.max_tile_count();
    if max_tiles != 0 && tile_count > max_tiles {
        tracing::warn!("{tile_count} tiles exceed the {target} limit of {max_tiles}");
    }
    Ok(out)
}

/// Lays out decoded tiles in a grid, spreading indices over the gray range.
fn render_sheet(data: &[u8], target: Target, bpp: usize, columns: usize) -> CliResult<GrayImage> {
    let tile_size = target.default_tile_size();
    let tiles = unpack_native_tiles(data, target, bpp, tile_size, tile_size)?;
    if tiles.is_empty() {
        return Err("No tiles to render".into());
    }

    let columns = columns.min(tiles.len());
    let rows = tiles.len().div_ceil(columns);
    let max_index = ((1u32 << bpp) - 1).max(1);
    let mut sheet = GrayImage::new((columns * tile_size) as u32, (rows * tile_size) as u32);

    for (n, tile) in tiles.iter().enumerate() {
        let (ox, oy) = ((n % columns) * tile_size, (n / columns) * tile_size);
        for (i, &index) in tile.iter().enumerate() {
            let shade = (u32::from(index) * 255 / max_index) as u8;
            let (x, y) = (ox + i % tile_size, oy + i / tile_size);
            sheet.put_pixel(x as u32, y as u32, image::Luma([shade]));
        }
    }
    Ok(sheet)
}
