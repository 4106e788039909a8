//! Native tile data.
//!
//! Three layouts are produced:
//!
//! - **Interleaved** (snes, gb, gbc, pce): an 8x8 tile is `bpp / 2` blocks of
//!   16 bytes. Each block holds two bitplanes, one byte per plane per row,
//!   the two planes alternating row by row. The leftmost pixel is bit 7.
//! - **Linear** (snes_mode7): one byte per pixel, unchanged.
//! - **Planar** (pce_sprite): four bitplanes stored one after the other. Each
//!   plane byte covers 8 consecutive pixels, the first pixel in bit 0.

use crate::target::TileFormat;
use crate::{Result, Target, TileCodecError};

const TILE_DIM: usize = 8;
const TILE_PIXELS: usize = TILE_DIM * TILE_DIM;
/// Bytes in one two-bitplane block of an interleaved tile.
const BLOCK_SIZE: usize = TILE_DIM * 2;
const SPRITE_PLANES: usize = 4;
const MAX_BPP: usize = 8;

fn check_geometry(target: Target, width: usize, height: usize) -> Result<()> {
    if width != TILE_DIM || height != TILE_DIM {
        return Err(TileCodecError::InvalidTileGeometry {
            target,
            width,
            height,
        });
    }
    Ok(())
}

/// Interleaved tiles hold whole two-bitplane blocks, so bpp must be even.
fn check_bpp(target: Target, bpp: usize) -> Result<()> {
    if bpp == 0 || bpp > MAX_BPP || bpp % 2 != 0 {
        return Err(TileCodecError::InvalidBitDepth { target, bpp });
    }
    Ok(())
}

/// Encodes bitplanes `plane` and `plane + 1` of an 8x8 tile as one block.
fn pack_2bpp_block(indices: &[u8], plane: usize) -> [u8; BLOCK_SIZE] {
    let mut block = [0u8; BLOCK_SIZE];
    if indices.is_empty() {
        return block;
    }

    for y in 0..TILE_DIM {
        for x in 0..TILE_DIM {
            let index = indices[y * TILE_DIM + x];
            let bit = 7 - x;
            block[y * 2] |= (index >> plane & 1) << bit;
            block[y * 2 + 1] |= (index >> (plane + 1) & 1) << bit;
        }
    }
    block
}

/// Gathers one bitplane of a sprite, 8 pixels per byte.
fn pack_bitplane(indices: &[u8], plane: usize) -> Vec<u8> {
    indices
        .chunks_exact(8)
        .map(|group| {
            group
                .iter()
                .enumerate()
                .fold(0u8, |byte, (b, &index)| byte | (index >> plane & 1) << b)
        })
        .collect()
}

/// ORs bitplane `plane` of an interleaved tile into `out`.
fn add_bitplane(out: &mut [u8], bytes: &[u8], plane: usize) {
    let offset = (plane >> 1) * BLOCK_SIZE + (plane & 1);
    for y in 0..TILE_DIM {
        let row = bytes[offset + y * 2];
        for x in 0..TILE_DIM {
            out[y * TILE_DIM + x] |= (row >> (7 - x) & 1) << plane;
        }
    }
}

/// Encodes a pixel-index tile into the target's native tile bytes.
///
/// Interleaved targets only accept 8x8 tiles with an even bpp of 2 to 8 and
/// write `bpp / 2` blocks; an empty `indices` slice packs to zero blocks. Mode 7 tiles pass through
/// unchanged. Sprite tiles are split into four bitplanes and need a multiple
/// of 8 indices. [`Target::None`] packs to nothing.
pub fn pack_native_tile(
    indices: &[u8],
    target: Target,
    bpp: usize,
    width: usize,
    height: usize,
) -> Result<Vec<u8>> {
    match target.tile_format() {
        Some(TileFormat::Interleaved) => {
            check_geometry(target, width, height)?;
            check_bpp(target, bpp)?;
            if !indices.is_empty() && indices.len() != TILE_PIXELS {
                return Err(TileCodecError::InvalidInputSize {
                    target,
                    len: indices.len(),
                    multiple: TILE_PIXELS,
                });
            }

            let blocks = bpp / 2;
            let mut out = Vec::with_capacity(blocks * BLOCK_SIZE);
            for block in 0..blocks {
                out.extend_from_slice(&pack_2bpp_block(indices, block * 2));
            }
            Ok(out)
        }

        Some(TileFormat::Linear) => Ok(indices.to_vec()),

        Some(TileFormat::Planar) => {
            if indices.len() % 8 != 0 {
                return Err(TileCodecError::InvalidInputSize {
                    target,
                    len: indices.len(),
                    multiple: 8,
                });
            }

            let mut out = Vec::with_capacity(indices.len() / 8 * SPRITE_PLANES);
            for plane in 0..SPRITE_PLANES {
                out.extend(pack_bitplane(indices, plane));
            }
            Ok(out)
        }

        None => {
            tracing::debug!("no native tile format for target {target}, packing nothing");
            Ok(Vec::new())
        }
    }
}

/// Decodes native tile bytes back into a `width * height` pixel-index tile.
///
/// Sprite tiles cannot be decoded and fail with
/// [`TileCodecError::NotImplemented`]. [`Target::None`] decodes to an
/// all-zero tile, or an empty one when `width * height` overflows.
pub fn unpack_native_tile(
    bytes: &[u8],
    target: Target,
    bpp: usize,
    width: usize,
    height: usize,
) -> Result<Vec<u8>> {
    match target.tile_format() {
        Some(TileFormat::Interleaved) => {
            check_geometry(target, width, height)?;
            check_bpp(target, bpp)?;
            let needed = bpp / 2 * BLOCK_SIZE;
            if bytes.len() < needed {
                return Err(TileCodecError::InvalidInputSize {
                    target,
                    len: bytes.len(),
                    multiple: needed,
                });
            }

            let mut out = vec![0u8; TILE_PIXELS];
            for plane in 0..bpp {
                add_bitplane(&mut out, bytes, plane);
            }
            Ok(out)
        }

        Some(TileFormat::Linear) => Ok(bytes.to_vec()),

        Some(TileFormat::Planar) => Err(TileCodecError::NotImplemented {
            target,
            what: "decoding native sprite tiles",
        }),

        None => {
            tracing::debug!("no native tile format for target {target}, unpacking zero tile");
            match width.checked_mul(height) {
                Some(len) => Ok(vec![0u8; len]),
                None => Ok(Vec::new()),
            }
        }
    }
}

/// Number of bytes one packed tile occupies. 0 for [`Target::None`].
pub fn native_tile_size(target: Target, bpp: usize, width: usize, height: usize) -> usize {
    match target.tile_format() {
        Some(TileFormat::Interleaved) => bpp / 2 * BLOCK_SIZE,
        Some(TileFormat::Linear) => width.saturating_mul(height),
        Some(TileFormat::Planar) => width.saturating_mul(height) / 8 * SPRITE_PLANES,
        None => 0,
    }
}

/// Splits a stream of packed tiles and decodes each of them.
///
/// The stream length must be a multiple of [`native_tile_size`].
pub fn unpack_native_tiles(
    bytes: &[u8],
    target: Target,
    bpp: usize,
    width: usize,
    height: usize,
) -> Result<Vec<Vec<u8>>> {
    let Some(format) = target.tile_format() else {
        tracing::debug!("no native tile format for target {target}, unpacking nothing");
        return Ok(Vec::new());
    };
    if format == TileFormat::Interleaved {
        check_bpp(target, bpp)?;
    }

    let tile_size = native_tile_size(target, bpp, width, height);
    if tile_size == 0 {
        return Err(TileCodecError::InvalidTileGeometry {
            target,
            width,
            height,
        });
    }
    if bytes.len() % tile_size != 0 {
        return Err(TileCodecError::InvalidInputSize {
            target,
            len: bytes.len(),
            multiple: tile_size,
        });
    }

    tracing::trace!("unpacking {} {target} tiles", bytes.len() / tile_size);
    bytes
        .chunks_exact(tile_size)
        .map(|tile| unpack_native_tile(tile, target, bpp, width, height))
        .collect()
}
