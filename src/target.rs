//! Supported display targets and their hardware constants.

use std::fmt;
use std::str::FromStr;

use crate::TileCodecError;

/// A hardware display mode the codec encodes for or decodes from.
///
/// `None` is the unset sentinel. Every capability query is defined for it and
/// answers conservatively, so callers that need strict validation must check
/// for it themselves (or parse with [`FromStr`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Target {
    #[default]
    None,
    Snes,
    SnesMode7,
    Gb,
    Gbc,
    Pce,
    PceSprite,
}

/// On-hardware layout of a palette entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorFormat {
    /// 15-bit word, 5 bits per channel: R in bits 0-4, G in 5-9, B in 10-14.
    Bgr555,
    /// 9-bit word, 3 bits per channel: B in bits 0-2, R in 3-5, G in 6-8.
    Grb333,
}

impl ColorFormat {
    /// Right shift applied to an 8-bit channel on reduction.
    pub const fn shift(self) -> u32 {
        match self {
            ColorFormat::Bgr555 => 3,
            ColorFormat::Grb333 => 5,
        }
    }

    /// Width of a reduced channel in bits.
    pub const fn channel_bits(self) -> u32 {
        8 - self.shift()
    }
}

/// On-hardware layout of pixel-index tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileFormat {
    /// 8x8 tiles built from 16-byte two-bitplane blocks, rows interleaved.
    Interleaved,
    /// One byte per pixel, stored as-is.
    Linear,
    /// Four complete bitplanes stored one after another.
    Planar,
}

/// Snapshot of every capability query for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetCapabilities {
    pub default_bpp: usize,
    pub legal_bpps: &'static [usize],
    pub default_tile_size: usize,
    /// 0 when the hardware imposes no limit
    pub max_tile_count: usize,
    pub default_map_size: usize,
    pub default_palette_count: usize,
    pub tile_flipping: bool,
    pub col0_shared: bool,
    pub col0_shared_for_sprites: bool,
}

impl Target {
    /// Every concrete target, in identifier order.
    pub const ALL: [Target; 6] = [
        Target::Snes,
        Target::SnesMode7,
        Target::Gb,
        Target::Gbc,
        Target::Pce,
        Target::PceSprite,
    ];

    /// Maps an identifier to a target; anything unrecognized is `Target::None`.
    pub fn from_name(name: &str) -> Target {
        match name {
            "snes" => Target::Snes,
            "snes_mode7" => Target::SnesMode7,
            "gb" => Target::Gb,
            "gbc" => Target::Gbc,
            "pce" => Target::Pce,
            "pce_sprite" => Target::PceSprite,
            _ => Target::None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Target::None => "none",
            Target::Snes => "snes",
            Target::SnesMode7 => "snes_mode7",
            Target::Gb => "gb",
            Target::Gbc => "gbc",
            Target::Pce => "pce",
            Target::PceSprite => "pce_sprite",
        }
    }

    pub const fn color_format(self) -> Option<ColorFormat> {
        match self {
            Target::Snes | Target::SnesMode7 | Target::Gb | Target::Gbc => {
                Some(ColorFormat::Bgr555)
            }
            Target::Pce | Target::PceSprite => Some(ColorFormat::Grb333),
            Target::None => None,
        }
    }

    pub const fn tile_format(self) -> Option<TileFormat> {
        match self {
            Target::Snes | Target::Gb | Target::Gbc | Target::Pce => Some(TileFormat::Interleaved),
            Target::SnesMode7 => Some(TileFormat::Linear),
            Target::PceSprite => Some(TileFormat::Planar),
            Target::None => None,
        }
    }

    pub const fn default_bpp(self) -> usize {
        match self {
            Target::Snes => 4,
            Target::SnesMode7 => 8,
            Target::Gb | Target::Gbc => 2,
            Target::Pce | Target::PceSprite => 4,
            Target::None => 4,
        }
    }

    /// Bit depths the hardware can display. Empty for `Target::None`.
    pub const fn legal_bpps(self) -> &'static [usize] {
        match self {
            Target::Snes => &[2, 4, 8],
            Target::SnesMode7 => &[8],
            Target::Gb | Target::Gbc => &[2],
            Target::Pce | Target::PceSprite => &[4],
            Target::None => &[],
        }
    }

    pub fn bpp_allowed(self, bpp: usize) -> bool {
        self.legal_bpps().contains(&bpp)
    }

    pub const fn default_tile_size(self) -> usize {
        match self {
            Target::PceSprite => 16,
            _ => 8,
        }
    }

    pub const fn tile_width_allowed(self, width: usize) -> bool {
        match self {
            Target::Snes => width == 8 || width == 16,
            Target::SnesMode7 | Target::Gb | Target::Gbc | Target::Pce => width == 8,
            Target::PceSprite => width == 16,
            Target::None => false,
        }
    }

    pub const fn tile_height_allowed(self, height: usize) -> bool {
        match self {
            Target::Snes => height == 8 || height == 16,
            Target::SnesMode7 | Target::Gb | Target::Gbc | Target::Pce => height == 8,
            Target::PceSprite => height == 16,
            Target::None => false,
        }
    }

    /// Tiles addressable by the hardware, 0 when not applicable.
    pub const fn max_tile_count(self) -> usize {
        match self {
            Target::Snes => 1024,
            Target::SnesMode7 => 256,
            Target::Gb => 256,
            Target::Gbc => 512,
            Target::Pce => 2048,
            Target::PceSprite | Target::None => 0,
        }
    }

    /// Default background map size in tiles, 0 when the map is sized to the image.
    pub const fn default_map_size(self) -> usize {
        match self {
            Target::Snes => 32,
            Target::SnesMode7 => 128,
            Target::Gb | Target::Gbc | Target::Pce | Target::PceSprite => 0,
            Target::None => 32,
        }
    }

    pub const fn default_palette_count(self) -> usize {
        match self {
            Target::Snes => 8,
            Target::SnesMode7 | Target::Gb => 1,
            Target::Gbc => 8,
            Target::Pce | Target::PceSprite => 16,
            Target::None => 8,
        }
    }

    pub const fn tile_flipping_allowed(self) -> bool {
        matches!(self, Target::Snes | Target::Gbc)
    }

    /// Whether palette index 0 is one color shared by all background palettes.
    pub const fn col0_is_shared(self) -> bool {
        !matches!(self, Target::Gb | Target::Gbc)
    }

    /// Whether palette index 0 is shared (transparent) across sprite palettes.
    pub const fn col0_is_shared_for_sprite(self) -> bool {
        true
    }

    pub fn capabilities(self) -> TargetCapabilities {
        TargetCapabilities {
            default_bpp: self.default_bpp(),
            legal_bpps: self.legal_bpps(),
            default_tile_size: self.default_tile_size(),
            max_tile_count: self.max_tile_count(),
            default_map_size: self.default_map_size(),
            default_palette_count: self.default_palette_count(),
            tile_flipping: self.tile_flipping_allowed(),
            col0_shared: self.col0_is_shared(),
            col0_shared_for_sprites: self.col0_is_shared_for_sprite(),
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<&str> for Target {
    fn from(name: &str) -> Self {
        Target::from_name(name)
    }
}

/// Strict parsing: only the six concrete identifiers are accepted.
impl FromStr for Target {
    type Err = TileCodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Target::from_name(s) {
            Target::None => Err(TileCodecError::UnknownTarget(s.to_string())),
            target => Ok(target),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for target in Target::ALL {
            assert_eq!(Target::from_name(target.name()), target);
            assert_eq!(target.to_string(), target.name());
        }
        assert_eq!(Target::from_name("nes"), Target::None);
        assert_eq!(Target::None.to_string(), "none");
    }

    #[test]
    fn test_strict_parse() {
        assert_eq!("pce_sprite".parse::<Target>(), Ok(Target::PceSprite));
        assert_eq!(
            "none".parse::<Target>(),
            Err(TileCodecError::UnknownTarget("none".to_string()))
        );
    }

    #[test]
    fn test_color_format_widths() {
        assert_eq!(ColorFormat::Bgr555.channel_bits(), 5);
        assert_eq!(ColorFormat::Grb333.channel_bits(), 3);
    }
}
