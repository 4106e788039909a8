//! Native palette words.
//!
//! Each color is one little-endian 16-bit word:
//!
//! ```text
//! BGR555 (snes, snes_mode7, gb, gbc)   0bbbbbgg gggrrrrr
//! GRB333 (pce, pce_sprite)             0000000g ggrrrbbb
//! ```

use crate::color::NativeColor;
use crate::target::ColorFormat;
use crate::{Result, Target, TileCodecError};

const WORD_SIZE: usize = 2;

fn encode_word(color: NativeColor, format: ColorFormat) -> u16 {
    let (r, g, b) = (
        u16::from(color.r()),
        u16::from(color.g()),
        u16::from(color.b()),
    );
    match format {
        ColorFormat::Bgr555 => (r & 0x1f) | (g & 0x1f) << 5 | (b & 0x1f) << 10,
        ColorFormat::Grb333 => (b & 0x07) | (r & 0x07) << 3 | (g & 0x07) << 6,
    }
}

fn decode_word(word: u16, format: ColorFormat) -> NativeColor {
    match format {
        ColorFormat::Bgr555 => NativeColor::new(
            (word & 0x1f) as u8,
            (word >> 5 & 0x1f) as u8,
            (word >> 10 & 0x1f) as u8,
        ),
        ColorFormat::Grb333 => NativeColor::new(
            (word >> 3 & 0x07) as u8,
            (word >> 6 & 0x07) as u8,
            (word & 0x07) as u8,
        ),
    }
}

/// Packs one native color into its 2-byte hardware word.
///
/// Returns an empty vector for a target without a native color format.
pub fn pack_native_color(color: NativeColor, target: Target) -> Vec<u8> {
    match target.color_format() {
        Some(format) => encode_word(color, format).to_le_bytes().to_vec(),
        None => {
            tracing::debug!("no native color format for target {target}, packing nothing");
            Vec::new()
        }
    }
}

/// Packs a palette into consecutive hardware words.
pub fn pack_native_colors(colors: &[NativeColor], target: Target) -> Vec<u8> {
    let Some(format) = target.color_format() else {
        tracing::debug!("no native color format for target {target}, packing nothing");
        return Vec::new();
    };

    let mut out = Vec::with_capacity(colors.len() * WORD_SIZE);
    for &color in colors {
        out.extend_from_slice(&encode_word(color, format).to_le_bytes());
    }
    out
}

/// Decodes native palette bytes into opaque native colors.
///
/// Fails with [`TileCodecError::InvalidInputSize`] when the byte length is
/// odd. A target without a native color format yields an empty palette.
pub fn unpack_native_colors(bytes: &[u8], target: Target) -> Result<Vec<NativeColor>> {
    let Some(format) = target.color_format() else {
        tracing::debug!("no native color format for target {target}, unpacking nothing");
        return Ok(Vec::new());
    };

    if bytes.len() % WORD_SIZE != 0 {
        return Err(TileCodecError::InvalidInputSize {
            target,
            len: bytes.len(),
            multiple: WORD_SIZE,
        });
    }

    Ok(bytes
        .chunks_exact(WORD_SIZE)
        .map(|w| decode_word(u16::from_le_bytes([w[0], w[1]]), format))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bgr555_fields() {
        assert_eq!(pack_native_color(NativeColor::new(0x1f, 0, 0), Target::Snes), [0x1f, 0x00]);
        assert_eq!(pack_native_color(NativeColor::new(0, 0x1f, 0), Target::Snes), [0xe0, 0x03]);
        assert_eq!(pack_native_color(NativeColor::new(0, 0, 0x1f), Target::Snes), [0x00, 0x7c]);
    }

    #[test]
    fn test_grb333_fields() {
        assert_eq!(pack_native_color(NativeColor::new(0, 0, 7), Target::Pce), [0x07, 0x00]);
        assert_eq!(pack_native_color(NativeColor::new(7, 0, 0), Target::Pce), [0x38, 0x00]);
        assert_eq!(pack_native_color(NativeColor::new(0, 7, 0), Target::Pce), [0xc0, 0x01]);
    }

    #[test]
    fn test_unused_bits_ignored() {
        let colors = unpack_native_colors(&[0xff, 0xff], Target::Snes).unwrap();
        assert_eq!(colors, vec![NativeColor::new(0x1f, 0x1f, 0x1f)]);
        let colors = unpack_native_colors(&[0xff, 0xff], Target::PceSprite).unwrap();
        assert_eq!(colors, vec![NativeColor::new(7, 7, 7)]);
    }
}
