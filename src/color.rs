//! Conversion between 8-bit RGBA colors and target-native channel ranges.

use std::collections::BTreeSet;

use crate::Target;

/// Alpha values below this are reduced to [`NativeColor::TRANSPARENT`].
pub const ALPHA_THRESHOLD: u8 = 0x80;

/// A standard 32-bit color with 8 bits per channel.
///
/// The packed `u32` form is `0xAARRGGBB`. The all-zero value is the
/// transparent sentinel, distinct from opaque black (`0xFF000000`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    #[inline]
    pub const fn from_u32(argb: u32) -> Self {
        Self {
            r: (argb >> 16) as u8,
            g: (argb >> 8) as u8,
            b: argb as u8,
            a: (argb >> 24) as u8,
        }
    }

    #[inline]
    pub const fn to_u32(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

impl From<u32> for Rgba {
    fn from(argb: u32) -> Self {
        Rgba::from_u32(argb)
    }
}

impl From<Rgba> for u32 {
    fn from(color: Rgba) -> Self {
        color.to_u32()
    }
}

/// A color quantized to a target's hardware channel width.
///
/// Channels hold the reduced values (0..=31 for BGR555 targets, 0..=7 for
/// GRB333 targets). Alpha is 0xff, except for the transparent sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NativeColor(Rgba);

impl NativeColor {
    pub const TRANSPARENT: NativeColor = NativeColor(Rgba::TRANSPARENT);

    /// An opaque native color from already reduced channel values.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self(Rgba::new(r, g, b, 0xff))
    }

    #[inline]
    pub const fn r(self) -> u8 {
        self.0.r
    }

    #[inline]
    pub const fn g(self) -> u8 {
        self.0.g
    }

    #[inline]
    pub const fn b(self) -> u8 {
        self.0.b
    }

    #[inline]
    pub const fn a(self) -> u8 {
        self.0.a
    }

    #[inline]
    pub fn is_transparent(self) -> bool {
        self == NativeColor::TRANSPARENT
    }
}

/// Expands the low `bits` bits of `value` to 8 bits by repeating the bit
/// pattern, so the all-ones value maps to 0xff.
pub fn scale_up(value: u8, bits: u32) -> u8 {
    if bits == 0 {
        return 0;
    }
    if bits >= 8 {
        return value;
    }

    let pattern = u32::from(value) & ((1 << bits) - 1);
    let mut wide = 0u32;
    let mut filled = 0;
    while filled < 8 {
        wide = (wide << bits) | pattern;
        filled += bits;
    }
    (wide >> (filled - 8)) as u8
}

/// Reduces an RGBA color to the target's native channel range.
///
/// Colors with alpha below 0x80 become [`NativeColor::TRANSPARENT`], as does
/// every color for a target without a native color format.
pub fn reduce_color(color: Rgba, target: Target) -> NativeColor {
    let Some(format) = target.color_format() else {
        tracing::debug!("no native color format for target {target}, reducing to transparent");
        return NativeColor::TRANSPARENT;
    };

    if color.a < ALPHA_THRESHOLD {
        return NativeColor::TRANSPARENT;
    }

    let shift = format.shift();
    NativeColor::new(color.r >> shift, color.g >> shift, color.b >> shift)
}

/// Reduces a sequence of colors, preserving order.
pub fn reduce_colors(colors: &[Rgba], target: Target) -> Vec<NativeColor> {
    colors.iter().map(|&c| reduce_color(c, target)).collect()
}

/// Reduces a set of colors; colors that reduce to the same value collapse.
pub fn reduce_color_set(colors: &BTreeSet<Rgba>, target: Target) -> BTreeSet<NativeColor> {
    colors.iter().map(|&c| reduce_color(c, target)).collect()
}

/// Scales a native color back to the 8-bit RGBA range.
///
/// Returns the zero color for a target without a native color format.
pub fn expand_color(color: NativeColor, target: Target) -> Rgba {
    let Some(format) = target.color_format() else {
        tracing::debug!("no native color format for target {target}, expanding to zero");
        return Rgba::default();
    };

    let bits = format.channel_bits();
    Rgba::new(
        scale_up(color.r(), bits),
        scale_up(color.g(), bits),
        scale_up(color.b(), bits),
        scale_up(color.a(), bits),
    )
}

pub fn expand_colors(colors: &[NativeColor], target: Target) -> Vec<Rgba> {
    colors.iter().map(|&c| expand_color(c, target)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_layout() {
        let c = Rgba::from_u32(0x80112233);
        assert_eq!(c, Rgba::new(0x11, 0x22, 0x33, 0x80));
        assert_eq!(c.to_u32(), 0x80112233);
        assert_ne!(Rgba::TRANSPARENT, Rgba::from_u32(0xff000000));
    }

    #[test]
    fn test_scale_up() {
        assert_eq!(scale_up(0x1f, 5), 0xff);
        assert_eq!(scale_up(0x07, 3), 0xff);
        assert_eq!(scale_up(0x10, 5), 0x84);
        assert_eq!(scale_up(0x04, 3), 0x92);
        assert_eq!(scale_up(0, 5), 0);
        // bits above the field are ignored
        assert_eq!(scale_up(0xff, 5), 0xff);
        assert_eq!(scale_up(0xe0, 5), 0x00);
    }

    #[test]
    fn test_reduce_shift() {
        let c = Rgba::new(0xff, 0x80, 0x17, 0xff);
        assert_eq!(reduce_color(c, Target::Snes), NativeColor::new(0x1f, 0x10, 0x02));
        assert_eq!(reduce_color(c, Target::Pce), NativeColor::new(0x07, 0x04, 0x00));
    }
}
