//! # tilecodec
//!
//! Bit-exact conversion between generic RGBA colors / palette-index tiles and
//! the native graphics formats of retro display hardware.
//!
//! ## Targets
//!
//! - **snes**, **snes_mode7**: Super Famicom tiles and Mode 7 (BGR555 colors)
//! - **gb**, **gbc**: Game Boy / Game Boy Color (BGR555 colors, 2bpp tiles)
//! - **pce**, **pce_sprite**: PC Engine backgrounds and sprites (GRB333 colors)
//!
//! ## Quick Start
//!
//! ### Packing a palette
//!
//! ```
//! use tilecodec::{pack_native_colors, reduce_colors, Rgba, Target};
//!
//! let colors = [Rgba::new(0xff, 0x00, 0x00, 0xff), Rgba::new(0x00, 0x00, 0xff, 0xff)];
//! let native = reduce_colors(&colors, Target::Snes);
//! let bytes = pack_native_colors(&native, Target::Snes);
//! assert_eq!(bytes, vec![0x1f, 0x00, 0x00, 0x7c]);
//! ```
//!
//! ### Packing a tile
//!
//! ```
//! use tilecodec::{pack_native_tile, Target};
//!
//! let indices = vec![3u8; 64];
//! let bytes = pack_native_tile(&indices, Target::Gbc, 2, 8, 8)?;
//! assert_eq!(bytes, vec![0xff; 16]);
//! # Ok::<(), tilecodec::TileCodecError>(())
//! ```
//!
//! Unsupported targets ([`Target::None`]) never raise an error: conversions
//! degrade to empty or zero output. Malformed buffers for a supported target
//! always fail with a [`TileCodecError`].

use thiserror::Error;

pub mod color;
pub mod palette;
pub mod target;
pub mod tile;

pub use color::{
    expand_color, expand_colors, reduce_color, reduce_color_set, reduce_colors, scale_up,
    NativeColor, Rgba,
};
pub use palette::{pack_native_color, pack_native_colors, unpack_native_colors};
pub use target::{ColorFormat, Target, TargetCapabilities, TileFormat};
pub use tile::{native_tile_size, pack_native_tile, unpack_native_tile, unpack_native_tiles};

/// Errors that can occur while converting to or from a native format.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TileCodecError {
    /// Buffer length is not a multiple of what the target format requires
    #[error("{target}: input size {len} is not a multiple of {multiple}")]
    InvalidInputSize {
        target: Target,
        len: usize,
        multiple: usize,
    },

    /// Tile geometry the target format cannot encode
    #[error("{target}: tile size {width}x{height} not supported (expected 8x8)")]
    InvalidTileGeometry {
        target: Target,
        width: usize,
        height: usize,
    },

    /// Bit depth outside the range a bitplane format can hold
    #[error("{target}: cannot encode {bpp} bits per pixel")]
    InvalidBitDepth { target: Target, bpp: usize },

    /// Conversion direction the target format does not provide
    #[error("{target}: {what} not implemented")]
    NotImplemented { target: Target, what: &'static str },

    /// Target identifier not recognized by strict parsing
    #[error("unknown target \"{0}\"")]
    UnknownTarget(String),
}

/// Result type for tile codec operations.
pub type Result<T> = core::result::Result<T, TileCodecError>;
