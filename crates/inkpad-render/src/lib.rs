//! Inkpad Render Library
//!
//! CPU rasterization for the Inkpad canvas. [`PixmapSurface`] implements the
//! core `RasterSurface` capability on tiny-skia, and the `export` module moves
//! canvas images in and out of PNG files.

pub mod export;
mod pixmap;

pub use export::{ExportError, ExportResult, decode_png, encode_png};
pub use pixmap::{MAX_DIMENSION, PixmapFrame, PixmapSurface};
