//! Raster surface capability supplied by the host.

use crate::image::{CanvasImage, ImageSize};
use crate::style::StrokeStyle;
use kurbo::BezPath;
use thiserror::Error;

/// Rendering errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The offscreen bitmap could not be allocated or read back.
    #[error("Raster surface unavailable: {0}")]
    SurfaceUnavailable(String),
    /// The style cannot be rasterized, such as a negative or NaN width.
    #[error("Invalid stroke style: {0}")]
    InvalidStyle(String),
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// Allocates offscreen frames.
///
/// Implementations can rasterize on the CPU, hand off to a GPU, or wrap a
/// platform graphics context.
pub trait RasterSurface {
    /// Frame type produced by this surface.
    type Frame: SurfaceFrame;

    /// Allocate a transparent frame of the given size.
    fn begin_frame(&mut self, size: ImageSize) -> RenderResult<Self::Frame>;
}

/// One offscreen bitmap being painted.
pub trait SurfaceFrame {
    /// Paint an image at the origin, replacing the frame contents it covers.
    fn draw_image(&mut self, image: &CanvasImage) -> RenderResult<()>;

    /// Stroke a path with the given style.
    fn draw_path(&mut self, path: &BezPath, style: &StrokeStyle) -> RenderResult<()>;

    /// Read back the frame as an immutable image.
    fn snapshot(self) -> RenderResult<CanvasImage>;
}
