//! Strokes gesture paths onto committed canvas images.

use crate::image::CanvasImage;
use crate::stroke::StrokePath;
use crate::style::StrokeStyle;
use crate::surface::{RasterSurface, RenderResult, SurfaceFrame};

/// Produces candidate frames by painting a path over a base image.
#[derive(Debug, Clone)]
pub struct StrokeRenderer<S> {
    surface: S,
}

impl<S: RasterSurface> StrokeRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self { surface }
    }

    /// Paint `path` over a copy of `base`.
    ///
    /// `base` is never modified. An empty path yields a copy of the base.
    pub fn render(
        &mut self,
        base: &CanvasImage,
        path: &StrokePath,
        style: &StrokeStyle,
    ) -> RenderResult<CanvasImage> {
        let mut frame = self.surface.begin_frame(base.size())?;
        frame.draw_image(base)?;
        if !path.is_empty() {
            frame.draw_path(&path.to_bez_path(), style)?;
        }
        frame.snapshot()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
