//! tiny-skia backed raster surface.

use inkpad_core::{
    CanvasImage, CompositeMode, ImageSize, LineCap, RasterSurface, RenderError, RenderResult,
    StrokeStyle, SurfaceFrame,
};
use kurbo::{BezPath, PathEl, Point};
use peniko::Color;
use tiny_skia::{
    BlendMode, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, PixmapRef, Stroke, Transform,
};

/// Largest width or height a frame may have.
pub const MAX_DIMENSION: u32 = 32767;

/// CPU raster surface allocating tiny-skia pixmaps.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    max_dimension: u32,
    anti_alias: bool,
}

impl Default for PixmapSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl PixmapSurface {
    /// Create a surface with anti-aliasing enabled.
    pub fn new() -> Self {
        Self {
            max_dimension: MAX_DIMENSION,
            anti_alias: true,
        }
    }

    /// Limit frame dimensions. Larger requests fail as unavailable.
    pub fn with_max_dimension(mut self, max_dimension: u32) -> Self {
        self.max_dimension = max_dimension;
        self
    }

    /// Enable or disable anti-aliased strokes.
    pub fn with_anti_alias(mut self, anti_alias: bool) -> Self {
        self.anti_alias = anti_alias;
        self
    }
}

impl RasterSurface for PixmapSurface {
    type Frame = PixmapFrame;

    fn begin_frame(&mut self, size: ImageSize) -> RenderResult<PixmapFrame> {
        if size.is_empty() || size.width > self.max_dimension || size.height > self.max_dimension {
            return Err(RenderError::SurfaceUnavailable(format!(
                "Invalid dimensions: width={}, height={}",
                size.width, size.height
            )));
        }

        let pixmap = Pixmap::new(size.width, size.height).ok_or_else(|| {
            RenderError::SurfaceUnavailable(format!(
                "Failed to allocate {}x{} pixmap",
                size.width, size.height
            ))
        })?;
        log::trace!("Allocated {}x{} frame", size.width, size.height);

        Ok(PixmapFrame {
            pixmap,
            anti_alias: self.anti_alias,
        })
    }
}

/// One tiny-skia pixmap being painted.
pub struct PixmapFrame {
    pixmap: Pixmap,
    anti_alias: bool,
}

impl SurfaceFrame for PixmapFrame {
    fn draw_image(&mut self, image: &CanvasImage) -> RenderResult<()> {
        if image.width() == self.pixmap.width() && image.height() == self.pixmap.height() {
            self.pixmap.data_mut().copy_from_slice(image.pixels());
            return Ok(());
        }

        let source = PixmapRef::from_bytes(image.pixels(), image.width(), image.height())
            .ok_or_else(|| {
                RenderError::SurfaceUnavailable(format!(
                    "Cannot read {}x{} image",
                    image.width(),
                    image.height()
                ))
            })?;
        let paint = PixmapPaint {
            blend_mode: BlendMode::Source,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, source, &paint, Transform::identity(), None);
        Ok(())
    }

    fn draw_path(&mut self, path: &BezPath, style: &StrokeStyle) -> RenderResult<()> {
        if !style.line_width.is_finite() || style.line_width < 0.0 {
            return Err(RenderError::InvalidStyle(format!(
                "line width {}",
                style.line_width
            )));
        }
        let paint = stroke_paint(style, self.anti_alias);
        let (outline, dots) = convert_path(path);

        if let Some(outline) = outline {
            let stroke = Stroke {
                width: style.line_width as f32,
                line_cap: skia_line_cap(style.line_cap),
                line_join: tiny_skia::LineJoin::Round,
                ..Stroke::default()
            };
            self.pixmap
                .stroke_path(&outline, &paint, &stroke, Transform::identity(), None);
        }

        // Subpaths without any segment still leave a mark the size of the cap.
        for center in dots {
            if let Some(dot) = dot_path(center, style) {
                self.pixmap
                    .fill_path(&dot, &paint, FillRule::Winding, Transform::identity(), None);
            }
        }
        Ok(())
    }

    fn snapshot(self) -> RenderResult<CanvasImage> {
        let size = ImageSize::new(self.pixmap.width(), self.pixmap.height());
        CanvasImage::from_premultiplied_rgba(size, self.pixmap.take())
            .map_err(|e| RenderError::SurfaceUnavailable(e.to_string()))
    }
}

fn stroke_paint(style: &StrokeStyle, anti_alias: bool) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias,
        blend_mode: skia_blend_mode(style.composite_mode),
        ..Paint::default()
    };
    if style.composite_mode.is_erase() {
        // Destination-out only reads source coverage and alpha.
        let alpha = (style.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
        paint.set_color_rgba8(0, 0, 0, alpha);
    } else {
        paint.set_color(skia_color(style.color_with_opacity()));
    }
    paint
}

fn skia_color(color: Color) -> tiny_skia::Color {
    let rgba = color.to_rgba8();
    tiny_skia::Color::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

fn skia_blend_mode(mode: CompositeMode) -> BlendMode {
    match mode {
        CompositeMode::Normal => BlendMode::SourceOver,
        CompositeMode::Erase => BlendMode::DestinationOut,
        CompositeMode::Multiply => BlendMode::Multiply,
        CompositeMode::Screen => BlendMode::Screen,
        CompositeMode::Darken => BlendMode::Darken,
        CompositeMode::Lighten => BlendMode::Lighten,
    }
}

fn skia_line_cap(cap: LineCap) -> tiny_skia::LineCap {
    match cap {
        LineCap::Round => tiny_skia::LineCap::Round,
        LineCap::Butt => tiny_skia::LineCap::Butt,
        LineCap::Square => tiny_skia::LineCap::Square,
    }
}

/// Convert to a tiny-skia path, collecting the positions of subpaths that
/// consist of a lone move.
fn convert_path(path: &BezPath) -> (Option<tiny_skia::Path>, Vec<Point>) {
    let mut builder = PathBuilder::new();
    let mut dots = Vec::new();
    let mut lone_move: Option<Point> = None;

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => {
                if let Some(previous) = lone_move.replace(p) {
                    dots.push(previous);
                }
                builder.move_to(p.x as f32, p.y as f32);
            }
            PathEl::LineTo(p) => {
                lone_move = None;
                builder.line_to(p.x as f32, p.y as f32);
            }
            PathEl::QuadTo(c, p) => {
                lone_move = None;
                builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32);
            }
            PathEl::CurveTo(c1, c2, p) => {
                lone_move = None;
                builder.cubic_to(
                    c1.x as f32,
                    c1.y as f32,
                    c2.x as f32,
                    c2.y as f32,
                    p.x as f32,
                    p.y as f32,
                );
            }
            PathEl::ClosePath => {
                lone_move = None;
                builder.close();
            }
        }
    }
    dots.extend(lone_move);

    (builder.finish(), dots)
}

fn dot_path(center: Point, style: &StrokeStyle) -> Option<tiny_skia::Path> {
    let radius = (style.line_width / 2.0) as f32;
    let (x, y) = (center.x as f32, center.y as f32);
    match style.line_cap {
        LineCap::Round => PathBuilder::from_circle(x, y, radius),
        LineCap::Square => {
            tiny_skia::Rect::from_xywh(x - radius, y - radius, radius * 2.0, radius * 2.0)
                .map(PathBuilder::from_rect)
        }
        LineCap::Butt => None,
    }
}
