//! Inkpad Core Library
//!
//! Platform-agnostic stroke smoothing, raster undo history and gesture
//! handling for the Inkpad drawing surface. Rasterization itself is supplied
//! by the host through the [`RasterSurface`] capability.

pub mod config;
pub mod controller;
pub mod history;
pub mod image;
pub mod input;
pub mod renderer;
pub mod smoothing;
pub mod stroke;
pub mod style;
pub mod surface;

pub use config::{CanvasConfig, ConfigError, ConfigResult, DEFAULT_UNDO_DEPTH};
pub use controller::{CanvasController, InvalidGesture};
pub use history::HistoryStack;
pub use image::{CanvasImage, ImageError, ImageSize};
pub use input::{ContactId, GestureEvent, GesturePhase};
pub use renderer::StrokeRenderer;
pub use smoothing::{PointWindow, WINDOW_LEN, finish, smooth};
pub use stroke::{PathSegment, StrokePath};
pub use style::{CompositeMode, LineCap, SerializableColor, StrokeStyle};
pub use surface::{RasterSurface, RenderError, RenderResult, SurfaceFrame};
