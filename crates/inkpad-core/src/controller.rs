//! Gesture state machine tying smoothing, rendering and history together.

use crate::config::{CanvasConfig, ConfigResult};
use crate::history::HistoryStack;
use crate::image::{CanvasImage, ImageSize};
use crate::input::{ContactId, GestureEvent, GesturePhase};
use crate::renderer::StrokeRenderer;
use crate::smoothing::{self, PointWindow};
use crate::stroke::StrokePath;
use crate::style::StrokeStyle;
use crate::surface::RasterSurface;
use kurbo::Point;
use thiserror::Error;

/// Reasons a gesture event is ignored.
///
/// None of these are failures: the host may drop them. They are returned
/// so callers can tell an ignored event from an accepted one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum InvalidGesture {
    #[error("Contact {0:?} ignored while another contact is drawing")]
    ConcurrentContact(ContactId),
    #[error("Contact {0:?} is not the one drawing")]
    ForeignContact(ContactId),
    #[error("No gesture in progress")]
    NoActiveGesture,
    #[error("Canvas input is disabled")]
    InputDisabled,
    #[error("Gesture event has no position")]
    MissingPosition,
}

/// State of the stroke being drawn.
#[derive(Debug)]
struct ActiveGesture {
    /// The only contact allowed to drive this gesture.
    contact: ContactId,
    /// Samples not yet turned into segments.
    window: PointWindow,
    /// Everything emitted so far.
    path: StrokePath,
    /// Style captured at begin.
    style: StrokeStyle,
}

/// Drives a drawing canvas from pointer gestures.
///
/// Idle until a gesture begins; while active, only the contact that began
/// the gesture is tracked. Each finished gesture is rendered over the
/// current image and committed to the history as a new snapshot.
pub struct CanvasController<S> {
    renderer: StrokeRenderer<S>,
    history: HistoryStack,
    config: CanvasConfig,
    /// `Some` while a gesture is active.
    gesture: Option<ActiveGesture>,
    /// Live frame of the gesture in progress, if any segment was emitted.
    preview: Option<CanvasImage>,
    input_enabled: bool,
    needs_redraw: bool,
}

impl<S: RasterSurface> CanvasController<S> {
    /// Create a controller over a blank canvas.
    pub fn new(surface: S, size: ImageSize, config: CanvasConfig) -> ConfigResult<Self> {
        Self::with_base_image(surface, CanvasImage::blank(size), config)
    }

    /// Create a controller whose base state is `base`.
    ///
    /// The base image can never be undone away. Fails if `config` is out of
    /// range.
    pub fn with_base_image(
        surface: S,
        base: CanvasImage,
        config: CanvasConfig,
    ) -> ConfigResult<Self> {
        config.validate()?;
        let history = HistoryStack::new(base, config.undo_depth);
        Ok(Self {
            renderer: StrokeRenderer::new(surface),
            history,
            config,
            gesture: None,
            preview: None,
            input_enabled: true,
            needs_redraw: true,
        })
    }

    /// Dispatch a host pointer event to the matching gesture operation.
    pub fn handle_event(&mut self, event: GestureEvent) -> Result<(), InvalidGesture> {
        let contact = event.contact;
        match (event.phase, event.position) {
            (GesturePhase::Begin, Some(point)) => self.begin_gesture(point, contact),
            (GesturePhase::Move, Some(point)) => self.move_gesture(point, contact),
            (GesturePhase::End, Some(point)) => self.end_gesture(point, contact),
            (GesturePhase::End, None) => self.cancel_gesture(contact),
            (GesturePhase::Cancel, point) => self.finish_gesture(point, contact),
            (GesturePhase::Begin | GesturePhase::Move, None) => {
                rejected(InvalidGesture::MissingPosition)
            }
        }
    }

    /// Start a stroke at `point`.
    pub fn begin_gesture(&mut self, point: Point, contact: ContactId) -> Result<(), InvalidGesture> {
        if !self.input_enabled {
            return rejected(InvalidGesture::InputDisabled);
        }
        if self.gesture.is_some() {
            return rejected(InvalidGesture::ConcurrentContact(contact));
        }

        self.history.clear_forward();

        let mut window = PointWindow::new();
        window.append(point);
        let style = self.config.stroke_style();
        log::debug!("Gesture began for {:?} at {:?} with {:?}", contact, point, style);

        self.gesture = Some(ActiveGesture {
            contact,
            window,
            path: StrokePath::new(),
            style,
        });
        Ok(())
    }

    /// Feed one more sample to the active stroke.
    ///
    /// Re-renders the live preview whenever a curve segment is emitted.
    pub fn move_gesture(&mut self, point: Point, contact: ContactId) -> Result<(), InvalidGesture> {
        let gesture = self.gesture_for(contact)?;
        gesture.window.append(point);

        let emitted = match smoothing::smooth(&mut gesture.window) {
            Some(segments) => {
                gesture.path.extend(segments);
                true
            }
            None => false,
        };

        if emitted {
            self.refresh_preview();
        }
        Ok(())
    }

    /// Finish the stroke at `point` and commit it.
    pub fn end_gesture(&mut self, point: Point, contact: ContactId) -> Result<(), InvalidGesture> {
        self.finish_gesture(Some(point), contact)
    }

    /// Cancel the active stroke.
    ///
    /// A cancelled stroke is committed exactly like an ended one, closing on
    /// the samples received so far. Cancel events carrying a position go
    /// through [`handle_event`](Self::handle_event), which appends it first.
    pub fn cancel_gesture(&mut self, contact: ContactId) -> Result<(), InvalidGesture> {
        self.finish_gesture(None, contact)
    }

    /// Step back one committed stroke.
    ///
    /// Returns whether the committed image changed. A gesture in progress
    /// keeps going and is committed on top of the new current image.
    pub fn undo(&mut self) -> bool {
        let changed = self.history.can_undo();
        self.history.undo();
        self.discard_preview();
        log::debug!("Undo (changed: {}, backlog: {})", changed, self.history.backlog_len());
        changed
    }

    /// Re-apply the last undone stroke.
    ///
    /// Returns whether the committed image changed.
    pub fn redo(&mut self) -> bool {
        let changed = self.history.can_redo();
        if changed {
            self.history.set_capacity(self.config.undo_depth);
        }
        self.history.redo();
        self.discard_preview();
        log::debug!("Redo (changed: {}, backlog: {})", changed, self.history.backlog_len());
        changed
    }

    /// The last committed image.
    pub fn current_image(&self) -> &CanvasImage {
        self.history.current()
    }

    /// What the view should show: the live preview while drawing, otherwise
    /// the last committed image.
    pub fn display_image(&self) -> &CanvasImage {
        self.preview.as_ref().unwrap_or_else(|| self.history.current())
    }

    /// Consume the pending redraw request, if any.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }

    /// Check if a redraw is pending.
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Check if a gesture is active.
    pub fn is_drawing(&self) -> bool {
        self.gesture.is_some()
    }

    /// Path emitted so far by the active gesture.
    pub fn active_path(&self) -> Option<&StrokePath> {
        self.gesture.as_ref().map(|g| &g.path)
    }

    /// Style captured by the active gesture.
    pub fn active_style(&self) -> Option<&StrokeStyle> {
        self.gesture.as_ref().map(|g| &g.style)
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    pub fn size(&self) -> ImageSize {
        self.history.current().size()
    }

    pub fn config(&self) -> &CanvasConfig {
        &self.config
    }

    /// Edit the configuration in place. Changes apply to the next gesture.
    ///
    /// The edit is discarded if the result is out of range.
    pub fn update_config<F>(&mut self, edit: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut CanvasConfig),
    {
        let mut config = self.config.clone();
        edit(&mut config);
        self.set_config(config)
    }

    /// Replace the configuration. Changes apply to the next gesture.
    ///
    /// An out-of-range configuration is rejected and the current one kept.
    pub fn set_config(&mut self, config: CanvasConfig) -> ConfigResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    pub fn input_enabled(&self) -> bool {
        self.input_enabled
    }

    /// Enable or disable new gestures.
    pub fn set_input_enabled(&mut self, enabled: bool) {
        self.input_enabled = enabled;
    }

    /// Flip whether new gestures are accepted and return the new state.
    pub fn toggle_input_enabled(&mut self) -> bool {
        self.input_enabled = !self.input_enabled;
        self.input_enabled
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.renderer.surface_mut()
    }

    fn gesture_for(&mut self, contact: ContactId) -> Result<&mut ActiveGesture, InvalidGesture> {
        match self.gesture.as_mut() {
            None => rejected(InvalidGesture::NoActiveGesture),
            Some(gesture) if gesture.contact != contact => {
                rejected(InvalidGesture::ForeignContact(contact))
            }
            Some(gesture) => Ok(gesture),
        }
    }

    fn take_gesture(&mut self, contact: ContactId) -> Result<ActiveGesture, InvalidGesture> {
        match self.gesture.take() {
            None => rejected(InvalidGesture::NoActiveGesture),
            Some(gesture) if gesture.contact != contact => {
                self.gesture = Some(gesture);
                rejected(InvalidGesture::ForeignContact(contact))
            }
            Some(gesture) => Ok(gesture),
        }
    }

    fn finish_gesture(
        &mut self,
        point: Option<Point>,
        contact: ContactId,
    ) -> Result<(), InvalidGesture> {
        let mut gesture = self.take_gesture(contact)?;
        self.preview = None;
        self.needs_redraw = true;

        if let Some(point) = point {
            gesture.window.append(point);
        }
        // A full window closes with its own cubic; otherwise the leftover
        // samples pick the closing segment.
        match smoothing::smooth(&mut gesture.window) {
            Some(segments) => gesture.path.extend(segments),
            None => gesture.path.extend(smoothing::finish(&gesture.window)),
        }

        if gesture.path.is_empty() {
            log::debug!("Gesture for {:?} ended without samples", contact);
            return Ok(());
        }

        match self
            .renderer
            .render(self.history.current(), &gesture.path, &gesture.style)
        {
            Ok(image) => {
                self.history.set_capacity(self.config.undo_depth);
                self.history.commit(image);
                log::debug!(
                    "Committed stroke of {} segments (backlog: {})",
                    gesture.path.len(),
                    self.history.backlog_len()
                );
            }
            Err(e) => log::warn!("Dropping stroke: {}", e),
        }
        Ok(())
    }

    /// Drop the live frame; the next emission renders a fresh one.
    fn discard_preview(&mut self) {
        self.preview = None;
        self.needs_redraw = true;
    }

    fn refresh_preview(&mut self) {
        let Some(gesture) = &self.gesture else {
            return;
        };
        // Always against the committed image, never a previous preview.
        match self
            .renderer
            .render(self.history.current(), &gesture.path, &gesture.style)
        {
            Ok(image) => {
                self.preview = Some(image);
                self.needs_redraw = true;
            }
            Err(e) => {
                log::warn!("Aborting gesture, preview render failed: {}", e);
                self.gesture = None;
                self.preview = None;
                self.needs_redraw = true;
            }
        }
    }
}

fn rejected<T>(reason: InvalidGesture) -> Result<T, InvalidGesture> {
    log::debug!("Ignoring gesture event: {}", reason);
    Err(reason)
}
