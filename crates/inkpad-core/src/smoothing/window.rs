//! Buffer of raw pointer samples for the stroke in progress.

use kurbo::Point;

/// Number of samples that triggers a mid-gesture curve emission.
pub const WINDOW_LEN: usize = 5;

/// Raw samples waiting to be turned into a curve segment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointWindow {
    points: Vec<Point>,
}

impl PointWindow {
    /// Create an empty window.
    pub fn new() -> Self {
        Self {
            points: Vec::with_capacity(WINDOW_LEN),
        }
    }

    /// Add a sample to the end.
    pub fn append(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Get the number of buffered samples.
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Check if the window is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop all samples.
    pub fn reset(&mut self) {
        self.points.clear();
    }

    /// Keep only the last `n` samples, in order.
    pub fn truncate_keeping_last(&mut self, n: usize) {
        let excess = self.points.len().saturating_sub(n);
        self.points.drain(..excess);
    }

    /// Get the buffered samples, oldest first.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub(crate) fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }
}
