//! Bounded undo/redo history of committed canvas images.

use crate::image::CanvasImage;
use std::collections::VecDeque;

/// Undo/redo stacks of whole-canvas snapshots.
///
/// The backlog always holds at least one image (the base state) and at most
/// `capacity + 1`, so `capacity` undos are possible. The forward log holds
/// undone images until the next commit.
#[derive(Debug, Clone)]
pub struct HistoryStack {
    /// Undo-eligible images, oldest first. Last entry is the visible image.
    backlog: VecDeque<CanvasImage>,
    /// Redo-eligible images, newest last.
    forward_log: Vec<CanvasImage>,
    /// Maximum number of undo steps.
    capacity: usize,
}

impl HistoryStack {
    /// Create a history whose base state is `base`. Capacity is clamped to at least 1.
    pub fn new(base: CanvasImage, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let mut backlog = VecDeque::with_capacity(capacity + 2);
        backlog.push_back(base);
        Self {
            backlog,
            forward_log: Vec::new(),
            capacity,
        }
    }

    /// Push a newly committed image and drop the redo history.
    pub fn commit(&mut self, image: CanvasImage) {
        self.forward_log.clear();
        self.push_backlog(image);
    }

    /// Step back one image. At the base state this is a no-op.
    ///
    /// Returns the image that is now current.
    pub fn undo(&mut self) -> CanvasImage {
        if self.backlog.len() > 1 {
            if let Some(image) = self.backlog.pop_back() {
                self.forward_log.push(image);
            }
        }
        self.current().clone()
    }

    /// Re-apply the most recently undone image, if any.
    ///
    /// Returns the image that is now current.
    pub fn redo(&mut self) -> CanvasImage {
        if let Some(image) = self.forward_log.pop() {
            self.push_backlog(image);
        }
        self.current().clone()
    }

    /// The visible image (top of the backlog).
    pub fn current(&self) -> &CanvasImage {
        // The backlog is created non-empty and eviction never takes the last entry.
        &self.backlog[self.backlog.len() - 1]
    }

    /// Drop the redo history.
    pub fn clear_forward(&mut self) {
        self.forward_log.clear();
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        self.backlog.len() > 1
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.forward_log.is_empty()
    }

    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    pub fn forward_len(&self) -> usize {
        self.forward_log.len()
    }

    /// Iterate the backlog, oldest first.
    pub fn backlog(&self) -> impl Iterator<Item = &CanvasImage> {
        self.backlog.iter()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the undo depth. Takes effect at the next push.
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
    }

    fn push_backlog(&mut self, image: CanvasImage) {
        self.backlog.push_back(image);
        while self.backlog.len() > self.capacity + 1 {
            self.backlog.pop_front();
            log::debug!("History full, evicted oldest image (capacity {})", self.capacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::ImageSize;

    /// Distinct 1x1 images tagged by their first byte.
    fn image(tag: u8) -> CanvasImage {
        CanvasImage::from_premultiplied_rgba(ImageSize::new(1, 1), vec![tag, 0, 0, 255]).unwrap()
    }

    fn tags(history: &HistoryStack) -> Vec<u8> {
        history.backlog().map(|img| img.pixels()[0]).collect()
    }

    #[test]
    fn test_undo_floor() {
        let base = image(0);
        let mut history = HistoryStack::new(base.clone(), 10);
        history.commit(image(1));
        history.commit(image(2));

        history.undo();
        history.undo();
        assert!(history.current().ptr_eq(&base));

        for _ in 0..5 {
            let current = history.undo();
            assert!(current.ptr_eq(&base));
        }
        assert_eq!(history.backlog_len(), 1);
        assert!(!history.can_undo());
    }

    #[test]
    fn test_capacity_bound() {
        let capacity = 3;
        let mut history = HistoryStack::new(image(0), capacity);
        for tag in 1..=7 {
            history.commit(image(tag));
            assert!(history.backlog_len() <= capacity + 1);
        }

        // Most recent capacity + 1 commits, oldest evicted first
        assert_eq!(tags(&history), vec![4, 5, 6, 7]);
    }

    #[test]
    fn test_round_trip() {
        let mut history = HistoryStack::new(image(0), 10);
        let latest = image(1);
        history.commit(latest.clone());

        history.undo();
        let current = history.redo();
        assert!(current.ptr_eq(&latest));
        assert!(history.current().ptr_eq(&latest));
    }

    #[test]
    fn test_redo_without_forward_log() {
        let mut history = HistoryStack::new(image(0), 10);
        history.commit(image(1));

        let before = history.current().clone();
        let after = history.redo();
        assert!(after.ptr_eq(&before));
        assert!(!history.can_redo());
    }

    #[test]
    fn test_commit_clears_forward_log() {
        let mut history = HistoryStack::new(image(0), 10);
        history.commit(image(1));
        history.undo();
        assert!(history.can_redo());

        history.commit(image(2));
        assert!(!history.can_redo());
        assert_eq!(tags(&history), vec![0, 2]);
    }

    #[test]
    fn test_undo_depth_two_scenario() {
        let mut history = HistoryStack::new(image(0), 2);
        for tag in [b'A', b'B', b'C', b'D'] {
            history.commit(image(tag));
        }
        assert_eq!(tags(&history), vec![b'B', b'C', b'D']);

        assert_eq!(history.undo().pixels()[0], b'C');
        assert_eq!(history.forward_len(), 1);
        assert_eq!(history.undo().pixels()[0], b'B');
        assert_eq!(history.forward_len(), 2);
        assert_eq!(history.undo().pixels()[0], b'B');

        assert_eq!(history.redo().pixels()[0], b'C');

        history.clear_forward();
        history.commit(image(b'E'));
        assert_eq!(tags(&history), vec![b'B', b'C', b'E']);
        assert_eq!(history.redo().pixels()[0], b'E');
    }

    #[test]
    fn test_shrinking_capacity_applies_on_next_push() {
        let mut history = HistoryStack::new(image(0), 5);
        for tag in 1..=4 {
            history.commit(image(tag));
        }
        history.set_capacity(1);
        assert_eq!(history.backlog_len(), 5);

        history.commit(image(5));
        assert_eq!(tags(&history), vec![4, 5]);

        history.set_capacity(0);
        assert_eq!(history.capacity(), 1);
    }
}
