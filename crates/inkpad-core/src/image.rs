//! Immutable raster snapshots of the canvas.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Bytes per premultiplied RGBA8 pixel.
const BYTES_PER_PIXEL: usize = 4;

/// Image construction errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImageError {
    #[error("Pixel buffer is {actual} bytes, expected {expected} for {width}x{height}")]
    BufferSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Total pixel count.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Check if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    fn byte_len(&self) -> usize {
        self.area() * BYTES_PER_PIXEL
    }
}

struct ImageData {
    size: ImageSize,
    pixels: Vec<u8>,
}

/// A snapshot of the whole canvas as premultiplied RGBA8 pixels.
///
/// Cloning is cheap and shares the pixel buffer; the buffer is never
/// written after construction.
#[derive(Clone)]
pub struct CanvasImage(Arc<ImageData>);

impl CanvasImage {
    /// A fully transparent image.
    pub fn blank(size: ImageSize) -> Self {
        Self(Arc::new(ImageData {
            size,
            pixels: vec![0; size.byte_len()],
        }))
    }

    /// Wrap a premultiplied RGBA8 buffer, row-major, no padding.
    pub fn from_premultiplied_rgba(size: ImageSize, pixels: Vec<u8>) -> Result<Self, ImageError> {
        let expected = size.byte_len();
        if pixels.len() != expected {
            return Err(ImageError::BufferSize {
                width: size.width,
                height: size.height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self(Arc::new(ImageData { size, pixels })))
    }

    pub fn size(&self) -> ImageSize {
        self.0.size
    }

    pub fn width(&self) -> u32 {
        self.0.size.width
    }

    pub fn height(&self) -> u32 {
        self.0.size.height
    }

    /// Raw premultiplied RGBA8 bytes.
    pub fn pixels(&self) -> &[u8] {
        &self.0.pixels
    }

    /// Premultiplied RGBA of one pixel, if in bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let size = self.0.size;
        if x >= size.width || y >= size.height {
            return None;
        }
        let offset = (y as usize * size.width as usize + x as usize) * BYTES_PER_PIXEL;
        let px = &self.0.pixels[offset..offset + BYTES_PER_PIXEL];
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Check if every pixel is fully transparent.
    pub fn is_blank(&self) -> bool {
        self.0.pixels.iter().all(|&b| b == 0)
    }

    /// Whether both handles share the same snapshot.
    pub fn ptr_eq(&self, other: &CanvasImage) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for CanvasImage {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other) || (self.0.size == other.0.size && self.0.pixels == other.0.pixels)
    }
}

impl Eq for CanvasImage {}

impl fmt::Debug for CanvasImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasImage")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_image() {
        let image = CanvasImage::blank(ImageSize::new(4, 3));
        assert_eq!(image.pixels().len(), 48);
        assert!(image.is_blank());
        assert_eq!(image.pixel(3, 2), Some([0, 0, 0, 0]));
        assert_eq!(image.pixel(4, 0), None);
    }

    #[test]
    fn test_buffer_size_checked() {
        let result = CanvasImage::from_premultiplied_rgba(ImageSize::new(2, 2), vec![0; 15]);
        assert!(matches!(
            result,
            Err(ImageError::BufferSize {
                expected: 16,
                actual: 15,
                ..
            })
        ));
    }

    #[test]
    fn test_clone_shares_pixels() {
        let image = CanvasImage::blank(ImageSize::new(2, 2));
        let shared = image.clone();
        let other = CanvasImage::blank(ImageSize::new(2, 2));

        assert!(image.ptr_eq(&shared));
        assert!(!image.ptr_eq(&other));
        // Same content still compares equal
        assert_eq!(image, other);
    }

    #[test]
    fn test_pixel_lookup() {
        let mut pixels = vec![0; 16];
        pixels[12..16].copy_from_slice(&[1, 2, 3, 4]);
        let image = CanvasImage::from_premultiplied_rgba(ImageSize::new(2, 2), pixels).unwrap();

        assert_eq!(image.pixel(1, 1), Some([1, 2, 3, 4]));
        assert!(!image.is_blank());
    }
}
