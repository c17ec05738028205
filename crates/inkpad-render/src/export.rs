//! PNG import and export of canvas images.
//!
//! Canvas images hold premultiplied pixels while PNG stores straight alpha,
//! so both directions convert through tiny-skia's color types.

use inkpad_core::{CanvasImage, ImageError, ImageSize};
use thiserror::Error;
use tiny_skia::{ColorU8, PremultipliedColorU8};

/// PNG conversion errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PNG encoding error: {0}")]
    Encoding(#[from] png::EncodingError),
    #[error("PNG decoding error: {0}")]
    Decoding(#[from] png::DecodingError),
    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColor(png::ColorType),
    #[error("Invalid image: {0}")]
    Image(#[from] ImageError),
}

/// Result type for PNG conversions.
pub type ExportResult<T> = Result<T, ExportError>;

/// Encode a canvas image as an RGBA8 PNG.
pub fn encode_png(image: &CanvasImage) -> ExportResult<Vec<u8>> {
    let rgba: Vec<u8> = image
        .pixels()
        .chunks_exact(4)
        .flat_map(|px| {
            let color = demultiply(px);
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&rgba)?;
    }
    Ok(png_data)
}

/// Decode a PNG into a canvas image.
///
/// Palette, grayscale and 16-bit images are normalized to RGBA8.
pub fn decode_png(bytes: &[u8]) -> ExportResult<CanvasImage> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    let straight: Vec<[u8; 4]> = match info.color_type {
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|px| [px[0], px[1], px[2], px[3]])
            .collect(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2], 255])
            .collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .map(|px| [px[0], px[0], px[0], px[1]])
            .collect(),
        png::ColorType::Grayscale => data.iter().map(|&v| [v, v, v, 255]).collect(),
        other => return Err(ExportError::UnsupportedColor(other)),
    };

    let pixels = straight
        .into_iter()
        .flat_map(|[r, g, b, a]| {
            let color = ColorU8::from_rgba(r, g, b, a).premultiply();
            [color.red(), color.green(), color.blue(), color.alpha()]
        })
        .collect();

    log::debug!("Decoded {}x{} PNG ({:?})", info.width, info.height, info.color_type);
    Ok(CanvasImage::from_premultiplied_rgba(
        ImageSize::new(info.width, info.height),
        pixels,
    )?)
}

fn demultiply(px: &[u8]) -> ColorU8 {
    // Channels above alpha are not valid premultiplied data; clamp them.
    let a = px[3];
    PremultipliedColorU8::from_rgba(px[0].min(a), px[1].min(a), px[2].min(a), a)
        .map(|c| c.demultiply())
        .unwrap_or_else(|| ColorU8::from_rgba(0, 0, 0, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_demultiplies() {
        // Half-transparent red, premultiplied
        let image =
            CanvasImage::from_premultiplied_rgba(ImageSize::new(1, 1), vec![128, 0, 0, 128])
                .unwrap();
        let png_data = encode_png(&image).unwrap();

        let decoder = png::Decoder::new(png_data.as_slice());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();

        assert_eq!(info.color_type, png::ColorType::Rgba);
        assert_eq!(&buf[..4], &[255, 0, 0, 128]);
    }

    #[test]
    fn test_decode_rgb() {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, 2, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[10, 20, 30, 40, 50, 60]).unwrap();
        }

        let image = decode_png(&png_data).unwrap();
        assert_eq!(image.size(), ImageSize::new(2, 1));
        assert_eq!(image.pixel(0, 0), Some([10, 20, 30, 255]));
        assert_eq!(image.pixel(1, 0), Some([40, 50, 60, 255]));
    }

    #[test]
    fn test_transparent_pixels_survive_export() {
        let image = CanvasImage::blank(ImageSize::new(3, 2));
        let decoded = decode_png(&encode_png(&image).unwrap()).unwrap();
        assert_eq!(decoded, image);
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_png(b"not a png"),
            Err(ExportError::Decoding(_))
        ));
    }
}
