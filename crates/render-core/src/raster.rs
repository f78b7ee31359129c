//! Raster images decoded for placement on a page.

use crate::error::RenderError;
use image::{ColorType, GenericImageView, ImageFormat};
use leafpress_types::Size;
use std::path::Path;

/// Pixel data in the form a PDF image XObject stores it.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageData {
    /// The original RGB JPEG stream, embedded as-is.
    Jpeg(Vec<u8>),
    /// 8-bit RGB samples plus an optional 8-bit alpha channel.
    Rgb { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub data: ImageData,
}

impl RasterImage {
    /// Decodes PNG or JPEG bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RenderError> {
        let format = image::guess_format(bytes)?;
        let decoded = image::load_from_memory_with_format(bytes, format)?;
        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::Image("image has no pixels".to_string()));
        }

        let data = if format == ImageFormat::Jpeg && decoded.color() == ColorType::Rgb8 {
            ImageData::Jpeg(bytes.to_vec())
        } else if decoded.color().has_alpha() {
            let rgba = decoded.to_rgba8();
            let mut rgb = Vec::with_capacity((width * height * 3) as usize);
            let mut alpha = Vec::with_capacity((width * height) as usize);
            for pixel in rgba.pixels() {
                rgb.extend_from_slice(&pixel.0[..3]);
                alpha.push(pixel.0[3]);
            }
            let opaque = alpha.iter().all(|a| *a == u8::MAX);
            ImageData::Rgb {
                rgb,
                alpha: (!opaque).then_some(alpha),
            }
        } else {
            ImageData::Rgb {
                rgb: decoded.to_rgb8().into_raw(),
                alpha: None,
            }
        };

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    pub fn native_size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

/// Scales `native` to fit inside `max_width` x `max_height`, keeping its
/// aspect ratio and never enlarging it.
pub fn fit_within(native: Size, max_width: f32, max_height: f32) -> Size {
    if native.width <= 0.0 || native.height <= 0.0 {
        return Size::default();
    }
    let scale = (max_width / native.width)
        .min(max_height / native.height)
        .min(1.0)
        .max(0.0);
    Size::new(native.width * scale, native.height * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb, Rgba};
    use std::io::Cursor;

    fn encode(image: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn fit_never_upscales() {
        assert_eq!(fit_within(Size::new(100.0, 50.0), 400.0, 400.0), Size::new(100.0, 50.0));
    }

    #[test]
    fn fit_preserves_aspect_ratio() {
        let fitted = fit_within(Size::new(400.0, 200.0), 100.0, 100.0);
        assert_eq!(fitted, Size::new(100.0, 50.0));
        let tall = fit_within(Size::new(200.0, 400.0), 100.0, 100.0);
        assert_eq!(tall, Size::new(50.0, 100.0));
    }

    #[test]
    fn opaque_png_has_no_alpha_channel() {
        let img = ImageBuffer::from_pixel(4, 3, Rgb([10u8, 20, 30]));
        let bytes = encode(image::DynamicImage::ImageRgb8(img), ImageFormat::Png);
        let raster = RasterImage::from_bytes(&bytes).unwrap();
        assert_eq!((raster.width, raster.height), (4, 3));
        match raster.data {
            ImageData::Rgb { rgb, alpha } => {
                assert_eq!(rgb.len(), 4 * 3 * 3);
                assert_eq!(&rgb[..3], &[10, 20, 30]);
                assert!(alpha.is_none());
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn transparent_png_keeps_its_alpha() {
        let img = ImageBuffer::from_pixel(2, 2, Rgba([255u8, 0, 0, 128]));
        let bytes = encode(image::DynamicImage::ImageRgba8(img), ImageFormat::Png);
        match RasterImage::from_bytes(&bytes).unwrap().data {
            ImageData::Rgb { alpha: Some(alpha), .. } => assert_eq!(alpha, vec![128; 4]),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn jpeg_is_passed_through() {
        let img = ImageBuffer::from_pixel(8, 8, Rgb([200u8, 180, 160]));
        let bytes = encode(image::DynamicImage::ImageRgb8(img), ImageFormat::Jpeg);
        let raster = RasterImage::from_bytes(&bytes).unwrap();
        assert_eq!(raster.data, ImageData::Jpeg(bytes));
    }

    #[test]
    fn garbage_is_an_image_error() {
        assert!(matches!(
            RasterImage::from_bytes(b"definitely not an image"),
            Err(RenderError::Image(_))
        ));
    }
}
