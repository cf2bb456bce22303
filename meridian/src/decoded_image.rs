//! This module contains the image type marker symbolizers draw.

use crate::error::RenderError;

/// An image that has been loaded into memory.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    /// Raw bytes of the image, in RGBA order, not premultiplied.
    bytes: Vec<u8>,
    /// Width and height of the image.
    dimensions: (u32, u32),
}

impl DecodedImage {
    /// Decode an image from a byte slice.
    ///
    /// Attempts to guess the format of the image from the data. Non-RGBA images
    /// will be converted to RGBA.
    #[cfg(feature = "image")]
    pub fn new(bytes: &[u8]) -> Result<Self, RenderError> {
        use image::GenericImageView;
        let decoded = image::load_from_memory(bytes)?;
        let dimensions = decoded.dimensions();
        let bytes = decoded.to_rgba8();

        Ok(Self {
            bytes: bytes.into_raw(),
            dimensions,
        })
    }

    /// Creates an image from raw RGBA pixels.
    pub fn from_raw(bytes: Vec<u8>, width: u32, height: u32) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(RenderError::InvalidImageData {
                expected,
                actual: bytes.len(),
            });
        }

        Ok(Self {
            bytes,
            dimensions: (width, height),
        })
    }

    /// Creates an image filled with a single RGBA color.
    pub fn solid(color: [u8; 4], width: u32, height: u32) -> Self {
        let bytes = color
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            bytes,
            dimensions: (width, height),
        }
    }

    /// RGBA pixels of the image.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Width of the image in pixels.
    pub fn width(&self) -> u32 {
        self.dimensions.0
    }

    /// Height of the image in pixels.
    pub fn height(&self) -> u32 {
        self.dimensions.1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn raw_size_is_checked() {
        assert!(DecodedImage::from_raw(vec![0; 16], 2, 2).is_ok());
        assert_matches!(
            DecodedImage::from_raw(vec![0; 15], 2, 2),
            Err(RenderError::InvalidImageData {
                expected: 16,
                actual: 15
            })
        );
    }

    #[cfg(feature = "image")]
    #[test]
    fn decode_png() {
        let mut buffer = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgba8(image::RgbaImage::from_pixel(
            3,
            2,
            image::Rgba([255, 0, 0, 255]),
        ))
        .write_to(&mut buffer, image::ImageOutputFormat::Png)
        .unwrap();

        let decoded = DecodedImage::new(buffer.get_ref()).unwrap();
        assert_eq!(decoded.width(), 3);
        assert_eq!(decoded.height(), 2);
        assert_eq!(&decoded.bytes()[0..4], &[255, 0, 0, 255]);
    }

    #[cfg(feature = "image")]
    #[test]
    fn decode_garbage_fails() {
        assert_matches!(
            DecodedImage::new(&[1, 2, 3]),
            Err(RenderError::ImageDecode(_))
        );
    }
}
