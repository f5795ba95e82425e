/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::path::Path;

use image::{DynamicImage, ImageReader, RgbaImage};
use log::debug;

use crate::error::ConvertError;

/// A decoded image, normalized to 8-bit RGBA.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    has_alpha_channel: bool,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage, has_alpha_channel: bool) -> SourceImage {
        SourceImage {
            pixels,
            has_alpha_channel,
        }
    }

    pub fn from_dynamic(image: DynamicImage) -> SourceImage {
        let has_alpha_channel = image.color().has_alpha();
        SourceImage::new(image.to_rgba8(), has_alpha_channel)
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Whether the source container carried an alpha channel at all.
    /// Sources without one were filled with alpha 255.
    pub fn has_alpha_channel(&self) -> bool {
        self.has_alpha_channel
    }

    /// True when at least one pixel is not fully opaque. Only the pixel
    /// data is consulted, whatever `has_alpha_channel` says.
    pub fn has_transparency(&self) -> bool {
        self.pixels.pixels().any(|px| px.0[3] < u8::MAX)
    }
}

/// Decode the image at `path`, detecting the container from its contents.
pub fn decode(path: &Path) -> Result<SourceImage, ConvertError> {
    let to_error = |source| ConvertError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let image = ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| to_error(image::ImageError::IoError(e)))?
        .decode()
        .map_err(to_error)?;

    debug!(
        "Decoded {:?}: {}x{} {:?}",
        path,
        image.width(),
        image.height(),
        image.color()
    );

    Ok(SourceImage::from_dynamic(image))
}

#[cfg(test)]
mod tests {
    use image::{GrayAlphaImage, LumaA, Rgb, RgbImage, Rgba};

    use super::*;

    #[test]
    fn opaque_source_without_alpha_gets_full_alpha() {
        let rgb = RgbImage::from_pixel(3, 2, Rgb([10, 20, 30]));
        let image = SourceImage::from_dynamic(DynamicImage::ImageRgb8(rgb));

        assert!(!image.has_alpha_channel());
        assert!(!image.has_transparency());
        assert!(image.pixels().pixels().all(|px| px.0 == [10, 20, 30, 255]));
    }

    #[test]
    fn fully_opaque_alpha_channel_is_not_transparent() {
        let rgba = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        let image = SourceImage::from_dynamic(DynamicImage::ImageRgba8(rgba));

        assert!(image.has_alpha_channel());
        assert!(!image.has_transparency());
    }

    #[test]
    fn single_translucent_pixel_is_transparent() {
        let mut rgba = RgbaImage::from_pixel(4, 4, Rgba([1, 2, 3, 255]));
        rgba.put_pixel(3, 3, Rgba([1, 2, 3, 254]));
        let image = SourceImage::from_dynamic(DynamicImage::ImageRgba8(rgba));

        assert!(image.has_transparency());
    }

    #[test]
    fn gray_alpha_is_expanded_to_rgba() {
        let la = GrayAlphaImage::from_pixel(1, 1, LumaA([77, 0]));
        let image = SourceImage::from_dynamic(DynamicImage::ImageLumaA8(la));

        assert!(image.has_transparency());
        assert_eq!(image.pixels().get_pixel(0, 0).0, [77, 77, 77, 0]);
    }

    #[test]
    fn transparency_is_read_from_pixels_not_the_channel_flag() {
        let rgba = RgbaImage::from_pixel(2, 2, Rgba([200, 100, 50, 0]));
        let image = SourceImage::new(rgba, false);

        assert!(!image.has_alpha_channel());
        assert!(image.has_transparency());
    }

    #[test]
    fn garbage_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        assert!(matches!(decode(&path), Err(ConvertError::Decode { .. })));
    }

    #[test]
    fn missing_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.png");

        assert!(matches!(decode(&path), Err(ConvertError::Decode { .. })));
    }

    #[test]
    fn decodes_by_content_not_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = dir.path().join("pixel.png");
        RgbaImage::from_pixel(2, 1, Rgba([9, 8, 7, 6])).save(&png).unwrap();
        let renamed = dir.path().join("pixel.dat");
        std::fs::rename(&png, &renamed).unwrap();

        let image = decode(&renamed).unwrap();
        assert_eq!(image.dimensions(), (2, 1));
        assert_eq!(image.pixels().get_pixel(1, 0).0, [9, 8, 7, 6]);
    }
}
