/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use crate::decode::SourceImage;
use crate::encode::PixelEncoder;
use crate::format::ColorFormat;

/// An encoded pixel buffer together with the header fields LVGL reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    color_format: ColorFormat,
    width: u32,
    height: u32,
    stride: u32,
    data: Vec<u8>,
}

impl ImageRecord {
    pub fn encode<E: PixelEncoder + ?Sized>(encoder: &E, image: &SourceImage) -> ImageRecord {
        let color_format = encoder.color_format();
        let (width, height) = image.dimensions();
        let data = encoder.encode(image);

        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * color_format.bytes_per_pixel()
        );

        ImageRecord {
            color_format,
            width,
            height,
            stride: width * color_format.color_bytes_per_pixel() as u32,
            data,
        }
    }

    pub fn color_format(&self) -> ColorFormat {
        self.color_format
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row of the color plane.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    pub fn data_size(&self) -> usize {
        self.data.len()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
