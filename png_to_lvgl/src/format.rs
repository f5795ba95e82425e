/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::encode::{Argb8888, PixelEncoder, Rgb565, Rgb565A8};

/// Pixel encodings understood by the LVGL image loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// 32-bit word 0xAARRGGBB stored little-endian (B, G, R, A).
    Argb8888,
    /// 16-bit 5/6/5 color, little-endian, no alpha.
    Rgb565,
    /// RGB565 color plane followed by an 8-bit alpha plane.
    Rgb565A8,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 3] = [
        ColorFormat::Argb8888,
        ColorFormat::Rgb565,
        ColorFormat::Rgb565A8,
    ];

    /// Bytes a single pixel occupies across all planes.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            ColorFormat::Argb8888 => 4,
            ColorFormat::Rgb565 => 2,
            ColorFormat::Rgb565A8 => 3,
        }
    }

    /// Bytes a single pixel occupies in the color plane, which is what LVGL
    /// measures the stride in.
    pub const fn color_bytes_per_pixel(self) -> usize {
        match self {
            ColorFormat::Argb8888 => 4,
            ColorFormat::Rgb565 | ColorFormat::Rgb565A8 => 2,
        }
    }

    pub const fn has_alpha(self) -> bool {
        !matches!(self, ColorFormat::Rgb565)
    }

    pub const fn name(self) -> &'static str {
        match self {
            ColorFormat::Argb8888 => "ARGB8888",
            ColorFormat::Rgb565 => "RGB565",
            ColorFormat::Rgb565A8 => "RGB565A8",
        }
    }

    /// Case-insensitive lookup by name, e.g. `"rgb565a8"`.
    pub fn from_name(name: &str) -> Option<ColorFormat> {
        ColorFormat::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
    }

    pub fn encoder(self) -> &'static dyn PixelEncoder {
        match self {
            ColorFormat::Argb8888 => &Argb8888,
            ColorFormat::Rgb565 => &Rgb565,
            ColorFormat::Rgb565A8 => &Rgb565A8,
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
