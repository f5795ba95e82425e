/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Pixel encoders. Each one turns a [`SourceImage`] into the exact byte
//! sequence LVGL expects for its color format, in row-major order with no
//! padding between pixels or rows.

use crate::decode::SourceImage;
use crate::format::ColorFormat;

pub trait PixelEncoder {
    fn color_format(&self) -> ColorFormat;

    fn encode(&self, image: &SourceImage) -> Vec<u8>;
}

/// Lossless 32-bit encoding for the simulator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Argb8888;

/// 16-bit encoding for the device. Translucent pixels are flattened onto black.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rgb565;

/// 16-bit color plane plus a separate 8-bit alpha plane.
#[derive(Debug, Clone, Copy, Default)]
pub struct Rgb565A8;

impl PixelEncoder for Argb8888 {
    fn color_format(&self) -> ColorFormat {
        ColorFormat::Argb8888
    }

    fn encode(&self, image: &SourceImage) -> Vec<u8> {
        let mut out = Vec::with_capacity(pixel_count(image) * 4);

        for px in image.pixels().pixels() {
            let [r, g, b, a] = px.0;
            let argb = ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32);
            out.extend_from_slice(&argb.to_le_bytes());
        }

        out
    }
}

impl PixelEncoder for Rgb565 {
    fn color_format(&self) -> ColorFormat {
        ColorFormat::Rgb565
    }

    fn encode(&self, image: &SourceImage) -> Vec<u8> {
        let mut out = Vec::with_capacity(pixel_count(image) * 2);

        // alpha 255 composites to the color itself
        for px in image.pixels().pixels() {
            let [r, g, b, a] = px.0;
            let (r, g, b) = (
                composite_over_black(r, a),
                composite_over_black(g, a),
                composite_over_black(b, a),
            );
            out.extend_from_slice(&rgb888_to_rgb565(r, g, b).to_le_bytes());
        }

        out
    }
}

impl PixelEncoder for Rgb565A8 {
    fn color_format(&self) -> ColorFormat {
        ColorFormat::Rgb565A8
    }

    fn encode(&self, image: &SourceImage) -> Vec<u8> {
        let count = pixel_count(image);
        let mut out = Vec::with_capacity(count * 3);

        // color plane first, then the whole alpha plane
        for px in image.pixels().pixels() {
            let [r, g, b, _] = px.0;
            out.extend_from_slice(&rgb888_to_rgb565(r, g, b).to_le_bytes());
        }
        out.extend(image.pixels().pixels().map(|px| px.0[3]));

        out
    }
}

/// Pack 8-bit channels into 5/6/5 bits by dropping the low bits.
pub const fn rgb888_to_rgb565(r: u8, g: u8, b: u8) -> u16 {
    let r5 = (r >> 3) as u16;
    let g6 = (g >> 2) as u16;
    let b5 = (b >> 3) as u16;
    (r5 << 11) | (g6 << 5) | b5
}

/// Blend one channel over an opaque black background: `c * a / 255`, rounded.
pub const fn composite_over_black(c: u8, a: u8) -> u8 {
    div255(c as u32 * a as u32) as u8
}

// exact rounding of v / 255 for v <= 255 * 255
const fn div255(v: u32) -> u32 {
    let t = v + 128;
    ((t >> 8) + t) >> 8
}

fn pixel_count(image: &SourceImage) -> usize {
    image.width() as usize * image.height() as usize
}
