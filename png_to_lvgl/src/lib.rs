/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! Converts raster images into LVGL image descriptors: a `uint8_t` pixel
//! array plus an `lv_img_dsc_t` header, for the LVGL 9 simulator
//! (ARGB8888) or an LVGL 8 device (RGB565, RGB565A8).
//!
//! The pipeline is [`decode`](decode::decode) → [`PixelEncoder`] →
//! [`emit_c_source`], driven per entry by [`run_batch`].

pub mod decode;
pub mod driver;
pub mod emit;
pub mod encode;
pub mod error;
pub mod format;
pub mod manifest;
pub mod profile;
pub mod record;

pub use decode::SourceImage;
pub use driver::{
    BatchOptions, BatchReport, Conversion, ConvertedImage, Progress, convert, run_batch,
    run_batch_with,
};
pub use emit::{HeaderLayout, Lvgl8Layout, Lvgl9Layout, emit_c_source, emit_raw};
pub use encode::{Argb8888, PixelEncoder, Rgb565, Rgb565A8};
pub use error::ConvertError;
pub use format::ColorFormat;
pub use manifest::Manifest;
pub use profile::{AlphaPolicy, Profile};
pub use record::ImageRecord;
