/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use serde::{Deserialize, Serialize};

use crate::decode::SourceImage;
use crate::emit::{HeaderLayout, Lvgl8Layout, Lvgl9Layout};
use crate::format::ColorFormat;

/// The LVGL build an artifact is generated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Profile {
    /// LVGL 9 desktop simulator, ARGB8888 by default.
    #[default]
    Simulator,
    /// LVGL 8 device build, RGB565 by default.
    Device,
}

/// What the device profile does with images that have transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlphaPolicy {
    /// Flatten onto black and emit RGB565.
    #[default]
    Flatten,
    /// Emit RGB565A8 for images with transparency, RGB565 for the rest.
    Plane,
}

impl Profile {
    pub fn layout(self) -> &'static dyn HeaderLayout {
        match self {
            Profile::Simulator => &Lvgl9Layout,
            Profile::Device => &Lvgl8Layout,
        }
    }

    pub fn default_format(self) -> ColorFormat {
        match self {
            Profile::Simulator => ColorFormat::Argb8888,
            Profile::Device => ColorFormat::Rgb565,
        }
    }

    pub fn from_name(name: &str) -> Option<Profile> {
        match name.to_ascii_lowercase().as_str() {
            "simulator" => Some(Profile::Simulator),
            "device" => Some(Profile::Device),
            _ => None,
        }
    }

    /// Pick the format for `image`. An explicitly requested format always wins.
    pub fn resolve_format(
        self,
        requested: Option<ColorFormat>,
        policy: AlphaPolicy,
        image: &SourceImage,
    ) -> ColorFormat {
        if let Some(format) = requested {
            return format;
        }

        match (self, policy) {
            (Profile::Device, AlphaPolicy::Plane) if image.has_transparency() => {
                ColorFormat::Rgb565A8
            }
            _ => self.default_format(),
        }
    }
}
