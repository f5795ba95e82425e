/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::path::PathBuf;

use crate::format::ColorFormat;

/// Everything that can go wrong while turning an image into an LVGL array.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConvertError {
    /// The input file does not exist. The batch driver skips these.
    #[error("input {0:?} not found")]
    MissingInput(PathBuf),

    #[error("could not decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("could not write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0:?} is not a valid C identifier")]
    InvalidIdentifier(String),

    #[error("{format} cannot be described by the {layout} image header")]
    UnsupportedFormat {
        format: ColorFormat,
        layout: &'static str,
    },

    #[error("could not read manifest {path:?}: {source}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed manifest {path:?}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ConvertError {
    /// Whether the batch driver may carry on with the next entry after this error.
    pub fn is_skippable(&self) -> bool {
        matches!(self, ConvertError::MissingInput(_))
    }
}
