/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

//! JSON list of conversions to run, e.g.
//!
//! ```json
//! {
//!   "profile": "device",
//!   "conversions": [
//!     { "input": "assets/logo.png", "output": "include/components/logo.c", "identifier": "logo" }
//!   ]
//! }
//! ```
//!
//! Relative paths are taken relative to the manifest file.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::driver::{BatchOptions, Conversion};
use crate::error::ConvertError;
use crate::format::ColorFormat;
use crate::profile::{AlphaPolicy, Profile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Profile for entries that don't name one.
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub alpha_policy: AlphaPolicy,
    #[serde(default)]
    pub keep_going: bool,
    pub conversions: Vec<ManifestEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ManifestEntry {
    pub input: PathBuf,
    pub output: PathBuf,
    pub identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<Profile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ColorFormat>,
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Manifest, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn load(path: &Path) -> Result<Manifest, ConvertError> {
        let json = fs::read_to_string(path).map_err(|source| ConvertError::ManifestRead {
            path: path.to_path_buf(),
            source,
        })?;

        Manifest::from_json(&json).map_err(|source| ConvertError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// The entries as conversions, with relative paths joined onto `base_dir`.
    pub fn conversions(&self, base_dir: &Path) -> Vec<Conversion> {
        self.conversions
            .iter()
            .map(|entry| Conversion {
                input: base_dir.join(&entry.input),
                output: base_dir.join(&entry.output),
                identifier: entry.identifier.clone(),
                profile: entry.profile.unwrap_or(self.profile),
                format: entry.format,
            })
            .collect()
    }

    pub fn options(&self) -> BatchOptions {
        BatchOptions {
            alpha_policy: self.alpha_policy,
            keep_going: self.keep_going,
        }
    }
}

/// Directory relative manifest paths are resolved against.
pub fn base_dir(manifest_path: &Path) -> &Path {
    manifest_path.parent().unwrap_or(Path::new(""))
}
