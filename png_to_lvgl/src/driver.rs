/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::ffi::OsStr;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use log::debug;

use crate::decode::decode;
use crate::emit::{emit_c_source, emit_raw};
use crate::error::ConvertError;
use crate::format::ColorFormat;
use crate::profile::{AlphaPolicy, Profile};
use crate::record::ImageRecord;

/// One (input, output, identifier) entry of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub input: PathBuf,
    pub output: PathBuf,
    pub identifier: String,
    pub profile: Profile,
    /// Overrides the profile's choice of format.
    pub format: Option<ColorFormat>,
}

impl Conversion {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        identifier: impl Into<String>,
        profile: Profile,
    ) -> Conversion {
        Conversion {
            input: input.into(),
            output: output.into(),
            identifier: identifier.into(),
            profile,
            format: None,
        }
    }

    pub fn with_format(mut self, format: ColorFormat) -> Conversion {
        self.format = Some(format);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOptions {
    pub alpha_policy: AlphaPolicy,
    /// Record decode failures and continue instead of aborting the run.
    pub keep_going: bool,
}

/// Summary of a written artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertedImage {
    pub input: PathBuf,
    pub output: PathBuf,
    pub identifier: String,
    pub format: ColorFormat,
    pub width: u32,
    pub height: u32,
    pub data_size: usize,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub converted: Vec<ConvertedImage>,
    /// Inputs that did not exist.
    pub skipped: Vec<PathBuf>,
    /// Inputs that failed to decode, only filled with `keep_going`.
    pub failed: Vec<(PathBuf, ConvertError)>,
}

/// Outcome of one batch entry, reported as soon as the entry is done.
#[derive(Debug, Clone, Copy)]
pub enum Progress<'a> {
    Converted(&'a ConvertedImage),
    Skipped(&'a Path),
    Failed(&'a Path, &'a ConvertError),
}

/// Convert every entry in order. Missing inputs are skipped; any other
/// failure aborts the run, except decode failures under `keep_going`.
pub fn run_batch(
    conversions: &[Conversion],
    options: &BatchOptions,
) -> Result<BatchReport, ConvertError> {
    run_batch_with(conversions, options, |_| {})
}

/// Like [`run_batch`], calling `on_progress` after each entry. Entries
/// finished before an aborting error have already been reported.
pub fn run_batch_with<F>(
    conversions: &[Conversion],
    options: &BatchOptions,
    mut on_progress: F,
) -> Result<BatchReport, ConvertError>
where
    F: FnMut(Progress<'_>),
{
    let mut report = BatchReport::default();

    for conversion in conversions {
        match convert(conversion, options) {
            Ok(image) => {
                on_progress(Progress::Converted(&image));
                report.converted.push(image);
            }
            Err(e) if e.is_skippable() => {
                debug!("{:?} not found, skipping", conversion.input);
                on_progress(Progress::Skipped(&conversion.input));
                report.skipped.push(conversion.input.clone());
            }
            Err(e @ ConvertError::Decode { .. }) if options.keep_going => {
                debug!("{e}, continuing");
                on_progress(Progress::Failed(&conversion.input, &e));
                report.failed.push((conversion.input.clone(), e));
            }
            Err(e) => return Err(e),
        }
    }

    debug!(
        "Batch done: {} converted, {} skipped, {} failed",
        report.converted.len(),
        report.skipped.len(),
        report.failed.len()
    );

    Ok(report)
}

/// Decode, encode and write a single entry.
pub fn convert(
    conversion: &Conversion,
    options: &BatchOptions,
) -> Result<ConvertedImage, ConvertError> {
    if !is_c_identifier(&conversion.identifier) {
        return Err(ConvertError::InvalidIdentifier(conversion.identifier.clone()));
    }
    let layout = conversion.profile.layout();
    if let Some(format) = conversion.format {
        check_supported(conversion.profile, format)?;
    }
    if !conversion.input.exists() {
        return Err(ConvertError::MissingInput(conversion.input.clone()));
    }

    let image = decode(&conversion.input)?;
    if conversion.profile == Profile::Device && image.has_transparency() {
        debug!("{:?} has transparency", conversion.input);
    }

    let format = conversion
        .profile
        .resolve_format(conversion.format, options.alpha_policy, &image);
    check_supported(conversion.profile, format)?;

    let record = ImageRecord::encode(format.encoder(), &image);
    debug!(
        "Encoded {:?} as {} ({} bytes, stride {})",
        conversion.input,
        format,
        record.data_size(),
        record.stride()
    );

    let output = &conversion.output;
    let to_error = |source| ConvertError::Write {
        path: output.clone(),
        source,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(to_error)?;
    }
    let mut writer = BufWriter::new(File::create(output).map_err(to_error)?);

    if is_raw_output(output) {
        emit_raw(&mut writer, &record).map_err(to_error)?;
    } else {
        emit_c_source(
            &mut writer,
            &record,
            layout,
            &conversion.identifier,
            &source_name(&conversion.input),
        )
        .map_err(to_error)?;
    }
    writer.flush().map_err(to_error)?;

    debug!("Wrote {:?}", output);

    Ok(ConvertedImage {
        input: conversion.input.clone(),
        output: output.clone(),
        identifier: conversion.identifier.clone(),
        format,
        width: record.width(),
        height: record.height(),
        data_size: record.data_size(),
    })
}

fn check_supported(profile: Profile, format: ColorFormat) -> Result<(), ConvertError> {
    let layout = profile.layout();
    if layout.supports(format) {
        Ok(())
    } else {
        Err(ConvertError::UnsupportedFormat {
            format,
            layout: layout.name(),
        })
    }
}

/// `[A-Za-z_][A-Za-z0-9_]*`
pub fn is_c_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn is_raw_output(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("bin"))
}

fn source_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(OsStr::new(""))
        .to_string_lossy()
        .into_owned()
}
