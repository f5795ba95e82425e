/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::path::Path;

use clap::{Arg, ArgAction, ArgGroup, ArgMatches, Command};
use log::{Level, info};
use png_to_lvgl::manifest::{self, Manifest};
use png_to_lvgl::{AlphaPolicy, BatchOptions, ColorFormat, Conversion, ConvertError, Profile};

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("png_to_lvgl")
        .about("Convert images to LVGL C image descriptors")
        .arg(Arg::new("manifest")
            .short('m')
            .long("manifest")
            .help("JSON file listing the conversions to run"))
        .arg(Arg::new("in")
            .short('i')
            .long("input")
            .help("Image to convert")
            .requires("out")
            .requires("name"))
        .arg(Arg::new("out")
            .short('o')
            .long("output")
            .help("File to write, a .bin extension writes the raw pixel buffer")
            .requires("in"))
        .arg(Arg::new("name")
            .short('n')
            .long("name")
            .help("C identifier of the descriptor, the pixel array is <name>_map")
            .requires("in"))
        .group(ArgGroup::new("source")
            .args(["manifest", "in"])
            .required(true))
        .arg(Arg::new("profile")
            .long("profile")
            .help("Target runtime")
            .value_parser(["simulator", "device"])
            .default_value("simulator")
            .conflicts_with("manifest"))
        .arg(Arg::new("format")
            .long("format")
            .help("Override the profile's pixel format")
            .value_parser(["argb8888", "rgb565", "rgb565a8"])
            .conflicts_with("manifest"))
        .arg(Arg::new("alpha-plane")
            .long("alpha-plane")
            .action(ArgAction::SetTrue)
            .help("On the device profile, emit RGB565A8 for images with transparency instead of flattening them"))
        .arg(Arg::new("keep-going")
            .long("keep-going")
            .action(ArgAction::SetTrue)
            .help("Continue with the next image when one fails to decode"))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display progress information and higher (default)"))
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level = log_level(options);

    if simple_logger::init_with_level(log_level).is_ok() {
        info!("Log level: {}", log_level);
    }
}

/// Level picked by the LOGGING flags, `info` when none is given.
fn log_level(options: &ArgMatches) -> Level {
    if options.get_flag("trace") {
        Level::Trace
    } else if options.get_flag("debug") {
        Level::Debug
    } else if options.get_flag("warn") {
        Level::Warn
    } else {
        Level::Info
    }
}

/// Build the conversion list from either `--manifest` or `-i/-o/-n`.
pub fn parse_conversions(
    options: &ArgMatches,
) -> Result<(Vec<Conversion>, BatchOptions), ConvertError> {
    let (conversions, mut batch_options) =
        if let Some(path) = options.get_one::<String>("manifest") {
            let path = Path::new(path);
            info!("Reading manifest {:?}", path);
            let manifest = Manifest::load(path)?;
            (manifest.conversions(manifest::base_dir(path)), manifest.options())
        } else {
            (vec![single_conversion(options)], BatchOptions::default())
        };

    if options.get_flag("alpha-plane") {
        batch_options.alpha_policy = AlphaPolicy::Plane;
    }
    if options.get_flag("keep-going") {
        batch_options.keep_going = true;
    }

    Ok((conversions, batch_options))
}

fn single_conversion(options: &ArgMatches) -> Conversion {
    // clap enforces that in/out/name come together and that the values are known
    let string = |id: &str| options.get_one::<String>(id).cloned().unwrap_or_default();

    let profile = Profile::from_name(&string("profile")).unwrap_or_default();
    let mut conversion = Conversion::new(string("in"), string("out"), string("name"), profile);

    if let Some(format) = options
        .get_one::<String>("format")
        .and_then(|name| ColorFormat::from_name(name))
    {
        conversion = conversion.with_format(format);
    }
    conversion
}
