/*
    Copyright (C) 2025 bugo07
    Released under EUPL 1.2 License
*/

use std::process::exit;

use log::error;
use png_to_lvgl::{ConvertError, Progress, run_batch_with};

mod cli;

fn main() {
    let options = cli::create_cmd_args().get_matches();
    cli::setup_logger(&options);

    if let Err(e) = run(&options) {
        error!("Could not complete conversion: {e}");
        exit(1);
    }
}

fn run(options: &clap::ArgMatches) -> Result<(), ConvertError> {
    let (conversions, batch_options) = cli::parse_conversions(options)?;

    println!("Converting {} image(s) to LVGL C arrays...", conversions.len());
    println!("{}", "=".repeat(60));

    let report = run_batch_with(&conversions, &batch_options, print_progress)?;

    println!("{}", "=".repeat(60));
    println!(
        "Image conversion complete: {} converted, {} skipped, {} failed",
        report.converted.len(),
        report.skipped.len(),
        report.failed.len()
    );

    Ok(())
}

fn print_progress(progress: Progress<'_>) {
    match progress {
        Progress::Converted(image) => {
            println!("Converted {:?} -> {:?}", image.input, image.output);
            println!(
                "  Size: {}x{}, {} {} bytes ({:.1} KB)",
                image.width,
                image.height,
                image.format,
                image.data_size,
                image.data_size as f64 / 1024.0
            );
        }
        Progress::Skipped(path) => println!("Warning: {:?} not found, skipped", path),
        Progress::Failed(path, e) => println!("Failed: {:?}: {e}", path),
    }
}
