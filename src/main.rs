// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use grua_report::adapters::build_for_domain;
use grua_report::cli::CliArgs;
use grua_report::config::ReportConfig;
use grua_report::{ReportError, ReportGenerator, Result, console_format, ui};
use std::fs;
use std::path::PathBuf;

fn main() {
    env_logger::init();

    // Parse CLI arguments
    let args = CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    match run(&args) {
        Ok(path) => ui::status(&format!("Report written to {}", path.display())),
        Err(e) => {
            ui::print_error(&format!("{} ({})", e.user_message(), e));
            std::process::exit(1);
        }
    }
}

/// Build, render and write one report; returns the artifact path
fn run(args: &CliArgs) -> Result<PathBuf> {
    let config = ReportConfig::resolve(args.config.as_deref())?;
    let domain = args.domain.parse()?;
    let format = args.format.parse()?;

    let json = fs::read_to_string(&args.input)
        .map_err(|e| ReportError::Input(format!("Failed to read {}: {}", args.input.display(), e)))?;

    ui::status(&format!("Building {} report from {}", domain, args.input.display()));
    let data = build_for_domain(domain, &json, &args.context())?;

    if args.preview {
        console_format::print_preview(&data, args.preview_rows, args.console_width);
    }

    let artifact = ReportGenerator::new(&config).generate_as(&data, format)?;
    for warning in &artifact.warnings {
        ui::print_warning(warning.message());
    }

    let dir = args.output_dir(&config);
    fs::create_dir_all(&dir)?;
    let path = dir.join(&artifact.filename);
    fs::write(&path, &artifact.bytes)?;

    Ok(path)
}
