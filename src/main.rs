// Copyright 2015 The Rust Project Developers. See the COPYRIGHT
// file at the top-level directory of this distribution and at
// http://rust-lang.org/COPYRIGHT.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use grade_report::{cli, pipeline, report, ui};
use std::fs;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    // Parse CLI arguments
    let args = cli::CliArgs::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        ui::print_error(&e);
        std::process::exit(1);
    }

    // Clean output directory if requested
    if args.clean && args.output_dir.exists() {
        match fs::remove_dir_all(&args.output_dir) {
            Ok(_) => {
                println!("Cleaned output directory: {}", args.output_dir.display());
            }
            Err(e) => {
                eprintln!("Warning: Failed to clean output directory: {}", e);
            }
        }
    }

    let counts = match pipeline::run(&args) {
        Ok(counts) => counts,
        Err(e) => {
            ui::print_error(&e.to_string());
            std::process::exit(1);
        }
    };

    report::print_summary(&counts);
}
