// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! kanoah-report: publish go test results to Kanoah test management
//!
//! Reads a `go test -json` report, matches tests to Kanoah test cases through
//! the `testcase_id:<KEY>` marker they print, and replaces the latest test
//! run of the configured name with the results.

use std::process::ExitCode;

use clap::Parser;
use kanoah_report::config::Config;
use kanoah_report::logging::init_tracing;
use tracing::{error, info};

fn main() -> ExitCode {
    let config = Config::parse();
    init_tracing(config.log_level());

    info!(version = env!("CARGO_PKG_VERSION"), "starting kanoah-report");

    match kanoah_report::run(&config) {
        Ok(summary) => {
            info!(
                run_key = %summary.run_key,
                results = summary.results,
                events = summary.events,
                "report published"
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
