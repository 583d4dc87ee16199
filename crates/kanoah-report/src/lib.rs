// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! kanoah-report library
//!
//! This module exports the configuration and pipeline of kanoah-report for
//! use in integration tests and as a library.

pub mod config;
pub mod logging;
pub mod pipeline;

use anyhow::Context;
use kanoah_client::KanoahClient;

use crate::config::Config;
use crate::pipeline::{Pipeline, RunSummary};

/// Validate `config`, connect to Kanoah and run the pipeline
///
/// # Errors
///
/// Returns an error for missing configuration, an unusable API URL, or any
/// fatal pipeline failure.
pub fn run(config: &Config) -> anyhow::Result<RunSummary> {
    let settings = config.validate()?;
    let client = KanoahClient::new(&settings.api_url, &settings.user, &settings.password)
        .context("failed to create kanoah client")?;
    Pipeline::new(settings, client).run()
}
