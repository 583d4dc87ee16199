// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for kanoah-events

use thiserror::Error;

/// Errors that can occur while loading and grouping test events
#[derive(Debug, Error)]
pub enum EventsError {
    /// Error reading the JSON report
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A report line is not a valid test event
    #[error("JSON parse error on line {line}: {source}")]
    Parse {
        /// 1-based line number in the report
        line: usize,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },

    /// No event carries both a test name and a package
    #[error("no packages with tests found, skipping report")]
    NoPackages,
}
