// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Logging setup

use tracing_subscriber::EnvFilter;

/// Build the filter for the given default level
///
/// Directives in `RUST_LOG` are applied on top of the default level.
#[must_use]
pub fn env_filter(level: tracing::Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy()
}

/// Install the global subscriber, writing to stderr
pub fn init_tracing(level: tracing::Level) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .init();
}
