// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for kanoah-client

use thiserror::Error;

/// Errors that can occur while talking to the Kanoah REST API
#[derive(Debug, Error)]
pub enum ClientError {
    /// The server answered with a status of 400 or above
    #[error("request failed: status: {status}, body: {body}")]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Response body, as text
        body: String,
    },

    /// Connection or TLS failure
    #[error("HTTP error: {0}")]
    Transport(#[from] ureq::Error),

    /// A successful response body could not be decoded
    #[error("failed to decode response body: {0}")]
    Decode(#[source] ureq::Error),

    /// The configured base URL cannot be used
    #[error("Invalid API URL {url}: {reason}")]
    InvalidUrl {
        /// The rejected URL
        url: String,
        /// Why it was rejected
        reason: String,
    },
}
