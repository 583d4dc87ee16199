// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! kanoah-client: Kanoah test management client for kanoah-report
//!
//! This library crate wraps the four REST operations kanoah-report needs
//! (create, delete and search test runs, look up a test case) and the
//! protocol that replaces the latest run of a given name.
//!
//! # Example
//!
//! ```no_run
//! use kanoah_client::{KanoahClient, update_latest_test_run};
//!
//! let client = KanoahClient::new("https://jira.example.com/rest/atm/1.0/", "user", "secret")
//!     .unwrap();
//! let key = update_latest_test_run(&client, "COR", "nightly", &[]).unwrap();
//! println!("created run {key}");
//! ```

pub mod client;
pub mod error;
pub mod reporter;
pub mod types;

pub use client::KanoahClient;
pub use error::ClientError;
pub use reporter::{
    CaseLookup, TestManagement, filter_by_name, latest_run_key, update_latest_test_run,
};
pub use types::{StartTestRunResponse, TestCaseInfo, TestRunSummary};
