// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! kanoah-events: go test event reconciliation for kanoah-report
//!
//! This library crate turns a `go test -json` report into the per-case
//! results that kanoah-report sends to a Kanoah test management server.
//!
//! # Example
//!
//! ```no_run
//! use kanoah_events::prelude::*;
//!
//! struct AcceptAll;
//!
//! impl CaseValidator for AcceptAll {
//!     type Error = String;
//!     fn validate_case(&self, _case_id: &str) -> Result<(), String> {
//!         Ok(())
//!     }
//! }
//!
//! let store = parse_events_file("report.json").unwrap();
//! let results = reconcile(&store, &AcceptAll).unwrap();
//! println!("{} test case results", results.len());
//! ```

pub mod error;
pub mod event;
pub mod group;
pub mod result;

pub use error::EventsError;
pub use event::{Action, EventStore, TestEvent, parse_events, parse_events_file};
pub use group::{PackageGroups, delete_broken_tests, group_events_by_package};
pub use result::{
    CaseValidator, TestCaseResult, TestStatus, extract_case_id, tests_to_results, time_bounds,
};

/// Run the whole reconciliation over a loaded report
///
/// Groups events, drops tests with an incomplete life cycle and builds one
/// result per validated terminal event.
///
/// # Errors
///
/// Returns `EventsError::NoPackages` if no event belongs to a package.
pub fn reconcile<V: CaseValidator>(
    store: &EventStore,
    validator: &V,
) -> Result<Vec<TestCaseResult>, EventsError> {
    let grouped = group_events_by_package(store.events())?;
    let retained = delete_broken_tests(grouped);
    Ok(tests_to_results(&retained, validator))
}

/// Re-export commonly used types
pub mod prelude {
    pub use crate::error::EventsError;
    pub use crate::event::{EventStore, TestEvent, parse_events, parse_events_file};
    pub use crate::reconcile;
    pub use crate::result::{CaseValidator, TestCaseResult, TestStatus};
}
