// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The reporting pipeline
//!
//! One [`Pipeline`] value carries the validated settings and the test
//! management service through every stage of a run:
//!
//! 1. load the report into an [`EventStore`]
//! 2. group events and drop tests with an incomplete life cycle
//! 3. resolve case identifiers and build results
//! 4. replace the latest run of the configured name
//!
//! # Example
//!
//! ```no_run
//! use kanoah_client::KanoahClient;
//! use kanoah_report::config::Config;
//! use kanoah_report::pipeline::Pipeline;
//!
//! let settings = Config::default().validate().unwrap();
//! let client = KanoahClient::new(&settings.api_url, &settings.user, &settings.password).unwrap();
//! let summary = Pipeline::new(settings, client).run().unwrap();
//! println!("reported {} results", summary.results);
//! ```

use anyhow::Context;
use kanoah_client::{CaseLookup, ClientError, TestManagement, update_latest_test_run};
use kanoah_events::{EventStore, EventsError, TestCaseResult};
use tracing::{debug, info};

use crate::config::Settings;

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Events read from the report
    pub events: usize,
    /// Results sent to the service
    pub results: usize,
    /// Key of the newly created test run
    pub run_key: String,
}

/// Context for one reporting run
#[derive(Debug)]
pub struct Pipeline<T> {
    settings: Settings,
    service: T,
}

impl<T: TestManagement> Pipeline<T> {
    /// Create a pipeline over a test management service
    #[must_use]
    pub fn new(settings: Settings, service: T) -> Self {
        Self { settings, service }
    }

    /// The test management service
    #[must_use]
    pub fn service(&self) -> &T {
        &self.service
    }

    /// Read the configured report
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line is malformed.
    pub fn load_events(&self) -> Result<EventStore, EventsError> {
        debug!(path = %self.settings.report_path.display(), "reading report");
        EventStore::open(&self.settings.report_path)
    }

    /// Turn loaded events into validated results
    ///
    /// # Errors
    ///
    /// Returns `EventsError::NoPackages` if no event belongs to a package.
    pub fn reconcile(&self, store: &EventStore) -> Result<Vec<TestCaseResult>, EventsError> {
        kanoah_events::reconcile(store, &CaseLookup(&self.service))
    }

    /// Replace the latest run of the configured name with `results`
    ///
    /// # Errors
    ///
    /// Returns the first failing request's error.
    pub fn report(&self, results: &[TestCaseResult]) -> Result<String, ClientError> {
        update_latest_test_run(
            &self.service,
            &self.settings.project,
            &self.settings.run_name,
            results,
        )
    }

    /// Run every stage in order
    ///
    /// # Errors
    ///
    /// Returns an error for any fatal condition; nothing is sent to the
    /// service if the report cannot be loaded or grouped.
    pub fn run(&self) -> anyhow::Result<RunSummary> {
        let store = self.load_events().with_context(|| {
            format!(
                "failed to load report {}",
                self.settings.report_path.display()
            )
        })?;
        let results = self.reconcile(&store)?;
        info!(
            events = store.len(),
            results = results.len(),
            "test results reconciled"
        );
        let run_key = self.report(&results).with_context(|| {
            format!(
                "failed to update test run {:?} in project {}",
                self.settings.run_name, self.settings.project
            )
        })?;
        Ok(RunSummary {
            events: store.len(),
            results: results.len(),
            run_key,
        })
    }
}
