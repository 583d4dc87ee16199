// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Replacing the latest test run of a given name
//!
//! Kanoah keeps every run ever created. To keep one live run per name, the
//! most recent run with that name is deleted before the new one is created.
//! The search, delete and create calls are not atomic.

use kanoah_events::{CaseValidator, TestCaseResult};
use tracing::{debug, info};

use crate::error::ClientError;
use crate::types::TestRunSummary;

/// Operations of the test management service used by kanoah-report
pub trait TestManagement {
    /// Create a run holding `items`, returning its key
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn start_test_run(
        &self,
        project: &str,
        name: &str,
        items: &[TestCaseResult],
    ) -> Result<String, ClientError>;

    /// Delete the run with the given key
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn delete_test_run(&self, key: &str) -> Result<(), ClientError>;

    /// Search runs with a Kanoah query such as `projectKey = "COR"`
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    fn search_test_runs(&self, query: &str) -> Result<Vec<TestRunSummary>, ClientError>;

    /// Succeeds if a test case with this key exists
    ///
    /// # Errors
    ///
    /// Returns an error if the case is unknown or the request fails.
    fn check_test_case_exists(&self, case_id: &str) -> Result<(), ClientError>;
}

/// Adapts a [`TestManagement`] service into a [`CaseValidator`]
#[derive(Debug, Clone, Copy)]
pub struct CaseLookup<'a, T: ?Sized>(pub &'a T);

impl<T: TestManagement + ?Sized> CaseValidator for CaseLookup<'_, T> {
    type Error = ClientError;

    fn validate_case(&self, case_id: &str) -> Result<(), ClientError> {
        self.0.check_test_case_exists(case_id)
    }
}

/// Runs whose name is exactly `name`
#[must_use]
pub fn filter_by_name<'a>(name: &str, runs: &'a [TestRunSummary]) -> Vec<&'a TestRunSummary> {
    runs.iter().filter(|run| run.name == name).collect()
}

/// Key of the most recently created run
///
/// A run replaces the current pick only if it was created strictly later, so
/// among runs with equal creation times the first one wins.
pub fn latest_run_key<'a, I>(runs: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a TestRunSummary>,
{
    let mut latest: Option<&TestRunSummary> = None;
    for run in runs {
        if latest.is_none_or(|best| run.created_on > best.created_on) {
            latest = Some(run);
        }
    }
    let key = latest.map(|run| run.key.as_str());
    debug!(?key, "latest run key");
    key
}

/// Search query selecting every run of a project
#[must_use]
pub fn project_query(project: &str) -> String {
    format!("projectKey = \"{project}\"")
}

/// Replace the latest run named `run_name` with a new run holding `items`
///
/// If deleting the old run fails, no new run is created.
///
/// # Errors
///
/// Returns the first failing request's error.
pub fn update_latest_test_run<T: TestManagement + ?Sized>(
    service: &T,
    project: &str,
    run_name: &str,
    items: &[TestCaseResult],
) -> Result<String, ClientError> {
    let runs = service.search_test_runs(&project_query(project))?;
    let same_name = filter_by_name(run_name, &runs);
    if let Some(key) = latest_run_key(same_name.iter().copied()) {
        service.delete_test_run(key)?;
    }

    let key = service.start_test_run(project, run_name, items)?;
    info!(key = %key, name = run_name, results = items.len(), "test run updated");
    Ok(key)
}
