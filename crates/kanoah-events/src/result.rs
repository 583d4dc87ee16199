// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Test case resolution and result building
//!
//! A Go test links itself to a Kanoah test case by printing
//! `testcase_id:<PROJECT>-T<NUMBER>`. Every terminal event of a test that
//! carries such an identifier becomes one [`TestCaseResult`], provided the
//! identifier is accepted by a [`CaseValidator`].

use std::fmt;
use std::sync::LazyLock;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::event::{Action, TestEvent};
use crate::group::PackageGroups;

static CASE_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"testcase_id:(.+-T.+)").expect("case id pattern is valid"));

/// Checks a case identifier against the test management service
pub trait CaseValidator {
    /// Why an identifier was rejected
    type Error: fmt::Display;

    /// Succeeds if the identifier names an existing test case
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is unknown or cannot be checked.
    fn validate_case(&self, case_id: &str) -> Result<(), Self::Error>;
}

/// Outcome reported for a test case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    /// Test passed
    Pass,
    /// Test failed
    Fail,
    /// Test was skipped
    Skip,
}

impl TestStatus {
    /// Status for a terminal action, `None` for any other action
    #[must_use]
    pub fn from_action(action: Action) -> Option<Self> {
        match action {
            Action::Pass => Some(Self::Pass),
            Action::Fail => Some(Self::Fail),
            Action::Skip => Some(Self::Skip),
            _ => None,
        }
    }

    /// Name as sent to the service
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "Pass",
            Self::Fail => "Fail",
            Self::Skip => "Skip",
        }
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reconciled outcome for one externally identified test case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    /// Kanoah test case key, e.g. `COR-T63`
    pub test_case_key: String,
    /// Outcome of the terminal event
    pub status: TestStatus,
    /// Elapsed seconds, truncated
    pub execution_time: i64,
    /// Earliest event of the test, RFC 3339
    pub actual_start_date: String,
    /// Latest event of the test, RFC 3339
    pub actual_end_date: String,
}

/// Find the case identifier embedded in a chunk of test output
///
/// ```
/// use kanoah_events::result::extract_case_id;
///
/// assert_eq!(extract_case_id("testcase_id:COR-T63\n"), Some("COR-T63"));
/// assert_eq!(extract_case_id("no reference here"), None);
/// ```
#[must_use]
pub fn extract_case_id(output: &str) -> Option<&str> {
    CASE_ID_PATTERN
        .captures(output)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Earliest and latest timestamps of an event list
///
/// Events without a timestamp are ignored. Returns `None` when no event
/// carries one.
#[must_use]
pub fn time_bounds(
    events: &[&TestEvent],
) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
    let mut times: Vec<_> = events.iter().filter_map(|e| e.time).collect();
    times.sort();
    Some((*times.first()?, *times.last()?))
}

/// Format a timestamp with its offset, to the second
#[must_use]
pub fn format_timestamp(time: &DateTime<FixedOffset>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build results for every validated test case
///
/// Tests whose output never mentions a case identifier are reported and
/// skipped. Each terminal event after the identifier is seen is validated on
/// its own; a rejected identifier skips only that event.
pub fn tests_to_results<V: CaseValidator>(
    tests: &PackageGroups<'_>,
    validator: &V,
) -> Vec<TestCaseResult> {
    let mut results = Vec::new();
    for (package, package_tests) in tests {
        for (test, events) in package_tests {
            let Some((start, end)) = time_bounds(events) else {
                continue;
            };
            let mut case_id: Option<&str> = None;
            for &event in events {
                if case_id.is_none() {
                    case_id = extract_case_id(&event.output);
                }
                let Some(id) = case_id else {
                    continue;
                };
                let Some(status) = TestStatus::from_action(event.action) else {
                    continue;
                };
                if let Err(err) = validator.validate_case(id) {
                    warn!(
                        case_id = id,
                        error = %err,
                        "testcase id is not found in kanoah, test item will be skipped"
                    );
                    continue;
                }
                results.push(TestCaseResult {
                    test_case_key: id.to_string(),
                    status,
                    execution_time: event.elapsed as i64,
                    actual_start_date: format_timestamp(&start),
                    actual_end_date: format_timestamp(&end),
                });
            }
            if case_id.is_none() {
                warn!(
                    package,
                    test,
                    "testcase id is not found in test, print `testcase_id:<PROJECT>-T<NUMBER>` from the test to reference a case"
                );
            }
        }
    }
    debug!(?results, "matching with kanoah cases found");
    results
}
