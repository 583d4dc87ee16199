// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Tests for the search / delete / create sequence that replaces a run

use std::cell::RefCell;

use chrono::{DateTime, Utc};
use kanoah_client::{
    CaseLookup, ClientError, TestManagement, TestRunSummary, update_latest_test_run,
};
use kanoah_events::{CaseValidator, TestCaseResult, TestStatus};
use similar_asserts::assert_eq;

/// In-memory service recording every call in order
#[derive(Default)]
struct RecordingService {
    runs: Vec<TestRunSummary>,
    fail_delete: bool,
    fail_search: bool,
    known_cases: Vec<&'static str>,
    calls: RefCell<Vec<String>>,
}

impl RecordingService {
    fn with_runs(runs: Vec<TestRunSummary>) -> Self {
        Self {
            runs,
            ..Default::default()
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

fn failed(status: u16) -> ClientError {
    ClientError::RequestFailed {
        status,
        body: String::new(),
    }
}

impl TestManagement for RecordingService {
    fn start_test_run(
        &self,
        project: &str,
        name: &str,
        items: &[TestCaseResult],
    ) -> Result<String, ClientError> {
        self.calls
            .borrow_mut()
            .push(format!("create {project} {name} {}", items.len()));
        Ok("NEW".to_string())
    }

    fn delete_test_run(&self, key: &str) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(format!("delete {key}"));
        if self.fail_delete {
            return Err(failed(500));
        }
        Ok(())
    }

    fn search_test_runs(&self, query: &str) -> Result<Vec<TestRunSummary>, ClientError> {
        self.calls.borrow_mut().push(format!("search {query}"));
        if self.fail_search {
            return Err(failed(401));
        }
        Ok(self.runs.clone())
    }

    fn check_test_case_exists(&self, case_id: &str) -> Result<(), ClientError> {
        self.calls.borrow_mut().push(format!("lookup {case_id}"));
        if self.known_cases.iter().any(|k| *k == case_id) {
            Ok(())
        } else {
            Err(failed(404))
        }
    }
}

fn run(name: &str, key: &str, created_on: &str) -> TestRunSummary {
    TestRunSummary {
        name: name.to_string(),
        key: key.to_string(),
        created_on: created_on
            .parse::<DateTime<Utc>>()
            .expect("valid timestamp"),
    }
}

fn item() -> TestCaseResult {
    TestCaseResult {
        test_case_key: "COR-T1".to_string(),
        status: TestStatus::Pass,
        execution_time: 1,
        actual_start_date: "2024-05-01T10:00:00Z".to_string(),
        actual_end_date: "2024-05-01T10:00:01Z".to_string(),
    }
}

#[test]
fn test_existing_run_deleted_before_create() {
    let service =
        RecordingService::with_runs(vec![run("nightly", "R1", "2024-05-01T10:00:00Z")]);

    let key = update_latest_test_run(&service, "COR", "nightly", &[item()])
        .expect("update should succeed");

    assert_eq!(key, "NEW");
    assert_eq!(
        service.calls(),
        vec![
            "search projectKey = \"COR\"".to_string(),
            "delete R1".to_string(),
            "create COR nightly 1".to_string(),
        ]
    );
}

#[test]
fn test_failed_delete_prevents_create() {
    let service = RecordingService {
        fail_delete: true,
        ..RecordingService::with_runs(vec![run("nightly", "R1", "2024-05-01T10:00:00Z")])
    };

    let err = update_latest_test_run(&service, "COR", "nightly", &[item()])
        .expect_err("update should fail");

    assert!(matches!(err, ClientError::RequestFailed { status: 500, .. }));
    assert!(!service.calls().iter().any(|c| c.starts_with("create")));
}

#[test]
fn test_no_matching_run_skips_delete() {
    let service = RecordingService::with_runs(vec![
        run("weekly", "R1", "2024-05-01T10:00:00Z"),
        run("nightly-old", "R2", "2024-05-02T10:00:00Z"),
    ]);

    update_latest_test_run(&service, "COR", "nightly", &[]).expect("update should succeed");

    assert_eq!(
        service.calls(),
        vec![
            "search projectKey = \"COR\"".to_string(),
            "create COR nightly 0".to_string(),
        ]
    );
}

#[test]
fn test_only_latest_matching_run_deleted() {
    let service = RecordingService::with_runs(vec![
        run("nightly", "R1", "2024-05-01T10:00:00Z"),
        run("nightly", "R2", "2024-05-03T10:00:00Z"),
        run("weekly", "R3", "2024-05-04T10:00:00Z"),
        run("nightly", "R4", "2024-05-02T10:00:00Z"),
    ]);

    update_latest_test_run(&service, "COR", "nightly", &[item()]).expect("update should succeed");

    let deletes: Vec<_> = service
        .calls()
        .into_iter()
        .filter(|c| c.starts_with("delete"))
        .collect();
    assert_eq!(deletes, vec!["delete R2".to_string()]);
}

#[test]
fn test_failed_search_aborts() {
    let service = RecordingService {
        fail_search: true,
        ..Default::default()
    };

    let err = update_latest_test_run(&service, "COR", "nightly", &[item()])
        .expect_err("update should fail");

    assert!(matches!(err, ClientError::RequestFailed { status: 401, .. }));
    assert_eq!(service.calls().len(), 1);
}

#[test]
fn test_case_lookup_adapter() {
    let service = RecordingService {
        known_cases: vec!["COR-T1"],
        ..Default::default()
    };
    let lookup = CaseLookup(&service);

    assert!(lookup.validate_case("COR-T1").is_ok());
    assert!(lookup.validate_case("COR-T2").is_err());
    assert_eq!(
        service.calls(),
        vec!["lookup COR-T1".to_string(), "lookup COR-T2".to_string()]
    );
}

// ============================================================================
// Properties
// ============================================================================

mod properties {
    use chrono::{TimeZone, Utc};
    use kanoah_client::{TestRunSummary, latest_run_key};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_latest_is_first_with_max_creation_time(
            offsets in prop::collection::vec(0i64..20, 0..30)
        ) {
            let runs: Vec<_> = offsets
                .iter()
                .enumerate()
                .map(|(i, secs)| TestRunSummary {
                    name: "nightly".to_string(),
                    key: format!("R{i}"),
                    created_on: Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap(),
                })
                .collect();

            let expected = offsets
                .iter()
                .max()
                .and_then(|max| offsets.iter().position(|o| o == max))
                .map(|i| format!("R{i}"));

            prop_assert_eq!(latest_run_key(&runs).map(str::to_string), expected);
        }
    }
}
