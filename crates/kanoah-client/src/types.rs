// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Request and response bodies of the Kanoah REST API

use chrono::{DateTime, Utc};
use kanoah_events::TestCaseResult;
use serde::{Deserialize, Serialize};

/// Body of `POST testrun`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartTestRunPayload<'a> {
    /// Test run name
    pub name: &'a str,
    /// Project the run belongs to
    pub project_key: &'a str,
    /// One entry per reconciled test case
    pub items: &'a [TestCaseResult],
}

/// Response of `POST testrun`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTestRunResponse {
    /// Key assigned to the new run
    pub key: String,
}

/// One entry of `GET testrun/search`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestRunSummary {
    /// Run name
    pub name: String,
    /// Run key
    pub key: String,
    /// When the run was created
    pub created_on: DateTime<Utc>,
}

/// Response of `GET testcase/{key}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseInfo {
    /// Test case key
    pub key: String,
    /// Project the case belongs to
    pub project_key: String,
}
