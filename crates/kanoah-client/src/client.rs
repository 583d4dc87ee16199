// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Blocking HTTP client for the Kanoah REST API
//!
//! Every request carries HTTP Basic credentials and `Accept:
//! application/json`. Any status of 400 or above becomes
//! [`ClientError::RequestFailed`] after the status and body are logged.

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use kanoah_events::TestCaseResult;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde::de::DeserializeOwned;
use tracing::{debug, error, info};
use ureq::http::{Response, Uri};
use ureq::{Agent, Body};

use crate::error::ClientError;
use crate::reporter::TestManagement;
use crate::types::{StartTestRunPayload, StartTestRunResponse, TestCaseInfo, TestRunSummary};

/// Maximum number of runs returned by a search
pub const SEARCH_MAX_RESULTS: &str = "200";

/// Fields requested from a search
pub const SEARCH_FIELDS: &str = "name,key,createdOn";

/// Characters escaped in a single URL path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Kanoah REST API client
pub struct KanoahClient {
    base_url: String,
    authorization: String,
    agent: Agent,
}

impl fmt::Debug for KanoahClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KanoahClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl KanoahClient {
    /// Create a client for the API rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidUrl` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str, user: &str, password: &str) -> Result<Self, ClientError> {
        let uri: Uri = base_url.parse().map_err(|e: ureq::http::uri::InvalidUri| {
            ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: e.to_string(),
            }
        })?;
        if !matches!(uri.scheme_str(), Some("http" | "https")) || uri.host().is_none() {
            return Err(ClientError::InvalidUrl {
                url: base_url.to_string(),
                reason: "expected an absolute http or https URL".to_string(),
            });
        }

        let agent: Agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .into();

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            authorization: basic_auth(user, password),
            agent,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// URL of `collection/{id}` with `id` escaped as one path segment
    fn item_url(&self, collection: &str, id: &str) -> String {
        self.url(&format!(
            "{collection}/{}",
            utf8_percent_encode(id, PATH_SEGMENT)
        ))
    }
}

/// Turn error statuses into `RequestFailed`, logging status and body
fn check(mut response: Response<Body>) -> Result<Response<Body>, ClientError> {
    let status = response.status();
    if status.as_u16() >= 400 {
        let body = response.body_mut().read_to_string().unwrap_or_default();
        error!(status = %status, body = %body, "request failed");
        return Err(ClientError::RequestFailed {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response)
}

fn decode<T: DeserializeOwned>(response: Response<Body>) -> Result<T, ClientError> {
    let mut response = check(response)?;
    response
        .body_mut()
        .read_json::<T>()
        .map_err(ClientError::Decode)
}

impl TestManagement for KanoahClient {
    fn start_test_run(
        &self,
        project: &str,
        name: &str,
        items: &[TestCaseResult],
    ) -> Result<String, ClientError> {
        let payload = StartTestRunPayload {
            name,
            project_key: project,
            items,
        };
        debug!(project, name, items = items.len(), "starting test run");
        let response = self
            .agent
            .post(self.url("testrun"))
            .header("Accept", "application/json")
            .header("Authorization", self.authorization.as_str())
            .send_json(&payload)?;
        let started: StartTestRunResponse = decode(response)?;
        info!(key = %started.key, "test run started");
        Ok(started.key)
    }

    fn delete_test_run(&self, key: &str) -> Result<(), ClientError> {
        let response = self
            .agent
            .delete(self.item_url("testrun", key))
            .header("Accept", "application/json")
            .header("Authorization", self.authorization.as_str())
            .call()?;
        check(response)?;
        info!(key, "test run deleted");
        Ok(())
    }

    fn search_test_runs(&self, query: &str) -> Result<Vec<TestRunSummary>, ClientError> {
        let response = self
            .agent
            .get(self.url("testrun/search"))
            .query("query", query)
            .query("maxResults", SEARCH_MAX_RESULTS)
            .query("fields", SEARCH_FIELDS)
            .header("Accept", "application/json")
            .header("Authorization", self.authorization.as_str())
            .call()?;
        let runs: Vec<TestRunSummary> = decode(response)?;
        debug!(?runs, "search results");
        Ok(runs)
    }

    fn check_test_case_exists(&self, case_id: &str) -> Result<(), ClientError> {
        let response = self
            .agent
            .get(self.item_url("testcase", case_id))
            .header("Accept", "application/json")
            .header("Authorization", self.authorization.as_str())
            .call()?;
        let case: TestCaseInfo = decode(response)?;
        debug!(?case, "get test case results");
        Ok(())
    }
}

/// `Authorization` header value for HTTP Basic authentication
#[must_use]
pub fn basic_auth(user: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{user}:{password}")))
}
