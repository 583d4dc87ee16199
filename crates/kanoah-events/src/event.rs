// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! `go test -json` event parsing
//!
//! A report is newline-delimited JSON, one [`TestEvent`] per line, as written
//! by `go test -json` (test2json). The whole report is loaded into an
//! [`EventStore`] before any reconciliation starts.
//!
//! # Example
//!
//! ```
//! use kanoah_events::event::{Action, parse_events};
//!
//! let report = r#"{"Time":"2024-05-01T10:00:00Z","Action":"run","Package":"app","Test":"TestLogin"}"#;
//! let store = parse_events(report).unwrap();
//! assert_eq!(store.len(), 1);
//! assert_eq!(store.events()[0].action, Action::Run);
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::EventsError;

/// Action reported by test2json for a single event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// The test binary is about to be executed
    Start,
    /// The test has started running
    Run,
    /// The test has been paused
    Pause,
    /// The test has continued running
    Cont,
    /// The test passed
    Pass,
    /// The benchmark printed log output but did not fail
    Bench,
    /// The test or benchmark failed
    Fail,
    /// The test printed output
    Output,
    /// The test was skipped or the package contained no tests
    Skip,
    /// Any action this crate does not know about
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Whether this action ends a test (pass, fail or skip)
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Action::Pass | Action::Fail | Action::Skip)
    }

    /// Whether this action marks the start of a test
    #[must_use]
    pub fn is_start(self) -> bool {
        self == Action::Run
    }
}

/// One line of a `go test -json` report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TestEvent {
    /// When the event happened, with the offset it was recorded in
    ///
    /// Build records (`build-output`, `build-fail`) carry no time.
    #[serde(default)]
    pub time: Option<DateTime<FixedOffset>>,
    /// What happened
    pub action: Action,
    /// Go package import path (empty for events outside a package)
    #[serde(default)]
    pub package: String,
    /// Test name (empty for package-level events)
    #[serde(default)]
    pub test: String,
    /// Elapsed seconds, set on terminal events
    #[serde(default)]
    pub elapsed: f64,
    /// Output fragment, set on output events
    #[serde(default)]
    pub output: String,
}

/// Append-only, ordered store of every event in a report
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    events: Vec<TestEvent>,
}

impl EventStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every event from a buffered reader
    ///
    /// Blank lines are ignored; any other line must decode as a
    /// [`TestEvent`].
    ///
    /// # Errors
    ///
    /// Returns `EventsError::Io` if reading fails and `EventsError::Parse`
    /// for the first malformed line.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, EventsError> {
        let mut store = Self::new();
        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let event = serde_json::from_str(line).map_err(|source| EventsError::Parse {
                line: idx + 1,
                source,
            })?;
            store.push(event);
        }
        debug!(events = store.len(), "total events parsed");
        Ok(store)
    }

    /// Load every event from a report file
    ///
    /// # Errors
    ///
    /// Returns `EventsError::Io` if the file cannot be opened or read, and
    /// `EventsError::Parse` for the first malformed line.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, EventsError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Append an event
    pub fn push(&mut self, event: TestEvent) {
        self.events.push(event);
    }

    /// All events in report order
    #[must_use]
    pub fn events(&self) -> &[TestEvent] {
        &self.events
    }

    /// Number of events
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the store holds no events
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl FromIterator<TestEvent> for EventStore {
    fn from_iter<I: IntoIterator<Item = TestEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

/// Parse a complete report held in memory
///
/// # Errors
///
/// Returns `EventsError::Parse` for the first malformed line.
pub fn parse_events(report: &str) -> Result<EventStore, EventsError> {
    EventStore::from_reader(report.as_bytes())
}

/// Parse a report file
///
/// # Errors
///
/// See [`EventStore::open`].
pub fn parse_events_file(path: impl AsRef<Path>) -> Result<EventStore, EventsError> {
    EventStore::open(path)
}
