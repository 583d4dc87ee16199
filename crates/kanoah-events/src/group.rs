// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Grouping of raw events into per-test event lists
//!
//! Events are first partitioned by test name, then regrouped by package, so
//! the same test name in two packages yields two independent lists. Groups
//! borrow from the [`EventStore`](crate::event::EventStore) and keep report
//! order inside each list.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::error::EventsError;
use crate::event::TestEvent;

/// Ordered events belonging to one test in one package
pub type EventGroup<'a> = Vec<&'a TestEvent>;

/// Test name -> events
pub type TestGroups<'a> = BTreeMap<&'a str, EventGroup<'a>>;

/// Package name -> test name -> events
pub type PackageGroups<'a> = BTreeMap<&'a str, TestGroups<'a>>;

/// Group events by package, then by test name
///
/// Events without a test name are left out of the grouping, as are events
/// without a package.
///
/// # Errors
///
/// Returns `EventsError::NoPackages` when nothing is left to group.
pub fn group_events_by_package(events: &[TestEvent]) -> Result<PackageGroups<'_>, EventsError> {
    let mut by_test: BTreeMap<&str, EventGroup<'_>> = BTreeMap::new();
    for event in events.iter().filter(|e| !e.test.is_empty()) {
        by_test.entry(event.test.as_str()).or_default().push(event);
    }

    let mut grouped = PackageGroups::new();
    for (test, test_events) in by_test {
        for event in test_events.into_iter().filter(|e| !e.package.is_empty()) {
            grouped
                .entry(event.package.as_str())
                .or_default()
                .entry(test)
                .or_default()
                .push(event);
        }
    }

    debug!(packages = grouped.len(), "total packages");
    if grouped.is_empty() {
        return Err(EventsError::NoPackages);
    }
    Ok(grouped)
}

/// Start/end markers seen in one test's events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lifecycle {
    /// At least one `run` event
    pub started: bool,
    /// At least one `pass`, `fail` or `skip` event
    pub ended: bool,
}

impl Lifecycle {
    /// Inspect an event list
    #[must_use]
    pub fn of(events: &[&TestEvent]) -> Self {
        Self {
            started: events.iter().any(|e| e.action.is_start()),
            ended: events.iter().any(|e| e.action.is_terminal()),
        }
    }

    /// Whether the test both started and ended
    #[must_use]
    pub fn is_complete(self) -> bool {
        self.started && self.ended
    }
}

/// Drop tests without a start marker or without a terminal marker
///
/// Each dropped test is reported with a warning. Retention is decided per
/// package, so a test that is broken in one package survives in another.
#[must_use]
pub fn delete_broken_tests(grouped: PackageGroups<'_>) -> PackageGroups<'_> {
    for (package, tests) in &grouped {
        debug!(package, "package");
        for (test, events) in tests {
            debug!(test, "test");
            for event in events {
                debug!(test = %event.test, action = ?event.action, package = %event.package, "event");
            }
        }
    }

    let mut retained = PackageGroups::new();
    for (package, tests) in grouped {
        for (test, events) in tests {
            let lifecycle = Lifecycle::of(&events);
            if !lifecycle.ended {
                warn!(package, test, "endless test");
            }
            if !lifecycle.started {
                warn!(package, test, "startless test");
            }
            if lifecycle.is_complete() {
                retained.entry(package).or_default().insert(test, events);
            }
        }
    }
    debug!(events = event_count(&retained), "events in complete tests");
    retained
}

/// Total number of events across all groups
#[must_use]
pub fn event_count(grouped: &PackageGroups<'_>) -> usize {
    grouped
        .values()
        .flat_map(BTreeMap::values)
        .map(Vec::len)
        .sum()
}
