use crate::util::hours_between;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

/// A silence longer than this closes the current session.
pub const SESSION_GAP_HOURS: f64 = 3.0;

/// Shortest duration a session is ever credited with.
pub const MIN_SESSION_HOURS: f64 = 0.5;

/// Commit timestamps and task ids collected for one author in one repository.
#[derive(Debug, Clone, Default)]
pub struct AuthorActivity {
    timestamps: Vec<DateTime<Utc>>,
    tasks: BTreeSet<String>,
}

impl AuthorActivity {
    pub fn record(&mut self, timestamp: DateTime<Utc>, tasks: BTreeSet<String>) {
        self.timestamps.push(timestamp);
        self.tasks.extend(tasks);
    }

    pub fn commit_count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn tasks(&self) -> &BTreeSet<String> {
        &self.tasks
    }

    /// Sorts the timestamps and splits them into session durations.
    pub fn sessions(&mut self) -> Vec<f64> {
        self.timestamps.sort_unstable();
        build_sessions(&self.timestamps)
    }

    pub fn into_tasks(self) -> BTreeSet<String> {
        self.tasks
    }
}

/// Splits ascending `timestamps` into session durations in hours.
///
/// A gap strictly greater than [`SESSION_GAP_HOURS`] ends a session. Every
/// session is credited at least [`MIN_SESSION_HOURS`], which also covers
/// sessions made of a single commit. Unsorted input gives meaningless results.
pub fn build_sessions(timestamps: &[DateTime<Utc>]) -> Vec<f64> {
    let Some(first) = timestamps.first() else {
        return Vec::new();
    };

    let mut sessions = Vec::new();
    let mut session_start = first;

    for pair in timestamps.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        debug_assert!(prev <= curr, "timestamps must be sorted");
        if hours_between(prev, curr) > SESSION_GAP_HOURS {
            sessions.push(session_duration(session_start, prev));
            session_start = curr;
        }
    }

    let last = &timestamps[timestamps.len() - 1];
    sessions.push(session_duration(session_start, last));
    sessions
}

fn session_duration(start: &DateTime<Utc>, end: &DateTime<Utc>) -> f64 {
    hours_between(start, end).max(MIN_SESSION_HOURS)
}
