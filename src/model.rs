use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub author_name: String,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl CommitRecord {
    pub fn new(author_name: impl Into<String>, timestamp: DateTime<Utc>, message: impl Into<String>) -> Self {
        Self {
            author_name: author_name.into(),
            timestamp,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    Summary,
    Detailed,
    Tasks,
}

impl ReportMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Detailed => "detailed",
            Self::Tasks => "tasks",
        }
    }
}

impl fmt::Display for ReportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 90th percentile of session durations. Only meaningful with ten or more sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Percentile {
    Value(f64),
    NotApplicable,
}

impl Percentile {
    pub fn value(&self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(*v),
            Self::NotApplicable => None,
        }
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => fmt::Display::fmt(v, f),
            Self::NotApplicable => match f.width() {
                Some(w) => write!(f, "{:>w$}", "N/A"),
                None => f.write_str("N/A"),
            },
        }
    }
}

impl Serialize for Percentile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Value(v) => serializer.serialize_f64(*v),
            Self::NotApplicable => serializer.serialize_str("N/A"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorStats {
    pub hours: f64,
    pub task_set: BTreeSet<String>,
    pub task_count: usize,
    pub sessions: usize,
    pub avg_session: f64,
    pub median_session: f64,
    pub p90_session: Percentile,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryReport {
    pub total_hours: f64,
    pub total_tasks: usize,
    pub total_developers: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskRollup {
    pub hours: f64,
    pub developers: BTreeSet<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoReport {
    Summary(SummaryReport),
    Detailed(BTreeMap<String, AuthorStats>),
    Tasks(BTreeMap<String, TaskRollup>),
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportOutput<'a> {
    pub version: u32,
    pub generated_at: DateTime<Utc>,
    pub report_type: ReportMode,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub repositories: &'a BTreeMap<String, RepoReport>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DateRange {
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
}

impl DateRange {
    pub fn new() -> Self {
        Self { since: None, until: None }
    }

    pub fn with_since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_until(mut self, until: DateTime<Utc>) -> Self {
        self.until = Some(until);
        self
    }

    pub fn is_unbounded(&self) -> bool {
        self.since.is_none() && self.until.is_none()
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        if let Some(since) = self.since {
            if timestamp < &since {
                return false;
            }
        }
        if let Some(until) = self.until {
            if timestamp > &until {
                return false;
            }
        }
        true
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new()
    }
}
