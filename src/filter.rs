use crate::error::Result;
use crate::model::DateRange;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::path::Path;

/// Lowercased author names that never count towards any statistic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Exclusions {
    names: HashSet<String>,
}

impl Exclusions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_lowercase())
            .filter(|n| !n.is_empty())
            .collect();
        Self { names }
    }

    /// One name per line. A missing file means nobody is excluded.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(contents) => Ok(Self::from_names(contents.lines())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::new()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn contains(&self, author: &str) -> bool {
        self.names.contains(&author.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CommitFilter {
    exclusions: Exclusions,
    window: DateRange,
}

impl CommitFilter {
    pub fn new(exclusions: Exclusions, window: DateRange) -> Self {
        Self { exclusions, window }
    }

    pub fn accepts(&self, author: &str, timestamp: &DateTime<Utc>) -> bool {
        !self.exclusions.contains(author) && self.window.contains(timestamp)
    }

    pub fn window(&self) -> &DateRange {
        &self.window
    }
}
