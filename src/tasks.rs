use crate::error::Result;
use regex::Regex;
use std::collections::BTreeSet;

pub const DEFAULT_TASK_PATTERN: &str = r"[A-Za-z]{2,4}-\d{1,5}";

/// Pulls task identifiers such as `ABC-123` out of commit messages.
#[derive(Debug, Clone)]
pub struct TaskExtractor {
    pattern: Regex,
}

impl TaskExtractor {
    pub fn new(pattern: &str) -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(pattern)?,
        })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn extract(&self, message: &str) -> BTreeSet<String> {
        self.pattern
            .find_iter(message)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}
