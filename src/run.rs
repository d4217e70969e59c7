use crate::config::RunConfig;
use crate::error::{ReportError, Result};
use crate::filter::CommitFilter;
use crate::model::{AuthorStats, CommitRecord, DateRange};
use crate::report::ReportAccumulator;
use crate::session::AuthorActivity;
use crate::stats::compute_author_stats;
use crate::tasks::TaskExtractor;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// Anything that can hand over the commits of one repository.
pub trait CommitSource {
    fn commits(&self, window: &DateRange) -> Result<Vec<CommitRecord>>;
}

impl CommitSource for Vec<CommitRecord> {
    fn commits(&self, _window: &DateRange) -> Result<Vec<CommitRecord>> {
        Ok(self.clone())
    }
}

/// Groups accepted commits by author, collecting timestamps and task ids.
pub fn scan_commits(
    commits: &[CommitRecord],
    filter: &CommitFilter,
    extractor: &TaskExtractor,
) -> BTreeMap<String, AuthorActivity> {
    let mut activity: BTreeMap<String, AuthorActivity> = BTreeMap::new();
    for commit in commits {
        if !filter.accepts(&commit.author_name, &commit.timestamp) {
            continue;
        }
        activity
            .entry(commit.author_name.clone())
            .or_default()
            .record(commit.timestamp, extractor.extract(&commit.message));
    }
    activity
}

/// Per-author stats for one repository, or `None` when no commit survives filtering.
pub fn analyze_repository<S: CommitSource + ?Sized>(
    source: &S,
    config: &RunConfig,
) -> Result<Option<BTreeMap<String, AuthorStats>>> {
    let filter = config.filter();
    let commits = source.commits(filter.window())?;
    let activity = scan_commits(&commits, &filter, &config.extractor);
    debug!(
        commits = commits.len(),
        authors = activity.len(),
        "scanned repository"
    );

    if activity.is_empty() {
        return Ok(None);
    }
    compute_author_stats(activity).map(Some)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepoOutcome {
    Reported,
    Empty,
    /// The candidate directory holds no repository.
    NotARepository,
    Failed,
}

/// Drives repositories one after another into a shared accumulator.
/// A failing repository is logged and skipped, never fatal.
pub struct Orchestrator<'a> {
    config: &'a RunConfig,
    report: ReportAccumulator,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a RunConfig) -> Self {
        Self {
            config,
            report: ReportAccumulator::new(config.mode),
        }
    }

    pub fn process<S, F>(&mut self, name: &str, open: F) -> RepoOutcome
    where
        S: CommitSource,
        F: FnOnce() -> Result<S>,
    {
        let result = open().and_then(|source| analyze_repository(&source, self.config));
        match result {
            Ok(Some(stats)) => {
                self.report.record(name, &stats);
                RepoOutcome::Reported
            }
            Ok(None) => {
                info!(repository = name, "no eligible commits, skipping");
                RepoOutcome::Empty
            }
            Err(ReportError::NotARepository(path)) => {
                debug!(repository = name, %path, "not a git repository, skipping");
                RepoOutcome::NotARepository
            }
            Err(e) => {
                warn!(repository = name, error = %e, "skipping repository");
                RepoOutcome::Failed
            }
        }
    }

    /// The accumulated report, or `None` when no repository produced data.
    pub fn finish(self) -> Option<ReportAccumulator> {
        if self.report.is_empty() {
            None
        } else {
            Some(self.report)
        }
    }
}
