use crate::model::{AuthorStats, RepoReport, ReportMode, SummaryReport, TaskRollup};
use crate::util::round2;
use std::collections::{BTreeMap, BTreeSet};

/// Shapes per-author stats for one repository according to `mode`.
pub fn build_repo_report(mode: ReportMode, stats: &BTreeMap<String, AuthorStats>) -> RepoReport {
    match mode {
        ReportMode::Summary => RepoReport::Summary(summarize_repo(stats)),
        ReportMode::Detailed => RepoReport::Detailed(stats.clone()),
        ReportMode::Tasks => RepoReport::Tasks(rollup_tasks(stats)),
    }
}

fn summarize_repo(stats: &BTreeMap<String, AuthorStats>) -> SummaryReport {
    let unique_tasks: BTreeSet<&str> = stats
        .values()
        .flat_map(|s| s.task_set.iter().map(String::as_str))
        .collect();

    SummaryReport {
        total_hours: round2(stats.values().map(|s| s.hours).sum()),
        total_tasks: unique_tasks.len(),
        total_developers: stats.len(),
    }
}

// Each author's full hours go to every task they touched; nothing is split.
fn rollup_tasks(stats: &BTreeMap<String, AuthorStats>) -> BTreeMap<String, TaskRollup> {
    let mut tasks: BTreeMap<String, TaskRollup> = BTreeMap::new();
    for (author, s) in stats {
        for task in &s.task_set {
            let entry = tasks.entry(task.clone()).or_default();
            entry.hours += s.hours;
            entry.developers.insert(author.clone());
        }
    }
    for rollup in tasks.values_mut() {
        rollup.hours = round2(rollup.hours);
    }
    tasks
}

/// Repository reports collected over one run, keyed by repository name.
#[derive(Debug, Clone)]
pub struct ReportAccumulator {
    mode: ReportMode,
    repos: BTreeMap<String, RepoReport>,
}

impl ReportAccumulator {
    pub fn new(mode: ReportMode) -> Self {
        Self {
            mode,
            repos: BTreeMap::new(),
        }
    }

    pub fn mode(&self) -> ReportMode {
        self.mode
    }

    /// Stores the report for `repo`, replacing any earlier one.
    pub fn record(&mut self, repo: &str, stats: &BTreeMap<String, AuthorStats>) {
        let report = build_repo_report(self.mode, stats);
        self.repos.insert(repo.to_string(), report);
    }

    pub fn get(&self, repo: &str) -> Option<&RepoReport> {
        self.repos.get(repo)
    }

    pub fn repositories(&self) -> &BTreeMap<String, RepoReport> {
        &self.repos
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}
