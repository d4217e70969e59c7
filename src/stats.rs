use crate::error::{ReportError, Result};
use crate::model::{AuthorStats, Percentile};
use crate::session::AuthorActivity;
use crate::util::round2;
use std::collections::{BTreeMap, BTreeSet};

/// Sessions needed before a 90th percentile is reported.
pub const MIN_SESSIONS_FOR_P90: usize = 10;

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub total: f64,
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub p90: Percentile,
}

pub fn summarize(sessions: &[f64]) -> Result<SessionSummary> {
    if sessions.is_empty() {
        return Err(ReportError::Stats("no sessions to summarize".to_string()));
    }

    let mut sorted = sessions.to_vec();
    sorted.sort_by(f64::total_cmp);

    let count = sorted.len();
    let total: f64 = sorted.iter().sum();
    let p90 = if count >= MIN_SESSIONS_FOR_P90 {
        Percentile::Value(round2(upper_decile(&sorted)))
    } else {
        Percentile::NotApplicable
    };

    Ok(SessionSummary {
        total: round2(total),
        count,
        mean: round2(total / count as f64),
        median: round2(median(&sorted)),
        p90,
    })
}

fn median(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

// Last of the nine decile cut points, exclusive method (positions over n + 1).
fn upper_decile(sorted: &[f64]) -> f64 {
    let m = sorted.len() + 1;
    let j = (9 * m) / 10;
    let delta = ((9 * m) % 10) as f64;
    (sorted[j - 1] * (10.0 - delta) + sorted[j] * delta) / 10.0
}

impl AuthorStats {
    pub fn from_sessions(sessions: &[f64], task_set: BTreeSet<String>) -> Result<Self> {
        let summary = summarize(sessions)?;
        Ok(Self {
            hours: summary.total,
            task_count: task_set.len(),
            task_set,
            sessions: summary.count,
            avg_session: summary.mean,
            median_session: summary.median,
            p90_session: summary.p90,
        })
    }
}

/// Turns every author's activity into stats. Authors without commits are left out.
pub fn compute_author_stats(
    activity: BTreeMap<String, AuthorActivity>,
) -> Result<BTreeMap<String, AuthorStats>> {
    let mut stats = BTreeMap::new();
    for (author, mut dev) in activity {
        if dev.commit_count() == 0 {
            continue;
        }
        let sessions = dev.sessions();
        stats.insert(author, AuthorStats::from_sessions(&sessions, dev.into_tasks())?);
    }
    Ok(stats)
}
