use crate::error::{ReportError, Result};
use crate::filter::{CommitFilter, Exclusions};
use crate::model::{DateRange, ReportMode};
use crate::tasks::TaskExtractor;
use chrono::{DateTime, NaiveDate, Utc, TimeZone};
use std::time::SystemTime;

/// Everything the analysis needs, resolved once before any repository is read.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub mode: ReportMode,
    pub extractor: TaskExtractor,
    pub exclusions: Exclusions,
    pub window: DateRange,
}

impl RunConfig {
    pub fn new(mode: ReportMode, extractor: TaskExtractor) -> Self {
        Self {
            mode,
            extractor,
            exclusions: Exclusions::new(),
            window: DateRange::new(),
        }
    }

    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    pub fn with_window(mut self, window: DateRange) -> Self {
        self.window = window;
        self
    }

    pub fn filter(&self) -> CommitFilter {
        CommitFilter::new(self.exclusions.clone(), self.window.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Start,
    End,
}

pub fn resolve_window(since: Option<&str>, until: Option<&str>) -> Result<DateRange> {
    let mut range = DateRange::new();

    let since_dt = since.map(|s| parse_date(s, Bound::Start)).transpose()?;
    let until_dt = until.map(|u| parse_date(u, Bound::End)).transpose()?;

    if let (Some(s), Some(u)) = (since_dt, until_dt) {
        if s > u {
            return Err(ReportError::InvalidDate(format!(
                "Invalid range: since ({}) is after until ({})",
                s, u
            )));
        }
    }

    if let Some(s) = since_dt {
        range = range.with_since(s);
    }
    if let Some(u) = until_dt {
        range = range.with_until(u);
    }

    Ok(range)
}

fn parse_date(input: &str, bound: Bound) -> Result<DateTime<Utc>> {
    // RFC3339
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }

    // YYYY-MM-DD covers the whole calendar day
    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let time = match bound {
            Bound::Start => date.and_hms_opt(0, 0, 0),
            Bound::End => date.and_hms_opt(23, 59, 59),
        };
        if let Some(datetime) = time {
            return Ok(Utc.from_utc_datetime(&datetime));
        }
    }

    // Relative duration (e.g., "90 days ago", "2 weeks ago")
    if let Some(duration) = parse_relative(input) {
        let target = SystemTime::now()
            .checked_sub(duration)
            .ok_or_else(|| ReportError::InvalidDate(format!("Duration overflow for '{input}'")))?;
        return Ok(DateTime::<Utc>::from(target));
    }

    Err(ReportError::InvalidDate(format!(
        "'{input}' is not RFC3339, YYYY-MM-DD or a relative date like '2 weeks ago'"
    )))
}

fn parse_relative(input: &str) -> Option<std::time::Duration> {
    let input = input.trim().to_lowercase();
    let amount = input.strip_suffix("ago")?;
    let compact: String = amount.chars().filter(|c| !c.is_whitespace()).collect();
    humantime::parse_duration(&compact).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn calendar_dates_cover_whole_days() {
        let range = resolve_window(Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(range.since, Some(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()));
        assert_eq!(range.until, Some(Utc.with_ymd_and_hms(2024, 1, 31, 23, 59, 59).unwrap()));
    }

    #[test]
    fn single_day_window_is_valid() {
        let range = resolve_window(Some("2024-02-29"), Some("2024-02-29")).unwrap();
        assert!(range.contains(&Utc.with_ymd_and_hms(2024, 2, 29, 18, 30, 0).unwrap()));
    }

    #[test]
    fn rfc3339_is_normalized_to_utc() {
        let range = resolve_window(Some("2024-03-10T10:00:00+02:00"), None).unwrap();
        assert_eq!(range.since, Some(Utc.with_ymd_and_hms(2024, 3, 10, 8, 0, 0).unwrap()));
        assert_eq!(range.until, None);
    }

    #[test]
    fn relative_dates_are_in_the_past() {
        let range = resolve_window(Some("2 weeks ago"), Some("3 days ago")).unwrap();
        let now = Utc::now();
        let since = range.since.unwrap();
        let until = range.until.unwrap();
        assert!(since < until && until < now);
        assert!(now - since >= chrono::Duration::days(13));
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert!(matches!(
            resolve_window(Some("2024-05-02"), Some("2024-05-01")),
            Err(ReportError::InvalidDate(_))
        ));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(resolve_window(Some("last tuesday-ish"), None).is_err());
    }

    #[test]
    fn no_bounds_gives_full_history() {
        assert!(resolve_window(None, None).unwrap().is_unbounded());
    }
}
