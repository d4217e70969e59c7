use crate::model::RepoReport;
use crate::report::ReportAccumulator;
use chrono::Local;
use console::style;

const WIDTH: usize = 60;
const MAX_LISTED_DEVELOPERS: usize = 3;

pub fn print_report(report: &ReportAccumulator) {
    println!("\n{}", "═".repeat(WIDTH));
    let title = format!("GIT REPORT - {}", Local::now().format("%Y-%m-%d %H:%M"));
    println!("{}", style(format!("{:^width$}", title, width = WIDTH)).bold());
    println!("{}", "═".repeat(WIDTH));

    for (repo, data) in report.repositories() {
        println!("\n{} {}", style("REPOSITORY:").bold(), style(repo).cyan());
        for line in render_repo(data) {
            println!("  {line}");
        }
    }

    println!("\n{}", "═".repeat(WIDTH));
}

fn render_repo(data: &RepoReport) -> Vec<String> {
    let mut lines = Vec::new();
    match data {
        RepoReport::Summary(s) => {
            lines.push(format!("Developers:   {}", s.total_developers));
            lines.push(format!("Total hours:  {:?}", s.total_hours));
            lines.push(format!("Unique tasks: {}", s.total_tasks));
        }
        RepoReport::Detailed(devs) => {
            lines.push(format!(
                "{:<15} {:>6}  {:>6}  {:>8}  {:>5}  {:>5}  {:>5}",
                "Developer", "Hours", "Tasks", "Sessions", "Avg", "Med", "P90"
            ));
            lines.push("─".repeat(WIDTH - 2));
            for (dev, s) in devs {
                let name: String = dev.chars().take(15).collect();
                lines.push(format!(
                    "{:<15} {:>6.1}  {:>6}  {:>8}  {:>5.1}  {:>5.1}  {:>5.1}",
                    name, s.hours, s.task_count, s.sessions, s.avg_session, s.median_session, s.p90_session
                ));
            }
        }
        RepoReport::Tasks(tasks) => {
            lines.push(format!("{:<15} {:>6}  Developers", "Task", "Hours"));
            lines.push("─".repeat(WIDTH - 2));
            for (task, info) in tasks {
                let mut devs = info
                    .developers
                    .iter()
                    .take(MAX_LISTED_DEVELOPERS)
                    .cloned()
                    .collect::<Vec<_>>()
                    .join(", ");
                if info.developers.len() > MAX_LISTED_DEVELOPERS {
                    devs.push_str(&format!(" +{} more", info.developers.len() - MAX_LISTED_DEVELOPERS));
                }
                lines.push(format!("{:<15} {:>6.1}  {}", task, info.hours, devs));
            }
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthorStats, Percentile, SummaryReport, TaskRollup};
    use pretty_assertions::assert_eq;
    use std::collections::{BTreeMap, BTreeSet};

    #[test]
    fn summary_lines() {
        let lines = render_repo(&RepoReport::Summary(SummaryReport {
            total_hours: 2.5,
            total_tasks: 1,
            total_developers: 2,
        }));
        assert_eq!(lines, vec!["Developers:   2", "Total hours:  2.5", "Unique tasks: 1"]);
    }

    #[test]
    fn whole_hour_totals_keep_a_decimal() {
        let lines = render_repo(&RepoReport::Summary(SummaryReport {
            total_hours: 2.0,
            total_tasks: 0,
            total_developers: 1,
        }));
        assert_eq!(lines[1], "Total hours:  2.0");
    }

    #[test]
    fn detailed_truncates_names_and_shows_missing_p90() {
        let stats = AuthorStats {
            hours: 12.25,
            task_set: BTreeSet::new(),
            task_count: 0,
            sessions: 3,
            avg_session: 4.08,
            median_session: 3.5,
            p90_session: Percentile::NotApplicable,
        };
        let devs = BTreeMap::from([("Maximiliano Fernández".to_string(), stats)]);
        let lines = render_repo(&RepoReport::Detailed(devs));

        assert!(lines[2].starts_with("Maximiliano Fer "));
        assert!(lines[2].ends_with("  N/A"));
    }

    #[test]
    fn tasks_list_at_most_three_developers() {
        let developers: BTreeSet<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let tasks = BTreeMap::from([("AB-1".to_string(), TaskRollup { hours: 4.0, developers })]);
        let lines = render_repo(&RepoReport::Tasks(tasks));
        assert!(lines[2].ends_with("a, b, c +2 more"));
    }
}
