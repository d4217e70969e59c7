use crate::model::{RepoReport, ReportMode};
use crate::report::ReportAccumulator;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

const BOM: &str = "\u{feff}";

pub fn write_csv_file(report: &ReportAccumulator, path: &Path) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_csv(report, &mut out)?;
    out.flush()
}

/// One row per leaf record, header depending on the report mode.
pub fn write_csv<W: Write>(report: &ReportAccumulator, out: &mut W) -> io::Result<()> {
    out.write_all(BOM.as_bytes())?;

    let header: &[&str] = match report.mode() {
        ReportMode::Summary => &["Repository", "Developers", "Total Hours", "Unique Tasks"],
        ReportMode::Detailed => &[
            "Repository",
            "Developer",
            "Hours",
            "Tasks",
            "Sessions",
            "Avg Session",
            "Median",
            "P90",
        ],
        ReportMode::Tasks => &["Repository", "Task", "Hours", "Developers"],
    };
    write_row(out, header.iter().map(|h| h.to_string()))?;

    for (repo, data) in report.repositories() {
        match data {
            RepoReport::Summary(s) => write_row(
                out,
                [
                    repo.clone(),
                    s.total_developers.to_string(),
                    number(s.total_hours),
                    s.total_tasks.to_string(),
                ],
            )?,
            RepoReport::Detailed(devs) => {
                for (dev, s) in devs {
                    let p90 = s.p90_session.value().map(number).unwrap_or_else(|| "N/A".to_string());
                    write_row(
                        out,
                        [
                            repo.clone(),
                            dev.clone(),
                            number(s.hours),
                            s.task_count.to_string(),
                            s.sessions.to_string(),
                            number(s.avg_session),
                            number(s.median_session),
                            p90,
                        ],
                    )?;
                }
            }
            RepoReport::Tasks(tasks) => {
                for (task, info) in tasks {
                    let devs: Vec<&str> = info.developers.iter().map(String::as_str).collect();
                    write_row(
                        out,
                        [repo.clone(), task.clone(), number(info.hours), devs.join(";")],
                    )?;
                }
            }
        }
    }
    Ok(())
}

fn write_row<W, I>(out: &mut W, fields: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = String>,
{
    let line: Vec<String> = fields.into_iter().map(|f| escape(&f)).collect();
    write!(out, "{}\r\n", line.join(","))
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

// Debug keeps the trailing ".0" on whole hours.
fn number(value: f64) -> String {
    format!("{value:?}")
}
