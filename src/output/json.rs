use crate::model::{DateRange, ReportOutput, SCHEMA_VERSION};
use crate::report::ReportAccumulator;
use anyhow::Result;
use chrono::Utc;

pub fn render_json(report: &ReportAccumulator, window: &DateRange) -> Result<String> {
    let output = ReportOutput {
        version: SCHEMA_VERSION,
        generated_at: Utc::now(),
        report_type: report.mode(),
        since: window.since,
        until: window.until,
        repositories: report.repositories(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

pub fn output_json(report: &ReportAccumulator, window: &DateRange) -> Result<()> {
    println!("{}", render_json(report, window)?);
    Ok(())
}
