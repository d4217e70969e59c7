use crate::config::{resolve_window, RunConfig};
use crate::filter::Exclusions;
use crate::git::{discover_repositories, repo_name, update_repository, GitRepo};
use crate::model::ReportMode;
use crate::output::{output_json, print_report, write_csv_file, OutputFormat};
use crate::run::Orchestrator;
use crate::tasks::{TaskExtractor, DEFAULT_TASK_PATTERN};
use anyhow::{Context, Result};
use clap::Parser;
use console::style;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

#[derive(Parser, Debug)]
#[command(name = "devhours")]
#[command(about = "Estimate developer hours, sessions and tasks from git history")]
#[command(version)]
pub struct Cli {
    #[arg(help = "Repository, or directory whose subdirectories are repositories")]
    pub path: PathBuf,

    #[arg(short = 't', long, value_enum, default_value_t = ReportMode::Summary, help = "Report to generate")]
    pub report_type: ReportMode,

    #[arg(short = 'o', long, value_enum, default_value_t = OutputFormat::Terminal, help = "Output format")]
    pub output: OutputFormat,

    #[arg(short = 'u', long, help = "Fetch all remotes before analysis")]
    pub update: bool,

    #[arg(long, default_value = "git_report.csv", help = "CSV file written with --output csv")]
    pub csv_file: PathBuf,

    #[arg(long, default_value = "externals.txt", help = "File listing developers to exclude, one per line")]
    pub externals_file: PathBuf,

    #[arg(long, default_value = DEFAULT_TASK_PATTERN, help = "Regular expression matching task ids")]
    pub task_pattern: String,

    #[arg(long, value_parser = humantime::parse_duration, default_value = "300s", help = "Time limit for fetching each repository")]
    pub timeout: Duration,

    #[arg(long, help = "Only count commits from this date (RFC3339, YYYY-MM-DD, or '2 weeks ago')")]
    pub since: Option<String>,

    #[arg(long, help = "Only count commits up to this date, inclusive (RFC3339, YYYY-MM-DD, or '2 weeks ago')")]
    pub until: Option<String>,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Cli {
    pub fn run_config(&self) -> Result<RunConfig> {
        let extractor = TaskExtractor::new(&self.task_pattern)
            .with_context(|| format!("Invalid task pattern '{}'", self.task_pattern))?;
        let exclusions = Exclusions::load(&self.externals_file)
            .with_context(|| format!("Failed to read {}", self.externals_file.display()))?;
        let window = resolve_window(self.since.as_deref(), self.until.as_deref())
            .context("Failed to resolve date range")?;
        debug!(excluded = exclusions.len(), pattern = %extractor.pattern(), "configuration resolved");

        Ok(RunConfig::new(self.report_type, extractor)
            .with_exclusions(exclusions)
            .with_window(window))
    }

    pub fn execute(self) -> Result<()> {
        let started = Instant::now();
        let config = self.run_config()?;
        let candidates = discover_repositories(&self.path)
            .with_context(|| format!("Cannot read {}", self.path.display()))?;

        let mut orchestrator = Orchestrator::new(&config);
        for path in &candidates {
            let name = repo_name(path);
            orchestrator.process(&name, || {
                let repo = GitRepo::open(path)?;
                if self.update {
                    eprintln!("Updating {}...", repo.name());
                    if let Err(e) = update_repository(repo.path(), self.timeout) {
                        warn!(repository = %name, error = %e, "update failed, using local data");
                    }
                }
                Ok(repo)
            });
        }

        let Some(report) = orchestrator.finish() else {
            println!("{}", style("No valid repositories found to analyze").red());
            return Ok(());
        };

        match self.output {
            OutputFormat::Terminal => print_report(&report),
            OutputFormat::Csv => {
                write_csv_file(&report, &self.csv_file)
                    .with_context(|| format!("Failed to write {}", self.csv_file.display()))?;
                println!("Report saved to: {}", style(self.csv_file.display()).green());
            }
            OutputFormat::Json => {
                output_json(&report, &config.window)?;
                return Ok(());
            }
        }

        let elapsed = Duration::from_secs(started.elapsed().as_secs());
        println!("\nTotal analysis time: {}", humantime::format_duration(elapsed));
        Ok(())
    }
}
