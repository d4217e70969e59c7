pub mod csv;
pub mod json;
pub mod terminal;

pub use self::csv::{write_csv, write_csv_file};
pub use self::json::{output_json, render_json};
pub use self::terminal::print_report;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Csv,
    Json,
}
