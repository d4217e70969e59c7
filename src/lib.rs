pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod git;
pub mod model;
pub mod output;
pub mod report;
pub mod run;
pub mod session;
pub mod stats;
pub mod tasks;
pub mod util;
