use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgGroup, Parser, ValueEnum};
use log::LevelFilter;

use crate::logging::LogDestination;

/// Harvest posts from a search or a profile timeline into a CSV file.
#[derive(Debug, Parser)]
#[command(name = "tweet_harvest", version)]
#[command(group(
    ArgGroup::new("mode")
        .required(true)
        .args(["search_keyword", "from_user"]),
))]
pub struct Cli {
    /// Search keyword or phrase.
    #[arg(short = 's', long)]
    pub search_keyword: Option<String>,

    /// Harvest posts from this profile handle instead of a search.
    #[arg(short = 'u', long)]
    pub from_user: Option<String>,

    /// Number of posts to collect before stopping.
    #[arg(short = 'l', long, default_value_t = 100)]
    pub limit: usize,

    /// Earliest date (YYYY-MM-DD); search mode only.
    #[arg(short = 'f', long, value_parser = parse_date, requires = "search_keyword")]
    pub from_date: Option<String>,

    /// Latest date (YYYY-MM-DD); search mode only.
    #[arg(long, value_parser = parse_date, requires = "search_keyword")]
    pub to_date: Option<String>,

    /// Output file name without extension.
    #[arg(short = 'o', long)]
    pub output_filename: Option<String>,

    /// Keep only posts in this language (e.g. `en`).
    #[arg(long)]
    pub lang: Option<String>,

    /// Seconds to wait after each scroll.
    #[arg(long, value_name = "SECONDS")]
    pub delay: Option<u64>,

    /// Directory for the CSV output.
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Directory of captured timeline responses to replay.
    #[arg(long, env = "HARVEST_CAPTURE_DIR")]
    pub capture_dir: PathBuf,

    /// RON file with default settings.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    #[arg(long, value_enum, default_value_t = LogDestination::Terminal)]
    pub log_to: LogDestination,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn parse_date(raw: &str) -> Result<String, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.format("%Y-%m-%d").to_string())
        .map_err(|err| format!("expected YYYY-MM-DD: {err}"))
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn search_and_user_are_mutually_exclusive() {
        let both = Cli::try_parse_from([
            "tweet_harvest",
            "-s",
            "rust",
            "-u",
            "nasa",
            "--capture-dir",
            "caps",
        ]);
        assert!(both.is_err());

        let neither = Cli::try_parse_from(["tweet_harvest", "--capture-dir", "caps"]);
        assert!(neither.is_err());
    }

    #[test]
    fn dates_require_search_mode_and_valid_format() {
        let ok = Cli::try_parse_from([
            "tweet_harvest",
            "-s",
            "rust",
            "--from-date",
            "2024-01-05",
            "--capture-dir",
            "caps",
        ])
        .unwrap();
        assert_eq!(ok.from_date.as_deref(), Some("2024-01-05"));
        assert_eq!(ok.limit, 100);

        let bad = Cli::try_parse_from([
            "tweet_harvest",
            "-s",
            "rust",
            "--to-date",
            "05/01/2024",
            "--capture-dir",
            "caps",
        ]);
        assert!(bad.is_err());

        let profile_with_date = Cli::try_parse_from([
            "tweet_harvest",
            "-u",
            "nasa",
            "--from-date",
            "2024-01-05",
            "--capture-dir",
            "caps",
        ]);
        assert!(profile_with_date.is_err());
    }
}
