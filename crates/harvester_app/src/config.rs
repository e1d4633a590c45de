use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use harvester_engine::{output_file_name, HarvestConfig, HarvestMode, SearchQuery};
use ron::extensions::Extensions;
use serde::Deserialize;

use crate::cli::Cli;

const DEFAULT_OUTPUT_DIR: &str = "tweets-data";
const DEFAULT_REPLAY_BATCH: usize = 2;

/// Defaults read from a RON file; command-line flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub delay_secs: Option<u64>,
    pub login_timeout_secs: Option<u64>,
    pub site_host: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub lang: Option<String>,
    pub backoff_base_secs: Option<u64>,
    pub backoff_max_secs: Option<u64>,
    pub mailbox_capacity: Option<usize>,
    /// Captured responses delivered per scroll by the replay driver.
    pub replay_batch: Option<usize>,
}

pub fn load_file_config(path: &Path) -> anyhow::Result<FileConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(&content)
        .with_context(|| format!("parsing config file {}", path.display()))
}

/// Everything the binary needs to start a session.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub harvest: HarvestConfig,
    pub output_path: PathBuf,
    pub replay_batch: usize,
}

pub fn resolve_settings(cli: &Cli, file: FileConfig, stamp: &str) -> RunSettings {
    let mode = match (&cli.from_user, &cli.search_keyword) {
        (Some(handle), _) => HarvestMode::Profile {
            handle: handle.clone(),
        },
        (None, keywords) => HarvestMode::Search(SearchQuery {
            keywords: keywords.clone().unwrap_or_default(),
            since: cli.from_date.clone(),
            until: cli.to_date.clone(),
        }),
    };

    let mut harvest = HarvestConfig::new(mode);
    harvest.target_count = cli.limit;
    if let Some(secs) = cli.delay.or(file.delay_secs) {
        harvest.scroll_delay = Duration::from_secs(secs);
    }
    if let Some(secs) = file.login_timeout_secs {
        harvest.login_timeout = Duration::from_secs(secs);
    }
    if let Some(host) = file.site_host {
        harvest.site_host = host;
    }
    harvest.language = cli.lang.clone().or(file.lang);
    if let Some(secs) = file.backoff_base_secs {
        harvest.backoff.base = Duration::from_secs(secs);
    }
    if let Some(secs) = file.backoff_max_secs {
        harvest.backoff.max = Duration::from_secs(secs);
    }
    let replay_batch = file.replay_batch.unwrap_or(DEFAULT_REPLAY_BATCH).max(1);
    // The replay driver delivers a whole batch while the session is not draining.
    harvest.mailbox_capacity = file
        .mailbox_capacity
        .unwrap_or(harvest.mailbox_capacity)
        .max(replay_batch);

    let output_dir = cli
        .output_dir
        .clone()
        .or(file.output_dir)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));
    let file_name = output_file_name(&harvest.mode, cli.output_filename.as_deref(), stamp);

    RunSettings {
        harvest,
        output_path: output_dir.join(file_name),
        replay_batch,
    }
}
