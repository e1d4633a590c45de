mod cli;
mod config;
mod logging;
mod replay;

use anyhow::bail;
use clap::Parser;
use harvester_core::Outcome;
use harvester_engine::{CsvFileSink, Harvester};
use log::info;

use crate::cli::Cli;
use crate::config::{load_file_config, resolve_settings, FileConfig};
use crate::replay::ReplayDriver;

const STAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::initialize(cli.log_to, cli.log_level.into());

    let file_config = match &cli.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    let stamp = chrono::Local::now().format(STAMP_FORMAT).to_string();
    let settings = resolve_settings(&cli, file_config, &stamp);

    info!(
        "Harvesting {} posts for {}",
        settings.harvest.target_count,
        settings.harvest.mode.describe()
    );
    info!("Output file: {}", settings.output_path.display());
    match settings.harvest.language.as_deref().filter(|l| !l.is_empty()) {
        Some(lang) => info!("Language filter: {lang}"),
        None => info!("Language filter: none"),
    }

    let driver = ReplayDriver::new(cli.capture_dir.clone(), settings.replay_batch);
    let sink = CsvFileSink::new(settings.output_path.clone());
    let report = Harvester::new(settings.harvest, driver, sink).run()?;

    if report.outcome == Outcome::LoginFailed {
        bail!("login was not confirmed in time; nothing was harvested");
    }
    println!(
        "{:?}: {} posts in {} scroll steps, saved to {}",
        report.outcome,
        report.records,
        report.scroll_steps,
        settings.output_path.display()
    );
    Ok(())
}
