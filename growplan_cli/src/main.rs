#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! `growplan`: plan growth-program dosing schedules from the command line.

mod catalog;
mod cli;
mod error_fmt;
mod labels;
mod logging;
mod plan;
mod store;

use clap::Parser;
use cli::{Cli, Commands, DEFAULT_CONFIG_PATH, JSON_MODE};
use eyre::WrapErr;
use growplan_config::Config;
use growplan_core::catalog::Catalog;
use std::path::Path;

/// Config from `path`; the default path may be absent, anything else must exist.
fn load_config(path: &Path) -> eyre::Result<Config> {
    if !path.exists() {
        if path == Path::new(DEFAULT_CONFIG_PATH) {
            return Ok(Config::default());
        }
        eyre::bail!("config file {path:?} not found");
    }
    let text =
        std::fs::read_to_string(path).wrap_err_with(|| format!("read config {path:?}"))?;
    let cfg = growplan_config::load_toml(&text)
        .wrap_err_with(|| format!("parse config {path:?}"))?;
    cfg.validate()?;
    Ok(cfg)
}

fn run(cli: Cli) -> eyre::Result<()> {
    color_eyre::install()?;
    let cfg = load_config(&cli.config)?;
    logging::init_tracing(cli.log_level.as_deref(), cli.json, &cfg.logging)?;
    tracing::debug!(config = ?cli.config, "config loaded");

    let records = catalog::load_records(cli.catalog.as_deref())?;
    match &cli.cmd {
        Commands::Plan(args) => {
            let catalog = Catalog::from_records(&records);
            plan::run_plan(&cfg, &catalog, args, cli.json)
        }
        Commands::Summary(args) => {
            let catalog = Catalog::from_records(&records);
            plan::run_summary(&cfg, &catalog, args, cli.json)
        }
        Commands::Catalog { cmd } => {
            catalog::run_catalog(cmd, &records, cfg.labels.language, cli.json)
        }
        Commands::SelfCheck => {
            let catalog = Catalog::from_records(&records);
            if catalog.is_empty() {
                return Err(growplan_core::PlanError::EmptyCatalog.into());
            }
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "ok": true,
                        "programs": catalog.len(),
                        "plants": catalog.plants().len(),
                        "fertilizers": catalog.fertilizers().len(),
                    })
                );
            } else {
                println!(
                    "ok: {} programs ({} plants x {} fertilizers)",
                    catalog.len(),
                    catalog.plants().len(),
                    catalog.fertilizers().len()
                );
            }
            Ok(())
        }
    }
}

fn main() {
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);
    if let Err(e) = run(cli) {
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", error_fmt::format_error_json(&e));
        } else {
            eprintln!("{}", error_fmt::humanize(&e));
        }
        std::process::exit(error_fmt::exit_code_for_error(&e));
    }
}
