//! `catalog` subcommands and loading the active catalog.

use crate::cli::CatalogCmd;
use growplan_config::{Language, ProgramRecord};
use growplan_core::catalog::Catalog;
use growplan_traits::SystemClock;
use serde_json::json;
use std::path::Path;

/// Programs from `path`, or the built-in table when no file is given.
pub fn load_records(path: Option<&Path>) -> eyre::Result<Vec<ProgramRecord>> {
    match path {
        Some(p) => {
            let records = growplan_config::load_catalog(p)?;
            tracing::debug!(path = ?p, programs = records.len(), "catalog imported");
            Ok(records)
        }
        None => Ok(growplan_config::default_programs()),
    }
}

pub fn run_catalog(
    cmd: &CatalogCmd,
    records: &[ProgramRecord],
    language: Language,
    json_mode: bool,
) -> eyre::Result<()> {
    match cmd {
        CatalogCmd::List => {
            let catalog = Catalog::from_records(records);
            if json_mode {
                let list: Vec<serde_json::Value> = catalog
                    .iter()
                    .map(|p| {
                        json!({
                            "id": p.id,
                            "name": p.display_name(language),
                            "plant": p.plant_id,
                            "fertilizer": p.fertilizer_id,
                            "phases": p.phases.iter().map(|ph| ph.key.as_str()).collect::<Vec<_>>(),
                        })
                    })
                    .collect();
                println!("{}", serde_json::to_string_pretty(&list)?);
            } else {
                for p in catalog.iter() {
                    println!("{:<40} {}", p.id, p.display_name(language));
                }
            }
        }
        CatalogCmd::Export { file } => {
            growplan_config::save_catalog(file, records, &SystemClock::new())?;
            tracing::info!(path = ?file, programs = records.len(), "catalog exported");
            if json_mode {
                println!("{}", json!({ "exported": records.len(), "path": file }));
            } else {
                println!("exported {} programs to {}", records.len(), file.display());
            }
        }
        CatalogCmd::Import { file } => {
            let imported = growplan_config::load_catalog(file)?;
            if json_mode {
                println!("{}", json!({ "programs": imported.len(), "path": file }));
            } else {
                println!("{}: {} programs ok", file.display(), imported.len());
            }
        }
    }
    Ok(())
}
