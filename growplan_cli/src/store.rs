//! Schedule document persisted as a JSON file in the device's wire shape.

use eyre::WrapErr;
use growplan_core::{ScheduleDocument, ScheduleEntry};
use growplan_traits::ScheduleStore;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("read schedule file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("schedule file {path:?} is not a schedule document: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("encode schedule for {path:?}: {source}")]
    Encode {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("write schedule file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Option<ScheduleDocument>, StoreError> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        if text.trim().is_empty() {
            return Ok(None);
        }
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })
    }

    fn write(&self, doc: &ScheduleDocument) -> Result<(), StoreError> {
        let mut text = serde_json::to_string_pretty(doc).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;
        text.push('\n');
        std::fs::write(&self.path, text).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl ScheduleStore<ScheduleDocument> for JsonFileStore {
    fn load(&mut self) -> Result<Option<ScheduleDocument>, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.read()?)
    }

    fn save(&mut self, doc: &ScheduleDocument) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.write(doc)?)
    }
}

fn store_report(e: Box<dyn std::error::Error + Send + Sync>) -> eyre::Report {
    match e.downcast::<StoreError>() {
        Ok(typed) => eyre::Report::new(*typed),
        Err(other) => eyre::eyre!(other),
    }
}

/// Read-modify-write: replace the stored entries, keep the stored timezone
/// offset unless `tz_override` is given, validate, then save.
///
/// `default_tz` is used when nothing is stored yet.
pub fn merge_and_save<S>(
    store: &mut S,
    entries: Vec<ScheduleEntry>,
    tz_override: Option<i32>,
    default_tz: i32,
) -> eyre::Result<ScheduleDocument>
where
    S: ScheduleStore<ScheduleDocument>,
{
    let stored = store
        .load()
        .map_err(store_report)
        .wrap_err("load existing schedule")?;
    let tz = tz_override
        .or_else(|| stored.as_ref().map(|d| d.tz_offset_minutes))
        .unwrap_or(default_tz);
    let doc = ScheduleDocument::new(tz, entries);
    doc.validate()?;
    store
        .save(&doc)
        .map_err(store_report)
        .wrap_err("save schedule")?;
    tracing::info!(entries = doc.entries.len(), tz_offset_minutes = tz, "schedule saved");
    Ok(doc)
}
