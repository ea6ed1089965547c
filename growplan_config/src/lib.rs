#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema and growth-program catalog files for the schedule planner.
//!
//! - `Config` and its sections are deserialized from TOML and validated.
//! - `catalog` holds the growth-program records, the built-in default
//!   catalog, and the JSON v1 import/export format.
use serde::Deserialize;
use std::collections::BTreeMap;

pub mod catalog;

pub use catalog::{
    CatalogFile, GROWTH_PHASE_KEYS, GROWTH_SCHEMA, GROWTH_SCHEMA_VERSION, NutrientRecord,
    PhRecord, PhaseRecord, ProgramRecord, default_programs, export_catalog_json, load_catalog,
    parse_catalog_json, save_catalog,
};

/// Timezone offsets the device accepts, in minutes.
pub const TZ_OFFSET_MIN: i32 = -720;
pub const TZ_OFFSET_MAX: i32 = 840;

/// Planning defaults used when the command line leaves a knob unset.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ScheduleCfg {
    /// Reservoir volume in liters
    pub water_l: f64,
    /// Include the pH+ / pH- channels
    pub ph_regulation: bool,
    pub nutrient_hour: u8,
    pub nutrient_minute: u8,
    pub ph_hour: u8,
    pub ph_minute: u8,
    /// Minimum gap between two channel starts (minutes)
    pub pause_minutes: u32,
    /// Number of motors physically fitted to the device
    pub active_motor_count: u8,
    /// Device timezone offset written with a saved schedule
    pub tz_offset_minutes: i32,
    /// Byte budget for an entry name in the device store
    pub name_max_bytes: usize,
}

impl Default for ScheduleCfg {
    fn default() -> Self {
        Self {
            water_l: 10.0,
            ph_regulation: false,
            nutrient_hour: 9,
            nutrient_minute: 0,
            ph_hour: 9,
            ph_minute: 0,
            pause_minutes: 10,
            active_motor_count: 5,
            tz_offset_minutes: 0,
            name_max_bytes: 32,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct LabelsCfg {
    pub language: Language,
    /// Per-key label text that wins over the built-in tables.
    pub overrides: BTreeMap<String, String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(default)]
pub struct Config {
    pub schedule: ScheduleCfg,
    pub labels: LabelsCfg,
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        let s = &self.schedule;

        // Schedule
        if !s.water_l.is_finite() || s.water_l < 1.0 {
            eyre::bail!("schedule.water_l must be a number >= 1.0");
        }
        if s.nutrient_hour > 23 {
            eyre::bail!("schedule.nutrient_hour must be in [0, 23]");
        }
        if s.nutrient_minute > 59 {
            eyre::bail!("schedule.nutrient_minute must be in [0, 59]");
        }
        if s.ph_hour > 23 {
            eyre::bail!("schedule.ph_hour must be in [0, 23]");
        }
        if s.ph_minute > 59 {
            eyre::bail!("schedule.ph_minute must be in [0, 59]");
        }
        if !(1..=180).contains(&s.pause_minutes) {
            eyre::bail!("schedule.pause_minutes must be in [1, 180]");
        }
        if s.active_motor_count == 0 {
            eyre::bail!("schedule.active_motor_count must be >= 1");
        }
        if !(TZ_OFFSET_MIN..=TZ_OFFSET_MAX).contains(&s.tz_offset_minutes) {
            eyre::bail!(
                "schedule.tz_offset_minutes must be in [{TZ_OFFSET_MIN}, {TZ_OFFSET_MAX}]"
            );
        }
        if s.name_max_bytes == 0 || s.name_max_bytes > 32 {
            eyre::bail!("schedule.name_max_bytes must be in [1, 32]");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never|daily|hourly, got {rot:?}");
        }

        Ok(())
    }
}
