//! CLI argument definitions and shared statics.

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use growplan_config::Language;
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub const DEFAULT_CONFIG_PATH: &str = "etc/growplan.toml";

#[derive(Parser, Debug)]
#[command(name = "growplan", version, about = "Growth-program dosing schedule planner")]
pub struct Cli {
    /// Path to config TOML (optional when the default path does not exist)
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Growth-program catalog JSON to use instead of the built-in one
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Print results and errors as JSON, log as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace); RUST_LOG wins when set
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the dosing schedule for one program phase
    Plan(PlanArgs),
    /// Per-channel doses and weekly totals for one program phase
    Summary(SummaryArgs),
    /// Inspect, export or check growth-program catalogs
    Catalog {
        #[command(subcommand)]
        cmd: CatalogCmd,
    },
    /// Load config and catalog, then report
    SelfCheck,
}

#[derive(Subcommand, Debug)]
pub enum CatalogCmd {
    /// List program ids and names
    List,
    /// Write the active catalog as a v1 JSON envelope
    Export {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Check an import file and report how many programs it yields
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Lang {
    En,
    Ru,
}

impl From<Lang> for Language {
    fn from(l: Lang) -> Self {
        match l {
            Lang::En => Language::En,
            Lang::Ru => Language::Ru,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

/// Program and phase selection shared by `plan` and `summary`.
#[derive(Args, Debug, Clone)]
pub struct ProgramArgs {
    /// Program id (e.g. aquatica-tripart-tomato)
    #[arg(long, value_name = "ID")]
    pub program: Option<String>,
    /// Plant id; together with --fertilizer takes precedence over --program
    #[arg(long, value_name = "ID", requires = "fertilizer")]
    pub plant: Option<String>,
    /// Fertilizer id
    #[arg(long, value_name = "ID", requires = "plant")]
    pub fertilizer: Option<String>,
    /// Phase key (seedling|vegetative|flowering|fruiting); first phase when omitted
    #[arg(long, value_name = "KEY")]
    pub phase: Option<String>,
    /// Label language; defaults to [labels].language
    #[arg(long, value_enum)]
    pub lang: Option<Lang>,
}

impl ProgramArgs {
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.plant.as_deref(), self.fertilizer.as_deref()) {
            (Some(p), Some(f)) => Some((p, f)),
            _ => None,
        }
    }
}

/// pH regulation switch; unset falls back to the config.
#[derive(Args, Debug, Clone, Copy)]
pub struct PhSwitch {
    /// Include the pH+ / pH- channels
    #[arg(long = "ph", action = ArgAction::SetTrue, conflicts_with = "no_ph")]
    pub ph: bool,
    /// Leave the pH channels out
    #[arg(long = "no-ph", action = ArgAction::SetTrue)]
    pub no_ph: bool,
}

impl PhSwitch {
    pub fn resolve(self, fallback: bool) -> bool {
        match (self.ph, self.no_ph) {
            (true, _) => true,
            (_, true) => false,
            _ => fallback,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub program: ProgramArgs,
    /// Reservoir volume in liters
    #[arg(long = "water-l", value_name = "LITERS")]
    pub water_l: Option<f64>,
    #[command(flatten)]
    pub ph: PhSwitch,
    /// Nutrient anchor time
    #[arg(long, value_name = "HH:MM", value_parser = parse_hhmm)]
    pub nutrient_time: Option<(u8, u8)>,
    /// pH anchor time
    #[arg(long, value_name = "HH:MM", value_parser = parse_hhmm)]
    pub ph_time: Option<(u8, u8)>,
    /// Minimum gap between channel starts in minutes (1..=180)
    #[arg(long, value_name = "MIN")]
    pub pause: Option<f64>,
    /// Motors fitted to the device
    #[arg(long, value_name = "N")]
    pub motors: Option<u32>,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
    /// Merge the entries into this schedule document (device JSON shape)
    #[arg(long, value_name = "FILE")]
    pub save: Option<PathBuf>,
    /// Device timezone offset in minutes written with --save
    #[arg(long, value_name = "MIN", allow_negative_numbers = true)]
    pub tz_offset: Option<i32>,
}

#[derive(Args, Debug, Clone)]
pub struct SummaryArgs {
    #[command(flatten)]
    pub program: ProgramArgs,
    /// Reservoir volume in liters
    #[arg(long = "water-l", value_name = "LITERS")]
    pub water_l: Option<f64>,
    #[command(flatten)]
    pub ph: PhSwitch,
}

/// Parse `HH:MM` (24h clock).
pub fn parse_hhmm(s: &str) -> Result<(u8, u8), String> {
    let (h, m) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| format!("expected HH:MM, got {s:?}"))?;
    let hour: u8 = h
        .parse()
        .map_err(|_| format!("invalid hour in {s:?}"))?;
    let minute: u8 = m
        .parse()
        .map_err(|_| format!("invalid minute in {s:?}"))?;
    if hour > 23 || minute > 59 {
        return Err(format!("time out of range: {s:?}"));
    }
    Ok((hour, minute))
}
