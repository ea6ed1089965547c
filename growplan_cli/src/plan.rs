//! `plan` and `summary`: program selection, request mapping, rendering.

use crate::cli::{OutputFormat, PlanArgs, ProgramArgs, SummaryArgs};
use crate::labels::Labels;
use crate::store::{JsonFileStore, merge_and_save};
use eyre::WrapErr;
use growplan_config::{Config, Language, ScheduleCfg};
use growplan_core::catalog::Catalog;
use growplan_core::{
    FeedingPhase, GrowthProgram, GrowthSchedule, PhaseSummary, PlanError, ScheduleRequest,
    ScheduleRequestBuilder, generate_growth_schedule_entries, summarize_phase, weekday_names,
};
use growplan_traits::NameResolver;
use serde::Serialize;
use serde_json::json;
use std::io::Write;

/// Program by pair or id, then phase by key (first phase when none is given).
pub fn select<'a>(
    catalog: &'a Catalog,
    args: &ProgramArgs,
) -> eyre::Result<(&'a GrowthProgram, &'a FeedingPhase)> {
    let program = catalog.select(args.program.as_deref(), args.pair())?;
    let phase = match args.phase.as_deref() {
        Some(key) => program.phase(key),
        None => program.phases.first(),
    };
    let phase = phase.ok_or_else(|| PlanError::UnknownPhase {
        program: program.id.clone(),
        phase: args.phase.clone().unwrap_or_default(),
    })?;
    Ok((program, phase))
}

/// Config defaults, then phase frequencies, then command-line overrides.
pub fn build_request(
    cfg: &ScheduleCfg,
    args: &PlanArgs,
    program_name: &str,
    phase: &FeedingPhase,
) -> ScheduleRequest {
    let mut b = ScheduleRequestBuilder::from(cfg)
        .program_name(program_name)
        .masks_from_phase(phase)
        .ph_regulation(args.ph.resolve(cfg.ph_regulation));
    if let Some(water) = args.water_l {
        b = b.water_l(water);
    }
    if let Some((h, m)) = args.nutrient_time {
        b = b.nutrient_time(f64::from(h), f64::from(m));
    }
    if let Some((h, m)) = args.ph_time {
        b = b.ph_time(f64::from(h), f64::from(m));
    }
    if let Some(pause) = args.pause {
        b = b.pause_minutes(pause);
    }
    if let Some(motors) = args.motors {
        b = b.active_motor_count(motors);
    }
    b.build()
}

#[derive(Serialize)]
struct CsvRow<'a> {
    time: String,
    motor_id: u32,
    volume_ml: u32,
    weekdays_mask: u8,
    weekdays: String,
    name: &'a str,
}

fn print_table(
    out: &mut impl Write,
    heading: &str,
    phase: &FeedingPhase,
    schedule: &GrowthSchedule,
) -> std::io::Result<()> {
    writeln!(
        out,
        "{heading} | {} | pause {} min",
        phase.key, schedule.pause_minutes
    )?;
    if schedule.is_empty() {
        return writeln!(out, "(no channels to dose)");
    }
    writeln!(out, "{:<6} {:<5} {:>7}  {:<20} NAME", "TIME", "MOTOR", "VOLUME", "DAYS")?;
    for e in &schedule.entries {
        writeln!(
            out,
            "{:02}:{:02}  {:<5} {:>4} ml  {:<20} {}",
            e.hour,
            e.minute,
            e.motor_id,
            e.volume_ml,
            weekday_names(e.weekdays_mask),
            e.name
        )?;
    }
    Ok(())
}

fn print_csv(out: impl Write, schedule: &GrowthSchedule) -> eyre::Result<()> {
    let mut w = csv::Writer::from_writer(out);
    for e in &schedule.entries {
        w.serialize(CsvRow {
            time: format!("{:02}:{:02}", e.hour, e.minute),
            motor_id: e.motor_id,
            volume_ml: e.volume_ml,
            weekdays_mask: e.weekdays_mask,
            weekdays: weekday_names(e.weekdays_mask),
            name: &e.name,
        })?;
    }
    w.flush()?;
    Ok(())
}

pub fn run_plan(
    cfg: &Config,
    catalog: &Catalog,
    args: &PlanArgs,
    json_mode: bool,
) -> eyre::Result<()> {
    let (program, phase) = select(catalog, &args.program)?;
    let language = args.program.lang.map(Language::from);
    let labels = Labels::from_config(&cfg.labels, language);
    let name = program.display_name(labels.language());
    let request = build_request(&cfg.schedule, args, name, phase);
    let schedule = generate_growth_schedule_entries(&request, phase, &labels);
    tracing::info!(
        program = %program.id,
        phase = %phase.key,
        entries = schedule.entries.len(),
        remapped = schedule.remapped,
        "schedule planned"
    );

    let saved = match &args.save {
        Some(path) => {
            let mut store = JsonFileStore::new(path);
            let doc = merge_and_save(
                &mut store,
                schedule.entries.clone(),
                args.tz_offset,
                cfg.schedule.tz_offset_minutes,
            )
            .wrap_err_with(|| format!("save schedule to {path:?}"))?;
            Some((store, doc.tz_offset_minutes))
        }
        None => None,
    };

    let format = if json_mode { OutputFormat::Json } else { args.format };
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Table => {
            print_table(&mut out, &program.pair_label(labels.language()), phase, &schedule)?;
        }
        OutputFormat::Csv => print_csv(&mut out, &schedule)?,
        OutputFormat::Json => {
            let body = json!({
                "program": program.id,
                "phase": phase.key,
                "pauseMinutes": schedule.pause_minutes,
                "remapped": schedule.remapped,
                "savedTo": saved.as_ref().map(|(s, _)| s.path().display().to_string()),
                "tzOffsetMinutes": saved.as_ref().map(|(_, tz)| *tz),
                "entries": schedule.entries,
            });
            writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        }
    }

    if !json_mode {
        if schedule.remapped > 0 {
            eprintln!(
                "warning: {} channel(s) moved onto motor {} (device has {} motor(s))",
                schedule.remapped,
                request.max_motor(),
                request.active_motor_count.max(1)
            );
        }
        if let Some((store, tz)) = &saved {
            eprintln!(
                "saved {} entries to {} (tz offset {tz} min)",
                schedule.entries.len(),
                store.path().display()
            );
        }
    }
    Ok(())
}

fn summary_json(
    program: &GrowthProgram,
    phase: &FeedingPhase,
    water_l: f64,
    s: &PhaseSummary,
    labels: &Labels,
) -> serde_json::Value {
    let channels: Vec<serde_json::Value> = s
        .channels
        .iter()
        .map(|c| {
            json!({
                "key": c.channel.name_key(),
                "label": labels.resolve(c.channel.name_key()),
                "perDoseMl": c.per_dose_ml,
                "weeklyMl": c.weekly_ml,
                "timesPerWeek": c.frequency,
            })
        })
        .collect();
    json!({
        "program": program.id,
        "phase": phase.key,
        "waterL": water_l,
        "feedingsPerWeek": s.feedings_per_week,
        "phAdjustmentsPerWeek": s.ph_adjustments_per_week,
        "channels": channels,
    })
}

pub fn run_summary(
    cfg: &Config,
    catalog: &Catalog,
    args: &SummaryArgs,
    json_mode: bool,
) -> eyre::Result<()> {
    let (program, phase) = select(catalog, &args.program)?;
    let labels = Labels::from_config(&cfg.labels, args.program.lang.map(Language::from));
    let water_l = args.water_l.unwrap_or(cfg.schedule.water_l);
    let ph = args.ph.resolve(cfg.schedule.ph_regulation);
    let summary = summarize_phase(phase, water_l, ph);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json_mode {
        let body = summary_json(program, phase, water_l, &summary, &labels);
        writeln!(out, "{}", serde_json::to_string_pretty(&body)?)?;
        return Ok(());
    }

    writeln!(
        out,
        "{} | {} | {water_l} L",
        program.pair_label(labels.language()),
        phase.key
    )?;
    writeln!(
        out,
        "feedings/week: {}  pH adjustments/week: {}",
        summary.feedings_per_week, summary.ph_adjustments_per_week
    )?;
    writeln!(out, "{:<24} {:>10} {:>10} {:>7}", "CHANNEL", "PER DOSE", "PER WEEK", "x/WEEK")?;
    for c in &summary.channels {
        writeln!(
            out,
            "{:<24} {:>7.1} ml {:>7.1} ml {:>7}",
            labels.resolve(c.channel.name_key()),
            c.per_dose_ml,
            c.weekly_ml,
            c.frequency
        )?;
    }
    Ok(())
}
