//! Built-in catalog through request building, planning, and the device document.

use growplan_core::catalog::Catalog;
use growplan_core::{
    Channel, MAX_SCHEDULE_ENTRIES, PlanError, ScheduleDocument, ScheduleRequestBuilder,
    generate_growth_schedule_entries, summarize_phase, weekday_names,
};
use growplan_config::{Language, ScheduleCfg};
use growplan_traits::{MemoryStore, ScheduleStore};

fn en_label(key: &str) -> String {
    key.trim_start_matches("growth_pump_").replace('_', " ")
}

#[test]
fn builtin_program_plans_with_frequency_masks() {
    let catalog = Catalog::builtin();
    let program = catalog.by_pair("tomato", "aquatica-tripart").unwrap();
    let phase = program.phase_or_first("flowering").unwrap();

    let cfg = ScheduleCfg {
        ph_regulation: true,
        ph_hour: 7,
        ..ScheduleCfg::default()
    };
    let req = ScheduleRequestBuilder::from(&cfg)
        .program_name(program.display_name(Language::En))
        .masks_from_phase(phase)
        .build();

    let out = generate_growth_schedule_entries(&req, phase, &en_label);
    assert_eq!(out.entries.len(), 5);
    assert_eq!(out.remapped, 0);
    let nutrient_mask = growplan_core::weekdays_mask_for_frequency(f64::from(phase.feedings_per_week));
    assert!(out.entries[2..].iter().all(|e| e.weekdays_mask == nutrient_mask));
    assert!(!weekday_names(nutrient_mask).is_empty());

    let doc = out.into_document(cfg.tz_offset_minutes);
    doc.validate().unwrap();
    assert!(doc.entries.len() <= MAX_SCHEDULE_ENTRIES);
}

#[test]
fn store_round_trip_keeps_timezone() {
    let mut store: MemoryStore<ScheduleDocument> = MemoryStore::default();
    assert_eq!(store.load().unwrap(), None);

    let catalog = Catalog::builtin();
    let program = catalog.get("gh-floraseries-basil").unwrap();
    let phase = program.phase_or_first("vegetative").unwrap();
    let req = ScheduleRequestBuilder::from(&ScheduleCfg::default())
        .program_name(program.display_name(Language::Ru))
        .build();
    let doc = generate_growth_schedule_entries(&req, phase, &en_label).into_document(180);
    store.save(&doc).unwrap();

    let loaded = store.load().unwrap().unwrap();
    assert_eq!(loaded.tz_offset_minutes, 180);
    assert_eq!(loaded, doc);
    assert_eq!(store.saves, 1);
}

#[test]
fn oversized_document_is_rejected() {
    let catalog = Catalog::builtin();
    let program = catalog.get("aquatica-tripart-universal").unwrap();
    let phase = &program.phases[0];
    let req = ScheduleRequestBuilder::from(&ScheduleCfg {
        ph_regulation: true,
        ..ScheduleCfg::default()
    })
    .build();
    let mut entries = generate_growth_schedule_entries(&req, phase, &en_label).entries;
    entries.extend(entries.clone());
    let doc = ScheduleDocument::new(0, entries);
    assert_eq!(
        doc.validate(),
        Err(PlanError::TooManyEntries { count: 10, max: 8 })
    );
}

#[test]
fn summary_matches_planned_volumes() {
    let catalog = Catalog::builtin();
    let program = catalog.get("foxfarm-trio-kale").unwrap();
    let phase = program.phase_or_first("vegetative").unwrap();
    let summary = summarize_phase(phase, 12.0, true);

    assert_eq!(summary.channels.len(), 5);
    assert_eq!(summary.channels[0].channel, Channel::PhMinus);
    let a = summary
        .channels
        .iter()
        .find(|c| c.channel == Channel::NutrientA)
        .unwrap();
    assert!((a.per_dose_ml - phase.nutrients.a * 12.0).abs() < 1e-9);
    assert_eq!(a.frequency, phase.feedings_per_week);
}
