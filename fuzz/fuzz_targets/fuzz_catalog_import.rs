#![no_main]
use growplan_core::catalog::Catalog;
use growplan_core::{ScheduleRequest, generate_growth_schedule_entries};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(records) = growplan_config::parse_catalog_json(data) else {
        return;
    };
    // Whatever the importer accepts must plan without panicking and stay in device limits.
    let catalog = Catalog::from_records(&records);
    let req = ScheduleRequest::builder()
        .program_name("fuzz")
        .ph_regulation(true)
        .active_motor_count(3)
        .build();
    for program in catalog.iter() {
        for phase in &program.phases {
            let out = generate_growth_schedule_entries(&req, phase, &|k: &str| k.to_string());
            assert!(out.entries.len() <= 5);
            assert!(out.entries.iter().all(|e| e.volume_ml >= 1 && e.motor_id <= 2));
        }
    }
});
