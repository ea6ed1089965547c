use growplan_config::catalog::{
    GROWTH_SCHEMA, default_programs, export_catalog_json, load_catalog, parse_catalog_json,
    save_catalog,
};
use growplan_traits::FixedClock;
use std::fs;
use tempfile::tempdir;

#[test]
fn envelope_round_trips_through_export() {
    let programs = default_programs();
    let text = export_catalog_json(&programs, &FixedClock::from_unix_secs(1_700_000_000)).unwrap();
    assert!(text.contains(GROWTH_SCHEMA));
    assert!(text.contains("\"exportedAt\": \"2023-11-14T22:13:20.000Z\""));

    let back = parse_catalog_json(&text).unwrap();
    assert_eq!(back, programs);
}

#[test]
fn bare_array_is_normalized() {
    let text = r#"[
        {
            "id": "My Mix!",
            "nameEn": "My mix",
            "phases": [
                { "feedingsPerWeek": 9, "nutrients": { "a": 2, "b": -1, "c": "0.5" }, "ph": { "plus": 0.3 } },
                { "key": "bloom", "feedingsPerWeek": 0 }
            ]
        }
    ]"#;
    let programs = parse_catalog_json(text).unwrap();
    assert_eq!(programs.len(), 1);
    let p = &programs[0];
    assert_eq!(p.id, "my-mix-");
    assert_eq!(p.name_en, "My mix");
    // missing source is tagged as imported
    assert_eq!(p.source, "imported");
    assert_eq!(p.phases[0].key, "seedling");
    assert_eq!(p.phases[0].feedings_per_week, 7);
    assert_eq!(p.phases[0].ph_adjustments_per_week, 1);
    assert_eq!(p.phases[0].nutrients.a, 2.0);
    assert_eq!(p.phases[0].nutrients.b, 0.0);
    assert_eq!(p.phases[0].nutrients.c, 0.5);
    assert_eq!(p.phases[0].ph.minus, 0.0);
    assert_eq!(p.phases[1].key, "bloom");
    assert_eq!(p.phases[1].feedings_per_week, 1);
}

#[test]
fn missing_fields_fall_back_to_builtin_program_at_same_index() {
    let defaults = default_programs();
    let programs = parse_catalog_json(r#"[{}, { "nameRu": "Второй" }]"#).unwrap();
    assert_eq!(programs[0].id, defaults[0].id);
    assert_eq!(programs[0].phases, defaults[0].phases);
    assert_eq!(programs[1].plant_id, defaults[1].plant_id);
    assert_eq!(programs[1].name_ru, "Второй");
    assert_eq!(programs[1].name_en, defaults[1].name_en);
}

#[test]
fn object_map_uses_keys_as_ids_in_insertion_order() {
    let text = r#"{
        "zeta": { "phases": [] },
        "alpha": { "phases": [ { "key": "vegetative" } ] },
        "ignored": { "name": "no phases here" }
    }"#;
    let programs = parse_catalog_json(text).unwrap();
    let ids: Vec<&str> = programs.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, ["zeta", "alpha"]);
    assert!(programs[0].phases.is_empty());
}

#[test]
fn rejects_unsupported_and_empty_payloads() {
    let err = parse_catalog_json(r#"{ "hello": 1 }"#).unwrap_err();
    assert!(format!("{err}").contains("unsupported growth programs format"));

    let err = parse_catalog_json("[]").unwrap_err();
    assert!(format!("{err}").contains("no programs"));

    let err = parse_catalog_json("not json").unwrap_err();
    assert!(format!("{err}").contains("not valid JSON"));
}

#[test]
fn wrong_schema_version_is_not_an_envelope() {
    let text = format!(
        r#"{{ "schema": "{GROWTH_SCHEMA}", "schemaVersion": 2, "programs": [{{}}] }}"#
    );
    assert!(parse_catalog_json(&text).is_err());
}

#[test]
fn string_schema_version_is_accepted() {
    let text = format!(
        r#"{{ "schema": "{GROWTH_SCHEMA}", "schemaVersion": " 1 ", "programs": [{{ "id": "custom" }}] }}"#
    );
    let programs = parse_catalog_json(&text).unwrap();
    assert_eq!(programs.len(), 1);
}

#[test]
fn save_then_load_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("programs.json");
    let programs = default_programs()[..3].to_vec();
    save_catalog(&path, &programs, &FixedClock::from_unix_secs(0)).unwrap();
    assert!(fs::read_to_string(&path).unwrap().contains("1970-01-01T00:00:00.000Z"));
    assert_eq!(load_catalog(&path).unwrap(), programs);
}

#[test]
fn load_reports_missing_file() {
    let dir = tempdir().unwrap();
    let err = load_catalog(&dir.path().join("nope.json")).unwrap_err();
    assert!(format!("{err}").contains("open catalog"));
}
