use growplan_config::load_toml;
use rstest::rstest;

#[rstest]
#[case("[schedule]\npause_minutes = 0", "pause_minutes must be in [1, 180]")]
#[case("[schedule]\npause_minutes = 181", "pause_minutes must be in [1, 180]")]
#[case("[schedule]\nnutrient_hour = 24", "nutrient_hour must be in [0, 23]")]
#[case("[schedule]\nph_minute = 60", "ph_minute must be in [0, 59]")]
#[case("[schedule]\nwater_l = 0.5", "water_l must be a number >= 1.0")]
#[case("[schedule]\nactive_motor_count = 0", "active_motor_count must be >= 1")]
#[case("[schedule]\ntz_offset_minutes = 900", "tz_offset_minutes must be in [-720, 840]")]
#[case("[schedule]\nname_max_bytes = 64", "name_max_bytes must be in [1, 32]")]
#[case("[logging]\nrotation = \"weekly\"", "logging.rotation must be one of")]
fn rejects_out_of_range_values(#[case] toml: &str, #[case] needle: &str) {
    let cfg = load_toml(toml).expect("parse TOML");
    let err = cfg.validate().expect_err("should reject");
    assert!(
        format!("{err}").contains(needle),
        "error {err} does not mention {needle}"
    );
}

#[test]
fn accepts_full_config() {
    let toml = r#"
[schedule]
water_l = 20.0
ph_regulation = true
nutrient_hour = 18
nutrient_minute = 0
ph_hour = 7
ph_minute = 30
pause_minutes = 15
active_motor_count = 3
tz_offset_minutes = 180
name_max_bytes = 32

[labels]
language = "ru"

[logging]
file = "growplan.log"
level = "debug"
rotation = "daily"
"#;

    let cfg = load_toml(toml).expect("parse TOML");
    cfg.validate().expect("valid config should pass");
    assert!(cfg.schedule.ph_regulation);
    assert_eq!(cfg.schedule.active_motor_count, 3);
    assert_eq!(cfg.logging.rotation.as_deref(), Some("daily"));
}

#[test]
fn unknown_language_is_a_parse_error() {
    assert!(load_toml("[labels]\nlanguage = \"de\"").is_err());
}
