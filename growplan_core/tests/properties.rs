use growplan_core::planner::plan_channels;
use growplan_core::resolver::resolve_conflicts;
use growplan_core::time::DAY_MINUTES;
use growplan_core::{
    FeedingPhase, NutrientDose, PhDose, ScheduleRequest, generate_growth_schedule_entries,
};
use proptest::prelude::*;

fn dose() -> impl Strategy<Value = f64> {
    prop_oneof![
        6 => 0.0f64..5.0,
        1 => -5.0f64..0.0,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
    ]
}

fn knob() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -50.0f64..300.0,
        1 => Just(f64::NAN),
        1 => Just(f64::NEG_INFINITY),
    ]
}

prop_compose! {
    fn phase_strategy()(
        a in dose(), b in dose(), c in dose(),
        plus in dose(), minus in dose(),
    ) -> FeedingPhase {
        FeedingPhase {
            key: "vegetative".into(),
            feedings_per_week: 3,
            ph_adjustments_per_week: 2,
            nutrients: NutrientDose { a, b, c },
            ph: PhDose { plus, minus },
        }
    }
}

prop_compose! {
    fn request_strategy()(
        name in "[a-zA-Zа-яё ]{0,40}",
        water in knob(),
        ph in any::<bool>(),
        nh in knob(), nm in knob(),
        ph_h in knob(), ph_m in knob(),
        pause in knob(),
        motors in 0u32..8,
        name_max in 0usize..40,
        nmask in any::<u8>(), pmask in any::<u8>(),
    ) -> ScheduleRequest {
        ScheduleRequest::builder()
            .program_name(name)
            .water_l(water)
            .ph_regulation(ph)
            .nutrient_time(nh, nm)
            .ph_time(ph_h, ph_m)
            .pause_minutes(pause)
            .active_motor_count(motors)
            .name_max_bytes(name_max)
            .nutrient_mask(nmask)
            .ph_mask(pmask)
            .build()
    }
}

fn label(key: &str) -> String {
    format!("Насос {key}")
}

proptest! {
    #[test]
    fn planning_is_deterministic(req in request_strategy(), phase in phase_strategy()) {
        let first = generate_growth_schedule_entries(&req, &phase, &label);
        let second = generate_growth_schedule_entries(&req, &phase, &label);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn starts_keep_at_least_one_pause_apart(req in request_strategy(), phase in phase_strategy()) {
        let pause = req.pause_minutes();
        let scheduled = resolve_conflicts(plan_channels(&req, &phase), pause);
        for pair in scheduled.windows(2) {
            prop_assert!(pair[1].scheduled_minutes >= pair[0].scheduled_minutes + pause);
        }
        let out = generate_growth_schedule_entries(&req, &phase, &label);
        if scheduled.iter().all(|s| s.scheduled_minutes < DAY_MINUTES) {
            for pair in out.entries.windows(2) {
                prop_assert!(pair[1].minutes() >= pair[0].minutes() + pause);
            }
        }
    }

    #[test]
    fn entries_respect_device_limits(req in request_strategy(), phase in phase_strategy()) {
        let out = generate_growth_schedule_entries(&req, &phase, &label);
        let max_motor = req.active_motor_count.max(1) - 1;
        let budget = req.name_max_bytes.max(1);
        prop_assert!(out.entries.len() <= 5);
        prop_assert!((1..=180).contains(&out.pause_minutes));
        for e in &out.entries {
            prop_assert!(e.volume_ml >= 1);
            prop_assert!(e.motor_id <= max_motor);
            prop_assert!(e.hour <= 23 && e.minute <= 59);
            prop_assert!(e.weekdays_mask <= 0x7F);
            prop_assert!(e.name.len() <= budget);
            prop_assert!(e.enabled && !e.reverse);
        }
    }

    #[test]
    fn names_are_the_longest_fitting_prefix(req in request_strategy(), phase in phase_strategy()) {
        let out = generate_growth_schedule_entries(&req, &phase, &label);
        let scheduled = resolve_conflicts(plan_channels(&req, &phase), out.pause_minutes);
        prop_assert_eq!(out.entries.len(), scheduled.len());
        let budget = req.name_max_bytes.max(1);
        for (e, s) in out.entries.iter().zip(&scheduled) {
            let full = format!("{} {}", req.program_name.trim(), label(s.request.name_key()));
            prop_assert!(full.starts_with(&e.name), "{:?} is not a prefix of {:?}", e.name, full);
            if e.name.len() < full.len() {
                let next = full[e.name.len()..].chars().next().map_or(0, char::len_utf8);
                prop_assert!(e.name.len() + next > budget);
            }
        }
    }

    #[test]
    fn remap_count_matches_clamped_motors(req in request_strategy(), phase in phase_strategy()) {
        let out = generate_growth_schedule_entries(&req, &phase, &label);
        let planned = plan_channels(&req, &phase);
        let max_motor = req.active_motor_count.max(1) - 1;
        let expected = planned.iter().filter(|c| c.motor_id > max_motor).count();
        prop_assert_eq!(out.remapped, expected);
        prop_assert_eq!(out.entries.len(), planned.len());
    }
}
