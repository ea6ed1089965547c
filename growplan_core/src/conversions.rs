//! `From` implementations bridging `growplan_config` types to `growplan_core` types.

use crate::catalog::{FeedingPhase, GrowthProgram, NutrientDose, PhDose};
use crate::request::{ScheduleRequest, ScheduleRequestBuilder};

// ── Catalog ──────────────────────────────────────────────────────────────────

impl From<&growplan_config::PhaseRecord> for FeedingPhase {
    fn from(p: &growplan_config::PhaseRecord) -> Self {
        Self {
            key: p.key.clone(),
            feedings_per_week: p.feedings_per_week,
            ph_adjustments_per_week: p.ph_adjustments_per_week,
            nutrients: NutrientDose {
                a: p.nutrients.a,
                b: p.nutrients.b,
                c: p.nutrients.c,
            },
            ph: PhDose {
                plus: p.ph.plus,
                minus: p.ph.minus,
            },
        }
    }
}

impl From<&growplan_config::ProgramRecord> for GrowthProgram {
    fn from(p: &growplan_config::ProgramRecord) -> Self {
        Self {
            id: p.id.clone(),
            fertilizer_id: p.fertilizer_id.clone(),
            fertilizer_name_en: p.fertilizer_name_en.clone(),
            fertilizer_name_ru: p.fertilizer_name_ru.clone(),
            plant_id: p.plant_id.clone(),
            plant_name_en: p.plant_name_en.clone(),
            plant_name_ru: p.plant_name_ru.clone(),
            name_en: p.name_en.clone(),
            name_ru: p.name_ru.clone(),
            source: p.source.clone(),
            phases: p.phases.iter().map(FeedingPhase::from).collect(),
        }
    }
}

// ── Schedule defaults ────────────────────────────────────────────────────────

impl From<&growplan_config::ScheduleCfg> for ScheduleRequestBuilder {
    fn from(c: &growplan_config::ScheduleCfg) -> Self {
        ScheduleRequest::builder()
            .water_l(c.water_l)
            .ph_regulation(c.ph_regulation)
            .nutrient_time(f64::from(c.nutrient_hour), f64::from(c.nutrient_minute))
            .ph_time(f64::from(c.ph_hour), f64::from(c.ph_minute))
            .pause_minutes(f64::from(c.pause_minutes))
            .active_motor_count(u32::from(c.active_motor_count))
            .name_max_bytes(c.name_max_bytes)
    }
}
