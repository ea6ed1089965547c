//! Planning request and its builder.
//!
//! Every numeric knob is stored as the caller gave it and coerced on read, so
//! a request can never be "invalid": out-of-range values are clamped and
//! non-numbers fall back to defaults.

use crate::catalog::FeedingPhase;
use crate::names::MAX_NAME_BYTES;
use crate::time::{DEFAULT_PAUSE_MINUTES, clamp_hour, clamp_minute, clamp_pause_minutes};
use crate::weekdays::{ALL_DAYS, weekdays_mask_for_frequency};

/// Anchor hour used when the requested one is not a number.
pub const DEFAULT_ANCHOR_HOUR: u8 = 9;

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleRequest {
    pub program_name: String,
    pub water_l: f64,
    pub ph_regulation_enabled: bool,
    pub nutrient_hour: f64,
    pub nutrient_minute: f64,
    pub ph_hour: f64,
    pub ph_minute: f64,
    pub nutrient_mask: u8,
    pub ph_mask: u8,
    pub pause_minutes: f64,
    pub active_motor_count: u32,
    pub name_max_bytes: usize,
}

impl Default for ScheduleRequest {
    fn default() -> Self {
        Self {
            program_name: String::new(),
            water_l: 1.0,
            ph_regulation_enabled: false,
            nutrient_hour: f64::from(DEFAULT_ANCHOR_HOUR),
            nutrient_minute: 0.0,
            ph_hour: f64::from(DEFAULT_ANCHOR_HOUR),
            ph_minute: 0.0,
            nutrient_mask: ALL_DAYS,
            ph_mask: ALL_DAYS,
            pause_minutes: f64::from(DEFAULT_PAUSE_MINUTES),
            active_motor_count: 1,
            name_max_bytes: MAX_NAME_BYTES,
        }
    }
}

impl ScheduleRequest {
    pub fn builder() -> ScheduleRequestBuilder {
        ScheduleRequestBuilder::default()
    }

    /// Water volume in liters, at least 1.
    pub fn water_l(&self) -> f64 {
        if self.water_l.is_finite() {
            self.water_l.max(1.0)
        } else {
            1.0
        }
    }

    /// Effective pause in 1..=180 minutes.
    pub fn pause_minutes(&self) -> u32 {
        clamp_pause_minutes(self.pause_minutes, DEFAULT_PAUSE_MINUTES)
    }

    /// Nutrient anchor as `(hour, minute)`, defaulting to 09:00.
    pub fn nutrient_anchor(&self) -> (u8, u8) {
        (
            clamp_hour(self.nutrient_hour, DEFAULT_ANCHOR_HOUR),
            clamp_minute(self.nutrient_minute, 0),
        )
    }

    /// pH anchor as `(hour, minute)`, defaulting to 09:00.
    pub fn ph_anchor(&self) -> (u8, u8) {
        (
            clamp_hour(self.ph_hour, DEFAULT_ANCHOR_HOUR),
            clamp_minute(self.ph_minute, 0),
        )
    }

    /// Highest usable physical motor id.
    pub fn max_motor(&self) -> u32 {
        self.active_motor_count.max(1) - 1
    }
}

/// Fluent builder for [`ScheduleRequest`]; `build()` is infallible.
#[derive(Debug, Clone, Default)]
pub struct ScheduleRequestBuilder {
    req: ScheduleRequest,
}

impl ScheduleRequestBuilder {
    pub fn program_name(mut self, name: impl Into<String>) -> Self {
        self.req.program_name = name.into();
        self
    }

    pub fn water_l(mut self, liters: f64) -> Self {
        self.req.water_l = liters;
        self
    }

    pub fn ph_regulation(mut self, enabled: bool) -> Self {
        self.req.ph_regulation_enabled = enabled;
        self
    }

    pub fn nutrient_time(mut self, hour: f64, minute: f64) -> Self {
        self.req.nutrient_hour = hour;
        self.req.nutrient_minute = minute;
        self
    }

    pub fn ph_time(mut self, hour: f64, minute: f64) -> Self {
        self.req.ph_hour = hour;
        self.req.ph_minute = minute;
        self
    }

    pub fn nutrient_mask(mut self, mask: u8) -> Self {
        self.req.nutrient_mask = mask & ALL_DAYS;
        self
    }

    pub fn ph_mask(mut self, mask: u8) -> Self {
        self.req.ph_mask = mask & ALL_DAYS;
        self
    }

    /// Derive both weekday masks from the phase's weekly frequencies.
    pub fn masks_from_phase(self, phase: &FeedingPhase) -> Self {
        self.nutrient_mask(weekdays_mask_for_frequency(f64::from(phase.feedings_per_week)))
            .ph_mask(weekdays_mask_for_frequency(f64::from(
                phase.ph_adjustments_per_week,
            )))
    }

    pub fn pause_minutes(mut self, minutes: f64) -> Self {
        self.req.pause_minutes = minutes;
        self
    }

    pub fn active_motor_count(mut self, count: u32) -> Self {
        self.req.active_motor_count = count;
        self
    }

    pub fn name_max_bytes(mut self, bytes: usize) -> Self {
        self.req.name_max_bytes = bytes;
        self
    }

    pub fn build(self) -> ScheduleRequest {
        self.req
    }
}
