#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Growth-schedule planner (device-agnostic).
//!
//! Turns one feeding phase of a growth program plus user options into the
//! dosing entries the device persists. Planning is total: bad numbers are
//! clamped or replaced by defaults, unusable channels are dropped, and motors
//! the device does not have are folded onto the last one.
//!
//! ## Pipeline
//!
//! - **Time**: clamping and minute arithmetic modulo a day (`time`)
//! - **Planner**: one request per channel with a preferred start (`planner`)
//! - **Resolver**: serialize starts at least one pause apart (`resolver`)
//! - **Remap**: logical → physical motor (`remap`)
//! - **Names**: byte-budgeted entry names (`names`)
//!
//! Around it: the program `catalog`, weekday masks (`weekdays`), the dose
//! `summary`, and the device `document` with its validation.

pub mod catalog;
pub mod conversions;
pub mod document;
pub mod error;
pub mod names;
pub mod planner;
pub mod remap;
pub mod request;
pub mod resolver;
pub mod summary;
pub mod time;
pub mod weekdays;

pub use catalog::{Catalog, FeedingPhase, GrowthProgram, NutrientDose, PhDose};
pub use document::{MAX_SCHEDULE_ENTRIES, ScheduleDocument, ScheduleEntry};
pub use error::{PlanError, Result};
pub use planner::{Channel, ChannelRequest};
pub use request::{ScheduleRequest, ScheduleRequestBuilder};
pub use resolver::ScheduledChannel;
pub use summary::{ChannelDose, PhaseSummary, summarize_phase};
pub use weekdays::{weekday_names, weekdays_mask_for_frequency};

use growplan_traits::NameResolver;

/// Result of one planning call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowthSchedule {
    /// Ordered by scheduled time, ties by declaration order.
    pub entries: Vec<ScheduleEntry>,
    /// Channels whose logical motor did not exist on the device.
    pub remapped: usize,
    /// Effective pause after clamping.
    pub pause_minutes: u32,
}

impl GrowthSchedule {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Wrap the entries into a device document.
    pub fn into_document(self, tz_offset_minutes: i32) -> ScheduleDocument {
        ScheduleDocument::new(tz_offset_minutes, self.entries)
    }
}

/// Volume actually written to the device: rounded, at least 1 ml.
#[inline]
fn entry_volume_ml(volume_ml: f64) -> u32 {
    time::round_half_up(volume_ml).clamp(1.0, f64::from(u32::MAX)) as u32
}

/// Plan, resolve, remap and name the entries for one feeding phase.
///
/// Never fails; an empty list with `remapped == 0` is a valid outcome.
pub fn generate_growth_schedule_entries<R>(
    request: &ScheduleRequest,
    phase: &FeedingPhase,
    labels: &R,
) -> GrowthSchedule
where
    R: NameResolver + ?Sized,
{
    let pause_minutes = request.pause_minutes();
    let planned = planner::plan_channels(request, phase);
    let scheduled = resolver::resolve_conflicts(planned, pause_minutes);

    let mut motors = remap::MotorRemapper::new(request.active_motor_count);
    let entries: Vec<ScheduleEntry> = scheduled
        .iter()
        .map(|s| {
            let at = s.time();
            let label = labels.resolve(s.request.name_key());
            ScheduleEntry {
                name: names::encode_entry_name(
                    &request.program_name,
                    &label,
                    request.name_max_bytes,
                ),
                motor_id: motors.map(s.request.motor_id),
                enabled: true,
                hour: at.hour,
                minute: at.minute,
                volume_ml: entry_volume_ml(s.request.volume_ml),
                reverse: false,
                weekdays_mask: s.request.weekdays_mask,
            }
        })
        .collect();

    let remapped = motors.remapped();
    if remapped > 0 {
        tracing::warn!(
            remapped,
            active_motors = request.active_motor_count,
            "channels remapped onto available motors"
        );
    }
    tracing::debug!(
        program = %request.program_name,
        phase = %phase.key,
        entries = entries.len(),
        pause_minutes,
        "growth schedule generated"
    );

    GrowthSchedule {
        entries,
        remapped,
        pause_minutes,
    }
}
