//! Per-channel dose summary for a phase (per dose and per week).

use crate::catalog::FeedingPhase;
use crate::planner::{Channel, channel_volume_ml};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelDose {
    pub channel: Channel,
    pub per_dose_ml: f64,
    pub weekly_ml: f64,
    /// Doses per week.
    pub frequency: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSummary {
    pub feedings_per_week: u8,
    /// 0 when pH regulation is off.
    pub ph_adjustments_per_week: u8,
    pub channels: Vec<ChannelDose>,
}

/// Dose table for `phase` at `water_l` liters (floored at 1).
///
/// pH rows come first (pH- before pH+) when regulation is on.
pub fn summarize_phase(phase: &FeedingPhase, water_l: f64, ph_regulation: bool) -> PhaseSummary {
    let water_l = if water_l.is_finite() { water_l.max(1.0) } else { 1.0 };
    let feedings = phase.feedings_per_week.max(1);
    let adjustments = if ph_regulation {
        phase.ph_adjustments_per_week.max(1)
    } else {
        0
    };

    let mut rows: Vec<(Channel, u8)> = Vec::with_capacity(5);
    if ph_regulation {
        rows.extend([
            (Channel::PhMinus, adjustments),
            (Channel::PhPlus, adjustments),
        ]);
    }
    rows.extend([
        (Channel::NutrientA, feedings),
        (Channel::NutrientB, feedings),
        (Channel::NutrientC, feedings),
    ]);

    let channels = rows
        .into_iter()
        .map(|(channel, frequency)| {
            let per_dose_ml = channel_volume_ml(channel, phase, water_l);
            ChannelDose {
                channel,
                per_dose_ml,
                weekly_ml: per_dose_ml * f64::from(frequency),
                frequency,
            }
        })
        .collect();

    PhaseSummary {
        feedings_per_week: feedings,
        ph_adjustments_per_week: adjustments,
        channels,
    }
}
