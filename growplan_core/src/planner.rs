//! Channel planner: one request per pump channel with a preferred start.
//!
//! Preferred starts are staggered by whole pauses inside each group (pH+ then
//! pH-, nutrient A then B then C), so in the common case the resolver has
//! nothing to move.

use crate::catalog::FeedingPhase;
use crate::request::ScheduleRequest;
use crate::time::shift_time_by_minutes;

/// The five dosing channels with their fixed logical motors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    PhPlus,
    PhMinus,
    NutrientA,
    NutrientB,
    NutrientC,
}

impl Channel {
    pub const ALL: [Channel; 5] = [
        Channel::PhPlus,
        Channel::PhMinus,
        Channel::NutrientA,
        Channel::NutrientB,
        Channel::NutrientC,
    ];

    /// Logical motor id; not configurable.
    pub const fn motor_id(self) -> u32 {
        match self {
            Channel::PhPlus => 0,
            Channel::PhMinus => 1,
            Channel::NutrientA => 2,
            Channel::NutrientB => 3,
            Channel::NutrientC => 4,
        }
    }

    /// Label key handed to the name resolver.
    pub const fn name_key(self) -> &'static str {
        match self {
            Channel::PhPlus => "growth_pump_ph_plus",
            Channel::PhMinus => "growth_pump_ph_minus",
            Channel::NutrientA => "growth_pump_nutrient_a",
            Channel::NutrientB => "growth_pump_nutrient_b",
            Channel::NutrientC => "growth_pump_nutrient_c",
        }
    }

    pub const fn is_ph(self) -> bool {
        matches!(self, Channel::PhPlus | Channel::PhMinus)
    }
}

/// A channel waiting to be placed on the timeline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelRequest {
    pub channel: Channel,
    pub motor_id: u32,
    pub volume_ml: f64,
    /// Preferred start, minutes since midnight in `[0, 1440)`.
    pub preferred_minutes: u32,
    pub weekdays_mask: u8,
    /// Declaration order among surviving channels; breaks ties on equal start.
    pub order: u8,
}

impl ChannelRequest {
    pub fn name_key(&self) -> &'static str {
        self.channel.name_key()
    }
}

/// Volume a phase asks of `channel` for the request's reservoir.
///
/// Nutrients are dosed per liter, pH correctors per 10 liters.
pub fn channel_volume_ml(channel: Channel, phase: &FeedingPhase, water_l: f64) -> f64 {
    let ph_scale = water_l / 10.0;
    match channel {
        Channel::PhPlus => phase.ph.plus * ph_scale,
        Channel::PhMinus => phase.ph.minus * ph_scale,
        Channel::NutrientA => phase.nutrients.a * water_l,
        Channel::NutrientB => phase.nutrients.b * water_l,
        Channel::NutrientC => phase.nutrients.c * water_l,
    }
}

/// Build the channel requests for one planning call, in declaration order.
///
/// Channels whose volume is not a positive finite number are dropped here and
/// never reach the resolver.
pub fn plan_channels(request: &ScheduleRequest, phase: &FeedingPhase) -> Vec<ChannelRequest> {
    let water_l = request.water_l();
    let pause = f64::from(request.pause_minutes());
    let (ph_h, ph_m) = request.ph_anchor();
    let (nu_h, nu_m) = request.nutrient_anchor();

    let mut candidates: Vec<(Channel, (u8, u8), f64, u8)> = Vec::with_capacity(5);
    if request.ph_regulation_enabled {
        candidates.push((Channel::PhPlus, (ph_h, ph_m), 0.0, request.ph_mask));
        candidates.push((Channel::PhMinus, (ph_h, ph_m), pause, request.ph_mask));
    }
    candidates.push((Channel::NutrientA, (nu_h, nu_m), 0.0, request.nutrient_mask));
    candidates.push((Channel::NutrientB, (nu_h, nu_m), pause, request.nutrient_mask));
    candidates.push((Channel::NutrientC, (nu_h, nu_m), pause * 2.0, request.nutrient_mask));

    let mut plan: Vec<ChannelRequest> = Vec::with_capacity(candidates.len());
    for (channel, (hour, minute), delta, mask) in candidates {
        let volume_ml = channel_volume_ml(channel, phase, water_l);
        if !volume_ml.is_finite() || volume_ml <= 0.0 {
            tracing::debug!(channel = channel.name_key(), volume_ml, "channel dropped");
            continue;
        }
        let at = shift_time_by_minutes(f64::from(hour), f64::from(minute), delta);
        plan.push(ChannelRequest {
            channel,
            motor_id: channel.motor_id(),
            volume_ml,
            preferred_minutes: at.total_minutes,
            weekdays_mask: mask,
            order: plan.len() as u8,
        });
    }
    plan
}
