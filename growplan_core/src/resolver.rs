//! Conflict resolver: serialize channels so that starts are at least one
//! pause apart.
//!
//! Greedy forward push over channels sorted by `(preferred, order)`. Scheduled
//! minutes are not wrapped during the walk, so a collision chain that starts
//! close to midnight can run past 1440; the wrap happens when the entry is
//! rendered and the weekday mask is left as it was.

use crate::planner::ChannelRequest;
use crate::time::{DAY_MINUTES, TimeOfDay, time_from_minutes};

/// A channel with its final start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledChannel {
    pub request: ChannelRequest,
    /// Minutes since the midnight of the anchor day; may exceed 1439.
    pub scheduled_minutes: u32,
}

impl ScheduledChannel {
    /// Start pushed past midnight into the next day's clock.
    pub fn wrapped(&self) -> bool {
        self.scheduled_minutes >= DAY_MINUTES
    }

    /// Start as a wall-clock time (wrapped into the day).
    pub fn time(&self) -> TimeOfDay {
        time_from_minutes(f64::from(self.scheduled_minutes))
    }

    /// Minutes the resolver moved this channel away from its preferred start.
    pub fn delay_minutes(&self) -> u32 {
        self.scheduled_minutes - self.request.preferred_minutes
    }
}

pub fn resolve_conflicts(
    mut channels: Vec<ChannelRequest>,
    pause_minutes: u32,
) -> Vec<ScheduledChannel> {
    channels.sort_by_key(|c| (c.preferred_minutes, c.order));

    let mut last: Option<u32> = None;
    let mut out = Vec::with_capacity(channels.len());
    for request in channels {
        let scheduled = match last {
            Some(prev) => request.preferred_minutes.max(prev + pause_minutes),
            None => request.preferred_minutes,
        };
        last = Some(scheduled);

        let item = ScheduledChannel {
            request,
            scheduled_minutes: scheduled,
        };
        if item.delay_minutes() > 0 {
            tracing::debug!(
                channel = request.name_key(),
                preferred = request.preferred_minutes,
                scheduled,
                "channel pushed back"
            );
        }
        if item.wrapped() {
            tracing::warn!(
                channel = request.name_key(),
                scheduled,
                "channel pushed past midnight; weekday mask unchanged"
            );
        }
        out.push(item);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::Channel;

    fn req(channel: Channel, preferred: u32, order: u8) -> ChannelRequest {
        ChannelRequest {
            channel,
            motor_id: channel.motor_id(),
            volume_ml: 1.0,
            preferred_minutes: preferred,
            weekdays_mask: 0x7F,
            order,
        }
    }

    fn starts(v: &[ScheduledChannel]) -> Vec<u32> {
        v.iter().map(|s| s.scheduled_minutes).collect()
    }

    #[test]
    fn well_spaced_input_is_untouched() {
        let out = resolve_conflicts(
            vec![
                req(Channel::NutrientA, 540, 0),
                req(Channel::NutrientB, 550, 1),
                req(Channel::NutrientC, 560, 2),
            ],
            10,
        );
        assert_eq!(starts(&out), [540, 550, 560]);
        assert!(out.iter().all(|s| s.delay_minutes() == 0));
    }

    #[test]
    fn ties_break_by_declaration_order() {
        let out = resolve_conflicts(
            vec![
                req(Channel::NutrientA, 540, 2),
                req(Channel::PhPlus, 540, 0),
                req(Channel::PhMinus, 550, 1),
            ],
            10,
        );
        let channels: Vec<Channel> = out.iter().map(|s| s.request.channel).collect();
        assert_eq!(channels, [Channel::PhPlus, Channel::NutrientA, Channel::PhMinus]);
        assert_eq!(starts(&out), [540, 550, 560]);
    }

    #[test]
    fn later_items_are_pushed_from_the_previous_schedule() {
        let out = resolve_conflicts(
            vec![
                req(Channel::PhPlus, 100, 0),
                req(Channel::PhMinus, 101, 1),
                req(Channel::NutrientA, 102, 2),
                req(Channel::NutrientB, 200, 3),
            ],
            30,
        );
        assert_eq!(starts(&out), [100, 130, 160, 200]);
    }

    #[test]
    fn chain_near_midnight_runs_past_the_day() {
        let out = resolve_conflicts(
            vec![req(Channel::PhPlus, 1430, 0), req(Channel::PhMinus, 1435, 1)],
            10,
        );
        assert_eq!(starts(&out), [1430, 1440]);
        assert!(out[1].wrapped());
        assert_eq!(out[1].time().to_string(), "00:00");
    }

    #[test]
    fn empty_input() {
        assert!(resolve_conflicts(Vec::new(), 10).is_empty());
    }
}
