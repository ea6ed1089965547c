//! Time-of-day helpers: clamping, minutes-since-midnight, day wrap.
//!
//! All inputs are `f64` so that "not a number" can reach these functions and be
//! replaced by a fallback instead of being rejected upstream.

use std::fmt;

/// Minutes in one day.
pub const DAY_MINUTES: u32 = 24 * 60;

/// Pause used when the requested one is not a number.
pub const DEFAULT_PAUSE_MINUTES: u32 = 10;

/// Round to nearest with halves going up (`2.5 -> 3`, `-2.5 -> -2`).
#[inline]
pub fn round_half_up(x: f64) -> f64 {
    // `(x + 0.5).floor()` rounds the sum itself near 0.5 and above 2^52
    let f = x.floor();
    if x - f >= 0.5 { f + 1.0 } else { f }
}

/// Hour in 0..=23; non-finite input yields `fallback`.
pub fn clamp_hour(v: f64, fallback: u8) -> u8 {
    if !v.is_finite() {
        return fallback;
    }
    round_half_up(v).clamp(0.0, 23.0) as u8
}

/// Minute in 0..=59; non-finite input yields `fallback`.
pub fn clamp_minute(v: f64, fallback: u8) -> u8 {
    if !v.is_finite() {
        return fallback;
    }
    round_half_up(v).clamp(0.0, 59.0) as u8
}

/// Pause in 1..=180 minutes; non-finite input yields `fallback`.
pub fn clamp_pause_minutes(v: f64, fallback: u32) -> u32 {
    if !v.is_finite() {
        return fallback;
    }
    round_half_up(v).clamp(1.0, 180.0) as u32
}

/// `hour * 60 + minute` after clamping both (fallback 0).
pub fn minutes_from_time(hour: f64, minute: f64) -> u32 {
    u32::from(clamp_hour(hour, 0)) * 60 + u32::from(clamp_minute(minute, 0))
}

/// Wrap any minute count into `[0, 1440)`. Negative input wraps backwards;
/// non-finite input maps to midnight.
pub fn normalize_minutes(x: f64) -> u32 {
    if !x.is_finite() {
        return 0;
    }
    round_half_up(x).rem_euclid(f64::from(DAY_MINUTES)) as u32
}

/// A wall-clock time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    pub hour: u8,
    pub minute: u8,
    /// Minutes since midnight, `hour * 60 + minute`.
    pub total_minutes: u32,
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

pub fn time_from_minutes(total: f64) -> TimeOfDay {
    let normalized = normalize_minutes(total);
    TimeOfDay {
        hour: (normalized / 60) as u8,
        minute: (normalized % 60) as u8,
        total_minutes: normalized,
    }
}

/// Move a time of day forward by `delta` minutes, wrapping at midnight.
///
/// Negative and non-finite deltas count as zero: a derived channel is never
/// placed before its anchor.
pub fn shift_time_by_minutes(hour: f64, minute: f64, delta: f64) -> TimeOfDay {
    let delta = if delta.is_finite() {
        round_half_up(delta).max(0.0)
    } else {
        0.0
    };
    time_from_minutes(f64::from(minutes_from_time(hour, minute)) + delta)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(9.0, 9)]
    #[case(-3.0, 0)]
    #[case(30.0, 23)]
    #[case(12.5, 13)]
    #[case(0.499_999_999_999_999_94, 0)]
    #[case(f64::NAN, 7)]
    #[case(f64::INFINITY, 7)]
    fn clamp_hour_cases(#[case] v: f64, #[case] expected: u8) {
        assert_eq!(clamp_hour(v, 7), expected);
    }

    #[rstest]
    #[case(2.5, 3.0)]
    #[case(-2.5, -2.0)]
    #[case(0.499_999_999_999_999_94, 0.0)]
    #[case(4_503_599_627_370_497.0, 4_503_599_627_370_497.0)]
    #[case(-0.2, 0.0)]
    fn round_half_up_is_exact(#[case] x: f64, #[case] expected: f64) {
        assert_eq!(round_half_up(x), expected);
    }

    #[test]
    fn clamp_minute_and_pause() {
        assert_eq!(clamp_minute(61.0, 0), 59);
        assert_eq!(clamp_minute(f64::NAN, 15), 15);
        assert_eq!(clamp_pause_minutes(0.0, 10), 1);
        assert_eq!(clamp_pause_minutes(500.0, 10), 180);
        assert_eq!(clamp_pause_minutes(f64::NEG_INFINITY, 10), 10);
        assert_eq!(clamp_pause_minutes(14.6, 10), 15);
    }

    #[test]
    fn normalize_wraps_both_directions() {
        assert_eq!(normalize_minutes(0.0), 0);
        assert_eq!(normalize_minutes(1440.0), 0);
        assert_eq!(normalize_minutes(1450.0), 10);
        assert_eq!(normalize_minutes(-10.0), 1430);
        assert_eq!(normalize_minutes(-1440.0 * 3.0 - 1.0), 1439);
        assert_eq!(normalize_minutes(f64::NAN), 0);
    }

    #[test]
    fn time_from_minutes_splits() {
        let t = time_from_minutes(1445.0);
        assert_eq!((t.hour, t.minute, t.total_minutes), (0, 5, 5));
        assert_eq!(t.to_string(), "00:05");
        assert_eq!(time_from_minutes(545.0).to_string(), "09:05");
    }

    #[test]
    fn shift_wraps_past_midnight_and_ignores_negative_delta() {
        assert_eq!(shift_time_by_minutes(23.0, 50.0, 20.0).to_string(), "00:10");
        assert_eq!(shift_time_by_minutes(9.0, 0.0, -30.0).to_string(), "09:00");
        assert_eq!(shift_time_by_minutes(9.0, 0.0, f64::NAN).to_string(), "09:00");
        // hour/minute fall back to 0 inside minutes_from_time
        assert_eq!(shift_time_by_minutes(f64::NAN, 5.0, 10.0).to_string(), "00:15");
    }
}
