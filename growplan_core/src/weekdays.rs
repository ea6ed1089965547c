//! Weekly frequency → weekday bitmask.
//!
//! Bit 0 is Monday, bit 6 is Sunday. The presets spread doses across the week
//! rather than packing them on consecutive days.

/// Every day of the week.
pub const ALL_DAYS: u8 = 0x7F;

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

const PRESETS: [&[u8]; 6] = [
    &[2],                // Wed
    &[0, 3],             // Mon, Thu
    &[0, 2, 4],          // Mon, Wed, Fri
    &[0, 1, 3, 5],       // Mon, Tue, Thu, Sat
    &[0, 1, 2, 4, 6],    // Mon, Tue, Wed, Fri, Sun
    &[0, 1, 2, 3, 4, 5], // Mon-Sat
];

/// Mask for `times_per_week` doses; the count is rounded and clamped to 1..=7,
/// non-finite and zero count as 1.
pub fn weekdays_mask_for_frequency(times_per_week: f64) -> u8 {
    let count = if times_per_week.is_finite() && times_per_week != 0.0 {
        crate::time::round_half_up(times_per_week).clamp(1.0, 7.0) as usize
    } else {
        1
    };
    if count >= 7 {
        return ALL_DAYS;
    }
    PRESETS[count - 1]
        .iter()
        .fold(0u8, |mask, day| mask | (1 << day))
}

/// Short day names for the bits set in `mask`, e.g. `"Mon,Thu"`.
pub fn weekday_names(mask: u8) -> String {
    if mask & ALL_DAYS == ALL_DAYS {
        return "daily".to_string();
    }
    DAY_NAMES
        .iter()
        .enumerate()
        .filter(|(i, _)| mask & (1 << i) != 0)
        .map(|(_, name)| *name)
        .collect::<Vec<_>>()
        .join(",")
}
