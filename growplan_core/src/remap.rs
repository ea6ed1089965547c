//! Logical → physical motor mapping.
//!
//! Devices with fewer than five motors get the high channels folded onto the
//! last available motor. Only the number of remapped channels is reported;
//! two channels landing on the same motor keep their own start times.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotorRemapper {
    max_motor: u32,
    remapped: usize,
}

impl MotorRemapper {
    /// `active_motor_count` of 0 is treated as 1.
    pub fn new(active_motor_count: u32) -> Self {
        Self {
            max_motor: active_motor_count.max(1) - 1,
            remapped: 0,
        }
    }

    /// Clamp `logical` into the available range, counting any change.
    pub fn map(&mut self, logical: u32) -> u32 {
        let mapped = logical.min(self.max_motor);
        if mapped != logical {
            self.remapped += 1;
            tracing::debug!(logical, mapped, "motor remapped");
        }
        mapped
    }

    pub fn remapped(&self) -> usize {
        self.remapped
    }
}
