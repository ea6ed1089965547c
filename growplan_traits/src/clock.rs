use std::time::{Duration, SystemTime};

/// Wall-clock abstraction used for export timestamps.
///
/// - now(): current wall time
/// - secs_since_epoch(): helper, saturating at 0 for pre-epoch clocks
pub trait WallClock {
    fn now(&self) -> SystemTime;

    /// Whole seconds since the Unix epoch, 0 if the clock is before it.
    fn secs_since_epoch(&self) -> u64 {
        self.now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0)
    }
}

/// Real wall clock backed by `SystemTime::now()`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl WallClock for SystemClock {
    #[inline]
    fn now(&self) -> SystemTime {
        SystemTime::now()
    }
}

/// Clock frozen at a fixed instant, so exports are reproducible.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    at: SystemTime,
}

impl FixedClock {
    pub fn from_unix_secs(secs: u64) -> Self {
        Self {
            at: SystemTime::UNIX_EPOCH + Duration::from_secs(secs),
        }
    }
}

impl WallClock for FixedClock {
    fn now(&self) -> SystemTime {
        self.at
    }
}
