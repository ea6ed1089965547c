//! Device schedule wire format.
//!
//! Mirrors what the dosing device persists and serves: a list of at most
//! eight entries plus the device timezone offset, camelCase JSON.

use crate::error::PlanError;
use crate::names::MAX_NAME_BYTES;
use crate::weekdays::ALL_DAYS;
use serde::{Deserialize, Serialize};

/// Schedule slots on the device.
pub const MAX_SCHEDULE_ENTRIES: usize = 8;
pub const TZ_OFFSET_MIN: i32 = growplan_config::TZ_OFFSET_MIN;
pub const TZ_OFFSET_MAX: i32 = growplan_config::TZ_OFFSET_MAX;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntry {
    pub name: String,
    pub motor_id: u32,
    pub enabled: bool,
    pub hour: u8,
    pub minute: u8,
    pub volume_ml: u32,
    pub reverse: bool,
    pub weekdays_mask: u8,
}

impl ScheduleEntry {
    pub fn minutes(&self) -> u32 {
        u32::from(self.hour) * 60 + u32::from(self.minute)
    }

    fn check(&self) -> Result<(), String> {
        if self.hour > 23 {
            return Err(format!("hour {} out of range", self.hour));
        }
        if self.minute > 59 {
            return Err(format!("minute {} out of range", self.minute));
        }
        if self.weekdays_mask > ALL_DAYS {
            return Err(format!("weekdaysMask {:#x} has more than 7 bits", self.weekdays_mask));
        }
        if self.volume_ml == 0 {
            return Err("volumeMl must be >= 1".to_string());
        }
        if self.name.len() > MAX_NAME_BYTES {
            return Err(format!(
                "name is {} bytes, limit is {MAX_NAME_BYTES}",
                self.name.len()
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleDocument {
    #[serde(default)]
    pub tz_offset_minutes: i32,
    #[serde(default)]
    pub entries: Vec<ScheduleEntry>,
}

impl ScheduleDocument {
    pub fn new(tz_offset_minutes: i32, entries: Vec<ScheduleEntry>) -> Self {
        Self {
            tz_offset_minutes,
            entries,
        }
    }

    /// Reject anything the device would refuse or silently mangle.
    pub fn validate(&self) -> Result<(), PlanError> {
        if !(TZ_OFFSET_MIN..=TZ_OFFSET_MAX).contains(&self.tz_offset_minutes) {
            return Err(PlanError::TzOffsetOutOfRange(self.tz_offset_minutes));
        }
        if self.entries.len() > MAX_SCHEDULE_ENTRIES {
            return Err(PlanError::TooManyEntries {
                count: self.entries.len(),
                max: MAX_SCHEDULE_ENTRIES,
            });
        }
        for (index, e) in self.entries.iter().enumerate() {
            e.check()
                .map_err(|reason| PlanError::InvalidEntry { index, reason })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry() -> ScheduleEntry {
        ScheduleEntry {
            name: "Mix Pump 3: Nutrient A".into(),
            motor_id: 2,
            enabled: true,
            hour: 9,
            minute: 0,
            volume_ml: 15,
            reverse: false,
            weekdays_mask: 0x15,
        }
    }

    #[test]
    fn wire_shape_is_camel_case() {
        let json = serde_json::to_value(entry()).unwrap();
        assert_eq!(json["motorId"], 2);
        assert_eq!(json["volumeMl"], 15);
        assert_eq!(json["weekdaysMask"], 0x15);
        let doc = ScheduleDocument::new(180, vec![entry()]);
        let json = serde_json::to_string(&doc).unwrap();
        assert!(json.starts_with("{\"tzOffsetMinutes\":180,\"entries\":["));
    }

    #[test]
    fn missing_fields_default() {
        let doc: ScheduleDocument = serde_json::from_str("{}").unwrap();
        assert_eq!(doc, ScheduleDocument::default());
    }

    #[test]
    fn validation_limits() {
        assert!(ScheduleDocument::new(0, vec![entry(); 8]).validate().is_ok());
        assert_eq!(
            ScheduleDocument::new(0, vec![entry(); 9]).validate(),
            Err(PlanError::TooManyEntries { count: 9, max: 8 })
        );
        assert_eq!(
            ScheduleDocument::new(-721, vec![]).validate(),
            Err(PlanError::TzOffsetOutOfRange(-721))
        );
        let mut bad = entry();
        bad.volume_ml = 0;
        assert!(matches!(
            ScheduleDocument::new(0, vec![entry(), bad]).validate(),
            Err(PlanError::InvalidEntry { index: 1, .. })
        ));
        let mut long = entry();
        long.name = "x".repeat(33);
        assert!(ScheduleDocument::new(0, vec![long]).validate().is_err());
    }
}
