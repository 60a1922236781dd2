//! Wall-clock time value pushed to the clock hands.
//!
//! # Invariants
//! - `hour` is in `0..=23`, `minute` and `second` are in `0..=59`.
//! - Values are never converted (no timezone or 12-hour adjustments).

use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Out-of-range clock component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    HourOutOfRange(u32),
    MinuteOutOfRange(u32),
    SecondOutOfRange(u32),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfRange(value) => write!(f, "hour must be in 0..=23, got {value}"),
            Self::MinuteOutOfRange(value) => write!(f, "minute must be in 0..=59, got {value}"),
            Self::SecondOutOfRange(value) => write!(f, "second must be in 0..=59, got {value}"),
        }
    }
}

impl Error for TimeError {}

/// Hour/minute/second snapshot taken from one host tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWallClockTime")]
pub struct WallClockTime {
    hour: u8,
    minute: u8,
    second: u8,
}

#[derive(Deserialize)]
struct RawWallClockTime {
    hour: u32,
    minute: u32,
    second: u32,
}

impl TryFrom<RawWallClockTime> for WallClockTime {
    type Error = TimeError;

    fn try_from(raw: RawWallClockTime) -> Result<Self, Self::Error> {
        Self::new(raw.hour, raw.minute, raw.second)
    }
}

impl WallClockTime {
    /// Midnight, used as the zeroed value before the first tick.
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
    };

    /// Builds a validated time value.
    ///
    /// # Errors
    /// - Returns the first component that falls outside its clock range.
    pub fn new(hour: u32, minute: u32, second: u32) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(TimeError::MinuteOutOfRange(minute));
        }
        if second > 59 {
            return Err(TimeError::SecondOutOfRange(second));
        }
        Ok(Self {
            hour: hour as u8,
            minute: minute as u8,
            second: second as u8,
        })
    }

    /// Extracts the 24-hour components of any chrono time value.
    pub fn from_timelike(value: &impl Timelike) -> Self {
        Self {
            hour: value.hour() as u8,
            minute: value.minute() as u8,
            // chrono keeps leap seconds in the nanosecond field, so `second()` stays below 60.
            second: value.second() as u8,
        }
    }

    pub fn hour(&self) -> u32 {
        u32::from(self.hour)
    }

    pub fn minute(&self) -> u32 {
        u32::from(self.minute)
    }

    pub fn second(&self) -> u32 {
        u32::from(self.second)
    }

    /// Returns `[hour, minute, second]` as sent in the batched time message.
    pub fn components(&self) -> [i32; 3] {
        [
            i32::from(self.hour),
            i32::from(self.minute),
            i32::from(self.second),
        ]
    }
}

impl Default for WallClockTime {
    fn default() -> Self {
        Self::MIDNIGHT
    }
}

impl Display for WallClockTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hour, self.minute, self.second)
    }
}

#[cfg(test)]
mod tests {
    use super::{TimeError, WallClockTime};
    use chrono::NaiveTime;

    #[test]
    fn new_accepts_clock_bounds() {
        let time = WallClockTime::new(23, 59, 59).expect("upper bounds are valid");
        assert_eq!(time.components(), [23, 59, 59]);
        assert_eq!(WallClockTime::new(0, 0, 0).unwrap(), WallClockTime::MIDNIGHT);
    }

    #[test]
    fn new_rejects_out_of_range_components() {
        assert_eq!(
            WallClockTime::new(24, 0, 0),
            Err(TimeError::HourOutOfRange(24))
        );
        assert_eq!(
            WallClockTime::new(0, 60, 0),
            Err(TimeError::MinuteOutOfRange(60))
        );
        assert_eq!(
            WallClockTime::new(0, 0, 60),
            Err(TimeError::SecondOutOfRange(60))
        );
    }

    #[test]
    fn from_timelike_keeps_24_hour_components() {
        let naive = NaiveTime::from_hms_opt(22, 9, 5).expect("valid chrono time");
        let time = WallClockTime::from_timelike(&naive);
        assert_eq!((time.hour(), time.minute(), time.second()), (22, 9, 5));
    }

    #[test]
    fn display_is_zero_padded() {
        let time = WallClockTime::new(7, 3, 9).unwrap();
        assert_eq!(time.to_string(), "07:03:09");
    }
}
