//! Hour/minute value type

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::TUBE_COUNT;

/// Hours per day
pub const HOURS_PER_DAY: u8 = 24;

/// Minutes per hour
pub const MINUTES_PER_HOUR: u8 = 60;

/// Time of day with minute resolution
///
/// Always in range: hour 0-23, minute 0-59.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    /// 00:00, the power-on time
    pub const MIDNIGHT: Self = Self { hour: 0, minute: 0 };

    /// Create a time, or `None` if either field is out of range
    pub const fn new(hour: u8, minute: u8) -> Option<Self> {
        if hour < HOURS_PER_DAY && minute < MINUTES_PER_HOUR {
            Some(Self { hour, minute })
        } else {
            None
        }
    }

    pub const fn hour(&self) -> u8 {
        self.hour
    }

    pub const fn minute(&self) -> u8 {
        self.minute
    }

    /// Advance by one minute, carrying into the hour and wrapping at midnight
    pub fn add_minute(&mut self) {
        let minute = self.minute + 1;
        self.hour = (self.hour + minute / MINUTES_PER_HOUR) % HOURS_PER_DAY;
        self.minute = minute % MINUTES_PER_HOUR;
    }

    /// Digits for the tubes, left-most first: `[H, H, M, M]`
    pub const fn to_digits(&self) -> [u8; TUBE_COUNT] {
        [
            self.hour / 10,
            self.hour % 10,
            self.minute / 10,
            self.minute % 10,
        ]
    }
}
