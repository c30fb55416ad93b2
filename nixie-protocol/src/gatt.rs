//! GATT layout of the time service hosted by the bridge
//!
//! One read/write characteristic holds the time as two bytes:
//! `[hour, minute]`. Centrals write it to set the clock.

use crate::frame::FrameError;

/// Time service UUID
pub const TIME_SERVICE_UUID: &str = "19B10000-E8F2-537E-4F6C-D104768A1214";

/// Time characteristic UUID
pub const TIME_CHARACTERISTIC_UUID: &str = "19B10001-E8F2-537E-4F6C-D104768A1215";

/// Size of the characteristic value
pub const TIME_VALUE_LEN: usize = 2;

/// Decoded time characteristic value (always in range)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeValue {
    pub hour: u8,
    pub minute: u8,
}

impl TimeValue {
    pub fn new(hour: u8, minute: u8) -> Result<Self, FrameError> {
        if hour < 24 && minute < 60 {
            Ok(Self { hour, minute })
        } else {
            Err(FrameError::InvalidTime)
        }
    }

    /// Parse the raw characteristic bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FrameError> {
        match bytes {
            [hour, minute] => Self::new(*hour, *minute),
            _ => Err(FrameError::InvalidFrame),
        }
    }

    pub fn to_bytes(self) -> [u8; TIME_VALUE_LEN] {
        [self.hour, self.minute]
    }
}
