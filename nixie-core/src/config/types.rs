//! Configuration type definitions

use heapless::String;

use crate::scramble::{SCRAMBLE_INTERVAL_MS, SCRAMBLE_STEP_MS};
use crate::time::MINUTE_MS;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Maximum advertised name length
pub const MAX_NAME_LEN: usize = 16;

/// Default advertised name
pub const DEFAULT_NAME: &str = "Nixie-Clock";

/// Default bridge UART baud rate
pub const DEFAULT_BAUD: u32 = 115_200;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// An interval is zero or the step is not shorter than the interval
    InvalidInterval,
    /// Baud rate is zero
    InvalidBaud,
}

/// Local time keeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimekeepingConfig {
    /// Length of one clock minute (ms)
    pub minute_ms: u32,
}

impl Default for TimekeepingConfig {
    fn default() -> Self {
        Self {
            minute_ms: MINUTE_MS,
        }
    }
}

/// Digit scramble animation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ScrambleConfig {
    /// Run the animation at all
    pub enabled: bool,
    /// Time from the end of one scramble to the start of the next (ms)
    pub interval_ms: u32,
    /// Time per animation step (ms)
    pub step_ms: u32,
}

impl Default for ScrambleConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            interval_ms: SCRAMBLE_INTERVAL_MS,
            step_ms: SCRAMBLE_STEP_MS,
        }
    }
}

/// Link to the BLE bridge module
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// UART baud rate
    pub baud: u32,
    /// Local name the bridge advertises
    pub name: String<MAX_NAME_LEN>,
}

impl Default for LinkConfig {
    fn default() -> Self {
        let mut name = String::new();
        // Fits: DEFAULT_NAME is shorter than MAX_NAME_LEN
        let _ = name.push_str(DEFAULT_NAME);
        Self {
            baud: DEFAULT_BAUD,
            name,
        }
    }
}

/// Tube display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DisplayConfig {
    /// Time each digit is shown during the boot self-test (0 = skip)
    pub selftest_dwell_ms: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            selftest_dwell_ms: 1_000,
        }
    }
}

/// Complete clock configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ClockConfig {
    pub timekeeping: TimekeepingConfig,
    pub scramble: ScrambleConfig,
    pub link: LinkConfig,
    pub display: DisplayConfig,
}

impl ClockConfig {
    /// Check the configuration for values the clock cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timekeeping.minute_ms == 0 {
            return Err(ConfigError::InvalidInterval);
        }

        let scramble = &self.scramble;
        if scramble.enabled
            && (scramble.step_ms == 0 || scramble.step_ms >= scramble.interval_ms)
        {
            return Err(ConfigError::InvalidInterval);
        }

        if self.link.baud == 0 {
            return Err(ConfigError::InvalidBaud);
        }

        Ok(())
    }
}
