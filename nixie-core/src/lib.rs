//! Board-agnostic core logic for the nixie clock firmware
//!
//! This crate contains all clock logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (register bank, time feed)
//! - Time keeping with wireless update arbitration
//! - Hourly digit scramble animation
//! - Digit to cathode pin mapping and bank packing
//! - Configuration type definitions
//!
//! Every `step` takes the current monotonic time in milliseconds from the
//! caller. Nothing in here reads a clock.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod display;
pub mod scramble;
pub mod time;
pub mod traits;

/// Number of tubes on the clock (HH:MM)
pub const TUBE_COUNT: usize = 4;
