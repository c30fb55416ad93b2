//! Hardware abstraction traits
//!
//! These traits define the interface between the clock logic
//! and the hardware (or radio) specific implementations.

pub mod register_bank;
pub mod time_feed;

pub use register_bank::{RegisterBank, BANK_BITS};
pub use time_feed::{NullFeed, TimeFeed};
