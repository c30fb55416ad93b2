//! Wall-clock time keeping
//!
//! The clock counts minutes locally from a caller-supplied millisecond
//! counter and accepts corrections from a [`TimeFeed`](crate::traits::TimeFeed).

pub mod clock_time;
pub mod timekeeper;

pub use clock_time::ClockTime;
pub use timekeeper::{TickOutcome, Timekeeper, MINUTE_MS};
