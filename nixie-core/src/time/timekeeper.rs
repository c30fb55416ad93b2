//! Time keeper
//!
//! Counts whole minutes from the caller's millisecond clock and arbitrates
//! against writes arriving on the time feed. A feed write always wins over
//! the local tick of the same step and becomes the new minute baseline.

use super::clock_time::ClockTime;
use crate::config::TimekeepingConfig;
use crate::traits::TimeFeed;

/// Default length of one clock minute in milliseconds
pub const MINUTE_MS: u32 = 60_000;

/// What a call to [`Timekeeper::step`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickOutcome {
    /// Nothing changed
    Idle,
    /// One minute elapsed locally
    Advanced,
    /// Time was overwritten from the feed
    Synced,
    /// Feed delivered an out-of-range time; it was consumed and dropped
    ///
    /// Takes priority over `Advanced`: the local minute may still have
    /// moved in the same step, check [`Timekeeper::time`].
    Rejected,
}

/// Wall-clock time source
///
/// Only one minute is advanced per step. If the caller stalls for longer
/// than a minute the clock falls behind by the stall; there is no catch-up.
#[derive(Debug)]
pub struct Timekeeper<F> {
    feed: F,
    time: ClockTime,
    last_update_ms: u32,
    minute_ms: u32,
}

impl<F: TimeFeed> Timekeeper<F> {
    /// Create a time keeper starting at midnight
    pub fn new(feed: F) -> Self {
        Self::with_config(feed, &TimekeepingConfig::default())
    }

    /// Create a time keeper with a custom minute length
    pub fn with_config(feed: F, config: &TimekeepingConfig) -> Self {
        Self {
            feed,
            time: ClockTime::MIDNIGHT,
            last_update_ms: 0,
            minute_ms: config.minute_ms,
        }
    }

    /// Update the clock
    ///
    /// # Arguments
    /// - `now_ms`: monotonic milliseconds since boot
    /// - `connected`: whether the feed's link is up; a disconnected feed is
    ///   not polled, so pending writes stay queued
    pub fn step(&mut self, now_ms: u32, connected: bool) -> TickOutcome {
        let mut outcome = TickOutcome::Idle;

        if now_ms.wrapping_sub(self.last_update_ms) >= self.minute_ms {
            self.time.add_minute();
            self.last_update_ms = now_ms;
            outcome = TickOutcome::Advanced;
        }

        if connected {
            if let Some((hour, minute)) = self.feed.take_update() {
                match ClockTime::new(hour, minute) {
                    Some(time) => {
                        self.time = time;
                        self.last_update_ms = now_ms;
                        outcome = TickOutcome::Synced;
                    }
                    None => outcome = TickOutcome::Rejected,
                }
            }
        }

        outcome
    }

    /// Current time
    pub fn time(&self) -> ClockTime {
        self.time
    }

    pub fn hour(&self) -> u8 {
        self.time.hour()
    }

    pub fn minute(&self) -> u8 {
        self.time.minute()
    }

    /// Force the time (does not reset the minute baseline)
    pub fn set_time(&mut self, time: ClockTime) {
        self.time = time;
    }

    /// Get access to the underlying feed
    pub fn feed(&self) -> &F {
        &self.feed
    }
}
