//! Time feed backed by the link task

use nixie_core::traits::TimeFeed;
use nixie_protocol::TimeValue;

use crate::channels::TIME_UPDATE;

/// [`TimeFeed`] over the [`TIME_UPDATE`] signal
///
/// Each write signalled by the link task is reported once. Only the most
/// recent write survives if several arrive between polls.
pub struct SignalTimeFeed {
    last: TimeValue,
}

impl SignalTimeFeed {
    pub const fn new() -> Self {
        Self {
            last: TimeValue { hour: 0, minute: 0 },
        }
    }
}

impl TimeFeed for SignalTimeFeed {
    fn has_update(&mut self) -> bool {
        match TIME_UPDATE.try_take() {
            Some(value) => {
                self.last = value;
                true
            }
            None => false,
        }
    }

    fn hour(&self) -> u8 {
        self.last.hour
    }

    fn minute(&self) -> u8 {
        self.last.minute
    }
}
