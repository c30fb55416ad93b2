//! Wireless time feed trait

/// Source of externally written time values
///
/// Implemented by whatever carries the time characteristic (a BLE bridge,
/// a test harness). Updates are edge triggered: `has_update` reports
/// `true` exactly once per write, and the caller reads `hour`/`minute` in
/// the same step.
pub trait TimeFeed {
    /// Check for (and consume) a pending write
    fn has_update(&mut self) -> bool;

    /// Hour of the most recent write
    fn hour(&self) -> u8;

    /// Minute of the most recent write
    fn minute(&self) -> u8;

    /// Consume a pending write, returning the raw `(hour, minute)` pair
    ///
    /// Values are returned as written; range checking is up to the caller.
    fn take_update(&mut self) -> Option<(u8, u8)> {
        if self.has_update() {
            Some((self.hour(), self.minute()))
        } else {
            None
        }
    }
}

impl<T: TimeFeed + ?Sized> TimeFeed for &mut T {
    fn has_update(&mut self) -> bool {
        (**self).has_update()
    }

    fn hour(&self) -> u8 {
        (**self).hour()
    }

    fn minute(&self) -> u8 {
        (**self).minute()
    }
}

/// Feed that never reports an update (clock without a radio)
#[derive(Debug, Clone, Copy, Default)]
pub struct NullFeed;

impl TimeFeed for NullFeed {
    fn has_update(&mut self) -> bool {
        false
    }

    fn hour(&self) -> u8 {
        0
    }

    fn minute(&self) -> u8 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct OneShot {
        pending: bool,
        hour: u8,
        minute: u8,
    }

    impl TimeFeed for OneShot {
        fn has_update(&mut self) -> bool {
            core::mem::replace(&mut self.pending, false)
        }

        fn hour(&self) -> u8 {
            self.hour
        }

        fn minute(&self) -> u8 {
            self.minute
        }
    }

    #[test]
    fn test_take_update_consumes() {
        let mut feed = OneShot {
            pending: true,
            hour: 7,
            minute: 45,
        };

        assert_eq!(feed.take_update(), Some((7, 45)));
        assert_eq!(feed.take_update(), None);
    }

    #[test]
    fn test_borrowed_feed() {
        let mut feed = OneShot {
            pending: true,
            hour: 1,
            minute: 2,
        };

        fn drain<F: TimeFeed>(mut feed: F) -> Option<(u8, u8)> {
            feed.take_update()
        }

        assert_eq!(drain(&mut feed), Some((1, 2)));
        assert!(!feed.has_update());
    }

    #[test]
    fn test_null_feed() {
        let mut feed = NullFeed;
        assert_eq!(feed.take_update(), None);
    }
}
