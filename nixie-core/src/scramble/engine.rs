//! Scramble state machine
//!
//! States:
//! - `0`: idle, digits pass through untouched
//! - `1`: triggered, baseline captured, digits still untouched
//! - `2..=10`: one shuffle swap taken per step, digits replaced by
//!   `(baseline + symbol) % 10`
//!
//! After state 10 the counter wraps to 0 and the clock shows the time again.
//! Each call evaluates trigger, then advance, then render, in that order.

use rand::{Rng, RngCore};

use super::shuffle::{ShuffleBuffer, SHUFFLE_LEN};
use crate::config::ScrambleConfig;

/// Default time between scrambles (one hour)
pub const SCRAMBLE_INTERVAL_MS: u32 = 3_600_000;

/// Default time between animation steps
pub const SCRAMBLE_STEP_MS: u32 = 10_000;

const STATE_IDLE: u8 = 0;
const STATE_TRIGGERED: u8 = 1;
/// State counter runs modulo this value
const STATE_COUNT: u8 = SHUFFLE_LEN as u8 + 2;

/// Digit scramble animation for `N` tubes
pub struct Scrambler<R, const N: usize> {
    rng: R,
    config: ScrambleConfig,
    state: u8,
    /// Last trigger or step, in caller milliseconds
    last_scramble_ms: u32,
    /// Digits captured when the scramble was triggered
    initial: [u8; N],
    pool: ShuffleBuffer,
}

impl<R: RngCore, const N: usize> Scrambler<R, N> {
    /// Create an idle scrambler with default timing
    pub fn new(rng: R) -> Self {
        Self::with_config(rng, ScrambleConfig::default())
    }

    /// Create an idle scrambler
    pub fn with_config(rng: R, config: ScrambleConfig) -> Self {
        Self {
            rng,
            config,
            state: STATE_IDLE,
            last_scramble_ms: 0,
            initial: [0; N],
            pool: ShuffleBuffer::new(),
        }
    }

    /// Possibly replace `digits` with the current animation frame
    ///
    /// `digits` holds what the tubes would show without scrambling and must
    /// be in 0-9. The millisecond counter is compared with wrapping
    /// arithmetic; across the ~49 day wrap the intervals just restart.
    pub fn step(&mut self, now_ms: u32, digits: &mut [u8; N]) {
        if !self.config.enabled {
            return;
        }

        if now_ms.wrapping_sub(self.last_scramble_ms) >= self.config.interval_ms {
            self.state = STATE_TRIGGERED;
            self.last_scramble_ms = now_ms;
            self.initial = *digits;
        }

        // Everything before this index is still up for grabs
        let mut array_end = SHUFFLE_LEN + 1 - self.state as usize;

        if self.state >= STATE_TRIGGERED
            && now_ms.wrapping_sub(self.last_scramble_ms) >= self.config.step_ms
        {
            // The wrap from state 10 has nothing left to swap
            if array_end != 0 {
                let j = self.rng.gen_range(0..array_end);
                self.pool.swap(j, array_end - 1);
                // Render the symbol that was just fixed in place
                array_end -= 1;
            }

            self.state = (self.state + 1) % STATE_COUNT;
            self.last_scramble_ms = now_ms;
        }

        if self.state <= STATE_TRIGGERED {
            return;
        }

        let offset = self.pool.get(array_end);
        for (digit, base) in digits.iter_mut().zip(self.initial.iter()) {
            *digit = base.wrapping_add(offset) % 10;
        }
    }

    /// Current state counter (0-10)
    pub fn state(&self) -> u8 {
        self.state
    }

    /// Check if the tubes are currently frozen or animating
    pub fn is_scrambling(&self) -> bool {
        self.state != STATE_IDLE
    }

    /// Symbol pool (persists across scrambles)
    pub fn shuffle_buffer(&self) -> &ShuffleBuffer {
        &self.pool
    }

    /// Digits captured by the last trigger
    pub fn initial_condition(&self) -> &[u8; N] {
        &self.initial
    }

    pub fn config(&self) -> &ScrambleConfig {
        &self.config
    }
}
