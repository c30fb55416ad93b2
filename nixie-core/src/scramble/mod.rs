//! Hourly digit scramble
//!
//! Once an hour the tubes flicker through a pseudo-random sequence before
//! settling back on the time. Each cathode gets lit now and then, which also
//! keeps rarely used digits from poisoning.
//!
//! The animation is a Fisher-Yates shuffle spread out over time: one swap
//! per step interval instead of all swaps at once.

pub mod engine;
pub mod shuffle;

pub use engine::{Scrambler, SCRAMBLE_INTERVAL_MS, SCRAMBLE_STEP_MS};
pub use shuffle::{ShuffleBuffer, SHUFFLE_LEN};
