//! Tube display
//!
//! Maps digits to cathode pins and packs them into register bank words.

pub mod driver;
pub mod pin_map;

pub use driver::{pack_digits, unpack_digits, BankWords, NixieDriver, MAX_BANKS};
pub use pin_map::{digit_to_pin, pin_to_digit, PINS_PER_TUBE};
