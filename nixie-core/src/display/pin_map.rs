//! Digit to cathode pin wiring
//!
//! Each tube owns ten consecutive driver outputs. The board routes them as:
//!
//! ```text
//! pin:   0 1 2 3 4 5 6 7 8 9
//! digit: 6 7 8 9 0 1 2 3 4 5
//! ```

/// Driver outputs per tube
pub const PINS_PER_TUBE: usize = 10;

/// Map a digit (0-9) to its pin within the tube's group
///
/// Digits above 9 are outside the wiring table; the result is then
/// meaningless (checked in debug builds only).
pub const fn digit_to_pin(digit: u8) -> u8 {
    debug_assert!(digit < 10);
    match digit {
        0 => 4,
        6..=u8::MAX => digit - 6,
        _ => digit + 4,
    }
}

/// Inverse of [`digit_to_pin`]
pub const fn pin_to_digit(pin: u8) -> Option<u8> {
    match pin {
        0..=3 => Some(pin + 6),
        4 => Some(0),
        5..=9 => Some(pin - 4),
        _ => None,
    }
}
