//! Nixie display driver
//!
//! Tube `i` owns global pins `10*i ..= 10*i + 9`. Global pin `p` lives in
//! bank word `p / 8`, bit `p % 8`. Exactly one cathode per tube is lit.

use heapless::Vec;

use super::pin_map::{digit_to_pin, pin_to_digit, PINS_PER_TUBE};
use crate::traits::{RegisterBank, BANK_BITS};

/// Longest register chain supported
pub const MAX_BANKS: usize = 16;

/// One word per register in the chain
pub type BankWords = Vec<u8, MAX_BANKS>;

/// Pack one digit per tube into `bank_count` words
///
/// Digits must be 0-9. Bits that fall outside the chain are dropped.
pub fn pack_digits(digits: &[u8], bank_count: usize) -> BankWords {
    let mut words = BankWords::new();
    // Cannot fail: length is clamped to capacity
    let _ = words.resize(bank_count.min(MAX_BANKS), 0);

    for (tube, &digit) in digits.iter().enumerate() {
        let pin = tube * PINS_PER_TUBE + digit_to_pin(digit) as usize;
        if let Some(word) = words.get_mut(pin / BANK_BITS) {
            *word |= 1 << (pin % BANK_BITS);
        }
    }

    words
}

/// Recover the digit shown on each tube
///
/// A tube with no lit cathode, or more than one, decodes as `None`.
pub fn unpack_digits<const N: usize>(words: &[u8]) -> [Option<u8>; N] {
    let mut digits = [None; N];

    for (tube, slot) in digits.iter_mut().enumerate() {
        let mut lit = None;
        let mut count = 0;

        for pin in 0..PINS_PER_TUBE {
            let global = tube * PINS_PER_TUBE + pin;
            let set = words
                .get(global / BANK_BITS)
                .is_some_and(|word| word & (1 << (global % BANK_BITS)) != 0);
            if set {
                count += 1;
                lit = Some(pin as u8);
            }
        }

        if count == 1 {
            *slot = lit.and_then(pin_to_digit);
        }
    }

    digits
}

/// Display of `N` tubes on a register bank
pub struct NixieDriver<B, const N: usize> {
    bank: B,
}

impl<B: RegisterBank, const N: usize> NixieDriver<B, N> {
    /// Number of registers needed for `N` tubes
    pub const REQUIRED_BANKS: usize = (N * PINS_PER_TUBE).div_ceil(BANK_BITS);

    pub fn new(bank: B) -> Self {
        Self { bank }
    }

    /// Initialize the register bank and turn its outputs on
    pub fn begin(&mut self) -> Result<(), B::Error> {
        self.bank.begin()?;
        self.bank.unblank()?;
        self.bank.enable_outputs()
    }

    /// Show one digit per tube, left-most tube first
    ///
    /// Digits must be 0-9; anything else lights an unspecified cathode.
    pub fn set_digits(&mut self, digits: &[u8; N]) -> Result<(), B::Error> {
        let words = pack_digits(digits, self.bank.bank_count());
        self.bank.write(&words)
    }

    /// Turn every cathode off
    pub fn blank(&mut self) -> Result<(), B::Error> {
        let words = pack_digits(&[], self.bank.bank_count());
        self.bank.write(&words)
    }

    /// Get access to the underlying register bank
    pub fn bank(&self) -> &B {
        &self.bank
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Begin,
        Unblank,
        EnableOutputs,
        Write,
    }

    /// Mock bank that records calls and the last image written
    struct MockBank {
        banks: usize,
        calls: Vec<Call, 8>,
        last: BankWords,
    }

    impl MockBank {
        fn new(banks: usize) -> Self {
            Self {
                banks,
                calls: Vec::new(),
                last: BankWords::new(),
            }
        }
    }

    impl RegisterBank for MockBank {
        type Error = ();

        fn begin(&mut self) -> Result<(), ()> {
            self.calls.push(Call::Begin).map_err(|_| ())
        }

        fn unblank(&mut self) -> Result<(), ()> {
            self.calls.push(Call::Unblank).map_err(|_| ())
        }

        fn enable_outputs(&mut self) -> Result<(), ()> {
            self.calls.push(Call::EnableOutputs).map_err(|_| ())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), ()> {
            self.calls.push(Call::Write).map_err(|_| ())?;
            self.last.clear();
            self.last.extend_from_slice(words).map_err(|_| ())
        }

        fn bank_count(&self) -> usize {
            self.banks
        }
    }

    /// Mock bank whose bus always fails
    struct BrokenBank;

    impl RegisterBank for BrokenBank {
        type Error = &'static str;

        fn begin(&mut self) -> Result<(), Self::Error> {
            Err("no ack")
        }

        fn unblank(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn enable_outputs(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, _words: &[u8]) -> Result<(), Self::Error> {
            Err("bus fault")
        }

        fn bank_count(&self) -> usize {
            5
        }
    }

    #[test]
    fn test_required_banks() {
        assert_eq!(NixieDriver::<MockBank, 4>::REQUIRED_BANKS, 5);
        assert_eq!(NixieDriver::<MockBank, 6>::REQUIRED_BANKS, 8);
    }

    #[test]
    fn test_begin_sequence() {
        let mut driver: NixieDriver<MockBank, 4> = NixieDriver::new(MockBank::new(5));
        driver.begin().unwrap();
        assert_eq!(
            driver.bank().calls.as_slice(),
            &[Call::Begin, Call::Unblank, Call::EnableOutputs]
        );
    }

    #[test]
    fn test_begin_stops_on_error() {
        let mut driver: NixieDriver<BrokenBank, 4> = NixieDriver::new(BrokenBank);
        assert_eq!(driver.begin(), Err("no ack"));
        assert_eq!(driver.set_digits(&[1, 2, 3, 4]), Err("bus fault"));
    }

    #[test]
    fn test_all_zeros() {
        // Digit 0 is pin 4 in every group: global pins 4, 14, 24, 34
        let words = pack_digits(&[0, 0, 0, 0], 5);
        assert_eq!(words.as_slice(), &[0x10, 0x40, 0x00, 0x01, 0x04]);
    }

    #[test]
    fn test_set_digits_writes_image() {
        let mut driver: NixieDriver<MockBank, 4> = NixieDriver::new(MockBank::new(5));
        driver.set_digits(&[1, 2, 3, 4]).unwrap();

        // Global pins 5, 16, 27, 38
        assert_eq!(driver.bank().last.as_slice(), &[0x20, 0x00, 0x01, 0x08, 0x40]);
        assert_eq!(
            unpack_digits::<4>(&driver.bank().last),
            [Some(1), Some(2), Some(3), Some(4)]
        );
    }

    #[test]
    fn test_blank() {
        let mut driver: NixieDriver<MockBank, 4> = NixieDriver::new(MockBank::new(5));
        driver.blank().unwrap();
        assert_eq!(driver.bank().last.as_slice(), &[0; 5]);
        assert_eq!(unpack_digits::<4>(&driver.bank().last), [None; 4]);
    }

    #[test]
    fn test_short_chain_drops_bits() {
        // Only two registers: pins past 15 are not wired
        let words = pack_digits(&[9, 9, 9, 9], 2);
        assert_eq!(words.len(), 2);
        assert_eq!(unpack_digits::<3>(&words), [Some(9), Some(9), None]);
    }

    #[test]
    fn test_unpack_rejects_two_cathodes() {
        let mut words = pack_digits(&[5, 5, 5, 5], 5);
        words[0] |= 0x01;
        assert_eq!(unpack_digits::<4>(&words)[0], None);
        assert_eq!(unpack_digits::<4>(&words)[1], Some(5));
    }

    proptest! {
        #[test]
        fn one_cathode_per_tube(digits in prop::array::uniform6(0u8..10)) {
            let words = pack_digits(&digits, 8);

            let lit: u32 = words.iter().map(|w| w.count_ones()).sum();
            prop_assert_eq!(lit, 6);

            let decoded = unpack_digits::<6>(&words);
            for (tube, digit) in digits.iter().enumerate() {
                prop_assert_eq!(decoded[tube], Some(*digit));
            }
        }
    }
}
