//! HV513 high-voltage shift register chain
//!
//! The HV513 is an 8-bit serial-in, parallel-out driver with 3-state
//! outputs. Registers are daisy-chained on one SPI bus and share three
//! control lines:
//!
//! - LE: latch enable, a high pulse moves shifted data to the latches
//! - BL: blank, active low, forces all outputs off
//! - HI-Z: high impedance, active high, floats all outputs
//!
//! The first byte shifted ends up in the register furthest from the MCU,
//! so words go out last bank first.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use nixie_core::display::MAX_BANKS;
use nixie_core::traits::RegisterBank;

/// HV513 chain error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hv513Error<S, P> {
    /// SPI transfer failed
    Spi(S),
    /// Control pin failed
    Pin(P),
}

/// Chain of HV513 registers
pub struct Hv513Bank<SPI, LE, BL, HIZ> {
    spi: SPI,
    latch: LE,
    blank: BL,
    hi_z: HIZ,
    banks: usize,
}

impl<SPI, LE, BL, HIZ, P> Hv513Bank<SPI, LE, BL, HIZ>
where
    SPI: SpiBus<u8>,
    LE: OutputPin<Error = P>,
    BL: OutputPin<Error = P>,
    HIZ: OutputPin<Error = P>,
{
    /// Create a chain of `banks` registers
    ///
    /// The length is clamped to [`MAX_BANKS`]. No pins are touched until
    /// [`begin`](RegisterBank::begin).
    pub fn new(spi: SPI, latch: LE, blank: BL, hi_z: HIZ, banks: usize) -> Self {
        Self {
            spi,
            latch,
            blank,
            hi_z,
            banks: banks.min(MAX_BANKS),
        }
    }

    fn shift(&mut self, words: &[u8]) -> Result<(), Hv513Error<SPI::Error, P>> {
        let mut image = [0u8; MAX_BANKS];
        let image = &mut image[..self.banks];

        // Missing words shift as zero, extra words are ignored
        for (bank, slot) in image.iter_mut().rev().enumerate() {
            *slot = words.get(bank).copied().unwrap_or(0);
        }

        self.spi.write(image).map_err(Hv513Error::Spi)?;
        self.spi.flush().map_err(Hv513Error::Spi)
    }

    fn pulse_latch(&mut self) -> Result<(), Hv513Error<SPI::Error, P>> {
        self.latch.set_high().map_err(Hv513Error::Pin)?;
        self.latch.set_low().map_err(Hv513Error::Pin)
    }
}

impl<SPI, LE, BL, HIZ, P> RegisterBank for Hv513Bank<SPI, LE, BL, HIZ>
where
    SPI: SpiBus<u8>,
    LE: OutputPin<Error = P>,
    BL: OutputPin<Error = P>,
    HIZ: OutputPin<Error = P>,
{
    type Error = Hv513Error<SPI::Error, P>;

    fn begin(&mut self) -> Result<(), Self::Error> {
        self.latch.set_low().map_err(Hv513Error::Pin)?;
        self.blank.set_low().map_err(Hv513Error::Pin)?;
        self.hi_z.set_high().map_err(Hv513Error::Pin)?;

        self.shift(&[])?;
        self.pulse_latch()
    }

    fn unblank(&mut self) -> Result<(), Self::Error> {
        self.blank.set_high().map_err(Hv513Error::Pin)
    }

    fn enable_outputs(&mut self) -> Result<(), Self::Error> {
        self.hi_z.set_low().map_err(Hv513Error::Pin)
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        self.shift(words)?;
        self.pulse_latch()
    }

    fn bank_count(&self) -> usize {
        self.banks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::convert::Infallible;
    use embedded_hal::digital::ErrorType as PinErrorType;
    use embedded_hal::spi::ErrorType as SpiErrorType;
    use nixie_core::display::NixieDriver;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Pin(&'static str, bool),
        Shift(Vec<u8>),
        Flush,
    }

    type Log = Rc<RefCell<Vec<Event>>>;

    struct MockPin {
        name: &'static str,
        log: Log,
    }

    impl PinErrorType for MockPin {
        type Error = Infallible;
    }

    impl OutputPin for MockPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Pin(self.name, false));
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Pin(self.name, true));
            Ok(())
        }
    }

    struct MockSpi {
        log: Log,
    }

    impl SpiErrorType for MockSpi {
        type Error = Infallible;
    }

    impl SpiBus<u8> for MockSpi {
        fn read(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Shift(words.to_vec()));
            Ok(())
        }

        fn transfer(&mut self, _read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
            self.write(write)
        }

        fn transfer_in_place(&mut self, _words: &mut [u8]) -> Result<(), Self::Error> {
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            self.log.borrow_mut().push(Event::Flush);
            Ok(())
        }
    }

    fn chain(banks: usize) -> (Hv513Bank<MockSpi, MockPin, MockPin, MockPin>, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let pin = |name| MockPin {
            name,
            log: log.clone(),
        };
        let bank = Hv513Bank::new(
            MockSpi { log: log.clone() },
            pin("le"),
            pin("bl"),
            pin("hiz"),
            banks,
        );
        (bank, log)
    }

    fn take(log: &Log) -> Vec<Event> {
        log.borrow_mut().drain(..).collect()
    }

    #[test]
    fn test_begin_sequence() {
        let (mut bank, log) = chain(5);
        bank.begin().unwrap();

        assert_eq!(
            take(&log),
            vec![
                Event::Pin("le", false),
                Event::Pin("bl", false),
                Event::Pin("hiz", true),
                Event::Shift(vec![0; 5]),
                Event::Flush,
                Event::Pin("le", true),
                Event::Pin("le", false),
            ]
        );
    }

    #[test]
    fn test_unblank_and_enable() {
        let (mut bank, log) = chain(5);
        bank.unblank().unwrap();
        bank.enable_outputs().unwrap();

        assert_eq!(
            take(&log),
            vec![Event::Pin("bl", true), Event::Pin("hiz", false)]
        );
    }

    #[test]
    fn test_write_last_bank_first() {
        let (mut bank, log) = chain(3);
        bank.write(&[0x01, 0x02, 0x03]).unwrap();

        assert_eq!(
            take(&log),
            vec![
                Event::Shift(vec![0x03, 0x02, 0x01]),
                Event::Flush,
                Event::Pin("le", true),
                Event::Pin("le", false),
            ]
        );
    }

    #[test]
    fn test_write_short_image() {
        let (mut bank, log) = chain(3);
        bank.write(&[0xAA]).unwrap();

        assert_eq!(take(&log)[0], Event::Shift(vec![0x00, 0x00, 0xAA]));
    }

    #[test]
    fn test_chain_length_clamped() {
        let (bank, _) = chain(40);
        assert_eq!(bank.bank_count(), MAX_BANKS);
    }

    #[test]
    fn test_driver_on_chain() {
        let (bank, log) = chain(5);
        let mut driver: NixieDriver<_, 4> = NixieDriver::new(bank);

        driver.begin().unwrap();
        take(&log);

        driver.set_digits(&[1, 2, 3, 4]).unwrap();
        // Packed as [0x20, 0x00, 0x01, 0x08, 0x40], shifted in reverse
        assert_eq!(
            take(&log)[0],
            Event::Shift(vec![0x40, 0x08, 0x01, 0x00, 0x20])
        );
    }

    struct FailingPin;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct PinFault;

    impl embedded_hal::digital::Error for PinFault {
        fn kind(&self) -> embedded_hal::digital::ErrorKind {
            embedded_hal::digital::ErrorKind::Other
        }
    }

    impl PinErrorType for FailingPin {
        type Error = PinFault;
    }

    impl OutputPin for FailingPin {
        fn set_low(&mut self) -> Result<(), Self::Error> {
            Err(PinFault)
        }

        fn set_high(&mut self) -> Result<(), Self::Error> {
            Err(PinFault)
        }
    }

    #[test]
    fn test_pin_error_propagates() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let spi = MockSpi { log: log.clone() };
        let mut bank = Hv513Bank::new(spi, FailingPin, FailingPin, FailingPin, 2);

        assert_eq!(bank.begin(), Err(Hv513Error::Pin(PinFault)));
        // Nothing was shifted after the failure
        assert!(log.borrow().is_empty());
    }
}
