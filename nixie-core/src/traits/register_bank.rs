//! Register bank trait for the cathode drivers

/// Width of one bank word in bits
pub const BANK_BITS: usize = 8;

/// Chain of output registers driving the tube cathodes
///
/// Each register holds one bank word of [`BANK_BITS`] outputs. Word 0
/// drives global pins 0-7, word 1 pins 8-15 and so on.
pub trait RegisterBank {
    /// Error type for bus or pin failures
    type Error;

    /// Bring the chain into a known state (all outputs off)
    fn begin(&mut self) -> Result<(), Self::Error>;

    /// Release the blanking input so latched data reaches the outputs
    fn unblank(&mut self) -> Result<(), Self::Error>;

    /// Take the outputs out of high impedance
    fn enable_outputs(&mut self) -> Result<(), Self::Error>;

    /// Shift a full image of the chain and latch it
    ///
    /// `words` must hold exactly [`bank_count`](Self::bank_count) words.
    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error>;

    /// Number of registers in the chain
    fn bank_count(&self) -> usize;
}

impl<T: RegisterBank + ?Sized> RegisterBank for &mut T {
    type Error = T::Error;

    fn begin(&mut self) -> Result<(), Self::Error> {
        (**self).begin()
    }

    fn unblank(&mut self) -> Result<(), Self::Error> {
        (**self).unblank()
    }

    fn enable_outputs(&mut self) -> Result<(), Self::Error> {
        (**self).enable_outputs()
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        (**self).write(words)
    }

    fn bank_count(&self) -> usize {
        (**self).bank_count()
    }
}
