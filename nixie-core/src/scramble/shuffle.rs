//! Symbol pool for the scramble shuffle

/// Number of symbols in the pool
pub const SHUFFLE_LEN: usize = 9;

/// Pool of the offsets 1..=9
///
/// The pool is shuffled a little further on every scramble and never reset,
/// so consecutive scrambles continue from the previous permutation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ShuffleBuffer {
    symbols: [u8; SHUFFLE_LEN],
}

impl Default for ShuffleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ShuffleBuffer {
    /// Create the pool in its initial order `[1, 2, ..., 9]`
    pub const fn new() -> Self {
        Self {
            symbols: [1, 2, 3, 4, 5, 6, 7, 8, 9],
        }
    }

    /// Symbol at `index`
    ///
    /// # Panics
    /// If `index >= SHUFFLE_LEN`.
    pub fn get(&self, index: usize) -> u8 {
        self.symbols[index]
    }

    /// Exchange two positions
    pub fn swap(&mut self, a: usize, b: usize) {
        self.symbols.swap(a, b);
    }

    /// Current permutation
    pub fn symbols(&self) -> &[u8; SHUFFLE_LEN] {
        &self.symbols
    }

    /// Check that the pool still holds each of 1..=9 exactly once
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; SHUFFLE_LEN + 1];
        for &symbol in &self.symbols {
            let slot = symbol as usize;
            if slot == 0 || slot > SHUFFLE_LEN || seen[slot] {
                return false;
            }
            seen[slot] = true;
        }
        true
    }
}
