//! Book identifier generation.

use bookshelf_kernel::settings::BookSettings;
use rand::Rng;

/// URL-safe alphabet: `A-Za-z0-9_-`.
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789_-";

/// Generates fixed-length random identifiers.
#[derive(Debug, Clone, Copy)]
pub struct IdGenerator {
    length: usize,
}

impl IdGenerator {
    pub const DEFAULT_LENGTH: usize = 16;
    /// Shortest length accepted from configuration; 64^8 ids.
    pub const MIN_LENGTH: usize = BookSettings::MIN_ID_LENGTH;

    /// Zero means the default; anything else below [`Self::MIN_LENGTH`] is
    /// raised to it.
    pub fn new(length: usize) -> Self {
        let length = match length {
            0 => Self::DEFAULT_LENGTH,
            n => n.max(Self::MIN_LENGTH),
        };
        Self { length }
    }

    /// Skips the minimum so tests can exhaust a tiny id space.
    #[cfg(test)]
    pub(crate) fn unchecked(length: usize) -> Self {
        Self { length }
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn generate(&self) -> String {
        let mut rng = rand::thread_rng();
        (0..self.length)
            .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
            .collect()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LENGTH)
    }
}
