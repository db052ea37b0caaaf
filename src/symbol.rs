//! Symbol Alphabet
//!
//! The 9-bit GRIN alphabet: the 256 byte values plus the end-of-stream
//! sentinel.

use std::fmt;

use serde::Serialize;

use crate::error::{GrinError, Result};

/// One symbol of the 9-bit alphabet.
///
/// Values 0..=255 are literal bytes; 256 is [`Symbol::EOF`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Symbol(u16);

impl Symbol {
    /// End-of-stream sentinel.
    pub const EOF: Symbol = Symbol(256);

    /// Width of a symbol in the serialized tree.
    pub const BITS: usize = 9;

    /// Number of distinct symbols, EOF included.
    pub const COUNT: usize = 257;

    /// Validate a raw 9-bit value.
    pub fn new(value: u16) -> Result<Self> {
        if value > Self::EOF.0 {
            return Err(GrinError::InvalidSymbol(value));
        }
        Ok(Symbol(value))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    pub fn is_eof(self) -> bool {
        self == Self::EOF
    }

    /// The literal byte, or `None` for EOF.
    pub fn as_byte(self) -> Option<u8> {
        u8::try_from(self.0).ok()
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }

    /// Inverse of `index`; callers stay below `Symbol::COUNT`.
    pub(crate) fn from_index(index: usize) -> Self {
        debug_assert!(index < Self::COUNT);
        Symbol(index as u16)
    }
}

impl From<u8> for Symbol {
    fn from(byte: u8) -> Self {
        Symbol(byte as u16)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_byte() {
            None => write!(f, "EOF"),
            Some(b) if b.is_ascii_graphic() => write!(f, "0x{:02x} '{}'", b, b as char),
            Some(b) => write!(f, "0x{:02x}", b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_out_of_range() {
        assert_eq!(Symbol::new(256).unwrap(), Symbol::EOF);
        assert!(matches!(Symbol::new(257), Err(GrinError::InvalidSymbol(257))));
        assert!(matches!(Symbol::new(511), Err(GrinError::InvalidSymbol(511))));
    }

    #[test]
    fn test_as_byte() {
        assert_eq!(Symbol::from(0x41).as_byte(), Some(0x41));
        assert_eq!(Symbol::from(255).as_byte(), Some(255));
        assert_eq!(Symbol::EOF.as_byte(), None);
    }

    #[test]
    fn test_eof_fits_in_symbol_width() {
        assert!((Symbol::EOF.value() as u32) < (1 << Symbol::BITS));
        assert!(Symbol::from(255).value() < Symbol::EOF.value());
    }

    #[test]
    fn test_display() {
        assert_eq!(Symbol::EOF.to_string(), "EOF");
        assert_eq!(Symbol::from(b'A').to_string(), "0x41 'A'");
        assert_eq!(Symbol::from(b'\n').to_string(), "0x0a");
    }
}
