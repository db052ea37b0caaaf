//! BitBuffer Abstraction
//!
//! Position-tracked bit-level read/write buffer wrapping `bitvec`. This is
//! the bit source and bit sink the tree codec and the stream coders talk to.
//! Bits are stored MSB-first within each byte. `into_bytes` zero-fills the
//! final partial byte, which is the padding the `.grin` format requires
//! after the EOF code.

use bitvec::prelude::*;

/// A position-tracked bit-level read/write buffer.
pub struct BitBuffer {
    bits: BitVec<u8, Msb0>,
    position: usize,
}

impl BitBuffer {
    /// Create a new empty BitBuffer.
    pub fn new() -> Self {
        Self {
            bits: BitVec::new(),
            position: 0,
        }
    }

    /// Create a BitBuffer from a byte slice, positioned at the first bit.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            bits: BitVec::from_slice(bytes),
            position: 0,
        }
    }

    /// Read a single bit and advance position. `None` at end of input.
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.position >= self.bits.len() {
            return None;
        }
        let bit = self.bits[self.position];
        self.position += 1;
        Some(bit)
    }

    /// Read n bits as a u64 value (MSB first) and advance position.
    ///
    /// Returns `None` without consuming anything if fewer than `n` bits
    /// remain.
    pub fn read_bits(&mut self, n: usize) -> Option<u64> {
        if n > 64 || self.position + n > self.bits.len() {
            return None;
        }
        let value = self.bits[self.position..self.position + n]
            .iter()
            .by_vals()
            .fold(0u64, |acc, bit| (acc << 1) | bit as u64);
        self.position += n;
        Some(value)
    }

    /// Write a single bit (appends to end).
    pub fn write_bit(&mut self, bit: bool) {
        self.bits.push(bit);
    }

    /// Write the n least significant bits of `value`, MSB first.
    pub fn write_bits(&mut self, value: u64, n: usize) {
        for i in (0..n).rev() {
            self.bits.push(((value >> i) & 1) == 1);
        }
    }

    /// Append a run of bits as-is.
    pub fn write_bitslice(&mut self, bits: &BitSlice<u8, Msb0>) {
        self.bits.extend_from_bitslice(bits);
    }

    /// Current read position.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Remaining bits from current position.
    pub fn remaining(&self) -> usize {
        self.bits.len().saturating_sub(self.position)
    }

    /// Total number of bits in the buffer.
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Convert to bytes, padding the final partial byte with zero bits.
    pub fn into_bytes(mut self) -> Vec<u8> {
        self.bits.set_uninitialized(false);
        self.bits.into_vec()
    }
}

impl Default for BitBuffer {
    fn default() -> Self {
        Self::new()
    }
}
