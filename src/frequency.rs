//! Frequency Model
//!
//! Symbol occurrence counts consumed by the tree builder.

use std::io::{ErrorKind, Read};

use crate::error::Result;
use crate::symbol::Symbol;

/// Occurrence count per symbol, one slot for each of the 257 symbols.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; Symbol::COUNT],
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self {
            counts: [0; Symbol::COUNT],
        }
    }

    /// Count every byte of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut table = Self::new();
        for &byte in bytes {
            table.increment(Symbol::from(byte));
        }
        table
    }

    /// Count every byte produced by `reader` in a single pass of 8 KiB reads.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut table = Self::new();
        let mut chunk = [0u8; 8192];
        loop {
            let n = match reader.read(&mut chunk) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            };
            for &byte in &chunk[..n] {
                table.increment(Symbol::from(byte));
            }
        }
        Ok(table)
    }

    pub fn increment(&mut self, symbol: Symbol) {
        self.counts[symbol.index()] += 1;
    }

    pub fn insert(&mut self, symbol: Symbol, count: u64) {
        self.counts[symbol.index()] = count;
    }

    pub fn get(&self, symbol: Symbol) -> u64 {
        self.counts[symbol.index()]
    }

    /// Symbols with a non-zero count, in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (Symbol, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, count)| **count > 0)
            .map(|(value, &count)| (Symbol::from_index(value), count))
    }

    /// Number of symbols with a non-zero count.
    pub fn len(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(Symbol, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (Symbol, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.insert(symbol, count);
        }
        table
    }
}
