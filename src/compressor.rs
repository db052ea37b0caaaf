//! Compression Logic
//!
//! Stream encoder: maps each input byte through the code table into the
//! output bit stream and terminates it with the EOF code.

use tracing::debug;

use crate::bit_buffer::BitBuffer;
use crate::error::{GrinError, Result};
use crate::symbol::Symbol;
use crate::tree::CodeTable;

/// Append the code of every byte in `input`, then exactly one EOF code.
///
/// Returns the number of payload bits written.
pub fn encode_stream(codes: &CodeTable, input: &[u8], out: &mut BitBuffer) -> Result<usize> {
    let start = out.len();

    for &byte in input {
        write_symbol(codes, Symbol::from(byte), out)?;
    }
    write_symbol(codes, Symbol::EOF, out)?;

    let written = out.len() - start;
    debug!(input_bytes = input.len(), payload_bits = written, "encoded payload");
    Ok(written)
}

fn write_symbol(codes: &CodeTable, symbol: Symbol, out: &mut BitBuffer) -> Result<()> {
    let code = codes.get(symbol).ok_or(GrinError::MissingCode(symbol))?;
    out.write_bitslice(code);
    Ok(())
}
