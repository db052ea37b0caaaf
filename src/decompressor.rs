//! Decompression Logic
//!
//! Stream decoder: walks the tree one bit at a time, emitting a byte at
//! every non-EOF leaf and stopping at the EOF leaf.

use tracing::debug;

use crate::bit_buffer::BitBuffer;
use crate::error::{GrinError, Result};
use crate::tree::{HuffmanTree, Node};

/// How the decode walk ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeOutcome {
    /// Reached the EOF leaf.
    Eof,
    /// The bit source ran dry before the EOF leaf.
    Exhausted,
}

/// Decode bits from `input` into `out` until the EOF leaf or the end of
/// input, whichever comes first.
///
/// A tree whose root is the EOF leaf yields `Eof` without consuming bits;
/// any other bare-leaf root is a [`GrinError::DegenerateTree`].
pub fn decode_stream(
    tree: &HuffmanTree,
    input: &mut BitBuffer,
    out: &mut Vec<u8>,
) -> Result<DecodeOutcome> {
    let root = tree.root();
    if let Node::Leaf { symbol, .. } = tree.node(root) {
        return if symbol.is_eof() {
            Ok(DecodeOutcome::Eof)
        } else {
            Err(GrinError::DegenerateTree(*symbol))
        };
    }

    let mut current = root;
    while let Some(bit) = input.read_bit() {
        let Some(next) = tree.node(current).child(bit) else {
            unreachable!("the walk resets at every leaf");
        };
        current = next;

        if let Node::Leaf { symbol, .. } = tree.node(current) {
            match symbol.as_byte() {
                None => {
                    debug!(output_bytes = out.len(), "reached EOF code");
                    return Ok(DecodeOutcome::Eof);
                }
                Some(byte) => {
                    out.push(byte);
                    current = root;
                }
            }
        }
    }

    debug!(output_bytes = out.len(), "bit source exhausted before EOF");
    Ok(DecodeOutcome::Exhausted)
}

/// Decode a full payload, treating a missing EOF code as truncation.
pub fn decode_payload(tree: &HuffmanTree, input: &mut BitBuffer) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    match decode_stream(tree, input, &mut out)? {
        DecodeOutcome::Eof => Ok(out),
        DecodeOutcome::Exhausted => Err(GrinError::TruncatedStream { decoded: out.len() }),
    }
}
