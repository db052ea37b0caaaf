//! GRIN Codec
//!
//! The `.grin` container and the operations exposed to the CLI:
//!
//! ```text
//! [32 bits]  magic number 0x00000736
//! [variable] serialized Huffman tree (pre-order)
//! [variable] code of each input byte, in order
//! [variable] EOF code
//! [padding]  zero bits to the next byte boundary
//! ```

use std::fs::{self, File};
use std::path::Path;

use tracing::{debug, info};

use crate::bit_buffer::BitBuffer;
use crate::compressor::encode_stream;
use crate::decompressor::decode_payload;
use crate::error::{GrinError, Result};
use crate::frequency::FrequencyTable;
use crate::tree::{CodeTable, HuffmanTree};

/// First 32 bits of every `.grin` file.
pub const MAGIC_NUMBER: u32 = 0x736;

// =============================================================================
// Codec Session
// =============================================================================

/// A tree and its code table, scoped to one encode or decode operation.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    tree: HuffmanTree,
    codes: CodeTable,
}

impl HuffmanCodec {
    pub fn new(tree: HuffmanTree) -> Self {
        let codes = tree.code_table();
        Self { tree, codes }
    }

    pub fn from_frequencies(freqs: &FrequencyTable) -> Self {
        Self::new(HuffmanTree::from_frequencies(freqs))
    }

    /// Check the magic number and read the serialized tree.
    ///
    /// The magic number is checked before any tree bits are touched.
    pub fn read_header(input: &mut BitBuffer) -> Result<Self> {
        let magic = input.read_bits(32).map(|v| v as u32);
        if magic != Some(MAGIC_NUMBER) {
            return Err(GrinError::BadMagic { found: magic });
        }
        let tree = HuffmanTree::deserialize(input)?;
        Ok(Self::new(tree))
    }

    /// Write the magic number and the serialized tree.
    pub fn write_header(&self, out: &mut BitBuffer) {
        out.write_bits(MAGIC_NUMBER as u64, 32);
        self.tree.serialize(out);
    }

    /// Append the payload for `input`, EOF code included.
    pub fn encode_payload(&self, input: &[u8], out: &mut BitBuffer) -> Result<usize> {
        encode_stream(&self.codes, input, out)
    }

    /// Decode the payload that follows the header.
    pub fn decode_payload(&self, input: &mut BitBuffer) -> Result<Vec<u8>> {
        decode_payload(&self.tree, input)
    }

    pub fn tree(&self) -> &HuffmanTree {
        &self.tree
    }

    pub fn codes(&self) -> &CodeTable {
        &self.codes
    }
}

// =============================================================================
// Buffer Operations
// =============================================================================

/// Compress `input` into a complete `.grin` byte image.
pub fn encode(input: &[u8]) -> Result<Vec<u8>> {
    encode_with_frequencies(&FrequencyTable::from_bytes(input), input)
}

/// Compress `input` using a precomputed frequency model.
///
/// The model must cover every byte value present in `input`.
pub fn encode_with_frequencies(freqs: &FrequencyTable, input: &[u8]) -> Result<Vec<u8>> {
    let codec = HuffmanCodec::from_frequencies(freqs);
    let mut out = BitBuffer::new();
    codec.write_header(&mut out);
    let header_bits = out.len();
    codec.encode_payload(input, &mut out)?;
    debug!(
        header_bits,
        total_bits = out.len(),
        "wrote grin image"
    );
    Ok(out.into_bytes())
}

/// Decompress a complete `.grin` byte image.
pub fn decode(compressed: &[u8]) -> Result<Vec<u8>> {
    let mut input = BitBuffer::from_bytes(compressed);
    let codec = HuffmanCodec::read_header(&mut input)?;
    codec.decode_payload(&mut input)
}

// =============================================================================
// File Operations
// =============================================================================

/// Byte counts for one file transformation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl Stats {
    /// Output size as a fraction of input size (0.0 for empty input).
    pub fn ratio(&self) -> f64 {
        if self.input_bytes == 0 {
            return 0.0;
        }
        self.output_bytes as f64 / self.input_bytes as f64
    }
}

/// Compress the file at `src` into `dst`.
///
/// Frequencies are counted in a separate pass over `src`, then the file is
/// read again for encoding.
pub fn encode_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<Stats> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let freqs = FrequencyTable::from_reader(File::open(src)?)?;
    let input = fs::read(src)?;
    let output = encode_with_frequencies(&freqs, &input)?;
    fs::write(dst, &output)?;

    let stats = Stats {
        input_bytes: input.len() as u64,
        output_bytes: output.len() as u64,
    };
    info!(src = %src.display(), dst = %dst.display(), ?stats, "encoded file");
    Ok(stats)
}

/// Decompress the `.grin` file at `src` into `dst`. Nothing is written to
/// `dst` unless the whole file decodes cleanly.
pub fn decode_file(src: impl AsRef<Path>, dst: impl AsRef<Path>) -> Result<Stats> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let input = fs::read(src)?;
    let output = decode(&input)?;
    fs::write(dst, &output)?;

    let stats = Stats {
        input_bytes: input.len() as u64,
        output_bytes: output.len() as u64,
    };
    info!(src = %src.display(), dst = %dst.display(), ?stats, "decoded file");
    Ok(stats)
}

/// Read only the header of the `.grin` file at `src`.
pub fn read_file_header(src: impl AsRef<Path>) -> Result<HuffmanCodec> {
    let input = fs::read(src)?;
    HuffmanCodec::read_header(&mut BitBuffer::from_bytes(&input))
}
