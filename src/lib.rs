//! # GRIN - Huffman File Compression
//!
//! Lossless compression over a 9-bit alphabet (the 256 byte values plus an
//! end-of-stream symbol). A `.grin` file is a magic number, the Huffman
//! tree in pre-order, and the bit-packed codes of the input terminated by
//! the EOF code.
//!
//! ```
//! let compressed = grin::encode(b"abracadabra")?;
//! assert_eq!(grin::decode(&compressed)?, b"abracadabra");
//! # Ok::<(), grin::GrinError>(())
//! ```

pub mod bit_buffer;
pub mod error;
pub mod frequency;
pub mod symbol;

// Core functional modules
pub mod compressor;
pub mod decompressor;
pub mod tree;
pub mod tree_display;

// Container format and file operations
pub mod codec;

// Core error/result types
pub use error::{GrinError, Result};
pub use frequency::FrequencyTable;
pub use symbol::Symbol;

pub use bit_buffer::BitBuffer;
pub use tree::{CodeTable, HuffmanTree, Node, NodeId};
pub use tree_display::{render_code_table, render_tree, CodeReport};

pub use codec::{
    decode, decode_file, encode, encode_file, encode_with_frequencies, read_file_header,
    HuffmanCodec, Stats, MAGIC_NUMBER,
};
pub use decompressor::DecodeOutcome;
