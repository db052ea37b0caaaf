//! Error types for GRIN operations

use thiserror::Error;

use crate::symbol::Symbol;

#[derive(Error, Debug)]
pub enum GrinError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not a valid .grin file: bad magic number {}", fmt_magic(.found))]
    BadMagic { found: Option<u32> },

    #[error("Truncated tree header: input ended inside the serialized tree")]
    TruncatedTree,

    #[error("Invalid symbol value {0} in tree header (max is 256)")]
    InvalidSymbol(u16),

    #[error("Symbol {0} appears in more than one leaf")]
    DuplicateSymbol(Symbol),

    #[error("Tree header describes more nodes than a 257-symbol tree can hold")]
    TreeTooLarge,

    #[error("Tree root is a bare leaf for {0}; nothing can be decoded")]
    DegenerateTree(Symbol),

    #[error("Truncated stream: input ended before the EOF code ({decoded} bytes decoded)")]
    TruncatedStream { decoded: usize },

    #[error("No code for {0} in the code table")]
    MissingCode(Symbol),
}

impl GrinError {
    /// True for errors that mean the input is corrupt or not a .grin file.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            GrinError::BadMagic { .. }
                | GrinError::TruncatedTree
                | GrinError::InvalidSymbol(_)
                | GrinError::DuplicateSymbol(_)
                | GrinError::TreeTooLarge
                | GrinError::DegenerateTree(_)
        )
    }
}

fn fmt_magic(found: &Option<u32>) -> String {
    match found {
        Some(value) => format!("{:#010x}", value),
        None => "(file shorter than 32 bits)".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, GrinError>;
