use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("unexpected end of data while reading {field}")]
    Truncated { field: &'static str },

    #[error("non-minimal compact size encoding of {value}")]
    NonMinimalCompactSize { value: u64 },

    #[error("unsupported serialization type {0}")]
    UnsupportedSerType(u16),

    #[error("unknown transaction tree {0}")]
    UnknownTree(u8),

    #[error("{field} count {count} exceeds the {max} that fit in the remaining data")]
    TooManyElements {
        field: &'static str,
        count: u64,
        max: u64,
    },

    #[error("witness count {witness} does not match input count {prefix}")]
    WitnessCountMismatch { prefix: usize, witness: usize },

    #[error("{0} trailing bytes after transaction")]
    TrailingBytes(usize),
}
