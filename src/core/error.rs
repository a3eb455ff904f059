//! Error types for the weighted-degree SVM implementation

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WdSvmError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Sequence length mismatch: expected {expected}, got {actual}")]
    SequenceLengthMismatch { expected: usize, actual: usize },

    #[error("Invalid symbol code {code} at position {position}: alphabet size is {alphabet_size}")]
    InvalidSymbol {
        position: usize,
        code: u8,
        alphabet_size: usize,
    },

    #[error("Unknown symbol '{0}' for this alphabet")]
    UnknownSymbol(char),

    #[error("Invalid label: expected -1 or +1, got {0}")]
    InvalidLabel(f64),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Cut buffer exhausted: all {capacity} slots are in use")]
    CutBufferExhausted { capacity: usize },

    #[error("Feature dimension overflow: alphabet size {alphabet_size} with degree {degree} is not representable")]
    DimensionOverflow {
        alphabet_size: usize,
        degree: usize,
    },

    #[error("Optimization failed: {0}")]
    OptimizationError(String),

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type Result<T> = std::result::Result<T, WdSvmError>;
