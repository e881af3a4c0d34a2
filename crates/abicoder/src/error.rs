//! ABI codec error types

use thiserror::Error;

/// ABI codec error type
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AbiError {
    /// Type signature names a base type the parser does not know
    #[error("Unknown type: {0}")]
    UnknownType(String),

    /// Fixed-bytes width, integer width or array count out of range
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Supplied value does not fit the declared type
    #[error("Value shape mismatch: {0}")]
    ValueShape(String),

    /// Offset or length read from a buffer is inconsistent with its size
    #[error("Malformed buffer: {0}")]
    MalformedBuffer(String),
}

impl AbiError {
    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        AbiError::ValueShape(msg.into())
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        AbiError::MalformedBuffer(msg.into())
    }
}
