//! Cryptographic errors

use abicoder_primitives::AddressError;
use thiserror::Error;

/// Cryptographic operation error
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Address could not be parsed at all
    #[error("invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// Mixed-case address whose casing does not match its EIP-55 checksum
    #[error("invalid checksum: expected {expected}, got {got}")]
    InvalidChecksum {
        /// Correctly checksummed rendering
        expected: String,
        /// Input as supplied
        got: String,
    },
}
