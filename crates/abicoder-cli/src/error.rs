//! CLI error types

use abicoder::AbiError;
use abicoder_crypto::CryptoError;
use abicoder_primitives::AddressError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Encoding or decoding failed
    #[error("ABI error: {0}")]
    Abi(#[from] AbiError),

    /// Malformed address
    #[error("Invalid address: {0}")]
    InvalidAddress(#[from] AddressError),

    /// Checksum mismatch or malformed address
    #[error("Crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Invalid hex string
    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    /// Invalid command argument
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
