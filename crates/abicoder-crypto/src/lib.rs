//! # abicoder-crypto
//!
//! Hashing helpers for the abicoder ABI codec.
//!
//! - Keccak-256 hashing (function selectors, checksums)
//! - EIP-55 mixed-case address checksums

#![warn(missing_docs)]
#![warn(clippy::all)]

mod checksum;
mod error;
mod hash;

pub use checksum::{parse_checksummed, to_checksum_address};
pub use error::CryptoError;
pub use hash::keccak256;
