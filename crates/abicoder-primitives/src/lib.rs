//! # abicoder-primitives
//!
//! Primitive types consumed by the abicoder ABI codec.
//!
//! - [`Address`]: 20-byte account address with hex parsing
//! - [`H256`]: 32-byte hash, the keccak-256 output type
//! - [`U256`]: fixed-width 256-bit unsigned integer (from `primitive-types`)
//!
//! The [`WORD`] constant is the unit every ABI value is aligned to.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::H256;

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// Size of one ABI word in bytes
pub const WORD: usize = 32;

/// Strip an optional `0x` / `0X` prefix from a hex string
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string (with or without `0x` prefix) into bytes.
///
/// Odd-length input is accepted and treated as having a leading zero nibble,
/// so `"0x1"` decodes to `[0x01]`.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = strip_hex_prefix(s);
    if digits.len() % 2 == 1 {
        hex::decode(format!("0{}", digits))
    } else {
        hex::decode(digits)
    }
}

/// Encode bytes as a `0x`-prefixed lowercase hex string
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}
