//! EIP-55 mixed-case address checksums
//!
//! The checksum form upper-cases every hex letter whose matching nibble in
//! `keccak256(lowercase_hex)` is 8 or greater.

use abicoder_primitives::{strip_hex_prefix, Address};

use crate::{keccak256, CryptoError};

/// Render an address in its EIP-55 checksummed form (`0x`-prefixed)
pub fn to_checksum_address(address: &Address) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());
    let hash = hash.as_bytes();

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let byte = hash[i / 2];
        let nibble = if i % 2 == 0 { byte >> 4 } else { byte & 0x0f };
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Parse an address, enforcing its checksum when it is written in mixed case.
///
/// All-lowercase and all-uppercase inputs carry no checksum and are accepted
/// as plain hex.
pub fn parse_checksummed(s: &str) -> Result<Address, CryptoError> {
    let s = s.trim();
    let address = Address::from_hex(s)?;

    let digits = strip_hex_prefix(s);
    let has_lower = digits.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = digits.chars().any(|c| c.is_ascii_uppercase());
    if !(has_lower && has_upper) {
        return Ok(address);
    }

    let expected = to_checksum_address(&address);
    if &expected[2..] != digits {
        return Err(CryptoError::InvalidChecksum {
            expected,
            got: s.to_string(),
        });
    }
    Ok(address)
}
