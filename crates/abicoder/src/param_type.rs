//! Type descriptors and the signature parser

use std::fmt;
use std::str::FromStr;

use abicoder_primitives::WORD;

use crate::AbiError;

/// Largest `bytesN` width
pub const MAX_FIXED_BYTES: usize = 32;

/// Solidity parameter types
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// Address
    Address,
    /// Boolean
    Bool,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Dynamic array
    Array(Box<ParamType>),
}

impl ParamType {
    /// Parse a type signature such as `uint256`, `address[2]`, `bytes10`
    /// or `string[]`.
    ///
    /// Array suffixes nest left to right, so `uint8[2][]` is a dynamic array
    /// whose elements are `uint8[2]`.
    pub fn parse(signature: &str) -> Result<Self, AbiError> {
        let s = signature.trim();

        if let Some(body) = s.strip_suffix(']') {
            let open = body
                .rfind('[')
                .ok_or_else(|| AbiError::UnknownType(s.to_string()))?;
            let elem = Self::parse(&body[..open])?;
            let dim = &body[open + 1..];

            if dim.is_empty() {
                return Ok(ParamType::Array(Box::new(elem)));
            }
            let count: usize = dim.parse().map_err(|_| {
                AbiError::InvalidSize(format!(
                    "array count must be a positive integer, got [{}] in {}",
                    dim, s
                ))
            })?;
            if count == 0 {
                return Err(AbiError::InvalidSize(format!(
                    "array count must be positive in {}",
                    s
                )));
            }
            return Ok(ParamType::FixedArray(Box::new(elem), count));
        }

        parse_base(s)
    }

    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            _ => false,
        }
    }

    /// Bytes this type occupies in an enclosing head region.
    ///
    /// Static arrays of static elements are inlined; everything else takes
    /// one word (the value itself, or an offset for dynamic types).
    pub fn head_size(&self) -> usize {
        match self {
            ParamType::FixedArray(inner, count) if !inner.is_dynamic() => {
                inner.head_size().saturating_mul(*count)
            }
            _ => WORD,
        }
    }

    /// Words this type occupies in an enclosing head region
    pub fn static_word_count(&self) -> usize {
        self.head_size() / WORD
    }
}

fn parse_base(s: &str) -> Result<ParamType, AbiError> {
    match s {
        "address" => return Ok(ParamType::Address),
        "bool" | "boolean" => return Ok(ParamType::Bool),
        "string" => return Ok(ParamType::String),
        "bytes" => return Ok(ParamType::Bytes),
        _ => {}
    }

    // bytes<N>
    if let Some(rest) = s.strip_prefix("bytes") {
        let size = parse_width(s, rest)?;
        if size == 0 || size > MAX_FIXED_BYTES {
            return Err(AbiError::InvalidSize(format!(
                "bytes width must be in 1..=32, got {}",
                s
            )));
        }
        return Ok(ParamType::FixedBytes(size));
    }

    // uint<N>
    if let Some(rest) = s.strip_prefix("uint") {
        if rest.is_empty() {
            return Ok(ParamType::Uint(256));
        }
        let bits = parse_width(s, rest)?;
        if bits == 0 || bits > 256 || bits % 8 != 0 {
            return Err(AbiError::InvalidSize(format!(
                "uint width must be a multiple of 8 in 8..=256, got {}",
                s
            )));
        }
        return Ok(ParamType::Uint(bits));
    }

    Err(AbiError::UnknownType(s.to_string()))
}

/// Numeric suffix of `bytesN` / `uintM`; anything but digits is an unknown type
fn parse_width(s: &str, rest: &str) -> Result<usize, AbiError> {
    if rest.is_empty() || !rest.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AbiError::UnknownType(s.to_string()));
    }
    rest.parse()
        .map_err(|_| AbiError::InvalidSize(format!("width out of range in {}", s)))
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => write!(f, "address"),
            ParamType::Bool => write!(f, "bool"),
            ParamType::Uint(bits) => write!(f, "uint{}", bits),
            ParamType::FixedBytes(size) => write!(f, "bytes{}", size),
            ParamType::String => write!(f, "string"),
            ParamType::Bytes => write!(f, "bytes"),
            ParamType::FixedArray(inner, count) => write!(f, "{}[{}]", inner, count),
            ParamType::Array(inner) => write!(f, "{}[]", inner),
        }
    }
}

impl FromStr for ParamType {
    type Err = AbiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> ParamType {
        ParamType::parse(s).unwrap()
    }

    #[test]
    fn test_parse_scalars() {
        assert_eq!(parse("address"), ParamType::Address);
        assert_eq!(parse("bool"), ParamType::Bool);
        assert_eq!(parse("boolean"), ParamType::Bool);
        assert_eq!(parse("string"), ParamType::String);
        assert_eq!(parse("bytes"), ParamType::Bytes);
        assert_eq!(parse("bytes1"), ParamType::FixedBytes(1));
        assert_eq!(parse("bytes10"), ParamType::FixedBytes(10));
        assert_eq!(parse("bytes32"), ParamType::FixedBytes(32));
        assert_eq!(parse("uint"), ParamType::Uint(256));
        assert_eq!(parse("uint8"), ParamType::Uint(8));
        assert_eq!(parse("uint256"), ParamType::Uint(256));
        assert_eq!(parse("  uint64 "), ParamType::Uint(64));
    }

    #[test]
    fn test_parse_arrays() {
        assert_eq!(
            parse("address[2]"),
            ParamType::FixedArray(Box::new(ParamType::Address), 2)
        );
        assert_eq!(parse("address[]"), ParamType::Array(Box::new(ParamType::Address)));
        assert_eq!(
            parse("uint8[2][]"),
            ParamType::Array(Box::new(ParamType::FixedArray(
                Box::new(ParamType::Uint(8)),
                2
            )))
        );
        assert_eq!(
            parse("string[][3]"),
            ParamType::FixedArray(Box::new(ParamType::Array(Box::new(ParamType::String))), 3)
        );
    }

    #[test]
    fn test_parse_unknown_type() {
        for bad in ["", "int256", "uintx", "bytesx", "address[2", "[2]", "uint8]", "fixed128x18"] {
            match ParamType::parse(bad) {
                Err(AbiError::UnknownType(_)) => {}
                other => panic!("{:?}: expected UnknownType, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_parse_invalid_size() {
        for bad in ["bytes0", "bytes33", "uint0", "uint7", "uint264", "address[0]", "address[-1]", "address[x]"] {
            match ParamType::parse(bad) {
                Err(AbiError::InvalidSize(_)) => {}
                other => panic!("{:?}: expected InvalidSize, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_is_dynamic() {
        assert!(!parse("address").is_dynamic());
        assert!(!parse("uint256").is_dynamic());
        assert!(!parse("bool").is_dynamic());
        assert!(!parse("bytes32").is_dynamic());
        assert!(!parse("address[2]").is_dynamic());

        assert!(parse("bytes").is_dynamic());
        assert!(parse("string").is_dynamic());
        assert!(parse("uint256[]").is_dynamic());
        assert!(parse("string[2]").is_dynamic());
    }

    #[test]
    fn test_head_size() {
        assert_eq!(parse("uint256").head_size(), 32);
        assert_eq!(parse("bytes10").head_size(), 32);
        assert_eq!(parse("string").head_size(), 32);
        assert_eq!(parse("address[]").head_size(), 32);
        assert_eq!(parse("address[2]").head_size(), 64);
        assert_eq!(parse("uint8[3][2]").head_size(), 192);
        assert_eq!(parse("string[2]").head_size(), 32);
        assert_eq!(parse("address[2]").static_word_count(), 2);
    }

    #[test]
    fn test_display_is_canonical() {
        assert_eq!(parse("uint").to_string(), "uint256");
        assert_eq!(parse("boolean").to_string(), "bool");
        assert_eq!(parse("address[2]").to_string(), "address[2]");
        assert_eq!(parse("uint[][3]").to_string(), "uint256[][3]");
    }

    #[test]
    fn test_from_str() {
        let ty: ParamType = "bytes10".parse().unwrap();
        assert_eq!(ty, ParamType::FixedBytes(10));
    }
}
