//! ABI values
//!
//! [`Value`] is the closed set of variants the codec understands. Every
//! variant knows its type, whether it is dynamic, how many head words it
//! takes, and how to encode itself to / decode itself from words.

use std::fmt;

use abicoder_crypto::to_checksum_address;
use abicoder_primitives::{encode_hex, Address, U256, WORD};

use crate::input::{ingest, Input};
use crate::layout::{self, DecodeBudget};
use crate::{AbiError, ParamType};

/// A typed ABI value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Address (20 bytes)
    Address(Address),
    /// Boolean
    Bool(bool),
    /// Unsigned integer of the given bit width
    Uint {
        /// Declared width in bits
        bits: usize,
        /// The value, always below `2^bits`
        value: U256,
    },
    /// Fixed-size bytes; `data.len() == size`
    FixedBytes {
        /// Declared width in bytes (1-32)
        size: usize,
        /// Exactly `size` bytes
        data: Vec<u8>,
    },
    /// UTF-8 string
    String(String),
    /// Dynamic bytes
    Bytes(Vec<u8>),
    /// Fixed-size array
    FixedArray {
        /// Element type
        elem: ParamType,
        /// Elements; the count is part of the type
        items: Vec<Value>,
    },
    /// Dynamic array
    Array {
        /// Element type
        elem: ParamType,
        /// Elements
        items: Vec<Value>,
    },
}

impl Value {
    /// Build a value of type `ty` from any accepted source representation
    pub fn from_input(ty: &ParamType, input: impl Into<Input>) -> Result<Self, AbiError> {
        ingest(ty, input.into())
    }

    /// Parse `signature` and build a value from `input`
    pub fn parse(signature: &str, input: impl Into<Input>) -> Result<Self, AbiError> {
        Self::from_input(&ParamType::parse(signature)?, input)
    }

    /// The empty instance of `ty`: zero, false, empty payloads, `N` zero
    /// elements for a static array.
    pub fn zero(ty: &ParamType) -> Self {
        match ty {
            ParamType::Address => Value::Address(Address::ZERO),
            ParamType::Bool => Value::Bool(false),
            ParamType::Uint(bits) => Value::Uint { bits: *bits, value: U256::zero() },
            ParamType::FixedBytes(size) => Value::FixedBytes { size: *size, data: vec![0u8; *size] },
            ParamType::String => Value::String(String::new()),
            ParamType::Bytes => Value::Bytes(Vec::new()),
            ParamType::FixedArray(elem, count) => Value::FixedArray {
                elem: (**elem).clone(),
                items: (0..*count).map(|_| Value::zero(elem)).collect(),
            },
            ParamType::Array(elem) => Value::Array {
                elem: (**elem).clone(),
                items: Vec::new(),
            },
        }
    }

    /// The type of this value
    pub fn param_type(&self) -> ParamType {
        match self {
            Value::Address(_) => ParamType::Address,
            Value::Bool(_) => ParamType::Bool,
            Value::Uint { bits, .. } => ParamType::Uint(*bits),
            Value::FixedBytes { size, .. } => ParamType::FixedBytes(*size),
            Value::String(_) => ParamType::String,
            Value::Bytes(_) => ParamType::Bytes,
            Value::FixedArray { elem, items } => ParamType::FixedArray(Box::new(elem.clone()), items.len()),
            Value::Array { elem, .. } => ParamType::Array(Box::new(elem.clone())),
        }
    }

    /// Check that the fields agree with each other: a well-formed type,
    /// payload length equal to the fixed-bytes width, integer within its
    /// width and every element of the declared element type.
    ///
    /// Values built by [`Value::from_input`] or decoded from a buffer always
    /// pass; hand-assembled variants may not.
    pub fn validate(&self) -> Result<(), AbiError> {
        let ty = self.param_type();
        ParamType::parse(&ty.to_string())?;

        match self {
            Value::Uint { bits, value } if value.bits() > *bits => Err(AbiError::shape(format!(
                "value {} does not fit in uint{}",
                value, bits
            ))),
            Value::FixedBytes { size, data } if data.len() != *size => Err(AbiError::shape(format!(
                "bytes{} holds {} bytes of data",
                size,
                data.len()
            ))),
            Value::FixedArray { elem, items } | Value::Array { elem, items } => {
                items.iter().try_for_each(|item| {
                    if item.param_type() != *elem {
                        return Err(AbiError::shape(format!(
                            "{} element in {}",
                            item.param_type(),
                            ty
                        )));
                    }
                    item.validate()
                })
            }
            _ => Ok(()),
        }
    }

    /// Check if this value is dynamic (encoded in the tail)
    pub fn is_dynamic(&self) -> bool {
        match self {
            Value::String(_) | Value::Bytes(_) | Value::Array { .. } => true,
            Value::FixedArray { elem, .. } => elem.is_dynamic(),
            _ => false,
        }
    }

    /// Bytes this value occupies in an enclosing head region
    pub fn head_size(&self) -> usize {
        match self {
            Value::FixedArray { elem, items } if !elem.is_dynamic() => elem.head_size() * items.len(),
            _ => WORD,
        }
    }

    /// Words this value occupies in an enclosing head region
    pub fn static_word_count(&self) -> usize {
        self.head_size() / WORD
    }

    /// Encode this value on its own (no enclosing head slot)
    pub fn encode(&self) -> Vec<u8> {
        match self {
            Value::Address(address) => {
                let mut word = [0u8; WORD];
                word[12..].copy_from_slice(address.as_bytes());
                word.to_vec()
            }
            Value::Bool(b) => {
                let mut word = [0u8; WORD];
                word[31] = u8::from(*b);
                word.to_vec()
            }
            Value::Uint { value, .. } => layout::encode_word(value).to_vec(),
            Value::FixedBytes { data, .. } => layout::pad_right(data),
            Value::String(s) => layout::encode_length_prefixed(s.as_bytes()),
            Value::Bytes(data) => layout::encode_length_prefixed(data),
            Value::FixedArray { items, .. } => layout::encode_sequence(items),
            Value::Array { items, .. } => {
                let mut result = layout::encode_usize(items.len()).to_vec();
                result.extend(layout::encode_sequence(items));
                result
            }
        }
    }

    /// Overwrite this value with one of the same type decoded from the start
    /// of `data`.
    ///
    /// On error the value is left unchanged.
    pub fn decode(&mut self, data: &[u8]) -> Result<(), AbiError> {
        *self = Value::read(&self.param_type(), data)?;
        Ok(())
    }

    /// Decode a value of type `ty` from the start of `data`
    pub fn read(ty: &ParamType, data: &[u8]) -> Result<Self, AbiError> {
        let mut budget = DecodeBudget::for_buffer(data);
        Value::read_within(ty, data, &mut budget)
    }

    /// [`Value::read`] drawing on a budget shared with the enclosing decode
    pub fn read_within(ty: &ParamType, data: &[u8], budget: &mut DecodeBudget) -> Result<Self, AbiError> {
        // static arrays own no word of their own; their elements are charged
        if !matches!(ty, ParamType::FixedArray(..)) {
            budget.charge(1, ty)?;
        }
        match ty {
            ParamType::Address => {
                let word = layout::read_word(data, 0)?;
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(&word[12..]);
                Ok(Value::Address(Address::from_bytes(bytes)))
            }
            ParamType::Bool => {
                let word = layout::read_word(data, 0)?;
                if word[..31].iter().any(|&b| b != 0) || word[31] > 1 {
                    return Err(AbiError::shape(format!(
                        "boolean word must be 0 or 1, got 0x{}",
                        hex::encode(word)
                    )));
                }
                Ok(Value::Bool(word[31] == 1))
            }
            ParamType::Uint(bits) => {
                let value = U256::from_big_endian(layout::read_word(data, 0)?);
                if value.bits() > *bits {
                    return Err(AbiError::malformed(format!(
                        "value {} does not fit in uint{}",
                        value, bits
                    )));
                }
                Ok(Value::Uint { bits: *bits, value })
            }
            ParamType::FixedBytes(size) => {
                if *size == 0 || *size > WORD {
                    return Err(AbiError::InvalidSize(format!("bytes{}", size)));
                }
                let word = layout::read_word(data, 0)?;
                Ok(Value::FixedBytes { size: *size, data: word[..*size].to_vec() })
            }
            ParamType::String => {
                let bytes = read_length_prefixed(ty, data, budget)?;
                String::from_utf8(bytes)
                    .map(Value::String)
                    .map_err(|e| AbiError::malformed(format!("Invalid UTF-8: {}", e)))
            }
            ParamType::Bytes => read_length_prefixed(ty, data, budget).map(Value::Bytes),
            ParamType::FixedArray(elem, count) => Ok(Value::FixedArray {
                elem: (**elem).clone(),
                items: layout::decode_repeated(elem, *count, data, budget)?,
            }),
            ParamType::Array(elem) => {
                let count = layout::read_usize(data, 0)?;
                Ok(Value::Array {
                    elem: (**elem).clone(),
                    items: layout::decode_repeated(elem, count, &data[WORD..], budget)?,
                })
            }
        }
    }

    /// Low 8 bytes of a numeric value
    pub fn to_uint64(&self) -> Option<u64> {
        self.as_uint().map(|value| value.low_u64())
    }

    /// Get the address, if this is an address
    pub fn as_address(&self) -> Option<Address> {
        match self {
            Value::Address(address) => Some(*address),
            _ => None,
        }
    }

    /// Get the boolean, if this is a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Get the integer, if this is a uint
    pub fn as_uint(&self) -> Option<U256> {
        match self {
            Value::Uint { value, .. } => Some(*value),
            _ => None,
        }
    }

    /// Raw payload of `bytes`, `bytesN` and `string` values
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::FixedBytes { data, .. } | Value::Bytes(data) => Some(data.as_slice()),
            Value::String(s) => Some(s.as_bytes()),
            _ => None,
        }
    }

    /// Get the text, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Elements of either array kind
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::FixedArray { items, .. } | Value::Array { items, .. } => Some(items.as_slice()),
            _ => None,
        }
    }
}

fn read_length_prefixed(
    ty: &ParamType,
    data: &[u8],
    budget: &mut DecodeBudget,
) -> Result<Vec<u8>, AbiError> {
    let len = layout::read_usize(data, 0)?;
    layout::check_length(data, WORD.saturating_add(len))?;
    budget.charge(len.div_ceil(WORD), ty)?;
    Ok(data[WORD..WORD + len].to_vec())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Address(address) => write!(f, "{}", to_checksum_address(address)),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Uint { value, .. } => write!(f, "{}", value),
            Value::FixedBytes { data, .. } | Value::Bytes(data) => write!(f, "{}", encode_hex(data)),
            Value::String(s) => write!(f, "{}", s),
            Value::FixedArray { items, .. } | Value::Array { items, .. } => {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0xde0B295669a9FD93d5F28D9Ec85E40f4cb697BAe";

    fn word_hex(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn test_address_encode_decode() {
        let addr = Value::parse("address", ADDR).unwrap();
        let encoded = addr.encode();
        assert_eq!(
            encoded,
            word_hex("000000000000000000000000de0b295669a9fd93d5f28d9ec85e40f4cb697bae")
        );

        let mut decoded = Value::zero(&ParamType::Address);
        decoded.decode(&encoded).unwrap();
        assert_eq!(decoded, addr);
        assert_eq!(decoded.to_string(), ADDR);
    }

    #[test]
    fn test_bool_encode_decode() {
        let t = Value::parse("bool", true).unwrap();
        assert_eq!(t.encode()[31], 1);
        assert!(t.encode()[..31].iter().all(|&b| b == 0));

        let mut decoded = Value::zero(&ParamType::Bool);
        decoded.decode(&t.encode()).unwrap();
        assert_eq!(decoded.as_bool(), Some(true));
    }

    #[test]
    fn test_bool_decode_rejects_other_bytes() {
        let mut word = [0u8; 32];
        word[31] = 0x10;
        let mut decoded = Value::zero(&ParamType::Bool);
        assert!(matches!(decoded.decode(&word), Err(AbiError::ValueShape(_))));
        // Unchanged on error
        assert_eq!(decoded, Value::Bool(false));
    }

    #[test]
    fn test_uint_encode_and_to_uint64() {
        let value = Value::parse("uint", "0x45").unwrap();
        assert_eq!(
            value.encode(),
            word_hex("0000000000000000000000000000000000000000000000000000000000000045")
        );
        assert_eq!(value.to_uint64(), Some(69));

        let from_word = Value::parse("uint256", value.encode()).unwrap();
        assert_eq!(from_word.to_uint64(), Some(69));
        assert_eq!(Value::Bool(true).to_uint64(), None);
    }

    #[test]
    fn test_validate_accepts_built_values() {
        for (sig, value) in [
            ("uint8", Value::parse("uint8", 255u64)),
            ("bytes4", Value::parse("bytes4", "ab")),
            ("string[2]", Value::parse("string[2]", vec!["a", "b"])),
            ("uint16[][]", Value::parse("uint16[][]", Input::List(vec![Input::from(vec![1u64])]))),
        ] {
            let value = value.unwrap();
            assert!(value.validate().is_ok(), "{}", sig);
        }
        assert!(Value::zero(&ParamType::parse("address[3]").unwrap()).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_inconsistent_fields() {
        let cases = [
            Value::FixedBytes { size: 4, data: vec![7; 40] },
            Value::Uint { bits: 8, value: U256::from(256) },
            Value::Array {
                elem: ParamType::Bool,
                items: vec![Value::Uint { bits: 8, value: U256::one() }],
            },
            Value::FixedArray {
                elem: ParamType::Array(Box::new(ParamType::Uint(8))),
                items: vec![Value::Array {
                    elem: ParamType::Uint(8),
                    items: vec![Value::Uint { bits: 8, value: U256::from(300) }],
                }],
            },
        ];
        for value in cases {
            assert!(
                matches!(value.validate(), Err(AbiError::ValueShape(_))),
                "{:?}",
                value
            );
        }

        assert!(matches!(
            Value::Uint { bits: 7, value: U256::one() }.validate(),
            Err(AbiError::InvalidSize(_))
        ));
        assert!(matches!(
            Value::FixedArray { elem: ParamType::Bool, items: Vec::new() }.validate(),
            Err(AbiError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_uint_to_uint64_truncates() {
        let big = U256::from(u64::MAX) + U256::from(2);
        let value = Value::parse("uint", big).unwrap();
        assert_eq!(value.to_uint64(), Some(1));
    }

    #[test]
    fn test_uint_decode_checks_width() {
        let mut word = [0u8; 32];
        word[30] = 1;
        assert!(Value::read(&ParamType::Uint(16), &word).is_ok());
        assert!(matches!(
            Value::read(&ParamType::Uint(8), &word),
            Err(AbiError::MalformedBuffer(_))
        ));
    }

    #[test]
    fn test_fixed_bytes_encode_decode() {
        let value = Value::parse("bytes10", "1234567890").unwrap();
        assert_eq!(
            value.encode(),
            word_hex("3132333435363738393000000000000000000000000000000000000000000000")
        );

        let mut decoded = Value::zero(&ParamType::FixedBytes(10));
        decoded.decode(&value.encode()).unwrap();
        assert_eq!(decoded.as_bytes(), Some(&b"1234567890"[..]));
    }

    #[test]
    fn test_string_and_bytes_share_layout() {
        let expected = word_hex(
            "000000000000000000000000000000000000000000000000000000000000000d\
             68656c6c6f2c20776f726c642100000000000000000000000000000000000000",
        );
        let s = Value::parse("string", "hello, world!").unwrap();
        let b = Value::parse("bytes", "hello, world!").unwrap();
        assert_eq!(s.encode(), expected);
        assert_eq!(b.encode(), expected);

        let mut decoded = Value::zero(&ParamType::String);
        decoded.decode(&expected).unwrap();
        assert_eq!(decoded.as_str(), Some("hello, world!"));

        let mut decoded = Value::zero(&ParamType::Bytes);
        decoded.decode(&expected).unwrap();
        assert_eq!(decoded.as_bytes(), Some(&b"hello, world!"[..]));
    }

    #[test]
    fn test_length_prefixed_decode_short_payload() {
        let mut data = vec![0u8; 40];
        data[31] = 13;
        assert!(matches!(
            Value::read(&ParamType::Bytes, &data),
            Err(AbiError::MalformedBuffer(_))
        ));
    }

    #[test]
    fn test_string_decode_invalid_utf8() {
        let data = layout::encode_length_prefixed(&[0xff, 0xfe]);
        assert!(matches!(
            Value::read(&ParamType::String, &data),
            Err(AbiError::MalformedBuffer(_))
        ));
    }

    #[test]
    fn test_static_array_has_no_length_word() {
        let array = Value::parse("address[2]", vec![ADDR, ADDR]).unwrap();
        let encoded = array.encode();
        assert_eq!(encoded.len(), 64);
        assert_eq!(encoded[..32], encoded[32..]);
        assert_eq!(array.head_size(), 64);
        assert_eq!(array.static_word_count(), 2);
        assert!(!array.is_dynamic());

        let decoded = Value::read(&array.param_type(), &encoded).unwrap();
        assert_eq!(decoded, array);
    }

    #[test]
    fn test_dynamic_array_has_count_word() {
        let array = Value::parse("address[]", vec![ADDR, ADDR]).unwrap();
        let encoded = array.encode();
        assert_eq!(
            encoded,
            word_hex(
                "0000000000000000000000000000000000000000000000000000000000000002\
                 000000000000000000000000de0b295669a9fd93d5f28d9ec85e40f4cb697bae\
                 000000000000000000000000de0b295669a9fd93d5f28d9ec85e40f4cb697bae"
            )
        );
        assert!(array.is_dynamic());

        let mut decoded = Value::zero(&array.param_type());
        decoded.decode(&encoded).unwrap();
        assert_eq!(decoded, array);
    }

    #[test]
    fn test_zero_values() {
        assert_eq!(Value::zero(&ParamType::Uint(8)).encode(), vec![0u8; 32]);
        let fixed = Value::zero(&ParamType::parse("bool[3]").unwrap());
        assert_eq!(fixed.as_array().map(|items| items.len()), Some(3));
        assert_eq!(fixed.encode(), vec![0u8; 96]);
        assert_eq!(Value::zero(&ParamType::String).encode(), vec![0u8; 32]);
    }

    #[test]
    fn test_param_type_roundtrip() {
        for sig in ["address", "bool", "uint64", "bytes4", "string", "bytes", "uint8[3]", "string[]"] {
            let ty = ParamType::parse(sig).unwrap();
            assert_eq!(Value::zero(&ty).param_type(), ty);
        }
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::parse("uint", 69u64).unwrap().to_string(), "69");
        assert_eq!(Value::parse("bool", false).unwrap().to_string(), "false");
        assert_eq!(Value::parse("bytes2", vec![0xabu8, 0xcd]).unwrap().to_string(), "0xabcd");
        assert_eq!(
            Value::parse("uint8[]", vec![1u64, 2, 3]).unwrap().to_string(),
            "[1, 2, 3]"
        );
    }
}
