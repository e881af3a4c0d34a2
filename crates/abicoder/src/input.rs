//! Value ingestion
//!
//! Callers hand values over in whatever form they have (hex text, raw bytes,
//! native integers, bools, lists); [`Input`] carries that form and
//! [`ingest`] normalizes it into a canonical [`Value`] for a declared
//! [`ParamType`]. The layout engine only ever sees canonical values.

use abicoder_primitives::{decode_hex, strip_hex_prefix, Address, U256, WORD};

use crate::{AbiError, ParamType, Value};

/// A source value before it is checked against a declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Text: hex or decimal for numbers, hex for addresses, payload for strings and bytes
    Text(String),
    /// Raw bytes
    Bytes(Vec<u8>),
    /// Native unsigned integer
    Uint(U256),
    /// Native boolean
    Bool(bool),
    /// Parsed address
    Address(Address),
    /// Ordered elements of an array
    List(Vec<Input>),
}

impl Input {
    /// Short name of the representation, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Input::Text(_) => "text",
            Input::Bytes(_) => "bytes",
            Input::Uint(_) => "integer",
            Input::Bool(_) => "boolean",
            Input::Address(_) => "address",
            Input::List(_) => "list",
        }
    }
}

impl From<&str> for Input {
    fn from(s: &str) -> Self {
        Input::Text(s.to_string())
    }
}

impl From<String> for Input {
    fn from(s: String) -> Self {
        Input::Text(s)
    }
}

impl From<&String> for Input {
    fn from(s: &String) -> Self {
        Input::Text(s.clone())
    }
}

impl From<Vec<u8>> for Input {
    fn from(bytes: Vec<u8>) -> Self {
        Input::Bytes(bytes)
    }
}

impl From<&[u8]> for Input {
    fn from(bytes: &[u8]) -> Self {
        Input::Bytes(bytes.to_vec())
    }
}

impl From<U256> for Input {
    fn from(value: U256) -> Self {
        Input::Uint(value)
    }
}

impl From<bool> for Input {
    fn from(value: bool) -> Self {
        Input::Bool(value)
    }
}

impl From<Address> for Input {
    fn from(address: Address) -> Self {
        Input::Address(address)
    }
}

impl From<Vec<Input>> for Input {
    fn from(items: Vec<Input>) -> Self {
        Input::List(items)
    }
}

macro_rules! impl_from_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Input {
                fn from(value: $t) -> Self {
                    Input::Uint(U256::from(value))
                }
            }
        )*
    };
}

impl_from_uint!(u8, u16, u32, u64, u128, usize);

macro_rules! impl_from_list {
    ($($t:ty),*) => {
        $(
            impl From<Vec<$t>> for Input {
                fn from(items: Vec<$t>) -> Self {
                    Input::List(items.into_iter().map(Input::from).collect())
                }
            }

            impl From<&[$t]> for Input {
                fn from(items: &[$t]) -> Self {
                    Input::List(items.iter().cloned().map(Input::from).collect())
                }
            }
        )*
    };
}

impl_from_list!(&str, String, Vec<u8>, U256, u64, bool, Address);

/// Normalize `input` into a canonical value of type `ty`
pub(crate) fn ingest(ty: &ParamType, input: Input) -> Result<Value, AbiError> {
    match ty {
        ParamType::Address => to_address(input).map(Value::Address),
        ParamType::Bool => to_bool(input).map(Value::Bool),
        ParamType::Uint(bits) => {
            let value = to_uint(input)?;
            check_width(&value, *bits)?;
            Ok(Value::Uint { bits: *bits, value })
        }
        ParamType::FixedBytes(size) => {
            let mut data = to_raw_bytes(ty, input)?;
            if data.len() > *size {
                return Err(AbiError::shape(format!(
                    "{} holds at most {} bytes, got {}",
                    ty,
                    size,
                    data.len()
                )));
            }
            data.resize(*size, 0);
            Ok(Value::FixedBytes { size: *size, data })
        }
        ParamType::String => match input {
            Input::Text(s) => Ok(Value::String(s)),
            Input::Bytes(bytes) => String::from_utf8(bytes)
                .map(Value::String)
                .map_err(|e| AbiError::shape(format!("string is not valid UTF-8: {}", e))),
            other => Err(mismatch(ty, &other)),
        },
        ParamType::Bytes => to_raw_bytes(ty, input).map(Value::Bytes),
        ParamType::FixedArray(elem, count) => {
            let items = to_list(ty, input)?;
            if items.len() != *count {
                return Err(AbiError::shape(format!(
                    "{} needs exactly {} elements, got {}",
                    ty,
                    count,
                    items.len()
                )));
            }
            Ok(Value::FixedArray {
                elem: (**elem).clone(),
                items: ingest_all(elem, items)?,
            })
        }
        ParamType::Array(elem) => {
            let items = to_list(ty, input)?;
            Ok(Value::Array {
                elem: (**elem).clone(),
                items: ingest_all(elem, items)?,
            })
        }
    }
}

fn ingest_all(elem: &ParamType, items: Vec<Input>) -> Result<Vec<Value>, AbiError> {
    items.into_iter().map(|item| ingest(elem, item)).collect()
}

fn mismatch(ty: &ParamType, input: &Input) -> AbiError {
    AbiError::shape(format!("cannot build {} from {}", ty, input.kind()))
}

fn to_address(input: Input) -> Result<Address, AbiError> {
    match input {
        Input::Address(address) => Ok(address),
        Input::Text(s) => Address::from_hex(&s).map_err(|e| AbiError::shape(e.to_string())),
        Input::Bytes(bytes) => Address::from_slice(&bytes).map_err(|e| AbiError::shape(e.to_string())),
        other => Err(mismatch(&ParamType::Address, &other)),
    }
}

fn to_bool(input: Input) -> Result<bool, AbiError> {
    let rendered = match &input {
        Input::Bool(b) => return Ok(*b),
        Input::Text(s) if s.trim().eq_ignore_ascii_case("true") => return Ok(true),
        Input::Text(s) if s.trim().eq_ignore_ascii_case("false") => return Ok(false),
        Input::Text(s) => s.trim().to_string(),
        Input::Bytes(bytes) => format!("0x{}", hex::encode(bytes)),
        Input::Uint(value) => value.to_string(),
        other => return Err(mismatch(&ParamType::Bool, other)),
    };

    let value = to_uint(input)?;
    if value.is_zero() {
        Ok(false)
    } else if value == U256::one() {
        Ok(true)
    } else {
        Err(AbiError::shape(format!(
            "boolean value must be 0 or 1, got {}",
            rendered
        )))
    }
}

fn to_uint(input: Input) -> Result<U256, AbiError> {
    match input {
        Input::Uint(value) => Ok(value),
        Input::Text(s) => {
            let s = s.trim();
            if s.starts_with("0x") || s.starts_with("0X") {
                if strip_hex_prefix(s).is_empty() {
                    return Err(AbiError::shape("empty hex integer"));
                }
                let bytes = decode_hex(s)
                    .map_err(|e| AbiError::shape(format!("invalid hex integer {}: {}", s, e)))?;
                uint_from_be(&bytes)
            } else {
                U256::from_dec_str(s)
                    .map_err(|e| AbiError::shape(format!("invalid integer {}: {:?}", s, e)))
            }
        }
        Input::Bytes(bytes) => uint_from_be(&bytes),
        other => Err(AbiError::shape(format!("cannot build an integer from {}", other.kind()))),
    }
}

/// Big-endian bytes to U256, ignoring leading zero bytes
fn uint_from_be(bytes: &[u8]) -> Result<U256, AbiError> {
    let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
    let significant = &bytes[start..];
    if significant.len() > WORD {
        return Err(AbiError::shape(format!(
            "integer needs {} bytes, at most 32 fit in a word",
            significant.len()
        )));
    }
    Ok(U256::from_big_endian(significant))
}

fn check_width(value: &U256, bits: usize) -> Result<(), AbiError> {
    if value.bits() > bits {
        return Err(AbiError::shape(format!(
            "value {} does not fit in uint{}",
            value, bits
        )));
    }
    Ok(())
}

fn to_raw_bytes(ty: &ParamType, input: Input) -> Result<Vec<u8>, AbiError> {
    match input {
        Input::Bytes(bytes) => Ok(bytes),
        Input::Text(s) => Ok(s.into_bytes()),
        other => Err(mismatch(ty, &other)),
    }
}

fn to_list(ty: &ParamType, input: Input) -> Result<Vec<Input>, AbiError> {
    match input {
        Input::List(items) => Ok(items),
        other => Err(mismatch(ty, &other)),
    }
}
