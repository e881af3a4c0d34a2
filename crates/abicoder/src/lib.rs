//! # abicoder
//!
//! Solidity ABI parameter encoding and decoding.
//!
//! ## Features
//!
//! - **ParamType**: type signatures such as `uint256`, `bytes10`, `address[2]`, `string[]`
//! - **Value**: typed values with per-variant word encoding
//! - **Encoder**: collects named parameters and lays them out head/tail
//! - **Decoder**: declares named parameters and decodes a buffer against them
//!
//! ## Quick Start
//!
//! ```rust
//! use abicoder::{Decoder, Encoder, Value};
//!
//! let mut encoder = Encoder::new();
//! encoder
//!     .add_inputs("owner", "address", "0xde0B295669a9FD93d5F28D9Ec85E40f4cb697BAe")?
//!     .add_inputs("amount", "uint256", 1000u64)?
//!     .add_inputs("memo", "string", "hello")?;
//! let data = encoder.encode();
//! assert_eq!(data.len(), 5 * 32);
//!
//! let mut decoder = Decoder::new();
//! decoder
//!     .add_params("owner", "address")?
//!     .add_params("amount", "uint256")?
//!     .add_params("memo", "string")?;
//! let decoded = decoder.decode(&data)?;
//! assert_eq!(decoded.get("amount").and_then(Value::to_uint64), Some(1000));
//! assert_eq!(decoded.get("memo").and_then(Value::as_str), Some("hello"));
//! # Ok::<(), abicoder::AbiError>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decoder;
mod encoder;
mod error;
mod input;
pub mod layout;
mod param_type;
mod value;

pub use decoder::{DecodedParams, Decoder};
pub use encoder::{function_selector, Encoder};
pub use error::AbiError;
pub use input::Input;
pub use param_type::{ParamType, MAX_FIXED_BYTES};
pub use value::Value;

pub use abicoder_primitives::{Address, U256, WORD};

/// Encode `(type signature, value)` pairs as one parameter list
///
/// ```rust
/// use abicoder::Input;
///
/// let data = abicoder::encode([
///     ("uint8", Input::from(69u64)),
///     ("bool", Input::from(true)),
/// ])?;
/// assert_eq!(data[31], 0x45);
/// assert_eq!(data[63], 1);
/// # Ok::<(), abicoder::AbiError>(())
/// ```
pub fn encode<'a, I, V>(params: I) -> Result<Vec<u8>, AbiError>
where
    I: IntoIterator<Item = (&'a str, V)>,
    V: Into<Input>,
{
    let values = params
        .into_iter()
        .map(|(signature, value)| Value::parse(signature, value))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(layout::encode_sequence(&values))
}

/// Decode a parameter list against type signatures
pub fn decode(types: &[&str], data: &[u8]) -> Result<Vec<Value>, AbiError> {
    let types = types
        .iter()
        .map(|signature| ParamType::parse(signature))
        .collect::<Result<Vec<_>, _>>()?;
    layout::decode_sequence(&types, data)
}
