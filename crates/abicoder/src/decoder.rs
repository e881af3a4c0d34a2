//! Parameter list decoding

use std::ops::Index;

use crate::encoder::{function_selector, signature_of};
use crate::layout;
use crate::{AbiError, ParamType, Value};

/// Accumulates named parameter declarations and decodes buffers against them
#[derive(Debug, Clone, Default)]
pub struct Decoder {
    function: Option<String>,
    names: Vec<String>,
    types: Vec<ParamType>,
}

impl Decoder {
    /// Create a decoder for an anonymous parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder for the arguments of function `name`
    pub fn for_function(name: impl Into<String>) -> Self {
        Self {
            function: Some(name.into()),
            ..Self::default()
        }
    }

    /// Parse `signature` and append a declaration
    pub fn add_params(&mut self, name: impl Into<String>, signature: &str) -> Result<&mut Self, AbiError> {
        let ty = ParamType::parse(signature)?;
        Ok(self.add_type(name, ty))
    }

    /// Append an already-parsed declaration
    pub fn add_type(&mut self, name: impl Into<String>, ty: ParamType) -> &mut Self {
        self.names.push(name.into());
        self.types.push(ty);
        self
    }

    /// Declared types in order
    pub fn types(&self) -> &[ParamType] {
        &self.types
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        signature_of(self.function.as_deref(), &self.types)
    }

    /// Decode a parameter buffer (no selector)
    pub fn decode(&self, data: &[u8]) -> Result<DecodedParams, AbiError> {
        tracing::debug!(
            "Decoding {} parameters from {} bytes",
            self.types.len(),
            data.len()
        );
        let values = layout::decode_sequence(&self.types, data)?;
        Ok(DecodedParams {
            entries: self.names.iter().cloned().zip(values).collect(),
        })
    }

    /// Decode call data: a 4-byte selector followed by the parameters.
    ///
    /// The selector is checked against [`Decoder::signature`] when the
    /// decoder was created with [`Decoder::for_function`].
    pub fn decode_call(&self, data: &[u8]) -> Result<DecodedParams, AbiError> {
        layout::check_length(data, 4)?;
        let (selector, params) = data.split_at(4);

        if self.function.is_some() {
            let expected = function_selector(&self.signature());
            if selector != expected {
                return Err(AbiError::malformed(format!(
                    "selector mismatch for {}: expected 0x{}, got 0x{}",
                    self.signature(),
                    hex::encode(expected),
                    hex::encode(selector)
                )));
            }
        }
        self.decode(params)
    }
}

/// Decoded parameters in declaration order, addressable by name or position
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecodedParams {
    entries: Vec<(String, Value)>,
}

impl DecodedParams {
    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Value of the first parameter called `name`
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Value at position `index`
    pub fn get_index(&self, index: usize) -> Option<&Value> {
        self.entries.get(index).map(|(_, value)| value)
    }

    /// (name, value) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Drop the names, keeping the values in order
    pub fn into_values(self) -> Vec<Value> {
        self.entries.into_iter().map(|(_, value)| value).collect()
    }
}

impl Index<usize> for DecodedParams {
    type Output = Value;

    fn index(&self, index: usize) -> &Self::Output {
        &self.entries[index].1
    }
}

impl IntoIterator for DecodedParams {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
