//! Parameter list encoding

use abicoder_crypto::keccak256;

use crate::input::Input;
use crate::layout;
use crate::{AbiError, ParamType, Value};

/// Accumulates named, typed parameters and lays them out as one buffer.
///
/// Names are carried for the caller's benefit only; the layout is purely
/// positional.
#[derive(Debug, Clone, Default)]
pub struct Encoder {
    function: Option<String>,
    names: Vec<String>,
    values: Vec<Value>,
}

impl Encoder {
    /// Create an encoder for an anonymous parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an encoder for the arguments of function `name`
    pub fn for_function(name: impl Into<String>) -> Self {
        Self {
            function: Some(name.into()),
            ..Self::default()
        }
    }

    /// Function name, if any
    pub fn function(&self) -> Option<&str> {
        self.function.as_deref()
    }

    /// Parse `signature`, build a value from `value` and append it.
    ///
    /// Nothing is encoded yet. On error the parameter list is unchanged.
    pub fn add_inputs(
        &mut self,
        name: impl Into<String>,
        signature: &str,
        value: impl Into<Input>,
    ) -> Result<&mut Self, AbiError> {
        let value = Value::parse(signature, value)?;
        self.add_value(name, value)
    }

    /// Append an already-built value after checking it with
    /// [`Value::validate`]
    pub fn add_value(&mut self, name: impl Into<String>, value: Value) -> Result<&mut Self, AbiError> {
        value.validate()?;
        self.names.push(name.into());
        self.values.push(value);
        Ok(self)
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if no parameters were added
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Parameters in declaration order
    pub fn params(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.names.iter().map(String::as_str).zip(self.values.iter())
    }

    /// Parameter types in declaration order
    pub fn types(&self) -> Vec<ParamType> {
        self.values.iter().map(Value::param_type).collect()
    }

    /// Canonical signature, e.g. `transfer(address,uint256)`
    pub fn signature(&self) -> String {
        signature_of(self.function(), &self.types())
    }

    /// First 4 bytes of keccak256 of [`Encoder::signature`]
    pub fn selector(&self) -> [u8; 4] {
        function_selector(&self.signature())
    }

    /// Encode the parameter list (head region ++ tail region)
    pub fn encode(&self) -> Vec<u8> {
        let encoded = layout::encode_sequence(&self.values);
        tracing::debug!(
            "Encoded {} parameters into {} bytes",
            self.values.len(),
            encoded.len()
        );
        encoded
    }

    /// Encode function call (selector + params)
    pub fn encode_call(&self) -> Vec<u8> {
        let mut result = self.selector().to_vec();
        result.extend(self.encode());
        result
    }
}

pub(crate) fn signature_of(function: Option<&str>, types: &[ParamType]) -> String {
    let types: Vec<String> = types.iter().map(ParamType::to_string).collect();
    format!("{}({})", function.unwrap_or_default(), types.join(","))
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash.as_bytes()[..4]);
    selector
}
