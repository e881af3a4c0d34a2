//! Output formatting

use abicoder::Value as AbiValue;
use abicoder_crypto::to_checksum_address;
use abicoder_primitives::encode_hex;
use serde_json::{json, Map, Value};

/// Output builder for formatted CLI output
pub struct Output {
    json_mode: bool,
    fields: Map<String, Value>,
    message: Option<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: Map::new(),
            message: None,
        }
    }

    /// Add a string field to the output
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a boolean field to the output
    pub fn field_bool(mut self, key: &str, value: bool) -> Self {
        self.fields.insert(key.to_string(), Value::Bool(value));
        self
    }

    /// Add a JSON value field to the output
    pub fn field_value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Set the human-readable message
    pub fn message(mut self, msg: &str) -> Self {
        self.message = Some(msg.to_string());
        self
    }

    /// Print the output
    pub fn print(self) {
        if self.json_mode {
            let json = json!(self.fields);
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        } else if let Some(msg) = self.message {
            println!("{}", msg);
        }
    }
}

/// Render bytes as hex, with or without the 0x prefix
pub fn format_hex(data: &[u8], prefix: bool) -> String {
    if prefix {
        encode_hex(data)
    } else {
        hex::encode(data)
    }
}

/// JSON form of a decoded value.
///
/// Integers are strings so uint256 survives JSON number limits.
pub fn value_to_json(value: &AbiValue, hex_prefix: bool) -> Value {
    match value {
        AbiValue::Address(address) => Value::String(to_checksum_address(address)),
        AbiValue::Bool(b) => Value::Bool(*b),
        AbiValue::Uint { value, .. } => Value::String(value.to_string()),
        AbiValue::FixedBytes { data, .. } | AbiValue::Bytes(data) => {
            Value::String(format_hex(data, hex_prefix))
        }
        AbiValue::String(s) => Value::String(s.clone()),
        AbiValue::FixedArray { items, .. } | AbiValue::Array { items, .. } => Value::Array(
            items.iter().map(|item| value_to_json(item, hex_prefix)).collect(),
        ),
    }
}
