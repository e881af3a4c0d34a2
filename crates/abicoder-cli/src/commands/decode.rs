//! Decode command

use std::collections::HashSet;

use abicoder::{DecodedParams, Decoder, ParamType};
use abicoder_primitives::decode_hex;
use clap::Args;

use crate::output::{value_to_json, Output};
use crate::{config::Config, CliError};

/// Arguments of `abicoder decode`
#[derive(Debug, Args)]
pub struct DecodeArgs {
    /// Function name, used to check the selector with --call
    #[arg(long)]
    function: Option<String>,

    /// Data starts with a 4-byte selector
    #[arg(long)]
    call: bool,

    /// Parameter declaration as NAME:TYPE
    #[arg(long = "param", value_name = "NAME:TYPE")]
    params: Vec<String>,

    /// Encoded data as hex
    #[arg(long)]
    data: String,
}

impl DecodeArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let mut decoder = match &self.function {
            Some(name) => Decoder::for_function(name.as_str()),
            None => Decoder::new(),
        };
        for raw in &self.params {
            let (name, ty) = raw.split_once(':').ok_or_else(|| {
                CliError::InvalidInput(format!("expected NAME:TYPE, got {:?}", raw))
            })?;
            decoder.add_type(name.trim(), ParamType::parse(ty)?);
        }

        let data = decode_hex(self.data.trim())
            .map_err(|e| CliError::InvalidHex(format!("--data: {}", e)))?;
        let decoded = if self.call {
            decoder.decode_call(&data)?
        } else {
            decoder.decode(&data)?
        };

        let mut output = Output::new(json);
        for (key, value) in json_fields(&decoded, config.hex_prefix) {
            output = output.field_value(&key, value);
        }
        let lines: Vec<String> = decoded
            .iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect();
        output.message(&lines.join("\n")).print();

        Ok(())
    }
}

/// JSON keys for the decoded parameters.
///
/// A name already taken by an earlier parameter becomes `name#index`, so
/// repeated names keep every value.
fn json_fields(decoded: &DecodedParams, hex_prefix: bool) -> Vec<(String, serde_json::Value)> {
    let mut seen = HashSet::new();
    let mut fields = Vec::with_capacity(decoded.len());
    for (index, (name, value)) in decoded.iter().enumerate() {
        let mut key = name.to_string();
        while seen.contains(&key) {
            key = format!("{}#{}", key, index);
        }
        seen.insert(key.clone());
        fields.push((key, value_to_json(value, hex_prefix)));
    }
    fields
}
