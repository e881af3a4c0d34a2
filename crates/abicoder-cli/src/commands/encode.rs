//! Encode command

use abicoder::{Encoder, Input, ParamType, Value};
use abicoder_primitives::decode_hex;
use clap::Args;

use crate::output::{format_hex, Output};
use crate::{config::Config, CliError};

/// Arguments of `abicoder encode`
#[derive(Debug, Args)]
pub struct EncodeArgs {
    /// Function name, used for the signature and selector
    #[arg(long)]
    function: Option<String>,

    /// Prefix the output with the function selector
    #[arg(long, requires = "function")]
    call: bool,

    /// Parameter as NAME:TYPE:VALUE; array values are JSON arrays
    #[arg(long = "param", value_name = "NAME:TYPE:VALUE")]
    params: Vec<String>,
}

impl EncodeArgs {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let mut encoder = match &self.function {
            Some(name) => Encoder::for_function(name.as_str()),
            None => Encoder::new(),
        };

        for raw in &self.params {
            let (name, signature, text) = split_param(raw)?;
            let ty = ParamType::parse(signature)?;
            let value = Value::from_input(&ty, parse_input(&ty, text)?)?;
            tracing::debug!("param {}: {} = {}", name, ty, value);
            encoder.add_value(name, value)?;
        }

        let data = if self.call {
            encoder.encode_call()
        } else {
            encoder.encode()
        };
        let hex = format_hex(&data, config.hex_prefix);

        let mut output = Output::new(json).field("data", &hex);
        if self.function.is_some() {
            output = output
                .field("signature", &encoder.signature())
                .field("selector", &format_hex(&encoder.selector(), config.hex_prefix));
        }
        output.message(&hex).print();

        Ok(())
    }
}

/// Split `name:type:value`; the value may itself contain colons
fn split_param(raw: &str) -> Result<(&str, &str, &str), CliError> {
    let mut parts = raw.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(name), Some(ty), Some(value)) if !ty.trim().is_empty() => {
            Ok((name.trim(), ty.trim(), value))
        }
        _ => Err(CliError::InvalidInput(format!(
            "expected NAME:TYPE:VALUE, got {:?}",
            raw
        ))),
    }
}

/// Turn command-line text into an [`Input`] for `ty`.
///
/// Arrays take a JSON array whose elements are parsed recursively; `bytes`
/// and `bytesN` values starting with `0x` are hex, anything else is text.
pub(crate) fn parse_input(ty: &ParamType, text: &str) -> Result<Input, CliError> {
    match ty {
        ParamType::Array(elem) | ParamType::FixedArray(elem, _) => {
            let items: Vec<serde_json::Value> = serde_json::from_str(text)?;
            items
                .iter()
                .map(|item| parse_input(elem, &json_item_text(item)))
                .collect::<Result<Vec<_>, _>>()
                .map(Input::List)
        }
        ParamType::Bytes | ParamType::FixedBytes(_)
            if text.starts_with("0x") || text.starts_with("0X") =>
        {
            decode_hex(text)
                .map(Input::Bytes)
                .map_err(|e| CliError::InvalidHex(format!("{}: {}", text, e)))
        }
        _ => Ok(Input::from(text)),
    }
}

fn json_item_text(item: &serde_json::Value) -> String {
    match item {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_param() {
        assert_eq!(split_param("a:uint256:5").unwrap(), ("a", "uint256", "5"));
        assert_eq!(
            split_param("memo:string:a:b").unwrap(),
            ("memo", "string", "a:b")
        );
        assert_eq!(split_param(":bool:true").unwrap(), ("", "bool", "true"));
        assert!(split_param("a:uint256").is_err());
        assert!(split_param("a::5").is_err());
    }

    #[test]
    fn test_parse_input_scalars() {
        assert_eq!(
            parse_input(&ParamType::Uint(256), "69").unwrap(),
            Input::Text("69".to_string())
        );
        assert_eq!(
            parse_input(&ParamType::Bytes, "0x0102").unwrap(),
            Input::Bytes(vec![1, 2])
        );
        assert_eq!(
            parse_input(&ParamType::FixedBytes(10), "1234567890").unwrap(),
            Input::Text("1234567890".to_string())
        );
        assert!(matches!(
            parse_input(&ParamType::Bytes, "0xzz"),
            Err(CliError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_parse_input_arrays() {
        let ty = ParamType::parse("uint8[][]").unwrap();
        let input = parse_input(&ty, "[[1, 2], [\"0x3\"]]").unwrap();
        assert_eq!(
            input,
            Input::List(vec![
                Input::List(vec![Input::from("1"), Input::from("2")]),
                Input::List(vec![Input::from("0x3")]),
            ])
        );

        let ty = ParamType::parse("bool[2]").unwrap();
        let value = Value::from_input(&ty, parse_input(&ty, "[true, false]").unwrap()).unwrap();
        assert_eq!(value.as_array().map(|items| items.len()), Some(2));
    }

    #[test]
    fn test_parse_input_rejects_non_json_array() {
        let ty = ParamType::parse("address[]").unwrap();
        assert!(matches!(parse_input(&ty, "0x1234"), Err(CliError::Json(_))));
    }
}
