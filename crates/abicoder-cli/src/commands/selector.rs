//! Selector command

use abicoder::{function_selector, ParamType};

use crate::output::{format_hex, Output};
use crate::{config::Config, CliError};

pub fn execute(signature: &str, config: &Config, json: bool) -> Result<(), CliError> {
    let canonical = canonical_signature(signature)?;
    let selector = format_hex(&function_selector(&canonical), config.hex_prefix);

    Output::new(json)
        .field("signature", &canonical)
        .field("selector", &selector)
        .message(&selector)
        .print();

    Ok(())
}

/// Rewrite `name(t1, t2)` with canonical type names, e.g. `uint` -> `uint256`
fn canonical_signature(signature: &str) -> Result<String, CliError> {
    let signature = signature.trim();
    let (name, rest) = signature
        .split_once('(')
        .ok_or_else(|| CliError::InvalidInput(format!("missing '(' in {}", signature)))?;
    let params = rest
        .strip_suffix(')')
        .ok_or_else(|| CliError::InvalidInput(format!("missing ')' in {}", signature)))?;

    let types = if params.trim().is_empty() {
        Vec::new()
    } else {
        params
            .split(',')
            .map(|ty| ParamType::parse(ty).map(|ty| ty.to_string()))
            .collect::<Result<Vec<_>, _>>()?
    };
    Ok(format!("{}({})", name.trim(), types.join(",")))
}
