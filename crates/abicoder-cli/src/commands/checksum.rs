//! Checksum command

use abicoder_crypto::{parse_checksummed, to_checksum_address};
use abicoder_primitives::Address;

use crate::{output::Output, CliError};

pub fn execute(input: &str, strict: bool, json: bool) -> Result<(), CliError> {
    let address = Address::from_hex(input)?;
    if strict {
        parse_checksummed(input)?;
    }
    let checksummed = to_checksum_address(&address);

    Output::new(json)
        .field("address", &checksummed)
        .field_bool("valid_checksum", parse_checksummed(input).is_ok())
        .message(&checksummed)
        .print();

    Ok(())
}
