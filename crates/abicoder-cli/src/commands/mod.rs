//! CLI command implementations

pub mod checksum;
pub mod decode;
pub mod encode;
pub mod selector;
