//! # abicoder-cli
//!
//! Command-line interface for Solidity ABI encoding and decoding.
//!
//! ## Usage
//!
//! ```bash
//! # Encode a parameter list
//! abicoder encode --param amount:uint256:1000 --param memo:string:hello
//!
//! # Encode a function call (selector + params)
//! abicoder encode --function transfer --call \
//!     --param to:address:0xde0B295669a9FD93d5F28D9Ec85E40f4cb697BAe \
//!     --param amount:uint256:1000
//!
//! # Decode a buffer
//! abicoder decode --param amount:uint256 --param memo:string --data 0x...
//!
//! # Utilities
//! abicoder selector "transfer(address,uint256)"
//! abicoder checksum 0xde0b295669a9fd93d5f28d9ec85e40f4cb697bae
//! abicoder config --show
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Solidity ABI encoder/decoder
#[derive(Parser, Debug)]
#[command(name = "abicoder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Config file (default: ~/.abicoder/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "abicoder=trace" (RUST_LOG wins)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Encode a parameter list or function call
    Encode(commands::encode::EncodeArgs),
    /// Decode a buffer against parameter declarations
    Decode(commands::decode::DecodeArgs),
    /// Compute the 4-byte selector of a function signature
    Selector {
        /// Function signature, e.g. "transfer(address,uint256)"
        signature: String,
    },
    /// Print the EIP-55 checksummed form of an address
    Checksum {
        /// Address as hex
        address: String,
        /// Fail if a mixed-case address has a wrong checksum
        #[arg(long)]
        strict: bool,
    },
    /// Show configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    let mut json = cli.json;

    let result = Config::load(cli.config.as_deref()).and_then(|config| {
        json |= config.json;
        init_tracing(cli.log_level.as_deref().unwrap_or(&config.log_level));
        run(cli.command, &config, cli.config.as_deref(), json)
    });

    if let Err(e) = result {
        if json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // stdout carries command output
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(
    command: Commands,
    config: &Config,
    config_path: Option<&std::path::Path>,
    json: bool,
) -> Result<(), CliError> {
    match command {
        Commands::Encode(args) => args.execute(config, json),
        Commands::Decode(args) => args.execute(config, json),
        Commands::Selector { signature } => commands::selector::execute(&signature, config, json),
        Commands::Checksum { address, strict } => {
            commands::checksum::execute(&address, strict, json)
        }
        Commands::Config { show } => handle_config(config, config_path, show, json),
    }
}

fn handle_config(
    config: &Config,
    config_path: Option<&std::path::Path>,
    show: bool,
    json: bool,
) -> Result<(), CliError> {
    if !show {
        Output::new(json)
            .message("Use --show to display config")
            .print();
        return Ok(());
    }

    let path = config_path
        .map(PathBuf::from)
        .or_else(Config::config_path)
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "<none>".to_string());

    Output::new(json)
        .field("path", &path)
        .field("log_level", &config.log_level)
        .field_bool("json", config.json)
        .field_bool("hex_prefix", config.hex_prefix)
        .message(&format!(
            "Config: {}\nLog level: {}\nJSON output: {}\nHex prefix: {}",
            path, config.log_level, config.json, config.hex_prefix
        ))
        .print();

    Ok(())
}
