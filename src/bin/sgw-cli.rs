//! # SportsGateway CLI
//!
//! Inspect client status and perform cached fetches from the command line.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use sgw_client::config::ClientConfig;
use sgw_client::logging::{init_structured_logging, LoggingConfig};
use sgw_client::{Query, SgwClient};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "sgw-cli")]
#[command(about = "Command-line interface for the SportsGateway API client")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: ./sgw-client.toml, then the user config dir)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print cache, HTTP and API status as JSON
    Status,
    /// Fetch a URI through the cache and print the response envelope
    Get {
        /// Path relative to the base URL, e.g. api/competitions
        uri: String,
        /// Query parameter as key=value (repeatable)
        #[arg(short, long = "query", value_name = "KEY=VALUE")]
        query: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ClientConfig::load_from(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ClientConfig::load()?,
    };

    let level = match cli.verbose {
        0 => None,
        1 => Some("info".to_string()),
        2 => Some("debug".to_string()),
        _ => Some("trace".to_string()),
    };
    init_structured_logging(&LoggingConfig {
        level: level.or_else(|| config.log_level.clone()).or(Some("warn".to_string())),
        log_dir: config.log_dir.clone(),
    });

    info!(base_url = ?config.base_url, "sgw-cli starting");
    let client = SgwClient::create(&config).await?;

    match cli.command {
        Commands::Status => {
            println!("{}", serde_json::to_string_pretty(&client.status())?);
        }
        Commands::Get { uri, query } => {
            let query = parse_query(&query)?;
            let envelope = client.get_cached(&uri, &query).await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
            if !envelope.success {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

/// `key=value` pairs; values that parse as JSON scalars keep their type
fn parse_query(pairs: &[String]) -> Result<Query> {
    pairs
        .iter()
        .map(|pair| {
            let (key, raw) = pair
                .split_once('=')
                .ok_or_else(|| anyhow!("query parameter '{pair}' is not in key=value form"))?;
            let value = match serde_json::from_str::<Value>(raw) {
                Ok(v @ (Value::Number(_) | Value::Bool(_))) => v,
                _ => Value::String(raw.to_string()),
            };
            Ok((key.to_string(), value))
        })
        .collect()
}
