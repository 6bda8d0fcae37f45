use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::Value;
use sunlight_client::config::loader;
use sunlight_client::utils::logging::{self, LogLevel};
use sunlight_client::{Operation, SunlightClient};
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "SUNLIGHT_CONFIG", default_value = "sunlight.yaml")]
    config: PathBuf,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// Operation to run
    #[arg(value_enum)]
    operation: Operation,
    /// JSON params file, `-` for stdin
    #[arg(short, long, default_value = "-")]
    params: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // -------------------------------
    // 1. Load YAML config, init logging
    // -------------------------------

    let config = loader::file_to_config(&args.config).await?;
    logging::run(&config, args.log_level)?;

    // -------------------------------
    // 2. Configure client
    // -------------------------------

    let client = SunlightClient::new();
    client.update_config(config.client.clone()).await;

    // -------------------------------
    // 3. Run operation
    // -------------------------------

    let params = read_params(&args.params).await?;
    info!(operation = ?args.operation, "running operation");
    let result = client
        .call(args.operation, &params)
        .await
        .with_context(|| format!("{:?} failed", args.operation))?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn read_params(source: &str) -> Result<Value> {
    let raw = if source == "-" {
        let mut raw = String::new();
        tokio::io::stdin().read_to_string(&mut raw).await?;
        raw
    } else {
        tokio::fs::read_to_string(Path::new(source))
            .await
            .with_context(|| format!("cannot read params file '{}'", source))?
    };
    serde_json::from_str(&raw).context("params must be a JSON object")
}
