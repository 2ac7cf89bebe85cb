//! doit tag provider entry point.
//!
//! This binary is the composition root for the plugin. Responsibilities:
//!
//! 1. **Parse configuration** — command-line flags (see [`config::CliConfig`]);
//!    the host normally passes none, so defaults apply.
//! 2. **Wire observability** — configure `tracing-subscriber` to write to
//!    stderr. Stdout carries nothing but JSON-RPC responses.
//! 3. **Construct infrastructure** — build the shared
//!    [`digitalocean::DigitalOceanConnector`] and wrap it in a
//!    [`plugin::TagPlugin`].
//! 4. **Serve** — answer JSON-RPC calls from the host on stdin/stdout until
//!    the host closes stdin.

mod config;
mod rpc;

use std::io::{self, BufWriter};

use anyhow::Context;
use clap::Parser;
use digitalocean::DigitalOceanConnector;
use plugin::TagPlugin;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::{CliConfig, LogFormat};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    init_tracing(config.log_format);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    let connector = DigitalOceanConnector::new(config.client_config())
        .context("failed to configure provider client")?;
    let plugin = TagPlugin::new(connector);

    info!(
        service = rpc::SERVICE_NAME,
        api_url = %config.api_url,
        timeout_secs = config.timeout_secs,
        "serving tag provider"
    );

    let stdin = io::stdin().lock();
    let stdout = BufWriter::new(io::stdout().lock());
    rpc::serve(stdin, stdout, |method, args| {
        runtime.block_on(plugin.call(method, args))
    })
    .context("JSON-RPC server failed")?;

    info!("host closed the connection");
    Ok(())
}

/// Logs go to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match format {
        LogFormat::Text => builder.compact().init(),
        LogFormat::Json => builder.json().init(),
    }
}
