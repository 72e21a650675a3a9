use std::sync::Arc;

use anyhow::Result;
use apim_agent::server;
use apim_agent::utils::config_loader;
use apim_agent::utils::logging;
use apim_agent::utils::logging::LogLevel;
use clap::Parser;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "apim-agent.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
    /// overrides settings.server.port
    #[arg(short, long, env = "PORT")]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Read args / env
    // -------------------------------

    let args = Args::parse();

    // -------------------------------
    // 2. Load YAML config
    // -------------------------------

    let mut service_config = config_loader::run(&args.config).await?;
    if let Some(port) = args.port {
        service_config.settings.server.port = port.to_string();
    }
    logging::run(&service_config, args.log_level);

    info!(
        "config loaded: user '{}', registration endpoint {}, {} scopes, fan-out {}",
        service_config.credentials.username,
        service_config.endpoints.client_registration,
        service_config.scopes.len(),
        service_config.settings.fan_out.max_concurrency
    );

    // -------------------------------
    // 3. Start http server
    // -------------------------------

    info!("Service starting...");
    server::server::start(Arc::new(service_config)).await?;

    Ok(())
}
