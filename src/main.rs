//! fetch-gateway - SSRF-hardened fetch service
//!
//! Loads configuration, installs logging and serves `POST /` and `GET /`.

use clap::Parser;
use fetch_gateway::config::{Config, ResponseFormat};
use fetch_gateway::server;
use fetch_gateway::utils::logging::init_logging;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "gateway", version, about = "SSRF-hardened fetch gateway")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "FETCH_GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Listening port (overrides PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Response profile (overrides RESPONSE_FORMAT)
    #[arg(long, value_enum)]
    response_format: Option<ResponseFormat>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(host) = &self.host {
            config.gateway.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.gateway.server.port = port;
        }
        if let Some(format) = self.response_format {
            config.gateway.api.response_format = format;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let mut config = match Config::load(cli.config.as_deref()).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    cli.apply(&mut config);

    if let Err(e) = config.validate().and_then(|_| init_logging(config.logging())) {
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }

    match server::run_server(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
