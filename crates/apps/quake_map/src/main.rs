use std::process::ExitCode;

use clap::Parser;
use quake_map::AppError;
use quake_map::config::{Args, RunConfig};
use quake_map::feeds::HttpFeedClient;
use quake_map::pipeline::{run, write_fallback};
use tracing::error;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = RunConfig::from(Args::parse());

    let client = match HttpFeedClient::new() {
        Ok(client) => client,
        Err(err) => {
            let err = AppError::from(err);
            write_fallback(&config, None, &err).await;
            error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    match run(&client, &config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
