use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;

use cetec_server::config::{load_dotenv, ServeArgs};
use cetec_server::db::{create_pool_with_options, PersonRepo};
use cetec_server::{run_server, tracing_setup, AppState};

#[tokio::main]
async fn main() -> ExitCode {
    let env_files = load_dotenv();
    let args = ServeArgs::parse();
    if let Err(e) = tracing_setup::init(args.debug) {
        eprintln!("Failed to initialize logging: {:#}", e);
        return ExitCode::FAILURE;
    }

    for path in &env_files {
        tracing::debug!("Loaded .env from {}", path.display());
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: ServeArgs) -> Result<()> {
    let database_url = args.database_url()?;

    // Unreachable store is fatal: no server without a pool.
    let pool = create_pool_with_options(&database_url, args.max_connections)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connection established");

    let state = AppState::new(PersonRepo::new(pool));
    run_server(state, args.server_config())
        .await
        .context("Server error")?;

    Ok(())
}
