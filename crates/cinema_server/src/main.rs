//! Cinema API server entry point.
//!
//! # Responsibility
//! - Load configuration, start logging, open the store.
//! - Serve HTTP until SIGINT/SIGTERM, then drain and close the store.

mod settings;

use anyhow::{Context, Result};
use cinema_core::{init_logging, open_db, open_db_in_memory, Store};
use log::{error, info};
use settings::ServerConfig;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("event=server_exit module=server status=error error={err:#}");
            eprintln!("cinema_server: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let config = ServerConfig::load().context("failed to load configuration")?;
    init_logging(&config.log_level, config.log_dir.as_deref())
        .map_err(anyhow::Error::msg)
        .context("failed to initialize logging")?;

    let conn = if config.uses_in_memory_database() {
        open_db_in_memory()
    } else {
        open_db(&config.database_path)
    }
    .with_context(|| format!("failed to open database `{}`", config.database_path))?;
    let store = Store::new(conn);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind `{}`", config.bind_addr))?;
    info!(
        "event=server_start module=server status=ok addr={} database={}",
        listener.local_addr()?,
        config.database_path
    );

    cinema_http::serve(listener, store.clone(), shutdown_signal())
        .await
        .context("server error")?;

    info!("event=server_stop module=server status=ok");
    store.close().context("failed to close database")?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=signal module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!("event=signal module=server status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("event=shutdown module=server status=start");
}
