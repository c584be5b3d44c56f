//! brine-server
//!
//! Thin binary over brine-core: CLI flags, logging init, HTTP routes, and
//! signal-driven graceful shutdown. All real invariants live in the core.

use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use brine_core::{HashStore, JobStore, StoreConfig};

mod server;

/// Asynchronous password hashing service.
#[derive(Debug, Parser)]
#[command(name = "brine-server", version, about)]
struct Args {
    /// FQDN or IP address on which the server will listen.
    #[arg(long, default_value = "localhost")]
    address: String,

    /// Port number on which the server will listen.
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let store = HashStore::new(StoreConfig::default());
    let shutdown_timeout = store.config().shutdown_timeout;
    let app = server::router(store.clone());

    let listen_addr = format!("{}:{}", args.address, args.port);
    let listener = match TcpListener::bind(&listen_addr).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(%listen_addr, error = %e, "failed to bind");
            std::process::exit(1);
        }
    };
    info!(%listen_addr, "listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "server error");
        std::process::exit(1);
    }

    // stop intake, then wait for in-flight hashes
    match store.shutdown(shutdown_timeout).await {
        Ok(()) => info!("shut down gracefully"),
        Err(e) => {
            // forced drain is an abnormal termination, not a clean stop
            error!(error = %e, "abnormal termination");
            std::process::exit(1);
        }
    }
}

/// Resolves when SIGINT or SIGTERM arrives.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install SIGINT handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
