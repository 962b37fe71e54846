//! Euclid API stub server.
//!
//! Serves `GET /api/*` with a static JSON payload for the canvas front end.
//! `RUST_LOG` controls verbosity; `--addr` or `EUCLID_ADDR` picks the socket.

use euclid_api::{ServerConfig, router};

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("euclid-api error: {e}");
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(config.addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("euclid-api error: failed to bind {}: {e}", config.addr);
            std::process::exit(1);
        }
    };

    log::info!("euclid-api listening on http://{}", config.addr);

    if let Err(e) = axum::serve(listener, router()).await {
        eprintln!("euclid-api error: {e}");
        std::process::exit(1);
    }
}
