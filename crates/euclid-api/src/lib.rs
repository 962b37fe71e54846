//! Euclid API stub.
//!
//! Every `GET` under `/api` answers with the same static JSON body; anything
//! else is a bare 404. Split from the binary so tests can drive the router
//! in-process.

use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde::Serialize;
use std::net::SocketAddr;

pub const DEFAULT_ADDR: &str = "127.0.0.1:8787";
pub const ADDR_ENV: &str = "EUCLID_ADDR";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiInfo {
    pub name: &'static str,
}

pub const API_INFO: ApiInfo = ApiInfo { name: "Cloudflare" };

/// `/api`, `/api/` and everything below it.
pub fn is_api_path(path: &str) -> bool {
    path == "/api" || path.starts_with("/api/")
}

async fn handle(method: Method, uri: Uri) -> Response {
    let readable = method == Method::GET || method == Method::HEAD;
    if readable && is_api_path(uri.path()) {
        log::debug!("api: {method} {uri}");
        Json(API_INFO).into_response()
    } else {
        log::debug!("api: {method} {uri} → 404");
        StatusCode::NOT_FOUND.into_response()
    }
}

/// Build the stub's router. The path space is a single wildcard, so
/// everything goes through one handler.
pub fn router() -> Router {
    Router::new().fallback(handle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
}

impl ServerConfig {
    /// Resolve from the process arguments and environment.
    pub fn from_env() -> Result<Self, String> {
        Self::resolve(std::env::args().skip(1), std::env::var(ADDR_ENV).ok())
    }

    /// `--addr <host:port>` (or `--addr=<host:port>`) wins, then
    /// `env_addr`, then [`DEFAULT_ADDR`].
    pub fn resolve(args: impl IntoIterator<Item = String>, env_addr: Option<String>) -> Result<Self, String> {
        let mut from_args = None;
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            if arg == "--addr" {
                match args.next() {
                    Some(value) => from_args = Some(value),
                    None => return Err("--addr requires a value".to_string()),
                }
            } else if let Some(value) = arg.strip_prefix("--addr=") {
                from_args = Some(value.to_string());
            } else {
                return Err(format!("unexpected argument: {arg}"));
            }
        }

        let raw = from_args.or(env_addr).unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = raw
            .parse::<SocketAddr>()
            .map_err(|e| format!("invalid address {raw:?}: {e}"))?;
        Ok(Self { addr })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn api_path_prefix() {
        assert!(is_api_path("/api"));
        assert!(is_api_path("/api/"));
        assert!(is_api_path("/api/users/7"));
        assert!(!is_api_path("/apis"));
        assert!(!is_api_path("/v1/api"));
    }

    #[test]
    fn default_address() {
        let config = ServerConfig::resolve(args(&[]), None).unwrap();
        assert_eq!(config.addr.to_string(), DEFAULT_ADDR);
    }

    #[test]
    fn argument_beats_environment() {
        let env = Some("0.0.0.0:9000".to_string());
        let config = ServerConfig::resolve(args(&["--addr", "127.0.0.1:3000"]), env.clone()).unwrap();
        assert_eq!(config.addr.port(), 3000);

        let config = ServerConfig::resolve(args(&["--addr=127.0.0.1:3001"]), env.clone()).unwrap();
        assert_eq!(config.addr.port(), 3001);

        let config = ServerConfig::resolve(args(&[]), env).unwrap();
        assert_eq!(config.addr.port(), 9000);
    }

    #[test]
    fn bad_input_is_an_error() {
        assert!(ServerConfig::resolve(args(&["--addr"]), None).is_err());
        assert!(ServerConfig::resolve(args(&["--port", "1"]), None).is_err());
        let err = ServerConfig::resolve(args(&[]), Some("localhost".into())).unwrap_err();
        assert!(err.contains("invalid address"));
    }
}
