//! Configuration module for the AlumniConnect backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Static admin bearer token for write endpoints (required in production)
    pub admin_token: Option<String>,
    /// Path to the JSON seed document
    pub seed_file: PathBuf,
    /// Base URL of an upstream AlumniConnect API; when set, requests are
    /// delegated upstream instead of served from the in-memory store
    pub api_base_url: Option<String>,
    /// Whether mutations are written back to the seed file
    pub persist_seed: bool,
    /// Artificial latency applied to in-memory operations
    pub mock_delay: Duration,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let admin_token = env::var("ADMIN_API_TOKEN").ok();

        let seed_file = env::var("SEED_FILE")
            .unwrap_or_else(|_| "./data/seed.json".to_string())
            .into();

        let api_base_url = env::var("API_BASE_URL")
            .ok()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let persist_seed = env::var("PERSIST_SEED")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let mock_delay = Duration::from_millis(
            env::var("MOCK_DELAY_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(0),
        );

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "4000".to_string())
            .parse()
            .expect("Invalid PORT format");
        let bind_addr = SocketAddr::from(([127, 0, 0, 1], port));

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            admin_token,
            seed_file,
            api_base_url,
            persist_seed,
            mock_delay,
            bind_addr,
            log_level,
        }
    }
}
