//! Configuration module for the SSR gateway.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;

/// Placeholder content API used when no environment variable is set.
const DEFAULT_API_URL: &str = "https://your-backend.railway.app/api";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the content API, including the `/api` prefix
    pub api_base_url: String,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// The API base URL is resolved through a layered lookup:
    /// `PORTFOLIO_API_URL`, then the deployment-wide `API_URL`, then the
    /// placeholder default.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let api_base_url = env::var("PORTFOLIO_API_URL")
            .or_else(|_| env::var("API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let bind_addr = env::var("PORTFOLIO_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:3000".to_string())
            .parse()
            .expect("Invalid PORTFOLIO_BIND_ADDR format");

        let log_level = env::var("PORTFOLIO_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            api_base_url,
            bind_addr,
            log_level,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layered_api_url_lookup() {
        // Single test to avoid interleaved env mutation across threads.
        env::remove_var("PORTFOLIO_API_URL");
        env::remove_var("API_URL");
        env::remove_var("PORTFOLIO_BIND_ADDR");
        env::remove_var("PORTFOLIO_LOG_LEVEL");

        let config = Config::from_env();
        assert_eq!(config.api_base_url, DEFAULT_API_URL);
        assert_eq!(config.bind_addr.to_string(), "127.0.0.1:3000");
        assert_eq!(config.log_level, "info");

        env::set_var("API_URL", "http://fallback.example/api");
        assert_eq!(Config::from_env().api_base_url, "http://fallback.example/api");

        env::set_var("PORTFOLIO_API_URL", "http://primary.example/api");
        assert_eq!(Config::from_env().api_base_url, "http://primary.example/api");

        env::remove_var("PORTFOLIO_API_URL");
        env::remove_var("API_URL");
    }
}
