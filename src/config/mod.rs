// Configuration module entry point
// Loads configuration and builds the per-process serving state

mod state;
mod types;

use std::net::SocketAddr;
use std::time::Duration;

pub use state::AppState;
pub use types::{Config, LoggingConfig, PwaConfig, ServerConfig};

/// Optional configuration file looked up in the working directory (without extension)
pub const DEFAULT_CONFIG_FILE: &str = "pwa-devserver";

impl Config {
    /// Load configuration from `pwa-devserver.toml` if present, defaults otherwise
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(Some(DEFAULT_CONFIG_FILE))
    }

    /// Load configuration from specified file path (without extension)
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::build(Some(config_path))
    }

    /// Built-in defaults only, no file lookup
    pub fn defaults() -> Result<Self, config::ConfigError> {
        Self::build(None)
    }

    fn build(config_path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        let settings = builder
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.root", ".")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "common")?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// URL printed in the banner and used for the browser launch
    pub fn public_url(&self) -> String {
        self.pwa
            .browser_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.server.port))
    }

    pub const fn browser_delay(&self) -> Duration {
        Duration::from_millis(self.pwa.browser_delay_ms)
    }
}
