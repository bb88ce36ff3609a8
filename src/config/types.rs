// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub pwa: PwaConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory files are served from. Defaults to the working directory
    /// rather than the directory holding the executable.
    pub root: String,
    pub workers: Option<usize>,
}

/// Session settings: pre-flight check and browser launch
#[derive(Debug, Deserialize, Clone)]
pub struct PwaConfig {
    /// Files expected in the working directory before serving
    #[serde(default = "default_required_files")]
    pub required_files: Vec<String>,
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
    #[serde(default = "default_browser_delay_ms")]
    pub browser_delay_ms: u64,
    /// Defaults to `http://localhost:<server.port>`
    #[serde(default)]
    pub browser_url: Option<String>,
}

fn default_required_files() -> Vec<String> {
    ["manifest.json", "sw.js", "index.html"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

#[allow(clippy::missing_const_for_fn)]
fn default_open_browser() -> bool {
    true
}

#[allow(clippy::missing_const_for_fn)]
fn default_browser_delay_ms() -> u64 {
    2000
}

impl Default for PwaConfig {
    fn default() -> Self {
        Self {
            required_files: default_required_files(),
            open_browser: default_open_browser(),
            browser_delay_ms: default_browser_delay_ms(),
            browser_url: None,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
    /// Access log format (common, combined, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

fn default_access_log_format() -> String {
    "common".to_string()
}
