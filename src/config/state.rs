// Application state module
// Immutable per-process serving state shared by all connections

use std::io;
use std::path::PathBuf;

use super::types::Config;

/// Application state
#[derive(Debug)]
pub struct AppState {
    /// Canonical serving root
    pub root: PathBuf,
    pub access_log: bool,
    pub access_log_format: String,
}

impl AppState {
    /// Create `AppState`, resolving the serving root to its canonical form.
    ///
    /// Fails if the root directory does not exist.
    pub fn new(config: &Config) -> io::Result<Self> {
        let root = std::fs::canonicalize(&config.server.root)?;
        if !root.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("serving root is not a directory: {}", root.display()),
            ));
        }

        Ok(Self {
            root,
            access_log: config.logging.access_log,
            access_log_format: config.logging.access_log_format.clone(),
        })
    }
}
