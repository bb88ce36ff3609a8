//! Session bootstrap helpers
//!
//! The advisory pre-flight file check and the delayed browser launch. Neither
//! can stop the server.

pub mod browser;
pub mod preflight;

pub use browser::spawn_browser_launch;
pub use preflight::missing_files;
