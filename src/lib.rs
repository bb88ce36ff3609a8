//! Local static file server for testing Progressive Web Apps.
//!
//! Every response carries no-cache and security headers; service worker
//! scripts and manifests get the content types and scope header browsers
//! expect. Access lines for those files are flagged in the log.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod session;

pub use error::ServerError;
