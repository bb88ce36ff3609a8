//! Request handler module
//!
//! Request dispatch and the static file server underneath the PWA header policy.

pub mod listing;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
