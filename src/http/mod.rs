//! HTTP protocol layer module
//!
//! Header policy, MIME detection, validators, path translation and response
//! builders, decoupled from request dispatch.

pub mod cache;
pub mod headers;
pub mod mime;
pub mod path;
pub mod response;

// Re-export commonly used items
pub use headers::decorate;
pub use response::{
    build_304_response, build_404_response, build_501_response, build_file_response,
    build_html_response, build_redirect_response,
};
