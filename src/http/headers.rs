//! PWA response header policy
//!
//! Runs after the file server has produced a response and before anything is
//! written to the socket. Only headers are touched, never the body.

use hyper::header::{
    HeaderMap, HeaderName, HeaderValue, CACHE_CONTROL, CONTENT_TYPE, EXPIRES, PRAGMA,
    X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
};
use hyper::Response;

pub const SERVICE_WORKER_ALLOWED: HeaderName = HeaderName::from_static("service-worker-allowed");

pub const JAVASCRIPT: &str = "application/javascript";
pub const MANIFEST_JSON: &str = "application/manifest+json";

/// Headers set on every response regardless of path or status
pub const FIXED_HEADERS: [(HeaderName, &str); 6] = [
    (CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
    (PRAGMA, "no-cache"),
    (EXPIRES, "0"),
    (X_CONTENT_TYPE_OPTIONS, "nosniff"),
    (X_FRAME_OPTIONS, "DENY"),
    (X_XSS_PROTECTION, "1; mode=block"),
];

/// Compute the final header set for a response to `request_path`.
///
/// `request_path` is the request target exactly as received. The `sw` check is
/// a plain substring match over the whole target, so `/answers.js` also
/// gets `Service-Worker-Allowed`.
pub fn decorate(request_path: &str, mut headers: HeaderMap) -> HeaderMap {
    for (name, value) in FIXED_HEADERS {
        headers.insert(name, HeaderValue::from_static(value));
    }

    if request_path.ends_with(".js") {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(JAVASCRIPT));
        if request_path.contains("sw") {
            headers.insert(SERVICE_WORKER_ALLOWED, HeaderValue::from_static("/"));
        }
    }

    if request_path.ends_with("manifest.json") {
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(MANIFEST_JSON));
    }

    headers
}

/// Apply [`decorate`] to a response in place
pub fn apply<B>(request_path: &str, response: &mut Response<B>) {
    let headers = std::mem::take(response.headers_mut());
    *response.headers_mut() = decorate(request_path, headers);
}
