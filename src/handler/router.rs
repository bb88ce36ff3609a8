//! Request dispatch module
//!
//! Entry point for HTTP request processing: method check, file serving,
//! header policy and the access log line.

use crate::config::AppState;
use crate::handler::static_files;
use crate::http::{self, headers, path};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::HeaderMap;
use hyper::{Method, Request, Response, Uri, Version};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// URL path, query and fragment removed, still percent-encoded
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
}

/// Main entry point for HTTP request handling
///
/// The request body is never read, so any body type is accepted.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let (parts, body) = req.into_parts();
    drop(body);
    let target = request_target(&parts.uri);

    let mut response = match &parts.method {
        &Method::GET | &Method::HEAD => {
            let (url_path, query) = path::split_target(&target);
            let ctx = RequestContext {
                path: url_path,
                query,
                is_head: parts.method == Method::HEAD,
                if_none_match: header_string(&parts.headers, "if-none-match"),
                if_modified_since: header_string(&parts.headers, "if-modified-since"),
            };
            static_files::serve(&ctx, &state.root).await
        }
        other => {
            logger::log_warning(&format!("Unsupported method: {other}"));
            http::build_501_response(other.as_str())
        }
    };

    headers::apply(&target, &mut response);

    if state.access_log {
        let mut entry =
            AccessLogEntry::new(peer_addr.ip().to_string(), parts.method.to_string(), target);
        entry.http_version = version_label(parts.version).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact();
        entry.referer = header_string(&parts.headers, "referer");
        entry.user_agent = header_string(&parts.headers, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.access_log_format);
    }

    Ok(response)
}

/// The request target as sent: path plus query string
fn request_target(uri: &Uri) -> String {
    uri.path_and_query()
        .map_or_else(|| uri.path().to_string(), |pq| pq.as_str().to_string())
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

fn version_label(version: Version) -> &'static str {
    match version {
        Version::HTTP_09 => "0.9",
        Version::HTTP_10 => "1.0",
        Version::HTTP_2 => "2",
        Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
