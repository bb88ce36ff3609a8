//! Shared helpers for end-to-end tests: a server on an ephemeral port and a
//! raw HTTP/1.0 client.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use pwa_devserver::config::{AppState, Config};
use pwa_devserver::server::{bind_listener, start_server_loop};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::Notify;

/// A running server; dropping the handle leaves the task to the runtime
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Arc<Notify>,
}

pub async fn start_server(root: &Path) -> TestServer {
    let mut cfg = Config::defaults().unwrap();
    cfg.server.root = root.to_string_lossy().into_owned();
    cfg.pwa.open_browser = false;

    let state = Arc::new(AppState::new(&cfg).unwrap());
    let listener = bind_listener("127.0.0.1:0".parse().unwrap()).unwrap();
    let addr = listener.local_addr().unwrap();
    let shutdown = Arc::new(Notify::new());

    tokio::spawn(start_server_loop(listener, state, Arc::clone(&shutdown)));

    TestServer { addr, shutdown }
}

/// Write a site with the usual PWA files
pub fn write_pwa_site(root: &Path) {
    std::fs::write(root.join("index.html"), "<!doctype html><title>PWA</title>").unwrap();
    std::fs::write(root.join("sw.js"), "self.addEventListener('install', () => {});").unwrap();
    std::fs::write(root.join("sw-simple.js"), "// minimal worker").unwrap();
    std::fs::write(root.join("app.js"), "console.log('app');").unwrap();
    std::fs::write(
        root.join("manifest.json"),
        r#"{"name":"PWA","start_url":"/","display":"standalone"}"#,
    )
    .unwrap();
}

#[derive(Debug)]
pub struct RawResponse {
    pub status: u16,
    /// Lowercased header name to every value sent for it
    pub headers: HashMap<String, Vec<String>>,
    pub body: Vec<u8>,
}

impl RawResponse {
    /// The single value of a header, panicking if it repeats
    pub fn header(&self, name: &str) -> Option<&str> {
        let values = self.headers.get(name)?;
        assert_eq!(values.len(), 1, "header {name} sent {} times", values.len());
        Some(values[0].as_str())
    }
}

pub async fn request(
    addr: SocketAddr,
    method: &str,
    target: &str,
    extra_headers: &[(&str, &str)],
) -> RawResponse {
    let mut stream = TcpStream::connect(addr).await.unwrap();

    let mut req = format!("{method} {target} HTTP/1.0\r\nHost: localhost\r\n");
    for (name, value) in extra_headers {
        req.push_str(&format!("{name}: {value}\r\n"));
    }
    req.push_str("\r\n");
    stream.write_all(req.as_bytes()).await.unwrap();

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.unwrap();
    parse_response(&raw)
}

pub async fn get(addr: SocketAddr, target: &str) -> RawResponse {
    request(addr, "GET", target, &[]).await
}

fn parse_response(raw: &[u8]) -> RawResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header terminator");
    let head = String::from_utf8_lossy(&raw[..split]).into_owned();
    let body = raw[split + 4..].to_vec();

    let mut lines = head.split("\r\n");
    let status_line = lines.next().unwrap();
    let status = status_line
        .split_whitespace()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .expect("status code");

    let mut headers: HashMap<String, Vec<String>> = HashMap::new();
    for line in lines {
        if let Some((name, value)) = line.split_once(':') {
            headers
                .entry(name.trim().to_ascii_lowercase())
                .or_default()
                .push(value.trim().to_string());
        }
    }

    RawResponse {
        status,
        headers,
        body,
    }
}

pub const FIXED_HEADERS: [(&str, &str); 6] = [
    ("cache-control", "no-cache, no-store, must-revalidate"),
    ("pragma", "no-cache"),
    ("expires", "0"),
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
];

pub fn assert_fixed_headers(response: &RawResponse) {
    for (name, value) in FIXED_HEADERS {
        assert_eq!(response.header(name), Some(value), "header {name}");
    }
}
