//! Logger module
//!
//! Provides logging utilities for the dev server including:
//! - Startup banner, pre-flight result and testing checklist
//! - Access logging with PWA file classification
//! - Error and warning logging
//! - File-based logging support

pub mod classify;
mod format;
pub mod writer;

pub use classify::{classify, LogCategory};
pub use format::AccessLogEntry;

use crate::config::Config;
use crate::error::ServerError;
use std::net::SocketAddr;
use std::path::Path;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_info(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

/// Write to access log specifically
fn write_access(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

pub fn log_banner() {
    write_info("🚀 PWA Test Server");
    write_info(&"=".repeat(40));
}

/// Report the pre-flight result; missing files are advisory only
pub fn log_preflight(missing: &[&str]) {
    match preflight_message(missing) {
        Some(message) => {
            log_warning(&message);
            write_error("       The PWA might not work correctly");
        }
        None => write_info("✅ All required PWA files found!"),
    }
}

/// Warning naming the missing files, in the order they were checked
pub fn preflight_message(missing: &[&str]) -> Option<String> {
    if missing.is_empty() {
        None
    } else {
        Some(format!("Missing PWA files: [{}]", missing.join(", ")))
    }
}

pub fn log_server_start(addr: &SocketAddr, url: &str, root: &Path) {
    write_info(&format!("🌟 PWA Test Server starting on {url}"));
    write_info(&format!("📁 Serving directory: {}", root.display()));
    write_info(&format!("Listening on: {addr}"));
}

pub fn log_testing_guide(url: &str) {
    let rule = "=".repeat(60);
    write_info("");
    write_info(&rule);
    write_info("🚀 PWA TESTING GUIDE");
    write_info(&rule);
    write_info("📱 To test PWA installation:");
    write_info("   1. Open Chrome/Edge browser");
    write_info(&format!("   2. Navigate to {url}"));
    write_info("   3. Open Developer Tools (F12)");
    write_info("   4. Go to 'Application' tab");
    write_info("   5. Check 'Service Workers' section");
    write_info("   6. Check 'Manifest' section");
    write_info("");
    write_info("📲 To test installation:");
    write_info("   • Look for install button in address bar");
    write_info("   • Or use the install popup on the website");
    write_info("   • Test offline functionality after install");
    write_info("");
    write_info("🔍 Service Worker Status:");
    write_info("   • Should show 'activated and running'");
    write_info("   • Check 'Cache Storage' for cached resources");
    write_info("");
    write_info("⚠️  Note: Some PWA features require HTTPS in production");
    write_info(&rule);
    write_info("");
    write_info("🎯 Server running! Press Ctrl+C to stop...");
    write_info(&format!("🔗 URL: {url}"));
}

/// Emit one access line, prefixed with its category marker
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_access(&classify::tag(&entry.format(format)));
}

pub fn log_opening_browser(url: &str) {
    write_info(&format!("\n🌐 Opening browser to {url}"));
}

pub fn log_browser_failed(err: &impl std::fmt::Display) {
    log_warning(&format!("Could not automatically open browser: {err}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_shutdown_requested() {
    write_info("\n[SIGNAL] Shutdown requested, no longer accepting connections");
}

pub fn log_server_stopped() {
    write_info("\n👋 PWA Test Server stopped!");
}

/// Report an error that ends the process
pub fn log_fatal(err: &ServerError) {
    for line in fatal_lines(err) {
        write_error(&line);
    }
}

pub fn fatal_lines(err: &ServerError) -> Vec<String> {
    match err {
        ServerError::PortInUse { port } => vec![
            format!("❌ Port {port} is already in use!"),
            "   Try closing other servers or use a different port".to_string(),
        ],
        other => vec![format!("❌ Server error: {other}")],
    }
}
