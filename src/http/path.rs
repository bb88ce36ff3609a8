//! Request path translation
//!
//! Maps a request target onto the filesystem below the serving root and
//! provides the escaping helpers used by directory listings.

use std::path::{Path, PathBuf};

/// Split a request target into path and query, dropping any fragment
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    let target = target.split('#').next().unwrap_or_default();
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Decode `%XX` escapes. Malformed escapes are kept verbatim and invalid
/// UTF-8 is replaced.
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' && i + 2 < bytes.len() {
            if let (Some(hi), Some(lo)) = (hex_value(bytes[i + 1]), hex_value(bytes[i + 2])) {
                out.push((hi << 4) | lo);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

/// Normalize a decoded URL path into its segments.
///
/// `..` pops the previous segment and can never climb above the root; empty
/// and `.` segments vanish, as do segments carrying a backslash or drive
/// separator.
pub fn normalize_segments(decoded_path: &str) -> Vec<&str> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded_path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if s.contains('\\') || s.contains(':') => {}
            s => segments.push(s),
        }
    }
    segments
}

/// Translate a URL path (no query) to a filesystem path under `root`
pub fn resolve(root: &Path, url_path: &str) -> PathBuf {
    let decoded = percent_decode(url_path);
    let mut resolved = root.to_path_buf();
    for segment in normalize_segments(&decoded) {
        resolved.push(segment);
    }
    resolved
}

/// Percent-encode a file name for use inside an `href`
pub fn encode_href(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for b in name.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'~' | b'/') {
            out.push(char::from(b));
        } else {
            out.push_str(&format!("%{b:02X}"));
        }
    }
    out
}

/// Escape text for HTML element content and quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
