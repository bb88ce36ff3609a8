//! Access line classification
//!
//! Tags each formatted access line by whether it touches one of the files a
//! PWA's caching behavior hinges on. Pure, so the sink decides where it goes.

/// Substrings that mark a request for a service worker or manifest
pub const PWA_FILE_MARKERS: [&str; 3] = ["sw.js", "sw-simple.js", "manifest.json"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogCategory {
    /// Service worker or manifest request
    PwaFile,
    /// Anything else
    PageLoad,
}

impl LogCategory {
    /// Prefix printed in front of the access line
    pub const fn marker(self) -> &'static str {
        match self {
            Self::PwaFile => "🔧 PWA FILE:",
            Self::PageLoad => "📄",
        }
    }
}

pub fn classify(line: &str) -> LogCategory {
    if PWA_FILE_MARKERS.iter().any(|m| line.contains(m)) {
        LogCategory::PwaFile
    } else {
        LogCategory::PageLoad
    }
}

/// Render `line` with its category marker
pub fn tag(line: &str) -> String {
    format!("{} {line}", classify(line).marker())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pwa_files() {
        for line in [
            "127.0.0.1 - - [17/Oct/2026:10:00:00 +0000] \"GET /sw.js HTTP/1.1\" 200 812",
            "127.0.0.1 - - [17/Oct/2026:10:00:00 +0000] \"GET /sw-simple.js HTTP/1.1\" 200 90",
            "127.0.0.1 - - [17/Oct/2026:10:00:00 +0000] \"GET /manifest.json HTTP/1.1\" 304 -",
            "\"GET /app/manifest.json?v=3 HTTP/1.1\" 404 -",
        ] {
            assert_eq!(classify(line), LogCategory::PwaFile, "{line}");
        }
    }

    #[test]
    fn test_page_loads() {
        for line in [
            "127.0.0.1 - - [17/Oct/2026:10:00:00 +0000] \"GET / HTTP/1.1\" 200 1024",
            "\"GET /app.js HTTP/1.1\" 200 10",
            "\"GET /manifest.webmanifest HTTP/1.1\" 200 10",
        ] {
            assert_eq!(classify(line), LogCategory::PageLoad, "{line}");
        }
    }

    #[test]
    fn test_markers_match_anywhere_in_line() {
        // "/sw.json" carries "sw.js" as a prefix
        assert_eq!(classify("\"GET /sw.json HTTP/1.1\" 404 -"), LogCategory::PwaFile);
        assert_eq!(classify("\"GET /old-sw.js.bak HTTP/1.1\" 404 -"), LogCategory::PwaFile);
        assert_eq!(classify("\"GET /s/w.js HTTP/1.1\" 404 -"), LogCategory::PageLoad);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let line = "\"GET /sw.js HTTP/1.1\" 200 812";
        assert_eq!(classify(line), classify(line));
        let other = "\"GET /index.html HTTP/1.1\" 200 5";
        assert_eq!(classify(other), classify(other));
    }

    #[test]
    fn test_tag() {
        assert_eq!(
            tag("\"GET /manifest.json HTTP/1.1\" 200 42"),
            "🔧 PWA FILE: \"GET /manifest.json HTTP/1.1\" 200 42"
        );
        assert_eq!(
            tag("\"GET /index.html HTTP/1.1\" 200 5"),
            "📄 \"GET /index.html HTTP/1.1\" 200 5"
        );
    }
}
