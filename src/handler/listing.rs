//! Directory listing page for directories without an index file

use crate::http::path::{encode_href, escape_html};
use std::io;
use std::path::Path;
use tokio::fs;

/// Render an HTML listing of `dir`. `display_path` is the decoded URL path.
pub async fn render(dir: &Path, display_path: &str) -> io::Result<String> {
    let mut entries = Vec::new();
    let mut reader = fs::read_dir(dir).await?;
    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let file_type = entry.file_type().await?;

        // Directories link with a trailing slash; symlinks are shown with '@'
        let (display, link) = if file_type.is_dir() {
            (format!("{name}/"), format!("{name}/"))
        } else if file_type.is_symlink() {
            (format!("{name}@"), name.clone())
        } else {
            (name.clone(), name.clone())
        };
        entries.push((name.to_lowercase(), display, link));
    }
    entries.sort();

    let title = format!("Directory listing for {}", escape_html(display_path));
    let mut html = String::new();
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n<hr>\n<ul>\n"));
    for (_, display, link) in &entries {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            encode_href(link),
            escape_html(display)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}
