//! Static file serving module
//!
//! Resolves request paths below the serving root, follows directory rules
//! (redirect, index file, listing) and builds file responses with validators.

use crate::handler::listing;
use crate::handler::router::RequestContext;
use crate::http::{self, cache, mime, path};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Index files tried, in order, for a directory request
pub const INDEX_FILES: [&str; 2] = ["index.html", "index.htm"];

/// Serve the request from `root`, which must already be canonical
pub async fn serve(ctx: &RequestContext<'_>, root: &Path) -> Response<Full<Bytes>> {
    let fs_path = path::resolve(root, ctx.path);

    let Ok(metadata) = fs::metadata(&fs_path).await else {
        return http::build_404_response(ctx.is_head);
    };

    if metadata.is_dir() {
        return serve_directory(ctx, root, &fs_path).await;
    }

    // A trailing slash names a directory; a file cannot satisfy it
    if ctx.path.ends_with('/') {
        return http::build_404_response(ctx.is_head);
    }

    serve_file(ctx, root, &fs_path).await
}

async fn serve_directory(
    ctx: &RequestContext<'_>,
    root: &Path,
    dir: &Path,
) -> Response<Full<Bytes>> {
    if !ctx.path.ends_with('/') {
        let location = match ctx.query {
            Some(query) => format!("{}/?{query}", ctx.path),
            None => format!("{}/", ctx.path),
        };
        return http::build_redirect_response(&location);
    }

    if let Some(index) = find_index_file(dir).await {
        return serve_file(ctx, root, &index).await;
    }

    if !is_within_root(root, dir).await {
        return http::build_404_response(ctx.is_head);
    }

    match listing::render(dir, &path::percent_decode(ctx.path)).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response(ctx.is_head)
        }
    }
}

async fn find_index_file(dir: &Path) -> Option<PathBuf> {
    for name in INDEX_FILES {
        let candidate = dir.join(name);
        if fs::metadata(&candidate).await.is_ok_and(|m| m.is_file()) {
            return Some(candidate);
        }
    }
    None
}

/// Symlinks may point anywhere; only serve what canonicalizes below the root
async fn is_within_root(root: &Path, candidate: &Path) -> bool {
    match fs::canonicalize(candidate).await {
        Ok(canonical) if canonical.starts_with(root) => true,
        Ok(canonical) => {
            logger::log_warning(&format!(
                "Path traversal attempt blocked: {} -> {}",
                candidate.display(),
                canonical.display()
            ));
            false
        }
        Err(_) => false,
    }
}

async fn serve_file(ctx: &RequestContext<'_>, root: &Path, file: &Path) -> Response<Full<Bytes>> {
    if !is_within_root(root, file).await {
        return http::build_404_response(ctx.is_head);
    }

    let content = match fs::read(file).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", file.display()));
            return http::build_404_response(ctx.is_head);
        }
    };

    let modified = fs::metadata(file)
        .await
        .ok()
        .and_then(|m| m.modified().ok());
    let last_modified = modified.map(cache::format_http_date);
    let etag = cache::generate_etag(&content);

    if cache::is_not_modified(
        ctx.if_none_match.as_deref(),
        ctx.if_modified_since.as_deref(),
        &etag,
        modified,
    ) {
        return http::build_304_response(&etag, last_modified.as_deref());
    }

    http::build_file_response(
        Bytes::from(content),
        mime::content_type_for(file),
        &etag,
        last_modified.as_deref(),
        ctx.is_head,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    fn ctx(path: &str) -> RequestContext<'_> {
        RequestContext {
            path,
            query: None,
            is_head: false,
            if_none_match: None,
            if_modified_since: None,
        }
    }

    fn site() -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>home</h1>").unwrap();
        std::fs::write(dir.path().join("sw.js"), "self.skipWaiting()").unwrap();
        std::fs::create_dir(dir.path().join("assets")).unwrap();
        std::fs::write(dir.path().join("assets").join("app.css"), "body{}").unwrap();
        let root = dir.path().canonicalize().unwrap();
        (dir, root)
    }

    async fn body_string(response: Response<Full<Bytes>>) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_file_with_validators() {
        let (_dir, root) = site();
        let response = serve(&ctx("/sw.js"), &root).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/javascript");
        assert_eq!(response.headers()["content-length"], "18");
        assert!(response.headers().contains_key("etag"));
        assert!(response.headers().contains_key("last-modified"));
        assert_eq!(body_string(response).await, "self.skipWaiting()");
    }

    #[tokio::test]
    async fn test_root_serves_index() {
        let (_dir, root) = site();
        let response = serve(&ctx("/"), &root).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-type"], "text/html; charset=utf-8");
        assert_eq!(body_string(response).await, "<h1>home</h1>");
    }

    #[tokio::test]
    async fn test_directory_without_slash_redirects() {
        let (_dir, root) = site();
        let response = serve(&ctx("/assets"), &root).await;
        assert_eq!(response.status(), 301);
        assert_eq!(response.headers()["location"], "/assets/");

        let mut with_query = ctx("/assets");
        with_query.query = Some("x=1");
        let response = serve(&with_query, &root).await;
        assert_eq!(response.headers()["location"], "/assets/?x=1");
    }

    #[tokio::test]
    async fn test_directory_listing() {
        let (_dir, root) = site();
        let response = serve(&ctx("/assets/"), &root).await;
        assert_eq!(response.status(), 200);
        let body = body_string(response).await;
        assert!(body.contains("Directory listing for /assets/"));
        assert!(body.contains("<a href=\"app.css\">app.css</a>"));
    }

    #[tokio::test]
    async fn test_missing_file_is_404() {
        let (_dir, root) = site();
        assert_eq!(serve(&ctx("/manifest.json"), &root).await.status(), 404);
    }

    #[tokio::test]
    async fn test_file_with_trailing_slash_is_404() {
        let (_dir, root) = site();
        assert_eq!(serve(&ctx("/sw.js/"), &root).await.status(), 404);
    }

    #[tokio::test]
    async fn test_traversal_stays_inside_root() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.txt"), "top secret").unwrap();
        let inner = outer.path().join("site");
        std::fs::create_dir(&inner).unwrap();
        let root = inner.canonicalize().unwrap();

        for target in ["/../secret.txt", "/%2e%2e/secret.txt", "/..%2fsecret.txt"] {
            let response = serve(&ctx(target), &root).await;
            assert_eq!(response.status(), 404, "{target}");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_symlink_escaping_root_is_404() {
        let outer = tempfile::tempdir().unwrap();
        std::fs::write(outer.path().join("secret.txt"), "top secret").unwrap();
        let inner = outer.path().join("site");
        std::fs::create_dir(&inner).unwrap();
        std::os::unix::fs::symlink(outer.path().join("secret.txt"), inner.join("link.txt"))
            .unwrap();
        let root = inner.canonicalize().unwrap();

        assert_eq!(serve(&ctx("/link.txt"), &root).await.status(), 404);
    }

    #[tokio::test]
    async fn test_conditional_get() {
        let (_dir, root) = site();
        let first = serve(&ctx("/sw.js"), &root).await;
        let etag = first.headers()["etag"].to_str().unwrap().to_string();
        let last_modified = first.headers()["last-modified"].to_str().unwrap().to_string();

        let mut revalidate = ctx("/sw.js");
        revalidate.if_none_match = Some(etag.clone());
        let response = serve(&revalidate, &root).await;
        assert_eq!(response.status(), 304);
        assert_eq!(response.headers()["etag"], etag.as_str());
        assert_eq!(body_string(response).await, "");

        let mut by_date = ctx("/sw.js");
        by_date.if_modified_since = Some(last_modified);
        assert_eq!(serve(&by_date, &root).await.status(), 304);

        let mut stale = ctx("/sw.js");
        stale.if_none_match = Some("\"stale\"".to_string());
        assert_eq!(serve(&stale, &root).await.status(), 200);
    }

    #[tokio::test]
    async fn test_head_has_no_body() {
        let (_dir, root) = site();
        let mut head = ctx("/index.html");
        head.is_head = true;
        let response = serve(&head, &root).await;
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers()["content-length"], "13");
        assert_eq!(body_string(response).await, "");
    }
}
