//! Delayed, best-effort browser launch

use std::io;
use std::time::Duration;

use crate::logger;

/// Open `url` in the default browser after `delay`, on a detached task.
///
/// Nothing is returned: the launch can neither block nor fail the server.
pub fn spawn_browser_launch(url: String, delay: Duration) {
    spawn_launch_with(url, delay, |url| open::that(url));
}

/// Same as [`spawn_browser_launch`] with a custom opener
pub fn spawn_launch_with<F>(url: String, delay: Duration, opener: F)
where
    F: FnOnce(&str) -> io::Result<()> + Send + 'static,
{
    tokio::spawn(async move {
        tokio::time::sleep(delay).await;
        logger::log_opening_browser(&url);

        // The platform opener may wait on a child process
        match tokio::task::spawn_blocking(move || opener(&url)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => logger::log_browser_failed(&e),
            Err(e) => logger::log_browser_failed(&e),
        }
    });
}
