//! Pre-flight check for the files a PWA needs

use std::path::Path;

/// Names from `required` that do not exist in `dir`, in the order given
pub fn missing_files<'a>(dir: &Path, required: &'a [String]) -> Vec<&'a str> {
    required
        .iter()
        .filter(|name| !dir.join(name.as_str()).exists())
        .map(String::as_str)
        .collect()
}
