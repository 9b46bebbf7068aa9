//! Static site helpers: path resolution and content types

use std::path::{Path, PathBuf};

/// Content type for a file, inferred from its extension
///
/// Unrecognised or missing extensions are served as plain text.
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html",
        Some("js") => "text/javascript",
        Some("css") => "text/css",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") => "image/jpg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        _ => "text/plain",
    }
}

/// Resolve a request path (without its leading `/`) under `root`
///
/// Returns `None` when any segment could step outside the root.
pub fn resolve_static_path(root: &Path, tail: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in tail.split('/') {
        if segment.is_empty()
            || segment == "."
            || segment == ".."
            || segment.contains('\\')
            || segment.contains(':')
        {
            return None;
        }
        path.push(segment);
    }
    Some(path)
}
