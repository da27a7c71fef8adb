//! Filename conventions for post sources.
//!
//! A post's file name carries two pieces of information:
//! - whether it is a draft (it starts with the configured draft prefix)
//! - the name of its output page (same stem, `.html` extension)
//!
//! ```text
//! 2023-01-01-first.md  →  posts/2023-01-01-first.html
//! _half-written.md     →  draft, not published
//! ```

use std::path::Path;

/// Whether a post file name marks a draft.
pub fn is_draft(basename: &str, draft_prefix: &str) -> bool {
    basename.starts_with(draft_prefix)
}

/// Output file name for a markdown source: the stem with an `.html` extension.
pub fn html_file_name(basename: &str) -> String {
    let stem = Path::new(basename)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| basename.to_string());
    format!("{stem}.html")
}

/// Whether a path matches `*.md`.
pub fn is_markdown(path: &Path) -> bool {
    matches_extension(path, "md")
}

/// Whether a path matches `*.css`.
pub fn is_stylesheet(path: &Path) -> bool {
    matches_extension(path, "css")
}

/// Shell glob semantics for `*.<ext>`: the extension is case-sensitive and
/// hidden files (leading `.`) never match.
fn matches_extension(path: &Path, ext: &str) -> bool {
    let hidden = path
        .file_name()
        .map(|n| n.to_string_lossy().starts_with('.'))
        .unwrap_or(true);
    !hidden && path.extension().is_some_and(|e| e == ext)
}
