//! Post discovery and loading.
//!
//! Posts are the `*.md` files directly inside `posts/` (no recursion).
//! Each one ends up as exactly one [`PostEntry`]:
//!
//! - **Published**: header parsed, ready to render and list
//! - **Skipped**: a draft (never read) or a file whose header was rejected
//!
//! Discovery is sorted by file name, so posts sharing a date keep a stable,
//! reproducible order in the article listing.

use crate::config::SiteLayout;
use crate::header::{Header, HeaderError, parse_header};
use crate::naming;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A post that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Post {
    /// Source markdown file.
    pub src: PathBuf,
    /// Output HTML file.
    pub dst: PathBuf,
    /// Output path relative to the site root, `/`-separated (`posts/x.html`).
    pub dst_link: String,
    /// Source file name, e.g. `2023-01-01-first.md`.
    pub basename: String,
    pub header: Header,
    /// Markdown after the header block.
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Draft,
    InvalidHeader(HeaderError),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Draft => f.write_str("draft"),
            SkipReason::InvalidHeader(e) => write!(f, "invalid header: {e}"),
        }
    }
}

/// A discovered post that will not be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skipped {
    pub src: PathBuf,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostEntry {
    Published(Post),
    Skipped(Skipped),
}

/// List the `*.md` files directly inside `dir`, sorted by file name.
///
/// Symlinks are followed. Hidden files and other-case extensions (`.MD`)
/// are not posts. A missing directory has no posts.
pub fn discover_posts(dir: &Path) -> io::Result<Vec<PathBuf>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut posts = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from)?;
        if entry.file_type().is_file() && naming::is_markdown(entry.path()) {
            posts.push(entry.into_path());
        }
    }
    Ok(posts)
}

/// Load one post source.
///
/// Drafts are skipped without being read. Files that can't be read (or
/// aren't UTF-8) are an I/O error rather than a skip.
pub fn load_post(src: &Path, layout: &SiteLayout, draft_prefix: &str) -> io::Result<PostEntry> {
    let basename = src
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    if naming::is_draft(&basename, draft_prefix) {
        return Ok(PostEntry::Skipped(Skipped {
            src: src.to_path_buf(),
            reason: SkipReason::Draft,
        }));
    }

    let content = fs::read_to_string(src)?;
    let parsed = match parse_header(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            return Ok(PostEntry::Skipped(Skipped {
                src: src.to_path_buf(),
                reason: SkipReason::InvalidHeader(e),
            }));
        }
    };

    let html_name = naming::html_file_name(&basename);
    Ok(PostEntry::Published(Post {
        src: src.to_path_buf(),
        dst: layout.dst_posts.join(&html_name),
        dst_link: format!("posts/{html_name}"),
        basename,
        header: parsed.header,
        body: parsed.body.to_string(),
    }))
}
