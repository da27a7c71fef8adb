//! Shared test utilities for the mublog test suite.
//!
//! Builds throwaway source trees and post records so module tests don't
//! repeat the same fixture plumbing.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_site();
//! write_post(&tmp, "2023-01-01-first.md", "First Post", "2023-01-01");
//! let report = generate(&site_config(&tmp)).unwrap();
//! assert_eq!(report.processed(), 1);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::config::BlogConfig;
use crate::header::Header;
use crate::post::Post;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a minimal blog source tree in a temp directory.
///
/// ```text
/// tmp/
/// ├── index.md        # no header
/// ├── about.md        # no header
/// ├── articles.md     # carries the <article> marker
/// ├── css/{normalize,style}.css
/// ├── assets/img/logo.svg
/// └── posts/          # empty
/// ```
pub fn setup_site() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();

    fs::write(root.join("index.md"), "# Welcome\n\nHello there.\n").unwrap();
    fs::write(root.join("about.md"), "# About\n\nWho I am.\n").unwrap();
    fs::write(
        root.join("articles.md"),
        "# Articles\n\n<article>\n</article>\n",
    )
    .unwrap();

    fs::create_dir_all(root.join("css")).unwrap();
    fs::write(root.join("css/normalize.css"), "html { margin: 0; }\n").unwrap();
    fs::write(root.join("css/style.css"), "body { color: #222; }\n").unwrap();

    fs::create_dir_all(root.join("assets/img")).unwrap();
    fs::write(root.join("assets/img/logo.svg"), "<svg/>").unwrap();

    fs::create_dir_all(root.join("posts")).unwrap();
    tmp
}

/// Config pointing at a [`setup_site`] tree, building into `tmp/output`.
pub fn site_config(tmp: &TempDir) -> BlogConfig {
    BlogConfig {
        source_root: tmp.path().to_path_buf(),
        output_root: tmp.path().join("output"),
        ..BlogConfig::default()
    }
}

/// Markdown source of a post with a valid header (for a valid `date`).
pub fn post_source(title: &str, date: &str, body: &str) -> String {
    format!("---\ntitle: {title}\ndescription: About {title}\ndate: {date}\ntags: test, fixture\n---\n{body}\n")
}

/// Write a post with a valid header and a one-line body.
pub fn write_post(tmp: &TempDir, name: &str, title: &str, date: &str) {
    let body = format!("Body of {title}.");
    write_raw_post(tmp, name, &post_source(title, date, &body));
}

/// Write arbitrary content into `posts/`.
pub fn write_raw_post(tmp: &TempDir, name: &str, content: &str) {
    fs::write(tmp.path().join("posts").join(name), content).unwrap();
}

/// Read a generated file relative to the output root.
pub fn read_output(config: &BlogConfig, rel: &str) -> String {
    let path = config.output_root.join(rel);
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

// =========================================================================
// Records
// =========================================================================

/// An in-memory post named after its lowercased title.
pub fn make_post(title: &str, date: &str) -> Post {
    let slug = title.to_lowercase();
    Post {
        src: PathBuf::from(format!("posts/{slug}.md")),
        dst: PathBuf::from(format!("output/posts/{slug}.html")),
        dst_link: format!("posts/{slug}.html"),
        basename: format!("{slug}.md"),
        header: Header {
            title: title.to_string(),
            description: format!("About {title}"),
            date: date.parse().unwrap(),
            tags: vec!["test".to_string()],
        },
        body: String::new(),
    }
}

/// File names of a list of paths, in order.
pub fn file_names(paths: &[PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| {
            Path::new(p)
                .file_name()
                .unwrap()
                .to_string_lossy()
                .to_string()
        })
        .collect()
}
