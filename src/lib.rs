//! # mublog
//!
//! A tiny static blog generator. Markdown posts and pages go in, a directory
//! of plain HTML comes out: every page wrapped in the same header, navigation
//! and footer, plus an articles page listing all posts newest first.
//!
//! # Pipeline
//!
//! ```text
//! 1. Initialize   output/ wiped, css/ and assets/ copied
//! 2. Pages        index.md, about.md, articles.md → *.html
//! 3. Posts        posts/*.md → header check → posts/*.html
//! 4. Listing      posts sorted by date → <ul> injected into articles.html
//! ```
//!
//! A build is a single sequential pass. There is no cache and no incremental
//! mode: the output tree is recreated from scratch every time.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`config`] | `config.toml` loading and validation, source/output layout |
//! | [`header`] | Six-line post header parser with per-line error reporting |
//! | [`naming`] | Draft prefix and output file name conventions |
//! | [`post`] | Post discovery and loading |
//! | [`render`] | Markdown conversion and the shared page shell |
//! | [`init`] | Output directory setup and static file copying |
//! | [`listing`] | Date sorting, article list rendering and injection |
//! | [`generate`] | Orchestrates a full build |
//! | [`output`] | CLI output formatting |
//!
//! # Post Format
//!
//! ```text
//! ---
//! title: First Post
//! description: Notes on getting started
//! date: 2023-01-01
//! tags: rust, blogging
//! ---
//! Markdown body...
//! ```
//!
//! Posts whose file name starts with the draft prefix (`_` by default) are
//! not published. Posts with a malformed header are reported and skipped
//! without failing the build.

pub mod config;
pub mod generate;
pub mod header;
pub mod init;
pub mod listing;
pub mod naming;
pub mod output;
pub mod post;
pub mod render;

#[cfg(test)]
pub(crate) mod test_helpers;
