//! Site generation.
//!
//! Drives a full build, strictly in this order:
//!
//! 1. Initialize the output tree ([`init::initialize`])
//! 2. Render `index.md`, `about.md` and `articles.md` (root `.`)
//! 3. Discover `posts/*.md`
//! 4. Skip drafts and posts with a rejected header
//! 5. Render every remaining post to `posts/<stem>.html` (root `..`)
//! 6. Sort posts newest first
//! 7. Build the article listing
//! 8. Splice the listing into `articles.html` after the `<article>` marker
//! 9. Report built/skipped counts
//!
//! ## Failure Policy
//!
//! A post with a bad header is logged and skipped; the build carries on.
//! Everything else is fatal: initialization failures, unreadable sources,
//! failed writes, and an articles page without a listing marker. The
//! returned error names the path involved.
//!
//! ## Fixed Pages
//!
//! `index.md`, `about.md` and `articles.md` may open with the same header
//! block as a post. When it parses, its title becomes the page `<title>`
//! and the block is not rendered. Otherwise the whole file is rendered and
//! the page has no `<title>`.

use crate::config::{BlogConfig, ConfigError, SiteLayout};
use crate::header::parse_header;
use crate::init::{self, InitError};
use crate::listing;
use crate::post::{self, Post, PostEntry, Skipped};
use crate::render::{self, PageVars, RenderError};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Initialization failed: {0}")]
    Init(#[from] InitError),
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Render error in {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: RenderError,
    },
    #[error("{} has no <article> marker for the article listing", .0.display())]
    MissingListingMarker(PathBuf),
}

/// Progress reported while a build runs, in the order it happens.
#[derive(Debug, Clone, Copy)]
pub enum BuildEvent<'a> {
    /// The output tree is in place and static files are copied.
    Initialized,
    /// A post was written to its output file.
    PostRendered(&'a Post),
    PostSkipped(&'a Skipped),
    /// All posts are done; the article listing is next.
    ListingStarted,
}

/// The fixed top-level pages, rendered before any post.
pub const FIXED_PAGES: [&str; 3] = ["about", "index", "articles"];

/// What a build produced.
#[derive(Debug, Default)]
pub struct BuildReport {
    /// Fixed pages written, as `(source, output)`.
    pub pages: Vec<(PathBuf, PathBuf)>,
    /// Published posts, newest first.
    pub posts: Vec<Post>,
    /// Drafts and rejected posts, in discovery order.
    pub skipped: Vec<Skipped>,
}

impl BuildReport {
    pub fn processed(&self) -> usize {
        self.posts.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Result of validating posts without building.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Valid posts in discovery order.
    pub posts: Vec<Post>,
    pub skipped: Vec<Skipped>,
}

impl CheckReport {
    /// Posts rejected for their header (drafts don't count).
    pub fn invalid(&self) -> impl Iterator<Item = &Skipped> {
        self.skipped
            .iter()
            .filter(|s| matches!(s.reason, post::SkipReason::InvalidHeader(_)))
    }
}

trait IoContext<T> {
    fn at(self, path: &Path) -> Result<T, BuildError>;
}

impl<T> IoContext<T> for io::Result<T> {
    fn at(self, path: &Path) -> Result<T, BuildError> {
        self.map_err(|source| BuildError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Build the whole site described by `config`.
pub fn generate(config: &BlogConfig) -> Result<BuildReport, BuildError> {
    generate_with(config, |_| {})
}

/// Build the site, calling `on_event` as each step completes.
///
/// Posts are reported in discovery order as they are rendered or skipped,
/// so progress up to a fatal error has already been seen by the caller.
pub fn generate_with<F>(config: &BlogConfig, mut on_event: F) -> Result<BuildReport, BuildError>
where
    F: FnMut(BuildEvent<'_>),
{
    config.validate()?;
    let layout = config.layout();
    let footer = config.footer_copyright();

    init::initialize(&layout)?;
    on_event(BuildEvent::Initialized);

    let mut report = BuildReport::default();

    for name in FIXED_PAGES {
        let src = layout.page_source(name);
        let dst = layout.page_output(name);
        render_fixed_page(config, &footer, &src, &dst)?;
        report.pages.push((src, dst));
    }

    let mut posts = Vec::new();
    for src in discover(&layout)? {
        match load_entry(config, &layout, &src)? {
            PostEntry::Published(post) => {
                render_post(config, &footer, &post)?;
                on_event(BuildEvent::PostRendered(&post));
                posts.push(post);
            }
            PostEntry::Skipped(skip) => {
                on_event(BuildEvent::PostSkipped(&skip));
                report.skipped.push(skip);
            }
        }
    }

    on_event(BuildEvent::ListingStarted);
    listing::sort_posts(&mut posts);
    let list = listing::render_listing(&posts);

    let articles = layout.page_output("articles");
    let page = fs::read_to_string(&articles).at(&articles)?;
    let page = listing::inject_listing(&page, &list)
        .ok_or_else(|| BuildError::MissingListingMarker(layout.page_source("articles")))?;
    fs::write(&articles, page).at(&articles)?;
    tracing::info!(posts = posts.len(), "Article listing generated");

    report.posts = posts;
    Ok(report)
}

/// Discover and validate posts without writing anything.
pub fn check(config: &BlogConfig) -> Result<CheckReport, BuildError> {
    config.validate()?;
    let layout = config.layout();
    let mut report = CheckReport::default();
    for src in discover(&layout)? {
        match load_entry(config, &layout, &src)? {
            PostEntry::Published(post) => report.posts.push(post),
            PostEntry::Skipped(skip) => report.skipped.push(skip),
        }
    }
    Ok(report)
}

fn discover(layout: &SiteLayout) -> Result<Vec<PathBuf>, BuildError> {
    let sources = post::discover_posts(&layout.src_posts).at(&layout.src_posts)?;
    tracing::debug!(count = sources.len(), dir = %layout.src_posts.display(), "Discovered posts");
    Ok(sources)
}

/// Load one post source, logging why it is skipped.
fn load_entry(config: &BlogConfig, layout: &SiteLayout, src: &Path) -> Result<PostEntry, BuildError> {
    let entry = post::load_post(src, layout, &config.draft_prefix).at(src)?;
    if let PostEntry::Skipped(skip) = &entry {
        if let post::SkipReason::InvalidHeader(e) = &skip.reason {
            tracing::warn!(post = %skip.src.display(), error = %e, "Skipping post with invalid header");
        } else {
            tracing::debug!(post = %skip.src.display(), "Skipping draft");
        }
    }
    Ok(entry)
}

fn render_fixed_page(
    config: &BlogConfig,
    footer: &str,
    src: &Path,
    dst: &Path,
) -> Result<(), BuildError> {
    let content = fs::read_to_string(src).at(src)?;
    let (title, body) = match parse_header(&content) {
        Ok(parsed) => (Some(parsed.header.title), parsed.body),
        Err(e) => {
            tracing::debug!(page = %src.display(), reason = %e, "Page has no header, rendering untitled");
            (None, content.as_str())
        }
    };

    let vars = PageVars {
        root: ".",
        title: title.as_deref(),
        author_mail: &config.author_mail,
        footer_copyright: footer,
    };
    write_page(&vars, body, src, dst)
}

fn render_post(config: &BlogConfig, footer: &str, post: &Post) -> Result<(), BuildError> {
    let vars = PageVars {
        root: "..",
        title: Some(post.header.title.as_str()),
        author_mail: &config.author_mail,
        footer_copyright: footer,
    };
    write_page(&vars, &post.body, &post.src, &post.dst)
}

fn write_page(vars: &PageVars<'_>, markdown: &str, src: &Path, dst: &Path) -> Result<(), BuildError> {
    let body = render::markdown_to_html(markdown);
    let html = render::render_page(vars, &body).map_err(|source| BuildError::Render {
        path: src.to_path_buf(),
        source,
    })?;
    fs::write(dst, html).at(dst)?;
    tracing::debug!(src = %src.display(), dst = %dst.display(), "Rendered page");
    Ok(())
}
