//! Blog configuration module.
//!
//! Handles loading and validating `config.toml`. Every option has a default,
//! so a blog with no config file at all still builds.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! author_name = "Anonymous"
//! author_mail = "author@example.com"   # Used for the nav "mail" link
//! footer_text = "Copyright © {author_name}"
//! draft_prefix = "_"                   # Posts named _*.md are not published
//! source_root = "."                    # Where posts/, css/, assets/ live
//! output_root = "output"               # Wiped and regenerated on every build
//! ```
//!
//! ## Directory Layout
//!
//! ```text
//! source_root/                 output_root/
//! ├── index.md         →       ├── index.html
//! ├── about.md         →       ├── about.html
//! ├── articles.md      →       ├── articles.html   (listing injected)
//! ├── css/*.css        →       ├── css/
//! ├── assets/          →       ├── assets/
//! └── posts/*.md       →       └── posts/*.html
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Placeholder in `footer_text` replaced by the author name.
const AUTHOR_NAME_PLACEHOLDER: &str = "{author_name}";

/// Blog configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlogConfig {
    /// Author display name, available to the footer as `{author_name}`.
    pub author_name: String,
    /// Author email, rendered as the `mailto:` nav link.
    pub author_mail: String,
    /// Static footer text on every page.
    pub footer_text: String,
    /// Filename prefix marking a post as a draft.
    pub draft_prefix: String,
    /// Directory holding the markdown sources, stylesheets and assets.
    pub source_root: PathBuf,
    /// Directory the site is generated into. Removed at the start of a build.
    pub output_root: PathBuf,
}

impl Default for BlogConfig {
    fn default() -> Self {
        Self {
            author_name: "Anonymous".to_string(),
            author_mail: "author@example.com".to_string(),
            footer_text: format!("Copyright © {AUTHOR_NAME_PLACEHOLDER}"),
            draft_prefix: "_".to_string(),
            source_root: PathBuf::from("."),
            output_root: PathBuf::from("output"),
        }
    }
}

impl BlogConfig {
    /// Validate config values are usable for a build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.draft_prefix.is_empty() {
            return Err(ConfigError::Validation(
                "draft_prefix must not be empty".into(),
            ));
        }
        if self.author_mail.trim().is_empty() || !self.author_mail.contains('@') {
            return Err(ConfigError::Validation(format!(
                "author_mail must be an email address, got {:?}",
                self.author_mail
            )));
        }
        if resolve_path(&self.source_root)?.starts_with(resolve_path(&self.output_root)?) {
            return Err(ConfigError::Validation(format!(
                "output_root {} must not contain source_root {}",
                self.output_root.display(),
                self.source_root.display()
            )));
        }
        Ok(())
    }

    /// Footer text with `{author_name}` expanded.
    pub fn footer_copyright(&self) -> String {
        self.footer_text
            .replace(AUTHOR_NAME_PLACEHOLDER, &self.author_name)
    }

    pub fn layout(&self) -> SiteLayout {
        SiteLayout::new(&self.source_root, &self.output_root)
    }
}

/// Absolute form of `path` used to compare the roots.
///
/// `.` and `..` are folded first, then the longest existing prefix is
/// canonicalized so symlinks resolve the same way for both roots.
fn resolve_path(path: &Path) -> io::Result<PathBuf> {
    let mut lexical = PathBuf::new();
    for component in std::path::absolute(path)?.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                lexical.pop();
            }
            other => lexical.push(other),
        }
    }
    for ancestor in lexical.ancestors() {
        if let Ok(canonical) = fs::canonicalize(ancestor) {
            let rest = lexical.strip_prefix(ancestor).unwrap_or(Path::new(""));
            return Ok(canonical.join(rest));
        }
    }
    Ok(lexical)
}

/// Every input and output path a build touches, derived from the two roots.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteLayout {
    pub src_root: PathBuf,
    pub src_posts: PathBuf,
    pub src_css: PathBuf,
    pub src_assets: PathBuf,
    pub dst_root: PathBuf,
    pub dst_posts: PathBuf,
    pub dst_css: PathBuf,
    pub dst_assets: PathBuf,
}

impl SiteLayout {
    pub fn new(source_root: &Path, output_root: &Path) -> Self {
        Self {
            src_root: source_root.to_path_buf(),
            src_posts: source_root.join("posts"),
            src_css: source_root.join("css"),
            src_assets: source_root.join("assets"),
            dst_root: output_root.to_path_buf(),
            dst_posts: output_root.join("posts"),
            dst_css: output_root.join("css"),
            dst_assets: output_root.join("assets"),
        }
    }

    /// Source markdown for a fixed top-level page (`index`, `about`, `articles`).
    pub fn page_source(&self, name: &str) -> PathBuf {
        self.src_root.join(format!("{name}.md"))
    }

    /// Output HTML for a fixed top-level page.
    pub fn page_output(&self, name: &str) -> PathBuf {
        self.dst_root.join(format!("{name}.html"))
    }
}

/// Load config from a `config.toml` file.
///
/// A missing file yields the defaults. Unknown keys and invalid values are
/// errors.
pub fn load_config(path: &Path) -> Result<BlogConfig, ConfigError> {
    if !path.exists() {
        let config = BlogConfig::default();
        config.validate()?;
        return Ok(config);
    }
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Parse and validate config from TOML text.
pub fn parse_config(content: &str) -> Result<BlogConfig, ConfigError> {
    let config: BlogConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# mublog Configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Author
# ---------------------------------------------------------------------------
# Display name. Can be referenced from footer_text as {author_name}.
author_name = "Anonymous"

# Address behind the "mail" link in the navigation bar.
author_mail = "author@example.com"

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
# Text shown in the footer of every page.
footer_text = "Copyright © {author_name}"

# ---------------------------------------------------------------------------
# Paths
# ---------------------------------------------------------------------------
# Posts whose file name starts with this prefix are drafts and are skipped.
draft_prefix = "_"

# Directory containing index.md, about.md, articles.md, posts/, css/, assets/.
source_root = "."

# Build output. This directory is deleted and recreated on every build.
output_root = "output"
"##
}
