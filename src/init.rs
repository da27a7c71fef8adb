//! Output directory initialization.
//!
//! Every build starts from an empty output tree:
//!
//! 1. remove the previous output root (fine if there is none)
//! 2. create `output/`, `output/posts/`, `output/css/`
//! 3. copy `css/*.css` into `output/css/`
//! 4. copy `assets/` recursively into `output/assets/`
//!
//! Any failure here aborts the build; nothing is rendered into a half-built
//! tree.

use crate::config::SiteLayout;
use crate::naming;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
#[error("{action} {}: {source}", .path.display())]
pub struct InitError {
    pub action: &'static str,
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

trait InitContext<T> {
    fn context(self, action: &'static str, path: &Path) -> Result<T, InitError>;
}

impl<T> InitContext<T> for io::Result<T> {
    fn context(self, action: &'static str, path: &Path) -> Result<T, InitError> {
        self.map_err(|source| InitError {
            action,
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Clear and recreate the output tree, then copy stylesheets and assets.
pub fn initialize(layout: &SiteLayout) -> Result<(), InitError> {
    match fs::remove_dir_all(&layout.dst_root) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e).context("removing", &layout.dst_root),
    }

    for dir in [&layout.dst_root, &layout.dst_posts, &layout.dst_css] {
        fs::create_dir_all(dir).context("creating", dir)?;
    }

    copy_stylesheets(&layout.src_css, &layout.dst_css)?;
    copy_dir_recursive(&layout.src_assets, &layout.dst_assets)?;

    tracing::info!(output = %layout.dst_root.display(), "Build directories initialized");
    Ok(())
}

/// Copy the `*.css` files directly inside `src` into `dst`.
///
/// A missing stylesheet directory copies nothing.
fn copy_stylesheets(src: &Path, dst: &Path) -> Result<(), InitError> {
    if !src.is_dir() {
        tracing::debug!(dir = %src.display(), "No stylesheet directory");
        return Ok(());
    }

    for entry in WalkDir::new(src)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry.map_err(io::Error::from).context("reading", src)?;
        if entry.file_type().is_file() && naming::is_stylesheet(entry.path()) {
            let target = dst.join(entry.file_name());
            fs::copy(entry.path(), &target).context("copying", entry.path())?;
        }
    }
    Ok(())
}

/// Copy a directory tree, overwriting files that already exist at the target.
///
/// The source must exist.
fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), InitError> {
    if !src.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "assets directory does not exist",
        ))
        .context("copying", src);
    }

    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from).context("reading", src)?;
        let rel = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
            .context("copying", entry.path())?;
        let target = dst.join(rel);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).context("creating", &target)?;
        } else {
            fs::copy(entry.path(), &target).context("copying", entry.path())?;
        }
    }
    Ok(())
}
