//! Full builds against throwaway source trees.

use mublog::config::BlogConfig;
use mublog::generate::{BuildError, generate, generate_with};
use mublog::output::{format_build_event, format_summary};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn source_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    fs::write(root.join("index.md"), "# Home\n").unwrap();
    fs::write(root.join("about.md"), "# About\n").unwrap();
    fs::write(root.join("articles.md"), "# Articles\n\n<article>\n</article>\n").unwrap();
    fs::create_dir_all(root.join("css")).unwrap();
    fs::write(root.join("css/style.css"), "body {}\n").unwrap();
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("assets/favicon.ico"), [0u8, 1, 2]).unwrap();
    fs::create_dir_all(root.join("posts")).unwrap();
    tmp
}

fn config_for(tmp: &TempDir) -> BlogConfig {
    BlogConfig {
        source_root: tmp.path().to_path_buf(),
        output_root: tmp.path().join("output"),
        ..BlogConfig::default()
    }
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| panic!("cannot read {}: {e}", path.display()))
}

const FIRST_POST: &str = "---
title: First Post
description: The very first one
date: 2023-01-01
tags: intro
---
Welcome to the **blog**.
";

#[test]
fn one_post_and_one_draft() {
    let tmp = source_tree();
    fs::write(tmp.path().join("posts/2023-01-01-first.md"), FIRST_POST).unwrap();
    fs::write(tmp.path().join("posts/_draft.md"), "anything at all").unwrap();
    let config = config_for(&tmp);

    let mut lines = Vec::new();
    let report = generate_with(&config, |event| lines.extend(format_build_event(&event))).unwrap();

    let out = tmp.path().join("output");
    let post = read(&out.join("posts/2023-01-01-first.html"));
    assert!(post.contains("<p>Welcome to the <strong>blog</strong>.</p>"));
    assert!(!out.join("posts/_draft.html").exists());

    let articles = read(&out.join("articles.html"));
    assert_eq!(articles.matches("<li>").count(), 1);
    assert!(articles.contains(r#"<a href="posts/2023-01-01-first.html">First Post</a>"#));
    assert!(articles.contains(r#"<b style="color: #14263b;">2023-01-01</b>"#));

    assert_eq!(report.processed(), 1);
    assert_eq!(report.skipped_count(), 1);
    let first = tmp.path().join("posts/2023-01-01-first.md");
    let draft = tmp.path().join("posts/_draft.md");
    assert_eq!(lines[0], "Build directories initialized.");
    assert_eq!(lines[1], format!("Processing post: {}", first.display()));
    assert_eq!(lines[5], format!("Skipped: {} (draft)", draft.display()));
    assert_eq!(lines.last().unwrap(), "Generating article listing ...");
    assert_eq!(
        format_summary(report.processed(), report.skipped_count()),
        "Finished! (built: 1, skipped: 1)"
    );
}

#[test]
fn empty_posts_directory() {
    let tmp = source_tree();
    let config = config_for(&tmp);

    let report = generate(&config).unwrap();

    let articles = read(&tmp.path().join("output/articles.html"));
    assert!(articles.contains("<ul class=\"articles\">\n</ul>"));
    assert!(!articles.contains("<li>"));
    assert_eq!(report.processed(), 0);
    assert_eq!(report.skipped_count(), 0);
}

#[test]
fn static_files_copied() {
    let tmp = source_tree();
    let config = config_for(&tmp);

    generate(&config).unwrap();

    let out = tmp.path().join("output");
    assert_eq!(read(&out.join("css/style.css")), "body {}\n");
    assert_eq!(fs::read(out.join("assets/favicon.ico")).unwrap(), [0u8, 1, 2]);
}

#[test]
fn malformed_headers_counted_as_skipped() {
    let tmp = source_tree();
    let posts = tmp.path().join("posts");
    fs::write(posts.join("good.md"), FIRST_POST).unwrap();
    fs::write(posts.join("bad-month.md"), FIRST_POST.replace("2023-01-01", "2023-13-40")).unwrap();
    fs::write(posts.join("slashes.md"), FIRST_POST.replace("2023-01-01", "2023/01/01")).unwrap();
    fs::write(posts.join("no-tags.md"), FIRST_POST.replace("tags: intro\n", "")).unwrap();
    let config = config_for(&tmp);

    let report = generate(&config).unwrap();

    assert_eq!(report.processed(), 1);
    assert_eq!(report.skipped_count(), 3);
    let out = tmp.path().join("output/posts");
    let written: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    assert_eq!(written, ["good.html"]);
}

#[test]
fn previous_output_is_replaced() {
    let tmp = source_tree();
    let config = config_for(&tmp);
    let stale = tmp.path().join("output/posts/removed-post.html");
    fs::create_dir_all(stale.parent().unwrap()).unwrap();
    fs::write(&stale, "old").unwrap();

    generate(&config).unwrap();

    assert!(!stale.exists());
}

#[test]
fn missing_assets_directory_aborts() {
    let tmp = source_tree();
    fs::remove_dir_all(tmp.path().join("assets")).unwrap();
    let config = config_for(&tmp);

    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BuildError::Init(_)));
    assert!(!tmp.path().join("output/index.html").exists());
}

#[test]
fn output_root_above_sources_refused() {
    let tmp = source_tree();
    let config = BlogConfig {
        source_root: tmp.path().to_path_buf(),
        output_root: tmp.path().join("posts/.."),
        ..BlogConfig::default()
    };

    let err = generate(&config).unwrap_err();
    assert!(matches!(err, BuildError::Config(_)));
    assert!(tmp.path().join("index.md").exists());
}
