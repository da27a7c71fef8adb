//! CLI output formatting.
//!
//! Human-readable progress, not a machine-readable protocol.
//!
//! ## Build
//!
//! ```text
//! Build directories initialized.
//! Processing post: content/posts/2023-01-01-first.md
//!     title:  First Post
//!     date:   2023-01-01
//!     output: output/posts/2023-01-01-first.html
//! Skipped: content/posts/_draft.md (draft)
//! Generating article listing ...
//! Finished! (built: 1, skipped: 1)
//! ```
//!
//! ## Check
//!
//! ```text
//! Valid: content/posts/2023-01-01-first.md (2023-01-01, First Post)
//! Skipped: content/posts/broken.md (invalid header: line 4 (date): ...)
//! Checked 2 posts: 1 valid, 1 skipped
//! ```
//!
//! Build lines are printed as the build runs, one [`BuildEvent`] at a time,
//! with the summary once it finishes. Posts appear in discovery order.
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout.

use crate::generate::{BuildEvent, BuildReport, CheckReport};
use crate::post::{Post, Skipped};

fn post_lines(post: &Post) -> Vec<String> {
    vec![
        format!("Processing post: {}", post.src.display()),
        format!("    title:  {}", post.header.title),
        format!("    date:   {}", post.header.date),
        format!("    output: {}", post.dst.display()),
    ]
}

fn skipped_line(skipped: &Skipped) -> String {
    format!("Skipped: {} ({})", skipped.src.display(), skipped.reason)
}

/// Final summary line with built and skipped counts.
pub fn format_summary(processed: usize, skipped: usize) -> String {
    format!("Finished! (built: {processed}, skipped: {skipped})")
}

/// Progress lines for one build step.
pub fn format_build_event(event: &BuildEvent<'_>) -> Vec<String> {
    match event {
        BuildEvent::Initialized => vec!["Build directories initialized.".to_string()],
        BuildEvent::PostRendered(post) => post_lines(post),
        BuildEvent::PostSkipped(skipped) => vec![skipped_line(skipped)],
        BuildEvent::ListingStarted => vec!["Generating article listing ...".to_string()],
    }
}

pub fn print_build_event(event: &BuildEvent<'_>) {
    for line in format_build_event(event) {
        println!("{}", line);
    }
}

pub fn print_summary(report: &BuildReport) {
    println!("{}", format_summary(report.processed(), report.skipped_count()));
}

/// Lines for a validation-only run.
pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = Vec::new();
    for post in &report.posts {
        lines.push(format!(
            "Valid: {} ({}, {})",
            post.src.display(),
            post.header.date,
            post.header.title
        ));
    }
    for skipped in &report.skipped {
        lines.push(skipped_line(skipped));
    }
    let total = report.posts.len() + report.skipped.len();
    lines.push(format!(
        "Checked {} post{}: {} valid, {} skipped",
        total,
        if total == 1 { "" } else { "s" },
        report.posts.len(),
        report.skipped.len()
    ));
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
