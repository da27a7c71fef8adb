//! Page rendering.
//!
//! Every page on the site (posts and the fixed top-level pages alike) has the
//! same shell: a head with two stylesheets, a four-link navigation bar, the
//! converted markdown, and a footer.
//!
//! ```text
//! <!DOCTYPE html>
//! <html lang="en">
//! <head>                  charset, viewport, <title>?, css/normalize.css, css/style.css
//! <body>
//! <nav>                   home · articles · mail · about
//! <main>
//!   ...markdown body...   inserted verbatim
//! </main>
//! <footer>                footer text
//! ```
//!
//! ## Relative Roots
//!
//! Links and stylesheet hrefs are prefixed with [`PageVars::root`]: `.` for
//! top-level pages, `..` for posts one directory deeper. The output therefore
//! works from any location, including straight off the filesystem.
//!
//! ## Template Fragments
//!
//! The shell is written as indented fragments inside this file. [`dedent`]
//! strips the indentation they share, so source indentation never leaks into
//! the emitted markup.

use maud::html;
use pulldown_cmark::{Options, Parser, html as md_html};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("missing template field `{0}`")]
    MissingField(&'static str),
}

/// The named values substituted into the page shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageVars<'a> {
    /// Relative path from the page to the site root (`.` or `..`).
    pub root: &'a str,
    /// Document title. No `<title>` element is emitted when absent.
    pub title: Option<&'a str>,
    /// Address behind the navigation's `mailto:` link.
    pub author_mail: &'a str,
    /// Footer text.
    pub footer_copyright: &'a str,
}

impl PageVars<'_> {
    fn check(&self) -> Result<(), RenderError> {
        let required = [
            ("root", self.root),
            ("author_mail", self.author_mail),
            ("footer_copyright", self.footer_copyright),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(RenderError::MissingField(name));
            }
        }
        Ok(())
    }
}

/// Convert markdown to an HTML fragment.
///
/// Raw HTML blocks (such as the `<article>` listing marker) pass through
/// unchanged.
pub fn markdown_to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_FOOTNOTES);

    let parser = Parser::new_ext(markdown, options);
    let mut html = String::new();
    md_html::push_html(&mut html, parser);
    html
}

/// Wrap an HTML body fragment in the site shell.
pub fn render_page(vars: &PageVars<'_>, body_html: &str) -> Result<String, RenderError> {
    vars.check()?;

    let root = escape(vars.root);
    let author_mail = escape(vars.author_mail);
    let footer = escape(vars.footer_copyright);

    let mut page = fragment(
        r#"
        <!DOCTYPE html>
        <html lang="en">
        <head>
            <meta charset="utf-8">
            <meta name="viewport" content="width=device-width, initial-scale=1">
        "#,
    );

    if let Some(title) = vars.title {
        page.push_str("    ");
        page.push_str(&html! { title { (title) } }.into_string());
        page.push('\n');
    }

    page.push_str(&fragment(&format!(
        r#"
            <link rel="stylesheet" href="{root}/css/normalize.css">
            <link rel="stylesheet" href="{root}/css/style.css">
        </head>
        <body>
        <nav>
            <a href="{root}/index.html">home</a>
            <a href="{root}/articles.html">articles</a>
            <a href="mailto:{author_mail}">mail</a>
            <a href="{root}/about.html">about</a>
        </nav>
        <main>
        "#
    )));

    page.push_str(body_html);
    if !body_html.is_empty() && !body_html.ends_with('\n') {
        page.push('\n');
    }

    page.push_str(&fragment(&format!(
        r#"
        </main>
        <footer>
            <p>{footer}</p>
        </footer>
        </body>
        </html>
        "#
    )));

    Ok(page)
}

fn escape(value: &str) -> String {
    html! { (value) }.into_string()
}

/// Dedent an inline template fragment, dropping the newline right after `r#"`.
fn fragment(text: &str) -> String {
    dedent(text.strip_prefix('\n').unwrap_or(text))
}

/// Remove the leading whitespace shared by every non-blank line.
///
/// Blank lines don't count towards the shared indentation and come out
/// empty. When the lines share no indentation the text is returned as is.
pub fn dedent(text: &str) -> String {
    let margin = common_indent(text);
    if margin.is_empty() {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    for line in text.split_inclusive('\n') {
        let (content, newline) = match line.strip_suffix('\n') {
            Some(content) => (content, "\n"),
            None => (line, ""),
        };
        match content.strip_prefix(margin) {
            Some(rest) => out.push_str(rest),
            None => out.push_str(content.trim_start()),
        }
        out.push_str(newline);
    }
    out
}

fn common_indent(text: &str) -> &str {
    let mut margin: Option<&str> = None;
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = &line[..line.len() - line.trim_start().len()];
        margin = Some(match margin {
            None => indent,
            Some(m) => common_prefix(m, indent),
        });
    }
    margin.unwrap_or("")
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let len = a
        .char_indices()
        .zip(b.chars())
        .take_while(|((_, x), y)| x == y)
        .last()
        .map(|((i, x), _)| i + x.len_utf8())
        .unwrap_or(0);
    &a[..len]
}
