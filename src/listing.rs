//! The article listing on `articles.html`.
//!
//! Published posts are sorted newest first and rendered as one `<li>` each:
//!
//! ```text
//! <ul class="articles">
//! <li><b style="color: #14263b;">2023-02-01</b> <a href="posts/second.html">Second</a></li>
//! <li><b style="color: #14263b;">2023-01-01</b> <a href="posts/first.html">First</a></li>
//! </ul>
//! ```
//!
//! The list is spliced into the rendered articles page right after its
//! [`ARTICLES_MARKER`], which the page's markdown carries as a raw HTML block.

use crate::post::Post;
use maud::html;

/// Anchor in the articles page after which the listing is inserted.
pub const ARTICLES_MARKER: &str = "<article>";

/// Sort posts newest first. Posts with the same date keep their discovery order.
pub fn sort_posts(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.header.date.cmp(&a.header.date));
}

/// Render the `<ul>` listing for posts already in display order.
pub fn render_listing(posts: &[Post]) -> String {
    let mut list = String::from("<ul class=\"articles\">\n");
    for post in posts {
        let item = html! {
            li {
                b style="color: #14263b;" { (post.header.date) }
                " "
                a href=(post.dst_link) { (post.header.title) }
            }
        };
        list.push_str(&item.into_string());
        list.push('\n');
    }
    list.push_str("</ul>");
    list
}

/// Insert `listing` immediately after the first [`ARTICLES_MARKER`] in `page`.
///
/// Returns `None` when the page has no marker.
pub fn inject_listing(page: &str, listing: &str) -> Option<String> {
    let at = page.find(ARTICLES_MARKER)? + ARTICLES_MARKER.len();
    let mut out = String::with_capacity(page.len() + listing.len() + 1);
    out.push_str(&page[..at]);
    out.push('\n');
    out.push_str(listing);
    out.push_str(&page[at..]);
    Some(out)
}
