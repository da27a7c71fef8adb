//! Post header (front matter) parsing.
//!
//! Every post starts with a fixed six-line block:
//!
//! ```text
//! ---
//! title: First Post
//! description: Notes on getting started
//! date: 2023-01-01
//! tags: rust, blogging
//! ---
//! ```
//!
//! The lines are checked strictly in this order by a small state machine,
//! one state per expected line. The first line that does not match aborts
//! the parse with a [`HeaderError`] naming the line number and field, so a
//! broken post is reported precisely and never half-parsed.
//!
//! ## Dates
//!
//! Dates are `YYYY-MM-DD` with month `01`-`12` and day `01`-`31`. The day is
//! not checked against the month length: `2023-02-31` is accepted. Existing
//! content relies on that leniency.

use regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

/// Opening and closing line of the header block.
pub const DELIMITER: &str = "---";

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("date pattern compiles"));

/// Publication date of a post. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid date {0:?}, expected YYYY-MM-DD with month 01-12 and day 01-31")]
pub struct InvalidDate(pub String);

impl FromStr for PostDate {
    type Err = InvalidDate;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || InvalidDate(s.to_string());
        let caps = DATE_PATTERN.captures(s).ok_or_else(invalid)?;
        let year: u16 = caps[1].parse().map_err(|_| invalid())?;
        let month: u8 = caps[2].parse().map_err(|_| invalid())?;
        let day: u8 = caps[3].parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(invalid());
        }
        Ok(PostDate { year, month, day })
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

/// Validated header fields of a post.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub title: String,
    pub description: String,
    pub date: PostDate,
    pub tags: Vec<String>,
}

impl Header {
    /// The header as field name → trimmed value pairs, in file order.
    pub fn fields(&self) -> [(&'static str, String); 4] {
        [
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("date", self.date.to_string()),
            ("tags", self.tags.join(", ")),
        ]
    }
}

/// A successfully parsed header and the markdown that follows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedHeader<'a> {
    pub header: Header,
    pub body: &'a str,
}

/// The line the parser is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expect {
    OpenDelimiter,
    Title,
    Description,
    Date,
    Tags,
    CloseDelimiter,
}

impl Expect {
    fn next(self) -> Option<Expect> {
        match self {
            Expect::OpenDelimiter => Some(Expect::Title),
            Expect::Title => Some(Expect::Description),
            Expect::Description => Some(Expect::Date),
            Expect::Date => Some(Expect::Tags),
            Expect::Tags => Some(Expect::CloseDelimiter),
            Expect::CloseDelimiter => None,
        }
    }

    /// What a matching line looks like, for error messages.
    fn pattern(self) -> &'static str {
        match self {
            Expect::OpenDelimiter | Expect::CloseDelimiter => DELIMITER,
            Expect::Title => "title: <value>",
            Expect::Description => "description: <value>",
            Expect::Date => "date: YYYY-MM-DD",
            Expect::Tags => "tags: <tag>, <tag>",
        }
    }
}

impl fmt::Display for Expect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Expect::OpenDelimiter => "opening delimiter",
            Expect::Title => "title",
            Expect::Description => "description",
            Expect::Date => "date",
            Expect::Tags => "tags",
            Expect::CloseDelimiter => "closing delimiter",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HeaderErrorKind {
    #[error("file ended before the header was complete")]
    Missing,
    #[error("expected `{pattern}`, found {found:?}")]
    Malformed { pattern: &'static str, found: String },
    #[error("value is empty")]
    EmptyValue,
    #[error(transparent)]
    InvalidDate(#[from] InvalidDate),
}

/// Why a header was rejected: the 1-based line, the field expected there,
/// and what was wrong with it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line} ({expected}): {kind}")]
pub struct HeaderError {
    pub line: usize,
    pub expected: Expect,
    pub kind: HeaderErrorKind,
}

/// Field values accumulated while walking the header lines.
#[derive(Default)]
struct HeaderBuilder {
    title: Option<String>,
    description: Option<String>,
    date: Option<PostDate>,
    tags: Option<Vec<String>>,
}

impl HeaderBuilder {
    fn accept(&mut self, expect: Expect, line: &str) -> Result<(), HeaderErrorKind> {
        let malformed = || HeaderErrorKind::Malformed {
            pattern: expect.pattern(),
            found: line.to_string(),
        };

        match expect {
            Expect::OpenDelimiter | Expect::CloseDelimiter => {
                if line.trim_end() != DELIMITER {
                    return Err(malformed());
                }
            }
            Expect::Title => {
                let value = field_value("title", line).ok_or_else(malformed)??;
                self.title = Some(value.to_string());
            }
            Expect::Description => {
                let value = field_value("description", line).ok_or_else(malformed)??;
                self.description = Some(value.to_string());
            }
            Expect::Date => {
                let value = field_value("date", line).ok_or_else(malformed)??;
                self.date = Some(value.parse()?);
            }
            Expect::Tags => {
                let value = field_value("tags", line).ok_or_else(malformed)??;
                let tags = split_tags(value);
                if tags.is_empty() {
                    return Err(HeaderErrorKind::EmptyValue);
                }
                self.tags = Some(tags);
            }
        }
        Ok(())
    }

    fn finish(self) -> Option<Header> {
        Some(Header {
            title: self.title?,
            description: self.description?,
            date: self.date?,
            tags: self.tags?,
        })
    }
}

/// Extract the trimmed value of a `key: value` line.
///
/// `None` when the line is not for `key`; `Some(Err)` when the value is blank.
fn field_value<'a>(key: &str, line: &'a str) -> Option<Result<&'a str, HeaderErrorKind>> {
    let value = line.strip_prefix(key)?.strip_prefix(':')?.trim();
    if value.is_empty() {
        Some(Err(HeaderErrorKind::EmptyValue))
    } else {
        Some(Ok(value))
    }
}

/// Split a comma-separated tag list, dropping blank entries.
pub fn split_tags(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parse the header block at the top of a post.
///
/// On success, returns the fields and the markdown body following the
/// closing delimiter. On the first line that does not match, returns an
/// error for that line and discards everything parsed so far.
pub fn parse_header(text: &str) -> Result<ParsedHeader<'_>, HeaderError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut builder = HeaderBuilder::default();
    let mut state = Some(Expect::OpenDelimiter);
    let mut line_no = 0;
    let mut body_start = 0;

    for raw in text.split_inclusive('\n') {
        let Some(expect) = state else { break };
        line_no += 1;
        body_start += raw.len();

        let line = raw.trim_end_matches(['\n', '\r']);
        builder.accept(expect, line).map_err(|kind| HeaderError {
            line: line_no,
            expected: expect,
            kind,
        })?;
        state = expect.next();
    }

    if let Some(expect) = state {
        return Err(HeaderError {
            line: line_no + 1,
            expected: expect,
            kind: HeaderErrorKind::Missing,
        });
    }

    let header = builder.finish().ok_or(HeaderError {
        line: line_no,
        expected: Expect::CloseDelimiter,
        kind: HeaderErrorKind::Missing,
    })?;

    Ok(ParsedHeader {
        header,
        body: &text[body_start..],
    })
}
