//! Parked HTML fragments.
//!
//! Container blocks render their content through a nested parse. The finished
//! HTML is parked here and replaced in the text by a placeholder built from
//! private-use characters, which no rewriting pass matches. Placeholders are
//! expanded once the top-level parse is complete.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// First character of a placeholder.
pub(crate) const OPEN: char = '\u{E000}';
/// Last character of a placeholder.
pub(crate) const CLOSE: char = '\u{E001}';

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x{E000}([0-9]+)\x{E001}").expect("invalid placeholder regex"));

/// Finished HTML fragments of one render.
#[derive(Debug, Default)]
pub(crate) struct Fragments {
    items: Vec<String>,
}

impl Fragments {
    /// Store `html` and return its placeholder.
    pub(crate) fn park(&mut self, html: String) -> String {
        let index = self.items.len();
        self.items.push(html);
        format!("{OPEN}{index}{CLOSE}")
    }

    /// Expand every placeholder in `text`, including those nested inside
    /// parked fragments.
    ///
    /// A fragment only ever contains placeholders parked before it, so the
    /// expansion terminates.
    pub(crate) fn restore(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| {
                match caps[1].parse::<usize>().ok().and_then(|i| self.items.get(i)) {
                    Some(html) => self.restore(html),
                    None => caps[0].to_owned(),
                }
            })
            .into_owned()
    }
}

/// Length in bytes of the placeholder at the start of `text`, if any.
pub(crate) fn placeholder_len(text: &str) -> Option<usize> {
    let rest = text.strip_prefix(OPEN)?;
    let close = rest.find(CLOSE)?;
    let digits = &rest[..close];
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
        .then(|| OPEN.len_utf8() + close + CLOSE.len_utf8())
}

/// Replace characters that could forge a placeholder.
pub(crate) fn sanitize(text: &str) -> String {
    text.replace([OPEN, CLOSE], "\u{FFFD}")
}
