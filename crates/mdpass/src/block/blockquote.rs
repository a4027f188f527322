//! Blockquotes.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Layout, NestedParser};

/// A `>` line, lazy continuation lines and trailing blank lines, repeated
/// while the next line starts with `>` again.
static BLOCK_QUOTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^>.*(?:\n|\z)(?:^.+(?:\n|\z))*(?:^[ \t]*\n)*)+")
        .expect("invalid blockquote regex")
});

/// Leading `>` and up to three spaces before the first non-space character.
static QUOTE_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^>?(?:[ ]{0,3}(\S))?").expect("invalid quote marker regex"));

/// Replace blockquotes with `<blockquote>` elements.
///
/// The de-quoted content is rendered through the whole pipeline, so quotes
/// nest and may contain any other block.
pub(crate) fn replace_blockquotes(text: &str, parser: &mut impl NestedParser) -> String {
    BLOCK_QUOTE
        .replace_all(text, |caps: &Captures| {
            let quote = &caps[0];
            let content = QUOTE_MARKER.replace_all(quote, "${1}");
            let inner = parser.parse_nested(&content, Layout::Block);
            let mut token = parser.park(format!("<blockquote>{inner}</blockquote>"));
            if quote.ends_with('\n') {
                token.push('\n');
            }
            token
        })
        .into_owned()
}
