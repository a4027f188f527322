//! Block-level recognizers.
//!
//! Each recognizer is a line-anchored pass over the whole remaining text that
//! rewrites matched regions into their final HTML wrapper. Container blocks
//! (lists and blockquotes) re-enter the full pipeline for their content through
//! [`NestedParser`] and park the finished HTML so that later passes of the
//! enclosing parse treat it as opaque.

pub(crate) mod blockquote;
pub(crate) mod code;
pub(crate) mod headings;
pub(crate) mod lists;
pub(crate) mod paragraphs;
pub(crate) mod rules;

use std::sync::LazyLock;

use regex::Regex;

use crate::fragments;

/// Allow-listed block-level tags at the start of a line.
pub(crate) static BLOCK_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^<(blockquote|div|dl|fieldset|form|h[1-6]|hr|li|ol|p|pre|table|ul)(?:\s[^>]*)?/?>",
    )
    .expect("invalid block tag regex")
});

/// How the content of a (sub-)document is laid out.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Layout {
    /// Text runs become `<p>` paragraphs.
    Block,
    /// Text runs stay bare (tight list items).
    Tight,
}

/// Re-entry point into the pipeline for container blocks.
pub(crate) trait NestedParser {
    /// Render `text` as an independent sub-document.
    fn parse_nested(&mut self, text: &str, layout: Layout) -> String;

    /// Park finished HTML and return the placeholder that stands in for it.
    fn park(&mut self, html: String) -> String;
}

/// Flavour of a list item marker.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListKind {
    /// `-`, `+` or `*` marker.
    Unordered,
    /// `1.` style marker.
    Ordered,
}

/// Structural classification of a single line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or whitespace only.
    Blank,
    /// ATX heading (`#` prefix).
    Heading,
    /// Horizontal rule.
    Rule,
    /// Indented by a tab or at least four spaces.
    CodeBlock,
    /// Starts with a list marker.
    ListItem(ListKind),
    /// Starts with `>`.
    BlockQuote,
    /// Starts with an allow-listed block-level HTML tag.
    RawHtml,
    /// Anything else.
    Paragraph,
}

/// Classify a line of Markdown.
///
/// Up to three leading spaces are insignificant; a tab or four spaces make the
/// line part of a code block.
///
/// # Examples
///
/// ```
/// use mdpass::{LineKind, ListKind, classify_line};
///
/// assert_eq!(classify_line("  "), LineKind::Blank);
/// assert_eq!(classify_line("## Title"), LineKind::Heading);
/// assert_eq!(classify_line("* * *"), LineKind::Rule);
/// assert_eq!(classify_line("12. twelve"), LineKind::ListItem(ListKind::Ordered));
/// assert_eq!(classify_line("    let x = 1;"), LineKind::CodeBlock);
/// assert_eq!(classify_line("<div class=\"note\">"), LineKind::RawHtml);
/// assert_eq!(classify_line("Hello"), LineKind::Paragraph);
/// ```
#[must_use]
pub fn classify_line(line: &str) -> LineKind {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }
    if line.starts_with('\t') || line.starts_with("    ") {
        return LineKind::CodeBlock;
    }

    let line = line.trim_start_matches(' ');
    if line.starts_with(fragments::OPEN) || BLOCK_TAG.is_match(line) {
        LineKind::RawHtml
    } else if line.starts_with('#') {
        LineKind::Heading
    } else if rules::is_rule(line.trim_end()) {
        LineKind::Rule
    } else if line.starts_with('>') {
        LineKind::BlockQuote
    } else if let Some((kind, _)) = list_marker(line) {
        LineKind::ListItem(kind)
    } else {
        LineKind::Paragraph
    }
}

/// Detect a list marker at the very start of `line`.
///
/// Returns the marker kind and its width in bytes (`-` is 1, `12.` is 3).
/// The marker must be followed by a space or tab.
pub(crate) fn list_marker(line: &str) -> Option<(ListKind, usize)> {
    let bytes = line.as_bytes();
    let (kind, width) = match bytes.first()? {
        b'-' | b'+' | b'*' => (ListKind::Unordered, 1),
        b'0'..=b'9' => {
            let digits = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
            if bytes.get(digits) != Some(&b'.') {
                return None;
            }
            (ListKind::Ordered, digits + 1)
        }
        _ => return None,
    };
    matches!(bytes.get(width), Some(b' ' | b'\t')).then_some((kind, width))
}
