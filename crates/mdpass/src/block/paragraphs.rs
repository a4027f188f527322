//! Paragraph wrapping and block-scoped inline rendering.
//!
//! Runs after every other block pass. The text is split into blank lines,
//! allow-listed block-level elements (or parked fragments) and runs of text
//! lines. Inline markup is rendered inside each unit on its own, so a span can
//! never start in one block and end in another, and each text run becomes a
//! paragraph.

use std::borrow::Cow;
use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use super::{BLOCK_TAG, Layout, LineKind, classify_line};
use crate::fragments;

/// Two or more spaces at the end of a line.
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ ]{2,}\n").expect("invalid line break regex"));

/// Render inline markup per block and wrap text runs in `<p>` (or leave them
/// bare for [`Layout::Tight`]).
///
/// `inline` is applied to every text run and to every block-level element
/// except `<pre>` blocks and parked fragments, which are copied verbatim.
/// With `hard_breaks`, two trailing spaces inside a run become `<br/>`.
pub(crate) fn replace_paragraphs(
    text: &str,
    layout: Layout,
    hard_breaks: bool,
    mut inline: impl FnMut(&str) -> String,
) -> String {
    let mut out = String::with_capacity(text.len() + 64);
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let line = first_line(rest);
        pos += match classify_line(line) {
            LineKind::Blank => {
                out.push_str(line);
                line.len()
            }
            LineKind::RawHtml => {
                let indent = line.len() - line.trim_start_matches(' ').len();
                let end = indent + html_block_end(&rest[indent..]);
                let block = &rest[..end];
                if is_verbatim(&rest[indent..]) {
                    out.push_str(block);
                } else {
                    out.push_str(&inline(block));
                }
                end
            }
            _ => {
                let end = text_run_end(rest);
                push_text_run(&mut out, &rest[..end], layout, hard_breaks, &mut inline);
                end
            }
        };
    }
    out
}

fn first_line(text: &str) -> &str {
    text.find('\n').map_or(text, |i| &text[..=i])
}

/// End of a run of text lines: the start of the next blank line or block tag.
fn text_run_end(text: &str) -> usize {
    let mut offset = 0;
    for (index, line) in text.split_inclusive('\n').enumerate() {
        if index > 0 && matches!(classify_line(line), LineKind::Blank | LineKind::RawHtml) {
            return offset;
        }
        offset += line.len();
    }
    text.len()
}

fn push_text_run(
    out: &mut String,
    run: &str,
    layout: Layout,
    hard_breaks: bool,
    inline: &mut impl FnMut(&str) -> String,
) {
    let body = run.trim_start();
    let body = inline(body.strip_suffix('\n').unwrap_or(body));
    let body = if hard_breaks {
        LINE_BREAK.replace_all(&body, "<br/>\n")
    } else {
        Cow::Borrowed(body.as_str())
    };

    match layout {
        Layout::Block => write!(out, "<p>{body}</p>").unwrap(),
        Layout::Tight => out.push_str(&body),
    }
    if run.ends_with('\n') {
        out.push('\n');
    }
}

/// Parked fragments and `<pre>` blocks are final HTML.
fn is_verbatim(block: &str) -> bool {
    block.starts_with(fragments::OPEN)
        || BLOCK_TAG
            .captures(block)
            .is_some_and(|caps| &caps[1] == "pre")
}

/// End of the block-level element (or parked fragment) starting `text`.
///
/// Void and self-closing tags end with the tag itself. Otherwise the element
/// ends after its matching closing tag; an element that is never closed
/// extends to the end of the text.
fn html_block_end(text: &str) -> usize {
    if let Some(len) = fragments::placeholder_len(text) {
        return len;
    }
    let Some(caps) = BLOCK_TAG.captures(text) else {
        return first_line(text).len();
    };
    let open = &caps[0];
    let name = &caps[1];
    if name == "hr" || open.ends_with("/>") {
        return open.len();
    }
    closing_tag_end(text, open.len(), name).unwrap_or(text.len())
}

/// Find the end of the `</name>` that balances the already opened element.
fn closing_tag_end(text: &str, from: usize, name: &str) -> Option<usize> {
    let close = format!("</{name}>");
    let mut depth = 1usize;
    let mut pos = from;
    while let Some(found) = text[pos..].find('<') {
        let at = pos + found;
        let rest = &text[at..];
        if rest.starts_with(&close) {
            depth -= 1;
            if depth == 0 {
                return Some(at + close.len());
            }
        } else if opens_element(rest, name) {
            depth += 1;
        }
        pos = at + 1;
    }
    None
}

fn opens_element(tag: &str, name: &str) -> bool {
    tag[1..].strip_prefix(name).is_some_and(|after| {
        matches!(
            after.bytes().next(),
            Some(b'>' | b' ' | b'\t' | b'\n' | b'/')
        )
    })
}
