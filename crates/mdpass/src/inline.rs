//! Code spans, strong and emphasis.
//!
//! Delimiters are matched by forward scans over the text rather than a single
//! regex: an opener is any delimiter not escaped by a backslash, and the body
//! runs lazily up to the first acceptable closer.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::Regex;

use crate::escape::{escape_text, html_escape, is_escaped};

static BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("invalid blank line regex"));

/// Strong first, so that double delimiters are taken before single ones.
const DELIMITERS: [(&str, &str); 4] = [("**", "strong"), ("__", "strong"), ("*", "em"), ("_", "em")];

/// Replace backtick code spans with `<code>` elements.
///
/// The closing run must have exactly as many backticks as the opening one. A
/// span whose body contains a blank line is not a code span. The body is
/// trimmed, backslash-escaped and HTML-escaped so that no later pass touches it.
pub(crate) fn replace_code_spans(text: &str) -> String {
    let bytes = text.as_bytes();
    let mut out = String::with_capacity(text.len());
    let mut copied = 0;
    let mut pos = 0;
    while let Some(found) = text[pos..].find('`') {
        let open = pos + found;
        if is_escaped(bytes, open) {
            pos = open + 1;
            continue;
        }
        let width = run_length(bytes, open, b'`');
        let body_start = open + width;
        match find_backtick_run(bytes, body_start, width) {
            Some(close) if !BLANK_LINE.is_match(&text[body_start..close]) => {
                out.push_str(&text[copied..open]);
                let body = html_escape(&escape_text(text[body_start..close].trim()), true);
                write!(out, "<code>{body}</code>").unwrap();
                pos = close + width;
                copied = pos;
            }
            _ => pos = body_start,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Replace `**`/`__` with `<strong>` and `*`/`_` with `<em>`.
pub(crate) fn replace_emphasis(text: &str) -> String {
    let mut text = text.to_owned();
    for (marker, tag) in DELIMITERS {
        text = substitute(&text, marker, tag);
    }
    text
}

fn substitute(text: &str, marker: &str, tag: &str) -> String {
    let mut out = String::with_capacity(text.len() + 32);
    let mut copied = 0;
    let mut pos = 0;
    while let Some(found) = text[pos..].find(marker) {
        let open = pos + found;
        let body_start = open + marker.len();
        let closing = if is_escaped(text.as_bytes(), open) {
            None
        } else {
            find_closing(text, body_start, marker)
        };
        match closing {
            Some((body_end, close_end)) => {
                out.push_str(&text[copied..open]);
                write!(out, "<{tag}>{}</{tag}>", &text[body_start..body_end]).unwrap();
                pos = close_end;
                copied = close_end;
            }
            None => pos = open + 1,
        }
    }
    out.push_str(&text[copied..]);
    out
}

/// Find the closer for a body starting at `body_start`.
///
/// Returns the end of the body and the end of the closing delimiter. The body
/// must start with a non-space character, may not contain a blank line and
/// may not consist of delimiter characters only. A closer must not follow
/// whitespace or a backslash; when more delimiter characters follow it, it
/// moves to the end of that run.
fn find_closing(text: &str, body_start: usize, marker: &str) -> Option<(usize, usize)> {
    let bytes = text.as_bytes();
    let first = text[body_start..].chars().next()?;
    if first.is_whitespace() {
        return None;
    }

    let mut pos = body_start + first.len_utf8();
    while let Some(found) = text[pos..].find(marker) {
        let close = pos + found;
        if BLANK_LINE.is_match(&text[body_start..close]) {
            return None;
        }
        if bytes[close - 1].is_ascii_whitespace() || is_escaped(bytes, close) {
            pos = close + 1;
            continue;
        }
        let run_end = close + run_length(bytes, close, bytes[close]);
        let body_end = run_end - marker.len();
        if text[body_start..body_end].bytes().all(|b| b == bytes[close]) {
            return None;
        }
        return Some((body_end, run_end));
    }
    None
}

fn run_length(bytes: &[u8], from: usize, byte: u8) -> usize {
    bytes[from..].iter().take_while(|&&b| b == byte).count()
}

/// Start of the first backtick run of exactly `width` at or after `from`.
fn find_backtick_run(bytes: &[u8], from: usize, width: usize) -> Option<usize> {
    let mut pos = from;
    while pos < bytes.len() {
        if bytes[pos] == b'`' {
            let run = run_length(bytes, pos, b'`');
            if run == width {
                return Some(pos);
            }
            pos += run;
        } else {
            pos += 1;
        }
    }
    None
}
