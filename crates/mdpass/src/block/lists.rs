//! Ordered and unordered lists.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Layout, ListKind, NestedParser, list_marker};

/// A marker line, any non-blank continuation lines and trailing blank lines,
/// repeated while the next line is another marker line.
static UNORDERED_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^[-+*][ \t]+.*(?:\n|\z)(?:^.+(?:\n|\z))*(?:^[ \t]*\n)*)+")
        .expect("invalid unordered list regex")
});

static ORDERED_LIST: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)(?:^[0-9]+\.[ \t]+.*(?:\n|\z)(?:^.+(?:\n|\z))*(?:^[ \t]*\n)*)+")
        .expect("invalid ordered list regex")
});

/// Hanging indent removed from item lines: one tab or up to four spaces.
static HANGING_INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:\t|[ ]{1,4})").expect("invalid hanging indent regex"));

static ENDS_WITH_BLANK_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n$").expect("invalid blank line regex"));

/// Replace unordered, then ordered lists.
pub(crate) fn replace_lists(text: &str, parser: &mut impl NestedParser) -> String {
    let text = replace_kind(text, ListKind::Unordered, parser);
    replace_kind(&text, ListKind::Ordered, parser)
}

fn replace_kind(text: &str, kind: ListKind, parser: &mut impl NestedParser) -> String {
    let pattern = match kind {
        ListKind::Unordered => &UNORDERED_LIST,
        ListKind::Ordered => &ORDERED_LIST,
    };
    pattern
        .replace_all(text, |caps: &Captures| {
            let list = &caps[0];
            let html = render_list(list, kind, parser);
            let mut token = parser.park(html);
            if list.ends_with('\n') {
                token.push('\n');
            }
            token
        })
        .into_owned()
}

/// Render one list.
///
/// An item is loose when its content ends with a blank line and another item
/// follows; once an item is loose, every later item of the list is too. Loose
/// items are parsed as blocks (paragraphs), tight items inline.
fn render_list(list: &str, kind: ListKind, parser: &mut impl NestedParser) -> String {
    let tag = match kind {
        ListKind::Unordered => "ul",
        ListKind::Ordered => "ol",
    };
    let items = split_items(list, kind);

    let mut html = format!("<{tag}>");
    let mut loose = false;
    for (index, item) in items.iter().enumerate() {
        let has_next = index + 1 < items.len();
        loose = loose || (has_next && ENDS_WITH_BLANK_LINE.is_match(item));

        let content = HANGING_INDENT.replace_all(item.trim_end(), "");
        let layout = if loose { Layout::Block } else { Layout::Tight };
        let rendered = parser.parse_nested(&content, layout);
        write!(html, "<li>{rendered}</li>").unwrap();
    }
    write!(html, "</{tag}>").unwrap();
    html
}

/// Split a list into item contents, each starting right after its marker.
fn split_items(list: &str, kind: ListKind) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;
    for line in list.split_inclusive('\n') {
        if let Some((found, width)) = list_marker(line)
            && found == kind
        {
            starts.push((offset, offset + width));
        }
        offset += line.len();
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &(_, content_start))| {
            let end = starts.get(i + 1).map_or(list.len(), |&(next, _)| next);
            &list[content_start..end]
        })
        .collect()
}
