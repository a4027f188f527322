//! Indented code blocks.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::{escape_text, html_escape};

/// Consecutive lines indented by four spaces or a tab; blank lines in between
/// belong to the block.
static CODE_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:[ ]{4}|\t).*(?:\n(?:(?:[ ]{4}|\t).*|[ \t]*))*(?:\n|\z)")
        .expect("invalid code block regex")
});

static INDENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(?:[ ]{4}|\t)").expect("invalid indent regex"));

/// Replace indented code blocks with `<pre><code>` elements.
///
/// One level of indentation is removed from every line and trailing blank
/// lines are dropped; indented lines holding only whitespace are not a
/// block. The content is backslash-escaped and then HTML-escaped
/// so that no later pass reinterprets it.
pub(crate) fn replace_code_blocks(text: &str) -> String {
    CODE_BLOCK
        .replace_all(text, |caps: &Captures| {
            let block = &caps[0];
            if block.trim().is_empty() {
                return block.to_owned();
            }
            let content = INDENT.replace_all(block, "");
            let content = html_escape(&escape_text(content.trim_end()), true);
            let newline = if block.ends_with('\n') { "\n" } else { "" };
            format!("<pre><code>{content}</code></pre>{newline}")
        })
        .into_owned()
}
