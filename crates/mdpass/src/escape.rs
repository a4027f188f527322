//! HTML entity escaping and Markdown backslash escapes.
//!
//! Backslash escapes survive every rewriting pass untouched and are only
//! resolved by [`markdown_unescape`], the last step of each parse.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Punctuation that a backslash can escape.
pub const ESCAPABLE: [char; 15] = [
    '\\', '`', '*', '_', '(', ')', '{', '}', '[', ']', '#', '+', '-', '.', '!',
];

/// `&`, optionally followed by the body of a valid entity (`amp;`, `#39;`).
static AMPERSAND: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#?\w{1,6};)?").expect("invalid ampersand regex"));

/// `<`, optionally followed by the character that makes it a tag opener.
static OPEN_ANGLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z/])?").expect("invalid angle bracket regex"));

static BACKSLASH_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\([\\`*_(){}\[\]#+\-.!])").expect("invalid backslash escape regex")
});

/// Escape HTML special characters.
///
/// Every `&` that does not start an entity becomes `&amp;`. With
/// `escape_inline_html` set, all `<` and `>` are escaped; otherwise only a `<`
/// that cannot open a tag (not followed by a letter or `/`) is escaped, so
/// inline HTML passes through.
///
/// # Examples
///
/// ```
/// use mdpass::html_escape;
///
/// assert_eq!(html_escape("a & b &amp; <em>c</em> < d", false), "a &amp; b &amp; <em>c</em> &lt; d");
/// assert_eq!(html_escape("<em>", true), "&lt;em&gt;");
/// ```
#[must_use]
pub fn html_escape(text: &str, escape_inline_html: bool) -> String {
    let text = AMPERSAND.replace_all(text, |caps: &Captures| match caps.get(1) {
        Some(entity) => format!("&{}", entity.as_str()),
        None => "&amp;".to_owned(),
    });

    if escape_inline_html {
        return text.replace('<', "&lt;").replace('>', "&gt;");
    }

    OPEN_ANGLE
        .replace_all(&text, |caps: &Captures| match caps.get(1) {
            Some(next) => format!("<{}", next.as_str()),
            None => "&lt;".to_owned(),
        })
        .into_owned()
}

/// Backslash-escape every reserved punctuation character.
///
/// Used on verbatim code content so that later passes cannot reinterpret it.
/// Backslashes are escaped too, which makes the operation exactly reversible
/// by [`markdown_unescape`].
#[must_use]
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if ESCAPABLE.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Resolve backslash escapes (`\*` → `*`, `\\` → `\`).
#[must_use]
pub fn markdown_unescape(text: &str) -> String {
    BACKSLASH_ESCAPE.replace_all(text, "${1}").into_owned()
}

/// Check if the byte at `at` is preceded by an odd number of backslashes.
pub(crate) fn is_escaped(bytes: &[u8], at: usize) -> bool {
    bytes[..at].iter().rev().take_while(|&&b| b == b'\\').count() % 2 == 1
}
