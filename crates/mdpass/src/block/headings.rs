//! Setext and ATX headings.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Text line underlined with `=`. The text may not start with `#`.
static SETEXT_H1: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*[^#\s].*)\n=+[ \t]*$").expect("invalid setext h1 regex")
});

/// Text line underlined with `-`.
static SETEXT_H2: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^([ \t]*[^#\s].*)\n-+[ \t]*$").expect("invalid setext h2 regex")
});

/// `#` prefix, content, optional closing `#`s.
static ATX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^(#+)(.*?)#*[ \t]*$").expect("invalid atx heading regex"));

/// Replace Setext headings, then ATX headings.
pub(crate) fn replace_headings(text: &str) -> String {
    let text = SETEXT_H1.replace_all(text, |caps: &Captures| heading(1, &caps[1]));
    let text = SETEXT_H2.replace_all(&text, |caps: &Captures| heading(2, &caps[1]));
    ATX.replace_all(&text, |caps: &Captures| {
        let level = caps[1].len().min(6);
        heading(level, &caps[2])
    })
    .into_owned()
}

fn heading(level: usize, content: &str) -> String {
    format!("<h{level}>{}</h{level}>", content.trim())
}
