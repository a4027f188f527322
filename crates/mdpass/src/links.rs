//! Link and image resolution.

use std::fmt::Write;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::escape::{html_escape, is_escaped};
use crate::references::References;

/// `[label](url "title")` and `![alt](url 'title')`.
static INLINE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(!?)\[([^\]]+)\]\([ \t]*<?([^\s"'()<>]+)>?(?:[ \t]+(?:"([^"]*)"|'([^']*)'))?[ \t]*\)"#,
    )
    .expect("invalid inline link regex")
});

/// `[label][id]`, `[label] [id]` and `[label][]`.
static REFERENCE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(!?)\[([^\]]+)\][ ]?\[([^\]]*)\]").expect("invalid reference link regex")
});

static AUTOLINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([a-zA-Z0-9]+://[^<>\s]*)>").expect("invalid autolink regex")
});

static EMAIL_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<([^@<>\s]+@[^<>.\s]+\.[^<>\s]+)>").expect("invalid email link regex")
});

/// Attribute values written in the text: inline link URLs and titles,
/// autolinks and email links.
static LINK_TARGET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"\]\([ \t]*<?[^\s"'()<>]+>?(?:[ \t]+(?:"[^"]*"|'[^']*'))?|<[a-zA-Z0-9]+://[^<>\s]*>|<[^@<>\s]+@[^<>.\s]+\.[^<>\s]+>"#,
    )
    .expect("invalid link target regex")
});

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("invalid tag regex"));

/// Backslash-escape emphasis delimiters inside link destinations and titles.
///
/// Runs before emphasis so that `http://host/a_b_c` keeps its underscores;
/// the escapes are resolved by the final unescape pass.
pub(crate) fn shield_targets(text: &str) -> String {
    LINK_TARGET
        .replace_all(text, |caps: &Captures| shield(&caps[0]))
        .into_owned()
}

fn shield(target: &str) -> String {
    let mut out = String::with_capacity(target.len() + 8);
    let mut escaped = false;
    for c in target.chars() {
        if matches!(c, '*' | '_') && !escaped {
            out.push('\\');
        }
        escaped = c == '\\' && !escaped;
        out.push(c);
    }
    out
}

/// Resolve inline links, reference links, autolinks and email links, in
/// that order.
///
/// A reference link whose id is not defined is left as written, and so is
/// a link whose opening bracket is backslash-escaped.
pub(crate) fn replace_links(text: &str, references: &References) -> String {
    let inline = INLINE_LINK.replace_all(text, |caps: &Captures| {
        if starts_escaped(text, caps) {
            return caps[0].to_owned();
        }
        let title = caps.get(4).or_else(|| caps.get(5)).map(|m| m.as_str());
        link_html(!caps[1].is_empty(), &caps[2], &caps[3], title)
    });

    let text = REFERENCE_LINK.replace_all(&inline, |caps: &Captures| {
        if starts_escaped(&inline, caps) {
            return caps[0].to_owned();
        }
        let label = &caps[2];
        let id = if caps[3].is_empty() { label } else { &caps[3] };
        match references.get(id) {
            Some(reference) => {
                let url = html_escape(&reference.url, true);
                let title = reference.title.as_deref().map(|t| html_escape(t, true));
                link_html(!caps[1].is_empty(), label, &url, title.as_deref())
            }
            None => caps[0].to_owned(),
        }
    });

    let text = AUTOLINK.replace_all(&text, r#"<a href="${1}">${1}</a>"#);
    EMAIL_LINK
        .replace_all(&text, r#"<a href="mailto:${1}">${1}</a>"#)
        .into_owned()
}

/// Check if the match begins with a backslash-escaped character.
fn starts_escaped(text: &str, caps: &Captures) -> bool {
    caps.get(0)
        .is_some_and(|m| is_escaped(text.as_bytes(), m.start()))
}

fn link_html(image: bool, label: &str, url: &str, title: Option<&str>) -> String {
    let mut html = if image {
        format!(r#"<img src="{url}" alt="{}""#, alt_text(label))
    } else {
        format!(r#"<a href="{url}""#)
    };
    if let Some(title) = title {
        write!(html, r#" title="{title}""#).unwrap();
    }
    if image {
        html.push('>');
    } else {
        write!(html, ">{label}</a>").unwrap();
    }
    html
}

/// Alt text is plain text: markup rendered inside the label is dropped.
fn alt_text(label: &str) -> String {
    TAG.replace_all(label, "").replace('"', "&quot;")
}
