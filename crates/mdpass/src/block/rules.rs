//! Horizontal rules.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A line of one rule character (`-`, `_` or `*`) with interior spaces.
static RULE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:-[- ]+|_[_ ]+|\*[* ]+)$").expect("invalid rule regex")
});

/// Replace rule lines with `<hr/>`.
///
/// A line with fewer than three rule characters is left as it is.
pub(crate) fn replace_rules(text: &str) -> String {
    RULE.replace_all(text, |caps: &Captures| {
        let line = &caps[0];
        if is_rule(line) {
            "<hr/>".to_owned()
        } else {
            line.to_owned()
        }
    })
    .into_owned()
}

/// Check if `line` is made of at least three copies of one rule character,
/// optionally separated by spaces.
pub(crate) fn is_rule(line: &str) -> bool {
    let Some(marker) = line.chars().next() else {
        return false;
    };
    if !matches!(marker, '-' | '_' | '*') {
        return false;
    }
    let mut count = 0;
    for c in line.chars() {
        match c {
            ' ' => {}
            c if c == marker => count += 1,
            _ => return false,
        }
    }
    count >= 3
}
