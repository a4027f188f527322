//! Link reference definitions.
//!
//! Definitions such as `[id]: http://example.com "Title"` are removed from the
//! document before any block pass runs and collected into a [`References`]
//! table that lives for one top-level render.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// 0-3 spaces, `[name]:`, 1-3 spaces, a URL (optionally in `<>`), an optional
/// title in `"…"`, `'…'` or `(…)` and trailing blanks, up to the end of the
/// line.
static REFERENCE_DEFINITION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^[ ]{0,3}\[([^\]]+)\]:[ ]{1,3}<?([^\s"'(]+?)>?(?:\s+["'(]([^"')]+)["')])?[ \t]*$"#,
    )
    .expect("invalid reference definition regex")
});

/// Target of a reference-style link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reference {
    /// Link destination.
    pub url: String,
    /// Title, trimmed and lowercased.
    pub title: Option<String>,
}

/// Reference definitions of one document, keyed by name.
///
/// Names are matched case-sensitively. A later definition of the same name
/// replaces an earlier one.
#[derive(Clone, Debug, Default)]
pub struct References {
    entries: HashMap<String, Reference>,
}

impl References {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition, replacing any previous one with the same name.
    pub fn insert(&mut self, name: impl Into<String>, reference: Reference) {
        self.entries.insert(name.into(), reference);
    }

    /// Look up a definition by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Reference> {
        self.entries.get(name)
    }

    /// Number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the table has no definitions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Strip reference definitions from `text` and collect them.
///
/// The content of each definition line is removed and its line ending kept,
/// so a definition leaves a blank line behind and still separates the text
/// around it.
///
/// # Example
///
/// ```
/// use mdpass::read_references;
///
/// let (text, references) = read_references("[home]: <http://example.com> 'Home Page'\nSee [home][].");
/// assert_eq!(text, "\nSee [home][].");
///
/// let home = references.get("home").unwrap();
/// assert_eq!(home.url, "http://example.com");
/// assert_eq!(home.title.as_deref(), Some("home page"));
/// ```
#[must_use]
pub fn read_references(text: &str) -> (String, References) {
    let mut references = References::new();
    let stripped = REFERENCE_DEFINITION
        .replace_all(text, |caps: &Captures| {
            let title = caps
                .get(3)
                .map(|title| title.as_str().trim().to_lowercase());
            references.insert(
                &caps[1],
                Reference {
                    url: caps[2].to_owned(),
                    title,
                },
            );
            ""
        })
        .into_owned();

    tracing::debug!(
        reference_count = references.len(),
        "Read reference definitions"
    );
    (stripped, references)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_definition_with_double_quoted_title() {
        let (text, refs) = read_references("[id]: http://example.com \"Title\"\n[text][id]");
        assert_eq!(text, "\n[text][id]");
        assert_eq!(
            refs.get("id"),
            Some(&Reference {
                url: "http://example.com".to_owned(),
                title: Some("title".to_owned()),
            })
        );
    }

    #[test]
    fn test_definition_without_title() {
        let (text, refs) = read_references("[a]: /path/to/page\n");
        assert_eq!(text, "\n");
        assert_eq!(refs.get("a").unwrap().url, "/path/to/page");
        assert_eq!(refs.get("a").unwrap().title, None);
    }

    #[test]
    fn test_definition_angle_brackets_and_paren_title() {
        let (_, refs) = read_references("   [x]: <http://x.org/>  ( Spaced Title )  ");
        let reference = refs.get("x").unwrap();
        assert_eq!(reference.url, "http://x.org/");
        assert_eq!(reference.title.as_deref(), Some("spaced title"));
    }

    #[test]
    fn test_four_space_indent_is_not_a_definition() {
        let input = "    [x]: http://x.org/";
        let (text, refs) = read_references(input);
        assert_eq!(text, input);
        assert!(refs.is_empty());
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let (_, refs) = read_references("[Name]: /a");
        assert!(refs.get("Name").is_some());
        assert!(refs.get("name").is_none());
    }

    #[test]
    fn test_last_definition_wins() {
        let (_, refs) = read_references("[a]: /first\n[a]: /second\n");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.get("a").unwrap().url, "/second");
    }

    #[test]
    fn test_surrounding_text_is_kept() {
        let (text, refs) = read_references("before\n[a]: /a\nafter");
        assert_eq!(text, "before\n\nafter");
        assert_eq!(refs.len(), 1);
    }

    #[test]
    fn test_no_definitions() {
        let (text, refs) = read_references("Just [a link](/x) here.");
        assert_eq!(text, "Just [a link](/x) here.");
        assert!(refs.is_empty());
    }

    #[test]
    fn test_definitions_leave_blank_lines() {
        let (text, refs) = read_references("para\n[a]: /a\n[b]: /b 'B'\nafter");
        assert_eq!(text, "para\n\n\nafter");
        assert_eq!(refs.len(), 2);
    }
}
