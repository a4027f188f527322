//! Pipeline orchestration.
//!
//! A render normalizes line endings, strips reference definitions and then
//! runs the pass sequence of [`Parse::parse_text`] over the document. Lists
//! and blockquotes run the same sequence on their content, one level deeper.

use std::sync::LazyLock;

use regex::Regex;

use crate::block::blockquote::replace_blockquotes;
use crate::block::code::replace_code_blocks;
use crate::block::headings::replace_headings;
use crate::block::lists::replace_lists;
use crate::block::paragraphs::replace_paragraphs;
use crate::block::rules::replace_rules;
use crate::block::{Layout, LineKind, NestedParser, classify_line};
use crate::config::RenderConfig;
use crate::escape::{html_escape, markdown_unescape};
use crate::fragments::{self, Fragments};
use crate::inline::{replace_code_spans, replace_emphasis};
use crate::links::{replace_links, shield_targets};
use crate::references::{References, read_references};

/// One to three spaces of insignificant indentation.
static LEADING_SPACES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ ]{1,3}(\S)").expect("invalid indentation regex"));

/// Markdown to HTML renderer.
///
/// The renderer holds only configuration; every call to [`Renderer::render`]
/// builds its own reference table, so one value can be shared between threads.
///
/// # Example
///
/// ```
/// use mdpass::{RenderConfig, Renderer};
///
/// let renderer = Renderer::new(RenderConfig {
///     hard_line_breaks: false,
///     ..RenderConfig::default()
/// });
/// assert_eq!(renderer.render("one  \ntwo"), "<p>one  \ntwo</p>");
/// ```
#[derive(Clone, Debug, Default)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    /// Create a renderer with the given configuration.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Get the renderer configuration.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render a Markdown document to HTML.
    ///
    /// Never fails: constructs that do not match are kept as literal text.
    #[must_use]
    pub fn render(&self, markdown: &str) -> String {
        let text = normalize(markdown);
        let (text, references) = read_references(&text);

        let mut parse = Parse {
            config: &self.config,
            references: &references,
            fragments: Fragments::default(),
            depth: 0,
        };
        let html = parse.parse_text(&text, Layout::Block);
        parse.fragments.restore(&html).trim().to_owned()
    }
}

/// Render a Markdown document to HTML with the default configuration.
///
/// # Example
///
/// ```
/// assert_eq!(mdpass::render("Hello *world*"), "<p>Hello <em>world</em></p>");
/// ```
#[must_use]
pub fn render(markdown: &str) -> String {
    Renderer::default().render(markdown)
}

fn normalize(text: &str) -> String {
    fragments::sanitize(&text.replace("\r\n", "\n").replace('\r', "\n"))
}

/// State of one top-level render, shared by all nested parses.
struct Parse<'a> {
    config: &'a RenderConfig,
    references: &'a References,
    fragments: Fragments,
    depth: usize,
}

impl Parse<'_> {
    /// Run every pass over `text`.
    ///
    /// Block passes come first and wrap their regions in final HTML. The
    /// remaining text is escaped and split into blocks; inline markup is
    /// rendered inside each block and text runs become paragraphs. Backslash
    /// escapes are resolved last.
    fn parse_text(&mut self, text: &str, layout: Layout) -> String {
        tracing::trace!(depth = self.depth, len = text.len(), "Parsing text");

        let text = LEADING_SPACES.replace_all(text, "${1}");
        let text = replace_headings(&text);
        let text = replace_rules(&text);
        let text = text.strip_suffix('\n').unwrap_or(&text);

        let text = if self.depth < self.config.max_nesting_depth {
            let text = replace_lists(text, self);
            let text = replace_code_blocks(&text);
            replace_blockquotes(&text, self)
        } else {
            if has_containers(text) {
                tracing::warn!(
                    depth = self.depth,
                    max_depth = self.config.max_nesting_depth,
                    "Nesting limit reached, rendering containers as text"
                );
            }
            replace_code_blocks(text)
        };

        let text = html_escape(&text, false);
        let references = self.references;
        let text = replace_paragraphs(&text, layout, self.config.hard_line_breaks, |block| {
            render_inline(block, references)
        });
        markdown_unescape(&text).trim().to_owned()
    }
}

/// Code spans, shielded link targets, emphasis and links within one block.
fn render_inline(block: &str, references: &References) -> String {
    let text = replace_code_spans(block);
    let text = shield_targets(&text);
    let text = replace_emphasis(&text);
    replace_links(&text, references)
}

impl NestedParser for Parse<'_> {
    fn parse_nested(&mut self, text: &str, layout: Layout) -> String {
        self.depth += 1;
        let html = self.parse_text(text, layout);
        self.depth -= 1;
        html
    }

    fn park(&mut self, html: String) -> String {
        self.fragments.park(html)
    }
}

fn has_containers(text: &str) -> bool {
    text.lines().any(|line| {
        matches!(
            classify_line(line),
            LineKind::ListItem(_) | LineKind::BlockQuote
        )
    })
}
