//! Markdown to HTML conversion through ordered text rewriting.
//!
//! The document goes through a fixed sequence of regex and scanner passes
//! instead of a syntax tree: reference definitions are collected first, block
//! recognizers wrap structural regions in HTML, the rest of the text is
//! escaped, inline markup and links are substituted inside each block, and
//! backslash escapes are resolved last. Lists and blockquotes render their content through the
//! same sequence recursively.
//!
//! Rendering never fails. Anything that does not match a construct stays
//! literal text, and raw HTML is passed through unsanitized.
//!
//! # Example
//!
//! ```
//! let html = mdpass::render("# Title\n\nSome *emphasis* and a [link](http://example.com).");
//! assert_eq!(
//!     html,
//!     "<h1>Title</h1>\n\n<p>Some <em>emphasis</em> and a <a href=\"http://example.com\">link</a>.</p>"
//! );
//! ```

mod block;
mod config;
mod error;
mod escape;
mod fragments;
mod inline;
mod links;
mod references;
mod renderer;

pub use block::{LineKind, ListKind, classify_line};
pub use config::RenderConfig;
pub use error::ConfigError;
pub use escape::{ESCAPABLE, escape_text, html_escape, markdown_unescape};
pub use references::{Reference, References, read_references};
pub use renderer::{Renderer, render};
