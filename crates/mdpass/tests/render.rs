//! End-to-end rendering tests.

use mdpass::{RenderConfig, Renderer, escape_text, markdown_unescape, render};
use pretty_assertions::assert_eq;

#[test]
fn test_plain_text_becomes_paragraph() {
    for text in ["Hello world", "Plain words only", "Numbers 123 and letters"] {
        assert_eq!(render(text), format!("<p>{text}</p>"));
        assert_eq!(render(&format!("{text}\n")), format!("<p>{text}</p>"));
    }
}

#[test]
fn test_escape_round_trip() {
    for sample in ["a*b", r"\", r"\\*", "[x](y) {z} #+-.!", "`code` _em_"] {
        assert_eq!(markdown_unescape(&escape_text(sample)), sample);
    }
}

#[test]
fn test_atx_heading() {
    assert_eq!(render("# Heading"), "<h1>Heading</h1>");
    assert_eq!(render("## Closed ##"), "<h2>Closed</h2>");
    assert_eq!(render("####### Seven"), "<h6>Seven</h6>");
}

#[test]
fn test_indented_atx_heading() {
    assert_eq!(render("  # heading"), "<h1>heading</h1>");
}

#[test]
fn test_setext_headings() {
    assert_eq!(render("Heading\n======="), "<h1>Heading</h1>");
    assert_eq!(render("Sub\n---"), "<h2>Sub</h2>");
}

#[test]
fn test_heading_with_emphasis() {
    assert_eq!(render("# *Title*"), "<h1><em>Title</em></h1>");
}

#[test]
fn test_emphasis() {
    assert_eq!(render("*em*"), "<p><em>em</em></p>");
    assert_eq!(render("\\*not em\\*"), "<p>*not em*</p>");
    assert_eq!(
        render("**strong** and __also__"),
        "<p><strong>strong</strong> and <strong>also</strong></p>"
    );
    assert_eq!(render("***both***"), "<p><strong><em>both</em></strong></p>");
}

#[test]
fn test_spans_do_not_cross_block_boundaries() {
    assert_eq!(render("`a\n# H`"), "<p>`a</p>\n<h1>H`</h1>");
    assert_eq!(render("*a\n# H*"), "<p>*a</p>\n<h1>H*</h1>");
    assert_eq!(render("_a\n***\nb_"), "<p>_a</p>\n<hr/>\n<p>b_</p>");
    assert_eq!(
        render("*one\n    code\ntwo*"),
        "<p>*one</p>\n<pre><code>code</code></pre>\n<p>two*</p>"
    );
}

#[test]
fn test_unterminated_markup_is_literal() {
    assert_eq!(render("*unclosed"), "<p>*unclosed</p>");
    assert_eq!(render("`open"), "<p>`open</p>");
    assert_eq!(render("[dangling][nope]"), "<p>[dangling][nope]</p>");
}

#[test]
fn test_reference_link() {
    assert_eq!(
        render("[id]: http://example.com \"Title\"\n[text][id]"),
        "<p><a href=\"http://example.com\" title=\"title\">text</a></p>"
    );
}

#[test]
fn test_reference_definition_is_not_rendered() {
    assert_eq!(render("[a]: /x\n\nBody"), "<p>Body</p>");
}

#[test]
fn test_reference_definition_separates_paragraphs() {
    assert_eq!(
        render("para\n[a]: /x\nafter"),
        "<p>para</p>\n\n<p>after</p>"
    );
}

#[test]
fn test_last_reference_definition_wins() {
    assert_eq!(
        render("[id]: /first\n[id]: /second\n\n[x][id]"),
        "<p><a href=\"/second\">x</a></p>"
    );
}

#[test]
fn test_reference_image() {
    assert_eq!(
        render("![logo][]\n\n[logo]: /logo.png"),
        "<p><img src=\"/logo.png\" alt=\"logo\"></p>"
    );
}

#[test]
fn test_inline_link_and_image() {
    assert_eq!(
        render("See [docs](/docs \"Docs\")."),
        "<p>See <a href=\"/docs\" title=\"Docs\">docs</a>.</p>"
    );
    assert_eq!(
        render("![alt](/img.png)"),
        "<p><img src=\"/img.png\" alt=\"alt\"></p>"
    );
}

#[test]
fn test_link_label_with_emphasis() {
    assert_eq!(
        render("[*em*](/u)"),
        "<p><a href=\"/u\"><em>em</em></a></p>"
    );
}

#[test]
fn test_link_title_keeps_underscores() {
    assert_eq!(
        render("[a](/u \"x_y_z\")"),
        "<p><a href=\"/u\" title=\"x_y_z\">a</a></p>"
    );
}

#[test]
fn test_image_alt_is_plain_text() {
    assert_eq!(
        render("![a *b*](/i.png)"),
        "<p><img src=\"/i.png\" alt=\"a b\"></p>"
    );
}

#[test]
fn test_link_target_keeps_underscores() {
    assert_eq!(
        render("[x](http://a.com/snake_case_url)"),
        "<p><a href=\"http://a.com/snake_case_url\">x</a></p>"
    );
}

#[test]
fn test_escaped_link_syntax_is_literal() {
    assert_eq!(render("\\[not a link\\](url)"), "<p>[not a link](url)</p>");
}

#[test]
fn test_autolinks() {
    assert_eq!(
        render("<http://example.com>"),
        "<p><a href=\"http://example.com\">http://example.com</a></p>"
    );
    assert_eq!(
        render("<me@example.com>"),
        "<p><a href=\"mailto:me@example.com\">me@example.com</a></p>"
    );
}

#[test]
fn test_rules() {
    assert_eq!(render("---"), "<hr/>");
    assert_eq!(render("* * *"), "<hr/>");
    assert_eq!(render("--"), "<p>--</p>");
    assert_eq!(render("Title\n---\n\n---"), "<h2>Title</h2>\n\n<hr/>");
}

#[test]
fn test_tight_list() {
    assert_eq!(render("- a\n- b"), "<ul><li>a</li><li>b</li></ul>");
    assert_eq!(render("1. one\n2. two"), "<ol><li>one</li><li>two</li></ol>");
}

#[test]
fn test_loose_list_propagates() {
    assert_eq!(
        render("- one\n\n- two"),
        "<ul><li><p>one</p></li><li><p>two</p></li></ul>"
    );
    assert_eq!(
        render("- a\n- b\n\n- c"),
        "<ul><li>a</li><li><p>b</p></li><li><p>c</p></li></ul>"
    );
}

#[test]
fn test_list_items_use_inline_markup() {
    assert_eq!(
        render("- *em* item\n- `code` item"),
        "<ul><li><em>em</em> item</li><li><code>code</code> item</li></ul>"
    );
}

#[test]
fn test_nested_list() {
    assert_eq!(
        render("- a\n    - b"),
        "<ul><li>a\n<ul><li>b</li></ul></li></ul>"
    );
}

#[test]
fn test_list_followed_by_paragraph() {
    assert_eq!(render("- a\n\nPara"), "<ul><li>a</li></ul>\n<p>Para</p>");
}

#[test]
fn test_nested_blockquote() {
    assert_eq!(
        render("> > inner"),
        "<blockquote><blockquote><p>inner</p></blockquote></blockquote>"
    );
}

#[test]
fn test_blockquote_paragraphs() {
    assert_eq!(
        render("> a\n>\n> b"),
        "<blockquote><p>a</p>\n\n<p>b</p></blockquote>"
    );
}

#[test]
fn test_blockquote_with_list() {
    assert_eq!(
        render("> - a\n> - b"),
        "<blockquote><ul><li>a</li><li>b</li></ul></blockquote>"
    );
}

#[test]
fn test_code_block() {
    assert_eq!(
        render("    let x = 1;\n    x * 2"),
        "<pre><code>let x = 1;\nx * 2</code></pre>"
    );
    assert_eq!(
        render("    <b>&</b>"),
        "<pre><code>&lt;b&gt;&amp;&lt;/b&gt;</code></pre>"
    );
}

#[test]
fn test_code_block_between_paragraphs() {
    assert_eq!(
        render("Before:\n\n\tcode *here*\n\nAfter."),
        "<p>Before:</p>\n\n<pre><code>code *here*</code></pre>\n<p>After.</p>"
    );
}

#[test]
fn test_code_span() {
    assert_eq!(
        render("Use `a < b` here"),
        "<p>Use <code>a &lt; b</code> here</p>"
    );
    assert_eq!(
        render("Literal `*stars*` stay"),
        "<p>Literal <code>*stars*</code> stay</p>"
    );
}

#[test]
fn test_html_escaping() {
    assert_eq!(render("AT&T &copy;"), "<p>AT&amp;T &copy;</p>");
    assert_eq!(render("1 < 2"), "<p>1 &lt; 2</p>");
    assert_eq!(
        render("Text with <span>html</span>."),
        "<p>Text with <span>html</span>.</p>"
    );
}

#[test]
fn test_raw_html_block_is_not_wrapped() {
    assert_eq!(
        render("<div>\n*raw*\n</div>\n\ntext"),
        "<div>\n<em>raw</em>\n</div>\n\n<p>text</p>"
    );
}

#[test]
fn test_hard_line_break() {
    assert_eq!(render("a  \nb"), "<p>a<br/>\nb</p>");
}

#[test]
fn test_render_with_config_from_toml() {
    let config = RenderConfig::from_toml_str("[markdown]\nhard_line_breaks = false").unwrap();
    let renderer = Renderer::new(config);
    assert_eq!(renderer.render("a  \nb"), "<p>a  \nb</p>");
}

#[test]
fn test_degenerate_input_does_not_panic() {
    for input in [
        "", " ", "\n\n\n", "*", "**", "_", "`", "``", "[", "]", "[]", "()", "<", ">", "&", "#",
        "- ", "1.", "> ", "\t", "![", "[a]:", "***", "> >", "-\n-\n-", "\u{E000}", "é*é*",
    ] {
        let _ = render(input);
    }
}

#[test]
fn test_shared_renderer_across_threads() {
    let renderer = Renderer::default();
    std::thread::scope(|scope| {
        let first = scope.spawn(|| renderer.render("[id]: /one\n[a][id]"));
        let second = scope.spawn(|| renderer.render("[id]: /two\n[b][id]"));
        assert_eq!(first.join().unwrap(), "<p><a href=\"/one\">a</a></p>");
        assert_eq!(second.join().unwrap(), "<p><a href=\"/two\">b</a></p>");
    });
}
