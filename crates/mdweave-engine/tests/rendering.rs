//! End-to-end rendering: markdown source through both dialects.

use mdweave_engine::{
    ParseOptions, RenderOptions, markdown_to_editor_html, markdown_to_html, parse, render_editor,
    render_html,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn html(source: &str) -> String {
    markdown_to_html(source, &ParseOptions::default(), &RenderOptions::default()).unwrap()
}

fn editor(source: &str) -> String {
    markdown_to_editor_html(source, &ParseOptions::default(), &RenderOptions::default()).unwrap()
}

fn editor_with(source: &str, options: &RenderOptions) -> String {
    markdown_to_editor_html(source, &ParseOptions::default(), options).unwrap()
}

const DOCUMENT: &str = "# Title\n\nSome *emphasis* and `code`.\n\n- one\n- two\n\n> quoted\n";

#[test]
fn whole_document_as_html() {
    insta::assert_snapshot!(html(DOCUMENT), @r#"
    <h1>Title</h1>
    <p>Some <em>emphasis</em> and <code>code</code>.</p>
    <ul>
    <li>one</li>
    <li>two</li>
    </ul>
    <blockquote>
    <p>quoted</p>
    </blockquote>
    "#);
}

#[test]
fn whole_document_as_editor_html() {
    insta::assert_snapshot!(
        editor(DOCUMENT),
        @r#"<h1>Title</h1><p>Some <em data-marker="*">emphasis</em> and <code data-marker="`">code</code>.</p><ul><li>one</li><li>two</li></ul><blockquote><p>quoted</p></blockquote>"#
    );
}

#[test]
fn one_tree_renders_the_same_twice() {
    let tree = parse(DOCUMENT, &ParseOptions::default());
    let options = RenderOptions::default();
    assert_eq!(
        render_html(&tree, &options).unwrap(),
        render_html(&tree, &options).unwrap()
    );
    assert_eq!(
        render_editor(&tree, &options).unwrap(),
        render_editor(&tree, &options).unwrap()
    );
}

#[rstest]
#[case::thematic_break("---\n", "<hr />\n")]
#[case::soft_break("a\nb\n", "<p>a\nb</p>\n")]
#[case::hard_break("a  \nb\n", "<p>a<br />\nb</p>\n")]
#[case::escaping("a < b & \"c\"\n", "<p>a &lt; b &amp; &quot;c&quot;</p>\n")]
#[case::link(
    "[go](https://x.y \"T\")\n",
    "<p><a href=\"https://x.y\" title=\"T\">go</a></p>\n"
)]
#[case::nested_image(
    "![a *b*](x.png \"T\")\n",
    "<p><img src=\"x.png\" alt=\"a b\" title=\"T\" /></p>\n"
)]
#[case::ordered_start("3. a\n4. b\n", "<ol start=\"3\">\n<li>a</li>\n<li>b</li>\n</ol>\n")]
#[case::loose_list(
    "- a\n\n- b\n",
    "<ul>\n<li>\n<p>a</p>\n</li>\n<li>\n<p>b</p>\n</li>\n</ul>\n"
)]
#[case::task_list(
    "- [x] done\n",
    "<ul>\n<li><input checked=\"\" disabled=\"\" type=\"checkbox\" />done</li>\n</ul>\n"
)]
#[case::fenced_code(
    "```rust\nfn f() {}\n```\n",
    "<pre><code class=\"language-rust\">fn f() {}\n</code></pre>\n"
)]
#[case::html_block("<div>\nhi\n</div>\n", "<div>\nhi\n</div>\n")]
#[case::emoji("hi :tada:\n", "<p>hi 🎉</p>\n")]
#[case::unknown_emoji("hi :nope:\n", "<p>hi :nope:</p>\n")]
fn html_dialect(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(html(source), expected);
}

#[rstest]
#[case::display("$$a^2$$\n", "<div class=\"language-math\">a^2</div>\n")]
#[case::display_lines("$$\na^2\n$$\n", "<div class=\"language-math\">a^2</div>\n")]
#[case::display_before_heading(
    "$$a^2$$\n## foo\n",
    "<div class=\"language-math\">a^2</div>\n<h2>foo</h2>\n"
)]
#[case::display_inside_text(
    "lu$$a^2 + b^2 = \\color{red}c^2$$te\n",
    "<p>lu\n<div class=\"language-math\">a^2 + b^2 = \\color{red}c^2</div>\nte</p>\n"
)]
#[case::unclosed_display("$$\n", "<div class=\"language-math\"></div>\n")]
#[case::inline("$a^2$\n", "<p><span class=\"language-math\">a^2</span></p>\n")]
#[case::inline_between_letters(
    "b$\\color{red}a^2$a\n",
    "<p>b<span class=\"language-math\">\\color{red}a^2</span>a</p>\n"
)]
#[case::two_inline(
    "lu$a^2$te$b^2$m\n",
    "<p>lu<span class=\"language-math\">a^2</span>te<span class=\"language-math\">b^2</span>m</p>\n"
)]
#[case::digit_after_opener("lu$1a^2$te\n", "<p>lu$1a^2$te</p>\n")]
#[case::digit_after_closer(
    "lu$a^2 + b^2 = \\color{red}c^2$1te\n",
    "<p>lu$a^2 + b^2 = \\color{red}c^2$1te</p>\n"
)]
#[case::blank_inline("$ $\n", "<p>$ $</p>\n")]
#[case::digit_only("$1$\n", "<p>$1$</p>\n")]
#[case::lone_dollar("$\n", "<p>$</p>\n")]
#[case::trailing_dollar("10$\n", "<p>10$</p>\n")]
#[case::in_table_cell(
    "| $a^2$ | bar |\n| --- | --- |\n| baz | bim |\n",
    "<table>\n<thead>\n<tr>\n<th><span class=\"language-math\">a^2</span></th>\n<th>bar</th>\n</tr>\n</thead>\n\
     <tbody>\n<tr>\n<td>baz</td>\n<td>bim</td>\n</tr>\n</tbody>\n</table>\n"
)]
fn math(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(html(source), expected);
}

#[test]
fn digits_around_inline_math_when_allowed() {
    let options = ParseOptions {
        inline_math_allow_digit_after_open: true,
        ..ParseOptions::default()
    };
    let render = |source| markdown_to_html(source, &options, &RenderOptions::default()).unwrap();
    assert_eq!(render("$1$"), "<p><span class=\"language-math\">1</span></p>\n");
    assert_eq!(
        render("lu$a$1te"),
        "<p>lu<span class=\"language-math\">a</span>1te</p>\n"
    );
}

#[rstest]
#[case::plain("<<foo>>", "<p><span class=\"annotation-ref\" data-id=\"foo\">foo</span></p>\n")]
#[case::titled(
    "<<foo \"Foo\">>",
    "<p><span class=\"annotation-ref\" data-id=\"foo\">Foo</span></p>\n"
)]
#[case::empty_title_falls_back_to_id(
    "<<foo \"\">>",
    "<p><span class=\"annotation-ref\" data-id=\"foo\">foo</span></p>\n"
)]
#[case::trailing_spaces_trimmed(
    "<<foo  >>",
    "<p><span class=\"annotation-ref\" data-id=\"foo\">foo</span></p>\n"
)]
#[case::empty("<<>>", "<p>&lt;&lt;&gt;&gt;</p>\n")]
#[case::blank("a<<  >>b", "<p>a&lt;&lt;  &gt;&gt;b</p>\n")]
fn annotation_refs(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(html(source), expected);
}

#[test]
fn table_with_body() {
    assert_eq!(
        html("| a | b |\n|:--|--:|\n| 1 | 2 |\n"),
        "<table>\n<thead>\n<tr>\n<th align=\"left\">a</th>\n<th align=\"right\">b</th>\n</tr>\n</thead>\n\
         <tbody>\n<tr>\n<td align=\"left\">1</td>\n<td align=\"right\">2</td>\n</tr>\n</tbody>\n</table>\n"
    );
}

#[test]
fn table_without_body_rows() {
    let out = html("| a | b |\n|---|---|\n");
    assert!(!out.contains("tbody"), "{out}");
    assert!(out.ends_with("</thead>\n</table>\n"), "{out}");
}

#[rstest]
#[case::emphasis("*x*", "<p><em data-marker=\"*\">x</em></p>")]
#[case::underscore_emphasis("_x_", "<p><em data-marker=\"_\">x</em></p>")]
#[case::strong("**x**", "<p><strong data-marker=\"**\">x</strong></p>")]
#[case::underscore_strong("__x__", "<p><strong data-marker=\"__\">x</strong></p>")]
#[case::strikethrough("~~x~~", "<p><del data-marker=\"~~\">x</del></p>")]
#[case::code_span("``a`b``", "<p><code data-marker=\"``\">a`b</code></p>")]
#[case::fenced_code(
    "```rust\nfn f() {}\n```",
    "<pre><code class=\"language-rust\">fn f() {}\n</code></pre>"
)]
#[case::indented_code("    x < y\n", "<pre><code>x &lt; y\n</code></pre>")]
fn editor_dialect(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(editor(source), expected);
}

#[test]
fn editor_heading_anchor() {
    let options = RenderOptions {
        heading_anchor: true,
        ..RenderOptions::default()
    };
    let out = editor_with("## Hello World", &options);
    assert!(
        out.starts_with(
            "<h2><a id=\"editor-anchor-Hello-World\" class=\"editor-anchor\" href=\"#Hello-World\"><svg"
        ),
        "{out}"
    );
    assert!(out.ends_with("</svg></a>Hello World</h2>"), "{out}");
}

#[test]
fn editor_text_hooks() {
    let options = RenderOptions {
        auto_space: true,
        fix_term_typo: true,
        ..RenderOptions::default()
    };
    assert_eq!(editor_with("用github写", &options), "<p>用 GitHub 写</p>");
    assert_eq!(editor("用github写"), "<p>用github写</p>");
}

#[test]
fn custom_emoji_renders_as_image() {
    let mut parse_options = ParseOptions::default();
    parse_options
        .custom_emoji
        .insert("party".to_string(), "p.png".to_string());
    let out = markdown_to_html(":party:", &parse_options, &RenderOptions::default()).unwrap();
    assert_eq!(
        out,
        "<p><img alt=\"party\" class=\"emoji\" src=\"p.png\" title=\"party\" /></p>\n"
    );
}

#[test]
fn custom_emoji_is_dropped_from_alt_text() {
    let mut parse_options = ParseOptions::default();
    parse_options
        .custom_emoji
        .insert("party".to_string(), "p.png".to_string());
    let out = markdown_to_html("![a :party:](x.png)", &parse_options, &RenderOptions::default())
        .unwrap();
    assert_eq!(out, "<p><img src=\"x.png\" alt=\"a \" /></p>\n");
}

#[test]
fn soft_break_as_hard_break() {
    let options = RenderOptions {
        soft_break_to_hard_break: true,
        ..RenderOptions::default()
    };
    let out = markdown_to_html("a\nb", &ParseOptions::default(), &options).unwrap();
    assert_eq!(out, "<p>a<br />\nb</p>\n");
}
