use super::*;

#[test]
fn paragraphs() {
    assert_tree(
        "One line\nand another.\n\nSecond.\n",
        r#"
Paragraph
  Text "One line\nand another."
Paragraph
  Text "Second."
"#,
    );
}

#[test]
fn unexpected_indentation() {
    assert_tree(
        "One\nTwo\n  indented",
        r#"
Paragraph
  Text "One\nTwo"
SystemMessage ERROR UnexpectedIndentation
BlockQuote
  Paragraph
    Text "indented"
"#,
    );
}

#[test]
fn block_quote() {
    assert_tree(
        "Para\n\n  quoted\n  more\n\nback",
        r#"
Paragraph
  Text "Para"
BlockQuote
  Paragraph
    Text "quoted\nmore"
Paragraph
  Text "back"
"#,
    );
}

#[test]
fn block_quote_without_blank_line() {
    assert_tree(
        "Para\n\n  quoted\nback",
        r#"
Paragraph
  Text "Para"
BlockQuote
  Paragraph
    Text "quoted"
SystemMessage WARNING BlockQuoteWithUnIndent
Paragraph
  Text "back"
"#,
    );
}

#[test]
fn nested_block_quotes() {
    assert_tree(
        "Para\n\n  one\n\n    two\n",
        r#"
Paragraph
  Text "Para"
BlockQuote
  Paragraph
    Text "one"
  BlockQuote
    Paragraph
      Text "two"
"#,
    );
}

#[test]
fn comment_with_body() {
    assert_tree(
        ".. first\n   second\n\n   third\n\nPara",
        r#"
Comment "first\nsecond\n\nthird"
Paragraph
  Text "Para"
"#,
    );
}

#[test]
fn empty_comment_ends_at_blank_line() {
    assert_tree(
        "..\n\n   not a comment\n",
        r#"
Comment ""
BlockQuote
  Paragraph
    Text "not a comment"
"#,
    );
}

#[test]
fn malformed_comment() {
    assert_tree(
        "..x\n\nPara",
        r#"
Comment "x"
SystemMessage WARNING ExplicitMarkupWithUnIndent
  LiteralBlock "..x"
Paragraph
  Text "Para"
"#,
    );
}

#[test]
fn comment_without_blank_line() {
    assert_tree(
        ".. note\ntext",
        r#"
Comment "note"
SystemMessage WARNING ExplicitMarkupWithUnIndent
Paragraph
  Text "text"
"#,
    );
}

#[test]
fn hyperlink_targets() {
    assert_tree(
        concat!(
            ".. _Python Home: https://www.python.org\n",
            ".. __: https://anon.example\n",
            "__ https://short.example\n",
        ),
        r#"
HyperlinkTarget "python home" "https://www.python.org"
HyperlinkTarget anonymous "https://anon.example"
HyperlinkTarget anonymous "https://short.example"
"#,
    );
}

#[test]
fn hyperlink_target_uri_continues() {
    assert_tree(
        ".. _long: https://example.org/\n   path/to/page\n",
        r#"
HyperlinkTarget "long" "https://example.org/path/to/page"
"#,
    );
}

#[test]
fn tab_width_changes_indentation() {
    let input = "Para\n\n\tquoted\n";
    let expected = r#"
Paragraph
  Text "Para"
BlockQuote
  Paragraph
    Text "quoted"
"#;
    assert_tree(input, expected);
    assert_tree_opts(
        input,
        &Options {
            tab_width: 2,
            ..Options::default()
        },
        expected,
    );
}

#[test]
fn comment_blank_run_at_lookahead_bound() {
    let continued = ".. c\n\n\n\n\n\n   x\n";
    let ended = ".. c\n\n\n\n\n\nPara\n";
    for max_lookahead in [1, 3, 5, Options::default().max_lookahead] {
        let options = Options {
            max_lookahead,
            ..Options::default()
        };
        assert_tree_opts(
            continued,
            &options,
            r#"
Comment "c\n\n\n\n\n\nx"
"#,
        );
        assert_tree_opts(
            ended,
            &options,
            r#"
Comment "c"
Paragraph
  Text "Para"
"#,
        );
    }
}

#[test]
fn empty_comment_before_blank_run() {
    assert_tree_opts(
        "..\n\n\n\n\nPara\n",
        &Options {
            max_lookahead: 2,
            ..Options::default()
        },
        r#"
Comment ""
Paragraph
  Text "Para"
"#,
    );
}
