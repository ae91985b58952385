use super::*;
use pretty_assertions::assert_eq;

#[test]
fn emphasis_and_strong() {
    assert_tree(
        "Hello *world* and **strong** text.\n",
        r#"
Paragraph
  Text "Hello "
  InlineEmphasis "world"
  Text " and "
  InlineStrong "strong"
  Text " text."
"#,
    );
}

#[test]
fn literal() {
    assert_tree(
        "Use ``*raw*`` here",
        r#"
Paragraph
  Text "Use "
  InlineLiteral "*raw*"
  Text " here"
"#,
    );
}

#[test]
fn roles_and_references() {
    assert_tree(
        "See :code:`x = 1` and `Python`_ or `anon`__.\n",
        r#"
Paragraph
  Text "See "
  InlineInterpretedText :code: "x = 1"
  Text " and "
  InlineReference "Python"
  Text " or "
  InlineReference "anon" anonymous
  Text "."
"#,
    );
}

#[test]
fn markup_spans_lines() {
    assert_tree(
        "*a\nb* c",
        r#"
Paragraph
  InlineEmphasis "a\nb"
  Text " c"
"#,
    );
}

#[test]
fn escaped_markup_is_text() {
    assert_tree(
        "a\\*b*",
        r#"
Paragraph
  Text "a*b*"
"#,
    );
}

#[test]
fn escaped_line_end_joins_lines() {
    assert_tree(
        "a\\\nb",
        r#"
Paragraph
  Text "ab"
"#,
    );
}

#[test]
fn unterminated_markup_runs_to_end() {
    assert_tree(
        "*emphasis",
        r#"
Paragraph
  InlineEmphasis "emphasis"
"#,
    );
}

#[test]
fn text_positions() {
    let doc = parse_document("test", "ab *cd* ef", &Options::default()).unwrap();
    let para = doc.children(doc.root()).next().unwrap();
    let spans: Vec<_> = doc
        .children(para)
        .map(|id| {
            let sp = doc.get(id).sourcepos;
            (sp.line, sp.start_position, sp.length)
        })
        .collect();
    assert_eq!(spans, vec![(1, 1, 3), (1, 5, 2), (1, 8, 3)]);
}
