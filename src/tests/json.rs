use super::*;
use pretty_assertions::assert_eq;
use crate::{json, Ast, Document};

fn nodes(doc: &Document) -> Vec<Ast> {
    doc.descendants().map(|id| doc.get(id).clone()).collect()
}

#[test]
fn comment_and_paragraph() {
    let doc = parse_document("test", ".. a comment\n\nParagraph.\n", &Options::default()).unwrap();
    assert_eq!(
        json::to_string(&doc).unwrap(),
        concat!(
            r#"[{"type":"Comment","text":"a comment","line":1,"startPosition":1,"length":9},"#,
            r#"{"type":"Paragraph","line":3,"startPosition":1,"length":10,"nodeList":"#,
            r#"[{"type":"Text","text":"Paragraph.","line":3,"startPosition":1,"length":10}]}]"#,
        )
    );
}

#[test]
fn system_message_fields() {
    let doc = parse_document("test", "Title\n===\n\nText\n", &Options::default()).unwrap();
    let out = json::to_string(&doc).unwrap();
    assert!(
        out.starts_with(
            r#"[{"type":"SystemMessage","messageType":"UnderlineTooShortForTitle","severity":"INFO","line":2},"#
        ),
        "{}",
        out
    );
}

#[test]
fn section_fields() {
    let doc = parse_document("test", "Title\n=====\n", &Options::default()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json::to_string(&doc).unwrap()).unwrap();
    let section = &value[0];
    assert_eq!(section["type"], "Section");
    assert_eq!(section["level"], 1);
    assert_eq!(section["title"]["text"], "Title");
    assert_eq!(section["underLine"]["rune"], "=");
    assert_eq!(section["underLine"]["line"], 2);
    assert!(section.get("overLine").is_none());
}

#[test]
fn round_trip() {
    let input = concat!(
        "=====\nTitle\n=====\n\n",
        "Some *emphasis*, ``code`` and :r:`role` with `a link`__.\n\n",
        "Sub\n---\n\n",
        "- item\n\n  1. nested\n\n",
        "term\n  definition\n\n",
        ".. _target: https://example.org\n",
        ".. a comment\n\n",
        "  quoted\n\n",
        "----------\n\n",
        "Short\n===\n",
    );
    let doc = parse_document("test", input, &Options::default()).unwrap();
    let out = json::to_string(&doc).unwrap();
    let back = json::from_str("test", &out).unwrap();

    assert_eq!(nodes(&back), nodes(&doc));
    assert_eq!(json::to_string(&back).unwrap(), out);
    assert_eq!(back.name(), "test");
}

#[test]
fn pretty_output_parses_back() {
    let doc = parse_document("test", "Hello *world*.\n", &Options::default()).unwrap();
    let pretty = json::to_string_pretty(&doc).unwrap();
    assert!(pretty.contains("\n  {\n"));
    let back = json::from_str("test", &pretty).unwrap();
    assert_eq!(nodes(&back), nodes(&doc));
}

#[test]
fn rejects_unknown_types() {
    assert!(json::from_str("test", r#"[{"type":"Table"}]"#).is_err());
    assert!(json::from_str("test", r#"[{"type":"SystemMessage","messageType":"Nope"}]"#).is_err());
    assert!(json::from_str("test", "{}").is_err());
}
