use super::*;
use pretty_assertions::assert_eq;

#[test]
fn clean_document_has_none() {
    assert!(messages(".. a comment\n\nParagraph.\n").is_empty());
    assert!(messages("Title\n=====\n\n- a\n- b\n").is_empty());
}

#[test]
fn short_underline_is_info() {
    assert_eq!(
        messages("Title\n===\n\nText\n"),
        vec![(MessageKind::UnderlineTooShortForTitle, Severity::Info, 2)]
    );
}

#[test]
fn in_document_order() {
    let input = concat!(
        "=====\nTitle\n-----\n\n",
        "Para\nmore\n  indented\n\n",
        "- item\ntext\n",
    );
    assert_eq!(
        messages(input),
        vec![
            (MessageKind::OverlineUnderlineMismatch, Severity::Severe, 1),
            (MessageKind::UnexpectedIndentation, Severity::Error, 7),
            (MessageKind::BulletListWithUnIndent, Severity::Warning, 10),
        ]
    );
}

#[test]
fn display() {
    let doc = parse_document("test", "Title\n===\n\nText\n", &Options::default()).unwrap();
    let shown: Vec<_> = doc.diagnostics().iter().map(|d| d.to_string()).collect();
    assert_eq!(
        shown,
        ["2: (INFO/UnderlineTooShortForTitle) Possible title underline, too short for \
          the title. Treating it as ordinary text because it's so short."]
    );
}

#[test]
fn severities_are_ordered() {
    assert!(Severity::Info < Severity::Warning);
    assert!(Severity::Warning < Severity::Error);
    assert!(Severity::Error < Severity::Severe);
    assert_eq!(MessageKind::ShortOverline.severity(), Severity::Warning);
    assert_eq!(
        MessageKind::from_name("TitleLevelInconsistent"),
        Some(MessageKind::TitleLevelInconsistent)
    );
}
