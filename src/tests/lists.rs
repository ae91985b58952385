use super::*;
use pretty_assertions::assert_eq;

#[test]
fn bullet_list() {
    assert_tree(
        "- one\n- two\n\n  more\n\nAfter",
        r#"
BulletList '-'
  BulletListItem
    Paragraph
      Text "one"
  BulletListItem
    Paragraph
      Text "two"
    Paragraph
      Text "more"
Paragraph
  Text "After"
"#,
    );
}

#[test]
fn bullet_list_without_blank_line() {
    assert_tree(
        "- a\ntext",
        r#"
BulletList '-'
  BulletListItem
    Paragraph
      Text "a"
SystemMessage WARNING BulletListWithUnIndent
Paragraph
  Text "text"
"#,
    );
    assert_eq!(
        messages("- a\ntext"),
        vec![(MessageKind::BulletListWithUnIndent, Severity::Warning, 2)]
    );
}

#[test]
fn nested_bullet_lists() {
    assert_tree(
        "- a\n\n  * b\n  * c\n\n- d",
        r#"
BulletList '-'
  BulletListItem
    Paragraph
      Text "a"
    BulletList '*'
      BulletListItem
        Paragraph
          Text "b"
      BulletListItem
        Paragraph
          Text "c"
  BulletListItem
    Paragraph
      Text "d"
"#,
    );
}

#[test]
fn enumerated_lists() {
    assert_tree(
        "1. one\n2. two\n\n3) three",
        r#"
EnumList 1.
  EnumListItem
    Paragraph
      Text "one"
  EnumListItem
    Paragraph
      Text "two"
EnumList 1)
  EnumListItem
    Paragraph
      Text "three"
"#,
    );
}

#[test]
fn parenthesized_enumerators() {
    assert_tree(
        "(1) one\n(2) two\n",
        r#"
EnumList (1)
  EnumListItem
    Paragraph
      Text "one"
  EnumListItem
    Paragraph
      Text "two"
"#,
    );
}

#[test]
fn definition_list() {
    assert_tree(
        "term\n  definition\n\nother\n  more",
        r#"
DefinitionList
  DefinitionListItem
    DefinitionTerm "term"
    Definition
      Paragraph
        Text "definition"
  DefinitionListItem
    DefinitionTerm "other"
    Definition
      Paragraph
        Text "more"
"#,
    );
}

#[test]
fn empty_bullet_item() {
    assert_tree(
        "- a\n-\n- b\n",
        r#"
BulletList '-'
  BulletListItem
    Paragraph
      Text "a"
  BulletListItem
  BulletListItem
    Paragraph
      Text "b"
"#,
    );
    assert!(messages("- a\n-\n- b\n").is_empty());
    assert!(messages("-\n").is_empty());
}

#[test]
fn enumerated_list_without_blank_line() {
    assert_tree(
        "1. a\ntext\n",
        r#"
EnumList 1.
  EnumListItem
    Paragraph
      Text "a"
SystemMessage WARNING EnumListWithUnIndent
Paragraph
  Text "text"
"#,
    );
}

#[test]
fn definition_list_without_blank_line() {
    assert_tree(
        "term\n  def\ntext\n",
        r#"
DefinitionList
  DefinitionListItem
    DefinitionTerm "term"
    Definition
      Paragraph
        Text "def"
SystemMessage WARNING DefinitionListWithUnIndent
Paragraph
  Text "text"
"#,
    );
    assert_eq!(
        messages("term\n  def\ntext\n"),
        vec![(MessageKind::DefinitionListWithUnIndent, Severity::Warning, 3)]
    );
}
