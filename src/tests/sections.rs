use super::*;

#[test]
fn title_with_paragraphs() {
    assert_tree(
        "Title\n=====\n\nOne\n\nTwo",
        r#"
Section 1 "Title" =
  Paragraph
    Text "One"
  Paragraph
    Text "Two"
"#,
    );
}

#[test]
fn levels_follow_first_appearance() {
    assert_tree(
        concat!(
            "Alpha\n=====\n\n",
            "a\n\n",
            "Beta\n----\n\n",
            "b\n\n",
            "Gamma\n=====\n",
        ),
        r#"
Section 1 "Alpha" =
  Paragraph
    Text "a"
  Section 2 "Beta" -
    Paragraph
      Text "b"
Section 1 "Gamma" =
"#,
    );
}

#[test]
fn overline_and_underline() {
    assert_tree(
        "=====\nTitle\n=====\n\nText",
        r#"
Section 1 "Title" =/=
  Paragraph
    Text "Text"
"#,
    );
}

#[test]
fn overlined_style_is_distinct() {
    assert_tree(
        "=====\nOne\n=====\n\nTwo\n===\n",
        r#"
Section 1 "One" =/=
  Section 2 "Two" =
"#,
    );
}

#[test]
fn short_underline_warns_inside_section() {
    assert_tree(
        "Long title\n=====\n\nText",
        r#"
Section 1 "Long title" =
  SystemMessage WARNING ShortUnderline
    LiteralBlock "Long title\n====="
  Paragraph
    Text "Text"
"#,
    );
}

#[test]
fn very_short_underline_is_text() {
    assert_tree(
        "Title\n===\n\nText",
        r#"
SystemMessage INFO UnderlineTooShortForTitle
Paragraph
  Text "Title\n==="
Paragraph
  Text "Text"
"#,
    );
}

#[test]
fn short_overline_warns() {
    assert_tree(
        "====\n Title\n====\n",
        r#"
Section 1 "Title" =/=
  SystemMessage WARNING ShortOverline
    LiteralBlock "====\n Title\n===="
"#,
    );
}

#[test]
fn very_short_overline_is_text() {
    assert_tree(
        "==\nTitle\n==\n\nText",
        r#"
SystemMessage INFO OverlineTooShortForTitle
Paragraph
  Text "==\nTitle\n=="
Paragraph
  Text "Text"
"#,
    );
}

#[test]
fn overline_underline_mismatch() {
    assert_tree(
        "=====\nTitle\n-----\n\nText",
        r#"
SystemMessage SEVERE OverlineUnderlineMismatch
  LiteralBlock "=====\nTitle\n-----"
Paragraph
  Text "Text"
"#,
    );
}

#[test]
fn incomplete_title() {
    assert_tree(
        "=====\nTitle",
        r#"
SystemMessage SEVERE IncompleteSectionTitle
  LiteralBlock "=====\nTitle"
"#,
    );
}

#[test]
fn missing_underline() {
    assert_tree(
        "=====\nTitle\nText\n\nPara",
        r#"
SystemMessage SEVERE MissingMatchingUnderlineForOverline
  LiteralBlock "=====\nTitle\nText"
Paragraph
  Text "Para"
"#,
    );
}

#[test]
fn two_adornment_lines() {
    assert_tree(
        "=====\n=====\n\nText",
        r#"
SystemMessage ERROR InvalidSectionOrTransitionMarker
  LiteralBlock "=====\n====="
Paragraph
  Text "Text"
"#,
    );
}

#[test]
fn inconsistent_level() {
    assert_tree(
        concat!(
            "Alpha\n=====\n\n",
            "Beta\n-----\n\n",
            "Gamma\n~~~~~\n\n",
            "Delta\n=====\n\n",
            "Epsilon\n~~~~~~~\n",
        ),
        r#"
Section 1 "Alpha" =
  Section 2 "Beta" -
    Section 3 "Gamma" ~
Section 1 "Delta" =
  SystemMessage SEVERE TitleLevelInconsistent
    LiteralBlock "Epsilon\n~~~~~~~"
"#,
    );
}

#[test]
fn paragraph_absorbs_title_without_blank_line() {
    assert_tree(
        "para\nTitle\n=====\n",
        r#"
Paragraph
  Text "para\nTitle\n====="
"#,
    );
}

#[test]
fn transition_between_paragraphs() {
    assert_tree(
        "Para\n\n----------\n\nPara",
        r#"
Paragraph
  Text "Para"
Transition "----------"
Paragraph
  Text "Para"
"#,
    );
}

#[test]
fn title_in_block_quote() {
    assert_tree(
        "Para\n\n  Title\n  =====\n",
        r#"
Paragraph
  Text "Para"
BlockQuote
  SystemMessage SEVERE UnexpectedSectionTitle
    LiteralBlock "Title\n====="
"#,
    );
}

#[test]
fn short_adornment_in_block_quote() {
    assert_tree(
        "Para\n\n  --\n  text\n",
        r#"
Paragraph
  Text "Para"
BlockQuote
  SystemMessage INFO UnexpectedTitleOverlineOrTransition
  Paragraph
    Text "--\ntext"
"#,
    );
}

#[test]
fn transition_in_list_item() {
    assert_tree(
        "- item\n\n  ------\n",
        r#"
BulletList '-'
  BulletListItem
    Paragraph
      Text "item"
    SystemMessage SEVERE UnexpectedSectionTitleOrTransition
      LiteralBlock "------"
"#,
    );
}
