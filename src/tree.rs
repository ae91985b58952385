//! An indented, human-readable dump of a document tree.

use std::fmt::{self, Write};

use indextree::NodeId;

use crate::nodes::{Document, EnumAffix, NodeValue};

/// Writes one line per node, children indented two spaces under their
/// parent.  The root is not printed.
///
/// ```rust
/// # use rstree::{parse_document, tree, Options};
/// let doc = parse_document("doc", "Title\n=====\n\nText\n", &Options::default()).unwrap();
/// let mut out = String::new();
/// tree::format_document(&doc, &mut out).unwrap();
/// assert_eq!(out, "Section 1 \"Title\" =\n  Paragraph\n    Text \"Text\"\n");
/// ```
pub fn format_document(doc: &Document, output: &mut dyn Write) -> fmt::Result {
    for child in doc.children(doc.root()) {
        format_node(doc, child, 0, output)?;
    }
    Ok(())
}

fn format_node(doc: &Document, id: NodeId, depth: usize, output: &mut dyn Write) -> fmt::Result {
    let value = &doc.get(id).value;
    write!(output, "{:width$}{}", "", value.type_name(), width = depth * 2)?;
    match *value {
        NodeValue::Section(ref s) => {
            write!(output, " {} {:?} ", s.level, s.title.text)?;
            if let Some(ref over) = s.overline {
                output.write_char(over.rune)?;
                output.write_char('/')?;
            }
            output.write_char(s.underline.rune)?;
        }
        NodeValue::InlineInterpretedText(ref n) => {
            if let Some(ref role) = n.role {
                write!(output, " :{}:", role.text)?;
            }
            write!(output, " {:?}", n.text)?;
        }
        NodeValue::InlineReference(ref n) => {
            write!(output, " {:?}", n.text)?;
            if n.anonymous {
                output.write_str(" anonymous")?;
            }
        }
        NodeValue::SystemMessage(m) => write!(output, " {} {}", m.severity, m.kind)?,
        NodeValue::BulletList(l) => write!(output, " {:?}", l.bullet)?,
        NodeValue::EnumList(l) => {
            let affix = match l.affix {
                EnumAffix::Period => "1.",
                EnumAffix::Paren => "1)",
                EnumAffix::Parens => "(1)",
            };
            write!(output, " {}", affix)?;
        }
        NodeValue::HyperlinkTarget(ref t) => {
            if t.anonymous {
                output.write_str(" anonymous")?;
            } else {
                write!(output, " {:?}", t.refname)?;
            }
            write!(output, " {:?}", t.uri)?;
        }
        _ => {
            if let Some(text) = value.text() {
                write!(output, " {:?}", text)?;
            }
        }
    }
    output.write_char('\n')?;

    for child in doc.children(id) {
        format_node(doc, child, depth + 1, output)?;
    }
    Ok(())
}
