//! The JSON form of a document.
//!
//! A document serializes as an array of its top-level nodes.  Each node is
//! an object with a `"type"` naming its variant, the variant's fields and,
//! for containers, a `"nodeList"` of children.  Zero positions, empty
//! strings and empty child lists are left out.
//!
//! ```rust
//! # use rstree::{json, parse_document, Options};
//! let doc = parse_document("doc", "*hi*\n", &Options::default()).unwrap();
//! let json = json::to_string(&doc).unwrap();
//! assert!(json.starts_with(r#"[{"type":"Paragraph","line":1,"#));
//! assert!(json.contains(r#"{"type":"InlineEmphasis","text":"hi","line":1,"startPosition":2,"length":2}"#));
//! ```

use indextree::{Arena, NodeId};
use serde::de::Error as _;
use serde::{Deserialize, Serialize};

use crate::nodes::{
    Ast, Document, EnumAffix, EnumType, NodeAdornment, NodeBulletList, NodeEnumList,
    NodeHyperlinkTarget, NodeInterpretedText, NodeReference, NodeRole, NodeSection,
    NodeSystemMessage, NodeTitle, NodeValue, Sourcepos,
};
use crate::parser::messages::{MessageKind, Severity};

fn is_zero(n: &usize) -> bool {
    *n == 0
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonSpan {
    #[serde(default)]
    text: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    line: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    start_position: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    length: usize,
}

impl JsonSpan {
    fn new(text: &str, sourcepos: Sourcepos) -> Self {
        JsonSpan {
            text: text.to_string(),
            line: sourcepos.line,
            start_position: sourcepos.start_position,
            length: sourcepos.length,
        }
    }

    fn sourcepos(&self) -> Sourcepos {
        (self.line, self.start_position, self.length).into()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonAdornment {
    rune: char,
    #[serde(default, skip_serializing_if = "is_zero")]
    line: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    start_position: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    length: usize,
}

impl From<&NodeAdornment> for JsonAdornment {
    fn from(a: &NodeAdornment) -> Self {
        JsonAdornment {
            rune: a.rune,
            line: a.sourcepos.line,
            start_position: a.sourcepos.start_position,
            length: a.sourcepos.length,
        }
    }
}

impl From<&JsonAdornment> for NodeAdornment {
    fn from(a: &JsonAdornment) -> Self {
        NodeAdornment {
            rune: a.rune,
            sourcepos: (a.line, a.start_position, a.length).into(),
        }
    }
}

/// One node as it appears on the wire.  Which optional fields are present
/// depends on `type`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsonNode {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    text: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    level: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    title: Option<JsonSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    over_line: Option<JsonAdornment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    under_line: Option<JsonAdornment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<JsonSpan>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    bullet: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    enum_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    affix: Option<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    refname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    uri: String,
    #[serde(default, skip_serializing_if = "is_false")]
    anonymous: bool,
    #[serde(default, skip_serializing_if = "is_zero")]
    line: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    start_position: usize,
    #[serde(default, skip_serializing_if = "is_zero")]
    length: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    node_list: Vec<JsonNode>,
}

fn affix_name(affix: EnumAffix) -> &'static str {
    match affix {
        EnumAffix::Period => "Period",
        EnumAffix::Paren => "Paren",
        EnumAffix::Parens => "Parens",
    }
}

fn to_json(doc: &Document, id: NodeId) -> JsonNode {
    let ast = doc.get(id);
    let mut node = JsonNode {
        kind: ast.value.type_name().to_string(),
        line: ast.sourcepos.line,
        start_position: ast.sourcepos.start_position,
        length: ast.sourcepos.length,
        node_list: doc.children(id).map(|child| to_json(doc, child)).collect(),
        ..JsonNode::default()
    };

    match ast.value {
        NodeValue::Document
        | NodeValue::Paragraph
        | NodeValue::BlockQuote
        | NodeValue::BulletListItem
        | NodeValue::EnumListItem
        | NodeValue::DefinitionList
        | NodeValue::DefinitionListItem
        | NodeValue::Definition => {}
        NodeValue::Text(ref t)
        | NodeValue::InlineEmphasis(ref t)
        | NodeValue::InlineStrong(ref t)
        | NodeValue::InlineLiteral(ref t)
        | NodeValue::LiteralBlock(ref t)
        | NodeValue::Transition(ref t)
        | NodeValue::Comment(ref t)
        | NodeValue::DefinitionTerm(ref t) => node.text = t.clone(),
        NodeValue::Section(ref s) => {
            node.level = s.level;
            node.title = Some(JsonSpan::new(&s.title.text, s.title.sourcepos));
            node.over_line = s.overline.as_ref().map(JsonAdornment::from);
            node.under_line = Some(JsonAdornment::from(&s.underline));
        }
        NodeValue::InlineInterpretedText(ref n) => {
            node.text = n.text.clone();
            node.role = n.role.as_ref().map(|r| JsonSpan::new(&r.text, r.sourcepos));
        }
        NodeValue::InlineReference(ref n) => {
            node.text = n.text.clone();
            node.anonymous = n.anonymous;
        }
        NodeValue::SystemMessage(m) => {
            node.message_type = Some(m.kind.as_str().to_string());
            node.severity = Some(m.severity.as_str().to_string());
        }
        NodeValue::BulletList(l) => node.bullet = Some(l.bullet),
        NodeValue::EnumList(l) => {
            node.enum_type = Some(match l.enum_type {
                EnumType::Arabic => "Arabic".to_string(),
            });
            node.affix = Some(affix_name(l.affix).to_string());
        }
        NodeValue::HyperlinkTarget(ref t) => {
            node.name = t.name.clone();
            node.refname = t.refname.clone();
            node.uri = t.uri.clone();
            node.anonymous = t.anonymous;
        }
    }
    node
}

fn missing(kind: &str, field: &str) -> serde_json::Error {
    serde_json::Error::custom(format!("{} node without {}", kind, field))
}

fn to_value(node: &JsonNode) -> Result<NodeValue, serde_json::Error> {
    let kind = node.kind.as_str();
    let text = || node.text.clone();
    Ok(match kind {
        "Document" => NodeValue::Document,
        "Paragraph" => NodeValue::Paragraph,
        "BlockQuote" => NodeValue::BlockQuote,
        "BulletListItem" => NodeValue::BulletListItem,
        "EnumListItem" => NodeValue::EnumListItem,
        "DefinitionList" => NodeValue::DefinitionList,
        "DefinitionListItem" => NodeValue::DefinitionListItem,
        "Definition" => NodeValue::Definition,
        "Text" => NodeValue::Text(text()),
        "InlineEmphasis" => NodeValue::InlineEmphasis(text()),
        "InlineStrong" => NodeValue::InlineStrong(text()),
        "InlineLiteral" => NodeValue::InlineLiteral(text()),
        "LiteralBlock" => NodeValue::LiteralBlock(text()),
        "Transition" => NodeValue::Transition(text()),
        "Comment" => NodeValue::Comment(text()),
        "DefinitionTerm" => NodeValue::DefinitionTerm(text()),
        "Section" => {
            let title = node.title.as_ref().ok_or_else(|| missing(kind, "title"))?;
            let underline = node
                .under_line
                .as_ref()
                .ok_or_else(|| missing(kind, "underLine"))?;
            NodeValue::Section(NodeSection {
                level: node.level,
                title: NodeTitle {
                    text: title.text.clone(),
                    sourcepos: title.sourcepos(),
                },
                overline: node.over_line.as_ref().map(NodeAdornment::from),
                underline: underline.into(),
            })
        }
        "InlineInterpretedText" => NodeValue::InlineInterpretedText(NodeInterpretedText {
            text: text(),
            role: node.role.as_ref().map(|r| NodeRole {
                text: r.text.clone(),
                sourcepos: r.sourcepos(),
            }),
        }),
        "InlineReference" => NodeValue::InlineReference(NodeReference {
            text: text(),
            anonymous: node.anonymous,
        }),
        "SystemMessage" => {
            let message = node
                .message_type
                .as_deref()
                .and_then(MessageKind::from_name)
                .ok_or_else(|| missing(kind, "a known messageType"))?;
            let severity = node
                .severity
                .as_deref()
                .and_then(Severity::from_name)
                .ok_or_else(|| missing(kind, "a known severity"))?;
            NodeValue::SystemMessage(NodeSystemMessage {
                kind: message,
                severity,
            })
        }
        "BulletList" => NodeValue::BulletList(NodeBulletList {
            bullet: node.bullet.ok_or_else(|| missing(kind, "bullet"))?,
        }),
        "EnumList" => {
            let enum_type = match node.enum_type.as_deref() {
                Some("Arabic") => EnumType::Arabic,
                _ => return Err(missing(kind, "a known enumType")),
            };
            let affix = match node.affix.as_deref() {
                Some("Period") => EnumAffix::Period,
                Some("Paren") => EnumAffix::Paren,
                Some("Parens") => EnumAffix::Parens,
                _ => return Err(missing(kind, "a known affix")),
            };
            NodeValue::EnumList(NodeEnumList { enum_type, affix })
        }
        "HyperlinkTarget" => NodeValue::HyperlinkTarget(NodeHyperlinkTarget {
            name: node.name.clone(),
            refname: node.refname.clone(),
            uri: node.uri.clone(),
            anonymous: node.anonymous,
        }),
        other => {
            return Err(serde_json::Error::custom(format!(
                "unknown node type {:?}",
                other
            )))
        }
    })
}

fn build(arena: &mut Arena<Ast>, parent: NodeId, node: &JsonNode) -> Result<(), serde_json::Error> {
    let sourcepos = (node.line, node.start_position, node.length).into();
    let id = arena.new_node(Ast::new(to_value(node)?, sourcepos));
    parent.append(id, arena);
    for child in &node.node_list {
        build(arena, id, child)?;
    }
    Ok(())
}

fn top_level(doc: &Document) -> Vec<JsonNode> {
    doc.children(doc.root())
        .map(|id| to_json(doc, id))
        .collect()
}

/// Serializes `doc` compactly.
pub fn to_string(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string(&top_level(doc))
}

/// Serializes `doc` with indentation.
pub fn to_string_pretty(doc: &Document) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&top_level(doc))
}

/// Rebuilds a document from its JSON form.
pub fn from_str(name: &str, input: &str) -> Result<Document, serde_json::Error> {
    let nodes: Vec<JsonNode> = serde_json::from_str(input)?;
    let mut arena = Arena::new();
    let root = arena.new_node(Ast::new(NodeValue::Document, Sourcepos::default()));
    for node in &nodes {
        build(&mut arena, root, node)?;
    }
    Ok(Document::new(name.to_string(), arena, root))
}
