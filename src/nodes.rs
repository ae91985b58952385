//! The reStructuredText document tree.

use std::fmt;

use indextree::{Arena, NodeId};
use rustc_hash::FxHashMap;

use crate::lexer::Token;
use crate::parser::messages::{MessageKind, Severity};

/// The core AST node enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeValue {
    /// The root of every document.  Contains body elements and sections.
    Document,

    /// A section: a title with its adornments, then the body elements and
    /// subsections that follow it.
    ///
    /// ``` rst
    /// =====
    /// Title
    /// =====
    /// ```
    Section(NodeSection),

    /// A paragraph.  Contains inline nodes.
    Paragraph,

    /// Plain text inside a paragraph.
    Text(String),

    /// `*emphasis*`
    InlineEmphasis(String),

    /// `**strong**`
    InlineStrong(String),

    /// ``` ``literal`` ```
    InlineLiteral(String),

    /// `` `interpreted text` ``, optionally with a `:role:` prefix.
    InlineInterpretedText(NodeInterpretedText),

    /// `` `phrase`_ `` or the anonymous `` `phrase`__ ``.  The reference is
    /// not resolved.
    InlineReference(NodeReference),

    /// An indented block.  Contains body elements.
    BlockQuote,

    /// A diagnostic.  May contain a [`NodeValue::LiteralBlock`] holding the
    /// offending source.
    SystemMessage(NodeSystemMessage),

    /// Verbatim text.
    LiteralBlock(String),

    /// A transition marker.  Holds the marker line.
    Transition(String),

    /// A comment.  Holds the comment text without the `..` mark.
    Comment(String),

    /// A bullet list.  Contains [`NodeValue::BulletListItem`]s.
    BulletList(NodeBulletList),

    /// A bullet list item.  Contains body elements.
    BulletListItem,

    /// An enumerated list.  Contains [`NodeValue::EnumListItem`]s.
    EnumList(NodeEnumList),

    /// An enumerated list item.  Contains body elements.
    EnumListItem,

    /// A definition list.  Contains [`NodeValue::DefinitionListItem`]s.
    DefinitionList,

    /// A term with its definition.  Contains a [`NodeValue::DefinitionTerm`]
    /// followed by a [`NodeValue::Definition`].
    DefinitionListItem,

    /// The term line of a definition list item.
    DefinitionTerm(String),

    /// The body of a definition list item.  Contains body elements.
    Definition,

    /// An explicit hyperlink target.
    ///
    /// ``` rst
    /// .. _name: https://example.org/
    /// ```
    HyperlinkTarget(NodeHyperlinkTarget),
}

/// The details of a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeSection {
    /// Nesting depth, starting at 1.
    pub level: usize,
    pub title: NodeTitle,
    pub overline: Option<NodeAdornment>,
    pub underline: NodeAdornment,
}

/// A section title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeTitle {
    pub text: String,
    pub sourcepos: Sourcepos,
}

/// A section overline or underline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeAdornment {
    pub rune: char,
    pub sourcepos: Sourcepos,
}

/// The details of interpreted text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeInterpretedText {
    pub text: String,
    pub role: Option<NodeRole>,
}

/// A `:role:` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeRole {
    pub text: String,
    pub sourcepos: Sourcepos,
}

/// The details of an inline reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeReference {
    pub text: String,
    pub anonymous: bool,
}

/// The details of a system message.  The line lives in the node's
/// [`Sourcepos`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeSystemMessage {
    pub kind: MessageKind,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeBulletList {
    /// The bullet rune shared by every item.
    pub bullet: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeEnumList {
    pub enum_type: EnumType,
    pub affix: EnumAffix,
}

/// The enumerator sequence.  Only Arabic numerals are recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumType {
    Arabic,
}

/// Punctuation around an enumerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumAffix {
    /// `1.`
    Period,
    /// `1)`
    Paren,
    /// `(1)`
    Parens,
}

/// The details of a hyperlink target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeHyperlinkTarget {
    /// The name as written.  Empty for anonymous targets.
    pub name: String,
    /// The name normalized for matching.
    pub refname: String,
    pub uri: String,
    pub anonymous: bool,
}

/// Where a node came from in the source.  `line` and `start_position` are
/// 1-based; `length` counts runes.  Containers that span several lines carry
/// the position of their first token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Sourcepos {
    pub line: usize,
    pub start_position: usize,
    pub length: usize,
}

impl fmt::Display for Sourcepos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}+{}", self.line, self.start_position, self.length)
    }
}

impl From<&Token> for Sourcepos {
    fn from(token: &Token) -> Sourcepos {
        Sourcepos {
            line: token.line,
            start_position: token.start_position,
            length: token.length,
        }
    }
}

impl From<(usize, usize, usize)> for Sourcepos {
    fn from(sp: (usize, usize, usize)) -> Sourcepos {
        Sourcepos {
            line: sp.0,
            start_position: sp.1,
            length: sp.2,
        }
    }
}

/// A node in the tree: its value and where it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ast {
    /// The node value itself.
    pub value: NodeValue,

    /// The position in the source document this node comes from.
    pub sourcepos: Sourcepos,
}

impl Ast {
    pub fn new(value: NodeValue, sourcepos: Sourcepos) -> Self {
        Ast { value, sourcepos }
    }
}

impl NodeValue {
    /// The variant name, as used in the JSON form and tree dumps.
    pub fn type_name(&self) -> &'static str {
        match *self {
            NodeValue::Document => "Document",
            NodeValue::Section(..) => "Section",
            NodeValue::Paragraph => "Paragraph",
            NodeValue::Text(..) => "Text",
            NodeValue::InlineEmphasis(..) => "InlineEmphasis",
            NodeValue::InlineStrong(..) => "InlineStrong",
            NodeValue::InlineLiteral(..) => "InlineLiteral",
            NodeValue::InlineInterpretedText(..) => "InlineInterpretedText",
            NodeValue::InlineReference(..) => "InlineReference",
            NodeValue::BlockQuote => "BlockQuote",
            NodeValue::SystemMessage(..) => "SystemMessage",
            NodeValue::LiteralBlock(..) => "LiteralBlock",
            NodeValue::Transition(..) => "Transition",
            NodeValue::Comment(..) => "Comment",
            NodeValue::BulletList(..) => "BulletList",
            NodeValue::BulletListItem => "BulletListItem",
            NodeValue::EnumList(..) => "EnumList",
            NodeValue::EnumListItem => "EnumListItem",
            NodeValue::DefinitionList => "DefinitionList",
            NodeValue::DefinitionListItem => "DefinitionListItem",
            NodeValue::DefinitionTerm(..) => "DefinitionTerm",
            NodeValue::Definition => "Definition",
            NodeValue::HyperlinkTarget(..) => "HyperlinkTarget",
        }
    }

    /// Whether the node can hold children.
    pub fn is_container(&self) -> bool {
        matches!(
            *self,
            NodeValue::Document
                | NodeValue::Section(..)
                | NodeValue::Paragraph
                | NodeValue::BlockQuote
                | NodeValue::SystemMessage(..)
                | NodeValue::BulletList(..)
                | NodeValue::BulletListItem
                | NodeValue::EnumList(..)
                | NodeValue::EnumListItem
                | NodeValue::DefinitionList
                | NodeValue::DefinitionListItem
                | NodeValue::Definition
        )
    }

    /// The text carried by a leaf node, if this node has any.
    pub fn text(&self) -> Option<&str> {
        match *self {
            NodeValue::Text(ref t)
            | NodeValue::InlineEmphasis(ref t)
            | NodeValue::InlineStrong(ref t)
            | NodeValue::InlineLiteral(ref t)
            | NodeValue::LiteralBlock(ref t)
            | NodeValue::Transition(ref t)
            | NodeValue::Comment(ref t)
            | NodeValue::DefinitionTerm(ref t) => Some(t),
            NodeValue::InlineInterpretedText(ref n) => Some(&n.text),
            NodeValue::InlineReference(ref n) => Some(&n.text),
            NodeValue::Section(ref n) => Some(&n.title.text),
            _ => None,
        }
    }
}

/// A parsed document: the node arena and the id of its root
/// [`NodeValue::Document`] node.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    arena: Arena<Ast>,
    root: NodeId,
}

impl Document {
    pub(crate) fn new(name: String, arena: Arena<Ast>, root: NodeId) -> Self {
        Document { name, arena, root }
    }

    /// The name the document was parsed under.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn arena(&self) -> &Arena<Ast> {
        &self.arena
    }

    /// The node `id`.  Panics if `id` does not belong to this document.
    pub fn get(&self, id: NodeId) -> &Ast {
        self.arena[id].get()
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Every node in document order, starting with the root.
    pub fn descendants(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.root.descendants(&self.arena)
    }

    /// The system messages in the tree, in document order.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.descendants()
            .filter_map(|id| {
                let ast = self.get(id);
                match ast.value {
                    NodeValue::SystemMessage(m) => Some(Diagnostic {
                        kind: m.kind,
                        severity: m.severity,
                        line: ast.sourcepos.line,
                    }),
                    _ => None,
                }
            })
            .collect()
    }

    /// The named hyperlink targets, keyed by normalized name.  The first
    /// target wins when a name repeats.
    pub fn targets(&self) -> FxHashMap<&str, &NodeHyperlinkTarget> {
        let mut targets = FxHashMap::default();
        for id in self.descendants() {
            if let NodeValue::HyperlinkTarget(ref t) = self.get(id).value {
                if !t.anonymous && !t.refname.is_empty() {
                    targets.entry(t.refname.as_str()).or_insert(t);
                }
            }
        }
        targets
    }
}

/// A system message lifted out of the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: MessageKind,
    pub severity: Severity,
    pub line: usize,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: ({}/{}) {}",
            self.line,
            self.severity,
            self.kind,
            self.kind.message()
        )
    }
}
