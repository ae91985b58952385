use serde::Serialize;
use std::fmt;

/// The classification of a [`Token`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// End of input.  Always the final token.
    #[serde(rename = "EOF")]
    Eof,
    /// Section title text.
    Title,
    /// An overline or underline.
    SectionAdornment,
    /// Running text.
    Text,
    /// Indentation, or the gap between the parts of a marker.
    Space,
    /// An empty line, or the break inside a multi-line inline markup run.
    BlankLine,
    /// A transition marker line.
    Transition,
    /// The `..` opening a comment.
    CommentMark,
    /// `(`, `)` or `.` around an enumerator.
    EnumListAffix,
    /// An Arabic enumerator.
    EnumListArabic,
    HyperlinkTargetStart,
    HyperlinkTargetPrefix,
    HyperlinkTargetQuote,
    HyperlinkTargetName,
    HyperlinkTargetSuffix,
    #[serde(rename = "HyperlinkTargetURI")]
    HyperlinkTargetUri,
    InlineStrongOpen,
    InlineStrong,
    InlineStrongClose,
    InlineEmphasisOpen,
    InlineEmphasis,
    InlineEmphasisClose,
    InlineLiteralOpen,
    InlineLiteral,
    InlineLiteralClose,
    InlineInterpretedTextOpen,
    InlineInterpretedText,
    InlineInterpretedTextClose,
    InlineInterpretedTextRoleOpen,
    InlineInterpretedTextRole,
    InlineInterpretedTextRoleClose,
    InlineReferenceOpen,
    InlineReferenceText,
    InlineReferenceClose,
    /// A definition list term line.
    DefinitionTerm,
    /// Running text inside a definition.
    DefinitionText,
    /// A bullet list marker.
    Bullet,
    /// A backslash escape.
    Escape,
}

impl TokenKind {
    /// Whether this kind opens inline markup.
    pub fn is_inline_open(self) -> bool {
        matches!(
            self,
            TokenKind::InlineStrongOpen
                | TokenKind::InlineEmphasisOpen
                | TokenKind::InlineLiteralOpen
                | TokenKind::InlineInterpretedTextOpen
                | TokenKind::InlineInterpretedTextRoleOpen
                | TokenKind::InlineReferenceOpen
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Eof => f.write_str("EOF"),
            TokenKind::HyperlinkTargetUri => f.write_str("HyperlinkTargetURI"),
            other => fmt::Debug::fmt(other, f),
        }
    }
}

/// A classified, positioned fragment of the input.
///
/// `line` and `start_position` are 1-based; `length` counts runes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: usize,
    #[serde(rename = "type")]
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub start_position: usize,
    pub length: usize,
}

impl Token {
    /// Column of the token's first rune, counting from zero.
    pub fn column(&self) -> usize {
        self.start_position.saturating_sub(1)
    }

    /// Whether the token begins its line.
    pub fn at_line_start(&self) -> bool {
        self.start_position == 1
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}+{} {} {:?}",
            self.line, self.start_position, self.length, self.kind, self.text
        )
    }
}
