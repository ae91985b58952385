//! Inline markup inside paragraphs.

use indextree::NodeId;

use crate::lexer::{Token, TokenKind};
use crate::nodes::{NodeInterpretedText, NodeReference, NodeRole, NodeValue, Sourcepos};
use crate::parser::Parser;
use crate::strings;

/// The body and close kinds that pair with an opening token.
fn parts(open: TokenKind) -> Option<(TokenKind, TokenKind)> {
    Some(match open {
        TokenKind::InlineStrongOpen => (TokenKind::InlineStrong, TokenKind::InlineStrongClose),
        TokenKind::InlineEmphasisOpen => {
            (TokenKind::InlineEmphasis, TokenKind::InlineEmphasisClose)
        }
        TokenKind::InlineLiteralOpen => (TokenKind::InlineLiteral, TokenKind::InlineLiteralClose),
        TokenKind::InlineInterpretedTextOpen => (
            TokenKind::InlineInterpretedText,
            TokenKind::InlineInterpretedTextClose,
        ),
        TokenKind::InlineReferenceOpen => (
            TokenKind::InlineReferenceText,
            TokenKind::InlineReferenceClose,
        ),
        _ => return None,
    })
}

impl Parser {
    /// Consumes one inline markup run starting at `open` and appends its
    /// node to `para`.
    pub(super) fn inline_markup(&mut self, open: Token, para: NodeId) {
        let mut role = None;
        let open = if open.kind == TokenKind::InlineInterpretedTextRoleOpen {
            let name = match self.buf.peek(1) {
                Some(t) if t.kind == TokenKind::InlineInterpretedTextRole => t,
                _ => return,
            };
            self.buf.next(1);
            if self
                .buf
                .peek(1)
                .map_or(false, |t| t.kind == TokenKind::InlineInterpretedTextRoleClose)
            {
                self.buf.next(1);
            }
            role = Some(NodeRole {
                sourcepos: Sourcepos::from(&name),
                text: name.text,
            });
            match self.buf.peek(1) {
                Some(t) if t.kind == TokenKind::InlineInterpretedTextOpen => {
                    self.buf.next(1);
                    t
                }
                _ => return,
            }
        } else {
            open
        };
        let Some((body, close_kind)) = parts(open.kind) else {
            return;
        };

        let mut text = String::new();
        let mut start: Option<Sourcepos> = None;
        let mut close = None;
        while let Some(next) = self.buf.peek(1) {
            let after_break = self
                .buf
                .current()
                .map_or(false, |t| t.kind == TokenKind::BlankLine);
            match next.kind {
                kind if kind == body => {
                    self.buf.next(1);
                    start.get_or_insert_with(|| Sourcepos::from(&next));
                    text.push_str(&next.text);
                }
                TokenKind::BlankLine if !next.at_line_start() => {
                    self.buf.next(1);
                    text.push('\n');
                }
                TokenKind::Space if after_break => {
                    self.buf.next(1);
                }
                kind if kind == close_kind => {
                    self.buf.next(1);
                    close = Some(next);
                    break;
                }
                _ => break,
            }
        }

        let mut sourcepos = start.unwrap_or_else(|| Sourcepos::from(&open));
        sourcepos.length = strings::rune_count(&text);
        let value = match open.kind {
            TokenKind::InlineStrongOpen => NodeValue::InlineStrong(text),
            TokenKind::InlineEmphasisOpen => NodeValue::InlineEmphasis(text),
            TokenKind::InlineLiteralOpen => NodeValue::InlineLiteral(text),
            TokenKind::InlineReferenceOpen => NodeValue::InlineReference(NodeReference {
                text,
                anonymous: close.map_or(false, |c| c.text == "`__"),
            }),
            _ => NodeValue::InlineInterpretedText(NodeInterpretedText { text, role }),
        };
        log::trace!("{}: {} at {}", self.name, value.type_name(), sourcepos);
        let node = self.new_node(value, sourcepos);
        para.append(node, &mut self.arena);
    }
}
