//! Bullet, enumerated and definition lists.

use crate::lexer::{Token, TokenKind};
use crate::nodes::{EnumAffix, EnumType, NodeBulletList, NodeEnumList, NodeValue, Sourcepos};
use crate::parser::messages::MessageKind;
use crate::parser::Parser;
use crate::Error;

impl Parser {
    /// The first token of the next non-blank line with its distance from
    /// the cursor.  Indentation is skipped.
    fn next_line_content(&mut self) -> Option<(usize, Token)> {
        let (n, token) = self.buf.peek_skip(TokenKind::BlankLine)?;
        if token.kind == TokenKind::Space && token.at_line_start() {
            let content = self.buf.peek(n + 1)?;
            return Some((n + 1, content));
        }
        Some((n, token))
    }

    /// Consumes the gap after a list marker and returns the indentation of
    /// the item body.
    fn item_indent(&mut self, marker: &Token) -> usize {
        match self.buf.peek(1) {
            Some(space) if space.kind == TokenKind::Space && space.line == marker.line => {
                self.buf.next(1);
                space.column() + space.length
            }
            _ => marker.column() + marker.length + 1,
        }
    }

    pub(super) fn bullet_list(&mut self, bullet: Token, outer: usize) -> Result<(), Error> {
        let rune = bullet.text.chars().next().unwrap_or('*');
        let list = self.add_child(
            NodeValue::BulletList(NodeBulletList { bullet: rune }),
            Sourcepos::from(&bullet),
        );
        let mut marker = bullet.clone();
        loop {
            let item = self.new_node(NodeValue::BulletListItem, Sourcepos::from(&marker));
            list.append(item, &mut self.arena);
            let indent = self.item_indent(&marker);
            self.nested_body(item, indent)?;

            match self.next_line_content() {
                Some((n, next))
                    if next.kind == TokenKind::Bullet
                        && next.column() == bullet.column()
                        && next.text == bullet.text =>
                {
                    self.buf.next(n);
                    marker = next;
                }
                _ => break,
            }
        }
        self.check_unindent(MessageKind::BulletListWithUnIndent, outer);
        Ok(())
    }

    /// Reads an enumerator whose first token is `at` places from the
    /// cursor.  Returns the affix style, the number and the token count.
    fn peek_enumerator(&mut self, at: usize) -> Option<(EnumAffix, usize, usize)> {
        let first = self.buf.peek(at)?;
        match first.kind {
            TokenKind::EnumListAffix if first.text == "(" => {
                let number = self
                    .buf
                    .peek(at + 1)
                    .filter(|t| t.kind == TokenKind::EnumListArabic)?;
                self.buf
                    .peek(at + 2)
                    .filter(|t| t.kind == TokenKind::EnumListAffix && t.text == ")")?;
                Some((EnumAffix::Parens, number.text.parse().ok()?, 3))
            }
            TokenKind::EnumListArabic => {
                let affix = self
                    .buf
                    .peek(at + 1)
                    .filter(|t| t.kind == TokenKind::EnumListAffix)?;
                let affix = match affix.text.as_str() {
                    "." => EnumAffix::Period,
                    ")" => EnumAffix::Paren,
                    _ => return None,
                };
                Some((affix, first.text.parse().ok()?, 2))
            }
            _ => None,
        }
    }

    pub(super) fn enum_list(&mut self, first: Token, outer: usize) -> Result<(), Error> {
        let Some((affix, mut number, count)) = self.peek_enumerator(0) else {
            self.paragraph(first, outer);
            return Ok(());
        };
        let Some(mut marker) = self.buf.next(count - 1) else {
            return Ok(());
        };
        let list = self.add_child(
            NodeValue::EnumList(NodeEnumList {
                enum_type: EnumType::Arabic,
                affix,
            }),
            Sourcepos::from(&first),
        );
        let column = first.column();
        let mut start = first;
        loop {
            let item = self.new_node(NodeValue::EnumListItem, Sourcepos::from(&start));
            list.append(item, &mut self.arena);
            let indent = self.item_indent(&marker);
            self.nested_body(item, indent)?;

            let Some((n, next)) = self.next_line_content() else {
                break;
            };
            if next.column() != column {
                break;
            }
            match self.peek_enumerator(n) {
                Some((a, num, count)) if a == affix && num == number + 1 => {
                    let Some(end) = self.buf.next(n + count - 1) else {
                        break;
                    };
                    number = num;
                    marker = end;
                    start = next;
                }
                _ => break,
            }
        }
        self.check_unindent(MessageKind::EnumListWithUnIndent, outer);
        Ok(())
    }

    pub(super) fn definition_list(&mut self, term: Token, outer: usize) -> Result<(), Error> {
        let list = self.add_child(NodeValue::DefinitionList, Sourcepos::from(&term));
        let column = term.column();
        let mut term = term;
        loop {
            let sourcepos = Sourcepos::from(&term);
            let item = self.new_node(NodeValue::DefinitionListItem, sourcepos);
            list.append(item, &mut self.arena);
            let term_node = self.new_node(NodeValue::DefinitionTerm(term.text.clone()), sourcepos);
            item.append(term_node, &mut self.arena);

            let body = match self.buf.peek(1) {
                Some(space)
                    if space.kind == TokenKind::Space
                        && space.at_line_start()
                        && space.line == term.line + 1 =>
                {
                    Some(space)
                }
                _ => None,
            };
            let definition = self.new_node(
                NodeValue::Definition,
                body.as_ref().map_or(sourcepos, Sourcepos::from),
            );
            item.append(definition, &mut self.arena);
            if let Some(space) = body {
                self.nested_body(definition, space.length)?;
            }

            match self.next_line_content() {
                Some((n, next)) if next.kind == TokenKind::DefinitionTerm && next.column() == column => {
                    self.buf.next(n);
                    term = next;
                }
                _ => break,
            }
        }
        self.check_unindent(MessageKind::DefinitionListWithUnIndent, outer);
        Ok(())
    }
}
