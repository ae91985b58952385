//! The parser.
//!
//! A recursive-descent builder over a [`TokenBuffer`] fed by the
//! [`Lexer`].  Block handlers consume the tokens of their construct and
//! append nodes at the [`NodeTarget`]; malformed constructs become
//! [`NodeValue::SystemMessage`] nodes in the tree rather than errors.

mod inlines;
mod levels;
mod lists;
pub mod messages;
pub mod options;
mod section;
mod token_buffer;

use indextree::{Arena, NodeId};

use self::levels::SectionLevels;
use self::messages::MessageKind;
pub use self::options::Options;
use self::token_buffer::TokenBuffer;
use crate::lexer::{Lexer, Token, TokenKind};
use crate::nodes::{Ast, Document, NodeHyperlinkTarget, NodeSystemMessage, NodeValue, Sourcepos};
use crate::{scanners, strings, Error};

/// Parses `input` into a [`Document`].
///
/// Malformed markup never fails the parse; it is reported with system
/// message nodes.  The only errors are empty input and a lookahead window
/// that overflows [`Options::max_lookahead`].
///
/// ```rust
/// # use rstree::{parse_document, NodeValue, Options};
/// let doc = parse_document("doc", "Hello *world*.\n", &Options::default()).unwrap();
/// let para = doc.children(doc.root()).next().unwrap();
/// assert_eq!(doc.get(para).value, NodeValue::Paragraph);
/// assert!(doc.diagnostics().is_empty());
/// ```
pub fn parse_document(name: &str, input: &str, options: &Options) -> Result<Document, Error> {
    let lexer = Lexer::new(name, input, options)?;
    Parser::new(name, lexer, options).parse()
}

/// Where the next node is appended.  `main` is the document root; `sub` is
/// the innermost open container, and `parent` the section or body element
/// that opened it, if any.
#[derive(Debug, Clone, Copy)]
pub(crate) struct NodeTarget {
    main: NodeId,
    sub: NodeId,
    parent: Option<NodeId>,
}

impl NodeTarget {
    fn new(root: NodeId) -> Self {
        NodeTarget {
            main: root,
            sub: root,
            parent: None,
        }
    }

    fn append(&self, arena: &mut Arena<Ast>, node: NodeId) {
        self.sub.append(node, arena);
    }

    fn set_parent(&mut self, node: NodeId) {
        self.sub = node;
        self.parent = Some(node);
    }

    fn reset(&mut self) {
        self.sub = self.main;
        self.parent = None;
    }

    fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Plain text collected between inline nodes of a paragraph.
#[derive(Default)]
struct TextRun {
    text: String,
    start: Option<Sourcepos>,
}

impl TextRun {
    fn push(&mut self, token: &Token) {
        self.start.get_or_insert_with(|| Sourcepos::from(token));
        self.text.push_str(&token.text);
    }

    fn newline(&mut self, next: &Token) {
        self.start.get_or_insert_with(|| Sourcepos::from(next));
        self.text.push('\n');
    }
}

/// The column a token's content starts at.  Indentation counts as its
/// width.
fn column(token: &Token) -> usize {
    if token.kind == TokenKind::Space && token.at_line_start() {
        token.length
    } else {
        token.column()
    }
}

/// Whether a token can continue a paragraph onto the next line.
fn is_paragraph_text(kind: TokenKind) -> bool {
    kind.is_inline_open()
        || matches!(
            kind,
            TokenKind::Text
                | TokenKind::DefinitionText
                | TokenKind::Escape
                | TokenKind::Title
                | TokenKind::SectionAdornment
        )
}

pub(crate) struct Parser {
    name: String,
    max_lookahead: usize,
    arena: Arena<Ast>,
    root: NodeId,
    buf: TokenBuffer<Lexer>,
    target: NodeTarget,
    levels: SectionLevels,
    nested: usize,
}

impl Parser {
    fn new(name: &str, lexer: Lexer, options: &Options) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(Ast::new(NodeValue::Document, Sourcepos::default()));
        Parser {
            name: name.to_string(),
            max_lookahead: options.max_lookahead,
            arena,
            root,
            buf: TokenBuffer::new(lexer, options.max_lookahead),
            target: NodeTarget::new(root),
            levels: SectionLevels::new(),
            nested: 0,
        }
    }

    fn parse(mut self) -> Result<Document, Error> {
        log::debug!("{}: parsing", self.name);
        self.parse_body(0)?;
        self.check_fault()?;
        log::debug!(
            "{}: {} nodes, {} section styles",
            self.name,
            self.arena.len(),
            self.levels.len()
        );
        Ok(Document::new(self.name, self.arena, self.root))
    }

    fn check_fault(&self) -> Result<(), Error> {
        match self.buf.fault() {
            Some(line) => Err(Error::BufferExhausted {
                name: self.name.clone(),
                line,
                lookahead: self.max_lookahead,
            }),
            None => Ok(()),
        }
    }

    fn new_node(&mut self, value: NodeValue, sourcepos: Sourcepos) -> NodeId {
        self.arena.new_node(Ast::new(value, sourcepos))
    }

    fn append(&mut self, node: NodeId) {
        self.target.append(&mut self.arena, node);
    }

    fn add_child(&mut self, value: NodeValue, sourcepos: Sourcepos) -> NodeId {
        let node = self.new_node(value, sourcepos);
        self.append(node);
        node
    }

    /// Builds a system message, with the offending source as a literal block
    /// when there is one.
    fn system_message(&mut self, kind: MessageKind, line: usize, literal: Option<String>) -> NodeId {
        log::debug!(
            "{}:{}: ({}) {}",
            self.name,
            line,
            kind.severity(),
            kind.message()
        );
        let sourcepos = Sourcepos {
            line,
            ..Sourcepos::default()
        };
        let message = self.new_node(
            NodeValue::SystemMessage(NodeSystemMessage {
                kind,
                severity: kind.severity(),
            }),
            sourcepos,
        );
        if let Some(text) = literal {
            let sourcepos = Sourcepos {
                line,
                start_position: 1,
                length: strings::rune_count(&text),
            };
            let block = self.new_node(NodeValue::LiteralBlock(text), sourcepos);
            message.append(block, &mut self.arena);
        }
        message
    }

    fn report(&mut self, kind: MessageKind, line: usize, literal: Option<String>) {
        let message = self.system_message(kind, line, literal);
        self.append(message);
    }

    /// Parses body elements until a token starts left of `indent`.
    fn parse_body(&mut self, indent: usize) -> Result<(), Error> {
        loop {
            self.check_fault()?;
            let Some(next) = self.buf.peek(1) else {
                break;
            };
            match next.kind {
                TokenKind::Eof => break,
                TokenKind::BlankLine => {
                    self.buf.next(1);
                    continue;
                }
                _ if column(&next) < indent => break,
                _ => {}
            }
            self.buf.next(1);
            self.dispatch(next, indent)?;
        }
        Ok(())
    }

    /// Parses a nested body into `parent`, restoring the target afterwards.
    fn nested_body(&mut self, parent: NodeId, indent: usize) -> Result<(), Error> {
        let saved = self.target;
        self.target.set_parent(parent);
        self.nested += 1;
        let result = self.parse_body(indent);
        self.nested -= 1;
        self.target = saved;
        result
    }

    fn dispatch(&mut self, token: Token, indent: usize) -> Result<(), Error> {
        log::trace!("{}: dispatch {} at indent {}", self.name, token, indent);
        match token.kind {
            TokenKind::Space if token.at_line_start() => {
                if token.length > indent {
                    self.block_quote(token, indent)?;
                }
            }
            TokenKind::Title | TokenKind::SectionAdornment | TokenKind::Transition
                if self.nested > 0 =>
            {
                self.nested_section_markup(token, indent)
            }
            TokenKind::Title | TokenKind::SectionAdornment => self.section(token),
            TokenKind::Transition => self.transition(token),
            TokenKind::CommentMark => self.comment(token, indent),
            TokenKind::HyperlinkTargetStart | TokenKind::HyperlinkTargetPrefix => {
                self.hyperlink_target(token, indent)
            }
            TokenKind::Bullet => self.bullet_list(token, indent)?,
            TokenKind::EnumListAffix | TokenKind::EnumListArabic => {
                self.enum_list(token, indent)?
            }
            TokenKind::DefinitionTerm => self.definition_list(token, indent)?,
            _ => self.paragraph(token, indent),
        }
        Ok(())
    }

    /// Reports a construct that ended without a blank line before text at
    /// or right of `outer`.
    fn check_unindent(&mut self, kind: MessageKind, outer: usize) {
        if self
            .buf
            .current()
            .map_or(true, |t| t.kind == TokenKind::BlankLine)
        {
            return;
        }
        let Some(next) = self.buf.peek(1) else {
            return;
        };
        if matches!(next.kind, TokenKind::BlankLine | TokenKind::Eof) || column(&next) < outer {
            return;
        }
        self.report(kind, next.line, None);
    }

    /// Explicit markup blocks may follow each other without blank lines.
    fn explicit_unindent(&mut self, outer: usize) {
        let next_explicit = self.buf.peek(1).map_or(false, |t| {
            matches!(
                t.kind,
                TokenKind::CommentMark
                    | TokenKind::HyperlinkTargetStart
                    | TokenKind::HyperlinkTargetPrefix
            )
        });
        if !next_explicit {
            self.check_unindent(MessageKind::ExplicitMarkupWithUnIndent, outer);
        }
    }

    fn transition(&mut self, token: Token) {
        let sourcepos = Sourcepos::from(&token);
        self.add_child(NodeValue::Transition(token.text), sourcepos);
    }

    fn block_quote(&mut self, space: Token, outer: usize) -> Result<(), Error> {
        let unexpected = self.buf.peek_back(1).map_or(false, |prev| {
            !matches!(
                prev.kind,
                TokenKind::BlankLine | TokenKind::SectionAdornment | TokenKind::Transition
            )
        });
        if unexpected {
            self.report(MessageKind::UnexpectedIndentation, space.line, None);
        }
        let quote = self.add_child(NodeValue::BlockQuote, Sourcepos::from(&space));
        self.nested_body(quote, space.length)?;
        self.check_unindent(MessageKind::BlockQuoteWithUnIndent, outer);
        Ok(())
    }

    fn paragraph(&mut self, first: Token, indent: usize) {
        if self.nested > 0
            && first.kind == TokenKind::Text
            && first.length < 4
            && first.text != "::"
            && scanners::is_adornment_line(&first.text.chars().collect::<Vec<_>>())
            && self.buf.peek(1).map_or(true, |t| t.line != first.line)
        {
            self.report(
                MessageKind::UnexpectedTitleOverlineOrTransition,
                first.line,
                None,
            );
        }

        let para = self.add_child(NodeValue::Paragraph, Sourcepos::from(&first));
        let mut run = TextRun::default();
        let mut token = first;
        loop {
            match token.kind {
                kind if kind.is_inline_open() => {
                    self.flush_text(para, &mut run);
                    self.inline_markup(token, para);
                }
                TokenKind::Escape => {}
                _ => run.push(&token),
            }

            let line = self.buf.current().map_or(0, |t| t.line);
            let Some(next) = self.buf.peek(1) else {
                break;
            };
            if next.line == line && !matches!(next.kind, TokenKind::Eof | TokenKind::BlankLine) {
                self.buf.next(1);
                token = next;
                continue;
            }
            if !self.continues_paragraph(indent) {
                break;
            }
            let escaped = self
                .buf
                .current()
                .map_or(false, |t| t.kind == TokenKind::Escape);
            if indent > 0 {
                self.buf.next(1);
            }
            let Some(next) = self.buf.next(1) else {
                break;
            };
            if !escaped {
                run.newline(&next);
            }
            token = next;
        }
        self.flush_text(para, &mut run);
    }

    fn continues_paragraph(&mut self, indent: usize) -> bool {
        let Some(next) = self.buf.peek(1) else {
            return false;
        };
        if indent == 0 {
            return next.at_line_start() && is_paragraph_text(next.kind);
        }
        next.kind == TokenKind::Space
            && next.at_line_start()
            && next.length == indent
            && self
                .buf
                .peek(2)
                .map_or(false, |t| t.line == next.line && is_paragraph_text(t.kind))
    }

    fn flush_text(&mut self, para: NodeId, run: &mut TextRun) {
        if run.text.is_empty() {
            return;
        }
        let text = std::mem::take(&mut run.text);
        let mut sourcepos = run.start.take().unwrap_or_default();
        sourcepos.length = strings::rune_count(&text);
        let node = self.new_node(NodeValue::Text(text), sourcepos);
        para.append(node, &mut self.arena);
    }

    fn comment(&mut self, mark: Token, outer: usize) {
        let mark_index = self.buf.index();
        let indent = mark.column();
        let mut first = String::new();
        let mut malformed = false;
        if let Some(next) = self.buf.peek(1).filter(|t| t.line == mark.line) {
            match next.kind {
                TokenKind::Eof => {}
                TokenKind::Space => {
                    self.buf.next(1);
                    if let Some(text) = self
                        .buf
                        .peek(1)
                        .filter(|t| t.line == mark.line && t.kind != TokenKind::Eof)
                    {
                        self.buf.next(1);
                        first = text.text;
                    }
                }
                _ => {
                    self.buf.next(1);
                    malformed = true;
                    first = next.text;
                }
            }
        }
        let empty = first.is_empty() && !malformed;

        let mut lines: Vec<(usize, String)> = vec![];
        while let Some(next) = self.buf.peek(1) {
            match next.kind {
                TokenKind::Space if next.at_line_start() && next.length > indent => {
                    self.buf.next(1);
                    let text = match self.buf.peek(1) {
                        Some(t) if t.line == next.line && t.kind != TokenKind::Eof => {
                            self.buf.next(1);
                            t.text
                        }
                        _ => String::new(),
                    };
                    lines.push((next.length, text));
                }
                TokenKind::BlankLine if !(empty && lines.is_empty()) => {
                    // Walk the blank run so the lookahead window stays one
                    // token wide, then step back if the comment ends here.
                    let before = self.buf.index();
                    let mut blanks = 0;
                    while self
                        .buf
                        .peek(1)
                        .map_or(false, |t| t.kind == TokenKind::BlankLine)
                    {
                        self.buf.next(1);
                        blanks += 1;
                    }
                    let continues = self.buf.peek(1).map_or(false, |t| {
                        t.kind == TokenKind::Space && t.at_line_start() && t.length > indent
                    });
                    if !continues {
                        self.buf.rewind(before);
                        break;
                    }
                    lines.extend((0..blanks).map(|_| (0, String::new())));
                }
                _ => break,
            }
        }

        let mut text = first;
        for line in strings::dedent(&lines) {
            if !text.is_empty() {
                text.push('\n');
            }
            text.push_str(&line);
        }
        let sourcepos = Sourcepos {
            length: strings::rune_count(&text),
            ..Sourcepos::from(&mark)
        };
        self.add_child(NodeValue::Comment(text), sourcepos);

        if malformed {
            let literal = mark_index.map(|i| self.buf.glob_text(i, i + 1));
            self.report(MessageKind::ExplicitMarkupWithUnIndent, mark.line, literal);
        }
        self.explicit_unindent(outer);
    }

    fn hyperlink_target(&mut self, first: Token, outer: usize) {
        let indent = first.column();
        let sourcepos = Sourcepos::from(&first);
        let mut target = NodeHyperlinkTarget {
            name: String::new(),
            refname: String::new(),
            uri: String::new(),
            anonymous: false,
        };
        let mut token = Some(first);
        while let Some(t) = token {
            let line = t.line;
            match t.kind {
                TokenKind::HyperlinkTargetPrefix => target.anonymous = t.text == "__",
                TokenKind::HyperlinkTargetName => target.name = t.text,
                TokenKind::HyperlinkTargetUri => target.uri.push_str(t.text.trim()),
                _ => {}
            }
            token = match self.buf.peek(1) {
                Some(next) if next.line == line && next.kind != TokenKind::Eof => self.buf.next(1),
                Some(next)
                    if next.kind == TokenKind::Space
                        && next.at_line_start()
                        && next.length > indent
                        && self.buf.peek(2).map_or(false, |u| {
                            u.kind == TokenKind::HyperlinkTargetUri && u.line == next.line
                        }) =>
                {
                    self.buf.next(1)
                }
                _ => None,
            };
        }
        target.refname = strings::normalize_name(&target.name);
        self.add_child(NodeValue::HyperlinkTarget(target), sourcepos);
        self.explicit_unindent(outer);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn target_tracks_the_open_container() {
        let mut arena: Arena<Ast> = Arena::new();
        let root = arena.new_node(Ast::new(NodeValue::Document, Sourcepos::default()));
        let quote = arena.new_node(Ast::new(NodeValue::BlockQuote, Sourcepos::default()));
        let para = arena.new_node(Ast::new(NodeValue::Paragraph, Sourcepos::default()));

        let mut target = NodeTarget::new(root);
        target.append(&mut arena, quote);
        target.set_parent(quote);
        assert_eq!(target.parent(), Some(quote));
        target.append(&mut arena, para);
        assert_eq!(para.ancestors(&arena).nth(1), Some(quote));

        target.reset();
        assert_eq!(target.parent(), None);
        assert_eq!(root.children(&arena).count(), 1);
    }
}
