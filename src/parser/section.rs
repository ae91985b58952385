//! Section titles, and the diagnostics for malformed or misplaced ones.

use crate::lexer::{Token, TokenKind};
use crate::nodes::{NodeAdornment, NodeSection, NodeTitle, NodeValue, Sourcepos};
use crate::parser::messages::MessageKind;
use crate::parser::Parser;

/// A diagnostic waiting for its section to exist.
type Pending = (MessageKind, usize, String);

/// Adornments shorter than this are only treated as titles when they are at
/// least as long as the title text.
const MIN_ADORNMENT: usize = 4;

impl Parser {
    pub(super) fn section(&mut self, token: Token) {
        match token.kind {
            TokenKind::Title => self.underlined_section(token),
            _ => self.overlined_section(token),
        }
    }

    fn underlined_section(&mut self, title: Token) {
        let Some(title_ix) = self.buf.index() else {
            return;
        };
        let underline = match self.buf.peek(1) {
            Some(t) if t.kind == TokenKind::SectionAdornment => t,
            _ => return self.as_paragraph(title_ix, 0),
        };
        self.buf.next(1);
        let under_ix = title_ix + 1;

        let mut pending = vec![];
        if title.length > underline.length {
            if underline.length < MIN_ADORNMENT {
                self.report(
                    MessageKind::UnderlineTooShortForTitle,
                    underline.line,
                    None,
                );
                return self.as_paragraph(title_ix, 0);
            }
            pending.push((
                MessageKind::ShortUnderline,
                underline.line,
                self.buf.glob_text(title_ix, under_ix),
            ));
        }
        self.make_section(None, &title, &underline, pending, title_ix, under_ix);
    }

    fn overlined_section(&mut self, over: Token) {
        let Some(over_ix) = self.buf.index() else {
            return;
        };
        let Some((n, next)) = self.buf.peek_skip(TokenKind::Space) else {
            return self.as_paragraph(over_ix, 0);
        };

        match next.kind {
            TokenKind::SectionAdornment if next.line == over.line + 1 => {
                self.buf.next(n);
                if over.length < MIN_ADORNMENT {
                    return self.short_overline(&over, over_ix);
                }
                let literal = self.buf.glob_text(over_ix, over_ix + n);
                self.report(
                    MessageKind::InvalidSectionOrTransitionMarker,
                    over.line,
                    Some(literal),
                );
            }
            TokenKind::Title if next.line == over.line + 1 => {
                self.buf.next(n);
                self.overlined_title(over, over_ix, next, over_ix + n);
            }
            _ => self.as_paragraph(over_ix, 0),
        }
    }

    fn overlined_title(&mut self, over: Token, over_ix: usize, title: Token, title_ix: usize) {
        match self.buf.peek_skip(TokenKind::Space) {
            Some((n, under))
                if under.kind == TokenKind::SectionAdornment && under.line == title.line + 1 =>
            {
                self.buf.next(n);
                let under_ix = title_ix + n;
                if over.length < MIN_ADORNMENT {
                    return self.short_overline(&over, over_ix);
                }
                let source = self.buf.glob_text(over_ix, under_ix);
                if over.text != under.text {
                    self.report(
                        MessageKind::OverlineUnderlineMismatch,
                        over.line,
                        Some(source),
                    );
                    return;
                }
                let mut pending = vec![];
                if title.column() + title.length > over.length {
                    pending.push((MessageKind::ShortOverline, over.line, source));
                }
                self.make_section(Some(&over), &title, &under, pending, over_ix, under_ix);
            }
            Some((_, t)) if t.kind != TokenKind::Eof => {
                if over.length < MIN_ADORNMENT {
                    return self.short_overline(&over, over_ix);
                }
                let count = self
                    .buf
                    .peek_line_all_tokens(title.line + 1)
                    .iter()
                    .filter(|t| t.kind != TokenKind::Eof)
                    .count();
                if count > 0 {
                    self.buf.next(count);
                }
                let end = title_ix + count;
                let literal = self.buf.glob_text(over_ix, end);
                self.report(
                    MessageKind::MissingMatchingUnderlineForOverline,
                    over.line,
                    Some(literal),
                );
            }
            _ => {
                if over.length < MIN_ADORNMENT {
                    return self.short_overline(&over, over_ix);
                }
                let literal = self.buf.glob_text(over_ix, title_ix);
                self.report(
                    MessageKind::IncompleteSectionTitle,
                    over.line,
                    Some(literal),
                );
            }
        }
    }

    fn short_overline(&mut self, over: &Token, over_ix: usize) {
        self.report(MessageKind::OverlineTooShortForTitle, over.line, None);
        self.as_paragraph(over_ix, 0);
    }

    /// Records a section, attaches it under the last section one level up,
    /// and makes it the target for the body that follows.
    fn make_section(
        &mut self,
        over: Option<&Token>,
        title: &Token,
        under: &Token,
        pending: Vec<Pending>,
        from: usize,
        to: usize,
    ) {
        let rune = under.text.chars().next().unwrap_or('=');
        let adornment = |t: &Token| NodeAdornment {
            rune,
            sourcepos: Sourcepos::from(t),
        };
        let value = NodeValue::Section(NodeSection {
            level: 0,
            title: NodeTitle {
                text: title.text.clone(),
                sourcepos: Sourcepos::from(title),
            },
            overline: over.map(adornment),
            underline: adornment(under),
        });
        let section = self.new_node(value, Sourcepos::from(title));

        if let Some(message) = self.levels.add(&mut self.arena, section) {
            section.remove(&mut self.arena);
            let literal = self.buf.glob_text(from, to);
            let line = over.map_or(title.line, |o| o.line);
            self.report(message.kind, line, Some(literal));
            return;
        }

        let level = match self.arena[section].get().value {
            NodeValue::Section(ref s) => s.level,
            _ => 1,
        };
        log::debug!(
            "{}:{}: section {:?} at level {}",
            self.name,
            title.line,
            title.text,
            level
        );
        if level <= 1 {
            self.target.reset();
            self.append(section);
        } else {
            let parent = self
                .levels
                .last_section_by_level(level - 1)
                .unwrap_or(self.root);
            parent.append(section, &mut self.arena);
        }
        if let Some(previous) = self.target.parent() {
            log::trace!("{}: closing {:?}", self.name, previous);
        }
        self.target.set_parent(section);

        for (kind, line, literal) in pending {
            self.report(kind, line, Some(literal));
        }
    }

    /// Title markup inside an indented body, where sections cannot start.
    pub(super) fn nested_section_markup(&mut self, token: Token, indent: usize) {
        let Some(ix) = self.buf.index() else {
            return;
        };
        match token.kind {
            TokenKind::Title => {
                let under = match self.buf.peek_skip(TokenKind::Space) {
                    Some((n, t))
                        if t.kind == TokenKind::SectionAdornment && t.line == token.line + 1 =>
                    {
                        (n, t)
                    }
                    _ => return self.as_paragraph(ix, indent),
                };
                let (n, under) = under;
                if token.length > under.length && under.length < MIN_ADORNMENT {
                    return self.as_paragraph(ix, indent);
                }
                self.buf.next(n);
                let literal = format!("{}\n{}", token.text, under.text);
                if token.length > under.length {
                    self.report(
                        MessageKind::ShortUnderline,
                        under.line,
                        Some(literal.clone()),
                    );
                }
                self.report(MessageKind::UnexpectedSectionTitle, token.line, Some(literal));
            }
            TokenKind::SectionAdornment if token.length < MIN_ADORNMENT => {
                self.as_paragraph(ix, indent)
            }
            _ => self.report(
                MessageKind::UnexpectedSectionTitleOrTransition,
                token.line,
                Some(token.text.clone()),
            ),
        }
    }

    /// Re-reads title markup from `from` up to the cursor as plain text and
    /// parses it as a paragraph.
    fn as_paragraph(&mut self, from: usize, indent: usize) {
        let to = self.buf.index().unwrap_or(from);
        for i in from..=to {
            let Some(token) = self.buf.get(i) else {
                continue;
            };
            if matches!(
                token.kind,
                TokenKind::Title | TokenKind::SectionAdornment | TokenKind::Transition
            ) {
                let text = Token {
                    kind: TokenKind::Text,
                    ..token.clone()
                };
                self.buf.clear_tokens(i, i);
                self.buf.insert(text, i);
            }
        }
        self.buf.rewind(from.checked_sub(1));
        if let Some(first) = self.buf.next(1) {
            self.paragraph(first, indent);
        }
    }
}
