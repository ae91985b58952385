//! Running text and inline markup.

use super::{Lexer, StateFn, TokenKind};
use crate::scanners;
use crate::strings::indentation;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Markup {
    Strong,
    Emphasis,
    Literal,
    Interpreted,
    Role,
    Reference,
}

impl Markup {
    /// Open, body and close kinds.
    fn kinds(self) -> (TokenKind, TokenKind, TokenKind) {
        match self {
            Markup::Strong => (
                TokenKind::InlineStrongOpen,
                TokenKind::InlineStrong,
                TokenKind::InlineStrongClose,
            ),
            Markup::Emphasis => (
                TokenKind::InlineEmphasisOpen,
                TokenKind::InlineEmphasis,
                TokenKind::InlineEmphasisClose,
            ),
            Markup::Literal => (
                TokenKind::InlineLiteralOpen,
                TokenKind::InlineLiteral,
                TokenKind::InlineLiteralClose,
            ),
            Markup::Interpreted | Markup::Role => (
                TokenKind::InlineInterpretedTextOpen,
                TokenKind::InlineInterpretedText,
                TokenKind::InlineInterpretedTextClose,
            ),
            Markup::Reference => (
                TokenKind::InlineReferenceOpen,
                TokenKind::InlineReferenceText,
                TokenKind::InlineReferenceClose,
            ),
        }
    }
}

/// Where an end-string was found.
#[derive(Debug, Clone, Copy)]
pub(super) struct Close {
    line: usize,
    index: usize,
    len: usize,
    markup: Markup,
}

/// Markup recognized at the scan position, waiting to be emitted.
#[derive(Debug, Clone, Copy)]
pub(super) struct Pending {
    markup: Markup,
    open_len: usize,
    role_end: usize,
    close: Option<Close>,
}

pub(super) fn lex_text(l: &mut Lexer) -> Option<StateFn> {
    let kind = l.text_kind();
    loop {
        match l.next_rune() {
            None => {
                if l.index > l.start {
                    l.emit(kind);
                }
                return Some(StateFn(super::lex_start));
            }
            Some('\\') => {
                l.backup();
                if l.index > l.start {
                    l.emit(kind);
                }
                l.index += 1;
                l.emit(TokenKind::Escape);
                // The escaped rune starts the next run and never opens markup.
                l.next_rune();
            }
            Some(_) => {
                l.backup();
                if let Some(pending) = markup_at(l) {
                    if l.index > l.start {
                        l.emit(kind);
                    }
                    l.markup = Some(pending);
                    return Some(StateFn(lex_markup));
                }
                l.index += 1;
            }
        }
    }
}

fn markup_at(l: &Lexer) -> Option<Pending> {
    let line = l.current();
    let ix = l.index;
    let prev = ix.checked_sub(1).map(|p| line[p]);
    let open = |markup, open_len| Pending {
        markup,
        open_len,
        role_end: 0,
        close: find_close(l, markup, ix + open_len + 1),
    };

    match (l.peek_rune(0)?, l.peek_rune(1)) {
        ('`', Some('`')) if scanners::markup_start_ok(prev, l.peek_rune(2)) => {
            Some(open(Markup::Literal, 2))
        }
        ('`', next) if next != Some('`') && scanners::markup_start_ok(prev, next) => {
            let close = find_close(l, Markup::Interpreted, ix + 2);
            Some(Pending {
                markup: close.map_or(Markup::Interpreted, |c| c.markup),
                open_len: 1,
                role_end: 0,
                close,
            })
        }
        ('*', Some('*')) if scanners::markup_start_ok(prev, l.peek_rune(2)) => {
            Some(open(Markup::Strong, 2))
        }
        ('*', next) if next != Some('*') && scanners::markup_start_ok(prev, next) => {
            Some(open(Markup::Emphasis, 1))
        }
        (':', next) if scanners::markup_start_ok(prev, next) => {
            let name = line[ix + 1..]
                .iter()
                .take_while(|&&c| scanners::is_role_char(c))
                .count();
            let role_end = ix + 1 + name;
            if name == 0
                || line.get(role_end) != Some(&':')
                || line.get(role_end + 1) != Some(&'`')
                || !scanners::markup_start_ok(Some(':'), line.get(role_end + 2).copied())
            {
                return None;
            }
            Some(Pending {
                markup: Markup::Role,
                open_len: 1,
                role_end,
                close: find_close(l, Markup::Interpreted, role_end + 3),
            })
        }
        _ => None,
    }
}

/// Length and kind of the end-string for `markup` at `ix`, if a valid one
/// sits there.  A backquote search also matches reference end-strings.
fn close_at(line: &[char], ix: usize, markup: Markup) -> Option<(usize, Markup)> {
    let rest = &line[ix..];
    let (marker, markup): (&[char], Markup) = match markup {
        Markup::Strong => (&['*', '*'][..], markup),
        Markup::Emphasis => (&['*'][..], markup),
        Markup::Literal => (&['`', '`'][..], markup),
        Markup::Interpreted | Markup::Role | Markup::Reference => {
            if rest.starts_with(&['`', '_', '_']) {
                (&['`', '_', '_'][..], Markup::Reference)
            } else if rest.starts_with(&['`', '_']) {
                (&['`', '_'][..], Markup::Reference)
            } else {
                (&['`'][..], markup)
            }
        }
    };
    if !rest.starts_with(marker) {
        return None;
    }

    let prev = ix.checked_sub(1).map(|p| line[p]);
    if markup != Markup::Literal && prev == Some('\\') {
        return None;
    }
    let end = ix + marker.len();
    if !scanners::markup_end_ok(prev, line.get(end).copied()) {
        return None;
    }
    if marker.len() == 2 && markup != Markup::Reference && line[end..].starts_with(marker) {
        return None;
    }
    Some((marker.len(), markup))
}

/// Searches for the end-string from `from` on the current line, then on
/// following non-blank lines of the same block.
fn find_close(l: &Lexer, markup: Markup, from: usize) -> Option<Close> {
    let base = indentation(l.current());
    let mut line_no = l.line;
    let mut ix = from;

    loop {
        let line = l.line_at(line_no)?;
        while ix < line.len() {
            if let Some((len, markup)) = close_at(line, ix, markup) {
                return Some(Close {
                    line: line_no,
                    index: ix,
                    len,
                    markup,
                });
            }
            ix += 1;
        }

        line_no += 1;
        let next = l.line_at(line_no)?;
        if next.is_empty() || indentation(next) < base {
            return None;
        }
        ix = indentation(next);
    }
}

fn lex_markup(l: &mut Lexer) -> Option<StateFn> {
    let Some(pending) = l.markup.take() else {
        return Some(StateFn(lex_text));
    };
    let (open, body, close_kind) = pending.markup.kinds();

    if pending.markup == Markup::Role {
        l.index += 1;
        l.emit(TokenKind::InlineInterpretedTextRoleOpen);
        l.index = pending.role_end;
        l.emit(TokenKind::InlineInterpretedTextRole);
        l.index += 1;
        l.emit(TokenKind::InlineInterpretedTextRoleClose);
        l.index += 1;
        l.emit(open);
    } else {
        l.index += pending.open_len;
        l.emit(open);
    }

    let Some(close) = pending.close else {
        l.index = l.current().len();
        if l.index > l.start {
            l.emit(body);
        }
        l.emit_synthetic(close_kind, "");
        return Some(StateFn(super::lex_start));
    };

    while l.line < close.line {
        l.index = l.current().len();
        if l.index > l.start {
            l.emit(body);
        }
        l.emit_synthetic(TokenKind::BlankLine, "\n");
        if !l.advance_line() {
            break;
        }
        let indent = indentation(l.current());
        if indent > 0 {
            l.index = indent;
            l.emit(TokenKind::Space);
        }
    }

    l.index = close.index;
    if l.index > l.start {
        l.emit(body);
    }
    l.index += close.len;
    l.emit(close_kind);
    Some(StateFn(lex_text))
}
