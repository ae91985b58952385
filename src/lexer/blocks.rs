//! Line classifiers and the states for block-level constructs.

use super::{inlines, Explicit, ExplicitKind, Lexer, StateFn, TokenKind};
use crate::scanners;
use crate::strings::indentation;

/// Picks the state for a line whose indentation has been consumed.  The
/// classifiers run in precedence order; the first match wins.
pub(super) fn classify(l: &mut Lexer, prev_explicit: bool) -> Option<StateFn> {
    let indent = l.index;

    let explicit_ok = prev_explicit || l.prev_line_blank();
    if explicit_ok {
        if is_comment(l) {
            return Some(StateFn(lex_comment));
        }
        if target_parts(l.current(), indent).is_some() {
            return Some(StateFn(lex_hyperlink_target));
        }
    }

    let item_ok = l.prev_line_blank() || l.list_indents.last() == Some(&indent);
    if item_ok {
        if is_bullet(l) {
            return Some(StateFn(lex_bullet));
        }
        if enumerator_parts(l.current(), indent).is_some() {
            return Some(StateFn(lex_enum));
        }
    }
    if l.list_indents.last() == Some(&indent) {
        l.list_indents.pop();
    }

    if is_section(l) {
        return Some(StateFn(lex_section));
    }
    if is_transition(l) {
        return Some(StateFn(lex_transition));
    }
    if is_definition_term(l) {
        return Some(StateFn(lex_definition_term));
    }

    Some(StateFn(inlines::lex_text))
}

fn is_comment(l: &Lexer) -> bool {
    match &l.current()[l.index..] {
        ['.', '.'] => true,
        ['.', '.', ' ', ..] => target_parts(l.current(), l.index).is_none(),
        ['.', '.', c, ..] => *c != '.' && *c != '_',
        _ => false,
    }
}

fn lex_comment(l: &mut Lexer) -> Option<StateFn> {
    let indent = l.index;
    l.index += 2;
    l.emit(TokenKind::CommentMark);

    let empty = l.at_eol();
    if l.skip_spaces() > 0 {
        l.emit(TokenKind::Space);
    }
    if !l.at_eol() {
        l.index = l.current().len();
        l.emit(TokenKind::Text);
    }

    l.explicit = Some(Explicit {
        indent,
        kind: ExplicitKind::Comment,
        empty,
    });
    Some(StateFn(super::lex_start))
}

/// An indented line continuing a comment or hyperlink target, lexed
/// verbatim.
pub(super) fn lex_explicit_continuation(l: &mut Lexer) -> Option<StateFn> {
    let kind = match l.explicit {
        Some(Explicit {
            kind: ExplicitKind::Target,
            ..
        }) => TokenKind::HyperlinkTargetUri,
        _ => TokenKind::Text,
    };

    if l.skip_spaces() > 0 {
        l.emit(TokenKind::Space);
    }
    l.index = l.current().len();
    l.emit(kind);
    Some(StateFn(super::lex_start))
}

/// Splits a hyperlink target line starting at `from` into token kinds and
/// the column each one ends at.
fn target_parts(line: &[char], from: usize) -> Option<Vec<(TokenKind, usize)>> {
    let mut parts = vec![];
    let mut ix = from;

    let spaces = |ix: usize| ix + line[ix..].iter().take_while(|&&c| c == ' ').count();

    if line[from..].starts_with(&['_', '_', ' ']) {
        parts.push((TokenKind::HyperlinkTargetPrefix, ix + 2));
        parts.push((TokenKind::Space, spaces(ix + 2)));
        parts.push((TokenKind::HyperlinkTargetUri, line.len()));
        return Some(parts);
    }

    if !line[from..].starts_with(&['.', '.', ' ']) {
        return None;
    }
    parts.push((TokenKind::HyperlinkTargetStart, ix + 2));
    ix = spaces(ix + 2);
    parts.push((TokenKind::Space, ix));

    if line.get(ix) != Some(&'_') {
        return None;
    }
    if line[ix..].starts_with(&['_', '_', ':']) {
        parts.push((TokenKind::HyperlinkTargetPrefix, ix + 2));
        ix += 2;
    } else {
        parts.push((TokenKind::HyperlinkTargetPrefix, ix + 1));
        ix += 1;

        if line.get(ix) == Some(&'`') {
            parts.push((TokenKind::HyperlinkTargetQuote, ix + 1));
            ix += 1;
            let close = ix + line[ix..].iter().position(|&c| c == '`')?;
            if close == ix {
                return None;
            }
            parts.push((TokenKind::HyperlinkTargetName, close));
            parts.push((TokenKind::HyperlinkTargetQuote, close + 1));
            ix = close + 1;
        } else {
            let end = (ix + 1..line.len()).find(|&j| {
                line[j] == ':'
                    && line[j - 1] != '\\'
                    && line.get(j + 1).map_or(true, |&c| c == ' ')
            })?;
            parts.push((TokenKind::HyperlinkTargetName, end));
            ix = end;
        }
    }

    if line.get(ix) != Some(&':') {
        return None;
    }
    parts.push((TokenKind::HyperlinkTargetSuffix, ix + 1));
    ix += 1;

    if ix < line.len() {
        parts.push((TokenKind::Space, spaces(ix)));
        parts.push((TokenKind::HyperlinkTargetUri, line.len()));
    }
    Some(parts)
}

fn lex_hyperlink_target(l: &mut Lexer) -> Option<StateFn> {
    let indent = l.index;
    let parts = target_parts(l.current(), indent).unwrap_or_default();
    for (kind, end) in parts {
        l.index = end;
        l.emit(kind);
    }

    l.explicit = Some(Explicit {
        indent,
        kind: ExplicitKind::Target,
        empty: false,
    });
    Some(StateFn(super::lex_start))
}

fn is_bullet(l: &Lexer) -> bool {
    matches!(l.peek_rune(0), Some(c) if scanners::is_bullet_char(c))
        && matches!(l.peek_rune(1), Some(' ') | None)
}

fn lex_bullet(l: &mut Lexer) -> Option<StateFn> {
    let indent = l.index;
    l.push_list_indent(indent);

    l.index += 1;
    l.emit(TokenKind::Bullet);
    if l.skip_spaces() > 0 {
        l.emit(TokenKind::Space);
    }
    Some(StateFn(inlines::lex_text))
}

/// Splits an enumerator (`1.`, `1)` or `(1)`) and the space after it.
fn enumerator_parts(line: &[char], from: usize) -> Option<Vec<(TokenKind, usize)>> {
    let mut parts = vec![];
    let mut ix = from;

    let parens = line.get(ix) == Some(&'(');
    if parens {
        ix += 1;
        parts.push((TokenKind::EnumListAffix, ix));
    }

    let digits = line[ix..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    ix += digits;
    parts.push((TokenKind::EnumListArabic, ix));

    match line.get(ix) {
        Some(')') => {}
        Some('.') if !parens => {}
        _ => return None,
    }
    ix += 1;
    parts.push((TokenKind::EnumListAffix, ix));

    if line.get(ix) != Some(&' ') {
        return None;
    }
    ix += line[ix..].iter().take_while(|&&c| c == ' ').count();
    parts.push((TokenKind::Space, ix));
    Some(parts)
}

fn lex_enum(l: &mut Lexer) -> Option<StateFn> {
    let indent = l.index;
    l.push_list_indent(indent);

    let parts = enumerator_parts(l.current(), indent).unwrap_or_default();
    for (kind, end) in parts {
        l.index = end;
        l.emit(kind);
    }
    Some(StateFn(inlines::lex_text))
}

fn is_section(l: &Lexer) -> bool {
    let indent = l.index;
    let next = l.line_at(l.line + 1);

    if scanners::is_adornment_line(&l.current()[indent..]) {
        return next.map_or(false, |n| !n.is_empty());
    }

    match next {
        Some(n) => {
            let ni = indentation(n);
            ni == indent && scanners::is_adornment_line(&n[ni..])
        }
        None => false,
    }
}

/// Emits the rest of the line as an adornment, after any indentation.
fn emit_line_as(l: &mut Lexer, kind: TokenKind) {
    if l.index == 0 {
        let indent = indentation(l.current());
        if indent > 0 {
            l.index = indent;
            l.emit(TokenKind::Space);
        }
    }
    l.index = l.current().len();
    l.emit(kind);
}

fn next_line_is_adornment(l: &Lexer) -> bool {
    l.line_at(l.line + 1).map_or(false, |n| {
        !n.is_empty() && scanners::is_adornment_line(&n[indentation(n)..])
    })
}

fn lex_section(l: &mut Lexer) -> Option<StateFn> {
    if scanners::is_adornment_line(&l.current()[l.index..]) {
        emit_line_as(l, TokenKind::SectionAdornment);
        l.advance_line();

        if scanners::is_adornment_line(&l.current()[indentation(l.current())..]) {
            emit_line_as(l, TokenKind::SectionAdornment);
            return Some(StateFn(super::lex_start));
        }

        emit_line_as(l, TokenKind::Title);
        if next_line_is_adornment(l) {
            l.advance_line();
            emit_line_as(l, TokenKind::SectionAdornment);
        }
    } else {
        emit_line_as(l, TokenKind::Title);
        l.advance_line();
        emit_line_as(l, TokenKind::SectionAdornment);
    }
    Some(StateFn(super::lex_start))
}

fn is_transition(l: &Lexer) -> bool {
    let rest = &l.current()[l.index..];
    rest.len() >= 4
        && scanners::is_adornment_line(rest)
        && l.line_at(l.line + 1).map_or(true, |n| n.is_empty())
}

fn lex_transition(l: &mut Lexer) -> Option<StateFn> {
    emit_line_as(l, TokenKind::Transition);
    Some(StateFn(super::lex_start))
}

fn is_definition_term(l: &Lexer) -> bool {
    let indent = l.index;
    let prev_ok = l.line == 0 || {
        let prev = &l.lines[l.line - 1];
        prev.is_empty() || indentation(prev) > indent
    };
    let next_ok = l
        .line_at(l.line + 1)
        .map_or(false, |n| !n.is_empty() && indentation(n) > indent);
    prev_ok && next_ok
}

fn lex_definition_term(l: &mut Lexer) -> Option<StateFn> {
    emit_line_as(l, TokenKind::DefinitionTerm);
    l.definition_indent = l.line_at(l.line + 1).map(indentation);
    Some(StateFn(super::lex_start))
}
