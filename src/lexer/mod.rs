//! The lexer.
//!
//! Input is normalized into lines of runes, then scanned by a trampoline of
//! state functions.  Each state consumes runes, queues zero or more tokens and
//! returns the next state; the [`Iterator`] implementation drives the
//! trampoline only as far as needed to hand out the next token.

mod blocks;
mod inlines;
mod token;

pub use token::{Token, TokenKind};

use std::collections::VecDeque;
use std::fmt;

use crate::strings;
use crate::{Error, Options};

/// A lexer state.  Returns the state to run next, or `None` once the final
/// token has been queued.
pub(crate) struct StateFn(fn(&mut Lexer) -> Option<StateFn>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExplicitKind {
    Comment,
    Target,
}

/// An explicit markup block whose indented continuation lines are lexed
/// verbatim.
#[derive(Debug, Clone, Copy)]
struct Explicit {
    indent: usize,
    kind: ExplicitKind,
    empty: bool,
}

/// Lexes `input` with default [`Options`].
///
/// ```rust
/// # use rstree::{lex, TokenKind};
/// let kinds: Vec<TokenKind> = lex("doc", "Hello").unwrap().map(|t| t.kind).collect();
/// assert_eq!(kinds, vec![TokenKind::Text, TokenKind::Eof]);
/// ```
pub fn lex(name: &str, input: &str) -> Result<Lexer, Error> {
    Lexer::new(name, input, &Options::default())
}

/// A lazy, finite token sequence over one input.  The last token is always
/// [`TokenKind::Eof`].
pub struct Lexer {
    name: String,
    lines: Vec<Vec<char>>,
    line: usize,
    index: usize,
    start: usize,
    state: Option<StateFn>,
    pending: VecDeque<Token>,
    next_id: usize,

    list_indents: Vec<usize>,
    explicit: Option<Explicit>,
    definition_indent: Option<usize>,
    markup: Option<inlines::Pending>,
}

impl fmt::Debug for Lexer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lexer")
            .field("name", &self.name)
            .field("line", &(self.line + 1))
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl Lexer {
    /// Creates a lexer over `input`.  Fails only when `input` is empty.
    pub fn new(name: &str, input: &str, options: &Options) -> Result<Lexer, Error> {
        if input.is_empty() {
            return Err(Error::EmptyInput {
                name: name.to_string(),
            });
        }

        Ok(Lexer {
            name: name.to_string(),
            lines: strings::split_lines(input, options.tab_width),
            line: 0,
            index: 0,
            start: 0,
            state: Some(StateFn(lex_start)),
            pending: VecDeque::new(),
            next_id: 1,
            list_indents: vec![],
            explicit: None,
            definition_indent: None,
            markup: None,
        })
    }

    /// The name the input was given.
    pub fn name(&self) -> &str {
        &self.name
    }

    fn current(&self) -> &[char] {
        self.lines.get(self.line).map_or(&[], |l| l.as_slice())
    }

    fn line_at(&self, line: usize) -> Option<&[char]> {
        self.lines.get(line).map(|l| l.as_slice())
    }

    fn prev_line_blank(&self) -> bool {
        self.line == 0 || self.lines[self.line - 1].is_empty()
    }

    fn at_eol(&self) -> bool {
        self.index >= self.current().len()
    }

    fn next_rune(&mut self) -> Option<char> {
        let c = self.current().get(self.index).copied();
        if c.is_some() {
            self.index += 1;
        }
        c
    }

    fn backup(&mut self) {
        if self.index > self.start {
            self.index -= 1;
        }
    }

    /// The rune `n` places past the scan position, without consuming it.
    fn peek_rune(&self, n: usize) -> Option<char> {
        self.current().get(self.index + n).copied()
    }

    fn skip_spaces(&mut self) -> usize {
        let line = self.current();
        let n = line[self.index.min(line.len())..]
            .iter()
            .take_while(|&&c| c == ' ')
            .count();
        self.index += n;
        n
    }

    fn advance_line(&mut self) -> bool {
        if self.line + 1 < self.lines.len() {
            self.line += 1;
            self.index = 0;
            self.start = 0;
            true
        } else {
            self.index = self.current().len();
            self.start = self.index;
            false
        }
    }

    fn text_kind(&self) -> TokenKind {
        if self.definition_indent.is_some() {
            TokenKind::DefinitionText
        } else {
            TokenKind::Text
        }
    }

    fn push_list_indent(&mut self, indent: usize) {
        if self.list_indents.last() != Some(&indent) {
            self.list_indents.push(indent);
        }
    }

    /// Queues the runes between the token start and the scan position.
    fn emit(&mut self, kind: TokenKind) {
        let line = self.current();
        let end = self.index.min(line.len());
        let text: String = line[self.start.min(end)..end].iter().collect();
        let length = end.saturating_sub(self.start);
        let token = Token {
            id: self.next_id,
            kind,
            text,
            line: self.line + 1,
            start_position: self.start + 1,
            length,
        };
        self.push(token);
        self.start = self.index;
    }

    /// Queues a token that covers no input runes.
    fn emit_synthetic(&mut self, kind: TokenKind, text: &str) {
        let token = Token {
            id: self.next_id,
            kind,
            text: text.to_string(),
            line: self.line + 1,
            start_position: self.index + 1,
            length: strings::rune_count(text),
        };
        self.push(token);
        self.start = self.index;
    }

    fn push(&mut self, token: Token) {
        log::trace!("{}: {}", self.name, token);
        self.next_id += 1;
        self.pending.push_back(token);
    }

    /// Whether an explicit markup block at `indent` carries on past the
    /// blank line the scan position sits on.
    fn explicit_continues(&self, indent: usize) -> bool {
        self.lines[self.line + 1..]
            .iter()
            .find(|l| !l.is_empty())
            .map_or(false, |l| strings::indentation(l) > indent)
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Some(token);
            }
            let StateFn(state) = self.state.take()?;
            self.state = state(self);
        }
    }
}

fn lex_start(l: &mut Lexer) -> Option<StateFn> {
    if l.index == 0 {
        if l.current().is_empty() {
            return Some(StateFn(lex_blank_line));
        }
        return Some(StateFn(lex_line_start));
    }

    if l.at_eol() {
        if l.advance_line() {
            return Some(StateFn(lex_start));
        }
        l.emit_synthetic(TokenKind::Eof, "");
        return None;
    }

    Some(StateFn(inlines::lex_text))
}

fn lex_blank_line(l: &mut Lexer) -> Option<StateFn> {
    l.emit_synthetic(TokenKind::BlankLine, "\n");

    if let Some(explicit) = l.explicit {
        if explicit.empty
            || explicit.kind == ExplicitKind::Target
            || !l.explicit_continues(explicit.indent)
        {
            l.explicit = None;
        }
    }

    if l.advance_line() {
        Some(StateFn(lex_start))
    } else {
        l.emit_synthetic(TokenKind::Eof, "");
        None
    }
}

fn lex_line_start(l: &mut Lexer) -> Option<StateFn> {
    let indent = strings::indentation(l.current());

    let prev_explicit = l.explicit.is_some();
    if let Some(explicit) = l.explicit {
        if indent > explicit.indent {
            l.explicit = Some(Explicit {
                empty: false,
                ..explicit
            });
            return Some(StateFn(blocks::lex_explicit_continuation));
        }
        l.explicit = None;
    }

    if l.definition_indent.map_or(false, |d| indent < d) {
        l.definition_indent = None;
    }
    while l.list_indents.last().map_or(false, |&i| i > indent) {
        l.list_indents.pop();
    }

    if indent > 0 {
        l.index = indent;
        l.emit(TokenKind::Space);
    }

    blocks::classify(l, prev_explicit)
}
