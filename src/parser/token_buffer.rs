//! The parser's lookahead window over the lexer.

use crate::lexer::{Token, TokenKind};

/// An indexed, growable window of tokens with a cursor.
///
/// Tokens are pulled from `source` only when a position past the end of the
/// window is requested.  `index` is `None` before the first token is
/// consumed.  Peeking never moves the cursor.
pub(crate) struct TokenBuffer<S> {
    source: S,
    tokens: Vec<Token>,
    index: Option<usize>,
    max_lookahead: usize,
    fault: Option<usize>,
}

impl<S: Iterator<Item = Token>> TokenBuffer<S> {
    pub fn new(source: S, max_lookahead: usize) -> Self {
        TokenBuffer {
            source,
            tokens: vec![],
            index: None,
            max_lookahead,
            fault: None,
        }
    }

    /// The cursor position, `None` before the first token.
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    /// Line of the last token pulled when the lookahead bound was exceeded.
    pub fn fault(&self) -> Option<usize> {
        self.fault
    }

    fn position(&self, n: usize) -> Option<usize> {
        match self.index {
            Some(i) => Some(i + n),
            None => n.checked_sub(1),
        }
    }

    /// Makes sure `pos` is buffered.
    fn fill(&mut self, pos: usize) -> bool {
        while self.tokens.len() <= pos {
            if self.fault.is_some() {
                return false;
            }
            let consumed = self.index.map_or(0, |i| i + 1);
            if self.tokens.len() - consumed >= self.max_lookahead {
                self.exhausted();
                return false;
            }
            match self.source.next() {
                Some(token) => self.tokens.push(token),
                None => return false,
            }
        }
        true
    }

    fn exhausted(&mut self) {
        let line = self.tokens.last().map_or(0, |t| t.line);
        log::error!(
            "token buffer exhausted: {} unconsumed tokens at line {}",
            self.max_lookahead,
            line
        );
        for (i, token) in self.tokens.iter().enumerate() {
            log::error!("  {:>4} {}", i, token);
        }
        self.fault = Some(line);
    }

    /// Advances the cursor by `n` and returns the token there.  At the end of
    /// the sequence the cursor stays put and `None` is returned.
    pub fn next(&mut self, n: usize) -> Option<Token> {
        let pos = self.position(n)?;
        if !self.fill(pos) {
            return None;
        }
        self.index = Some(pos);
        Some(self.tokens[pos].clone())
    }

    /// Moves the cursor back by one, never below the first token.
    pub fn backup(&mut self) {
        if let Some(i) = self.index {
            self.index = Some(i.saturating_sub(1));
        }
    }

    /// Moves the cursor to `index`.
    pub fn rewind(&mut self, index: Option<usize>) {
        self.index = index.filter(|&i| i < self.tokens.len());
    }

    /// The token `n` places ahead of the cursor.  `peek(0)` is the current
    /// token.
    pub fn peek(&mut self, n: usize) -> Option<Token> {
        let pos = self.position(n)?;
        if !self.fill(pos) {
            return None;
        }
        Some(self.tokens[pos].clone())
    }

    /// The current token.
    pub fn current(&self) -> Option<&Token> {
        self.index.map(|i| &self.tokens[i])
    }

    /// The token `n` places behind the cursor.
    pub fn peek_back(&self, n: usize) -> Option<Token> {
        let pos = self.index?.checked_sub(n)?;
        Some(self.tokens[pos].clone())
    }

    /// The nearest token of `kind` behind the cursor.
    pub fn peek_back_to(&self, kind: TokenKind) -> Option<Token> {
        let index = self.index?;
        self.tokens[..index]
            .iter()
            .rev()
            .find(|t| t.kind == kind)
            .cloned()
    }

    /// The first token ahead that is not of `kind`, with its distance from
    /// the cursor.
    pub fn peek_skip(&mut self, kind: TokenKind) -> Option<(usize, Token)> {
        let mut n = 1;
        loop {
            let token = self.peek(n)?;
            if token.kind != kind {
                return Some((n, token));
            }
            n += 1;
        }
    }

    /// Buffers ahead until a token past `line` is seen.
    fn fill_line(&mut self, line: usize) {
        let mut n = 1;
        while let Some(token) = self.peek(n) {
            if token.line > line {
                break;
            }
            n += 1;
        }
    }

    /// The first buffered token on `line`.
    pub fn peek_line(&mut self, line: usize) -> Option<Token> {
        self.fill_line(line);
        self.tokens.iter().find(|t| t.line == line).cloned()
    }

    /// The first buffered token on `line` that is not indentation.
    pub fn peek_line_skip_space(&mut self, line: usize) -> Option<Token> {
        self.fill_line(line);
        self.tokens
            .iter()
            .find(|t| t.line == line && t.kind != TokenKind::Space)
            .cloned()
    }

    /// Every buffered token on `line`.
    pub fn peek_line_all_tokens(&mut self, line: usize) -> Vec<Token> {
        self.fill_line(line);
        self.tokens
            .iter()
            .filter(|t| t.line == line)
            .cloned()
            .collect()
    }

    /// The buffered token at absolute position `index`.
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    /// Concatenates the text of the buffered tokens `from..=to`, with a
    /// newline wherever the tokens cross a line.
    pub fn glob_text(&self, from: usize, to: usize) -> String {
        let mut out = String::new();
        let mut line = None;
        for token in self.tokens.iter().take(to + 1).skip(from) {
            if line.map_or(false, |l| l != token.line) {
                out.push('\n');
            }
            line = Some(token.line);
            if !matches!(token.kind, TokenKind::BlankLine | TokenKind::Eof) {
                out.push_str(&token.text);
            }
        }
        out
    }

    /// Removes the buffered tokens `begin..=end`.  A cursor inside the range
    /// moves to the token before it.
    pub fn clear_tokens(&mut self, begin: usize, end: usize) {
        if begin > end || begin >= self.tokens.len() {
            return;
        }
        let end = end.min(self.tokens.len() - 1);
        self.tokens.drain(begin..=end);

        self.index = match self.index {
            Some(i) if i > end => Some(i - (end - begin + 1)),
            Some(i) if i >= begin => begin.checked_sub(1),
            other => other,
        };
    }

    /// Inserts `token` at absolute position `index`.
    pub fn insert(&mut self, token: Token, index: usize) {
        let index = index.min(self.tokens.len());
        self.tokens.insert(index, token);
        if let Some(i) = self.index {
            if i >= index {
                self.index = Some(i + 1);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn token(id: usize, kind: TokenKind, text: &str, line: usize) -> Token {
        Token {
            id,
            kind,
            text: text.to_string(),
            line,
            start_position: 1,
            length: text.chars().count(),
        }
    }

    fn buffer(max_lookahead: usize) -> TokenBuffer<std::vec::IntoIter<Token>> {
        let tokens = vec![
            token(1, TokenKind::Text, "one", 1),
            token(2, TokenKind::Text, "two", 2),
            token(3, TokenKind::BlankLine, "\n", 3),
            token(4, TokenKind::BlankLine, "\n", 4),
            token(5, TokenKind::Text, "three", 5),
            token(6, TokenKind::Eof, "", 5),
        ];
        TokenBuffer::new(tokens.into_iter(), max_lookahead)
    }

    fn text(t: Option<Token>) -> Option<String> {
        t.map(|t| t.text)
    }

    #[test]
    fn next_and_backup() {
        let mut buf = buffer(99);
        assert_eq!(buf.index(), None);
        assert_eq!(text(buf.next(1)), Some("one".into()));
        assert_eq!(text(buf.next(1)), Some("two".into()));
        assert_eq!(buf.index(), Some(1));
        buf.backup();
        buf.backup();
        buf.backup();
        assert_eq!(buf.index(), Some(0));
        assert_eq!(text(buf.next(4)), Some("three".into()));
        assert_eq!(buf.next(2), None);
        assert_eq!(buf.index(), Some(4));
    }

    #[test]
    fn peeking_keeps_the_cursor() {
        let mut buf = buffer(99);
        buf.next(1);
        for n in 0..8 {
            buf.peek(n);
            assert_eq!(buf.index(), Some(0));
        }
        assert_eq!(text(buf.peek(0)), Some("one".into()));
        assert_eq!(text(buf.peek(1)), Some("two".into()));

        buf.next(2);
        let (n, t) = buf.peek_skip(TokenKind::BlankLine).unwrap();
        assert_eq!((n, t.text.as_str()), (2, "three"));
        assert_eq!(buf.index(), Some(2));

        assert_eq!(text(buf.peek_back(1)), Some("two".into()));
        assert_eq!(text(buf.peek_back(3)), None);
        assert_eq!(
            text(buf.peek_back_to(TokenKind::Text)),
            Some("two".into())
        );
        assert_eq!(buf.peek_back_to(TokenKind::Eof), None);
        assert_eq!(buf.index(), Some(2));
    }

    #[test]
    fn lines() {
        let mut buf = buffer(99);
        assert_eq!(text(buf.peek_line(2)), Some("two".into()));
        assert_eq!(text(buf.peek_line_skip_space(5)), Some("three".into()));
        assert_eq!(buf.peek_line_all_tokens(5).len(), 2);
        assert_eq!(buf.index(), None);
    }

    #[test]
    fn glob_text_joins_lines() {
        let mut buf = buffer(99);
        buf.peek(6);
        assert_eq!(buf.glob_text(0, 1), "one\ntwo");
        assert_eq!(buf.glob_text(0, 4), "one\ntwo\n\n\nthree");
    }

    #[test]
    fn splicing() {
        let mut buf = buffer(99);
        buf.next(3);
        buf.clear_tokens(0, 0);
        assert_eq!(buf.index(), Some(1));
        assert_eq!(text(buf.peek(0)), Some("\n".into()));

        buf.insert(token(7, TokenKind::Text, "zero", 1), 0);
        assert_eq!(buf.index(), Some(2));
        assert_eq!(text(buf.peek_back(2)), Some("zero".into()));

        buf.clear_tokens(1, 3);
        assert_eq!(buf.index(), Some(0));
    }

    #[test]
    fn exhaustion() {
        let mut buf = buffer(2);
        assert!(buf.peek(2).is_some());
        assert_eq!(buf.peek(3), None);
        assert_eq!(buf.fault(), Some(2));
    }
}
