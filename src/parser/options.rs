//! Configuration for the lexer and parser.

#[cfg(feature = "bon")]
use bon::Builder;

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "bon", derive(Builder))]
/// Umbrella options struct.
pub struct Options {
    /// The tab stop used when expanding tabs during normalization.
    ///
    /// ```rust
    /// # use rstree::{parse_document, tree, Options};
    /// let mut options = Options::default();
    /// options.tab_width = 4;
    /// let doc = parse_document("doc", "para\n\n\tquoted\n", &options).unwrap();
    /// let mut out = String::new();
    /// tree::format_document(&doc, &mut out).unwrap();
    /// assert!(out.contains("BlockQuote"));
    /// ```
    #[cfg_attr(feature = "bon", builder(default = 8))]
    pub tab_width: usize,

    /// How many tokens the parser may buffer ahead of the token it is on
    /// before giving up with [`Error::BufferExhausted`](crate::Error::BufferExhausted).
    #[cfg_attr(feature = "bon", builder(default = 99))]
    pub max_lookahead: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            tab_width: 8,
            max_lookahead: 99,
        }
    }
}
