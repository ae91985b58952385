//! A [reStructuredText](https://docutils.sourceforge.io/rst.html) lexer and
//! parser.
//!
//! Input is turned into a stream of positioned [`Token`]s by a lazy
//! [`Lexer`], then into a [`Document`]: an arena of [`Ast`] nodes rooted at
//! a [`NodeValue::Document`].  Malformed markup does not fail the parse;
//! it is reported by [`NodeValue::SystemMessage`] nodes placed in the tree
//! where the problem was found.
//!
//! ```rust
//! use rstree::{parse_document, Options, Severity};
//!
//! let doc = parse_document("doc", "Title\n===\n\nText\n", &Options::default()).unwrap();
//! let diagnostics = doc.diagnostics();
//! assert_eq!(diagnostics.len(), 1);
//! assert_eq!(diagnostics[0].severity, Severity::Info);
//! ```
//!
//! Documents can be written out as JSON with [`json::to_string`] and read
//! back with [`json::from_str`], or dumped as an indented tree with
//! [`tree::format_document`].

mod error;
pub mod json;
mod lexer;
pub mod nodes;
mod parser;
mod scanners;
mod strings;
pub mod tree;

pub use crate::error::Error;
pub use crate::lexer::{lex, Lexer, Token, TokenKind};
pub use crate::nodes::{Ast, Diagnostic, Document, NodeValue, Sourcepos};
pub use crate::parser::messages::{MessageKind, ParserMessage, Severity};
pub use crate::parser::{parse_document, Options};
pub use indextree::{Arena, NodeId};

#[cfg(feature = "bon")]
pub use crate::parser::options::OptionsBuilder;
