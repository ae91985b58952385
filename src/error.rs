//! Hard failures.
//!
//! Malformed markup never produces an [`Error`]; it is reported inside the
//! document tree as a system message instead.  The variants here abort a
//! lex or parse outright.

/// An unrecoverable lexing or parsing failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input was zero-length.
    #[error("{name}: cannot lex empty input")]
    EmptyInput {
        /// The name the input was given.
        name: String,
    },

    /// The token buffer held more unconsumed tokens than
    /// [`Options::max_lookahead`](crate::Options::max_lookahead) allows.
    #[error("{name}:{line}: token buffer exhausted after {lookahead} tokens of lookahead")]
    BufferExhausted {
        /// The name the input was given.
        name: String,
        /// Line of the last token pulled before the fault.
        line: usize,
        /// The bound that was exceeded.
        lookahead: usize,
    },
}
