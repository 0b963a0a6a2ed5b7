use quill_tokens::spanned::Span;
use quill_tokens::SpannedError;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// An error that stopped the lexer, along with where it happened
#[derive(Debug, Clone, Error)]
pub struct LexingError {
    inner: SpannedError<LexErrorKind>,
}

impl LexingError {
    pub fn new(kind: LexErrorKind, location: Span) -> Self {
        Self {
            inner: SpannedError::new(kind, location),
        }
    }

    pub fn kind(&self) -> &LexErrorKind {
        self.inner.error()
    }

    pub fn location(&self) -> Option<&Span> {
        self.inner.location()
    }
}

impl Display for LexingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "lexing error: {}", self.inner)
    }
}

/// [LexingError] kind
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LexErrorKind {
    #[error("illegal character '{0}'")]
    IllegalCharacter(char),
    #[error("unclosed string: string not closed")]
    UnclosedString,
    #[error("integer literal {0} does not fit in 64 bits")]
    IntegerOverflow(String),
}
