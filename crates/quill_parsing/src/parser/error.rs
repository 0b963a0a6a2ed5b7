use quill_tokens::spanned::Span;
use quill_tokens::token::Token;
use quill_tokens::SpannedError;
use std::fmt::{Display, Formatter};

/// Represents an error occurring during parsing
#[derive(Debug, thiserror::Error)]
pub struct SyntaxError {
    kind: SpannedError<ErrorKind>,
    non_terminal_stack: Vec<&'static str>,
}

impl SyntaxError {
    /// Creates a new error
    pub fn new(
        kind: ErrorKind,
        location: impl Into<Option<Span>>,
        non_terminals: Vec<&'static str>,
    ) -> Self {
        Self {
            kind: SpannedError::new(kind, location),
            non_terminal_stack: non_terminals,
        }
    }

    pub fn kind(&self) -> &ErrorKind {
        self.kind.error()
    }

    pub fn location(&self) -> Option<&Span> {
        self.kind.location()
    }

    /// The nonterminals being parsed when this error occurred, outermost first
    pub fn non_terminals(&self) -> &[&'static str] {
        &self.non_terminal_stack
    }
}

impl Display for SyntaxError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "syntax error: {}", self.kind)?;
        if !self.non_terminal_stack.is_empty() {
            writeln!(f, "non terminal stack:")?;
            for (idx, non_terminal) in self.non_terminal_stack.iter().enumerate() {
                writeln!(f, "  {}: {}", idx, non_terminal)?;
            }
        }
        Ok(())
    }
}

/// [SyntaxError] kind
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    #[error("expected {}, found {}", .expected.join(" or "), describe(.found))]
    ExpectedToken {
        expected: Vec<&'static str>,
        found: Option<Token>,
    },
    #[error("unexpected input: {0}")]
    UnexpectedToken(Token),
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("invalid condition operator: {0:?}")]
    InvalidComparison(String),
    #[error("unbalanced code: missing {0}")]
    Unbalanced(char),
}

impl ErrorKind {
    pub fn expected_token(
        expected: impl IntoIterator<Item = &'static str>,
        found: impl Into<Option<Token>>,
    ) -> Self {
        Self::ExpectedToken {
            expected: expected.into_iter().collect(),
            found: found.into(),
        }
    }
}

fn describe(found: &Option<Token>) -> String {
    match found {
        Some(token) => token.to_string(),
        None => "end of input".to_string(),
    }
}

pub type SyntaxResult<T = ()> = Result<T, SyntaxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_token_message() {
        let kind = ErrorKind::expected_token(["<separator>", ")"], None);
        assert_eq!(kind.to_string(), "expected <separator> or ), found end of input");
        assert_eq!(
            ErrorKind::Unbalanced('}').to_string(),
            "unbalanced code: missing }"
        );
    }

    #[test]
    fn test_non_terminal_stack_display() {
        let error = SyntaxError::new(
            ErrorKind::UnexpectedEof,
            None,
            vec!["<program>", "<block>"],
        );
        assert_eq!(
            error.to_string(),
            "syntax error: unexpected end of input\nnon terminal stack:\n  0: <program>\n  1: <block>\n"
        );
        assert_eq!(error.non_terminals(), &["<program>", "<block>"]);
    }
}
