use quill_tokens::spanned::{Span, Spanned};
use quill_tokens::token::Token;

/// A position within a list of tokens
#[derive(Debug, Clone)]
pub struct TokenCursor {
    tokens: Vec<Token>,
    index: usize,
}

impl TokenCursor {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, index: 0 }
    }

    /// The current lookahead token
    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    /// Consumes the lookahead token
    pub fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.index).cloned()?;
        self.index += 1;
        Some(token)
    }

    pub fn is_at_end(&self) -> bool {
        self.index >= self.tokens.len()
    }

    /// The span just past the last consumed token, used when reporting an unexpected end of
    /// input.
    pub fn end_span(&self) -> Option<Span> {
        let last = self.index.checked_sub(1).and_then(|idx| self.tokens.get(idx))?;
        Some(Span::at(last.span().end().clone()))
    }
}
