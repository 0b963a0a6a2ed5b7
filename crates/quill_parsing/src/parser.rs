//! The recursive descent parser that turns tokens into a [ParseNode] tree.
//!
//! There is one public procedure per nonterminal, so any part of the language can be parsed on
//! its own. Prediction is done with direct lookahead on the next token; the only place that
//! looks further is a comparison operator split by whitespace (`x < = 5`), which is merged into
//! a single operator.

use crate::lexer::{scan, LexingError};
use indexmap::IndexSet;
use quill_tokens::source::SourceFile;
use quill_tokens::spanned::Spanned;
use quill_tokens::token::{Keyword, Token, TokenKind};
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

mod cursor;
mod error;
mod expr;
mod parse_tree;
mod statement;

pub use cursor::TokenCursor;
pub use error::{ErrorKind, SyntaxError, SyntaxResult};
pub use parse_tree::ParseNode;

static IDENTIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[_a-zA-Z][_a-zA-Z0-9]*$").expect("identifier pattern is valid")
});

/// Creates a parse tree from a list of tokens.
///
/// The first error aborts the parse, nothing is recovered.
///
/// # Examples
/// ```
/// # use quill_parsing::lexer::scan;
/// # use quill_parsing::parser::Parser;
/// # use quill_tokens::source::SourceFile;
/// let tokens = scan(&SourceFile::new("example", "int x = 5;")).unwrap();
/// let tree = Parser::new(tokens).parse().unwrap();
/// assert_eq!(tree.label(), "<program>");
/// ```
#[derive(Debug)]
pub struct Parser {
    cursor: TokenCursor,
    known: IndexSet<String>,
    non_terminals: Vec<&'static str>,
}

impl Parser {
    /// Creates a new parser over some tokens
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            known: IndexSet::new(),
            non_terminals: vec![],
        }
    }

    /// Creates a parser from bare symbol spellings, classifying each one the same way the
    /// lexer does.
    pub fn from_lexemes<I>(lexemes: I) -> Result<Self, LexingError>
    where
        I: IntoIterator<Item: AsRef<str>>,
    {
        let text = lexemes
            .into_iter()
            .map(|lexeme| lexeme.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let tokens = scan(&SourceFile::new("<lexemes>", text))?;
        Ok(Self::new(tokens))
    }

    /// Treats the given identifiers as already declared
    pub fn with_known_identifiers<I>(mut self, identifiers: I) -> Self
    where
        I: IntoIterator<Item: Into<String>>,
    {
        self.known.extend(identifiers.into_iter().map(Into::into));
        self
    }

    /// Every identifier accepted so far, in the order they were first seen
    pub fn known_identifiers(&self) -> &IndexSet<String> {
        &self.known
    }

    /// Parses a complete program
    pub fn parse(mut self) -> SyntaxResult<ParseNode> {
        self.parse_program()
    }

    /// Runs the procedure for a nonterminal, keeping it on the nonterminal stack while it runs
    fn non_terminal<T>(
        &mut self,
        name: &'static str,
        procedure: impl FnOnce(&mut Self) -> SyntaxResult<T>,
    ) -> SyntaxResult<T> {
        trace!(
            "parsing {name}, next={:?}",
            self.cursor.peek().map(|t| t.to_string())
        );
        self.non_terminals.push(name);
        let result = procedure(self);
        if result.is_ok() {
            self.non_terminals.pop();
        }
        result
    }

    fn error(&self, kind: ErrorKind, found: Option<&Token>) -> SyntaxError {
        let location = found.map(Spanned::span).or_else(|| self.cursor.end_span());
        SyntaxError::new(kind, location, self.non_terminals.clone())
    }

    fn next_is(&self, predicate: impl FnOnce(&TokenKind) -> bool) -> bool {
        self.cursor.peek().map(Token::kind).is_some_and(predicate)
    }

    fn next_is_keyword(&self, keyword: Keyword) -> bool {
        self.next_is(|kind| kind.is_keyword(keyword))
    }

    /// Consumes the next token, failing at the end of input
    fn bump(&mut self) -> SyntaxResult<Token> {
        self.cursor
            .advance()
            .ok_or_else(|| self.error(ErrorKind::UnexpectedEof, None))
    }

    /// Consumes the next token if it matches, otherwise fails naming what was `expected`
    fn expect(
        &mut self,
        expected: &'static str,
        predicate: impl FnOnce(&TokenKind) -> bool,
    ) -> SyntaxResult<Token> {
        if self.next_is(predicate) {
            return self.bump();
        }
        let found = self.cursor.peek().cloned();
        Err(self.error(
            ErrorKind::expected_token([expected], found.clone()),
            found.as_ref(),
        ))
    }

    fn expect_keyword(&mut self, keyword: Keyword) -> SyntaxResult<Token> {
        self.expect(keyword.into(), |kind| kind.is_keyword(keyword))
    }

    fn expect_open(&mut self, bracket: char) -> SyntaxResult<Token> {
        let expected = if bracket == '(' { "(" } else { "[" };
        self.expect(expected, |kind| matches!(kind, TokenKind::LBracket(c) if *c == bracket))
    }

    /// Consumes a closing bracket, failing with an unbalanced error if it is missing
    fn expect_close(&mut self, bracket: char) -> SyntaxResult<Token> {
        if self.next_is(|kind| matches!(kind, TokenKind::RBracket(c) if *c == bracket)) {
            return self.bump();
        }
        Err(self.error(ErrorKind::Unbalanced(bracket), self.cursor.peek()))
    }

    fn expect_separator(&mut self) -> SyntaxResult<Token> {
        self.expect("<separator>", |kind| matches!(kind, TokenKind::Separator))
    }
}
