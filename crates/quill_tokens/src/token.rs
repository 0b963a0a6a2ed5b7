//! A lexical token from a source file, along with streams for said token

use crate::spanned::{Span, Spanned};
use itertools::Itertools;
use std::collections::VecDeque;
use std::fmt::{Debug, Display, Formatter};
use std::iter;
use strum::{AsRefStr, EnumIter, EnumString, IntoStaticStr};

/// A lexical token from a source file
#[derive(Clone)]
pub struct Token {
    span: Span,
    kind: TokenKind,
}

impl Token {
    /// Creates a new token
    pub fn new(span: Span, kind: TokenKind) -> Self {
        Self { span, kind }
    }

    /// Gets the kind for this token
    pub fn kind(&self) -> &TokenKind {
        &self.kind
    }

    /// Converts this token into its kind, dropping the span
    pub fn into_kind(self) -> TokenKind {
        self.kind
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(&self.kind, f)
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.kind, f)
    }
}

impl Spanned for Token {
    fn span(&self) -> Span {
        self.span.clone()
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

/// Reserved words that start statements or clauses
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, strum::Display, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Do,
    Call,
    Return,
    If,
    Elif,
    Else,
    For,
    Break,
    Skip,
    Print,
}

/// The declarable data types
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, strum::Display, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum Datatype {
    Int,
    Float,
    String,
}

/// Logical operator words
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, strum::Display, AsRefStr, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
pub enum LogicOp {
    And,
    Or,
    Not,
}

/// Binary arithmetic operators
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, strum::Display, AsRefStr, IntoStaticStr,
)]
pub enum ArithOp {
    #[strum(serialize = "+")]
    Plus,
    #[strum(serialize = "-")]
    Minus,
    #[strum(serialize = "*")]
    Star,
    #[strum(serialize = "/")]
    Slash,
}

/// `++` and `--`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, EnumIter, strum::Display, AsRefStr, IntoStaticStr,
)]
pub enum IncDec {
    #[strum(serialize = "++")]
    Increment,
    #[strum(serialize = "--")]
    Decrement,
}

/// The kind for this token
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // literals
    Integer(i64),
    Float(f64),
    String(String),

    Identifier(String),
    Keyword(Keyword),
    Datatype(Datatype),
    LogicOp(LogicOp),
    /// comparison operators, kept as written (`<`, `>=`, `==`, ...)
    CompOp(String),
    /// =
    Assign,
    Operator(ArithOp),
    SingleOp(IncDec),
    /// ,
    Separator,
    /// `(` or `[`
    LBracket(char),
    /// `)`, `]` or `}`
    RBracket(char),
    /// `{`
    Block,
}

impl TokenKind {
    /// The grammar class this token belongs to.
    ///
    /// Class names match the nonterminals of the language grammar, which is what allows
    /// FIRST/FOLLOW sets to be looked up per token.
    pub fn class_name(&self) -> &'static str {
        match self {
            TokenKind::Integer(_) | TokenKind::Float(_) => "<number>",
            TokenKind::String(_) => "<string>",
            TokenKind::Identifier(_) => "<identifier>",
            TokenKind::Keyword(_) => "<keyword>",
            TokenKind::Datatype(_) => "<datatype>",
            TokenKind::LogicOp(_) => "<logicOp>",
            TokenKind::CompOp(_) => "<compOp>",
            TokenKind::Assign => "<assign>",
            TokenKind::Operator(_) => "<operator>",
            TokenKind::SingleOp(_) => "<singleOp>",
            TokenKind::Separator => "<separator>",
            TokenKind::LBracket(_) => "<LBracket>",
            TokenKind::RBracket(_) => "<RBracket>",
            TokenKind::Block => "<block>",
        }
    }

    /// The literal value carried by this token, spelled out. `{` carries none.
    pub fn lexeme(&self) -> Option<String> {
        let lexeme = match self {
            TokenKind::Integer(i) => i.to_string(),
            TokenKind::Float(f) => format!("{f:?}"),
            TokenKind::String(s) | TokenKind::Identifier(s) | TokenKind::CompOp(s) => s.clone(),
            TokenKind::Keyword(kw) => kw.to_string(),
            TokenKind::Datatype(dt) => dt.to_string(),
            TokenKind::LogicOp(op) => op.to_string(),
            TokenKind::Assign => "=".to_string(),
            TokenKind::Operator(op) => op.to_string(),
            TokenKind::SingleOp(op) => op.to_string(),
            TokenKind::Separator => ",".to_string(),
            TokenKind::LBracket(c) | TokenKind::RBracket(c) => c.to_string(),
            TokenKind::Block => return None,
        };
        Some(lexeme)
    }

    /// Checks if this is the given keyword
    pub fn is_keyword(&self, keyword: Keyword) -> bool {
        matches!(self, TokenKind::Keyword(kw) if *kw == keyword)
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::String(s) => write!(f, "({}, {s:?})", self.class_name()),
            kind => match kind.lexeme() {
                Some(lexeme) => write!(f, "({}, {lexeme})", kind.class_name()),
                None => write!(f, "({})", kind.class_name()),
            },
        }
    }
}

/// A stream of tokens
#[derive(Debug, Clone)]
pub struct TokenStream(VecDeque<Token>);

impl FromIterator<Token> for TokenStream {
    fn from_iter<T: IntoIterator<Item = Token>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl Iterator for TokenStream {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }
}

impl DoubleEndedIterator for TokenStream {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.0.pop_back()
    }
}

impl Default for TokenStream {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenStream {
    #[inline]
    pub fn new() -> Self {
        TokenStream::from_iter(iter::empty())
    }

    /// Gets the span covered by every token remaining in this stream
    pub fn span(&self) -> Option<Span> {
        let first = self.0.front()?.span();
        let last = self.0.back()?.span();
        first.join(&last)
    }
}

impl Display for TokenStream {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            self.0.iter().filter_map(|t| t.kind().lexeme()).join(" ")
        )
    }
}

/// A trait to convert something to an iterator of tokens
pub trait ToTokens {
    /// Gets an iterator over tokens
    fn to_tokens(&self) -> TokenStream;
}

impl<T: ToTokens> ToTokens for Option<T> {
    fn to_tokens(&self) -> TokenStream {
        match self {
            None => TokenStream::new(),
            Some(s) => s.to_tokens(),
        }
    }
}

impl<T: ToTokens> ToTokens for Vec<T> {
    fn to_tokens(&self) -> TokenStream {
        self.iter().flat_map(|t| t.to_tokens()).collect()
    }
}
