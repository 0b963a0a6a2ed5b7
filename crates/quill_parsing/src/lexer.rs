//! Responsible for converting source text into a token stream

use quill_tokens::source::SourceFile;
use quill_tokens::spanned::{Position, Span, Spanned};
use quill_tokens::token::{ArithOp, Datatype, IncDec, Keyword, LogicOp, Token, TokenKind};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{trace, warn};

mod error;

pub use error::{LexErrorKind, LexingError};

/// Characters that end an identifier or keyword
const WORD_STOP: &[char] = &[
    ' ', '*', '/', '(', ')', '[', ']', '!', '@', '#', '$', '%', '^', '&', '-', '+', '=', ';',
    '.', '\t', ',', '\n', '\r',
];

/// Characters that make up a comparison operator
const COMPARISON: &[char] = &['<', '>', '=', '!'];

/// Scans a complete source, stopping at the first error.
///
/// No tokens are returned alongside an error.
pub fn scan(source: &Arc<SourceFile>) -> Result<Vec<Token>, LexingError> {
    Lexer::new(source.clone()).collect()
}

/// Converts a [SourceFile] into tokens, one at a time.
///
/// Once an error has been produced the lexer is exhausted.
///
/// # Examples
/// ```
/// # use quill_parsing::lexer::Lexer;
/// # use quill_tokens::source::SourceFile;
/// let source = SourceFile::new("example", "int x = 5;");
/// let tokens = Lexer::new(source).collect::<Result<Vec<_>, _>>().unwrap();
/// assert_eq!(tokens.len(), 4);
/// ```
#[derive(Debug)]
pub struct Lexer {
    chars: Vec<char>,
    position: Position,
    finished: bool,
}

impl Lexer {
    /// Creates a new lexer over a source
    pub fn new(source: Arc<SourceFile>) -> Self {
        Self {
            chars: source.text().chars().collect(),
            position: Position::start(source),
            finished: false,
        }
    }

    fn current(&self) -> Option<char> {
        self.chars.get(self.position.index()).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.position.index() + 1).copied()
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.current()?;
        self.position.advance(c);
        Some(c)
    }

    /// Creates a token that spans from `start` to the current position
    fn token(&self, start: Position, kind: TokenKind) -> Token {
        Token::new(Span::new(start, self.position.clone()), kind)
    }

    fn error(&self, kind: LexErrorKind, start: Position) -> LexingError {
        LexingError::new(kind, Span::new(start, self.position.clone()))
    }

    fn next_token(&mut self) -> Result<Option<Token>, LexingError> {
        while let Some(c) = self.current() {
            let start = self.position.clone();
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => self.skip_line_comment(),
                '/' if self.peek_next() == Some('*') => self.skip_block_comment(),
                c if c.is_ascii_digit() => return self.number(start).map(Some),
                '+' | '-' => {
                    self.advance();
                    let kind = if self.current() == Some(c) {
                        self.advance();
                        TokenKind::SingleOp(if c == '+' {
                            IncDec::Increment
                        } else {
                            IncDec::Decrement
                        })
                    } else {
                        TokenKind::Operator(if c == '+' {
                            ArithOp::Plus
                        } else {
                            ArithOp::Minus
                        })
                    };
                    return Ok(Some(self.token(start, kind)));
                }
                '*' | '/' => {
                    self.advance();
                    let op = if c == '*' { ArithOp::Star } else { ArithOp::Slash };
                    return Ok(Some(self.token(start, TokenKind::Operator(op))));
                }
                ',' => {
                    self.advance();
                    return Ok(Some(self.token(start, TokenKind::Separator)));
                }
                '(' | '[' => {
                    self.advance();
                    return Ok(Some(self.token(start, TokenKind::LBracket(c))));
                }
                ')' | ']' | '}' => {
                    self.advance();
                    return Ok(Some(self.token(start, TokenKind::RBracket(c))));
                }
                '{' => {
                    self.advance();
                    return Ok(Some(self.token(start, TokenKind::Block)));
                }
                '"' | '\'' => return self.string(start).map(Some),
                c if c.is_alphabetic() || c == '_' => return Ok(Some(self.word(start))),
                '<' | '>' | '=' => return Ok(Some(self.comparison(start))),
                '!' if self.peek_next() == Some('=') => return Ok(Some(self.comparison(start))),
                ';' => {
                    self.advance();
                }
                illegal => {
                    self.advance();
                    return Err(self.error(LexErrorKind::IllegalCharacter(illegal), start));
                }
            }
        }
        Ok(None)
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.current() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.position.clone();
        self.advance();
        self.advance();
        loop {
            match self.current() {
                Some('*') if self.peek_next() == Some('/') => {
                    self.advance();
                    self.advance();
                    return;
                }
                Some(_) => {
                    self.advance();
                }
                None => {
                    warn!("block comment starting at {start:?} is never closed");
                    return;
                }
            }
        }
    }

    fn number(&mut self, start: Position) -> Result<Token, LexingError> {
        let mut text = String::new();
        let mut dotted = false;
        while let Some(c) = self.current() {
            if c == '.' {
                if dotted {
                    break;
                }
                dotted = true;
            } else if !c.is_ascii_digit() {
                break;
            }
            text.push(c);
            self.advance();
        }
        let kind = if dotted {
            // digits around a single dot always parse
            let value = f64::from_str(&text).expect("a dotted digit run is a valid float");
            TokenKind::Float(value)
        } else {
            let value = i64::from_str(&text)
                .map_err(|_| self.error(LexErrorKind::IntegerOverflow(text.clone()), start.clone()))?;
            TokenKind::Integer(value)
        };
        Ok(self.token(start, kind))
    }

    fn string(&mut self, start: Position) -> Result<Token, LexingError> {
        let quote = self.advance();
        let after_quote = self.position.clone();
        let mut text = String::new();
        loop {
            match self.advance() {
                Some(c) if Some(c) == quote => break,
                Some(c) => text.push(c),
                None => {
                    return Err(LexingError::new(
                        LexErrorKind::UnclosedString,
                        Span::new(start, after_quote),
                    ))
                }
            }
        }
        Ok(self.token(start, TokenKind::String(text)))
    }

    fn word(&mut self, start: Position) -> Token {
        let mut word = String::new();
        while let Some(c) = self.current() {
            if WORD_STOP.contains(&c) {
                break;
            }
            word.push(c);
            self.advance();
        }
        self.token(start, classify_word(word))
    }

    fn comparison(&mut self, start: Position) -> Token {
        let mut op = String::new();
        while let Some(c) = self.current() {
            if !COMPARISON.contains(&c) {
                break;
            }
            op.push(c);
            self.advance();
        }
        let kind = if op == "=" {
            TokenKind::Assign
        } else {
            TokenKind::CompOp(op)
        };
        self.token(start, kind)
    }
}

/// Classifies a word as a keyword, logic operator, datatype or identifier
pub fn classify_word(word: String) -> TokenKind {
    if let Ok(keyword) = Keyword::from_str(&word) {
        TokenKind::Keyword(keyword)
    } else if let Ok(op) = LogicOp::from_str(&word) {
        TokenKind::LogicOp(op)
    } else if let Ok(datatype) = Datatype::from_str(&word) {
        TokenKind::Datatype(datatype)
    } else {
        TokenKind::Identifier(word)
    }
}

impl Iterator for Lexer {
    type Item = Result<Token, LexingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.next_token() {
            Ok(Some(token)) => {
                trace!("scanned {token} at {:?}", token.span().start());
                Some(Ok(token))
            }
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn kinds(text: &str) -> Vec<TokenKind> {
        scan(&SourceFile::new("test", text))
            .expect("could not scan")
            .into_iter()
            .map(Token::into_kind)
            .collect()
    }

    #[test]
    fn test_declaration() {
        assert_eq!(
            kinds("int x = 5;"),
            vec![
                TokenKind::Datatype(Datatype::Int),
                TokenKind::Identifier("x".to_string()),
                TokenKind::Assign,
                TokenKind::Integer(5),
            ]
        );
    }

    #[test]
    fn test_numbers() {
        assert_eq!(
            kinds("12 3.25"),
            vec![TokenKind::Integer(12), TokenKind::Float(3.25)]
        );
    }

    #[test]
    fn test_second_dot_ends_number() {
        let err = scan(&SourceFile::new("test", "1.2.3")).unwrap_err();
        assert_eq!(err.kind(), &LexErrorKind::IllegalCharacter('.'));
        assert_eq!(err.location().unwrap().start().column(), 4);
    }

    #[test]
    fn test_integer_overflow() {
        let err = scan(&SourceFile::new("test", "int x = 99999999999999999999;")).unwrap_err();
        assert!(matches!(err.kind(), LexErrorKind::IntegerOverflow(_)));
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("a++ - b-- + c * d / e"),
            vec![
                TokenKind::Identifier("a".to_string()),
                TokenKind::SingleOp(IncDec::Increment),
                TokenKind::Operator(ArithOp::Minus),
                TokenKind::Identifier("b".to_string()),
                TokenKind::SingleOp(IncDec::Decrement),
                TokenKind::Operator(ArithOp::Plus),
                TokenKind::Identifier("c".to_string()),
                TokenKind::Operator(ArithOp::Star),
                TokenKind::Identifier("d".to_string()),
                TokenKind::Operator(ArithOp::Slash),
                TokenKind::Identifier("e".to_string()),
            ]
        );
    }

    #[test]
    fn test_comparisons() {
        assert_eq!(
            kinds("<= == <> != > ="),
            vec![
                TokenKind::CompOp("<=".to_string()),
                TokenKind::CompOp("==".to_string()),
                TokenKind::CompOp("<>".to_string()),
                TokenKind::CompOp("!=".to_string()),
                TokenKind::CompOp(">".to_string()),
                TokenKind::Assign,
            ]
        );
    }

    #[test]
    fn test_lone_bang_is_illegal() {
        let err = scan(&SourceFile::new("test", "!x")).unwrap_err();
        assert_eq!(err.kind(), &LexErrorKind::IllegalCharacter('!'));
    }

    #[test]
    fn test_brackets() {
        assert_eq!(
            kinds("( [ ] ) { }"),
            vec![
                TokenKind::LBracket('('),
                TokenKind::LBracket('['),
                TokenKind::RBracket(']'),
                TokenKind::RBracket(')'),
                TokenKind::Block,
                TokenKind::RBracket('}'),
            ]
        );
    }

    #[test]
    fn test_words() {
        assert_eq!(
            kinds("do call and float _tmp1"),
            vec![
                TokenKind::Keyword(Keyword::Do),
                TokenKind::Keyword(Keyword::Call),
                TokenKind::LogicOp(LogicOp::And),
                TokenKind::Datatype(Datatype::Float),
                TokenKind::Identifier("_tmp1".to_string()),
            ]
        );
    }

    #[test]
    fn test_strings() {
        assert_eq!(
            kinds("\"hello world\" 'single'"),
            vec![
                TokenKind::String("hello world".to_string()),
                TokenKind::String("single".to_string()),
            ]
        );
    }

    #[test]
    fn test_unclosed_string() {
        let err = scan(&SourceFile::new("test", "x = \"abc")).unwrap_err();
        assert_eq!(err.kind(), &LexErrorKind::UnclosedString);
        let start = err.location().unwrap().start();
        assert_eq!((start.line(), start.column()), (1, 5));
    }

    #[test]
    fn test_illegal_character() {
        let err = scan(&SourceFile::new("test", "int x = 1;\n@")).unwrap_err();
        assert_eq!(err.kind(), &LexErrorKind::IllegalCharacter('@'));
        let start = err.location().unwrap().start();
        assert_eq!((start.line(), start.column()), (2, 1));
    }

    #[test]
    fn test_lexer_stops_after_error() {
        let mut lexer = Lexer::new(SourceFile::new("test", "x @ y"));
        assert!(lexer.next().unwrap().is_ok());
        assert!(lexer.next().unwrap().is_err());
        assert!(lexer.next().is_none());
    }

    #[test]
    fn test_comments() {
        assert_eq!(
            kinds("x // ignored\n/* also\nignored */ y"),
            vec![
                TokenKind::Identifier("x".to_string()),
                TokenKind::Identifier("y".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        assert_eq!(
            kinds("x /* never closed"),
            vec![TokenKind::Identifier("x".to_string())]
        );
    }

    #[test]
    fn test_semicolons_produce_nothing() {
        assert!(kinds(";;;").is_empty());
    }

    #[test]
    fn test_positions() {
        let tokens = scan(&SourceFile::new("test", "int x\n  = 5")).unwrap();
        let starts = tokens
            .iter()
            .map(|t| {
                let span = t.span();
                (span.start().line(), span.start().column())
            })
            .collect::<Vec<_>>();
        assert_eq!(starts, vec![(1, 1), (1, 5), (2, 3), (2, 5)]);
    }
}
