//! identifiers, expressions and conditions

use crate::parser::{ErrorKind, ParseNode, Parser, SyntaxResult, IDENTIFIER};
use quill_tokens::spanned::Spanned;
use quill_tokens::token::{LogicOp, Token, TokenKind};

/// Comparison operators a condition accepts
const COMPARISONS: &[&str] = &[">", "<", "==", "<>", ">=", "<=", "!="];

impl Parser {
    /// Parses an identifier, adding it to the known identifiers
    pub fn parse_identifier(&mut self) -> SyntaxResult<ParseNode> {
        let token = self.expect("<identifier>", |kind| {
            matches!(kind, TokenKind::Identifier(_))
        })?;
        if let TokenKind::Identifier(name) = token.kind() {
            if !IDENTIFIER.is_match(name) {
                return Err(self.error(ErrorKind::InvalidIdentifier(name.clone()), Some(&token)));
            }
            self.known.insert(name.clone());
        }
        Ok(ParseNode::Leaf(token))
    }

    /// Parses an expression.
    ///
    /// Arithmetic operators and their operands are kept flat, in source order. A logic
    /// operator takes the rest of the expression as a nested `<expression>`.
    pub fn parse_expression(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<expression>", |p| {
            let mut children = vec![p.parse_primary_expression()?];
            loop {
                if p.next_is(|kind| matches!(kind, TokenKind::Operator(_))) {
                    children.push(ParseNode::Leaf(p.bump()?));
                    children.push(p.parse_primary_expression()?);
                } else if p.next_is(|kind| {
                    matches!(kind, TokenKind::LogicOp(LogicOp::And | LogicOp::Or))
                }) {
                    children.push(ParseNode::Leaf(p.bump()?));
                    children.push(p.parse_expression()?);
                    break;
                } else {
                    break;
                }
            }
            Ok(ParseNode::branch("<expression>", children))
        })
    }

    /// Parses an identifier (optionally followed by `++` or `--`), a number or a string
    pub fn parse_primary_expression(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<primary_expression>", |p| {
            let mut children = vec![];
            match p.cursor.peek().map(Token::kind) {
                Some(TokenKind::Integer(_) | TokenKind::Float(_) | TokenKind::String(_)) => {
                    children.push(ParseNode::Leaf(p.bump()?));
                }
                Some(TokenKind::Identifier(_)) => {
                    children.push(p.parse_identifier()?);
                    if p.next_is(|kind| matches!(kind, TokenKind::SingleOp(_))) {
                        children.push(ParseNode::Leaf(p.bump()?));
                    }
                }
                _ => {
                    let found = p.cursor.peek().cloned();
                    return Err(p.error(
                        ErrorKind::expected_token(
                            ["<identifier>", "<number>", "<string>"],
                            found.clone(),
                        ),
                        found.as_ref(),
                    ));
                }
            }
            Ok(ParseNode::branch("<primary_expression>", children))
        })
    }

    /// Parses a single comparison between two expressions
    pub fn parse_condition(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<condition>", |p| {
            let left = p.parse_expression()?;
            let op = p.parse_comparison_operator()?;
            let right = p.parse_expression()?;
            Ok(ParseNode::branch("<condition>", vec![left, op, right]))
        })
    }

    /// Parses a comparison operator.
    ///
    /// `<`, `>` or `=` directly followed by a separate `=` token are merged into one operator.
    pub fn parse_comparison_operator(&mut self) -> SyntaxResult<ParseNode> {
        let token = self.expect("<compOp>", |kind| {
            matches!(kind, TokenKind::CompOp(_) | TokenKind::Assign)
        })?;
        let mut spelling = token.kind().lexeme().unwrap_or_default();
        let mut span = token.span();
        if matches!(spelling.as_str(), "<" | ">" | "=") {
            let merged = self
                .cursor
                .peek()
                .filter(|next| matches!(next.kind(), TokenKind::Assign))
                .map(Spanned::span);
            if let Some(next_span) = merged {
                self.cursor.advance();
                spelling.push('=');
                span = span.join(&next_span).unwrap_or(span);
            }
        }
        if !COMPARISONS.contains(&spelling.as_str()) {
            return Err(self.error(ErrorKind::InvalidComparison(spelling), Some(&token)));
        }
        Ok(ParseNode::Leaf(Token::new(span, TokenKind::CompOp(spelling))))
    }
}
