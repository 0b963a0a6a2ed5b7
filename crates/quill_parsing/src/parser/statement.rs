//! statements

use crate::parser::{ErrorKind, ParseNode, Parser, SyntaxResult};
use quill_tokens::token::{Keyword, TokenKind};

impl Parser {
    /// Parses statements until the input is exhausted
    pub fn parse_program(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<program>", |p| {
            let mut statements = vec![];
            while !p.cursor.is_at_end() {
                statements.push(p.parse_statement()?);
            }
            Ok(ParseNode::branch("<program>", statements))
        })
    }

    /// Parses a single statement, choosing what to parse from the next token
    pub fn parse_statement(&mut self) -> SyntaxResult<ParseNode> {
        let Some(token) = self.cursor.peek().cloned() else {
            return Err(self.error(ErrorKind::UnexpectedEof, None));
        };
        match token.kind() {
            TokenKind::Datatype(_) => self.parse_declaration(),
            TokenKind::Keyword(Keyword::If) => self.parse_if(),
            TokenKind::Keyword(Keyword::Print) => self.parse_print(),
            TokenKind::Keyword(Keyword::For) => self.parse_loop(),
            TokenKind::Block => self.parse_block(),
            TokenKind::Identifier(name) if self.known.contains(name) => self.parse_assignment(),
            TokenKind::Keyword(Keyword::Do) => self.parse_function_declaration(),
            TokenKind::Keyword(Keyword::Return) => self.parse_return(),
            TokenKind::Keyword(Keyword::Call) => self.parse_call(),
            _ => Err(self.error(ErrorKind::UnexpectedToken(token.clone()), Some(&token))),
        }
    }

    /// Parses `datatype identifier = expression`
    pub fn parse_declaration(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<declaration>", |p| {
            let declaration = p.non_terminal("<var_declaration>", |p| {
                let datatype = p.expect("<datatype>", |kind| matches!(kind, TokenKind::Datatype(_)))?;
                let identifier = p.parse_identifier()?;
                p.expect("=", |kind| matches!(kind, TokenKind::Assign))?;
                let expression = p.parse_expression()?;
                Ok(ParseNode::branch(
                    "<var_declaration>",
                    vec![ParseNode::Leaf(datatype), identifier, expression],
                ))
            })?;
            Ok(ParseNode::branch("<declaration>", vec![declaration]))
        })
    }

    /// Parses `identifier = expression`
    pub fn parse_assignment(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<assignment>", |p| {
            let assignment = p.non_terminal("<var_assignment>", |p| {
                let identifier = p.parse_identifier()?;
                p.expect("=", |kind| matches!(kind, TokenKind::Assign))?;
                let expression = p.parse_expression()?;
                Ok(ParseNode::branch(
                    "<var_assignment>",
                    vec![identifier, expression],
                ))
            })?;
            Ok(ParseNode::branch("<assignment>", vec![assignment]))
        })
    }

    /// Parses an `if` statement with any number of `elif` branches and an optional `else`
    pub fn parse_if(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<if-condition>", |p| {
            p.expect_keyword(Keyword::If)?;
            let mut children = p.parse_guarded_block()?;
            while p.next_is_keyword(Keyword::Elif) {
                p.bump()?;
                let elif = p.non_terminal("<elif>", |p| p.parse_guarded_block())?;
                children.push(ParseNode::branch("<elif>", elif));
            }
            if p.next_is_keyword(Keyword::Else) {
                p.bump()?;
                let block = p.non_terminal("<else>", |p| p.parse_block())?;
                children.push(ParseNode::branch("<else>", vec![block]));
            }
            Ok(ParseNode::branch("<if-condition>", children))
        })
    }

    /// A condition, optionally in parentheses, followed by a block
    fn parse_guarded_block(&mut self) -> SyntaxResult<Vec<ParseNode>> {
        let parenthesized = self.next_is(|kind| matches!(kind, TokenKind::LBracket('(')));
        if parenthesized {
            self.bump()?;
        }
        let condition = self.parse_condition()?;
        if parenthesized {
            self.expect_close(')')?;
        }
        let block = self.parse_block()?;
        Ok(vec![condition, block])
    }

    /// Parses `{ statement* }`
    pub fn parse_block(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<block>", |p| {
            let open = p.expect("{", |kind| matches!(kind, TokenKind::Block))?;
            let mut statements = vec![];
            loop {
                if p.next_is(|kind| matches!(kind, TokenKind::RBracket('}'))) {
                    p.bump()?;
                    break;
                }
                if p.cursor.is_at_end() {
                    return Err(p.error(ErrorKind::Unbalanced('}'), Some(&open)));
                }
                statements.push(p.parse_statement()?);
            }
            Ok(ParseNode::branch("<block>", statements))
        })
    }

    /// Parses `do identifier ( parameters ) block`
    pub fn parse_function_declaration(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<function_declare>", |p| {
            p.expect_keyword(Keyword::Do)?;
            let identifier = p.parse_identifier()?;
            let parameters = p.parse_separated("<parameters>", |p| {
                p.non_terminal("<parameter>", |p| {
                    let datatype =
                        p.expect("<datatype>", |kind| matches!(kind, TokenKind::Datatype(_)))?;
                    let identifier = p.parse_identifier()?;
                    Ok(ParseNode::branch(
                        "<parameter>",
                        vec![ParseNode::Leaf(datatype), identifier],
                    ))
                })
            })?;
            let block = p.parse_block()?;
            Ok(ParseNode::branch(
                "<function_declare>",
                vec![identifier, parameters, block],
            ))
        })
    }

    /// Parses `call identifier ( arguments )`
    pub fn parse_call(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<call>", |p| {
            p.expect_keyword(Keyword::Call)?;
            let identifier = p.parse_identifier()?;
            let arguments = p.parse_separated("<arguments>", Parser::parse_identifier)?;
            Ok(ParseNode::branch("<call>", vec![identifier, arguments]))
        })
    }

    /// Parses `( item, item, ... )`, labeling the list with `label`
    fn parse_separated(
        &mut self,
        label: &'static str,
        mut item: impl FnMut(&mut Self) -> SyntaxResult<ParseNode>,
    ) -> SyntaxResult<ParseNode> {
        self.non_terminal(label, |p| {
            p.expect_open('(')?;
            let mut items = vec![];
            if !p.next_is(|kind| matches!(kind, TokenKind::RBracket(')'))) {
                loop {
                    items.push(item(p)?);
                    if !p.next_is(|kind| matches!(kind, TokenKind::Separator)) {
                        break;
                    }
                    p.bump()?;
                }
            }
            p.expect_close(')')?;
            Ok(ParseNode::branch(label, items))
        })
    }

    /// Parses `for ( declaration , condition , expression ) block`
    pub fn parse_loop(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<loop>", |p| {
            p.expect_keyword(Keyword::For)?;
            p.expect_open('(')?;
            let declaration = p.parse_declaration()?;
            p.expect_separator()?;
            let condition = p.parse_condition()?;
            p.expect_separator()?;
            let expression = p.parse_expression()?;
            p.expect_close(')')?;
            let block = p.parse_block()?;
            Ok(ParseNode::branch(
                "<loop>",
                vec![declaration, condition, expression, block],
            ))
        })
    }

    /// Parses `print ( call )` or `print ( expression )`
    pub fn parse_print(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<print>", |p| {
            p.expect_keyword(Keyword::Print)?;
            p.expect_open('(')?;
            let content = if p.next_is_keyword(Keyword::Call) {
                p.parse_call()?
            } else {
                p.parse_expression()?
            };
            p.expect_close(')')?;
            Ok(ParseNode::branch("<print>", vec![content]))
        })
    }

    /// Parses `return expression`
    pub fn parse_return(&mut self) -> SyntaxResult<ParseNode> {
        self.non_terminal("<return>", |p| {
            p.expect_keyword(Keyword::Return)?;
            let expression = p.parse_expression()?;
            Ok(ParseNode::branch("<return>", vec![expression]))
        })
    }
}
