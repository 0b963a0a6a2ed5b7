#![doc = include_str!("../README.md")]

use crate::lexer::{scan, LexingError};
use crate::parser::{ParseNode, Parser, SyntaxError};
use quill_tokens::source::SourceFile;
use std::io;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

pub mod lexer;
pub mod parser;

/// Lexes and parses a source
pub fn parse_source(source: &Arc<SourceFile>) -> Result<ParseNode, Error> {
    let tokens = scan(source)?;
    Ok(Parser::new(tokens).parse()?)
}

/// Reads, lexes and parses the file at a path
pub fn parse_file(path: &Path) -> Result<ParseNode, Error> {
    let source = SourceFile::read_path(path)?;
    parse_source(&source)
}

/// Any error that can occur while turning a file into a parse tree
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Lex(#[from] LexingError),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    Io(#[from] io::Error),
}
