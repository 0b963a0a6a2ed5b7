#![allow(dead_code)]

use quill_parsing::parse_source;
use quill_parsing::parser::ParseNode;
use quill_tokens::source::SourceFile;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn source(text: &str) -> Arc<SourceFile> {
    SourceFile::new("test.ql", text)
}

pub fn parse(text: &str) -> ParseNode {
    match parse_source(&source(text)) {
        Ok(tree) => tree,
        Err(e) => panic!("could not parse {text:?}:\n{e}"),
    }
}

/// The labels of the direct children of a node
pub fn labels(node: &ParseNode) -> Vec<&str> {
    node.children().iter().map(ParseNode::label).collect()
}

pub fn sample_file() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("quill_files")
        .join("sample.ql")
}
