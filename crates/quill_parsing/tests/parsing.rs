use quill_parsing::lexer::scan;
use quill_parsing::parser::{ErrorKind, Parser};
use quill_parsing::{parse_file, parse_source, Error};
use quill_tokens::token::{Datatype, Token, TokenKind};
use std::io::Write;
use test_log::test;

mod common;

#[test]
fn test_declaration_tree() {
    let tokens = scan(&common::source("int x = 5;")).unwrap();
    let declaration = Parser::new(tokens).parse_declaration().unwrap();
    assert_eq!(declaration.label(), "<declaration>");
    let var_declaration = &declaration.children()[0];
    assert_eq!(var_declaration.label(), "<var_declaration>");
    let children = var_declaration.children();
    assert_eq!(
        children[0].token().map(Token::kind),
        Some(&TokenKind::Datatype(Datatype::Int))
    );
    assert_eq!(
        children[1].token().map(Token::kind),
        Some(&TokenKind::Identifier("x".to_string()))
    );
    assert_eq!(children[2].label(), "<expression>");
    let number = children[2].find("<number>").expect("no number");
    assert_eq!(number.token().map(Token::kind), Some(&TokenKind::Integer(5)));
}

#[test]
fn test_known_identifier_dispatches_to_assignment() {
    let tokens = scan(&common::source("x = 1 + 2;")).unwrap();
    let statement = Parser::new(tokens)
        .with_known_identifiers(["x"])
        .parse_statement()
        .unwrap();
    assert_eq!(statement.label(), "<assignment>");
    assert_eq!(common::labels(&statement), ["<var_assignment>"]);

    let tree = common::parse("int x = 0;\nx = 1 + 2;");
    assert_eq!(common::labels(&tree), ["<declaration>", "<assignment>"]);
}

#[test]
fn test_undeclared_identifier_is_rejected() {
    let Err(Error::Syntax(err)) = parse_source(&common::source("y = 2;")) else {
        panic!("expected a syntax error");
    };
    assert!(matches!(err.kind(), ErrorKind::UnexpectedToken(_)));
    assert_eq!(err.non_terminals(), &["<program>"]);
}

#[test]
fn test_loop_children() {
    let tree = common::parse("for (int i = 0, i < 10, i + 1) { }");
    let loop_node = tree.find("<loop>").expect("no loop");
    assert_eq!(
        common::labels(loop_node),
        ["<declaration>", "<condition>", "<expression>", "<block>"]
    );
}

#[test]
fn test_split_comparison_in_condition() {
    let tree = common::parse("int x = 1;\nif (x < = 5) { print(x); }");
    let op = tree.find("<compOp>").expect("no comparison");
    assert_eq!(
        op.token().map(Token::kind),
        Some(&TokenKind::CompOp("<=".to_string()))
    );
    let span = op.span().expect("no span");
    assert_eq!((span.start().column(), span.end().column()), (7, 10));
}

#[test]
fn test_sample_file() {
    let tree = parse_file(&common::sample_file()).expect("could not parse sample");
    assert_eq!(
        common::labels(&tree),
        [
            "<declaration>",
            "<declaration>",
            "<declaration>",
            "<function_declare>",
            "<loop>",
            "<if-condition>"
        ]
    );
    let rendered = tree.to_string();
    assert!(rendered.starts_with("<program>\n├── <declaration>\n"), "got {rendered}");
    assert!(rendered.contains("(<string>, \"quill\")"), "got {rendered}");
}

#[test]
fn test_parse_temp_file() {
    let mut file = tempfile::Builder::new()
        .suffix(".ql")
        .tempfile()
        .expect("could not create temp file");
    writeln!(file, "string greeting = \"hi\";\nprint(greeting);").unwrap();
    let tree = parse_file(file.path()).expect("could not parse");
    assert_eq!(common::labels(&tree), ["<declaration>", "<print>"]);
}

#[test]
fn test_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_file(&dir.path().join("missing.ql"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_syntax_error_rendering() {
    let Err(err) = parse_source(&common::source("int x = 1;\nprint(x;")) else {
        panic!("expected an error");
    };
    let rendered = err.to_string();
    assert!(rendered.starts_with("syntax error: unbalanced code: missing )"), "got {rendered}");
    assert!(rendered.contains("  -> test.ql:2:8"), "got {rendered}");
    assert!(rendered.contains("<print>"), "got {rendered}");
}

#[test]
fn test_empty_program() {
    let tree = common::parse("// nothing here\n");
    assert!(tree.children().is_empty());
}
