//! Renders the textual sections printed by `quillc`

use indexmap::IndexSet;
use itertools::Itertools;
use quill_grammar::FirstFollow;
use quill_tokens::token::Token;
use std::collections::BTreeSet;

fn heading(title: &str) -> String {
    format!("{bar} {title} {bar}\n\n", bar = "_".repeat(15))
}

fn set(name: &str, label: &str, members: &BTreeSet<String>) -> String {
    format!("{label}({name}) = {{ {} }}\n", members.iter().join(", "))
}

/// The class names of some tokens, each once, in the order they first appear
pub fn token_classes(tokens: &[Token]) -> IndexSet<&'static str> {
    tokens.iter().map(|token| token.kind().class_name()).collect()
}

/// Every token on its own line, then the number of distinct token classes
pub fn tokens_section(tokens: &[Token]) -> String {
    format!(
        "Tokens:\n{}\nNumber of unique token types: {}\n",
        tokens
            .iter()
            .map(|token| format!("{}\n", token.kind()))
            .join(""),
        token_classes(tokens).len()
    )
}

/// The FIRST set of every token class in `tokens`
pub fn first_section(tokens: &[Token], analysis: &FirstFollow) -> String {
    token_classes(tokens)
        .into_iter()
        .map(|class| set(class, "FIRST", &analysis.first_or_self(class)))
        .collect()
}

/// The FOLLOW set of every token class in `tokens`
pub fn follow_section(tokens: &[Token], analysis: &FirstFollow) -> String {
    token_classes(tokens)
        .into_iter()
        .map(|class| set(class, "FOLLOW", &analysis.follow_or_self(class)))
        .collect()
}

/// FIRST and FOLLOW sets of every nonterminal
pub fn grammar_section<'a>(
    non_terminals: impl IntoIterator<Item = &'a str>,
    analysis: &FirstFollow,
) -> String {
    let non_terminals = non_terminals.into_iter().collect::<Vec<_>>();
    let mut out = heading("First Set");
    for non_terminal in &non_terminals {
        out.push_str(&set(non_terminal, "FIRST", &analysis.first_or_self(non_terminal)));
    }
    out.push('\n');
    out.push_str(&heading("Follow Set"));
    for non_terminal in &non_terminals {
        out.push_str(&set(
            non_terminal,
            "FOLLOW",
            &analysis.follow_or_self(non_terminal),
        ));
    }
    out
}

/// The full report: tokens, then FIRST and FOLLOW sets per token class
pub fn full_report(tokens: &[Token], analysis: &FirstFollow) -> String {
    let mut out = heading("Tokens Set");
    out.push_str(&tokens_section(tokens));
    out.push('\n');
    out.push_str(&heading("First Set"));
    out.push_str(&first_section(tokens, analysis));
    out.push('\n');
    out.push_str(&heading("Follow Set"));
    out.push_str(&follow_section(tokens, analysis));
    out
}
