//! The grammar model: terminals, nonterminals and their production alternatives

use crate::symbol::Symbol;
use crate::EPSILON;
use indexmap::{IndexMap, IndexSet};
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// One alternative of a nonterminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Production(Vec<Symbol>);

impl Production {
    pub fn symbols(&self) -> &[Symbol] {
        &self.0
    }
}

impl Display for Production {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.iter().join(" "))
    }
}

/// An immutable context-free grammar.
///
/// Every symbol referenced by a production is guaranteed to be a declared terminal or
/// nonterminal, which is checked by [GrammarBuilder::build].
#[derive(Debug, Clone)]
pub struct Grammar {
    start: String,
    terminals: IndexSet<String>,
    productions: IndexMap<String, Vec<Production>>,
    follow_seeds: IndexMap<String, IndexSet<String>>,
}

impl Grammar {
    /// Creates a new, empty grammar builder
    #[inline]
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    /// The start symbol
    pub fn start(&self) -> &str {
        &self.start
    }

    /// All declared terminals, in declaration order
    pub fn terminals(&self) -> impl Iterator<Item = &str> {
        self.terminals.iter().map(String::as_str)
    }

    /// All declared nonterminals, in declaration order
    pub fn non_terminals(&self) -> impl Iterator<Item = &str> {
        self.productions.keys().map(String::as_str)
    }

    pub fn is_terminal(&self, name: &str) -> bool {
        self.terminals.contains(name)
    }

    pub fn is_non_terminal(&self, name: &str) -> bool {
        self.productions.contains_key(name)
    }

    /// The alternatives of a nonterminal
    pub fn productions(&self, non_terminal: &str) -> Option<&[Production]> {
        self.productions.get(non_terminal).map(Vec::as_slice)
    }

    /// Iterates over every nonterminal with its alternatives
    pub fn rules(&self) -> impl Iterator<Item = (&str, &[Production])> {
        self.productions
            .iter()
            .map(|(name, productions)| (name.as_str(), productions.as_slice()))
    }

    /// FOLLOW facts that can not be derived from the productions and are added explicitly
    /// before FOLLOW sets are computed.
    pub fn follow_seeds(&self) -> impl Iterator<Item = (&str, impl Iterator<Item = &str>)> {
        self.follow_seeds
            .iter()
            .map(|(name, seeds)| (name.as_str(), seeds.iter().map(String::as_str)))
    }
}

impl Display for Grammar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (name, productions) in &self.productions {
            if productions.is_empty() {
                continue;
            }
            writeln!(f, "{name} -> {}", productions.iter().join(" | "))?;
        }
        Ok(())
    }
}

/// Builder for creating a [Grammar].
///
/// Productions are written as whitespace separated symbols. A symbol followed by `*` or `+`
/// is repeated zero-or-more or one-or-more times, and `epsilon` is the empty sequence.
///
/// ```rust
/// # use quill_grammar::Grammar;
/// let grammar = Grammar::builder()
///     .start("<list>")
///     .terminals(["(", ")", "x"])
///     .non_terminals(["<list>", "<item>"])
///     .rule("<list>", ["( <item>* )"])
///     .rule("<item>", ["x", "<list>"])
///     .build()
///     .expect("could not build");
/// assert!(grammar.is_terminal("x"));
/// ```
#[derive(Debug, Default)]
pub struct GrammarBuilder {
    start: Option<String>,
    terminals: IndexSet<String>,
    non_terminals: IndexSet<String>,
    rules: Vec<(String, Vec<String>)>,
    follow_seeds: Vec<(String, Vec<String>)>,
}

impl GrammarBuilder {
    /// Creates a new, empty builder
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the start symbol
    pub fn start(mut self, start: impl Into<String>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Declares terminals
    pub fn terminals<I: IntoIterator<Item: Into<String>>>(mut self, terminals: I) -> Self {
        self.terminals
            .extend(terminals.into_iter().map(Into::into));
        self
    }

    /// Declares nonterminals
    pub fn non_terminals<I: IntoIterator<Item: Into<String>>>(mut self, non_terminals: I) -> Self {
        self.non_terminals
            .extend(non_terminals.into_iter().map(Into::into));
        self
    }

    /// Adds alternatives to a nonterminal
    pub fn rule<I: IntoIterator<Item: Into<String>>>(
        mut self,
        non_terminal: impl Into<String>,
        alternatives: I,
    ) -> Self {
        self.rules.push((
            non_terminal.into(),
            alternatives.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Explicitly adds terminals to the FOLLOW set of a nonterminal
    pub fn seed_follow<I: IntoIterator<Item: Into<String>>>(
        mut self,
        non_terminal: impl Into<String>,
        terminals: I,
    ) -> Self {
        self.follow_seeds.push((
            non_terminal.into(),
            terminals.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Builds the grammar, resolving every symbol
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let start = self.start.ok_or(GrammarError::MissingStartSymbol)?;
        if let Some(both) = self
            .terminals
            .iter()
            .find(|t| self.non_terminals.contains(*t))
        {
            return Err(GrammarError::AmbiguousSymbol(both.clone()));
        }
        if !self.non_terminals.contains(&start) {
            return Err(GrammarError::UndeclaredStartSymbol(start));
        }

        let mut productions: IndexMap<String, Vec<Production>> = self
            .non_terminals
            .iter()
            .map(|name| (name.clone(), vec![]))
            .collect();
        for (non_terminal, alternatives) in self.rules {
            let resolved = alternatives
                .iter()
                .map(|alternative| {
                    resolve_production(
                        &non_terminal,
                        alternative,
                        &self.terminals,
                        &self.non_terminals,
                    )
                })
                .collect::<Result<Vec<_>, _>>()?;
            productions
                .get_mut(&non_terminal)
                .ok_or_else(|| GrammarError::UndeclaredNonTerminal(non_terminal.clone()))?
                .extend(resolved);
        }

        let mut follow_seeds: IndexMap<String, IndexSet<String>> = IndexMap::new();
        for (non_terminal, terminals) in self.follow_seeds {
            if !self.non_terminals.contains(&non_terminal) {
                return Err(GrammarError::UndeclaredNonTerminal(non_terminal));
            }
            if let Some(unknown) = terminals.iter().find(|t| !self.terminals.contains(*t)) {
                return Err(GrammarError::UnknownSymbol {
                    non_terminal,
                    symbol: unknown.clone(),
                });
            }
            follow_seeds
                .entry(non_terminal)
                .or_default()
                .extend(terminals);
        }

        Ok(Grammar {
            start,
            terminals: self.terminals,
            productions,
            follow_seeds,
        })
    }
}

fn resolve_production(
    non_terminal: &str,
    alternative: &str,
    terminals: &IndexSet<String>,
    non_terminals: &IndexSet<String>,
) -> Result<Production, GrammarError> {
    let symbols = alternative
        .split_whitespace()
        .map(|word| {
            resolve_symbol(word, terminals, non_terminals).ok_or_else(|| {
                GrammarError::UnknownSymbol {
                    non_terminal: non_terminal.to_string(),
                    symbol: word.to_string(),
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    if symbols.is_empty() {
        return Err(GrammarError::EmptyProduction(non_terminal.to_string()));
    }
    Ok(Production(symbols))
}

fn resolve_symbol(
    word: &str,
    terminals: &IndexSet<String>,
    non_terminals: &IndexSet<String>,
) -> Option<Symbol> {
    if word == EPSILON {
        return Some(Symbol::Epsilon);
    }
    if terminals.contains(word) {
        return Some(Symbol::Terminal(word.to_string()));
    }
    if non_terminals.contains(word) {
        return Some(Symbol::NonTerminal(word.to_string()));
    }
    let (inner, at_least_one) = if let Some(inner) = word.strip_suffix('*') {
        (inner, false)
    } else if let Some(inner) = word.strip_suffix('+') {
        (inner, true)
    } else {
        return None;
    };
    let symbol = resolve_symbol(inner, terminals, non_terminals)?;
    if symbol == Symbol::Epsilon {
        return None;
    }
    Some(Symbol::Repeat {
        symbol: Box::new(symbol),
        at_least_one,
    })
}

/// An error occurred while building a [Grammar]
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GrammarError {
    #[error("no start symbol was given")]
    MissingStartSymbol,
    #[error("start symbol {0:?} is not a declared nonterminal")]
    UndeclaredStartSymbol(String),
    #[error("{0:?} is used as a nonterminal but was never declared")]
    UndeclaredNonTerminal(String),
    #[error("{0:?} is declared as both a terminal and a nonterminal")]
    AmbiguousSymbol(String),
    #[error("unknown symbol {symbol:?} used by {non_terminal}")]
    UnknownSymbol {
        non_terminal: String,
        symbol: String,
    },
    #[error("{0} has an empty alternative, use `epsilon` instead")]
    EmptyProduction(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> GrammarBuilder {
        Grammar::builder()
            .start("<s>")
            .terminals(["a", "b", "*"])
            .non_terminals(["<s>", "<t>"])
    }

    #[test]
    fn test_resolves_symbols() {
        let grammar = base()
            .rule("<s>", ["a <t>* b", "<t>+", "epsilon", "*"])
            .rule("<t>", ["b"])
            .build()
            .unwrap();
        let productions = grammar.productions("<s>").unwrap();
        assert_eq!(productions.len(), 4);
        assert_eq!(
            productions[0].symbols(),
            &[
                Symbol::Terminal("a".to_string()),
                Symbol::Repeat {
                    symbol: Box::new(Symbol::NonTerminal("<t>".to_string())),
                    at_least_one: false
                },
                Symbol::Terminal("b".to_string()),
            ]
        );
        assert!(matches!(
            productions[1].symbols(),
            [Symbol::Repeat {
                at_least_one: true,
                ..
            }]
        ));
        assert_eq!(productions[2].symbols(), &[Symbol::Epsilon]);
        assert_eq!(productions[3].symbols(), &[Symbol::Terminal("*".to_string())]);
        assert_eq!(grammar.to_string(), "<s> -> a <t>* b | <t>+ | epsilon | *\n<t> -> b\n");
    }

    #[test]
    fn test_unknown_symbol() {
        let err = base().rule("<s>", ["a c"]).build().unwrap_err();
        assert_eq!(
            err,
            GrammarError::UnknownSymbol {
                non_terminal: "<s>".to_string(),
                symbol: "c".to_string()
            }
        );
    }

    #[test]
    fn test_undeclared_non_terminal() {
        let err = base().rule("<u>", ["a"]).build().unwrap_err();
        assert_eq!(err, GrammarError::UndeclaredNonTerminal("<u>".to_string()));
    }

    #[test]
    fn test_start_symbol_required() {
        let err = Grammar::builder().build().unwrap_err();
        assert_eq!(err, GrammarError::MissingStartSymbol);
        let err = base().start("<x>").build().unwrap_err();
        assert_eq!(err, GrammarError::UndeclaredStartSymbol("<x>".to_string()));
    }

    #[test]
    fn test_empty_alternative() {
        let err = base().rule("<s>", ["  "]).build().unwrap_err();
        assert_eq!(err, GrammarError::EmptyProduction("<s>".to_string()));
    }

    #[test]
    fn test_seeds_must_be_terminals() {
        let err = base().seed_follow("<t>", ["<s>"]).build().unwrap_err();
        assert!(matches!(err, GrammarError::UnknownSymbol { .. }));
        let grammar = base().seed_follow("<t>", ["a", "b"]).build().unwrap();
        let seeds = grammar
            .follow_seeds()
            .map(|(name, seeds)| (name, seeds.collect::<Vec<_>>()))
            .collect::<Vec<_>>();
        assert_eq!(seeds, vec![("<t>", vec!["a", "b"])]);
    }

    #[test]
    fn test_ambiguous_symbol() {
        let err = base().terminals(["<t>"]).build().unwrap_err();
        assert_eq!(err, GrammarError::AmbiguousSymbol("<t>".to_string()));
    }
}
