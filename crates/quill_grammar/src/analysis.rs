//! FIRST and FOLLOW set computation.
//!
//! Both sets are solved by iterating full passes over every production until a pass adds
//! nothing. Sets only ever grow, and each is bounded by the finite set of terminals, so the
//! iteration always reaches a fixed point.

use crate::grammar::Grammar;
use crate::symbol::Symbol;
use crate::{END_MARKER, EPSILON};
use indexmap::IndexMap;
use std::collections::BTreeSet;
use tracing::{debug, trace};

type Sets = IndexMap<String, BTreeSet<String>>;

/// Computes the FIRST and FOLLOW sets of a grammar, running both to a fixed point.
pub fn compute_first_follow(grammar: &Grammar) -> FirstFollow {
    Analyzer::new(grammar).finish()
}

/// Incremental FIRST/FOLLOW solver over a single grammar.
///
/// Each pass visits every production once. [finish](Self::finish) runs FIRST passes until
/// they stop changing anything and then does the same for FOLLOW.
#[derive(Debug)]
pub struct Analyzer<'g> {
    grammar: &'g Grammar,
    first: Sets,
    follow: Sets,
    first_passes: usize,
    follow_passes: usize,
}

impl<'g> Analyzer<'g> {
    /// Creates an analyzer with every terminal's FIRST set already known and every FOLLOW
    /// set seeded with the grammar's explicit augmentations.
    pub fn new(grammar: &'g Grammar) -> Self {
        let mut first = Sets::new();
        for terminal in grammar.terminals() {
            first.insert(terminal.to_string(), BTreeSet::from([terminal.to_string()]));
        }
        let mut follow = Sets::new();
        for non_terminal in grammar.non_terminals() {
            first.insert(non_terminal.to_string(), BTreeSet::new());
            follow.insert(non_terminal.to_string(), BTreeSet::new());
        }
        if let Some(start) = follow.get_mut(grammar.start()) {
            start.insert(END_MARKER.to_string());
        }
        for (non_terminal, seeds) in grammar.follow_seeds() {
            if let Some(set) = follow.get_mut(non_terminal) {
                set.extend(seeds.map(str::to_string));
            }
        }
        Self {
            grammar,
            first,
            follow,
            first_passes: 0,
            follow_passes: 0,
        }
    }

    /// The FIRST sets computed so far
    pub fn first_sets(&self) -> &IndexMap<String, BTreeSet<String>> {
        &self.first
    }

    /// The FOLLOW sets computed so far
    pub fn follow_sets(&self) -> &IndexMap<String, BTreeSet<String>> {
        &self.follow
    }

    /// Runs a single pass over every production, growing FIRST sets.
    ///
    /// Returns whether any set changed.
    pub fn first_pass(&mut self) -> bool {
        let mut changed = false;
        for (non_terminal, productions) in self.grammar.rules() {
            for production in productions {
                let found = first_of_sequence(&self.first, production.symbols());
                let set = self.first.entry(non_terminal.to_string()).or_default();
                let before = set.len();
                set.extend(found);
                changed |= set.len() != before;
            }
        }
        self.first_passes += 1;
        trace!(pass = self.first_passes, changed, "FIRST pass");
        changed
    }

    /// Runs a single pass over every production, growing FOLLOW sets.
    ///
    /// FOLLOW sets are only meaningful once FIRST sets have converged.
    ///
    /// Returns whether any set changed.
    pub fn follow_pass(&mut self) -> bool {
        let mut changed = false;
        for (lhs, productions) in self.grammar.rules() {
            for production in productions {
                let symbols = production.symbols();
                for (idx, symbol) in symbols.iter().enumerate() {
                    let Some(target) = symbol.non_terminal() else {
                        continue;
                    };
                    let mut found = first_of_sequence(&self.first, &symbols[idx + 1..]);
                    let rest_nullable = found.remove(EPSILON);
                    if symbol.is_repeated() {
                        found.extend(
                            first_of_symbol(&self.first, symbol)
                                .into_iter()
                                .filter(|s| s != EPSILON),
                        );
                    }
                    if rest_nullable {
                        found.extend(self.follow.get(lhs).into_iter().flatten().cloned());
                    }
                    let set = self.follow.entry(target.to_string()).or_default();
                    let before = set.len();
                    set.extend(found);
                    changed |= set.len() != before;
                }
            }
        }
        self.follow_passes += 1;
        trace!(pass = self.follow_passes, changed, "FOLLOW pass");
        changed
    }

    /// Runs both computations to a fixed point
    pub fn finish(mut self) -> FirstFollow {
        while self.first_pass() {}
        debug!(passes = self.first_passes, "FIRST sets converged");
        while self.follow_pass() {}
        debug!(passes = self.follow_passes, "FOLLOW sets converged");
        FirstFollow {
            first: self.first,
            follow: self.follow,
            first_passes: self.first_passes,
            follow_passes: self.follow_passes,
        }
    }
}

fn first_of_symbol(first: &Sets, symbol: &Symbol) -> BTreeSet<String> {
    match symbol {
        Symbol::Terminal(terminal) => BTreeSet::from([terminal.clone()]),
        Symbol::NonTerminal(name) => first.get(name).cloned().unwrap_or_default(),
        Symbol::Repeat {
            symbol,
            at_least_one,
        } => {
            let mut set = first_of_symbol(first, symbol);
            if !at_least_one {
                set.insert(EPSILON.to_string());
            }
            set
        }
        Symbol::Epsilon => BTreeSet::from([EPSILON.to_string()]),
    }
}

fn first_of_sequence(first: &Sets, symbols: &[Symbol]) -> BTreeSet<String> {
    let mut result = BTreeSet::new();
    for symbol in symbols {
        let mut found = first_of_symbol(first, symbol);
        let nullable = found.remove(EPSILON);
        result.extend(found);
        if !nullable {
            return result;
        }
    }
    result.insert(EPSILON.to_string());
    result
}

/// The solved FIRST and FOLLOW sets of a grammar. Immutable once computed.
#[derive(Debug, Clone)]
pub struct FirstFollow {
    first: Sets,
    follow: Sets,
    first_passes: usize,
    follow_passes: usize,
}

impl FirstFollow {
    /// The FIRST set of a terminal or nonterminal
    pub fn first(&self, symbol: &str) -> Option<&BTreeSet<String>> {
        self.first.get(symbol)
    }

    /// The FOLLOW set of a nonterminal
    pub fn follow(&self, non_terminal: &str) -> Option<&BTreeSet<String>> {
        self.follow.get(non_terminal)
    }

    /// The FIRST set of a sequence of symbols
    pub fn first_of_sequence(&self, symbols: &[Symbol]) -> BTreeSet<String> {
        first_of_sequence(&self.first, symbols)
    }

    /// The FIRST set of `name`, or just `{name}` if the grammar does not know it
    pub fn first_or_self(&self, name: &str) -> BTreeSet<String> {
        self.first(name)
            .cloned()
            .unwrap_or_else(|| BTreeSet::from([name.to_string()]))
    }

    /// The FOLLOW set of `name`, or just `{name}` if the grammar does not know it
    pub fn follow_or_self(&self, name: &str) -> BTreeSet<String> {
        self.follow(name)
            .cloned()
            .unwrap_or_else(|| BTreeSet::from([name.to_string()]))
    }

    /// Every FIRST set, terminals first and then nonterminals in declaration order
    pub fn first_sets(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.first.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// Every FOLLOW set, in nonterminal declaration order
    pub fn follow_sets(&self) -> impl Iterator<Item = (&str, &BTreeSet<String>)> {
        self.follow.iter().map(|(name, set)| (name.as_str(), set))
    }

    /// How many passes the FIRST and FOLLOW computations took, including the final pass that
    /// changed nothing
    pub fn passes(&self) -> (usize, usize) {
        (self.first_passes, self.follow_passes)
    }
}
