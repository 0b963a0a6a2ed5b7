//! Grammar symbols

use crate::EPSILON;
use std::fmt::{Display, Formatter};

/// A single symbol within a production
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Symbol {
    Terminal(String),
    NonTerminal(String),
    /// `symbol*`, or `symbol+` when `at_least_one` is set
    Repeat {
        symbol: Box<Symbol>,
        at_least_one: bool,
    },
    Epsilon,
}

impl Symbol {
    /// The nonterminal this symbol refers to, looking through repetition
    pub fn non_terminal(&self) -> Option<&str> {
        match self {
            Symbol::NonTerminal(name) => Some(name),
            Symbol::Repeat { symbol, .. } => symbol.non_terminal(),
            _ => None,
        }
    }

    /// Whether this symbol may occur several times in a row
    pub fn is_repeated(&self) -> bool {
        matches!(self, Symbol::Repeat { .. })
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Symbol::Terminal(name) | Symbol::NonTerminal(name) => write!(f, "{name}"),
            Symbol::Repeat {
                symbol,
                at_least_one: false,
            } => write!(f, "{symbol}*"),
            Symbol::Repeat {
                symbol,
                at_least_one: true,
            } => write!(f, "{symbol}+"),
            Symbol::Epsilon => write!(f, "{EPSILON}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let repeat = Symbol::Repeat {
            symbol: Box::new(Symbol::NonTerminal("<statement>".to_string())),
            at_least_one: false,
        };
        assert_eq!(repeat.to_string(), "<statement>*");
        assert_eq!(repeat.non_terminal(), Some("<statement>"));
        assert!(repeat.is_repeated());
        assert_eq!(Symbol::Epsilon.to_string(), "epsilon");
        assert_eq!(Symbol::Terminal("(".to_string()).non_terminal(), None);
    }
}
