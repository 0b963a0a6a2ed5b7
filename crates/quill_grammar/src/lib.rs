#![doc = include_str!("../README.md")]

use std::sync::LazyLock;

pub mod analysis;
pub mod grammar;
pub mod language;
pub mod symbol;

pub use analysis::{compute_first_follow, Analyzer, FirstFollow};
pub use grammar::{Grammar, GrammarBuilder, GrammarError, Production};
pub use symbol::Symbol;

/// The marker used for the empty sequence within FIRST sets and productions
pub const EPSILON: &str = "epsilon";
/// The end-of-input marker, always in the FOLLOW set of a grammar's start symbol
pub const END_MARKER: &str = "$";

static LANGUAGE: LazyLock<Grammar> =
    LazyLock::new(|| language::quill_grammar().expect("the quill grammar is well formed"));

static LANGUAGE_ANALYSIS: LazyLock<FirstFollow> =
    LazyLock::new(|| compute_first_follow(&LANGUAGE));

/// The grammar of the quill language, built on first use
pub fn language() -> &'static Grammar {
    &LANGUAGE
}

/// The FIRST/FOLLOW sets of the quill language, computed on first use
pub fn language_analysis() -> &'static FirstFollow {
    &LANGUAGE_ANALYSIS
}
