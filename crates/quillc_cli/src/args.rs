//! the args for running quillc

use clap::Subcommand;
use quill_cli_common::LoggingArgs;
use std::path::PathBuf;

/// The args struct
#[derive(Debug, clap::Parser)]
#[clap(author, version, about = "Lexes, parses and analyzes quill source files")]
pub struct Args {
    #[command(flatten)]
    logging: LoggingArgs,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    pub fn logging(&self) -> &LoggingArgs {
        &self.logging
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print every token of a source file
    Tokens {
        #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Print the FIRST set of every kind of token in a source file
    First {
        #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Print the FOLLOW set of every kind of token in a source file
    Follow {
        #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Print the FIRST and FOLLOW sets of every nonterminal of the language
    Grammar,
    /// Print the parse tree of a source file
    Tree {
        #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
    },
    /// Print the symbol table and the hash table of a source file
    Symbols {
        #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
        /// The number of buckets in the hash table
        #[clap(long, env = "QUILL_HASH_SIZE", default_value_t = 4)]
        hash_size: usize,
    },
    /// Write the tokens, FIRST and FOLLOW sections of a source file
    Report {
        #[clap(value_name = "source file", value_hint = clap::ValueHint::FilePath)]
        file: PathBuf,
        /// Where to write the report, stdout if missing
        #[clap(short = 'o', long = "output", value_hint = clap::ValueHint::FilePath)]
        output: Option<PathBuf>,
    },
}
