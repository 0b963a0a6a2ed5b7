#![doc = include_str!("../README.md")]

use thiserror::Error;

mod hash;
mod table;

pub use hash::HashIndex;
pub use table::{DataType, SymbolRecord, SymbolTable};

/// An error occurred while building a symbol table or hash index
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SymbolTableError {
    #[error("hash table size must be greater than zero")]
    ZeroHashSize,
    #[error("can not hash an empty name")]
    EmptyName,
}
