//! The symbol table and the line patterns that fill it

use itertools::Itertools;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::LazyLock;
use strum::{EnumString, IntoStaticStr};
use tracing::{debug, trace};

static VARIABLE_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(int|float|string)\s+([a-zA-Z0-9_]+)\s*=\s*(.*);")
        .expect("variable declaration pattern is valid")
});

static FUNCTION_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*do\s+([a-zA-Z0-9_]+)\s*\((.*)\)\s*\{")
        .expect("function declaration pattern is valid")
});

static CALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"call\s+([a-zA-Z0-9_]+)\s*\((.*)\)").expect("call pattern is valid")
});

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([a-zA-Z0-9_]+)\b").expect("word pattern is valid"));

/// Words that are never references to a symbol
const RESERVED: &[&str] = &[
    "int", "float", "string", "do", "return", "if", "else", "for", "call", "print",
];

/// The type of a symbol. Functions are `void`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, strum::Display, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum DataType {
    Int,
    Float,
    String,
    Void,
}

impl DataType {
    /// The number of address units a symbol of this type occupies
    pub fn size(&self) -> usize {
        match self {
            DataType::Int => 2,
            DataType::Float => 4,
            DataType::String => 8,
            DataType::Void => 0,
        }
    }
}

/// A single declared symbol
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolRecord {
    counter: usize,
    name: String,
    address: usize,
    data_type: DataType,
    dimensions: usize,
    declared_at: usize,
    references: Vec<usize>,
}

impl SymbolRecord {
    /// The order this symbol was declared in, starting at 0
    pub fn counter(&self) -> usize {
        self.counter
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> usize {
        self.address
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    /// The number of parameters of a function, 0 for variables
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// The 1-based line this symbol was declared on
    pub fn declared_at(&self) -> usize {
        self.declared_at
    }

    /// Every 1-based line this symbol appears on, in ascending order
    pub fn references(&self) -> &[usize] {
        &self.references
    }
}

/// Symbols declared in a source, in declaration order.
///
/// Addresses are handed out sequentially, each declaration advancing the next address by the
/// size of its [DataType].
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    records: Vec<SymbolRecord>,
    next_address: usize,
}

impl SymbolTable {
    /// Creates a new, empty symbol table
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a symbol table by matching every line of a source
    pub fn from_source(text: &str) -> Self {
        let mut table = Self::new();
        for (idx, line) in text.lines().enumerate() {
            table.scan_line(line, idx + 1);
        }
        table
    }

    fn scan_line(&mut self, line: &str, line_number: usize) {
        if let Some(captures) = VARIABLE_DECLARATION.captures(line) {
            if let Ok(data_type) = DataType::from_str(&captures[1]) {
                self.declare(&captures[2], data_type, line_number, 0);
            }
        }
        if let Some(captures) = FUNCTION_DECLARATION.captures(line) {
            let parameters = captures[2].trim();
            let count = if parameters.is_empty() {
                0
            } else {
                parameters.split(',').count()
            };
            self.declare(&captures[1], DataType::Void, line_number, count);
        }
        if let Some(captures) = CALL.captures(line) {
            self.reference(&captures[1], line_number);
        }
        for captures in WORD.captures_iter(line) {
            let word = &captures[1];
            if !RESERVED.contains(&word) {
                self.reference(word, line_number);
            }
        }
    }

    /// Declares a symbol, returning its address
    pub fn declare(
        &mut self,
        name: &str,
        data_type: DataType,
        line: usize,
        dimensions: usize,
    ) -> usize {
        let address = self.next_address;
        debug!(name, %data_type, address, line, "declared symbol");
        self.records.push(SymbolRecord {
            counter: self.records.len(),
            name: name.to_string(),
            address,
            data_type,
            dimensions,
            declared_at: line,
            references: vec![],
        });
        self.next_address += data_type.size();
        address
    }

    /// Records that `name` is used on a line. Names that were never declared are ignored, and a
    /// line is only recorded once per symbol.
    pub fn reference(&mut self, name: &str, line: usize) {
        for record in self.records.iter_mut().filter(|r| r.name == name) {
            if !record.references.contains(&line) {
                trace!(name, line, "referenced symbol");
                record.references.push(line);
            }
        }
    }

    pub fn records(&self) -> &[SymbolRecord] {
        &self.records
    }

    /// The most recent declaration of `name`
    pub fn get(&self, name: &str) -> Option<&SymbolRecord> {
        self.records.iter().rev().find(|r| r.name == name)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Display for SymbolTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{:<10}{:<20}{:<10}{:<15}{:<20}{:<20}Reference Line",
            "Counter",
            "Variable Name",
            "Address",
            "Data Type",
            "No. of Dimensions",
            "Line Declaration"
        )?;
        writeln!(f, "{}", "=".repeat(95))?;
        for record in &self.records {
            let references = if record.references.is_empty() {
                "{}".to_string()
            } else {
                record.references.iter().join(", ")
            };
            writeln!(
                f,
                "{:<10}{:<20}{:<10}{:<15}{:<20}{:<20}{}",
                record.counter,
                record.name,
                record.address,
                record.data_type.to_string(),
                record.dimensions,
                record.declared_at,
                references
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_addresses_follow_sizes() {
        let table = SymbolTable::from_source(
            "int a = 1;\nfloat b = 2.0;\nstring c = \"x\";\ndo f(int p) {\nint d = 4;\n}",
        );
        let addresses = table
            .records()
            .iter()
            .map(|r| (r.name(), r.address()))
            .collect::<Vec<_>>();
        assert_eq!(
            addresses,
            [("a", 0), ("b", 2), ("c", 6), ("f", 14), ("d", 14)]
        );
        assert_eq!(table.get("f").unwrap().data_type(), DataType::Void);
    }

    #[test]
    fn test_function_dimensions() {
        let table = SymbolTable::from_source("do add(int a, int b) {\n}\ndo run() {\n}");
        assert_eq!(table.get("add").unwrap().dimensions(), 2);
        assert_eq!(table.get("run").unwrap().dimensions(), 0);
    }

    #[test]
    fn test_references_are_recorded_once_per_line() {
        let table = SymbolTable::from_source("int x = 1;\nx = x + x;\nprint(y);\nx = 2;");
        let x = table.get("x").unwrap();
        assert_eq!(x.declared_at(), 1);
        assert_eq!(x.references(), &[1, 2, 4]);
    }

    #[test]
    fn test_calls_reference_functions() {
        let table = SymbolTable::from_source("do f() {\n}\nprint(call f());");
        assert_eq!(table.get("f").unwrap().references(), &[1, 3]);
    }

    #[test]
    fn test_indented_declarations() {
        let table = SymbolTable::from_source("do f() {\n    int inner = 1;\n}");
        assert_eq!(table.get("inner").unwrap().declared_at(), 2);
    }

    #[test]
    fn test_undeclared_names_are_ignored() {
        let mut table = SymbolTable::new();
        table.reference("ghost", 1);
        assert!(table.is_empty());
    }

    #[test]
    fn test_render() {
        let table = SymbolTable::from_source("int x = 1;");
        let rendered = table.to_string();
        let mut lines = rendered.lines();
        assert!(lines.next().unwrap().starts_with("Counter   Variable Name"));
        assert_eq!(lines.next().unwrap(), "=".repeat(95));
        assert_eq!(
            lines.next().unwrap(),
            "0         x                   0         int            0                   1                   1"
        );
    }
}
