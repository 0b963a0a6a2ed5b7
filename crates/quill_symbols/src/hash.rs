use crate::SymbolTableError;
use indexmap::IndexMap;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;
use tracing::trace;

static ASSIGNED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\w+\s+(\w+)\s*=").expect("assigned name pattern is valid")
});

/// Maps names to buckets of a fixed size hash table.
///
/// A name's bucket is the length of the name plus the code of its first character, modulo the
/// table size.
#[derive(Debug, Clone)]
pub struct HashIndex {
    size: usize,
    entries: IndexMap<String, usize>,
}

impl HashIndex {
    /// Creates an empty index with `size` buckets
    pub fn new(size: usize) -> Result<Self, SymbolTableError> {
        if size == 0 {
            return Err(SymbolTableError::ZeroHashSize);
        }
        Ok(Self {
            size,
            entries: IndexMap::new(),
        })
    }

    /// Indexes every name assigned on a line shaped like `word name =`
    pub fn from_source(text: &str, size: usize) -> Result<Self, SymbolTableError> {
        let mut index = Self::new(size)?;
        for line in text.lines() {
            if let Some(captures) = ASSIGNED_NAME.captures(line) {
                index.insert(&captures[1])?;
            }
        }
        Ok(index)
    }

    /// Computes the bucket of `name` in a table of `size` buckets
    pub fn hash(name: &str, size: usize) -> Result<usize, SymbolTableError> {
        if size == 0 {
            return Err(SymbolTableError::ZeroHashSize);
        }
        let first = name.chars().next().ok_or(SymbolTableError::EmptyName)?;
        Ok((name.chars().count() + first as usize) % size)
    }

    /// Adds a name to this index, returning its bucket
    pub fn insert(&mut self, name: &str) -> Result<usize, SymbolTableError> {
        let bucket = Self::hash(name, self.size)?;
        trace!(name, bucket, "hashed name");
        self.entries.insert(name.to_string(), bucket);
        Ok(bucket)
    }

    pub fn get(&self, name: &str) -> Option<usize> {
        self.entries.get(name).copied()
    }

    /// The number of buckets
    pub fn size(&self) -> usize {
        self.size
    }

    /// Every indexed name and its bucket, in the order they were first indexed
    pub fn entries(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(name, bucket)| (name.as_str(), *bucket))
    }
}

impl Display for HashIndex {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{:<15}Hash Value", "Variable Name")?;
        for (name, bucket) in self.entries() {
            writeln!(f, "{name:<15}{bucket}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn test_hash() {
        assert_eq!(HashIndex::hash("x", 4), Ok(1));
        assert_eq!(HashIndex::hash("total", 4), Ok((5 + 't' as usize) % 4));
        assert_eq!(HashIndex::hash("x", 0), Err(SymbolTableError::ZeroHashSize));
        assert_eq!(HashIndex::hash("", 4), Err(SymbolTableError::EmptyName));
    }

    #[test]
    fn test_zero_size_rejected() {
        assert_eq!(
            HashIndex::from_source("int x = 1;", 0).unwrap_err(),
            SymbolTableError::ZeroHashSize
        );
    }

    #[test]
    fn test_from_source() {
        let index = HashIndex::from_source("int x = 1;\n  float yy = 2.0;\nx = 3;\nint x = 4;", 4)
            .unwrap();
        assert_eq!(index.entries().collect::<Vec<_>>(), [("x", 1), ("yy", 3)]);
        assert_eq!(index.get("zz"), None);
    }

    #[test]
    fn test_render() {
        let index = HashIndex::from_source("int x = 1;", 4).unwrap();
        assert_eq!(
            index.to_string(),
            "Variable Name  Hash Value\nx              1\n"
        );
    }
}
