//! Source text, along with the name used when reporting errors against it

use std::fmt::{Debug, Formatter};
use std::io;
use std::path::Path;
use std::sync::Arc;

/// A source file held in memory.
///
/// Source files are shared between every [Position](crate::spanned::Position) that points into
/// them, so they are always handed out behind an [Arc].
#[derive(PartialEq, Eq, Hash)]
pub struct SourceFile {
    name: String,
    text: String,
}

impl SourceFile {
    /// Creates a new source file from a name and its text
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            text: text.into(),
        })
    }

    /// Reads a source file from a path, using the path as its name
    pub fn read_path(path: &Path) -> io::Result<Arc<Self>> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::new(path.to_string_lossy(), text))
    }

    /// The name of this source
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full text of this source
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Gets a 1-based line of this source, without its line terminator
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|idx| self.text.lines().nth(idx))
    }
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("name", &self.name)
            .field("len", &self.text.len())
            .finish()
    }
}
