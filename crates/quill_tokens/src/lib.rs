#![doc = include_str!("../README.md")]

use crate::spanned::{LineReader, Span};
use std::fmt::{Debug, Display, Formatter};

pub mod source;
pub mod spanned;
pub mod token;

/// An error with a location
#[derive(Debug, Clone)]
pub struct SpannedError<E> {
    error: E,
    location: Option<Span>,
}

impl<E> SpannedError<E> {
    pub fn new(error: E, location: impl Into<Option<Span>>) -> Self {
        Self {
            error,
            location: location.into(),
        }
    }

    /// Gets the inner error
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Gets where this error occurred, if known
    pub fn location(&self) -> Option<&Span> {
        self.location.as_ref()
    }
}

impl<E: Display> Display for SpannedError<E> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.error)?;
        if let Some(location) = &self.location {
            let start = location.start();
            writeln!(
                f,
                "  -> {}:{}:{}",
                start.source().name(),
                start.line(),
                start.column()
            )?;
            let (lines, base_line) = LineReader::new(1, 0).lines(location);
            let width = lines.iter().map(|line| line.line).max().unwrap_or(0) / 10 + 1;
            for line in &lines {
                writeln!(f, "{:width$} | {}", line.line, line.src.trim_end())?;
                if line.line == base_line {
                    let col = start.column() - 1;
                    let len = location.len();
                    if len > 1 {
                        writeln!(
                            f,
                            "{}{}{}",
                            " ".repeat(width + 3),
                            " ".repeat(col),
                            "~".repeat(len)
                        )?;
                    } else {
                        writeln!(f, "{}{}^", " ".repeat(width + 3), "-".repeat(col))?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl<E: Debug + Display> std::error::Error for SpannedError<E> {}
