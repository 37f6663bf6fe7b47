//! Language of the measured program

use std::{convert::Infallible, fmt, str::FromStr};

/// Language of the measured program
///
/// This is a closed set: only the named variants get dedicated treatment, and
/// everything else is carried verbatim for display purposes.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum Language {
    /// Python, the only language whose runs come with a cProfile dump
    Python,

    /// Rust
    Rust,

    /// Any other language, identified by the name it was given
    Other(Box<str>),
}
//
impl Language {
    /// Truth that the profiler section of the log should be analyzed
    pub fn supports_profiling(&self) -> bool {
        matches!(self, Self::Python)
    }

    /// Name to be displayed to the user
    pub fn name(&self) -> &str {
        match self {
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::Other(name) => name,
        }
    }
}
//
impl FromStr for Language {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s.eq_ignore_ascii_case("python") {
            Self::Python
        } else if s.eq_ignore_ascii_case("rust") {
            Self::Rust
        } else {
            Self::Other(s.into())
        })
    }
}
//
impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
