//! Error types for scheme parsing and store access.
//!
//! Per-source failures ([`SchemeError`]) are reported and skipped by the
//! registry. Only a store that cannot be enumerated ([`StoreError`]) fails a
//! whole load.

use std::fmt;
use std::io;
use std::path::PathBuf;

use crate::glob::PatternError;
use crate::scheme::Scheme;

/// A single reason a parsed scheme was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationProblem {
    /// The `scheme` field was empty or absent.
    EmptyName,
    /// The document did not hold exactly sixteen color entries.
    WrongColorCount { found: usize },
    /// One of `base00`..`base0F` was absent.
    MissingColor(String),
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationProblem::EmptyName => write!(f, "Scheme name cannot be empty"),
            ValidationProblem::WrongColorCount { found } => {
                write!(f, "Wrong number of colors in scheme: expected 16, found {}", found)
            }
            ValidationProblem::MissingColor(key) => write!(f, "Scheme missing {:?}", key),
        }
    }
}

/// Why a single scheme source was not accepted.
#[derive(Debug, thiserror::Error)]
pub enum SchemeError {
    /// The source name does not end in `.yaml` or `.yml`.
    #[error("Unsupported scheme format: {name} (only YAML files are supported)")]
    UnsupportedFormat { name: String },

    /// The source could not be deserialized as a scheme document.
    #[error("Malformed scheme {name}: {message}")]
    Malformed { name: String, message: String },

    /// The document parsed but failed validation.
    ///
    /// The partially-built scheme is kept for inspection; it must not be
    /// used as a valid scheme.
    #[error("Invalid scheme {}: {}", .scheme.source(), join_problems(.problems))]
    Invalid {
        scheme: Box<Scheme>,
        problems: Vec<ValidationProblem>,
    },
}

impl SchemeError {
    /// The rejected record, when validation (rather than parsing) failed.
    pub fn scheme(&self) -> Option<&Scheme> {
        match self {
            SchemeError::Invalid { scheme, .. } => Some(scheme),
            _ => None,
        }
    }

    /// Validation problems, empty for format and parse failures.
    pub fn problems(&self) -> &[ValidationProblem] {
        match self {
            SchemeError::Invalid { problems, .. } => problems,
            _ => &[],
        }
    }
}

fn join_problems(problems: &[ValidationProblem]) -> String {
    problems
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure to enumerate or read a scheme store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The enumeration pattern could not be compiled.
    #[error(transparent)]
    InvalidPattern(#[from] PatternError),

    /// The store's listing could not be read.
    #[error("Failed to list {}: {source}", .path.display())]
    List {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// An entry's contents could not be read.
    #[error("Failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    /// No entry with the given name exists.
    #[error("No such scheme source: {0}")]
    NotFound(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_display() {
        assert_eq!(
            ValidationProblem::EmptyName.to_string(),
            "Scheme name cannot be empty"
        );
        assert!(ValidationProblem::WrongColorCount { found: 15 }
            .to_string()
            .contains("found 15"));
        assert_eq!(
            ValidationProblem::MissingColor("base0A".into()).to_string(),
            "Scheme missing \"base0A\""
        );
    }

    #[test]
    fn test_unsupported_format_display() {
        let err = SchemeError::UnsupportedFormat {
            name: "theme.json".into(),
        };
        assert!(err.to_string().contains("theme.json"));
        assert!(err.scheme().is_none());
        assert!(err.problems().is_empty());
    }

    #[test]
    fn test_store_error_from_pattern() {
        let err: StoreError = PatternError::UnclosedClass {
            pattern: "[a".into(),
        }
        .into();
        assert!(matches!(err, StoreError::InvalidPattern(_)));
        assert!(err.to_string().contains("[a"));
    }

    #[test]
    fn test_read_error_has_source() {
        use std::error::Error;

        let err = StoreError::Read {
            name: "a.yaml".into(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("a.yaml"));
    }
}
