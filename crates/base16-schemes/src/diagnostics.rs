//! Diagnostics emitted while parsing and loading schemes.
//!
//! Parsing never fails loudly: a rejected scheme is reported through a
//! [`Diagnostics`] sink and the batch moves on. The sink is passed in by the
//! caller rather than reached through global state, so the same loading code
//! can log through `tracing` in an application and record messages in a test.
//!
//! | Sink | Use |
//! |------|-----|
//! | [`TracingDiagnostics`] | Forwards to `tracing` events with `file`/`scheme` fields |
//! | [`CollectingDiagnostics`] | Records every diagnostic in memory |
//!
//! # Example
//!
//! ```rust
//! use base16_schemes::{parse_scheme, CollectingDiagnostics, Level};
//!
//! let diagnostics = CollectingDiagnostics::new();
//! let result = parse_scheme("theme.json", b"{}", &diagnostics);
//!
//! assert!(result.is_err());
//! assert!(diagnostics.contains(Level::Error, "Only YAML files are supported"));
//! ```

use std::cell::RefCell;
use std::fmt;

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(s)
    }
}

/// A single message with its context fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    /// Store entry the message is about, if any.
    pub file: Option<String>,
    /// Scheme slug the message is about, if any.
    pub scheme: Option<String>,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            file: None,
            scheme: None,
        }
    }

    pub fn debug(message: impl Into<String>) -> Self {
        Self::new(Level::Debug, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Level::Info, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::new(Level::Warn, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Level::Error, message)
    }

    /// Tags the diagnostic with a store entry name.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Tags the diagnostic with a scheme slug.
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.level)?;
        if let Some(file) = &self.file {
            write!(f, " file={}", file)?;
        }
        if let Some(scheme) = &self.scheme {
            write!(f, " scheme={}", scheme)?;
        }
        write!(f, " {}", self.message)
    }
}

/// Receiver for diagnostics.
///
/// Loading is single-threaded, so sinks take `&self` and are free to use
/// interior mutability without `Sync` bounds.
pub trait Diagnostics {
    fn emit(&self, diagnostic: Diagnostic);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn emit(&self, diagnostic: Diagnostic) {
        (**self).emit(diagnostic)
    }
}

/// Sink that forwards diagnostics to `tracing`.
///
/// Installing a subscriber is left to the application.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        let Diagnostic {
            level,
            message,
            file,
            scheme,
        } = diagnostic;
        let file = file.as_deref().unwrap_or_default();
        let scheme = scheme.as_deref().unwrap_or_default();

        match level {
            Level::Debug => tracing::debug!(file, scheme, "{}", message),
            Level::Info => tracing::info!(file, scheme, "{}", message),
            Level::Warn => tracing::warn!(file, scheme, "{}", message),
            Level::Error => tracing::error!(file, scheme, "{}", message),
        }
    }
}

/// Sink that keeps every diagnostic in emission order.
#[derive(Debug, Default)]
pub struct CollectingDiagnostics {
    entries: RefCell<Vec<Diagnostic>>,
}

impl CollectingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of everything emitted so far.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.entries.borrow().clone()
    }

    /// Returns the diagnostics at the given level.
    pub fn at_level(&self, level: Level) -> Vec<Diagnostic> {
        self.entries
            .borrow()
            .iter()
            .filter(|d| d.level == level)
            .cloned()
            .collect()
    }

    /// True if a diagnostic at `level` has a message containing `needle`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.entries
            .borrow()
            .iter()
            .any(|d| d.level == level && d.message.contains(needle))
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
    }
}

impl Diagnostics for CollectingDiagnostics {
    fn emit(&self, diagnostic: Diagnostic) {
        self.entries.borrow_mut().push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    fn test_collecting_records_in_order() {
        let sink = CollectingDiagnostics::new();
        sink.emit(Diagnostic::warn("first"));
        sink.emit(Diagnostic::error("second").with_file("a.yaml"));

        let entries = sink.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].message, "first");
        assert_eq!(entries[1].file.as_deref(), Some("a.yaml"));
    }

    #[test]
    fn test_collecting_filters_by_level() {
        let sink = CollectingDiagnostics::new();
        sink.emit(Diagnostic::debug("noise"));
        sink.emit(Diagnostic::warn("careful"));
        sink.emit(Diagnostic::warn("again"));

        assert_eq!(sink.at_level(Level::Warn).len(), 2);
        assert!(sink.contains(Level::Warn, "care"));
        assert!(!sink.contains(Level::Error, "care"));
    }

    #[test]
    fn test_collecting_clear() {
        let sink = CollectingDiagnostics::new();
        sink.emit(Diagnostic::info("x"));
        assert!(!sink.is_empty());
        sink.clear();
        assert!(sink.is_empty());
    }

    #[test]
    fn test_reference_forwards() {
        let sink = CollectingDiagnostics::new();
        let by_ref: &dyn Diagnostics = &sink;
        (&by_ref).emit(Diagnostic::info("through a reference"));
        assert_eq!(sink.len(), 1);
    }

    #[test]
    fn test_display_includes_fields() {
        let d = Diagnostic::error("Scheme missing \"base0A\"")
            .with_file("ocean.yaml")
            .with_scheme("ocean");
        let text = d.to_string();
        assert!(text.starts_with("[error]"));
        assert!(text.contains("file=ocean.yaml"));
        assert!(text.contains("scheme=ocean"));
        assert!(text.ends_with("Scheme missing \"base0A\""));
    }

    #[test]
    fn test_level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Warn < Level::Error);
    }

    #[traced_test]
    #[test]
    fn test_tracing_sink_forwards_message_and_fields() {
        TracingDiagnostics.emit(
            Diagnostic::warn("Conflicting scheme")
                .with_file("dracula.yml")
                .with_scheme("dracula"),
        );

        assert!(logs_contain("Conflicting scheme"));
        assert!(logs_contain("dracula.yml"));
    }
}
