//! Batch loading of every scheme in a store.
//!
//! [`SchemeLoader`] enumerates a [`SchemeStore`] with a glob, parses each
//! matching entry and collects the valid schemes. A bad entry never stops
//! the batch:
//!
//! | Situation | Outcome |
//! |-----------|---------|
//! | Entry cannot be read | error logged, entry skipped |
//! | Entry fails to parse or validate | error logged, entry skipped |
//! | Two entries share a slug | warning logged, later entry replaces earlier |
//! | Store cannot be enumerated | whole load fails with [`StoreError`] |
//!
//! Entries that do not match the glob are never read and never logged.
//!
//! # Example
//!
//! ```rust,ignore
//! use base16_schemes::{DirStore, SchemeLoader, TracingDiagnostics};
//!
//! let schemes = SchemeLoader::new().load(&DirStore::new("./schemes"), &TracingDiagnostics)?;
//! for scheme in &schemes {
//!     let ctx = scheme.render_context();
//!     // hand ctx to a template engine
//! }
//! ```

use std::collections::HashMap;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::StoreError;
use crate::scheme::{parse_scheme, Scheme};
use crate::store::SchemeStore;

/// Default enumeration pattern, matching both `.yaml` and `.yml`.
pub const SCHEME_GLOB: &str = "*.y*";

/// Loads every valid scheme from `store` using [`SCHEME_GLOB`].
///
/// The returned order is unspecified.
///
/// # Errors
///
/// Returns an error only if the store cannot be enumerated.
pub fn load_schemes(
    store: &dyn SchemeStore,
    diagnostics: &dyn Diagnostics,
) -> Result<Vec<Scheme>, StoreError> {
    SchemeLoader::new().load(store, diagnostics)
}

/// Configurable scheme batch loader.
#[derive(Debug, Clone)]
pub struct SchemeLoader {
    pattern: String,
}

impl Default for SchemeLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemeLoader {
    /// Creates a loader using [`SCHEME_GLOB`].
    pub fn new() -> Self {
        Self {
            pattern: SCHEME_GLOB.to_string(),
        }
    }

    /// Overrides the enumeration pattern.
    ///
    /// The pattern is not checked until [`load`](Self::load); a malformed
    /// one makes the load fail.
    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = pattern.into();
        self
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Loads every valid scheme from `store`.
    ///
    /// Slugs are unique in the result. When two entries produce the same
    /// slug, the one enumerated later wins. The returned order is
    /// unspecified.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be enumerated.
    pub fn load(
        &self,
        store: &dyn SchemeStore,
        diagnostics: &dyn Diagnostics,
    ) -> Result<Vec<Scheme>, StoreError> {
        let names = store.glob(&self.pattern).map_err(|e| {
            diagnostics.emit(Diagnostic::error(e.to_string()));
            e
        })?;

        let mut schemes: HashMap<String, Scheme> = HashMap::new();
        let mut rejected = 0usize;

        for name in &names {
            let raw = match store.read(name) {
                Ok(raw) => raw,
                Err(e) => {
                    diagnostics.emit(Diagnostic::error(e.to_string()).with_file(name.as_str()));
                    rejected += 1;
                    continue;
                }
            };

            let scheme = match parse_scheme(name, &raw, diagnostics) {
                Ok(scheme) => scheme,
                Err(_) => {
                    diagnostics.emit(
                        Diagnostic::error("Failed to load scheme").with_file(name.as_str()),
                    );
                    rejected += 1;
                    continue;
                }
            };

            if let Some(previous) = schemes.get(scheme.slug()) {
                diagnostics.emit(
                    Diagnostic::warn(format!(
                        "Conflicting scheme: {} replaces {}",
                        scheme.source(),
                        previous.source()
                    ))
                    .with_file(name.as_str())
                    .with_scheme(scheme.slug()),
                );
            }

            diagnostics.emit(
                Diagnostic::debug(format!("Found scheme {:?}", scheme.slug()))
                    .with_file(name.as_str())
                    .with_scheme(scheme.slug()),
            );

            schemes.insert(scheme.slug().to_string(), scheme);
        }

        diagnostics.emit(Diagnostic::info(format!(
            "Loaded {} schemes ({} rejected)",
            schemes.len(),
            rejected
        )));

        Ok(schemes.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{CollectingDiagnostics, Level};
    use crate::scheme::BASE_KEYS;
    use crate::store::MemoryStore;

    fn scheme_yaml(name: &str) -> String {
        let mut yaml = format!("scheme: \"{name}\"\nauthor: \"Tester\"\n");
        for key in BASE_KEYS {
            yaml.push_str(&format!("{key}: \"808080\"\n"));
        }
        yaml
    }

    #[test]
    fn test_loader_defaults() {
        assert_eq!(SchemeLoader::new().pattern(), SCHEME_GLOB);
        assert_eq!(SchemeLoader::default().pattern(), "*.y*");
        assert_eq!(
            SchemeLoader::new().with_pattern("*.yaml").pattern(),
            "*.yaml"
        );
    }

    #[test]
    fn test_load_valid_and_skip_invalid() {
        let mut store = MemoryStore::new();
        store.insert("good.yaml", scheme_yaml("Good"));
        store.insert("bad.yaml", "scheme: Bad\nauthor: X\n");

        let diagnostics = CollectingDiagnostics::new();
        let schemes = load_schemes(&store, &diagnostics).unwrap();

        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes[0].slug(), "good");
        assert!(diagnostics.contains(Level::Error, "Failed to load scheme"));
        assert!(diagnostics.contains(Level::Info, "Loaded 1 schemes (1 rejected)"));
    }

    #[test]
    fn test_found_scheme_logged_at_debug() {
        let mut store = MemoryStore::new();
        store.insert("good.yaml", scheme_yaml("Good"));

        let diagnostics = CollectingDiagnostics::new();
        load_schemes(&store, &diagnostics).unwrap();

        let debug = diagnostics.at_level(Level::Debug);
        assert_eq!(debug.len(), 1);
        assert_eq!(debug[0].message, "Found scheme \"good\"");
        assert_eq!(debug[0].scheme.as_deref(), Some("good"));
    }

    #[test]
    fn test_collision_later_entry_wins() {
        let mut store = MemoryStore::new();
        store.insert("dracula.yaml", scheme_yaml("First"));
        store.insert("dracula.yml", scheme_yaml("Second"));

        let diagnostics = CollectingDiagnostics::new();
        let schemes = load_schemes(&store, &diagnostics).unwrap();

        assert_eq!(schemes.len(), 1);
        // MemoryStore enumerates in insertion order.
        assert_eq!(schemes[0].name(), "Second");

        let warnings = diagnostics.at_level(Level::Warn);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("dracula.yml replaces dracula.yaml"));
        assert_eq!(warnings[0].scheme.as_deref(), Some("dracula"));
    }

    #[test]
    fn test_invalid_pattern_fails_load() {
        let store = MemoryStore::from_entries(&[("a.yaml", "")]);
        let diagnostics = CollectingDiagnostics::new();

        let result = SchemeLoader::new()
            .with_pattern("[")
            .load(&store, &diagnostics);

        assert!(matches!(result, Err(StoreError::InvalidPattern(_))));
        assert!(diagnostics.contains(Level::Error, "Invalid glob pattern"));
    }

    #[test]
    fn test_empty_store() {
        let diagnostics = CollectingDiagnostics::new();
        let schemes = load_schemes(&MemoryStore::new(), &diagnostics).unwrap();
        assert!(schemes.is_empty());
        assert!(diagnostics.contains(Level::Info, "Loaded 0 schemes"));
    }
}
