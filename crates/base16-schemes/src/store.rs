//! Read-only sources of scheme files.
//!
//! Loading never touches the filesystem directly. It goes through a
//! [`SchemeStore`], which can enumerate entry names by glob and read an
//! entry's bytes. Two stores are provided:
//!
//! - [`DirStore`]: the regular files directly inside a directory
//! - [`MemoryStore`]: named in-memory entries, typically schemes bundled
//!   with `include_str!`
//!
//! # Example
//!
//! ```rust
//! use base16_schemes::{MemoryStore, SchemeStore};
//!
//! let store = MemoryStore::from_entries(&[
//!     ("ocean.yaml", "scheme: Ocean"),
//!     ("notes.txt", "not a scheme"),
//! ]);
//!
//! assert_eq!(store.glob("*.y*").unwrap(), vec!["ocean.yaml".to_string()]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::glob::Pattern;

/// A read-only collection of named scheme sources.
pub trait SchemeStore {
    /// Returns the names of entries matching `pattern`.
    ///
    /// # Errors
    ///
    /// Fails if the pattern is malformed or the store cannot be listed.
    fn glob(&self, pattern: &str) -> Result<Vec<String>, StoreError>;

    /// Reads the full contents of the entry `name`.
    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError>;
}

impl<S: SchemeStore + ?Sized> SchemeStore for &S {
    fn glob(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        (**self).glob(pattern)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        (**self).read(name)
    }
}

/// A store backed by one filesystem directory.
///
/// Only the directory's immediate regular files are visible. Entry names are
/// file names relative to the root, and `glob` returns them sorted.
#[derive(Debug, Clone)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl SchemeStore for DirStore {
    fn glob(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let pattern = Pattern::new(pattern)?;
        let list_error = |source| StoreError::List {
            path: self.root.clone(),
            source,
        };

        let mut names = Vec::new();
        for entry in fs::read_dir(&self.root).map_err(list_error)? {
            let entry = entry.map_err(list_error)?;
            let is_file = entry
                .file_type()
                .map(|t| t.is_file())
                .map_err(list_error)?;
            if !is_file {
                continue;
            }

            // Names that are not valid UTF-8 cannot be matched or reported.
            if let Some(name) = entry.file_name().to_str() {
                if pattern.matches(name) {
                    names.push(name.to_string());
                }
            }
        }

        names.sort();
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        fs::read(self.root.join(name)).map_err(|source| StoreError::Read {
            name: name.to_string(),
            source,
        })
    }
}

/// An in-memory store. Enumeration follows insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store from `(name, content)` pairs.
    ///
    /// Names may contain `/` to model nested paths; such entries are not
    /// matched by patterns without a `/`.
    pub fn from_entries(entries: &[(&str, &str)]) -> Self {
        let mut store = Self::new();
        for (name, content) in entries {
            store.insert(*name, content.as_bytes().to_vec());
        }
        store
    }

    /// Adds an entry, replacing the contents of an existing entry with the
    /// same name in place.
    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        let name = name.into();
        let content = content.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = content,
            None => self.entries.push((name, content)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SchemeStore for MemoryStore {
    fn glob(&self, pattern: &str) -> Result<Vec<String>, StoreError> {
        let pattern = Pattern::new(pattern)?;
        Ok(self
            .entries
            .iter()
            .filter(|(name, _)| pattern.matches(name))
            .map(|(name, _)| name.clone())
            .collect())
    }

    fn read(&self, name: &str) -> Result<Vec<u8>, StoreError> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| StoreError::NotFound(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store_glob_in_insertion_order() {
        let store = MemoryStore::from_entries(&[
            ("zenburn.yml", ""),
            ("atelier.yaml", ""),
            ("palette.json", ""),
        ]);

        assert_eq!(
            store.glob("*.y*").unwrap(),
            vec!["zenburn.yml".to_string(), "atelier.yaml".to_string()]
        );
    }

    #[test]
    fn test_memory_store_nested_names_not_matched() {
        let store = MemoryStore::from_entries(&[("themes/ocean.yaml", "")]);
        assert!(store.glob("*.y*").unwrap().is_empty());
        assert_eq!(store.glob("themes/*.y*").unwrap().len(), 1);
    }

    #[test]
    fn test_memory_store_read() {
        let store = MemoryStore::from_entries(&[("a.yaml", "scheme: A")]);
        assert_eq!(store.read("a.yaml").unwrap(), b"scheme: A".to_vec());
        assert!(matches!(
            store.read("missing.yaml"),
            Err(StoreError::NotFound(_))
        ));
    }

    #[test]
    fn test_memory_store_insert_replaces() {
        let mut store = MemoryStore::new();
        store.insert("a.yaml", "one");
        store.insert("b.yaml", "two");
        store.insert("a.yaml", "three");

        assert_eq!(store.len(), 2);
        assert_eq!(store.read("a.yaml").unwrap(), b"three".to_vec());
        assert_eq!(store.glob("*").unwrap(), vec!["a.yaml", "b.yaml"]);
    }

    #[test]
    fn test_memory_store_invalid_pattern() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(matches!(
            store.glob("[*.yaml"),
            Err(StoreError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_dir_store_glob_sorted_files_only() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("tomorrow.yaml"), "").unwrap();
        fs::write(temp_dir.path().join("dracula.yml"), "").unwrap();
        fs::write(temp_dir.path().join("readme.md"), "").unwrap();
        fs::create_dir(temp_dir.path().join("nested.yaml")).unwrap();

        let store = DirStore::new(temp_dir.path());
        assert_eq!(
            store.glob("*.y*").unwrap(),
            vec!["dracula.yml".to_string(), "tomorrow.yaml".to_string()]
        );
    }

    #[test]
    fn test_dir_store_read() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("a.yaml"), "scheme: A").unwrap();

        let store = DirStore::new(temp_dir.path());
        assert_eq!(store.root(), temp_dir.path());
        assert_eq!(store.read("a.yaml").unwrap(), b"scheme: A".to_vec());
        assert!(matches!(
            store.read("b.yaml"),
            Err(StoreError::Read { .. })
        ));
    }

    #[test]
    fn test_dir_store_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirStore::new(temp_dir.path().join("does-not-exist"));
        assert!(matches!(store.glob("*.y*"), Err(StoreError::List { .. })));
    }

    #[test]
    fn test_dir_store_invalid_pattern_checked_first() {
        let temp_dir = TempDir::new().unwrap();
        let store = DirStore::new(temp_dir.path().join("does-not-exist"));
        assert!(matches!(
            store.glob("[z-a]"),
            Err(StoreError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_store_by_reference() {
        let store = MemoryStore::from_entries(&[("a.yaml", "")]);
        let by_ref = &store;
        assert_eq!(SchemeStore::glob(&by_ref, "*").unwrap().len(), 1);
    }
}
