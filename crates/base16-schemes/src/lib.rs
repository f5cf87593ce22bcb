//! # Base16 Schemes - Scheme Loading for Theme Builders
//!
//! `base16-schemes` reads a directory of base16 color scheme files, one
//! theme per file, and turns each into a flat key/value context that a
//! template engine can use to write theme files for other applications.
//!
//! The crate stops at the context. Rendering templates, parsing command
//! lines and writing output files are left to the caller.
//!
//! ## Core Concepts
//!
//! - [`Scheme`]: one validated theme, with metadata and the sixteen colors
//!   `base00`..`base0F`
//! - [`parse_scheme`]: parse and validate a single source
//! - [`load_schemes`] / [`SchemeLoader`]: load every scheme in a store,
//!   skipping (and reporting) the ones that fail
//! - [`SchemeStore`]: where sources come from ([`DirStore`], [`MemoryStore`])
//! - [`Diagnostics`]: where problems are reported ([`TracingDiagnostics`],
//!   [`CollectingDiagnostics`])
//! - [`Scheme::render_context`]: the 149-key template context
//!
//! ## Quick Start
//!
//! ```rust
//! use base16_schemes::{load_schemes, CollectingDiagnostics, MemoryStore, BASE_KEYS};
//!
//! let mut yaml = String::from("scheme: \"Ocean\"\nauthor: \"Someone\"\n");
//! for key in BASE_KEYS {
//!     yaml.push_str(&format!("{key}: \"2b303b\"\n"));
//! }
//!
//! let mut store = MemoryStore::new();
//! store.insert("ocean-dark.yaml", yaml);
//!
//! let diagnostics = CollectingDiagnostics::new();
//! let schemes = load_schemes(&store, &diagnostics).unwrap();
//!
//! let ctx = schemes[0].render_context();
//! assert_eq!(ctx["scheme-slug-underscored"].as_str(), Some("ocean_dark"));
//! assert_eq!(ctx["base00-hex-bgr"].as_str(), Some("3b302b"));
//! ```

pub mod color;
pub mod diagnostics;
mod error;
pub mod glob;
pub mod registry;
pub mod scheme;
pub mod store;

// Error types
pub use error::{SchemeError, StoreError, ValidationProblem};

pub use color::{Color, ColorError};

pub use diagnostics::{
    CollectingDiagnostics, Diagnostic, Diagnostics, Level, TracingDiagnostics,
};

pub use glob::{Pattern, PatternError};

pub use scheme::{
    derive_slug, parse_scheme, scheme_extension, RenderContext, Scheme, BASE_KEYS,
    SCHEME_EXTENSIONS,
};

pub use registry::{load_schemes, SchemeLoader, SCHEME_GLOB};

pub use store::{DirStore, MemoryStore, SchemeStore};
