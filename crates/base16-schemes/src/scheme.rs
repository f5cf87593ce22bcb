//! Scheme records: parsing, validation and render contexts.
//!
//! A scheme file is a flat YAML mapping with three metadata fields and the
//! sixteen palette slots:
//!
//! ```yaml
//! scheme: "Tomorrow Night"
//! author: "Chris Kempson"
//! description: "optional, defaults to the scheme name"
//! base00: "1d1f21"
//! base01: "282a2e"
//! # ... through base0F
//! ```
//!
//! # Parsing
//!
//! Parsing runs in two phases. The document is first read as a mapping of
//! keys to raw scalar text; `scheme`, `author` and `description` are then
//! taken out by name and every remaining key is parsed as a color. Reading
//! raw text means an unquoted `000000` stays six digits instead of becoming
//! the integer zero.
//!
//! Validation does not stop at the first problem. An empty name, a wrong
//! color count and each missing `baseNN` key are all reported before the
//! scheme is rejected.
//!
//! # Render Context
//!
//! [`Scheme::render_context`] flattens a scheme into the keys a template
//! renderer consumes:
//!
//! | Key | Value |
//! |-----|-------|
//! | `scheme-name`, `scheme-author`, `scheme-slug`, `scheme-description` | metadata |
//! | `scheme-slug-underscored` | slug with `-` replaced by `_` |
//! | `baseNN-hex` / `baseNN-hex-bgr` | `rrggbb` / `bbggrr` |
//! | `baseNN-rgb-{r,g,b}` | integer channel, 0-255 |
//! | `baseNN-dec-{r,g,b}` | channel / 255 |
//! | `baseNN-hex-{r,g,b}` | two hex digits per channel |

use std::collections::BTreeMap;

use minijinja::Value;

use crate::color::Color;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{SchemeError, ValidationProblem};

/// Recognized scheme file extensions in priority order.
pub const SCHEME_EXTENSIONS: &[&str] = &[".yaml", ".yml"];

/// The sixteen canonical palette slots.
pub const BASE_KEYS: [&str; 16] = [
    "base00", "base01", "base02", "base03", "base04", "base05", "base06", "base07", "base08",
    "base09", "base0A", "base0B", "base0C", "base0D", "base0E", "base0F",
];

const NAME_KEY: &str = "scheme";
const AUTHOR_KEY: &str = "author";
const DESCRIPTION_KEY: &str = "description";

/// Flat, string-keyed template context built from a scheme.
pub type RenderContext = BTreeMap<String, Value>;

/// A color scheme parsed from a single source.
///
/// Schemes returned by [`parse_scheme`] as `Ok` are complete: the name is
/// set and all of [`BASE_KEYS`] are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheme {
    slug: String,
    source: String,
    name: String,
    author: String,
    description: String,
    colors: BTreeMap<String, Color>,
}

impl Scheme {
    /// Identifier derived from the source file name.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Store entry this scheme was read from.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Every color entry from the source, including any extra keys.
    pub fn colors(&self) -> &BTreeMap<String, Color> {
        &self.colors
    }

    pub fn color(&self, key: &str) -> Option<Color> {
        self.colors.get(key).copied()
    }

    /// Builds the template context for this scheme.
    ///
    /// Always produces 149 keys for a valid scheme. A slot missing from an
    /// invalid scheme renders as black.
    pub fn render_context(&self) -> RenderContext {
        let mut ctx = RenderContext::new();

        ctx.insert("scheme-name".into(), Value::from(self.name.as_str()));
        ctx.insert("scheme-author".into(), Value::from(self.author.as_str()));
        ctx.insert("scheme-slug".into(), Value::from(self.slug.as_str()));
        ctx.insert(
            "scheme-description".into(),
            Value::from(self.description.as_str()),
        );
        ctx.insert(
            "scheme-slug-underscored".into(),
            Value::from(self.slug.replace('-', "_")),
        );

        for key in BASE_KEYS {
            let color = self.color(key).unwrap_or_default();
            let (dec_r, dec_g, dec_b) = color.dec();

            ctx.insert(format!("{key}-hex"), Value::from(color.hex()));
            ctx.insert(format!("{key}-hex-bgr"), Value::from(color.hex_bgr()));

            ctx.insert(format!("{key}-rgb-r"), Value::from(color.r()));
            ctx.insert(format!("{key}-rgb-g"), Value::from(color.g()));
            ctx.insert(format!("{key}-rgb-b"), Value::from(color.b()));

            ctx.insert(format!("{key}-dec-r"), Value::from(dec_r));
            ctx.insert(format!("{key}-dec-g"), Value::from(dec_g));
            ctx.insert(format!("{key}-dec-b"), Value::from(dec_b));

            ctx.insert(format!("{key}-hex-r"), Value::from(format!("{:02x}", color.r())));
            ctx.insert(format!("{key}-hex-g"), Value::from(format!("{:02x}", color.g())));
            ctx.insert(format!("{key}-hex-b"), Value::from(format!("{:02x}", color.b())));
        }

        ctx
    }
}

/// Returns the recognized extension `source_name` ends with, if any.
///
/// Matching is case-sensitive.
pub fn scheme_extension(source_name: &str) -> Option<&'static str> {
    SCHEME_EXTENSIONS
        .iter()
        .copied()
        .find(|ext| source_name.ends_with(ext))
}

/// Derives a slug: `extension` is removed, then the last `/`-separated
/// segment is kept.
///
/// Trailing separators are ignored, so `dir/.yaml` gives `dir`. A name that
/// is nothing but the extension gives `.`, and one that is only separators
/// gives `/`. The result is used verbatim, path-unsafe characters included.
pub fn derive_slug(source_name: &str, extension: &str) -> String {
    let stem = source_name.strip_suffix(extension).unwrap_or(source_name);
    if stem.is_empty() {
        return ".".to_string();
    }

    let trimmed = stem.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/".to_string();
    }

    trimmed.rsplit('/').next().unwrap_or(trimmed).to_string()
}

/// Parses and validates one scheme source.
///
/// Every problem is reported to `diagnostics`, tagged with the source name.
/// An empty author is only a warning.
///
/// # Errors
///
/// - [`SchemeError::UnsupportedFormat`] if the name is not `.yaml`/`.yml`
/// - [`SchemeError::Malformed`] if the document is not a flat mapping of
///   scalars, or a color entry is not six hex digits
/// - [`SchemeError::Invalid`] if the name is empty, there are not exactly
///   sixteen colors, or a canonical key is missing. The partially-built
///   scheme is carried in the error.
///
/// # Example
///
/// ```rust
/// use base16_schemes::{parse_scheme, CollectingDiagnostics};
///
/// let mut yaml = String::from("scheme: Demo\nauthor: Me\n");
/// for key in base16_schemes::BASE_KEYS {
///     yaml.push_str(&format!("{key}: \"336699\"\n"));
/// }
///
/// let diagnostics = CollectingDiagnostics::new();
/// let scheme = parse_scheme("themes/demo-dark.yaml", yaml.as_bytes(), &diagnostics).unwrap();
/// assert_eq!(scheme.slug(), "demo-dark");
/// assert_eq!(scheme.description(), "Demo");
/// ```
pub fn parse_scheme(
    source_name: &str,
    raw: &[u8],
    diagnostics: &dyn Diagnostics,
) -> Result<Scheme, SchemeError> {
    let report = |diagnostic: Diagnostic| diagnostics.emit(diagnostic.with_file(source_name));

    let Some(extension) = scheme_extension(source_name) else {
        report(Diagnostic::error("Only YAML files are supported"));
        return Err(SchemeError::UnsupportedFormat {
            name: source_name.to_string(),
        });
    };

    let mut document = match read_document(raw) {
        Ok(document) => document,
        Err(message) => {
            report(Diagnostic::error(message.clone()));
            return Err(SchemeError::Malformed {
                name: source_name.to_string(),
                message,
            });
        }
    };

    // A null metadata field reads the same as an absent or empty one.
    let name = document.remove(NAME_KEY).flatten().unwrap_or_default();
    let author = document.remove(AUTHOR_KEY).flatten().unwrap_or_default();
    let description = document
        .remove(DESCRIPTION_KEY)
        .flatten()
        .unwrap_or_default();

    let mut colors = BTreeMap::new();
    for (key, text) in document {
        // A null color has no digits and fails the length check.
        match Color::parse_hex(text.as_deref().unwrap_or_default()) {
            Ok(color) => {
                colors.insert(key, color);
            }
            Err(e) => {
                let message = format!("{}: {}", key, e);
                report(Diagnostic::error(message.clone()));
                return Err(SchemeError::Malformed {
                    name: source_name.to_string(),
                    message,
                });
            }
        }
    }

    let mut problems = Vec::new();

    if name.is_empty() {
        problems.push(ValidationProblem::EmptyName);
    }

    if author.is_empty() {
        report(Diagnostic::warn("Scheme author should not be empty"));
    }

    if colors.len() != BASE_KEYS.len() {
        problems.push(ValidationProblem::WrongColorCount {
            found: colors.len(),
        });
    }

    for key in BASE_KEYS {
        if !colors.contains_key(key) {
            problems.push(ValidationProblem::MissingColor(key.to_string()));
        }
    }

    let description = if description.is_empty() {
        name.clone()
    } else {
        description
    };

    let scheme = Scheme {
        slug: derive_slug(source_name, extension),
        source: source_name.to_string(),
        name,
        author,
        description,
        colors,
    };

    if problems.is_empty() {
        return Ok(scheme);
    }

    for problem in &problems {
        report(Diagnostic::error(problem.to_string()).with_scheme(scheme.slug()));
    }

    Err(SchemeError::Invalid {
        scheme: Box::new(scheme),
        problems,
    })
}

/// First phase: a mapping of top-level keys to raw scalar text.
///
/// A null value (`~`, `null` or nothing after the colon) reads as `None`
/// rather than the literal text. Nested mappings and sequences are rejected
/// here.
fn read_document(raw: &[u8]) -> Result<BTreeMap<String, Option<String>>, String> {
    serde_yaml::from_slice::<Option<BTreeMap<String, Option<String>>>>(raw)
        .map(Option::unwrap_or_default)
        .map_err(|e| e.to_string())
}
