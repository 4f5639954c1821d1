//! Content lookup for artifact bodies.
//!
//! Bodies are static templates addressed by dotted keys such as
//! `ORDER.LTL.ACK` or `ASN.RECEIPT.ACK`. The production store is a
//! [`ContentCatalog`] loaded once at startup and shared read-only between
//! requests.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::constants::{DEFAULT_CONTENT, DEFAULT_CONTENT_KEY, LEGACY_KEY_SUFFIX};
use crate::enums::Format;

/// The catalog compiled into the binary.
pub const EMBEDDED_CATALOG: &str = include_str!("../content/response-content.toml");

// ============================================================================
// ERRORS
// ============================================================================

/// Content store errors.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("Failed to read content catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse content catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Content key '{key}' must hold a string")]
    InvalidValue { key: String },

    #[error("Content store unavailable while resolving '{key}': {reason}")]
    Unavailable { key: String, reason: String },
}

// ============================================================================
// CONTENT KEY
// ============================================================================

/// A composed lookup key with an optional format refinement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentKey {
    segments: Vec<String>,
    format: Option<Format>,
}

impl ContentKey {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            segments: segments
                .into_iter()
                .map(|s| s.as_ref().trim().to_uppercase())
                .collect(),
            format: None,
        }
    }

    pub fn with_format(mut self, format: Option<Format>) -> Self {
        self.format = format;
        self
    }

    /// The dotted base key, e.g. `ORDER.LTL.ACK`.
    pub fn base(&self) -> String {
        self.segments.join(".")
    }

    /// Keys to try, most specific first: `<base>.<FORMAT>` then `<base>`.
    pub fn candidates(&self) -> Vec<String> {
        let base = self.base();
        match self.format {
            Some(format) => vec![format!("{}.{}", base, format.as_str()), base],
            None => vec![base],
        }
    }
}

impl std::fmt::Display for ContentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.base())?;
        if let Some(format) = self.format {
            write!(f, " ({})", format)?;
        }
        Ok(())
    }
}

// ============================================================================
// RESOLVER TRAIT
// ============================================================================

/// Read-only key to content lookup.
///
/// `lookup` distinguishes an absent key (`Ok(None)`) from a store fault
/// (`Err`). Absence always falls back; faults only fall back through
/// [`resolve`](ContentResolver::resolve).
pub trait ContentResolver: Send + Sync {
    fn lookup(&self, key: &str) -> Result<Option<String>, ContentError>;

    /// Content served when nothing else matches.
    fn default_content(&self) -> String {
        DEFAULT_CONTENT.to_string()
    }

    /// Infallible lookup: the key, else `DEFAULT`, else the built-in default.
    fn resolve(&self, key: &str) -> String {
        for candidate in [key, DEFAULT_CONTENT_KEY] {
            match self.lookup(candidate) {
                Ok(Some(content)) => return content,
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(key = candidate, error = %e, "Content lookup failed, using default");
                    break;
                }
            }
        }
        self.default_content()
    }

    /// Resolve a composed key, falling back to `DEFAULT` and then the
    /// built-in default. Store faults are returned to the caller.
    fn resolve_key(&self, key: &ContentKey) -> Result<String, ContentError> {
        self.resolve_first(std::slice::from_ref(key))
    }

    /// Like [`resolve_key`](ContentResolver::resolve_key), trying several
    /// keys in order before falling back.
    fn resolve_first(&self, keys: &[ContentKey]) -> Result<String, ContentError> {
        for candidate in keys.iter().flat_map(ContentKey::candidates) {
            if let Some(content) = self.lookup(&candidate)? {
                return Ok(content);
            }
        }
        match self.lookup(DEFAULT_CONTENT_KEY)? {
            Some(content) => Ok(content),
            None => Ok(self.default_content()),
        }
    }

    /// Resolve a composed key with an explicit fallback instead of `DEFAULT`.
    fn resolve_key_or(&self, key: &ContentKey, fallback: &str) -> Result<String, ContentError> {
        for candidate in key.candidates() {
            if let Some(content) = self.lookup(&candidate)? {
                return Ok(content);
            }
        }
        Ok(fallback.to_string())
    }
}

// ============================================================================
// CONTENT CATALOG
// ============================================================================

/// Immutable catalog of content templates.
///
/// Loaded from TOML. Nested tables flatten into dotted keys, quoted dotted
/// keys are taken as-is, and a trailing `.content` (legacy property-file
/// naming) is stripped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentCatalog {
    entries: HashMap<String, String>,
}

impl ContentCatalog {
    /// The catalog compiled into the binary.
    pub fn embedded() -> Result<Self, ContentError> {
        Self::from_toml_str(EMBEDDED_CATALOG)
    }

    pub fn from_toml_str(source: &str) -> Result<Self, ContentError> {
        let table: toml::Table = toml::from_str(source)?;
        let mut entries = HashMap::new();
        flatten_into(&mut entries, None, &table)?;
        Ok(Self { entries })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_toml_str(&source)?;
        tracing::info!(path = %path.display(), entries = catalog.len(), "Loaded content catalog");
        Ok(catalog)
    }

    /// Load from `path` when given, otherwise the embedded catalog.
    pub fn load(path: Option<&Path>) -> Result<Self, ContentError> {
        match path {
            Some(path) => Self::from_path(path),
            None => Self::embedded(),
        }
    }

    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|(k, v)| (normalize_key(&k.into()), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl ContentResolver for ContentCatalog {
    fn lookup(&self, key: &str) -> Result<Option<String>, ContentError> {
        Ok(self.entries.get(key).cloned())
    }
}

fn normalize_key(key: &str) -> String {
    let key = key.trim();
    let key = key.strip_suffix(LEGACY_KEY_SUFFIX).unwrap_or(key);
    key.to_uppercase()
}

fn flatten_into(
    entries: &mut HashMap<String, String>,
    prefix: Option<&str>,
    table: &toml::Table,
) -> Result<(), ContentError> {
    for (key, value) in table {
        let full_key = match prefix {
            Some(prefix) => format!("{}.{}", prefix, key),
            None => key.clone(),
        };
        match value {
            toml::Value::String(content) => {
                entries.insert(normalize_key(&full_key), content.clone());
            }
            toml::Value::Table(nested) => flatten_into(entries, Some(&full_key), nested)?,
            _ => return Err(ContentError::InvalidValue { key: full_key }),
        }
    }
    Ok(())
}
