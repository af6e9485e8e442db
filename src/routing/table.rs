//! Route table construction and lookup.
//!
//! # Responsibilities
//! - Normalize route keys so every key begins and ends with `/`
//! - Reject entries that cannot be served safely
//! - O(1) exact lookup by normalized path
//!
//! # Normalization Policy
//! - A key without a trailing `/` gets one appended
//! - A key without a leading `/` is rejected
//! - Keys that collide after normalization are rejected
//! - Targets must be relative and free of `..` segments

use std::collections::HashMap;
use std::path::{Component, Path};

use thiserror::Error;

/// Error raised while building the router from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("route key `{0}` must start with `/`")]
    KeyNotAbsolute(String),

    #[error("route keys `{first}` and `{second}` both normalize to `{normalized}`")]
    DuplicateKey {
        first: String,
        second: String,
        normalized: String,
    },

    #[error("route `{key}` has an empty target")]
    EmptyTarget { key: String },

    #[error("route `{key}` target `{target}` must be a relative path without `..`")]
    UnsafeTarget { key: String, target: String },

    #[error("root path `{0}` must be absolute")]
    RootNotAbsolute(String),

    #[error("home subfolder `{0}` must be empty or start with `/`")]
    InvalidHomeSubfolder(String),
}

/// Immutable mapping from normalized request path to relative resource path.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    entries: HashMap<String, String>,
}

impl RouteTable {
    /// Build a table from raw `(path, target)` pairs.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, ConfigurationError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut table: HashMap<String, String> = HashMap::new();
        // normalized key -> key as written, for collision reports
        let mut origins: HashMap<String, String> = HashMap::new();

        for (key, target) in entries {
            let key = key.into();
            let target = target.into();

            let normalized = normalize_key(&key)?;
            validate_target(&key, &target)?;

            if let Some(first) = origins.get(&normalized) {
                return Err(ConfigurationError::DuplicateKey {
                    first: first.clone(),
                    second: key,
                    normalized,
                });
            }

            origins.insert(normalized.clone(), key);
            table.insert(normalized, target);
        }

        Ok(Self { entries: table })
    }

    /// Exact lookup. `path` must already be normalized.
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(normalized key, target)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Returns true if `key` begins and ends with `/`.
pub fn is_normalized(key: &str) -> bool {
    key.starts_with('/') && key.ends_with('/')
}

/// Append a trailing slash when missing. A leading slash is required.
pub fn normalize_key(key: &str) -> Result<String, ConfigurationError> {
    if !key.starts_with('/') {
        return Err(ConfigurationError::KeyNotAbsolute(key.to_string()));
    }

    if key.ends_with('/') {
        Ok(key.to_string())
    } else {
        Ok(format!("{}/", key))
    }
}

fn validate_target(key: &str, target: &str) -> Result<(), ConfigurationError> {
    if target.trim().is_empty() {
        return Err(ConfigurationError::EmptyTarget {
            key: key.to_string(),
        });
    }

    let safe = Path::new(target)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));

    if !safe {
        return Err(ConfigurationError::UnsafeTarget {
            key: key.to_string(),
            target: target.to_string(),
        });
    }

    Ok(())
}
