//! Route lookup.
//!
//! # Responsibilities
//! - Strip the home subfolder the application is mounted under
//! - Normalize the path to the table's key form
//! - Return the resolved file or an explicit NotFound
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Subfolder is advisory: paths outside it are looked up unchanged
//! - Subfolder only matches on a segment boundary (`/shop` never eats `/shopping`)

use std::path::{Path, PathBuf};

use crate::request::{Action, RequestContext};
use crate::routing::table::{ConfigurationError, RouteTable};

/// Maps request paths to files under a root directory.
#[derive(Debug, Clone)]
pub struct Router {
    table: RouteTable,
    root_path: PathBuf,
    home_subfolder: String,
}

impl Router {
    /// Create a router. `home_subfolder` may be empty (mounted at root).
    pub fn new(
        table: RouteTable,
        root_path: impl Into<PathBuf>,
        home_subfolder: &str,
    ) -> Result<Self, ConfigurationError> {
        let root_path = root_path.into();
        if !root_path.is_absolute() {
            return Err(ConfigurationError::RootNotAbsolute(
                root_path.display().to_string(),
            ));
        }

        Ok(Self {
            table,
            root_path,
            home_subfolder: normalize_subfolder(home_subfolder)?,
        })
    }

    /// Resolve `request_path` to a file. The context is accepted for parity
    /// with the redirect checks; lookup depends on the path alone.
    pub fn resolve(&self, request_path: &str, _ctx: &RequestContext) -> Action {
        let key = self.lookup_key(request_path);

        match self.table.get(&key) {
            Some(target) => Action::Resolved(self.root_path.join(target)),
            None => Action::NotFound,
        }
    }

    /// Normalized key `request_path` is looked up under.
    pub fn lookup_key(&self, request_path: &str) -> String {
        let stripped = self.strip_subfolder(request_path);

        if stripped.is_empty() {
            "/".to_string()
        } else if stripped.ends_with('/') {
            stripped.to_string()
        } else {
            format!("{}/", stripped)
        }
    }

    fn strip_subfolder<'a>(&self, path: &'a str) -> &'a str {
        if self.home_subfolder.is_empty() {
            return path;
        }

        match path.strip_prefix(self.home_subfolder.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn home_subfolder(&self) -> &str {
        &self.home_subfolder
    }

    pub fn table(&self) -> &RouteTable {
        &self.table
    }
}

/// Trim trailing slashes. `""` and `"/"` both mean "mounted at root".
fn normalize_subfolder(subfolder: &str) -> Result<String, ConfigurationError> {
    let trimmed = subfolder.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Ok(String::new());
    }
    if !trimmed.starts_with('/') {
        return Err(ConfigurationError::InvalidHomeSubfolder(
            subfolder.to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
