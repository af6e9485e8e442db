//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::BTreeMap;
use std::path::PathBuf;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::redirect::RedirectConfig;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Route table and mount point.
    pub router: RouterSettings,

    /// Canonicalization preferences.
    pub redirect: RedirectSettings,

    /// Logging and metrics.
    pub observability: ObservabilityConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Request header forwarded by a TLS-terminating proxy to mark secure
    /// requests. Values other than empty or `off` count as secure.
    pub secure_header: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            secure_header: "x-forwarded-ssl".to_string(),
        }
    }
}

/// Route table and the directory it resolves into.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RouterSettings {
    /// Absolute directory resolved files live under.
    pub root_path: PathBuf,

    /// Path prefix the application is mounted under. Empty for root.
    pub home_subfolder: String,

    /// Request path → file path relative to `root_path`.
    pub routes: BTreeMap<String, String>,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            root_path: PathBuf::from("/var/www"),
            home_subfolder: String::new(),
            routes: BTreeMap::new(),
        }
    }
}

/// Canonicalization preferences.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectSettings {
    /// Canonicalize toward `www.` (true) or away from it (false).
    pub prefer_www: bool,

    /// Redirect plain-HTTP requests to HTTPS.
    pub force_https: bool,

    /// Status code used for redirects (301, 302, 303, 307 or 308).
    pub redirect_status: u16,
}

impl Default for RedirectSettings {
    fn default() -> Self {
        Self {
            prefer_www: false,
            force_https: false,
            redirect_status: 301,
        }
    }
}

impl From<&RedirectSettings> for RedirectConfig {
    fn from(settings: &RedirectSettings) -> Self {
        // Validation has already rejected anything that is not a redirect code
        let redirect_status = StatusCode::from_u16(settings.redirect_status)
            .unwrap_or(StatusCode::MOVED_PERMANENTLY);

        Self {
            prefer_www: settings.prefer_www,
            force_https: settings.force_https,
            redirect_status,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}
