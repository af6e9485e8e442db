//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route table integrity (key form, collisions, safe targets)
//! - Value ranges (timeouts > 0, redirect status, addresses)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::AppConfig;
use crate::routing::{ConfigurationError, RouteTable, Router};

/// Redirect status codes the chain may emit.
pub const REDIRECT_STATUSES: [u16; 5] = [301, 302, 303, 307, 308];

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("router: {0}")]
    Router(#[from] ConfigurationError),

    #[error("redirect_status {0} is not a redirect code")]
    RedirectStatus(u16),

    #[error("invalid {field} `{value}`")]
    Address { field: &'static str, value: String },

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroTimeout,

    #[error("log_level `{0}` is not one of trace, debug, info, warn, error")]
    LogLevel(String),

    #[error("listener.secure_header must not be empty")]
    EmptySecureHeader,
}

/// Validate a parsed configuration, collecting every problem found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors: Vec<ValidationError> = Vec::new();

    match RouteTable::from_entries(config.router.routes.clone()) {
        Ok(table) => {
            if let Err(e) = Router::new(
                table,
                config.router.root_path.clone(),
                &config.router.home_subfolder,
            ) {
                errors.push(e.into());
            }
        }
        Err(e) => errors.push(e.into()),
    }

    if !REDIRECT_STATUSES.contains(&config.redirect.redirect_status) {
        errors.push(ValidationError::RedirectStatus(config.redirect.redirect_status));
    }

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::Address {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    if config.listener.secure_header.trim().is_empty() {
        errors.push(ValidationError::EmptySecureHeader);
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::Address {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !["trace", "debug", "info", "warn", "error"].contains(&level.as_str()) {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&AppConfig::default()), Ok(()));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = AppConfig::default();
        config.redirect.redirect_status = 200;
        config.listener.bind_address = "not-an-address".into();
        config.timeouts.request_secs = 0;
        config.observability.log_level = "loud".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::RedirectStatus(200)));
        assert!(errors.contains(&ValidationError::ZeroTimeout));
    }

    #[test]
    fn test_route_errors_are_wrapped() {
        let mut config = AppConfig::default();
        config.router.routes.insert("/a/".into(), "../../etc/passwd".into());

        let errors = validate_config(&config).unwrap_err();
        assert!(matches!(
            errors.as_slice(),
            [ValidationError::Router(ConfigurationError::UnsafeTarget { .. })]
        ));
    }

    #[test]
    fn test_subfolder_error() {
        let mut config = AppConfig::default();
        config.router.home_subfolder = "shop".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![ValidationError::Router(ConfigurationError::InvalidHomeSubfolder(
                "shop".into()
            ))]
        );
    }

    #[test]
    fn test_metrics_address_only_checked_when_enabled() {
        let mut config = AppConfig::default();
        config.observability.metrics_address = "nowhere".into();
        assert!(validate_config(&config).is_ok());

        config.observability.metrics_enabled = true;
        assert!(validate_config(&config).is_err());
    }
}
