//! Per-request orchestration of the redirect chain and the router.
//!
//! # Data Flow
//! ```text
//! RequestContext
//!     → redirect::Redirector (may halt with Redirect / Rejected)
//!     → routing::Router      (Resolved / NotFound)
//!     → Action
//! ```
//!
//! # Design Decisions
//! - Redirector always runs first; the router only sees canonical requests
//! - Shared via Arc; no mutable state, so no locking between requests

use thiserror::Error;

use crate::config::AppConfig;
use crate::redirect::{RedirectConfig, RedirectError, Redirector};
use crate::request::{Action, RequestContext};
use crate::routing::{ConfigurationError, RouteTable, Router};

/// Failure that prevented a decision from being made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Redirect(#[from] RedirectError),
}

/// The decision function a host layer calls once per request.
#[derive(Debug)]
pub struct Pipeline {
    redirector: Redirector,
    router: Router,
}

impl Pipeline {
    pub fn new(redirector: Redirector, router: Router) -> Self {
        Self { redirector, router }
    }

    /// Build the route table, router and redirector from loaded configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigurationError> {
        let table = RouteTable::from_entries(config.router.routes.clone())?;
        let router = Router::new(
            table,
            config.router.root_path.clone(),
            &config.router.home_subfolder,
        )?;
        let redirector = Redirector::new(RedirectConfig::from(&config.redirect));

        Ok(Self::new(redirector, router))
    }

    /// Decide what to do with one request.
    pub fn handle(&self, ctx: &RequestContext) -> Result<Action, PipelineError> {
        if let Some(action) = self.redirector.run(ctx)? {
            return Ok(action);
        }

        let action = self.router.resolve(&ctx.path, ctx);
        tracing::debug!(path = %ctx.path, action = action.kind(), "Route resolved");
        Ok(action)
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn redirector(&self) -> &Redirector {
        &self.redirector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn pipeline() -> Pipeline {
        let table = RouteTable::from_entries([("/x/", "x.html")]).unwrap();
        let router = Router::new(table, "/srv", "").unwrap();
        let redirector = Redirector::new(RedirectConfig {
            force_https: true,
            ..RedirectConfig::default()
        });
        Pipeline::new(redirector, router)
    }

    #[test]
    fn test_canonical_request_reaches_router() {
        let ctx = RequestContext::new("/x/")
            .with_host("example.com")
            .with_secure(true);
        assert_eq!(
            pipeline().handle(&ctx),
            Ok(Action::Resolved(PathBuf::from("/srv/x.html")))
        );
    }

    #[test]
    fn test_redirect_prevents_routing() {
        let ctx = RequestContext::new("/x/").with_host("example.com");
        let action = pipeline().handle(&ctx).unwrap();
        assert_eq!(action.location(), Some("https://example.com/x/"));
    }

    #[test]
    fn test_errors_propagate() {
        let ctx = RequestContext::new("/x/");
        assert_eq!(
            pipeline().handle(&ctx),
            Err(PipelineError::Redirect(RedirectError::MissingContextField("host")))
        );
    }
}
