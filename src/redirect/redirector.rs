//! Ordered, short-circuiting redirect chain.

use axum::http::StatusCode;

use crate::redirect::checks::{ForceHttps, HostForm, ScriptBlock, TrailingSlash};
use crate::redirect::{CanonicalCheck, Outcome, RedirectError};
use crate::request::{Action, RequestContext};

/// Canonicalization settings, fixed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RedirectConfig {
    /// true: canonicalize toward `www.`; false: away from it.
    pub prefer_www: bool,
    /// Redirect plain-HTTP requests to HTTPS.
    pub force_https: bool,
    /// Status code for every redirect the chain emits.
    pub redirect_status: StatusCode,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            prefer_www: false,
            force_https: false,
            redirect_status: StatusCode::MOVED_PERMANENTLY,
        }
    }
}

/// Runs the four canonicalization checks in their fixed order.
#[derive(Debug)]
pub struct Redirector {
    config: RedirectConfig,
    checks: Vec<Box<dyn CanonicalCheck>>,
}

impl Redirector {
    pub fn new(config: RedirectConfig) -> Self {
        let status = config.redirect_status;
        let checks: Vec<Box<dyn CanonicalCheck>> = vec![
            Box::new(ScriptBlock),
            Box::new(TrailingSlash::new(status)),
            Box::new(HostForm::new(config.prefer_www, status)),
            Box::new(ForceHttps::new(config.force_https, status)),
        ];

        Self { config, checks }
    }

    /// Run the chain. `Ok(None)` means every check passed.
    pub fn run(&self, ctx: &RequestContext) -> Result<Option<Action>, RedirectError> {
        for check in &self.checks {
            match check.evaluate(ctx)? {
                Outcome::Continue => continue,
                Outcome::Halt(action) => {
                    tracing::debug!(
                        check = check.name(),
                        action = action.kind(),
                        status = action.status().as_u16(),
                        "Canonicalization check fired"
                    );
                    return Ok(Some(action));
                }
            }
        }
        Ok(None)
    }

    /// Names of the checks in evaluation order.
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    pub fn config(&self) -> &RedirectConfig {
        &self.config
    }
}
