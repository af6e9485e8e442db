//! Canonicalization subsystem.
//!
//! # Data Flow
//! ```text
//! RequestContext
//!     → checks.rs ScriptBlock      (…/x.php or …/x.php/  → Rejected 404)
//!     → checks.rs TrailingSlash    (/page               → /page/)
//!     → checks.rs HostForm         (www.host ↔ host)
//!     → checks.rs ForceHttps       (http://             → https://)
//!     → Continue: hand off to routing
//! ```
//!
//! # Design Decisions
//! - Order is fixed at construction; path form is settled before host form,
//!   host form before scheme, so one redirect never undoes another
//! - First terminal outcome wins, later checks never run
//! - Checks are pure: no I/O, no process exit, errors are typed values

pub mod checks;
pub mod redirector;

use thiserror::Error;

use crate::request::{Action, RequestContext};

pub use checks::{ForceHttps, HostForm, ScriptBlock, TrailingSlash};
pub use redirector::{RedirectConfig, Redirector};

/// Body sent with blocked script requests.
pub const SCRIPT_BLOCK_BODY: &str = "Silence is golden!";

/// Failure while evaluating a canonicalization check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RedirectError {
    #[error("request context is missing `{0}`")]
    MissingContextField(&'static str),

    #[error("host `{0}` has no name to redirect to")]
    MalformedHost(String),

    #[error("query string `{0}` cannot be carried into a redirect")]
    MalformedQuery(String),
}

/// Result of running one check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Fall through to the next check.
    Continue,
    /// Stop the chain with this action.
    Halt(Action),
}

/// One step of the canonicalization chain.
pub trait CanonicalCheck: Send + Sync + std::fmt::Debug {
    /// Name used in logs and metrics.
    fn name(&self) -> &'static str;

    /// Evaluate the check against a request.
    fn evaluate(&self, ctx: &RequestContext) -> Result<Outcome, RedirectError>;
}
