//! Pre-routing layer for a web front controller.
//!
//! Every request first passes an ordered canonicalization chain (script
//! block, trailing slash, host form, HTTPS), then an exact-match route
//! table that maps paths to files under a root directory. Decisions are
//! plain [`Action`] values; the [`http`] module is one host layer that
//! turns them into responses.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod pipeline;
pub mod redirect;
pub mod request;
pub mod routing;

pub use config::AppConfig;
pub use pipeline::{Pipeline, PipelineError};
pub use redirect::{RedirectConfig, RedirectError, Redirector};
pub use request::{Action, RequestContext};
pub use routing::{ConfigurationError, RouteTable, Router};
