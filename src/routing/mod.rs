//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Route Compilation (at startup):
//!     [router.routes] from config
//!     → table.rs (normalize keys, validate targets)
//!     → Freeze as immutable Router (root path + home subfolder)
//!
//! Incoming Request (path only):
//!     → router.rs (strip home subfolder, append trailing slash)
//!     → table.rs (exact key lookup)
//!     → Return: Resolved(root + target) or NotFound
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Exact match only: no prefixes, no wildcards, no parameters
//! - Query string never participates in lookup
//! - Explicit NotFound rather than silent default

pub mod router;
pub mod table;

pub use router::Router;
pub use table::{ConfigurationError, RouteTable};
