//! Per-request inputs and outputs of the decision core.
//!
//! # Data Flow
//! ```text
//! Host layer (axum request, proxy headers, listener port)
//!     → context.rs (RequestContext, secure-transport detection)
//!     → [pipeline decides]
//!     → action.rs (Action handed back to the host layer)
//! ```
//!
//! # Design Decisions
//! - Context is an explicit value, never read from ambient state
//! - Terminal decisions are plain values, the host layer performs the I/O

pub mod action;
pub mod context;

pub use action::Action;
pub use context::{detect_secure, RequestContext, HTTPS_PORT};
