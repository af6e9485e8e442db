//! HTTP host layer.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, graceful shutdown)
//!     → request.rs (request ID, build RequestContext)
//!     → pipeline::Pipeline (decide)
//!     → response.rs (Action → HTTP response, file serving)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{context_from_request, UuidRequestId, X_REQUEST_ID};
pub use response::{action_response, error_response};
pub use server::{HttpServer, ServerError};
