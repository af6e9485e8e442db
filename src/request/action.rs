//! Terminal decisions produced by the pipeline.

use std::path::PathBuf;

use axum::http::StatusCode;

/// Outcome of one routing decision. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Serve the file at this absolute path.
    Resolved(PathBuf),
    /// No route matched.
    NotFound,
    /// Send the client elsewhere.
    Redirect { location: String, status: StatusCode },
    /// Refuse the request with a fixed body.
    Rejected { status: StatusCode, body: String },
}

impl Action {
    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Resolved(_) => "resolved",
            Action::NotFound => "not_found",
            Action::Redirect { .. } => "redirect",
            Action::Rejected { .. } => "rejected",
        }
    }

    /// Status code the host layer is expected to answer with.
    pub fn status(&self) -> StatusCode {
        match self {
            Action::Resolved(_) => StatusCode::OK,
            Action::NotFound => StatusCode::NOT_FOUND,
            Action::Redirect { status, .. } => *status,
            Action::Rejected { status, .. } => *status,
        }
    }

    pub fn is_redirect(&self) -> bool {
        matches!(self, Action::Redirect { .. })
    }

    /// Redirect target, if this is a redirect.
    pub fn location(&self) -> Option<&str> {
        match self {
            Action::Redirect { location, .. } => Some(location),
            _ => None,
        }
    }
}
