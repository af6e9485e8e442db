//! Response handling.
//!
//! # Responsibilities
//! - Turn a pipeline Action into an HTTP response
//! - Serve resolved files from disk
//! - Map pipeline errors to 400 Bad Request
//!
//! # Design Decisions
//! - Files are served through tower-http's ServeFile (range, HEAD, mime)
//! - A resolved file missing on disk is a plain 404

use axum::{
    body::Body,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;

use crate::pipeline::PipelineError;
use crate::request::Action;

/// Build the response for a decided request.
pub async fn action_response(action: Action, req: Request<Body>) -> Response {
    match action {
        Action::Resolved(path) => match ServeFile::new(&path).oneshot(req).await {
            Ok(res) => res.map(Body::new),
            Err(never) => match never {},
        },
        Action::NotFound => (StatusCode::NOT_FOUND, "Not Found").into_response(),
        Action::Redirect { location, status } => match HeaderValue::from_str(&location) {
            Ok(value) => (status, [(header::LOCATION, value)]).into_response(),
            Err(_) => {
                tracing::error!(location = %location, "Redirect location is not a valid header");
                StatusCode::INTERNAL_SERVER_ERROR.into_response()
            }
        },
        Action::Rejected { status, body } => (status, body).into_response(),
    }
}

/// Response for a request the pipeline could not decide.
pub fn error_response(err: &PipelineError) -> Response {
    (StatusCode::BAD_REQUEST, err.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::redirect::RedirectError;

    fn empty_request() -> Request<Body> {
        Request::builder().uri("/").body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_redirect_response() {
        let action = Action::Redirect {
            location: "/page/".into(),
            status: StatusCode::MOVED_PERMANENTLY,
        };
        let res = action_response(action, empty_request()).await;

        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[header::LOCATION], "/page/");
    }

    #[tokio::test]
    async fn test_rejected_response() {
        let action = Action::Rejected {
            status: StatusCode::NOT_FOUND,
            body: "Silence is golden!".into(),
        };
        let res = action_response(action, empty_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(res.into_body(), 1024).await.unwrap();
        assert_eq!(&body[..], b"Silence is golden!");
    }

    #[tokio::test]
    async fn test_resolved_missing_file_is_404() {
        let action = Action::Resolved("/nonexistent/preroute/file.html".into());
        let res = action_response(action, empty_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_error_response() {
        let err = PipelineError::Redirect(RedirectError::MissingContextField("host"));
        assert_eq!(error_response(&err).status(), StatusCode::BAD_REQUEST);
    }
}
