//! Request handling.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4)
//! - Extract the decision inputs (path, query, host, security) from a request
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - The connection's port is the listener's port, not the Host header's

use axum::http::{header, HeaderName, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::request::{detect_secure, RequestContext};

pub const X_REQUEST_ID: &str = "x-request-id";

/// Generates `x-request-id` values from random UUIDs.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidRequestId;

impl MakeRequestId for UuidRequestId {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Build the context the pipeline decides on.
///
/// `secure_header` names the header a TLS-terminating proxy forwards;
/// `listener_port` is the port this server accepted the connection on.
pub fn context_from_request<B>(
    req: &Request<B>,
    secure_header: &HeaderName,
    listener_port: Option<u16>,
) -> RequestContext {
    let uri = req.uri();

    // Hosts are case-insensitive; the redirect chain compares them literally
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .map(str::to_ascii_lowercase)
        .or_else(|| uri.authority().map(|a| a.as_str().to_ascii_lowercase()))
        .filter(|h| !h.trim().is_empty());

    let indicator = req
        .headers()
        .get(secure_header)
        .and_then(|v| v.to_str().ok())
        .or_else(|| (uri.scheme_str() == Some("https")).then_some("on"));

    RequestContext {
        path: uri.path().to_string(),
        query: uri.query().unwrap_or_default().to_string(),
        host,
        secure: detect_secure(indicator, listener_port),
        port: listener_port,
    }
}

/// Request ID header value, or `"unknown"` if the layer did not set one.
pub fn request_id<B>(req: &Request<B>) -> String {
    req.headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    fn secure_header() -> HeaderName {
        HeaderName::from_static("x-forwarded-ssl")
    }

    #[test]
    fn test_extracts_path_query_host() {
        let req = Request::builder()
            .uri("/page?a=1")
            .header("Host", "www.example.com")
            .body(Body::empty())
            .unwrap();

        let ctx = context_from_request(&req, &secure_header(), Some(8080));
        assert_eq!(ctx.path, "/page");
        assert_eq!(ctx.query, "a=1");
        assert_eq!(ctx.host.as_deref(), Some("www.example.com"));
        assert!(!ctx.secure);
        assert_eq!(ctx.port, Some(8080));
    }

    #[test]
    fn test_host_is_lowercased() {
        let req = Request::builder()
            .uri("/x/")
            .header("Host", "WWW.Example.COM:8080")
            .body(Body::empty())
            .unwrap();

        let ctx = context_from_request(&req, &secure_header(), None);
        assert_eq!(ctx.host.as_deref(), Some("www.example.com:8080"));
    }

    #[test]
    fn test_missing_host() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let ctx = context_from_request(&req, &secure_header(), None);
        assert_eq!(ctx.host, None);
        assert_eq!(ctx.query, "");
    }

    #[test]
    fn test_secure_indicator_header() {
        let req = Request::builder()
            .uri("/")
            .header("Host", "example.com")
            .header("X-Forwarded-Ssl", "on")
            .body(Body::empty())
            .unwrap();
        assert!(context_from_request(&req, &secure_header(), Some(80)).secure);

        let req = Request::builder()
            .uri("/")
            .header("Host", "example.com")
            .header("X-Forwarded-Ssl", "off")
            .body(Body::empty())
            .unwrap();
        assert!(!context_from_request(&req, &secure_header(), Some(80)).secure);
    }

    #[test]
    fn test_secure_port() {
        let req = Request::builder()
            .uri("/")
            .header("Host", "example.com")
            .body(Body::empty())
            .unwrap();
        assert!(context_from_request(&req, &secure_header(), Some(443)).secure);
    }

    #[test]
    fn test_make_request_id() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let id = UuidRequestId.make_request_id(&req).unwrap();
        let value = id.header_value().to_str().unwrap();
        assert!(Uuid::parse_str(value).is_ok());
    }
}
