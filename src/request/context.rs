//! Request context consumed by the redirect chain and the router.

/// Standard port for TLS traffic.
pub const HTTPS_PORT: u16 = 443;

/// Everything the decision core needs to know about one inbound request.
///
/// Built once by the host layer and never mutated while a decision is made.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RequestContext {
    /// Raw request path, without the query string.
    pub path: String,
    /// Raw query string without the leading `?`. Empty when absent.
    pub query: String,
    /// Host the client addressed, including any port suffix.
    pub host: Option<String>,
    /// Whether the request arrived over a secure transport.
    pub secure: bool,
    /// Port the request was received on, if known.
    pub port: Option<u16>,
}

impl RequestContext {
    /// Create a context for `path` with no query, host or port.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Set the port and recompute `secure` from it.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self.secure = self.secure || port == HTTPS_PORT;
        self
    }

    /// `?query` when a query is present, otherwise an empty string.
    pub fn query_suffix(&self) -> String {
        if self.query.is_empty() {
            String::new()
        } else {
            format!("?{}", self.query)
        }
    }

    /// Path plus query suffix, as it would appear in a request line.
    pub fn path_and_query(&self) -> String {
        format!("{}{}", self.path, self.query_suffix())
    }

    /// Scheme the request was made with.
    pub fn scheme(&self) -> &'static str {
        if self.secure {
            "https"
        } else {
            "http"
        }
    }
}

/// Decide whether a request counts as secure.
///
/// The indicator is whatever the deployment forwards to say TLS was used
/// (`on`, `1`, `https`). It counts when present, non-empty and not `off`.
/// Either the indicator or port 443 is sufficient on its own.
pub fn detect_secure(indicator: Option<&str>, port: Option<u16>) -> bool {
    let flagged = indicator
        .map(str::trim)
        .map(|v| !v.is_empty() && !v.eq_ignore_ascii_case("off"))
        .unwrap_or(false);

    flagged || port == Some(HTTPS_PORT)
}
