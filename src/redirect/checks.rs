//! The four canonicalization checks.

use axum::http::StatusCode;

use crate::redirect::{CanonicalCheck, Outcome, RedirectError, SCRIPT_BLOCK_BODY};
use crate::request::{Action, RequestContext};

const WWW_PREFIX: &str = "www.";

/// Rejects direct requests for `.php` scripts.
#[derive(Debug, Clone, Default)]
pub struct ScriptBlock;

impl ScriptBlock {
    /// Path ends in `.php`, optionally followed by exactly one `/`.
    pub fn is_script_path(path: &str) -> bool {
        let path = path.strip_suffix('/').unwrap_or(path);
        path.ends_with(".php")
    }
}

impl CanonicalCheck for ScriptBlock {
    fn name(&self) -> &'static str {
        "script_block"
    }

    fn evaluate(&self, ctx: &RequestContext) -> Result<Outcome, RedirectError> {
        if Self::is_script_path(&ctx.path) {
            return Ok(Outcome::Halt(Action::Rejected {
                status: StatusCode::NOT_FOUND,
                body: SCRIPT_BLOCK_BODY.to_string(),
            }));
        }
        Ok(Outcome::Continue)
    }
}

/// Redirects paths that do not end in `/`.
#[derive(Debug, Clone)]
pub struct TrailingSlash {
    status: StatusCode,
}

impl TrailingSlash {
    pub fn new(status: StatusCode) -> Self {
        Self { status }
    }
}

impl CanonicalCheck for TrailingSlash {
    fn name(&self) -> &'static str {
        "trailing_slash"
    }

    fn evaluate(&self, ctx: &RequestContext) -> Result<Outcome, RedirectError> {
        if ctx.path.ends_with('/') {
            return Ok(Outcome::Continue);
        }

        validate_query(&ctx.query)?;

        // Relative location: host and scheme are settled by later checks
        let location = format!("{}/{}", ctx.path, ctx.query_suffix());
        Ok(Outcome::Halt(Action::Redirect {
            location,
            status: self.status,
        }))
    }
}

/// Moves the host toward or away from the `www.` form.
///
/// The prefix match is literal: `WWW.example.com` does not count as having
/// it. The HTTP host layer lowercases the Host header before it gets here.
#[derive(Debug, Clone)]
pub struct HostForm {
    prefer_www: bool,
    status: StatusCode,
}

impl HostForm {
    pub fn new(prefer_www: bool, status: StatusCode) -> Self {
        Self { prefer_www, status }
    }

    /// Host this request should be on, or `None` if it already is.
    ///
    /// Repeated prefixes (`www.www.`) are stripped in one step, so the
    /// returned host never needs a second pass.
    pub fn canonical_host(&self, host: &str) -> Result<Option<String>, RedirectError> {
        if !host.starts_with(WWW_PREFIX) {
            return Ok(self
                .prefer_www
                .then(|| format!("{}{}", WWW_PREFIX, host)));
        }
        if self.prefer_www {
            return Ok(None);
        }

        let mut bare = host;
        while let Some(rest) = bare.strip_prefix(WWW_PREFIX) {
            bare = rest;
        }

        if host_name(bare).is_empty() {
            return Err(RedirectError::MalformedHost(host.to_string()));
        }
        Ok(Some(bare.to_string()))
    }
}

impl CanonicalCheck for HostForm {
    fn name(&self) -> &'static str {
        "host_form"
    }

    fn evaluate(&self, ctx: &RequestContext) -> Result<Outcome, RedirectError> {
        let host = require_host(ctx)?;

        let Some(canonical) = self.canonical_host(host)? else {
            return Ok(Outcome::Continue);
        };

        validate_query(&ctx.query)?;

        let location = format!("{}://{}{}", ctx.scheme(), canonical, ctx.path_and_query());
        Ok(Outcome::Halt(Action::Redirect {
            location,
            status: self.status,
        }))
    }
}

/// Upgrades plain-HTTP requests to HTTPS.
#[derive(Debug, Clone)]
pub struct ForceHttps {
    enabled: bool,
    status: StatusCode,
}

impl ForceHttps {
    pub fn new(enabled: bool, status: StatusCode) -> Self {
        Self { enabled, status }
    }
}

impl CanonicalCheck for ForceHttps {
    fn name(&self) -> &'static str {
        "force_https"
    }

    fn evaluate(&self, ctx: &RequestContext) -> Result<Outcome, RedirectError> {
        if !self.enabled || ctx.secure {
            return Ok(Outcome::Continue);
        }

        let host = require_host(ctx)?;
        validate_query(&ctx.query)?;

        let location = format!("https://{}{}", host, ctx.path_and_query());
        Ok(Outcome::Halt(Action::Redirect {
            location,
            status: self.status,
        }))
    }
}

fn require_host(ctx: &RequestContext) -> Result<&str, RedirectError> {
    match ctx.host.as_deref().map(str::trim) {
        Some(host) if host.is_empty() => Err(RedirectError::MissingContextField("host")),
        Some(host) if host_name(host).is_empty() => {
            Err(RedirectError::MalformedHost(host.to_string()))
        }
        Some(host) => Ok(host),
        None => Err(RedirectError::MissingContextField("host")),
    }
}

/// Host without its `:port` suffix. Bracketed IPv6 literals keep their colons.
fn host_name(host: &str) -> &str {
    if host.starts_with('[') {
        return host.split_inclusive(']').next().unwrap_or(host);
    }
    host.split(':').next().unwrap_or(host)
}

/// The query is copied verbatim into a `Location` header, so it must not
/// contain anything that would split or truncate the URL.
fn validate_query(query: &str) -> Result<(), RedirectError> {
    let malformed = query
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '#');

    if malformed {
        return Err(RedirectError::MalformedQuery(query.to_string()));
    }
    Ok(())
}
