//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the pipeline from configuration
//! - Create Axum Router with the decision handler
//! - Wire up middleware (trace, timeout, request ID)
//! - Serve until the shutdown signal fires

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{HeaderName, Request},
    response::Response,
    routing::any,
    Router,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::http::request::{context_from_request, request_id, UuidRequestId};
use crate::http::response::{action_response, error_response};
use crate::observability::metrics;
use crate::pipeline::{Pipeline, PipelineError};
use crate::redirect::RedirectError;
use crate::routing::ConfigurationError;

/// Error building the server from configuration.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("listener.secure_header `{0}` is not a valid header name")]
    SecureHeader(String),
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
    pub secure_header: HeaderName,
    pub listener_port: Option<u16>,
}

/// HTTP front for the pipeline.
pub struct HttpServer {
    config: AppConfig,
    pipeline: Arc<Pipeline>,
    secure_header: HeaderName,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: AppConfig) -> Result<Self, ServerError> {
        let pipeline = Arc::new(Pipeline::from_config(&config)?);

        let secure_header = HeaderName::from_bytes(
            config.listener.secure_header.trim().to_ascii_lowercase().as_bytes(),
        )
        .map_err(|_| ServerError::SecureHeader(config.listener.secure_header.clone()))?;

        tracing::info!(
            routes = pipeline.router().table().len(),
            root_path = %pipeline.router().root_path().display(),
            home_subfolder = %pipeline.router().home_subfolder(),
            prefer_www = config.redirect.prefer_www,
            force_https = config.redirect.force_https,
            "Pipeline built"
        );

        Ok(Self {
            config,
            pipeline,
            secure_header,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    pub fn build_router(&self, listener_port: Option<u16>) -> Router {
        let state = AppState {
            pipeline: self.pipeline.clone(),
            secure_header: self.secure_header.clone(),
            listener_port,
        };

        Router::new()
            .route("/{*path}", any(decide_handler))
            .route("/", any(decide_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TraceLayer::new_for_http())
            .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self.build_router(Some(addr.port()));

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Arc<Pipeline> {
        &self.pipeline
    }
}

/// Runs the pipeline for every request and renders its decision.
async fn decide_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request);
    let ctx = context_from_request(&request, &state.secure_header, state.listener_port);

    match state.pipeline.handle(&ctx) {
        Ok(action) => {
            tracing::debug!(
                request_id = %request_id,
                path = %ctx.path,
                host = ?ctx.host,
                secure = ctx.secure,
                action = action.kind(),
                status = action.status().as_u16(),
                "Request decided"
            );
            metrics::record_action(&action, start_time);
            action_response(action, request).await
        }
        Err(err) => {
            tracing::warn!(
                request_id = %request_id,
                path = %ctx.path,
                error = %err,
                "Request could not be decided"
            );
            metrics::record_error(error_reason(&err));
            error_response(&err)
        }
    }
}

fn error_reason(err: &PipelineError) -> &'static str {
    match err {
        PipelineError::Redirect(RedirectError::MissingContextField(_)) => "missing_context",
        PipelineError::Redirect(RedirectError::MalformedHost(_)) => "malformed_host",
        PipelineError::Redirect(RedirectError::MalformedQuery(_)) => "malformed_query",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use tower::ServiceExt;

    fn config() -> AppConfig {
        let mut config = AppConfig::default();
        config.router.root_path = std::env::temp_dir();
        config.router.routes.insert("/x/".into(), "x.html".into());
        config
    }

    #[tokio::test]
    async fn test_router_redirects_slashless_path() {
        let server = HttpServer::new(config()).unwrap();
        let res = server
            .build_router(Some(80))
            .oneshot(
                Request::builder()
                    .uri("/x")
                    .header("Host", "example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(res.headers()[header::LOCATION], "/x/");
        assert!(res.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_missing_host_is_bad_request() {
        let server = HttpServer::new(config()).unwrap();
        let res = server
            .build_router(Some(80))
            .oneshot(Request::builder().uri("/x/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_secure_header() {
        let mut config = config();
        config.listener.secure_header = "bad header".into();
        assert!(matches!(
            HttpServer::new(config),
            Err(ServerError::SecureHeader(_))
        ));
    }
}
