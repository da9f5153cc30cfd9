//! Per-request spans.
//!
//! Every inbound request gets an `http_request` span carrying method, path and
//! the request ID, so events logged by handlers and the upstream client
//! inherit them.

use axum::body::Body;
use axum::http::Request;
use ::tracing::Span;

use crate::http::X_REQUEST_ID;

/// Span factory for `tower_http::trace::TraceLayer`.
pub fn make_request_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    ::tracing::info_span!(
        "http_request",
        method = %request.method(),
        path = %request.uri().path(),
        request_id = %request_id,
    )
}
