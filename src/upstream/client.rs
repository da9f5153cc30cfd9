//! HTTP client for the upstream table store.
//!
//! # Responsibilities
//! - Resolve the table resource URL once at construction
//! - Attach the static credential headers to every call
//! - Perform exactly one request per invocation and hand back status + raw body
//!
//! # Design Decisions
//! - Writes send `Prefer: return=representation` so the store echoes the row
//! - No retries, no backoff, no timeout beyond the client default
//! - Status interpretation is left to the caller

use std::time::Instant;

use reqwest::header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::redirect::Policy;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Serialize;
use thiserror::Error;
use url::Url;

use crate::config::UpstreamConfig;
use crate::http::X_REQUEST_ID;
use crate::observability::metrics;

const APIKEY: &str = "apikey";
const PREFER: &str = "prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Errors raised while constructing an [`UpstreamClient`].
#[derive(Debug, Error)]
pub enum ClientInitError {
    #[error("invalid upstream URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("service credential is not a valid header value")]
    Credential(#[from] InvalidHeaderValue),

    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Whether a call mutates the store; selects the header set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    Read,
    Write,
}

impl CallKind {
    fn as_str(self) -> &'static str {
        match self {
            CallKind::Read => "select",
            CallKind::Write => "insert",
        }
    }
}

/// Status and unparsed body of an upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: String,
}

/// Client bound to a single table resource of the store.
#[derive(Clone)]
pub struct UpstreamClient {
    http: Client,
    table_url: Url,
    read_headers: HeaderMap,
    write_headers: HeaderMap,
}

impl UpstreamClient {
    /// Build a client from validated upstream configuration.
    pub fn new(config: &UpstreamConfig) -> Result<Self, ClientInitError> {
        let table_url = Url::parse(&format!(
            "{}{}",
            config.base_url.trim().trim_end_matches('/'),
            config.table_path()
        ))?;

        Ok(Self {
            // A redirect would be a second upstream call; 3xx is relayed like any other status.
            http: Client::builder().redirect(Policy::none()).build()?,
            table_url,
            read_headers: credential_headers(&config.service_key, CallKind::Read)?,
            write_headers: credential_headers(&config.service_key, CallKind::Write)?,
        })
    }

    /// Resolved URL of the table resource.
    pub fn table_url(&self) -> &Url {
        &self.table_url
    }

    /// POST one row to the table.
    pub async fn insert<T: Serialize + ?Sized>(
        &self,
        row: &T,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let request = self
            .http
            .post(self.table_url.clone())
            .headers(self.write_headers.clone())
            .json(row);

        self.execute(CallKind::Write, request, request_id).await
    }

    /// GET rows matching an already-encoded query string.
    pub async fn select(
        &self,
        query: &str,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let mut url = self.table_url.clone();
        url.set_query(Some(query));

        let request = self.http.get(url).headers(self.read_headers.clone());

        self.execute(CallKind::Read, request, request_id).await
    }

    async fn execute(
        &self,
        kind: CallKind,
        request: RequestBuilder,
        request_id: Option<&str>,
    ) -> Result<UpstreamResponse, reqwest::Error> {
        let start = Instant::now();
        let request = match request_id {
            Some(id) => request.header(X_REQUEST_ID, id),
            None => request,
        };

        let result = dispatch(request).await;

        match &result {
            Ok(response) => {
                tracing::debug!(
                    request_id = request_id.unwrap_or("unknown"),
                    operation = kind.as_str(),
                    status = response.status.as_u16(),
                    "Upstream call completed"
                );
                metrics::record_upstream(kind.as_str(), Some(response.status.as_u16()), start);
            }
            Err(e) => {
                tracing::error!(
                    request_id = request_id.unwrap_or("unknown"),
                    operation = kind.as_str(),
                    error = %e,
                    "Upstream call failed"
                );
                metrics::record_upstream(kind.as_str(), None, start);
            }
        }

        result
    }
}

impl std::fmt::Debug for UpstreamClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamClient")
            .field("table_url", &self.table_url.as_str())
            .finish_non_exhaustive()
    }
}

async fn dispatch(request: RequestBuilder) -> Result<UpstreamResponse, reqwest::Error> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.text().await?;
    Ok(UpstreamResponse { status, body })
}

fn credential_headers(service_key: &str, kind: CallKind) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut apikey = HeaderValue::from_str(service_key)?;
    apikey.set_sensitive(true);
    let mut bearer = HeaderValue::from_str(&format!("Bearer {}", service_key))?;
    bearer.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(APIKEY, apikey);
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if kind == CallKind::Write {
        headers.insert(PREFER, HeaderValue::from_static(RETURN_REPRESENTATION));
    }
    Ok(headers)
}
