//! HTTP transport seam
//!
//! The client only needs two verbs. Keeping them behind a trait lets tests
//! script responses and inspect outgoing bodies without a network.

use crate::errors::ApiResult;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

/// Status code and raw body of a completed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// The backend signals success with exactly 200
    pub fn is_ok(&self) -> bool {
        self.status == 200
    }
}

/// Minimal async HTTP interface used by the analysis client
#[async_trait]
pub trait Transport: Send + Sync {
    /// Plain GET, no fingerprint headers
    async fn get(&self, url: &str) -> ApiResult<HttpResponse>;

    /// POST a JSON body with the client's fixed header set
    async fn post_json(&self, url: &str, body: &Value) -> ApiResult<HttpResponse>;
}

/// Production transport backed by `reqwest`
///
/// No timeout is configured: a hung request waits until the peer gives up.
pub struct ReqwestTransport {
    client: Client,
    headers: HeaderMap,
}

impl ReqwestTransport {
    pub fn new(headers: HeaderMap) -> ApiResult<Self> {
        let client = Client::builder().build()?;
        Ok(Self { client, headers })
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: &str) -> ApiResult<HttpResponse> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }

    async fn post_json(&self, url: &str, body: &Value) -> ApiResult<HttpResponse> {
        debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .headers(self.headers.clone())
            .json(body)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(HttpResponse { status, body })
    }
}
