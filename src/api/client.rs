// ABOUTME: reqwest-backed client for the node's REST endpoints
// Exposes the NodeApi seam so the UI can be driven by a mock in tests

use std::time::Duration;

use futures_util::future::{BoxFuture, FutureExt};
use reqwest::header::CONTENT_TYPE;
use reqwest::Url;
use serde_json::Value;
use tracing::debug;

use super::endpoint::{Endpoint, EndpointCall, HttpMethod, RegisterNodesRequest, TransactionRequest};
use super::error::{ApiError, ApiResult};
use super::response::unwrap_response;

/// Anything that can carry an [`EndpointCall`] to a node.
#[cfg_attr(test, mockall::automock)]
pub trait NodeApi: Send + Sync {
    fn execute(&self, call: EndpointCall) -> BoxFuture<'static, ApiResult<Value>>;
}

#[derive(Debug, Clone)]
pub struct NodeClient {
    http: reqwest::Client,
    base_url: Url,
}

impl NodeClient {
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn url_for(&self, endpoint: Endpoint) -> ApiResult<Url> {
        // Endpoint paths are absolute, so they replace any path on the base URL.
        self.base_url
            .join(endpoint.path())
            .map_err(|e| ApiError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: e.to_string(),
            })
    }

    pub async fn chain(&self) -> ApiResult<Value> {
        self.execute(EndpointCall::get(Endpoint::Chain)).await
    }

    pub async fn new_transaction(&self, request: &TransactionRequest) -> ApiResult<Value> {
        self.execute(EndpointCall::post(Endpoint::NewTransaction, request)?)
            .await
    }

    pub async fn mine(&self) -> ApiResult<Value> {
        self.execute(EndpointCall::get(Endpoint::Mine)).await
    }

    pub async fn register_nodes(&self, request: &RegisterNodesRequest) -> ApiResult<Value> {
        self.execute(EndpointCall::post(Endpoint::RegisterNodes, request)?)
            .await
    }

    pub async fn resolve_nodes(&self) -> ApiResult<Value> {
        self.execute(EndpointCall::get(Endpoint::ResolveNodes)).await
    }
}

impl NodeApi for NodeClient {
    fn execute(&self, call: EndpointCall) -> BoxFuture<'static, ApiResult<Value>> {
        let http = self.http.clone();
        let url = self.url_for(call.endpoint);

        async move {
            let url = url?;
            debug!("{} {}", call.method(), url);

            let request = match call.method() {
                HttpMethod::Get => http.get(url),
                HttpMethod::Post => {
                    let body = serde_json::to_vec(&call.payload.unwrap_or(Value::Null))?;
                    http.post(url)
                        .header(CONTENT_TYPE, "application/json")
                        .body(body)
                }
            };

            let response = request.send().await?;
            debug!("{} -> {}", call.endpoint, response.status());
            unwrap_response(response).await
        }
        .boxed()
    }
}

fn parse_base_url(raw: &str) -> ApiResult<Url> {
    let url = Url::parse(raw).map_err(|e| ApiError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ApiError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", other),
        }),
    }
}
