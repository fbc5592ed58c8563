//! A client for calling the node's JSON-RPC methods over HTTP.

use std::{
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
    task::{Context, Poll},
};

use futures::future::{BoxFuture, FutureExt};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::Service;

use crate::{
    credentials::{self, Credentials},
    rpc::{Request, Response},
    BoxError,
};

mod config;
mod error;


pub use config::{Config, DEFAULT_RPC_URL};
pub use error::{RpcError, TransportError};

/// The JSON-RPC envelope sent to the node.
#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

/// The JSON-RPC envelope returned by the node.
///
/// zcashd always sends both fields, with `null` for the missing one.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcError>,
}

/// An HTTP client for making JSON-RPC requests to a zcashd node.
///
/// Cloned clients share a connection pool and request id counter.
#[derive(Clone, Debug)]
pub struct RpcRequestClient {
    client: Client,
    url: String,
    credentials: Credentials,
    id_counter: Arc<AtomicU64>,
}

impl RpcRequestClient {
    /// Creates a client for the node at `config.url`, loading credentials
    /// from the configured files.
    pub fn new(config: &Config) -> Result<Self, TransportError> {
        let credentials = credentials::load(config);
        Self::with_credentials(config, credentials)
    }

    /// Creates a client for the node at `config.url`, with `credentials`.
    pub fn with_credentials(
        config: &Config,
        credentials: Credentials,
    ) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            credentials,
            id_counter: Arc::new(AtomicU64::new(1)),
        })
    }

    /// Returns the node's RPC URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Sends `request` to the node, and decodes its result.
    ///
    /// Errors are [`TransportError`]s or [`RpcError`]s.
    pub async fn send(&self, request: Request) -> Result<Response, BoxError> {
        let method = request.method();
        let result = self.json_result(method, request.params()).await?;

        request
            .parse_result(result)
            .map_err(|error| TransportError::BadNodeData(error, method).into())
    }

    /// Sends a JSON-RPC request, and returns its undecoded result.
    pub async fn json_result(&self, method: &str, params: Value) -> Result<Value, BoxError> {
        let id = self.id_counter.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(id, method, %params, "sending RPC request");

        let mut builder = self.client.post(&self.url).json(&RpcRequest {
            jsonrpc: "1.0",
            id,
            method,
            params,
        });
        if !self.credentials.is_empty() {
            builder = builder.basic_auth(&self.credentials.user, Some(&self.credentials.password));
        }

        let response = builder.send().await.map_err(|error| {
            if error.is_connect() {
                TransportError::ConnectionRefused(error)
            } else {
                TransportError::Http(error)
            }
        })?;

        let status = response.status();
        let body = response.bytes().await.map_err(TransportError::Http)?;

        json_result_from_response(status, &body)
    }
}

/// Returns the `result` of a JSON-RPC response, or its error.
///
/// zcashd reports RPC errors with a non-success HTTP status, so the body is
/// checked for an RPC error before the status.
pub fn json_result_from_response(status: StatusCode, body: &[u8]) -> Result<Value, BoxError> {
    let response = serde_json::from_slice::<RpcResponse>(body);

    if let Ok(RpcResponse {
        error: Some(error), ..
    }) = response
    {
        return Err(error.into());
    }

    if status == StatusCode::UNAUTHORIZED {
        return Err(TransportError::Unauthorized.into());
    }
    if !status.is_success() {
        return Err(TransportError::HttpStatus(status.as_u16()).into());
    }

    match response {
        Ok(RpcResponse {
            result: Some(result),
            ..
        }) => Ok(result),
        Ok(_) => Err(TransportError::EmptyResponse.into()),
        Err(error) => Err(TransportError::BadNodeData(error, "JSON-RPC response").into()),
    }
}

impl Service<Request> for RpcRequestClient {
    type Response = Response;
    type Error = BoxError;
    type Future = BoxFuture<'static, Result<Response, BoxError>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let client = self.clone();

        async move { client.send(request).await }.boxed()
    }
}
