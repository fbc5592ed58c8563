//! Errors from the node RPC client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error reaching the node, or understanding its reply.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Nothing is listening at the configured RPC URL.
    #[error("failed to connect to zcash daemon, is it running?")]
    ConnectionRefused(#[source] reqwest::Error),

    /// Any other HTTP client error, including timeouts.
    #[error("HTTP request to zcash daemon failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The node rejected the RPC credentials.
    #[error("zcash daemon rejected the RPC credentials, check rpcuser and rpcpassword")]
    Unauthorized,

    /// The node replied with an unexpected HTTP status, without an RPC error.
    #[error("zcash daemon returned HTTP status {0}")]
    HttpStatus(u16),

    /// The reply had neither a result nor an error.
    #[error("zcash daemon returned an empty response")]
    EmptyResponse,

    /// The reply could not be decoded into the expected type.
    #[error("could not parse {1} from zcash daemon: {0}")]
    BadNodeData(#[source] serde_json::Error, &'static str),
}

/// A JSON-RPC error returned by the node.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize, Error)]
#[error("RPC Error (code: {code}): {message}")]
pub struct RpcError {
    /// The node's error code.
    pub code: i64,

    /// The node's error message.
    pub message: String,
}
