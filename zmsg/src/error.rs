//! Errors from zmsg operations.

use std::time::Duration;

use thiserror::Error;

use zmsg_chain::MemoError;
use zmsg_node_services::{rpc::OperationId, BoxError};

/// An error reading or sending messages.
#[derive(Debug, Error)]
pub enum Error {
    /// The node could not be reached, or returned an RPC error.
    ///
    /// Contains a `zmsg_node_services::rpc_client::TransportError` or
    /// `RpcError` when using the HTTP client.
    #[error("{0}")]
    Node(#[source] BoxError),

    /// A message could not be encoded, or a received memo could not be
    /// decoded.
    #[error(transparent)]
    Memo(#[from] MemoError),

    /// The node's send operation failed.
    #[error("operation {operation_id} failed: {message}")]
    OperationFailed {
        /// The failed operation.
        operation_id: OperationId,
        /// The node's error code, if it gave one.
        code: Option<i64>,
        /// The node's error message.
        message: String,
    },

    /// No sender was given, and the wallet has no addresses to send from.
    #[error("no addresses to send message from! (create one with the zcash-cli)")]
    NoAddressesAvailable,

    /// The operation was still running after the configured maximum wait.
    #[error("operation {operation_id} did not finish within {waited:?}")]
    PollTimeout {
        /// The unfinished operation.
        operation_id: OperationId,
        /// How long the operation was polled for.
        waited: Duration,
    },

    /// Waiting for the operation was cancelled.
    ///
    /// The node keeps running the operation.
    #[error("stopped waiting for operation {operation_id}")]
    Cancelled {
        /// The unfinished operation.
        operation_id: OperationId,
    },

    /// The node returned a response that doesn't fit the request.
    #[error("unexpected response from zcash daemon: {0}")]
    UnexpectedResponse(String),
}
