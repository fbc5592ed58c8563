//! Requests to the node's JSON-RPC interface, and their typed responses.
//!
//! Each [`Request`] variant is one zcashd RPC method. Results are decoded
//! into the matching [`Response`] variant by [`Request::parse_result`], so
//! callers never see untyped JSON.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use zmsg_chain::{Address, Memo, TxId, Zec};


/// A node RPC request.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Request {
    /// List the shielded addresses owned by the node's wallet.
    ///
    /// Returns [`Response::Addresses`], in the node's order.
    ListAddresses,

    /// List the notes received by `address`.
    ///
    /// Returns [`Response::ReceivedNotes`], in the node's order.
    ListReceivedByAddress {
        /// An address owned by the node's wallet.
        address: Address,
        /// The minimum number of confirmations a note needs to be listed.
        min_confirmations: u32,
    },

    /// Start an asynchronous operation sending from `from` to `recipients`.
    ///
    /// Returns [`Response::OperationId`].
    SendMany {
        /// An address owned by the node's wallet.
        from: Address,
        /// The outputs of the new transaction.
        recipients: Vec<Recipient>,
    },

    /// Get the status of some asynchronous operations.
    ///
    /// Returns [`Response::OperationStatuses`]. Unknown ids are left out.
    GetOperationStatus(Vec<OperationId>),

    /// Get a wallet transaction.
    ///
    /// Returns [`Response::Transaction`].
    GetTransaction(TxId),
}

impl Request {
    /// Returns a request for the notes received by `address`.
    ///
    /// Unconfirmed notes are only listed if `include_unconfirmed` is true.
    pub fn list_received_by_address(address: Address, include_unconfirmed: bool) -> Self {
        Request::ListReceivedByAddress {
            address,
            min_confirmations: if include_unconfirmed { 0 } else { 1 },
        }
    }

    /// Returns the zcashd method name for this request.
    pub fn method(&self) -> &'static str {
        match self {
            Request::ListAddresses => "z_listaddresses",
            Request::ListReceivedByAddress { .. } => "z_listreceivedbyaddress",
            Request::SendMany { .. } => "z_sendmany",
            Request::GetOperationStatus(_) => "z_getoperationstatus",
            Request::GetTransaction(_) => "gettransaction",
        }
    }

    /// Returns the positional parameters for this request.
    pub fn params(&self) -> Value {
        match self {
            Request::ListAddresses => json!([]),
            Request::ListReceivedByAddress {
                address,
                min_confirmations,
            } => json!([address, min_confirmations]),
            Request::SendMany { from, recipients } => json!([from, recipients]),
            Request::GetOperationStatus(operation_ids) => json!([operation_ids]),
            Request::GetTransaction(txid) => json!([txid]),
        }
    }

    /// Decodes the JSON-RPC `result` of this request.
    pub fn parse_result(&self, result: Value) -> Result<Response, serde_json::Error> {
        let response = match self {
            Request::ListAddresses => Response::Addresses(serde_json::from_value(result)?),
            Request::ListReceivedByAddress { .. } => {
                Response::ReceivedNotes(serde_json::from_value(result)?)
            }
            Request::SendMany { .. } => Response::OperationId(serde_json::from_value(result)?),
            Request::GetOperationStatus(_) => {
                Response::OperationStatuses(serde_json::from_value(result)?)
            }
            Request::GetTransaction(_) => Response::Transaction(serde_json::from_value(result)?),
        };

        Ok(response)
    }
}

/// A node RPC response.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Response {
    /// Response to [`Request::ListAddresses`].
    Addresses(Vec<Address>),

    /// Response to [`Request::ListReceivedByAddress`].
    ReceivedNotes(Vec<ReceivedNote>),

    /// Response to [`Request::SendMany`].
    OperationId(OperationId),

    /// Response to [`Request::GetOperationStatus`].
    OperationStatuses(Vec<OperationStatus>),

    /// Response to [`Request::GetTransaction`].
    Transaction(TransactionInfo),
}

/// A note received by one of the wallet's addresses.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct ReceivedNote {
    /// The transaction containing the note.
    pub txid: TxId,

    /// The value of the note.
    pub amount: Zec,

    /// The note's memo field, hex-encoded.
    pub memo: String,
}

/// An output of a [`Request::SendMany`] transaction.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Recipient {
    /// The address receiving the output.
    pub address: Address,

    /// The value of the output.
    pub amount: Zec,

    /// The output's memo field, hex-encoded.
    pub memo: String,
}

impl Recipient {
    /// Returns an output sending `amount` and `memo` to `address`.
    pub fn new(address: Address, amount: Zec, memo: &Memo) -> Self {
        Self {
            address,
            amount,
            memo: memo.to_hex(),
        }
    }
}

/// The id of an asynchronous node operation, like `opid-1234...`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(transparent)]
pub struct OperationId(String);

impl OperationId {
    /// Returns the operation id as the node formats it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OperationId {
    fn from(operation_id: &str) -> Self {
        OperationId(operation_id.to_string())
    }
}

impl fmt::Display for OperationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The status of an asynchronous node operation.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct OperationStatus {
    /// The operation's id.
    pub id: OperationId,

    /// The operation's state.
    pub status: OperationState,

    /// When the operation was created, in seconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<i64>,

    /// Why the operation failed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<OperationError>,

    /// The result of a successful operation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<OperationResult>,
}

/// The state of an asynchronous node operation.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum OperationState {
    /// Waiting for a worker.
    Queued,
    /// Running.
    Executing,
    /// Finished successfully.
    Success,
    /// Finished with an error.
    Failed,
    /// A state this version does not know about, as the node named it.
    Unknown(String),
}

impl OperationState {
    /// Returns true if the operation will not change state again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OperationState::Success | OperationState::Failed)
    }

    /// Returns the state as the node names it.
    pub fn as_str(&self) -> &str {
        match self {
            OperationState::Queued => "queued",
            OperationState::Executing => "executing",
            OperationState::Success => "success",
            OperationState::Failed => "failed",
            OperationState::Unknown(state) => state,
        }
    }
}

impl From<String> for OperationState {
    fn from(state: String) -> Self {
        match state.as_str() {
            "queued" => OperationState::Queued,
            "executing" => OperationState::Executing,
            "success" => OperationState::Success,
            "failed" => OperationState::Failed,
            _ => OperationState::Unknown(state),
        }
    }
}

impl From<OperationState> for String {
    fn from(state: OperationState) -> Self {
        state.as_str().to_string()
    }
}

impl fmt::Display for OperationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The error of a failed asynchronous operation.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct OperationError {
    /// The node's error code.
    pub code: i64,

    /// The node's error message.
    pub message: String,
}

/// The result of a successful send operation.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct OperationResult {
    /// The id of the sent transaction.
    pub txid: TxId,
}

/// Wallet metadata for a transaction.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct TransactionInfo {
    /// The transaction id.
    pub txid: TxId,

    /// When the transaction was mined, or first seen by the wallet.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub time: DateTime<Utc>,

    /// The number of confirmations, or -1 if the transaction conflicts with
    /// the best chain.
    #[serde(default)]
    pub confirmations: i64,
}
