//! Sending a text message to a shielded address.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tower::Service;

use zmsg_chain::{Address, Memo, TxId, Zec};
use zmsg_node_services::{
    rpc::{OperationId, Recipient, Request, Response},
    BoxError,
};

use crate::{
    node,
    operation::{self, OperationPoller, ProgressFn},
    Error,
};

#[cfg(test)]
mod tests;

/// The value sent with each message by default, 0.00001 ZEC.
pub const DEFAULT_MESSAGE_AMOUNT: Zec = Zec::new(1_000);

/// Send configuration section.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The value sent with each message, in ZEC.
    pub default_amount: Zec,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_amount: DEFAULT_MESSAGE_AMOUNT,
        }
    }
}

/// A message accepted by the node.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentMessage {
    /// The address the message was sent from.
    pub from: Address,

    /// The node's send operation.
    pub operation_id: OperationId,

    /// The transaction carrying the message.
    pub txid: TxId,
}

/// Sends text messages from the node's wallet.
pub struct SendFlow<S> {
    node: S,
    operation: operation::Config,
    cancel: Option<watch::Receiver<bool>>,
    progress: Option<ProgressFn>,
}

impl<S> SendFlow<S>
where
    S: Service<Request, Response = Response>,
    S::Error: Into<BoxError>,
{
    /// Returns a send flow using `node`, which waits for each send as
    /// configured in `operation`.
    pub fn new(node: S, operation: operation::Config) -> Self {
        Self {
            node,
            operation,
            cancel: None,
            progress: None,
        }
    }

    /// Stops waiting for sends once `cancel` is `true`.
    pub fn with_cancel(mut self, cancel: watch::Receiver<bool>) -> Self {
        self.cancel = Some(cancel);
        self
    }

    /// Calls `progress` after each send operation status update.
    pub fn with_progress(mut self, progress: ProgressFn) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Sends `content` and `value` from `from` to `to`, and waits for the
    /// node to create the transaction.
    ///
    /// If `from` is `None`, the wallet's first address is used.
    pub async fn send(
        &mut self,
        from: Option<Address>,
        to: Address,
        content: &str,
        value: Zec,
    ) -> Result<SentMessage, Error> {
        let from = match from {
            Some(from) => from,
            None => {
                let from = self.first_address().await?;
                tracing::info!(%from, "sending message from the wallet's first address");
                from
            }
        };

        let memo = Memo::encode_text(content)?;

        let request = Request::SendMany {
            from: from.clone(),
            recipients: vec![Recipient::new(to.clone(), value, &memo)],
        };
        let operation_id = match node::call(&mut self.node, request).await? {
            Response::OperationId(operation_id) => operation_id,
            response => {
                return Err(Error::UnexpectedResponse(format!(
                    "expected an operation id, got {response:?}"
                )))
            }
        };

        tracing::info!(%operation_id, %from, %to, %value, "message send started");

        let mut poller = OperationPoller::new(&mut self.node, self.operation.clone());
        if let Some(cancel) = self.cancel.clone() {
            poller = poller.with_cancel(cancel);
        }
        if let Some(progress) = self.progress.take() {
            poller = poller.with_progress(progress);
        }

        let txid = poller.wait(operation_id.clone()).await?;

        Ok(SentMessage {
            from,
            operation_id,
            txid,
        })
    }

    async fn first_address(&mut self) -> Result<Address, Error> {
        match node::call(&mut self.node, Request::ListAddresses).await? {
            Response::Addresses(addresses) => addresses
                .into_iter()
                .next()
                .ok_or(Error::NoAddressesAvailable),
            response => Err(Error::UnexpectedResponse(format!(
                "expected addresses, got {response:?}"
            ))),
        }
    }
}
