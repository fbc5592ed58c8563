//! Reading the messages received by the node's wallet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower::Service;

use zmsg_chain::{Address, Memo, MemoKind, TxId, Zec};
use zmsg_node_services::{
    rpc::{ReceivedNote, Request, Response, TransactionInfo},
    BoxError,
};

use crate::{node, Error};

#[cfg(test)]
mod tests;

/// Inbox configuration section.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// Look up each message's transaction, for its time and confirmations.
    ///
    /// This makes one extra request per message.
    pub fetch_timestamps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch_timestamps: true,
        }
    }
}

/// A text message received by one of the wallet's addresses.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Message {
    /// The receiving address.
    pub to: Address,

    /// When the message's transaction was mined, or first seen by the wallet.
    pub timestamp: Option<DateTime<Utc>>,

    /// The message text.
    pub content: String,

    /// The value sent with the message.
    pub value: Zec,

    /// The message's transaction.
    pub txid: TxId,

    /// The transaction's confirmations.
    pub confirmations: Option<i64>,

    /// How the message was framed in its memo.
    #[serde(skip)]
    pub kind: MemoKind,
}

/// Lists the text messages received by the node's wallet.
#[derive(Debug)]
pub struct Inbox<S> {
    node: S,
    config: Config,
}

impl<S> Inbox<S>
where
    S: Service<Request, Response = Response>,
    S::Error: Into<BoxError>,
{
    /// Returns an inbox that reads messages using `node`.
    pub fn new(node: S, config: Config) -> Self {
        Self { node, config }
    }

    /// Returns every text message received by the wallet's addresses.
    ///
    /// Messages are in the node's address order, then in the node's note
    /// order for each address. Notes with unformatted or reserved memos are
    /// skipped. Any memo that can't be decoded fails the whole check.
    pub async fn check_messages(&mut self, include_unconfirmed: bool) -> Result<Vec<Message>, Error> {
        let addresses = self.addresses().await?;
        tracing::debug!(addresses = addresses.len(), "checking wallet addresses");

        let mut messages = Vec::new();

        for address in addresses {
            let notes = self.received_notes(&address, include_unconfirmed).await?;

            for note in notes {
                if let Some(message) = self.message(&address, note).await? {
                    messages.push(message);
                }
            }
        }

        tracing::info!(messages = messages.len(), "checked messages");

        Ok(messages)
    }

    async fn addresses(&mut self) -> Result<Vec<Address>, Error> {
        match node::call(&mut self.node, Request::ListAddresses).await? {
            Response::Addresses(addresses) => Ok(addresses),
            response => Err(unexpected("addresses", response)),
        }
    }

    async fn received_notes(
        &mut self,
        address: &Address,
        include_unconfirmed: bool,
    ) -> Result<Vec<ReceivedNote>, Error> {
        let request = Request::list_received_by_address(address.clone(), include_unconfirmed);

        match node::call(&mut self.node, request).await? {
            Response::ReceivedNotes(notes) => Ok(notes),
            response => Err(unexpected("received notes", response)),
        }
    }

    async fn transaction(&mut self, txid: &TxId) -> Result<TransactionInfo, Error> {
        match node::call(&mut self.node, Request::GetTransaction(txid.clone())).await? {
            Response::Transaction(transaction) => Ok(transaction),
            response => Err(unexpected("a transaction", response)),
        }
    }

    /// Decodes `note` into a message, or returns `None` if it has no text.
    async fn message(
        &mut self,
        address: &Address,
        note: ReceivedNote,
    ) -> Result<Option<Message>, Error> {
        let decoded = Memo::from_hex(&note.memo)?.decode()?;

        if !decoded.is_visible() {
            tracing::debug!(
                txid = %note.txid,
                kind = ?decoded.kind(),
                type_id = ?decoded.type_id(),
                "skipping note without a text memo",
            );
            return Ok(None);
        }

        let (timestamp, confirmations) = if self.config.fetch_timestamps {
            let transaction = self.transaction(&note.txid).await?;
            (Some(transaction.time), Some(transaction.confirmations))
        } else {
            (None, None)
        };

        Ok(Some(Message {
            to: address.clone(),
            timestamp,
            kind: decoded.kind(),
            content: decoded.into_content(),
            value: note.amount,
            txid: note.txid,
            confirmations,
        }))
    }
}

fn unexpected(expected: &str, response: Response) -> Error {
    Error::UnexpectedResponse(format!("expected {expected}, got {response:?}"))
}
