//! Transaction identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A transaction id, in the byte-reversed hex form the node displays.
///
/// Transaction ids are only passed back to the node, so they are kept as
/// the node formats them.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxId(String);

impl TxId {
    /// Returns the transaction id as the node formats it.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for TxId {
    fn from(txid: String) -> Self {
        TxId(txid)
    }
}

impl From<&str> for TxId {
    fn from(txid: &str) -> Self {
        TxId(txid.to_string())
    }
}

impl fmt::Display for TxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
