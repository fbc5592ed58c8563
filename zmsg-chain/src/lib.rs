//! Data structures for zmsg: shielded memo framing, ZEC amounts, and the
//! identifiers exchanged with a Zcash node.

#![doc(html_root_url = "https://docs.rs/zmsg_chain")]
// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

pub mod addresses;
pub mod amount;
pub mod memo;
pub mod serialization;
pub mod transaction;

pub use addresses::Address;
pub use amount::Zec;
pub use memo::{DecodedMemo, Memo, MemoError, MemoKind};
pub use transaction::TxId;
