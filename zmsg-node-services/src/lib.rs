//! The zcashd JSON-RPC interface used by zmsg.
//!
//! [`rpc::Request`] and [`rpc::Response`] have one variant per RPC method,
//! and any `tower::Service` between them can stand in for the node. With
//! the `rpc-client` feature, [`rpc_client::RpcRequestClient`] is that
//! service over HTTP.

#![doc(html_root_url = "https://docs.rs/zmsg_node_services")]
// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

pub mod rpc;

#[cfg(any(test, feature = "rpc-client"))]
pub mod credentials;

#[cfg(any(test, feature = "rpc-client"))]
pub mod rpc_client;

/// Error type alias to make working with tower traits easier.
///
/// Note: the 'static lifetime bound means that the *type* cannot have any
/// non-'static lifetimes, (e.g., when a type contains a borrow and is
/// parameterized by 'a), *not* that the object itself has 'static lifetime.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
