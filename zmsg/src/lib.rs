//! Text messages in Zcash shielded memo fields.
//!
//! zmsg reads and sends messages through the wallet of a local zcashd node:
//! - [`Inbox`] lists the messages received by the wallet's addresses,
//! - [`SendFlow`] sends a message, then waits for the node's asynchronous
//!   send operation using an [`OperationPoller`].
//!
//! Each component is generic over a `tower::Service` for node RPC requests,
//! so they can be tested without a node.

#![doc(html_root_url = "https://docs.rs/zmsg")]
// Standard lints
#![warn(missing_docs)]
#![allow(clippy::try_err)]
#![deny(clippy::await_holding_lock)]
#![forbid(unsafe_code)]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod config;
pub mod error;
pub mod inbox;
pub mod operation;
pub mod render;
pub mod send;

mod node;

pub use config::ZmsgConfig;
pub use error::Error;
pub use inbox::{Inbox, Message};
pub use operation::{OperationHandle, OperationPoller};
pub use send::{SendFlow, SentMessage};

/// The log filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// The log filter used for verbose output when `RUST_LOG` is unset.
pub const VERBOSE_LOG_FILTER: &str = "warn,zmsg=info,zmsg_node_services=info";

/// Initialise tracing, writing logs to stderr.
///
/// `RUST_LOG` overrides the default filter.
pub fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        VERBOSE_LOG_FILTER
    } else {
        DEFAULT_LOG_FILTER
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_error::ErrorLayer::default())
        .init();
}
