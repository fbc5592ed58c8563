//! User-configurable settings for the node RPC client.

use std::{path::PathBuf, time::Duration};

use serde::{Deserialize, Serialize};

/// The default zcashd mainnet RPC endpoint.
pub const DEFAULT_RPC_URL: &str = "http://127.0.0.1:8232";

/// Node RPC client configuration section.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Config {
    /// The URL of the node's JSON-RPC endpoint.
    ///
    /// The recommended zcashd endpoints are:
    /// - Mainnet: `http://127.0.0.1:8232`
    /// - Testnet: `http://127.0.0.1:18232`
    pub url: String,

    /// The `zcash.conf` to read `rpcuser` and `rpcpassword` from.
    ///
    /// If unset, `$HOME/.zcash/zcash.conf` is used.
    pub zcash_conf: Option<PathBuf>,

    /// An RPC cookie file to authenticate with, instead of `zcash.conf`.
    pub cookie_file: Option<PathBuf>,

    /// An RPC user name, which overrides both credential files.
    pub rpc_user: Option<String>,

    /// The password for `rpc_user`.
    pub rpc_password: Option<String>,

    /// How long to wait for a connection to the node.
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,

    /// How long to wait for each RPC response.
    ///
    /// Sends return as soon as the node has queued the operation, so this
    /// does not need to cover transaction creation.
    #[serde(with = "humantime_serde")]
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            zcash_conf: None,
            cookie_file: None,
            rpc_user: None,
            rpc_password: None,
            connect_timeout: Duration::from_secs(5),
            request_timeout: Duration::from_secs(60),
        }
    }
}
