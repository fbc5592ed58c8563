//! zmsg configuration, loaded from an optional TOML file.
//!
//! Every section and field is optional, and missing values use the
//! defaults:
//!
//! ```toml
//! [rpc]
//! url = "http://127.0.0.1:8232"
//! connect_timeout = "5s"
//! request_timeout = "1m"
//!
//! [operation]
//! poll_interval = "1s"
//! max_wait = "10m"
//!
//! [inbox]
//! fetch_timestamps = true
//!
//! [send]
//! default_amount = 0.00001
//! ```

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use zmsg_node_services::rpc_client;

use crate::{inbox, operation, send};

/// An error loading a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("could not read config file {path:?}: {source}")]
    Read {
        /// The config file.
        path: PathBuf,
        /// The read error.
        source: std::io::Error,
    },

    /// The file is not a valid config.
    #[error("invalid config file {path:?}: {source}")]
    Parse {
        /// The config file.
        path: PathBuf,
        /// The parse error.
        source: toml::de::Error,
    },
}

/// Configuration for zmsg.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ZmsgConfig {
    /// The node's RPC endpoint and credentials.
    pub rpc: rpc_client::Config,

    /// Waiting for send operations.
    pub operation: operation::Config,

    /// Reading received messages.
    pub inbox: inbox::Config,

    /// Sending messages.
    pub send: send::Config,
}

impl ZmsgConfig {
    /// Loads the config file at `path`, or the default config if there is
    /// no path.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use color_eyre::eyre::Result;

    use super::*;

    #[test]
    fn missing_path_is_default_config() -> Result<()> {
        zmsg_test::init();

        assert_eq!(ZmsgConfig::load(None)?, ZmsgConfig::default());

        Ok(())
    }

    #[test]
    fn load_partial_config() -> Result<()> {
        zmsg_test::init();

        let dir = tempfile::tempdir()?;
        let path = dir.path().join("zmsg.toml");
        fs::write(
            &path,
            r#"
            [rpc]
            url = "http://127.0.0.1:18232"
            rpc_user = "alice"

            [operation]
            max_wait = "30s"

            [inbox]
            fetch_timestamps = false
            "#,
        )?;

        let config = ZmsgConfig::load(Some(&path))?;

        assert_eq!(config.rpc.url, "http://127.0.0.1:18232");
        assert_eq!(config.rpc.rpc_user.as_deref(), Some("alice"));
        assert_eq!(config.operation.max_wait, Some(Duration::from_secs(30)));
        assert_eq!(
            config.operation.poll_interval,
            operation::DEFAULT_POLL_INTERVAL
        );
        assert!(!config.inbox.fetch_timestamps);
        assert_eq!(config.send, send::Config::default());

        Ok(())
    }

    #[test]
    fn default_config_round_trips() -> Result<()> {
        zmsg_test::init();

        let config = ZmsgConfig::default();
        let toml = toml::to_string(&config)?;

        assert_eq!(toml::from_str::<ZmsgConfig>(&toml)?, config);

        Ok(())
    }

    #[test]
    fn bad_config_files_are_errors() -> Result<()> {
        zmsg_test::init();

        let dir = tempfile::tempdir()?;

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            ZmsgConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));

        let unknown_field = dir.path().join("unknown.toml");
        fs::write(&unknown_field, "[send]\namount = 1\n")?;
        assert!(matches!(
            ZmsgConfig::load(Some(&unknown_field)),
            Err(ConfigError::Parse { .. })
        ));

        Ok(())
    }
}
