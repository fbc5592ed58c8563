//! RPC credentials, read from `zcash.conf` or an RPC cookie file.
//!
//! Credentials are optional: if a file can't be read, requests are sent
//! without authentication, and the node decides whether to reject them.

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use crate::rpc_client::Config;


/// The user name in an RPC cookie file.
pub const COOKIEAUTH_USER: &str = "__cookie__";

/// HTTP basic authentication credentials for the node's RPC interface.
#[derive(Clone, Default, Eq, PartialEq)]
pub struct Credentials {
    /// The RPC user name.
    pub user: String,

    /// The RPC password.
    pub password: String,
}

impl Credentials {
    /// Returns credentials for `user` and `password`.
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Returns true if there is no user name, so requests are unauthenticated.
    pub fn is_empty(&self) -> bool {
        self.user.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"[redacted]")
            .finish()
    }
}

/// Parses `rpcuser` and `rpcpassword` from the contents of a `zcash.conf`.
///
/// Lines are `key=value` pairs, surrounding whitespace is ignored, and later
/// lines override earlier ones. Comments and lines without `=` are skipped.
pub fn parse_zcash_conf(contents: &str) -> Credentials {
    let mut credentials = Credentials::default();

    for line in contents.lines() {
        if line.trim_start().starts_with('#') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        match key.trim() {
            "rpcuser" => credentials.user = value.trim().to_string(),
            "rpcpassword" => credentials.password = value.trim().to_string(),
            _ => {}
        }
    }

    credentials
}

/// Parses the contents of an RPC cookie file, `__cookie__:<password>`.
///
/// Files without the cookie user prefix are treated as a bare password.
pub fn parse_cookie(contents: &str) -> Credentials {
    let contents = contents.trim();
    let password = contents
        .strip_prefix(COOKIEAUTH_USER)
        .and_then(|rest| rest.strip_prefix(':'))
        .unwrap_or(contents);

    Credentials::new(COOKIEAUTH_USER, password)
}

/// Reads credentials from the `zcash.conf` at `path`.
pub fn read_zcash_conf(path: &Path) -> io::Result<Credentials> {
    fs::read_to_string(path).map(|contents| parse_zcash_conf(&contents))
}

/// Reads credentials from the RPC cookie file at `path`.
pub fn read_cookie(path: &Path) -> io::Result<Credentials> {
    fs::read_to_string(path).map(|contents| parse_cookie(&contents))
}

/// Returns the default `zcash.conf` location, `$HOME/.zcash/zcash.conf`.
pub fn default_zcash_conf_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".zcash").join("zcash.conf"))
}

/// Loads the credentials selected by `config`.
///
/// An explicit `rpc_user` takes priority, then the cookie file if one is
/// configured, then `zcash.conf`. Read failures are logged, and return
/// empty credentials.
pub fn load(config: &Config) -> Credentials {
    if let Some(user) = &config.rpc_user {
        return Credentials::new(user, config.rpc_password.clone().unwrap_or_default());
    }

    if let Some(cookie_file) = &config.cookie_file {
        return read_cookie(cookie_file).unwrap_or_else(|error| {
            tracing::warn!(
                ?error,
                cookie_file = %cookie_file.display(),
                "could not read RPC cookie file, sending requests without credentials",
            );
            Credentials::default()
        });
    }

    let Some(zcash_conf) = config.zcash_conf.clone().or_else(default_zcash_conf_path) else {
        tracing::warn!("could not find a home directory, sending requests without credentials");
        return Credentials::default();
    };

    match read_zcash_conf(&zcash_conf) {
        Ok(credentials) => {
            if credentials.is_empty() {
                tracing::warn!(
                    zcash_conf = %zcash_conf.display(),
                    "no rpcuser in zcash config, sending requests without credentials",
                );
            }
            credentials
        }
        Err(error) => {
            tracing::warn!(
                ?error,
                zcash_conf = %zcash_conf.display(),
                "could not read zcash config, sending requests without credentials",
            );
            Credentials::default()
        }
    }
}
