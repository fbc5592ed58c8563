//! Shielded payment addresses, as the node names them.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An error parsing an [`Address`].
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum AddressError {
    /// The address was empty, or only whitespace.
    #[error("address must not be empty")]
    Empty,

    /// The address contains whitespace.
    #[error("address {0:?} contains whitespace")]
    Whitespace(String),
}

/// An encoded payment address owned by, or sent to from, the node's wallet.
///
/// Addresses are validated by the node, so this is an opaque string.
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    /// Returns the encoded address.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Address {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.is_empty() {
            return Err(AddressError::Empty);
        }
        if s.chars().any(char::is_whitespace) {
            return Err(AddressError::Whitespace(s.to_string()));
        }

        Ok(Address(s.to_string()))
    }
}

impl TryFrom<String> for Address {
    type Error = AddressError;

    fn try_from(address: String) -> Result<Self, Self::Error> {
        address.parse()
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
