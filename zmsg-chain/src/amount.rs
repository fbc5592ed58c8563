//! ZEC amounts, stored as a whole number of zatoshis.
//!
//! The node's JSON-RPC interface reads and writes amounts as decimal ZEC
//! numbers. Converting at the edges keeps arithmetic and display exact.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
mod tests;

/// The number of zatoshis in 1 ZEC.
pub const COIN: u64 = 100_000_000;

/// The maximum zatoshi amount.
pub const MAX_MONEY: u64 = 21_000_000 * COIN;

/// The number of decimal places in a ZEC amount.
pub const DECIMALS: usize = 8;

/// An error converting a value into a [`Zec`] amount.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum AmountError {
    /// The amount is negative, or not a finite number.
    #[error("amount must be a finite, non-negative number of ZEC")]
    Invalid,

    /// The amount is more than the total ZEC supply.
    #[error("amount of {zatoshis} zatoshis is more than the maximum of {MAX_MONEY}")]
    TooLarge {
        /// The rejected amount, saturated to `u64::MAX`.
        zatoshis: u64,
    },

    /// The amount has more decimal places than a zatoshi.
    #[error("amounts can have at most {DECIMALS} decimal places, got {0}")]
    TooPrecise(usize),

    /// The amount is not a decimal number.
    #[error("could not parse {0:?} as a ZEC amount")]
    Parse(String),
}

/// A non-negative ZEC amount, stored in zatoshis.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Zec(u64);

impl Zec {
    /// Returns a ZEC amount of `zatoshis`, for constants.
    ///
    /// # Panics
    ///
    /// If `zatoshis` is more than [`MAX_MONEY`].
    pub const fn new(zatoshis: u64) -> Self {
        assert!(zatoshis <= MAX_MONEY);
        Zec(zatoshis)
    }

    /// Returns a ZEC amount of `zatoshis`.
    pub fn from_zatoshis(zatoshis: u64) -> Result<Self, AmountError> {
        if zatoshis > MAX_MONEY {
            return Err(AmountError::TooLarge { zatoshis });
        }

        Ok(Zec(zatoshis))
    }

    /// Returns the amount in zatoshis.
    pub fn zatoshis(&self) -> u64 {
        self.0
    }

    /// Returns the amount in ZEC, as the node's JSON-RPC interface expects.
    ///
    /// Every valid amount is exactly representable as an `f64` zatoshi count,
    /// so only the final division rounds.
    pub fn as_zec_f64(&self) -> f64 {
        self.0 as f64 / COIN as f64
    }
}

impl TryFrom<f64> for Zec {
    type Error = AmountError;

    fn try_from(zec: f64) -> Result<Self, Self::Error> {
        if !zec.is_finite() || zec < 0.0 {
            return Err(AmountError::Invalid);
        }

        let zatoshis = (zec * COIN as f64).round();
        if zatoshis > MAX_MONEY as f64 {
            // `as` saturates float to int casts.
            return Err(AmountError::TooLarge {
                zatoshis: zatoshis as u64,
            });
        }

        Ok(Zec(zatoshis as u64))
    }
}

impl From<Zec> for f64 {
    fn from(amount: Zec) -> Self {
        amount.as_zec_f64()
    }
}

impl FromStr for Zec {
    type Err = AmountError;

    /// Parses a decimal ZEC amount, like `0.00001` or `2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || AmountError::Parse(s.to_string());

        let (whole, fraction) = s.trim().split_once('.').unwrap_or((s.trim(), ""));

        if whole.is_empty() && fraction.is_empty() {
            return Err(parse_error());
        }
        if !whole.bytes().chain(fraction.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(parse_error());
        }
        if fraction.len() > DECIMALS {
            return Err(AmountError::TooPrecise(fraction.len()));
        }

        let whole: u64 = match whole {
            "" => 0,
            whole => whole.parse().map_err(|_| parse_error())?,
        };
        let fraction: u64 = match fraction {
            "" => 0,
            fraction => {
                let scale = 10u64.pow((DECIMALS - fraction.len()) as u32);
                fraction.parse::<u64>().map_err(|_| parse_error())? * scale
            }
        };

        let zatoshis = whole
            .checked_mul(COIN)
            .and_then(|whole| whole.checked_add(fraction))
            .ok_or(AmountError::TooLarge { zatoshis: u64::MAX })?;

        Zec::from_zatoshis(zatoshis)
    }
}

impl fmt::Display for Zec {
    /// Formats the amount as ZEC with all 8 decimal places.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zec = format!("{}.{:0width$}", self.0 / COIN, self.0 % COIN, width = DECIMALS);

        f.pad(&zec)
    }
}
