//! zmsg arguments
//!
//! For usage please refer to the program help: `zmsg --help`

use std::{path::PathBuf, time::Duration};

use color_eyre::eyre::{eyre, Result};
use serde::de::{value::StrDeserializer, IntoDeserializer};
use structopt::StructOpt;

use zmsg::ZmsgConfig;
use zmsg_chain::{Address, Zec};

/// zmsg arguments
#[derive(Debug, StructOpt)]
#[structopt(
    name = "zmsg",
    about = "Send and read text messages in Zcash shielded memos, using a local zcashd"
)]
pub struct Args {
    /// Path to a TOML config file.
    #[structopt(short, long, parse(from_os_str))]
    pub config: Option<PathBuf>,

    /// zcashd JSON-RPC URL, overrides the config file.
    #[structopt(long)]
    pub rpc_url: Option<String>,

    /// The command to run.
    #[structopt(subcommand)]
    pub command: Command,
}

/// zmsg commands
#[derive(Debug, StructOpt)]
pub enum Command {
    /// List the messages received by the wallet's addresses.
    Check {
        /// Show transaction details, and log progress.
        #[structopt(short, long)]
        verbose: bool,

        /// Include messages that have no confirmations yet.
        #[structopt(long)]
        noconf: bool,
    },

    /// Send a message to a shielded address.
    Sendmsg(SendArgs),
}

/// sendmsg arguments
#[derive(Debug, StructOpt)]
pub struct SendArgs {
    /// Address to send the message to.
    #[structopt(long)]
    pub to: Option<String>,

    /// Address to send the message from, defaults to the wallet's first address.
    #[structopt(long)]
    pub from: Option<String>,

    /// ZEC value to send with the message.
    #[structopt(long)]
    pub txval: Option<Zec>,

    /// Longest time to wait for the send, like `30s` or `5m`.
    #[structopt(long, parse(try_from_str = parse_duration))]
    pub timeout: Option<Duration>,

    /// The message.
    pub message: Vec<String>,
}

impl SendArgs {
    /// Returns the recipient and message text, checking that both were given.
    pub fn recipient_and_message(&self) -> Result<(Address, String)> {
        let to = self.to.as_deref().unwrap_or_default();
        if to.trim().is_empty() {
            return Err(eyre!("please specify an address to send the message to"));
        }

        let message = self.message.join(" ");
        if message.is_empty() {
            return Err(eyre!("no message specified"));
        }

        Ok((to.parse()?, message))
    }

    /// Returns the sender, if one was given.
    pub fn sender(&self) -> Result<Option<Address>> {
        Ok(self.from.as_deref().map(str::parse::<Address>).transpose()?)
    }
}

impl Args {
    /// Loads the config file, and applies command line overrides.
    pub fn config(&self) -> Result<ZmsgConfig> {
        let mut config = ZmsgConfig::load(self.config.as_deref())?;

        if let Some(rpc_url) = &self.rpc_url {
            config.rpc.url = rpc_url.clone();
        }

        if let Command::Sendmsg(send) = &self.command {
            if let Some(timeout) = send.timeout {
                config.operation.max_wait = Some(timeout);
            }
            if let Some(txval) = send.txval {
                config.send.default_amount = txval;
            }
        }

        Ok(config)
    }
}

/// Parses a human-readable duration, the same way as the config file.
fn parse_duration(duration: &str) -> Result<Duration, serde::de::value::Error> {
    let deserializer: StrDeserializer<'_, serde::de::value::Error> = duration.into_deserializer();
    humantime_serde::deserialize(deserializer)
}
