//! Text output for messages.

use std::fmt;

use crate::Message;

/// The line printed around each message.
pub const MESSAGE_RULE: &str = "==========================================";

/// A message formatted as a block of text for the terminal.
///
/// Verbose output adds the transaction id, time and confirmations.
#[derive(Copy, Clone, Debug)]
pub struct MessageBlock<'a> {
    message: &'a Message,
    verbose: bool,
}

impl<'a> MessageBlock<'a> {
    /// Returns a block for `message`.
    pub fn new(message: &'a Message, verbose: bool) -> Self {
        Self { message, verbose }
    }
}

impl fmt::Display for MessageBlock<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = self.message;

        writeln!(f, "{MESSAGE_RULE}")?;
        writeln!(f, "Message (val = {})", message.value)?;
        writeln!(f, "To: {}", message.to)?;

        if self.verbose {
            writeln!(f, "Txid: {}", message.txid)?;
            if let Some(timestamp) = message.timestamp {
                writeln!(f, "Time: {}", timestamp.format("%Y-%m-%d %H:%M:%S UTC"))?;
            }
            if let Some(confirmations) = message.confirmations {
                writeln!(f, "Confirmations: {confirmations}")?;
            }
        }

        writeln!(f, "{}", message.content)?;
        writeln!(f, "{MESSAGE_RULE}")
    }
}

/// Returns `message` as a block of text for the terminal.
pub fn render_message(message: &Message, verbose: bool) -> String {
    MessageBlock::new(message, verbose).to_string()
}
