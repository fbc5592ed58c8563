//! Hex-encoded memo fields, in the form the node returns them.
//!
//! The node always returns the full 512-byte field, so every vector is
//! 1024 hex characters long.

use once_cell::sync::Lazy;

/// The number of hex characters in a memo field.
pub const MEMO_HEX_LEN: usize = 1024;

/// Returns `prefix` padded to a full memo field with zero bytes.
pub fn padded_memo_hex(prefix: &[u8]) -> String {
    let mut memo_hex = hex::encode(prefix);
    memo_hex.push_str(&"0".repeat(MEMO_HEX_LEN - memo_hex.len()));
    memo_hex
}

/// A legacy plain text memo containing `hello`.
pub static HELLO_PLAIN_TEXT_MEMO_HEX: Lazy<String> = Lazy::new(|| padded_memo_hex(b"hello"));

/// A legacy plain text memo containing `how are you?`.
pub static HOW_ARE_YOU_PLAIN_TEXT_MEMO_HEX: Lazy<String> =
    Lazy::new(|| padded_memo_hex(b"how are you?"));

/// A typed text frame containing `hello`: `f5 varint(0xa0) varint(5) hello`.
pub static HELLO_TYPED_TEXT_MEMO_HEX: Lazy<String> =
    Lazy::new(|| padded_memo_hex(b"\xf5\xa0\x01\x05hello"));

/// A typed frame with the unknown type id `0x42`.
pub static UNKNOWN_TYPE_MEMO_HEX: Lazy<String> =
    Lazy::new(|| padded_memo_hex(b"\xf5\x42\x03abc"));

/// The memo written by wallets when a transfer has no memo:
/// `0xf6` followed by zero bytes.
pub static NO_MEMO_HEX: Lazy<String> = Lazy::new(|| padded_memo_hex(b"\xf6"));

/// A memo marked as carrying no application data.
pub static UNFORMATTED_MEMO_HEX: Lazy<String> =
    Lazy::new(|| padded_memo_hex(b"\xff\x01\x02\x03"));

/// A typed frame whose declared length runs past the end of the memo.
pub static OVERLONG_TYPED_MEMO_HEX: Lazy<String> =
    Lazy::new(|| padded_memo_hex(b"\xf5\xa0\x01\xfe\x03"));
