//! Shielded memo fields, and the message framings carried inside them.
//!
//! A memo is a fixed 512-byte field attached to every shielded note. The
//! first byte of the field selects how the rest of it is read:
//!
//! | first byte    | framing                                            |
//! |---------------|----------------------------------------------------|
//! | `0x00..=0xf4` | legacy plain text, padded with trailing zero bytes |
//! | `0xf5`        | typed frame: `varint(type) varint(len) payload`    |
//! | `0xf6..=0xfe` | reserved for future framings, skipped              |
//! | `0xff`        | no application data, skipped                       |
//!
//! Outgoing text is written as legacy plain text, without a tag byte.
//! Valid UTF-8 never starts with a byte above `0xf4`, so text always reads
//! back as plain text, but raw payloads passed to [`Memo::encode_bytes`]
//! do not get that guarantee.

use std::{
    cmp, fmt,
    io::{self, Cursor, Write},
};

use byteorder::WriteBytesExt;
use thiserror::Error;

use crate::serialization::{varint_len, ReadZmsgExt, WriteZmsgExt};

#[cfg(any(test, feature = "proptest-impl"))]
mod arbitrary;


/// The size of a memo field, in bytes.
pub const MEMO_SIZE: usize = 512;

/// The first byte of a typed, length-prefixed frame.
pub const TYPED_FRAME_TAG: u8 = 0xf5;

/// The first byte of a memo that carries no application data.
pub const UNFORMATTED_TAG: u8 = 0xff;

/// The typed frame type id for UTF-8 text.
pub const TEXT_TYPE_ID: u64 = 0xa0;

/// An error encoding or decoding a memo.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum MemoError {
    /// The content does not fit in a memo field.
    #[error("message is {len} bytes, but memos have a max length of {MEMO_SIZE} bytes")]
    ContentTooLarge {
        /// The encoded length of the rejected content.
        len: usize,
    },

    /// A typed frame has an unreadable header, or claims more bytes than
    /// the memo field holds.
    #[error("malformed typed memo frame: {0}")]
    MalformedFrame(&'static str),

    /// The node returned a memo that is not valid hex.
    #[error("memo is not valid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    /// The node returned a memo longer than a memo field.
    #[error("memo is {0} bytes, but memo fields are {MEMO_SIZE} bytes")]
    InvalidLength(usize),
}

/// A 512-byte _Memo_ field associated with a shielded note.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Memo(Box<[u8; MEMO_SIZE]>);

impl Memo {
    /// Returns a memo containing `content` as legacy plain text.
    ///
    /// The text bytes are copied as-is, without a tag byte or length prefix.
    pub fn encode_text(content: &str) -> Result<Self, MemoError> {
        Self::encode_bytes(content.as_bytes())
    }

    /// Returns a memo containing `payload` as-is, padded with zero bytes.
    ///
    /// This is the legacy untagged framing. Payloads starting with a byte
    /// of `0xf5` or above will be decoded as a typed, reserved, or
    /// unformatted memo by receivers.
    pub fn encode_bytes(payload: &[u8]) -> Result<Self, MemoError> {
        if payload.len() > MEMO_SIZE {
            return Err(MemoError::ContentTooLarge { len: payload.len() });
        }

        let mut bytes = [0; MEMO_SIZE];
        bytes[..payload.len()].copy_from_slice(payload);

        Ok(Memo(Box::new(bytes)))
    }

    /// Returns a memo containing `payload` in a typed, length-prefixed frame.
    pub fn encode_typed(type_id: u64, payload: &[u8]) -> Result<Self, MemoError> {
        let frame_len = 1 + varint_len(type_id) + varint_len(payload.len() as u64) + payload.len();

        if frame_len > MEMO_SIZE {
            return Err(MemoError::ContentTooLarge { len: frame_len });
        }

        let frame = typed_frame(type_id, payload, frame_len)
            .expect("writing to a Vec never fails");

        Self::encode_bytes(&frame)
    }

    /// Parses a hex-encoded memo, as returned by the node.
    ///
    /// Short memos are padded with zero bytes.
    pub fn from_hex(memo_hex: &str) -> Result<Self, MemoError> {
        let bytes = hex::decode(memo_hex.trim())?;
        Self::try_from(&bytes[..])
    }

    /// Returns the full memo field.
    pub fn as_bytes(&self) -> &[u8; MEMO_SIZE] {
        &self.0
    }

    /// Returns the memo bytes without their trailing zero padding.
    pub fn significant_bytes(&self) -> &[u8] {
        let len = self
            .0
            .iter()
            .rposition(|byte| *byte != 0)
            .map_or(0, |last| last + 1);

        &self.0[..len]
    }

    /// Returns the hex encoding of the memo without its trailing padding,
    /// as sent to the node.
    pub fn to_hex(&self) -> String {
        hex::encode(self.significant_bytes())
    }

    /// Decodes the memo into a message.
    ///
    /// Every first byte has a framing, so the only failures are typed frames
    /// with a malformed header or length.
    pub fn decode(&self) -> Result<DecodedMemo, MemoError> {
        match self.0[0] {
            0x00..=0xf4 => Ok(DecodedMemo::PlainText(text(self.significant_bytes()))),
            // TYPED_FRAME_TAG
            0xf5 => self.decode_typed_frame(),
            0xf6..=0xfe => Ok(DecodedMemo::Reserved { type_id: None }),
            // UNFORMATTED_TAG
            0xff => Ok(DecodedMemo::Unformatted),
        }
    }

    fn decode_typed_frame(&self) -> Result<DecodedMemo, MemoError> {
        let mut reader = Cursor::new(&self.0[1..]);

        let type_id = reader
            .read_varint()
            .map_err(|_| MemoError::MalformedFrame("unreadable type id"))?;
        let payload_len = reader
            .read_varint()
            .map_err(|_| MemoError::MalformedFrame("unreadable payload length"))?;

        let header_len = 1 + reader.position() as usize;
        let frame_len = (header_len as u64).saturating_add(payload_len);

        if frame_len > MEMO_SIZE as u64 {
            return Err(MemoError::MalformedFrame(
                "payload length runs past the end of the memo",
            ));
        }

        let payload = &self.0[header_len..frame_len as usize];

        if type_id == TEXT_TYPE_ID {
            Ok(DecodedMemo::TypedText(text(payload)))
        } else {
            Ok(DecodedMemo::Reserved {
                type_id: Some(type_id),
            })
        }
    }
}

impl<'a> TryFrom<&'a [u8]> for Memo {
    type Error = MemoError;

    fn try_from(input: &'a [u8]) -> Result<Self, Self::Error> {
        let mut full_bytes = [0; MEMO_SIZE];

        match input.len().cmp(&MEMO_SIZE) {
            cmp::Ordering::Greater => Err(MemoError::InvalidLength(input.len())),
            _ => {
                full_bytes[..input.len()].copy_from_slice(input);
                Ok(Memo(Box::new(full_bytes)))
            }
        }
    }
}

impl fmt::Debug for Memo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bytes = self.significant_bytes();

        // Binary memos are easier to read as hex.
        let output = match std::str::from_utf8(bytes) {
            Ok(memo) => memo.to_string(),
            Err(_) => hex::encode(bytes),
        };

        f.debug_tuple("Memo").field(&output).finish()
    }
}

/// Writes the tag, header and payload of a typed frame.
fn typed_frame(type_id: u64, payload: &[u8], frame_len: usize) -> io::Result<Vec<u8>> {
    let mut frame = Vec::with_capacity(frame_len);

    frame.write_u8(TYPED_FRAME_TAG)?;
    frame.write_varint(type_id)?;
    frame.write_varint(payload.len() as u64)?;
    frame.write_all(payload)?;

    Ok(frame)
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// The kind of message found in a memo.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MemoKind {
    /// Legacy untagged text.
    PlainText,
    /// Text in a typed frame.
    TypedText,
    /// No application data.
    Unformatted,
    /// A framing or type this version does not understand.
    Reserved,
}

/// A message decoded from a [`Memo`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DecodedMemo {
    /// Legacy untagged text, with the zero padding removed.
    PlainText(String),

    /// Text from a typed frame with [`TEXT_TYPE_ID`].
    TypedText(String),

    /// A memo starting with [`UNFORMATTED_TAG`].
    Unformatted,

    /// A reserved first byte, or a typed frame with an unknown type.
    Reserved {
        /// The frame's type id, if the memo was a typed frame.
        type_id: Option<u64>,
    },
}

impl DecodedMemo {
    /// Returns the kind of this message.
    pub fn kind(&self) -> MemoKind {
        match self {
            DecodedMemo::PlainText(_) => MemoKind::PlainText,
            DecodedMemo::TypedText(_) => MemoKind::TypedText,
            DecodedMemo::Unformatted => MemoKind::Unformatted,
            DecodedMemo::Reserved { .. } => MemoKind::Reserved,
        }
    }

    /// Returns the message text, which is empty for skipped kinds.
    pub fn content(&self) -> &str {
        match self {
            DecodedMemo::PlainText(content) | DecodedMemo::TypedText(content) => content,
            DecodedMemo::Unformatted | DecodedMemo::Reserved { .. } => "",
        }
    }

    /// Returns the typed frame type id, if there was a typed frame.
    pub fn type_id(&self) -> Option<u64> {
        match self {
            DecodedMemo::TypedText(_) => Some(TEXT_TYPE_ID),
            DecodedMemo::Reserved { type_id } => *type_id,
            DecodedMemo::PlainText(_) | DecodedMemo::Unformatted => None,
        }
    }

    /// Returns true if this message should be shown to users.
    pub fn is_visible(&self) -> bool {
        matches!(self.kind(), MemoKind::PlainText | MemoKind::TypedText)
    }

    /// Consumes the message, returning its text.
    pub fn into_content(self) -> String {
        match self {
            DecodedMemo::PlainText(content) | DecodedMemo::TypedText(content) => content,
            DecodedMemo::Unformatted | DecodedMemo::Reserved { .. } => String::new(),
        }
    }
}
