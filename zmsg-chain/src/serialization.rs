//! Byte-level serialization helpers for memo frames.
//!
//! This module contains `WriteZmsgExt` and `ReadZmsgExt`, extension traits
//! for `io::Write` and `io::Read` with utility functions for reading and
//! writing the base-128 variable-length integers used in typed memo frames.

mod error;
mod read_zmsg;
mod write_zmsg;


pub use error::SerializationError;
pub use read_zmsg::ReadZmsgExt;
pub use write_zmsg::{varint_len, WriteZmsgExt};

/// The maximum number of bytes in a varint encoding of a `u64`.
///
/// Each byte carries 7 bits of the value, so 64 bits need 10 bytes.
pub const MAX_VARINT_LEN: usize = 10;
