use std::io;

use byteorder::ReadBytesExt;

use super::{SerializationError, MAX_VARINT_LEN};

/// Extends [`Read`] with methods for reading memo frame fields.
///
/// [`Read`]: https://doc.rust-lang.org/std/io/trait.Read.html
pub trait ReadZmsgExt: io::Read {
    /// Reads a `u64` using the base-128 varint encoding.
    ///
    /// Each byte contributes its low 7 bits, least significant group first.
    /// A set high bit means more bytes follow.
    ///
    /// # Examples
    ///
    /// ```
    /// use zmsg_chain::serialization::ReadZmsgExt;
    ///
    /// use std::io::Cursor;
    /// assert_eq!(0x05, Cursor::new(b"\x05").read_varint().unwrap());
    /// assert_eq!(0xa0, Cursor::new(b"\xa0\x01").read_varint().unwrap());
    /// assert_eq!(300, Cursor::new(b"\xac\x02").read_varint().unwrap());
    /// ```
    ///
    /// Values that run past the end of the input, or that do not fit in a
    /// `u64`, are errors:
    /// ```
    /// # use zmsg_chain::serialization::ReadZmsgExt;
    /// # use std::io::Cursor;
    /// Cursor::new(b"\x80").read_varint().unwrap_err();
    /// Cursor::new(b"\xff\xff\xff\xff\xff\xff\xff\xff\xff\x02").read_varint().unwrap_err();
    /// ```
    #[inline]
    fn read_varint(&mut self) -> Result<u64, SerializationError> {
        let mut value: u64 = 0;

        for index in 0..MAX_VARINT_LEN {
            let byte = self.read_u8()?;
            let bits = u64::from(byte & 0x7f);

            // The last byte only has room for the top bit of a u64.
            if index == MAX_VARINT_LEN - 1 && bits > 1 {
                return Err(SerializationError::Parse("varint overflows u64"));
            }

            value |= bits << (7 * index);

            if byte & 0x80 == 0 {
                return Ok(value);
            }
        }

        Err(SerializationError::Parse("varint is longer than 10 bytes"))
    }
}

/// Mark all types implementing `Read` as implementing the extension.
impl<R: io::Read + ?Sized> ReadZmsgExt for R {}
