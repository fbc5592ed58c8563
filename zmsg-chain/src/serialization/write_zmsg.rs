use std::io;

use byteorder::WriteBytesExt;

/// Extends [`Write`] with methods for writing memo frame fields.
///
/// [`Write`]: https://doc.rust-lang.org/std/io/trait.Write.html
pub trait WriteZmsgExt: io::Write {
    /// Writes a `u64` using the base-128 varint encoding.
    ///
    /// See [`ReadZmsgExt::read_varint`](super::ReadZmsgExt::read_varint)
    /// for the format.
    #[inline]
    fn write_varint(&mut self, mut value: u64) -> io::Result<()> {
        while value >= 0x80 {
            self.write_u8((value as u8 & 0x7f) | 0x80)?;
            value >>= 7;
        }
        self.write_u8(value as u8)
    }
}

/// Mark all types implementing `Write` as implementing the extension.
impl<W: io::Write + ?Sized> WriteZmsgExt for W {}

/// Returns the number of bytes in the varint encoding of `value`.
pub fn varint_len(value: u64) -> usize {
    let significant_bits = 64 - value.leading_zeros() as usize;
    significant_bits.max(1).div_ceil(7)
}
