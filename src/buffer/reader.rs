//! Byte-aligned and bit-mode read cursors

use byteorder::{BigEndian, ReadBytesExt};

use super::latin1_to_string;
use crate::error::{Error, Result};

/// Read cursor over a borrowed byte buffer.
///
/// All multi-byte reads are big-endian. A read past the end of the buffer is
/// corrupted data, not a recoverable condition: it fails with
/// [`Error::OutOfBounds`] and the caller is expected to abandon the whole
/// decode operation.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a cursor at the start of `data`.
    #[must_use]
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current byte position.
    #[must_use]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Bytes left before the end of the buffer.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True when the cursor has consumed every byte.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pos == self.data.len()
    }

    /// Borrow the next `n` bytes and advance past them.
    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::OutOfBounds {
                wanted: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read an unsigned byte.
    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read a signed byte.
    pub fn read_i8(&mut self) -> Result<i8> {
        Ok(self.take(1)?[0] as i8)
    }

    /// Read a big-endian unsigned 16-bit integer.
    pub fn read_u16(&mut self) -> Result<u16> {
        let mut bytes = self.take(2)?;
        Ok(bytes.read_u16::<BigEndian>()?)
    }

    /// Read a big-endian signed 16-bit integer.
    pub fn read_i16(&mut self) -> Result<i16> {
        let mut bytes = self.take(2)?;
        Ok(bytes.read_i16::<BigEndian>()?)
    }

    /// Read a big-endian unsigned 24-bit integer.
    pub fn read_u24(&mut self) -> Result<u32> {
        let mut bytes = self.take(3)?;
        Ok(bytes.read_u24::<BigEndian>()?)
    }

    /// Read a big-endian unsigned 32-bit integer.
    pub fn read_u32(&mut self) -> Result<u32> {
        let mut bytes = self.take(4)?;
        Ok(bytes.read_u32::<BigEndian>()?)
    }

    /// Read a big-endian signed 32-bit integer.
    pub fn read_i32(&mut self) -> Result<i32> {
        let mut bytes = self.take(4)?;
        Ok(bytes.read_i32::<BigEndian>()?)
    }

    /// Borrow `n` raw bytes.
    pub fn read_bytes(&mut self, n: usize) -> Result<&'a [u8]> {
        self.take(n)
    }

    /// Advance past `n` bytes without reading them.
    pub fn skip(&mut self, n: usize) -> Result<()> {
        self.take(n)?;
        Ok(())
    }

    /// Read a NUL-terminated Latin-1 string, consuming the terminator.
    ///
    /// Fails with [`Error::MalformedString`] if the buffer ends before a
    /// terminator is found.
    pub fn read_cstr(&mut self) -> Result<String> {
        let start = self.pos;
        let terminator = self.data[start..]
            .iter()
            .position(|&b| b == 0)
            .ok_or(Error::MalformedString { offset: start })?;
        let value = latin1_to_string(&self.data[start..start + terminator]);
        self.pos = start + terminator + 1;
        Ok(value)
    }

    /// Enter bit mode at the current byte position.
    ///
    /// The byte cursor is frozen while the returned [`BitReader`] is live;
    /// call [`BitReader::finish`] to leave bit mode and realign it.
    pub fn bits(&mut self) -> BitReader<'_, 'a> {
        BitReader {
            bit_pos: self.pos * 8,
            reader: self,
        }
    }
}

/// Bit-mode read cursor, created by [`ByteReader::bits`].
///
/// Reads are MSB-first within each byte, matching the layout of the legacy
/// tightly-packed flag fields. Dropping the reader without calling
/// [`finish`](Self::finish) leaves the underlying byte cursor where bit mode
/// was entered.
#[derive(Debug)]
pub struct BitReader<'r, 'a> {
    reader: &'r mut ByteReader<'a>,
    bit_pos: usize,
}

impl BitReader<'_, '_> {
    /// Read `count` bits (1..=32) as an unsigned integer.
    pub fn read_bits(&mut self, count: usize) -> Result<u32> {
        debug_assert!((1..=32).contains(&count), "bit reads are 1..=32 bits");
        let bit_len = self.reader.data.len() * 8;
        if self.bit_pos + count > bit_len {
            return Err(Error::BitOverflow {
                wanted: count,
                remaining: bit_len - self.bit_pos,
            });
        }

        let mut value = 0u32;
        let mut remaining = count;
        while remaining > 0 {
            let byte = self.reader.data[self.bit_pos >> 3];
            let bit_offset = self.bit_pos & 7;
            let available = 8 - bit_offset;
            let take = remaining.min(available);
            let chunk = u32::from(byte >> (available - take)) & ((1 << take) - 1);
            value = (value << take) | chunk;
            self.bit_pos += take;
            remaining -= take;
        }
        Ok(value)
    }

    /// Leave bit mode, advancing the byte cursor to the next byte boundary.
    ///
    /// Unread bits of the current partial byte are discarded.
    pub fn finish(self) {
        self.reader.pos = (self.bit_pos + 7) >> 3;
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn fixed_width_reads_are_big_endian() {
        let data = [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0];
        let mut buf = ByteReader::new(&data);
        assert_eq!(buf.read_u16().unwrap(), 0x1234);
        assert_eq!(buf.read_u24().unwrap(), 0x56789a);
        assert_eq!(buf.read_u8().unwrap(), 0xbc);
        assert_eq!(buf.read_u16().unwrap(), 0xdef0);
        assert!(buf.is_empty());
    }

    #[test]
    fn signed_reads_sign_extend() {
        let data = [0xff, 0xff, 0xfe, 0xff, 0xff, 0xff, 0x80];
        let mut buf = ByteReader::new(&data);
        assert_eq!(buf.read_i8().unwrap(), -1);
        assert_eq!(buf.read_i16().unwrap(), -2);
        assert_eq!(buf.read_i32().unwrap(), -128);
    }

    #[test]
    fn read_past_end_is_out_of_bounds() {
        let mut buf = ByteReader::new(&[0x01]);
        let err = buf.read_u32().unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                wanted: 4,
                remaining: 1
            }
        ));
        // The failed read must not advance the cursor.
        assert_eq!(buf.read_u8().unwrap(), 0x01);
    }

    #[test]
    fn skip_advances_without_reading() {
        let data = [0xaa, 0xbb, 0xcc, 0xdd];
        let mut buf = ByteReader::new(&data);
        buf.skip(2).unwrap();
        assert_eq!(buf.pos(), 2);
        assert_eq!(buf.read_u16().unwrap(), 0xccdd);

        let err = buf.skip(1).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds {
                wanted: 1,
                remaining: 0
            }
        ));
    }

    #[test]
    fn cstr_reads_until_terminator() {
        let data = b"helm\0rest";
        let mut buf = ByteReader::new(data);
        assert_eq!(buf.read_cstr().unwrap(), "helm");
        assert_eq!(buf.read_bytes(4).unwrap(), b"rest");
    }

    #[test]
    fn cstr_decodes_latin1() {
        let data = [0xe9, 0xfc, 0x41, 0x00];
        let mut buf = ByteReader::new(&data);
        assert_eq!(buf.read_cstr().unwrap(), "\u{e9}\u{fc}A");
    }

    #[test]
    fn cstr_without_terminator_is_malformed() {
        let mut buf = ByteReader::new(b"ab");
        buf.read_u8().unwrap();
        let err = buf.read_cstr().unwrap_err();
        assert!(matches!(err, Error::MalformedString { offset: 1 }));
    }

    #[test]
    fn bit_reads_are_msb_first() {
        // 0b1011_0110 0b1100_0001
        let data = [0xb6, 0xc1];
        let mut buf = ByteReader::new(&data);
        let mut bits = buf.bits();
        assert_eq!(bits.read_bits(1).unwrap(), 1);
        assert_eq!(bits.read_bits(3).unwrap(), 0b011);
        assert_eq!(bits.read_bits(6).unwrap(), 0b0110_11);
        bits.finish();
        assert_eq!(buf.pos(), 2);
    }

    #[test]
    fn bit_region_realigns_before_byte_reads() {
        // 1-bit, 7-bit, and 9-bit regions each followed by a byte-aligned
        // read must land the cursor on the correct byte.
        for (count, expected_pos) in [(1, 1), (7, 1), (9, 2)] {
            let data = [0xff, 0xff, 0x42];
            let mut buf = ByteReader::new(&data);
            let mut bits = buf.bits();
            bits.read_bits(count).unwrap();
            bits.finish();
            assert_eq!(buf.pos(), expected_pos, "{count}-bit region");
            if expected_pos == 2 {
                assert_eq!(buf.read_u8().unwrap(), 0x42);
            }
        }
    }

    #[test]
    fn bit_read_past_end_overflows() {
        let data = [0xff];
        let mut buf = ByteReader::new(&data);
        let mut bits = buf.bits();
        bits.read_bits(6).unwrap();
        let err = bits.read_bits(3).unwrap_err();
        assert!(matches!(
            err,
            Error::BitOverflow {
                wanted: 3,
                remaining: 2
            }
        ));
    }
}
