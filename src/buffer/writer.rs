//! Byte-aligned and bit-mode write cursors
//!
//! Write mode mirrors every read operation and is used only by the offline
//! packer and by tests. Writes into the growable buffer are infallible.

use super::char_to_latin1;

/// Write cursor over a growable byte buffer. All multi-byte writes are
/// big-endian.
#[derive(Debug, Default, Clone)]
pub struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    /// Create an empty writer.
    #[must_use]
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create an empty writer with a pre-allocated capacity.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing has been written.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the written bytes.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Consume the writer, yielding the written bytes.
    #[must_use]
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Write an unsigned byte.
    pub fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    /// Write a signed byte.
    pub fn write_i8(&mut self, value: i8) {
        self.data.push(value as u8);
    }

    /// Write a big-endian unsigned 16-bit integer.
    pub fn write_u16(&mut self, value: u16) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a big-endian signed 16-bit integer.
    pub fn write_i16(&mut self, value: i16) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a big-endian unsigned 24-bit integer. The top byte of `value`
    /// must be zero.
    pub fn write_u24(&mut self, value: u32) {
        debug_assert!(value <= 0x00ff_ffff, "u24 write out of range");
        self.data.push((value >> 16) as u8);
        self.data.push((value >> 8) as u8);
        self.data.push(value as u8);
    }

    /// Write a big-endian unsigned 32-bit integer.
    pub fn write_u32(&mut self, value: u32) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a big-endian signed 32-bit integer.
    pub fn write_i32(&mut self, value: i32) {
        self.data.extend_from_slice(&value.to_be_bytes());
    }

    /// Write raw bytes.
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    /// Write a Latin-1 string followed by a NUL terminator. Chars outside
    /// Latin-1 are written as `?`.
    pub fn write_cstr(&mut self, value: &str) {
        self.data.extend(value.chars().map(char_to_latin1));
        self.data.push(0);
    }

    /// Enter bit mode at the current end of the buffer.
    pub fn bits(&mut self) -> BitWriter<'_> {
        BitWriter {
            bit_pos: self.data.len() * 8,
            writer: self,
        }
    }
}

/// Bit-mode write cursor, created by [`ByteWriter::bits`].
///
/// Bits are packed MSB-first; [`finish`](Self::finish) leaves the underlying
/// writer byte-aligned with unwritten bits of the final byte zeroed.
#[derive(Debug)]
pub struct BitWriter<'w> {
    writer: &'w mut ByteWriter,
    bit_pos: usize,
}

impl BitWriter<'_> {
    /// Write the low `count` bits (1..=32) of `value`.
    pub fn write_bits(&mut self, count: usize, value: u32) {
        debug_assert!((1..=32).contains(&count), "bit writes are 1..=32 bits");
        let mut remaining = count;
        while remaining > 0 {
            let byte_index = self.bit_pos >> 3;
            if byte_index == self.writer.data.len() {
                self.writer.data.push(0);
            }
            let bit_offset = self.bit_pos & 7;
            let available = 8 - bit_offset;
            let take = remaining.min(available);
            let chunk = (value >> (remaining - take)) & ((1 << take) - 1);
            self.writer.data[byte_index] |= (chunk as u8) << (available - take);
            self.bit_pos += take;
            remaining -= take;
        }
    }

    /// Leave bit mode. The buffer is already padded to a byte boundary.
    pub fn finish(self) {}
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::buffer::ByteReader;

    #[test]
    fn fixed_width_writes_mirror_reads() {
        let mut out = ByteWriter::new();
        out.write_u8(0x12);
        out.write_u16(0x3456);
        out.write_u24(0x789abc);
        out.write_u32(0xdef01234);
        out.write_i8(-5);
        out.write_i16(-300);
        out.write_i32(-70000);

        let mut buf = ByteReader::new(out.as_slice());
        assert_eq!(buf.read_u8().unwrap(), 0x12);
        assert_eq!(buf.read_u16().unwrap(), 0x3456);
        assert_eq!(buf.read_u24().unwrap(), 0x789abc);
        assert_eq!(buf.read_u32().unwrap(), 0xdef01234);
        assert_eq!(buf.read_i8().unwrap(), -5);
        assert_eq!(buf.read_i16().unwrap(), -300);
        assert_eq!(buf.read_i32().unwrap(), -70000);
        assert!(buf.is_empty());
    }

    #[test]
    fn cstr_roundtrip() {
        let mut out = ByteWriter::new();
        out.write_cstr("dragon m\u{e9}daillon");
        let mut buf = ByteReader::new(out.as_slice());
        assert_eq!(buf.read_cstr().unwrap(), "dragon m\u{e9}daillon");
    }

    #[test]
    fn cstr_replaces_non_latin1() {
        let mut out = ByteWriter::new();
        out.write_cstr("a\u{2603}b");
        assert_eq!(out.as_slice(), b"a?b\0");
    }

    #[test]
    fn bit_writes_pack_msb_first() {
        let mut out = ByteWriter::new();
        let mut bits = out.bits();
        bits.write_bits(1, 1);
        bits.write_bits(3, 0b011);
        bits.write_bits(6, 0b0110_11);
        bits.finish();
        assert_eq!(out.as_slice(), &[0xb6, 0xc0]);
    }

    #[test]
    fn bit_roundtrip_across_byte_boundaries() {
        let mut out = ByteWriter::new();
        let mut bits = out.bits();
        bits.write_bits(9, 0x1a5);
        bits.write_bits(7, 0x33);
        bits.write_bits(32, 0xdeadbeef);
        bits.finish();
        out.write_u8(0x7f);

        let data = out.into_vec();
        let mut buf = ByteReader::new(&data);
        let mut bits = buf.bits();
        assert_eq!(bits.read_bits(9).unwrap(), 0x1a5);
        assert_eq!(bits.read_bits(7).unwrap(), 0x33);
        assert_eq!(bits.read_bits(32).unwrap(), 0xdeadbeef);
        bits.finish();
        assert_eq!(buf.read_u8().unwrap(), 0x7f);
    }
}
