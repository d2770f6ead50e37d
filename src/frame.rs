//! Byte frames: one contiguous header or data payload inside an exchange.
//!
//! Reads are permissive. A position past the end (or a bit index above 7)
//! reads as 0 so decoders can probe optional trailing bytes of short frames.

use byteorder::{BigEndian, ByteOrder};
use std::fmt;

/// An ordered, read-only sequence of bytes.
///
/// Frames are built once by the loader and never mutated afterwards; the
/// owning [`Exchange`](crate::exchange::Exchange) hands out shared references only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ByteFrame {
    bytes: Vec<u8>,
}

impl ByteFrame {
    pub fn new(bytes: Vec<u8>) -> Self {
        ByteFrame { bytes }
    }

    /// Byte at `pos`, or 0 when `pos` is past the end.
    pub fn byte_at(&self, pos: usize) -> u8 {
        self.bytes.get(pos).copied().unwrap_or(0)
    }

    /// Bit `bit` (0 = least significant) of the byte at `pos`: 1 if set, else 0.
    /// Returns 0 when either index is out of range.
    pub fn bit_at(&self, pos: usize, bit: u32) -> u8 {
        if bit > 7 {
            return 0;
        }
        match self.bytes.get(pos) {
            Some(&b) => (b >> bit) & 1,
            None => 0,
        }
    }

    /// Big-endian 16-bit value of bytes `pos` and `pos + 1` (the `A*256+B` idiom).
    /// Missing bytes read as 0.
    pub fn word(&self, pos: usize) -> u16 {
        let pair = [self.byte_at(pos), self.byte_at(pos.saturating_add(1))];
        BigEndian::read_u16(&pair)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Uppercase hex without separators, e.g. `07E8`. Used for source addresses.
    pub fn to_hex_compact(&self) -> String {
        hex::encode_upper(&self.bytes)
    }
}

impl From<Vec<u8>> for ByteFrame {
    fn from(bytes: Vec<u8>) -> Self {
        ByteFrame::new(bytes)
    }
}

impl From<&[u8]> for ByteFrame {
    fn from(bytes: &[u8]) -> Self {
        ByteFrame::new(bytes.to_vec())
    }
}

impl<const N: usize> From<[u8; N]> for ByteFrame {
    fn from(bytes: [u8; N]) -> Self {
        ByteFrame::new(bytes.to_vec())
    }
}

impl fmt::Display for ByteFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, b) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02X}", b)?;
        }
        Ok(())
    }
}
