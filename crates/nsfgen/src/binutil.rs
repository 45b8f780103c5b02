//! Utilities used by the serializers: build error type and byte writers.
use std::fmt;

/// Error type returned by the fallible builder helpers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// A text field did not fit into its fixed-size slot.
    ///
    /// - `len` is the byte length of the rejected text.
    /// - `max` is the longest text the slot accepts (one byte is always
    ///   kept for the terminating NUL).
    TextTooLong { len: usize, max: usize },

    /// A text field contained an interior NUL byte, which would truncate
    /// the string for any reader.
    ///
    /// The contained `usize` is the byte index of the NUL.
    InteriorNul(usize),

    /// A text field contained a non-ASCII byte.
    ///
    /// The contained `usize` is the byte index of the first such byte.
    NonAscii(usize),

    /// The load address lies below the cartridge window (`$8000`).
    LoadAddressOutOfRange(u16),

    /// The payload does not fit between the load address and `$FFFF`.
    ///
    /// - `load_address` is the requested load address.
    /// - `len` is the payload length in bytes, padding included.
    LayoutOverflow { load_address: u16, len: usize },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::TextTooLong { len, max } => {
                write!(f, "text too long: {} bytes (max {})", len, max)
            }
            BuildError::InteriorNul(at) => write!(f, "text contains NUL at byte {}", at),
            BuildError::NonAscii(at) => write!(f, "text contains non-ASCII byte at {}", at),
            BuildError::LoadAddressOutOfRange(addr) => {
                write!(f, "load address ${:04X} is below $8000", addr)
            }
            BuildError::LayoutOverflow { load_address, len } => write!(
                f,
                "payload of {} bytes at ${:04X} runs past $FFFF",
                len, load_address
            ),
        }
    }
}

impl std::error::Error for BuildError {}

/// Write a 16-bit little-endian unsigned integer `v` into `buf` at `off`.
///
/// This function copies two bytes into `buf[off..off+2]`. It does not perform
/// bounds checking; callers must ensure the destination range is valid.
pub fn write_u16(buf: &mut [u8], off: usize, v: u16) {
    let bytes = v.to_le_bytes();
    buf[off..off + 2].copy_from_slice(&bytes);
}

/// Write a single byte `v` into `buf` at `off`.
pub fn write_u8(buf: &mut [u8], off: usize, v: u8) {
    buf[off] = v;
}

/// Copy the contents of `s` into `buf` starting at `off`.
///
/// This function copies `s.len()` bytes into `buf[off..off+s.len()]`. It does
/// not perform bounds checking; callers must ensure the destination range is
/// valid.
pub fn write_slice(buf: &mut [u8], off: usize, s: &[u8]) {
    buf[off..off + s.len()].copy_from_slice(s);
}

/// Format `bytes` as space-separated uppercase hex pairs (`"A9 0F"`).
pub fn hex_bytes(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_u16_is_little_endian() {
        let mut buf = [0u8; 4];
        write_u16(&mut buf, 1, 0x8004);
        assert_eq!(buf, [0x00, 0x04, 0x80, 0x00]);
    }

    #[test]
    fn hex_bytes_formats_pairs() {
        assert_eq!(hex_bytes(&[0x8D, 0x15, 0x40]), "8D 15 40");
        assert_eq!(hex_bytes(&[]), "");
    }
}
