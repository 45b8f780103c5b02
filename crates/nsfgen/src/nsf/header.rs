//! NSF header utilities
//!
//! This module defines `NsfHeader`, the in-memory representation of the
//! fixed 128-byte NSF header, along with `NsfHeaderField` (the on-disk
//! field map) and `NsfText` (the 32-byte null-padded text slots used for
//! title, artist and copyright).
//!
//! Notes:
//! - Multi-byte integers are stored little-endian.
//! - Every field is written at the offset reported by
//!   `NsfHeaderField::offset()`; bytes not covered by a field stay zero.
use crate::binutil::{BuildError, write_slice, write_u8, write_u16};
use std::convert::TryFrom;
use std::fmt;

/// Size of the serialized NSF header in bytes.
pub const NSF_HEADER_SIZE: usize = 0x80;

/// Size of each text slot (title, artist, copyright) in bytes.
pub const NSF_TEXT_LEN: usize = 32;

/// Longest text accepted by a text slot; the last byte is reserved for NUL.
pub const NSF_TEXT_MAX: usize = NSF_TEXT_LEN - 1;

/// Format signature: `"NESM"` followed by the MS-DOS EOF byte.
pub const NSF_SIGNATURE: [u8; 5] = *b"NESM\x1A";

/// Default load address of the code payload.
pub const DEFAULT_LOAD_ADDRESS: u16 = 0x8000;

/// Lowest load address a player accepts; the payload lives in `$8000-$FFFF`.
pub const MIN_LOAD_ADDRESS: u16 = 0x8000;

/// One past the last addressable byte of the 6502 address space.
pub const ADDRESS_SPACE_END: usize = 0x1_0000;

/// Play-call period for 60 Hz NTSC playback, in microseconds.
pub const NTSC_SPEED_60HZ: u16 = 16666;

/// Play-call period for 50 Hz PAL playback, in microseconds.
pub const PAL_SPEED_50HZ: u16 = 20000;

/// Expansion sound chip bits stored in the `expansion_flags` byte.
pub mod expansion {
    pub const VRC6: u8 = 0x01;
    pub const VRC7: u8 = 0x02;
    pub const FDS: u8 = 0x04;
    pub const MMC5: u8 = 0x08;
    pub const NAMCO_163: u8 = 0x10;
    pub const SUNSOFT_5B: u8 = 0x20;
}

/// Video region stored in the `region_flags` byte.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Region {
    #[default]
    Ntsc,
    Pal,
    /// Tune supports both NTSC and PAL timing.
    Dual,
}

impl From<Region> for u8 {
    fn from(region: Region) -> u8 {
        match region {
            Region::Ntsc => 0x00,
            Region::Pal => 0x01,
            Region::Dual => 0x02,
        }
    }
}

/// Enum identifying header fields and their on-disk offsets.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NsfHeaderField {
    Signature,
    Version,
    SongCount,
    StartingSong,
    LoadAddress,
    InitAddress,
    PlayAddress,
    Title,
    Artist,
    Copyright,
    NtscSpeed,
    Bankswitch,
    PalSpeed,
    RegionFlags,
    ExpansionFlags,
    Reserved,
}

impl NsfHeaderField {
    /// Every field in on-disk order.
    pub const ALL: [NsfHeaderField; 16] = [
        NsfHeaderField::Signature,
        NsfHeaderField::Version,
        NsfHeaderField::SongCount,
        NsfHeaderField::StartingSong,
        NsfHeaderField::LoadAddress,
        NsfHeaderField::InitAddress,
        NsfHeaderField::PlayAddress,
        NsfHeaderField::Title,
        NsfHeaderField::Artist,
        NsfHeaderField::Copyright,
        NsfHeaderField::NtscSpeed,
        NsfHeaderField::Bankswitch,
        NsfHeaderField::PalSpeed,
        NsfHeaderField::RegionFlags,
        NsfHeaderField::ExpansionFlags,
        NsfHeaderField::Reserved,
    ];

    pub fn offset(self) -> usize {
        match self {
            NsfHeaderField::Signature => 0x00,
            NsfHeaderField::Version => 0x05,
            NsfHeaderField::SongCount => 0x06,
            NsfHeaderField::StartingSong => 0x07,
            NsfHeaderField::LoadAddress => 0x08,
            NsfHeaderField::InitAddress => 0x0A,
            NsfHeaderField::PlayAddress => 0x0C,
            NsfHeaderField::Title => 0x0E,
            NsfHeaderField::Artist => 0x2E,
            NsfHeaderField::Copyright => 0x4E,
            NsfHeaderField::NtscSpeed => 0x6E,
            NsfHeaderField::Bankswitch => 0x70,
            NsfHeaderField::PalSpeed => 0x78,
            NsfHeaderField::RegionFlags => 0x7A,
            NsfHeaderField::ExpansionFlags => 0x7B,
            NsfHeaderField::Reserved => 0x7C,
        }
    }

    /// Return the length in bytes for this field as stored in the header.
    pub fn len(self) -> usize {
        match self {
            NsfHeaderField::Signature => 5,
            NsfHeaderField::Version => 1,
            NsfHeaderField::SongCount => 1,
            NsfHeaderField::StartingSong => 1,
            NsfHeaderField::LoadAddress => 2,
            NsfHeaderField::InitAddress => 2,
            NsfHeaderField::PlayAddress => 2,
            NsfHeaderField::Title => NSF_TEXT_LEN,
            NsfHeaderField::Artist => NSF_TEXT_LEN,
            NsfHeaderField::Copyright => NSF_TEXT_LEN,
            NsfHeaderField::NtscSpeed => 2,
            NsfHeaderField::Bankswitch => 8,
            NsfHeaderField::PalSpeed => 2,
            NsfHeaderField::RegionFlags => 1,
            NsfHeaderField::ExpansionFlags => 1,
            NsfHeaderField::Reserved => 4,
        }
    }

    /// Return true if this field occupies zero bytes (none in the format).
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Short snake_case name used in summaries.
    pub fn name(self) -> &'static str {
        match self {
            NsfHeaderField::Signature => "signature",
            NsfHeaderField::Version => "version",
            NsfHeaderField::SongCount => "song_count",
            NsfHeaderField::StartingSong => "starting_song",
            NsfHeaderField::LoadAddress => "load_address",
            NsfHeaderField::InitAddress => "init_address",
            NsfHeaderField::PlayAddress => "play_address",
            NsfHeaderField::Title => "title",
            NsfHeaderField::Artist => "artist",
            NsfHeaderField::Copyright => "copyright",
            NsfHeaderField::NtscSpeed => "ntsc_speed",
            NsfHeaderField::Bankswitch => "bankswitch",
            NsfHeaderField::PalSpeed => "pal_speed",
            NsfHeaderField::RegionFlags => "region_flags",
            NsfHeaderField::ExpansionFlags => "expansion_flags",
            NsfHeaderField::Reserved => "reserved",
        }
    }
}

/// A 32-byte null-padded text slot.
///
/// At most `NSF_TEXT_MAX` bytes of text are stored so the slot always ends
/// with at least one NUL. Construct it with `NsfText::try_from(&str)` for
/// runtime text, or `NsfText::from_static` in a `const` item so an
/// oversized literal fails the build instead of the run.
#[derive(Copy, Clone, PartialEq, Eq, Default)]
pub struct NsfText([u8; NSF_TEXT_LEN]);

impl NsfText {
    pub const EMPTY: NsfText = NsfText([0u8; NSF_TEXT_LEN]);

    /// Build a text slot from a literal.
    ///
    /// # Panics
    ///
    /// Panics if `s` is longer than `NSF_TEXT_MAX` bytes, contains a NUL or
    /// contains a non-ASCII byte.
    /// When evaluated in a `const` item the panic is a compile error.
    pub const fn from_static(s: &'static str) -> Self {
        let bytes = s.as_bytes();
        assert!(bytes.len() <= NSF_TEXT_MAX, "NSF text longer than 31 bytes");
        let mut out = [0u8; NSF_TEXT_LEN];
        let mut i = 0;
        while i < bytes.len() {
            assert!(bytes[i] != 0, "NSF text contains NUL");
            assert!(bytes[i].is_ascii(), "NSF text is not ASCII");
            out[i] = bytes[i];
            i += 1;
        }
        NsfText(out)
    }

    /// Raw slot bytes, including the trailing NUL padding.
    pub fn as_bytes(&self) -> &[u8; NSF_TEXT_LEN] {
        &self.0
    }

    /// Number of text bytes before the first NUL.
    pub fn text_len(&self) -> usize {
        self.0.iter().position(|&b| b == 0).unwrap_or(NSF_TEXT_LEN)
    }

    /// Decode the text part of the slot, replacing invalid UTF-8.
    pub fn to_string_lossy(&self) -> String {
        String::from_utf8_lossy(&self.0[..self.text_len()]).into_owned()
    }
}

impl TryFrom<&str> for NsfText {
    type Error = BuildError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let bytes = s.as_bytes();
        if bytes.len() > NSF_TEXT_MAX {
            return Err(BuildError::TextTooLong {
                len: bytes.len(),
                max: NSF_TEXT_MAX,
            });
        }
        if let Some(at) = bytes.iter().position(|&b| b == 0) {
            return Err(BuildError::InteriorNul(at));
        }
        if let Some(at) = bytes.iter().position(|b| !b.is_ascii()) {
            return Err(BuildError::NonAscii(at));
        }
        let mut out = [0u8; NSF_TEXT_LEN];
        out[..bytes.len()].copy_from_slice(bytes);
        Ok(NsfText(out))
    }
}

impl fmt::Debug for NsfText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NsfText({:?})", self.to_string_lossy())
    }
}

impl fmt::Display for NsfText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_lossy())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// NSF file header fields and utilities for serialization.
pub struct NsfHeader {
    pub signature: [u8; 5],
    pub version: u8,
    pub song_count: u8,
    /// 1-based index of the song played first.
    pub starting_song: u8,
    pub load_address: u16,
    pub init_address: u16,
    pub play_address: u16,
    pub title: NsfText,
    pub artist: NsfText,
    pub copyright: NsfText,
    /// Play-call period in microseconds for NTSC playback.
    pub ntsc_speed: u16,
    /// Initial bank values; all zero disables bankswitching.
    pub bankswitch: [u8; 8],
    /// Play-call period in microseconds for PAL playback.
    pub pal_speed: u16,
    pub region_flags: u8,
    pub expansion_flags: u8,
    pub reserved: [u8; 4],
}

impl Default for NsfHeader {
    fn default() -> Self {
        NsfHeader {
            signature: NSF_SIGNATURE,
            version: 1,
            song_count: 1,
            starting_song: 1,
            load_address: DEFAULT_LOAD_ADDRESS,
            init_address: DEFAULT_LOAD_ADDRESS,
            play_address: DEFAULT_LOAD_ADDRESS,
            title: NsfText::EMPTY,
            artist: NsfText::EMPTY,
            copyright: NsfText::EMPTY,
            ntsc_speed: NTSC_SPEED_60HZ,
            bankswitch: [0u8; 8],
            pal_speed: 0,
            region_flags: 0,
            expansion_flags: 0,
            reserved: [0u8; 4],
        }
    }
}

impl NsfHeader {
    /// Serialize the header into its fixed 128-byte on-disk form.
    pub fn to_bytes(&self) -> [u8; NSF_HEADER_SIZE] {
        let mut buf = [0u8; NSF_HEADER_SIZE];
        write_slice(&mut buf, NsfHeaderField::Signature.offset(), &self.signature);
        write_u8(&mut buf, NsfHeaderField::Version.offset(), self.version);
        write_u8(&mut buf, NsfHeaderField::SongCount.offset(), self.song_count);
        write_u8(
            &mut buf,
            NsfHeaderField::StartingSong.offset(),
            self.starting_song,
        );
        write_u16(
            &mut buf,
            NsfHeaderField::LoadAddress.offset(),
            self.load_address,
        );
        write_u16(
            &mut buf,
            NsfHeaderField::InitAddress.offset(),
            self.init_address,
        );
        write_u16(
            &mut buf,
            NsfHeaderField::PlayAddress.offset(),
            self.play_address,
        );
        write_slice(&mut buf, NsfHeaderField::Title.offset(), self.title.as_bytes());
        write_slice(
            &mut buf,
            NsfHeaderField::Artist.offset(),
            self.artist.as_bytes(),
        );
        write_slice(
            &mut buf,
            NsfHeaderField::Copyright.offset(),
            self.copyright.as_bytes(),
        );
        write_u16(&mut buf, NsfHeaderField::NtscSpeed.offset(), self.ntsc_speed);
        write_slice(&mut buf, NsfHeaderField::Bankswitch.offset(), &self.bankswitch);
        write_u16(&mut buf, NsfHeaderField::PalSpeed.offset(), self.pal_speed);
        write_u8(
            &mut buf,
            NsfHeaderField::RegionFlags.offset(),
            self.region_flags,
        );
        write_u8(
            &mut buf,
            NsfHeaderField::ExpansionFlags.offset(),
            self.expansion_flags,
        );
        write_slice(&mut buf, NsfHeaderField::Reserved.offset(), &self.reserved);
        buf
    }

    /// Whether any bank value is non-zero.
    pub fn uses_bankswitching(&self) -> bool {
        self.bankswitch.iter().any(|&b| b != 0)
    }
}
