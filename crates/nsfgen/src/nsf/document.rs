//! NSF document and builder utilities
//!
//! This module defines the in-memory representation of a complete NSF file
//! (`NsfDocument`) and a builder (`NsfBuilder`) to assemble one.
//!
//! Responsibilities:
//! - `NsfDocument` holds the header, the code/data payload loaded at
//!   `load_address`, and the init/play routines the payload was built from.
//! - `NsfBuilder` lays the routines out from the load address (init first,
//!   play directly after it), derives `init_address` and `play_address`
//!   from that layout, and optionally zero-pads the payload. The whole
//!   payload must fit between the load address and `$FFFF`.
//! - Conversions: `From<NsfDocument> for Vec<u8>` (serialization).
use crate::binutil::BuildError;
use crate::nsf::header::{
    ADDRESS_SPACE_END, MIN_LOAD_ADDRESS, NSF_HEADER_SIZE, NsfHeader, NsfText, Region,
};
use crate::nsf::routine::{ListingLine, Routine};

/// Which entry point a routine serves.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoutineKind {
    Init,
    Play,
}

impl RoutineKind {
    pub fn label(self) -> &'static str {
        match self {
            RoutineKind::Init => "INIT",
            RoutineKind::Play => "PLAY",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
/// A complete NSF document: header plus the payload loaded at
/// `header.load_address`.
///
/// Construct instances with `NsfBuilder`, then call `to_bytes()` to obtain
/// the file contents.
pub struct NsfDocument {
    pub header: NsfHeader,
    pub data: Vec<u8>,
    pub init: Routine,
    pub play: Routine,
}

impl NsfDocument {
    /// Serialize the header followed by the payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(NSF_HEADER_SIZE + self.data.len());
        out.extend_from_slice(&self.header.to_bytes());
        out.extend_from_slice(&self.data);
        out
    }

    /// Total serialized size in bytes.
    pub fn file_size(&self) -> usize {
        NSF_HEADER_SIZE + self.data.len()
    }

    /// Address the given routine was placed at.
    pub fn routine_address(&self, kind: RoutineKind) -> u16 {
        match kind {
            RoutineKind::Init => self.header.init_address,
            RoutineKind::Play => self.header.play_address,
        }
    }

    pub fn routine(&self, kind: RoutineKind) -> &Routine {
        match kind {
            RoutineKind::Init => &self.init,
            RoutineKind::Play => &self.play,
        }
    }

    /// Listing lines for one routine at its placed address.
    pub fn listing(&self, kind: RoutineKind) -> Vec<ListingLine> {
        self.routine(kind).listing(self.routine_address(kind))
    }
}

/// Convert an `NsfDocument` into its serialized bytes.
impl From<NsfDocument> for Vec<u8> {
    fn from(document: NsfDocument) -> Vec<u8> {
        document.to_bytes()
    }
}

/// Builder for assembling an `NsfDocument`.
///
/// Header setters return `&mut Self` for chaining. Routine addresses are
/// not set directly: `finalize()` derives them from the payload layout so
/// each routine sits at `address - load_address` in the payload.
pub struct NsfBuilder {
    header: NsfHeader,
    init: Routine,
    play: Routine,
    pad_to: usize,
}

impl NsfBuilder {
    /// Create a builder with default header values (version 1, one song,
    /// load address `$8000`, 60 Hz NTSC speed, empty text).
    pub fn new() -> Self {
        NsfBuilder {
            header: NsfHeader::default(),
            init: Routine::new(),
            play: Routine::new(),
            pad_to: 0,
        }
    }

    pub fn set_title(&mut self, text: NsfText) -> &mut Self {
        self.header.title = text;
        self
    }

    pub fn set_artist(&mut self, text: NsfText) -> &mut Self {
        self.header.artist = text;
        self
    }

    pub fn set_copyright(&mut self, text: NsfText) -> &mut Self {
        self.header.copyright = text;
        self
    }

    /// Set the song count and the 1-based starting song.
    pub fn set_songs(&mut self, count: u8, starting: u8) -> &mut Self {
        self.header.song_count = count;
        self.header.starting_song = starting;
        self
    }

    pub fn set_load_address(&mut self, addr: u16) -> &mut Self {
        self.header.load_address = addr;
        self
    }

    pub fn set_ntsc_speed(&mut self, micros: u16) -> &mut Self {
        self.header.ntsc_speed = micros;
        self
    }

    pub fn set_pal_speed(&mut self, micros: u16) -> &mut Self {
        self.header.pal_speed = micros;
        self
    }

    pub fn set_region(&mut self, region: Region) -> &mut Self {
        self.header.region_flags = region.into();
        self
    }

    /// Set the expansion chip bits (see `header::expansion`).
    pub fn set_expansion(&mut self, flags: u8) -> &mut Self {
        self.header.expansion_flags = flags;
        self
    }

    pub fn set_init_routine(&mut self, routine: Routine) -> &mut Self {
        self.init = routine;
        self
    }

    pub fn set_play_routine(&mut self, routine: Routine) -> &mut Self {
        self.play = routine;
        self
    }

    /// Zero-pad the payload to at least `len` bytes.
    pub fn pad_to(&mut self, len: usize) -> &mut Self {
        self.pad_to = len;
        self
    }

    /// Finalize the builder and return the assembled `NsfDocument`.
    ///
    /// Fails when the load address is below `MIN_LOAD_ADDRESS` or when the
    /// payload (including padding) would run past `$FFFF`.
    pub fn finalize(self) -> Result<NsfDocument, BuildError> {
        let NsfBuilder {
            mut header,
            init,
            play,
            pad_to,
        } = self;

        let load = header.load_address;
        if load < MIN_LOAD_ADDRESS {
            return Err(BuildError::LoadAddressOutOfRange(load));
        }

        let len = pad_to.max(init.len() + play.len());
        let overflow = BuildError::LayoutOverflow {
            load_address: load,
            len,
        };
        if len > ADDRESS_SPACE_END - load as usize {
            return Err(overflow);
        }
        let play_address = u16::try_from(init.len())
            .ok()
            .and_then(|off| load.checked_add(off))
            .ok_or(overflow)?;

        let mut data = Vec::with_capacity(len);
        data.extend_from_slice(init.as_bytes());
        data.extend_from_slice(play.as_bytes());
        data.resize(len, 0);

        header.init_address = load;
        header.play_address = play_address;

        Ok(NsfDocument {
            header,
            data,
            init,
            play,
        })
    }
}

/// Default implementation for `NsfBuilder`.
impl Default for NsfBuilder {
    fn default() -> Self {
        Self::new()
    }
}
