//! The fixed NSF fixtures this crate produces.
//!
//! Each fixture is a pure function of constants: `Fixture::build()` always
//! returns the same bytes. The layouts are fixed and fit the address space,
//! so the `Result`s here are always `Ok`; the fixture tests assert that.
use crate::binutil::BuildError;
use crate::nsf::header::{NTSC_SPEED_60HZ, PAL_SPEED_50HZ, NsfText};
use crate::nsf::{NsfBuilder, NsfDocument, Routine};

const APU_PULSE1: u16 = 0x4000;
const APU_PULSE2: u16 = 0x4004;
const APU_STATUS: u16 = 0x4015;

/// `$4015` value enabling pulse 1/2, triangle and noise.
const APU_ENABLE_TONE_CHANNELS: u8 = 0x0F;

/// Size of the continuous-tone data area (a full 32 KiB bank window).
pub const CONTINUOUS_TONE_DATA_SIZE: usize = 0x8000;

const MINIMAL_TITLE: NsfText = NsfText::from_static("Test NSF - NOP+RTS");
const MINIMAL_ARTIST: NsfText = NsfText::from_static("Claude Code");
const MINIMAL_COPYRIGHT: NsfText = NsfText::from_static("2025");

const TONE_TITLE: NsfText = NsfText::from_static("Continuous Tone Test");
const TONE_ARTIST: NsfText = NsfText::from_static("APU Test");
const TONE_COPYRIGHT: NsfText = NsfText::from_static("Test NSF");

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Fixture {
    /// Header plus NOP/NOP/NOP/RTS init and NOP/NOP/RTS play (135 bytes).
    MinimalTest,
    /// Both pulse channels held on steady tones (A4 and C5).
    ContinuousTone,
}

impl Fixture {
    pub const ALL: [Fixture; 2] = [Fixture::MinimalTest, Fixture::ContinuousTone];

    pub fn name(self) -> &'static str {
        match self {
            Fixture::MinimalTest => "minimal-test",
            Fixture::ContinuousTone => "continuous-tone",
        }
    }

    pub fn default_file_name(self) -> &'static str {
        match self {
            Fixture::MinimalTest => "minimal_test.nsf",
            Fixture::ContinuousTone => "continuous_tone.nsf",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Fixture::MinimalTest => "NOP+RTS init/play routines, no sound output",
            Fixture::ContinuousTone => "pulse 1 at 440Hz (A4) and pulse 2 at 523Hz (C5)",
        }
    }

    pub fn document(self) -> Result<NsfDocument, BuildError> {
        match self {
            Fixture::MinimalTest => minimal_test(),
            Fixture::ContinuousTone => continuous_tone(),
        }
    }

    /// Serialized fixture bytes.
    pub fn build(self) -> Result<Vec<u8>, BuildError> {
        self.document().map(Vec::from)
    }
}

/// The 135-byte NOP+RTS fixture: init at `$8000`, play at `$8004`.
pub fn minimal_test() -> Result<NsfDocument, BuildError> {
    let mut init = Routine::new();
    init.nop().nop().nop().rts();

    let mut play = Routine::new();
    play.nop().nop().rts();

    let mut builder = NsfBuilder::new();
    builder
        .set_title(MINIMAL_TITLE)
        .set_artist(MINIMAL_ARTIST)
        .set_copyright(MINIMAL_COPYRIGHT)
        .set_ntsc_speed(NTSC_SPEED_60HZ)
        .set_pal_speed(0)
        .set_init_routine(init)
        .set_play_routine(play);
    builder.finalize()
}

/// Program one pulse channel: duty 50%, constant volume 15, no sweep, and
/// an 11-bit timer period.
fn pulse_tone(routine: &mut Routine, base: u16, period: u16) {
    let [lo, hi] = period.to_le_bytes();
    routine
        .store(base, 0xBF)
        .store(base + 1, 0x00)
        .store(base + 2, lo)
        .store(base + 3, hi & 0x07);
}

/// Fixture that holds pulse 1 and pulse 2 on steady tones forever.
///
/// The init routine enables the channels and programs both timers; the
/// play routine only re-asserts the channel enable. The payload is padded
/// to `CONTINUOUS_TONE_DATA_SIZE`.
pub fn continuous_tone() -> Result<NsfDocument, BuildError> {
    let mut init = Routine::new();
    init.store(APU_STATUS, APU_ENABLE_TONE_CHANNELS);
    // 1.789773 MHz / (16 * (period + 1))
    pulse_tone(&mut init, APU_PULSE1, 0x00FD);
    pulse_tone(&mut init, APU_PULSE2, 0x00D5);
    init.rts();

    let mut play = Routine::new();
    play.store(APU_STATUS, APU_ENABLE_TONE_CHANNELS).rts();

    let mut builder = NsfBuilder::new();
    builder
        .set_title(TONE_TITLE)
        .set_artist(TONE_ARTIST)
        .set_copyright(TONE_COPYRIGHT)
        .set_ntsc_speed(NTSC_SPEED_60HZ)
        .set_pal_speed(PAL_SPEED_50HZ)
        .set_init_routine(init)
        .set_play_routine(play)
        .pad_to(CONTINUOUS_TONE_DATA_SIZE);
    builder.finalize()
}
