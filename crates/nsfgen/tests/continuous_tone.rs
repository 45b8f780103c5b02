use nsfgen::Fixture;
use nsfgen::fixture::{CONTINUOUS_TONE_DATA_SIZE, continuous_tone};
use nsfgen::nsf::RoutineKind;

#[test]
fn payload_is_padded_to_32k() {
    let bytes = Fixture::ContinuousTone.build().unwrap();
    assert_eq!(bytes.len(), 128 + CONTINUOUS_TONE_DATA_SIZE);
    assert_eq!(bytes.len(), 32896);
}

#[test]
fn header_fields() {
    let doc = continuous_tone().unwrap();
    let h = &doc.header;
    assert_eq!(h.title.to_string(), "Continuous Tone Test");
    assert_eq!(h.artist.to_string(), "APU Test");
    assert_eq!(h.copyright.to_string(), "Test NSF");
    assert_eq!(h.ntsc_speed, 16666);
    assert_eq!(h.pal_speed, 20000);
    assert_eq!(h.load_address, 0x8000);
    assert_eq!(h.init_address, 0x8000);
    assert_eq!(h.play_address, 0x802E);
}

#[test]
fn init_programs_both_pulse_channels() {
    let doc = continuous_tone().unwrap();
    #[rustfmt::skip]
    let expected: [u8; 46] = [
        0xA9, 0x0F, 0x8D, 0x15, 0x40,
        0xA9, 0xBF, 0x8D, 0x00, 0x40,
        0xA9, 0x00, 0x8D, 0x01, 0x40,
        0xA9, 0xFD, 0x8D, 0x02, 0x40,
        0xA9, 0x00, 0x8D, 0x03, 0x40,
        0xA9, 0xBF, 0x8D, 0x04, 0x40,
        0xA9, 0x00, 0x8D, 0x05, 0x40,
        0xA9, 0xD5, 0x8D, 0x06, 0x40,
        0xA9, 0x00, 0x8D, 0x07, 0x40,
        0x60,
    ];
    assert_eq!(doc.init.as_bytes(), &expected);
    assert_eq!(&doc.data[..46], &expected);
}

#[test]
fn play_follows_init_then_zero_padding() {
    let doc = continuous_tone().unwrap();
    let off = (doc.header.play_address - doc.header.load_address) as usize;
    assert_eq!(
        &doc.data[off..off + 6],
        &[0xA9, 0x0F, 0x8D, 0x15, 0x40, 0x60]
    );
    assert!(doc.data[off + 6..].iter().all(|&b| b == 0));
}

#[test]
fn listing_names_apu_registers() {
    let doc = continuous_tone().unwrap();
    let lines = doc.listing(RoutineKind::Init);
    assert_eq!(lines[1].text, "STA $4015");
    assert_eq!(lines.last().map(|l| l.address), Some(0x802D));
}

#[test]
fn padded_payload_ends_at_ffff() {
    let doc = continuous_tone().unwrap();
    let end = doc.header.load_address as usize + doc.data.len();
    assert_eq!(end, 0x1_0000);

    for fixture in Fixture::ALL {
        assert!(fixture.document().is_ok(), "{}", fixture.name());
    }
}
