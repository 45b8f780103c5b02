use std::fmt::Write as _;

use comfy_table::{Cell, ContentArrangement, Table, presets::NOTHING};
use nsfgen::nsf::header::NSF_HEADER_SIZE;
use nsfgen::nsf::{NsfHeader, NsfHeaderField, RoutineKind};
use nsfgen::{BuildError, Fixture, NsfDocument, hex_bytes};
use unicode_width::UnicodeWidthStr;

/// Pad a &str to a target display width (columns) using unicode-width so
/// wide characters do not break column alignment.
fn pad_to_width(s: &str, width: usize) -> String {
    let w = UnicodeWidthStr::width(s);
    if w >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - w))
    }
}

/// Human-readable value of one header field.
fn field_value(header: &NsfHeader, field: NsfHeaderField) -> String {
    match field {
        NsfHeaderField::Signature => hex_bytes(&header.signature),
        NsfHeaderField::Version => header.version.to_string(),
        NsfHeaderField::SongCount => header.song_count.to_string(),
        NsfHeaderField::StartingSong => header.starting_song.to_string(),
        NsfHeaderField::LoadAddress => format!("${:04X}", header.load_address),
        NsfHeaderField::InitAddress => format!("${:04X}", header.init_address),
        NsfHeaderField::PlayAddress => format!("${:04X}", header.play_address),
        NsfHeaderField::Title => format!("\"{}\"", header.title),
        NsfHeaderField::Artist => format!("\"{}\"", header.artist),
        NsfHeaderField::Copyright => format!("\"{}\"", header.copyright),
        NsfHeaderField::NtscSpeed => format!("{} us", header.ntsc_speed),
        NsfHeaderField::Bankswitch => hex_bytes(&header.bankswitch),
        NsfHeaderField::PalSpeed => format!("{} us", header.pal_speed),
        NsfHeaderField::RegionFlags => format!("0x{:02X}", header.region_flags),
        NsfHeaderField::ExpansionFlags => format!("0x{:02X}", header.expansion_flags),
        NsfHeaderField::Reserved => hex_bytes(&header.reserved),
    }
}

fn header_table(header: &NsfHeader) -> Table {
    let mut table = Table::new();
    table.load_preset(NOTHING);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Offset"),
        Cell::new("Field"),
        Cell::new("Value"),
    ]);
    for field in NsfHeaderField::ALL {
        table.add_row(vec![
            Cell::new(format!("{:3}", field.offset())),
            Cell::new(field.name()),
            Cell::new(field_value(header, field)),
        ]);
    }
    table
}

/// Summary printed after a successful build: sizes, header fields and
/// the routine listings.
pub fn summary(destination: &str, document: &NsfDocument) -> String {
    let mut out = String::new();
    let size = document.file_size();
    let _ = writeln!(out, "Created NSF file {}: {} bytes", destination, size);
    let _ = writeln!(out, "Header: {} bytes", NSF_HEADER_SIZE);
    let _ = writeln!(out, "Code: {} bytes", size - NSF_HEADER_SIZE);
    let bankswitching = if document.header.uses_bankswitching() {
        "enabled"
    } else {
        "disabled"
    };
    let _ = writeln!(out, "Bankswitching: {}", bankswitching);
    let _ = writeln!(out);
    let _ = writeln!(out, "{}", header_table(&document.header));

    for kind in [RoutineKind::Init, RoutineKind::Play] {
        let _ = writeln!(out);
        let _ = writeln!(
            out,
            "{} routine (${:04X}):",
            kind.label(),
            document.routine_address(kind)
        );
        for line in document.listing(kind) {
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}

/// Aligned listing of every fixture: name, default file, size, description.
pub fn fixture_table() -> Result<String, BuildError> {
    let rows = Fixture::ALL
        .iter()
        .map(|f| {
            Ok([
                f.name().to_string(),
                f.default_file_name().to_string(),
                format!("{} bytes", f.document()?.file_size()),
                f.description().to_string(),
            ])
        })
        .collect::<Result<Vec<[String; 4]>, BuildError>>()?;

    let titles = ["Fixture", "File", "Size", "Description"];
    let mut widths = titles.map(|t| UnicodeWidthStr::width(t));
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(UnicodeWidthStr::width(cell.as_str()));
        }
    }

    let render = |cells: [&str; 4]| {
        cells
            .iter()
            .zip(widths)
            .map(|(c, w)| pad_to_width(c, w))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = vec![render(titles)];
    for row in &rows {
        lines.push(render([
            row[0].as_str(),
            row[1].as_str(),
            row[2].as_str(),
            row[3].as_str(),
        ]));
    }
    Ok(lines.join("\n"))
}
