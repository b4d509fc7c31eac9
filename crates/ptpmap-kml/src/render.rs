//! Rendering resolved links into a KML document.

use crate::writer::KmlWriter;
use crate::Result;
use ptpmap_link::Link;
use ptpmap_model::{StationRecord, StyleTable};
use std::fmt::Write as _;
use std::io::Write;

/// Placemark name: licensee and TX frequency.
fn segment_name(tx: &StationRecord) -> String {
    format!("{} | {}", tx.licensee_name, tx.frequency_mhz)
}

/// Placemark description: the display fields derived from the TX record.
fn segment_description(tx: &StationRecord) -> String {
    let mut desc = String::new();
    let _ = writeln!(desc, "Bandwidth (MHz): {}", tx.bandwidth_mhz());
    let _ = writeln!(
        desc,
        "Analog Capacity (Calls): {}",
        match tx.analog_capacity {
            Some(capacity) => capacity.to_string(),
            None => "n/a".to_string(),
        }
    );
    let _ = writeln!(
        desc,
        "Digital Capacity (Mbps): {}",
        match tx.digital_capacity {
            Some(capacity) => capacity.to_string(),
            None => "n/a".to_string(),
        }
    );
    let _ = write!(
        desc,
        "In Service Date: {}",
        match tx.inservice_date {
            Some(date) => date.to_string(),
            None => "unknown".to_string(),
        }
    );
    desc
}

/// Write the complete overlay document for a link batch.
///
/// Emits one shared style per table entry, then one line segment per
/// `(tx, rx)` pair of every link with a resolved outcome. Returns the number
/// of segments written.
pub fn write_document<W: Write>(
    links: &[Link<'_>],
    styles: &StyleTable,
    out: W,
) -> Result<usize> {
    let mut writer = KmlWriter::new(out);
    writer.start_document("ptpmap links")?;

    for rule in styles.iter_all() {
        writer.write_style(rule)?;
    }

    let mut segments = 0;
    for link in links.iter().filter(|link| link.is_renderable()) {
        let name = segment_name(link.tx);
        let description = segment_description(link.tx);
        let style = styles.classify(&link.tx.licensee_name);
        for (tx, rx) in link.segments() {
            writer.write_line_segment(
                &name,
                &description,
                &style.style_id,
                (tx.longitude, tx.latitude, tx.height_agl_m),
                (rx.longitude, rx.latitude, rx.height_agl_m),
            )?;
            segments += 1;
        }
    }

    writer.finish()?;
    Ok(segments)
}
