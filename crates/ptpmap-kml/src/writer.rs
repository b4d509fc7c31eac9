//! Low-level KML document writer.
//!
//! Emits the small KML subset the overlay needs: a document with shared
//! line styles and `<LineString>` placemarks. Coordinates follow the KML
//! `lon,lat,alt` convention with altitudes relative to ground level.

use crate::Result;
use ptpmap_model::StyleRule;
use std::borrow::Cow;
use std::io::Write;

/// A 3-D endpoint in KML coordinate order: `(longitude, latitude, altitude)`.
pub type Coord = (f64, f64, f64);

/// Escape the XML special characters in text content.
fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Streaming writer for a KML document.
///
/// Call [`KmlWriter::start_document`] first, then any number of
/// [`KmlWriter::write_style`] and [`KmlWriter::write_line_segment`] calls,
/// then [`KmlWriter::finish`]. The document is only well-formed once
/// `finish` returns.
#[derive(Debug)]
pub struct KmlWriter<W: Write> {
    out: W,
}

impl<W: Write> KmlWriter<W> {
    /// Create a writer over any output sink.
    pub fn new(out: W) -> Self {
        KmlWriter { out }
    }

    /// Write the XML prologue and open the document.
    pub fn start_document(&mut self, name: &str) -> Result<()> {
        writeln!(self.out, r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
        writeln!(
            self.out,
            r#"<kml xmlns="http://www.opengis.net/kml/2.2">"#
        )?;
        writeln!(self.out, "<Document>")?;
        writeln!(self.out, "<name>{}</name>", escape_xml(name))?;
        Ok(())
    }

    /// Write one shared line style.
    pub fn write_style(&mut self, rule: &StyleRule) -> Result<()> {
        writeln!(
            self.out,
            "<Style id=\"{}\"><LineStyle><color>{}</color><width>{}</width></LineStyle></Style>",
            escape_xml(&rule.style_id),
            escape_xml(&rule.color),
            rule.width
        )?;
        Ok(())
    }

    /// Write one line-segment placemark between two 3-D endpoints.
    ///
    /// Altitudes are interpreted relative to ground level, matching the
    /// height-above-ground field of the source records.
    pub fn write_line_segment(
        &mut self,
        name: &str,
        description: &str,
        style_id: &str,
        from: Coord,
        to: Coord,
    ) -> Result<()> {
        writeln!(self.out, "<Placemark>")?;
        writeln!(self.out, "<name>{}</name>", escape_xml(name))?;
        writeln!(
            self.out,
            "<description>{}</description>",
            escape_xml(description)
        )?;
        writeln!(self.out, "<styleUrl>#{}</styleUrl>", escape_xml(style_id))?;
        writeln!(self.out, "<LineString>")?;
        writeln!(self.out, "<altitudeMode>relativeToGround</altitudeMode>")?;
        writeln!(
            self.out,
            "<coordinates>{},{},{} {},{},{}</coordinates>",
            from.0, from.1, from.2, to.0, to.1, to.2
        )?;
        writeln!(self.out, "</LineString>")?;
        writeln!(self.out, "</Placemark>")?;
        Ok(())
    }

    /// Close the document and flush, returning the underlying sink.
    pub fn finish(mut self) -> Result<W> {
        writeln!(self.out, "</Document>")?;
        writeln!(self.out, "</kml>")?;
        self.out.flush()?;
        Ok(self.out)
    }
}
