//! File-backed diagnostic sink.

use chrono::Local;
use ptpmap_link::{Diagnostic, DiagnosticSink};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::warn;

/// Sink that appends timestamped, tab-separated diagnostic lines to a log
/// file, one entry per mismatched/ambiguous/unresolved case.
///
/// Write failures are reported once through `tracing` and further entries
/// are dropped; a broken log file never aborts the matching batch.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    out: W,
    write_failed: bool,
}

impl WriterSink<BufWriter<File>> {
    /// Create a sink writing to the given log file, truncating it.
    pub fn create<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::create(path)?;
        Ok(WriterSink::new(BufWriter::new(file)))
    }
}

impl<W: Write> WriterSink<W> {
    /// Wrap an arbitrary writer.
    pub fn new(out: W) -> Self {
        WriterSink {
            out,
            write_failed: false,
        }
    }

    /// Flush buffered entries.
    pub fn flush(&mut self) -> std::io::Result<()> {
        self.out.flush()
    }

    fn severity(diagnostic: &Diagnostic) -> &'static str {
        match diagnostic {
            Diagnostic::FrequencyMismatch { .. } => "INFO",
            _ => "WARNING",
        }
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn emit(&mut self, diagnostic: Diagnostic) {
        if self.write_failed {
            return;
        }
        let line = format!(
            "{}\t{}\t{}",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            Self::severity(&diagnostic),
            diagnostic
        );
        if let Err(err) = writeln!(self.out, "{}", line) {
            warn!("diagnostic log write failed, disabling log: {}", err);
            self.write_failed = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entries_are_timestamped_and_tagged() {
        let mut buf = Vec::new();
        {
            let mut sink = WriterSink::new(&mut buf);
            sink.emit(Diagnostic::NoRxCandidate {
                authorization_number: "A1".to_string(),
                tx_frequency_mhz: 6000.0,
                licensee_name: "Test".to_string(),
                record_id: "7".to_string(),
            });
            sink.emit(Diagnostic::FrequencyMismatch {
                authorization_number: "A2".to_string(),
                tx_frequency_mhz: 6000.0,
                rx_frequency_mhz: 6001.0,
                record_id: "8".to_string(),
            });
            sink.flush().unwrap();
        }
        let log = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = log.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("\tWARNING\tno RX candidate for authorization A1"));
        assert!(lines[1].contains("\tINFO\tfrequency mismatch: authorization A2"));
    }
}
