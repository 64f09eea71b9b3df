//! Durable record sink.
//!
//! The one bit-exact contract in the system: an append-only CSV with header
//! `Frame,Timestamp,ObjectID,Label,Distance(m)` and the distance column
//! formatted with exactly 2 decimal places.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::pipeline::LogRecord;

/// Log sink boundary. Write failures are fatal for the run; retry policy,
/// if any, belongs to an outer I/O layer.
pub trait RecordSink: Send {
    /// Append records in order. Must preserve call order across frames.
    fn append(&mut self, records: &[LogRecord]) -> Result<()>;

    /// Flush buffered rows to durable storage.
    fn flush(&mut self) -> Result<()>;
}

/// CSV file sink.
pub struct CsvSink {
    writer: BufWriter<File>,
    rows_written: u64,
}

impl CsvSink {
    /// Create (or truncate) the log file and write the header row.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        writeln!(writer, "Frame,Timestamp,ObjectID,Label,Distance(m)")
            .context("failed to write log header")?;
        Ok(Self {
            writer,
            rows_written: 0,
        })
    }

    pub fn rows_written(&self) -> u64 {
        self.rows_written
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, records: &[LogRecord]) -> Result<()> {
        for rec in records {
            writeln!(
                self.writer,
                "{},{},{},{},{:.2}",
                rec.frame_index,
                csv_field(&rec.timestamp),
                rec.object_id,
                csv_field(&rec.label),
                rec.distance_m
            )
            .context("failed to append log record")?;
            self.rows_written += 1;
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().context("failed to flush log file")
    }
}

impl Drop for CsvSink {
    fn drop(&mut self) {
        // Best effort; the run loop flushes explicitly on shutdown.
        let _ = self.writer.flush();
    }
}

/// RFC 4180 quoting for fields that need it. Plain labels pass through
/// unchanged, so the common case stays byte-identical to the historic log
/// format.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(frame: u64, id: i64, label: &str, distance: f64) -> LogRecord {
        LogRecord {
            frame_index: frame,
            timestamp: "10:30:00".to_string(),
            object_id: id,
            label: label.to_string(),
            distance_m: distance,
        }
    }

    #[test]
    fn writes_header_and_two_decimal_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        {
            let mut sink = CsvSink::create(&path).unwrap();
            sink.append(&[record(1, 7, "cup", 1.0), record(1, -1, "person", 2.125)])
                .unwrap();
            sink.flush().unwrap();
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "Frame,Timestamp,ObjectID,Label,Distance(m)\n\
             1,10:30:00,7,cup,1.00\n\
             1,10:30:00,-1,person,2.13\n"
        );
    }

    #[test]
    fn preserves_append_order_across_frames() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&[record(1, 1, "chair", 3.0)]).unwrap();
        sink.append(&[record(2, 1, "chair", 2.5), record(2, 2, "cup", 1.2)])
            .unwrap();
        sink.flush().unwrap();
        assert_eq!(sink.rows_written(), 3);

        let lines: Vec<String> = std::fs::read_to_string(&path)
            .unwrap()
            .lines()
            .map(String::from)
            .collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("1,"));
        assert!(lines[2].starts_with("2,"));
        assert!(lines[3].starts_with("2,"));
    }

    #[test]
    fn quotes_labels_containing_commas() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&[record(1, 3, "chair, folding", 2.0)]).unwrap();
        sink.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("3,\"chair, folding\",2.00"));
    }

    #[test]
    fn multiword_labels_pass_through_unquoted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.csv");
        let mut sink = CsvSink::create(&path).unwrap();
        sink.append(&[record(4, 2, "cell phone", 0.9)]).unwrap();
        sink.flush().unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("4,10:30:00,2,cell phone,0.90"));
    }
}
