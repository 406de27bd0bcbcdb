//! JSON sink for structured logging

use crate::core::{Record, Result, Sink};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Writes each record as a single-line JSON object (JSONL format)
///
/// A key written more than once keeps its last value.
pub struct JsonSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Encode a record without writing it
    pub fn encode(record: &Record) -> Result<String> {
        Ok(serde_json::to_string(&record.to_json_map())?)
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl JsonSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Sink for JsonSink<W> {
    fn write(&self, record: &Record) -> Result<()> {
        let mut line = Self::encode(record)?;
        line.push('\n');
        self.writer.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "json"
    }
}
