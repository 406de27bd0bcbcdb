//! Logfmt sink (key=value pairs)

use crate::core::{FieldValue, Record, Result, Sink};
use parking_lot::Mutex;
use std::io::{self, Write};

/// Writes each record as one line of space separated `key=value` pairs
///
/// Pairs keep record order, including repeated keys.
pub struct LogfmtSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> LogfmtSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Encode a record without writing it
    pub fn encode(record: &Record) -> String {
        record
            .fields()
            .iter()
            .map(|(key, value)| format!("{}={}", escape_key(key), format_value(value)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

impl LogfmtSink<io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> Sink for LogfmtSink<W> {
    fn write(&self, record: &Record) -> Result<()> {
        let mut line = Self::encode(record);
        line.push('\n');
        self.writer.lock().write_all(line.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "logfmt"
    }
}

fn format_value(value: &FieldValue) -> String {
    match value {
        FieldValue::String(s) => escape_value(s),
        FieldValue::Int(i) => i.to_string(),
        // Same spelling as the JSON sink: `1.0` stays `1.0`, non-finite is null.
        FieldValue::Float(f) if f.is_finite() => format!("{:?}", f),
        FieldValue::Float(_) => "null".to_string(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::Null => "null".to_string(),
    }
}

/// Keep characters that cannot break a `key=value` pair
fn escape_key(key: &str) -> String {
    let escaped: String = key
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '/' | ':'))
        .collect();
    if escaped.is_empty() {
        "_".to_string()
    } else {
        escaped
    }
}

/// Quote a value when it is empty or contains separators or control characters
fn escape_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c == ' ' || c == '=' || c == '"' || c.is_control());
    if needs_quotes {
        quote_value(value)
    } else {
        value.to_string()
    }
}

fn quote_value(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}
