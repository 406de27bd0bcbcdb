//! Sink trait for log output destinations

use super::{error::Result, record::Record};

/// Destination and encoding for emitted records.
///
/// Implementations must accept concurrent `write` calls and write each record
/// as one unit.
pub trait Sink: Send + Sync {
    fn write(&self, record: &Record) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn name(&self) -> &str;
}
