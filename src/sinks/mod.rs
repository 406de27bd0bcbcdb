//! Sink implementations

pub mod buffer;
pub mod json;
pub mod logfmt;
pub mod nop;

pub use buffer::SharedBuffer;
pub use json::JsonSink;
pub use logfmt::LogfmtSink;
pub use nop::NopSink;

pub use crate::core::Sink;

use crate::core::LogFormat;
use std::io::Write;
use std::sync::Arc;

/// Build the sink matching `format` on top of `writer`.
pub fn for_format<W>(format: LogFormat, writer: W) -> Arc<dyn Sink>
where
    W: Write + Send + 'static,
{
    match format {
        LogFormat::Json => Arc::new(JsonSink::new(writer)),
        LogFormat::Logfmt => Arc::new(LogfmtSink::new(writer)),
        LogFormat::Nop => Arc::new(NopSink),
    }
}
