//! Core facade types and traits

pub mod call_site;
pub mod config;
pub mod error;
pub mod field;
pub mod format;
pub mod level;
pub mod leveler;
pub mod record;
pub mod sink;

pub use call_site::CallSite;
pub use config::{Config, Output};
pub use error::{LoggerError, Result};
pub use field::{Binding, FieldValue, KeyValues, Valuer};
pub use format::LogFormat;
pub use level::Level;
pub use leveler::{Leveler, Logger, DEFAULT_KEYS};
pub use record::Record;
pub use sink::Sink;
