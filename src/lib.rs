//! # Leveled Logger
//!
//! A leveled structured-logging facade. Loggers are narrowed to a severity
//! (debug, info, warn, error, crit) and every record carries a UTC timestamp,
//! the caller's `file:line` and the calling function.
//!
//! ## Features
//!
//! - **Call-site attribution**: captured by the logging macros, stable through
//!   wrapper helpers
//! - **Immutable contexts**: `with` returns a new `Leveler`, nothing is shared
//!   mutably between threads
//! - **JSON, logfmt or nop output**, selected once with `init`
//! - **`log` crate redirect** (feature `log-bridge`, on by default)
//!
//! ```
//! use leveled_logger::{info, kv, LogFormat};
//!
//! leveled_logger::init(LogFormat::Logfmt);
//! leveled_logger::add_default_keyvals([("service", "billing")]);
//!
//! info!().log(kv!("msg" => "started", "port" => 8080));
//! ```

pub mod core;
pub mod facade;
pub mod macros;
pub mod sinks;

#[cfg(feature = "log-bridge")]
pub mod bridge;

pub mod prelude {
    pub use crate::core::{
        Binding, CallSite, Config, FieldValue, Level, Leveler, LogFormat, Logger, LoggerError,
        Output, Record, Result, Sink,
    };
    pub use crate::facade::{
        add_default_keyvals, init, init_with_config, init_with_sink, init_with_writer, leveler,
        log_error_at, with, with_call_site,
    };
}

pub use crate::core::{
    Binding, CallSite, Config, FieldValue, KeyValues, Level, Leveler, LogFormat, Logger,
    LoggerError, Output, Record, Result, Sink, Valuer,
};
pub use facade::{
    add_default_keyvals, flush, init, init_with_config, init_with_sink, init_with_writer,
    leveler, log_error_at, with, with_call_site, STDLIB_FUNCTION,
};
