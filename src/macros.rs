//! Logging macros that capture the call site.
//!
//! Every macro records `file!()`, `line!()` and the enclosing function where it
//! is expanded, so `caller` and `function` point at the code that asked for the
//! record, however many helpers sit in between.
//!
//! # Examples
//!
//! ```
//! use leveled_logger::{error, info, kv, log_error, with};
//!
//! // Default context
//! info!().log(kv!("msg" => "server started", "port" => 8080));
//!
//! // Extra context for a single record
//! error!(with!("user_id" => 42)).log(kv!("msg" => "login failed"));
//!
//! // Log and propagate
//! fn parse(input: &str) -> Result<u16, std::num::ParseIntError> {
//!     input.parse::<u16>().map_err(|e| log_error!(e, "input" => input))
//! }
//! assert!(parse("x").is_err());
//! ```

/// Build the ordered key-value list accepted by facade operations.
///
/// ```
/// use leveled_logger::kv;
///
/// let keyvals = kv!("msg" => "hello", "attempt" => 3, "cached" => false);
/// assert_eq!(keyvals.len(), 3);
/// assert!(kv!().is_empty());
/// ```
#[macro_export]
macro_rules! kv {
    () => {
        ::std::vec::Vec::<(::std::string::String, $crate::Binding)>::new()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        ::std::vec![$((::std::string::String::from($key), $crate::Binding::from($value))),+]
    };
}

/// Logger at an explicit level.
///
/// ```
/// use leveled_logger::{kv, log, Level};
///
/// log!(Level::Warn).log(kv!("msg" => "disk almost full"));
/// ```
#[macro_export]
macro_rules! log {
    ($level:expr) => {
        $crate::leveler().level_at($level, $crate::call_site!())
    };
    ($leveler:expr, $level:expr) => {
        $crate::Leveler::level_at(&$leveler, $level, $crate::call_site!())
    };
}

/// Debug-level logger from the default context or the given `Leveler`.
#[macro_export]
macro_rules! debug {
    () => {
        $crate::leveler().debug_at($crate::call_site!())
    };
    ($leveler:expr) => {
        $crate::Leveler::debug_at(&$leveler, $crate::call_site!())
    };
}

/// Info-level logger from the default context or the given `Leveler`.
///
/// ```
/// use leveled_logger::{info, kv};
///
/// info!().log(kv!("msg" => "ready"));
/// ```
#[macro_export]
macro_rules! info {
    () => {
        $crate::leveler().info_at($crate::call_site!())
    };
    ($leveler:expr) => {
        $crate::Leveler::info_at(&$leveler, $crate::call_site!())
    };
}

/// Warn-level logger from the default context or the given `Leveler`.
#[macro_export]
macro_rules! warn {
    () => {
        $crate::leveler().warn_at($crate::call_site!())
    };
    ($leveler:expr) => {
        $crate::Leveler::warn_at(&$leveler, $crate::call_site!())
    };
}

/// Error-level logger from the default context or the given `Leveler`.
#[macro_export]
macro_rules! error {
    () => {
        $crate::leveler().error_at($crate::call_site!())
    };
    ($leveler:expr) => {
        $crate::Leveler::error_at(&$leveler, $crate::call_site!())
    };
}

/// Logger tagged `level=crit` from the default context or the given `Leveler`.
///
/// ```
/// use leveled_logger::{crit, kv};
///
/// crit!().log(kv!("msg" => "data directory unreadable"));
/// ```
#[macro_export]
macro_rules! crit {
    () => {
        $crate::leveler().crit_at($crate::call_site!())
    };
    ($leveler:expr) => {
        $crate::Leveler::crit_at(&$leveler, $crate::call_site!())
    };
}

/// Default context plus the given key-values.
///
/// ```
/// use leveled_logger::{info, with};
///
/// let request = with!("request_id" => "abc-123", "method" => "GET");
/// info!(request).msg("handled");
/// ```
#[macro_export]
macro_rules! with {
    ($($key:expr => $value:expr),* $(,)?) => {
        $crate::with($crate::kv!($($key => $value),*))
    };
}

/// Log an error under the `err` key at error level and evaluate to it.
///
/// ```
/// use leveled_logger::log_error;
///
/// fn open(path: &str) -> std::io::Result<std::fs::File> {
///     std::fs::File::open(path).map_err(|e| log_error!(e, "path" => path))
/// }
/// assert!(open("/definitely/not/here").is_err());
/// ```
#[macro_export]
macro_rules! log_error {
    ($err:expr $(, $key:expr => $value:expr)* $(,)?) => {
        $crate::log_error_at($crate::call_site!(), $err, $crate::kv!($($key => $value),*))
    };
}
