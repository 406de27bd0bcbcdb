//! Redirect for the `log` crate
//!
//! Records emitted with `log::info!`, `log::warn!` and `log::error!` are
//! re-emitted through the current default context, tagged `level=info`.
//! `log::debug!` and `log::trace!` are never redirected. A record passes when
//! its own `log` severity reaches the root's minimum level, and the `log` max
//! level follows that minimum so filtered records are never formatted.
//!
//! The `log` crate accepts a single logger per process, so the bridge is
//! installed once and looks up the default context on every record, following
//! later `init` calls.

use crate::core::{CallSite, Level};
use crate::facade::{self, STDLIB_FUNCTION};
use log::{LevelFilter, Log, Metadata, Record};
use parking_lot::Once;

static BRIDGE: LogBridge = LogBridge;
static INSTALL: Once = Once::new();

/// `log::Log` implementation forwarding into the facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBridge;

impl LogBridge {
    fn call_site(record: &Record<'_>) -> CallSite {
        CallSite::new(
            record.file_static().unwrap_or("<unknown>"),
            record.line().unwrap_or(0),
            STDLIB_FUNCTION,
        )
    }

    /// Severity a `log` record is judged at against the minimum level.
    fn severity(level: log::Level) -> Level {
        match level {
            log::Level::Error => Level::Error,
            log::Level::Warn => Level::Warn,
            log::Level::Info => Level::Info,
            log::Level::Debug | log::Level::Trace => Level::Debug,
        }
    }

    /// Whether a `log` record at `level` is redirected under `min_level`.
    fn accepts(level: log::Level, min_level: Level) -> bool {
        level <= log::Level::Info && Self::severity(level) >= min_level
    }

    /// `log` max level matching `min_level`. Never finer than Info.
    fn max_level(min_level: Level) -> LevelFilter {
        match min_level {
            Level::Debug | Level::Info => LevelFilter::Info,
            Level::Warn => LevelFilter::Warn,
            Level::Error | Level::Crit => LevelFilter::Error,
        }
    }
}

impl Log for LogBridge {
    fn enabled(&self, metadata: &Metadata<'_>) -> bool {
        Self::accepts(metadata.level(), facade::leveler().min_level())
    }

    fn log(&self, record: &Record<'_>) {
        let leveler = facade::leveler();
        if !Self::accepts(record.level(), leveler.min_level()) {
            return;
        }

        // Tagged info regardless of the severity that let it through.
        let logger = leveler.level_at(Level::Info, Self::call_site(record));
        let _ = leveler
            .sink()
            .write(&logger.record([("msg", record.args().to_string())]));
    }

    fn flush(&self) {
        let _ = facade::flush();
    }
}

/// Route the `log` crate into the facade and align its max level with
/// `min_level`. The logger is registered once; the max level is updated on
/// every call.
pub fn install(min_level: Level) {
    INSTALL.call_once(|| {
        if let Err(e) = log::set_logger(&BRIDGE) {
            eprintln!(
                "[LOGGER ERROR] standard logging redirect not installed: {}",
                e
            );
        }
    });
    log::set_max_level(LogBridge::max_level(min_level));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_site_from_log_record() {
        let site = LogBridge::call_site(
            &Record::builder()
                .args(format_args!("hello"))
                .file_static(Some("src/legacy.rs"))
                .line(Some(31))
                .build(),
        );
        assert_eq!(site.to_string(), "src/legacy.rs:31");
        assert_eq!(site.function(), STDLIB_FUNCTION);
    }

    #[test]
    fn test_call_site_without_location() {
        let site = LogBridge::call_site(&Record::builder().args(format_args!("hello")).build());
        assert_eq!(site.to_string(), "<unknown>:0");
    }

    #[test]
    fn test_debug_and_trace_never_redirected() {
        assert!(!LogBridge::accepts(log::Level::Trace, Level::Debug));
        assert!(!LogBridge::accepts(log::Level::Debug, Level::Debug));
        assert!(LogBridge::accepts(log::Level::Info, Level::Debug));
    }

    #[test]
    fn test_min_level_judged_on_log_severity() {
        assert!(!LogBridge::accepts(log::Level::Info, Level::Warn));
        assert!(LogBridge::accepts(log::Level::Warn, Level::Warn));
        assert!(LogBridge::accepts(log::Level::Error, Level::Warn));
        assert!(!LogBridge::accepts(log::Level::Error, Level::Crit));
    }

    #[test]
    fn test_max_level_follows_min_level() {
        assert_eq!(LogBridge::max_level(Level::Debug), LevelFilter::Info);
        assert_eq!(LogBridge::max_level(Level::Info), LevelFilter::Info);
        assert_eq!(LogBridge::max_level(Level::Warn), LevelFilter::Warn);
        assert_eq!(LogBridge::max_level(Level::Crit), LevelFilter::Error);
    }
}
