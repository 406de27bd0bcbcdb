//! Process-wide default context
//!
//! A single registry entry holds the root [`Leveler`]. `init` and
//! `add_default_keyvals` replace the entry; every other operation clones it
//! and builds independent values from the copy. The entry is created with
//! [`LogFormat::default`] on first use if `init` was never called.
//!
//! `init` is meant to run once, early, before other threads start logging.

use crate::core::{
    Binding, CallSite, Config, Leveler, Level, LogFormat, Output, Result, Sink,
};
use crate::sinks;
use parking_lot::RwLock;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// `function` value for records arriving through the `log` crate bridge.
pub const STDLIB_FUNCTION: &str = "stdlibLoggerRedirect";

static DEFAULT: RwLock<Option<Leveler>> = parking_lot::const_rwlock(None);

fn root(sink: Arc<dyn Sink>, min_level: Level) -> Leveler {
    Leveler::new(sink).with_min_level(min_level)
}

fn install(root: Leveler) {
    #[cfg(feature = "log-bridge")]
    let min_level = root.min_level();
    *DEFAULT.write() = Some(root);
    #[cfg(feature = "log-bridge")]
    crate::bridge::install(min_level);
}

fn convert_format<F>(format: F) -> LogFormat
where
    F: TryInto<LogFormat>,
    F::Error: fmt::Display,
{
    format.try_into().unwrap_or_else(|e| panic!("{}", e))
}

/// (Re)configure the default context to write `format` to stdout.
///
/// Drops every key added by earlier [`add_default_keyvals`] calls and
/// re-attaches `ts`, `caller` and `function`.
///
/// # Panics
///
/// If `format` does not name a known [`LogFormat`]. Running without a working
/// logger is not an option.
///
/// ```should_panic
/// leveled_logger::init("xml");
/// ```
pub fn init<F>(format: F)
where
    F: TryInto<LogFormat>,
    F::Error: fmt::Display,
{
    init_with_writer(format, io::stdout());
}

/// Like [`init`], writing to `writer` instead of stdout.
pub fn init_with_writer<F, W>(format: F, writer: W)
where
    F: TryInto<LogFormat>,
    F::Error: fmt::Display,
    W: Write + Send + 'static,
{
    let format = convert_format(format);
    install(root(sinks::for_format(format, writer), Level::Debug));
}

/// Like [`init`], backed by a custom sink.
pub fn init_with_sink(sink: Arc<dyn Sink>) {
    install(root(sink, Level::Debug));
}

/// Apply a [`Config`]. Fails only when the configured output cannot be opened.
pub fn init_with_config(config: &Config) -> Result<()> {
    let sink = match &config.output {
        Output::Stdout => sinks::for_format(config.format, io::stdout()),
        Output::Stderr => sinks::for_format(config.format, io::stderr()),
        Output::File(path) => sinks::for_format(config.format, Output::open_file(path)?),
    };
    install(root(sink, config.min_level));
    Ok(())
}

/// Append key-values to the default context.
///
/// Call after [`init`]: a later `init` discards them.
pub fn add_default_keyvals<I, K, V>(keyvals: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Binding>,
{
    let mut guard = DEFAULT.write();
    let current = match guard.take() {
        Some(current) => current,
        None => root(sinks::for_format(LogFormat::default(), io::stdout()), Level::Debug),
    };
    #[cfg(feature = "log-bridge")]
    let min_level = current.min_level();
    *guard = Some(current.with(keyvals));
    drop(guard);

    #[cfg(feature = "log-bridge")]
    crate::bridge::install(min_level);
}

/// Current default context.
pub fn leveler() -> Leveler {
    if let Some(current) = DEFAULT.read().as_ref() {
        return current.clone();
    }

    let mut guard = DEFAULT.write();
    let current = guard
        .get_or_insert_with(|| {
            root(sinks::for_format(LogFormat::default(), io::stdout()), Level::Debug)
        })
        .clone();
    drop(guard);

    #[cfg(feature = "log-bridge")]
    crate::bridge::install(current.min_level());
    current
}

/// Default context plus `keyvals`. Global state is untouched.
pub fn with<I, K, V>(keyvals: I) -> Leveler
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Binding>,
{
    leveler().with(keyvals)
}

/// Default context with `caller`/`function` pinned to `site`, then `keyvals`.
///
/// ```
/// use leveled_logger::{info, CallSite};
///
/// // Helper that reports its caller, not itself.
/// fn audit(site: CallSite, action: &str) {
///     let log = leveled_logger::with_call_site(site, [("action", action)]);
///     info!(log).msg("audit");
/// }
///
/// audit(leveled_logger::call_site!(), "login");
/// ```
pub fn with_call_site<I, K, V>(site: CallSite, keyvals: I) -> Leveler
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Binding>,
{
    leveler().with_call_site(site, keyvals)
}

/// Log `err` at error level from the default context and return it.
pub fn log_error_at<E, I, K, V>(site: CallSite, err: E, keyvals: I) -> E
where
    E: fmt::Display,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Binding>,
{
    leveler().log_error_at(site, err, keyvals)
}

/// Flush the sink behind the default context.
pub fn flush() -> Result<()> {
    leveler().sink().flush()
}
