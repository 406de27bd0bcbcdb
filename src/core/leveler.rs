//! Immutable logging contexts and level-narrowed logger handles

use super::{
    call_site::CallSite,
    error::Result,
    field::{Binding, FieldValue, KeyValues},
    level::Level,
    record::Record,
    sink::Sink,
};
use chrono::Utc;
use std::fmt;
use std::sync::Arc;

/// Keys every `Leveler` starts with.
pub const DEFAULT_KEYS: [&str; 3] = ["ts", "caller", "function"];

/// One layer of key-values; layers share their parents.
struct Layer {
    parent: Option<Arc<Layer>>,
    fields: KeyValues,
}

/// A logging context with an accumulated set of key-values.
///
/// Every context starts with `ts`, `caller` and `function`, resolved when a
/// record is emitted. `with` never mutates: it returns a new `Leveler` that shares every
/// existing layer and adds one of its own. A `Leveler` does not emit by itself;
/// narrow it to a severity with one of the `*_at` methods first.
///
/// # Example
///
/// ```
/// use leveled_logger::prelude::*;
/// use leveled_logger::sinks::{JsonSink, SharedBuffer};
/// use std::sync::Arc;
///
/// let buffer = SharedBuffer::new();
/// let root = Leveler::new(Arc::new(JsonSink::new(buffer.clone())));
/// let request = root.with([("request_id", "abc-123")]);
///
/// request.info_at(leveled_logger::call_site!()).log([("msg", "accepted")]);
/// assert!(buffer.contents().contains("abc-123"));
/// ```
#[derive(Clone)]
pub struct Leveler {
    sink: Arc<dyn Sink>,
    context: Option<Arc<Layer>>,
    min_level: Level,
    site: Option<CallSite>,
}

impl Leveler {
    /// Root context writing to `sink`, seeded with [`DEFAULT_KEYS`].
    #[must_use]
    pub fn new(sink: Arc<dyn Sink>) -> Self {
        Self {
            sink,
            context: Some(Arc::new(Layer {
                parent: None,
                fields: vec![
                    ("ts".to_string(), Binding::Timestamp),
                    ("caller".to_string(), Binding::Caller),
                    ("function".to_string(), Binding::Function),
                ],
            })),
            min_level: Level::Debug,
            site: None,
        }
    }

    /// Drop records below `level` before they reach the sink.
    #[must_use]
    pub fn with_min_level(mut self, level: Level) -> Self {
        self.min_level = level;
        self
    }

    pub fn min_level(&self) -> Level {
        self.min_level
    }

    pub fn sink(&self) -> &Arc<dyn Sink> {
        &self.sink
    }

    /// Call site pinned by [`Leveler::with_call_site`], if any.
    pub fn call_site(&self) -> Option<CallSite> {
        self.site
    }

    /// Return a new `Leveler` carrying `keyvals` after the existing ones.
    #[must_use]
    pub fn with<I, K, V>(&self, keyvals: I) -> Leveler
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Binding>,
    {
        let fields: KeyValues = keyvals
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        if fields.is_empty() {
            return self.clone();
        }

        Leveler {
            sink: Arc::clone(&self.sink),
            context: Some(Arc::new(Layer {
                parent: self.context.clone(),
                fields,
            })),
            min_level: self.min_level,
            site: self.site,
        }
    }

    /// Return a new `Leveler` whose `caller` and `function` always report
    /// `site`, then layer `keyvals` on top.
    ///
    /// Helpers that wrap the facade take their caller's `CallSite` and pass it
    /// here so records point at the code that called the helper.
    #[must_use]
    pub fn with_call_site<I, K, V>(&self, site: CallSite, keyvals: I) -> Leveler
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Binding>,
    {
        let mut attribution = Vec::new();
        if !self.has_binding(|b| matches!(b, Binding::Caller)) {
            attribution.push(("caller", Binding::Caller));
        }
        if !self.has_binding(|b| matches!(b, Binding::Function)) {
            attribution.push(("function", Binding::Function));
        }

        let mut pinned = self.with(attribution).with(keyvals);
        pinned.site = Some(site);
        pinned
    }

    /// Narrow to `level`. A pinned call site takes precedence over `site`.
    pub fn level_at(&self, level: Level, site: CallSite) -> Logger {
        Logger {
            leveler: self.clone(),
            level,
            site: self.site.unwrap_or(site),
        }
    }

    pub fn debug_at(&self, site: CallSite) -> Logger {
        self.level_at(Level::Debug, site)
    }

    pub fn info_at(&self, site: CallSite) -> Logger {
        self.level_at(Level::Info, site)
    }

    pub fn warn_at(&self, site: CallSite) -> Logger {
        self.level_at(Level::Warn, site)
    }

    pub fn error_at(&self, site: CallSite) -> Logger {
        self.level_at(Level::Error, site)
    }

    pub fn crit_at(&self, site: CallSite) -> Logger {
        self.level_at(Level::Crit, site)
    }

    /// Log `err` under the `err` key at error level and hand it back.
    ///
    /// ```
    /// # use leveled_logger::prelude::*;
    /// # use leveled_logger::sinks::NopSink;
    /// # use std::sync::Arc;
    /// fn load(log: &Leveler) -> std::io::Result<()> {
    ///     let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    ///     Err(log.log_error_at(leveled_logger::call_site!(), err, [("path", "a.toml")]))
    /// }
    /// # assert!(load(&Leveler::new(Arc::new(NopSink))).is_err());
    /// ```
    pub fn log_error_at<E, I, K, V>(&self, site: CallSite, err: E, keyvals: I) -> E
    where
        E: fmt::Display,
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Binding>,
    {
        self.with(keyvals)
            .error_at(site)
            .log([("err", err.to_string())]);
        err
    }

    /// Keys of the accumulated context, oldest first.
    pub fn keys(&self) -> Vec<String> {
        self.layers()
            .flat_map(|layer| layer.fields.iter().map(|(k, _)| k.clone()))
            .collect()
    }

    fn layers(&self) -> impl Iterator<Item = &Layer> {
        let mut chain = Vec::new();
        let mut current = self.context.as_deref();
        while let Some(layer) = current {
            chain.push(layer);
            current = layer.parent.as_deref();
        }
        chain.into_iter().rev()
    }

    fn has_binding(&self, pred: impl Fn(&Binding) -> bool) -> bool {
        self.layers()
            .any(|layer| layer.fields.iter().any(|(_, binding)| pred(binding)))
    }

    fn field_count(&self) -> usize {
        self.layers().map(|layer| layer.fields.len()).sum()
    }
}

impl fmt::Debug for Leveler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leveler")
            .field("sink", &self.sink.name())
            .field("keys", &self.keys())
            .field("min_level", &self.min_level)
            .field("site", &self.site)
            .finish()
    }
}

/// A `Leveler` narrowed to one severity and attributed to one call site.
#[derive(Clone, Debug)]
pub struct Logger {
    leveler: Leveler,
    level: Level,
    site: CallSite,
}

impl Logger {
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn call_site(&self) -> CallSite {
        self.site
    }

    pub fn enabled(&self) -> bool {
        self.level >= self.leveler.min_level
    }

    /// Build the record this logger would emit for `keyvals`.
    ///
    /// Field order: `level`, then the context in insertion order, then
    /// `keyvals`.
    pub fn record<I, K, V>(&self, keyvals: I) -> Record
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Binding>,
    {
        let now = Utc::now();
        let mut record = Record::with_capacity(self.level, self.leveler.field_count() + 4);
        record.push("level", self.level.as_str());

        for layer in self.leveler.layers() {
            for (key, binding) in &layer.fields {
                record.push(key.clone(), binding.resolve(&self.site, &now));
            }
        }
        for (key, value) in keyvals {
            let binding: Binding = value.into();
            record.push(key, binding.resolve(&self.site, &now));
        }
        record
    }

    /// Emit one record, returning any sink failure.
    pub fn try_log<I, K, V>(&self, keyvals: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Binding>,
    {
        if !self.enabled() {
            return Ok(());
        }
        let record = self.record(keyvals);
        self.leveler.sink.write(&record)
    }

    /// Emit one record. Sink failures are ignored.
    pub fn log<I, K, V>(&self, keyvals: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Binding>,
    {
        let _ = self.try_log(keyvals);
    }

    /// Shorthand for `log([("msg", msg)])`.
    pub fn msg(&self, msg: impl Into<FieldValue>) {
        self.log([("msg", Binding::Value(msg.into()))]);
    }
}
