//! Key-value field types
//!
//! This module provides:
//! - `FieldValue`: the concrete value written to a sink
//! - `Binding`: how a key obtains its value when a record is emitted
//! - `Valuer`: user supplied closure evaluated once per record

use super::call_site::CallSite;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Value type for structured logging fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Int(i) => write!(f, "{}", i),
            FieldValue::Float(fl) => write!(f, "{}", fl),
            FieldValue::Bool(b) => write!(f, "{}", b),
            FieldValue::Null => write!(f, "null"),
        }
    }
}

impl FieldValue {
    /// Convert to serde_json::Value for JSON serialization
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            FieldValue::String(s) => serde_json::Value::String(s.clone()),
            FieldValue::Int(i) => serde_json::Value::Number((*i).into()),
            FieldValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            FieldValue::Bool(b) => serde_json::Value::Bool(*b),
            FieldValue::Null => serde_json::Value::Null,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<&String> for FieldValue {
    fn from(s: &String) -> Self {
        FieldValue::String(s.clone())
    }
}

impl From<i64> for FieldValue {
    fn from(i: i64) -> Self {
        FieldValue::Int(i)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u32> for FieldValue {
    fn from(i: u32) -> Self {
        FieldValue::Int(i as i64)
    }
}

impl From<u64> for FieldValue {
    fn from(i: u64) -> Self {
        i64::try_from(i)
            .map(FieldValue::Int)
            .unwrap_or_else(|_| FieldValue::String(i.to_string()))
    }
}

impl From<usize> for FieldValue {
    fn from(i: usize) -> Self {
        FieldValue::from(i as u64)
    }
}

impl From<f64> for FieldValue {
    fn from(f: f64) -> Self {
        FieldValue::Float(f)
    }
}

impl From<f32> for FieldValue {
    fn from(f: f32) -> Self {
        FieldValue::Float(f as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

/// Closure evaluated each time a record carrying its key is emitted.
pub type Valuer = Arc<dyn Fn() -> FieldValue + Send + Sync>;

/// How a key gets its value at emit time.
///
/// `Timestamp`, `Caller` and `Function` are resolved against the record being
/// emitted, so a context built once keeps reporting the right time and call
/// site for every record logged through it.
#[derive(Clone)]
pub enum Binding {
    Value(FieldValue),
    /// UTC time of the record, RFC 3339 with nanoseconds
    Timestamp,
    /// `file:line` of the record's call site
    Caller,
    /// Path of the function that requested the record
    Function,
    Valuer(Valuer),
}

impl Binding {
    /// Wrap a closure as a lazily evaluated value.
    pub fn valuer<F>(f: F) -> Self
    where
        F: Fn() -> FieldValue + Send + Sync + 'static,
    {
        Binding::Valuer(Arc::new(f))
    }

    pub fn resolve(&self, site: &CallSite, now: &DateTime<Utc>) -> FieldValue {
        match self {
            Binding::Value(value) => value.clone(),
            Binding::Timestamp => {
                FieldValue::String(now.to_rfc3339_opts(SecondsFormat::Nanos, true))
            }
            Binding::Caller => FieldValue::String(site.to_string()),
            Binding::Function => FieldValue::String(site.function().to_string()),
            Binding::Valuer(f) => f(),
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Binding::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Binding::Timestamp => f.write_str("Timestamp"),
            Binding::Caller => f.write_str("Caller"),
            Binding::Function => f.write_str("Function"),
            Binding::Valuer(_) => f.write_str("Valuer(..)"),
        }
    }
}

impl From<FieldValue> for Binding {
    fn from(value: FieldValue) -> Self {
        Binding::Value(value)
    }
}

macro_rules! binding_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Binding {
                fn from(value: $ty) -> Self {
                    Binding::Value(FieldValue::from(value))
                }
            }
        )*
    };
}

binding_from!(String, &str, &String, i64, i32, u32, u64, usize, f64, f32, bool);

impl<T: Into<FieldValue>> From<Option<T>> for Binding {
    fn from(value: Option<T>) -> Self {
        Binding::Value(FieldValue::from(value))
    }
}

/// Ordered key-value pairs as accepted by every facade operation.
pub type KeyValues = Vec<(String, Binding)>;
