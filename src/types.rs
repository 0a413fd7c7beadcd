//! Core value model for cleaning.
//!
//! The cleaner walks a tree of dynamically-typed [`Value`]s. Besides the usual JSON-like
//! shapes (scalars, [`Value::Array`], [`Value::Object`]) the model carries the opaque kinds a
//! dynamic runtime hands around (functions, dates, patterns, collections, errors) so every
//! cleaning category has a concrete representation.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

/// A single dynamically-typed value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// No value at all. Also stands in for holes in sparse arrays.
    Undefined,
    /// Explicit null. Preserved by the default cleaner.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float (NaN and infinities included).
    Float64(f64),
    /// Arbitrary-precision-ish integer that is not a plain number.
    BigInt(i128),
    /// UTF-8 string.
    Utf8(String),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Ordered sequence.
    Array(Vec<Value>),
    /// Plain key-value mapping (insertion ordered).
    Object(Mapping),
    /// Class instance: object-like, but not a plain mapping.
    Instance(Instance),
    /// Function value.
    Function(Callable),
    /// Regular expression (source + flags); never evaluated.
    Regex(Pattern),
    /// Value set collection.
    Set(Vec<Value>),
    /// Keyed collection with arbitrary keys.
    Map(Vec<(Value, Value)>),
    /// Error value carrying its message.
    Error(String),
    /// Unique symbol, identified by its description.
    Symbol(String),
}

impl Value {
    /// Short name of the variant, for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int64(_) => "int64",
            Value::Float64(_) => "float64",
            Value::BigInt(_) => "bigint",
            Value::Utf8(_) => "utf8",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Instance(_) => "instance",
            Value::Function(_) => "function",
            Value::Regex(_) => "regex",
            Value::Set(_) => "set",
            Value::Map(_) => "map",
            Value::Error(_) => "error",
            Value::Symbol(_) => "symbol",
        }
    }

    /// Build a function value.
    pub fn function<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Value::Function(Callable::new(name, f))
    }

    /// Build a class instance value.
    pub fn instance(class_name: impl Into<String>, fields: Mapping) -> Self {
        Value::Instance(Instance::new(class_name, fields))
    }

    /// Build a regular expression value.
    pub fn regex(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Value::Regex(Pattern::new(source, flags))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Utf8(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    /// Own fields of a mapping or instance.
    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Value::Object(map) => Some(map),
            Value::Instance(inst) => Some(&inst.fields),
            _ => None,
        }
    }

    /// Look up an own field of a mapping or instance.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_mapping().and_then(|m| m.get(key))
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int64(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int64(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float64(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Mapping> for Value {
    fn from(v: Mapping) -> Self {
        Value::Object(v)
    }
}

impl From<Instance> for Value {
    fn from(v: Instance) -> Self {
        Value::Instance(v)
    }
}

/// Insertion-ordered, string-keyed mapping.
///
/// Re-inserting an existing key replaces the value but keeps the key's original position.
/// Equality ignores key order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mapping {
    entries: IndexMap<String, Value>,
}

impl Mapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapping with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Insert `value` under `key`, returning the previous value if the key was present.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.entries.insert(key.into(), value)
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    // Callers guarantee `key` is not present yet (keys copied from another mapping).
    pub(crate) fn push_unique(&mut self, key: String, value: Value) {
        debug_assert!(!self.contains_key(&key), "duplicate key '{key}'");
        self.entries.insert(key, value);
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Mapping {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl IntoIterator for Mapping {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// An object-like value that is not a plain mapping: a named class plus its own fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Instance {
    /// Name of the instance's class.
    pub class_name: String,
    /// Own enumerable fields, in declaration order.
    pub fields: Mapping,
}

impl Instance {
    pub fn new(class_name: impl Into<String>, fields: Mapping) -> Self {
        Self {
            class_name: class_name.into(),
            fields,
        }
    }
}

/// A shareable function value.
///
/// Two callables are equal only if they share the same underlying function allocation.
#[derive(Clone)]
pub struct Callable {
    name: String,
    func: Arc<dyn Fn(&[Value]) -> Value + Send + Sync>,
}

impl Callable {
    pub fn new<F>(name: impl Into<String>, f: F) -> Self
    where
        F: Fn(&[Value]) -> Value + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(f),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    pub fn call(&self, args: &[Value]) -> Value {
        (self.func)(args)
    }
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callable").field("name", &self.name).finish()
    }
}

impl PartialEq for Callable {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(Arc::as_ptr(&self.func), Arc::as_ptr(&other.func))
    }
}

/// Regular expression source and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub source: String,
    pub flags: String,
}

impl Pattern {
    pub fn new(source: impl Into<String>, flags: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            flags: flags.into(),
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.source, self.flags)
    }
}
