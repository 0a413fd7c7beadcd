//! Category classification.
//!
//! Every [`Value`] belongs to exactly one [`Category`]. Classification evaluates the category
//! predicates in [`Category::ALL`] order and returns the first one that matches, ending with
//! [`Category::Fallback`], which matches everything.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CleanError;
use crate::types::Value;

/// Semantic category of a value, in classification order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Ordered sequence.
    Sequence,
    /// Object-like value that is not a plain mapping (class instances).
    GenericObjectLike,
    /// Plain key-value mapping.
    KeyValueMapping,
    /// Undefined / missing.
    Absent,
    /// Function.
    Callable,
    /// Boolean.
    Boolean,
    /// Explicit null.
    Nothing,
    /// Number.
    Numeric,
    /// Text.
    Textual,
    /// Date / time.
    Temporal,
    /// Anything else.
    Fallback,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 11;

    /// All categories, in the order classification tries them.
    pub const ALL: [Category; Category::COUNT] = [
        Category::Sequence,
        Category::GenericObjectLike,
        Category::KeyValueMapping,
        Category::Absent,
        Category::Callable,
        Category::Boolean,
        Category::Nothing,
        Category::Numeric,
        Category::Textual,
        Category::Temporal,
        Category::Fallback,
    ];

    /// Position of this category in [`Self::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Canonical snake_case name.
    pub fn name(self) -> &'static str {
        match self {
            Category::Sequence => "sequence",
            Category::GenericObjectLike => "generic_object_like",
            Category::KeyValueMapping => "key_value_mapping",
            Category::Absent => "absent",
            Category::Callable => "callable",
            Category::Boolean => "boolean",
            Category::Nothing => "nothing",
            Category::Numeric => "numeric",
            Category::Textual => "textual",
            Category::Temporal => "temporal",
            Category::Fallback => "fallback",
        }
    }

    /// Whether `value` satisfies this category's predicate on its own.
    ///
    /// More than one category may match a value; [`classify`] resolves that by order.
    pub fn matches(self, value: &Value) -> bool {
        match self {
            Category::Sequence => is_sequence(value),
            Category::GenericObjectLike => is_object_like(value),
            Category::KeyValueMapping => is_key_value_mapping(value),
            Category::Absent => is_absent(value),
            Category::Callable => is_callable(value),
            Category::Boolean => is_boolean(value),
            Category::Nothing => is_nothing(value),
            Category::Numeric => is_numeric(value),
            Category::Textual => is_textual(value),
            Category::Temporal => is_temporal(value),
            Category::Fallback => true,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = CleanError;

    /// Parse a canonical name, or one of the legacy `isXxx` processor keys.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let by_name = Category::ALL.iter().copied().find(|c| c.name() == s);
        if let Some(c) = by_name {
            return Ok(c);
        }
        match s {
            "isArray" => Ok(Category::Sequence),
            "isObjectLike" => Ok(Category::GenericObjectLike),
            "isPlainObject" => Ok(Category::KeyValueMapping),
            "isUndefined" => Ok(Category::Absent),
            "isFunction" => Ok(Category::Callable),
            "isBoolean" => Ok(Category::Boolean),
            "isNull" => Ok(Category::Nothing),
            "isNumber" => Ok(Category::Numeric),
            "isString" => Ok(Category::Textual),
            "isDate" => Ok(Category::Temporal),
            other => Err(CleanError::configuration(format!(
                "unknown category '{other}'"
            ))),
        }
    }
}

/// Classify `value` into its category.
pub fn classify(value: &Value) -> Category {
    Category::ALL
        .into_iter()
        .find(|c| c.matches(value))
        .unwrap_or(Category::Fallback)
}

pub fn is_sequence(value: &Value) -> bool {
    matches!(value, Value::Array(_))
}

/// Non-null, non-sequence objects that are neither plain mappings nor one of the excluded
/// built-in kinds (dates, patterns, sets, maps, errors).
pub fn is_object_like(value: &Value) -> bool {
    matches!(value, Value::Instance(_))
}

pub fn is_key_value_mapping(value: &Value) -> bool {
    matches!(value, Value::Object(_))
}

pub fn is_absent(value: &Value) -> bool {
    matches!(value, Value::Undefined)
}

pub fn is_callable(value: &Value) -> bool {
    matches!(value, Value::Function(_))
}

pub fn is_boolean(value: &Value) -> bool {
    matches!(value, Value::Bool(_))
}

pub fn is_nothing(value: &Value) -> bool {
    matches!(value, Value::Null)
}

pub fn is_numeric(value: &Value) -> bool {
    matches!(value, Value::Int64(_) | Value::Float64(_))
}

pub fn is_textual(value: &Value) -> bool {
    matches!(value, Value::Utf8(_))
}

pub fn is_temporal(value: &Value) -> bool {
    matches!(value, Value::Date(_))
}
