//! Category handlers and the handler table.
//!
//! A [`Handler`] receives the value being cleaned plus the [`Engine`] running the walk, and
//! returns `Some(cleaned)` or `None` when the value should be omitted from its parent.
//! Container handlers recurse through [`Engine::process`].

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::classify::{classify, Category};
use crate::error::CleanResult;
use crate::types::{Mapping, Value};

use super::engine::Engine;

/// A category handler. `Ok(None)` means "absent: omit from the parent container".
pub type Handler = Arc<dyn Fn(&Value, &Engine) -> CleanResult<Option<Value>> + Send + Sync>;

/// Wrap a closure or function into a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&Value, &Engine) -> CleanResult<Option<Value>> + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Wrap an infallible, non-recursing transform into a [`Handler`].
pub fn leaf<F>(f: F) -> Handler
where
    F: Fn(&Value) -> Option<Value> + Send + Sync + 'static,
{
    handler(move |value, _engine| Ok(f(value)))
}

/// Clean every element, dropping absent results. An array left empty is itself absent.
///
/// Holes (undefined elements) classify as absent and are dropped like any other absent result.
pub fn clean_sequence(value: &Value, engine: &Engine) -> CleanResult<Option<Value>> {
    let Some(items) = value.as_array() else {
        return Ok(Some(value.clone()));
    };

    let mut out = Vec::with_capacity(items.len());
    for item in items {
        if let Some(cleaned) = engine.process(item)? {
            out.push(cleaned);
        }
    }

    Ok(if out.is_empty() {
        None
    } else {
        Some(Value::Array(out))
    })
}

/// Clean every own field into a freshly built [`Value::Object`], omitting absent results.
/// A mapping left without keys is itself absent.
///
/// Instances are cleaned the same way; the output is a plain object.
pub fn clean_mapping(value: &Value, engine: &Engine) -> CleanResult<Option<Value>> {
    let Some(fields) = value.as_mapping() else {
        return Ok(Some(value.clone()));
    };

    let mut out = Mapping::with_capacity(fields.len());
    for (key, child) in fields.iter() {
        if let Some(cleaned) = engine.process(child)? {
            out.push_unique(key.to_string(), cleaned);
        }
    }

    Ok(if out.is_empty() {
        None
    } else {
        Some(Value::Object(out))
    })
}

/// ECMAScript `WhiteSpace` and `LineTerminator` characters.
///
/// Differs from [`char::is_whitespace`] on two code points: U+FEFF counts, U+0085 does not.
pub fn is_trimmable(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{FEFF}'
}

/// Trim surrounding whitespace (see [`is_trimmable`]); text that ends up empty is absent.
pub fn clean_text(value: &Value, _engine: &Engine) -> CleanResult<Option<Value>> {
    Ok(match value {
        Value::Utf8(s) => {
            let trimmed = s.trim_matches(is_trimmable);
            if trimmed.is_empty() {
                None
            } else {
                Some(Value::Utf8(trimmed.to_string()))
            }
        }
        other => Some(other.clone()),
    })
}

/// Identity.
pub fn keep(value: &Value, _engine: &Engine) -> CleanResult<Option<Value>> {
    Ok(Some(value.clone()))
}

/// Always absent.
pub fn omit(_value: &Value, _engine: &Engine) -> CleanResult<Option<Value>> {
    Ok(None)
}

fn default_handler(category: Category) -> Handler {
    match category {
        Category::Sequence => handler(clean_sequence),
        Category::GenericObjectLike | Category::KeyValueMapping => handler(clean_mapping),
        Category::Absent | Category::Callable => handler(omit),
        Category::Textual => handler(clean_text),
        Category::Boolean
        | Category::Nothing
        | Category::Numeric
        | Category::Temporal
        | Category::Fallback => handler(keep),
    }
}

/// One handler per [`Category`].
///
/// Tables are immutable once shared; [`HandlerTable::with`] produces a derived table.
#[derive(Clone)]
pub struct HandlerTable {
    handlers: [Handler; Category::COUNT],
}

impl HandlerTable {
    /// A fresh copy of the default policy.
    pub fn defaults() -> Self {
        Self {
            handlers: Category::ALL.map(default_handler),
        }
    }

    /// Handler bound to `category`.
    pub fn get(&self, category: Category) -> &Handler {
        &self.handlers[category.index()]
    }

    /// Return a copy of this table with `category` bound to `handler`.
    pub fn with(mut self, category: Category, handler: Handler) -> Self {
        self.handlers[category.index()] = handler;
        self
    }

    /// Iterate `(category, handler)` pairs in classification order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Handler)> {
        Category::ALL.into_iter().zip(self.handlers.iter())
    }

    /// Classify `value` and run the bound handler.
    pub fn dispatch(&self, value: &Value, engine: &Engine) -> CleanResult<Option<Value>> {
        (self.get(classify(value)))(value, engine)
    }

    /// Turn this table into a top-level handler that classifies and dispatches.
    ///
    /// Useful from [`Engine::from_factory`] to run a modified copy of the defaults.
    pub fn dispatcher(self) -> Handler {
        handler(move |value, engine| self.dispatch(value, engine))
    }
}

impl Default for HandlerTable {
    fn default() -> Self {
        Self::defaults()
    }
}

impl fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerTable")
            .field("categories", &Category::ALL.map(Category::name))
            .finish()
    }
}

static DEFAULT_HANDLERS: Lazy<HandlerTable> = Lazy::new(HandlerTable::defaults);

/// The shared default handler table, for introspection and composition.
pub fn default_handlers() -> &'static HandlerTable {
    &DEFAULT_HANDLERS
}
