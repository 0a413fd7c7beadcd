//! The recursion engine.
//!
//! An [`Engine`] owns an immutable [`HandlerTable`] (or a fully custom top-level handler) and
//! walks a value depth-first: classify, run the bound handler, let container handlers recurse
//! through [`Engine::process`].

use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::classify::Category;
use crate::error::{CleanError, CleanResult};
use crate::types::Value;

use super::handlers::{default_handlers, Handler, HandlerTable};

#[derive(Clone)]
enum Dispatch {
    Table(Arc<HandlerTable>),
    Custom(Handler),
}

/// A built, immutable cleaner.
///
/// Cheap to clone and safe to share across threads: processing never mutates engine state.
#[derive(Clone)]
pub struct Engine {
    dispatch: Dispatch,
}

impl Engine {
    /// Engine running the default handler policy.
    pub fn new() -> Self {
        Self::with_table(default_handlers().clone())
    }

    /// Engine running an explicit handler table.
    pub fn with_table(table: HandlerTable) -> Self {
        Self {
            dispatch: Dispatch::Table(Arc::new(table)),
        }
    }

    /// Merge `overrides` over the default table and build an engine from the result.
    ///
    /// Fails with [`CleanError::Configuration`] if an override names an unknown category.
    pub fn build(overrides: Overrides) -> CleanResult<Self> {
        if overrides.is_empty() {
            return Ok(Self::new());
        }
        let count = overrides.len();
        let table = overrides.apply(default_handlers().clone())?;
        debug!(overrides = count, "built cleaning engine with handler overrides");
        Ok(Self::with_table(table))
    }

    /// Build an engine whose top-level dispatch is entirely caller-defined.
    ///
    /// `factory` receives the default table and returns the handler every call to
    /// [`Self::process`] goes through (recursion included).
    pub fn from_factory<F>(factory: F) -> Self
    where
        F: FnOnce(&HandlerTable) -> Handler,
    {
        let top = factory(default_handlers());
        debug!("built cleaning engine with custom dispatcher");
        Self {
            dispatch: Dispatch::Custom(top),
        }
    }

    /// The handler table driving this engine, or `None` for factory-built engines.
    pub fn handlers(&self) -> Option<&HandlerTable> {
        match &self.dispatch {
            Dispatch::Table(table) => Some(&**table),
            Dispatch::Custom(_) => None,
        }
    }

    /// Clean `value`. `Ok(None)` means the value cleaned away entirely.
    ///
    /// Errors raised by handlers are returned unchanged.
    pub fn process(&self, value: &Value) -> CleanResult<Option<Value>> {
        let out = match &self.dispatch {
            Dispatch::Table(table) => table.dispatch(value, self)?,
            Dispatch::Custom(top) => top(value, self)?,
        };
        // Undefined and absent mean the same thing to a parent container.
        Ok(out.filter(|v| !v.is_undefined()))
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Engine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dispatch = match &self.dispatch {
            Dispatch::Table(_) => "table",
            Dispatch::Custom(_) => "custom",
        };
        f.debug_struct("Engine").field("dispatch", &dispatch).finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum OverrideKey {
    Category(Category),
    Named(String),
}

/// Per-category handler replacements, applied over a base table at build time.
///
/// Later entries for the same category win. Named entries accept canonical category names
/// (`"textual"`) and the legacy processor keys (`"isString"`); anything else is rejected when
/// the engine is built.
#[derive(Clone, Default)]
pub struct Overrides {
    entries: Vec<(OverrideKey, Handler)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the handler for `category`.
    pub fn set(mut self, category: Category, handler: Handler) -> Self {
        self.entries.push((OverrideKey::Category(category), handler));
        self
    }

    /// Replace the handler for the category called `name` (validated at build time).
    pub fn set_named(mut self, name: impl Into<String>, handler: Handler) -> Self {
        self.entries.push((OverrideKey::Named(name.into()), handler));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Apply every override to `base`, returning the derived table.
    pub fn apply(self, base: HandlerTable) -> CleanResult<HandlerTable> {
        let mut table = base;
        for (key, handler) in self.entries {
            let category = match key {
                OverrideKey::Category(c) => c,
                OverrideKey::Named(name) => name.parse::<Category>().map_err(|_| {
                    CleanError::configuration(format!(
                        "override for unknown category '{name}' (expected one of: {})",
                        Category::ALL.map(Category::name).join(", ")
                    ))
                })?,
            };
            table = table.with(category, handler);
        }
        Ok(table)
    }
}

impl fmt::Debug for Overrides {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys: Vec<&OverrideKey> = self.entries.iter().map(|(k, _)| k).collect();
        f.debug_struct("Overrides").field("keys", &keys).finish()
    }
}

static DEFAULT_ENGINE: Lazy<Engine> = Lazy::new(Engine::new);

/// Shorthand for [`Engine::build`].
pub fn build(overrides: Overrides) -> CleanResult<Engine> {
    Engine::build(overrides)
}

/// Clean `value` with the shared default engine.
pub fn process(value: &Value) -> CleanResult<Option<Value>> {
    DEFAULT_ENGINE.process(value)
}

/// Clean `value` with the default policy; `None` when nothing survives.
pub fn clean_value(value: &Value) -> Option<Value> {
    match DEFAULT_ENGINE.process(value) {
        Ok(out) => out,
        Err(e) => unreachable!("default handlers never fail: {e}"),
    }
}
