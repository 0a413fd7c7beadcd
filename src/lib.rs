//! `rust-data-cleaning` removes empty or meaningless entries from nested values.
//!
//! Give it an arbitrary tree of [`types::Value`]s (scalars, arrays, objects, class instances,
//! functions, dates, ...) and it returns a freshly built, cleaned copy:
//!
//! - text is trimmed, and text that ends up empty is dropped
//! - undefined entries, sparse-array holes and functions are dropped
//! - arrays and objects whose every child was dropped are dropped themselves
//! - `0`, `false`, `null`, `NaN`, dates and other opaque values are kept as-is
//!
//! The primary entrypoint is [`clean_value`]. For custom policies, build a
//! [`processing::Engine`] with per-category [`processing::Overrides`].
//!
//! ## How it works
//!
//! Every value is classified into exactly one [`classify::Category`] (first match wins, in
//! [`classify::Category::ALL`] order). The engine looks up the handler bound to that category
//! in its immutable [`processing::HandlerTable`] and calls it with the value and the engine
//! itself; container handlers recurse through [`processing::Engine::process`].
//!
//! ## Quick example: default cleaning
//!
//! ```rust
//! use rust_data_cleaning::clean_value;
//! use rust_data_cleaning::types::{Mapping, Value};
//!
//! let input = Value::Object(
//!     Mapping::new()
//!         .with("name", "  Ada ")
//!         .with("nickname", "   ")
//!         .with("tags", Value::Array(vec![Value::from(""), Value::Undefined]))
//!         .with("score", 0)
//!         .with("active", false),
//! );
//!
//! let cleaned = clean_value(&input).unwrap();
//! assert_eq!(
//!     cleaned,
//!     Value::Object(Mapping::new().with("name", "Ada").with("score", 0).with("active", false))
//! );
//!
//! // Nothing left at all.
//! assert_eq!(clean_value(&Value::from("   ")), None);
//! ```
//!
//! ## Custom handlers
//!
//! ```rust
//! use rust_data_cleaning::classify::Category;
//! use rust_data_cleaning::processing::{leaf, Engine, Overrides};
//! use rust_data_cleaning::types::{Mapping, Value};
//!
//! # fn main() -> Result<(), rust_data_cleaning::CleanError> {
//! // Replace nulls with a sentinel; every other category keeps the default policy.
//! let engine = Engine::build(
//!     Overrides::new().set(Category::Nothing, leaf(|_| Some(Value::from("NULL_VALUE")))),
//! )?;
//!
//! let input = Value::Object(Mapping::new().with("value", Value::Null).with("empty", ""));
//! let out = engine.process(&input)?;
//! assert_eq!(out, Some(Value::Object(Mapping::new().with("value", "NULL_VALUE"))));
//! # Ok(())
//! # }
//! ```
//!
//! ## JSON
//!
//! ```rust
//! use rust_data_cleaning::json::clean_json;
//! use serde_json::json;
//!
//! let out = clean_json(&json!({"a": " x ", "b": ["", {}], "c": null}));
//! assert_eq!(out, Some(json!({"a": "x", "c": null})));
//! ```
//!
//! ## Modules
//!
//! - [`types`]: the [`types::Value`] model
//! - [`classify`]: categories and the classifier
//! - [`processing`]: handlers, handler tables and the engine
//! - [`json`]: `serde_json` interop and JSON/NDJSON text cleaning
//! - [`execution`]: parallel batch cleaning with metrics and observers
//! - [`error`]: the crate error type

pub mod classify;
pub mod error;
pub mod execution;
pub mod json;
pub mod processing;
pub mod types;

pub use classify::{classify, Category};
pub use error::{CleanError, CleanResult};
pub use processing::{build, clean_value, process, Engine, Overrides};
pub use types::Value;
