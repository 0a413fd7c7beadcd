//! The cleaning engine.
//!
//! - [`handlers`]: the default per-category policy and the [`HandlerTable`]
//! - [`engine`]: the [`Engine`] that classifies, dispatches and recurses
//!
//! ## Example: override one category
//!
//! ```rust
//! use rust_data_cleaning::classify::Category;
//! use rust_data_cleaning::processing::{handler, keep, Engine, Overrides};
//! use rust_data_cleaning::types::{Mapping, Value};
//!
//! // Keep text verbatim; everything else follows the default policy.
//! let engine = Engine::build(Overrides::new().set(Category::Textual, handler(keep))).unwrap();
//!
//! let input = Value::Object(Mapping::new().with("a", "  x  ").with("b", Value::Array(vec![])));
//! let out = engine.process(&input).unwrap();
//! assert_eq!(out, Some(Value::Object(Mapping::new().with("a", "  x  "))));
//! ```

pub mod engine;
pub mod handlers;

pub use engine::{build, clean_value, process, Engine, Overrides};
pub use handlers::{
    clean_mapping, clean_sequence, clean_text, default_handlers, handler, is_trimmable, keep, leaf,
    omit, Handler, HandlerTable,
};
