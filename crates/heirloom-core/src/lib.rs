//! Core library for heirloom: layered template rendering with layout inheritance.
//!
//! Templates are registered by name in a [`Registry`]. At render time a template may call
//! `{{inherits "parent"}}` to name the layout it sits in; the parent embeds the child's
//! output with `{{yield}}`. The chain is walked leaf first, each ancestor wrapping the
//! accumulated result.
//!
//! ```
//! use heirloom_core::Registry;
//!
//! let registry = Registry::new();
//! registry.parse("child", r#"Hello{{inherits "layout"}}"#).unwrap();
//! registry.parse("layout", "<html>{{yield}}</html>").unwrap();
//!
//! assert_eq!(registry.render("child", &()).unwrap(), "<html>Hello</html>");
//! ```
//!
//! Expression syntax, escaping and helpers come from
//! [Handlebars](https://docs.rs/handlebars); this crate adds the registry, placeholder
//! injection at compile time, and the per-render chain resolver.

mod chain;
pub mod compiler;
pub mod config;
pub mod error;
pub mod functions;
pub mod loader;
pub mod registry;
pub mod scaffold;

pub use compiler::CompiledTemplate;
pub use config::{EscapeMode, HeirloomConfig, RegistryOptions};
pub use error::{HeirloomError, Result};
pub use functions::{Function, FunctionSet};
pub use registry::Registry;
