//! Caller-supplied template functions.
//!
//! A [`FunctionSet`] maps names to [`Function`]s. The registry installs the set into
//! every template it compiles *after* [`crate::Registry::set_functions`] was called;
//! templates compiled earlier keep whatever set was current at their compile time.
//!
//! Functions are exposed to Handlebars as helpers. Positional parameters arrive as JSON
//! values, and the returned value is written through the registry's escape function
//! (so a `{{{triple-stash}}}` call site writes it raw).
//!
//! ```
//! use heirloom_core::{FunctionSet, Registry};
//! use serde_json::{json, Value};
//!
//! let registry = Registry::new();
//! registry.set_functions(FunctionSet::new().with("upper", |args: &[Value]| {
//!     let text = args.first().and_then(Value::as_str).unwrap_or_default();
//!     Ok(Value::String(text.to_uppercase()))
//! }));
//! registry.parse("greeting", r#"{{upper "hello"}}"#).unwrap();
//! assert_eq!(registry.render("greeting", &json!({})).unwrap(), "HELLO");
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use handlebars::{
    Context, Handlebars, Helper, HelperDef, RenderContext, RenderError, RenderErrorReason,
    ScopedJson,
};
use serde_json::Value;

/// A named callable invoked from template source.
pub trait Function: Send + Sync {
    fn call(&self, args: &[Value]) -> anyhow::Result<Value>;
}

impl<F> Function for F
where
    F: Fn(&[Value]) -> anyhow::Result<Value> + Send + Sync,
{
    fn call(&self, args: &[Value]) -> anyhow::Result<Value> {
        self(args)
    }
}

/// Extra functions merged into templates at compile time.
#[derive(Clone, Default)]
pub struct FunctionSet {
    functions: BTreeMap<String, Arc<dyn Function>>,
}

impl FunctionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`FunctionSet::insert`].
    pub fn with(mut self, name: impl Into<String>, function: impl Function + 'static) -> Self {
        self.insert(name, function);
        self
    }

    /// Add or replace a function.
    pub fn insert(&mut self, name: impl Into<String>, function: impl Function + 'static) {
        self.functions.insert(name.into(), Arc::new(function));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Function names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.functions.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Register every function as a helper on a freshly created engine.
    pub(crate) fn install(&self, engine: &mut Handlebars<'static>) {
        for (name, function) in &self.functions {
            engine.register_helper(
                name,
                Box::new(FunctionHelper {
                    name: name.clone(),
                    function: Arc::clone(function),
                }),
            );
        }
    }
}

impl fmt::Debug for FunctionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.functions.keys()).finish()
    }
}

/// Adapts a [`Function`] onto the Handlebars helper interface.
struct FunctionHelper {
    name: String,
    function: Arc<dyn Function>,
}

impl HelperDef for FunctionHelper {
    fn call_inner<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
    ) -> Result<ScopedJson<'rc>, RenderError> {
        let args: Vec<Value> = h.params().iter().map(|p| p.value().clone()).collect();
        let value = self.function.call(&args).map_err(|e| {
            RenderErrorReason::Other(format!("function '{}' failed: {e:#}", self.name))
        })?;
        Ok(ScopedJson::Derived(value))
    }
}
