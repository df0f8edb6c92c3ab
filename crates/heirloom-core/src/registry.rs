//! The template registry: a named store of compiled templates.
//!
//! All methods take `&self`. The store is a concurrent map and the function set sits
//! behind a lock, so templates can be registered while renders are in flight. A render
//! that already looked up a template keeps using the handle it found; a later `parse`
//! of the same name swaps the entry without mutating that handle.

use std::sync::{Arc, PoisonError, RwLock};

use dashmap::DashMap;
use handlebars::Context;
use serde::Serialize;

use crate::chain;
use crate::compiler::{self, CompiledTemplate};
use crate::config::RegistryOptions;
use crate::error::{HeirloomError, Result};
use crate::functions::FunctionSet;

/// A collection of templates that can inherit from one another.
#[derive(Default)]
pub struct Registry {
    templates: DashMap<String, Arc<CompiledTemplate>>,
    functions: RwLock<FunctionSet>,
    options: RegistryOptions,
}

impl Registry {
    /// Create an empty registry with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with the given options.
    pub fn with_options(options: RegistryOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &RegistryOptions {
        &self.options
    }

    /// Replace the extra functions installed into subsequently parsed templates.
    ///
    /// Templates that are already compiled keep the functions they were compiled with.
    pub fn set_functions(&self, functions: FunctionSet) {
        tracing::debug!(functions = ?functions, "replacing function set");
        *self.functions.write().unwrap_or_else(PoisonError::into_inner) = functions;
    }

    /// Compile `source` and store it under `name`, replacing any previous entry.
    ///
    /// On a compile error the registry is left untouched.
    pub fn parse(&self, name: &str, source: &str) -> Result<()> {
        let compiled = {
            let functions = self.functions.read().unwrap_or_else(PoisonError::into_inner);
            compiler::compile(name, source, &functions, &self.options)?
        };
        if self
            .templates
            .insert(name.to_string(), Arc::new(compiled))
            .is_some()
        {
            tracing::debug!(template = name, "replaced existing template");
        }
        Ok(())
    }

    /// Render `name` and its chain of ancestors against `data`.
    pub fn render<T>(&self, name: &str, data: &T) -> Result<String>
    where
        T: Serialize + ?Sized,
    {
        let ctx = Context::wraps(data).map_err(|source| HeirloomError::Execution {
            template: name.to_string(),
            source,
        })?;

        let output = chain::resolve(name, &ctx, self.options.max_chain_depth, |n| {
            self.templates.get(n).map(|entry| Arc::clone(entry.value()))
        })?;

        tracing::debug!(template = name, bytes = output.len(), "rendered template");
        Ok(output)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Registered template names in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.templates.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl std::fmt::Debug for Registry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registry")
            .field("templates", &self.names())
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EscapeMode;
    use serde_json::{json, Value};

    #[test]
    fn test_new_registry_is_empty() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert_eq!(registry.options(), &RegistryOptions::default());
    }

    #[test]
    fn test_names_sorted() {
        let registry = Registry::new();
        registry.parse("zeta", "z").unwrap();
        registry.parse("alpha", "a").unwrap();
        registry.parse("mid", "m").unwrap();
        assert_eq!(registry.names(), vec!["alpha", "mid", "zeta"]);
        assert!(registry.contains("mid"));
    }

    #[test]
    fn test_parse_replaces_entry() {
        let registry = Registry::new();
        registry.parse("t", "first").unwrap();
        registry.parse("t", "second").unwrap();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.render("t", &()).unwrap(), "second");
    }

    #[test]
    fn test_failed_parse_keeps_previous_entry() {
        let registry = Registry::new();
        registry.parse("t", "original").unwrap();
        assert!(matches!(
            registry.parse("t", "{{#each items}}x{{/if}}"),
            Err(HeirloomError::Compile { .. })
        ));
        assert_eq!(registry.render("t", &()).unwrap(), "original");
    }

    #[test]
    fn test_failed_parse_adds_nothing() {
        let registry = Registry::new();
        assert!(registry.parse("broken", "{{#if x}}{{/each}}").is_err());
        assert!(!registry.contains("broken"));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_render_with_struct_data() {
        #[derive(Serialize)]
        struct Page<'a> {
            title: &'a str,
        }

        let registry = Registry::new();
        registry.parse("page", "<h1>{{title}}</h1>").unwrap();
        let out = registry.render("page", &Page { title: "Home" }).unwrap();
        assert_eq!(out, "<h1>Home</h1>");
    }

    #[test]
    fn test_strict_mode_missing_variable() {
        let registry = Registry::with_options(RegistryOptions {
            strict_mode: true,
            ..RegistryOptions::default()
        });
        registry.parse("t", "{{missing}}").unwrap();
        assert!(matches!(
            registry.render("t", &json!({})),
            Err(HeirloomError::Execution { .. })
        ));
    }

    #[test]
    fn test_lenient_mode_missing_variable() {
        let registry = Registry::new();
        registry.parse("t", "[{{missing}}]").unwrap();
        assert_eq!(registry.render("t", &json!({})).unwrap(), "[]");
    }

    #[test]
    fn test_escape_none() {
        let registry = Registry::with_options(RegistryOptions {
            escape: EscapeMode::None,
            ..RegistryOptions::default()
        });
        registry.parse("t", "{{value}}").unwrap();
        assert_eq!(registry.render("t", &json!({ "value": "<b>" })).unwrap(), "<b>");
    }

    #[test]
    fn test_depth_guard_disabled() {
        let registry = Registry::with_options(RegistryOptions {
            max_chain_depth: None,
            ..RegistryOptions::default()
        });
        registry.parse("page", r#"p{{inherits "layout"}}"#).unwrap();
        registry.parse("layout", "[{{yield}}]").unwrap();
        assert_eq!(registry.render("page", &()).unwrap(), "[p]");
    }

    #[test]
    fn test_functions_apply_to_later_templates() {
        let registry = Registry::new();
        registry.set_functions(
            FunctionSet::new().with("double", |args: &[Value]| {
                let n = args.first().and_then(Value::as_i64).unwrap_or_default();
                Ok(json!(n * 2))
            }),
        );
        registry.parse("t", "{{double 21}}").unwrap();
        assert_eq!(registry.render("t", &()).unwrap(), "42");
    }

    #[test]
    fn test_registry_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Registry>();
    }
}
