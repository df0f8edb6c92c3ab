//! Template compilation with placeholder injection.
//!
//! Every template is compiled into its own Handlebars engine that carries, in order:
//!
//! 1. the registry options (strict mode, escaping)
//! 2. the caller's [`FunctionSet`] as it was at compile time
//! 3. no-op `yield` / `inherits` placeholders, shadowing any caller function of the same name
//!
//! The placeholders let a template that uses `{{yield}}` or `{{inherits "layout"}}` be
//! compiled (and rendered on its own) without knowing anything about the chain it will
//! end up in. The chain resolver replaces them on an isolated copy for each render.

use handlebars::{Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext};

use crate::config::RegistryOptions;
use crate::error::{HeirloomError, Result};
use crate::functions::FunctionSet;

/// Name of the helper that embeds the previous template's output.
pub const YIELD: &str = "yield";

/// Name of the helper that declares the parent template.
pub const INHERITS: &str = "inherits";

/// A compiled template, immutable once stored in the registry.
pub struct CompiledTemplate {
    name: String,
    engine: Handlebars<'static>,
}

impl CompiledTemplate {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// A copy of the compiled engine that can be rebound without touching this one.
    pub(crate) fn isolate(&self) -> Handlebars<'static> {
        self.engine.clone()
    }
}

impl std::fmt::Debug for CompiledTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Compile `source` under `name`.
pub fn compile(
    name: &str,
    source: &str,
    functions: &FunctionSet,
    options: &RegistryOptions,
) -> Result<CompiledTemplate> {
    let mut engine = Handlebars::new();
    engine.set_strict_mode(options.strict_mode);
    options.escape.apply(&mut engine);

    functions.install(&mut engine);
    engine.register_helper(YIELD, Box::new(Placeholder));
    engine.register_helper(INHERITS, Box::new(Placeholder));

    engine
        .register_template_string(name, source)
        .map_err(|source| HeirloomError::Compile {
            name: name.to_string(),
            source,
        })?;

    tracing::debug!(
        template = name,
        functions = functions.len(),
        "compiled template"
    );

    Ok(CompiledTemplate {
        name: name.to_string(),
        engine,
    })
}

/// Compile-time stand-in for `yield` and `inherits`: ignores its arguments, writes nothing.
struct Placeholder;

impl HelperDef for Placeholder {
    fn call<'reg: 'rc, 'rc>(
        &self,
        _: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        _: &mut dyn Output,
    ) -> HelperResult {
        Ok(())
    }
}
