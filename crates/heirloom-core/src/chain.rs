//! Inheritance chain resolution.
//!
//! A render starts at the requested template and climbs towards its ancestors:
//!
//! ```text
//! render("page")
//!   page    {{inherits "section"}} ...   yield = ""
//!   section {{inherits "base"}} ...      yield = output of page
//!   base    <html>{{yield}}</html>       yield = output of section   -> result
//! ```
//!
//! Each step works on an isolated copy of the stored engine and binds fresh `yield` /
//! `inherits` helpers to it. The helpers only reach per-call state ([`ParentSlot`] and the
//! captured yield content), so concurrent renders of the same template never observe
//! each other and the registry's stored templates are never mutated.

use std::sync::{Arc, Mutex, PoisonError};

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderErrorReason,
};

use crate::compiler::{CompiledTemplate, INHERITS, YIELD};
use crate::error::{HeirloomError, Result};

/// The parent declared by the template currently executing.
///
/// Shared between one render loop and the `inherits` helper bound for a single step.
#[derive(Clone, Default)]
struct ParentSlot(Arc<Mutex<Option<String>>>);

impl ParentSlot {
    /// Last call wins; an empty name clears the parent.
    fn set(&self, parent: &str) {
        let mut slot = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        *slot = (!parent.is_empty()).then(|| parent.to_string());
    }

    fn take(&self) -> Option<String> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner).take()
    }
}

/// Per-render state. Never stored, never shared across calls.
#[derive(Default)]
struct RenderState {
    parent: Option<String>,
    buffer: String,
    depth: usize,
}

/// Walk the chain starting at `name` and return the final output.
///
/// `lookup` resolves a template name to its stored compiled form.
pub(crate) fn resolve<F>(
    name: &str,
    ctx: &Context,
    max_depth: Option<usize>,
    lookup: F,
) -> Result<String>
where
    F: Fn(&str) -> Option<Arc<CompiledTemplate>>,
{
    // An empty request is an empty chain, same as an empty `inherits`.
    let mut state = RenderState {
        parent: (!name.is_empty()).then(|| name.to_string()),
        ..RenderState::default()
    };

    while let Some(current) = state.parent.take() {
        state.depth += 1;
        if let Some(limit) = max_depth {
            if state.depth > limit {
                return Err(HeirloomError::ChainTooDeep {
                    name: name.to_string(),
                    limit,
                });
            }
        }

        let compiled =
            lookup(&current).ok_or_else(|| HeirloomError::TemplateNotFound(name.to_string()))?;

        let yield_content = std::mem::take(&mut state.buffer);
        let slot = ParentSlot::default();

        let mut engine = compiled.isolate();
        engine.register_helper(INHERITS, Box::new(InheritsHelper { slot: slot.clone() }));
        engine.register_helper(
            YIELD,
            Box::new(YieldHelper {
                content: yield_content.trim().to_string(),
            }),
        );

        tracing::trace!(
            request = name,
            template = %current,
            depth = state.depth,
            yield_len = yield_content.len(),
            "executing chain step"
        );

        state.buffer = engine
            .render_with_context(compiled.name(), ctx)
            .map_err(|source| HeirloomError::Execution {
                template: current.clone(),
                source,
            })?;
        state.parent = slot.take();
    }

    Ok(state.buffer)
}

/// Run-time `yield`: writes the previous step's output, trimmed and unescaped.
struct YieldHelper {
    content: String,
}

impl HelperDef for YieldHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        _: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        out.write(&self.content)?;
        Ok(())
    }
}

/// Run-time `inherits`: records the parent for the next step, writes nothing.
struct InheritsHelper {
    slot: ParentSlot,
}

impl HelperDef for InheritsHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        _: &mut dyn Output,
    ) -> HelperResult {
        let param = h
            .param(0)
            .ok_or(RenderErrorReason::ParamNotFoundForIndex(INHERITS, 0))?;
        let parent = param
            .value()
            .as_str()
            .ok_or(RenderErrorReason::InvalidParamType("string"))?;
        self.slot.set(parent);
        Ok(())
    }
}
