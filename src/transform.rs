use std::sync::Arc;

use swc_core::{
    common::SourceMapper,
    ecma::{
        ast::*,
        visit::{VisitMut, VisitMutWith},
    },
};
use tracing::{debug, error};

use crate::{
    attrs::attr_name,
    config::TransformConfig,
    element::Rendered,
    error::{JsxTemplateError, Result},
    tag::{self, Tag},
    template::{assemble, Accessor, FragmentId},
};

/// Counters threaded through one compilation. Both are part of the output:
/// fragment ids are embedded in generated accessors and component keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CompilerState {
    /// Last fragment id handed out.
    pub fragment_id: u64,
    /// Root compilations in progress; 1 while compiling an outermost node.
    pub depth: u32,
}

/// Replaces every JSX element and fragment in a program with a tagged
/// template. One instance per file; ids are unique within that file only.
pub struct JsxTemplateTransform {
    pub(crate) config: TransformConfig,
    source_map: Option<Arc<dyn SourceMapper>>,
    pub(crate) state: CompilerState,
    error: Option<JsxTemplateError>,
}

impl JsxTemplateTransform {
    pub fn new(config: TransformConfig, source_map: Option<Arc<dyn SourceMapper>>) -> Self {
        Self {
            config,
            source_map,
            state: CompilerState::default(),
            error: None,
        }
    }

    pub fn state(&self) -> CompilerState {
        self.state
    }

    /// First failure, if any. Once set, the rest of the program is left as is.
    pub fn take_error(&mut self) -> Option<JsxTemplateError> {
        self.error.take()
    }

    fn fail(&mut self, err: JsxTemplateError) {
        let err = match &self.source_map {
            Some(cm) => err.with_code_frame(&**cm),
            None => err,
        };
        error!(kind = %err.kind, "JSX compilation failed");
        self.error = Some(err);
    }

    /// An outermost element whose own tag is dynamic is read as `dtt("root")`.
    fn element_accessor(&self, el: &JSXElement) -> Accessor {
        if self.config.root_accessor && self.state.depth == 1 && has_dynamic_tag(el) {
            Accessor::Root
        } else {
            Accessor::Fragment
        }
    }

    fn compile_root_element(&mut self, el: &JSXElement) -> Result<Expr> {
        self.state.fragment_id += 1;
        self.state.depth += 1;
        let compiled = self.compile_root_element_inner(el);
        self.state.depth -= 1;
        compiled
    }

    fn compile_root_element_inner(&mut self, el: &JSXElement) -> Result<Expr> {
        if let Tag::Component { callee } = tag::classify(&el.opening.name)? {
            if self.state.depth == 1 {
                let call = self.render_component(el, callee)?;
                debug!(fragment_id = self.state.fragment_id, "compiled component root");
                return Ok(*call);
            }
        }

        // A keyed root is already a finished unit. Anything else is rendered
        // a second time to produce the parts; both passes advance the counter
        // and the unit takes the id reached after the second one.
        if let Rendered::Keyed(unit) = self.render_element(el)? {
            debug!(fragment_id = self.state.fragment_id, "compiled keyed root");
            return Ok(*unit);
        }
        let parts = self.render_element(el)?.into_parts();
        let unit = assemble(parts, FragmentId::Counter(self.state.fragment_id))?;
        debug!(fragment_id = self.state.fragment_id, "compiled element root");
        let accessor = self.element_accessor(el);
        Ok(unit.into_tagged(&self.config.receiver, accessor))
    }

    fn compile_root_fragment(&mut self, fragment: &JSXFragment) -> Result<Expr> {
        self.state.fragment_id += 1;
        self.state.depth += 1;
        let compiled = self.render_fragment(fragment).and_then(|parts| {
            assemble(parts, FragmentId::Counter(self.state.fragment_id))
        });
        self.state.depth -= 1;

        let unit = compiled?;
        debug!(fragment_id = self.state.fragment_id, "compiled fragment root");
        Ok(unit.into_tagged(&self.config.receiver, Accessor::Fragment))
    }
}

fn has_dynamic_tag(el: &JSXElement) -> bool {
    el.opening.attrs.iter().any(|attr| match attr {
        JSXAttrOrSpread::JSXAttr(attr) => attr_name(attr) == "as",
        JSXAttrOrSpread::SpreadElement(_) => false,
    })
}

impl VisitMut for JsxTemplateTransform {
    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if self.error.is_some() {
            return;
        }

        let compiled = match expr {
            Expr::JSXElement(el) => Some(self.compile_root_element(el)),
            Expr::JSXFragment(fragment) => Some(self.compile_root_fragment(fragment)),
            _ => None,
        };
        match compiled {
            Some(Ok(replacement)) => *expr = replacement,
            Some(Err(err)) => {
                self.fail(err);
                return;
            }
            None => {}
        }

        // JSX kept raw in slots and prop values becomes a root of its own
        expr.visit_mut_children_with(self);
    }
}
