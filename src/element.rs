use swc_core::{
    common::{Spanned, DUMMY_SP},
    ecma::ast::*,
};
use tracing::trace;

use crate::{
    ast,
    attrs::{compile_markup_attr, partition_attrs},
    error::{ErrorKind, JsxTemplateError, Result},
    parts::Part,
    tag::{self, Tag},
    template::{assemble, Accessor, FragmentId},
    transform::JsxTemplateTransform,
};

/// Output of compiling one element or fragment.
#[derive(Debug)]
pub(crate) enum Rendered {
    /// Parts to splice into the enclosing unit.
    Markup(Vec<Part>),
    /// A keyed element, already assembled into its own tagged template.
    Keyed(Box<Expr>),
    /// `<Callee>.for(...)`
    Component(Box<Expr>),
}

impl Rendered {
    pub(crate) fn into_parts(self) -> Vec<Part> {
        match self {
            Rendered::Markup(parts) => parts,
            Rendered::Keyed(expr) | Rendered::Component(expr) => vec![Part::Expr(expr)],
        }
    }
}

impl JsxTemplateTransform {
    pub(crate) fn render_fragment(&mut self, fragment: &JSXFragment) -> Result<Vec<Part>> {
        self.render_children(&fragment.children)
    }

    pub(crate) fn render_element(&mut self, el: &JSXElement) -> Result<Rendered> {
        match tag::classify(&el.opening.name)? {
            Tag::Component { callee } => self.render_component(el, callee).map(Rendered::Component),
            Tag::Markup { name, is_void } => self.render_markup(el, &name, is_void),
        }
    }

    fn render_markup(&mut self, el: &JSXElement, name: &str, is_void: bool) -> Result<Rendered> {
        let (special, attrs) = partition_attrs(&el.opening.attrs)?;

        let mut attr_parts = Vec::new();
        for attr in attrs {
            attr_parts.extend(compile_markup_attr(attr)?);
        }
        // void elements drop whatever children the source gave them
        let children = if is_void {
            Vec::new()
        } else {
            self.render_children(&el.children)?
        };

        let mut parts = Vec::with_capacity(attr_parts.len() + children.len() + 6);
        match special.dynamic_tag {
            Some(tag_expr) => {
                parts.push(Part::literal("<{tag}"));
                parts.push(Part::DynamicTag(tag_expr));
                parts.extend(attr_parts);
                parts.push(Part::literal(">"));
                if !is_void {
                    parts.extend(children);
                    parts.push(Part::literal("</{tag}>"));
                }
            }
            None => {
                parts.push(Part::literal("<"));
                parts.push(Part::literal(name));
                parts.extend(attr_parts);
                parts.push(Part::literal(">"));
                if !is_void {
                    parts.extend(children);
                    parts.push(Part::literal("</"));
                    parts.push(Part::literal(name));
                    parts.push(Part::literal(">"));
                }
            }
        }

        match special.key {
            Some(key) => {
                let unit = assemble(parts, FragmentId::Key(key))?;
                trace!(tag = name, "assembled keyed element");
                Ok(Rendered::Keyed(Box::new(
                    unit.into_tagged(&self.config.receiver, Accessor::Fragment),
                )))
            }
            None => Ok(Rendered::Markup(parts)),
        }
    }

    fn render_children(&mut self, children: &[JSXElementChild]) -> Result<Vec<Part>> {
        let mut parts = Vec::new();
        for child in children {
            parts.extend(self.render_child(child)?);
        }
        Ok(parts)
    }

    fn render_child(&mut self, child: &JSXElementChild) -> Result<Vec<Part>> {
        match child {
            JSXElementChild::JSXText(text) => Ok(vec![Part::Literal(text.raw.to_string())]),
            JSXElementChild::JSXExprContainer(container) => match &container.expr {
                JSXExpr::JSXEmptyExpr(_) => Ok(Vec::new()),
                JSXExpr::Expr(expr) => Ok(vec![Part::Expr(expr.clone())]),
            },
            JSXElementChild::JSXElement(el) => Ok(self.render_element(el)?.into_parts()),
            JSXElementChild::JSXFragment(fragment) => self.render_fragment(fragment),
            JSXElementChild::JSXSpreadChild(spread) => Err(JsxTemplateError::new(
                ErrorKind::UnknownChildType("spread child"),
                spread.span(),
            )),
        }
    }

    /// `<Callee>.for(self, key, { ...props, children })`.
    ///
    /// Consumes one fragment id for the component and, when it has children,
    /// two more around the children unit. The synthesized key is read last.
    pub(crate) fn render_component(&mut self, el: &JSXElement, callee: Box<Expr>) -> Result<Box<Expr>> {
        let (special, attrs) = partition_attrs(&el.opening.attrs)?;
        if let Some(tag_expr) = special.dynamic_tag {
            return Err(JsxTemplateError::new(
                ErrorKind::DisallowedDynamicTag("component reference"),
                tag_expr.span(),
            ));
        }

        let mut props = Vec::with_capacity(attrs.len() + 1);
        for attr in attrs {
            props.push(self.compile_component_attr(attr)?);
        }
        let children = self.render_children(&el.children)?;

        self.state.fragment_id += 1;
        if !el.children.is_empty() {
            self.state.fragment_id += 1;
            let unit = assemble(children, FragmentId::Counter(self.state.fragment_id))?;
            trace!(fragment_id = self.state.fragment_id, "assembled component children");
            props.push(ast::key_value(
                "children",
                Box::new(unit.into_tagged(&self.config.receiver, Accessor::Fragment)),
            ));
            self.state.fragment_id += 1;
        }

        let key = special
            .key
            .unwrap_or_else(|| ast::str_lit(&format!("_f{}_", self.state.fragment_id)));
        let props = Box::new(Expr::Object(ObjectLit {
            span: DUMMY_SP,
            props,
        }));

        Ok(Box::new(ast::method_call(
            callee,
            "for",
            vec![ast::ident_expr(&self.config.receiver), key, props],
        )))
    }
}
