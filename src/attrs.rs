//! Attribute compilation, for markup tags (template text) and for component
//! references (property entries).

use swc_core::{
    common::Spanned,
    ecma::{ast::*, visit::VisitMutWith},
};
use tracing::trace;

use crate::{
    ast,
    error::{ErrorKind, JsxTemplateError, Result},
    parts::Part,
    print,
    tag,
    template::{assemble, FragmentId},
    transform::JsxTemplateTransform,
};

/// An attribute name split on the `on` / `on-` event prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AttrName<'a> {
    Event(&'a str),
    Plain(&'a str),
}

/// `None` for names that are only the prefix (`on`, `on-`).
pub(crate) fn classify_name(name: &str) -> Option<AttrName<'_>> {
    match name.strip_prefix("on") {
        Some(rest) => {
            let event = rest.strip_prefix('-').unwrap_or(rest);
            (!event.is_empty()).then_some(AttrName::Event(event))
        }
        None => Some(AttrName::Plain(name)),
    }
}

pub(crate) fn attr_name(attr: &JSXAttr) -> String {
    match &attr.name {
        JSXAttrName::Ident(ident) => ident.sym.to_string(),
        JSXAttrName::JSXNamespacedName(ns) => format!("{}:{}", ns.ns.sym, ns.name.sym),
    }
}

enum AttrValue<'a> {
    Str(&'a Str),
    Expr(&'a Box<Expr>),
    Missing,
    /// `attr={}` or a JSX element written without braces.
    Unsupported,
}

fn attr_value(attr: &JSXAttr) -> AttrValue<'_> {
    match &attr.value {
        None => AttrValue::Missing,
        Some(JSXAttrValue::Lit(Lit::Str(s))) => AttrValue::Str(s),
        Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
            expr: JSXExpr::Expr(expr),
            ..
        })) => AttrValue::Expr(expr),
        Some(_) => AttrValue::Unsupported,
    }
}

/// String attribute text as written, quotes included. Entities stay encoded.
fn raw_str(s: &Str) -> String {
    match &s.raw {
        Some(raw) => raw.to_string(),
        None => format!("\"{}\"", s.value),
    }
}

fn unsupported(attr: &JSXAttr) -> JsxTemplateError {
    JsxTemplateError::new(ErrorKind::UnsupportedAttribute(attr_name(attr)), attr.span)
}

/// `key` / `as` pulled out of an attribute list before the generic
/// compilers see it.
#[derive(Debug, Default)]
pub(crate) struct SpecialAttrs {
    pub key: Option<Box<Expr>>,
    pub dynamic_tag: Option<Box<Expr>>,
}

pub(crate) fn partition_attrs(attrs: &[JSXAttrOrSpread]) -> Result<(SpecialAttrs, Vec<&JSXAttr>)> {
    let mut special = SpecialAttrs::default();
    let mut rest = Vec::with_capacity(attrs.len());

    for attr in attrs {
        let attr = match attr {
            JSXAttrOrSpread::JSXAttr(attr) => attr,
            JSXAttrOrSpread::SpreadElement(spread) => {
                return Err(JsxTemplateError::new(
                    ErrorKind::UnsupportedAttribute("...".into()),
                    spread.expr.span(),
                ))
            }
        };
        match attr_name(attr).as_str() {
            "key" => {
                special.key = Some(match attr_value(attr) {
                    AttrValue::Str(s) => Box::new(Expr::Lit(Lit::Str(s.clone()))),
                    AttrValue::Expr(expr) => expr.clone(),
                    AttrValue::Missing => {
                        return Err(JsxTemplateError::new(ErrorKind::KeyWithoutValue, attr.span))
                    }
                    AttrValue::Unsupported => return Err(unsupported(attr)),
                });
            }
            "as" => {
                if special.dynamic_tag.is_some() {
                    return Err(JsxTemplateError::new(
                        ErrorKind::DuplicateDynamicTag,
                        attr.span,
                    ));
                }
                // the shape is checked when the unit is assembled
                special.dynamic_tag = Some(match attr_value(attr) {
                    AttrValue::Str(s) => Box::new(Expr::Lit(Lit::Str(s.clone()))),
                    AttrValue::Expr(expr) => expr.clone(),
                    AttrValue::Missing | AttrValue::Unsupported => return Err(unsupported(attr)),
                });
            }
            _ => rest.push(attr),
        }
    }
    Ok((special, rest))
}

/// Template parts for one attribute of a markup tag.
pub(crate) fn compile_markup_attr(attr: &JSXAttr) -> Result<Vec<Part>> {
    let name = attr_name(attr);
    match (classify_name(&name), attr_value(attr)) {
        (Some(AttrName::Plain(plain)), value) => {
            let plain = if plain == "className" { "class" } else { plain };
            match value {
                AttrValue::Str(s) => Ok(vec![
                    Part::literal(" "),
                    Part::literal(plain),
                    Part::literal("="),
                    Part::Literal(raw_str(s)),
                ]),
                AttrValue::Expr(expr) => Ok(vec![
                    Part::literal(" "),
                    Part::literal(plain),
                    Part::literal("="),
                    Part::Expr(expr.clone()),
                ]),
                AttrValue::Missing => Ok(vec![Part::literal(" "), Part::literal(plain)]),
                AttrValue::Unsupported => Err(unsupported(attr)),
            }
        }
        (Some(AttrName::Event(event)), AttrValue::Expr(expr)) => Ok(vec![
            Part::literal(" "),
            Part::Literal(format!("on{}", event.to_lowercase())),
            Part::literal("="),
            Part::Expr(expr.clone()),
        ]),
        (Some(AttrName::Event(_)), AttrValue::Str(_)) => Err(JsxTemplateError::new(
            ErrorKind::EventStringLiteral,
            attr.span,
        )),
        (Some(AttrName::Event(_)), AttrValue::Missing) => Err(JsxTemplateError::new(
            ErrorKind::EventWithoutValue,
            attr.span,
        )),
        _ => Err(unsupported(attr)),
    }
}

impl JsxTemplateTransform {
    /// Property entry for one attribute of a component reference.
    pub(crate) fn compile_component_attr(&mut self, attr: &JSXAttr) -> Result<PropOrSpread> {
        let name = attr_name(attr);
        match (classify_name(&name), attr_value(attr)) {
            (Some(AttrName::Plain(plain)), AttrValue::Str(s)) => Ok(ast::key_value(
                plain,
                Box::new(Expr::Lit(Lit::Str(s.clone()))),
            )),
            (Some(AttrName::Plain(plain)), AttrValue::Expr(expr)) => {
                let value = match &**expr {
                    Expr::JSXElement(nested) => self.compile_nested_prop(nested, expr)?,
                    _ => expr.clone(),
                };
                Ok(ast::key_value(plain, value))
            }
            // valueless props default to `true`, like React
            (Some(AttrName::Plain(plain)), AttrValue::Missing) => {
                Ok(ast::key_value(plain, ast::bool_lit(true)))
            }
            (Some(AttrName::Event(event)), AttrValue::Expr(expr)) => {
                Ok(ast::key_value(&format!("on{event}"), expr.clone()))
            }
            (Some(AttrName::Event(_)), AttrValue::Str(_)) => Err(JsxTemplateError::new(
                ErrorKind::EventStringLiteral,
                attr.span,
            )),
            (Some(AttrName::Event(_)), AttrValue::Missing) => Err(JsxTemplateError::new(
                ErrorKind::EventWithoutValue,
                attr.span,
            )),
            _ => Err(unsupported(attr)),
        }
    }

    /// A prop whose value is itself a JSX element.
    ///
    /// Component values are inlined as the generated source of their unit.
    /// Markup values stay as written and get compiled later as their own root.
    fn compile_nested_prop(&mut self, nested: &JSXElement, written: &Box<Expr>) -> Result<Box<Expr>> {
        let rendered = self.render_element(nested)?;
        let unit = assemble(
            rendered.into_parts(),
            FragmentId::Counter(self.state.fragment_id),
        )?;

        if !tag::classify(&nested.opening.name)?.is_component() {
            self.state.fragment_id += 1;
            return Ok(written.clone());
        }

        let mut template = Expr::Tpl(unit.into_template());
        // JSX left raw inside the unit would otherwise be frozen into the text
        template.visit_mut_with(self);
        if let Some(err) = self.take_error() {
            return Err(err);
        }
        let code = print::expr_to_source(&template)?;
        trace!(fragment_id = self.state.fragment_id, %code, "inlined component prop");
        Ok(ast::verbatim(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use swc_core::common::{SyntaxContext, DUMMY_SP};

    fn attr(name: &str, value: Option<JSXAttrValue>) -> JSXAttr {
        JSXAttr {
            span: DUMMY_SP,
            name: JSXAttrName::Ident(IdentName::new(name.into(), DUMMY_SP)),
            value,
        }
    }

    fn string(raw: &str) -> Option<JSXAttrValue> {
        Some(JSXAttrValue::Lit(Lit::Str(Str {
            span: DUMMY_SP,
            value: raw.trim_matches(|c| c == '"' || c == '\'').into(),
            raw: Some(raw.into()),
        })))
    }

    fn expr(sym: &str) -> Option<JSXAttrValue> {
        Some(JSXAttrValue::JSXExprContainer(JSXExprContainer {
            span: DUMMY_SP,
            expr: JSXExpr::Expr(Box::new(Expr::Ident(Ident::new(
                sym.into(),
                DUMMY_SP,
                SyntaxContext::empty(),
            )))),
        }))
    }

    fn literals(parts: &[Part]) -> Vec<String> {
        parts
            .iter()
            .map(|part| match part {
                Part::Literal(text) => text.clone(),
                Part::Expr(_) => "${}".to_string(),
                Part::DynamicTag(_) => "{tag}".to_string(),
            })
            .collect()
    }

    #[test]
    fn event_prefix() {
        assert_eq!(classify_name("onClick"), Some(AttrName::Event("Click")));
        assert_eq!(classify_name("on-input"), Some(AttrName::Event("input")));
        assert_eq!(classify_name("value"), Some(AttrName::Plain("value")));
        assert_eq!(classify_name("on"), None);
        assert_eq!(classify_name("on-"), None);
    }

    #[test]
    fn markup_string_attribute_keeps_raw_text() {
        let parts = compile_markup_attr(&attr("value", string("'&quot;'"))).unwrap();
        assert_eq!(literals(&parts), vec![" ", "value", "=", "'&quot;'"]);
    }

    #[test]
    fn markup_boolean_and_expression_attributes() {
        let parts = compile_markup_attr(&attr("disabled", None)).unwrap();
        assert_eq!(literals(&parts), vec![" ", "disabled"]);

        let parts = compile_markup_attr(&attr("value", expr("val"))).unwrap();
        assert_eq!(literals(&parts), vec![" ", "value", "=", "${}"]);
    }

    #[test]
    fn class_name_becomes_class() {
        let parts = compile_markup_attr(&attr("className", string("\"a\""))).unwrap();
        assert_eq!(literals(&parts), vec![" ", "class", "=", "\"a\""]);
        let parts = compile_markup_attr(&attr("className", expr("c"))).unwrap();
        assert_eq!(literals(&parts), vec![" ", "class", "=", "${}"]);
    }

    #[test]
    fn markup_events_are_lowercased() {
        let parts = compile_markup_attr(&attr("onClick", expr("go"))).unwrap();
        assert_eq!(literals(&parts), vec![" ", "onclick", "=", "${}"]);
        let parts = compile_markup_attr(&attr("on-input", expr("go"))).unwrap();
        assert_eq!(literals(&parts), vec![" ", "oninput", "=", "${}"]);
    }

    #[test]
    fn misused_events_fail() {
        let err = compile_markup_attr(&attr("onClick", string("\"go()\""))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EventStringLiteral);
        let err = compile_markup_attr(&attr("onClick", None)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::EventWithoutValue);
        let err = compile_markup_attr(&attr("on", expr("go"))).unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedAttribute("on".into()));
    }

    #[test]
    fn key_and_as_are_intercepted() {
        let attrs = vec![
            JSXAttrOrSpread::JSXAttr(attr("key", expr("id"))),
            JSXAttrOrSpread::JSXAttr(attr("class", string("\"row\""))),
            JSXAttrOrSpread::JSXAttr(attr("as", expr("tag"))),
        ];
        let (special, rest) = partition_attrs(&attrs).unwrap();
        assert!(special.key.is_some());
        assert!(special.dynamic_tag.is_some());
        assert_eq!(rest.len(), 1);
        assert_eq!(attr_name(rest[0]), "class");
    }

    #[test]
    fn second_as_attribute_fails() {
        let attrs = vec![
            JSXAttrOrSpread::JSXAttr(attr("as", expr("a"))),
            JSXAttrOrSpread::JSXAttr(attr("as", expr("b"))),
        ];
        let err = partition_attrs(&attrs).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateDynamicTag);
    }

    #[test]
    fn valueless_key_fails() {
        let attrs = vec![JSXAttrOrSpread::JSXAttr(attr("key", None))];
        let err = partition_attrs(&attrs).unwrap_err();
        assert_eq!(err.kind, ErrorKind::KeyWithoutValue);
    }
}
