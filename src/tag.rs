use swc_core::{common::Spanned, ecma::ast::*};

use crate::error::{ErrorKind, JsxTemplateError, Result};

/// Elements that never get children or a closing tag in the template.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "basefont", "bgsound", "br", "col", "command", "embed", "frame", "hr",
    "image", "img", "input", "isindex", "keygen", "link", "menuitem", "meta", "nextid", "param",
    "source", "track", "wbr",
];

/// What a JSX tag name stands for.
#[derive(Debug, Clone)]
pub enum Tag {
    /// Written into the template as `<name ...>`.
    Markup { name: String, is_void: bool },
    /// Compiled into `<callee>.for(...)`.
    Component { callee: Box<Expr> },
}

impl Tag {
    pub fn is_component(&self) -> bool {
        matches!(self, Tag::Component { .. })
    }
}

/// Lowercase-led names are markup, same rule React uses for host tags.
pub fn is_markup_name(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_lowercase())
}

pub fn is_void_element(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    VOID_ELEMENTS.contains(&lower.as_str())
}

pub fn classify(name: &JSXElementName) -> Result<Tag> {
    match name {
        JSXElementName::Ident(ident) => {
            let tag = ident.sym.as_ref();
            if is_markup_name(tag) {
                Ok(Tag::Markup {
                    name: tag.to_string(),
                    is_void: is_void_element(tag),
                })
            } else {
                Ok(Tag::Component {
                    callee: Box::new(Expr::Ident(ident.clone())),
                })
            }
        }
        // `<Foo.Bar>` is always a component, whatever the case of its parts.
        JSXElementName::JSXMemberExpr(member) => Ok(Tag::Component {
            callee: Box::new(member_callee(member)),
        }),
        JSXElementName::JSXNamespacedName(ns) => Err(JsxTemplateError::new(
            ErrorKind::UnknownTagType("namespaced name"),
            ns.span(),
        )),
    }
}

fn member_callee(member: &JSXMemberExpr) -> Expr {
    let obj = match &member.obj {
        JSXObject::Ident(ident) => Expr::Ident(ident.clone()),
        JSXObject::JSXMemberExpr(inner) => member_callee(inner),
    };
    Expr::Member(MemberExpr {
        span: member.span,
        obj: Box::new(obj),
        prop: MemberProp::Ident(member.prop.clone()),
    })
}
