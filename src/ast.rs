// Small constructors for the nodes the transform synthesizes.

use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};

pub(crate) fn ident(sym: &str) -> Ident {
    Ident::new(sym.into(), DUMMY_SP, SyntaxContext::empty())
}

pub(crate) fn ident_expr(sym: &str) -> Box<Expr> {
    Box::new(Expr::Ident(ident(sym)))
}

pub(crate) fn str_lit(value: &str) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Str(Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    })))
}

pub(crate) fn num_lit(value: u64) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Num(Number {
        span: DUMMY_SP,
        value: value as f64,
        raw: None,
    })))
}

pub(crate) fn bool_lit(value: bool) -> Box<Expr> {
    Box::new(Expr::Lit(Lit::Bool(Bool {
        span: DUMMY_SP,
        value,
    })))
}

/// `obj.method(args...)`
pub(crate) fn method_call(obj: Box<Expr>, method: &str, args: Vec<Box<Expr>>) -> Expr {
    Expr::Call(CallExpr {
        span: DUMMY_SP,
        callee: Callee::Expr(Box::new(Expr::Member(MemberExpr {
            span: DUMMY_SP,
            obj,
            prop: MemberProp::Ident(IdentName::new(method.into(), DUMMY_SP)),
        }))),
        args: args
            .into_iter()
            .map(|expr| ExprOrSpread { spread: None, expr })
            .collect(),
        type_args: None,
        ctxt: SyntaxContext::empty(),
    })
}

/// `name: value`, quoting the key when it is not a plain identifier
/// (`data-id`, `xlink:href`).
pub(crate) fn key_value(name: &str, value: Box<Expr>) -> PropOrSpread {
    let key = if is_identifier_name(name) {
        PropName::Ident(IdentName::new(name.into(), DUMMY_SP))
    } else {
        PropName::Str(Str {
            span: DUMMY_SP,
            value: name.into(),
            raw: None,
        })
    };
    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp { key, value })))
}

fn is_identifier_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' || first == '$' => {
            chars.all(|c| c.is_alphanumeric() || c == '_' || c == '$')
        }
        _ => false,
    }
}

/// Expression whose text is emitted exactly as given.
///
/// Codegen prints identifier symbols without validation, which lets already
/// generated source be spliced back into the tree.
pub(crate) fn verbatim(code: String) -> Box<Expr> {
    Box::new(Expr::Ident(Ident::new(
        code.into(),
        DUMMY_SP,
        SyntaxContext::empty(),
    )))
}
