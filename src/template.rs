//! Grouping of part sequences into tagged templates.
//!
//! A unit such as `<div class={c}>hi</div>` arrives as
//! `["<", "div", " ", "class", "=", c, ">", "hi", "</", "div", ">"]` and
//! leaves as `self.part(1)` tagged onto `` `<div class=${c}>hi</div>` ``.

use swc_core::{
    common::{Spanned, SyntaxContext, DUMMY_SP},
    ecma::ast::*,
};

use crate::{
    ast,
    error::{ErrorKind, JsxTemplateError, Result},
    escape::escape_literal,
    parts::Part,
};

/// Token the runtime uses to find a unit again.
#[derive(Debug, Clone)]
pub enum FragmentId {
    Counter(u64),
    /// Author supplied `key` expression.
    Key(Box<Expr>),
}

impl FragmentId {
    fn into_expr(self) -> Box<Expr> {
        match self {
            FragmentId::Counter(id) => ast::num_lit(id),
            FragmentId::Key(expr) => expr,
        }
    }
}

/// Which accessor the tagged template is read through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// `self.part(<id>)` / `self.dtt(<id>, <tag>)`
    Fragment,
    /// `self.dtt("root")` for a dynamic tag; units without one still read
    /// through `self.part(<id>)`.
    Root,
}

#[derive(Debug, Clone)]
pub struct CompiledUnit {
    pub quasis: Vec<String>,
    pub exprs: Vec<Box<Expr>>,
    pub fragment: FragmentId,
    pub dynamic_tag: Option<Box<Expr>>,
}

/// Coalesce literals, open one slot per expression part and pull out the
/// dynamic tag. Always yields `quasis.len() == exprs.len() + 1`.
pub fn assemble(parts: Vec<Part>, fragment: FragmentId) -> Result<CompiledUnit> {
    let mut quasis = Vec::new();
    let mut exprs = Vec::new();
    let mut dynamic_tag: Option<Box<Expr>> = None;
    let mut current = String::new();

    for part in parts {
        match part {
            Part::Literal(text) => current.push_str(&escape_literal(&text)),
            Part::DynamicTag(expr) => {
                check_dynamic_tag(&expr)?;
                if dynamic_tag.is_some() {
                    return Err(JsxTemplateError::new(
                        ErrorKind::DuplicateDynamicTag,
                        expr.span(),
                    ));
                }
                dynamic_tag = Some(expr);
            }
            Part::Expr(expr) => {
                quasis.push(std::mem::take(&mut current));
                exprs.push(expr);
            }
        }
    }
    quasis.push(current);

    Ok(CompiledUnit {
        quasis,
        exprs,
        fragment,
        dynamic_tag,
    })
}

fn check_dynamic_tag(expr: &Expr) -> Result<()> {
    let mut inner = expr;
    while let Expr::Paren(paren) = inner {
        inner = &paren.expr;
    }
    let shape = match inner {
        Expr::Ident(_) | Expr::Member(_) | Expr::Cond(_) => return Ok(()),
        Expr::Lit(_) => "literal",
        Expr::Call(_) => "call expression",
        Expr::Tpl(_) => "template literal",
        Expr::Arrow(_) | Expr::Fn(_) => "function",
        _ => "expression",
    };
    Err(JsxTemplateError::new(
        ErrorKind::DisallowedDynamicTag(shape),
        expr.span(),
    ))
}

impl CompiledUnit {
    /// Plain template literal, used for values that are inlined elsewhere.
    pub fn into_template(self) -> Tpl {
        build_tpl(self.quasis, self.exprs)
    }

    pub fn into_tagged(self, receiver: &str, accessor: Accessor) -> Expr {
        let (method, args) = match (accessor, self.dynamic_tag) {
            (_, None) => ("part", vec![self.fragment.into_expr()]),
            (Accessor::Fragment, Some(tag)) => ("dtt", vec![self.fragment.into_expr(), tag]),
            (Accessor::Root, Some(_)) => ("dtt", vec![ast::str_lit("root")]),
        };
        let tag = ast::method_call(ast::ident_expr(receiver), method, args);

        Expr::TaggedTpl(TaggedTpl {
            span: DUMMY_SP,
            ctxt: SyntaxContext::empty(),
            tag: Box::new(tag),
            type_params: None,
            tpl: Box::new(build_tpl(self.quasis, self.exprs)),
        })
    }
}

fn build_tpl(quasis: Vec<String>, exprs: Vec<Box<Expr>>) -> Tpl {
    let last = quasis.len().saturating_sub(1);
    let quasis = quasis
        .into_iter()
        .enumerate()
        .map(|(i, text)| TplElement {
            span: DUMMY_SP,
            tail: i == last,
            cooked: Some(text.clone().into()),
            raw: text.into(),
        })
        .collect();
    Tpl {
        span: DUMMY_SP,
        exprs,
        quasis,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(text: &str) -> Part {
        Part::literal(text)
    }

    fn var(sym: &str) -> Box<Expr> {
        ast::ident_expr(sym)
    }

    fn assert_invariant(unit: &CompiledUnit) {
        assert_eq!(unit.quasis.len(), unit.exprs.len() + 1);
    }

    #[test]
    fn literals_coalesce_into_one_quasi() {
        let parts = vec![lit("<"), lit("div"), lit(">"), lit("</"), lit("div"), lit(">")];
        let unit = assemble(parts, FragmentId::Counter(1)).unwrap();
        assert_eq!(unit.quasis, vec!["<div></div>"]);
        assert!(unit.exprs.is_empty());
        assert_invariant(&unit);
    }

    #[test]
    fn expressions_split_quasis() {
        let parts = vec![
            lit("<input value="),
            Part::Expr(var("val")),
            lit(">"),
        ];
        let unit = assemble(parts, FragmentId::Counter(1)).unwrap();
        assert_eq!(unit.quasis, vec!["<input value=", ">"]);
        assert_eq!(unit.exprs.len(), 1);
        assert_invariant(&unit);
    }

    #[test]
    fn adjacent_and_edge_expressions_get_empty_quasis() {
        let parts = vec![Part::Expr(var("a")), Part::Expr(var("b"))];
        let unit = assemble(parts, FragmentId::Counter(1)).unwrap();
        assert_eq!(unit.quasis, vec!["", "", ""]);
        assert_invariant(&unit);

        let empty = assemble(vec![], FragmentId::Counter(1)).unwrap();
        assert_eq!(empty.quasis, vec![""]);
        assert_invariant(&empty);
    }

    #[test]
    fn each_literal_piece_is_escaped_separately() {
        // the space rule applies once per piece, so both double spaces collapse
        let parts = vec![lit("a  b"), lit("c  d")];
        let unit = assemble(parts, FragmentId::Counter(1)).unwrap();
        assert_eq!(unit.quasis, vec!["a bc d"]);
    }

    #[test]
    fn dynamic_tag_does_not_open_a_slot() {
        let parts = vec![
            lit("<{tag}"),
            Part::DynamicTag(var("tag")),
            lit(">"),
            Part::Expr(var("body")),
            lit("</{tag}>"),
        ];
        let unit = assemble(parts, FragmentId::Counter(3)).unwrap();
        assert_eq!(unit.quasis, vec!["<{tag}>", "</{tag}>"]);
        assert_eq!(unit.exprs.len(), 1);
        assert!(unit.dynamic_tag.is_some());
        assert_invariant(&unit);
    }

    #[test]
    fn second_dynamic_tag_fails() {
        let parts = vec![
            lit("<{tag}"),
            Part::DynamicTag(var("a")),
            lit("<{tag}"),
            Part::DynamicTag(var("b")),
        ];
        let err = assemble(parts, FragmentId::Counter(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DuplicateDynamicTag);
    }

    #[test]
    fn dynamic_tag_shapes() {
        let call = Box::new(ast::method_call(var("pick"), "tag", vec![]));
        let err = assemble(vec![Part::DynamicTag(call)], FragmentId::Counter(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DisallowedDynamicTag("call expression"));

        let err =
            assemble(vec![Part::DynamicTag(ast::str_lit("div"))], FragmentId::Counter(1)).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DisallowedDynamicTag("literal"));

        let member = Box::new(Expr::Member(MemberExpr {
            span: DUMMY_SP,
            obj: var("tags"),
            prop: MemberProp::Ident(IdentName::new("h1".into(), DUMMY_SP)),
        }));
        assert!(assemble(vec![Part::DynamicTag(member)], FragmentId::Counter(1)).is_ok());
    }

    #[test]
    fn tagged_template_accessors() {
        let unit = assemble(vec![lit("<br>")], FragmentId::Counter(2)).unwrap();
        let Expr::TaggedTpl(tagged) = unit.into_tagged("self", Accessor::Fragment) else {
            panic!("expected tagged template");
        };
        let Expr::Call(call) = *tagged.tag else {
            panic!("expected accessor call");
        };
        assert_eq!(call.args.len(), 1);
        assert!(matches!(*call.args[0].expr, Expr::Lit(Lit::Num(ref n)) if n.value == 2.0));
        assert_eq!(tagged.tpl.quasis.len(), 1);
        assert!(tagged.tpl.quasis[0].tail);

        let unit = assemble(
            vec![lit("<{tag}"), Part::DynamicTag(var("t")), lit(">")],
            FragmentId::Counter(4),
        )
        .unwrap();
        let Expr::TaggedTpl(tagged) = unit.into_tagged("self", Accessor::Root) else {
            panic!("expected tagged template");
        };
        let Expr::Call(call) = *tagged.tag else {
            panic!("expected accessor call");
        };
        assert_eq!(call.args.len(), 1);
        assert!(
            matches!(*call.args[0].expr, Expr::Lit(Lit::Str(ref s)) if s.value.to_string() == "root")
        );

        let unit = assemble(vec![lit("<p></p>")], FragmentId::Counter(5)).unwrap();
        let Expr::TaggedTpl(tagged) = unit.into_tagged("self", Accessor::Root) else {
            panic!("expected tagged template");
        };
        let Expr::Call(call) = *tagged.tag else {
            panic!("expected accessor call");
        };
        assert!(matches!(*call.args[0].expr, Expr::Lit(Lit::Num(ref n)) if n.value == 5.0));
    }
}
