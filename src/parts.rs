use swc_core::ecma::ast::Expr;

/// One not-yet-grouped piece of a compiled unit.
#[derive(Debug, Clone)]
pub enum Part {
    /// Template text, still unescaped.
    Literal(String),
    /// A value slot (`${expr}`).
    Expr(Box<Expr>),
    /// The `as` expression replacing the element's tag. Does not open a slot.
    DynamicTag(Box<Expr>),
}

impl Part {
    pub fn literal(text: impl Into<String>) -> Self {
        Part::Literal(text.into())
    }
}
