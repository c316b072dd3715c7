use swc_core::{
    common::{SyntaxContext, DUMMY_SP},
    ecma::{
        ast::*,
        visit::{Visit, VisitMut, VisitMutWith, VisitWith},
    },
};
use tracing::trace;

/// Inserts `const self = this;` at the top of every method, constructor,
/// getter or setter whose body contains JSX, so generated `self.part(...)` calls have a receiver.
///
/// Methods declared inside a JSX expression container are skipped; they
/// run with whatever `this` the enclosing method already aliased.
pub struct ReceiverInjector {
    receiver: String,
    container_depth: usize,
}

impl ReceiverInjector {
    pub fn new(receiver: impl Into<String>) -> Self {
        Self {
            receiver: receiver.into(),
            container_depth: 0,
        }
    }

    fn inject(&self, body: Option<&mut BlockStmt>) {
        if self.container_depth > 0 {
            return;
        }
        let Some(body) = body else { return };
        if !contains_jsx(body) {
            return;
        }
        // `this` is unreadable before `super()` in a derived constructor
        let at = body
            .stmts
            .iter()
            .position(is_super_call)
            .map_or(0, |i| i + 1);
        body.stmts.insert(at, self.binding());
        trace!(receiver = %self.receiver, "injected receiver binding");
    }

    fn binding(&self) -> Stmt {
        Stmt::Decl(Decl::Var(Box::new(VarDecl {
            span: DUMMY_SP,
            kind: VarDeclKind::Const,
            declare: false,
            decls: vec![VarDeclarator {
                span: DUMMY_SP,
                name: Pat::Ident(BindingIdent {
                    id: Ident::new(self.receiver.clone().into(), DUMMY_SP, SyntaxContext::empty()),
                    type_ann: None,
                }),
                init: Some(Box::new(Expr::This(ThisExpr { span: DUMMY_SP }))),
                definite: false,
            }],
            ctxt: SyntaxContext::empty(),
        })))
    }
}

impl VisitMut for ReceiverInjector {
    fn visit_mut_jsx_expr_container(&mut self, n: &mut JSXExprContainer) {
        self.container_depth += 1;
        n.visit_mut_children_with(self);
        self.container_depth -= 1;
    }

    fn visit_mut_class_method(&mut self, n: &mut ClassMethod) {
        n.visit_mut_children_with(self);
        self.inject(n.function.body.as_mut());
    }

    fn visit_mut_constructor(&mut self, n: &mut Constructor) {
        n.visit_mut_children_with(self);
        self.inject(n.body.as_mut());
    }

    fn visit_mut_private_method(&mut self, n: &mut PrivateMethod) {
        n.visit_mut_children_with(self);
        self.inject(n.function.body.as_mut());
    }

    fn visit_mut_method_prop(&mut self, n: &mut MethodProp) {
        n.visit_mut_children_with(self);
        self.inject(n.function.body.as_mut());
    }

    fn visit_mut_getter_prop(&mut self, n: &mut GetterProp) {
        n.visit_mut_children_with(self);
        self.inject(n.body.as_mut());
    }

    fn visit_mut_setter_prop(&mut self, n: &mut SetterProp) {
        n.visit_mut_children_with(self);
        self.inject(n.body.as_mut());
    }
}

fn is_super_call(stmt: &Stmt) -> bool {
    matches!(
        stmt,
        Stmt::Expr(ExprStmt { expr, .. })
            if matches!(&**expr, Expr::Call(CallExpr { callee: Callee::Super(_), .. }))
    )
}

#[derive(Default)]
struct JsxFinder {
    found: bool,
}

impl Visit for JsxFinder {
    fn visit_jsx_element(&mut self, _: &JSXElement) {
        self.found = true;
    }

    fn visit_jsx_fragment(&mut self, _: &JSXFragment) {
        self.found = true;
    }
}

fn contains_jsx(body: &BlockStmt) -> bool {
    let mut finder = JsxFinder::default();
    body.visit_with(&mut finder);
    finder.found
}
