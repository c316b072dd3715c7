use swc_core::{
    common::{sync::Lrc, SourceMap, Spanned},
    ecma::{
        ast::Expr,
        codegen::{text_writer::JsWriter, Config, Emitter, Node},
    },
};

use crate::error::{ErrorKind, JsxTemplateError, Result};

/// Render an expression back to JavaScript source.
pub fn expr_to_source(expr: &Expr) -> Result<String> {
    let print_err = |msg: String| JsxTemplateError::new(ErrorKind::Print(msg), expr.span());

    // Synthesized nodes carry dummy spans, so an empty map is enough.
    let cm: Lrc<SourceMap> = Default::default();
    let mut buf = Vec::new();
    {
        let mut emitter = Emitter {
            cfg: Config::default(),
            cm: cm.clone(),
            comments: None,
            wr: JsWriter::new(cm, "\n", &mut buf, None),
        };
        expr.emit_with(&mut emitter).map_err(|err| print_err(err.to_string()))?;
    }
    String::from_utf8(buf).map_err(|err| print_err(err.to_string()))
}
