#![allow(dead_code)]

use swc_core::{
    common::{sync::Lrc, FileName, SourceMap},
    ecma::{
        ast::{EsVersion, Module, Program},
        codegen::{text_writer::JsWriter, Config, Emitter, Node},
        parser::{lexer::Lexer, EsSyntax, Parser, StringInput, Syntax},
    },
};
use veljsx_swc_plugin::{transform_program, JsxTemplateError, TransformConfig};

pub fn parse(cm: &Lrc<SourceMap>, src: &str) -> Program {
    let fm = cm.new_source_file(FileName::Custom("input.jsx".into()).into(), src.to_string());
    let syntax = Syntax::Es(EsSyntax {
        jsx: true,
        ..Default::default()
    });
    let lexer = Lexer::new(syntax, EsVersion::latest(), StringInput::from(&*fm), None);
    let mut parser = Parser::new_from(lexer);
    Program::Module(parser.parse_module().expect("test input parses"))
}

pub fn print(cm: &Lrc<SourceMap>, program: &Program) -> String {
    let Program::Module(module) = program else {
        panic!("tests only parse modules");
    };
    print_module(cm, module)
}

fn print_module(cm: &Lrc<SourceMap>, module: &Module) -> String {
    let mut buf = Vec::new();
    {
        let mut emitter = Emitter {
            cfg: Config::default(),
            cm: cm.clone(),
            comments: None,
            wr: JsWriter::new(cm.clone(), "\n", &mut buf, None),
        };
        module.emit_with(&mut emitter).expect("module prints");
    }
    String::from_utf8(buf).expect("utf-8 output")
}

pub fn transform_with(src: &str, config: &TransformConfig) -> Result<String, JsxTemplateError> {
    let cm: Lrc<SourceMap> = Default::default();
    let mut program = parse(&cm, src);
    transform_program(&mut program, config, None)?;
    Ok(print(&cm, &program).trim().to_string())
}

pub fn transform(src: &str) -> String {
    transform_with(src, &TransformConfig::default()).expect("transform succeeds")
}

pub fn transform_err(src: &str) -> JsxTemplateError {
    match transform_with(src, &TransformConfig::default()) {
        Ok(out) => panic!("expected an error, got:\n{out}"),
        Err(err) => err,
    }
}

/// Drop all whitespace, for outputs whose object literal layout is up to
/// the printer.
pub fn squash(code: &str) -> String {
    code.chars().filter(|c| !c.is_whitespace()).collect()
}
