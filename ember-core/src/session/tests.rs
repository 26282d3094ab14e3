use std::path::{Path, PathBuf};

use pretty_assertions::assert_eq;

use crate::{
    environment::prelude::Value,
    eval::prelude::RuntimeErrorType,
    parser::prelude::ParseErrorType,
    utils::prelude::{Error, SrcSpan}
};
use super::Session;

fn temp_source(name: &str, src: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("ember-{}-{name}", std::process::id()));
    std::fs::write(&path, src).unwrap();
    path
}

#[test]
fn test_bindings_persist_between_inputs() {
    let mut session = Session::new();

    session.eval("let x = 2;").unwrap();
    session.eval("const double = 2;").unwrap();

    assert_eq!(session.eval("x * double"), Ok(Value::number(4.0)));
    assert!(session.env().contains("x"));
}

#[test]
fn test_failed_input_keeps_earlier_bindings() {
    let mut session = Session::new();

    session.eval("let a = 1;").unwrap();

    let Err(Error::Runtime { error, src, .. }) = session.eval("let b = 2; a + missing") else {
        panic!("expected a runtime error");
    };

    assert_eq!(error.error, RuntimeErrorType::UnresolvedVariable { name: "missing".into() });
    assert_eq!(error.location, SrcSpan::from(15, 22));
    assert_eq!(src, "let b = 2; a + missing");

    assert_eq!(session.eval("a + b"), Ok(Value::number(3.0)));
}

#[test]
fn test_parse_error() {
    let mut session = Session::new();

    let Err(Error::Parse { path, error, .. }) = session.eval("let = 5;") else {
        panic!("expected a parse error");
    };

    assert_eq!(path, PathBuf::from("<repl>"));
    assert_eq!(error.error, ParseErrorType::ExpectedIdent);
    assert!(!session.env().contains("let"));
}

#[test]
fn test_run_file() {
    let path = temp_source("run.em", "let point = { x: 3, y: 4 };\npoint.x * point.y\n");
    let mut session = Session::new();

    let result = session.run_file(&path);
    std::fs::remove_file(&path).unwrap();

    assert_eq!(result, Ok(Value::number(12.0)));
}

#[test]
fn test_run_file_parse_error_keeps_whole_source() {
    let src = "let x = 1;\nlet = 2;\nlet y = 3;\n";
    let path = temp_source("broken.em", src);
    let mut session = Session::new();

    let result = session.run_file(&path);
    std::fs::remove_file(&path).unwrap();

    let Err(Error::Parse { path: reported, src: collected, error }) = result else {
        panic!("expected a parse error");
    };

    assert_eq!(reported, path);
    assert_eq!(collected, src);
    assert_eq!(error.error, ParseErrorType::ExpectedIdent);
}

#[test]
fn test_run_missing_file() {
    let mut session = Session::new();

    assert_eq!(
        session.run_file("/definitely/not/here.em"),
        Err(Error::StdIo { err: std::io::ErrorKind::NotFound })
    );
}

#[test]
fn test_pretty_runtime_error() {
    let mut session = Session::new();

    let err = session.eval("const c = 1; c = 2").unwrap_err();
    let rendered = err.pretty_string();

    assert!(rendered.contains("Assignment to constant"), "{rendered}");
    assert!(rendered.contains("cannot reassign constant `c`"), "{rendered}");
    assert!(rendered.contains("<repl>"), "{rendered}");
}

#[test]
fn test_pretty_parse_error_at_eof() {
    let mut session = Session::new();

    let err = session.eval("let x = (1 + 2").unwrap_err();

    assert!(matches!(&err, Error::Parse { error, .. } if error.error == ParseErrorType::UnexpectedEof));
    assert!(err.pretty_string().contains("Syntax error"));
}

#[test]
fn test_failed_open_keeps_repl_path() {
    let mut session = Session::new();

    assert!(session.run_file("/definitely/not/here.em").is_err());
    assert_eq!(session.path(), Path::new("<repl>"));

    let Err(Error::Runtime { path, .. }) = session.eval("missing") else {
        panic!("expected a runtime error");
    };

    assert_eq!(path, PathBuf::from("<repl>"));
}
