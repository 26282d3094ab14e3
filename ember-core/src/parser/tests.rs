use pretty_assertions::assert_eq;

use crate::{
    lexer::prelude::{tokenize, BinaryOperator, LexicalErrorType, Token},
    parser::prelude::{
        parse_program, parse_program_from_stream, parse_tokens, Expression, ParseError,
        ParseErrorType, Statement
    },
    utils::prelude::SrcSpan
};

fn single_expression(input: &str) -> Expression {
    let program = parse_program(input).unwrap_or_else(|err| panic!("{err:?}"));

    assert_eq!(program.statements.len(), 1, "expected one statement in {input:?}");

    match program.statements.into_iter().next() {
        Some(Statement::Expression(expression)) => expression,
        other => panic!("expected an expression statement, got {other:?}")
    }
}

fn error_of(input: &str) -> ParseErrorType {
    parse_program(input).unwrap_err().error
}

#[test]
fn test_precedence() {
    let expression = single_expression("1 + 2 * 3");

    let Expression::Binary(root) = expression else {
        panic!("expected a binary expression");
    };

    assert_eq!(root.operator, BinaryOperator::Plus);
    assert!(matches!(*root.left, Expression::NumericLiteral(ref literal) if literal.value == 1.0));

    let Expression::Binary(right) = *root.right else {
        panic!("expected a nested binary expression");
    };

    assert_eq!(right.operator, BinaryOperator::Mult);
}

#[test]
fn test_parenthesized_precedence() {
    let expression = single_expression("(1 + 2) * 3");

    let Expression::Binary(root) = expression else {
        panic!("expected a binary expression");
    };

    assert_eq!(root.operator, BinaryOperator::Mult);
    assert!(matches!(*root.left, Expression::Binary(ref left) if left.operator == BinaryOperator::Plus));
}

#[test]
fn test_left_associativity() -> Result<(), ParseError> {
    assert_eq!(parse_program("1 - 2 - 3")?.to_string(), "((1 - 2) - 3);");
    assert_eq!(parse_program("8 / 4 % 3 * 2")?.to_string(), "(((8 / 4) % 3) * 2);");
    assert_eq!(parse_program("a + b * c - d")?.to_string(), "((a + (b * c)) - d);");

    Ok(())
}

#[test]
fn test_assignment_is_right_associative() -> Result<(), ParseError> {
    let expression = single_expression("a = b = 1 + 2");

    let Expression::Assignment(outer) = expression else {
        panic!("expected an assignment");
    };

    assert!(matches!(*outer.assignee, Expression::Identifier(ref ident) if ident.symbol == "a"));
    assert!(matches!(*outer.value, Expression::Assignment(_)));
    assert_eq!(parse_program("a = b = 1 + 2")?.to_string(), "a = b = (1 + 2);");

    Ok(())
}

#[test]
fn test_declarations() -> Result<(), ParseError> {
    let input = r#"
        let x = 5;
        const y = x * 2;
        let z;
    "#;

    let program = parse_program(input)?;

    assert_eq!(program.statements.len(), 3);

    match &program.statements[1] {
        Statement::VarDeclaration(declaration) => {
            assert!(declaration.constant);
            assert_eq!(declaration.identifier.symbol, "y");
            assert!(declaration.value.is_some());
        },
        other => panic!("expected a declaration, got {other:?}")
    }

    match &program.statements[2] {
        Statement::VarDeclaration(declaration) => {
            assert!(!declaration.constant);
            assert_eq!(declaration.value, None);
        },
        other => panic!("expected a declaration, got {other:?}")
    }

    assert_eq!(program.to_string(), "let x = 5;\nconst y = (x * 2);\nlet z;");

    Ok(())
}

#[test]
fn test_const_requires_value() {
    let err = parse_program("const y;").unwrap_err();

    assert_eq!(err.error, ParseErrorType::MissingConstValue);
    assert_eq!(err.span, SrcSpan { start: 6, end: 7 });
}

#[test]
fn test_declaration_requires_semicolon() {
    assert_eq!(error_of("let x = 5"), ParseErrorType::UnexpectedEof);
    assert_eq!(
        error_of("let x = 5 let"),
        ParseErrorType::UnexpectedToken {
            token: Token::Let,
            expected: vec!["`;`".to_string()]
        }
    );
    assert_eq!(error_of("let = 5;"), ParseErrorType::ExpectedIdent);
}

#[test]
fn test_optional_semicolon_after_expression() -> Result<(), ParseError> {
    let program = parse_program("let x = 5; x = x + 1; x;")?;

    assert_eq!(program.statements.len(), 3);
    assert_eq!(parse_program("x x")?.statements.len(), 2);

    Ok(())
}

#[test]
fn test_object_literals() -> Result<(), ParseError> {
    let program = parse_program("let o = { x, y: 1 + 2, z, };")?;

    let Statement::VarDeclaration(declaration) = &program.statements[0] else {
        panic!("expected a declaration");
    };

    let Some(Expression::Object(object)) = &declaration.value else {
        panic!("expected an object literal");
    };

    let keys = object.properties.iter()
        .map(|property| (property.key.as_str(), property.value.is_some()))
        .collect::<Vec<_>>();

    assert_eq!(keys, vec![("x", false), ("y", true), ("z", false)]);
    assert_eq!(program.to_string(), "let o = { x, y: (1 + 2), z };");
    assert_eq!(parse_program("{}")?.to_string(), "{};");

    Ok(())
}

#[test]
fn test_object_literal_errors() {
    assert_eq!(
        error_of("{ x: 1 y: 2 }"),
        ParseErrorType::UnexpectedToken {
            token: Token::Ident("y".into()),
            expected: vec!["`,`".to_string()]
        }
    );
    assert_eq!(error_of("{ 1: 2 }"), ParseErrorType::ExpectedIdent);
    assert_eq!(error_of("{ x: 1"), ParseErrorType::UnexpectedEof);
}

#[test]
fn test_object_only_at_assignment_level() {
    // An object literal is not a primary expression.
    assert!(matches!(
        error_of("1 + { x }"),
        ParseErrorType::UnexpectedToken { token: Token::LBrace, .. }
    ));
}

#[test]
fn test_member_expressions() -> Result<(), ParseError> {
    let expression = single_expression("a.b[c + 1].d");

    let Expression::Member(outer) = expression else {
        panic!("expected a member expression");
    };

    assert!(!outer.computed);

    let Expression::Member(inner) = *outer.object else {
        panic!("expected a nested member expression");
    };

    assert!(inner.computed);
    assert!(matches!(*inner.property, Expression::Binary(_)));
    assert_eq!(parse_program("a.b[c + 1].d")?.to_string(), "a.b[(c + 1)].d;");

    Ok(())
}

#[test]
fn test_member_requires_identifier() {
    assert_eq!(error_of("a.1"), ParseErrorType::ExpectedIdent);
    assert_eq!(error_of("a[1"), ParseErrorType::UnexpectedEof);
}

#[test]
fn test_call_expressions() -> Result<(), ParseError> {
    let expression = single_expression("f(a)(b, 2)");

    let Expression::Call(outer) = expression else {
        panic!("expected a call expression");
    };

    assert_eq!(outer.args.len(), 2);
    assert!(matches!(*outer.caller, Expression::Call(ref inner) if inner.args.len() == 1));

    assert_eq!(parse_program("obj.method()")?.to_string(), "obj.method();");
    assert_eq!(parse_program("f({ x }, y = 2)")?.to_string(), "f({ x }, y = 2);");
    assert_eq!(parse_program("2 * f(1) + 1")?.to_string(), "((2 * f(1)) + 1);");

    Ok(())
}

#[test]
fn test_call_argument_errors() {
    assert_eq!(error_of("f(1,)"), ParseErrorType::UnexpectedToken {
        token: Token::RParen,
        expected: vec!["an Identifier, Number or `(`".to_string()]
    });
    assert_eq!(error_of("f(1 2)"), ParseErrorType::UnexpectedToken {
        token: Token::Number("2".into()),
        expected: vec!["`)`".to_string()]
    });
}

#[test]
fn test_unexpected_primary() {
    let err = parse_program("let x = ;").unwrap_err();

    assert_eq!(
        err.error,
        ParseErrorType::UnexpectedToken {
            token: Token::Semicolon,
            expected: vec!["an Identifier, Number or `(`".to_string()]
        }
    );
    assert_eq!(err.span, SrcSpan { start: 8, end: 9 });
    assert_eq!(error_of("(1 + 2"), ParseErrorType::UnexpectedEof);
}

#[test]
fn test_lex_errors_are_reported() {
    match error_of("let a = 1 # 2;") {
        ParseErrorType::LexError { error } => {
            assert_eq!(error.error, LexicalErrorType::UnrecognizedToken { tok: '#' });
            assert_eq!(error.location, SrcSpan { start: 10, end: 11 });
        },
        other => panic!("expected a lex error, got {other:?}")
    }
}

#[test]
fn test_empty_program() -> Result<(), ParseError> {
    assert_eq!(parse_program("")?.statements, vec![]);
    assert_eq!(parse_program("  \n ")?.statements, vec![]);

    Ok(())
}

#[test]
fn test_parse_entry_points_agree() -> Result<(), ParseError> {
    let input = "let point = { x: 1, y: 2 };\npoint.x = point.y * 3;";

    let from_str = parse_program(input)?;
    let from_stream = parse_program_from_stream(input.chars())?;
    let from_tokens = parse_tokens(tokenize(input).unwrap())?;

    assert_eq!(from_str, from_stream);
    assert_eq!(from_str, from_tokens);

    Ok(())
}
