use pretty_assertions::assert_eq;

use crate::utils::prelude::SrcSpan;
use super::prelude::{tokenize, BinaryOperator, Lexer, LexicalError, LexicalErrorType, Token};

fn kinds(src: &str) -> Vec<Token> {
    tokenize(src)
        .unwrap_or_else(|err| panic!("{err:?}"))
        .into_iter()
        .map(|(_, token, _)| token)
        .collect()
}

#[test]
fn test_single_char_tokens() -> std::result::Result<(), LexicalError> {
    let input = "( ) { } [ ] , : ; . = + - * / %";

    let mut lexer = Lexer::new(input.char_indices().map(|(i, c)| (i as u32, c)));

    let tokens = vec![
        Token::LParen,
        Token::RParen,
        Token::LBrace,
        Token::RBrace,
        Token::LSBracket,
        Token::RSBracket,
        Token::Comma,
        Token::Colon,
        Token::Semicolon,
        Token::Dot,
        Token::Equals,
        Token::BinaryOperator(BinaryOperator::Plus),
        Token::BinaryOperator(BinaryOperator::Minus),
        Token::BinaryOperator(BinaryOperator::Mult),
        Token::BinaryOperator(BinaryOperator::Div),
        Token::BinaryOperator(BinaryOperator::Rem),
        Token::Eof,
    ];

    for (idx, token) in tokens.iter().enumerate() {
        let (_, next_token, _) = lexer.next_token()?;

        assert_eq!(
            *token, next_token,
            "Next token does not match expected token ({:?}, {:?}) at {}",
            next_token, token, idx
        );
    }

    Ok(())
}

#[test]
fn test_numbers_and_identifiers() {
    assert_eq!(
        kinds("let answer = 42;"),
        vec![
            Token::Let,
            Token::Ident("answer".into()),
            Token::Equals,
            Token::Number("42".into()),
            Token::Semicolon,
            Token::Eof,
        ]
    );

    // Runs split where the character class changes.
    assert_eq!(
        kinds("12ab34"),
        vec![
            Token::Number("12".into()),
            Token::Ident("ab".into()),
            Token::Number("34".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_keywords_are_case_sensitive() {
    assert_eq!(
        kinds("const Const LET letter"),
        vec![
            Token::Const,
            Token::Ident("Const".into()),
            Token::Ident("LET".into()),
            Token::Ident("letter".into()),
            Token::Eof,
        ]
    );
}

#[test]
fn test_whitespace_is_discarded() {
    assert_eq!(kinds(" \t\r\n  x \n"), vec![Token::Ident("x".into()), Token::Eof]);
}

#[test]
fn test_long_whitespace_run() {
    let src = format!("{}1{}", " \n".repeat(50_000), "\t".repeat(50_000));
    let tokens = tokenize(&src).unwrap();

    assert_eq!(tokens[0], (100_000, Token::Number("1".into()), 100_001));
    assert_eq!(tokens[1].1, Token::Eof);
}

#[test]
fn test_empty_input_yields_single_eof() {
    assert_eq!(kinds(""), vec![Token::Eof]);
    assert_eq!(kinds("   \n"), vec![Token::Eof]);
}

#[test]
fn test_exactly_one_eof() {
    let tokens = kinds("obj.key[0] = f(a, b)");
    let eofs = tokens.iter().filter(|token| **token == Token::Eof).count();

    assert_eq!(eofs, 1);
    assert_eq!(tokens.last(), Some(&Token::Eof));
}

#[test]
fn test_lexer_keeps_yielding_eof() {
    let mut lexer = Lexer::new("1".char_indices().map(|(i, c)| (i as u32, c)));

    assert_eq!(lexer.next().map(|res| res.map(|t| t.1)), Some(Ok(Token::Number("1".into()))));
    assert_eq!(lexer.next().map(|res| res.map(|t| t.1)), Some(Ok(Token::Eof)));
    assert_eq!(lexer.next().map(|res| res.map(|t| t.1)), Some(Ok(Token::Eof)));
}

#[test]
fn test_spans() {
    let tokens = tokenize("let xy = 123").unwrap();

    assert_eq!(
        tokens,
        vec![
            (0, Token::Let, 3),
            (4, Token::Ident("xy".into()), 6),
            (7, Token::Equals, 8),
            (9, Token::Number("123".into()), 12),
            (12, Token::Eof, 12),
        ]
    );
}

#[test]
fn test_unicode_identifiers() {
    assert_eq!(
        kinds("пусть λ"),
        vec![Token::Ident("пусть".into()), Token::Ident("λ".into()), Token::Eof]
    );
}

#[test]
fn test_unrecognized_character() {
    let err = tokenize("let x = 1 $ 2;").unwrap_err();

    assert_eq!(
        err,
        LexicalError {
            error: LexicalErrorType::UnrecognizedToken { tok: '$' },
            location: SrcSpan { start: 10, end: 11 },
        }
    );
}

#[test]
fn test_no_decimal_point_numbers() {
    assert_eq!(
        kinds("1.5"),
        vec![
            Token::Number("1".into()),
            Token::Dot,
            Token::Number("5".into()),
            Token::Eof,
        ]
    );
}
