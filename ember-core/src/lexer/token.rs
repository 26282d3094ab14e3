use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Plus, // +
    Minus, // -
    Mult, // *
    Div, // /
    Rem, // %
}

impl BinaryOperator {
    pub fn as_char(&self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
            Self::Mult => '*',
            Self::Div => '/',
            Self::Rem => '%',
        }
    }

    pub fn is_additive(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }

    pub fn is_multiplicative(&self) -> bool {
        matches!(self, Self::Mult | Self::Div | Self::Rem)
    }
}

impl Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // {/ <цифра> /}
    Number(String),
    // {/ <буква> /}
    Ident(String),

    // Ключевые слова
    Let, // let
    Const, // const

    BinaryOperator(BinaryOperator), // + - * / %
    Equals, // =

    // Разделители
    Comma, // ,
    Colon, // :
    Semicolon, // ;
    Dot, // .
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    LSBracket, // [
    RSBracket, // ]

    Eof,
}

impl Token {
    pub fn is_reserved_word(&self) -> bool {
        matches!(self, Token::Let | Token::Const)
    }

    pub fn as_literal(&self) -> String {
        match self {
            Token::Number(value) => value.clone(),
            Token::Ident(name) => name.clone(),
            Token::Let => "let".into(),
            Token::Const => "const".into(),
            Token::BinaryOperator(operator) => operator.to_string(),
            Token::Equals => "=".into(),
            Token::Comma => ",".into(),
            Token::Colon => ":".into(),
            Token::Semicolon => ";".into(),
            Token::Dot => ".".into(),
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::LBrace => "{".into(),
            Token::RBrace => "}".into(),
            Token::LSBracket => "[".into(),
            Token::RSBracket => "]".into(),
            Token::Eof => "EndOfFile".into(),
        }
    }
}

pub fn str_to_keyword(word: &str) -> Option<Token> {
    Some(match word {
        "let" => Token::Let,
        "const" => Token::Const,
        _ => return None
    })
}
