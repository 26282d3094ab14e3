use std::fmt::Display;

use crate::{
    lexer::prelude::{BinaryOperator, LexResult, Token},
    parser::prelude::{parse_error, InfixParse, Parse, ParseError, ParseErrorType, Parser, Precedence},
    utils::prelude::SrcSpan
};

// program -> { <statement> }
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub statements: Vec<Statement>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Program {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let mut statements = vec![];

        while parser.not_eof() {
            statements.push(Statement::parse(parser, None)?);
        }

        let end = match &parser.current_token {
            Some((_, _, end)) => *end,
            None => statements.last().map_or(0, |stmt| stmt.location().end),
        };

        Ok(Self {
            statements,
            location: SrcSpan { start: 0, end }
        })
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let statements = self.statements.iter()
            .map(|statement| format!("{}", statement))
            .collect::<Vec<String>>();

        write!(f, "{}", statements.join("\n"))
    }
}

// statement -> <var_declaration> | <expression> [;]
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VarDeclaration(VarDeclaration),
    Expression(Expression),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Statement {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let res = match parser.current_token {
            Some((_, Token::Let | Token::Const, _)) => Self::VarDeclaration(VarDeclaration::parse(parser, None)?),
            Some(_) => {
                let expression = Expression::parse(parser, None)?;

                if parser.is_at(&Token::Semicolon) {
                    parser.step();
                }

                Self::Expression(expression)
            },
            None => return parse_error(
                ParseErrorType::UnexpectedEof,
                parser.eof_span()
            )
        };

        Ok(res)
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::VarDeclaration(declaration) => write!(f, "{declaration}"),
            Self::Expression(expression) => write!(f, "{expression};")
        }
    }
}

impl Statement {
    pub fn location(&self) -> SrcSpan {
        match self {
            Self::VarDeclaration(decl) => decl.location,
            Self::Expression(expr) => expr.location()
        }
    }
}

// var_declaration -> (let | const) <identifier> [= <expression>] ;
#[derive(Debug, Clone, PartialEq)]
pub struct VarDeclaration {
    pub identifier: Identifier,
    pub constant: bool,
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for VarDeclaration {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, constant) = match parser.next_token() {
            Some((start, Token::Const, _)) => (start, true),
            Some((start, _, _)) => (start, false),
            None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        };

        let identifier = Identifier::from(parser.expect_ident()?);

        if parser.is_at(&Token::Semicolon) {
            if constant {
                return parse_error(ParseErrorType::MissingConstValue, identifier.location);
            }

            let (_, end) = parser.expect_one(Token::Semicolon)?;

            return Ok(Self {
                identifier,
                constant,
                value: None,
                location: SrcSpan { start, end }
            });
        }

        parser.expect_one(Token::Equals)?;

        let value = Expression::parse(parser, None)?;

        let (_, end) = parser.expect_one(Token::Semicolon)?;

        Ok(Self {
            identifier,
            constant,
            value: Some(value),
            location: SrcSpan { start, end }
        })
    }
}

impl Display for VarDeclaration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keyword = if self.constant { "const" } else { "let" };

        match &self.value {
            Some(value) => write!(f, "{keyword} {} = {value};", self.identifier),
            None => write!(f, "{keyword} {};", self.identifier)
        }
    }
}

// expression -> <assignment>
// assignment -> <object> [= <assignment>]
// object     -> "{" [<property> {, <property>}] "}" | <additive>
// additive   -> <multiplicative> {(+ | -) <multiplicative>}
// multiplicative -> <call_member> {(* | / | %) <call_member>}
// call_member -> <member> {"(" <arguments> ")"}
// member     -> <primary> {. <identifier> | "[" <expression> "]"}
// primary    -> <identifier> | <number> | "(" <expression> ")"
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Assignment(AssignmentExpr),
    Binary(BinaryExpr),
    Identifier(Identifier),
    NumericLiteral(NumericLiteral),
    Object(ObjectLiteral),
    Call(CallExpr),
    Member(MemberExpr),
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Expression {
    /// Without a precedence this parses a whole (assignment) expression;
    /// with one it parses the binary operands binding tighter than it.
    fn parse(
        parser: &mut Parser<T>,
        precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match precedence {
            None => Self::parse_assignment(parser),
            Some(precedence) => Self::parse_binary(parser, precedence),
        }
    }
}

impl Expression {
    fn parse_assignment<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let assignee = Self::parse_object(parser)?;

        if !parser.is_at(&Token::Equals) {
            return Ok(assignee);
        }

        parser.step();

        let value = Self::parse_assignment(parser)?;
        let location = assignee.location().merge(value.location());

        Ok(Self::Assignment(AssignmentExpr {
            assignee: Box::new(assignee),
            value: Box::new(value),
            location
        }))
    }

    fn parse_object<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        if parser.is_at(&Token::LBrace) {
            Ok(Self::Object(ObjectLiteral::parse(parser, None)?))
        } else {
            Self::parse_binary(parser, Precedence::Lowest)
        }
    }

    fn parse_binary<T: Iterator<Item = LexResult>>(
        parser: &mut Parser<T>,
        precedence: Precedence
    ) -> Result<Self, ParseError> {
        let mut expr = Self::parse_call_member(parser)?;

        while precedence < parser.current_precedence() {
            expr = Self::Binary(BinaryExpr::parse(parser, expr, Some(precedence))?);
        }

        Ok(expr)
    }

    fn parse_call_member<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let mut expr = Self::parse_member(parser)?;

        while parser.is_at(&Token::LParen) {
            expr = Self::Call(CallExpr::parse(parser, expr, None)?);
        }

        Ok(expr)
    }

    fn parse_member<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        let mut expr = Self::parse_primary(parser)?;

        while parser.is_at(&Token::Dot) || parser.is_at(&Token::LSBracket) {
            expr = Self::Member(MemberExpr::parse(parser, expr, None)?);
        }

        Ok(expr)
    }

    fn parse_primary<T: Iterator<Item = LexResult>>(parser: &mut Parser<T>) -> Result<Self, ParseError> {
        match parser.current_token.clone() {
            Some((start, token, end)) => match token {
                Token::Ident(_) => Ok(Self::Identifier(Identifier::from(parser.expect_ident()?))),
                Token::Number(_) => Ok(Self::NumericLiteral(NumericLiteral::parse(parser, None)?)),
                Token::LParen => {
                    parser.step();

                    let expression = Expression::parse(parser, None)?;

                    parser.expect_one(Token::RParen)?;

                    Ok(expression)
                },
                Token::Eof => parse_error(
                    ParseErrorType::UnexpectedEof,
                    SrcSpan { start, end }
                ),
                _ => parse_error(
                    ParseErrorType::UnexpectedToken {
                        token,
                        expected: vec!["an Identifier, Number or `(`".to_string()]
                    },
                    SrcSpan { start, end }
                )
            },
            None => parse_error(
                ParseErrorType::UnexpectedEof,
                parser.eof_span()
            )
        }
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Self::Assignment(assignment) => assignment.location,
            Self::Binary(binary) => binary.location,
            Self::Identifier(ident) => ident.location,
            Self::NumericLiteral(literal) => literal.location,
            Self::Object(object) => object.location,
            Self::Call(call) => call.location,
            Self::Member(member) => member.location,
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Assignment(assignment) => write!(f, "{assignment}"),
            Self::Binary(binary) => write!(f, "{binary}"),
            Self::Identifier(ident) => write!(f, "{ident}"),
            Self::NumericLiteral(literal) => write!(f, "{literal}"),
            Self::Object(object) => write!(f, "{object}"),
            Self::Call(call) => write!(f, "{call}"),
            Self::Member(member) => write!(f, "{member}"),
        }
    }
}

// identifier -> <letter> { <letter> }
#[derive(Debug, Clone, PartialEq)]
pub struct Identifier {
    pub symbol: String,
    pub location: SrcSpan
}

impl Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol)
    }
}

impl From<(u32, String, u32)> for Identifier {
    fn from(value: (u32, String, u32)) -> Self {
        Identifier {
            symbol: value.1,
            location: SrcSpan { start: value.0, end: value.2 }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NumericLiteral {
    pub value: f64,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for NumericLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        match parser.next_token() {
            Some((start, Token::Number(literal), end)) => match literal.parse::<f64>() {
                Ok(value) => Ok(Self {
                    value,
                    location: SrcSpan { start, end }
                }),
                Err(_) => parse_error(
                    ParseErrorType::InvalidNumber { literal },
                    SrcSpan { start, end }
                )
            },
            Some((start, token, end)) => parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["a Number".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        }
    }
}

impl Display for NumericLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

// assignment -> <expression> = <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub assignee: Box<Expression>,
    pub value: Box<Expression>,
    pub location: SrcSpan
}

impl Display for AssignmentExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {}", self.assignee, self.value)
    }
}

// binary -> <expression> <binary_operator> <expression>
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expression>,
    pub operator: BinaryOperator,
    pub right: Box<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for BinaryExpr {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let precedence = parser.current_precedence();

        let operator = match parser.next_token() {
            Some((_, Token::BinaryOperator(operator), _)) => operator,
            Some((start, token, end)) => return parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["a binary operator".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        };

        let right = Expression::parse(parser, Some(precedence))?;

        let location = left.location().merge(right.location());

        Ok(Self {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            location
        })
    }
}

impl Display for BinaryExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}

// object -> "{" [<property> {, <property>} [,]] "}"
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectLiteral {
    pub properties: Vec<Property>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for ObjectLiteral {
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, _) = parser.expect_one(Token::LBrace)?;

        let mut properties = vec![];

        while parser.not_eof() && !parser.is_at(&Token::RBrace) {
            properties.push(Property::parse(parser, None)?);
        }

        let (_, end) = parser.expect_one(Token::RBrace)?;

        Ok(Self {
            properties,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for ObjectLiteral {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.properties.is_empty() {
            return write!(f, "{{}}");
        }

        let properties = self.properties.iter()
            .map(|property| property.to_string())
            .collect::<Vec<String>>();

        write!(f, "{{ {} }}", properties.join(", "))
    }
}

// property -> <identifier> [: <expression>]
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub key: String,
    pub value: Option<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> Parse<T> for Property {
    /// Also consumes the `,` separating it from the next property.
    fn parse(
        parser: &mut Parser<T>,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let (start, key, end) = parser.expect_ident()?;

        // { key, ... } and { key }
        if parser.is_at(&Token::Comma) {
            parser.step();

            return Ok(Self { key, value: None, location: SrcSpan { start, end } });
        } else if parser.is_at(&Token::RBrace) {
            return Ok(Self { key, value: None, location: SrcSpan { start, end } });
        }

        parser.expect_one(Token::Colon)?;

        let value = Expression::parse(parser, None)?;
        let location = SrcSpan { start, end: value.location().end };

        if !parser.is_at(&Token::RBrace) {
            parser.expect_one(Token::Comma)?;
        }

        Ok(Self {
            key,
            value: Some(value),
            location
        })
    }
}

impl Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            Some(value) => write!(f, "{}: {}", self.key, value),
            None => write!(f, "{}", self.key)
        }
    }
}

// call -> <expression> "(" [<expression> {, <expression>}] ")"
#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub caller: Box<Expression>,
    pub args: Vec<Expression>,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for CallExpr {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        parser.expect_one(Token::LParen)?;

        let mut args = vec![];

        if !parser.is_at(&Token::RParen) {
            args.push(Expression::parse(parser, None)?);

            while parser.is_at(&Token::Comma) {
                parser.step();
                args.push(Expression::parse(parser, None)?);
            }
        }

        let (_, end) = parser.expect_one(Token::RParen)?;

        let location = SrcSpan { start: left.location().start, end };

        Ok(Self {
            caller: Box::new(left),
            args,
            location
        })
    }
}

impl Display for CallExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let args = self.args.iter()
            .map(|arg| arg.to_string())
            .collect::<Vec<String>>();

        write!(f, "{}({})", self.caller, args.join(", "))
    }
}

// member -> <expression> . <identifier> | <expression> "[" <expression> "]"
#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expression>,
    pub property: Box<Expression>,
    pub computed: bool,
    pub location: SrcSpan
}

impl<T: Iterator<Item = LexResult>> InfixParse<T> for MemberExpr {
    fn parse(
        parser: &mut Parser<T>,
        left: Expression,
        _precedence: Option<Precedence>
    ) -> Result<Self, ParseError> {
        let start = left.location().start;

        let (property, computed, end) = match parser.next_token() {
            Some((_, Token::Dot, _)) => {
                let property = Identifier::from(parser.expect_ident()?);
                let end = property.location.end;

                (Expression::Identifier(property), false, end)
            },
            Some((_, Token::LSBracket, _)) => {
                let property = Expression::parse(parser, None)?;
                let (_, end) = parser.expect_one(Token::RSBracket)?;

                (property, true, end)
            },
            Some((start, token, end)) => return parse_error(
                ParseErrorType::UnexpectedToken {
                    token,
                    expected: vec!["`.`".to_string(), "`[`".to_string()]
                },
                SrcSpan { start, end }
            ),
            None => return parse_error(ParseErrorType::UnexpectedEof, parser.eof_span())
        };

        Ok(Self {
            object: Box::new(left),
            property: Box::new(property),
            computed,
            location: SrcSpan { start, end }
        })
    }
}

impl Display for MemberExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.computed {
            write!(f, "{}[{}]", self.object, self.property)
        } else {
            write!(f, "{}.{}", self.object, self.property)
        }
    }
}
