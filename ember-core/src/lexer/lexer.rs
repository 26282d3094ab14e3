use super::error::{LexicalError, LexicalErrorType};
use super::token::{str_to_keyword, BinaryOperator, Token};
use crate::utils::prelude::SrcSpan;

pub type Spanned = (u32, Token, u32);
pub type LexResult = std::result::Result<Spanned, LexicalError>;

#[derive(Debug)]
pub struct Lexer<T: Iterator<Item = (u32, char)>> {
	position: u32,
	next_position: u32,
	ch: Option<char>,
	next_ch: Option<char>,
	input: T,
}

impl<T: Iterator<Item = (u32, char)>> Lexer<T> {
	pub fn new(input: T) -> Self {
		let mut lexer = Self {
			position: 0,
			next_position: 0,
			ch: None,
			next_ch: None,
			input,
		};

		lexer.next_char();
		lexer.next_char();

		lexer
	}

	pub fn next_token(&mut self) -> LexResult {
		while matches!(self.ch, Some(' ' | '\n' | '\t' | '\r')) {
			self.next_char();
		}

		let span = match self.ch {
			Some(ch) => match ch {
				'(' => self.eat_one_char(Token::LParen),
				')' => self.eat_one_char(Token::RParen),
				'{' => self.eat_one_char(Token::LBrace),
				'}' => self.eat_one_char(Token::RBrace),
				'[' => self.eat_one_char(Token::LSBracket),
				']' => self.eat_one_char(Token::RSBracket),
				',' => self.eat_one_char(Token::Comma),
				':' => self.eat_one_char(Token::Colon),
				';' => self.eat_one_char(Token::Semicolon),
				'.' => self.eat_one_char(Token::Dot),
				'=' => self.eat_one_char(Token::Equals),
				'+' => self.eat_one_char(Token::BinaryOperator(BinaryOperator::Plus)),
				'-' => self.eat_one_char(Token::BinaryOperator(BinaryOperator::Minus)),
				'*' => self.eat_one_char(Token::BinaryOperator(BinaryOperator::Mult)),
				'/' => self.eat_one_char(Token::BinaryOperator(BinaryOperator::Div)),
				'%' => self.eat_one_char(Token::BinaryOperator(BinaryOperator::Rem)),
				'0'..='9' => self.lex_number(),
				c if c.is_alphabetic() => self.lex_ident(),
				c => {
					let start = self.position;
					self.next_char();

					return Err(LexicalError {
						error: LexicalErrorType::UnrecognizedToken { tok: c },
						location: SrcSpan::from(start, self.position),
					});
				}
			},
			None => {
				let position = self.position;

				(position, Token::Eof, position)
			}
		};

		Ok(span)
	}

	fn next_char(&mut self) -> Option<char> {
		let ch = self.ch;

		let next = match self.input.next() {
			Some((pos, ch)) => {
				self.position = self.next_position;
				self.next_position = pos;

				Some(ch)
			},
			None => {
				self.position = self.next_position;
				if self.next_ch.is_some() {
					self.next_position += self.next_ch.map_or(1, |c| c.len_utf8() as u32);
				}

				None
			}
		};

		self.ch = self.next_ch;
		self.next_ch = next;

		ch
	}

	fn eat_one_char(&mut self, token: Token) -> Spanned {
		let start_pos = self.position;
		self.next_char();
		let end_pos = self.position;

		(start_pos, token, end_pos)
	}

	fn lex_ident(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut ident = String::new();

		while let Some(ch) = self.ch.filter(|ch| ch.is_alphabetic()) {
			ident.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		match str_to_keyword(&ident) {
			Some(keyword) => (start_pos, keyword, end_pos),
			None => (start_pos, Token::Ident(ident), end_pos),
		}
	}

	fn lex_number(&mut self) -> Spanned {
		let start_pos = self.position;
		let mut value = String::new();

		while let Some(ch) = self.ch.filter(|ch| ch.is_ascii_digit()) {
			value.push(ch);
			self.next_char();
		}

		let end_pos = self.position;

		(start_pos, Token::Number(value), end_pos)
	}
}

impl<T: Iterator<Item = (u32, char)>> Iterator for Lexer<T> {
	type Item = LexResult;

	fn next(&mut self) -> Option<Self::Item> {
		Some(self.next_token())
	}
}

/// Lexes the whole of `src`, stopping after the first `Eof`.
pub fn tokenize(src: &str) -> Result<Vec<Spanned>, LexicalError> {
	let mut lexer = Lexer::new(src.char_indices().map(|(i, c)| (i as u32, c)));
	let mut tokens = vec![];

	loop {
		let spanned = lexer.next_token()?;
		let is_eof = spanned.1 == Token::Eof;

		tokens.push(spanned);

		if is_eof {
			return Ok(tokens);
		}
	}
}
