use std::io::Write;

use ember_core::lexer::prelude::{Lexer, Token};

const PROMPT: &str = "lex> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		match input.trim_end_matches(['\n', '\r']) {
			"" => {},
			".exit" => return Ok(()),
			line => {
				let lexer = Lexer::new(line.char_indices().map(|(i, c)| (i as u32, c)));

				for res in lexer {
					match res {
						Ok((start, token, end)) => {
							println!("{start:>4}..{end:<4} {:?}", token);

							if token == Token::Eof {
								break;
							}
						},
						Err(err) => {
							let (message, notes) = err.details();
							println!("[at {}] Lexical Error: {}", err.location.start, message);
							if !notes.is_empty() {
								println!("{}", notes.join("\n"));
							}
							break;
						}
					}
				}
			}
		}
	}
}
