use std::io::Write;

use ember_core::parser::prelude::parse_program;

const PROMPT: &str = "parse> ";

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
			line => match parse_program(line) {
				Ok(program) => println!("{}", program),
				Err(err) => {
					let (message, notes) = err.details();

					println!("[at {}] Parse error: {}.", err.span, message);
					if !notes.is_empty() {
						println!("\t{}", notes.join("\n\t"));
					}
				}
			}
		}
	}
}
