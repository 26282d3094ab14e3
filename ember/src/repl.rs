use std::io::Write;

use ember_core::session::prelude::Session;

use crate::cli::print_error;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	ctrlc::set_handler(|| {
		println!("\nBye!");
		std::process::exit(0);
	}).map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))?;

	let stdin = std::io::stdin();
	let mut session = Session::new();

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
				tracing::debug!(input = line, "eval");

				match session.eval(line) {
					Ok(value) => println!("{value}"),
					Err(err) => {
						tracing::debug!(error = %err, "input failed");
						print_error(&err)
					}
				}
			}
		}
	}
}
