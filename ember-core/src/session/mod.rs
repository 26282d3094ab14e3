#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::Session;
}

use std::{io::{BufReader, Read}, path::{Path, PathBuf}};

use utf8_chars::BufReadCharsExt;

use crate::{
    environment::prelude::{Environment, Value},
    eval::prelude::evaluate,
    parser::prelude::{parse_program, parse_program_from_stream, Program},
    utils::prelude::Error
};

const REPL_PATH: &str = "<repl>";

/// A global environment that outlives individual inputs.
///
/// Bindings made by one successful `eval` are visible to the next; a failing
/// input keeps whatever it managed to declare before the error.
#[derive(Debug)]
pub struct Session {
    env: Environment,
    path: PathBuf
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            env: Environment::global(),
            path: PathBuf::from(REPL_PATH)
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Path diagnostics are reported under.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn eval(&mut self, src: &str) -> Result<Value, Error> {
        let program = parse_program(src).map_err(|error| Error::Parse {
            path: self.path.clone(),
            src: src.to_string(),
            error
        })?;

        self.eval_program(&program, src)
    }

    pub fn run_file(&mut self, path: impl AsRef<Path>) -> Result<Value, Error> {
        let (program, src) = self.parse_file(path.as_ref())?;

        self.eval_program(&program, &src)
    }

    /// Parses the file at `path`, switching diagnostics over to it.
    pub fn parse_file(&mut self, path: &Path) -> Result<(Program, String), Error> {
        let file = std::fs::File::open(path)
            .map_err(|err| Error::StdIo { err: err.kind() })?;

        self.path = path.to_path_buf();

        let file_size = file.metadata()
            .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

        let mut src = String::with_capacity(file_size);
        let mut read_error = None;
        let mut reader = BufReader::new(file);

        let parsed = {
            let stream = reader.chars()
                .map_while(|c| match c {
                    Ok(c) => {
                        src.push(c);
                        Some(c)
                    },
                    Err(err) => {
                        read_error = Some(err.kind());
                        None
                    }
                });

            parse_program_from_stream(stream)
        };

        if let Some(err) = read_error {
            return Err(Error::StdIo { err });
        }

        match parsed {
            Ok(program) => {
                tracing::debug!(path = %path.display(), statements = program.statements.len(), "parsed");

                Ok((program, src))
            },
            Err(error) => {
                // The parser stops early, the rest is still needed for the report.
                reader.read_to_string(&mut src)
                    .map_err(|err| Error::StdIo { err: err.kind() })?;

                Err(Error::Parse { path: self.path.clone(), src, error })
            }
        }
    }

    fn eval_program(&self, program: &Program, src: &str) -> Result<Value, Error> {
        evaluate(program, &self.env).map_err(|error| Error::Runtime {
            path: self.path.clone(),
            src: src.to_string(),
            error
        })
    }
}
