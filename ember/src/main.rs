mod cli;
mod repl;
mod rlpl;
mod rppl;

use std::{path::PathBuf, process::ExitCode, time::Instant};

use clap::{Parser, Subcommand};
use cli::{print_error, print_failed, print_finished, print_running};
use ember_core::{
    eval::prelude::evaluate,
    session::prelude::Session,
    utils::prelude::Error
};

#[derive(Parser)]
#[command(version, about = "Interpreter for a small expression language")]
struct Cli {
    /// Log interpreter events at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand)]
enum Command {
    /// Parses and evaluates a source file, printing the last value
    Run {
        /// Path of source file
        path: PathBuf,
        /// Print ast before evaluating
        #[arg(long, default_value_t = false)]
        print_ast: bool
    },
    /// Runs Read Eval Print Loop
    Repl,
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Run { path, print_ast } => return run(path, print_ast),
        Command::Repl => repl::start(),
        Command::Rlpl => rlpl::start(),
        Command::Rppl => rppl::start()
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&Error::StdIo { err: err.kind() });
            ExitCode::FAILURE
        }
    }
}

fn run(path: PathBuf, print_ast: bool) -> ExitCode {
    print_running(&path.display().to_string());
    tracing::debug!(path = %path.display(), print_ast, "run");
    let start = Instant::now();

    let mut session = Session::new();

    let result = session.parse_file(&path).and_then(|(program, src)| {
        if print_ast {
            println!("{:#?}", program);
        }

        evaluate(&program, session.env()).map_err(|error| Error::Runtime {
            path: path.clone(),
            src,
            error
        })
    });

    match result {
        Ok(value) => {
            println!("{value}");
            print_finished(Instant::now() - start);
            ExitCode::SUCCESS
        },
        Err(err) => {
            tracing::debug!(error = %err, "run failed");
            print_error(&err);
            print_failed(Instant::now() - start);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) if verbose => EnvFilter::new("debug"),
        Err(_) => EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
        .with(filter)
        .init();
}
