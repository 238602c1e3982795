use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser as _;
use interpreter::{tokenize, Lexer, Parser, ParserConfig, DEFAULT_MAX_NESTING_DEPTH};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, clap::Parser)]
#[clap(
    name = "interpreter",
    about = "Parses a source file and prints the syntax tree."
)]
struct Argument {
    /// The input file to parse. Reads standard input when omitted.
    file: Option<PathBuf>,

    /// Parse the right-hand side of `let` and `return` statements.
    #[clap(long = "parse-values")]
    parse_values: bool,

    /// Deepest expression nesting accepted before giving up on it.
    #[clap(long = "max-depth", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: usize,

    /// Prints the token stream before parsing.
    #[clap(long = "tokens")]
    tokens: bool,
}

fn read_input(file: Option<&PathBuf>) -> io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok(source)
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let argument = Argument::parse();

    let source = match read_input(argument.file.as_ref()) {
        Ok(source) => source,
        Err(err) => {
            error!(file = ?argument.file, %err, "failed to read input");
            return ExitCode::FAILURE;
        }
    };

    if argument.tokens {
        for token in tokenize(source.as_str()) {
            println!("{}", token);
        }
    }

    let config = ParserConfig {
        parse_statement_values: argument.parse_values,
        max_nesting_depth: argument.max_depth,
    };
    let mut parser = Parser::with_config(Lexer::new(source), config);
    let program = parser.parse_program();

    if !program.is_empty() {
        println!("{}", program);
    }

    if parser.errors().is_empty() {
        info!(statements = program.len(), "parse succeeded");
        return ExitCode::SUCCESS;
    }

    eprintln!("parser errors:");
    for message in parser.errors() {
        eprintln!("\t{}", message);
    }

    ExitCode::FAILURE
}
