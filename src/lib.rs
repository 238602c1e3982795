#![allow(clippy::module_inception)]

//! Front-end of a small language toolchain: a token source and a Pratt
//! parser producing a fully owned AST plus a list of diagnostics.

pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

pub use ast::ast::{Expr, Node, Program, Stmt};
pub use lexer::lexer::{tokenize, Lexer, TokenSource, TokenStream};
pub use parser::parser::{
    parse, parse_with_config, Parser, ParserConfig, DEFAULT_MAX_NESTING_DEPTH,
};

/// Lexes and parses `source` with the given configuration.
pub fn parse_source(source: &str, config: ParserConfig) -> (Program, Vec<String>) {
    parse_with_config(Lexer::new(source), config)
}
