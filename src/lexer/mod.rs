//! Lexical analysis module for the front-end.
//!
//! This module contains the reference token source that converts source
//! text into tokens for parsing. It handles:
//!
//! - Tokenization of source text using regex patterns
//! - Recognition of keywords, identifiers, integer literals, and operators
//! - Comments and whitespace handling
//! - The `TokenSource` pull interface the parser consumes

pub mod lexer;
pub mod tokens;
