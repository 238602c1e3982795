use thiserror::Error;
use tracing::debug;

use crate::lexer::tokens::TokenKind;

/// Every kind of problem the parser can run into.
///
/// The `Display` text is exactly what ends up in [`Diagnostics`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorImpl {
    #[error("no prefix parse function for {kind} found")]
    NoPrefixParseFunction { kind: TokenKind },
    #[error("expected next token to be {expected}, got {received} instead")]
    UnexpectedToken {
        expected: TokenKind,
        received: TokenKind,
    },
    #[error("could not parse {token:?} as integer")]
    IntegerParseError { token: String },
    #[error("expression nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },
}

impl ErrorImpl {
    pub fn get_error_name(&self) -> &str {
        match self {
            ErrorImpl::NoPrefixParseFunction { .. } => "NoPrefixParseFunction",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::IntegerParseError { .. } => "IntegerParseError",
            ErrorImpl::NestingTooDeep { .. } => "NestingTooDeep",
        }
    }
}

/// Append-only list of human readable parse errors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error. Never fails and never stops the parse.
    pub fn report(&mut self, error: ErrorImpl) {
        debug!(kind = error.get_error_name(), %error, "parse diagnostic recorded");
        self.messages.push(error.to_string());
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}
