//! Parser implementation for building the Abstract Syntax Tree.
//!
//! This module contains the main Parser struct and the top-level parsing
//! entry points. The parser keeps a two-token window (current and peek)
//! over a [`TokenSource`] and dispatches through fixed-size lookup tables
//! for:
//! - Statement handlers
//! - NUD (null denotation) handlers for prefix expressions
//! - LED (left denotation) handlers for infix expressions
//! - Binding powers for operator precedence

use strum::EnumCount;
use tracing::{debug, trace};

use crate::{
    ast::ast::Program,
    errors::errors::{Diagnostics, ErrorImpl},
    lexer::{
        lexer::TokenSource,
        tokens::{Token, TokenKind},
    },
};

use super::{
    lookups::{
        create_token_lookups, BPLookup, BindingPower, LEDHandler, LEDLookup, NUDHandler,
        NUDLookup, StmtHandler, StmtLookup,
    },
    stmt::parse_stmt,
};

/// Expression nesting allowed by [`ParserConfig::default`].
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Knobs that change what the parser builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Parse the right-hand side of `let` and `return` into the statement's
    /// value. When off, those statements skip to the next `;` and carry no
    /// value.
    pub parse_statement_values: bool,
    /// Deepest expression nesting accepted before the expression is given
    /// up with a diagnostic. Bounds both parser recursion and tree height.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            parse_statement_values: false,
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

/// The main parser structure that maintains parsing state.
///
/// One parser consumes exactly one token stream.
pub struct Parser<S: TokenSource> {
    /// Where tokens are pulled from
    source: S,
    /// The token being looked at
    current: Token,
    /// One token of lookahead
    peek: Token,
    config: ParserConfig,
    /// Expression levels currently open
    depth: usize,
    /// Lookup table for statement parsing handlers
    stmt_lookup: StmtLookup<S>,
    /// Lookup table for null denotation (prefix) expression handlers
    nud_lookup: NUDLookup<S>,
    /// Lookup table for left denotation (infix) expression handlers
    led_lookup: LEDLookup<S>,
    /// Lookup table for expression binding powers (precedence)
    binding_power_lookup: BPLookup,
    diagnostics: Diagnostics,
}

impl<S: TokenSource> Parser<S> {
    /// Creates a parser with the default configuration and primes the
    /// current and peek tokens.
    pub fn new(source: S) -> Self {
        Self::with_config(source, ParserConfig::default())
    }

    pub fn with_config(source: S, config: ParserConfig) -> Self {
        let mut parser = Parser {
            source,
            current: Token::eof(),
            peek: Token::eof(),
            config,
            depth: 0,
            stmt_lookup: [None; TokenKind::COUNT],
            nud_lookup: [None; TokenKind::COUNT],
            led_lookup: [None; TokenKind::COUNT],
            binding_power_lookup: [BindingPower::Lowest; TokenKind::COUNT],
            diagnostics: Diagnostics::new(),
        };
        create_token_lookups(&mut parser);

        parser.advance();
        parser.advance();

        debug!(?config, first = %parser.current, "parser created");
        parser
    }

    /// Returns the current token without advancing.
    pub fn current_token(&self) -> &Token {
        &self.current
    }

    /// Returns the kind of the current token.
    pub fn current_token_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Returns the lookahead token.
    pub fn peek_token(&self) -> &Token {
        &self.peek
    }

    pub fn peek_token_kind(&self) -> TokenKind {
        self.peek.kind
    }

    pub fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Shifts the peek token into the current slot and pulls a new peek.
    pub fn advance(&mut self) {
        let next = self.source.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    /// Advances only if the peek token is of the expected kind; otherwise
    /// records an unexpected-token diagnostic and leaves the window as is.
    pub fn expect_peek(&mut self, expected_kind: TokenKind) -> bool {
        if self.peek_is(expected_kind) {
            self.advance();
            true
        } else {
            self.report(ErrorImpl::UnexpectedToken {
                expected: expected_kind,
                received: self.peek.kind,
            });
            false
        }
    }

    pub fn binding_power(&self, kind: TokenKind) -> BindingPower {
        self.binding_power_lookup[kind.index()]
    }

    pub fn current_binding_power(&self) -> BindingPower {
        self.binding_power(self.current.kind)
    }

    pub fn peek_binding_power(&self) -> BindingPower {
        self.binding_power(self.peek.kind)
    }

    pub fn get_stmt(&self, kind: TokenKind) -> Option<StmtHandler<S>> {
        self.stmt_lookup[kind.index()]
    }

    pub fn get_nud(&self, kind: TokenKind) -> Option<NUDHandler<S>> {
        self.nud_lookup[kind.index()]
    }

    pub fn get_led(&self, kind: TokenKind) -> Option<LEDHandler<S>> {
        self.led_lookup[kind.index()]
    }

    /// Registers a left denotation (infix) handler for a token.
    ///
    /// # Arguments
    ///
    /// * `kind` - The token kind to register
    /// * `binding_power` - The precedence/binding power for this operator
    /// * `led_fn` - The handler function for this infix operator
    pub fn led(&mut self, kind: TokenKind, binding_power: BindingPower, led_fn: LEDHandler<S>) {
        self.binding_power_lookup[kind.index()] = binding_power;
        self.led_lookup[kind.index()] = Some(led_fn);
    }

    /// Registers a null denotation (prefix) handler for a token.
    ///
    /// Leaves the binding power table untouched, so a prefix-only token in
    /// peek position still ends the precedence loop.
    pub fn nud(&mut self, kind: TokenKind, nud_fn: NUDHandler<S>) {
        self.nud_lookup[kind.index()] = Some(nud_fn);
    }

    /// Registers a statement handler for a token.
    pub fn stmt(&mut self, kind: TokenKind, stmt_fn: StmtHandler<S>) {
        self.stmt_lookup[kind.index()] = Some(stmt_fn);
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn nesting_depth(&self) -> usize {
        self.depth
    }

    /// Opens one more level of expression nesting.
    ///
    /// At the configured limit this records a diagnostic and returns
    /// `false`, leaving the depth unchanged.
    pub fn enter_nesting(&mut self) -> bool {
        if self.depth >= self.config.max_nesting_depth {
            self.report(ErrorImpl::NestingTooDeep {
                limit: self.config.max_nesting_depth,
            });
            return false;
        }

        self.depth += 1;
        true
    }

    /// Closes every level opened since the depth was `depth`.
    pub fn restore_nesting(&mut self, depth: usize) {
        self.depth = depth;
    }

    pub fn report(&mut self, error: ErrorImpl) {
        self.diagnostics.report(error);
    }

    /// Every diagnostic recorded so far, in order.
    pub fn errors(&self) -> &[String] {
        self.diagnostics.messages()
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    /// Parses statements until the end of input.
    ///
    /// Statements that failed to build are dropped; their diagnostics stay
    /// in [`Parser::errors`]. The program is always returned.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::default();

        while !self.current_is(TokenKind::EOF) {
            trace!(token = %self.current, "dispatching statement");
            if let Some(stmt) = parse_stmt(self) {
                program.statements.push(stmt);
            }
            self.advance();
        }

        debug!(
            statements = program.len(),
            diagnostics = self.diagnostics.len(),
            "parsed program"
        );
        program
    }
}

/// Parses a token stream into a program with the default configuration.
///
/// # Returns
///
/// A tuple containing:
/// - The Program (possibly partial)
/// - Every diagnostic recorded while parsing
pub fn parse<S: TokenSource>(source: S) -> (Program, Vec<String>) {
    parse_with_config(source, ParserConfig::default())
}

pub fn parse_with_config<S: TokenSource>(source: S, config: ParserConfig) -> (Program, Vec<String>) {
    let mut parser = Parser::with_config(source, config);
    let program = parser.parse_program();

    (program, parser.into_diagnostics().into_messages())
}
