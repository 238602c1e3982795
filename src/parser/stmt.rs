use crate::{
    ast::{
        ast::{Expr, Stmt},
        expressions::IdentifierExpr,
        statements::{ExpressionStmt, LetStmt, ReturnStmt},
    },
    lexer::{lexer::TokenSource, tokens::TokenKind},
    parser::{expr::parse_expr, lookups::BindingPower},
};

use super::parser::Parser;

pub fn parse_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Option<Stmt> {
    match parser.get_stmt(parser.current_token_kind()) {
        Some(stmt_fn) => stmt_fn(parser),
        None => parse_expression_stmt(parser),
    }
}

pub fn parse_expression_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Option<Stmt> {
    let token = parser.current_token().clone();
    let expression = parse_expr(parser, BindingPower::Lowest);

    // The terminator is optional
    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    Some(Stmt::Expression(ExpressionStmt {
        token,
        expression: expression?,
    }))
}

/// Builds `let <name> = <value>;`.
///
/// With statement values on, the token after `=` must start an expression:
/// `let x = ;` records a missing prefix diagnostic for `;` and keeps the
/// statement with no value. `return;` has no such requirement.
pub fn parse_let_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Option<Stmt> {
    let token = parser.current_token().clone();

    if !parser.expect_peek(TokenKind::Identifier) {
        return None;
    }
    let name = IdentifierExpr::new(parser.current_token().clone());

    if !parser.expect_peek(TokenKind::Assign) {
        return None;
    }

    let value = if parser.config().parse_statement_values {
        parser.advance();
        parse_value(parser)
    } else {
        skip_to_terminator(parser);
        None
    };

    Some(Stmt::Let(LetStmt { token, name, value }))
}

pub fn parse_return_stmt<S: TokenSource>(parser: &mut Parser<S>) -> Option<Stmt> {
    let token = parser.current_token().clone();
    parser.advance();

    let at_terminator =
        parser.current_is(TokenKind::Semicolon) || parser.current_is(TokenKind::EOF);

    let value = if parser.config().parse_statement_values && !at_terminator {
        parse_value(parser)
    } else {
        skip_to_terminator(parser);
        None
    };

    Some(Stmt::Return(ReturnStmt { token, value }))
}

/// Parses a statement's right-hand side and consumes an optional `;`.
fn parse_value<S: TokenSource>(parser: &mut Parser<S>) -> Option<Expr> {
    let value = parse_expr(parser, BindingPower::Lowest);

    if parser.peek_is(TokenKind::Semicolon) {
        parser.advance();
    }

    value
}

/// Advances until the current token is `;` or the input is exhausted.
pub fn skip_to_terminator<S: TokenSource>(parser: &mut Parser<S>) {
    while !parser.current_is(TokenKind::Semicolon) && !parser.current_is(TokenKind::EOF) {
        parser.advance();
    }
}
