use strum::EnumCount;

use crate::{
    ast::ast::{Expr, Stmt},
    lexer::{lexer::TokenSource, tokens::TokenKind},
};

use super::{expr::*, parser::Parser, stmt::*};

/// Operator precedence, weakest first.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Lowest,
    Equals,     // == !=
    Comparison, // < >
    Sum,        // + -
    Product,    // * /
    Prefix,     // -x !x
    Call,       // f(x)
}

pub type StmtHandler<S> = fn(&mut Parser<S>) -> Option<Stmt>;
pub type NUDHandler<S> = fn(&mut Parser<S>) -> Option<Expr>;
pub type LEDHandler<S> = fn(&mut Parser<S>, Expr, BindingPower) -> Option<Expr>;

pub fn create_token_lookups<S: TokenSource>(parser: &mut Parser<S>) {
    // Equality
    parser.led(TokenKind::Equals, BindingPower::Equals, parse_infix_expr);
    parser.led(TokenKind::NotEquals, BindingPower::Equals, parse_infix_expr);

    // Comparison
    parser.led(TokenKind::Less, BindingPower::Comparison, parse_infix_expr);
    parser.led(TokenKind::Greater, BindingPower::Comparison, parse_infix_expr);

    // Additive and multiplicative
    parser.led(TokenKind::Plus, BindingPower::Sum, parse_infix_expr);
    parser.led(TokenKind::Minus, BindingPower::Sum, parse_infix_expr);
    parser.led(TokenKind::Asterisk, BindingPower::Product, parse_infix_expr);
    parser.led(TokenKind::Slash, BindingPower::Product, parse_infix_expr);

    // Literals and symbols
    parser.nud(TokenKind::Identifier, parse_identifier_expr);
    parser.nud(TokenKind::Integer, parse_integer_expr);
    parser.nud(TokenKind::Bang, parse_prefix_expr);
    parser.nud(TokenKind::Minus, parse_prefix_expr);
    parser.nud(TokenKind::OpenParen, parse_grouping_expr);

    // Statements
    parser.stmt(TokenKind::Let, parse_let_stmt);
    parser.stmt(TokenKind::Return, parse_return_stmt);
}

// Lookup tables inside parser struct, indexed by `TokenKind::index`
pub type StmtLookup<S> = [Option<StmtHandler<S>>; TokenKind::COUNT];
pub type NUDLookup<S> = [Option<NUDHandler<S>>; TokenKind::COUNT];
pub type LEDLookup<S> = [Option<LEDHandler<S>>; TokenKind::COUNT];
pub type BPLookup = [BindingPower; TokenKind::COUNT];
