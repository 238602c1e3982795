use crate::{
    ast::{
        ast::Expr,
        expressions::{IdentifierExpr, InfixExpr, IntegerExpr, PrefixExpr},
    },
    errors::errors::ErrorImpl,
    lexer::{lexer::TokenSource, tokens::TokenKind},
};

use super::{lookups::BindingPower, parser::Parser};

/// Parses an expression whose operators bind tighter than `bp`.
///
/// Every call and every folded infix operator opens a nesting level, so the
/// height of the returned tree stays within a small multiple of
/// [`ParserConfig::max_nesting_depth`](super::parser::ParserConfig).
pub fn parse_expr<S: TokenSource>(parser: &mut Parser<S>, bp: BindingPower) -> Option<Expr> {
    let depth = parser.nesting_depth();
    let expr = parse_nested_expr(parser, bp);
    parser.restore_nesting(depth);

    expr
}

fn parse_nested_expr<S: TokenSource>(parser: &mut Parser<S>, bp: BindingPower) -> Option<Expr> {
    if !parser.enter_nesting() {
        return None;
    }

    // First parse NUD
    let token_kind = parser.current_token_kind();
    let Some(nud) = parser.get_nud(token_kind) else {
        parser.report(ErrorImpl::NoPrefixParseFunction { kind: token_kind });
        return None;
    };

    let mut left = nud(parser)?;

    // While the next operator binds tighter than `bp`, fold it into lhs
    while !parser.peek_is(TokenKind::Semicolon) && parser.peek_binding_power() > bp {
        let Some(led) = parser.get_led(parser.peek_token_kind()) else {
            return Some(left);
        };

        // The folded node sits one level above the old lhs
        if !parser.enter_nesting() {
            return None;
        }

        parser.advance();
        let operator_bp = parser.current_binding_power();
        left = led(parser, left, operator_bp)?;
    }

    Some(left)
}

pub fn parse_identifier_expr<S: TokenSource>(parser: &mut Parser<S>) -> Option<Expr> {
    Some(Expr::Identifier(IdentifierExpr::new(
        parser.current_token().clone(),
    )))
}

pub fn parse_integer_expr<S: TokenSource>(parser: &mut Parser<S>) -> Option<Expr> {
    let token = parser.current_token().clone();

    match parse_integer_literal(&token.value) {
        Some(value) => Some(Expr::Integer(IntegerExpr { token, value })),
        None => {
            parser.report(ErrorImpl::IntegerParseError { token: token.value });
            None
        }
    }
}

/// Converts integer literal text to an `i64`.
///
/// Accepts plain decimal plus `0x`, `0o` and `0b` prefixed forms, with an
/// optional leading sign. Unprefixed digits are always decimal, leading
/// zeros included, and `_` separators are not accepted. Returns `None` for
/// anything else, including values out of range.
pub fn parse_integer_literal(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let (radix, digits) = match unsigned.get(..2) {
        Some("0x" | "0X") => (16, &unsigned[2..]),
        Some("0o" | "0O") => (8, &unsigned[2..]),
        Some("0b" | "0B") => (2, &unsigned[2..]),
        _ => (10, unsigned),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }

    // Parse with the sign attached so i64::MIN stays representable.
    let signed = if negative {
        format!("-{}", digits)
    } else {
        digits.to_string()
    };

    i64::from_str_radix(&signed, radix).ok()
}

pub fn parse_prefix_expr<S: TokenSource>(parser: &mut Parser<S>) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, BindingPower::Prefix)?;

    Some(Expr::Prefix(PrefixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        right: Box::new(right),
    }))
}

pub fn parse_infix_expr<S: TokenSource>(
    parser: &mut Parser<S>,
    left: Expr,
    bp: BindingPower,
) -> Option<Expr> {
    let operator_token = parser.current_token().clone();
    parser.advance();

    let right = parse_expr(parser, bp)?;

    Some(Expr::Infix(InfixExpr {
        operator: operator_token.value.clone(),
        token: operator_token,
        left: Box::new(left),
        right: Box::new(right),
    }))
}

pub fn parse_grouping_expr<S: TokenSource>(parser: &mut Parser<S>) -> Option<Expr> {
    parser.advance();
    let expr = parse_expr(parser, BindingPower::Lowest)?;

    if !parser.expect_peek(TokenKind::CloseParen) {
        return None;
    }

    Some(expr)
}
