use std::fmt::Display;

use crate::lexer::tokens::Token;

use super::{
    ast::{Expr, Node},
    expressions::IdentifierExpr,
};

/// `let <name> = <value>;`
///
/// `value` stays `None` unless the parser was configured to parse
/// statement values.
#[derive(Debug, Clone, PartialEq)]
pub struct LetStmt {
    pub token: Token,
    pub name: IdentifierExpr,
    pub value: Option<Expr>,
}

impl Node for LetStmt {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
}

impl Display for LetStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = ", self.token_literal(), self.name)?;
        if let Some(value) = &self.value {
            write!(f, "{}", value)?;
        }
        write!(f, ";")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReturnStmt {
    pub token: Token,
    pub value: Option<Expr>,
}

impl Node for ReturnStmt {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
}

impl Display for ReturnStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ", self.token_literal())?;
        if let Some(value) = &self.value {
            write!(f, "{}", value)?;
        }
        write!(f, ";")
    }
}

/// A bare expression used as a statement. `token` is the first token of
/// the expression.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub token: Token,
    pub expression: Expr,
}

impl Node for ExpressionStmt {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
}

impl Display for ExpressionStmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.expression)
    }
}
