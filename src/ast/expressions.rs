use std::fmt::Display;

use crate::lexer::tokens::Token;

use super::ast::{Expr, Node};

// LITERALS

/// Identifier Expression
/// Represents a name reference in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct IdentifierExpr {
    pub token: Token,
    pub value: String,
}

impl IdentifierExpr {
    pub fn new(token: Token) -> Self {
        IdentifierExpr {
            value: token.value.clone(),
            token,
        }
    }
}

impl Node for IdentifierExpr {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
}

impl Display for IdentifierExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Integer Expression
/// Represents a signed 64-bit integer literal in the AST.
///
/// Renders as the original token text, so `0x10` stays `0x10`.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegerExpr {
    pub token: Token,
    pub value: i64,
}

impl Node for IntegerExpr {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
}

impl Display for IntegerExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token.value)
    }
}

// COMPLEX

/// Prefix Expression
/// Represents `!` or `-` applied to a single operand.
#[derive(Debug, Clone, PartialEq)]
pub struct PrefixExpr {
    pub token: Token,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Node for PrefixExpr {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
}

impl Display for PrefixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}{})", self.operator, self.right)
    }
}

/// Infix Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone, PartialEq)]
pub struct InfixExpr {
    pub token: Token,
    pub left: Box<Expr>,
    pub operator: String,
    pub right: Box<Expr>,
}

impl Node for InfixExpr {
    fn token_literal(&self) -> &str {
        &self.token.value
    }
}

impl Display for InfixExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {} {})", self.left, self.operator, self.right)
    }
}
