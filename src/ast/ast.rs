use std::fmt::{Debug, Display};

use super::{
    expressions::{IdentifierExpr, InfixExpr, IntegerExpr, PrefixExpr},
    statements::{ExpressionStmt, LetStmt, ReturnStmt},
};

/// Node Trait
///
/// Implemented by every AST entity. `Display` must reconstruct source text
/// and depend only on the node's own fields.
pub trait Node: Display + Debug {
    /// Returns the literal text of the token the node was built from.
    fn token_literal(&self) -> &str;
}

/// Statement
///
/// Every statement kind the parser can produce.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetStmt),
    Return(ReturnStmt),
    Expression(ExpressionStmt),
}

impl Node for Stmt {
    fn token_literal(&self) -> &str {
        match self {
            Stmt::Let(stmt) => stmt.token_literal(),
            Stmt::Return(stmt) => stmt.token_literal(),
            Stmt::Expression(stmt) => stmt.token_literal(),
        }
    }
}

impl Display for Stmt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stmt::Let(stmt) => write!(f, "{}", stmt),
            Stmt::Return(stmt) => write!(f, "{}", stmt),
            Stmt::Expression(stmt) => write!(f, "{}", stmt),
        }
    }
}

/// Expression
///
/// Every expression kind the parser can produce. Composite variants own
/// their operands through `Box`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Identifier(IdentifierExpr),
    Integer(IntegerExpr),
    Prefix(PrefixExpr),
    Infix(InfixExpr),
}

impl Node for Expr {
    fn token_literal(&self) -> &str {
        match self {
            Expr::Identifier(expr) => expr.token_literal(),
            Expr::Integer(expr) => expr.token_literal(),
            Expr::Prefix(expr) => expr.token_literal(),
            Expr::Infix(expr) => expr.token_literal(),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Identifier(expr) => write!(f, "{}", expr),
            Expr::Integer(expr) => write!(f, "{}", expr),
            Expr::Prefix(expr) => write!(f, "{}", expr),
            Expr::Infix(expr) => write!(f, "{}", expr),
        }
    }
}

/// Program
///
/// The root of the tree. Owns every top-level statement in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub statements: Vec<Stmt>,
}

impl Program {
    pub fn iter(&self) -> std::slice::Iter<'_, Stmt> {
        self.statements.iter()
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Node for Program {
    fn token_literal(&self) -> &str {
        self.statements
            .first()
            .map(|stmt| stmt.token_literal())
            .unwrap_or("")
    }
}

/// One statement per line, so the rendered program re-parses into the same
/// statements.
impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (index, stmt) in self.statements.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", stmt)?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Stmt;
    type IntoIter = std::slice::Iter<'a, Stmt>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}
