use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use strum_macros::EnumCount;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("fn", TokenKind::Fn);
        map.insert("let", TokenKind::Let);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("return", TokenKind::Return);
        map
    };
}

/// Every kind of token the lexer can produce.
///
/// The discriminant doubles as an index into the parser's handler tables,
/// so variants must stay fieldless.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, EnumCount)]
pub enum TokenKind {
    Illegal,
    EOF,
    Identifier,
    Integer,

    Assign,    // =
    Equals,    // ==
    Bang,      // !
    NotEquals, // !=

    Less,
    Greater,

    Plus,
    Minus,
    Asterisk,
    Slash,

    Comma,
    Semicolon,

    OpenParen,
    CloseParen,
    OpenCurly,
    CloseCurly,

    // Reserved
    Fn,
    Let,
    True,
    False,
    If,
    Else,
    Return,
}

impl TokenKind {
    /// Position of this kind in per-kind lookup tables.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Token {
            kind,
            value: value.into(),
        }
    }

    pub fn eof() -> Self {
        Token::new(TokenKind::EOF, "")
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            TokenKind::Identifier | TokenKind::Integer | TokenKind::Illegal => {
                write!(f, "{} ({})", self.kind, self.value)
            }
            _ => write!(f, "{}", self.kind),
        }
    }
}
