use std::collections::VecDeque;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::trace;

use crate::{MK_DEFAULT_HANDLER, MK_TOKEN};

use super::tokens::{Token, TokenKind, RESERVED_LOOKUP};

pub type RegexHandler = fn(&mut Lexer, &Regex);

pub struct RegexPattern {
    regex: Regex,
    handler: RegexHandler,
}

lazy_static! {
    // Order matters: the first pattern matching at the cursor wins.
    static ref PATTERNS: Vec<RegexPattern> = vec![
        RegexPattern { regex: Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*").unwrap(), handler: symbol_handler },
        RegexPattern { regex: Regex::new("^(0[xX][0-9a-fA-F]+|0[oO][0-7]+|0[bB][01]+|[0-9]+)").unwrap(), handler: integer_handler },
        RegexPattern { regex: Regex::new("^\\s+").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^//[^\n]*").unwrap(), handler: skip_handler },
        RegexPattern { regex: Regex::new("^==").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Equals, "==") },
        RegexPattern { regex: Regex::new("^!=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::NotEquals, "!=") },
        RegexPattern { regex: Regex::new("^!").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Bang, "!") },
        RegexPattern { regex: Regex::new("^=").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Assign, "=") },
        RegexPattern { regex: Regex::new("^<").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Less, "<") },
        RegexPattern { regex: Regex::new("^>").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Greater, ">") },
        RegexPattern { regex: Regex::new("^\\+").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Plus, "+") },
        RegexPattern { regex: Regex::new("^-").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Minus, "-") },
        RegexPattern { regex: Regex::new("^\\*").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Asterisk, "*") },
        RegexPattern { regex: Regex::new("^/").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Slash, "/") },
        RegexPattern { regex: Regex::new("^,").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Comma, ",") },
        RegexPattern { regex: Regex::new("^;").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::Semicolon, ";") },
        RegexPattern { regex: Regex::new("^\\(").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenParen, "(") },
        RegexPattern { regex: Regex::new("^\\)").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseParen, ")") },
        RegexPattern { regex: Regex::new("^\\{").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::OpenCurly, "{") },
        RegexPattern { regex: Regex::new("^\\}").unwrap(), handler: MK_DEFAULT_HANDLER!(TokenKind::CloseCurly, "}") },
    ];
}

/// Anything the parser can pull tokens from.
///
/// Once the input is exhausted, implementations must keep returning an
/// [`TokenKind::EOF`] token on every call.
pub trait TokenSource {
    fn next_token(&mut self) -> Token;
}

impl<T: TokenSource + ?Sized> TokenSource for &mut T {
    fn next_token(&mut self) -> Token {
        (**self).next_token()
    }
}

/// Pull-based lexer over a source string.
#[derive(Clone)]
pub struct Lexer {
    tokens: VecDeque<Token>,
    source: String,
    pos: usize,
}

impl Lexer {
    pub fn new(source: impl Into<String>) -> Lexer {
        Lexer {
            tokens: VecDeque::new(),
            source: source.into(),
            pos: 0,
        }
    }

    pub fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push_back(token);
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Runs the first matching pattern at the cursor, or queues an
    /// `Illegal` token for the character there.
    fn step(&mut self) {
        for pattern in PATTERNS.iter() {
            if pattern.regex.is_match(self.remainder()) {
                (pattern.handler)(self, &pattern.regex);
                return;
            }
        }

        if let Some(ch) = self.remainder().chars().next() {
            self.push(MK_TOKEN!(TokenKind::Illegal, ch.to_string()));
            self.advance_n(ch.len_utf8());
        }
    }
}

impl TokenSource for Lexer {
    fn next_token(&mut self) -> Token {
        while self.tokens.is_empty() && !self.at_eof() {
            self.step();
        }

        let token = self.tokens.pop_front().unwrap_or_else(Token::eof);
        trace!(kind = %token.kind, value = %token.value, "lexed token");
        token
    }
}

/// A token source over an already materialised list of tokens.
///
/// Useful when tokens come from somewhere other than [`Lexer`], or when a
/// test needs a token the lexer would never produce.
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: VecDeque<Token>,
}

impl TokenStream {
    pub fn new(tokens: impl IntoIterator<Item = Token>) -> Self {
        TokenStream {
            tokens: tokens.into_iter().collect(),
        }
    }
}

impl TokenSource for TokenStream {
    fn next_token(&mut self) -> Token {
        self.tokens.pop_front().unwrap_or_else(Token::eof)
    }
}

fn matched_text(lexer: &Lexer, regex: &Regex) -> String {
    regex
        .find(lexer.remainder())
        .map(|found| found.as_str().to_string())
        .unwrap_or_default()
}

fn integer_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    lexer.advance_n(matched.len());
    lexer.push(MK_TOKEN!(TokenKind::Integer, matched));
}

fn skip_handler(lexer: &mut Lexer, regex: &Regex) {
    let matched = matched_text(lexer, regex);
    lexer.advance_n(matched.len());
}

fn symbol_handler(lexer: &mut Lexer, regex: &Regex) {
    let value = matched_text(lexer, regex);
    lexer.advance_n(value.len());

    if let Some(kind) = RESERVED_LOOKUP.get(value.as_str()) {
        lexer.push(MK_TOKEN!(*kind, value));
    } else {
        lexer.push(MK_TOKEN!(TokenKind::Identifier, value));
    }
}

/// Lexes the whole source. The returned list always ends with a single
/// `EOF` token.
pub fn tokenize(source: impl Into<String>) -> Vec<Token> {
    let mut lex = Lexer::new(source);
    let mut tokens = vec![];

    loop {
        let token = lex.next_token();
        let done = token.is(TokenKind::EOF);
        tokens.push(token);

        if done {
            return tokens;
        }
    }
}
