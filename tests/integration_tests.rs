//! Integration tests for the parser front-end.
//!
//! These tests drive the public API end to end: source text through the
//! lexer and parser, custom token sources, and the render/parse round trip.

use interpreter::{
    lexer::tokens::{Token, TokenKind},
    parse, parse_source, tokenize, Expr, Lexer, Node, ParserConfig, Stmt, TokenSource,
    TokenStream,
};
use proptest::prelude::*;

const KEYWORDS: [&str; 7] = ["fn", "let", "true", "false", "if", "else", "return"];
const OPERATORS: [&str; 8] = ["+", "-", "*", "/", "<", ">", "==", "!="];

fn render(source: &str) -> String {
    let (program, errors) = parse_source(source, ParserConfig::default());
    assert!(errors.is_empty(), "errors for {:?}: {:?}", source, errors);
    program.to_string()
}

#[test]
fn test_parse_mixed_program() {
    let source = "
        let five = 5;
        let ten = 10;
        return five;
        five + ten * 2;
        !ready
    ";
    let (program, errors) = parse_source(source, ParserConfig::default());

    assert!(errors.is_empty());
    assert_eq!(program.len(), 5);
    assert_eq!(program.token_literal(), "let");
    assert!(matches!(program.statements[2], Stmt::Return(_)));
    assert_eq!(program.statements[3].to_string(), "(five + (ten * 2))");
    assert_eq!(program.statements[4].to_string(), "(!ready)");
}

#[test]
fn test_parse_mixed_program_with_values() {
    let config = ParserConfig {
        parse_statement_values: true,
        ..ParserConfig::default()
    };
    let (program, errors) = parse_source("let a = -b * c; return a == 1;", config);

    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "let a = ((-b) * c);\nreturn (a == 1);");
}

#[test]
fn test_partial_tree_with_diagnostics() {
    let (program, errors) = parse_source("let x 5; let = 1; y + ;", ParserConfig::default());

    assert!(errors.len() >= 2);
    assert!(errors[0].starts_with("expected next token to be Assign"));
    // Everything that could be built is still there
    assert!(program
        .iter()
        .any(|stmt| stmt.to_string() == "5"));
}

#[test]
fn test_hex_literal_keeps_text() {
    let (program, errors) = parse_source("0x10 + 1", ParserConfig::default());

    assert!(errors.is_empty());
    let Stmt::Expression(stmt) = &program.statements[0] else {
        panic!("expected expression statement");
    };
    let Expr::Infix(infix) = &stmt.expression else {
        panic!("expected infix expression");
    };
    assert!(matches!(infix.left.as_ref(), Expr::Integer(int) if int.value == 16));
    assert_eq!(program.to_string(), "(0x10 + 1)");
}

#[test]
fn test_parse_pre_lexed_tokens() {
    let tokens = tokenize("a * (b + c);");
    let (program, errors) = parse(TokenStream::new(tokens));

    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "(a * (b + c))");
}

/// Counts how often it is asked for a token after running dry.
struct CountingSource {
    tokens: std::vec::IntoIter<Token>,
    pulls_after_eof: usize,
}

impl TokenSource for CountingSource {
    fn next_token(&mut self) -> Token {
        self.tokens.next().unwrap_or_else(|| {
            self.pulls_after_eof += 1;
            Token::eof()
        })
    }
}

#[test]
fn test_custom_token_source_terminates_without_terminator() {
    let mut source = CountingSource {
        tokens: vec![
            Token::new(TokenKind::Let, "let"),
            Token::new(TokenKind::Identifier, "x"),
            Token::new(TokenKind::Assign, "="),
            Token::new(TokenKind::Integer, "1"),
            Token::new(TokenKind::Plus, "+"),
        ]
        .into_iter(),
        pulls_after_eof: 0,
    };
    let (program, errors) = parse(&mut source);

    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "let x = ;");
    assert!(source.pulls_after_eof < 8);
}

#[test]
fn test_lexer_is_a_token_source() {
    let (program, errors) = parse(Lexer::new("!-a"));

    assert!(errors.is_empty());
    assert_eq!(program.to_string(), "(!(-a))");
}

fn identifier() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,6}".prop_filter("keywords are not identifiers", |name| {
        !KEYWORDS.contains(&name.as_str())
    })
}

fn atom() -> impl Strategy<Value = String> {
    prop_oneof![
        identifier(),
        (0..=i64::MAX).prop_map(|value| value.to_string()),
    ]
}

fn operand() -> impl Strategy<Value = String> {
    ("[!-]{0,2}", atom()).prop_map(|(prefixes, atom)| format!("{}{}", prefixes, atom))
}

/// Unparenthesised infix chains such as `a + -b * 3 == c`.
fn flat_expression() -> impl Strategy<Value = String> {
    (
        operand(),
        prop::collection::vec((prop::sample::select(OPERATORS.to_vec()), operand()), 0..8),
    )
        .prop_map(|(first, rest)| {
            rest.into_iter().fold(first, |source, (operator, operand)| {
                format!("{} {} {}", source, operator, operand)
            })
        })
}

#[derive(Debug, Clone)]
enum Tree {
    Atom(String),
    Prefix(&'static str, Box<Tree>),
    Infix(Box<Tree>, &'static str, Box<Tree>),
}

impl std::fmt::Display for Tree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Tree::Atom(atom) => write!(f, "{}", atom),
            Tree::Prefix(operator, right) => write!(f, "({}{})", operator, right),
            Tree::Infix(left, operator, right) => write!(f, "({} {} {})", left, operator, right),
        }
    }
}

fn tree() -> impl Strategy<Value = Tree> {
    atom().prop_map(Tree::Atom).prop_recursive(6, 48, 2, |inner| {
        prop_oneof![
            (prop::sample::select(vec!["!", "-"]), inner.clone())
                .prop_map(|(operator, right)| Tree::Prefix(operator, Box::new(right))),
            (inner.clone(), prop::sample::select(OPERATORS.to_vec()), inner).prop_map(
                |(left, operator, right)| Tree::Infix(Box::new(left), operator, Box::new(right))
            ),
        ]
    })
}

proptest! {
    #[test]
    fn test_render_parse_is_idempotent(source in flat_expression()) {
        let first = render(&source);
        let second = render(&first);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_fully_parenthesized_source_renders_unchanged(tree in tree()) {
        let source = tree.to_string();

        prop_assert_eq!(render(&source), source);
    }

    #[test]
    fn test_flat_expression_is_single_statement(source in flat_expression()) {
        let (program, errors) = parse_source(&source, ParserConfig::default());

        prop_assert!(errors.is_empty());
        prop_assert_eq!(program.len(), 1);
    }
}
