#![allow(dead_code)]

use ar_parser::{Grammar, GrammarBuilder};
use ar_parser::expr::*;
use ar_token::{Token, TokenKind};

#[derive(TokenKind, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Kind {
    #[ident]
    Ident,

    #[number]
    Number,

    #[token("+")]
    Plus,

    #[token("=")]
    Assign,

    #[token(";")]
    Semicolon,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,
}

pub fn lex(source: &str) -> Vec<Token<Kind>> {
    match Kind::lexer().tokenize(source) {
        Ok(tokens) => tokens,
        Err(err) => panic!("test input does not lex: {}", err),
    }
}

pub fn texts<'a>(tokens: impl Iterator<Item = &'a Token<Kind>>) -> Vec<&'a str> {
    tokens.map(|t| t.text.as_str()).collect()
}

/// program = stmt+
/// stmt    = Ident '=' expr ';'
/// expr    = term ('+' term)*
/// term    = Number | Ident | '(' expr ')'
pub fn assignments() -> Grammar<Kind> {
    let mut b = GrammarBuilder::new();
    b.define("program", one2n(rule_ref("stmt")));
    b.define("stmt", seq(vec![tok(Kind::Ident), lit("="), rule_ref("expr"), lit(";")]))
        .adapter("Assign");
    b.define("expr", seq(vec![rule_ref("term"), o2n(seq(vec![lit("+"), rule_ref("term")]))]))
        .skip_if_one_child();
    b.define("term", choice(vec![
        tok(Kind::Number),
        tok(Kind::Ident),
        seq(vec![lit("("), rule_ref("expr"), lit(")")]),
    ])).skip_if_one_child();
    match b.build() {
        Ok(grammar) => grammar,
        Err(err) => panic!("test grammar is invalid: {}", err),
    }
}

pub fn assert_iter_eq<I1, I2>(mut i1: I1, mut i2: I2)
    where I1 : Iterator, I2 : Iterator,
    <I1 as Iterator>::Item : PartialEq<<I2 as Iterator>::Item> + std::fmt::Debug,
    <I2 as Iterator>::Item : std::fmt::Debug {
    loop {
        match (i1.next(), i2.next()) {
            (Some(a), Some(b)) => assert_eq!(a, b),
            (None, None) => return,
            (Some(a), None) => panic!("RHS terminates early ({:?})!", a),
            (None, Some(b)) => panic!("LHS terminates early ({:?})!", b),
        }
    }
}
