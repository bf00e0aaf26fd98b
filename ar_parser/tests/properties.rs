mod common;

use proptest::prelude::*;
use ar_parser::{Entry, FailureKind, Grammar, GrammarBuilder, MatcherId, NodeType, ParseCursor, Parser, ParserConfig};
use ar_parser::expr::*;
use ar_token::{Position, Token};
use common::Kind;

fn words_strategy() -> impl Strategy<Value = Vec<&'static str>> {
    prop::collection::vec(prop::sample::select(vec!["a", "b", "c", "x"]), 0..16)
}

fn tokens(words: &[&str]) -> Vec<Token<Kind>> {
    words.iter()
        .enumerate()
        .map(|(i, w)| Token::new(Kind::Ident, *w, Position::with_line_and_column(0, 2 * i)))
        .collect()
}

/// A grammar that backtracks a lot on the four-letter alphabet.
fn backtracking_grammar() -> (Grammar<Kind>, Entry) {
    let mut b = GrammarBuilder::new();
    let start = b.define("start", o2n(choice(vec![
        seq(vec!["a", "b"]),
        seq(vec!["a", "c"]),
        rule_ref("pair"),
        till("x"),
    ]))).id();
    b.define("pair", seq(vec![any_token(), lit("c")])).adapter("Pair");
    (b.build().unwrap(), Entry::Rule(start))
}

fn anonymous(expr: Expr<Kind>) -> (Grammar<Kind>, MatcherId) {
    let mut b = GrammarBuilder::new();
    let id = b.intern(expr);
    (b.build().unwrap(), id)
}

proptest! {
    #[test]
    fn parsing_is_deterministic(words in words_strategy()) {
        let (grammar, entry) = backtracking_grammar();
        let parser = Parser::new(grammar, entry).with_config(ParserConfig{ require_complete: false });
        let toks = tokens(&words);
        prop_assert_eq!(parser.parse(&toks), parser.parse(&toks));
    }

    #[test]
    fn failure_restores_the_cursor(words in words_strategy()) {
        let (grammar, entry) = anonymous(seq(vec!["a", "b", "c"]));
        let toks = tokens(&words);
        let mut cursor = ParseCursor::new(&toks);
        match grammar.match_at(entry, &mut cursor) {
            Ok(tree) => {
                prop_assert_eq!(cursor.position(), 3);
                prop_assert_eq!(&words[..3], &["a", "b", "c"][..]);
                prop_assert_eq!(tree.root().num_children(), 3);
            },
            Err(_) => {
                prop_assert_eq!(cursor.position(), 0);
            },
        }
        prop_assert_eq!(cursor.depth(), 0);
    }

    #[test]
    fn leaves_are_the_consumed_tokens(words in words_strategy()) {
        let (grammar, entry) = backtracking_grammar();
        let toks = tokens(&words);
        let mut cursor = ParseCursor::new(&toks);
        let tree = grammar.match_at(entry, &mut cursor).unwrap();
        let consumed: Vec<&Token<Kind>> = toks[..cursor.position()].iter().collect();
        let leaves: Vec<&Token<Kind>> = tree.tokens().collect();
        prop_assert_eq!(leaves, consumed);
    }

    #[test]
    fn till_consumes_through_the_first_delimiter(words in words_strategy()) {
        let (grammar, entry) = anonymous(till("x"));
        let toks = tokens(&words);
        let mut cursor = ParseCursor::new(&toks);
        let result = grammar.match_at(entry, &mut cursor);
        match words.iter().position(|w| *w == "x") {
            Some(index) => {
                let tree = result.unwrap();
                prop_assert_eq!(cursor.position(), index + 1);
                prop_assert_eq!(tree.root().num_children(), index + 1);
            },
            None => {
                let failure = result.unwrap_err();
                prop_assert_eq!(failure.kind, FailureKind::EndOfStream);
                prop_assert_eq!(cursor.position(), 0);
            },
        }
    }

    #[test]
    fn selections_are_in_document_order(words in words_strategy()) {
        let (grammar, entry) = backtracking_grammar();
        let pair = grammar.rule("pair").unwrap();
        let toks = tokens(&words);
        let mut cursor = ParseCursor::new(&toks);
        let tree = grammar.match_at(entry, &mut cursor).unwrap();

        let all = tree.select().descendants();
        prop_assert_eq!(all.size(), tree.len() - 1);
        let selections = vec![
            all.clone(),
            all.parent(),
            tree.select().descendants_of(NodeType::Token(Kind::Ident)).parent(),
            tree.select().descendants_of(pair).children(),
            all.next_sibling(),
            all.previous_sibling(),
            all.ancestors(),
        ];
        for select in &selections {
            let ids: Vec<_> = select.iter().map(|n| n.id()).collect();
            prop_assert!(ids.windows(2).all(|w| w[0] < w[1]));
        }
        for node in all.iter().filter(|n| n.is(pair)) {
            prop_assert_eq!(node.adapter(), Some("Pair"));
            prop_assert_eq!(node.num_children(), 2);
        }
    }
}
