mod common;

use std::sync::Arc;
use std::thread;
use ar_parser::{Grammar, Parser, SyntaxTree};
use common::{Kind, lex, assignments};

fn assert_send_sync<T>() where T : Send + Sync { }

#[test]
fn shared_types_are_thread_safe() {
    assert_send_sync::<Grammar<Kind>>();
    assert_send_sync::<Parser<Kind>>();
    assert_send_sync::<SyntaxTree<Kind>>();
}

#[test]
fn parallel_parses_share_a_grammar() {
    let grammar = Arc::new(assignments());
    let program = grammar.rule("program").unwrap();

    let handles: Vec<_> = vec!["a = 1 ;", "b = ( c + 2 ) ; d = e ;"].into_iter()
        .map(|source| {
            let parser = Parser::new(grammar.clone(), program);
            thread::spawn(move || parser.parse(&lex(source)).map(|tree| tree.to_string()))
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap().unwrap()).collect();

    assert_eq!(results[0], "(program (stmt \"a\" \"=\" \"1\" \";\"))");
    assert_eq!(results[1],
        "(program (stmt \"b\" \"=\" (term \"(\" (expr \"c\" \"+\" \"2\") \")\") \";\") (stmt \"d\" \"=\" \"e\" \";\"))");
    assert_eq!(Arc::strong_count(&grammar), 1);
}
