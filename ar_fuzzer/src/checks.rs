/**
 * The invariants checked on every generated grammar and token stream.
 */

use thiserror::Error;
use ar_parser::{AstNode, Grammar, GrammarError, ParseCursor, RuleId};
use ar_token::Token;
use crate::token_gen::Sym;

#[derive(Debug, Error)]
pub enum Violation {
    #[error("two matches of the same input gave different results")]
    Nondeterministic,

    #[error("failed match left the cursor at {position} with {depth} open checkpoint(s)")]
    CursorNotRestored{
        position: usize,
        depth: usize,
    },

    #[error("successful match left {depth} open checkpoint(s)")]
    CheckpointLeak{
        depth: usize,
    },

    #[error("leaves {leaves:?} differ from the consumed tokens {consumed:?}")]
    LeafMismatch{
        leaves: Vec<String>,
        consumed: Vec<String>,
    },

    #[error("node {node} has inconsistent links")]
    BrokenLink{
        node: usize,
    },

    #[error("selection is not in strictly increasing document order")]
    SelectOrder,

    #[error("left-recursive grammar was accepted")]
    LeftRecursionAccepted,

    #[error(transparent)]
    Grammar(#[from] GrammarError),
}

/// Matches 'entry' twice and verifies everything observable about the result.
pub fn check_match(grammar: &Grammar<Sym>, entry: RuleId, tokens: &[Token<Sym>]) -> Result<bool, Violation> {
    let mut cursor = ParseCursor::new(tokens);
    let first = grammar.match_at(entry, &mut cursor);
    let consumed = cursor.position();
    let depth = cursor.depth();

    let mut again = ParseCursor::new(tokens);
    let second = grammar.match_at(entry, &mut again);
    if first != second || again.position() != consumed {
        return Err(Violation::Nondeterministic);
    }

    let tree = match first {
        Ok(tree) => tree,
        Err(_) => {
            if consumed != 0 || depth != 0 {
                return Err(Violation::CursorNotRestored{ position: consumed, depth });
            }
            return Ok(false);
        },
    };
    if depth != 0 {
        return Err(Violation::CheckpointLeak{ depth });
    }

    let leaves: Vec<String> = tree.tokens().map(|t| t.text.clone()).collect();
    let consumed: Vec<String> = tokens[..consumed].iter().map(|t| t.text.clone()).collect();
    if leaves != consumed {
        return Err(Violation::LeafMismatch{ leaves, consumed });
    }

    for node in tree.nodes() {
        check_links(node)?;
    }

    let all = tree.select().descendants();
    let selections = [all.clone(), all.parent(), all.next_sibling(), all.previous_sibling(), all.ancestors()];
    for select in selections.iter() {
        let ids: Vec<_> = select.iter().map(|n| n.id()).collect();
        if !ids.windows(2).all(|w| w[0] < w[1]) {
            return Err(Violation::SelectOrder);
        }
    }
    Ok(true)
}

fn check_links(node: AstNode<'_, Sym>) -> Result<(), Violation> {
    let broken = Violation::BrokenLink{ node: node.id().index() };
    for (i, child) in node.children().enumerate() {
        if child.parent() != Some(node) || node.child(i) != Some(child) {
            return Err(broken);
        }
    }
    if let Some(next) = node.next_sibling() {
        if next.previous_sibling() != Some(node) {
            return Err(broken);
        }
    }
    Ok(())
}

/// A left-recursive grammar has to fail building.
pub fn check_rejected(result: Result<(Grammar<Sym>, RuleId), GrammarError>) -> Result<(), Violation> {
    match result {
        Err(GrammarError::LeftRecursion{ .. }) => Ok(()),
        Err(err) => Err(err.into()),
        Ok(_) => Err(Violation::LeftRecursionAccepted),
    }
}
