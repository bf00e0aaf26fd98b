/**
 * Backtracking evaluation of the matcher graph over a token cursor.
 */

use log::trace;
use ar_token::{Token, TokenKind};
use crate::cursor::{Checkpoint, ParseCursor};
use crate::failure::{Failure, FurthestFailure};
use crate::grammar::{Entry, Grammar};
use crate::matcher::{Matcher, MatcherId, RuleId, RuleShape};
use crate::tree::{NodeData, NodeId, NodeType, SyntaxTree};

/// Runs a single match of 'entry'. Besides the result, the furthest failure
/// seen during the attempt is returned, even when the match succeeded.
pub(crate) fn run<K>(grammar: &Grammar<K>, entry: Entry, cursor: &mut ParseCursor<'_, K>) -> (Result<SyntaxTree<K>, Failure>, FurthestFailure)
    where K : TokenKind {
    let mut eval = Evaluation{
        grammar,
        cursor,
        nodes: Vec::new(),
        pending: Vec::new(),
        furthest: FurthestFailure::new(),
        lookahead_depth: 0,
    };
    let result = eval.root(entry);
    let Evaluation{ nodes, furthest, .. } = eval;
    let tree = result.map(|root| SyntaxTree::from_raw(nodes, root, grammar.rules.clone()));
    (tree, furthest)
}

// Snapshot of everything an attempt can change
#[derive(Debug, Clone, Copy)]
struct Mark {
    checkpoint: Checkpoint,
    pending: usize,
    nodes: usize,
}

struct Evaluation<'g, 'c, 'a, K> {
    grammar: &'g Grammar<K>,
    cursor: &'c mut ParseCursor<'a, K>,
    // Every node built so far, discarded ones are truncated away
    nodes: Vec<NodeData<K>>,
    // Output of the currently open matchers, waiting for a parent
    pending: Vec<NodeId>,
    furthest: FurthestFailure,
    // Number of enclosing negative lookaheads
    lookahead_depth: usize,
}

impl <'g, 'c, 'a, K> Evaluation<'g, 'c, 'a, K> where K : TokenKind {
    fn root(&mut self, entry: Entry) -> Result<NodeId, Failure> {
        let grammar = self.grammar;
        match entry {
            Entry::Rule(rule) => self.root_rule(rule),
            Entry::Matcher(id) => match grammar.matcher(id) {
                Matcher::Rule(rule) => self.root_rule(*rule),
                m => {
                    self.eval(id)?;
                    let children: Vec<NodeId> = self.pending.drain(..).collect();
                    if m.is_terminal() && children.len() == 1 {
                        Ok(children[0])
                    }
                    else {
                        Ok(self.push_node(NodeData::branch(NodeType::Matcher(m.kind()), children)))
                    }
                },
            },
        }
    }

    fn mark(&mut self) -> Mark {
        Mark{ checkpoint: self.cursor.save(), pending: self.pending.len(), nodes: self.nodes.len() }
    }

    fn rewind(&mut self, mark: Mark) {
        self.cursor.restore(mark.checkpoint);
        self.pending.truncate(mark.pending);
        self.nodes.truncate(mark.nodes);
    }

    fn settle(&mut self, mark: Mark) {
        self.cursor.commit(mark.checkpoint);
    }

    fn fail(&mut self, failure: Failure) -> Failure {
        if self.lookahead_depth == 0 {
            self.furthest.record(&failure);
        }
        failure
    }

    fn fail_here(&mut self, expected: String) -> Failure {
        let failure = Failure::at(self.cursor.tokens(), self.cursor.position()).expecting(expected);
        self.fail(failure)
    }

    fn push_node(&mut self, node: NodeData<K>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    fn push_leaf(&mut self, kind: K, token: &Token<K>) {
        let id = self.push_node(NodeData::leaf(kind, token.clone()));
        self.pending.push(id);
    }

    /// Consumes one token if 'pred' accepts it.
    fn terminal<F>(&mut self, id: MatcherId, pred: F) -> Result<(), Failure>
        where F : Fn(&Token<K>) -> bool {
        match self.cursor.peek() {
            Some(token) if pred(token) => {
                self.cursor.seek(self.cursor.position() + 1);
                self.push_leaf(token.kind, token);
                Ok(())
            },
            _ => {
                let expected = self.grammar.describe(id);
                Err(self.fail_here(expected))
            },
        }
    }

    fn eval(&mut self, id: MatcherId) -> Result<(), Failure> {
        let grammar = self.grammar;
        match grammar.matcher(id) {
            Matcher::Token(kind) => self.terminal(id, |t| t.kind == *kind),
            Matcher::Literal(text) => self.terminal(id, |t| t.text == *text),
            Matcher::Any => self.terminal(id, |_| true),
            Matcher::Sequence(items) => self.sequence(items),
            Matcher::Choice(alternatives) => self.choice(alternatives),
            Matcher::And(items) => self.and(items),
            Matcher::Till{ inner, inclusive } => self.till(*inner, *inclusive),
            Matcher::Optional(inner) => {
                let mark = self.mark();
                match self.eval(*inner) {
                    Ok(()) => self.settle(mark),
                    Err(_) => self.rewind(mark),
                }
                Ok(())
            },
            Matcher::Repeat{ inner, min, max } => self.repeat(*inner, *min, *max),
            Matcher::Next(inner) => {
                let mark = self.mark();
                let result = self.eval(*inner);
                self.rewind(mark);
                result
            },
            Matcher::Not(inner) => {
                let mark = self.mark();
                self.lookahead_depth += 1;
                let result = self.eval(*inner);
                self.lookahead_depth -= 1;
                self.rewind(mark);
                match result {
                    Ok(()) => {
                        let expected = format!("anything but {}", grammar.describe(*inner));
                        Err(self.fail_here(expected))
                    },
                    Err(_) => Ok(()),
                }
            },
            Matcher::Rule(rule) => self.rule(*rule),
        }
    }

    fn sequence(&mut self, items: &[MatcherId]) -> Result<(), Failure> {
        let mark = self.mark();
        for item in items {
            if let Err(failure) = self.eval(*item) {
                self.rewind(mark);
                return Err(failure);
            }
        }
        self.settle(mark);
        Ok(())
    }

    fn choice(&mut self, alternatives: &[MatcherId]) -> Result<(), Failure> {
        let mut failure: Option<Failure> = None;
        for alt in alternatives {
            let mark = self.mark();
            match self.eval(*alt) {
                Ok(()) => {
                    self.settle(mark);
                    return Ok(());
                },
                Err(f) => {
                    self.rewind(mark);
                    failure = Some(Failure::unify_option(failure, f));
                },
            }
        }
        Err(match failure {
            Some(failure) => failure,
            None => Failure::at(self.cursor.tokens(), self.cursor.position()),
        })
    }

    fn and(&mut self, items: &[MatcherId]) -> Result<(), Failure> {
        let (first, rest) = match items.split_first() {
            Some(split) => split,
            None => return Ok(()),
        };
        let start = self.cursor.position();
        let mark = self.mark();
        if let Err(failure) = self.eval(*first) {
            self.rewind(mark);
            return Err(failure);
        }
        let end = self.cursor.position();

        for item in rest {
            // Validate from the entry position, then come back to 'end'
            let validation = self.mark();
            self.cursor.seek(start);
            let result = self.eval(*item);
            let reached = self.cursor.position();
            self.rewind(validation);

            let result = match result {
                Ok(()) if reached > end => {
                    let failure = Failure::at(self.cursor.tokens(), end);
                    Err(self.fail(failure))
                },
                r => r,
            };
            if let Err(failure) = result {
                self.rewind(mark);
                return Err(failure);
            }
        }
        self.settle(mark);
        Ok(())
    }

    fn till(&mut self, inner: MatcherId, inclusive: bool) -> Result<(), Failure> {
        let mark = self.mark();
        loop {
            let attempt = self.mark();
            match self.eval(inner) {
                Ok(()) => {
                    if inclusive {
                        self.settle(attempt);
                    }
                    else {
                        self.rewind(attempt);
                    }
                    self.settle(mark);
                    return Ok(());
                },
                Err(failure) => {
                    self.rewind(attempt);
                    match self.cursor.advance() {
                        Ok(token) => self.push_leaf(token.kind, token),
                        Err(end_of_stream) => {
                            self.rewind(mark);
                            let failure = Failure::unify(end_of_stream, failure);
                            return Err(self.fail(failure));
                        },
                    }
                },
            }
        }
    }

    fn repeat(&mut self, inner: MatcherId, min: usize, max: Option<usize>) -> Result<(), Failure> {
        let mark = self.mark();
        let mut count = 0;
        let mut last_failure = None;
        while max.map_or(true, |max| count < max) {
            let attempt = self.mark();
            let start = self.cursor.position();
            match self.eval(inner) {
                Ok(()) => {
                    self.settle(attempt);
                    count += 1;
                    if self.cursor.position() == start {
                        // It would match the same nothing forever
                        count = count.max(min);
                        break;
                    }
                },
                Err(failure) => {
                    self.rewind(attempt);
                    last_failure = Some(failure);
                    break;
                },
            }
        }
        if count >= min {
            self.settle(mark);
            Ok(())
        }
        else {
            self.rewind(mark);
            Err(match last_failure {
                Some(failure) => failure,
                None => Failure::at(self.cursor.tokens(), self.cursor.position()),
            })
        }
    }

    /// Evaluates a rule body, returning the nodes it produced.
    fn rule_body(&mut self, rule: RuleId) -> Result<Vec<NodeId>, Failure> {
        let grammar = self.grammar;
        let name = grammar.rules.name(rule);
        trace!("enter rule '{}' at token {}", name, self.cursor.position());

        let start = self.pending.len();
        if let Err(failure) = self.eval(grammar.body(rule)) {
            trace!("rule '{}' failed: {}", name, failure);
            return Err(failure);
        }
        trace!("leave rule '{}' at token {}", name, self.cursor.position());
        Ok(self.pending.split_off(start))
    }

    fn rule(&mut self, rule: RuleId) -> Result<(), Failure> {
        let children = self.rule_body(rule)?;
        match (self.grammar.rules.get(rule).shape, children.len()) {
            (RuleShape::Skip, _) | (RuleShape::SkipIfOneChild, 1) => self.pending.extend(children),
            _ => {
                let id = self.push_node(NodeData::branch(NodeType::Rule(rule), children));
                self.pending.push(id);
            },
        }
        Ok(())
    }

    /// The root rule of a match always gets its node.
    fn root_rule(&mut self, rule: RuleId) -> Result<NodeId, Failure> {
        let children = self.rule_body(rule)?;
        Ok(self.push_node(NodeData::branch(NodeType::Rule(rule), children)))
    }
}
