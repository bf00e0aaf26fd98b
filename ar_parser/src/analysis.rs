/**
 * Static checks on the matcher graph. Left recursion is found once here, so
 * the engine never has to guard rule invocations.
 */

use crate::error::GrammarError;
use crate::grammar::RuleTable;
use crate::matcher::{Matcher, MatcherId, RuleId};

/// Calculates which rules can succeed without consuming anything.
pub(crate) fn nullable_rules<K>(matchers: &[Matcher<K>], bodies: &[MatcherId]) -> Vec<bool> {
    let mut nullable = vec![false; bodies.len()];
    // Fixpoint, a rule only ever goes from false to true
    loop {
        let mut changed = false;
        for (i, body) in bodies.iter().enumerate() {
            if !nullable[i] && is_nullable(matchers, *body, &nullable) {
                nullable[i] = true;
                changed = true;
            }
        }
        if !changed {
            return nullable;
        }
    }
}

pub(crate) fn is_nullable<K>(matchers: &[Matcher<K>], id: MatcherId, rules: &[bool]) -> bool {
    match &matchers[id.0] {
        Matcher::Token(_) | Matcher::Literal(_) | Matcher::Any => false,
        Matcher::Sequence(ms) => ms.iter().all(|m| is_nullable(matchers, *m, rules)),
        Matcher::Choice(ms) => ms.iter().any(|m| is_nullable(matchers, *m, rules)),
        Matcher::And(ms) => ms.first().map_or(true, |m| is_nullable(matchers, *m, rules)),
        Matcher::Till{ inner, inclusive: true } => is_nullable(matchers, *inner, rules),
        Matcher::Till{ inclusive: false, .. } => true,
        Matcher::Optional(_) | Matcher::Next(_) | Matcher::Not(_) => true,
        Matcher::Repeat{ inner, min, .. } => *min == 0 || is_nullable(matchers, *inner, rules),
        Matcher::Rule(rule) => rules[rule.0],
    }
}

/// Collects the rules that can be invoked before anything is consumed.
fn left_edges<K>(matchers: &[Matcher<K>], id: MatcherId, nullable: &[bool], out: &mut Vec<RuleId>) {
    match &matchers[id.0] {
        Matcher::Token(_) | Matcher::Literal(_) | Matcher::Any => { },
        Matcher::Sequence(ms) => {
            for m in ms {
                left_edges(matchers, *m, nullable, out);
                if !is_nullable(matchers, *m, nullable) {
                    break;
                }
            }
        },
        Matcher::Rule(rule) => {
            if !out.contains(rule) {
                out.push(*rule);
            }
        },
        // Every other combinator starts all of its subs at the entry position
        m => {
            for sub in m.subs() {
                left_edges(matchers, *sub, nullable, out);
            }
        },
    }
}

pub(crate) fn check_left_recursion<K>(matchers: &[Matcher<K>], bodies: &[MatcherId], rules: &RuleTable) -> Result<(), GrammarError> {
    let nullable = nullable_rules(matchers, bodies);
    let edges: Vec<Vec<RuleId>> = bodies.iter()
        .map(|body| {
            let mut out = Vec::new();
            left_edges(matchers, *body, &nullable, &mut out);
            out
        })
        .collect();

    let mut state = vec![Visit::New; bodies.len()];
    let mut path = Vec::new();
    for i in 0..bodies.len() {
        if state[i] == Visit::New {
            if let Some(cycle) = find_cycle(RuleId(i), &edges, &mut state, &mut path) {
                let cycle: Vec<String> = cycle.iter().map(|r| rules.name(*r).to_string()).collect();
                return Err(GrammarError::LeftRecursion{ rule: cycle[0].clone(), cycle });
            }
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Visit {
    New,
    OnPath,
    Done,
}

fn find_cycle(rule: RuleId, edges: &[Vec<RuleId>], state: &mut [Visit], path: &mut Vec<RuleId>) -> Option<Vec<RuleId>> {
    state[rule.0] = Visit::OnPath;
    path.push(rule);
    for next in &edges[rule.0] {
        match state[next.0] {
            Visit::OnPath => {
                let start = path.iter().position(|r| r == next).unwrap_or(0);
                let mut cycle = path[start..].to_vec();
                cycle.push(*next);
                return Some(cycle);
            },
            Visit::New => {
                if let Some(cycle) = find_cycle(*next, edges, state, path) {
                    return Some(cycle);
                }
            },
            Visit::Done => { },
        }
    }
    path.pop();
    state[rule.0] = Visit::Done;
    None
}
