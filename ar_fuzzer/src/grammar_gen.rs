/**
 * Grammar generation strategies.
 */

use std::ops::Range;
use ar_parser::{GrammarBuilder, GrammarError, Grammar, RuleId};
use ar_parser::expr::*;
use crate::rnd::*;
use crate::token_gen::Sym;

/// A generated grammar with its rules kept in expression form for reports.
pub struct GeneratedGrammar {
    pub rules: Vec<(String, Expr<Sym>)>,
}

impl GeneratedGrammar {
    pub fn entry_name(&self) -> &str {
        self.rules.first().map(|(name, _)| name.as_str()).unwrap_or("r0")
    }

    pub fn build(&self) -> Result<(Grammar<Sym>, RuleId), GrammarError> {
        let mut builder = GrammarBuilder::new();
        let entry = builder.rule(self.entry_name());
        for (name, body) in &self.rules {
            builder.define(name, body.clone());
        }
        Ok((builder.build()?, entry))
    }

    pub fn describe(&self) -> String {
        let lines: Vec<String> = self.rules.iter()
            .map(|(name, body)| format!("{} = {:?}", name, body))
            .collect();
        lines.join("\n")
    }
}

pub trait GrammarGenStrategy {
    fn generate(&self) -> GeneratedGrammar;
}

fn rule_name(index: usize) -> String {
    format!("r{}", index)
}

/**
 * Random acyclic grammars. A rule only references rules after it, so they
 * can never be left-recursive.
 */

pub struct RandomGrammarGenerator {
    rules: Range<usize>,
    depth: usize,
    alphabet: Vec<String>,
}

impl RandomGrammarGenerator {
    pub fn new(rules: Range<usize>, depth: usize, alphabet: &[&str]) -> Self {
        Self{ rules, depth, alphabet: alphabet.iter().map(|s| s.to_string()).collect() }
    }

    fn leaf(&self, current: usize, count: usize) -> Expr<Sym> {
        let roll = rand_range(&(0..100));
        if roll < 20 && current + 1 < count {
            rule_ref(rule_name(rand_range(&(current + 1..count))))
        }
        else if roll < 35 {
            any_token()
        }
        else {
            lit(sample(&self.alphabet).clone())
        }
    }

    fn many(&self, depth: usize, current: usize, count: usize) -> Vec<Expr<Sym>> {
        (0..rand_range(&(1..4))).map(|_| self.expr(depth, current, count)).collect()
    }

    fn expr(&self, depth: usize, current: usize, count: usize) -> Expr<Sym> {
        if depth == 0 || rand_bool(0.3) {
            return self.leaf(current, count);
        }
        let depth = depth - 1;
        match rand_range(&(0..11)) {
            0 => seq(self.many(depth, current, count)),
            1 => choice(self.many(depth, current, count)),
            2 => and(self.many(depth, current, count)),
            3 => till(self.expr(depth, current, count)),
            4 => exclusive_till(self.expr(depth, current, count)),
            5 => opt(self.expr(depth, current, count)),
            6 => o2n(self.expr(depth, current, count)),
            7 => one2n(self.expr(depth, current, count)),
            8 => {
                let min = rand_range(&(0..3));
                let max = if rand_bool(0.5) { Some(min + rand_range(&(1..3))) } else { None };
                repeat(self.expr(depth, current, count), min, max)
            },
            9 => next(self.expr(depth, current, count)),
            _ => not(self.expr(depth, current, count)),
        }
    }
}

impl GrammarGenStrategy for RandomGrammarGenerator {
    fn generate(&self) -> GeneratedGrammar {
        let count = rand_range(&self.rules);
        let rules = (0..count)
            .map(|i| (rule_name(i), self.expr(self.depth, i, count)))
            .collect();
        GeneratedGrammar{ rules }
    }
}

/**
 * Grammars with a left-recursive cycle, possibly hidden behind prefixes
 * that can match nothing.
 */

pub struct LeftRecursiveGrammarGenerator {
    cycle: Range<usize>,
    alphabet: Vec<String>,
}

impl LeftRecursiveGrammarGenerator {
    pub fn new(cycle: Range<usize>, alphabet: &[&str]) -> Self {
        Self{ cycle, alphabet: alphabet.iter().map(|s| s.to_string()).collect() }
    }

    fn word(&self) -> Expr<Sym> {
        lit(sample(&self.alphabet).clone())
    }

    fn nullable_prefix(&self) -> Option<Expr<Sym>> {
        match rand_range(&(0..5)) {
            0 => Some(opt(self.word())),
            1 => Some(o2n(self.word())),
            2 => Some(next(self.word())),
            3 => Some(not(self.word())),
            _ => None,
        }
    }
}

impl GrammarGenStrategy for LeftRecursiveGrammarGenerator {
    fn generate(&self) -> GeneratedGrammar {
        let count = rand_range(&self.cycle);
        let rules = (0..count)
            .map(|i| {
                let mut items = Vec::new();
                items.extend(self.nullable_prefix());
                items.push(rule_ref(rule_name((i + 1) % count)));
                items.push(self.word());
                let body = if rand_bool(0.5) {
                    choice(vec![seq(items), self.word()])
                }
                else {
                    seq(items)
                };
                (rule_name(i), body)
            })
            .collect();
        GeneratedGrammar{ rules }
    }
}
