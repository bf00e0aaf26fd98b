/**
 * Grammar expressions, the tree-shaped form that grammars are written in.
 * A builder interns them into the matcher arena.
 */

use crate::matcher::RuleId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr<K> {
    Token(K),
    Literal(String),
    Any,
    Seq(Vec<Expr<K>>),
    Choice(Vec<Expr<K>>),
    And(Vec<Expr<K>>),
    Till{
        inner: Box<Expr<K>>,
        inclusive: bool,
    },
    Optional(Box<Expr<K>>),
    Repeat{
        inner: Box<Expr<K>>,
        min: usize,
        max: Option<usize>,
    },
    Next(Box<Expr<K>>),
    Not(Box<Expr<K>>),
    Rule(RuleId),
    /// Reference to a rule by name, resolved when interned
    Named(String),
}

impl <K> From<&str> for Expr<K> {
    fn from(text: &str) -> Self {
        Expr::Literal(text.into())
    }
}

impl <K> From<String> for Expr<K> {
    fn from(text: String) -> Self {
        Expr::Literal(text)
    }
}

impl <K> From<RuleId> for Expr<K> {
    fn from(rule: RuleId) -> Self {
        Expr::Rule(rule)
    }
}

fn collect<K, E>(items: impl IntoIterator<Item = E>) -> Vec<Expr<K>>
    where E : Into<Expr<K>> {
    items.into_iter().map(Into::into).collect()
}

/**
 * Terminals.
 */

/// Matches a single token of the given kind.
pub fn tok<K>(kind: K) -> Expr<K> {
    Expr::Token(kind)
}

/// Matches a single token with the given text.
pub fn lit<K>(text: impl Into<String>) -> Expr<K> {
    Expr::Literal(text.into())
}

pub fn any_token<K>() -> Expr<K> {
    Expr::Any
}

/**
 * Combinators.
 */

pub fn seq<K, E>(items: impl IntoIterator<Item = E>) -> Expr<K>
    where E : Into<Expr<K>> {
    Expr::Seq(collect(items))
}

/// Ordered choice, the first alternative that matches wins.
pub fn choice<K, E>(items: impl IntoIterator<Item = E>) -> Expr<K>
    where E : Into<Expr<K>> {
    Expr::Choice(collect(items))
}

/// The first element decides what is consumed, the rest have to match
/// inside the same span. They may end earlier than the first element but
/// never past it.
pub fn and<K, E>(items: impl IntoIterator<Item = E>) -> Expr<K>
    where E : Into<Expr<K>> {
    Expr::And(collect(items))
}

/// Skips tokens until the delimiter matches, consuming the delimiter too.
pub fn till<K>(delimiter: impl Into<Expr<K>>) -> Expr<K> {
    Expr::Till{ inner: Box::new(delimiter.into()), inclusive: true }
}

/// Skips tokens until the delimiter matches, leaving the delimiter.
pub fn exclusive_till<K>(delimiter: impl Into<Expr<K>>) -> Expr<K> {
    Expr::Till{ inner: Box::new(delimiter.into()), inclusive: false }
}

pub fn opt<K>(inner: impl Into<Expr<K>>) -> Expr<K> {
    Expr::Optional(Box::new(inner.into()))
}

/// Zero or more.
pub fn o2n<K>(inner: impl Into<Expr<K>>) -> Expr<K> {
    repeat(inner, 0, None)
}

/// One or more.
pub fn one2n<K>(inner: impl Into<Expr<K>>) -> Expr<K> {
    repeat(inner, 1, None)
}

pub fn repeat<K>(inner: impl Into<Expr<K>>, min: usize, max: Option<usize>) -> Expr<K> {
    Expr::Repeat{ inner: Box::new(inner.into()), min, max }
}

/// Positive lookahead.
pub fn next<K>(inner: impl Into<Expr<K>>) -> Expr<K> {
    Expr::Next(Box::new(inner.into()))
}

/// Negative lookahead.
pub fn not<K>(inner: impl Into<Expr<K>>) -> Expr<K> {
    Expr::Not(Box::new(inner.into()))
}

pub fn rule_ref<K>(name: impl Into<String>) -> Expr<K> {
    Expr::Named(name.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strings_become_literals() {
        let e: Expr<()> = seq(vec!["one", "two"]);
        assert_eq!(e, Expr::Seq(vec![Expr::Literal("one".into()), Expr::Literal("two".into())]));
    }

    #[test]
    fn mixed_items() {
        let e: Expr<u8> = choice(vec![tok(1), lit("x"), rule_ref("r"), any_token()]);
        match e {
            Expr::Choice(items) => assert_eq!(items.len(), 4),
            _ => panic!("expected a choice"),
        }
    }

    #[test]
    fn repetition_shorthands() {
        let e: Expr<()> = one2n("a");
        assert_eq!(e, Expr::Repeat{ inner: Box::new("a".into()), min: 1, max: None });
        let e: Expr<()> = o2n("a");
        assert_eq!(e, Expr::Repeat{ inner: Box::new("a".into()), min: 0, max: None });
    }
}
