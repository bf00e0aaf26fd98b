/**
 * The matcher arena representation of a grammar.
 */

use std::fmt;

/// Handle of a matcher inside a grammar's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatcherId(pub(crate) usize);

/// Handle of a named rule inside a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RuleId(pub(crate) usize);

impl MatcherId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl RuleId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// How a rule's node appears in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleShape {
    /// The rule always gets its own node
    Keep,
    /// The rule never gets a node, its children are spliced into the parent
    Skip,
    /// The node is replaced by its child when it has exactly one
    SkipIfOneChild,
}

impl Default for RuleShape {
    fn default() -> Self {
        RuleShape::Keep
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Matcher<K> {
    Token(K),
    Literal(String),
    Any,
    Sequence(Vec<MatcherId>),
    Choice(Vec<MatcherId>),
    And(Vec<MatcherId>),
    Till{
        inner: MatcherId,
        inclusive: bool,
    },
    Optional(MatcherId),
    Repeat{
        inner: MatcherId,
        min: usize,
        max: Option<usize>,
    },
    Next(MatcherId),
    Not(MatcherId),
    Rule(RuleId),
}

impl <K> Matcher<K> {
    pub fn kind(&self) -> MatcherKind {
        match self {
            Matcher::Token(_) => MatcherKind::Token,
            Matcher::Literal(_) => MatcherKind::Literal,
            Matcher::Any => MatcherKind::Any,
            Matcher::Sequence(_) => MatcherKind::Sequence,
            Matcher::Choice(_) => MatcherKind::Choice,
            Matcher::And(_) => MatcherKind::And,
            Matcher::Till{ inclusive: true, .. } => MatcherKind::Till,
            Matcher::Till{ inclusive: false, .. } => MatcherKind::ExclusiveTill,
            Matcher::Optional(_) => MatcherKind::Optional,
            Matcher::Repeat{ .. } => MatcherKind::Repeat,
            Matcher::Next(_) => MatcherKind::Next,
            Matcher::Not(_) => MatcherKind::Not,
            Matcher::Rule(_) => MatcherKind::Rule,
        }
    }

    /// Matchers directly below this one, in evaluation order.
    pub fn subs(&self) -> &[MatcherId] {
        match self {
            Matcher::Sequence(ms) | Matcher::Choice(ms) | Matcher::And(ms) => &ms[..],
            Matcher::Till{ inner, .. } | Matcher::Repeat{ inner, .. } => std::slice::from_ref(inner),
            Matcher::Optional(m) | Matcher::Next(m) | Matcher::Not(m) => std::slice::from_ref(m),
            _ => &[],
        }
    }

    pub fn is_terminal(&self) -> bool {
        match self {
            Matcher::Token(_) | Matcher::Literal(_) | Matcher::Any => true,
            _ => false,
        }
    }
}

/// The variant of a matcher without its contents, used as the type of nodes
/// created by anonymous matchers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatcherKind {
    Token,
    Literal,
    Any,
    Sequence,
    Choice,
    And,
    Till,
    ExclusiveTill,
    Optional,
    Repeat,
    Next,
    Not,
    Rule,
}

impl MatcherKind {
    pub fn name(&self) -> &'static str {
        match self {
            MatcherKind::Token => "token",
            MatcherKind::Literal => "literal",
            MatcherKind::Any => "anyToken",
            MatcherKind::Sequence => "sequence",
            MatcherKind::Choice => "choice",
            MatcherKind::And => "and",
            MatcherKind::Till => "till",
            MatcherKind::ExclusiveTill => "exclusiveTill",
            MatcherKind::Optional => "opt",
            MatcherKind::Repeat => "repeat",
            MatcherKind::Next => "next",
            MatcherKind::Not => "not",
            MatcherKind::Rule => "rule",
        }
    }
}

impl fmt::Display for MatcherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn till_names() {
        let inclusive: Matcher<()> = Matcher::Till{ inner: MatcherId(0), inclusive: true };
        let exclusive: Matcher<()> = Matcher::Till{ inner: MatcherId(0), inclusive: false };
        assert_eq!(inclusive.kind().to_string(), "till");
        assert_eq!(exclusive.kind().to_string(), "exclusiveTill");
    }

    #[test]
    fn subs_in_order() {
        let seq: Matcher<()> = Matcher::Sequence(vec![MatcherId(3), MatcherId(1)]);
        assert_eq!(seq.subs(), &[MatcherId(3), MatcherId(1)]);
        let opt: Matcher<()> = Matcher::Optional(MatcherId(7));
        assert_eq!(opt.subs(), &[MatcherId(7)]);
        assert!(Matcher::<()>::Any.subs().is_empty());
    }
}
