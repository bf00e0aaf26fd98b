/**
 * Hard errors of the parser library.
 */

use thiserror::Error;
use crate::failure::Failure;
use crate::matcher::MatcherKind;

/// A grammar that fails these checks is never constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrammarError {
    #[error("rule '{0}' is referenced but never defined")]
    UndefinedRule(String),

    #[error("rule #{0} does not belong to this grammar")]
    UnknownRule(usize),

    #[error("rule '{0}' is defined more than once")]
    DuplicateRule(String),

    #[error("rule '{rule}' is left-recursive ({})", .cycle.join(" -> "))]
    LeftRecursion{
        rule: String,
        cycle: Vec<String>,
    },

    #[error("'{kind}' needs at least one alternative")]
    EmptyCombinator{
        kind: MatcherKind,
    },

    #[error("invalid repetition bounds {min}..{max}")]
    InvalidRepetition{
        min: usize,
        max: usize,
    },
}

/// The furthest failure of a parse, converted into an error by the driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{failure}")]
pub struct ParseError {
    pub failure: Failure,
}

impl From<Failure> for ParseError {
    fn from(failure: Failure) -> Self {
        Self{ failure }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("index {index} is out of range for a selection of {size} node(s)")]
pub struct IndexOutOfRange {
    pub index: usize,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_recursion_message() {
        let err = GrammarError::LeftRecursion{
            rule: "expr".into(),
            cycle: vec!["expr".into(), "term".into(), "expr".into()],
        };
        assert_eq!(err.to_string(), "rule 'expr' is left-recursive (expr -> term -> expr)");
    }

    #[test]
    fn out_of_range_message() {
        let err = IndexOutOfRange{ index: 3, size: 1 };
        assert_eq!(err.to_string(), "index 3 is out of range for a selection of 1 node(s)");
    }

    #[test]
    fn unknown_rule_message() {
        assert_eq!(GrammarError::UnknownRule(2).to_string(), "rule #2 does not belong to this grammar");
    }
}
