/**
 * The unsuccessful result of a matcher, and the furthest-failure record.
 */

use std::collections::BTreeSet;
use std::fmt;
use ar_token::{Position, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// The token at the position did not match
    Mismatch,
    /// The cursor ran out of tokens
    EndOfStream,
}

/// The token a failure stopped at.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Found {
    pub text: String,
    pub position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Index of the token in the stream where matching stopped
    pub position: usize,
    pub kind: FailureKind,
    pub expected: BTreeSet<String>,
    pub found: Option<Found>,
}

impl Failure {
    pub fn end_of_stream(position: usize) -> Self {
        Self{ position, kind: FailureKind::EndOfStream, expected: BTreeSet::new(), found: None }
    }

    pub fn mismatch<K>(position: usize, found: &Token<K>) -> Self {
        Self{
            position,
            kind: FailureKind::Mismatch,
            expected: BTreeSet::new(),
            found: Some(Found{ text: found.text.clone(), position: found.position }),
        }
    }

    /// Builds the failure for whatever the stream holds at 'position'.
    pub fn at<K>(tokens: &[Token<K>], position: usize) -> Self {
        match tokens.get(position) {
            Some(token) => Self::mismatch(position, token),
            None => Self::end_of_stream(position),
        }
    }

    pub fn expecting(mut self, description: impl Into<String>) -> Self {
        self.expected.insert(description.into());
        self
    }

    pub fn is_end_of_stream(&self) -> bool {
        self.kind == FailureKind::EndOfStream
    }

    /// Keeps the failure that got further, merging expectations on a tie.
    pub fn unify(a: Self, b: Self) -> Self {
        if a.position > b.position {
            a
        }
        else if b.position > a.position {
            b
        }
        else {
            let mut a = a;
            a.expected.extend(b.expected);
            a
        }
    }

    pub fn unify_option(a: Option<Self>, b: Self) -> Self {
        match a {
            Some(a) => Self::unify(a, b),
            None => b,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let expected: Vec<&str> = self.expected.iter().map(|s| s.as_str()).collect();
        match expected.split_last() {
            None => write!(f, "unexpected input")?,
            Some((last, [])) => write!(f, "expected {}", last)?,
            Some((last, init)) => write!(f, "expected {} or {}", init.join(", "), last)?,
        }
        match &self.found {
            Some(found) => write!(f, " but found '{}' at {}", found.text, found.position),
            None => write!(f, " but reached the end of input (token {})", self.position),
        }
    }
}

/// The deepest failure of a whole parse attempt, used for reporting.
#[derive(Debug, Clone, Default)]
pub struct FurthestFailure {
    failure: Option<Failure>,
}

impl FurthestFailure {
    pub fn new() -> Self {
        Self{ failure: None }
    }

    pub fn position(&self) -> Option<usize> {
        self.failure.as_ref().map(|f| f.position)
    }

    pub fn record(&mut self, failure: &Failure) {
        let replace = match &self.failure {
            None => true,
            Some(current) => failure.position > current.position,
        };
        if replace {
            self.failure = Some(failure.clone());
        }
        else if let Some(current) = &mut self.failure {
            if current.position == failure.position {
                current.expected.extend(failure.expected.iter().cloned());
            }
        }
    }

    pub fn get(&self) -> Option<&Failure> {
        self.failure.as_ref()
    }

    pub fn into_inner(self) -> Option<Failure> {
        self.failure
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(text: &str, column: usize) -> Token<()> {
        Token::new((), text, Position::with_line_and_column(0, column))
    }

    #[test]
    fn unify_keeps_furthest() {
        let a = Failure::mismatch(1, &token("x", 2)).expecting("A");
        let b = Failure::mismatch(3, &token("y", 6)).expecting("B");
        let unified = Failure::unify(a, b.clone());
        assert_eq!(unified, b);
    }

    #[test]
    fn unify_merges_on_tie() {
        let a = Failure::mismatch(2, &token("x", 4)).expecting("A");
        let b = Failure::mismatch(2, &token("x", 4)).expecting("B");
        let unified = Failure::unify(a, b);
        assert_eq!(unified.expected.iter().cloned().collect::<Vec<_>>(), vec!["A", "B"]);
    }

    #[test]
    fn furthest_record() {
        let mut furthest = FurthestFailure::new();
        furthest.record(&Failure::mismatch(1, &token("x", 0)).expecting("A"));
        furthest.record(&Failure::mismatch(0, &token("w", 0)).expecting("Z"));
        furthest.record(&Failure::mismatch(1, &token("x", 0)).expecting("B"));
        let failure = furthest.get().unwrap();
        assert_eq!(failure.position, 1);
        assert_eq!(failure.expected.len(), 2);
    }

    #[test]
    fn display() {
        let failure = Failure::mismatch(0, &token("x", 4)).expecting("A").expecting("B").expecting("C");
        assert_eq!(failure.to_string(), "expected A, B or C but found 'x' at 1:5");
        let failure = Failure::end_of_stream(3).expecting("\"four\"");
        assert_eq!(failure.to_string(), "expected \"four\" but reached the end of input (token 3)");
    }
}
