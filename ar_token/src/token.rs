/**
 * Token definition.
 */

use std::fmt;
use std::hash::Hash;
use crate::position::Position;
use crate::lexer::{Lexer, LexRule};

/// A token produced by the lexer and consumed by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token<K> {
    pub kind: K,
    pub text: String,
    pub position: Position,
}

impl <K> Token<K> {
    pub fn new(kind: K, text: impl Into<String>, position: Position) -> Self {
        Self{ kind, text: text.into(), position }
    }

    pub fn line(&self) -> usize {
        self.position.line
    }

    pub fn column(&self) -> usize {
        self.position.column
    }
}

impl <K> fmt::Display for Token<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' at {}", self.text, self.position)
    }
}

/// The type that the derive-macro implements on the user-defined enum.
/// The rule list is what the builtin lexer is constructed from.
pub trait TokenKind : Copy + Eq + Hash + fmt::Debug + 'static {
    /// Stable name of the kind, used in expectation messages and tree dumps.
    fn name(&self) -> &'static str;

    fn rules() -> Vec<LexRule<Self>> {
        Vec::new()
    }

    fn lexer() -> Lexer<Self> {
        Lexer::with_rules(Self::rules())
    }
}
