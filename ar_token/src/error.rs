/**
 * Lexical errors.
 */

use thiserror::Error;
use crate::position::Position;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected character '{found}' at {position}")]
    UnexpectedChar {
        found: char,
        position: Position,
    },
}
