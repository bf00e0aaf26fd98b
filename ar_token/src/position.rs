/**
 * Position representation in a source text.
 */

use std::fmt;

/// Zero-based line and column of a character in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new() -> Position {
        Position{ line: 0, column: 0 }
    }

    pub fn with_line_and_column(line: usize, column: usize) -> Position {
        Position{ line, column }
    }

    pub fn newline(&mut self) {
        self.column = 0;
        self.line += 1;
    }

    pub fn advance_columns(&mut self, count: usize) {
        self.column += count;
    }

    /// Steps the position over a single character.
    pub fn advance_char(&mut self, c: char) {
        if c == '\n' {
            self.newline();
        }
        else {
            self.advance_columns(1);
        }
    }
}

/// Printed one-based, the way editors show it.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_over_text() {
        let mut pos = Position::new();
        for c in "ab\ncd".chars() {
            pos.advance_char(c);
        }
        assert_eq!(pos, Position::with_line_and_column(1, 2));
    }

    #[test]
    fn display_is_one_based() {
        assert_eq!(Position::with_line_and_column(0, 4).to_string(), "1:5");
    }
}
