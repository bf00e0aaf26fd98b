/**
 * A small character-class lexer producing token streams.
 */

use crate::error::LexError;
use crate::position::Position;
use crate::token::{Token, TokenKind};

/**
 * Lexical rules a token kind can be recognized by.
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexRule<K> {
    /// Exact text, like a keyword or a punctuation.
    Literal(&'static str, K),
    /// C-style identifier.
    Identifier(K),
    /// Sequence of decimal digits.
    Number(K),
}

impl <K> LexRule<K> where K : Copy {
    pub fn kind(&self) -> K {
        match self {
            LexRule::Literal(_, k) | LexRule::Identifier(k) | LexRule::Number(k) => *k,
        }
    }

    /// Literals win over character classes when the lengths are equal.
    fn precedence(&self) -> usize {
        match self {
            LexRule::Literal(..) => 1,
            _ => 0,
        }
    }

    /// Returns the byte length this rule would match at the start of 'src'.
    fn match_len(&self, src: &str) -> usize {
        match self {
            LexRule::Literal(text, _) => {
                if !text.is_empty() && src.starts_with(text) { text.len() } else { 0 }
            },

            LexRule::Identifier(_) => {
                let mut chars = src.char_indices();
                match chars.next() {
                    Some((_, c)) if c.is_alphabetic() || c == '_' => { },
                    _ => return 0,
                }
                chars.find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
                    .map(|(idx, _)| idx)
                    .unwrap_or_else(|| src.len())
            },

            LexRule::Number(_) => {
                src.char_indices()
                    .find(|(_, c)| !c.is_ascii_digit())
                    .map(|(idx, _)| idx)
                    .unwrap_or_else(|| src.len())
            },
        }
    }
}

/**
 * Every lexer's minimal information it needs to carry.
 */

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexerState {
    pub source_index: usize,
    pub position: Position,
}

impl LexerState {
    pub fn new() -> Self {
        Self{ source_index: 0, position: Position::new(), }
    }

    fn advance_over(&mut self, text: &str) {
        for c in text.chars() {
            self.position.advance_char(c);
        }
        self.source_index += text.len();
    }
}

/**
 * The builtin lexer.
 */

#[derive(Debug, Clone)]
pub struct Lexer<K> {
    rules: Vec<LexRule<K>>,
}

impl <K> Lexer<K> where K : TokenKind {
    pub fn with_rules(rules: Vec<LexRule<K>>) -> Self {
        Self{ rules }
    }

    pub fn rules(&self) -> &[LexRule<K>] {
        &self.rules
    }

    pub fn iter<'a>(&'a self, source: &'a str) -> Iter<'a, K> {
        Iter::with_source(self, source)
    }

    /// Lexes the whole source, stopping at the first error.
    pub fn tokenize(&self, source: &str) -> Result<Vec<Token<K>>, LexError> {
        self.iter(source).collect()
    }

    /// Picks the longest match, then the highest precedence, then the earliest rule.
    fn longest_match(&self, src: &str) -> Option<(usize, K)> {
        let mut best: Option<(usize, usize, K)> = None;
        for rule in &self.rules {
            let len = rule.match_len(src);
            if len == 0 {
                continue;
            }
            let better = match best {
                None => true,
                Some((blen, bprec, _)) => len > blen || (len == blen && rule.precedence() > bprec),
            };
            if better {
                best = Some((len, rule.precedence(), rule.kind()));
            }
        }
        best.map(|(len, _, kind)| (len, kind))
    }
}

/**
 * Iterate over all tokens.
 */

pub struct Iter<'a, K> {
    lexer: &'a Lexer<K>,
    source: &'a str,
    state: LexerState,
    already_ended: bool,
}

impl <'a, K> Iter<'a, K> {
    fn with_source(lexer: &'a Lexer<K>, source: &'a str) -> Self {
        Self{ lexer, source, state: LexerState::new(), already_ended: false }
    }

    pub fn state(&self) -> &LexerState {
        &self.state
    }
}

impl <'a, K> Iterator for Iter<'a, K> where K : TokenKind {
    type Item = Result<Token<K>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.already_ended {
            return None;
        }

        // Skip whitespace
        let rest = &self.source[self.state.source_index..];
        let trimmed = rest.trim_start();
        let skipped = &rest[..rest.len() - trimmed.len()];
        self.state.advance_over(skipped);

        if trimmed.is_empty() {
            self.already_ended = true;
            return None;
        }

        match self.lexer.longest_match(trimmed) {
            Some((len, kind)) => {
                let text = &trimmed[..len];
                let position = self.state.position;
                self.state.advance_over(text);
                Some(Ok(Token::new(kind, text, position)))
            },

            None => {
                // Unknown character, nothing after it can be trusted
                self.already_ended = true;
                let found = trimmed.chars().next().unwrap_or_default();
                Some(Err(LexError::UnexpectedChar{ found, position: self.state.position }))
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum Kind {
        Ident,
        Int,
        KwIf,
        Arrow,
        Minus,
    }

    impl TokenKind for Kind {
        fn name(&self) -> &'static str {
            match self {
                Kind::Ident => "Ident",
                Kind::Int => "Int",
                Kind::KwIf => "KwIf",
                Kind::Arrow => "Arrow",
                Kind::Minus => "Minus",
            }
        }

        fn rules() -> Vec<LexRule<Self>> {
            vec![
                LexRule::Identifier(Kind::Ident),
                LexRule::Number(Kind::Int),
                LexRule::Literal("if", Kind::KwIf),
                LexRule::Literal("->", Kind::Arrow),
                LexRule::Literal("-", Kind::Minus),
            ]
        }
    }

    fn kinds(src: &str) -> Vec<Kind> {
        Kind::lexer().tokenize(src).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keyword_beats_identifier_on_tie() {
        assert_eq!(kinds("if iffy"), vec![Kind::KwIf, Kind::Ident]);
    }

    #[test]
    fn longest_literal_wins() {
        assert_eq!(kinds("- -> -"), vec![Kind::Minus, Kind::Arrow, Kind::Minus]);
    }

    #[test]
    fn positions_follow_lines() {
        let tokens = Kind::lexer().tokenize("a\n  12").unwrap();
        assert_eq!(tokens[1].position, Position::with_line_and_column(1, 2));
        assert_eq!(tokens[1].text, "12");
    }

    #[test]
    fn unexpected_character_stops_iteration() {
        let lexer = Kind::lexer();
        let mut it = lexer.iter("a $ b");
        assert!(it.next().unwrap().is_ok());
        assert_eq!(
            it.next().unwrap(),
            Err(LexError::UnexpectedChar{ found: '$', position: Position::with_line_and_column(0, 2) })
        );
        assert!(it.next().is_none());
    }
}
