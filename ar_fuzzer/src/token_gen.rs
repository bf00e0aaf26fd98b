/**
 * Token stream generation strategies.
 */

use std::ops::Range;
use ar_token::{Position, Token, TokenKind};
use crate::rnd::*;

/// Every generated token is a word, grammars distinguish them by text.
#[derive(TokenKind, Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Sym {
    #[ident]
    Word,
}

pub trait TokenGenStrategy {
    fn generate(&self) -> Vec<Token<Sym>>;
}

/// Lays out words on a single line, separated by one space.
pub fn tokens_from_words<S>(words: &[S]) -> Vec<Token<Sym>> where S : AsRef<str> {
    let mut position = Position::new();
    let mut result = Vec::with_capacity(words.len());
    for word in words {
        let word = word.as_ref();
        result.push(Token::new(Sym::Word, word, position));
        position.advance_columns(word.chars().count() + 1);
    }
    result
}

/**
 * Random words from an alphabet.
 */

pub struct RandomTokenGenerator {
    len: Range<usize>,
    alphabet: Vec<String>,
}

impl RandomTokenGenerator {
    pub fn with_len_and_alphabet(len: Range<usize>, alphabet: &[&str]) -> Self {
        Self{ len, alphabet: alphabet.iter().map(|s| s.to_string()).collect() }
    }
}

impl TokenGenStrategy for RandomTokenGenerator {
    fn generate(&self) -> Vec<Token<Sym>> {
        let len = rand_range(&self.len);
        let words: Vec<&String> = (0..len).map(|_| sample(&self.alphabet)).collect();
        tokens_from_words(&words)
    }
}

/**
 * Repeats a fixed phrase with random noise between the repetitions, so
 * longer matches actually happen.
 */

pub struct PhraseTokenGenerator {
    phrase: Vec<String>,
    repeats: Range<usize>,
    noise: RandomTokenGenerator,
}

impl PhraseTokenGenerator {
    pub fn new(phrase: &[&str], repeats: Range<usize>, noise: RandomTokenGenerator) -> Self {
        Self{ phrase: phrase.iter().map(|s| s.to_string()).collect(), repeats, noise }
    }
}

impl TokenGenStrategy for PhraseTokenGenerator {
    fn generate(&self) -> Vec<Token<Sym>> {
        let mut words = Vec::new();
        for _ in 0..rand_range(&self.repeats) {
            words.extend(self.phrase.iter().cloned());
            words.extend(self.noise.generate().into_iter().map(|t| t.text));
        }
        tokens_from_words(&words)
    }
}

/**
 * Chooses from a collection of strategies and uses that.
 */

pub struct RandomTokens {
    strats: Vec<Box<dyn TokenGenStrategy>>,
}

impl RandomTokens {
    pub fn new() -> Self {
        Self{ strats: Vec::new() }
    }

    pub fn add<G>(&mut self, g: G) where G : TokenGenStrategy + 'static {
        self.strats.push(Box::new(g));
    }
}

impl TokenGenStrategy for RandomTokens {
    fn generate(&self) -> Vec<Token<Sym>> {
        sample(&self.strats).generate()
    }
}
