/**
 * Read head over the token stream with backtracking checkpoints.
 */

use ar_token::Token;
use crate::failure::Failure;

/// Handle returned by `save`. Restoring it is idempotent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    depth: usize,
    position: usize,
}

impl Checkpoint {
    pub fn position(&self) -> usize {
        self.position
    }
}

#[derive(Debug, Clone)]
pub struct ParseCursor<'a, K> {
    tokens: &'a [Token<K>],
    position: usize,
    checkpoints: Vec<usize>,
}

impl <'a, K> ParseCursor<'a, K> {
    pub fn new(tokens: &'a [Token<K>]) -> Self {
        Self{ tokens, position: 0, checkpoints: Vec::new() }
    }

    pub fn tokens(&self) -> &'a [Token<K>] {
        self.tokens
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_at_end(&self) -> bool {
        self.position == self.tokens.len()
    }

    /// Number of checkpoints not yet restored or committed.
    pub fn depth(&self) -> usize {
        self.checkpoints.len()
    }

    pub fn peek(&self) -> Option<&'a Token<K>> {
        self.tokens.get(self.position)
    }

    pub fn advance(&mut self) -> Result<&'a Token<K>, Failure> {
        match self.tokens.get(self.position) {
            Some(token) => {
                self.position += 1;
                Ok(token)
            },
            None => Err(Failure::end_of_stream(self.position)),
        }
    }

    pub fn save(&mut self) -> Checkpoint {
        let depth = self.checkpoints.len();
        self.checkpoints.push(self.position);
        Checkpoint{ depth, position: self.position }
    }

    /// Goes back to the checkpoint, dropping it and every checkpoint taken after it.
    pub fn restore(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.depth >= self.checkpoints.len()
            || self.checkpoints[checkpoint.depth] == checkpoint.position);
        self.position = checkpoint.position;
        self.checkpoints.truncate(checkpoint.depth);
    }

    /// Drops the checkpoint but keeps the current position.
    pub fn commit(&mut self, checkpoint: Checkpoint) {
        debug_assert!(checkpoint.position <= self.position);
        self.checkpoints.truncate(checkpoint.depth);
    }

    /// Moves the read head without touching the checkpoints.
    pub(crate) fn seek(&mut self, position: usize) {
        debug_assert!(position <= self.tokens.len());
        self.position = position;
    }
}
