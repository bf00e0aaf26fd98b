/**
 * The driver: runs an entry point over a whole token stream.
 */

use std::sync::Arc;
use log::debug;
use ar_token::{Token, TokenKind};
use crate::cursor::ParseCursor;
use crate::engine;
use crate::error::ParseError;
use crate::failure::Failure;
use crate::grammar::{Entry, Grammar};
use crate::tree::SyntaxTree;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// The entry has to consume every token
    pub require_complete: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self{ require_complete: true }
    }
}

#[derive(Debug, Clone)]
pub struct Parser<K> {
    grammar: Arc<Grammar<K>>,
    entry: Entry,
    config: ParserConfig,
}

impl <K> Parser<K> where K : TokenKind {
    pub fn new(grammar: impl Into<Arc<Grammar<K>>>, entry: impl Into<Entry>) -> Self {
        Self{ grammar: grammar.into(), entry: entry.into(), config: ParserConfig::default() }
    }

    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    pub fn grammar(&self) -> &Arc<Grammar<K>> {
        &self.grammar
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn parse(&self, tokens: &[Token<K>]) -> Result<SyntaxTree<K>, ParseError> {
        let mut cursor = ParseCursor::new(tokens);
        let (result, mut furthest) = engine::run(&self.grammar, self.entry, &mut cursor);
        match result {
            Ok(tree) if !self.config.require_complete || cursor.is_at_end() => {
                debug!("parsed {} token(s) into {} node(s)", cursor.position(), tree.len());
                Ok(tree)
            },
            Ok(_) => {
                let rest = Failure::at(tokens, cursor.position()).expecting("end of input");
                furthest.record(&rest);
                let failure = Failure::unify_option(furthest.into_inner(), rest);
                debug!("parse stopped early: {}", failure);
                Err(failure.into())
            },
            Err(failure) => {
                let failure = Failure::unify_option(furthest.into_inner(), failure);
                debug!("parse failed: {}", failure);
                Err(failure.into())
            },
        }
    }
}
