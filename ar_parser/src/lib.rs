/**
 * Backtracking matchers over token streams, the syntax trees they build and
 * chainable queries over those trees.
 */

extern crate ar_token;
extern crate thiserror;
extern crate log;

mod analysis;
mod cursor;
mod engine;
mod error;
mod failure;
mod grammar;
mod matcher;
mod node;
mod parser;
mod printer;
mod select;
mod tree;
mod walker;
pub mod expr;

pub use cursor::{Checkpoint, ParseCursor};
pub use error::{GrammarError, IndexOutOfRange, ParseError};
pub use expr::Expr;
pub use failure::{Failure, FailureKind, Found, FurthestFailure};
pub use grammar::{Entry, Grammar, GrammarBuilder, RuleDefinition, RuleInfo, RuleTable};
pub use matcher::{Matcher, MatcherId, MatcherKind, RuleId, RuleShape};
pub use node::{AstNode, TypeMatch};
pub use parser::{Parser, ParserConfig};
pub use select::{AstSelect, Cardinality, Iter};
pub use tree::{NodeId, NodeType, SyntaxTree};
pub use walker::{walk, AstVisitor};
