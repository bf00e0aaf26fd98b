/**
 * Token model and the builtin character-class lexer.
 */

extern crate ar_token_derive;

mod error;
mod position;
mod token;
mod lexer;

pub use ar_token_derive::TokenKind;

pub use error::LexError;
pub use position::Position;
pub use token::{Token, TokenKind};
pub use lexer::{Lexer, LexRule, LexerState, Iter};
