//! Lexical analysis for Monkey
//!
//! Converts source text into a pull-based stream of classified tokens.

mod scanner;
mod token;

pub use scanner::Lexer;
pub use token::{Token, TokenKind};
