//! Monkey Parser Module
//!
//! Parses a token stream into an Abstract Syntax Tree (AST) using operator-precedence
//! (Pratt) parsing.

mod ast;
mod pratt;

pub use ast::{
    BinaryOp, BlockStatement, Expression, Position, Precedence, Program, Statement, UnaryOp,
};
pub use pratt::{Parser, ParserConfig};
