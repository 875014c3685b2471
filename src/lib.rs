//! # Monkey - execution core
//!
//! Parser and tree-walking evaluator for a small expression language: integer and
//! boolean literals, prefix `!`/`-`, infix arithmetic and comparison, grouping,
//! `if`/`else` with blocks, and `return`.
//!
//! ## Quick Start
//!
//! ```rust
//! use monkey::{Evaluator, Lexer, Object, Parser};
//!
//! # fn main() -> monkey::Result<()> {
//! // Tokenize (pull-based)
//! let lexer = Lexer::new("if (5 * 2 > 9) { return 5 + 5 * 2; } 0");
//!
//! // Parse into AST
//! let mut parser = Parser::new(lexer);
//! let program = parser.parse()?;
//!
//! // Execute
//! let evaluator = Evaluator::new();
//! let result = evaluator.execute(&program)?;
//!
//! assert_eq!(result, Object::Integer(15));
//! # Ok(())
//! # }
//! ```
//!
//! Or in one step:
//!
//! ```rust
//! assert_eq!(monkey::run("(5 + 5) * 2").unwrap().inspect(), "20");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Source Code → Lexer → Tokens → Parser → AST → Evaluator → Object
//! ```
//!
//! - [`Lexer`] - Iterator of classified tokens, ending with `Eof`
//! - [`Parser`] - Pratt parser; collects syntax errors instead of stopping at the first
//! - [`Evaluator`] - Walks the AST, returning an [`Object`] for every node
//! - [`Object`] - Runtime values plus the `ReturnValue` / `Error` control-flow wrappers
//!
//! ## Error Handling
//!
//! Syntax errors are collected by the parser as [`Error`] values. Runtime faults are
//! ordinary [`Object::Error`] results that propagate through evaluation:
//!
//! ```rust
//! use monkey::{Evaluator, Lexer, Parser};
//!
//! let program = Parser::new(Lexer::new("5 + true; 10")).parse().unwrap();
//! let result = Evaluator::new().eval(&program);
//!
//! assert_eq!(result.error_message().as_deref(), Some("type mismatch: INTEGER + BOOLEAN"));
//! ```

/// Version of the Monkey interpreter
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error;
pub mod lexer;
pub mod parser;
pub mod runtime;

// Re-export main types
pub use error::{Error, ErrorSeverity, Result, RuntimeError};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::{
    BinaryOp, BlockStatement, Expression, Parser, ParserConfig, Position, Program, Statement,
    UnaryOp,
};
pub use runtime::{Evaluator, Node, Object, ObjectType, FALSE, NULL, TRUE};

/// Lexes, parses and executes source text
///
/// Fails with [`Error::Parse`] if the source has syntax errors and with
/// [`Error::Runtime`] if evaluation ends in an error object.
pub fn run(source: &str) -> Result<Object> {
    let program = Parser::new(Lexer::new(source)).parse()?;
    Evaluator::new().execute(&program)
}
