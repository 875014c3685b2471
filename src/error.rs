//! Error types for the Monkey interpreter
//!
//! Two channels are kept apart here. [`Error`] is the syntax channel (collected by the
//! parser) plus the host-facing wrappers returned by [`crate::run`] and
//! [`crate::Evaluator::execute`]. [`RuntimeError`] is the runtime channel: it never
//! travels as an `Err`, it rides inside [`crate::Object::Error`] through ordinary
//! evaluation results.

use thiserror::Error;

use crate::lexer::TokenKind;
use crate::parser::{BinaryOp, UnaryOp};
use crate::runtime::ObjectType;

/// Monkey interpreter errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Parse errors
    /// No prefix handler is registered for the token that starts an expression
    ///
    /// **Triggered by:** a token that cannot begin an expression
    /// **Example:** `)`, `;` at statement start, an identifier, `fn`
    #[error("Syntax error at line {line}, column {col}: no prefix parse function for `{kind}` found")]
    NoPrefixParseFn {
        /// Kind of the offending token
        kind: TokenKind,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
    },

    /// The next token is not the one the grammar requires
    ///
    /// **Triggered by:** missing delimiters
    /// **Example:** `(1 + 2` (missing closing parenthesis), `if 1 { 2 }`
    #[error("Syntax error at line {line}, column {col}: expected next token to be `{expected}`, got `{got}` instead")]
    UnexpectedToken {
        /// Token kind the parser required
        expected: TokenKind,
        /// Token kind actually found
        got: TokenKind,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
    },

    /// Integer literal does not fit in a signed 64-bit integer
    #[error("Syntax error at line {line}, column {col}: could not parse `{literal}` as integer")]
    InvalidInteger {
        /// Literal text as written
        literal: String,
        /// Line number where error occurred
        line: usize,
        /// Column number where error occurred
        col: usize,
    },

    /// End of input reached before a block's closing `}`
    ///
    /// Only reported when [`crate::ParserConfig::strict_blocks`] is set.
    #[error("Syntax error at line {line}, column {col}: expected `}}` to close block, found end of input")]
    UnterminatedBlock {
        /// Line of the end-of-input token
        line: usize,
        /// Column of the end-of-input token
        col: usize,
    },

    /// Parsing finished with one or more syntax errors
    #[error("Parse failed with {} error(s):\n{}", .errors.len(), render_errors(.errors))]
    Parse {
        /// Every syntax error the parser collected, in source order
        errors: Vec<Error>,
    },

    // Runtime errors
    /// Evaluation produced an error object
    #[error("Runtime error: {0}")]
    Runtime(#[from] RuntimeError),
}

/// Runtime faults carried by [`crate::Object::Error`]
///
/// The `Display` output of each variant is the exact error message users see, so it
/// must stay stable.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Operands of an infix expression have different types
    ///
    /// **Example:** `5 + true`
    #[error("type mismatch: {left} {op} {right}")]
    TypeMismatch {
        /// Left operand type
        left: ObjectType,
        /// Infix operator
        op: BinaryOp,
        /// Right operand type
        right: ObjectType,
    },

    /// Prefix operator is not defined for the operand type
    ///
    /// **Example:** `-true`
    #[error("unknown operator: {op}{operand}")]
    UnknownPrefixOperator {
        /// Prefix operator
        op: UnaryOp,
        /// Operand type
        operand: ObjectType,
    },

    /// Infix operator is not defined for two operands of the same type
    ///
    /// **Example:** `true + false`
    #[error("unknown operator: {left} {op} {right}")]
    UnknownInfixOperator {
        /// Left operand type
        left: ObjectType,
        /// Infix operator
        op: BinaryOp,
        /// Right operand type
        right: ObjectType,
    },

    /// Integer division with a zero divisor
    #[error("division by zero: {left} / 0")]
    DivisionByZero {
        /// Dividend
        left: i64,
    },
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The program cannot be run at all
    Fatal,
    /// The current evaluation stopped, the host may carry on with new input
    Recoverable,
}

impl Error {
    /// Classify error severity
    pub fn classify(&self) -> ErrorSeverity {
        match self {
            Error::NoPrefixParseFn { .. }
            | Error::UnexpectedToken { .. }
            | Error::InvalidInteger { .. }
            | Error::UnterminatedBlock { .. }
            | Error::Parse { .. } => ErrorSeverity::Fatal,

            Error::Runtime(_) => ErrorSeverity::Recoverable,
        }
    }

    /// Line and column of a syntax error, if it has one
    pub fn position(&self) -> Option<(usize, usize)> {
        match self {
            Error::NoPrefixParseFn { line, col, .. }
            | Error::UnexpectedToken { line, col, .. }
            | Error::InvalidInteger { line, col, .. }
            | Error::UnterminatedBlock { line, col } => Some((*line, *col)),
            Error::Parse { .. } | Error::Runtime(_) => None,
        }
    }
}

fn render_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .map(|e| format!("\t{}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Result type for Monkey operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runtime_messages_are_exact() {
        let err = RuntimeError::TypeMismatch {
            left: ObjectType::Integer,
            op: BinaryOp::Add,
            right: ObjectType::Boolean,
        };
        assert_eq!(err.to_string(), "type mismatch: INTEGER + BOOLEAN");

        let err = RuntimeError::UnknownPrefixOperator {
            op: UnaryOp::Neg,
            operand: ObjectType::Boolean,
        };
        assert_eq!(err.to_string(), "unknown operator: -BOOLEAN");

        let err = RuntimeError::DivisionByZero { left: 5 };
        assert_eq!(err.to_string(), "division by zero: 5 / 0");
    }

    #[test]
    fn test_classify() {
        let syntax = Error::UnterminatedBlock { line: 1, col: 9 };
        assert_eq!(syntax.classify(), ErrorSeverity::Fatal);
        assert_eq!(syntax.position(), Some((1, 9)));

        let runtime = Error::from(RuntimeError::DivisionByZero { left: 1 });
        assert_eq!(runtime.classify(), ErrorSeverity::Recoverable);
        assert_eq!(runtime.position(), None);
        assert_eq!(runtime.to_string(), "Runtime error: division by zero: 1 / 0");
    }

    #[test]
    fn test_parse_error_lists_every_error() {
        let err = Error::Parse {
            errors: vec![
                Error::UnterminatedBlock { line: 1, col: 5 },
                Error::NoPrefixParseFn {
                    kind: TokenKind::RParen,
                    line: 2,
                    col: 1,
                },
            ],
        };
        let text = err.to_string();
        assert!(text.starts_with("Parse failed with 2 error(s):"));
        assert!(text.contains("no prefix parse function for `)` found"));
    }
}
