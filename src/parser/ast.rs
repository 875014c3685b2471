use serde::{Deserialize, Serialize};
use std::fmt;

use crate::lexer::{Token, TokenKind};

/// Source position of a node, taken from the token that starts it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

impl Position {
    /// Creates a position from a line and column
    pub fn new(line: usize, column: usize) -> Self {
        Position { line, column }
    }
}

impl From<&Token> for Position {
    fn from(token: &Token) -> Self {
        Position::new(token.line, token.column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Complete Monkey program
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Program {
    /// Top-level statements in the program
    pub statements: Vec<Statement>,
}

impl Program {
    /// Literal of the first statement's leading token, empty for an empty program
    pub fn token_literal(&self) -> String {
        self.statements
            .first()
            .map(Statement::token_literal)
            .unwrap_or_default()
    }
}

/// Statements
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Statement {
    /// Expression statement: `expr;`
    Expression {
        /// The wrapped expression
        expression: Expression,
        /// Position of the expression's first token
        position: Position,
    },

    /// Return statement: `return expr;`
    Return {
        /// Optional value to return
        value: Option<Expression>,
        /// Position of the `return` keyword
        position: Position,
    },
}

impl Statement {
    /// Text of the token that starts this statement
    pub fn token_literal(&self) -> String {
        match self {
            Statement::Expression { expression, .. } => expression.token_literal(),
            Statement::Return { .. } => TokenKind::Return.to_string(),
        }
    }

    /// Position of the statement's first token
    pub fn position(&self) -> Position {
        match self {
            Statement::Expression { position, .. } | Statement::Return { position, .. } => {
                *position
            }
        }
    }
}

/// Brace-delimited sequence of statements owned by an `if` expression
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BlockStatement {
    /// Statements inside the braces
    pub statements: Vec<Statement>,
    /// Position of the opening `{`
    pub position: Position,
}

impl BlockStatement {
    /// Text of the opening brace
    pub fn token_literal(&self) -> String {
        TokenKind::LBrace.to_string()
    }
}

/// Expressions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expression {
    /// Integer literal expression
    IntegerLiteral {
        /// Literal value
        value: i64,
        /// Position of the literal
        position: Position,
    },

    /// Boolean literal expression
    Boolean {
        /// Literal value
        value: bool,
        /// Position of the keyword
        position: Position,
    },

    /// Prefix expression: `!x`, `-x`
    Prefix {
        /// Prefix operator
        operator: UnaryOp,
        /// Operand
        right: Box<Expression>,
        /// Position of the operator
        position: Position,
    },

    /// Infix expression: `a + b`
    Infix {
        /// Left operand
        left: Box<Expression>,
        /// Infix operator
        operator: BinaryOp,
        /// Right operand
        right: Box<Expression>,
        /// Position of the operator
        position: Position,
    },

    /// Conditional expression: `if (cond) { ... } else { ... }`
    If {
        /// Condition expression to evaluate
        condition: Box<Expression>,
        /// Block evaluated when the condition is truthy
        consequence: BlockStatement,
        /// Optional block evaluated otherwise
        alternative: Option<BlockStatement>,
        /// Position of the `if` keyword
        position: Position,
    },
}

impl Expression {
    /// Text of the token this node was built from
    pub fn token_literal(&self) -> String {
        match self {
            Expression::IntegerLiteral { value, .. } => value.to_string(),
            Expression::Boolean { value, .. } => value.to_string(),
            Expression::Prefix { operator, .. } => operator.to_string(),
            Expression::Infix { operator, .. } => operator.to_string(),
            Expression::If { .. } => TokenKind::If.to_string(),
        }
    }

    /// Position recorded for this node
    pub fn position(&self) -> Position {
        match self {
            Expression::IntegerLiteral { position, .. }
            | Expression::Boolean { position, .. }
            | Expression::Prefix { position, .. }
            | Expression::Infix { position, .. }
            | Expression::If { position, .. } => *position,
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    // Arithmetic
    /// Addition operator (+)
    Add,
    /// Subtraction operator (-)
    Sub,
    /// Multiplication operator (*)
    Mul,
    /// Division operator (/)
    Div,

    // Comparison
    /// Less than operator (<)
    Lt,
    /// Greater than operator (>)
    Gt,
    /// Equality operator (==)
    Eq,
    /// Inequality operator (!=)
    NotEq,
}

/// Unary (prefix) operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical negation (!)
    Not,
    /// Arithmetic negation (-)
    Neg,
}

/// Operator precedence levels, lowest binding first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    /// Starting level for a full expression
    Lowest,
    /// Equality operators (==, !=)
    Equals,
    /// Relational operators (<, >)
    LessGreater,
    /// Addition and subtraction (+, -)
    Sum,
    /// Multiplication and division (*, /)
    Product,
    /// Unary operators (!, -)
    Prefix,
    /// Grouping and call
    Call,
}

impl BinaryOp {
    /// Returns the precedence level of this binary operator
    pub fn precedence(&self) -> Precedence {
        match self {
            BinaryOp::Eq | BinaryOp::NotEq => Precedence::Equals,
            BinaryOp::Lt | BinaryOp::Gt => Precedence::LessGreater,
            BinaryOp::Add | BinaryOp::Sub => Precedence::Sum,
            BinaryOp::Mul | BinaryOp::Div => Precedence::Product,
        }
    }

    /// Maps an infix token kind to its operator
    pub fn from_token_kind(kind: TokenKind) -> Option<BinaryOp> {
        match kind {
            TokenKind::Plus => Some(BinaryOp::Add),
            TokenKind::Minus => Some(BinaryOp::Sub),
            TokenKind::Asterisk => Some(BinaryOp::Mul),
            TokenKind::Slash => Some(BinaryOp::Div),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Eq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::NotEq),
            _ => None,
        }
    }
}

impl UnaryOp {
    /// Maps a prefix token kind to its operator
    pub fn from_token_kind(kind: TokenKind) -> Option<UnaryOp> {
        match kind {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BinaryOp::Add => write!(f, "+"),
            BinaryOp::Sub => write!(f, "-"),
            BinaryOp::Mul => write!(f, "*"),
            BinaryOp::Div => write!(f, "/"),
            BinaryOp::Lt => write!(f, "<"),
            BinaryOp::Gt => write!(f, ">"),
            BinaryOp::Eq => write!(f, "=="),
            BinaryOp::NotEq => write!(f, "!="),
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnaryOp::Neg => write!(f, "-"),
            UnaryOp::Not => write!(f, "!"),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Statement::Expression { expression, .. } => write!(f, "{}", expression),
            Statement::Return {
                value: Some(value), ..
            } => write!(f, "return {};", value),
            Statement::Return { value: None, .. } => write!(f, "return;"),
        }
    }
}

impl fmt::Display for BlockStatement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for statement in &self.statements {
            write!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expression::IntegerLiteral { value, .. } => write!(f, "{}", value),
            Expression::Boolean { value, .. } => write!(f, "{}", value),
            Expression::Prefix {
                operator, right, ..
            } => write!(f, "({}{})", operator, right),
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => write!(f, "({} {} {})", left, operator, right),
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                write!(f, "if{} {}", condition, consequence)?;
                if let Some(alternative) = alternative {
                    write!(f, "else {}", alternative)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(value: i64) -> Expression {
        Expression::IntegerLiteral {
            value,
            position: Position::default(),
        }
    }

    #[test]
    fn test_precedence_ordering() {
        assert!(BinaryOp::NotEq.precedence() < BinaryOp::Lt.precedence());
        assert!(BinaryOp::Gt.precedence() < BinaryOp::Sub.precedence());
        assert!(BinaryOp::Add.precedence() < BinaryOp::Mul.precedence());
        assert!(BinaryOp::Div.precedence() < Precedence::Prefix);
        assert!(Precedence::Prefix < Precedence::Call);
    }

    #[test]
    fn test_operator_token_mapping() {
        assert_eq!(BinaryOp::from_token_kind(TokenKind::Slash), Some(BinaryOp::Div));
        assert_eq!(BinaryOp::from_token_kind(TokenKind::Bang), None);
        assert_eq!(UnaryOp::from_token_kind(TokenKind::Minus), Some(UnaryOp::Neg));
        assert_eq!(UnaryOp::from_token_kind(TokenKind::Plus), None);
    }

    #[test]
    fn test_display_and_token_literal() {
        let expr = Expression::Infix {
            left: Box::new(int(1)),
            operator: BinaryOp::Add,
            right: Box::new(Expression::Prefix {
                operator: UnaryOp::Neg,
                right: Box::new(int(2)),
                position: Position::default(),
            }),
            position: Position::new(1, 3),
        };
        assert_eq!(expr.to_string(), "(1 + (-2))");
        assert_eq!(expr.token_literal(), "+");
        assert_eq!(expr.position(), Position::new(1, 3));

        let program = Program {
            statements: vec![Statement::Return {
                value: Some(expr),
                position: Position::new(1, 1),
            }],
        };
        assert_eq!(program.to_string(), "return (1 + (-2));");
        assert_eq!(program.token_literal(), "return");
    }

    #[test]
    fn test_json_round_trip() {
        let program = Program {
            statements: vec![Statement::Expression {
                expression: Expression::Boolean {
                    value: true,
                    position: Position::new(1, 1),
                },
                position: Position::new(1, 1),
            }],
        };

        let json = serde_json::to_string(&program).unwrap();
        let decoded: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, program);
    }
}
