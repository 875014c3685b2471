use crate::error::{Error, Result, RuntimeError};
use crate::parser::{BinaryOp, BlockStatement, Expression, Program, Statement, UnaryOp};
use crate::runtime::object::{Object, NULL};

/// Returns early from the enclosing evaluation step if the object is a
/// `ReturnValue` or `Error`, otherwise yields it.
macro_rules! propagate {
    ($obj:expr) => {{
        let obj = $obj;
        if obj.is_control_flow() {
            return obj;
        }
        obj
    }};
}

/// Any AST root the evaluator accepts
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    /// Whole program
    Program(&'a Program),
    /// Single statement
    Statement(&'a Statement),
    /// Brace-delimited block
    Block(&'a BlockStatement),
    /// Single expression
    Expression(&'a Expression),
}

impl<'a> From<&'a Program> for Node<'a> {
    fn from(program: &'a Program) -> Self {
        Node::Program(program)
    }
}

impl<'a> From<&'a Statement> for Node<'a> {
    fn from(statement: &'a Statement) -> Self {
        Node::Statement(statement)
    }
}

impl<'a> From<&'a BlockStatement> for Node<'a> {
    fn from(block: &'a BlockStatement) -> Self {
        Node::Block(block)
    }
}

impl<'a> From<&'a Expression> for Node<'a> {
    fn from(expression: &'a Expression) -> Self {
        Node::Expression(expression)
    }
}

/// Tree-walking evaluator
///
/// Every node evaluates to an [`Object`]. Early returns and runtime faults travel
/// upward as `ReturnValue` / `Error` objects; each step that consumes a sub-result
/// checks for them first and hands them on unchanged, so no sibling after the
/// faulting node is evaluated.
///
/// The evaluator holds no state: two evaluations never influence each other.
#[derive(Debug, Clone, Copy, Default)]
pub struct Evaluator;

impl Evaluator {
    /// Creates a new evaluator
    pub fn new() -> Self {
        Evaluator
    }

    /// Evaluates any AST root to an object
    pub fn eval<'a>(&self, node: impl Into<Node<'a>>) -> Object {
        match node.into() {
            Node::Program(program) => self.eval_program(program),
            Node::Statement(statement) => self.eval_statement(statement),
            Node::Block(block) => self.eval_block(block),
            Node::Expression(expression) => self.eval_expression(expression),
        }
    }

    /// Executes a program, surfacing a final error object as `Err`
    pub fn execute(&self, program: &Program) -> Result<Object> {
        tracing::trace!(statements = program.statements.len(), "executing program");

        match self.eval_program(program) {
            Object::Error(err) => Err(Error::Runtime(err)),
            result => {
                tracing::trace!(result = %result, "program finished");
                Ok(result)
            }
        }
    }

    /// Top level: a `return` ends the program and yields its bare value
    fn eval_program(&self, program: &Program) -> Object {
        let mut result = NULL;

        for statement in &program.statements {
            result = self.eval_statement(statement);

            if let Object::ReturnValue(_) = result {
                return result.unwrap_return();
            }
            if result.is_error() {
                return result;
            }
        }

        result
    }

    /// Nested level: wrappers are handed on still wrapped
    fn eval_block(&self, block: &BlockStatement) -> Object {
        let mut result = NULL;

        for statement in &block.statements {
            result = propagate!(self.eval_statement(statement));
        }

        result
    }

    fn eval_statement(&self, statement: &Statement) -> Object {
        match statement {
            Statement::Expression { expression, .. } => self.eval_expression(expression),
            Statement::Return { value, .. } => {
                let value = match value {
                    Some(expression) => propagate!(self.eval_expression(expression)),
                    None => NULL,
                };
                Object::ReturnValue(Box::new(value))
            }
        }
    }

    fn eval_expression(&self, expression: &Expression) -> Object {
        match expression {
            Expression::IntegerLiteral { value, .. } => Object::Integer(*value),
            Expression::Boolean { value, .. } => Object::from_native_bool(*value),
            Expression::Prefix {
                operator, right, ..
            } => {
                let right = propagate!(self.eval_expression(right));
                self.eval_prefix(*operator, right)
            }
            Expression::Infix {
                left,
                operator,
                right,
                ..
            } => {
                let left = propagate!(self.eval_expression(left));
                let right = propagate!(self.eval_expression(right));
                self.eval_infix(*operator, left, right)
            }
            Expression::If {
                condition,
                consequence,
                alternative,
                ..
            } => {
                let condition = propagate!(self.eval_expression(condition));
                if condition.is_truthy() {
                    self.eval_block(consequence)
                } else if let Some(alternative) = alternative {
                    self.eval_block(alternative)
                } else {
                    NULL
                }
            }
        }
    }

    fn eval_prefix(&self, operator: UnaryOp, right: Object) -> Object {
        match operator {
            UnaryOp::Not => Object::from_native_bool(!right.is_truthy()),
            UnaryOp::Neg => match right {
                Object::Integer(n) => Object::Integer(n.wrapping_neg()),
                other => Object::error(RuntimeError::UnknownPrefixOperator {
                    op: operator,
                    operand: other.object_type(),
                }),
            },
        }
    }

    fn eval_infix(&self, operator: BinaryOp, left: Object, right: Object) -> Object {
        match (&left, &right) {
            (Object::Integer(l), Object::Integer(r)) => self.eval_integer_infix(operator, *l, *r),
            (Object::Boolean(l), Object::Boolean(r)) => match operator {
                BinaryOp::Eq => Object::from_native_bool(l == r),
                BinaryOp::NotEq => Object::from_native_bool(l != r),
                _ => unknown_infix(operator, &left, &right),
            },
            _ if left.object_type() != right.object_type() => {
                Object::error(RuntimeError::TypeMismatch {
                    left: left.object_type(),
                    op: operator,
                    right: right.object_type(),
                })
            }
            _ => unknown_infix(operator, &left, &right),
        }
    }

    fn eval_integer_infix(&self, operator: BinaryOp, left: i64, right: i64) -> Object {
        match operator {
            BinaryOp::Add => Object::Integer(left.wrapping_add(right)),
            BinaryOp::Sub => Object::Integer(left.wrapping_sub(right)),
            BinaryOp::Mul => Object::Integer(left.wrapping_mul(right)),
            BinaryOp::Div => {
                if right == 0 {
                    Object::error(RuntimeError::DivisionByZero { left })
                } else {
                    Object::Integer(left.wrapping_div(right))
                }
            }
            BinaryOp::Lt => Object::from_native_bool(left < right),
            BinaryOp::Gt => Object::from_native_bool(left > right),
            BinaryOp::Eq => Object::from_native_bool(left == right),
            BinaryOp::NotEq => Object::from_native_bool(left != right),
        }
    }
}

fn unknown_infix(operator: BinaryOp, left: &Object, right: &Object) -> Object {
    Object::error(RuntimeError::UnknownInfixOperator {
        left: left.object_type(),
        op: operator,
        right: right.object_type(),
    })
}
