use std::collections::HashMap;
use std::mem;

use super::ast::{
    BinaryOp, BlockStatement, Expression, Position, Precedence, Program, Statement, UnaryOp,
};
use crate::error::{Error, Result};
use crate::lexer::{Token, TokenKind};

/// Handler invoked when a token starts an expression
type PrefixParseFn = fn(&mut Parser) -> Result<Expression>;

/// Handler invoked when a token continues an expression, given its left-hand side
type InfixParseFn = fn(&mut Parser, Expression) -> Result<Expression>;

/// Parser behaviour switches
#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Report a block that reaches end of input before its `}` as a syntax error.
    /// When off, end of input closes the block implicitly.
    pub strict_blocks: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            strict_blocks: true,
        }
    }
}

impl ParserConfig {
    /// Configuration that accepts end of input as an implicit block end
    pub fn lenient() -> Self {
        ParserConfig {
            strict_blocks: false,
        }
    }
}

/// Operator-precedence (Pratt) parser for Monkey
///
/// Pulls tokens one at a time and keeps exactly one token of lookahead (`current` +
/// `peek`). Syntax errors are collected rather than returned, so a single pass
/// reports every problem it can find while still building a best-effort
/// [`Program`].
pub struct Parser {
    tokens: Box<dyn Iterator<Item = Token>>,
    current: Token,
    peek: Token,
    errors: Vec<Error>,
    config: ParserConfig,
    prefix_fns: HashMap<TokenKind, PrefixParseFn>,
    infix_fns: HashMap<TokenKind, InfixParseFn>,
}

impl Parser {
    /// Creates a parser over a token stream with the default configuration
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'static,
    {
        Parser::with_config(tokens, ParserConfig::default())
    }

    /// Creates a parser over a token stream with an explicit configuration
    pub fn with_config<I>(tokens: I, config: ParserConfig) -> Self
    where
        I: IntoIterator<Item = Token>,
        I::IntoIter: 'static,
    {
        let mut parser = Parser {
            tokens: Box::new(tokens.into_iter()),
            current: Token::eof(1, 1),
            peek: Token::eof(1, 1),
            errors: Vec::new(),
            config,
            prefix_fns: HashMap::new(),
            infix_fns: HashMap::new(),
        };

        parser.register_prefix(TokenKind::Int, Parser::parse_integer_literal);
        parser.register_prefix(TokenKind::True, Parser::parse_boolean);
        parser.register_prefix(TokenKind::False, Parser::parse_boolean);
        parser.register_prefix(TokenKind::Bang, Parser::parse_prefix_expression);
        parser.register_prefix(TokenKind::Minus, Parser::parse_prefix_expression);
        parser.register_prefix(TokenKind::LParen, Parser::parse_grouped_expression);
        parser.register_prefix(TokenKind::If, Parser::parse_if_expression);

        for kind in [
            TokenKind::Plus,
            TokenKind::Minus,
            TokenKind::Asterisk,
            TokenKind::Slash,
            TokenKind::Lt,
            TokenKind::Gt,
            TokenKind::Eq,
            TokenKind::NotEq,
        ] {
            parser.register_infix(kind, Parser::parse_infix_expression);
        }

        // Fill current and peek
        parser.next_token();
        parser.next_token();
        parser
    }

    fn register_prefix(&mut self, kind: TokenKind, handler: PrefixParseFn) {
        self.prefix_fns.insert(kind, handler);
    }

    fn register_infix(&mut self, kind: TokenKind, handler: InfixParseFn) {
        self.infix_fns.insert(kind, handler);
    }

    /// Syntax errors collected so far, in source order
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Syntax errors rendered as human-readable strings
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Parses the whole token stream into a program
    ///
    /// Always returns a program; check [`Parser::errors`] before trusting it.
    pub fn parse_program(&mut self) -> Program {
        let mut statements = Vec::new();

        while !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => self.record(err),
            }
            self.next_token();
        }

        Program { statements }
    }

    /// Parses the token stream, failing if any syntax error was found
    pub fn parse(&mut self) -> Result<Program> {
        let program = self.parse_program();
        if self.errors.is_empty() {
            Ok(program)
        } else {
            Err(Error::Parse {
                errors: self.errors.clone(),
            })
        }
    }

    fn parse_statement(&mut self) -> Result<Statement> {
        match self.current.kind {
            TokenKind::Return => self.parse_return_statement(),
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_return_statement(&mut self) -> Result<Statement> {
        let position = Position::from(&self.current);

        let value = if matches!(
            self.peek.kind,
            TokenKind::Semicolon | TokenKind::RBrace | TokenKind::Eof
        ) {
            None
        } else {
            self.next_token();
            Some(self.parse_expression(Precedence::Lowest)?)
        };

        self.skip_statement_boundary();
        Ok(Statement::Return { value, position })
    }

    fn parse_expression_statement(&mut self) -> Result<Statement> {
        let position = Position::from(&self.current);
        let expression = self.parse_expression(Precedence::Lowest)?;

        self.skip_statement_boundary();
        Ok(Statement::Expression {
            expression,
            position,
        })
    }

    /// Consumes an optional `;` after a statement
    fn skip_statement_boundary(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.next_token();
        }
    }

    fn parse_expression(&mut self, precedence: Precedence) -> Result<Expression> {
        let prefix = self
            .prefix_fns
            .get(&self.current.kind)
            .copied()
            .ok_or_else(|| self.no_prefix_error())?;
        let mut left = prefix(self)?;

        while !self.peek_is(TokenKind::Semicolon) && precedence < self.peek_precedence() {
            let infix = match self.infix_fns.get(&self.peek.kind).copied() {
                Some(infix) => infix,
                None => return Ok(left),
            };
            self.next_token();
            left = infix(self, left)?;
        }

        Ok(left)
    }

    fn parse_integer_literal(&mut self) -> Result<Expression> {
        let value = self
            .current
            .literal
            .parse::<i64>()
            .map_err(|_| Error::InvalidInteger {
                literal: self.current.literal.clone(),
                line: self.current.line,
                col: self.current.column,
            })?;

        Ok(Expression::IntegerLiteral {
            value,
            position: Position::from(&self.current),
        })
    }

    fn parse_boolean(&mut self) -> Result<Expression> {
        Ok(Expression::Boolean {
            value: self.current_is(TokenKind::True),
            position: Position::from(&self.current),
        })
    }

    fn parse_prefix_expression(&mut self) -> Result<Expression> {
        let position = Position::from(&self.current);
        let operator =
            UnaryOp::from_token_kind(self.current.kind).ok_or_else(|| self.no_prefix_error())?;

        self.next_token();
        let right = self.parse_expression(Precedence::Prefix)?;

        Ok(Expression::Prefix {
            operator,
            right: Box::new(right),
            position,
        })
    }

    fn parse_infix_expression(&mut self, left: Expression) -> Result<Expression> {
        let position = Position::from(&self.current);
        let operator =
            BinaryOp::from_token_kind(self.current.kind).ok_or_else(|| self.no_prefix_error())?;

        self.next_token();
        let right = self.parse_expression(operator.precedence())?;

        Ok(Expression::Infix {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            position,
        })
    }

    fn parse_grouped_expression(&mut self) -> Result<Expression> {
        self.next_token();
        let expression = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;
        Ok(expression)
    }

    fn parse_if_expression(&mut self) -> Result<Expression> {
        let position = Position::from(&self.current);

        self.expect_peek(TokenKind::LParen)?;
        self.next_token();
        let condition = self.parse_expression(Precedence::Lowest)?;
        self.expect_peek(TokenKind::RParen)?;

        self.expect_peek(TokenKind::LBrace)?;
        let consequence = self.parse_block_statement()?;

        let alternative = if self.peek_is(TokenKind::Else) {
            self.next_token();
            self.expect_peek(TokenKind::LBrace)?;
            Some(self.parse_block_statement()?)
        } else {
            None
        };

        Ok(Expression::If {
            condition: Box::new(condition),
            consequence,
            alternative,
            position,
        })
    }

    /// Parses statements up to the matching `}`; `current` must be the opening `{`
    fn parse_block_statement(&mut self) -> Result<BlockStatement> {
        let position = Position::from(&self.current);
        let mut statements = Vec::new();

        self.next_token();
        while !self.current_is(TokenKind::RBrace) && !self.current_is(TokenKind::Eof) {
            match self.parse_statement() {
                Ok(statement) => statements.push(statement),
                Err(err) => self.record(err),
            }
            self.next_token();
        }

        if self.current_is(TokenKind::Eof) && self.config.strict_blocks {
            return Err(Error::UnterminatedBlock {
                line: self.current.line,
                col: self.current.column,
            });
        }

        Ok(BlockStatement {
            statements,
            position,
        })
    }

    // Helper methods

    fn next_token(&mut self) {
        let next = match self.tokens.next() {
            Some(token) => token,
            // Stream ended without its own Eof marker
            None => Token::eof(self.peek.line, self.peek.column),
        };
        self.current = mem::replace(&mut self.peek, next);
    }

    fn current_is(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    fn peek_precedence(&self) -> Precedence {
        BinaryOp::from_token_kind(self.peek.kind)
            .map(|op| op.precedence())
            .unwrap_or(Precedence::Lowest)
    }

    /// Advances only if the peek token has the expected kind
    fn expect_peek(&mut self, kind: TokenKind) -> Result<()> {
        if self.peek_is(kind) {
            self.next_token();
            Ok(())
        } else {
            Err(Error::UnexpectedToken {
                expected: kind,
                got: self.peek.kind,
                line: self.peek.line,
                col: self.peek.column,
            })
        }
    }

    fn no_prefix_error(&self) -> Error {
        Error::NoPrefixParseFn {
            kind: self.current.kind,
            line: self.current.line,
            col: self.current.column,
        }
    }

    fn record(&mut self, err: Error) {
        tracing::debug!(error = %err, "syntax error");
        self.errors.push(err);
    }
}
