use super::token::{Token, TokenKind};

/// Pull-based scanner for Monkey source text
///
/// Yields tokens one at a time through [`Iterator`], ending with exactly one
/// [`TokenKind::Eof`] token. Unrecognised characters become [`TokenKind::Illegal`]
/// tokens, so scanning itself never fails.
pub struct Lexer {
    /// Source code as character vector
    source: Vec<char>,
    /// Current position in source
    current: usize,
    /// Current line number (1-indexed)
    line: usize,
    /// Current column number (1-indexed)
    column: usize,
    /// Set once the end-of-input token has been handed out
    finished: bool,
}

impl Lexer {
    /// Creates a new scanner over the given source code
    pub fn new(source: &str) -> Self {
        Lexer {
            source: source.chars().collect(),
            current: 0,
            line: 1,
            column: 1,
            finished: false,
        }
    }

    /// Scans all remaining tokens, including the trailing `Eof`
    pub fn scan_tokens(&mut self) -> Vec<Token> {
        self.by_ref().collect()
    }

    /// Produces the next token, or `Eof` once the source is exhausted
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.current;
        let line = self.line;
        let column = self.column;

        if self.is_at_end() {
            return Token::eof(line, column);
        }

        let c = self.advance();
        let kind = match c {
            '=' => {
                if self.match_char('=') {
                    TokenKind::Eq
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.match_char('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                }
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Asterisk,
            '/' => TokenKind::Slash,
            '<' => TokenKind::Lt,
            '>' => TokenKind::Gt,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            c if c.is_ascii_digit() => {
                while self.peek().is_ascii_digit() {
                    self.advance();
                }
                TokenKind::Int
            }
            c if is_identifier_start(c) => {
                while is_identifier_part(self.peek()) {
                    self.advance();
                }
                let text: String = self.source[start..self.current].iter().collect();
                let kind = TokenKind::keyword(&text).unwrap_or(TokenKind::Ident);
                return Token::new(kind, text, line, column);
            }
            _ => TokenKind::Illegal,
        };

        let text: String = self.source[start..self.current].iter().collect();
        Token::new(kind, text, line, column)
    }

    fn skip_whitespace(&mut self) {
        while !self.is_at_end() {
            match self.peek() {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '\n' => {
                    self.current += 1;
                    self.line += 1;
                    self.column = 1;
                }
                _ => break,
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> char {
        let c = self.source[self.current];
        self.current += 1;
        self.column += 1;
        c
    }

    fn peek(&self) -> char {
        if self.is_at_end() {
            '\0'
        } else {
            self.source[self.current]
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            false
        } else {
            self.current += 1;
            self.column += 1;
            true
        }
    }
}

impl Iterator for Lexer {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.finished = true;
        }
        Some(token)
    }
}

fn is_identifier_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_identifier_part(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
