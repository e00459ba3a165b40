//! Hand-written lexer for guard snippets
//!
//! Keywords are plain identifiers; the parser decides by context. `>` is
//! always a single token so `List<Result<int>>` closes two type lists.

use crate::shared::models::{GuardError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Int(i64),
    Str(String),

    LParen,
    RParen,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    QuestionDot,
    Question,
    Arrow,
    Assign,

    Bang,
    EqEq,
    NotEq,
    AndAnd,
    OrOr,
    Lt,
    LtE,
    Gt,
    GtE,
    Plus,
    Minus,
    Star,
    Slash,

    Eof,
}

impl TokenKind {
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Ident(name) => format!("`{}`", name),
            TokenKind::Int(value) => format!("`{}`", value),
            TokenKind::Str(_) => "string literal".to_string(),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("`{}`", other.symbol()),
        }
    }

    fn symbol(&self) -> &'static str {
        match self {
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::Comma => ",",
            TokenKind::Semicolon => ";",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::QuestionDot => "?.",
            TokenKind::Question => "?",
            TokenKind::Arrow => "=>",
            TokenKind::Assign => "=",
            TokenKind::Bang => "!",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::AndAnd => "&&",
            TokenKind::OrOr => "||",
            TokenKind::Lt => "<",
            TokenKind::LtE => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtE => ">=",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Ident(_) | TokenKind::Int(_) | TokenKind::Str(_) | TokenKind::Eof => "",
        }
    }
}

/// Token with its position (1-based line, 0-based columns)
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub line: u32,
    pub col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

/// Lex `source`; the last token is always `Eof`
pub fn lex(file_path: &str, source: &str) -> Result<Vec<Token>> {
    Lexer::new(file_path, source).scan_all()
}

struct Lexer<'s> {
    file_path: &'s str,
    chars: Vec<char>,
    pos: usize,
    line: u32,
    col: u32,
}

impl<'s> Lexer<'s> {
    fn new(file_path: &'s str, source: &str) -> Self {
        Self {
            file_path,
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    fn scan_all(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia()?;
            let (line, col) = (self.line, self.col);
            let Some(ch) = self.peek() else {
                tokens.push(Token {
                    kind: TokenKind::Eof,
                    line,
                    col,
                    end_line: line,
                    end_col: col,
                });
                return Ok(tokens);
            };
            let kind = self.scan_token(ch)?;
            tokens.push(Token {
                kind,
                line,
                col,
                end_line: self.line,
                end_col: self.col,
            });
        }
    }

    fn scan_token(&mut self, ch: char) -> Result<TokenKind> {
        if ch.is_alphabetic() || ch == '_' || ch == '@' {
            return Ok(self.identifier());
        }
        if ch.is_ascii_digit() {
            return self.number();
        }
        if ch == '"' {
            return self.string();
        }

        self.advance();
        let kind = match ch {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '?' => {
                // `a ?.5 : b` is a conditional with a number, not `?.`
                let digit_follows = self.peek_next().is_some_and(|c| c.is_ascii_digit());
                if self.peek() == Some('.') && !digit_follows {
                    self.advance();
                    TokenKind::QuestionDot
                } else {
                    TokenKind::Question
                }
            }
            '=' if self.match_char('=') => TokenKind::EqEq,
            '=' if self.match_char('>') => TokenKind::Arrow,
            '=' => TokenKind::Assign,
            '!' if self.match_char('=') => TokenKind::NotEq,
            '!' => TokenKind::Bang,
            '&' if self.match_char('&') => TokenKind::AndAnd,
            '|' if self.match_char('|') => TokenKind::OrOr,
            '<' if self.match_char('=') => TokenKind::LtE,
            '<' => TokenKind::Lt,
            '>' if self.match_char('=') => TokenKind::GtE,
            '>' => TokenKind::Gt,
            other => return Err(self.error(format!("unexpected character `{}`", other))),
        };
        Ok(kind)
    }

    fn identifier(&mut self) -> TokenKind {
        // Verbatim identifiers (`@class`) drop the prefix
        if self.peek() == Some('@') {
            self.advance();
        }
        let mut name = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_alphanumeric() || c == '_') {
                break;
            }
            name.push(c);
            self.advance();
        }
        TokenKind::Ident(name)
    }

    fn number(&mut self) -> Result<TokenKind> {
        let mut digits = String::new();
        while let Some(c) = self.peek() {
            if !(c.is_ascii_digit() || c == '_') {
                break;
            }
            if c != '_' {
                digits.push(c);
            }
            self.advance();
        }
        digits
            .parse::<i64>()
            .map(TokenKind::Int)
            .map_err(|_| self.error(format!("integer literal `{}` out of range", digits)))
    }

    fn string(&mut self) -> Result<TokenKind> {
        self.advance();
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => return Err(self.error("unterminated string literal")),
                Some('"') => {
                    self.advance();
                    return Ok(TokenKind::Str(value));
                }
                Some('\\') => {
                    self.advance();
                    let escaped = match self.peek() {
                        Some('n') => '\n',
                        Some('t') => '\t',
                        Some(c) => c,
                        None => return Err(self.error("unterminated string literal")),
                    };
                    value.push(escaped);
                    self.advance();
                }
                Some(c) => {
                    value.push(c);
                    self.advance();
                }
            }
        }
    }

    fn skip_trivia(&mut self) -> Result<()> {
        loop {
            match (self.peek(), self.peek_next()) {
                (Some(c), _) if c.is_whitespace() => {
                    self.advance();
                }
                (Some('/'), Some('/')) => {
                    while self.peek().is_some_and(|c| c != '\n') {
                        self.advance();
                    }
                }
                (Some('/'), Some('*')) => {
                    self.advance();
                    self.advance();
                    loop {
                        match (self.peek(), self.peek_next()) {
                            (Some('*'), Some('/')) => {
                                self.advance();
                                self.advance();
                                break;
                            }
                            (Some(_), _) => {
                                self.advance();
                            }
                            (None, _) => return Err(self.error("unterminated block comment")),
                        }
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    // -- Helpers --

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_next(&self) -> Option<char> {
        self.chars.get(self.pos + 1).copied()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek() {
            self.pos += 1;
            if c == '\n' {
                self.line += 1;
                self.col = 0;
            } else {
                self.col += 1;
            }
        }
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn error(&self, message: impl Into<String>) -> GuardError {
        GuardError::parse(message)
            .with_file(self.file_path)
            .with_line(self.line)
    }
}
