//! Recursive-descent parser for guard snippets
//!
//! Accepts the C# subset the analysis understands: methods and fields at the
//! top level; blocks, `if`/`else`, `return`, local declarations and
//! expression statements; lambdas, conditionals, short-circuit and
//! comparison operators, `is` patterns, `?.`, invocations with named and
//! `out` arguments, `await`. Anything else is a parse error with a line.
//!
//! Simple type names are resolved through the `ImportTable`, so snippets can
//! write `Result<int>` and still match fully-qualified families.

use super::lexer::{lex, Token, TokenKind};
use crate::adapters::oracle::ImportTable;
use crate::shared::models::{
    Argument, BinaryOp, GuardError, Literal, NodeId, NodeKind, Pattern, Result, Span, SyntaxTree,
    TreeBuilder, TypeRef, UnaryOp,
};

const KEYWORDS: &[&str] = &[
    "if", "else", "return", "var", "out", "await", "async", "this", "true", "false", "null", "is",
    "new", "void",
];

const MODIFIERS: &[&str] = &[
    "public", "private", "protected", "internal", "static", "readonly", "override", "virtual",
];

/// Parse one snippet into a validated tree
pub fn parse_tree(file_path: &str, source: &str, imports: &ImportTable) -> Result<SyntaxTree> {
    let tokens = lex(file_path, source)?;
    let mut parser = Parser::new(file_path, tokens, imports);
    let root = parser.compilation_unit()?;
    parser.builder.build(root)
}

type Position = (u32, u32);

type BinaryLevel<'t> = fn(&mut Parser<'t>) -> Result<NodeId>;

struct Parser<'t> {
    file_path: &'t str,
    tokens: Vec<Token>,
    pos: usize,
    imports: &'t ImportTable,
    builder: TreeBuilder,
}

impl<'t> Parser<'t> {
    fn new(file_path: &'t str, tokens: Vec<Token>, imports: &'t ImportTable) -> Self {
        Self {
            file_path,
            tokens,
            pos: 0,
            imports,
            builder: TreeBuilder::new(file_path),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Declarations
    // ═══════════════════════════════════════════════════════════════════════

    fn compilation_unit(&mut self) -> Result<NodeId> {
        let mut members = Vec::new();
        while !self.at_eof() {
            members.push(self.member()?);
        }
        let span = match self.tokens.len() {
            0 | 1 => Span::new(1, 0, 1, 0),
            _ => self.span_from((self.tokens[0].line, self.tokens[0].col)),
        };
        Ok(self.builder.push(NodeKind::CompilationUnit { members }, span))
    }

    fn member(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.skip_modifiers();
        let is_async = self.match_keyword("async");
        self.skip_modifiers();
        let declared_type = if self.match_keyword("void") {
            None
        } else {
            Some(self.type_ref()?)
        };
        let name = self.expect_ident("member name")?;

        if self.check(&TokenKind::LParen) {
            let params = self.parameters()?;
            let body = self.block()?;
            let kind = NodeKind::Method {
                name,
                return_type: declared_type,
                params,
                body,
                is_async,
            };
            return Ok(self.push(kind, start));
        }

        if is_async || declared_type.is_none() {
            return Err(self.error(format!("expected `(` after method name `{}`", name)));
        }
        let init = if self.match_token(&TokenKind::Assign) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon)?;
        let kind = NodeKind::LocalDeclaration {
            name,
            ty: declared_type,
            init,
        };
        Ok(self.push(kind, start))
    }

    fn skip_modifiers(&mut self) {
        while matches!(self.peek(), TokenKind::Ident(word) if MODIFIERS.contains(&word.as_str())) {
            self.advance();
        }
    }

    fn parameters(&mut self) -> Result<Vec<NodeId>> {
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let start = self.start();
                let ty = self.type_ref()?;
                let name = self.expect_ident("parameter name")?;
                params.push(self.push(NodeKind::Parameter { name, ty: Some(ty) }, start));
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(params)
    }

    /// `Name`, `Ns.Name`, `Name<Arg, ...>`, with an optional `?`
    fn type_ref(&mut self) -> Result<TypeRef> {
        let mut name = self.expect_ident("type name")?;
        let mut qualified = false;
        while self.check(&TokenKind::Dot) && matches!(self.peek_at(1), TokenKind::Ident(_)) {
            self.advance();
            name.push('.');
            name.push_str(&self.expect_ident("type name")?);
            qualified = true;
        }
        if !qualified {
            name = self.imports.resolve(&name);
        }

        let mut args = Vec::new();
        if self.match_token(&TokenKind::Lt) {
            loop {
                args.push(self.type_ref()?);
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::Gt)?;
        }
        self.match_token(&TokenKind::Question);

        Ok(if args.is_empty() {
            TypeRef::named(name)
        } else {
            TypeRef::generic(name, args)
        })
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Statements
    // ═══════════════════════════════════════════════════════════════════════

    fn block(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.expect(&TokenKind::LBrace)?;
        let mut statements = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.at_eof() {
                return Err(self.error("unclosed block"));
            }
            statements.push(self.statement()?);
        }
        self.advance();
        Ok(self.push(NodeKind::Block { statements }, start))
    }

    fn statement(&mut self) -> Result<NodeId> {
        if self.check(&TokenKind::LBrace) {
            return self.block();
        }
        if self.check_keyword("if") {
            return self.if_statement();
        }
        if self.check_keyword("return") {
            return self.return_statement();
        }
        if self.check_keyword("var")
            && matches!(self.peek_at(1), TokenKind::Ident(_))
            && matches!(self.peek_at(2), TokenKind::Assign)
        {
            return self.var_declaration();
        }
        if let Some(declaration) = self.typed_declaration()? {
            return Ok(declaration);
        }

        let start = self.start();
        let expr = self.expression()?;
        self.expect(&TokenKind::Semicolon)?;
        Ok(self.push(NodeKind::ExpressionStatement { expr }, start))
    }

    fn if_statement(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.advance();
        self.expect(&TokenKind::LParen)?;
        let condition = self.expression()?;
        self.expect(&TokenKind::RParen)?;
        let then_branch = self.statement()?;
        let else_branch = if self.match_keyword("else") {
            Some(self.statement()?)
        } else {
            None
        };
        let kind = NodeKind::If {
            condition,
            then_branch,
            else_branch,
        };
        Ok(self.push(kind, start))
    }

    fn return_statement(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.advance();
        let value = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect(&TokenKind::Semicolon)?;
        Ok(self.push(NodeKind::Return { value }, start))
    }

    fn var_declaration(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.advance();
        let name = self.expect_ident("variable name")?;
        self.expect(&TokenKind::Assign)?;
        let init = self.expression()?;
        self.expect(&TokenKind::Semicolon)?;
        let kind = NodeKind::LocalDeclaration {
            name,
            ty: None,
            init: Some(init),
        };
        Ok(self.push(kind, start))
    }

    /// `Type name [= init];`, tried speculatively before an expression
    /// statement; the position is restored when the prefix does not fit
    fn typed_declaration(&mut self) -> Result<Option<NodeId>> {
        if self.peek_keyword() {
            return Ok(None);
        }
        let saved = self.pos;
        let start = self.start();
        let ty = match self.type_ref() {
            Ok(ty) => ty,
            Err(_) => {
                self.pos = saved;
                return Ok(None);
            }
        };
        let name = match self.peek() {
            TokenKind::Ident(name)
                if !KEYWORDS.contains(&name.as_str())
                    && matches!(self.peek_at(1), TokenKind::Assign | TokenKind::Semicolon) =>
            {
                name.clone()
            }
            _ => {
                self.pos = saved;
                return Ok(None);
            }
        };
        self.advance();

        let init = if self.match_token(&TokenKind::Assign) {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(&TokenKind::Semicolon)?;
        let kind = NodeKind::LocalDeclaration {
            name,
            ty: Some(ty),
            init,
        };
        Ok(Some(self.push(kind, start)))
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Expressions
    // ═══════════════════════════════════════════════════════════════════════

    fn expression(&mut self) -> Result<NodeId> {
        if self.at_lambda() {
            return self.lambda();
        }
        self.conditional()
    }

    /// `x =>`, `(…) =>`, optionally prefixed with `async`
    fn at_lambda(&self) -> bool {
        let offset = usize::from(self.check_keyword("async"));
        match self.peek_at(offset) {
            TokenKind::Ident(name) if !KEYWORDS.contains(&name.as_str()) => {
                matches!(self.peek_at(offset + 1), TokenKind::Arrow)
            }
            TokenKind::LParen => {
                let mut depth = 0usize;
                let mut index = offset;
                loop {
                    match self.peek_at(index) {
                        TokenKind::LParen => depth += 1,
                        TokenKind::RParen => {
                            depth -= 1;
                            if depth == 0 {
                                return matches!(self.peek_at(index + 1), TokenKind::Arrow);
                            }
                        }
                        TokenKind::Eof => return false,
                        _ => {}
                    }
                    index += 1;
                }
            }
            _ => false,
        }
    }

    fn lambda(&mut self) -> Result<NodeId> {
        let start = self.start();
        let is_async = self.match_keyword("async");
        let mut params = Vec::new();

        if self.match_token(&TokenKind::LParen) {
            while !self.check(&TokenKind::RParen) {
                let param_start = self.start();
                let ty = if matches!(self.peek_at(1), TokenKind::Comma | TokenKind::RParen) {
                    None
                } else {
                    Some(self.type_ref()?)
                };
                let name = self.expect_ident("lambda parameter")?;
                params.push(self.push(NodeKind::Parameter { name, ty }, param_start));
                if !self.match_token(&TokenKind::Comma) {
                    break;
                }
            }
            self.expect(&TokenKind::RParen)?;
        } else {
            let param_start = self.start();
            let name = self.expect_ident("lambda parameter")?;
            params.push(self.push(NodeKind::Parameter { name, ty: None }, param_start));
        }

        self.expect(&TokenKind::Arrow)?;
        let body = if self.check(&TokenKind::LBrace) {
            self.block()?
        } else {
            self.expression()?
        };
        let kind = NodeKind::Lambda {
            params,
            body,
            is_async,
        };
        Ok(self.push(kind, start))
    }

    fn conditional(&mut self) -> Result<NodeId> {
        let start = self.start();
        let condition = self.logical_or()?;
        if !self.match_token(&TokenKind::Question) {
            return Ok(condition);
        }
        let when_true = self.expression()?;
        self.expect(&TokenKind::Colon)?;
        let when_false = self.expression()?;
        let kind = NodeKind::Conditional {
            condition,
            when_true,
            when_false,
        };
        Ok(self.push(kind, start))
    }

    fn logical_or(&mut self) -> Result<NodeId> {
        self.binary_level(Self::logical_and, &[(TokenKind::OrOr, BinaryOp::Or)])
    }

    fn logical_and(&mut self) -> Result<NodeId> {
        self.binary_level(Self::equality, &[(TokenKind::AndAnd, BinaryOp::And)])
    }

    fn equality(&mut self) -> Result<NodeId> {
        self.binary_level(
            Self::relational,
            &[(TokenKind::EqEq, BinaryOp::Eq), (TokenKind::NotEq, BinaryOp::NotEq)],
        )
    }

    fn relational(&mut self) -> Result<NodeId> {
        let start = self.start();
        let mut left = self.additive()?;
        loop {
            let op = match self.peek() {
                TokenKind::Lt => BinaryOp::Lt,
                TokenKind::LtE => BinaryOp::LtE,
                TokenKind::Gt => BinaryOp::Gt,
                TokenKind::GtE => BinaryOp::GtE,
                TokenKind::Ident(word) if word == "is" => {
                    self.advance();
                    let pattern = self.pattern()?;
                    left = self.push(
                        NodeKind::IsPattern {
                            operand: left,
                            pattern,
                        },
                        start,
                    );
                    continue;
                }
                _ => return Ok(left),
            };
            self.advance();
            let right = self.additive()?;
            left = self.push(NodeKind::Binary { op, left, right }, start);
        }
    }

    fn additive(&mut self) -> Result<NodeId> {
        self.binary_level(
            Self::multiplicative,
            &[(TokenKind::Plus, BinaryOp::Add), (TokenKind::Minus, BinaryOp::Sub)],
        )
    }

    fn multiplicative(&mut self) -> Result<NodeId> {
        self.binary_level(
            Self::unary,
            &[(TokenKind::Star, BinaryOp::Mul), (TokenKind::Slash, BinaryOp::Div)],
        )
    }

    /// Left-associative level over `operand`
    fn binary_level(
        &mut self,
        operand: BinaryLevel<'t>,
        ops: &[(TokenKind, BinaryOp)],
    ) -> Result<NodeId> {
        let start = self.start();
        let mut left = operand(self)?;
        while let Some(op) = ops
            .iter()
            .find(|(token, _)| self.check(token))
            .map(|(_, op)| *op)
        {
            self.advance();
            let right = operand(self)?;
            left = self.push(NodeKind::Binary { op, left, right }, start);
        }
        Ok(left)
    }

    fn pattern(&mut self) -> Result<Pattern> {
        let token = self.advance();
        let pattern = match token.kind {
            TokenKind::Ident(word) if word == "null" => Pattern::Null,
            TokenKind::Ident(word) if word == "not" && self.check_keyword("null") => {
                self.advance();
                Pattern::NotNull
            }
            TokenKind::Ident(word) if word == "true" => Pattern::Literal(Literal::Bool(true)),
            TokenKind::Ident(word) if word == "false" => Pattern::Literal(Literal::Bool(false)),
            TokenKind::Int(value) => Pattern::Literal(Literal::Int(value)),
            TokenKind::Str(value) => Pattern::Literal(Literal::Str(value)),
            other => {
                return Err(self.error(format!("unsupported pattern {}", other.describe())));
            }
        };
        Ok(pattern)
    }

    fn unary(&mut self) -> Result<NodeId> {
        let start = self.start();
        let kind = if self.match_token(&TokenKind::Bang) {
            NodeKind::Unary {
                op: UnaryOp::Not,
                operand: self.unary()?,
            }
        } else if self.match_token(&TokenKind::Minus) {
            NodeKind::Unary {
                op: UnaryOp::Negate,
                operand: self.unary()?,
            }
        } else if self.match_keyword("await") {
            NodeKind::Await {
                operand: self.unary()?,
            }
        } else {
            return self.postfix();
        };
        Ok(self.push(kind, start))
    }

    fn postfix(&mut self) -> Result<NodeId> {
        let start = self.start();
        let primary = self.primary()?;
        self.postfix_tail(primary, start)
    }

    /// Member accesses and calls after `expr`; `?.` takes the rest of the
    /// chain as its `when_not_null` part
    fn postfix_tail(&mut self, mut expr: NodeId, start: Position) -> Result<NodeId> {
        loop {
            match self.peek() {
                TokenKind::Dot => {
                    self.advance();
                    let member = self.expect_ident("member name")?;
                    expr = self.push(NodeKind::MemberAccess { receiver: expr, member }, start);
                }
                TokenKind::LParen => {
                    let args = self.arguments()?;
                    expr = self.push(NodeKind::Invocation { callee: expr, args }, start);
                }
                TokenKind::QuestionDot => {
                    self.advance();
                    let binding_start = self.start();
                    let member = self.expect_ident("member name")?;
                    let binding = self.push(NodeKind::MemberBinding { member }, binding_start);
                    let when_not_null = self.postfix_tail(binding, binding_start)?;
                    let kind = NodeKind::ConditionalAccess {
                        receiver: expr,
                        when_not_null,
                    };
                    return Ok(self.push(kind, start));
                }
                _ => return Ok(expr),
            }
        }
    }

    fn arguments(&mut self) -> Result<Vec<Argument>> {
        self.expect(&TokenKind::LParen)?;
        let mut args = Vec::new();
        while !self.check(&TokenKind::RParen) {
            let name = match (self.peek(), self.peek_at(1)) {
                (TokenKind::Ident(name), TokenKind::Colon) => {
                    let name = name.clone();
                    self.advance();
                    self.advance();
                    Some(name)
                }
                _ => None,
            };
            let value = if self.check_keyword("out") {
                self.out_variable()?
            } else {
                self.expression()?
            };
            args.push(Argument { name, value });
            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;
        Ok(args)
    }

    fn out_variable(&mut self) -> Result<NodeId> {
        let start = self.start();
        self.advance();
        let ty = if self.match_keyword("var") {
            None
        } else {
            Some(self.type_ref()?)
        };
        let name = self.expect_ident("out variable name")?;
        Ok(self.push(NodeKind::OutVariable { name, ty }, start))
    }

    fn primary(&mut self) -> Result<NodeId> {
        let start = self.start();
        if self.match_token(&TokenKind::LParen) {
            let inner = self.expression()?;
            self.expect(&TokenKind::RParen)?;
            return Ok(self.push(NodeKind::Parenthesized { inner }, start));
        }

        let token = self.advance();
        let line = token.line;
        let kind = match token.kind {
            TokenKind::Ident(word) => match word.as_str() {
                "this" => NodeKind::This,
                "true" => NodeKind::Literal {
                    value: Literal::Bool(true),
                },
                "false" => NodeKind::Literal {
                    value: Literal::Bool(false),
                },
                "null" => NodeKind::Literal {
                    value: Literal::Null,
                },
                keyword if KEYWORDS.contains(&keyword) => {
                    return Err(self.error_at(line, format!("unexpected keyword `{}`", keyword)));
                }
                _ => NodeKind::Identifier { name: word },
            },
            TokenKind::Int(value) => NodeKind::Literal {
                value: Literal::Int(value),
            },
            TokenKind::Str(value) => NodeKind::Literal {
                value: Literal::Str(value),
            },
            other => {
                return Err(self.error_at(
                    line,
                    format!("expected expression, found {}", other.describe()),
                ));
            }
        };
        Ok(self.push(kind, start))
    }

    // -- Token stream helpers --

    fn peek(&self) -> &TokenKind {
        self.peek_at(0)
    }

    /// Token `offset` ahead; `Eof` past the end
    fn peek_at(&self, offset: usize) -> &TokenKind {
        let index = (self.pos + offset).min(self.tokens.len() - 1);
        &self.tokens[index].kind
    }

    fn at_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    fn check(&self, kind: &TokenKind) -> bool {
        self.peek() == kind
    }

    fn check_keyword(&self, keyword: &str) -> bool {
        matches!(self.peek(), TokenKind::Ident(word) if word == keyword)
    }

    fn peek_keyword(&self) -> bool {
        matches!(self.peek(), TokenKind::Ident(word) if KEYWORDS.contains(&word.as_str()))
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_keyword(&mut self, keyword: &str) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token> {
        if self.check(kind) {
            return Ok(self.advance());
        }
        Err(self.error(format!(
            "expected {}, found {}",
            kind.describe(),
            self.peek().describe()
        )))
    }

    fn expect_ident(&mut self, what: &str) -> Result<String> {
        match self.peek() {
            TokenKind::Ident(name) if !KEYWORDS.contains(&name.as_str()) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            other => Err(self.error(format!("expected {}, found {}", what, other.describe()))),
        }
    }

    fn start(&self) -> Position {
        let token = &self.tokens[self.pos];
        (token.line, token.col)
    }

    /// Span from `start` to the end of the last consumed token
    fn span_from(&self, start: Position) -> Span {
        let last = &self.tokens[self.pos.saturating_sub(1)];
        Span::new(start.0, start.1, last.end_line, last.end_col)
    }

    fn push(&mut self, kind: NodeKind, start: Position) -> NodeId {
        let span = self.span_from(start);
        self.builder.push(kind, span)
    }

    fn error(&self, message: impl Into<String>) -> GuardError {
        self.error_at(self.tokens[self.pos].line, message)
    }

    fn error_at(&self, line: u32, message: impl Into<String>) -> GuardError {
        GuardError::parse(message)
            .with_file(self.file_path)
            .with_line(line)
    }
}
