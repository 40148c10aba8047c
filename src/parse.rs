//! Recursive-descent parser: token stream → [`AST`].

use crate::ast::{Arg, BinOp, ClassDef, Expr, FnDef, Ident, Param, Stmt, UnOp, AST};
use crate::error_parsing::{ParseError, ParseErrorType};
use crate::token::{Lexer, Position, Token, TokenKind};
use crate::{Identifier, StaticVec};
use std::collections::HashSet;

type PResult<T> = Result<T, ParseError>;

/// Parses a finite token stream into statement nodes.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    loop_depth: u32,
    /// Stack of "are we inside a method of a class with a declared base",
    /// pushed on entry to a `class` body's method definitions. Empty when
    /// outside of any class, used to validate bare `super` references.
    method_has_base: Vec<bool>,
}

impl Parser {
    /// Parse `source` directly into an [`AST`].
    pub fn parse(source: &str) -> PResult<AST> {
        let tokens = Lexer::tokenize(source)?;
        let mut parser = Self {
            tokens,
            pos: 0,
            loop_depth: 0,
            method_has_base: Vec::new(),
        };
        let body = parser.parse_program()?;
        Ok(AST::new(body))
    }

    fn peek(&self) -> &TokenKind {
        &self.tokens[self.pos].kind
    }
    fn peek_pos(&self) -> Position {
        self.tokens[self.pos].pos
    }
    fn at_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }
    fn bump(&mut self) -> Token {
        let tok = self.tokens[self.pos].clone();
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(kind)
    }
    fn expect(&mut self, kind: TokenKind, what: &str) -> PResult<Token> {
        if self.check(&kind) {
            Ok(self.bump())
        } else {
            Err(ParseError(
                ParseErrorType::Expected(what.to_string(), self.peek().clone()),
                self.peek_pos(),
            ))
        }
    }
    fn skip_newlines(&mut self) {
        while matches!(self.peek(), TokenKind::Newline) {
            self.bump();
        }
    }

    fn parse_program(&mut self) -> PResult<Vec<Stmt>> {
        let mut body = Vec::new();
        self.skip_newlines();
        while !self.at_eof() {
            self.parse_line(&mut body)?;
            self.skip_newlines();
        }
        Ok(body)
    }

    fn parse_suite(&mut self) -> PResult<Vec<Stmt>> {
        self.expect(TokenKind::Colon, "':'")?;
        self.expect(TokenKind::Newline, "newline")?;
        self.expect(TokenKind::Indent, "indented block")?;
        let mut body = Vec::new();
        self.skip_newlines();
        while !matches!(self.peek(), TokenKind::Dedent) {
            if self.at_eof() {
                return Err(ParseError(ParseErrorType::UnexpectedEof, self.peek_pos()));
            }
            self.parse_line(&mut body)?;
            self.skip_newlines();
        }
        self.bump(); // Dedent
        Ok(body)
    }

    /// Parse one logical source line into one or more statements (a `;`
    /// separated run of simple statements, or a single compound statement).
    fn parse_line(&mut self, body: &mut Vec<Stmt>) -> PResult<()> {
        match self.peek() {
            TokenKind::If => {
                body.push(self.parse_if()?);
                return Ok(());
            }
            TokenKind::While => {
                body.push(self.parse_while()?);
                return Ok(());
            }
            TokenKind::For => {
                body.push(self.parse_for()?);
                return Ok(());
            }
            TokenKind::Def => {
                let pos = self.peek_pos();
                let def = self.parse_def()?;
                body.push(Stmt::Def(def, pos));
                return Ok(());
            }
            TokenKind::Class => {
                let pos = self.peek_pos();
                let def = self.parse_class()?;
                body.push(Stmt::ClassDef(def, pos));
                return Ok(());
            }
            _ => {}
        }

        loop {
            body.push(self.parse_simple_stmt()?);
            if matches!(self.peek(), TokenKind::SemiColon) {
                self.bump();
                if matches!(self.peek(), TokenKind::Newline | TokenKind::Eof) {
                    break;
                }
                continue;
            }
            break;
        }
        if !self.at_eof() {
            self.expect(TokenKind::Newline, "newline")?;
        }
        Ok(())
    }

    fn parse_simple_stmt(&mut self) -> PResult<Stmt> {
        let pos = self.peek_pos();
        match self.peek() {
            TokenKind::Pass => {
                self.bump();
                Ok(Stmt::Pass(pos))
            }
            TokenKind::Break => {
                self.bump();
                if self.loop_depth == 0 {
                    return Err(ParseError(
                        ParseErrorType::LoopControlOutsideLoop("break"),
                        pos,
                    ));
                }
                Ok(Stmt::Break(pos))
            }
            TokenKind::Continue => {
                self.bump();
                if self.loop_depth == 0 {
                    return Err(ParseError(
                        ParseErrorType::LoopControlOutsideLoop("continue"),
                        pos,
                    ));
                }
                Ok(Stmt::Continue(pos))
            }
            TokenKind::Return => {
                self.bump();
                if matches!(self.peek(), TokenKind::Newline | TokenKind::SemiColon | TokenKind::Eof) {
                    Ok(Stmt::Return(None, pos))
                } else {
                    let value = self.parse_expr_or_tuple()?;
                    Ok(Stmt::Return(Some(value), pos))
                }
            }
            _ => self.parse_expr_stmt(),
        }
    }

    fn parse_expr_stmt(&mut self) -> PResult<Stmt> {
        let pos = self.peek_pos();
        let target = self.parse_expr_or_tuple()?;

        let aug = match self.peek() {
            TokenKind::PlusEq => Some(BinOp::Add),
            TokenKind::MinusEq => Some(BinOp::Sub),
            TokenKind::StarEq => Some(BinOp::Mul),
            TokenKind::SlashEq => Some(BinOp::Div),
            TokenKind::DSlashEq => Some(BinOp::FloorDiv),
            TokenKind::PercentEq => Some(BinOp::Mod),
            TokenKind::DStarEq => Some(BinOp::Pow),
            _ => None,
        };
        if let Some(op) = aug {
            self.bump();
            Self::check_assign_target(&target)?;
            let value = self.parse_expr_or_tuple()?;
            return Ok(Stmt::AugAssign(target, op, value, pos));
        }

        if matches!(self.peek(), TokenKind::Equal) {
            self.bump();
            Self::check_assign_target(&target)?;
            let mut targets = vec![target];
            let mut value = self.parse_expr_or_tuple()?;
            while matches!(self.peek(), TokenKind::Equal) {
                self.bump();
                Self::check_assign_target(&value)?;
                targets.push(value);
                value = self.parse_expr_or_tuple()?;
            }
            return Ok(Stmt::Assign(targets, value, pos));
        }

        Ok(Stmt::Expr(target))
    }

    fn check_assign_target(expr: &Expr) -> PResult<()> {
        match expr {
            Expr::Variable(_) | Expr::Attr(..) | Expr::Index(..) => Ok(()),
            other => Err(ParseError(
                ParseErrorType::InvalidAssignmentTarget,
                other.position(),
            )),
        }
    }

    fn parse_if(&mut self) -> PResult<Stmt> {
        let pos = self.peek_pos();
        self.bump(); // if
        let mut branches = Vec::new();
        let cond = self.parse_expr_or_tuple()?;
        let body = self.parse_suite()?;
        branches.push((cond, body));
        loop {
            match self.peek() {
                TokenKind::Elif => {
                    self.bump();
                    let cond = self.parse_expr_or_tuple()?;
                    let body = self.parse_suite()?;
                    branches.push((cond, body));
                }
                _ => break,
            }
        }
        let else_body = if matches!(self.peek(), TokenKind::Else) {
            self.bump();
            self.parse_suite()?
        } else {
            Vec::new()
        };
        Ok(Stmt::If(branches, else_body, pos))
    }

    fn parse_while(&mut self) -> PResult<Stmt> {
        let pos = self.peek_pos();
        self.bump(); // while
        let cond = self.parse_expr_or_tuple()?;
        self.loop_depth += 1;
        let body = self.parse_suite();
        self.loop_depth -= 1;
        Ok(Stmt::While(cond, body?, pos))
    }

    fn parse_for(&mut self) -> PResult<Stmt> {
        let pos = self.peek_pos();
        self.bump(); // for
        let name_pos = self.peek_pos();
        let name = self.expect_identifier("loop variable")?;
        self.expect(TokenKind::In, "'in'")?;
        let iter = self.parse_expr_or_tuple()?;
        self.loop_depth += 1;
        let body = self.parse_suite();
        self.loop_depth -= 1;
        Ok(Stmt::For(
            Ident {
                name,
                pos: name_pos,
            },
            iter,
            body?,
            pos,
        ))
    }

    fn expect_identifier(&mut self, what: &str) -> PResult<Identifier> {
        match self.peek().clone() {
            TokenKind::Identifier(name) => {
                self.bump();
                Ok(name.into())
            }
            got => Err(ParseError(
                ParseErrorType::Expected(what.to_string(), got),
                self.peek_pos(),
            )),
        }
    }

    fn parse_params(&mut self) -> PResult<Vec<Param>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut params = Vec::new();
        let mut seen = HashSet::new();
        let mut seen_optional = false;
        let mut seen_star = false;
        let mut seen_kwargs = false;

        while !matches!(self.peek(), TokenKind::RParen) {
            let pos = self.peek_pos();
            if matches!(self.peek(), TokenKind::DoubleStar) {
                self.bump();
                let name = self.expect_identifier("parameter name")?;
                Self::check_dup(&mut seen, &name, pos)?;
                if seen_kwargs {
                    return Err(ParseError(ParseErrorType::BadParameterOrder, pos));
                }
                seen_kwargs = true;
                params.push(Param::DoubleStar(Ident { name, pos }));
            } else if matches!(self.peek(), TokenKind::Star) {
                self.bump();
                let name = self.expect_identifier("parameter name")?;
                Self::check_dup(&mut seen, &name, pos)?;
                if seen_star || seen_kwargs {
                    return Err(ParseError(ParseErrorType::BadParameterOrder, pos));
                }
                seen_star = true;
                params.push(Param::Star(Ident { name, pos }));
            } else {
                let name = self.expect_identifier("parameter name")?;
                Self::check_dup(&mut seen, &name, pos)?;
                if seen_star || seen_kwargs {
                    return Err(ParseError(ParseErrorType::BadParameterOrder, pos));
                }
                if matches!(self.peek(), TokenKind::Equal) {
                    self.bump();
                    let default = self.parse_expr()?;
                    seen_optional = true;
                    params.push(Param::Optional(Ident { name, pos }, Box::new(default)));
                } else {
                    if seen_optional {
                        return Err(ParseError(ParseErrorType::BadParameterOrder, pos));
                    }
                    params.push(Param::Required(Ident { name, pos }));
                }
            }

            if matches!(self.peek(), TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(params)
    }

    fn check_dup(seen: &mut HashSet<Identifier>, name: &Identifier, pos: Position) -> PResult<()> {
        if !seen.insert(name.clone()) {
            return Err(ParseError(
                ParseErrorType::DuplicateParameter(name.to_string()),
                pos,
            ));
        }
        Ok(())
    }

    fn parse_def(&mut self) -> PResult<FnDef> {
        self.bump(); // def
        let name_pos = self.peek_pos();
        let name = self.expect_identifier("function name")?;
        let params = self.parse_params()?;
        let body = self.parse_suite()?;
        Ok(FnDef {
            name: Ident {
                name,
                pos: name_pos,
            },
            params,
            body,
        })
    }

    fn parse_class(&mut self) -> PResult<ClassDef> {
        self.bump(); // class
        let name_pos = self.peek_pos();
        let name = self.expect_identifier("class name")?;
        let base = if matches!(self.peek(), TokenKind::LParen) {
            self.bump();
            let base_pos = self.peek_pos();
            let base_name = self.expect_identifier("base class name")?;
            self.expect(TokenKind::RParen, "')'")?;
            Some(Ident {
                name: base_name,
                pos: base_pos,
            })
        } else {
            None
        };

        self.method_has_base.push(base.is_some());
        let result = (|| {
            self.expect(TokenKind::Colon, "':'")?;
            self.expect(TokenKind::Newline, "newline")?;
            self.expect(TokenKind::Indent, "indented block")?;
            let mut methods = Vec::new();
            self.skip_newlines();
            while !matches!(self.peek(), TokenKind::Dedent) {
                match self.peek() {
                    TokenKind::Def => methods.push(self.parse_def()?),
                    TokenKind::Pass => {
                        self.bump();
                        self.expect(TokenKind::Newline, "newline")?;
                    }
                    _ => {
                        return Err(ParseError(
                            ParseErrorType::Expected(
                                "'def' or 'pass'".to_string(),
                                self.peek().clone(),
                            ),
                            self.peek_pos(),
                        ))
                    }
                }
                self.skip_newlines();
            }
            self.bump(); // Dedent
            Ok(methods)
        })();
        self.method_has_base.pop();

        Ok(ClassDef {
            name: Ident {
                name,
                pos: name_pos,
            },
            base,
            methods: result?,
        })
    }

    // ---- expressions ----

    fn parse_expr_or_tuple(&mut self) -> PResult<Expr> {
        let pos = self.peek_pos();
        let first = self.parse_expr()?;
        if matches!(self.peek(), TokenKind::Comma) {
            let mut items = vec![first];
            while matches!(self.peek(), TokenKind::Comma) {
                self.bump();
                if matches!(
                    self.peek(),
                    TokenKind::Newline | TokenKind::Eof | TokenKind::Equal | TokenKind::Colon
                ) {
                    break;
                }
                items.push(self.parse_expr()?);
            }
            return Ok(Expr::TupleLit(items, pos));
        }
        Ok(first)
    }

    fn parse_expr(&mut self) -> PResult<Expr> {
        self.parse_or()
    }

    fn parse_or(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), TokenKind::Or) {
            let pos = self.peek_pos();
            self.bump();
            let rhs = self.parse_and()?;
            lhs = Expr::Binary(BinOp::Or, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_not()?;
        while matches!(self.peek(), TokenKind::And) {
            let pos = self.peek_pos();
            self.bump();
            let rhs = self.parse_not()?;
            lhs = Expr::Binary(BinOp::And, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_not(&mut self) -> PResult<Expr> {
        if matches!(self.peek(), TokenKind::Not) {
            let pos = self.peek_pos();
            self.bump();
            let operand = self.parse_not()?;
            return Ok(Expr::Unary(UnOp::Not, Box::new(operand), pos));
        }
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_add_sub()?;
        loop {
            let op = match self.peek() {
                TokenKind::EqEq => BinOp::Eq,
                TokenKind::BangEq => BinOp::Ne,
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Le => BinOp::Le,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Ge => BinOp::Ge,
                TokenKind::In => BinOp::In,
                _ => break,
            };
            let pos = self.peek_pos();
            self.bump();
            let rhs = self.parse_add_sub()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_add_sub(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_mul_div()?;
        loop {
            let op = match self.peek() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let pos = self.peek_pos();
            self.bump();
            let rhs = self.parse_mul_div()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_mul_div(&mut self) -> PResult<Expr> {
        let mut lhs = self.parse_unary()?;
        loop {
            let op = match self.peek() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::DoubleSlash => BinOp::FloorDiv,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            let pos = self.peek_pos();
            self.bump();
            let rhs = self.parse_unary()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs), pos);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> PResult<Expr> {
        let pos = self.peek_pos();
        match self.peek() {
            TokenKind::Plus => {
                // Unary plus is a no-op; still consumed and its operand re-parsed.
                self.bump();
                self.parse_unary()
            }
            TokenKind::Minus => {
                self.bump();
                let operand = self.parse_unary()?;
                Ok(Expr::Unary(UnOp::Neg, Box::new(operand), pos))
            }
            TokenKind::Tilde => {
                self.bump();
                let operand = self.parse_unary()?;
                Ok(Expr::Unary(UnOp::BitNot, Box::new(operand), pos))
            }
            _ => self.parse_power(),
        }
    }

    fn parse_power(&mut self) -> PResult<Expr> {
        let base = self.parse_postfix()?;
        if matches!(self.peek(), TokenKind::DoubleStar) {
            let pos = self.peek_pos();
            self.bump();
            let exp = self.parse_unary()?;
            return Ok(Expr::Binary(BinOp::Pow, Box::new(base), Box::new(exp), pos));
        }
        Ok(base)
    }

    fn parse_postfix(&mut self) -> PResult<Expr> {
        let mut expr = self.parse_primary()?;
        loop {
            match self.peek() {
                TokenKind::LParen => {
                    let pos = self.peek_pos();
                    let args = self.parse_call_args()?;
                    expr = Expr::Call(Box::new(expr), args, pos);
                }
                TokenKind::LBracket => {
                    let pos = self.peek_pos();
                    self.bump();
                    let index = self.parse_expr_or_tuple()?;
                    self.expect(TokenKind::RBracket, "']'")?;
                    expr = Expr::Index(Box::new(expr), Box::new(index), pos);
                }
                TokenKind::Dot => {
                    let pos = self.peek_pos();
                    self.bump();
                    let name = self.expect_identifier("attribute name")?;
                    expr = Expr::Attr(Box::new(expr), name, pos);
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    fn parse_call_args(&mut self) -> PResult<StaticVec<Arg>> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut args = StaticVec::new();
        while !matches!(self.peek(), TokenKind::RParen) {
            if matches!(self.peek(), TokenKind::DoubleStar) {
                self.bump();
                args.push(Arg::DoubleSpread(self.parse_expr()?));
            } else if matches!(self.peek(), TokenKind::Star) {
                self.bump();
                args.push(Arg::Spread(self.parse_expr()?));
            } else if let TokenKind::Identifier(name) = self.peek().clone() {
                // Lookahead for `name=value` keyword argument without
                // consuming on a false match (`name` could just start an
                // ordinary expression, e.g. a bare variable argument).
                if matches!(self.tokens.get(self.pos + 1).map(|t| &t.kind), Some(TokenKind::Equal)) {
                    self.bump();
                    self.bump();
                    let value = self.parse_expr()?;
                    args.push(Arg::Keyword(name.into(), value));
                } else {
                    args.push(Arg::Positional(self.parse_expr()?));
                }
            } else {
                args.push(Arg::Positional(self.parse_expr()?));
            }

            if matches!(self.peek(), TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        self.expect(TokenKind::RParen, "')'")?;
        Ok(args)
    }

    fn parse_primary(&mut self) -> PResult<Expr> {
        let pos = self.peek_pos();
        match self.peek().clone() {
            TokenKind::Int(i) => {
                self.bump();
                Ok(Expr::IntLit(i, pos))
            }
            TokenKind::Float(x) => {
                self.bump();
                Ok(Expr::FloatLit(x, pos))
            }
            TokenKind::Str(s) => {
                self.bump();
                Ok(Expr::StrLit(s.into(), pos))
            }
            TokenKind::True => {
                self.bump();
                Ok(Expr::BoolLit(true, pos))
            }
            TokenKind::False => {
                self.bump();
                Ok(Expr::BoolLit(false, pos))
            }
            TokenKind::None => {
                self.bump();
                Ok(Expr::NoneLit(pos))
            }
            TokenKind::Identifier(name) => {
                self.bump();
                Ok(Expr::Variable(Ident {
                    name: name.into(),
                    pos,
                }))
            }
            TokenKind::Super => {
                self.bump();
                if self.method_has_base.last().copied() != Some(true) {
                    return Err(ParseError(
                        ParseErrorType::InvalidSuper(
                            "'super' may only be used in a method of a class with a base class",
                        ),
                        pos,
                    ));
                }
                if !matches!(self.peek(), TokenKind::Dot) {
                    return Err(ParseError(
                        ParseErrorType::InvalidSuper("'super' must be followed by '.name'"),
                        pos,
                    ));
                }
                Ok(Expr::Super(pos))
            }
            TokenKind::Lambda => {
                self.bump();
                let params = self.parse_lambda_params()?;
                self.expect(TokenKind::Colon, "':'")?;
                let body = self.parse_expr()?;
                Ok(Expr::Lambda(params, Box::new(body), pos))
            }
            TokenKind::LParen => {
                self.bump();
                if matches!(self.peek(), TokenKind::RParen) {
                    self.bump();
                    return Ok(Expr::TupleLit(Vec::new(), pos));
                }
                let first = self.parse_expr()?;
                if matches!(self.peek(), TokenKind::Comma) {
                    let mut items = vec![first];
                    while matches!(self.peek(), TokenKind::Comma) {
                        self.bump();
                        if matches!(self.peek(), TokenKind::RParen) {
                            break;
                        }
                        items.push(self.parse_expr()?);
                    }
                    self.expect(TokenKind::RParen, "')'")?;
                    return Ok(Expr::TupleLit(items, pos));
                }
                self.expect(TokenKind::RParen, "')'")?;
                Ok(first)
            }
            TokenKind::LBracket => {
                self.bump();
                let mut items = Vec::new();
                while !matches!(self.peek(), TokenKind::RBracket) {
                    items.push(self.parse_expr()?);
                    if matches!(self.peek(), TokenKind::Comma) {
                        self.bump();
                    } else {
                        break;
                    }
                }
                self.expect(TokenKind::RBracket, "']'")?;
                Ok(Expr::ListLit(items, pos))
            }
            TokenKind::LBrace => {
                self.bump();
                if matches!(self.peek(), TokenKind::RBrace) {
                    self.bump();
                    return Ok(Expr::DictLit(Vec::new(), pos));
                }
                let first_key = self.parse_expr()?;
                if matches!(self.peek(), TokenKind::Colon) {
                    self.bump();
                    let first_val = self.parse_expr()?;
                    let mut pairs = vec![(first_key, first_val)];
                    while matches!(self.peek(), TokenKind::Comma) {
                        self.bump();
                        if matches!(self.peek(), TokenKind::RBrace) {
                            break;
                        }
                        let k = self.parse_expr()?;
                        self.expect(TokenKind::Colon, "':'")?;
                        let v = self.parse_expr()?;
                        pairs.push((k, v));
                    }
                    self.expect(TokenKind::RBrace, "'}'")?;
                    Ok(Expr::DictLit(pairs, pos))
                } else {
                    let mut items = vec![first_key];
                    while matches!(self.peek(), TokenKind::Comma) {
                        self.bump();
                        if matches!(self.peek(), TokenKind::RBrace) {
                            break;
                        }
                        items.push(self.parse_expr()?);
                    }
                    self.expect(TokenKind::RBrace, "'}'")?;
                    Ok(Expr::SetLit(items, pos))
                }
            }
            got => Err(ParseError(ParseErrorType::ExpectedExpression(got), pos)),
        }
    }

    fn parse_lambda_params(&mut self) -> PResult<Vec<Param>> {
        let mut params = Vec::new();
        let mut seen = HashSet::new();
        let mut seen_optional = false;
        let mut seen_star = false;
        let mut seen_kwargs = false;
        while !matches!(self.peek(), TokenKind::Colon) {
            let pos = self.peek_pos();
            if matches!(self.peek(), TokenKind::DoubleStar) {
                self.bump();
                let name = self.expect_identifier("parameter name")?;
                Self::check_dup(&mut seen, &name, pos)?;
                seen_kwargs = true;
                params.push(Param::DoubleStar(Ident { name, pos }));
            } else if matches!(self.peek(), TokenKind::Star) {
                self.bump();
                let name = self.expect_identifier("parameter name")?;
                Self::check_dup(&mut seen, &name, pos)?;
                if seen_kwargs {
                    return Err(ParseError(ParseErrorType::BadParameterOrder, pos));
                }
                seen_star = true;
                params.push(Param::Star(Ident { name, pos }));
            } else {
                let name = self.expect_identifier("parameter name")?;
                Self::check_dup(&mut seen, &name, pos)?;
                if seen_star || seen_kwargs {
                    return Err(ParseError(ParseErrorType::BadParameterOrder, pos));
                }
                if matches!(self.peek(), TokenKind::Equal) {
                    self.bump();
                    let default = self.parse_expr()?;
                    seen_optional = true;
                    params.push(Param::Optional(Ident { name, pos }, Box::new(default)));
                } else {
                    if seen_optional {
                        return Err(ParseError(ParseErrorType::BadParameterOrder, pos));
                    }
                    params.push(Param::Required(Ident { name, pos }));
                }
            }
            if matches!(self.peek(), TokenKind::Comma) {
                self.bump();
            } else {
                break;
            }
        }
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_arithmetic_precedence() {
        let ast = Parser::parse("x = 1 + 2 * 3\n").unwrap();
        assert_eq!(ast.statements().len(), 1);
    }

    #[test]
    fn rejects_break_outside_loop() {
        let err = Parser::parse("break\n").unwrap_err();
        assert!(matches!(
            err.error_type(),
            ParseErrorType::LoopControlOutsideLoop("break")
        ));
    }

    #[test]
    fn rejects_bad_parameter_order() {
        let err = Parser::parse("def f(a=1, b):\n    pass\n").unwrap_err();
        assert!(matches!(err.error_type(), ParseErrorType::BadParameterOrder));
    }

    #[test]
    fn rejects_invalid_assignment_target() {
        let err = Parser::parse("1 + 1 = 2\n").unwrap_err();
        assert!(matches!(
            err.error_type(),
            ParseErrorType::InvalidAssignmentTarget
        ));
    }

    #[test]
    fn parses_class_with_methods() {
        let ast = Parser::parse("class Foo:\n    def bar(self):\n        pass\n").unwrap();
        assert_eq!(ast.statements().len(), 1);
    }

    #[test]
    fn super_requires_base_class() {
        let err = Parser::parse(
            "class Foo:\n    def bar(self):\n        super.bar()\n",
        )
        .unwrap_err();
        assert!(matches!(err.error_type(), ParseErrorType::InvalidSuper(_)));
    }
}
