//! Abstract syntax tree produced by [`crate::parse::Parser`].

use crate::token::Position;
use crate::{Identifier, StaticVec, FLOAT, INT};

/// A name occurring in source, with the position it was written at.
#[derive(Debug, Clone, PartialEq)]
pub struct Ident {
    pub name: Identifier,
    pub pos: Position,
}

/// A compiled program: its top-level statements.
///
/// Returned by [`crate::Engine::compile`] so a script can be parsed once and
/// run multiple times against different scopes.
#[derive(Debug, Clone, Default)]
pub struct AST {
    pub(crate) body: Vec<Stmt>,
}

impl AST {
    #[must_use]
    pub(crate) fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }
    #[must_use]
    pub fn statements(&self) -> &[Stmt] {
        &self.body
    }
}

/// One formal parameter of a `def` or `lambda`.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// A plain required parameter: `def f(x)`.
    Required(Ident),
    /// A parameter with a default value, evaluated at call time in the
    /// function's defining environment: `def f(x=1)`.
    Optional(Ident, Box<Expr>),
    /// Collects excess positional arguments: `def f(*args)`.
    Star(Ident),
    /// Collects excess keyword arguments: `def f(**kwargs)`.
    DoubleStar(Ident),
}

impl Param {
    #[must_use]
    pub fn ident(&self) -> &Ident {
        match self {
            Self::Required(id) | Self::Star(id) | Self::DoubleStar(id) => id,
            Self::Optional(id, _) => id,
        }
    }
}

/// One argument at a call site.
#[derive(Debug, Clone, PartialEq)]
pub enum Arg {
    /// A positional argument.
    Positional(Expr),
    /// A `name=value` keyword argument.
    Keyword(Identifier, Expr),
    /// `*expr`: spread an iterable into positional arguments.
    Spread(Expr),
    /// `**expr`: spread a dict into keyword arguments.
    DoubleSpread(Expr),
}

/// A binary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    FloorDiv,
    Mod,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    And,
    Or,
}

/// A unary operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Neg,
    Not,
    BitNot,
}

/// A compound-assignment operator (`+=`, `-=`, ...), desugared to its
/// underlying [`BinOp`] by the parser.
pub type AugOp = BinOp;

/// An expression node.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    IntLit(INT, Position),
    FloatLit(FLOAT, Position),
    StrLit(Identifier, Position),
    BoolLit(bool, Position),
    NoneLit(Position),
    Variable(Ident),
    ListLit(Vec<Expr>, Position),
    TupleLit(Vec<Expr>, Position),
    SetLit(Vec<Expr>, Position),
    DictLit(Vec<(Expr, Expr)>, Position),
    Unary(UnOp, Box<Expr>, Position),
    Binary(BinOp, Box<Expr>, Box<Expr>, Position),
    /// `callee(args...)`
    Call(Box<Expr>, StaticVec<Arg>, Position),
    /// `recv.attr`
    Attr(Box<Expr>, Identifier, Position),
    /// `recv[index]`
    Index(Box<Expr>, Box<Expr>, Position),
    /// `lambda params: body`
    Lambda(Vec<Param>, Box<Expr>, Position),
    /// `super` bare reference, only legal as the receiver of `.method(...)`.
    Super(Position),
}

impl Expr {
    #[must_use]
    pub fn position(&self) -> Position {
        match self {
            Self::IntLit(_, p)
            | Self::FloatLit(_, p)
            | Self::StrLit(_, p)
            | Self::BoolLit(_, p)
            | Self::NoneLit(p)
            | Self::ListLit(_, p)
            | Self::TupleLit(_, p)
            | Self::SetLit(_, p)
            | Self::DictLit(_, p)
            | Self::Unary(_, _, p)
            | Self::Binary(_, _, _, p)
            | Self::Call(_, _, p)
            | Self::Attr(_, _, p)
            | Self::Index(_, _, p)
            | Self::Lambda(_, _, p)
            | Self::Super(p) => *p,
            Self::Variable(id) => id.pos,
        }
    }
}

/// A statement node.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    /// `target1 = target2 = ... = value`; the value is evaluated once and
    /// assigned to each target in left-to-right order.
    Assign(Vec<Expr>, Expr, Position),
    /// `target op= value`, desugared at eval time to `target = target op value`.
    AugAssign(Expr, AugOp, Expr, Position),
    If(Vec<(Expr, Vec<Stmt>)>, Vec<Stmt>, Position),
    While(Expr, Vec<Stmt>, Position),
    For(Ident, Expr, Vec<Stmt>, Position),
    Def(FnDef, Position),
    ClassDef(ClassDef, Position),
    Return(Option<Expr>, Position),
    Pass(Position),
    Break(Position),
    Continue(Position),
}

/// A `def name(params): body` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct FnDef {
    pub name: Ident,
    pub params: Vec<Param>,
    pub body: Vec<Stmt>,
}

/// A `class Name(Base): ...` declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: Ident,
    pub base: Option<Ident>,
    pub methods: Vec<FnDef>,
}
