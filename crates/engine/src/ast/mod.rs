use std::fmt::Display;

use crate::error::{ArborError, ArborResult};

mod eval;
mod render;

pub use eval::{Eval, EvalContext};
pub use render::{Render, RenderStyle};

/// Exclusive link from a node to one of its children.
pub type ExprNode = Box<Expr>;

/// Rank shared by unary operators; higher than every binary rank.
pub const UNARY_PRIORITY: i32 = 0;

pub const NEG_SYMBOL: &str = "-";

#[derive(Debug, PartialEq, Clone)]
pub enum Expr {
    // Operands
    Number(f64),
    Constant(Name),
    Variable(Name),

    // Unary Ops
    Neg(ExprNode),

    // Binary Ops
    Binary(BinaryOp, ExprNode, ExprNode),

    // Functions
    Random,
    Abs(ExprNode),
    Log(ExprNode, ExprNode),
}

impl Expr {
    pub fn number(value: f64) -> Self {
        Self::Number(value)
    }

    pub fn constant(name: impl Into<String>) -> ArborResult<Self> {
        Ok(Self::Constant(Name::new("constant", name)?))
    }

    pub fn variable(name: impl Into<String>) -> ArborResult<Self> {
        Ok(Self::Variable(Name::new("variable", name)?))
    }

    pub fn neg(arg: Expr) -> Self {
        Self::Neg(Box::new(arg))
    }

    pub fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Self::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn add(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Add, lhs, rhs)
    }

    pub fn sub(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Sub, lhs, rhs)
    }

    pub fn mul(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Mul, lhs, rhs)
    }

    pub fn div(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Div, lhs, rhs)
    }

    pub fn modulo(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Mod, lhs, rhs)
    }

    pub fn pow(lhs: Expr, rhs: Expr) -> Self {
        Self::binary(BinaryOp::Pow, lhs, rhs)
    }

    pub fn random() -> Self {
        Self::Random
    }

    pub fn abs(arg: Expr) -> Self {
        Self::Abs(Box::new(arg))
    }

    pub fn log(base: Expr, arg: Expr) -> Self {
        Self::Log(Box::new(base), Box::new(arg))
    }

    /// Builds a binary node from children that may be absent.
    pub fn try_binary(op: BinaryOp, lhs: Option<Expr>, rhs: Option<Expr>) -> ArborResult<Self> {
        match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => Ok(Self::binary(op, lhs, rhs)),
            (None, _) => Err(ArborError::missing_operand(format!(
                "{} is missing its left operand",
                op.name()
            ))),
            (_, None) => Err(ArborError::missing_operand(format!(
                "{} is missing its right operand",
                op.name()
            ))),
        }
    }

    /// Builds any operator or function node, checking the number of children
    /// against the arity of `callable`.
    pub fn apply(callable: Callable, args: Vec<Expr>) -> ArborResult<Self> {
        let count = args.len();
        let mut args = args.into_iter().map(Box::new);
        let node = match (callable, args.next(), args.next(), args.next()) {
            (Callable::Random, None, _, _) => Some(Self::Random),
            (Callable::Neg, Some(arg), None, _) => Some(Self::Neg(arg)),
            (Callable::Abs, Some(arg), None, _) => Some(Self::Abs(arg)),
            (Callable::Binary(op), Some(lhs), Some(rhs), None) => Some(Self::Binary(op, lhs, rhs)),
            (Callable::Log, Some(base), Some(arg), None) => Some(Self::Log(base, arg)),
            _ => None,
        };

        node.ok_or_else(|| {
            let arity = callable.arity();
            let msg = format!(
                "{callable} expects {arity} operand{}, got {count}",
                crate::utils::plural_s(arity)
            );
            if count < arity {
                ArborError::missing_operand(msg)
            } else {
                ArborError::unexpected_operand(msg)
            }
        })
    }

    /// Builds a function node from its display name, e.g. `log`.
    pub fn call(name: &str, args: Vec<Expr>) -> ArborResult<Self> {
        match Callable::function(name) {
            Some(callable) => Self::apply(callable, args),
            None => Err(ArborError::invalid_name(format!(
                "`{name}` is not a known function"
            ))),
        }
    }

    pub fn is_operand(&self) -> bool {
        matches!(self, Self::Number(_) | Self::Constant(_) | Self::Variable(_))
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::Random | Self::Abs(_) | Self::Log(_, _))
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Neg(_) | Self::Binary(_, _, _))
    }

    /// The operator or function this node applies, `None` for operands.
    pub fn callable(&self) -> Option<Callable> {
        match self {
            Self::Number(_) | Self::Constant(_) | Self::Variable(_) => None,
            Self::Neg(_) => Some(Callable::Neg),
            Self::Binary(op, _, _) => Some(Callable::Binary(*op)),
            Self::Random => Some(Callable::Random),
            Self::Abs(_) => Some(Callable::Abs),
            Self::Log(_, _) => Some(Callable::Log),
        }
    }

    pub fn arity(&self) -> usize {
        self.callable().map_or(0, |callable| callable.arity())
    }

    pub fn binary_op(&self) -> Option<BinaryOp> {
        match self {
            Self::Binary(op, _, _) => Some(*op),
            _ => None,
        }
    }

    /// Priority rank of an operator node; operands and functions have none.
    pub fn priority(&self) -> Option<i32> {
        match self {
            Self::Neg(_) => Some(UNARY_PRIORITY),
            Self::Binary(op, _, _) => Some(op.priority()),
            _ => None,
        }
    }

    pub fn children(&self) -> Vec<&Expr> {
        match self {
            Self::Number(_) | Self::Constant(_) | Self::Variable(_) | Self::Random => Vec::new(),
            Self::Neg(arg) | Self::Abs(arg) => vec![arg],
            Self::Binary(_, lhs, rhs) | Self::Log(lhs, rhs) => vec![lhs, rhs],
        }
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(Expr::depth)
            .max()
            .unwrap_or(0)
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A non-empty symbol name.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Name(String);

impl Name {
    pub fn new(role: &str, name: impl Into<String>) -> ArborResult<Self> {
        let name = name.into();
        if name.is_empty() {
            Err(ArborError::invalid_name(format!("empty {role} name")))
        } else {
            Ok(Self(name))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Associativity {
    /// `(a op b) op c == a op (b op c)`
    Associative,
    Left,
    Right,
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinaryOp {
    pub const ALL: [BinaryOp; 6] = [
        BinaryOp::Add,
        BinaryOp::Sub,
        BinaryOp::Mul,
        BinaryOp::Div,
        BinaryOp::Mod,
        BinaryOp::Pow,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Pow => "^",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Sub => "Subtract",
            Self::Mul => "Multiply",
            Self::Div => "Divide",
            Self::Mod => "Modulo",
            Self::Pow => "Power",
        }
    }

    /// Binary ranks are negative; closer to zero binds tighter.
    pub fn priority(&self) -> i32 {
        match self {
            Self::Add | Self::Sub => -30,
            Self::Mul | Self::Div | Self::Mod => -20,
            Self::Pow => -10,
        }
    }

    pub fn associativity(&self) -> Associativity {
        match self {
            Self::Add | Self::Mul => Associativity::Associative,
            Self::Sub | Self::Div | Self::Mod => Associativity::Left,
            Self::Pow => Associativity::Right,
        }
    }

    /// The operator undoing this one, if any.
    pub fn inverse(&self) -> Option<BinaryOp> {
        match self {
            Self::Add => Some(Self::Sub),
            Self::Mul => Some(Self::Div),
            Self::Sub | Self::Div | Self::Mod | Self::Pow => None,
        }
    }

    /// Whether `a self (b child c)` equals `a self b child c` read left to right.
    /// Only an associative parent over itself or its inverse regroups.
    pub fn regroups_right(&self, child: BinaryOp) -> bool {
        self.associativity() == Associativity::Associative
            && (child == *self || Some(child) == self.inverse())
    }
}

impl Display for BinaryOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Every node kind that takes children, operators and functions alike.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum Callable {
    Neg,
    Binary(BinaryOp),
    Random,
    Abs,
    Log,
}

impl Callable {
    pub fn arity(&self) -> usize {
        match self {
            Self::Random => 0,
            Self::Neg | Self::Abs => 1,
            Self::Binary(_) | Self::Log => 2,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Self::Random | Self::Abs | Self::Log)
    }

    /// Display name of a function; operators use their symbol.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Neg => NEG_SYMBOL,
            Self::Binary(op) => op.symbol(),
            Self::Random => "random",
            Self::Abs => "abs",
            Self::Log => "log",
        }
    }

    pub fn function(name: &str) -> Option<Self> {
        match name {
            "random" => Some(Self::Random),
            "abs" => Some(Self::Abs),
            "log" => Some(Self::Log),
            _ => None,
        }
    }
}

impl Display for Callable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Neg => write!(f, "Negate"),
            Self::Binary(op) => write!(f, "{}", op.name()),
            function => write!(f, "{}()", function.name()),
        }
    }
}
