use std::fmt::Display;

use thiserror::Error;

pub type ArborResult<T> = Result<T, ArborError>;

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {msg}")]
pub struct ArborError {
    pub kind: ArborErrorKind,
    pub msg: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArborErrorKind {
    // Construction
    MissingOperand,
    UnexpectedOperand,
    InvalidName,

    // Symbol table
    DuplicateSymbol,
    UnknownSymbol,

    // Evaluation
    DivideByZero,
    NegativeBase,
    InvalidPowerOfZero,
    InvalidLogBase,
    InvalidLogArgument,
    NonFiniteResult,

    System,
}

impl ArborErrorKind {
    /// True for the kinds that can only come out of `eval`.
    pub fn is_evaluation(&self) -> bool {
        matches!(
            self,
            Self::UnknownSymbol
                | Self::DivideByZero
                | Self::NegativeBase
                | Self::InvalidPowerOfZero
                | Self::InvalidLogBase
                | Self::InvalidLogArgument
                | Self::NonFiniteResult
        )
    }
}

impl Display for ArborErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::MissingOperand => "missing operand",
            Self::UnexpectedOperand => "unexpected operand",
            Self::InvalidName => "invalid name",
            Self::DuplicateSymbol => "duplicate symbol",
            Self::UnknownSymbol => "unknown symbol",
            Self::DivideByZero => "divide by zero",
            Self::NegativeBase => "negative base",
            Self::InvalidPowerOfZero => "invalid power of zero",
            Self::InvalidLogBase => "invalid logarithm base",
            Self::InvalidLogArgument => "invalid logarithm argument",
            Self::NonFiniteResult => "non-finite result",
            Self::System => "system",
        };
        write!(f, "{name}")
    }
}

impl ArborError {
    pub fn new(kind: ArborErrorKind, msg: impl Into<String>) -> Self {
        Self {
            kind,
            msg: msg.into(),
        }
    }

    pub fn system(msg: String) -> Self {
        Self::new(ArborErrorKind::System, msg)
    }

    pub fn missing_operand(msg: String) -> Self {
        Self::new(ArborErrorKind::MissingOperand, msg)
    }

    pub fn unexpected_operand(msg: String) -> Self {
        Self::new(ArborErrorKind::UnexpectedOperand, msg)
    }

    pub fn invalid_name(msg: String) -> Self {
        Self::new(ArborErrorKind::InvalidName, msg)
    }

    pub fn duplicate_symbol(name: &str) -> Self {
        Self::new(
            ArborErrorKind::DuplicateSymbol,
            format!("`{name}` is already defined"),
        )
    }

    pub fn unknown_symbol(what: &str, name: &str) -> Self {
        Self::new(
            ArborErrorKind::UnknownSymbol,
            format!("{what} `{name}` is not defined"),
        )
    }

    pub fn non_finite(rendered: &str, value: f64) -> Self {
        Self::new(
            ArborErrorKind::NonFiniteResult,
            format!("`{rendered}` evaluates to {value}"),
        )
    }

    pub fn evaluator(kind: ArborErrorKind, msg: &str) -> Self {
        Self::new(kind, msg)
    }

    pub fn kind(&self) -> ArborErrorKind {
        self.kind
    }
}

impl From<std::io::Error> for ArborError {
    fn from(value: std::io::Error) -> Self {
        Self::system(value.to_string())
    }
}
