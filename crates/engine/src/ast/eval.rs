use log::trace;

use crate::{
    ast::*,
    error::{ArborError, ArborErrorKind, ArborResult},
    source::NumericSource,
    state::Symbols,
};

/// Everything a tree may consult while being evaluated.
#[derive(Clone, Copy)]
pub struct EvalContext<'a> {
    symbols: &'a dyn Symbols,
    source: &'a dyn NumericSource,
}

impl<'a> EvalContext<'a> {
    pub fn new(symbols: &'a dyn Symbols, source: &'a dyn NumericSource) -> Self {
        Self { symbols, source }
    }

    pub fn symbols(&self) -> &'a dyn Symbols {
        self.symbols
    }

    pub fn source(&self) -> &'a dyn NumericSource {
        self.source
    }
}

pub trait Eval {
    /// Evaluates the expression against the symbols and numeric source of `ctx`.
    fn eval(&self, ctx: &EvalContext) -> ArborResult<f64>;
}

impl<T> Eval for Box<T>
where
    T: Eval + ?Sized,
{
    fn eval(&self, ctx: &EvalContext) -> ArborResult<f64> {
        self.as_ref().eval(ctx)
    }
}

impl Eval for Expr {
    fn eval(&self, ctx: &EvalContext) -> ArborResult<f64> {
        let outcome = match self {
            Expr::Number(n) => Ok(*n),
            Expr::Constant(name) => constant_expr(ctx, name),
            Expr::Variable(name) => variable_expr(ctx, name),
            Expr::Neg(node) => Ok(-node.eval(ctx)?),
            Expr::Binary(op, lhs, rhs) => match op {
                BinaryOp::Add => Ok(lhs.eval(ctx)? + rhs.eval(ctx)?),
                BinaryOp::Sub => Ok(lhs.eval(ctx)? - rhs.eval(ctx)?),
                BinaryOp::Mul => Ok(lhs.eval(ctx)? * rhs.eval(ctx)?),
                BinaryOp::Div => div_expr(ctx, lhs, rhs),
                BinaryOp::Mod => mod_expr(ctx, lhs, rhs),
                BinaryOp::Pow => pow_expr(ctx, lhs, rhs),
            },
            Expr::Random => Ok(ctx.source().next_value()),
            Expr::Abs(node) => Ok(node.eval(ctx)?.abs()),
            Expr::Log(base, arg) => log_expr(ctx, base, arg),
        };
        let outcome = outcome.and_then(|value| finite(self, value));
        if let Err(err) = &outcome {
            trace!("{self} failed: {err}");
        }
        outcome
    }
}

/// Overflow and undefined IEEE results stop evaluation at the node producing them.
fn finite(expr: &Expr, value: f64) -> ArborResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ArborError::non_finite(&expr.to_string(), value))
    }
}

fn constant_expr(ctx: &EvalContext, name: &Name) -> ArborResult<f64> {
    trace!("looking up constant `{name}`");
    ctx.symbols()
        .constant(name.as_str())
        .ok_or_else(|| ArborError::unknown_symbol("Constant", name.as_str()))
}

fn variable_expr(ctx: &EvalContext, name: &Name) -> ArborResult<f64> {
    trace!("looking up variable `{name}`");
    ctx.symbols()
        .variable(name.as_str())
        .ok_or_else(|| ArborError::unknown_symbol("Variable", name.as_str()))
}

fn div_expr(ctx: &EvalContext, lhs: &ExprNode, rhs: &ExprNode) -> ArborResult<f64> {
    // Divisor first, so a zero divisor fails before the dividend is touched
    let divisor = rhs.eval(ctx)?;
    if divisor == 0.0 {
        return Err(ArborError::evaluator(
            ArborErrorKind::DivideByZero,
            "Cannot divide by 0",
        ));
    }
    Ok(lhs.eval(ctx)? / divisor)
}

fn mod_expr(ctx: &EvalContext, lhs: &ExprNode, rhs: &ExprNode) -> ArborResult<f64> {
    let dividend = lhs.eval(ctx)?;
    let divisor = rhs.eval(ctx)?;
    if divisor == 0.0 {
        return Err(ArborError::evaluator(
            ArborErrorKind::DivideByZero,
            "Cannot take the remainder of a division by 0",
        ));
    }
    Ok(dividend % divisor)
}

fn pow_expr(ctx: &EvalContext, lhs: &ExprNode, rhs: &ExprNode) -> ArborResult<f64> {
    let base = lhs.eval(ctx)?;
    if base < 0.0 {
        return Err(ArborError::evaluator(
            ArborErrorKind::NegativeBase,
            "Cannot raise a negative value to a power",
        ));
    }
    if base == 1.0 {
        // The exponent is never evaluated
        return Ok(1.0);
    }

    let exponent = rhs.eval(ctx)?;
    if base == 0.0 {
        return if exponent <= 0.0 {
            Err(ArborError::evaluator(
                ArborErrorKind::InvalidPowerOfZero,
                "Cannot raise 0 to a non-positive power",
            ))
        } else {
            Ok(0.0)
        };
    }
    if exponent == 0.0 {
        return Ok(1.0);
    }
    Ok(base.powf(exponent))
}

fn log_expr(ctx: &EvalContext, base: &ExprNode, arg: &ExprNode) -> ArborResult<f64> {
    let base = base.eval(ctx)?;
    if base <= 0.0 {
        return Err(ArborError::evaluator(
            ArborErrorKind::InvalidLogBase,
            "Cannot take a logarithm with a non-positive base",
        ));
    }
    if base == 1.0 {
        return Err(ArborError::evaluator(
            ArborErrorKind::InvalidLogBase,
            "Cannot take a logarithm with base 1",
        ));
    }

    let arg = arg.eval(ctx)?;
    if arg <= 0.0 {
        return Err(ArborError::evaluator(
            ArborErrorKind::InvalidLogArgument,
            "Cannot take the logarithm of a non-positive value",
        ));
    }
    Ok(arg.ln() / base.ln())
}
