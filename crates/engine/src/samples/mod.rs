//! The demonstration trees and the bindings they are shown with.
//! These can then be used easily for testing or from the binary

use crate::{
    ast::Expr,
    error::ArborResult,
    state::SymbolTable,
};

pub const EULER_MASCHERONI: f64 = 0.5772156649;

#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: &'static str,
    pub expr: Expr,
}

impl Sample {
    fn new(name: &'static str, expr: Expr) -> Self {
        Self { name, expr }
    }
}

/// Binds `r = 10`, `s = 5` and registers the `Euler` constant.
pub fn seed_symbols(symbols: &mut SymbolTable) -> ArborResult<()> {
    symbols.create_variable("r", 10.0)?;
    symbols.create_variable("s", 2.0)?;
    symbols.set_variable("s", 5.0)?;
    symbols.register_constant("Euler", EULER_MASCHERONI)?;
    Ok(())
}

pub fn samples() -> ArborResult<Vec<Sample>> {
    let r = || Expr::variable("r");
    let s = || Expr::variable("s");

    Ok(vec![
        Sample::new(
            "area",
            Expr::mul(Expr::constant("pi")?, Expr::pow(r()?, Expr::number(2.0))),
        ),
        Sample::new("sum", Expr::add(r()?, s()?)),
        Sample::new("difference", Expr::sub(r()?, s()?)),
        Sample::new("product", Expr::mul(r()?, s()?)),
        Sample::new("quotient", Expr::div(r()?, s()?)),
        Sample::new("power", Expr::pow(r()?, s()?)),
        Sample::new("remainder", Expr::modulo(r()?, s()?)),
        Sample::new("negation", Expr::neg(r()?)),
        Sample::new("euler", Expr::add(Expr::number(1.0), Expr::constant("Euler")?)),
        Sample::new("absolute", Expr::abs(r()?)),
        Sample::new(
            "logarithm",
            Expr::call("log", vec![Expr::number(2.0), Expr::mul(r()?, Expr::number(0.8))])?,
        ),
        Sample::new("random", Expr::call("random", Vec::new())?),
    ])
}

pub fn sample(name: &str) -> ArborResult<Option<Sample>> {
    Ok(samples()?
        .into_iter()
        .find(|sample| sample.name.eq_ignore_ascii_case(name)))
}
