//! Arithmetic expression trees: typed nodes, numeric evaluation and
//! precedence-aware rendering.

use log::debug;

mod ast;
mod samples;
mod source;
mod state;
mod utils;

pub mod error;

#[cfg(test)]
mod proptests;

pub use ast::{
    Associativity, BinaryOp, Callable, Eval, EvalContext, Expr, ExprNode, NEG_SYMBOL, Name,
    Render, RenderStyle, UNARY_PRIORITY,
};
pub use samples::{EULER_MASCHERONI, Sample, sample, samples, seed_symbols};
pub use source::{FixedSource, NumericSource, RandomSource};
pub use state::{GOLDEN_RATIO, SymbolTable, Symbols};
pub use utils::{plural_is_are, plural_s, render_symbol_counts};

use error::ArborResult;

pub mod prelude {
    pub use crate::error::{ArborError, ArborErrorKind, ArborResult};
    pub use crate::{Eval, Expr, Render, RenderStyle, Session, SymbolTable};
}

/// A symbol table, a numeric source and a render style, bundled together.
pub struct Session {
    symbols: SymbolTable,
    source: Box<dyn NumericSource + Send + Sync>,
    style: RenderStyle,
}

impl Session {
    pub fn new() -> Self {
        Self {
            symbols: SymbolTable::new(),
            source: Box::new(RandomSource::new()),
            style: RenderStyle::default(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new().with_source(RandomSource::seeded(seed))
    }

    /// A session holding the bindings the demonstration trees expect.
    pub fn with_samples() -> ArborResult<Self> {
        let mut session = Self::new();
        seed_symbols(session.symbols_mut())?;
        Ok(session)
    }

    pub fn with_source<S>(mut self, source: S) -> Self
    where
        S: NumericSource + Send + Sync + 'static,
    {
        self.source = Box::new(source);
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    pub fn set_style(&mut self, style: RenderStyle) {
        self.style = style;
    }

    /// The seed behind `random()`, when the session's source has one.
    pub fn seed(&self) -> Option<u64> {
        self.source.seed()
    }

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn evaluate(&self, expr: &Expr) -> ArborResult<f64> {
        expr.eval(&EvalContext::new(&self.symbols, self.source.as_ref()))
    }

    pub fn render(&self, expr: &Expr) -> String {
        expr.render_with(self.style)
    }

    /// `"<rendered expression> = <value>"`
    pub fn report(&self, expr: &Expr) -> ArborResult<String> {
        let line = format!("{} = {}", self.render(expr), self.evaluate(expr)?);
        debug!("report (depth {}): {line}", expr.depth());
        Ok(line)
    }

    /// Like [`Session::report`], with a failed evaluation in the value slot.
    pub fn report_lossy(&self, expr: &Expr) -> String {
        match self.evaluate(expr) {
            Ok(value) => format!("{} = {value}", self.render(expr)),
            Err(err) => format!("{} = error: {err}", self.render(expr)),
        }
    }

    pub fn report_samples(&self) -> ArborResult<Vec<(&'static str, String)>> {
        Ok(samples()?
            .into_iter()
            .map(|sample| (sample.name, self.report_lossy(&sample.expr)))
            .collect())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
