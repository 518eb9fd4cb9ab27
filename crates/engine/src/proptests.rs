//! Property-based tests over randomly assembled trees.

use proptest::prelude::*;
use proptest::sample::select;

use crate::{
    BinaryOp, Eval, EvalContext, Expr, FixedSource, Render, RenderStyle, SymbolTable,
    error::ArborErrorKind,
};

fn symbols() -> SymbolTable {
    let mut symbols = SymbolTable::new();
    symbols.set_variable("r", 10.0).unwrap();
    symbols.set_variable("s", 5.0).unwrap();
    symbols
}

fn leaf() -> impl Strategy<Value = Expr> {
    prop_oneof![
        (-20i32..20).prop_map(|n| Expr::number(f64::from(n))),
        (-20i32..20).prop_map(|n| Expr::number(f64::from(n) / 4.0)),
        Just(Expr::variable("r").unwrap()),
        Just(Expr::variable("s").unwrap()),
        Just(Expr::constant("pi").unwrap()),
        Just(Expr::random()),
    ]
}

fn tree() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::neg),
            inner.clone().prop_map(Expr::abs),
            (select(BinaryOp::ALL.to_vec()), inner.clone(), inner.clone())
                .prop_map(|(op, lhs, rhs)| Expr::binary(op, lhs, rhs)),
            (inner.clone(), inner).prop_map(|(base, arg)| Expr::log(base, arg)),
        ]
    })
}

/// Trees of small leaves under operators that cannot fail on them.
fn tame_tree() -> impl Strategy<Value = Expr> {
    leaf().prop_recursive(3, 16, 2, |inner| {
        prop_oneof![
            inner.clone().prop_map(Expr::neg),
            inner.clone().prop_map(Expr::abs),
            (
                select(vec![BinaryOp::Add, BinaryOp::Sub, BinaryOp::Mul]),
                inner.clone(),
                inner
            )
                .prop_map(|(op, lhs, rhs)| Expr::binary(op, lhs, rhs)),
        ]
    })
}

fn balanced(text: &str) -> bool {
    let mut depth = 0i32;
    for c in text.chars() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            _ => (),
        }
        if depth < 0 {
            return false;
        }
    }
    depth == 0
}

proptest! {
    #[test]
    fn evaluation_is_repeatable(expr in tree()) {
        let symbols = symbols();
        let source = FixedSource::new(0.5).unwrap();
        let ctx = EvalContext::new(&symbols, &source);
        let first = expr.eval(&ctx);
        let second = expr.eval(&ctx);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a, b),
            (a, b) => prop_assert!(false, "{a:?} != {b:?}"),
        }
    }

    #[test]
    fn failures_are_evaluation_kinds(expr in tree()) {
        let symbols = symbols();
        let source = FixedSource::new(0.5).unwrap();
        if let Err(err) = expr.eval(&EvalContext::new(&symbols, &source)) {
            prop_assert!(err.kind.is_evaluation());
            prop_assert_ne!(ArborErrorKind::UnknownSymbol, err.kind);
        }
    }

    #[test]
    fn successes_are_finite(expr in tree()) {
        let symbols = symbols();
        let source = FixedSource::new(0.5).unwrap();
        if let Ok(value) = expr.eval(&EvalContext::new(&symbols, &source)) {
            prop_assert!(value.is_finite(), "{} = {}", expr, value);
        }
    }

    #[test]
    fn overflowing_powers_fail(base in 10i32..100, exponent in 310i32..400) {
        let symbols = symbols();
        let source = FixedSource::new(0.5).unwrap();
        let ctx = EvalContext::new(&symbols, &source);
        let huge = Expr::pow(Expr::number(f64::from(base)), Expr::number(f64::from(exponent)));
        for expr in [huge.clone(), Expr::sub(huge.clone(), huge)] {
            let err = expr.eval(&ctx).unwrap_err();
            prop_assert_eq!(ArborErrorKind::NonFiniteResult, err.kind);
        }
    }

    #[test]
    fn tame_trees_are_finite(expr in tame_tree()) {
        let symbols = symbols();
        let source = FixedSource::new(0.5).unwrap();
        let value = expr.eval(&EvalContext::new(&symbols, &source)).unwrap();
        prop_assert!(value.is_finite());
    }

    #[test]
    fn rendering_is_balanced(expr in tree()) {
        let legacy = expr.render();
        let strict = expr.render_with(RenderStyle::Strict);
        prop_assert!(balanced(&legacy), "{}", legacy);
        prop_assert!(balanced(&strict), "{}", strict);
        prop_assert_eq!(legacy.clone(), expr.render());
        // Strict only ever adds grouping
        prop_assert!(strict.matches('(').count() >= legacy.matches('(').count());
        prop_assert_eq!(strict.replace(['(', ')'], ""), legacy.replace(['(', ')'], ""));
    }

    #[test]
    fn display_matches_render(expr in tree()) {
        prop_assert_eq!(expr.render(), expr.to_string());
        prop_assert_eq!(expr.render_with(RenderStyle::Legacy), expr.to_string());
    }
}
