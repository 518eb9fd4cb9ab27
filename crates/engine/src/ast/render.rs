use std::fmt::Display;

use crate::ast::*;

/// How ties between equal priority ranks are printed.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone, Copy)]
pub enum RenderStyle {
    /// An equal-rank child is printed bare on either side.
    #[default]
    Legacy,
    /// An equal-rank right child is parenthesized unless regrouping it
    /// leaves the value unchanged, e.g. `a - (b - c)`.
    Strict,
}

pub trait Render {
    fn render(&self) -> String {
        self.render_with(RenderStyle::default())
    }

    fn render_with(&self, style: RenderStyle) -> String;
}

#[derive(Clone, Copy)]
enum Side {
    Left,
    Right,
}

impl Render for Expr {
    fn render_with(&self, style: RenderStyle) -> String {
        match self {
            Expr::Number(n) => n.to_string(),
            Expr::Constant(name) | Expr::Variable(name) => name.to_string(),
            Expr::Neg(arg) => {
                if arg.is_operand() || arg.is_function() || arg.arity() == 1 {
                    format!("{NEG_SYMBOL} {}", arg.render_with(style))
                } else {
                    format!("{NEG_SYMBOL} ({})", arg.render_with(style))
                }
            }
            Expr::Binary(op, lhs, rhs) => format!(
                "{} {} {}",
                operand(style, *op, lhs, Side::Left),
                op.symbol(),
                operand(style, *op, rhs, Side::Right)
            ),
            Expr::Random => format!("{}()", Callable::Random.name()),
            Expr::Abs(arg) => format!("|{}|", arg.render_with(style)),
            Expr::Log(base, arg) => format!(
                "{}({}, {})",
                Callable::Log.name(),
                base.render_with(style),
                arg.render_with(style)
            ),
        }
    }
}

fn operand(style: RenderStyle, parent: BinaryOp, child: &Expr, side: Side) -> String {
    let rendered = child.render_with(style);
    if needs_parens(style, parent, child, side) {
        format!("({rendered})")
    } else {
        rendered
    }
}

fn needs_parens(style: RenderStyle, parent: BinaryOp, child: &Expr, side: Side) -> bool {
    // Operands, functions and unary operators never need grouping
    let Some(child_op) = child.binary_op() else {
        return false;
    };
    // Exponent chains are always grouped explicitly
    if child_op.associativity() == Associativity::Right {
        return true;
    }
    if child_op.priority() != parent.priority() {
        return child_op.priority() < parent.priority();
    }
    match (style, side) {
        (RenderStyle::Legacy, _) | (RenderStyle::Strict, Side::Left) => false,
        (RenderStyle::Strict, Side::Right) => !parent.regroups_right(child_op),
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.render())
    }
}
