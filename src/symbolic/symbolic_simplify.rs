//! # Symbolic Expression Simplification Module
//!
//! Rewriting is expressed as a visitor over the closed node set: [`ExprVisitor::visit`] takes a
//! generic node and returns its replacement, or `None` when no value can be produced for it.
//! [`SimplifyVisitor`] is the normalizer used by the integration engine. It works in a
//! single bottom-up pass:
//!
//! 1. **Recursive Descent**: children are rewritten first
//! 2. **Constant Folding**: `+ - * / ^` between two `Real`s is evaluated
//! 3. **Algebraic Identities**: `x + 0 = x`, `x * 1 = x`, `x * 0 = 0`, `x ^ 1 = x`, `x - x = 0` ...
//! 4. **Calculus nodes**: an `Integral` whose antiderivative is known is replaced by it, a
//!    `DefiniteIntegral` that can be evaluated is replaced by its value
//!
//! A constant division by zero, or any constant fold that overflows to `inf` or gives `NaN`,
//! has no normal form: the visitor returns `None` and callers propagate it.
//!
//! The visitor carries no state, so one value can be shared freely, including across threads.

use crate::symbolic::symbolic_definite_integral::IntegrationEngine;
use crate::symbolic::symbolic_engine::{BoundedKind, Expr};
use crate::symbolic::symbolic_integration::{AntiderivativeOracle, BuiltinRules};
use crate::symbolic::symbolic_shapes::{Integral, Specialized, Variable};
use log::debug;

/// A rewrite over the closed set of expression kinds. Implementations must be total
/// (handle every kind) and pure (equal inputs give equal outputs).
pub trait ExprVisitor {
    fn visit(&self, expr: &Expr) -> Option<Expr>;
}

/// Stateless constant-folding and identity-eliminating normalizer.
///
/// `Integral` nodes are integrated with `BuiltinRules::default()`, whose constant is `C`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SimplifyVisitor;

impl ExprVisitor for SimplifyVisitor {
    fn visit(&self, expr: &Expr) -> Option<Expr> {
        match expr {
            Expr::Real(_) | Expr::Var(_) => Some(expr.clone()),
            Expr::Add(lhs, rhs) => simplify_add(self.visit(lhs)?, self.visit(rhs)?),
            Expr::Sub(lhs, rhs) => simplify_sub(self.visit(lhs)?, self.visit(rhs)?),
            Expr::Mul(lhs, rhs) => simplify_mul(self.visit(lhs)?, self.visit(rhs)?),
            Expr::Div(lhs, rhs) => simplify_div(self.visit(lhs)?, self.visit(rhs)?),
            Expr::Pow(base, exp) => simplify_pow(self.visit(base)?, self.visit(exp)?),
            Expr::Integral(integrand, differential) => {
                self.visit_integral(self.visit(integrand)?, self.visit(differential)?)
            }
            Expr::Bounded {
                kind,
                operand,
                variable,
                lower,
                upper,
            } => self.visit_bounded(
                *kind,
                self.visit(operand)?,
                self.visit(variable)?,
                self.visit(lower)?,
                self.visit(upper)?,
            ),
        }
    }
}

impl SimplifyVisitor {
    pub fn new() -> Self {
        SimplifyVisitor
    }

    /// Convenience for `expr.accept(&SimplifyVisitor)`.
    pub fn simplify(&self, expr: &Expr) -> Option<Expr> {
        expr.accept(self)
    }

    fn visit_integral(&self, integrand: Expr, differential: Expr) -> Option<Expr> {
        let rebuilt = Expr::integral(integrand, differential);
        let Some(view) = Integral::<Expr, Variable>::try_match(&rebuilt) else {
            return Some(rebuilt);
        };
        match BuiltinRules::default().antiderivative(view.integrand(), view.differential()) {
            Some(antiderivative) => self.visit(&antiderivative),
            None => Some(rebuilt),
        }
    }

    fn visit_bounded(
        &self,
        kind: BoundedKind,
        operand: Expr,
        variable: Expr,
        lower: Expr,
        upper: Expr,
    ) -> Option<Expr> {
        match kind {
            BoundedKind::DefiniteIntegral => {
                let engine = IntegrationEngine::new(*self, BuiltinRules::default());
                match engine.definite(&operand, &variable, &variable, &lower, &upper) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        debug!("definite integral kept unevaluated: {}", err);
                        Some(Expr::definite_integral(operand, variable, lower, upper))
                    }
                }
            }
        }
    }
}

/// A folded constant must be finite, otherwise the node has no normal form.
fn folded(value: f64) -> Option<Expr> {
    if value.is_finite() {
        Some(Expr::Real(value))
    } else {
        None
    }
}

fn simplify_add(lhs: Expr, rhs: Expr) -> Option<Expr> {
    match (lhs, rhs) {
        (Expr::Real(a), Expr::Real(b)) => folded(a + b),
        (lhs, rhs) if lhs.is_zero() => Some(rhs),
        (lhs, rhs) if rhs.is_zero() => Some(lhs),
        (lhs, rhs) => Some(Expr::Add(Box::new(lhs), Box::new(rhs))),
    }
}

fn simplify_sub(lhs: Expr, rhs: Expr) -> Option<Expr> {
    match (lhs, rhs) {
        (Expr::Real(a), Expr::Real(b)) => folded(a - b),
        (lhs, rhs) if rhs.is_zero() => Some(lhs),
        (lhs, rhs) if lhs == rhs => Some(Expr::Real(0.0)),
        (lhs, rhs) => Some(Expr::Sub(Box::new(lhs), Box::new(rhs))),
    }
}

fn simplify_mul(lhs: Expr, rhs: Expr) -> Option<Expr> {
    match (lhs, rhs) {
        (Expr::Real(a), Expr::Real(b)) => folded(a * b),
        (lhs, rhs) if lhs.is_zero() || rhs.is_zero() => Some(Expr::Real(0.0)),
        (lhs, rhs) if lhs.is_one() => Some(rhs),
        (lhs, rhs) if rhs.is_one() => Some(lhs),
        // a * (b * e) = (a*b) * e
        (Expr::Real(a), Expr::Mul(inner_lhs, inner_rhs)) => match *inner_lhs {
            Expr::Real(b) => simplify_mul(folded(a * b)?, *inner_rhs),
            inner_lhs => Some(Expr::Mul(
                Box::new(Expr::Real(a)),
                Box::new(Expr::Mul(Box::new(inner_lhs), inner_rhs)),
            )),
        },
        (lhs, rhs) => Some(Expr::Mul(Box::new(lhs), Box::new(rhs))),
    }
}

fn simplify_div(lhs: Expr, rhs: Expr) -> Option<Expr> {
    match (lhs, rhs) {
        (_, rhs) if rhs.is_zero() => None,
        (Expr::Real(a), Expr::Real(b)) => folded(a / b),
        (lhs, rhs) if rhs.is_one() => Some(lhs),
        (lhs, _) if lhs.is_zero() => Some(Expr::Real(0.0)),
        (lhs, rhs) => Some(Expr::Div(Box::new(lhs), Box::new(rhs))),
    }
}

fn simplify_pow(base: Expr, exp: Expr) -> Option<Expr> {
    match (base, exp) {
        (Expr::Real(a), Expr::Real(b)) => folded(a.powf(b)),
        (_, exp) if exp.is_zero() => Some(Expr::Real(1.0)),
        (base, exp) if exp.is_one() => Some(base),
        (base, _) if base.is_one() => Some(Expr::Real(1.0)),
        (base, exp) => Some(Expr::Pow(Box::new(base), Box::new(exp))),
    }
}
