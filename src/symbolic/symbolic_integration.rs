//! # Indefinite integration rules
//!
//! The definite-integration engine does not know how to integrate anything by itself: it asks an
//! [`AntiderivativeOracle`]. The contract for every oracle is
//!
//! - on success return `Add(F, C)`, the antiderivative proper `F` in the most significant slot
//!   and the constant of integration `C` in the least significant slot;
//! - return `None` when no rule is known for the integrand.
//!
//! The engine checks the `Add` shape but cannot check which operand is really the constant,
//! so putting `F` first is a promise every implementer makes.
//!
//! [`BuiltinRules`] is the oracle the crate ships with. It only knows the elementary rules:
//! constants, linearity, constant factors and divisors, and the power rule for `x^n`, n ≠ -1.

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_shapes::{Exponent, Real, Specialized, Variable};

/// Source of indefinite integrals, one rule per node kind.
pub trait AntiderivativeOracle {
    /// ∫ integrand d(var), shaped `Add(F, C)`, or `None` if no rule applies.
    fn antiderivative(&self, integrand: &Expr, var: &Variable) -> Option<Expr>;
}

/// The elementary rule table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuiltinRules {
    constant_name: String,
}

impl Default for BuiltinRules {
    fn default() -> Self {
        BuiltinRules {
            constant_name: "C".to_string(),
        }
    }
}

impl BuiltinRules {
    /// Rules that name the constant of integration `constant_name` instead of `C`.
    pub fn with_constant(constant_name: &str) -> Self {
        BuiltinRules {
            constant_name: constant_name.to_string(),
        }
    }

    pub fn constant_name(&self) -> &str {
        &self.constant_name
    }
}

impl AntiderivativeOracle for BuiltinRules {
    fn antiderivative(&self, integrand: &Expr, var: &Variable) -> Option<Expr> {
        let primitive = primitive(integrand, var)?;
        Some(primitive + Expr::Var(self.constant_name.clone()))
    }
}

impl Expr {
    /// ∫ self d(var) with the built-in rules, as `F + C`.
    pub fn integrate(&self, var: &Variable) -> Option<Expr> {
        BuiltinRules::default().antiderivative(self, var)
    }
}

/// Antiderivative without the constant of integration.
fn primitive(expr: &Expr, var: &Variable) -> Option<Expr> {
    let x = var.name();

    // ∫ c dx = c*x, for anything that does not depend on x
    if !expr.contains_variable(x) {
        return Some(expr.clone() * var.generalize());
    }

    match expr {
        // only x itself is left here: ∫ x dx = x²/2
        Expr::Var(_) => Some(var.generalize().pow(Expr::Real(2.0)) / Expr::Real(2.0)),

        // ∫ (f + g) dx = ∫ f dx + ∫ g dx
        Expr::Add(lhs, rhs) => Some(primitive(lhs, var)? + primitive(rhs, var)?),

        // ∫ (f - g) dx = ∫ f dx - ∫ g dx
        Expr::Sub(lhs, rhs) => Some(primitive(lhs, var)? - primitive(rhs, var)?),

        // ∫ c*f dx = c * ∫ f dx
        Expr::Mul(lhs, rhs) if !lhs.contains_variable(x) => {
            Some(lhs.as_ref().clone() * primitive(rhs, var)?)
        }
        Expr::Mul(lhs, rhs) if !rhs.contains_variable(x) => {
            Some(primitive(lhs, var)? * rhs.as_ref().clone())
        }

        // ∫ f/c dx = (∫ f dx) / c
        Expr::Div(lhs, rhs) if !rhs.contains_variable(x) => {
            Some(primitive(lhs, var)? / rhs.as_ref().clone())
        }

        // ∫ x^n dx = x^(n+1)/(n+1), n ≠ -1
        Expr::Pow(..) => {
            let power = Exponent::<Variable, Real>::try_match(expr)?;
            let (base, exponent) = power.into_operands();
            let n = exponent.value();
            if base != *var || n == -1.0 {
                return None;
            }
            Some(base.generalize().pow(Expr::Real(n + 1.0)) / Expr::Real(n + 1.0))
        }

        _ => None,
    }
}
