//! Numerical evaluation of expression trees and a quadrature cross-check for definite
//! integrals computed symbolically.

use crate::symbolic::symbolic_definite_integral::{IntegrationEngine, IntegrationError};
use crate::symbolic::symbolic_engine::{BoundedKind, Expr};
use crate::symbolic::symbolic_integration::BuiltinRules;
use crate::symbolic::symbolic_simplify::SimplifyVisitor;
use gauss_quad::GaussLegendre;
use std::collections::HashMap;

impl Expr {
    /// Evaluates the expression with the given variable values.
    ///
    /// `None` if a variable is unbound, or if an indefinite integral (or a definite one the
    /// built-in rules cannot do) is met. Division by zero follows IEEE arithmetic.
    pub fn eval(&self, bindings: &HashMap<String, f64>) -> Option<f64> {
        match self {
            Expr::Real(value) => Some(*value),
            Expr::Var(name) => bindings.get(name).copied(),
            Expr::Add(lhs, rhs) => Some(lhs.eval(bindings)? + rhs.eval(bindings)?),
            Expr::Sub(lhs, rhs) => Some(lhs.eval(bindings)? - rhs.eval(bindings)?),
            Expr::Mul(lhs, rhs) => Some(lhs.eval(bindings)? * rhs.eval(bindings)?),
            Expr::Div(lhs, rhs) => Some(lhs.eval(bindings)? / rhs.eval(bindings)?),
            Expr::Pow(base, exp) => Some(base.eval(bindings)?.powf(exp.eval(bindings)?)),
            Expr::Integral(..) => None,
            Expr::Bounded {
                kind: BoundedKind::DefiniteIntegral,
                operand,
                variable,
                lower,
                upper,
            } => {
                let engine = IntegrationEngine::new(SimplifyVisitor, BuiltinRules::default());
                engine
                    .definite(operand, variable, variable, lower, upper)
                    .ok()?
                    .eval(bindings)
            }
        }
    }

    /// ∫ from `lower` to `upper` of self d(`var`) by Gauss-Legendre quadrature of `degree` nodes.
    ///
    /// Exact for polynomials of degree up to 2*`degree` - 1.
    pub fn quadrature(
        &self,
        var: &str,
        lower: f64,
        upper: f64,
        degree: usize,
    ) -> Result<f64, IntegrationError> {
        let quad = GaussLegendre::new(degree).map_err(|e| IntegrationError::QuadratureFailed {
            reason: format!("Failed to create Gauss-Legendre quadrature: {:?}", e),
        })?;

        let f = |x: f64| {
            let bindings = HashMap::from([(var.to_string(), x)]);
            self.eval(&bindings).unwrap_or(f64::NAN)
        };
        let result = quad.integrate(lower, upper, f);

        if result.is_finite() {
            Ok(result)
        } else {
            Err(IntegrationError::QuadratureFailed {
                reason: format!("{} is not finite on [{}, {}]", self, lower, upper),
            })
        }
    }
}
