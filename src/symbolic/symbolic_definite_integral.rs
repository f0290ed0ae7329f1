//! # Definite integration
//!
//! ∫ₐᵇ f(x) dx = F(b) - F(a), computed symbolically:
//!
//! 1. equal bounds, or a literal `0` integrand, give `0` without consulting any rule;
//! 2. the oracle produces `F + C`; anything not shaped like an `Add` is a broken rule;
//! 3. `F` (the constant is dropped) is substituted with the upper and the lower bound,
//!    each substitution an independent tree;
//! 4. both values are normalized by the visitor, subtracted (upper minus lower, literally,
//!    with no reordering of the bounds) and the difference is normalized once more.
//!
//! The engine carries its visitor and oracle explicitly; the default engine uses
//! [`SimplifyVisitor`] and [`BuiltinRules`].
//!
//! ```rust
//! use RustedCalculus::symbolic::symbolic_engine::Expr;
//! use RustedCalculus::symbolic::symbolic_shapes::Integral;
//! let x = Expr::var("x");
//! let integral = Integral::new(Expr::real(2.0) * x.clone(), x.clone());
//! let area = integral.integrate_with_bounds(&x, &Expr::real(1.0), &Expr::real(3.0));
//! assert_eq!(area, Some(Expr::real(8.0)));
//! ```

use crate::symbolic::symbolic_engine::Expr;
use crate::symbolic::symbolic_integration::{AntiderivativeOracle, BuiltinRules};
use crate::symbolic::symbolic_shapes::{
    Add, DefiniteIntegral, Integral, Specialized, Subtract, Variable,
};
use crate::symbolic::symbolic_simplify::{ExprVisitor, SimplifyVisitor};
use log::{debug, error, info, warn};
use strum_macros::Display;

/// Why a definite integral could not be computed.
#[derive(Clone, Debug, PartialEq, Display)]
pub enum IntegrationError {
    /// The oracle has no antiderivative rule for this integrand.
    #[strum(to_string = "no integration rule applies to {integrand}")]
    NoRuleApplies { integrand: String },
    /// The oracle answered with something that is not `F + C`: a bug in that rule.
    #[strum(to_string = "antiderivative {result} is not shaped as F + C")]
    MalformedAntiderivative { result: String },
    /// The differential or the substituted variable is not a plain variable.
    #[strum(to_string = "{expr} is not a variable")]
    NotAVariable { expr: String },
    /// A substituted bound value or the final difference has no normal form.
    #[strum(to_string = "cannot normalize {expr}")]
    NormalizationFailed { expr: String },
    /// Numerical quadrature could not be carried out.
    #[strum(to_string = "quadrature failed: {reason}")]
    QuadratureFailed { reason: String },
}

impl std::error::Error for IntegrationError {}

impl IntegrationError {
    /// Logs the error at the level matching its severity.
    pub fn report(&self) {
        match self {
            IntegrationError::NoRuleApplies { .. } => info!("{}", self),
            IntegrationError::MalformedAntiderivative { .. } => {
                error!("integration rule broke its contract: {}", self)
            }
            _ => warn!("{}", self),
        }
    }
}

/// Definite-integration driver: a visitor to normalize with and an oracle to integrate with.
#[derive(Clone, Debug, Default)]
pub struct IntegrationEngine<V = SimplifyVisitor, O = BuiltinRules> {
    visitor: V,
    oracle: O,
}

impl<V: ExprVisitor, O: AntiderivativeOracle> IntegrationEngine<V, O> {
    pub fn new(visitor: V, oracle: O) -> Self {
        IntegrationEngine { visitor, oracle }
    }

    pub fn visitor(&self) -> &V {
        &self.visitor
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// ∫ from `lower` to `upper` of `integrand` d(`differential`), with `variable` being the
    /// symbol the bounds are substituted for.
    pub fn definite(
        &self,
        integrand: &Expr,
        differential: &Expr,
        variable: &Expr,
        lower: &Expr,
        upper: &Expr,
    ) -> Result<Expr, IntegrationError> {
        if lower.equals(upper) {
            debug!("equal bounds {}, integral is 0", lower);
            return Ok(Expr::Real(0.0));
        }
        // ∫ 0 would otherwise come back as just `+ C`
        if integrand.equals(&Expr::Real(0.0)) {
            debug!("zero integrand, integral is 0");
            return Ok(Expr::Real(0.0));
        }

        let differential = as_variable(differential)?;
        let variable = as_variable(variable)?;

        let integrated = self
            .oracle
            .antiderivative(integrand, &differential)
            .ok_or_else(|| IntegrationError::NoRuleApplies {
                integrand: integrand.to_string(),
            })?;
        let antiderivative = Add::<Expr, Expr>::try_match(&integrated).ok_or_else(|| {
            IntegrationError::MalformedAntiderivative {
                result: integrated.to_string(),
            }
        })?;
        let (primitive, _constant) = antiderivative.into_operands();
        debug!("antiderivative of {} is {}", integrand, primitive);

        let upper_result = primitive.substitute(&variable, upper);
        let lower_result = primitive.substitute(&variable, lower);
        let upper_value = self.normalize(&upper_result)?;
        let lower_value = self.normalize(&lower_result)?;

        let difference = Subtract::new(upper_value, lower_value).generalize();
        let result = self.normalize(&difference)?;
        debug!("[{}]({} .. {}) = {}", primitive, lower, upper, result);
        Ok(result)
    }

    fn normalize(&self, expr: &Expr) -> Result<Expr, IntegrationError> {
        expr.accept(&self.visitor)
            .ok_or_else(|| IntegrationError::NormalizationFailed {
                expr: expr.to_string(),
            })
    }
}

fn as_variable(expr: &Expr) -> Result<Variable, IntegrationError> {
    Variable::try_match(expr).ok_or_else(|| IntegrationError::NotAVariable {
        expr: expr.to_string(),
    })
}

impl Integral {
    /// ∫ integrand d(differential) by the built-in rules, as `F + C`.
    pub fn indefinite(&self) -> Option<Expr> {
        let differential = Variable::try_match(self.differential())?;
        BuiltinRules::default().antiderivative(self.integrand(), &differential)
    }

    /// Definite integral from `lower` to `upper`, substituting the bounds for `variable`.
    /// Every failure is logged and turned into `None`.
    pub fn integrate_with_bounds(
        &self,
        variable: &Expr,
        lower: &Expr,
        upper: &Expr,
    ) -> Option<Expr> {
        self.try_integrate_with_bounds(variable, lower, upper)
            .map_err(|err| err.report())
            .ok()
    }

    pub fn try_integrate_with_bounds(
        &self,
        variable: &Expr,
        lower: &Expr,
        upper: &Expr,
    ) -> Result<Expr, IntegrationError> {
        let engine = IntegrationEngine::<SimplifyVisitor, BuiltinRules>::default();
        self.integrate_with_bounds_using(&engine, variable, lower, upper)
    }

    pub fn integrate_with_bounds_using<V: ExprVisitor, O: AntiderivativeOracle>(
        &self,
        engine: &IntegrationEngine<V, O>,
        variable: &Expr,
        lower: &Expr,
        upper: &Expr,
    ) -> Result<Expr, IntegrationError> {
        engine.definite(self.integrand(), self.differential(), variable, lower, upper)
    }
}

impl DefiniteIntegral {
    /// Copies the integrand and differential of `integral`; the bounds are given separately.
    pub fn from_integral(integral: &Integral, lower: Expr, upper: Expr) -> Self {
        DefiniteIntegral::new(
            integral.integrand().clone(),
            integral.differential().clone(),
            lower,
            upper,
        )
    }

    /// The indefinite integral this one was built from.
    pub fn integral(&self) -> Integral {
        Integral::new(self.operand().clone(), self.variable().clone())
    }

    /// Evaluates with the stored bounds, substituting them for `var`.
    pub fn integrate_with_bounds(&self, var: &Expr) -> Option<Expr> {
        self.try_integrate_with_bounds(var)
            .map_err(|err| err.report())
            .ok()
    }

    pub fn try_integrate_with_bounds(&self, var: &Expr) -> Result<Expr, IntegrationError> {
        let engine = IntegrationEngine::<SimplifyVisitor, BuiltinRules>::default();
        self.integrate_with_bounds_using(&engine, var)
    }

    pub fn integrate_with_bounds_using<V: ExprVisitor, O: AntiderivativeOracle>(
        &self,
        engine: &IntegrationEngine<V, O>,
        var: &Expr,
    ) -> Result<Expr, IntegrationError> {
        engine.definite(
            self.operand(),
            self.variable(),
            var,
            self.lower_bound(),
            self.upper_bound(),
        )
    }

    /// Visitors dispatch over generic nodes only, so the view is generalized first.
    pub fn accept<Vis: ExprVisitor + ?Sized>(&self, visitor: &Vis) -> Option<Expr> {
        let generalized = self.generalize();
        visitor.visit(&generalized)
    }
}
