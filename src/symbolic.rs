#![allow(non_camel_case_types)]
#![allow(non_snake_case)]
///____________________________________________________________________________________________________________________________
/// # Symbolic engine
/// the expression tree: real constants, variables, arithmetic, indefinite and definite integrals
///# Example#
/// ```
/// use RustedCalculus::symbolic::symbolic_engine::Expr;
/// use RustedCalculus::symbols;
/// let (x, b) = symbols!(x, b);
/// let f = Expr::real(2.0) * x.clone() + b.clone();
/// println!("f = {}, variables {:?}", f, f.extract_variables());
/// let g = f.substitute(&RustedCalculus::symbolic::symbolic_shapes::Variable::new("b"), &Expr::real(1.0));
/// assert!(!g.contains_variable("b"));
/// ```
/// ________________________________________________________________________________________________________________________________________________
pub mod symbolic_engine;
/// typed views over expressions: match a whole shape at once or not at all
pub mod symbolic_shapes;
/// normalization of expressions by a visitor
pub mod symbolic_simplify;
/// indefinite integration rules
pub mod symbolic_integration;
///______________________________________________________________________________________________________________________________________________
/// definite integration: F(upper) - F(lower)
/// Example#
/// ```
/// use RustedCalculus::symbolic::symbolic_engine::Expr;
/// use RustedCalculus::symbolic::symbolic_shapes::{DefiniteIntegral, Integral};
/// let x = Expr::var("x");
/// // ∫₂⁴ (1/4) x³ dx
/// let integrand = (Expr::real(1.0) / Expr::real(4.0)) * x.clone().pow(Expr::real(3.0));
/// let integral = Integral::new(integrand, x.clone());
/// let definite = DefiniteIntegral::from_integral(&integral, Expr::real(2.0), Expr::real(4.0));
/// assert_eq!(definite.integrate_with_bounds(&x), Some(Expr::real(15.0)));
/// ```
/// ______________________________________________________________________________________________________________________________________________
pub mod symbolic_definite_integral;
mod symbolic_definite_integral_tests;
/// numerical evaluation and Gauss-Legendre quadrature
pub mod symbolic_numeric;
