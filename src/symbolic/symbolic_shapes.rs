//! # Specialized views and structural matching
//!
//! A generic [`Expr`] says nothing at the type level about its shape. Rules, however, are
//! written against shapes: "a product of a constant and a power of a variable",
//! "an antiderivative of the form F + C". This module gives every node kind a strongly typed
//! *view* whose children are themselves views, e.g. `Multiply<Real, Exponent<Variable, Real>>`,
//! and the [`Specialized`] trait that moves between the two worlds:
//!
//! - `try_match(&Expr)` certifies that a generic tree conforms to the requested nested shape
//!   and only then builds the specialized view; any mismatch yields `None`
//! - `generalize()` erases the view back into the closed generic form without losing anything
//!
//! `Expr` itself implements `Specialized` as the wildcard shape, which is how a rule says
//! "any subtree here".
//!
//! ```rust
//! use RustedCalculus::symbolic::symbolic_engine::Expr;
//! use RustedCalculus::symbolic::symbolic_shapes::{Exponent, Multiply, Real, Specialized, Variable};
//! let expr = Expr::real(3.0) * Expr::var("x").pow(Expr::real(2.0));
//! let view = Multiply::<Real, Exponent<Variable, Real>>::try_match(&expr).unwrap();
//! assert_eq!(view.most_sig_op().value(), 3.0);
//! assert_eq!(view.least_sig_op().most_sig_op().name(), "x");
//! assert_eq!(view.generalize(), expr);
//! ```

use crate::symbolic::symbolic_engine::{BoundedKind, Expr, reals_equal};

/// Conversion between a generic expression and a strongly shaped view of it.
pub trait Specialized: Sized {
    /// Does `expr` conform to this shape, recursively? Never allocates.
    fn conforms(expr: &Expr) -> bool;

    /// Builds the view from a generic tree that has been certified by `conforms`.
    fn build(expr: &Expr) -> Option<Self>;

    /// Certifies the whole shape first and only then reconstructs the view.
    fn try_match(expr: &Expr) -> Option<Self> {
        if Self::conforms(expr) {
            Self::build(expr)
        } else {
            None
        }
    }

    /// Lossless conversion back into the generic representation.
    fn generalize(&self) -> Expr;
}

impl Specialized for Expr {
    fn conforms(_expr: &Expr) -> bool {
        true
    }

    fn build(expr: &Expr) -> Option<Self> {
        Some(expr.clone())
    }

    fn generalize(&self) -> Expr {
        self.clone()
    }
}

/// A numerical constant leaf.
#[derive(Clone, Copy, Debug)]
pub struct Real(pub f64);

impl PartialEq for Real {
    fn eq(&self, other: &Self) -> bool {
        reals_equal(self.0, other.0)
    }
}

impl Real {
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Specialized for Real {
    fn conforms(expr: &Expr) -> bool {
        matches!(expr, Expr::Real(_))
    }

    fn build(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Real(value) => Some(Real(*value)),
            _ => None,
        }
    }

    fn generalize(&self) -> Expr {
        Expr::Real(self.0)
    }
}

/// A symbolic variable leaf, identified by its name.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Variable(pub String);

impl Variable {
    pub fn new(name: &str) -> Self {
        Variable(name.to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Specialized for Variable {
    fn conforms(expr: &Expr) -> bool {
        matches!(expr, Expr::Var(_))
    }

    fn build(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Var(name) => Some(Variable(name.clone())),
            _ => None,
        }
    }

    fn generalize(&self) -> Expr {
        Expr::Var(self.0.clone())
    }
}

impl From<Real> for Expr {
    fn from(real: Real) -> Self {
        real.generalize()
    }
}

impl From<Variable> for Expr {
    fn from(var: Variable) -> Self {
        var.generalize()
    }
}

/// Generates a two-slot view over one binary `Expr` variant.
macro_rules! binary_view {
    ($(#[$meta:meta])* $name:ident => $variant:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq)]
        pub struct $name<L = Expr, R = Expr> {
            most_sig_op: L,
            least_sig_op: R,
        }

        impl<L: Specialized, R: Specialized> $name<L, R> {
            pub fn new(most_sig_op: L, least_sig_op: R) -> Self {
                Self {
                    most_sig_op,
                    least_sig_op,
                }
            }

            pub fn most_sig_op(&self) -> &L {
                &self.most_sig_op
            }

            pub fn least_sig_op(&self) -> &R {
                &self.least_sig_op
            }

            pub fn into_operands(self) -> (L, R) {
                (self.most_sig_op, self.least_sig_op)
            }
        }

        impl<L: Specialized, R: Specialized> Specialized for $name<L, R> {
            fn conforms(expr: &Expr) -> bool {
                match expr {
                    Expr::$variant(most, least) => L::conforms(most) && R::conforms(least),
                    _ => false,
                }
            }

            fn build(expr: &Expr) -> Option<Self> {
                match expr {
                    Expr::$variant(most, least) => Some(Self {
                        most_sig_op: L::build(most)?,
                        least_sig_op: R::build(least)?,
                    }),
                    _ => None,
                }
            }

            fn generalize(&self) -> Expr {
                Expr::$variant(
                    Box::new(self.most_sig_op.generalize()),
                    Box::new(self.least_sig_op.generalize()),
                )
            }
        }

        impl<L: Specialized, R: Specialized> From<$name<L, R>> for Expr {
            fn from(view: $name<L, R>) -> Self {
                view.generalize()
            }
        }
    };
}

binary_view!(
    /// `most + least`
    Add => Add
);
binary_view!(
    /// `most - least`
    Subtract => Sub
);
binary_view!(
    /// `most * least`
    Multiply => Mul
);
binary_view!(
    /// `most / least`
    Divide => Div
);
binary_view!(
    /// `most ^ least`
    Exponent => Pow
);
binary_view!(
    /// Indefinite integral: the integrand is the most significant operand,
    /// the differential variable the least significant one.
    Integral => Integral
);

impl<I: Specialized, D: Specialized> Integral<I, D> {
    pub fn integrand(&self) -> &I {
        self.most_sig_op()
    }

    pub fn differential(&self) -> &D {
        self.least_sig_op()
    }
}

/// Four-slot view of a `Bounded` node of kind `DefiniteIntegral`.
#[derive(Clone, Debug, PartialEq)]
pub struct DefiniteIntegral<O = Expr, V = Expr, Lo = Expr, Up = Expr> {
    operand: O,
    variable: V,
    lower_bound: Lo,
    upper_bound: Up,
}

impl<O, V, Lo, Up> DefiniteIntegral<O, V, Lo, Up>
where
    O: Specialized,
    V: Specialized,
    Lo: Specialized,
    Up: Specialized,
{
    pub fn new(operand: O, variable: V, lower_bound: Lo, upper_bound: Up) -> Self {
        Self {
            operand,
            variable,
            lower_bound,
            upper_bound,
        }
    }

    pub fn operand(&self) -> &O {
        &self.operand
    }

    pub fn variable(&self) -> &V {
        &self.variable
    }

    pub fn lower_bound(&self) -> &Lo {
        &self.lower_bound
    }

    pub fn upper_bound(&self) -> &Up {
        &self.upper_bound
    }
}

impl<O, V, Lo, Up> Specialized for DefiniteIntegral<O, V, Lo, Up>
where
    O: Specialized,
    V: Specialized,
    Lo: Specialized,
    Up: Specialized,
{
    fn conforms(expr: &Expr) -> bool {
        match expr {
            Expr::Bounded {
                kind: BoundedKind::DefiniteIntegral,
                operand,
                variable,
                lower,
                upper,
            } => {
                O::conforms(operand)
                    && V::conforms(variable)
                    && Lo::conforms(lower)
                    && Up::conforms(upper)
            }
            _ => false,
        }
    }

    fn build(expr: &Expr) -> Option<Self> {
        match expr {
            Expr::Bounded {
                kind: BoundedKind::DefiniteIntegral,
                operand,
                variable,
                lower,
                upper,
            } => Some(Self {
                operand: O::build(operand)?,
                variable: V::build(variable)?,
                lower_bound: Lo::build(lower)?,
                upper_bound: Up::build(upper)?,
            }),
            _ => None,
        }
    }

    fn generalize(&self) -> Expr {
        Expr::definite_integral(
            self.operand.generalize(),
            self.variable.generalize(),
            self.lower_bound.generalize(),
            self.upper_bound.generalize(),
        )
    }
}

impl<O, V, Lo, Up> From<DefiniteIntegral<O, V, Lo, Up>> for Expr
where
    O: Specialized,
    V: Specialized,
    Lo: Specialized,
    Up: Specialized,
{
    fn from(view: DefiniteIntegral<O, V, Lo, Up>) -> Self {
        view.generalize()
    }
}

impl Expr {
    /// `RecursiveCast`: view this expression as the requested nested shape, if it has it.
    pub fn try_match<S: Specialized>(&self) -> Option<S> {
        S::try_match(self)
    }
}
