//! # Symbolic Engine Module
//!
//! The expression tree at the heart of the calculus core. Every algebraic or calculus
//! construct the crate understands is one variant of the closed [`Expr`] enum, and every
//! algorithm (substitution, rewriting, integration) is an exhaustive match over it, so a
//! new node kind cannot be forgotten anywhere.
//!
//! ## Main Structures and Methods
//!
//! ### `Expr` Enum
//! - **Leaves**: `Real(f64)` numerical constants, `Var(String)` symbolic variables
//! - **Binary nodes**: `Add`, `Sub`, `Mul`, `Div`, `Pow` and `Integral`; the first slot is the
//!   *most significant operand*, the second the *least significant operand*
//! - **Bounded nodes**: `Bounded { kind, operand, variable, lower, upper }`, a variable bound
//!   over a range and reduced; `BoundedKind::DefiniteIntegral` is the only reduction so far
//!
//! ### Key Methods
//! - `substitute(var, value)` - replace every occurrence of a variable by a copy of a tree
//! - `equals(other)` - deep structural comparison, never value-coerced
//! - `accept(visitor)` - hand the node to a rewrite visitor
//! - `contains_variable(name)` - dependency check used by the integration rules
//!
//! Children are owned through `Box`, so a tree can never alias a subtree of another tree:
//! code that needs the same value twice clones it.

#![allow(non_camel_case_types)]

use crate::symbolic::symbolic_shapes::Variable;
use crate::symbolic::symbolic_simplify::ExprVisitor;
use std::fmt;
use strum_macros::{Display, EnumIter};

/// Kind of reduction a bounded node performs over its variable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum BoundedKind {
    /// ∫ from lower to upper of operand d(variable)
    DefiniteIntegral,
}

/// Core symbolic expression enum representing mathematical expressions as an abstract syntax tree.
///
/// # Examples
/// ```rust
/// use RustedCalculus::symbolic::symbolic_engine::Expr;
/// let x = Expr::var("x");
/// let expr = Expr::real(2.0) * x;
/// assert_eq!(expr.to_string(), "(2 * x)");
/// ```
#[derive(Clone, Debug)]
pub enum Expr {
    /// Numerical constant value
    Real(f64),
    /// Symbolic variable with a name (e.g., "x", "y", "velocity")
    Var(String),
    /// Addition operation: left + right
    Add(Box<Expr>, Box<Expr>),
    /// Subtraction operation: left - right
    Sub(Box<Expr>, Box<Expr>),
    /// Multiplication operation: left * right
    Mul(Box<Expr>, Box<Expr>),
    /// Division operation: left / right
    Div(Box<Expr>, Box<Expr>),
    /// Power operation: base ^ exponent
    Pow(Box<Expr>, Box<Expr>),
    /// Indefinite integral: ∫ integrand d(differential)
    Integral(Box<Expr>, Box<Expr>),
    /// Variable bound over [lower, upper] and reduced according to `kind`
    Bounded {
        kind: BoundedKind,
        operand: Box<Expr>,
        variable: Box<Expr>,
        lower: Box<Expr>,
        upper: Box<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Expr::Real(val) => write!(f, "{}", val),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Add(lhs, rhs) => write!(f, "({} + {})", lhs, rhs),
            Expr::Sub(lhs, rhs) => write!(f, "({} - {})", lhs, rhs),
            Expr::Mul(lhs, rhs) => write!(f, "({} * {})", lhs, rhs),
            Expr::Div(lhs, rhs) => write!(f, "({} / {})", lhs, rhs),
            Expr::Pow(base, exp) => write!(f, "({} ^ {})", base, exp),
            Expr::Integral(integrand, differential) => {
                write!(f, "∫({}) d{}", integrand, differential)
            }
            Expr::Bounded {
                kind: BoundedKind::DefiniteIntegral,
                operand,
                variable,
                lower,
                upper,
            } => write!(f, "∫[{}, {}]({}) d{}", lower, upper, operand, variable),
        }
    }
}

impl std::ops::Add for Expr {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Expr::Add(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Sub for Expr {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Expr::Sub(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Mul for Expr {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Expr::Mul(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Div for Expr {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        Expr::Div(self.boxed(), rhs.boxed())
    }
}

impl std::ops::Neg for Expr {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Expr::Mul(Box::new(Expr::Real(-1.0)), Box::new(self))
    }
}

/// Constants compare by value, except that NaN equals NaN so every tree equals its own copy.
/// `-0.0` and `0.0` stay equal.
pub fn reals_equal(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Real(a), Expr::Real(b)) => reals_equal(*a, *b),
            (Expr::Var(a), Expr::Var(b)) => a == b,
            (Expr::Add(l1, r1), Expr::Add(l2, r2))
            | (Expr::Sub(l1, r1), Expr::Sub(l2, r2))
            | (Expr::Mul(l1, r1), Expr::Mul(l2, r2))
            | (Expr::Div(l1, r1), Expr::Div(l2, r2))
            | (Expr::Pow(l1, r1), Expr::Pow(l2, r2))
            | (Expr::Integral(l1, r1), Expr::Integral(l2, r2)) => l1 == l2 && r1 == r2,
            (
                Expr::Bounded {
                    kind: k1,
                    operand: o1,
                    variable: v1,
                    lower: lo1,
                    upper: up1,
                },
                Expr::Bounded {
                    kind: k2,
                    operand: o2,
                    variable: v2,
                    lower: lo2,
                    upper: up2,
                },
            ) => k1 == k2 && o1 == o2 && v1 == v2 && lo1 == lo2 && up1 == up2,
            _ => false,
        }
    }
}

impl From<f64> for Expr {
    fn from(value: f64) -> Self {
        Expr::Real(value)
    }
}

impl Expr {
    /// BASIC FEATURES

    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }

    pub fn real(value: f64) -> Expr {
        Expr::Real(value)
    }

    pub fn var(name: &str) -> Expr {
        Expr::Var(name.to_string())
    }

    pub fn pow(self, exponent: Expr) -> Expr {
        Expr::Pow(self.boxed(), exponent.boxed())
    }

    /// ∫ integrand d(differential)
    pub fn integral(integrand: Expr, differential: Expr) -> Expr {
        Expr::Integral(integrand.boxed(), differential.boxed())
    }

    /// ∫ from lower to upper of operand d(variable)
    pub fn definite_integral(operand: Expr, variable: Expr, lower: Expr, upper: Expr) -> Expr {
        Expr::Bounded {
            kind: BoundedKind::DefiniteIntegral,
            operand: operand.boxed(),
            variable: variable.boxed(),
            lower: lower.boxed(),
            upper: upper.boxed(),
        }
    }

    /// Creates multiple symbolic variables from a comma-separated string.
    ///
    /// Whitespace is trimmed and empty names are skipped.
    /// ```rust
    /// use RustedCalculus::symbolic::symbolic_engine::Expr;
    /// let vars = Expr::symbols("x, y, z");
    /// assert_eq!(vars.len(), 3);
    /// ```
    pub fn symbols(symbols: &str) -> Vec<Expr> {
        symbols
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(Expr::var)
            .collect()
    }

    /// Deep structural equality: same kind, same leaf values, children equal slot by slot.
    /// `Real(2.0)` is not equal to `1 + 1`.
    pub fn equals(&self, other: &Expr) -> bool {
        self == other
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::Real(v) if *v == 0.0)
    }

    pub fn is_one(&self) -> bool {
        matches!(self, Expr::Real(v) if *v == 1.0)
    }

    /// Replaces every `Var` leaf named like `var` with a copy of `value`.
    ///
    /// The result is a freshly owned tree; if `var` does not occur it is an equal copy
    /// of `self`. Variables bound by `Integral` or `Bounded` nodes are replaced as well.
    pub fn substitute(&self, var: &Variable, value: &Expr) -> Expr {
        self.substitute_name(var.name(), value)
    }

    fn substitute_name(&self, var: &str, value: &Expr) -> Expr {
        match self {
            Expr::Var(name) if name == var => value.clone(),
            Expr::Var(_) | Expr::Real(_) => self.clone(),
            Expr::Add(lhs, rhs) => Expr::Add(
                Box::new(lhs.substitute_name(var, value)),
                Box::new(rhs.substitute_name(var, value)),
            ),
            Expr::Sub(lhs, rhs) => Expr::Sub(
                Box::new(lhs.substitute_name(var, value)),
                Box::new(rhs.substitute_name(var, value)),
            ),
            Expr::Mul(lhs, rhs) => Expr::Mul(
                Box::new(lhs.substitute_name(var, value)),
                Box::new(rhs.substitute_name(var, value)),
            ),
            Expr::Div(lhs, rhs) => Expr::Div(
                Box::new(lhs.substitute_name(var, value)),
                Box::new(rhs.substitute_name(var, value)),
            ),
            Expr::Pow(base, exp) => Expr::Pow(
                Box::new(base.substitute_name(var, value)),
                Box::new(exp.substitute_name(var, value)),
            ),
            Expr::Integral(integrand, differential) => Expr::Integral(
                Box::new(integrand.substitute_name(var, value)),
                Box::new(differential.substitute_name(var, value)),
            ),
            Expr::Bounded {
                kind,
                operand,
                variable,
                lower,
                upper,
            } => Expr::Bounded {
                kind: *kind,
                operand: Box::new(operand.substitute_name(var, value)),
                variable: Box::new(variable.substitute_name(var, value)),
                lower: Box::new(lower.substitute_name(var, value)),
                upper: Box::new(upper.substitute_name(var, value)),
            },
        }
    }

    /// Checks whether the expression depends on the given variable.
    pub fn contains_variable(&self, var_name: &str) -> bool {
        match self {
            Expr::Var(name) => name == var_name,
            Expr::Real(_) => false,
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right)
            | Expr::Integral(left, right) => {
                left.contains_variable(var_name) || right.contains_variable(var_name)
            }
            Expr::Bounded {
                operand,
                variable,
                lower,
                upper,
                ..
            } => {
                operand.contains_variable(var_name)
                    || variable.contains_variable(var_name)
                    || lower.contains_variable(var_name)
                    || upper.contains_variable(var_name)
            }
        }
    }

    /// Collects the names of all variables in the expression, in order of first appearance.
    pub fn extract_variables(&self) -> Vec<String> {
        let mut vars = Vec::new();
        self.collect_variables(&mut vars);
        vars
    }

    fn collect_variables(&self, vars: &mut Vec<String>) {
        match self {
            Expr::Var(name) => {
                if !vars.contains(name) {
                    vars.push(name.clone());
                }
            }
            Expr::Real(_) => {}
            Expr::Add(left, right)
            | Expr::Sub(left, right)
            | Expr::Mul(left, right)
            | Expr::Div(left, right)
            | Expr::Pow(left, right)
            | Expr::Integral(left, right) => {
                left.collect_variables(vars);
                right.collect_variables(vars);
            }
            Expr::Bounded {
                operand,
                variable,
                lower,
                upper,
                ..
            } => {
                operand.collect_variables(vars);
                variable.collect_variables(vars);
                lower.collect_variables(vars);
                upper.collect_variables(vars);
            }
        }
    }

    /// Hands this (generic) node to a rewrite visitor.
    ///
    /// `None` means the visitor could not produce a replacement for the node.
    pub fn accept<V: ExprVisitor + ?Sized>(&self, visitor: &V) -> Option<Expr> {
        visitor.visit(self)
    }
}

/// Macro to create multiple symbolic variables at once.
/// Usage: `let (x, y) = symbols!(x, y);`
#[macro_export]
macro_rules! symbols {
    ($($var:ident),+ $(,)?) => {
        (
            $(
                $crate::symbolic::symbolic_engine::Expr::Var(stringify!($var).to_string())
            ),+
        )
    };
}
