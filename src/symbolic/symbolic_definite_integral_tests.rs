/////////////////////////////TESTS////////////////////////////////////////////////////
/*
definite integration tests:
worked scenarios with exact results
equal bounds and zero integrand short-circuits
antisymmetry under swapped bounds
unsupported integrands and broken oracles
bounds that cannot be normalized
the DefiniteIntegral adapter and its visitor bridge
*/

#[cfg(test)]
mod tests {
    use crate::symbolic::symbolic_definite_integral::{IntegrationEngine, IntegrationError};
    use crate::symbolic::symbolic_engine::Expr;
    use crate::symbolic::symbolic_integration::{AntiderivativeOracle, BuiltinRules};
    use crate::symbolic::symbolic_shapes::{DefiniteIntegral, Integral, Variable};
    use crate::symbolic::symbolic_simplify::{ExprVisitor, SimplifyVisitor};
    use crate::symbols;
    use std::cell::Cell;

    fn definite(integrand: Expr, lower: f64, upper: f64) -> Option<Expr> {
        let x = symbols!(x);
        Integral::new(integrand, x.clone()).integrate_with_bounds(
            &x,
            &Expr::real(lower),
            &Expr::real(upper),
        )
    }

    #[test]
    fn test_distinct_bounds() {
        // ∫₁³ 2x dx = 8
        let x = symbols!(x);
        let result = definite(Expr::real(2.0) * x, 1.0, 3.0).unwrap();
        assert!(Expr::real(8.0).equals(&result));
    }

    #[test]
    fn test_non_trivial_integrand() {
        // ∫₂⁴ (1/4) x³ dx = 15
        let x = symbols!(x);
        let integrand = (Expr::real(1.0) / Expr::real(4.0)) * x.pow(Expr::real(3.0));
        let result = definite(integrand, 2.0, 4.0).unwrap();
        assert!(Expr::real(15.0).equals(&result));
    }

    #[test]
    fn test_zero_integrand() {
        let result = definite(Expr::real(0.0), 2.0, 5.0).unwrap();
        assert!(Expr::real(0.0).equals(&result));
    }

    #[test]
    fn test_equal_bounds() {
        let x = symbols!(x);
        let result = definite(x.pow(Expr::real(2.0)), 3.0, 3.0).unwrap();
        assert!(Expr::real(0.0).equals(&result));
    }

    #[test]
    fn test_swapped_bounds() {
        // ∫₆² 4x dx = -64
        let x = symbols!(x);
        let result = definite(Expr::real(4.0) * x, 6.0, 2.0).unwrap();
        assert!(Expr::real(-64.0).equals(&result));
    }

    #[test]
    fn test_antisymmetry() {
        let x = symbols!(x);
        let integrands = vec![
            Expr::real(3.0) * x.clone(),
            x.clone().pow(Expr::real(2.0)) - Expr::real(1.0),
            Expr::real(5.0),
            x.clone() / Expr::real(2.0) + Expr::real(1.0),
        ];
        for integrand in integrands {
            let forward = definite(integrand.clone(), 1.0, 3.0).unwrap();
            let backward = definite(integrand, 3.0, 1.0).unwrap();
            match (forward, backward) {
                (Expr::Real(a), Expr::Real(b)) => assert_eq!(a, -b),
                (a, b) => panic!("expected numeric results, got {} and {}", a, b),
            }
        }
    }

    #[test]
    fn test_equal_bounds_need_no_rule() {
        // x * x has no rule, but equal bounds short-circuit before the oracle
        let x = symbols!(x);
        let integral = Integral::new(x.clone() * x.clone(), x.clone());
        let b = Expr::var("b");
        assert_eq!(integral.integrate_with_bounds(&x, &b, &b), Some(Expr::real(0.0)));
    }

    #[test]
    fn test_symbolic_bounds() {
        // ∫₀ᵇ 2x dx = 2 * (b²/2)
        let (x, b) = symbols!(x, b);
        let integral = Integral::new(Expr::real(2.0) * x.clone(), x.clone());
        let result = integral
            .integrate_with_bounds(&x, &Expr::real(0.0), &b)
            .unwrap();
        let expected = Expr::real(2.0) * (b.pow(Expr::real(2.0)) / Expr::real(2.0));
        assert_eq!(result, expected);
    }

    #[test]
    fn test_no_rule_applies() {
        let x = symbols!(x);
        let integral = Integral::new(x.clone() * x.clone(), x.clone());
        let err = integral
            .try_integrate_with_bounds(&x, &Expr::real(0.0), &Expr::real(1.0))
            .unwrap_err();
        assert!(matches!(err, IntegrationError::NoRuleApplies { .. }));
        assert_eq!(
            integral.integrate_with_bounds(&x, &Expr::real(0.0), &Expr::real(1.0)),
            None
        );
    }

    struct MissingConstant;

    impl AntiderivativeOracle for MissingConstant {
        fn antiderivative(&self, integrand: &Expr, var: &Variable) -> Option<Expr> {
            // forgets the `+ C`
            Some(integrand.clone() * Expr::Var(var.name().to_string()))
        }
    }

    #[test]
    fn test_malformed_antiderivative() {
        let x = symbols!(x);
        let engine = IntegrationEngine::new(SimplifyVisitor, MissingConstant);
        let integral = Integral::new(Expr::real(2.0), x.clone());
        let err = integral
            .integrate_with_bounds_using(&engine, &x, &Expr::real(0.0), &Expr::real(1.0))
            .unwrap_err();
        assert!(matches!(err, IntegrationError::MalformedAntiderivative { .. }));
        assert_eq!(
            err.to_string(),
            "antiderivative (2 * x) is not shaped as F + C"
        );
    }

    #[test]
    fn test_bound_at_a_pole() {
        // F(x) = 1 / x is shaped correctly but has no value at 0
        struct Reciprocal;
        impl AntiderivativeOracle for Reciprocal {
            fn antiderivative(&self, _integrand: &Expr, var: &Variable) -> Option<Expr> {
                Some(Expr::real(1.0) / Expr::Var(var.name().to_string()) + Expr::var("C"))
            }
        }
        let x = symbols!(x);
        let engine = IntegrationEngine::new(SimplifyVisitor, Reciprocal);
        let err = engine
            .definite(&Expr::real(1.0), &x, &x, &Expr::real(0.0), &Expr::real(1.0))
            .unwrap_err();
        assert!(matches!(err, IntegrationError::NormalizationFailed { .. }));
    }

    #[test]
    fn test_non_variable_differential() {
        let x = symbols!(x);
        let integral = Integral::new(Expr::real(2.0) * x.clone(), x.clone() + Expr::real(1.0));
        let err = integral
            .try_integrate_with_bounds(&x, &Expr::real(0.0), &Expr::real(1.0))
            .unwrap_err();
        assert!(matches!(err, IntegrationError::NotAVariable { .. }));
        assert_eq!(err.to_string(), "(x + 1) is not a variable");
    }

    #[test]
    fn test_substituted_variable_may_differ_from_differential() {
        // ∫ 2y dx over [1, 3], substituting for y: F = 2y * x, and y is replaced by the bounds
        let (x, y) = symbols!(x, y);
        let integral = Integral::new(Expr::real(2.0) * y.clone(), x.clone());
        let result = integral
            .integrate_with_bounds(&y, &Expr::real(1.0), &Expr::real(3.0))
            .unwrap();
        // 2*3*x - 2*1*x
        let expected = Expr::real(6.0) * x.clone() - Expr::real(2.0) * x;
        assert_eq!(result, expected);
    }

    #[test]
    fn test_custom_constant_name_is_dropped() {
        let x = symbols!(x);
        let engine = IntegrationEngine::new(SimplifyVisitor, BuiltinRules::with_constant("K"));
        let integral = Integral::new(Expr::real(2.0) * x.clone(), x.clone());
        let result = integral
            .integrate_with_bounds_using(&engine, &x, &Expr::real(1.0), &Expr::real(3.0))
            .unwrap();
        assert_eq!(result, Expr::real(8.0));
        assert_eq!(engine.oracle().constant_name(), "K");
    }

    /// Counts how often the engine normalizes.
    struct CountingVisitor<'a> {
        visits: &'a Cell<usize>,
    }

    impl ExprVisitor for CountingVisitor<'_> {
        fn visit(&self, expr: &Expr) -> Option<Expr> {
            self.visits.set(self.visits.get() + 1);
            SimplifyVisitor.visit(expr)
        }
    }

    #[test]
    fn test_engine_normalizes_three_times() {
        let x = symbols!(x);
        let visits = Cell::new(0);
        let engine = IntegrationEngine::new(
            CountingVisitor { visits: &visits },
            BuiltinRules::default(),
        );
        let result = engine
            .definite(
                &(Expr::real(2.0) * x.clone()),
                &x,
                &x,
                &Expr::real(1.0),
                &Expr::real(3.0),
            )
            .unwrap();
        assert_eq!(result, Expr::real(8.0));
        // upper value, lower value, difference
        assert_eq!(visits.get(), 3);

        // short-circuits never reach the visitor
        visits.set(0);
        engine
            .definite(&Expr::real(0.0), &x, &x, &Expr::real(1.0), &Expr::real(3.0))
            .unwrap();
        assert_eq!(visits.get(), 0);
    }

    #[test]
    fn test_definite_integral_from_integral() {
        let x = symbols!(x);
        let integral = Integral::new(Expr::real(4.0) * x.clone(), x.clone());
        let definite =
            DefiniteIntegral::from_integral(&integral, Expr::real(6.0), Expr::real(2.0));
        assert_eq!(definite.operand(), integral.integrand());
        assert_eq!(definite.variable(), integral.differential());
        assert_eq!(definite.integral(), integral);
        assert_eq!(definite.integrate_with_bounds(&x), Some(Expr::real(-64.0)));
    }

    #[test]
    fn test_definite_integral_matches_integral() {
        let x = symbols!(x);
        let integrand = (Expr::real(1.0) / Expr::real(4.0)) * x.clone().pow(Expr::real(3.0));
        let integral = Integral::new(integrand, x.clone());
        let definite =
            DefiniteIntegral::from_integral(&integral, Expr::real(2.0), Expr::real(4.0));
        assert_eq!(
            definite.integrate_with_bounds(&x),
            integral.integrate_with_bounds(&x, &Expr::real(2.0), &Expr::real(4.0))
        );
        assert_eq!(definite.try_integrate_with_bounds(&x), Ok(Expr::real(15.0)));
    }

    #[test]
    fn test_definite_integral_failures() {
        let x = symbols!(x);
        let integral = Integral::new(x.clone().pow(Expr::real(-1.0)), x.clone());
        let definite =
            DefiniteIntegral::from_integral(&integral, Expr::real(1.0), Expr::real(2.0));
        assert_eq!(definite.integrate_with_bounds(&x), None);
        assert!(matches!(
            definite.try_integrate_with_bounds(&x),
            Err(IntegrationError::NoRuleApplies { .. })
        ));
    }

    #[test]
    fn test_definite_integral_accepts_visitor() {
        let x = symbols!(x);
        let integral = Integral::new(Expr::real(2.0) * x.clone(), x.clone());
        let definite =
            DefiniteIntegral::from_integral(&integral, Expr::real(1.0), Expr::real(3.0));
        assert_eq!(definite.accept(&SimplifyVisitor), Some(Expr::real(8.0)));

        // a visitor sees the generic four-slot form
        struct Echo;
        impl ExprVisitor for Echo {
            fn visit(&self, expr: &Expr) -> Option<Expr> {
                Some(expr.clone())
            }
        }
        let expected = Expr::definite_integral(
            Expr::real(2.0) * x.clone(),
            x,
            Expr::real(1.0),
            Expr::real(3.0),
        );
        assert_eq!(definite.accept(&Echo), Some(expected));
    }

    #[test]
    fn test_indefinite() {
        let x = symbols!(x);
        let integral = Integral::new(Expr::real(3.0), x.clone());
        assert_eq!(
            integral.indefinite(),
            Some(Expr::real(3.0) * x.clone() + Expr::var("C"))
        );
        let integral = Integral::new(x.clone(), Expr::real(3.0));
        assert_eq!(integral.indefinite(), None);
    }

    #[test]
    fn test_error_messages() {
        let err = IntegrationError::NoRuleApplies {
            integrand: "(x * x)".to_string(),
        };
        assert_eq!(err.to_string(), "no integration rule applies to (x * x)");
        let err = IntegrationError::NormalizationFailed {
            expr: "(1 / 0)".to_string(),
        };
        assert_eq!(err.to_string(), "cannot normalize (1 / 0)");
        // reporting only logs
        err.report();
    }

    #[test]
    fn test_equal_nan_bounds() {
        let x = symbols!(x);
        let nan = Expr::real(f64::NAN);
        let integral = Integral::new(x.clone(), x.clone());
        assert_eq!(
            integral.integrate_with_bounds(&x, &nan, &nan),
            Some(Expr::real(0.0))
        );
        let definite = DefiniteIntegral::from_integral(&integral, nan.clone(), nan);
        assert_eq!(definite.integrate_with_bounds(&x), Some(Expr::real(0.0)));
    }

    #[test]
    fn test_negative_zero_integrand() {
        let result = definite(Expr::real(-0.0), 2.0, 5.0).unwrap();
        assert!(Expr::real(0.0).equals(&result));
    }

    #[test]
    fn test_overflowing_bound_value() {
        // ∫₀¹⁰ 1e308 x dx overflows at the upper bound
        let x = symbols!(x);
        let integral = Integral::new(Expr::real(1e308) * x.clone(), x.clone());
        let err = integral
            .try_integrate_with_bounds(&x, &Expr::real(0.0), &Expr::real(10.0))
            .unwrap_err();
        assert!(matches!(err, IntegrationError::NormalizationFailed { .. }));
        assert_eq!(
            integral.integrate_with_bounds(&x, &Expr::real(0.0), &Expr::real(10.0)),
            None
        );
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_shared_types_are_send_and_sync() {
        assert_send_sync::<Expr>();
        assert_send_sync::<Variable>();
        assert_send_sync::<Integral>();
        assert_send_sync::<DefiniteIntegral>();
        assert_send_sync::<SimplifyVisitor>();
        assert_send_sync::<BuiltinRules>();
        assert_send_sync::<IntegrationEngine>();
        assert_send_sync::<IntegrationError>();
    }

    #[test]
    fn test_engine_shared_across_threads() {
        let engine = IntegrationEngine::<SimplifyVisitor, BuiltinRules>::default();
        let x = symbols!(x);
        let results: Vec<Option<Expr>> = std::thread::scope(|scope| {
            let handles: Vec<_> = [1.0, 2.0, 3.0]
                .into_iter()
                .map(|upper| {
                    let engine = &engine;
                    let x = x.clone();
                    scope.spawn(move || {
                        engine
                            .definite(
                                &(Expr::real(2.0) * x.clone()),
                                &x,
                                &x,
                                &Expr::real(0.0),
                                &Expr::real(upper),
                            )
                            .ok()
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });
        assert_eq!(
            results,
            vec![
                Some(Expr::real(1.0)),
                Some(Expr::real(4.0)),
                Some(Expr::real(9.0))
            ]
        );
    }
}
