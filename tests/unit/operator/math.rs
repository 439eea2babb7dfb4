use super::*;
use crate::foundation::error::OpError;
use crate::graph::node::{BinaryOp, ExprKind};
use crate::test_eval::{Folded, assert_close, assert_lanes_close, fold};

fn f(v: f32) -> Expr {
    Expr::from(v)
}

fn eval(e: &Expr) -> f32 {
    fold(e).scalar()
}

#[test]
fn negate_multiplies_by_shared_minus_one() {
    let x = Expr::input("x", ValueType::Float2);
    let n = negate(&x);
    let ExprKind::Binary { op, lhs, rhs } = n.kind() else {
        panic!("expected binary node");
    };
    assert_eq!(*op, BinaryOp::Mul);
    assert!(Expr::ptr_eq(lhs, &Literal::MinusOne.expr(ValueType::Float2)));
    assert!(Expr::ptr_eq(rhs, &x));

    assert_lanes_close(&fold(&negate(&Expr::from([1.0f32, -2.0]))), &[-1.0, 2.0]);
}

#[test]
fn clamp_casts_bounds_to_input_type() {
    let x = Expr::from([-1.0f32, 0.5, 3.0]);
    let out = clamp(&x, &f(0.0), &f(2.0)).unwrap();
    assert_eq!(out.value_type(), ValueType::Float3);
    assert_lanes_close(&fold(&out), &[0.0, 0.5, 2.0]);
    assert_eq!(out.to_string(), "max(min(float3(-1, 0.5, 3), float3(2, 2, 2)), float3(0, 0, 0))");
}

#[test]
fn clamp_rejects_integer_bounds_on_floats() {
    let x = Expr::input("x", ValueType::Float);
    assert!(matches!(
        clamp(&x, &Expr::from(0i32), &f(1.0)),
        Err(OpError::InvalidCast { .. })
    ));
}

#[test]
fn saturate_limits_to_unit_range() {
    assert_close(eval(&saturate(&f(1.7)).unwrap()), 1.0);
    assert_close(eval(&saturate(&f(-0.2)).unwrap()), 0.0);
    assert_close(eval(&saturate(&f(0.25)).unwrap()), 0.25);
}

#[test]
fn frac_and_round() {
    assert_close(eval(&frac(&f(2.75))), 0.75);
    assert_close(eval(&frac(&f(-0.25))), 0.75);
    assert_close(eval(&round(&f(2.5))), 3.0);
    assert_close(eval(&round(&f(-2.5))), -2.0);
    assert_close(eval(&round(&f(1.49))), 1.0);
}

#[test]
fn log_with_arbitrary_base() {
    assert_close(eval(&log(&f(81.0), &f(3.0)).unwrap()), 4.0);
    assert_close(eval(&log(&f(1000.0), &f(10.0)).unwrap()), 3.0);
}

#[test]
fn hyperbolic_functions_match_std() {
    for x in [-1.5f32, -0.3, 0.0, 0.4, 1.2] {
        assert_close(eval(&sinh(&f(x))), x.sinh());
        assert_close(eval(&cosh(&f(x))), x.cosh());
        assert_close(eval(&tanh(&f(x))), x.tanh());
    }
    for x in [-0.8f32, 0.0, 0.5] {
        assert_close(eval(&atanh(&f(x))), x.atanh());
    }
}

#[test]
fn hyperbolic_functions_never_use_dedicated_primitives() {
    let x = Expr::input("x", ValueType::Float);
    let text = sinh(&x).to_string();
    assert!(text.contains("pow(2.7182817"), "{text}");
}

#[test]
fn sqrt_is_pow_half() {
    assert_close(eval(&sqrt(&f(16.0))), 4.0);
    assert_lanes_close(&fold(&sqrt(&Expr::from([4.0f32, 9.0]))), &[2.0, 3.0]);
}

#[test]
fn lerp_and_fit() {
    assert_close(eval(&lerp(&f(2.0), &f(6.0), &f(0.25)).unwrap()), 3.0);
    let remapped = fit(&f(5.0), &f(0.0), &f(10.0), &f(-1.0), &f(1.0)).unwrap();
    assert_close(eval(&remapped), 0.0);
}

#[test]
fn modulo_float_path() {
    assert_close(eval(&modulo(&f(7.5), &f(2.0)).unwrap()), 1.5);
}

#[test]
fn modulo_integer_identity() {
    let (a, b) = (Expr::from(7i32), Expr::from(3i32));
    let rem = modulo(&a, &b).unwrap();
    assert_eq!(fold(&rem), Folded::Int(1));
    let rebuilt = (&a / &b) * &b + rem;
    assert_eq!(fold(&rebuilt), Folded::Int(7));

    let neg = modulo(&Expr::from(-7i32), &b).unwrap();
    assert_eq!(fold(&neg), Folded::Int(-1));
}

#[test]
fn smoothstep_boundaries() {
    let (lo, hi) = (f(0.0), f(1.0));
    assert_close(eval(&smoothstep(&lo, &hi, &f(0.0)).unwrap()), 0.0);
    assert_close(eval(&smoothstep(&lo, &hi, &f(1.0)).unwrap()), 1.0);
    assert_close(eval(&smoothstep(&lo, &hi, &f(0.5)).unwrap()), 0.5);
    assert_close(eval(&smoothstep(&lo, &hi, &f(2.0)).unwrap()), 1.0);
    assert_close(eval(&smoothstep(&lo, &hi, &f(0.25)).unwrap()), 0.15625);
}

#[test]
fn discretize_snaps_down() {
    assert_close(eval(&discretize(&f(7.3), &f(2.5)).unwrap()), 5.0);
}

#[test]
fn angle_conversions() {
    assert_close(eval(&deg_to_rad(&f(180.0)).unwrap()), PI);
    let v = rad_to_deg(&Expr::from([PI, PI / 2.0])).unwrap();
    assert_eq!(v.value_type(), ValueType::Float2);
    assert_lanes_close(&fold(&v), &[180.0, 90.0]);
    assert!(matches!(
        deg_to_rad(&Expr::from(90i32)),
        Err(OpError::InvalidCast { .. })
    ));
}

#[test]
fn element_wise_entries_reject_mixed_operand_types() {
    let (i, x) = (Expr::from(7i32), f(2.0));
    let v3 = Expr::input("v", ValueType::Float3);
    let mismatch = |r: OpResult<Expr>| matches!(r, Err(OpError::TypeMismatch { .. }));

    assert!(mismatch(modulo(&i, &x)));
    assert!(mismatch(modulo(&i, &Expr::from(3u32))));
    assert!(mismatch(log(&x, &i)));
    assert!(mismatch(discretize(&i, &x)));
    assert!(mismatch(lerp(&v3, &v3, &x)));
    assert!(mismatch(smoothstep(&x, &x, &v3)));
    assert!(mismatch(fit(&x, &x, &x, &x, &Expr::from(1u32))));
}

#[test]
fn mismatch_reports_the_first_differing_type() {
    let err = lerp(&f(0.0), &f(1.0), &Expr::input("s", ValueType::Float2)).unwrap_err();
    assert!(matches!(
        err,
        OpError::TypeMismatch {
            left: ValueType::Float,
            right: ValueType::Float2
        }
    ));
}
