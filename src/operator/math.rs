//! Element-wise derived operations.
//!
//! Everything here is a composition of primitive nodes; hyperbolic functions, roots and
//! arbitrary-base logarithms are derived from `pow` and `log2` only.

use std::f32::consts::PI;

use crate::foundation::error::OpResult;
use crate::foundation::value_type::ValueType;
use crate::graph::node::Expr;
use crate::operator::cast::cast_float;
use crate::operator::constants::Literal;
use crate::operator::unify::require_same_type;

/// `e` as-is when it already has type `ty`, otherwise its float cast.
pub(crate) fn as_type(e: &Expr, ty: ValueType) -> OpResult<Expr> {
    if e.value_type() == ty {
        Ok(e.clone())
    } else {
        cast_float(e, ty, 0.0)
    }
}

/// `-1 * x`.
pub fn negate(x: &Expr) -> Expr {
    Literal::MinusOne.expr(x.value_type()) * x
}

/// `max(min(x, hi), lo)`, with the bounds converted to the type of `x`.
pub fn clamp(x: &Expr, lo: &Expr, hi: &Expr) -> OpResult<Expr> {
    let ty = x.value_type();
    let lo = as_type(lo, ty)?;
    let hi = as_type(hi, ty)?;
    Ok(x.min(&hi).max(&lo))
}

/// `clamp(x, 0, 1)`.
pub fn saturate(x: &Expr) -> OpResult<Expr> {
    let ty = x.value_type();
    clamp(x, &Literal::Zero.expr(ty), &Literal::One.expr(ty))
}

/// `x - floor(x)`.
pub fn frac(x: &Expr) -> Expr {
    x - x.floor()
}

/// `floor(x + 0.5)`; halves round up.
pub fn round(x: &Expr) -> Expr {
    (x + Literal::Half.expr(x.value_type())).floor()
}

/// `log2(x) / log2(base)`.
pub fn log(x: &Expr, base: &Expr) -> OpResult<Expr> {
    require_same_type(&[x, base])?;
    Ok(log_unchecked(x, base))
}

fn log_unchecked(x: &Expr, base: &Expr) -> Expr {
    x.log2() / base.log2()
}

/// `0.5 * ln((1 + x) / (1 - x))`.
pub fn atanh(x: &Expr) -> Expr {
    let ty = x.value_type();
    let one = Literal::One.expr(ty);
    let ratio = (&one + x) / (&one - x);
    Literal::Half.expr(ty) * log_unchecked(&ratio, &Literal::E.expr(ty))
}

/// `0.5 * (e^x - e^-x)`.
pub fn sinh(x: &Expr) -> Expr {
    let ty = x.value_type();
    let (pos, neg) = exp_pair(x);
    Literal::Half.expr(ty) * (pos - neg)
}

/// `0.5 * (e^x + e^-x)`.
pub fn cosh(x: &Expr) -> Expr {
    let ty = x.value_type();
    let (pos, neg) = exp_pair(x);
    Literal::Half.expr(ty) * (pos + neg)
}

/// `(1 - e^-2x) / (1 + e^-2x)`.
pub fn tanh(x: &Expr) -> Expr {
    let ty = x.value_type();
    let one = Literal::One.expr(ty);
    let exponent = Literal::MinusOne.expr(ty) * Literal::Two.expr(ty) * x;
    let e_minus_two_x = Literal::E.expr(ty).pow(&exponent);
    (&one - &e_minus_two_x) / (&one + &e_minus_two_x)
}

fn exp_pair(x: &Expr) -> (Expr, Expr) {
    let ty = x.value_type();
    let e = Literal::E.expr(ty);
    let pos = e.pow(x);
    let neg = e.pow(&(Literal::MinusOne.expr(ty) * x));
    (pos, neg)
}

/// `pow(x, 0.5)`.
pub fn sqrt(x: &Expr) -> Expr {
    x.pow(&Literal::Half.expr(x.value_type()))
}

/// `x + s * (y - x)`; all three operands must share a type.
pub fn lerp(x: &Expr, y: &Expr, s: &Expr) -> OpResult<Expr> {
    require_same_type(&[x, y, s])?;
    Ok(x + s * (y - x))
}

/// Remap `value` from `[old_min, old_max]` to `[new_min, new_max]`.
pub fn fit(
    value: &Expr,
    old_min: &Expr,
    old_max: &Expr,
    new_min: &Expr,
    new_max: &Expr,
) -> OpResult<Expr> {
    require_same_type(&[value, old_min, old_max, new_min, new_max])?;
    let percent = (value - old_min) / (old_max - old_min);
    lerp(new_min, new_max, &percent)
}

/// Remainder of `x / y`.
///
/// Floats use `frac(x / y) * y`. Integers use `x - (x / y) * y`, so that
/// `(x / y) * y + x % y == x` holds under truncating division.
pub fn modulo(x: &Expr, y: &Expr) -> OpResult<Expr> {
    let ty = require_same_type(&[x, y])?;
    if ty.is_float() {
        Ok(frac(&(x / y)) * y)
    } else {
        Ok(x - (x / y) * y)
    }
}

/// Hermite interpolation `t * t * (3 - 2t)` with `t = saturate((s - x) / (y - x))`.
pub fn smoothstep(x: &Expr, y: &Expr, s: &Expr) -> OpResult<Expr> {
    let ty = require_same_type(&[x, y, s])?;
    let t = clamp(
        &((s - x) / (y - x)),
        &Literal::Zero.expr(ty),
        &Literal::One.expr(ty),
    )?;
    let result = Literal::Three.expr(ty) - Literal::Two.expr(ty) * &t;
    Ok(result * &t * &t)
}

/// `floor(value / granularity) * granularity`.
pub fn discretize(value: &Expr, granularity: &Expr) -> OpResult<Expr> {
    require_same_type(&[value, granularity])?;
    Ok((value / granularity).floor() * granularity)
}

/// Degrees to radians.
pub fn deg_to_rad(degrees: &Expr) -> OpResult<Expr> {
    let factor = cast_float(&Expr::from(PI / 180.0), degrees.value_type(), 0.0)?;
    Ok(degrees * factor)
}

/// Radians to degrees.
pub fn rad_to_deg(radians: &Expr) -> OpResult<Expr> {
    let factor = cast_float(&Expr::from(180.0 / PI), radians.value_type(), 0.0)?;
    Ok(radians * factor)
}

#[cfg(test)]
#[path = "../../tests/unit/operator/math.rs"]
mod tests;
