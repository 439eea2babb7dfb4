use std::f32::consts::PI;

use crate::foundation::error::{OpError, OpResult};
use crate::foundation::value_type::ValueType;
use crate::graph::node::{Components, Expr};
use crate::operator::cast::cast_float;
use crate::operator::components::{extract_components, sum_pairwise};
use crate::operator::constants::Literal;
use crate::operator::math::sqrt;
use crate::operator::unify::require_same_type;

/// Polar coordinates of a 2D point.
#[derive(Debug, Clone)]
pub struct Polar {
    /// Angle from the +x axis, in radians.
    pub theta: Expr,
    /// Distance from the origin.
    pub distance: Expr,
}

/// Spherical coordinates of a 3D point.
#[derive(Debug, Clone)]
pub struct Spherical {
    /// Azimuth in the xz plane, from +x toward +z.
    pub theta: Expr,
    /// Elevation toward +y.
    pub phi: Expr,
    /// Distance from the origin.
    pub distance: Expr,
}

/// Sum of channel-wise products.
///
/// Operands must already share a value type; no unification happens here.
pub fn dot(a: &Expr, b: &Expr) -> OpResult<Expr> {
    if a.value_type() != b.value_type() {
        tracing::debug!(left = %a.value_type(), right = %b.value_type(), "dot operand mismatch");
        return Err(OpError::TypeMismatch {
            left: a.value_type(),
            right: b.value_type(),
        });
    }

    let product = a * b;
    if a.value_type().component_count() == 1 {
        return Ok(product);
    }
    sum_pairwise(extract_components(&product))
        .ok_or_else(|| OpError::invalid_argument("dot of a zero-width value"))
}

/// `sqrt(dot(v, v))`.
pub fn length(v: &Expr) -> OpResult<Expr> {
    Ok(sqrt(&dot(v, v)?))
}

/// `length(x - y)`.
pub fn distance(x: &Expr, y: &Expr) -> OpResult<Expr> {
    require_same_type(&[x, y])?;
    length(&(x - y))
}

/// `dot(x - y, x - y)`.
pub fn sqr_distance(x: &Expr, y: &Expr) -> OpResult<Expr> {
    require_same_type(&[x, y])?;
    let delta = x - y;
    dot(&delta, &delta)
}

/// `v * (1 / length(v))`, dividing once as a scalar before broadcasting.
pub fn normalize(v: &Expr) -> OpResult<Expr> {
    let ty = v.value_type();
    if !ty.is_float() {
        return Err(OpError::InvalidCast {
            from: ty,
            to: ValueType::Float,
        });
    }
    let inv_length = Literal::One.expr(ValueType::Float) / length(v)?;
    let inv_length = cast_float(&inv_length, ty, 0.0)?;
    Ok(v * inv_length)
}

/// `float2(cos theta, sin theta) * distance`.
pub fn polar_to_rectangular(theta: &Expr, distance: &Expr) -> OpResult<Expr> {
    check_scalar_angle(theta)?;
    let distance = cast_float(distance, ValueType::Float2, 0.0)?;
    let direction = Expr::combine([theta.cos(), theta.sin()])?;
    Ok(direction * distance)
}

/// `(atan2(v.y, v.x), length(v))`.
pub fn rectangular_to_polar(coord: &Expr) -> OpResult<Polar> {
    let c = require_components(coord, 2, "rectangular_to_polar")?;
    Ok(Polar {
        theta: c[1].atan2(&c[0]),
        distance: length(coord)?,
    })
}

/// `float3(cos t * cos p, sin p, sin t * cos p) * distance`.
pub fn spherical_to_rectangular(theta: &Expr, phi: &Expr, distance: &Expr) -> OpResult<Expr> {
    check_scalar_angle(theta)?;
    check_scalar_angle(phi)?;
    let distance = cast_float(distance, ValueType::Float3, 0.0)?;

    let (cos_theta, sin_theta) = (theta.cos(), theta.sin());
    let (cos_phi, sin_phi) = (phi.cos(), phi.sin());
    let direction = Expr::combine([&cos_theta * &cos_phi, sin_phi, &sin_theta * &cos_phi])?;
    Ok(direction * distance)
}

/// `(atan2(v.z, v.x), asin(v.y / length(v)), length(v))`.
pub fn rectangular_to_spherical(coord: &Expr) -> OpResult<Spherical> {
    let c = require_components(coord, 3, "rectangular_to_spherical")?;
    let distance = length(coord)?;
    Ok(Spherical {
        theta: c[2].atan2(&c[0]),
        phi: (&c[1] / &distance).asin(),
        distance,
    })
}

/// `pi * r * r`.
pub fn circle_area(radius: &Expr) -> Expr {
    Literal::Pi.expr(radius.value_type()) * radius * radius
}

/// `2 * pi * r`.
pub fn circle_circumference(radius: &Expr) -> Expr {
    Literal::Tau.expr(radius.value_type()) * radius
}

/// Product of the first three channels.
pub fn box_volume(dimensions: &Expr) -> OpResult<Expr> {
    let c = require_components(dimensions, 3, "box_volume")?;
    Ok(&c[0] * &c[1] * &c[2])
}

/// `4/3 * pi * r^3`.
pub fn sphere_volume(radius: &Expr) -> Expr {
    Expr::splat(4.0 / 3.0 * PI, radius.value_type()) * radius * radius * radius
}

/// `pi * r * r * h`.
pub fn cylinder_volume(radius: &Expr, height: &Expr) -> OpResult<Expr> {
    require_same_type(&[radius, height])?;
    Ok(circle_area(radius) * height)
}

/// Frustum volume `pi/3 * (r0^2 + r0*r1 + r1^2) * h`.
pub fn cone_volume(radius0: &Expr, radius1: &Expr, height: &Expr) -> OpResult<Expr> {
    require_same_type(&[radius0, radius1, height])?;
    let pi_over_3 = Expr::splat(PI / 3.0, radius0.value_type());
    let sum = radius0 * radius0 + radius0 * radius1 + radius1 * radius1;
    Ok(pi_over_3 * sum * height)
}

/// `circle_area(minor) * circle_circumference(major)`.
pub fn torus_volume(major_radius: &Expr, minor_radius: &Expr) -> OpResult<Expr> {
    require_same_type(&[major_radius, minor_radius])?;
    Ok(circle_area(minor_radius) * circle_circumference(major_radius))
}

/// Signed distance from `position` to the plane through `plane_position` with normal
/// `plane_normal`.
pub fn signed_distance_to_plane(
    plane_position: &Expr,
    plane_normal: &Expr,
    position: &Expr,
) -> OpResult<Expr> {
    require_same_type(&[plane_normal, plane_position, position])?;
    let offset = dot(plane_position, plane_normal)?;
    Ok(dot(position, plane_normal)? - offset)
}

fn check_scalar_angle(angle: &Expr) -> OpResult<()> {
    match angle.value_type() {
        ValueType::Float => Ok(()),
        other => Err(OpError::TypeMismatch {
            left: other,
            right: ValueType::Float,
        }),
    }
}

fn require_components(e: &Expr, min: usize, what: &str) -> OpResult<Components> {
    let count = e.value_type().component_count();
    if !e.value_type().is_float() || count < min {
        tracing::debug!(value_type = %e.value_type(), min, what, "too few components");
        return Err(OpError::invalid_argument(format!(
            "{what} expects a float vector with at least {min} components, got {}",
            e.value_type()
        )));
    }
    Ok(extract_components(e))
}

#[cfg(test)]
#[path = "../../tests/unit/operator/geometry.rs"]
mod tests;
