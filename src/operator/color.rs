use crate::foundation::error::{OpError, OpResult};
use crate::foundation::value_type::ValueType;
use crate::graph::node::{Components, Expr};
use crate::operator::components::extract_components;
use crate::operator::geometry::dot;

/// Exponent of the approximate sRGB transfer curve.
pub const GAMMA: f32 = 2.2;

const LUMA_WEIGHTS: [f32; 3] = [0.299, 0.587, 0.114];

/// Perceived brightness `0.299 r + 0.587 g + 0.114 b` of an RGB or RGBA color.
///
/// Alpha carries a zero weight; any other operand type fails like [`dot`].
pub fn color_luma(color: &Expr) -> OpResult<Expr> {
    let [r, g, b] = LUMA_WEIGHTS;
    let weights = match color.value_type() {
        ValueType::Float3 => Expr::from([r, g, b]),
        _ => Expr::from([r, g, b, 0.0]),
    };
    dot(color, &weights)
}

/// `pow(c, 2.2)` on the color channels; alpha passes through.
pub fn gamma_to_linear(gamma: &Expr) -> OpResult<Expr> {
    apply_to_rgb(gamma, GAMMA, "gamma_to_linear")
}

/// `pow(c, 1 / 2.2)` on the color channels; alpha passes through.
pub fn linear_to_gamma(linear: &Expr) -> OpResult<Expr> {
    apply_to_rgb(linear, 1.0 / GAMMA, "linear_to_gamma")
}

fn apply_to_rgb(color: &Expr, exponent: f32, what: &str) -> OpResult<Expr> {
    let count = color.value_type().component_count();
    if !color.value_type().is_float() || !(3..=4).contains(&count) {
        tracing::debug!(value_type = %color.value_type(), what, "expected 3 or 4 components");
        return Err(OpError::invalid_argument(format!(
            "{what}: input expression must be a 3 or 4 components vector, got {}",
            color.value_type()
        )));
    }

    let exponent = Expr::from(exponent);
    let components: Components = extract_components(color)
        .into_iter()
        .enumerate()
        .map(|(i, c)| if i < 3 { c.pow(&exponent) } else { c })
        .collect();
    Expr::combine(components)
}

#[cfg(test)]
#[path = "../../tests/unit/operator/color.rs"]
mod tests;
