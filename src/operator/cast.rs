use crate::foundation::error::{OpError, OpResult};
use crate::foundation::value_type::ValueType;
use crate::graph::node::{Components, ConstVal, Expr};
use crate::operator::components::extract_components;

/// Convert a float-family node to another float-family type.
///
/// Channels present in the source are kept. Extra channels replicate a scalar source
/// (shader-style broadcast) or are filled with `default_value` for vector sources.
/// Narrowing drops trailing channels. Casting to the node's own type returns `from` itself.
#[tracing::instrument(level = "trace", skip(from), fields(from_type = %from.value_type()))]
pub fn cast_float(from: &Expr, to: ValueType, default_value: f32) -> OpResult<Expr> {
    let from_type = from.value_type();
    if !from_type.is_float() || !to.is_float() {
        tracing::debug!(%from_type, %to, "rejecting non-float cast");
        return Err(OpError::InvalidCast {
            from: from_type,
            to,
        });
    }
    if from_type == to {
        return Ok(from.clone());
    }

    let input = extract_components(from);
    let output: Components = (0..to.component_count())
        .map(|channel| match input.get(channel) {
            Some(c) => c.clone(),
            None if input.len() == 1 => input[0].clone(),
            None => Expr::constant(ConstVal::Float(default_value)),
        })
        .collect();

    match to {
        ValueType::Float => Ok(output[0].clone()),
        ValueType::Float2 | ValueType::Float3 | ValueType::Float4 => Expr::combine(output),
        ValueType::Int32 | ValueType::Uint32 => Err(OpError::InvalidCast {
            from: from_type,
            to,
        }),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/operator/cast.rs"]
mod tests;
