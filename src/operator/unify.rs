use crate::foundation::error::{OpError, OpResult};
use crate::foundation::value_type::ValueType;
use crate::graph::node::Expr;
use crate::operator::cast::cast_float;

/// Widest float-family type among `nodes`.
///
/// Non-float types rank below every float type. On equal rank the later node wins, so a
/// slice without any float node yields the type of its last node. `None` for an empty slice.
pub fn find_max_float_n_value_type(nodes: &[Expr]) -> Option<ValueType> {
    let rank = |t: ValueType| if t.is_float() { t.component_count() } else { 0 };
    let mut best: Option<ValueType> = None;
    for t in nodes.iter().map(Expr::value_type) {
        if best.is_none_or(|b| rank(t) >= rank(b)) {
            best = Some(t);
        }
    }
    best
}

/// Cast every float-family node to the widest float type among them.
///
/// Non-float nodes pass through untouched, order is preserved, and slices of fewer than two
/// nodes are returned as-is.
#[tracing::instrument(level = "trace", skip(nodes), fields(arity = nodes.len()))]
pub fn upcast_all_float_n(nodes: &[Expr], default_value: f32) -> OpResult<Vec<Expr>> {
    let Some(target) = find_max_float_n_value_type(nodes).filter(|_| nodes.len() > 1) else {
        return Ok(nodes.to_vec());
    };
    nodes
        .iter()
        .map(|n| {
            if n.value_type().is_float() {
                cast_float(n, target, default_value)
            } else {
                Ok(n.clone())
            }
        })
        .collect()
}

/// Require every operand to share one value type, returned on success.
///
/// Reports the first operand whose type differs from the first one.
pub fn require_same_type(nodes: &[&Expr]) -> OpResult<ValueType> {
    let Some((first, rest)) = nodes.split_first() else {
        return Err(OpError::invalid_argument("expected at least one operand"));
    };
    let left = first.value_type();
    match rest.iter().map(|n| n.value_type()).find(|&t| t != left) {
        None => Ok(left),
        Some(right) => {
            tracing::debug!(%left, %right, "operand type mismatch");
            Err(OpError::TypeMismatch { left, right })
        }
    }
}

/// Unify two operands, then apply `f` to the unified pair.
pub fn unify_op2<R>(f: impl FnOnce(&Expr, &Expr) -> R, a: &Expr, b: &Expr) -> OpResult<R> {
    let unified = upcast_all_float_n(&[a.clone(), b.clone()], 0.0)?;
    Ok(f(&unified[0], &unified[1]))
}

/// Unify three operands, then apply `f` to the unified triple.
pub fn unify_op3<R>(
    f: impl FnOnce(&Expr, &Expr, &Expr) -> R,
    a: &Expr,
    b: &Expr,
    c: &Expr,
) -> OpResult<R> {
    let unified = upcast_all_float_n(&[a.clone(), b.clone(), c.clone()], 0.0)?;
    Ok(f(&unified[0], &unified[1], &unified[2]))
}

#[cfg(test)]
#[path = "../../tests/unit/operator/unify.rs"]
mod tests;
