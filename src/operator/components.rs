use crate::graph::node::{Components, Expr};

/// Split a node into its scalar channels.
///
/// Scalars (float, int, uint) come back as the node itself; vectors yield one index node
/// per channel, in channel order.
pub fn extract_components(e: &Expr) -> Components {
    let count = e.value_type().component_count();
    if count == 1 {
        return Components::from_elem(e.clone(), 1);
    }
    (0..count).map(|channel| e.index(channel)).collect()
}

/// Reduce scalar nodes to a single sum node.
///
/// Works as a stack: the two topmost entries are popped and `top + below` is pushed back
/// until one entry remains. Returns `None` for an empty input.
pub fn sum_pairwise(terms: impl IntoIterator<Item = Expr>) -> Option<Expr> {
    let mut stack: Components = terms.into_iter().collect();
    while stack.len() > 1 {
        let (Some(top), Some(below)) = (stack.pop(), stack.pop()) else {
            break;
        };
        stack.push(top + below);
    }
    stack.pop()
}

#[cfg(test)]
#[path = "../../tests/unit/operator/components.rs"]
mod tests;
