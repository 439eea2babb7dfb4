use std::collections::HashMap;
use std::fmt::{self, Write as _};

use crate::graph::node::{Expr, write_node};

/// Text form of one or more graphs where every shared non-leaf node is bound once.
///
/// Rendering is linear in the number of distinct nodes, unlike the nested
/// [`Display`](fmt::Display) of [`Expr`].
///
/// ```text
/// let t0: float3 = (v * v);
/// ((t0.z + t0.y) + t0.x)
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedText {
    /// `let` statements in dependency order, named `t0`, `t1`, ...
    pub bindings: Vec<String>,
    /// One expression per root, in the order given.
    pub roots: Vec<String>,
}

impl SharedText {
    /// Render `roots`, binding nodes referenced more than once across all of them.
    pub fn render(roots: &[Expr]) -> Self {
        let mut uses = HashMap::new();
        for root in roots {
            count_uses(root, &mut uses);
        }

        let mut renderer = Renderer {
            uses,
            names: HashMap::new(),
            bindings: Vec::new(),
        };
        let roots = roots.iter().map(|r| renderer.node(r)).collect();
        Self {
            bindings: renderer.bindings,
            roots,
        }
    }
}

impl fmt::Display for SharedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.bindings.iter().chain(&self.roots) {
            writeln!(f, "{line}")?;
        }
        Ok(())
    }
}

// Each node's operands are walked only on its first visit.
fn count_uses(e: &Expr, uses: &mut HashMap<usize, usize>) {
    let n = uses.entry(e.addr()).or_insert(0);
    *n += 1;
    if *n == 1 {
        for child in e.kind().children() {
            count_uses(&child, uses);
        }
    }
}

struct Renderer {
    uses: HashMap<usize, usize>,
    names: HashMap<usize, String>,
    bindings: Vec<String>,
}

impl Renderer {
    fn node(&mut self, e: &Expr) -> String {
        if let Some(name) = self.names.get(&e.addr()) {
            return name.clone();
        }

        let mut text = String::new();
        // Writing into a String cannot fail.
        let _ = write_node(&mut text, e, &mut |out: &mut String, c: &Expr| {
            out.write_str(&self.node(c))
        });

        let shared = self.uses.get(&e.addr()).is_some_and(|&n| n > 1);
        if !shared || e.kind().is_leaf() {
            return text;
        }
        let name = format!("t{}", self.names.len());
        self.bindings
            .push(format!("let {name}: {} = {text};", e.value_type()));
        self.names.insert(e.addr(), name.clone());
        name
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/shared.rs"]
mod tests;
