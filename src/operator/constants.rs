use std::f32::consts::{E, PI, TAU};
use std::sync::LazyLock;

use crate::foundation::value_type::ValueType;
use crate::graph::node::Expr;

/// Literals with a pre-built constant node for every value type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Literal {
    /// `0`.
    Zero,
    /// `0.5`; truncates to `0` for integer types.
    Half,
    /// `1`.
    One,
    /// `-1`; wraps to `u32::MAX` for `uint`.
    MinusOne,
    /// `2`.
    Two,
    /// `3`.
    Three,
    /// π.
    Pi,
    /// 2π.
    Tau,
    /// Euler's number.
    E,
}

impl Literal {
    /// Every table literal, in declaration order.
    pub const ALL: [Literal; 9] = [
        Literal::Zero,
        Literal::Half,
        Literal::One,
        Literal::MinusOne,
        Literal::Two,
        Literal::Three,
        Literal::Pi,
        Literal::Tau,
        Literal::E,
    ];

    /// Scalar value of the literal.
    pub fn value(self) -> f32 {
        match self {
            Literal::Zero => 0.0,
            Literal::Half => 0.5,
            Literal::One => 1.0,
            Literal::MinusOne => -1.0,
            Literal::Two => 2.0,
            Literal::Three => 3.0,
            Literal::Pi => PI,
            Literal::Tau => TAU,
            Literal::E => E,
        }
    }

    /// Shared constant node holding this literal broadcast to `ty`.
    ///
    /// Repeated calls return the same node.
    pub fn expr(self, ty: ValueType) -> Expr {
        constant_table(self).get(ty)
    }
}

/// Constant nodes of one literal, indexed by value type.
#[derive(Debug)]
pub struct ConstantTable {
    by_type: [Expr; ValueType::ALL.len()],
}

impl ConstantTable {
    /// Build the table for `v`, one node per value type.
    pub fn generate(v: f32) -> Self {
        Self {
            by_type: ValueType::ALL.map(|t| Expr::splat(v, t)),
        }
    }

    /// Node for `ty`.
    pub fn get(&self, ty: ValueType) -> Expr {
        // `ValueType::ALL` is in declaration order.
        self.by_type[ty as usize].clone()
    }
}

static CONSTANTS: LazyLock<[ConstantTable; Literal::ALL.len()]> = LazyLock::new(|| {
    let tables = Literal::ALL.map(|l| ConstantTable::generate(l.value()));
    tracing::debug!(literals = tables.len(), "built constant tables");
    tables
});

/// Shared table of `literal`, built on first use.
pub fn constant_table(literal: Literal) -> &'static ConstantTable {
    &CONSTANTS[literal as usize]
}

#[cfg(test)]
#[path = "../../tests/unit/operator/constants.rs"]
mod tests;
