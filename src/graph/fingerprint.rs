use std::collections::HashMap;
use std::fmt;

use xxhash_rust::xxh3::Xxh3;

use crate::foundation::value_type::ValueType;
use crate::graph::node::{BinaryOp, ConstVal, Expr, ExprKind, UnaryOp};

const XXH3_SEED: u64 = 0x5f1c_9e3a_b24d_7c01;

/// Stable structural fingerprint of an expression graph.
///
/// Node identity does not participate: two graphs built independently with the same shape,
/// operators, value types and constants hash identically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ExprFingerprint {
    /// High 64 bits of the digest.
    pub hi: u64,
    /// Low 64 bits of the digest.
    pub lo: u64,
}

impl ExprFingerprint {
    fn as_u128(self) -> u128 {
        (u128::from(self.hi) << 64) | u128::from(self.lo)
    }
}

impl fmt::Display for ExprFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.as_u128())
    }
}

impl Expr {
    /// Structural fingerprint of the graph rooted at this node.
    pub fn fingerprint(&self) -> ExprFingerprint {
        fingerprint_expr(self, &mut HashMap::new())
    }
}

// Shared sub-graphs are hashed once per call, keyed by node address.
fn fingerprint_expr(e: &Expr, memo: &mut HashMap<usize, ExprFingerprint>) -> ExprFingerprint {
    if let Some(fp) = memo.get(&e.addr()) {
        return *fp;
    }

    let mut h = StableHasher::new();
    h.write_u8(value_type_tag(e.value_type()));
    match e.kind() {
        ExprKind::Const(c) => {
            h.write_u8(0);
            write_const(&mut h, c);
        }
        ExprKind::Input { name } => {
            h.write_u8(1);
            h.write_str(name);
        }
        ExprKind::Unary { op, operand } => {
            h.write_u8(2);
            h.write_u8(unary_tag(*op));
            h.write_child(fingerprint_expr(operand, memo));
        }
        ExprKind::Binary { op, lhs, rhs } => {
            h.write_u8(3);
            h.write_u8(binary_tag(*op));
            h.write_child(fingerprint_expr(lhs, memo));
            h.write_child(fingerprint_expr(rhs, memo));
        }
        ExprKind::Index { source, channel } => {
            h.write_u8(4);
            h.write_u8(*channel);
            h.write_child(fingerprint_expr(source, memo));
        }
        ExprKind::Combine(components) => {
            h.write_u8(5);
            h.write_u8(components.len() as u8);
            for c in components {
                h.write_child(fingerprint_expr(c, memo));
            }
        }
        ExprKind::SystemSeed => h.write_u8(6),
        ExprKind::FixedRandom { seed, per_element } => {
            h.write_u8(7);
            h.write_bool(*per_element);
            h.write_child(fingerprint_expr(seed, memo));
        }
    }

    let fp = h.finish();
    memo.insert(e.addr(), fp);
    fp
}

fn write_const(h: &mut StableHasher, c: &ConstVal) {
    match c {
        ConstVal::Float(v) => h.write_f32(*v),
        ConstVal::Float2(vs) => vs.iter().for_each(|v| h.write_f32(*v)),
        ConstVal::Float3(vs) => vs.iter().for_each(|v| h.write_f32(*v)),
        ConstVal::Float4(vs) => vs.iter().for_each(|v| h.write_f32(*v)),
        ConstVal::Int32(v) => h.write_u32(*v as u32),
        ConstVal::Uint32(v) => h.write_u32(*v),
    }
}

fn value_type_tag(t: ValueType) -> u8 {
    match t {
        ValueType::Float => 0,
        ValueType::Float2 => 1,
        ValueType::Float3 => 2,
        ValueType::Float4 => 3,
        ValueType::Int32 => 4,
        ValueType::Uint32 => 5,
    }
}

fn unary_tag(op: UnaryOp) -> u8 {
    match op {
        UnaryOp::Floor => 0,
        UnaryOp::Log2 => 1,
        UnaryOp::Sin => 2,
        UnaryOp::Cos => 3,
        UnaryOp::Asin => 4,
        UnaryOp::CastUintToFloat => 5,
    }
}

fn binary_tag(op: BinaryOp) -> u8 {
    match op {
        BinaryOp::Add => 0,
        BinaryOp::Sub => 1,
        BinaryOp::Mul => 2,
        BinaryOp::Div => 3,
        BinaryOp::Min => 4,
        BinaryOp::Max => 5,
        BinaryOp::Pow => 6,
        BinaryOp::Atan2 => 7,
        BinaryOp::BitAnd => 8,
        BinaryOp::BitOr => 9,
        BinaryOp::BitXor => 10,
        BinaryOp::Shl => 11,
        BinaryOp::Shr => 12,
    }
}

struct StableHasher {
    inner: Xxh3,
}

impl StableHasher {
    fn new() -> Self {
        Self {
            inner: Xxh3::with_seed(XXH3_SEED),
        }
    }

    fn write_bytes(&mut self, b: &[u8]) {
        self.inner.update(b);
    }

    fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    fn write_bool(&mut self, v: bool) {
        self.write_u8(u8::from(v));
    }

    fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    fn write_f32(&mut self, v: f32) {
        self.write_u32(v.to_bits());
    }

    fn write_str(&mut self, s: &str) {
        self.write_u32(s.len() as u32);
        self.write_bytes(s.as_bytes());
    }

    fn write_child(&mut self, fp: ExprFingerprint) {
        self.write_bytes(&fp.as_u128().to_le_bytes());
    }

    fn finish(self) -> ExprFingerprint {
        let v = self.inner.digest128();
        ExprFingerprint {
            hi: (v >> 64) as u64,
            lo: v as u64,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/fingerprint.rs"]
mod tests;
