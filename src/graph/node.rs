use std::fmt;
use std::ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Shl, Shr, Sub};
use std::sync::Arc;

use smallvec::SmallVec;

use crate::foundation::error::{OpError, OpResult};
use crate::foundation::value_type::ValueType;

/// Per-channel sub-expressions of a node; never more than four.
pub type Components = SmallVec<[Expr; 4]>;

/// Literal payload of a constant node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstVal {
    /// Scalar float.
    Float(f32),
    /// `float2` literal.
    Float2([f32; 2]),
    /// `float3` literal.
    Float3([f32; 3]),
    /// `float4` literal.
    Float4([f32; 4]),
    /// Signed integer literal.
    Int32(i32),
    /// Unsigned integer literal.
    Uint32(u32),
}

impl ConstVal {
    /// Value type of the literal.
    pub fn value_type(&self) -> ValueType {
        match self {
            ConstVal::Float(_) => ValueType::Float,
            ConstVal::Float2(_) => ValueType::Float2,
            ConstVal::Float3(_) => ValueType::Float3,
            ConstVal::Float4(_) => ValueType::Float4,
            ConstVal::Int32(_) => ValueType::Int32,
            ConstVal::Uint32(_) => ValueType::Uint32,
        }
    }

    /// Broadcast the scalar `v` to every channel of `ty`.
    ///
    /// Integer targets truncate toward zero; unsigned targets wrap through `i32`, so `-1.0`
    /// becomes `u32::MAX`.
    pub fn splat(v: f32, ty: ValueType) -> Self {
        match ty {
            ValueType::Float => ConstVal::Float(v),
            ValueType::Float2 => ConstVal::Float2([v; 2]),
            ValueType::Float3 => ConstVal::Float3([v; 3]),
            ValueType::Float4 => ConstVal::Float4([v; 4]),
            ValueType::Int32 => ConstVal::Int32(v as i32),
            ValueType::Uint32 => ConstVal::Uint32((v as i32) as u32),
        }
    }
}

/// Single-operand primitive nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Round toward negative infinity.
    Floor,
    /// Base-2 logarithm.
    Log2,
    /// Sine of an angle in radians.
    Sin,
    /// Cosine of an angle in radians.
    Cos,
    /// Arcsine, in radians.
    Asin,
    /// Numeric conversion of a `uint` to a scalar `float`.
    CastUintToFloat,
}

impl UnaryOp {
    fn name(self) -> &'static str {
        match self {
            UnaryOp::Floor => "floor",
            UnaryOp::Log2 => "log2",
            UnaryOp::Sin => "sin",
            UnaryOp::Cos => "cos",
            UnaryOp::Asin => "asin",
            UnaryOp::CastUintToFloat => "float",
        }
    }
}

/// Two-operand primitive nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    /// `lhs + rhs`.
    Add,
    /// `lhs - rhs`.
    Sub,
    /// Channel-wise `lhs * rhs`.
    Mul,
    /// Channel-wise `lhs / rhs`; truncating for integers.
    Div,
    /// Channel-wise minimum.
    Min,
    /// Channel-wise maximum.
    Max,
    /// `lhs` raised to `rhs`.
    Pow,
    /// `atan2(lhs, rhs)` with `lhs` as the `y` argument.
    Atan2,
    /// Bitwise and.
    BitAnd,
    /// Bitwise or.
    BitOr,
    /// Bitwise exclusive or.
    BitXor,
    /// Left shift by a `uint` amount.
    Shl,
    /// Logical right shift by a `uint` amount.
    Shr,
}

impl BinaryOp {
    fn infix(self) -> Option<&'static str> {
        match self {
            BinaryOp::Add => Some("+"),
            BinaryOp::Sub => Some("-"),
            BinaryOp::Mul => Some("*"),
            BinaryOp::Div => Some("/"),
            BinaryOp::BitAnd => Some("&"),
            BinaryOp::BitOr => Some("|"),
            BinaryOp::BitXor => Some("^"),
            BinaryOp::Shl => Some("<<"),
            BinaryOp::Shr => Some(">>"),
            BinaryOp::Min | BinaryOp::Max | BinaryOp::Pow | BinaryOp::Atan2 => None,
        }
    }

    fn call_name(self) -> &'static str {
        match self {
            BinaryOp::Min => "min",
            BinaryOp::Max => "max",
            BinaryOp::Pow => "pow",
            BinaryOp::Atan2 => "atan2",
            _ => "",
        }
    }
}

/// What a node computes.
#[derive(Debug)]
pub enum ExprKind {
    /// Literal value.
    Const(ConstVal),
    /// Opaque named leaf supplied by the surrounding graph (attribute, parameter, ...).
    Input {
        /// Display name of the leaf.
        name: String,
    },
    /// Single-operand primitive.
    Unary {
        /// Primitive applied.
        op: UnaryOp,
        /// Argument node.
        operand: Expr,
    },
    /// Two-operand primitive.
    Binary {
        /// Primitive applied.
        op: BinaryOp,
        /// Left argument; decides the node type.
        lhs: Expr,
        /// Right argument.
        rhs: Expr,
    },
    /// One scalar channel of a vector node.
    Index {
        /// Vector being read.
        source: Expr,
        /// Channel number, `0` for `x`.
        channel: u8,
    },
    /// Vector assembled from 2 to 4 scalar float nodes.
    Combine(Components),
    /// Process-wide random seed provided by the runtime.
    SystemSeed,
    /// Deterministic random float in `[0, 1)` derived from `seed`.
    FixedRandom {
        /// `uint` seed node.
        seed: Expr,
        /// Whether the value varies per simulated element.
        per_element: bool,
    },
}

impl ExprKind {
    /// Operand nodes, in evaluation order.
    pub(crate) fn children(&self) -> Components {
        match self {
            ExprKind::Const(_) | ExprKind::Input { .. } | ExprKind::SystemSeed => Components::new(),
            ExprKind::Unary { operand, .. } => smallvec::smallvec![operand.clone()],
            ExprKind::Binary { lhs, rhs, .. } => smallvec::smallvec![lhs.clone(), rhs.clone()],
            ExprKind::Index { source, .. } => smallvec::smallvec![source.clone()],
            ExprKind::Combine(components) => components.clone(),
            ExprKind::FixedRandom { seed, .. } => smallvec::smallvec![seed.clone()],
        }
    }

    /// Whether the node has no operands.
    pub(crate) fn is_leaf(&self) -> bool {
        matches!(
            self,
            ExprKind::Const(_) | ExprKind::Input { .. } | ExprKind::SystemSeed
        )
    }
}

#[derive(Debug)]
struct Node {
    value_type: ValueType,
    kind: ExprKind,
}

/// Shared handle to an immutable, typed expression node.
///
/// Cloning is cheap and preserves identity; every constructor allocates a new node.
#[derive(Debug, Clone)]
pub struct Expr(Arc<Node>);

impl Expr {
    fn new(value_type: ValueType, kind: ExprKind) -> Self {
        Self(Arc::new(Node { value_type, kind }))
    }

    /// Constant node holding `c`.
    pub fn constant(c: ConstVal) -> Self {
        Self::new(c.value_type(), ExprKind::Const(c))
    }

    /// Constant node holding `v` broadcast to `ty`.
    pub fn splat(v: f32, ty: ValueType) -> Self {
        Self::constant(ConstVal::splat(v, ty))
    }

    /// Opaque leaf of type `ty`.
    pub fn input(name: impl Into<String>, ty: ValueType) -> Self {
        Self::new(ty, ExprKind::Input { name: name.into() })
    }

    /// The process-wide seed node (`uint`).
    pub fn system_seed() -> Self {
        Self::new(ValueType::Uint32, ExprKind::SystemSeed)
    }

    /// Random float node driven by `seed`, optionally varying per simulated element.
    pub fn fixed_random(seed: Expr, per_element: bool) -> Self {
        Self::new(ValueType::Float, ExprKind::FixedRandom { seed, per_element })
    }

    /// Generic single-operand node; keeps the operand type except for casts.
    pub fn unary(op: UnaryOp, operand: &Expr) -> Self {
        let value_type = match op {
            UnaryOp::CastUintToFloat => ValueType::Float,
            _ => operand.value_type(),
        };
        Self::new(
            value_type,
            ExprKind::Unary {
                op,
                operand: operand.clone(),
            },
        )
    }

    /// Generic two-operand node taking the left operand's type.
    ///
    /// This is the raw node builder and does not validate. The library entries check operand
    /// types and return [`OpError::TypeMismatch`] before calling it.
    ///
    /// # Panics
    ///
    /// In debug builds, if the operand types differ (shifts excepted).
    pub fn binary(op: BinaryOp, lhs: &Expr, rhs: &Expr) -> Self {
        debug_assert!(
            matches!(op, BinaryOp::Shl | BinaryOp::Shr) || lhs.value_type() == rhs.value_type(),
            "{op:?} on {} and {}",
            lhs.value_type(),
            rhs.value_type()
        );
        Self::new(
            lhs.value_type(),
            ExprKind::Binary {
                op,
                lhs: lhs.clone(),
                rhs: rhs.clone(),
            },
        )
    }

    /// Vector node built from 2 to 4 scalar float components.
    pub fn combine(components: impl IntoIterator<Item = Expr>) -> OpResult<Self> {
        let components: Components = components.into_iter().collect();
        if let Some(bad) = components
            .iter()
            .find(|c| c.value_type() != ValueType::Float)
        {
            return Err(OpError::invalid_argument(format!(
                "combine expects float components, got {}",
                bad.value_type()
            )));
        }
        let value_type = match ValueType::float_with_components(components.len()) {
            Some(t) if components.len() > 1 => t,
            _ => {
                return Err(OpError::invalid_argument(format!(
                    "combine expects 2 to 4 components, got {}",
                    components.len()
                )));
            }
        };
        Ok(Self::new(value_type, ExprKind::Combine(components)))
    }

    /// Value type of this node.
    pub fn value_type(&self) -> ValueType {
        self.0.value_type
    }

    /// What this node computes.
    pub fn kind(&self) -> &ExprKind {
        &self.0.kind
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(a: &Expr, b: &Expr) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    pub(crate) fn addr(&self) -> usize {
        Arc::as_ptr(&self.0) as usize
    }

    /// Scalar node reading channel `channel` of this node.
    pub fn index(&self, channel: usize) -> Expr {
        debug_assert!(channel < self.value_type().component_count());
        Self::new(
            ValueType::Float,
            ExprKind::Index {
                source: self.clone(),
                channel: channel as u8,
            },
        )
    }

    /// `floor(self)`.
    pub fn floor(&self) -> Expr {
        Self::unary(UnaryOp::Floor, self)
    }

    /// `log2(self)`.
    pub fn log2(&self) -> Expr {
        Self::unary(UnaryOp::Log2, self)
    }

    /// `sin(self)`.
    pub fn sin(&self) -> Expr {
        Self::unary(UnaryOp::Sin, self)
    }

    /// `cos(self)`.
    pub fn cos(&self) -> Expr {
        Self::unary(UnaryOp::Cos, self)
    }

    /// `asin(self)`.
    pub fn asin(&self) -> Expr {
        Self::unary(UnaryOp::Asin, self)
    }

    /// Numeric `uint` to `float` conversion.
    pub fn cast_uint_to_float(&self) -> Expr {
        Self::unary(UnaryOp::CastUintToFloat, self)
    }

    /// `pow(self, exponent)`.
    pub fn pow(&self, exponent: &Expr) -> Expr {
        Self::binary(BinaryOp::Pow, self, exponent)
    }

    /// `min(self, other)`.
    pub fn min(&self, other: &Expr) -> Expr {
        Self::binary(BinaryOp::Min, self, other)
    }

    /// `max(self, other)`.
    pub fn max(&self, other: &Expr) -> Expr {
        Self::binary(BinaryOp::Max, self, other)
    }

    /// `atan2(self, x)`, with `self` as `y`.
    pub fn atan2(&self, x: &Expr) -> Expr {
        Self::binary(BinaryOp::Atan2, self, x)
    }
}

impl From<ConstVal> for Expr {
    fn from(c: ConstVal) -> Self {
        Expr::constant(c)
    }
}

impl From<f32> for Expr {
    fn from(v: f32) -> Self {
        Expr::constant(ConstVal::Float(v))
    }
}

impl From<[f32; 2]> for Expr {
    fn from(v: [f32; 2]) -> Self {
        Expr::constant(ConstVal::Float2(v))
    }
}

impl From<[f32; 3]> for Expr {
    fn from(v: [f32; 3]) -> Self {
        Expr::constant(ConstVal::Float3(v))
    }
}

impl From<[f32; 4]> for Expr {
    fn from(v: [f32; 4]) -> Self {
        Expr::constant(ConstVal::Float4(v))
    }
}

impl From<i32> for Expr {
    fn from(v: i32) -> Self {
        Expr::constant(ConstVal::Int32(v))
    }
}

impl From<u32> for Expr {
    fn from(v: u32) -> Self {
        Expr::constant(ConstVal::Uint32(v))
    }
}

macro_rules! impl_binary_operator {
    ($($trait:ident, $method:ident => $op:expr;)+) => {
        $(
            impl $trait<&Expr> for &Expr {
                type Output = Expr;
                fn $method(self, rhs: &Expr) -> Expr {
                    Expr::binary($op, self, rhs)
                }
            }

            impl $trait<Expr> for &Expr {
                type Output = Expr;
                fn $method(self, rhs: Expr) -> Expr {
                    Expr::binary($op, self, &rhs)
                }
            }

            impl $trait<&Expr> for Expr {
                type Output = Expr;
                fn $method(self, rhs: &Expr) -> Expr {
                    Expr::binary($op, &self, rhs)
                }
            }

            impl $trait<Expr> for Expr {
                type Output = Expr;
                fn $method(self, rhs: Expr) -> Expr {
                    Expr::binary($op, &self, &rhs)
                }
            }
        )+
    };
}

impl_binary_operator! {
    Add, add => BinaryOp::Add;
    Sub, sub => BinaryOp::Sub;
    Mul, mul => BinaryOp::Mul;
    Div, div => BinaryOp::Div;
    BitAnd, bitand => BinaryOp::BitAnd;
    BitOr, bitor => BinaryOp::BitOr;
    BitXor, bitxor => BinaryOp::BitXor;
}

macro_rules! impl_shift_operator {
    ($($trait:ident, $method:ident => $op:expr;)+) => {
        $(
            impl $trait<u32> for &Expr {
                type Output = Expr;
                fn $method(self, bits: u32) -> Expr {
                    Expr::binary($op, self, &Expr::from(bits))
                }
            }

            impl $trait<u32> for Expr {
                type Output = Expr;
                fn $method(self, bits: u32) -> Expr {
                    Expr::binary($op, &self, &Expr::from(bits))
                }
            }
        )+
    };
}

impl_shift_operator! {
    Shl, shl => BinaryOp::Shl;
    Shr, shr => BinaryOp::Shr;
}

const SWIZZLE: [char; 4] = ['x', 'y', 'z', 'w'];

fn write_floats(f: &mut fmt::Formatter<'_>, ty: ValueType, vs: &[f32]) -> fmt::Result {
    write!(f, "{ty}(")?;
    for (i, v) in vs.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{v}")?;
    }
    f.write_str(")")
}

impl fmt::Display for ConstVal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstVal::Float(v) => write!(f, "{v}"),
            ConstVal::Float2(v) => write_floats(f, ValueType::Float2, v),
            ConstVal::Float3(v) => write_floats(f, ValueType::Float3, v),
            ConstVal::Float4(v) => write_floats(f, ValueType::Float4, v),
            ConstVal::Int32(v) => write!(f, "{v}"),
            ConstVal::Uint32(v) => write!(f, "{v}u"),
        }
    }
}

/// Write the text of `e`, rendering each operand with `child`.
pub(crate) fn write_node<W: fmt::Write>(
    out: &mut W,
    e: &Expr,
    child: &mut impl FnMut(&mut W, &Expr) -> fmt::Result,
) -> fmt::Result {
    match e.kind() {
        ExprKind::Const(c) => write!(out, "{c}"),
        ExprKind::Input { name } => out.write_str(name),
        ExprKind::Unary { op, operand } => {
            write!(out, "{}(", op.name())?;
            child(out, operand)?;
            out.write_str(")")
        }
        ExprKind::Binary { op, lhs, rhs } => match op.infix() {
            Some(sym) => {
                out.write_str("(")?;
                child(out, lhs)?;
                write!(out, " {sym} ")?;
                child(out, rhs)?;
                out.write_str(")")
            }
            None => {
                write!(out, "{}(", op.call_name())?;
                child(out, lhs)?;
                out.write_str(", ")?;
                child(out, rhs)?;
                out.write_str(")")
            }
        },
        ExprKind::Index { source, channel } => {
            let swizzle = SWIZZLE.get(usize::from(*channel)).copied().unwrap_or('?');
            child(out, source)?;
            write!(out, ".{swizzle}")
        }
        ExprKind::Combine(components) => {
            write!(out, "{}(", e.value_type())?;
            for (i, c) in components.iter().enumerate() {
                if i > 0 {
                    out.write_str(", ")?;
                }
                child(out, c)?;
            }
            out.write_str(")")
        }
        ExprKind::SystemSeed => out.write_str("systemSeed"),
        ExprKind::FixedRandom { seed, per_element } => {
            out.write_str("fixedRandom(")?;
            child(out, seed)?;
            write!(out, ", {per_element})")
        }
    }
}

/// Nested tree form; a shared sub-graph is printed once per use, so the text can grow
/// exponentially with sharing depth. [`SharedText`](crate::SharedText) binds shared nodes once.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self, &mut |f, c| write!(f, "{c}"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/graph/node.rs"]
mod tests;
