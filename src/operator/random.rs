use crate::foundation::error::{OpError, OpResult};
use crate::foundation::value_type::ValueType;
use crate::graph::node::Expr;

/// `2^-32`: maps the full `uint` range onto `[0, 1)`.
const INV_2_POW_32: f32 = 1.0 / 4_294_967_296.0;

// (low mask, shift) per swap stage after the initial half-word swap.
const SWAP_STAGES: [(u32, u32); 4] = [
    (0x5555_5555, 1),
    (0x3333_3333, 2),
    (0x0F0F_0F0F, 4),
    (0x00FF_00FF, 8),
];

/// Radical inverse in base 2 of a `uint` node, as a `float` in `[0, 1)`.
///
/// Reverses the 32 bits with a half-word swap followed by mask-and-shift swaps of 1, 2, 4
/// and 8 bits, then scales by `2^-32`.
pub fn van_der_corput_sequence(bits: &Expr) -> OpResult<Expr> {
    if bits.value_type() != ValueType::Uint32 {
        tracing::debug!(value_type = %bits.value_type(), "van der corput expects uint");
        return Err(OpError::invalid_argument(format!(
            "van_der_corput_sequence expects a uint, got {}",
            bits.value_type()
        )));
    }

    let mut bits = (bits << 16) | (bits >> 16);
    for (mask, shift) in SWAP_STAGES {
        let low = (&bits & Expr::from(mask)) << shift;
        let high = (&bits & Expr::from(!mask)) >> shift;
        bits = low | high;
    }
    Ok(bits.cast_uint_to_float() * Expr::from(INV_2_POW_32))
}

/// Random float seeded by `hash ^ systemSeed`.
///
/// `hash` is a `uint` node or a `u32` literal; `per_element` makes the value vary per
/// simulated element instead of being shared by the whole system.
pub fn fixed_random(hash: impl Into<Expr>, per_element: bool) -> OpResult<Expr> {
    let hash = hash.into();
    if hash.value_type() != ValueType::Uint32 {
        tracing::debug!(value_type = %hash.value_type(), "fixed random expects a uint hash");
        return Err(OpError::invalid_argument(format!(
            "fixed_random expects a uint hash, got {}",
            hash.value_type()
        )));
    }
    let seed = hash ^ Expr::system_seed();
    Ok(Expr::fixed_random(seed, per_element))
}

#[cfg(test)]
#[path = "../../tests/unit/operator/random.rs"]
mod tests;
