//! Typed numeric operator algebra for particle-effect shader graphs.
//!
//! Every operation takes immutable expression nodes ([`Expr`]) and returns a new node that
//! computes the result; nothing is evaluated here. The crate provides:
//!
//! - Float-family casting and type unification ([`cast_float`], [`upcast_all_float_n`])
//! - Per-type constant tables ([`Literal`], [`constant_table`])
//! - Math, geometry, color and low-discrepancy random helpers
//! - A named operator catalog ([`OperatorKind`]) and its JSON request form ([`OperatorRequest`])
//!
//! Every node carries a stable structural [`ExprFingerprint`] for caching and tests.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod catalog;
mod foundation;
mod graph;
mod operator;

#[cfg(test)]
#[path = "../tests/unit/support/eval.rs"]
mod test_eval;

pub use crate::foundation::error::{OpError, OpResult};
pub use crate::foundation::value_type::ValueType;

pub use crate::graph::fingerprint::ExprFingerprint;
pub use crate::graph::node::{BinaryOp, Components, ConstVal, Expr, ExprKind, UnaryOp};
pub use crate::graph::shared::SharedText;

pub use crate::operator::cast::cast_float;
pub use crate::operator::color::{GAMMA, color_luma, gamma_to_linear, linear_to_gamma};
pub use crate::operator::components::{extract_components, sum_pairwise};
pub use crate::operator::constants::{ConstantTable, Literal, constant_table};
pub use crate::operator::geometry::{
    Polar, Spherical, box_volume, circle_area, circle_circumference, cone_volume,
    cylinder_volume, distance, dot, length, normalize, polar_to_rectangular,
    rectangular_to_polar, rectangular_to_spherical, signed_distance_to_plane, sphere_volume,
    spherical_to_rectangular, sqr_distance, torus_volume,
};
pub use crate::operator::math::{
    atanh, clamp, cosh, deg_to_rad, discretize, fit, frac, lerp, log, modulo, negate,
    rad_to_deg, round, saturate, sinh, smoothstep, sqrt, tanh,
};
pub use crate::operator::random::{fixed_random, van_der_corput_sequence};
pub use crate::operator::unify::{
    find_max_float_n_value_type, require_same_type, unify_op2, unify_op3, upcast_all_float_n,
};

pub use crate::catalog::kind::OperatorKind;
pub use crate::catalog::request::{InputDef, OperatorRequest};
