use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::{OpError, OpResult};
use crate::graph::node::Expr;
use crate::operator::unify::{require_same_type, upcast_all_float_n};
use crate::operator::{color, geometry, math, random};

/// Every operation of the library, addressable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperatorKind {
    /// [`negate`](crate::negate).
    Negate,
    /// [`clamp`](crate::clamp).
    Clamp,
    /// [`saturate`](crate::saturate).
    Saturate,
    /// [`frac`](crate::frac).
    Frac,
    /// [`round`](crate::round).
    Round,
    /// Logarithm in an arbitrary base, [`log`](crate::log).
    Log,
    /// [`atanh`](crate::atanh).
    Atanh,
    /// [`sinh`](crate::sinh).
    Sinh,
    /// [`cosh`](crate::cosh).
    Cosh,
    /// [`tanh`](crate::tanh).
    Tanh,
    /// [`sqrt`](crate::sqrt).
    Sqrt,
    /// [`lerp`](crate::lerp).
    Lerp,
    /// Linear remap between ranges, [`fit`](crate::fit).
    Fit,
    /// [`modulo`](crate::modulo).
    Modulo,
    /// [`smoothstep`](crate::smoothstep).
    Smoothstep,
    /// [`discretize`](crate::discretize).
    Discretize,
    /// [`deg_to_rad`](crate::deg_to_rad).
    DegToRad,
    /// [`rad_to_deg`](crate::rad_to_deg).
    RadToDeg,
    /// [`dot`](crate::dot).
    Dot,
    /// [`length`](crate::length).
    Length,
    /// [`distance`](crate::distance).
    Distance,
    /// [`sqr_distance`](crate::sqr_distance).
    SqrDistance,
    /// [`normalize`](crate::normalize).
    Normalize,
    /// [`polar_to_rectangular`](crate::polar_to_rectangular).
    PolarToRectangular,
    /// Two outputs: angle then distance.
    RectangularToPolar,
    /// [`spherical_to_rectangular`](crate::spherical_to_rectangular).
    SphericalToRectangular,
    /// Three outputs: theta, phi then distance.
    RectangularToSpherical,
    /// [`circle_area`](crate::circle_area).
    CircleArea,
    /// [`circle_circumference`](crate::circle_circumference).
    CircleCircumference,
    /// [`box_volume`](crate::box_volume).
    BoxVolume,
    /// [`sphere_volume`](crate::sphere_volume).
    SphereVolume,
    /// [`cylinder_volume`](crate::cylinder_volume).
    CylinderVolume,
    /// [`cone_volume`](crate::cone_volume).
    ConeVolume,
    /// [`torus_volume`](crate::torus_volume).
    TorusVolume,
    /// [`signed_distance_to_plane`](crate::signed_distance_to_plane).
    SignedDistanceToPlane,
    /// [`color_luma`](crate::color_luma).
    ColorLuma,
    /// [`gamma_to_linear`](crate::gamma_to_linear).
    GammaToLinear,
    /// [`linear_to_gamma`](crate::linear_to_gamma).
    LinearToGamma,
    /// [`van_der_corput_sequence`](crate::van_der_corput_sequence).
    VanDerCorputSequence,
    /// One random value shared by all components.
    FixedRandom,
    /// Random value per component.
    FixedRandomPerElement,
}

impl OperatorKind {
    /// Every operator, in catalog order.
    pub const ALL: [OperatorKind; 41] = [
        OperatorKind::Negate,
        OperatorKind::Clamp,
        OperatorKind::Saturate,
        OperatorKind::Frac,
        OperatorKind::Round,
        OperatorKind::Log,
        OperatorKind::Atanh,
        OperatorKind::Sinh,
        OperatorKind::Cosh,
        OperatorKind::Tanh,
        OperatorKind::Sqrt,
        OperatorKind::Lerp,
        OperatorKind::Fit,
        OperatorKind::Modulo,
        OperatorKind::Smoothstep,
        OperatorKind::Discretize,
        OperatorKind::DegToRad,
        OperatorKind::RadToDeg,
        OperatorKind::Dot,
        OperatorKind::Length,
        OperatorKind::Distance,
        OperatorKind::SqrDistance,
        OperatorKind::Normalize,
        OperatorKind::PolarToRectangular,
        OperatorKind::RectangularToPolar,
        OperatorKind::SphericalToRectangular,
        OperatorKind::RectangularToSpherical,
        OperatorKind::CircleArea,
        OperatorKind::CircleCircumference,
        OperatorKind::BoxVolume,
        OperatorKind::SphereVolume,
        OperatorKind::CylinderVolume,
        OperatorKind::ConeVolume,
        OperatorKind::TorusVolume,
        OperatorKind::SignedDistanceToPlane,
        OperatorKind::ColorLuma,
        OperatorKind::GammaToLinear,
        OperatorKind::LinearToGamma,
        OperatorKind::VanDerCorputSequence,
        OperatorKind::FixedRandom,
        OperatorKind::FixedRandomPerElement,
    ];

    /// Snake-case name, identical to the serde representation.
    pub fn name(self) -> &'static str {
        match self {
            OperatorKind::Negate => "negate",
            OperatorKind::Clamp => "clamp",
            OperatorKind::Saturate => "saturate",
            OperatorKind::Frac => "frac",
            OperatorKind::Round => "round",
            OperatorKind::Log => "log",
            OperatorKind::Atanh => "atanh",
            OperatorKind::Sinh => "sinh",
            OperatorKind::Cosh => "cosh",
            OperatorKind::Tanh => "tanh",
            OperatorKind::Sqrt => "sqrt",
            OperatorKind::Lerp => "lerp",
            OperatorKind::Fit => "fit",
            OperatorKind::Modulo => "modulo",
            OperatorKind::Smoothstep => "smoothstep",
            OperatorKind::Discretize => "discretize",
            OperatorKind::DegToRad => "deg_to_rad",
            OperatorKind::RadToDeg => "rad_to_deg",
            OperatorKind::Dot => "dot",
            OperatorKind::Length => "length",
            OperatorKind::Distance => "distance",
            OperatorKind::SqrDistance => "sqr_distance",
            OperatorKind::Normalize => "normalize",
            OperatorKind::PolarToRectangular => "polar_to_rectangular",
            OperatorKind::RectangularToPolar => "rectangular_to_polar",
            OperatorKind::SphericalToRectangular => "spherical_to_rectangular",
            OperatorKind::RectangularToSpherical => "rectangular_to_spherical",
            OperatorKind::CircleArea => "circle_area",
            OperatorKind::CircleCircumference => "circle_circumference",
            OperatorKind::BoxVolume => "box_volume",
            OperatorKind::SphereVolume => "sphere_volume",
            OperatorKind::CylinderVolume => "cylinder_volume",
            OperatorKind::ConeVolume => "cone_volume",
            OperatorKind::TorusVolume => "torus_volume",
            OperatorKind::SignedDistanceToPlane => "signed_distance_to_plane",
            OperatorKind::ColorLuma => "color_luma",
            OperatorKind::GammaToLinear => "gamma_to_linear",
            OperatorKind::LinearToGamma => "linear_to_gamma",
            OperatorKind::VanDerCorputSequence => "van_der_corput_sequence",
            OperatorKind::FixedRandom => "fixed_random",
            OperatorKind::FixedRandomPerElement => "fixed_random_per_element",
        }
    }

    /// Number of operands the operator takes.
    pub fn arity(self) -> usize {
        match self {
            OperatorKind::Fit => 5,
            OperatorKind::Clamp
            | OperatorKind::Lerp
            | OperatorKind::Smoothstep
            | OperatorKind::SphericalToRectangular
            | OperatorKind::ConeVolume
            | OperatorKind::SignedDistanceToPlane => 3,
            OperatorKind::Log
            | OperatorKind::Modulo
            | OperatorKind::Discretize
            | OperatorKind::Dot
            | OperatorKind::Distance
            | OperatorKind::SqrDistance
            | OperatorKind::PolarToRectangular
            | OperatorKind::CylinderVolume
            | OperatorKind::TorusVolume => 2,
            _ => 1,
        }
    }

    /// Number of nodes [`OperatorKind::apply`] returns.
    pub fn output_count(self) -> usize {
        match self {
            OperatorKind::RectangularToPolar => 2,
            OperatorKind::RectangularToSpherical => 3,
            _ => 1,
        }
    }

    /// Whether the operands are unified to one type before building.
    ///
    /// These are the element-wise entries with several operands. `clamp` and the coordinate
    /// builders cast their own operands instead.
    pub fn unifies_operands(self) -> bool {
        matches!(
            self,
            OperatorKind::Log
                | OperatorKind::Lerp
                | OperatorKind::Fit
                | OperatorKind::Modulo
                | OperatorKind::Smoothstep
                | OperatorKind::Discretize
                | OperatorKind::Dot
                | OperatorKind::Distance
                | OperatorKind::SqrDistance
                | OperatorKind::CylinderVolume
                | OperatorKind::ConeVolume
                | OperatorKind::TorusVolume
                | OperatorKind::SignedDistanceToPlane
        )
    }

    /// Build the operator over `inputs`.
    ///
    /// For [`unifies_operands`](Self::unifies_operands) entries, float operands are cast to
    /// the widest float type first; integer operands are left alone, so any remaining
    /// difference fails with [`OpError::TypeMismatch`] before a node is built.
    #[tracing::instrument(level = "debug", skip(inputs), fields(op = self.name(), arity = inputs.len()))]
    pub fn apply(self, inputs: &[Expr]) -> OpResult<Vec<Expr>> {
        if inputs.len() != self.arity() {
            return Err(self.arity_error(inputs.len()));
        }

        let unified;
        let inputs = if self.unifies_operands() {
            unified = upcast_all_float_n(inputs, 0.0)?;
            require_same_type(&unified.iter().collect::<Vec<_>>())?;
            unified.as_slice()
        } else {
            inputs
        };

        let one = |e: Expr| -> OpResult<Vec<Expr>> { Ok(vec![e]) };
        match (self, inputs) {
            (OperatorKind::Negate, [x]) => one(math::negate(x)),
            (OperatorKind::Clamp, [x, lo, hi]) => one(math::clamp(x, lo, hi)?),
            (OperatorKind::Saturate, [x]) => one(math::saturate(x)?),
            (OperatorKind::Frac, [x]) => one(math::frac(x)),
            (OperatorKind::Round, [x]) => one(math::round(x)),
            (OperatorKind::Log, [x, base]) => one(math::log(x, base)?),
            (OperatorKind::Atanh, [x]) => one(math::atanh(x)),
            (OperatorKind::Sinh, [x]) => one(math::sinh(x)),
            (OperatorKind::Cosh, [x]) => one(math::cosh(x)),
            (OperatorKind::Tanh, [x]) => one(math::tanh(x)),
            (OperatorKind::Sqrt, [x]) => one(math::sqrt(x)),
            (OperatorKind::Lerp, [x, y, s]) => one(math::lerp(x, y, s)?),
            (OperatorKind::Fit, [v, old_min, old_max, new_min, new_max]) => {
                one(math::fit(v, old_min, old_max, new_min, new_max)?)
            }
            (OperatorKind::Modulo, [x, y]) => one(math::modulo(x, y)?),
            (OperatorKind::Smoothstep, [x, y, s]) => one(math::smoothstep(x, y, s)?),
            (OperatorKind::Discretize, [v, g]) => one(math::discretize(v, g)?),
            (OperatorKind::DegToRad, [d]) => one(math::deg_to_rad(d)?),
            (OperatorKind::RadToDeg, [r]) => one(math::rad_to_deg(r)?),
            (OperatorKind::Dot, [a, b]) => one(geometry::dot(a, b)?),
            (OperatorKind::Length, [v]) => one(geometry::length(v)?),
            (OperatorKind::Distance, [x, y]) => one(geometry::distance(x, y)?),
            (OperatorKind::SqrDistance, [x, y]) => one(geometry::sqr_distance(x, y)?),
            (OperatorKind::Normalize, [v]) => one(geometry::normalize(v)?),
            (OperatorKind::PolarToRectangular, [theta, d]) => {
                one(geometry::polar_to_rectangular(theta, d)?)
            }
            (OperatorKind::RectangularToPolar, [v]) => {
                let p = geometry::rectangular_to_polar(v)?;
                Ok(vec![p.theta, p.distance])
            }
            (OperatorKind::SphericalToRectangular, [theta, phi, d]) => {
                one(geometry::spherical_to_rectangular(theta, phi, d)?)
            }
            (OperatorKind::RectangularToSpherical, [v]) => {
                let s = geometry::rectangular_to_spherical(v)?;
                Ok(vec![s.theta, s.phi, s.distance])
            }
            (OperatorKind::CircleArea, [r]) => one(geometry::circle_area(r)),
            (OperatorKind::CircleCircumference, [r]) => one(geometry::circle_circumference(r)),
            (OperatorKind::BoxVolume, [d]) => one(geometry::box_volume(d)?),
            (OperatorKind::SphereVolume, [r]) => one(geometry::sphere_volume(r)),
            (OperatorKind::CylinderVolume, [r, h]) => one(geometry::cylinder_volume(r, h)?),
            (OperatorKind::ConeVolume, [r0, r1, h]) => one(geometry::cone_volume(r0, r1, h)?),
            (OperatorKind::TorusVolume, [major, minor]) => {
                one(geometry::torus_volume(major, minor)?)
            }
            (OperatorKind::SignedDistanceToPlane, [p, n, x]) => {
                one(geometry::signed_distance_to_plane(p, n, x)?)
            }
            (OperatorKind::ColorLuma, [c]) => one(color::color_luma(c)?),
            (OperatorKind::GammaToLinear, [c]) => one(color::gamma_to_linear(c)?),
            (OperatorKind::LinearToGamma, [c]) => one(color::linear_to_gamma(c)?),
            (OperatorKind::VanDerCorputSequence, [bits]) => {
                one(random::van_der_corput_sequence(bits)?)
            }
            (OperatorKind::FixedRandom, [hash]) => one(random::fixed_random(hash.clone(), false)?),
            (OperatorKind::FixedRandomPerElement, [hash]) => {
                one(random::fixed_random(hash.clone(), true)?)
            }
            (kind, _) => Err(kind.arity_error(inputs.len())),
        }
    }

    fn arity_error(self, got: usize) -> OpError {
        OpError::invalid_argument(format!(
            "{} expects {} operand(s), got {got}",
            self.name(),
            self.arity()
        ))
    }
}

impl fmt::Display for OperatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OperatorKind {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OperatorKind::ALL
            .into_iter()
            .find(|k| k.name() == s)
            .ok_or_else(|| OpError::config(format!("unknown operator \"{s}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/kind.rs"]
mod tests;
