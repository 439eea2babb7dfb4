use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::foundation::error::OpError;

/// Numeric kind carried by every expression node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Scalar 32-bit float.
    Float,
    /// Two-component float vector.
    Float2,
    /// Three-component float vector.
    Float3,
    /// Four-component float vector.
    Float4,
    /// Signed 32-bit integer.
    #[serde(rename = "int")]
    Int32,
    /// Unsigned 32-bit integer.
    #[serde(rename = "uint")]
    Uint32,
}

impl ValueType {
    /// Every value type, in declaration order.
    pub const ALL: [ValueType; 6] = [
        ValueType::Float,
        ValueType::Float2,
        ValueType::Float3,
        ValueType::Float4,
        ValueType::Int32,
        ValueType::Uint32,
    ];

    /// Number of scalar channels.
    pub const fn component_count(self) -> usize {
        match self {
            ValueType::Float | ValueType::Int32 | ValueType::Uint32 => 1,
            ValueType::Float2 => 2,
            ValueType::Float3 => 3,
            ValueType::Float4 => 4,
        }
    }

    /// Whether the type belongs to the float family (`float`..`float4`).
    pub const fn is_float(self) -> bool {
        matches!(
            self,
            ValueType::Float | ValueType::Float2 | ValueType::Float3 | ValueType::Float4
        )
    }

    /// The float-family type with `count` channels, if any.
    pub const fn float_with_components(count: usize) -> Option<ValueType> {
        match count {
            1 => Some(ValueType::Float),
            2 => Some(ValueType::Float2),
            3 => Some(ValueType::Float3),
            4 => Some(ValueType::Float4),
            _ => None,
        }
    }

    /// Stable lowercase name, as used in shader source and JSON.
    pub const fn name(self) -> &'static str {
        match self {
            ValueType::Float => "float",
            ValueType::Float2 => "float2",
            ValueType::Float3 => "float3",
            ValueType::Float4 => "float4",
            ValueType::Int32 => "int",
            ValueType::Uint32 => "uint",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueType {
    type Err = OpError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValueType::ALL
            .into_iter()
            .find(|t| t.name() == s)
            .ok_or_else(|| OpError::config(format!("unknown value type \"{s}\"")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/value_type.rs"]
mod tests;
