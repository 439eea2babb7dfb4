use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::kind::OperatorKind;
use crate::foundation::error::{OpError, OpResult};
use crate::foundation::value_type::ValueType;
use crate::graph::node::{ConstVal, Expr};

/// JSON description of one catalog invocation.
///
/// ```json
/// { "operator": "smoothstep",
///   "inputs": [ {"input": "float3", "name": "t"}, {"const": [0.0]}, {"const": [1.0]} ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperatorRequest {
    /// Catalog entry to apply.
    pub operator: OperatorKind,
    /// Operands in order; must match the operator's arity.
    #[serde(default)]
    pub inputs: Vec<InputDef>,
}

/// One operand of an [`OperatorRequest`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputDef {
    /// Opaque typed leaf.
    Input {
        /// Leaf type.
        input: ValueType,
        /// Leaf name; `in<position>` when absent.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        name: Option<String>,
    },
    /// Float constant of 1 to 4 components.
    Const {
        /// Components, x first.
        #[serde(rename = "const")]
        value: Vec<f32>,
    },
    /// Unsigned integer constant.
    Uint {
        /// Value.
        uint: u32,
    },
    /// Signed integer constant.
    Int {
        /// Value.
        int: i32,
    },
}

impl InputDef {
    /// Node for this operand; `position` names unnamed leaves.
    pub fn to_expr(&self, position: usize) -> OpResult<Expr> {
        match self {
            InputDef::Input { input, name } => {
                let name = name.clone().unwrap_or_else(|| format!("in{position}"));
                Ok(Expr::input(name, *input))
            }
            InputDef::Const { value } => {
                let c = match value.as_slice() {
                    [x] => ConstVal::Float(*x),
                    [x, y] => ConstVal::Float2([*x, *y]),
                    [x, y, z] => ConstVal::Float3([*x, *y, *z]),
                    [x, y, z, w] => ConstVal::Float4([*x, *y, *z, *w]),
                    other => {
                        return Err(OpError::config(format!(
                            "input {position}: constant must have 1 to 4 components, got {}",
                            other.len()
                        )));
                    }
                };
                Ok(Expr::constant(c))
            }
            InputDef::Uint { uint } => Ok(Expr::from(*uint)),
            InputDef::Int { int } => Ok(Expr::from(*int)),
        }
    }
}

impl OperatorRequest {
    /// Parse a request from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> OpResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| OpError::config(format!("parse operator request JSON: {e}")))
    }

    /// Parse a request from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> OpResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            OpError::config(format!("open operator request '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Parse a request from a JSON string.
    pub fn from_json_str(s: &str) -> OpResult<Self> {
        serde_json::from_str(s)
            .map_err(|e| OpError::config(format!("parse operator request JSON: {e}")))
    }

    /// Operand nodes, in declaration order.
    pub fn operands(&self) -> OpResult<Vec<Expr>> {
        self.inputs
            .iter()
            .enumerate()
            .map(|(i, def)| def.to_expr(i))
            .collect()
    }

    /// Build the requested operator over its operands.
    #[tracing::instrument(level = "debug", skip(self), fields(op = %self.operator))]
    pub fn build(&self) -> OpResult<Vec<Expr>> {
        let operands = self.operands()?;
        let outputs = self.operator.apply(&operands)?;
        tracing::debug!(outputs = outputs.len(), "operator request built");
        Ok(outputs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/request.rs"]
mod tests;
