//! The operation registry: a fixed table of the four arithmetic
//! operations, populated at startup and never mutated afterwards.

use crate::calc::dispatch;
use crate::calc::error::Result;
use serde_json::{json, Value};

/// Both parameters every operation takes, in binding order.
pub const PARAMS: [&str; 2] = ["a", "b"];

/// A named binary operation over f64
#[derive(Debug, Clone, Copy)]
pub struct Operation {
    pub name: &'static str,
    pub description: &'static str,
    pub apply: fn(f64, f64) -> Result<f64>,
}

impl Operation {
    /// JSON Schema for the operation's arguments, used by `tools/list`
    pub fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "a": { "type": "number", "description": "First operand" },
                "b": { "type": "number", "description": "Second operand" }
            },
            "required": ["a", "b"],
            "additionalProperties": false
        })
    }
}

/// Immutable registry of operations, ordered by declaration.
///
/// Lookups are case-sensitive exact matches. The table is tiny, so a
/// linear scan beats any map here.
pub struct Registry {
    ops: Vec<Operation>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            ops: vec![
                Operation {
                    name: "add",
                    description: "Add two numbers and return their sum",
                    apply: dispatch::add,
                },
                Operation {
                    name: "subtract",
                    description: "Subtract the second number from the first",
                    apply: dispatch::subtract,
                },
                Operation {
                    name: "multiply",
                    description: "Multiply two numbers and return their product",
                    apply: dispatch::multiply,
                },
                Operation {
                    name: "divide",
                    description: "Divide the first number by the second; fails on a zero divisor",
                    apply: dispatch::divide,
                },
            ],
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Operation> {
        self.ops.iter().find(|op| op.name == name)
    }

    /// Operations in declaration order
    pub fn list(&self) -> &[Operation] {
        &self.ops
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
