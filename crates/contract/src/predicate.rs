//! Numeric filter predicates.
//!
//! A [`FilterPredicate`] states that a named numeric field of every element
//! in a result collection satisfies a comparison against a threshold, e.g.
//! `gdp > 5000`. The comparison operators mirror the wire format of filter
//! endpoints, so a [`CmpOp`] parses from and displays as its query-string
//! symbol.

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::ContractError;

/// A comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `==`
    Eq,
}

impl CmpOp {
    /// All operators, in a stable order. Handy for parameterized scenarios.
    pub const ALL: [CmpOp; 5] = [CmpOp::Gt, CmpOp::Ge, CmpOp::Lt, CmpOp::Le, CmpOp::Eq];

    /// The query-string symbol for this operator.
    pub fn symbol(&self) -> &'static str {
        match self {
            CmpOp::Gt => ">",
            CmpOp::Ge => ">=",
            CmpOp::Lt => "<",
            CmpOp::Le => "<=",
            CmpOp::Eq => "==",
        }
    }

    /// Evaluates `lhs op rhs`.
    pub fn holds(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            CmpOp::Gt => lhs > rhs,
            CmpOp::Ge => lhs >= rhs,
            CmpOp::Lt => lhs < rhs,
            CmpOp::Le => lhs <= rhs,
            CmpOp::Eq => lhs == rhs,
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for CmpOp {
    type Err = ContractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ">" => Ok(CmpOp::Gt),
            ">=" => Ok(CmpOp::Ge),
            "<" => Ok(CmpOp::Lt),
            "<=" => Ok(CmpOp::Le),
            "==" => Ok(CmpOp::Eq),
            other => Err(ContractError::construction(format!(
                "unknown comparison operator '{}'",
                other
            ))),
        }
    }
}

/// A predicate applied to every element of a result collection.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterPredicate {
    /// The numeric field to inspect on each element.
    pub field: String,
    /// The comparison operator.
    pub op: CmpOp,
    /// The threshold value.
    pub threshold: f64,
}

impl FilterPredicate {
    /// Creates a predicate `field op threshold`.
    pub fn new(field: impl Into<String>, op: CmpOp, threshold: f64) -> Self {
        Self {
            field: field.into(),
            op,
            threshold,
        }
    }

    /// Checks every element, returning one failure message per violation.
    ///
    /// An element without the field, or with a non-numeric value, is a
    /// violation too.
    pub fn check_all(&self, items: &[Value]) -> Vec<String> {
        items
            .iter()
            .enumerate()
            .filter_map(|(idx, item)| self.check_one(idx, item))
            .collect()
    }

    fn check_one(&self, idx: usize, item: &Value) -> Option<String> {
        let value = match item.get(&self.field).and_then(Value::as_f64) {
            Some(v) => v,
            None => {
                return Some(format!(
                    "element {} has no numeric field '{}': {}",
                    idx, self.field, item
                ));
            }
        };
        if self.op.holds(value, self.threshold) {
            None
        } else {
            Some(format!(
                "element {} violates {} {} {}: {} = {} in {}",
                idx, self.field, self.op, self.threshold, self.field, value, item
            ))
        }
    }
}

impl fmt::Display for FilterPredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.field, self.op, self.threshold)
    }
}
