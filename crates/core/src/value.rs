//! Value types held by attribute histories
//!
//! ## Null Semantics
//!
//! `StateValue::Null` is the absent state. Writing it closes the ongoing
//! interval; it is never stored inside a committed interval.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Value of an attribute over one interval
///
/// ## Equality Rules
///
/// - Different variants are never equal
/// - `Int(1)` != `String("1")`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StateValue {
    /// Absence of value
    #[default]
    Null,

    /// 64-bit signed integer, used for status codes
    Int(i64),

    /// UTF-8 string
    String(String),
}

impl StateValue {
    /// Returns the type name as a string (for error messages)
    pub fn type_name(&self) -> &'static str {
        match self {
            StateValue::Null => "Null",
            StateValue::Int(_) => "Int",
            StateValue::String(_) => "String",
        }
    }

    /// Check if this value is null
    pub fn is_null(&self) -> bool {
        matches!(self, StateValue::Null)
    }

    /// Try to get as i64
    pub fn as_int(&self) -> Option<i64> {
        match self {
            StateValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Try to get as string slice
    pub fn as_str(&self) -> Option<&str> {
        match self {
            StateValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<i64> for StateValue {
    fn from(i: i64) -> Self {
        StateValue::Int(i)
    }
}

impl From<String> for StateValue {
    fn from(s: String) -> Self {
        StateValue::String(s)
    }
}

impl From<&str> for StateValue {
    fn from(s: &str) -> Self {
        StateValue::String(s.to_string())
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Null => write!(f, "null"),
            StateValue::Int(i) => write!(f, "{}", i),
            StateValue::String(s) => write!(f, "{:?}", s),
        }
    }
}
