//! Literal constant values.

use serde::{Deserialize, Serialize};

use super::Identifier;

/// The right-hand side of a constant or field default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Null,
    String(String),
    Double(f64),
    Int(i64),
    Bool(bool),
    List(Vec<Value>),
    Set(Vec<Value>),
    Map(Vec<(Value, Value)>),
    Enum { enum_name: Identifier, member: Identifier },
    Id(Identifier),
}

impl Value {
    pub fn string(value: impl Into<String>) -> Self {
        Value::String(value.into())
    }

    pub fn enum_ref(enum_name: &str, member: &str) -> Self {
        Value::Enum {
            enum_name: Identifier::parse(enum_name),
            member: Identifier::simple(member),
        }
    }
}
