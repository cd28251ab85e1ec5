//! The closed type algebra.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Identifier;

/// Every type a field, constant or function signature can have.
///
/// Functions that dispatch on `Type` match every variant explicitly so that
/// adding a variant breaks the build until each mapping is revisited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Type {
    Void,
    /// Return type of a oneway function.
    OnewayVoid,
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
    Enum(Identifier),
    Struct(Identifier),
    List(Box<Type>),
    Set(Box<Type>),
    Map(Box<Type>, Box<Type>),
    /// A named type the parser could not resolve. Validation rejects these,
    /// so one reaching the generator is an internal error.
    Reference(Identifier),
}

impl Type {
    pub fn list(elem: Type) -> Self {
        Type::List(Box::new(elem))
    }

    pub fn set(elem: Type) -> Self {
        Type::Set(Box::new(elem))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(Box::new(key), Box::new(value))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, Type::List(_) | Type::Set(_) | Type::Map(_, _))
    }

    pub fn is_void(&self) -> bool {
        matches!(self, Type::Void | Type::OnewayVoid)
    }

    /// The named-type identifier, for enums, structs and unresolved references.
    pub fn named(&self) -> Option<&Identifier> {
        match self {
            Type::Enum(id) | Type::Struct(id) | Type::Reference(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Void => f.write_str("void"),
            Type::OnewayVoid => f.write_str("oneway void"),
            Type::Bool => f.write_str("bool"),
            Type::Byte => f.write_str("byte"),
            Type::I16 => f.write_str("i16"),
            Type::I32 => f.write_str("i32"),
            Type::I64 => f.write_str("i64"),
            Type::Double => f.write_str("double"),
            Type::String => f.write_str("string"),
            Type::Binary => f.write_str("binary"),
            Type::Enum(id) => write!(f, "enum {}", id),
            Type::Struct(id) => write!(f, "struct {}", id),
            Type::List(elem) => write!(f, "list<{}>", elem),
            Type::Set(elem) => write!(f, "set<{}>", elem),
            Type::Map(key, value) => write!(f, "map<{}, {}>", key, value),
            Type::Reference(id) => write!(f, "unresolved reference {}", id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested() {
        let t = Type::map(Type::String, Type::list(Type::I32));
        assert_eq!(t.to_string(), "map<string, list<i32>>");
    }

    #[test]
    fn test_deserialize() {
        let t: Type = serde_json::from_str(r#"{"map": ["string", {"list": "i64"}]}"#).unwrap();
        assert_eq!(t, Type::map(Type::String, Type::list(Type::I64)));

        let t: Type = serde_json::from_str(r#"{"struct": "shared.Point"}"#).unwrap();
        assert_eq!(t, Type::Struct(Identifier::parse("shared.Point")));
    }
}
