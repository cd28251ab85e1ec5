//! The parsed document tree handed to the generator.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{Identifier, Type, Value};
use crate::diagnostic::{GeneratorError, Result};

/// A field's presence policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requiredness {
    Required,
    Optional,
    /// Neither keyword given: the field is written when set and a default
    /// is used when it is absent on read.
    #[default]
    Default,
}

impl Requiredness {
    pub fn is_required(self) -> bool {
        self == Requiredness::Required
    }

    pub fn is_optional(self) -> bool {
        self == Requiredness::Optional
    }
}

/// A struct member or function argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub id: i16,
    pub name: Identifier,
    /// Name as declared, used on the wire. Empty means `name`.
    #[serde(default)]
    pub original_name: String,
    pub field_type: Type,
    #[serde(default)]
    pub requiredness: Requiredness,
    #[serde(default)]
    pub default: Option<Value>,
}

impl Field {
    pub fn new(id: i16, name: &str, field_type: Type, requiredness: Requiredness) -> Self {
        Self {
            id,
            name: Identifier::simple(name),
            original_name: name.to_string(),
            field_type,
            requiredness,
            default: None,
        }
    }

    pub fn with_default(mut self, value: Value) -> Self {
        self.default = Some(value);
        self
    }

    /// The name written on the wire, unaffected by case normalisation.
    pub fn wire_name(&self) -> &str {
        if self.original_name.is_empty() {
            self.name.name()
        } else {
            &self.original_name
        }
    }
}

/// A named constant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Const {
    pub name: Identifier,
    pub field_type: Type,
    pub value: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnumField {
    pub name: Identifier,
    /// Member name as declared. Empty means `name`.
    #[serde(default)]
    pub original_name: String,
    pub value: i32,
}

impl EnumField {
    pub fn new(name: &str, value: i32) -> Self {
        Self {
            name: Identifier::simple(name),
            original_name: name.to_string(),
            value,
        }
    }

    /// The member name as declared, unaffected by case normalisation.
    pub fn declared_name(&self) -> &str {
        if self.original_name.is_empty() {
            self.name.name()
        } else {
            &self.original_name
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enum {
    pub name: Identifier,
    pub values: Vec<EnumField>,
}

/// Which flavour of struct-like definition this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StructKind {
    #[default]
    Struct,
    Union,
    Exception,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Struct {
    pub name: Identifier,
    #[serde(default)]
    pub kind: StructKind,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub name: Identifier,
    /// Name as declared, used on the wire. Empty means `name`.
    #[serde(default)]
    pub original_name: String,
    pub return_type: Type,
    #[serde(default)]
    pub args: Vec<Field>,
    #[serde(default)]
    pub throws: Vec<Field>,
    #[serde(default)]
    pub oneway: bool,
}

impl Function {
    pub fn new(name: &str, return_type: Type) -> Self {
        Self {
            name: Identifier::simple(name),
            original_name: name.to_string(),
            return_type,
            args: Vec::new(),
            throws: Vec::new(),
            oneway: false,
        }
    }

    /// The name written on the wire, unaffected by case normalisation.
    pub fn wire_name(&self) -> &str {
        if self.original_name.is_empty() {
            self.name.name()
        } else {
            &self.original_name
        }
    }
}

/// The service a service extends, optionally from an included document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceParent {
    pub name: Identifier,
    #[serde(default)]
    pub prefix: Option<Identifier>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub name: Identifier,
    #[serde(default)]
    pub parent: Option<ServiceParent>,
    #[serde(default)]
    pub functions: Vec<Function>,
}

/// Another document made visible under a local prefix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Include {
    pub prefix: Identifier,
    pub document: Document,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Header {
    Include(Include),
    Namespace { scope: String, id: Identifier },
}

/// A whole parsed IDL file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub headers: Vec<Header>,
    #[serde(default)]
    pub consts: Vec<Const>,
    #[serde(default)]
    pub enums: Vec<Enum>,
    #[serde(default)]
    pub structs: Vec<Struct>,
    #[serde(default)]
    pub services: Vec<Service>,
}

impl Document {
    /// Namespace declared for `scope`, if any.
    pub fn namespace(&self, scope: &str) -> Option<&Identifier> {
        self.headers.iter().find_map(|header| match header {
            Header::Namespace { scope: s, id } if s == scope => Some(id),
            _ => None,
        })
    }

    pub fn includes(&self) -> Vec<&Include> {
        self.headers
            .iter()
            .filter_map(|header| match header {
                Header::Include(include) => Some(include),
                Header::Namespace { .. } => None,
            })
            .collect()
    }

    /// Loads a document tree serialized as JSON by the front end.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| GeneratorError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&content).map_err(|e| GeneratorError::InvalidDocument {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_document() {
        let json = r#"{
            "headers": [{"namespace": {"scope": "scala", "id": "com.example"}}],
            "structs": [{
                "name": "point",
                "fields": [
                    {"id": 1, "name": "x", "field_type": "i32", "requiredness": "required"},
                    {"id": 2, "name": "label", "field_type": "string", "requiredness": "optional"}
                ]
            }]
        }"#;

        let doc: Document = serde_json::from_str(json).unwrap();
        assert_eq!(doc.namespace("scala"), Some(&Identifier::parse("com.example")));
        assert_eq!(doc.namespace("java"), None);
        assert_eq!(doc.structs[0].kind, StructKind::Struct);
        assert_eq!(doc.structs[0].fields[0].wire_name(), "x");
        assert!(doc.structs[0].fields[1].requiredness.is_optional());
    }

    #[test]
    fn test_load_reports_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Document::load(&path).unwrap_err();
        assert!(matches!(err, GeneratorError::InvalidDocument { .. }));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, GeneratorError::Io { .. }));
    }
}
