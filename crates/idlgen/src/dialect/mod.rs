//! Output dialects.
//!
//! The generator core never asks which dialect it is running for. Everything
//! that differs between targets (naming conventions, keyword escaping,
//! container idioms, type names) comes through the capability traits below,
//! which each dialect implements once.
//!
//! ```text
//! CasingPolicy ─────────┐
//! KeywordEscaper ───────┼──▶ Dialect ──▶ TypeMapper / ConstantGenerator / builders
//! MutabilityRenderer ───┘
//! ```

pub mod java;
pub mod scala;

use crate::diagnostic::{GeneratorError, Result};
use crate::ir::Identifier;
use crate::template::TemplateSet;

/// How identifiers are re-cased before generation.
pub trait CasingPolicy {
    /// Struct, enum, service and union names.
    fn type_name(&self, id: &Identifier) -> Identifier {
        id.to_title_case()
    }

    fn field_name(&self, id: &Identifier) -> Identifier {
        id.to_camel_case()
    }

    fn function_name(&self, id: &Identifier) -> Identifier {
        id.to_camel_case()
    }

    fn enum_member(&self, id: &Identifier) -> Identifier;

    fn const_name(&self, id: &Identifier) -> Identifier {
        id.clone()
    }
}

/// Makes reserved words usable as identifiers.
pub trait KeywordEscaper {
    fn is_keyword(&self, name: &str) -> bool;

    /// Escapes a name already known to be a keyword.
    fn escape(&self, name: &str) -> String;

    fn quote_keyword(&self, name: &str) -> String {
        if self.is_keyword(name) {
            self.escape(name)
        } else {
            name.to_string()
        }
    }
}

/// The three container shapes a type or literal can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    List,
    Set,
    Map,
}

/// Container types and literals, in mutable and immutable flavours.
pub trait MutabilityRenderer {
    /// Type name of a container. `args` holds one element type, or the key
    /// and value types for maps.
    fn container_type(&self, kind: ContainerKind, args: &[String], mutable: bool) -> String;

    /// A list or set literal built from already rendered elements.
    fn sequence_literal(&self, kind: ContainerKind, elems: &[String], mutable: bool) -> String;

    /// A map literal built from already rendered key/value pairs.
    fn map_literal(&self, entries: &[(String, String)], mutable: bool) -> String;

    /// An expression for an empty container whose type name is `type_name`.
    fn empty_container(&self, kind: ContainerKind, type_name: &str, mutable: bool) -> String;
}

/// Scalar types with a fixed spelling in every dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Void,
    Bool,
    Byte,
    I16,
    I32,
    I64,
    Double,
    String,
    Binary,
}

/// A complete output target.
pub trait Dialect: CasingPolicy + KeywordEscaper + MutabilityRenderer + Send + Sync {
    /// Name used for template lookup and namespace resolution.
    fn name(&self) -> &'static str;

    /// File extension including the dot.
    fn file_extension(&self) -> &'static str;

    /// Namespace scopes consulted in order when resolving a document's package.
    fn namespace_scopes(&self) -> &'static [&'static str];

    fn default_namespace(&self) -> &'static str {
        "thrift"
    }

    fn scope_separator(&self) -> &'static str {
        "."
    }

    fn null_marker(&self) -> &'static str {
        "null"
    }

    /// Spelling of a primitive. `boxed` asks for the form usable as a
    /// generic argument.
    fn primitive_name(&self, primitive: Primitive, boxed: bool) -> &'static str;

    /// Type of a field whose absence is meaningful.
    fn option_type(&self, inner: &str) -> String;

    /// Reference to `name` declared in the document included under `prefix`,
    /// whose namespace is `namespace` when it is known.
    fn qualify_scoped(&self, prefix: &str, namespace: Option<&Identifier>, name: &str) -> String;

    /// Templates for this dialect, loaded once per process.
    fn templates(&self) -> Result<&'static TemplateSet>;
}

/// Looks up a dialect by name.
pub fn create_dialect(name: &str) -> Result<Box<dyn Dialect>> {
    match name {
        "scala" => Ok(Box::new(scala::ScalaDialect)),
        "java" => Ok(Box::new(java::JavaDialect)),
        _ => Err(GeneratorError::UnsupportedDialect {
            dialect: name.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dialect() {
        assert_eq!(create_dialect("scala").unwrap().name(), "scala");
        assert_eq!(create_dialect("java").unwrap().name(), "java");
        assert!(matches!(
            create_dialect("cobol"),
            Err(GeneratorError::UnsupportedDialect { dialect }) if dialect == "cobol"
        ));
    }
}
