//! Type-directed mappings: wire tags, protocol methods, type names, defaults.
//!
//! Every function here matches on [`Type`] without a catch-all arm. A new
//! variant must be placed deliberately in each mapping.

use std::collections::HashMap;

use super::constants::ConstantGenerator;
use super::fragment::CodeFragment;
use crate::dialect::{ContainerKind, Dialect, Primitive};
use crate::diagnostic::{GeneratorError, Result};
use crate::ir::{Field, Identifier, Include, Type};

/// Protocol-level type codes used to frame values on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireTag {
    Void,
    Bool,
    Byte,
    Double,
    I16,
    I32,
    I64,
    String,
    Struct,
    Map,
    Set,
    List,
}

impl WireTag {
    pub fn code(self) -> u8 {
        match self {
            WireTag::Void => 1,
            WireTag::Bool => 2,
            WireTag::Byte => 3,
            WireTag::Double => 4,
            WireTag::I16 => 6,
            WireTag::I32 => 8,
            WireTag::I64 => 10,
            WireTag::String => 11,
            WireTag::Struct => 12,
            WireTag::Map => 13,
            WireTag::Set => 14,
            WireTag::List => 15,
        }
    }

    /// Constant name used by generated code (`TType.<NAME>`).
    pub fn name(self) -> &'static str {
        match self {
            WireTag::Void => "VOID",
            WireTag::Bool => "BOOL",
            WireTag::Byte => "BYTE",
            WireTag::Double => "DOUBLE",
            WireTag::I16 => "I16",
            WireTag::I32 => "I32",
            WireTag::I64 => "I64",
            WireTag::String => "STRING",
            WireTag::Struct => "STRUCT",
            WireTag::Map => "MAP",
            WireTag::Set => "SET",
            WireTag::List => "LIST",
        }
    }
}

/// Wire tag for a type. Enums travel as `I32`, binaries as `STRING`.
pub fn wire_tag(t: &Type) -> Result<WireTag> {
    match t {
        Type::Void | Type::OnewayVoid => Ok(WireTag::Void),
        Type::Bool => Ok(WireTag::Bool),
        Type::Byte => Ok(WireTag::Byte),
        Type::Double => Ok(WireTag::Double),
        Type::I16 => Ok(WireTag::I16),
        Type::I32 | Type::Enum(_) => Ok(WireTag::I32),
        Type::I64 => Ok(WireTag::I64),
        Type::String | Type::Binary => Ok(WireTag::String),
        Type::Struct(_) => Ok(WireTag::Struct),
        Type::Map(_, _) => Ok(WireTag::Map),
        Type::Set(_) => Ok(WireTag::Set),
        Type::List(_) => Ok(WireTag::List),
        Type::Reference(_) => Err(GeneratorError::unmapped("wire_tag", t.to_string())),
    }
}

/// Protocol method that reads a value of a primitive wire type.
pub fn read_method(t: &Type) -> Result<CodeFragment> {
    protocol_method(t, "read", "read_method")
}

/// Protocol method that writes a value of a primitive wire type.
pub fn write_method(t: &Type) -> Result<CodeFragment> {
    protocol_method(t, "write", "write_method")
}

fn protocol_method(t: &Type, verb: &str, operation: &'static str) -> Result<CodeFragment> {
    let suffix = match t {
        Type::Bool => "Bool",
        Type::Byte => "Byte",
        Type::I16 => "I16",
        Type::I32 => "I32",
        Type::I64 => "I64",
        Type::Double => "Double",
        Type::String => "String",
        Type::Binary => "Binary",
        Type::Void
        | Type::OnewayVoid
        | Type::Enum(_)
        | Type::Struct(_)
        | Type::List(_)
        | Type::Set(_)
        | Type::Map(_, _)
        | Type::Reference(_) => return Err(GeneratorError::unmapped(operation, t.to_string())),
    };
    Ok(CodeFragment::codify(format!("{}{}", verb, suffix)))
}

/// Whether [`read_method`] and [`write_method`] are defined for `t`.
pub fn has_protocol_method(t: &Type) -> bool {
    match t {
        Type::Bool
        | Type::Byte
        | Type::I16
        | Type::I32
        | Type::I64
        | Type::Double
        | Type::String
        | Type::Binary => true,
        Type::Void
        | Type::OnewayVoid
        | Type::Enum(_)
        | Type::Struct(_)
        | Type::List(_)
        | Type::Set(_)
        | Type::Map(_, _)
        | Type::Reference(_) => false,
    }
}

pub fn is_primitive(t: &Type) -> bool {
    match t {
        Type::Void
        | Type::OnewayVoid
        | Type::Bool
        | Type::Byte
        | Type::I16
        | Type::I32
        | Type::I64
        | Type::Double => true,
        Type::String
        | Type::Binary
        | Type::Enum(_)
        | Type::Struct(_)
        | Type::List(_)
        | Type::Set(_)
        | Type::Map(_, _)
        | Type::Reference(_) => false,
    }
}

/// An optional field is never nullable: its absence is already modelled.
/// Otherwise only fixed-width scalars are non-nullable.
pub fn is_nullable(t: &Type, is_optional: bool) -> bool {
    if is_optional {
        return false;
    }
    match t {
        Type::Bool | Type::Byte | Type::I16 | Type::I32 | Type::I64 | Type::Double => false,
        Type::Void
        | Type::OnewayVoid
        | Type::String
        | Type::Binary
        | Type::Enum(_)
        | Type::Struct(_)
        | Type::List(_)
        | Type::Set(_)
        | Type::Map(_, _)
        | Type::Reference(_) => true,
    }
}

/// Dialect-aware type mapping for one document.
///
/// Knows the document's includes so that types scoped by an include prefix
/// (`shared.Point`) can be qualified the dialect's way.
pub struct TypeMapper<'a> {
    dialect: &'a dyn Dialect,
    /// Include prefix to the included document's namespace.
    scopes: HashMap<String, Identifier>,
}

impl<'a> TypeMapper<'a> {
    pub fn new(dialect: &'a dyn Dialect, includes: &[&Include]) -> Self {
        let scopes = includes
            .iter()
            .map(|include| {
                (
                    include.prefix.full_name(),
                    super::imports::resolve_namespace(&include.document, dialect),
                )
            })
            .collect();
        Self { dialect, scopes }
    }

    pub fn dialect(&self) -> &'a dyn Dialect {
        self.dialect
    }

    /// Renders an identifier, escaping keywords segment by segment.
    pub fn gen_id(&self, id: &Identifier) -> CodeFragment {
        let segments: Vec<String> = id
            .segments()
            .into_iter()
            .map(|segment| self.dialect.quote_keyword(segment))
            .collect();
        CodeFragment::codify(segments.join(self.dialect.scope_separator()))
    }

    /// Renders a reference to a named type, qualifying it when it comes
    /// from an included document.
    pub fn named_type(&self, id: &Identifier) -> CodeFragment {
        let name = self.dialect.quote_keyword(id.name());
        match id.qualifier() {
            Some(prefix) => {
                let prefix = prefix.full_name();
                CodeFragment::codify(self.dialect.qualify_scoped(
                    &prefix,
                    self.scopes.get(&prefix),
                    &name,
                ))
            }
            None => CodeFragment::codify(name),
        }
    }

    /// Target-language type name.
    pub fn type_name(&self, t: &Type, mutable: bool) -> Result<CodeFragment> {
        self.render_type(t, mutable, false)
    }

    /// Type name usable as a generic argument (boxed where the dialect
    /// distinguishes).
    pub fn type_arg(&self, t: &Type, mutable: bool) -> Result<CodeFragment> {
        self.render_type(t, mutable, true)
    }

    fn render_type(&self, t: &Type, mutable: bool, boxed: bool) -> Result<CodeFragment> {
        let primitive = |p: Primitive| -> Result<CodeFragment> {
            Ok(CodeFragment::codify(self.dialect.primitive_name(p, boxed)))
        };
        match t {
            Type::Void | Type::OnewayVoid => primitive(Primitive::Void),
            Type::Bool => primitive(Primitive::Bool),
            Type::Byte => primitive(Primitive::Byte),
            Type::I16 => primitive(Primitive::I16),
            Type::I32 => primitive(Primitive::I32),
            Type::I64 => primitive(Primitive::I64),
            Type::Double => primitive(Primitive::Double),
            Type::String => primitive(Primitive::String),
            Type::Binary => primitive(Primitive::Binary),
            Type::Enum(id) | Type::Struct(id) => Ok(self.named_type(id)),
            Type::List(elem) => self.container(ContainerKind::List, &[elem], mutable),
            Type::Set(elem) => self.container(ContainerKind::Set, &[elem], mutable),
            Type::Map(key, value) => self.container(ContainerKind::Map, &[key, value], mutable),
            Type::Reference(_) => Err(GeneratorError::unmapped("type_name", t.to_string())),
        }
    }

    fn container(&self, kind: ContainerKind, args: &[&Type], mutable: bool) -> Result<CodeFragment> {
        let args = args
            .iter()
            .map(|arg| self.type_arg(arg, mutable).map(CodeFragment::into_string))
            .collect::<Result<Vec<_>>>()?;
        Ok(CodeFragment::codify(
            self.dialect.container_type(kind, &args, mutable),
        ))
    }

    /// Storage type of a field; optional fields are wrapped in the dialect's
    /// option type.
    pub fn field_type_name(&self, field: &Field, mutable: bool) -> Result<CodeFragment> {
        if field.requiredness.is_optional() {
            let inner = self.type_arg(&field.field_type, mutable)?;
            Ok(CodeFragment::codify(self.dialect.option_type(inner.as_str())))
        } else {
            self.type_name(&field.field_type, mutable)
        }
    }

    /// Zero value of a type. Containers get an empty instance, named and
    /// string-like types the dialect's null marker.
    pub fn default_value(&self, t: &Type, mutable: bool) -> Result<CodeFragment> {
        let code = match t {
            Type::Bool => "false".to_string(),
            Type::Byte | Type::I16 | Type::I32 | Type::I64 => "0".to_string(),
            Type::Double => "0.0".to_string(),
            Type::List(_) => self.empty_container(ContainerKind::List, t, mutable)?,
            Type::Set(_) => self.empty_container(ContainerKind::Set, t, mutable)?,
            Type::Map(_, _) => self.empty_container(ContainerKind::Map, t, mutable)?,
            Type::Void
            | Type::OnewayVoid
            | Type::String
            | Type::Binary
            | Type::Enum(_)
            | Type::Struct(_) => self.dialect.null_marker().to_string(),
            Type::Reference(_) => {
                return Err(GeneratorError::unmapped("default_value", t.to_string()))
            }
        };
        Ok(CodeFragment::codify(code))
    }

    fn empty_container(&self, kind: ContainerKind, t: &Type, mutable: bool) -> Result<String> {
        let type_name = self.type_name(t, mutable)?;
        Ok(self.dialect.empty_container(kind, type_name.as_str(), mutable))
    }

    /// Default a field is initialised with, or `None` when it has none.
    ///
    /// Optional fields never get one. An explicit default wins; failing that
    /// only container types get a synthesized (empty) default. Scalars
    /// without an explicit default stay without one.
    pub fn default_field_value(&self, field: &Field) -> Result<Option<CodeFragment>> {
        if field.requiredness.is_optional() {
            return Ok(None);
        }
        if let Some(value) = &field.default {
            return Ok(Some(ConstantGenerator::new(self).render(value, false)));
        }
        if field.field_type.is_container() {
            return self.default_value(&field.field_type, false).map(Some);
        }
        Ok(None)
    }

    /// Value a reader starts from before the field is seen on the wire.
    pub fn default_read_value(&self, field: &Field) -> Result<CodeFragment> {
        self.default_value(&field.field_type, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::java::JavaDialect;
    use crate::dialect::scala::ScalaDialect;
    use crate::ir::{Document, Header, Requiredness, Value};

    fn all_types() -> Vec<Type> {
        vec![
            Type::Void,
            Type::OnewayVoid,
            Type::Bool,
            Type::Byte,
            Type::I16,
            Type::I32,
            Type::I64,
            Type::Double,
            Type::String,
            Type::Binary,
            Type::Enum(Identifier::simple("Color")),
            Type::Struct(Identifier::simple("Point")),
            Type::list(Type::I32),
            Type::set(Type::String),
            Type::map(Type::String, Type::I64),
        ]
    }

    #[test]
    fn test_wire_tags() {
        assert_eq!(wire_tag(&Type::Enum(Identifier::simple("Color"))).unwrap(), WireTag::I32);
        assert_eq!(wire_tag(&Type::Binary).unwrap(), WireTag::String);
        assert_eq!(wire_tag(&Type::list(Type::I32)).unwrap().code(), 15);
        assert_eq!(wire_tag(&Type::Struct(Identifier::simple("P"))).unwrap().name(), "STRUCT");
    }

    #[test]
    fn test_wire_tag_rejects_unresolved_reference() {
        let err = wire_tag(&Type::Reference(Identifier::simple("Mystery"))).unwrap_err();
        assert!(matches!(
            err,
            GeneratorError::InternalConsistency { operation: "wire_tag", .. }
        ));
    }

    #[test]
    fn test_protocol_methods_only_for_primitives() {
        assert_eq!(read_method(&Type::I32).unwrap().as_str(), "readI32");
        assert_eq!(write_method(&Type::Binary).unwrap().as_str(), "writeBinary");
        for t in [Type::list(Type::I32), Type::Struct(Identifier::simple("P")), Type::Void] {
            assert!(read_method(&t).is_err());
            assert!(write_method(&t).is_err());
            assert!(!has_protocol_method(&t));
        }
    }

    #[test]
    fn test_is_primitive() {
        assert!(is_primitive(&Type::Void));
        assert!(is_primitive(&Type::Double));
        assert!(!is_primitive(&Type::String));
        assert!(!is_primitive(&Type::list(Type::I32)));
    }

    #[test]
    fn test_is_nullable() {
        let fixed = [Type::Bool, Type::Byte, Type::I16, Type::I32, Type::I64, Type::Double];
        for t in all_types() {
            assert!(!is_nullable(&t, true), "{} optional", t);
            assert_eq!(is_nullable(&t, false), !fixed.contains(&t), "{}", t);
        }
    }

    #[test]
    fn test_scalar_defaults_ignore_mutability() {
        let mapper = TypeMapper::new(&ScalaDialect, &[]);
        for mutable in [false, true] {
            assert_eq!(mapper.default_value(&Type::Bool, mutable).unwrap().as_str(), "false");
            for t in [Type::Byte, Type::I16, Type::I32, Type::I64] {
                assert_eq!(mapper.default_value(&t, mutable).unwrap().as_str(), "0");
            }
            assert_eq!(mapper.default_value(&Type::Double, mutable).unwrap().as_str(), "0.0");
            assert_eq!(mapper.default_value(&Type::String, mutable).unwrap().as_str(), "null");
        }
    }

    #[test]
    fn test_container_defaults() {
        let scala = TypeMapper::new(&ScalaDialect, &[]);
        let list = Type::list(Type::I32);
        assert_eq!(scala.default_value(&list, false).unwrap().as_str(), "Seq[Int]()");
        assert_eq!(scala.default_value(&list, true).unwrap().as_str(), "mutable.Buffer[Int]()");

        let java = TypeMapper::new(&JavaDialect, &[]);
        assert_eq!(java.default_value(&list, false).unwrap().as_str(), "List.of()");
    }

    #[test]
    fn test_type_names() {
        let scala = TypeMapper::new(&ScalaDialect, &[]);
        let t = Type::map(Type::String, Type::list(Type::I64));
        assert_eq!(scala.type_name(&t, false).unwrap().as_str(), "Map[String, Seq[Long]]");

        let java = TypeMapper::new(&JavaDialect, &[]);
        assert_eq!(java.type_name(&t, false).unwrap().as_str(), "Map<String, List<Long>>");
        assert_eq!(java.type_name(&Type::I32, false).unwrap().as_str(), "int");
        assert!(java.type_name(&Type::Reference(Identifier::simple("X")), false).is_err());
    }

    #[test]
    fn test_optional_field_type() {
        let java = TypeMapper::new(&JavaDialect, &[]);
        let field = Field::new(1, "count", Type::I32, Requiredness::Optional);
        assert_eq!(java.field_type_name(&field, false).unwrap().as_str(), "Optional<Integer>");
    }

    #[test]
    fn test_scoped_named_types() {
        let included = Document {
            headers: vec![Header::Namespace {
                scope: "java".into(),
                id: Identifier::parse("com.shared"),
            }],
            ..Document::default()
        };
        let include = Include {
            prefix: Identifier::simple("shared"),
            document: included,
        };
        let t = Type::Struct(Identifier::parse("shared.Point"));

        let scala = TypeMapper::new(&ScalaDialect, &[&include]);
        assert_eq!(scala.type_name(&t, false).unwrap().as_str(), "_shared_.Point");

        let java = TypeMapper::new(&JavaDialect, &[&include]);
        assert_eq!(java.type_name(&t, false).unwrap().as_str(), "com.shared.Point");
    }

    #[test]
    fn test_default_field_value() {
        let mapper = TypeMapper::new(&ScalaDialect, &[]);

        let optional = Field::new(1, "label", Type::String, Requiredness::Optional);
        assert_eq!(mapper.default_field_value(&optional).unwrap(), None);

        let optional_with_default = Field::new(1, "label", Type::String, Requiredness::Optional)
            .with_default(Value::string("x"));
        assert_eq!(mapper.default_field_value(&optional_with_default).unwrap(), None);

        let list = Field::new(2, "ids", Type::list(Type::I32), Requiredness::Required);
        assert_eq!(
            mapper.default_field_value(&list).unwrap().unwrap().as_str(),
            "Seq[Int]()"
        );

        let scalar = Field::new(3, "count", Type::I32, Requiredness::Required);
        assert_eq!(mapper.default_field_value(&scalar).unwrap(), None);

        let explicit = Field::new(4, "count", Type::I32, Requiredness::Default)
            .with_default(Value::Int(7));
        assert_eq!(mapper.default_field_value(&explicit).unwrap().unwrap().as_str(), "7");
    }

    #[test]
    fn test_gen_id_escapes_each_segment() {
        let mapper = TypeMapper::new(&ScalaDialect, &[]);
        assert_eq!(mapper.gen_id(&Identifier::parse("pkg.type.Foo")).as_str(), "pkg.`type`.Foo");
    }
}
