//! Casing normalisation of a whole document.
//!
//! Runs once, before any dictionary is built; everything downstream works on
//! the names produced here.

use crate::dialect::CasingPolicy;
use crate::ir::{
    Const, Document, Enum, EnumField, Field, Function, Header, Include, Service, ServiceParent,
    Struct, Type, Value,
};

/// Returns a copy of `doc` with every identifier re-cased by `policy`.
pub fn normalize_document<P: CasingPolicy + ?Sized>(doc: &Document, policy: &P) -> Document {
    Document {
        headers: doc
            .headers
            .iter()
            .map(|header| match header {
                Header::Include(include) => Header::Include(Include {
                    prefix: include.prefix.clone(),
                    document: normalize_document(&include.document, policy),
                }),
                Header::Namespace { scope, id } => Header::Namespace {
                    scope: scope.clone(),
                    id: id.clone(),
                },
            })
            .collect(),
        consts: doc
            .consts
            .iter()
            .map(|c| Const {
                name: policy.const_name(&c.name),
                field_type: normalize_type(&c.field_type, policy),
                value: normalize_value(&c.value, policy),
            })
            .collect(),
        enums: doc
            .enums
            .iter()
            .map(|e| Enum {
                name: policy.type_name(&e.name),
                values: e
                    .values
                    .iter()
                    .map(|v| EnumField {
                        name: policy.enum_member(&v.name),
                        original_name: v.declared_name().to_string(),
                        value: v.value,
                    })
                    .collect(),
            })
            .collect(),
        structs: doc
            .structs
            .iter()
            .map(|s| Struct {
                name: policy.type_name(&s.name),
                kind: s.kind,
                fields: normalize_fields(&s.fields, policy),
            })
            .collect(),
        services: doc.services.iter().map(|s| normalize_service(s, policy)).collect(),
    }
}

fn normalize_service<P: CasingPolicy + ?Sized>(service: &Service, policy: &P) -> Service {
    Service {
        name: policy.type_name(&service.name),
        parent: service.parent.as_ref().map(|parent| ServiceParent {
            name: policy.type_name(&parent.name),
            prefix: parent.prefix.clone(),
        }),
        functions: service
            .functions
            .iter()
            .map(|f| Function {
                name: policy.function_name(&f.name),
                original_name: f.wire_name().to_string(),
                return_type: normalize_type(&f.return_type, policy),
                args: normalize_fields(&f.args, policy),
                throws: normalize_fields(&f.throws, policy),
                oneway: f.oneway,
            })
            .collect(),
    }
}

fn normalize_fields<P: CasingPolicy + ?Sized>(fields: &[Field], policy: &P) -> Vec<Field> {
    fields
        .iter()
        .map(|f| Field {
            id: f.id,
            name: policy.field_name(&f.name),
            original_name: f.wire_name().to_string(),
            field_type: normalize_type(&f.field_type, policy),
            requiredness: f.requiredness,
            default: f.default.as_ref().map(|v| normalize_value(v, policy)),
        })
        .collect()
}

fn normalize_type<P: CasingPolicy + ?Sized>(t: &Type, policy: &P) -> Type {
    match t {
        Type::Enum(id) => Type::Enum(policy.type_name(id)),
        Type::Struct(id) => Type::Struct(policy.type_name(id)),
        Type::Reference(id) => Type::Reference(policy.type_name(id)),
        Type::List(elem) => Type::list(normalize_type(elem, policy)),
        Type::Set(elem) => Type::set(normalize_type(elem, policy)),
        Type::Map(key, value) => Type::map(normalize_type(key, policy), normalize_type(value, policy)),
        Type::Void
        | Type::OnewayVoid
        | Type::Bool
        | Type::Byte
        | Type::I16
        | Type::I32
        | Type::I64
        | Type::Double
        | Type::String
        | Type::Binary => t.clone(),
    }
}

fn normalize_value<P: CasingPolicy + ?Sized>(value: &Value, policy: &P) -> Value {
    match value {
        Value::Enum { enum_name, member } => Value::Enum {
            enum_name: policy.type_name(enum_name),
            member: policy.enum_member(member),
        },
        Value::List(elems) => Value::List(elems.iter().map(|v| normalize_value(v, policy)).collect()),
        Value::Set(elems) => Value::Set(elems.iter().map(|v| normalize_value(v, policy)).collect()),
        Value::Map(entries) => Value::Map(
            entries
                .iter()
                .map(|(k, v)| (normalize_value(k, policy), normalize_value(v, policy)))
                .collect(),
        ),
        Value::Null
        | Value::String(_)
        | Value::Double(_)
        | Value::Int(_)
        | Value::Bool(_)
        | Value::Id(_) => value.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialect::java::JavaDialect;
    use crate::dialect::scala::ScalaDialect;
    use crate::ir::{Identifier, Requiredness};

    fn sample() -> Document {
        Document {
            enums: vec![Enum {
                name: Identifier::simple("traffic_light"),
                values: vec![EnumField::new("dark_red", 1)],
            }],
            structs: vec![Struct {
                name: Identifier::simple("user_profile"),
                kind: Default::default(),
                fields: vec![Field::new(
                    1,
                    "user_name",
                    Type::list(Type::Struct(Identifier::simple("name_part"))),
                    Requiredness::Required,
                )
                .with_default(Value::enum_ref("traffic_light", "dark_red"))],
            }],
            services: vec![Service {
                name: Identifier::simple("user_service"),
                parent: None,
                functions: vec![Function::new("get_user", Type::Void)],
            }],
            ..Document::default()
        }
    }

    #[test]
    fn test_scala_casing() {
        let doc = normalize_document(&sample(), &ScalaDialect);
        assert_eq!(doc.enums[0].name.name(), "TrafficLight");
        assert_eq!(doc.enums[0].values[0].name.name(), "DarkRed");

        let field = &doc.structs[0].fields[0];
        assert_eq!(doc.structs[0].name.name(), "UserProfile");
        assert_eq!(field.name.name(), "userName");
        assert_eq!(field.wire_name(), "user_name");
        assert_eq!(
            field.field_type,
            Type::list(Type::Struct(Identifier::simple("NamePart")))
        );
        assert_eq!(field.default, Some(Value::enum_ref("TrafficLight", "DarkRed")));
    }

    #[test]
    fn test_declared_names_survive_casing() {
        let doc = normalize_document(&sample(), &ScalaDialect);
        let member = &doc.enums[0].values[0];
        assert_eq!(member.name.name(), "DarkRed");
        assert_eq!(member.declared_name(), "dark_red");

        let function = &doc.services[0].functions[0];
        assert_eq!(function.name.name(), "getUser");
        assert_eq!(function.wire_name(), "get_user");
    }

    #[test]
    fn test_java_enum_members_upper_case() {
        let doc = normalize_document(&sample(), &JavaDialect);
        assert_eq!(doc.enums[0].values[0].name.name(), "DARK_RED");
    }

    #[test]
    fn test_input_is_untouched() {
        let original = sample();
        let _ = normalize_document(&original, &ScalaDialect);
        assert_eq!(original, sample());
    }
}
