//! Dictionaries for struct, union and exception files.

use std::collections::BTreeSet;

use super::dictionary::{mark_ends, Dictionary};
use super::fragment::{quote, CodeFragment};
use super::imports::imports_dicts;
use super::types::{self, TypeMapper};
use crate::config::ServiceOption;
use crate::diagnostic::Result;
use crate::ir::{Field, Identifier, Include, Struct, StructKind, Type};

/// Full dictionary for a struct file: the struct body plus package,
/// imports and option flags.
pub fn struct_dict(
    s: &Struct,
    namespace: &Identifier,
    includes: &[&Include],
    options: &BTreeSet<ServiceOption>,
    mapper: &TypeMapper,
) -> Result<Dictionary> {
    let mut dict = struct_body(s, mapper)?;
    dict.insert("package", mapper.gen_id(namespace))
        .insert("imports", imports_dicts(includes, mapper));
    dict.extend(option_flags(options));
    Ok(dict)
}

/// Everything about a struct that does not depend on the file it lives in.
/// Also used for the synthesized argument and result structs of services.
pub fn struct_body(s: &Struct, mapper: &TypeMapper) -> Result<Dictionary> {
    let fields = s
        .fields
        .iter()
        .enumerate()
        .map(|(index, field)| field_dict(index, field, mapper))
        .collect::<Result<Vec<_>>>()?;

    Ok(Dictionary::new()
        .with("StructName", mapper.gen_id(&s.name))
        .with("struct_name_for_wire", quote(s.name.name()))
        .with("is_union", s.kind == StructKind::Union)
        .with("is_exception", s.kind == StructKind::Exception)
        .with("has_fields", !fields.is_empty())
        .with("fields", mark_ends(fields)))
}

fn field_dict(index: usize, field: &Field, mapper: &TypeMapper) -> Result<Dictionary> {
    let t = &field.field_type;
    let optional = field.requiredness.is_optional();
    let tag = types::wire_tag(t)?;

    let mut dict = Dictionary::new()
        .with("id", CodeFragment::codify(field.id.to_string()))
        .with("index", CodeFragment::codify(index.to_string()))
        .with("field_name", mapper.gen_id(&field.name))
        .with("FieldName", mapper.gen_id(&field.name.to_title_case()))
        .with("getter", mapper.gen_id(&field.name.to_title_case().prepend("get")))
        .with("field_name_for_wire", quote(field.wire_name()))
        .with("field_const", mapper.gen_id(&field_const(&field.name)))
        .with("wire_tag", CodeFragment::codify(tag.name()))
        .with("wire_tag_code", CodeFragment::codify(tag.code().to_string()))
        .with("field_type", mapper.field_type_name(field, false)?)
        .with("primitive_field_type", mapper.type_name(t, false)?)
        .with("boxed_field_type", mapper.type_arg(t, false)?)
        .with("is_primitive", types::is_primitive(t))
        .with("is_enum", matches!(t, Type::Enum(_)))
        .with("is_struct", matches!(t, Type::Struct(_)))
        .with("is_container", t.is_container())
        .with("required", field.requiredness.is_required())
        .with("optional", optional)
        .with("nullable", types::is_nullable(t, optional))
        .with("default_read_value", mapper.default_read_value(field)?);

    match mapper.default_field_value(field)? {
        Some(value) => {
            dict.insert("has_default_value", true).insert("default_value", value);
        }
        None => {
            dict.insert("has_default_value", false);
        }
    }

    if types::has_protocol_method(t) {
        dict.insert("read_method", types::read_method(t)?)
            .insert("write_method", types::write_method(t)?);
    }

    Ok(dict)
}

/// `userName` becomes `USER_NAME_FIELD`.
fn field_const(name: &Identifier) -> Identifier {
    name.leaf().to_upper_case().append("_FIELD")
}

pub(crate) fn option_flags(options: &BTreeSet<ServiceOption>) -> Dictionary {
    let mut dict = Dictionary::new();
    for option in ServiceOption::ALL {
        dict.insert(option.flag_name(), options.contains(&option));
    }
    dict
}
