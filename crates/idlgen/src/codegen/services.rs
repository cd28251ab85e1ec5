//! Dictionary for one service file.
//!
//! Besides the functions themselves, a service file carries one argument
//! struct per function and one result struct per two-way function. Those
//! are synthesized here as ordinary [`Struct`]s and rendered with the same
//! body builder as declared structs.

use std::collections::BTreeSet;

use super::dictionary::{mark_ends, Dictionary};
use super::fragment::{quote, CodeFragment};
use super::imports::imports_dicts;
use super::structs::{option_flags, struct_body};
use super::types::TypeMapper;
use crate::config::ServiceOption;
use crate::diagnostic::Result;
use crate::ir::{Field, Function, Identifier, Include, Requiredness, Service, Struct, StructKind};

/// Id of the return value in a result struct.
const SUCCESS_FIELD_ID: i16 = 0;

pub fn service_dict(
    service: &Service,
    namespace: &Identifier,
    includes: &[&Include],
    options: &BTreeSet<ServiceOption>,
    mapper: &TypeMapper,
) -> Result<Dictionary> {
    let functions = service
        .functions
        .iter()
        .map(|f| function_dict(f, mapper))
        .collect::<Result<Vec<_>>>()?;

    let mut function_structs = Vec::new();
    for function in &service.functions {
        function_structs.push(struct_body(&args_struct(function), mapper)?);
        if let Some(result) = result_struct(function) {
            function_structs.push(struct_body(&result, mapper)?);
        }
    }

    let mut dict = Dictionary::new()
        .with("package", mapper.gen_id(namespace))
        .with("ServiceName", mapper.gen_id(&service.name))
        .with("imports", imports_dicts(includes, mapper))
        .with("has_functions", !functions.is_empty())
        .with("functions", mark_ends(functions))
        .with("function_structs", mark_ends(function_structs));

    if let Some(parent) = &service.parent {
        let name = match &parent.prefix {
            Some(prefix) => Identifier::Qualified(vec![prefix.full_name(), parent.name.name().to_string()]),
            None => parent.name.clone(),
        };
        dict.insert("parent", Dictionary::new().with("name", mapper.named_type(&name)));
    }

    dict.extend(option_flags(options));
    Ok(dict)
}

fn function_dict(function: &Function, mapper: &TypeMapper) -> Result<Dictionary> {
    let title = function.name.to_title_case();

    let args = function
        .args
        .iter()
        .map(|arg| param_dict(arg, mapper))
        .collect::<Result<Vec<_>>>()?;
    let throws = function
        .throws
        .iter()
        .map(|ex| param_dict(ex, mapper))
        .collect::<Result<Vec<_>>>()?;

    let arg_names: Vec<CodeFragment> =
        function.args.iter().map(|arg| mapper.gen_id(&arg.name)).collect();

    Ok(Dictionary::new()
        .with("name", mapper.gen_id(&function.name))
        .with("name_for_wire", quote(function.wire_name()))
        .with("FunctionName", mapper.gen_id(&title))
        .with("return_type", mapper.type_name(&function.return_type, false)?)
        .with("return_type_arg", mapper.type_arg(&function.return_type, false)?)
        .with("is_void", function.return_type.is_void())
        .with("is_oneway", function.oneway)
        .with("has_args", !args.is_empty())
        .with("args", mark_ends(args))
        .with("arg_names", CodeFragment::join(&arg_names, ", "))
        .with("args_struct", mapper.gen_id(&args_struct_name(function)))
        .with("result_struct", mapper.gen_id(&result_struct_name(function)))
        .with("has_throws", !throws.is_empty())
        .with("throws", mark_ends(throws)))
}

fn param_dict(field: &Field, mapper: &TypeMapper) -> Result<Dictionary> {
    Ok(Dictionary::new()
        .with("id", CodeFragment::codify(field.id.to_string()))
        .with("field_name", mapper.gen_id(&field.name))
        .with("FieldName", mapper.gen_id(&field.name.to_title_case()))
        .with("getter", mapper.gen_id(&field.name.to_title_case().prepend("get")))
        .with("field_type", mapper.field_type_name(field, false)?))
}

fn args_struct_name(function: &Function) -> Identifier {
    function.name.leaf().to_title_case().append("Args")
}

fn result_struct_name(function: &Function) -> Identifier {
    function.name.leaf().to_title_case().append("Result")
}

fn args_struct(function: &Function) -> Struct {
    Struct {
        name: args_struct_name(function),
        kind: StructKind::Struct,
        fields: function.args.clone(),
    }
}

/// Oneway functions have no result struct. Otherwise the result holds the
/// return value (unless void) and every declared exception, all optional.
fn result_struct(function: &Function) -> Option<Struct> {
    if function.oneway {
        return None;
    }

    let mut fields = Vec::with_capacity(function.throws.len() + 1);
    if !function.return_type.is_void() {
        fields.push(Field::new(
            SUCCESS_FIELD_ID,
            "success",
            function.return_type.clone(),
            Requiredness::Optional,
        ));
    }
    fields.extend(function.throws.iter().map(|ex| Field {
        requiredness: Requiredness::Optional,
        default: None,
        ..ex.clone()
    }));

    Some(Struct {
        name: result_struct_name(function),
        kind: StructKind::Struct,
        fields,
    })
}
