//! Dictionary for one enum file.

use super::dictionary::{mark_ends, Dictionary};
use super::fragment::{quote, CodeFragment};
use super::types::TypeMapper;
use crate::ir::{Enum, Identifier};

pub fn enum_dict(namespace: &Identifier, e: &Enum, mapper: &TypeMapper) -> Dictionary {
    let values = e
        .values
        .iter()
        .map(|v| {
            Dictionary::new()
                .with("name", mapper.gen_id(&v.name))
                .with("original_name", quote(v.declared_name()))
                .with("value", CodeFragment::codify(v.value.to_string()))
        })
        .collect();

    Dictionary::new()
        .with("package", mapper.gen_id(namespace))
        .with("EnumName", mapper.gen_id(&e.name))
        .with("values", mark_ends(values))
}
