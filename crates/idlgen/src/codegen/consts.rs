//! Dictionary for the constants file.

use super::constants::ConstantGenerator;
use super::dictionary::{mark_ends, Dictionary};
use super::imports::imports_dicts;
use super::types::TypeMapper;
use crate::diagnostic::Result;
use crate::ir::{Const, Identifier, Include};

/// Builds the `consts` dictionary: every constant of the document, in
/// declaration order. Values may name enums of included documents, so the
/// file carries the same imports as any other.
pub fn consts_dict(
    namespace: &Identifier,
    consts: &[Const],
    includes: &[&Include],
    mapper: &TypeMapper,
) -> Result<Dictionary> {
    let generator = ConstantGenerator::new(mapper);

    let constants = consts
        .iter()
        .map(|c| {
            Ok(Dictionary::new()
                .with("name", mapper.gen_id(&c.name))
                .with("field_type", mapper.type_name(&c.field_type, false)?)
                .with("value", generator.render(&c.value, false)))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Dictionary::new()
        .with("package", mapper.gen_id(namespace))
        .with("imports", imports_dicts(includes, mapper))
        .with("constants", mark_ends(constants)))
}
