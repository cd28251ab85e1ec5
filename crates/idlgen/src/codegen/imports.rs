//! Namespaces and import tables.

use super::dictionary::Dictionary;
use super::fragment::CodeFragment;
use super::types::TypeMapper;
use crate::dialect::Dialect;
use crate::ir::{Document, Identifier, Include};

/// Package marker for an unqualified namespace.
const ROOT_PACKAGE: &str = "_root_";

/// The package a document generates into: the first namespace declared for
/// one of the dialect's scopes, or the dialect default.
pub fn resolve_namespace(doc: &Document, dialect: &dyn Dialect) -> Identifier {
    dialect
        .namespace_scopes()
        .iter()
        .find_map(|scope| doc.namespace(scope))
        .cloned()
        .unwrap_or_else(|| Identifier::parse(dialect.default_namespace()))
}

/// One import entry per include.
///
/// The alias wraps the include prefix in underscores (`shared` imports as
/// `_shared_`), which keeps it apart from any name declared in the document.
pub fn imports_dicts(includes: &[&Include], mapper: &TypeMapper) -> Vec<Dictionary> {
    includes
        .iter()
        .map(|include| {
            let namespace = resolve_namespace(&include.document, mapper.dialect());
            let (parent, sub) = match namespace.qualifier() {
                Some(qualifier) => (mapper.gen_id(&qualifier), mapper.gen_id(&namespace.leaf())),
                None => (CodeFragment::codify(ROOT_PACKAGE), mapper.gen_id(&namespace)),
            };
            Dictionary::new()
                .with("parent_package", parent)
                .with("sub_package", sub)
                .with("namespace", mapper.gen_id(&namespace))
                .with("alias", mapper.gen_id(&include.prefix.prepend("_").append("_")))
        })
        .collect()
}
