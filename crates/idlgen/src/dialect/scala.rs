//! Scala output: immutable collections by default, backtick-escaped keywords.

use once_cell::sync::OnceCell;

use super::{CasingPolicy, ContainerKind, Dialect, KeywordEscaper, MutabilityRenderer, Primitive};
use crate::diagnostic::Result;
use crate::ir::Identifier;
use crate::template::TemplateSet;

/// Templates embedded at compile time from `templates/scala/`.
const SOURCES: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/scala/header.mustache")),
    ("consts", include_str!("../../templates/scala/consts.mustache")),
    ("enum", include_str!("../../templates/scala/enum.mustache")),
    ("struct", include_str!("../../templates/scala/struct.mustache")),
    ("struct_body", include_str!("../../templates/scala/struct_body.mustache")),
    ("union", include_str!("../../templates/scala/union.mustache")),
    ("service", include_str!("../../templates/scala/service.mustache")),
    ("imports", include_str!("../../templates/scala/imports.mustache")),
    ("field_codec", include_str!("../../templates/scala/field_codec.mustache")),
    ("field_write", include_str!("../../templates/scala/field_write.mustache")),
];

static TEMPLATES: OnceCell<TemplateSet> = OnceCell::new();

const KEYWORDS: &[&str] = &[
    "abstract", "case", "catch", "class", "def", "do", "else", "extends", "false", "final",
    "finally", "for", "forSome", "if", "implicit", "import", "lazy", "match", "new", "null",
    "object", "override", "package", "private", "protected", "return", "sealed", "super",
    "this", "throw", "trait", "true", "try", "type", "val", "var", "while", "with", "yield",
];

pub struct ScalaDialect;

impl CasingPolicy for ScalaDialect {
    fn enum_member(&self, id: &Identifier) -> Identifier {
        id.to_title_case()
    }
}

impl KeywordEscaper for ScalaDialect {
    fn is_keyword(&self, name: &str) -> bool {
        KEYWORDS.contains(&name)
    }

    fn escape(&self, name: &str) -> String {
        format!("`{}`", name)
    }
}

impl MutabilityRenderer for ScalaDialect {
    fn container_type(&self, kind: ContainerKind, args: &[String], mutable: bool) -> String {
        let base = match (kind, mutable) {
            (ContainerKind::List, false) => "Seq",
            (ContainerKind::List, true) => "mutable.Buffer",
            (ContainerKind::Set, false) => "Set",
            (ContainerKind::Set, true) => "mutable.Set",
            (ContainerKind::Map, false) => "Map",
            (ContainerKind::Map, true) => "mutable.Map",
        };
        format!("{}[{}]", base, args.join(", "))
    }

    fn sequence_literal(&self, kind: ContainerKind, elems: &[String], mutable: bool) -> String {
        let constructor = match (kind, mutable) {
            (ContainerKind::Set, false) => "Set",
            (ContainerKind::Set, true) => "mutable.Set",
            (_, false) => "Seq",
            (_, true) => "mutable.Buffer",
        };
        format!("{}({})", constructor, elems.join(", "))
    }

    fn map_literal(&self, entries: &[(String, String)], mutable: bool) -> String {
        let pairs: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("{} -> {}", key, value))
            .collect();
        let constructor = if mutable { "mutable.Map" } else { "Map" };
        format!("{}({})", constructor, pairs.join(", "))
    }

    fn empty_container(&self, _kind: ContainerKind, type_name: &str, _mutable: bool) -> String {
        format!("{}()", type_name)
    }
}

impl Dialect for ScalaDialect {
    fn name(&self) -> &'static str {
        "scala"
    }

    fn file_extension(&self) -> &'static str {
        ".scala"
    }

    fn namespace_scopes(&self) -> &'static [&'static str] {
        &["scala", "java", "*"]
    }

    fn primitive_name(&self, primitive: Primitive, _boxed: bool) -> &'static str {
        match primitive {
            Primitive::Void => "Unit",
            Primitive::Bool => "Boolean",
            Primitive::Byte => "Byte",
            Primitive::I16 => "Short",
            Primitive::I32 => "Int",
            Primitive::I64 => "Long",
            Primitive::Double => "Double",
            Primitive::String => "String",
            Primitive::Binary => "ByteBuffer",
        }
    }

    fn option_type(&self, inner: &str) -> String {
        format!("Option[{}]", inner)
    }

    /// Included documents are imported under their `_prefix_` alias.
    fn qualify_scoped(&self, prefix: &str, _namespace: Option<&Identifier>, name: &str) -> String {
        format!("_{}_.{}", prefix, name)
    }

    fn templates(&self) -> Result<&'static TemplateSet> {
        TEMPLATES.get_or_try_init(|| TemplateSet::load(self.name(), SOURCES))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keywords_are_backticked() {
        assert_eq!(ScalaDialect.quote_keyword("type"), "`type`");
        assert_eq!(ScalaDialect.quote_keyword("name"), "name");
    }

    #[test]
    fn test_container_types() {
        let args = vec!["Int".to_string()];
        assert_eq!(ScalaDialect.container_type(ContainerKind::List, &args, false), "Seq[Int]");
        assert_eq!(
            ScalaDialect.container_type(ContainerKind::List, &args, true),
            "mutable.Buffer[Int]"
        );
    }

    #[test]
    fn test_templates_load() {
        let templates = ScalaDialect.templates().unwrap();
        for name in ["header", "consts", "enum", "struct", "union", "service"] {
            assert!(templates.contains(name), "missing template {}", name);
        }
    }
}
