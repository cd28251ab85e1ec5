//! Java output.

use once_cell::sync::OnceCell;

use super::{CasingPolicy, ContainerKind, Dialect, KeywordEscaper, MutabilityRenderer, Primitive};
use crate::diagnostic::Result;
use crate::ir::Identifier;
use crate::template::TemplateSet;

const SOURCES: &[(&str, &str)] = &[
    ("header", include_str!("../../templates/java/header.mustache")),
    ("consts", include_str!("../../templates/java/consts.mustache")),
    ("enum", include_str!("../../templates/java/enum.mustache")),
    ("struct", include_str!("../../templates/java/struct.mustache")),
    ("struct_body", include_str!("../../templates/java/struct_body.mustache")),
    ("union", include_str!("../../templates/java/union.mustache")),
    ("service", include_str!("../../templates/java/service.mustache")),
    ("imports", include_str!("../../templates/java/imports.mustache")),
    ("fields", include_str!("../../templates/java/fields.mustache")),
    ("field_read", include_str!("../../templates/java/field_read.mustache")),
    ("field_write", include_str!("../../templates/java/field_write.mustache")),
];

static TEMPLATES: OnceCell<TemplateSet> = OnceCell::new();

const KEYWORDS: &[&str] = &[
    "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final",
    "finally", "float", "for", "goto", "if", "implements", "import", "instanceof", "int",
    "interface", "long", "native", "new", "null", "package", "private", "protected", "public",
    "return", "short", "static", "strictfp", "super", "switch", "synchronized", "this",
    "throw", "throws", "transient", "true", "try", "void", "volatile", "while",
];

pub struct JavaDialect;

impl CasingPolicy for JavaDialect {
    fn enum_member(&self, id: &Identifier) -> Identifier {
        id.to_upper_case()
    }
}

impl KeywordEscaper for JavaDialect {
    fn is_keyword(&self, name: &str) -> bool {
        KEYWORDS.contains(&name)
    }

    fn escape(&self, name: &str) -> String {
        format!("{}_", name)
    }
}

impl MutabilityRenderer for JavaDialect {
    fn container_type(&self, kind: ContainerKind, args: &[String], mutable: bool) -> String {
        let base = match (kind, mutable) {
            (ContainerKind::List, false) => "List",
            (ContainerKind::List, true) => "ArrayList",
            (ContainerKind::Set, false) => "Set",
            (ContainerKind::Set, true) => "HashSet",
            (ContainerKind::Map, false) => "Map",
            (ContainerKind::Map, true) => "HashMap",
        };
        format!("{}<{}>", base, args.join(", "))
    }

    fn sequence_literal(&self, kind: ContainerKind, elems: &[String], mutable: bool) -> String {
        let elems = elems.join(", ");
        match (kind, mutable) {
            (ContainerKind::Set, false) => format!("Set.of({})", elems),
            (ContainerKind::Set, true) => format!("new HashSet<>(Arrays.asList({}))", elems),
            (_, false) => format!("List.of({})", elems),
            (_, true) => format!("new ArrayList<>(Arrays.asList({}))", elems),
        }
    }

    fn map_literal(&self, entries: &[(String, String)], mutable: bool) -> String {
        let entries: Vec<String> = entries
            .iter()
            .map(|(key, value)| format!("Map.entry({}, {})", key, value))
            .collect();
        let immutable = format!("Map.ofEntries({})", entries.join(", "));
        if mutable {
            format!("new HashMap<>({})", immutable)
        } else {
            immutable
        }
    }

    fn empty_container(&self, kind: ContainerKind, _type_name: &str, mutable: bool) -> String {
        match (kind, mutable) {
            (ContainerKind::List, false) => "List.of()".to_string(),
            (ContainerKind::List, true) => "new ArrayList<>()".to_string(),
            (ContainerKind::Set, false) => "Set.of()".to_string(),
            (ContainerKind::Set, true) => "new HashSet<>()".to_string(),
            (ContainerKind::Map, false) => "Map.of()".to_string(),
            (ContainerKind::Map, true) => "new HashMap<>()".to_string(),
        }
    }
}

impl Dialect for JavaDialect {
    fn name(&self) -> &'static str {
        "java"
    }

    fn file_extension(&self) -> &'static str {
        ".java"
    }

    fn namespace_scopes(&self) -> &'static [&'static str] {
        &["java", "*"]
    }

    fn primitive_name(&self, primitive: Primitive, boxed: bool) -> &'static str {
        match (primitive, boxed) {
            (Primitive::Void, false) => "void",
            (Primitive::Void, true) => "Void",
            (Primitive::Bool, false) => "boolean",
            (Primitive::Bool, true) => "Boolean",
            (Primitive::Byte, false) => "byte",
            (Primitive::Byte, true) => "Byte",
            (Primitive::I16, false) => "short",
            (Primitive::I16, true) => "Short",
            (Primitive::I32, false) => "int",
            (Primitive::I32, true) => "Integer",
            (Primitive::I64, false) => "long",
            (Primitive::I64, true) => "Long",
            (Primitive::Double, false) => "double",
            (Primitive::Double, true) => "Double",
            (Primitive::String, _) => "String",
            (Primitive::Binary, _) => "ByteBuffer",
        }
    }

    fn option_type(&self, inner: &str) -> String {
        format!("Optional<{}>", inner)
    }

    /// Java has no import aliases, so scoped names are fully qualified.
    fn qualify_scoped(&self, prefix: &str, namespace: Option<&Identifier>, name: &str) -> String {
        match namespace {
            Some(ns) => format!("{}.{}", ns.full_name(), name),
            None => format!("{}.{}", prefix, name),
        }
    }

    fn templates(&self) -> Result<&'static TemplateSet> {
        TEMPLATES.get_or_try_init(|| TemplateSet::load(self.name(), SOURCES))
    }
}
