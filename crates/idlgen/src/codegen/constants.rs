//! Literal values to source.

use super::fragment::{quote, CodeFragment};
use super::types::TypeMapper;
use crate::dialect::ContainerKind;
use crate::ir::Value;

/// Renders constant values for one dialect.
pub struct ConstantGenerator<'m, 'a> {
    mapper: &'m TypeMapper<'a>,
}

impl<'m, 'a> ConstantGenerator<'m, 'a> {
    pub fn new(mapper: &'m TypeMapper<'a>) -> Self {
        Self { mapper }
    }

    /// Renders `value`. `mutable` picks the collection flavour for container
    /// literals and is passed unchanged to every nested literal.
    pub fn render(&self, value: &Value, mutable: bool) -> CodeFragment {
        let dialect = self.mapper.dialect();
        match value {
            Value::Null => CodeFragment::codify(dialect.null_marker()),
            Value::String(s) => quote(s),
            Value::Double(d) => CodeFragment::codify(format_double(*d)),
            Value::Int(i) => CodeFragment::codify(format_int(*i)),
            Value::Bool(b) => CodeFragment::codify(b.to_string()),
            Value::List(elems) => self.sequence(ContainerKind::List, elems, mutable),
            Value::Set(elems) => self.sequence(ContainerKind::Set, elems, mutable),
            Value::Map(entries) => {
                let entries: Vec<(String, String)> = entries
                    .iter()
                    .map(|(key, value)| {
                        (
                            self.render(key, mutable).into_string(),
                            self.render(value, mutable).into_string(),
                        )
                    })
                    .collect();
                CodeFragment::codify(dialect.map_literal(&entries, mutable))
            }
            Value::Enum { enum_name, member } => CodeFragment::codify(format!(
                "{}{}{}",
                self.mapper.named_type(enum_name),
                dialect.scope_separator(),
                dialect.quote_keyword(member.name())
            )),
            Value::Id(id) => self.mapper.gen_id(id),
        }
    }

    fn sequence(&self, kind: ContainerKind, elems: &[Value], mutable: bool) -> CodeFragment {
        let elems: Vec<String> = elems
            .iter()
            .map(|elem| self.render(elem, mutable).into_string())
            .collect();
        CodeFragment::codify(self.mapper.dialect().sequence_literal(kind, &elems, mutable))
    }
}

/// Integers outside the 32-bit range need a long suffix in both dialects.
fn format_int(i: i64) -> String {
    if i32::try_from(i).is_ok() {
        i.to_string()
    } else {
        format!("{}L", i)
    }
}

/// Doubles always keep a decimal point or an exponent so they never read
/// back as integers.
fn format_double(d: f64) -> String {
    if d.is_finite() {
        format!("{:?}", d)
    } else {
        d.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::fragment::tests::unquote;
    use crate::dialect::java::JavaDialect;
    use crate::dialect::scala::ScalaDialect;
    use crate::ir::Identifier;

    fn render_scala(value: &Value, mutable: bool) -> String {
        let mapper = TypeMapper::new(&ScalaDialect, &[]);
        ConstantGenerator::new(&mapper).render(value, mutable).into_string()
    }

    #[test]
    fn test_scalars() {
        assert_eq!(render_scala(&Value::Null, false), "null");
        assert_eq!(render_scala(&Value::Int(-3), false), "-3");
        assert_eq!(render_scala(&Value::Double(2.0), false), "2.0");
        assert_eq!(render_scala(&Value::Double(0.25), false), "0.25");
        assert_eq!(render_scala(&Value::Bool(true), false), "true");
    }

    #[test]
    fn test_large_doubles_stay_doubles() {
        assert_eq!(render_scala(&Value::Double(1e16), false), "1e16");
        assert_eq!(render_scala(&Value::Double(1e20), false), "1e20");
        assert_eq!(render_scala(&Value::Double(123456.0), false), "123456.0");
        assert_eq!(render_scala(&Value::Double(-0.5), false), "-0.5");
    }

    #[test]
    fn test_long_literals_get_suffix() {
        assert_eq!(render_scala(&Value::Int(i64::from(i32::MAX)), false), "2147483647");
        assert_eq!(render_scala(&Value::Int(i64::from(i32::MIN)), false), "-2147483648");
        assert_eq!(render_scala(&Value::Int(3_000_000_000), false), "3000000000L");

        let mapper = TypeMapper::new(&JavaDialect, &[]);
        let generator = ConstantGenerator::new(&mapper);
        assert_eq!(
            generator.render(&Value::Int(-3_000_000_000), false).as_str(),
            "-3000000000L"
        );
    }

    #[test]
    fn test_string_is_quoted_losslessly() {
        let rendered = render_scala(&Value::string("a\"b"), false);
        assert_eq!(rendered, "\"a\\\"b\"");
        assert_eq!(unquote(&rendered), "a\"b");
    }

    #[test]
    fn test_list_mutability_changes_only_constructor() {
        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(render_scala(&list, false), "Seq(1, 2)");
        assert_eq!(render_scala(&list, true), "mutable.Buffer(1, 2)");
    }

    #[test]
    fn test_nested_literals_inherit_mutability() {
        let nested = Value::Map(vec![(
            Value::string("k"),
            Value::Set(vec![Value::Int(1)]),
        )]);
        assert_eq!(render_scala(&nested, false), "Map(\"k\" -> Set(1))");
        assert_eq!(render_scala(&nested, true), "mutable.Map(\"k\" -> mutable.Set(1))");
    }

    #[test]
    fn test_java_containers() {
        let mapper = TypeMapper::new(&JavaDialect, &[]);
        let generator = ConstantGenerator::new(&mapper);
        let list = Value::List(vec![Value::Int(1), Value::Int(2)]);
        assert_eq!(generator.render(&list, false).as_str(), "List.of(1, 2)");
        assert_eq!(
            generator.render(&list, true).as_str(),
            "new ArrayList<>(Arrays.asList(1, 2))"
        );
    }

    #[test]
    fn test_enum_and_id_references() {
        assert_eq!(render_scala(&Value::enum_ref("Color", "Red"), false), "Color.Red");
        assert_eq!(
            render_scala(&Value::Id(Identifier::parse("Limits.max")), false),
            "Limits.max"
        );
        assert_eq!(render_scala(&Value::Id(Identifier::simple("type")), false), "`type`");
    }

    #[test]
    fn test_deep_nesting() {
        let mut value = Value::Int(0);
        for _ in 0..64 {
            value = Value::List(vec![value]);
        }
        let rendered = render_scala(&value, false);
        assert!(rendered.starts_with("Seq(Seq("));
        assert_eq!(rendered.matches("Seq(").count(), 64);
    }
}
