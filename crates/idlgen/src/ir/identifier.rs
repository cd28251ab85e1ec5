//! Identifiers and their casing rules.

use std::fmt;

use heck::{ToShoutySnakeCase, ToSnakeCase};
use serde::{Deserialize, Serialize};

/// A simple or scope-qualified name (`Foo` or `shared.Foo`).
///
/// Casing operations on a qualified name only touch the last segment;
/// the scope is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Identifier {
    Simple(String),
    Qualified(Vec<String>),
}

impl Identifier {
    /// Parses a dotted name.
    pub fn parse(name: &str) -> Self {
        let parts: Vec<String> = name.split('.').map(str::to_string).collect();
        if parts.len() == 1 {
            Identifier::Simple(name.to_string())
        } else {
            Identifier::Qualified(parts)
        }
    }

    pub fn simple(name: impl Into<String>) -> Self {
        Identifier::Simple(name.into())
    }

    /// All segments, outermost scope first.
    pub fn segments(&self) -> Vec<&str> {
        match self {
            Identifier::Simple(name) => vec![name.as_str()],
            Identifier::Qualified(names) => names.iter().map(String::as_str).collect(),
        }
    }

    /// The last segment.
    pub fn name(&self) -> &str {
        match self {
            Identifier::Simple(name) => name,
            Identifier::Qualified(names) => names.last().map(String::as_str).unwrap_or(""),
        }
    }

    /// Segments joined with `.`.
    pub fn full_name(&self) -> String {
        self.segments().join(".")
    }

    /// Everything but the last segment, if there is a scope.
    pub fn qualifier(&self) -> Option<Identifier> {
        match self {
            Identifier::Simple(_) => None,
            Identifier::Qualified(names) => {
                let scope = &names[..names.len().saturating_sub(1)];
                match scope.len() {
                    0 => None,
                    1 => Some(Identifier::Simple(scope[0].clone())),
                    _ => Some(Identifier::Qualified(scope.to_vec())),
                }
            }
        }
    }

    /// The last segment as a simple identifier.
    pub fn leaf(&self) -> Identifier {
        Identifier::Simple(self.name().to_string())
    }

    pub fn prepend(&self, prefix: &str) -> Identifier {
        self.map_last(|name| format!("{}{}", prefix, name))
    }

    pub fn append(&self, suffix: &str) -> Identifier {
        self.map_last(|name| format!("{}{}", name, suffix))
    }

    /// `foo_bar` and `FOO_BAR` become `FooBar`.
    pub fn to_title_case(&self) -> Identifier {
        self.map_last(|name| camel_case(name, true))
    }

    /// `foo_bar` and `FOO_BAR` become `fooBar`.
    pub fn to_camel_case(&self) -> Identifier {
        self.map_last(|name| camel_case(name, false))
    }

    /// `fooBar` becomes `FOO_BAR`.
    pub fn to_upper_case(&self) -> Identifier {
        self.map_last(|name| name.to_shouty_snake_case())
    }

    /// `FooBar` becomes `foo_bar`.
    pub fn to_lower_case(&self) -> Identifier {
        self.map_last(|name| name.to_snake_case())
    }

    fn map_last(&self, f: impl FnOnce(&str) -> String) -> Identifier {
        match self {
            Identifier::Simple(name) => Identifier::Simple(f(name)),
            Identifier::Qualified(names) => {
                let mut names = names.clone();
                if let Some(last) = names.last_mut() {
                    *last = f(last);
                }
                Identifier::Qualified(names)
            }
        }
    }
}

/// Underscore-separated words joined in camel case. Leading underscores
/// survive and all-caps words keep only their first letter upper-cased.
fn camel_case(name: &str, first_upper: bool) -> String {
    let mut out: String = name.chars().take_while(|c| *c == '_').collect();

    for (i, part) in name.split('_').filter(|p| !p.is_empty()).enumerate() {
        let all_upper = part.chars().all(|c| c.is_uppercase() || !c.is_alphabetic());
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            if i == 0 && !first_upper {
                out.extend(first.to_lowercase());
            } else {
                out.extend(first.to_uppercase());
            }
        }
        let rest: String = chars.collect();
        if all_upper {
            out.push_str(&rest.to_lowercase());
        } else {
            out.push_str(&rest);
        }
    }

    out
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

impl From<String> for Identifier {
    fn from(name: String) -> Self {
        Identifier::parse(&name)
    }
}

impl From<&str> for Identifier {
    fn from(name: &str) -> Self {
        Identifier::parse(name)
    }
}

impl From<Identifier> for String {
    fn from(id: Identifier) -> Self {
        id.full_name()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(Identifier::parse("Foo"), Identifier::simple("Foo"));
        assert_eq!(
            Identifier::parse("com.example.Foo"),
            Identifier::Qualified(vec!["com".into(), "example".into(), "Foo".into()])
        );
    }

    #[test]
    fn test_title_and_camel_case() {
        assert_eq!(Identifier::simple("foo_bar").to_title_case().name(), "FooBar");
        assert_eq!(Identifier::simple("FOO_BAR").to_camel_case().name(), "fooBar");
        assert_eq!(Identifier::simple("fooBar").to_camel_case().name(), "fooBar");
        assert_eq!(Identifier::simple("fooBar").to_title_case().name(), "FooBar");
        assert_eq!(Identifier::simple("ID").to_camel_case().name(), "id");
        assert_eq!(Identifier::simple("_private").to_camel_case().name(), "_private");
    }

    #[test]
    fn test_upper_and_lower_case() {
        assert_eq!(Identifier::simple("fooBar").to_upper_case().name(), "FOO_BAR");
        assert_eq!(Identifier::simple("FooBar").to_lower_case().name(), "foo_bar");
    }

    #[test]
    fn test_casing_only_touches_last_segment() {
        let id = Identifier::parse("shared_types.point_value").to_title_case();
        assert_eq!(id.full_name(), "shared_types.PointValue");
    }

    #[test]
    fn test_qualifier_and_leaf() {
        let id = Identifier::parse("com.example.Foo");
        assert_eq!(id.qualifier(), Some(Identifier::parse("com.example")));
        assert_eq!(id.leaf(), Identifier::simple("Foo"));
        assert_eq!(Identifier::simple("Foo").qualifier(), None);
    }

    #[test]
    fn test_prepend_append() {
        let id = Identifier::simple("name");
        assert_eq!(id.prepend("_").append("_").name(), "_name_");
    }
}
