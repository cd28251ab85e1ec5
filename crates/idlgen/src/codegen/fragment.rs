//! Generated source text.

use std::fmt;

/// A piece of generated target-language source.
///
/// Only generator code inside this crate can build one, so user-supplied
/// text reaches generated source through [`quote`] and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodeFragment(String);

impl CodeFragment {
    pub(crate) fn codify(code: impl Into<String>) -> Self {
        CodeFragment(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Joins fragments with a separator.
    pub(crate) fn join<'a>(
        fragments: impl IntoIterator<Item = &'a CodeFragment>,
        separator: &str,
    ) -> CodeFragment {
        let parts: Vec<&str> = fragments.into_iter().map(CodeFragment::as_str).collect();
        CodeFragment(parts.join(separator))
    }
}

impl fmt::Display for CodeFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Double-quotes `value` with C-style escapes.
pub fn quote(value: &str) -> CodeFragment {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    CodeFragment(out)
}
