//! Logic-less templates for generated files.
//!
//! A small mustache subset is enough for the generator:
//!
//! - `{{key}}` interpolates a code fragment or flag, verbatim
//! - `{{#key}}...{{/key}}` renders once for a true flag or non-empty code,
//!   once inside a nested dictionary, or once per dictionary in a list
//! - `{{^key}}...{{/key}}` renders when the key is missing, false or empty
//! - `{{>name}}` renders another template of the same set in place; on a
//!   line of its own, each rendered line takes the tag's indentation
//! - `{{! ... }}` is a comment
//!
//! Interpolating a key that no enclosing scope defines is an error; a
//! section over a missing key is simply skipped.
//!
//! Template sets are parsed once per dialect and cached for the life of the
//! process (see each dialect's `templates()`); after that they are only read.

mod parse;

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::codegen::{DictValue, Dictionary};
use crate::diagnostic::{GeneratorError, Result};
use parse::Node;

/// A failed render, before the caller attaches the construct it was for.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderError {
    pub template: String,
    pub message: String,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.template, self.message)
    }
}

/// All named templates for one dialect.
#[derive(Debug)]
pub struct TemplateSet {
    dialect: String,
    templates: HashMap<String, Vec<Node>>,
}

impl TemplateSet {
    /// Parses `(name, source)` pairs into a set.
    pub fn load(dialect: &str, sources: &[(&str, &str)]) -> Result<Self> {
        let mut templates = HashMap::new();
        for (name, source) in sources {
            let nodes = parse::parse(source).map_err(|message| GeneratorError::Template {
                dialect: dialect.to_string(),
                construct: "template set".to_string(),
                template: name.to_string(),
                message,
            })?;
            templates.insert(name.to_string(), nodes);
        }

        debug!(dialect, templates = templates.len(), "loaded template set");

        Ok(Self {
            dialect: dialect.to_string(),
            templates,
        })
    }

    pub fn dialect(&self) -> &str {
        &self.dialect
    }

    pub fn contains(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// The fixed header every generated file starts with.
    pub fn header(&self) -> std::result::Result<String, RenderError> {
        self.render("header", &Dictionary::new())
    }

    /// Renders template `name` against `dict`.
    pub fn render(&self, name: &str, dict: &Dictionary) -> std::result::Result<String, RenderError> {
        let nodes = self.lookup(name, name)?;
        let mut out = String::new();
        let mut stack = vec![dict];
        self.render_nodes(nodes, &mut stack, &mut out, name)?;
        Ok(out)
    }

    fn lookup(&self, name: &str, from: &str) -> std::result::Result<&Vec<Node>, RenderError> {
        self.templates.get(name).ok_or_else(|| RenderError {
            template: from.to_string(),
            message: format!("no template named '{}' for {}", name, self.dialect),
        })
    }

    fn render_nodes<'a>(
        &self,
        nodes: &[Node],
        stack: &mut Vec<&'a Dictionary>,
        out: &mut String,
        template: &str,
    ) -> std::result::Result<(), RenderError> {
        for node in nodes {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Variable(key) => match resolve(stack, key) {
                    Some(DictValue::Code(code)) => out.push_str(code.as_str()),
                    Some(DictValue::Flag(flag)) => out.push_str(if *flag { "true" } else { "false" }),
                    Some(DictValue::Dict(_)) | Some(DictValue::List(_)) => {
                        return Err(RenderError {
                            template: template.to_string(),
                            message: format!("'{}' is not a scalar value", key),
                        })
                    }
                    None => {
                        return Err(RenderError {
                            template: template.to_string(),
                            message: format!("unresolved key '{}'", key),
                        })
                    }
                },
                Node::Section {
                    name,
                    inverted: true,
                    children,
                } => {
                    if !is_truthy(resolve(stack, name)) {
                        self.render_nodes(children, stack, out, template)?;
                    }
                }
                Node::Section {
                    name,
                    inverted: false,
                    children,
                } => match resolve(stack, name) {
                    None | Some(DictValue::Flag(false)) => {}
                    Some(DictValue::Flag(true)) => {
                        self.render_nodes(children, stack, out, template)?;
                    }
                    Some(DictValue::Code(code)) => {
                        if !code.is_empty() {
                            self.render_nodes(children, stack, out, template)?;
                        }
                    }
                    Some(DictValue::Dict(dict)) => {
                        stack.push(dict);
                        let result = self.render_nodes(children, stack, out, template);
                        stack.pop();
                        result?;
                    }
                    Some(DictValue::List(items)) => {
                        for item in items {
                            stack.push(item);
                            let result = self.render_nodes(children, stack, out, template);
                            stack.pop();
                            result?;
                        }
                    }
                },
                Node::Partial { name, indent } => {
                    let nodes = self.lookup(name, template)?;
                    if indent.is_empty() {
                        self.render_nodes(nodes, stack, out, name)?;
                    } else {
                        let mut rendered = String::new();
                        self.render_nodes(nodes, stack, &mut rendered, name)?;
                        push_indented(out, &rendered, indent);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Blank lines stay blank.
fn push_indented(out: &mut String, text: &str, indent: &str) {
    for line in text.split_inclusive('\n') {
        if line != "\n" && line != "\r\n" {
            out.push_str(indent);
        }
        out.push_str(line);
    }
}

/// Innermost scope wins.
fn resolve<'a>(stack: &[&'a Dictionary], key: &str) -> Option<&'a DictValue> {
    stack.iter().rev().copied().find_map(|dict| dict.get(key))
}

fn is_truthy(value: Option<&DictValue>) -> bool {
    match value {
        None => false,
        Some(DictValue::Flag(flag)) => *flag,
        Some(DictValue::Code(code)) => !code.is_empty(),
        Some(DictValue::Dict(_)) => true,
        Some(DictValue::List(items)) => !items.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::CodeFragment;

    fn set(sources: &[(&str, &str)]) -> TemplateSet {
        TemplateSet::load("test", sources).unwrap()
    }

    fn code(s: &str) -> CodeFragment {
        CodeFragment::codify(s)
    }

    #[test]
    fn test_interpolation() {
        let templates = set(&[("t", "class {{Name}} // {{flag}}")]);
        let dict = Dictionary::new().with("Name", code("Point")).with("flag", true);
        assert_eq!(templates.render("t", &dict).unwrap(), "class Point // true");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let templates = set(&[("t", "{{missing}}")]);
        let err = templates.render("t", &Dictionary::new()).unwrap_err();
        assert_eq!(err.template, "t");
        assert!(err.message.contains("missing"));
    }

    #[test]
    fn test_list_iteration_with_outer_scope() {
        let templates = set(&[("t", "{{#fields}}{{pkg}}.{{name}}{{^last}}, {{/last}}{{/fields}}")]);
        let fields = crate::codegen::mark_ends(vec![
            Dictionary::new().with("name", code("a")),
            Dictionary::new().with("name", code("b")),
        ]);
        let dict = Dictionary::new().with("pkg", code("p")).with("fields", fields);
        assert_eq!(templates.render("t", &dict).unwrap(), "p.a, p.b");
    }

    #[test]
    fn test_sections_on_flags_and_missing_keys() {
        let templates = set(&[("t", "{{#on}}on{{/on}}{{#off}}off{{/off}}{{#absent}}x{{/absent}}{{^absent}}none{{/absent}}")]);
        let dict = Dictionary::new().with("on", true).with("off", false);
        assert_eq!(templates.render("t", &dict).unwrap(), "onnone");
    }

    #[test]
    fn test_nested_dictionary_section() {
        let templates = set(&[("t", "{{#parent}}extends {{name}}{{/parent}}")]);
        let dict = Dictionary::new().with("parent", Dictionary::new().with("name", code("Base")));
        assert_eq!(templates.render("t", &dict).unwrap(), "extends Base");
    }

    #[test]
    fn test_partials() {
        let templates = set(&[("outer", "[{{>inner}}]"), ("inner", "{{x}}")]);
        let dict = Dictionary::new().with("x", code("1"));
        assert_eq!(templates.render("outer", &dict).unwrap(), "[1]");
    }

    #[test]
    fn test_standalone_partial_is_reindented() {
        let templates = set(&[
            ("outer", "class A {\n  {{>body}}\n}\n"),
            ("inner", "{{x}}\n"),
            ("body", "def f = {\n  {{>inner}}\n}\n\nval y = 1\n"),
        ]);
        let dict = Dictionary::new().with("x", code("1"));
        assert_eq!(
            templates.render("outer", &dict).unwrap(),
            "class A {\n  def f = {\n    1\n  }\n\n  val y = 1\n}\n"
        );
    }

    #[test]
    fn test_unknown_template() {
        let templates = set(&[]);
        assert!(templates.render("nope", &Dictionary::new()).is_err());
    }

    #[test]
    fn test_load_reports_syntax_errors() {
        let err = TemplateSet::load("test", &[("bad", "{{#open}}")]).unwrap_err();
        assert!(matches!(err, GeneratorError::Template { template, .. } if template == "bad"));
    }
}
