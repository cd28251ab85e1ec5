//! Template parsing.
//!
//! Tags that sit alone on their line (sections, inverted sections, section
//! ends, partials and comments) take the whole line with them, so templates
//! can be laid out readably without leaving blank lines in the output. A
//! standalone partial keeps its indentation: every line it renders is
//! prefixed with it.

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Text(String),
    Variable(String),
    Section {
        name: String,
        inverted: bool,
        children: Vec<Node>,
    },
    Partial {
        name: String,
        indent: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum TagKind {
    Variable,
    Open,
    Inverted,
    Close,
    Partial,
    Comment,
}

#[derive(Debug)]
enum Token {
    Text(String),
    Tag(TagKind, String),
    /// A partial alone on its line, with the whitespace that preceded it.
    IndentedPartial(String, String),
}

pub(crate) fn parse(source: &str) -> Result<Vec<Node>, String> {
    let mut tokens = tokenize(source)?;
    strip_standalone(&mut tokens);
    build(tokens)
}

fn tokenize(source: &str) -> Result<Vec<Token>, String> {
    let mut tokens = Vec::new();
    let mut rest = source;

    while let Some(start) = rest.find("{{") {
        if start > 0 {
            tokens.push(Token::Text(rest[..start].to_string()));
        }
        let after = &rest[start + 2..];
        let end = after
            .find("}}")
            .ok_or_else(|| "unclosed tag".to_string())?;
        let content = after[..end].trim();

        let (kind, name) = match content.chars().next() {
            Some('#') => (TagKind::Open, content[1..].trim()),
            Some('^') => (TagKind::Inverted, content[1..].trim()),
            Some('/') => (TagKind::Close, content[1..].trim()),
            Some('>') => (TagKind::Partial, content[1..].trim()),
            Some('!') => (TagKind::Comment, ""),
            Some(_) => (TagKind::Variable, content),
            None => return Err("empty tag".to_string()),
        };
        if name.is_empty() && kind != TagKind::Comment {
            return Err("tag without a name".to_string());
        }

        tokens.push(Token::Tag(kind, name.to_string()));
        rest = &after[end + 2..];
    }

    if !rest.is_empty() {
        tokens.push(Token::Text(rest.to_string()));
    }

    Ok(tokens)
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c == ' ' || c == '\t')
}

fn strip_standalone(tokens: &mut [Token]) {
    let last = tokens.len().saturating_sub(1);

    // Decide against the untouched token stream first; adjacent standalone
    // tags share the text between them.
    let standalone: Vec<bool> = (0..tokens.len())
        .map(|i| {
            if !matches!(&tokens[i], Token::Tag(kind, _) if *kind != TagKind::Variable) {
                return false;
            }
            let before_ok = match i.checked_sub(1).map(|p| &tokens[p]) {
                None => true,
                Some(Token::Text(text)) => match text.rfind('\n') {
                    Some(pos) => is_blank(&text[pos + 1..]),
                    None => i == 1 && is_blank(text),
                },
                Some(Token::Tag(..) | Token::IndentedPartial(..)) => false,
            };
            let after_ok = match tokens.get(i + 1) {
                None => true,
                Some(Token::Text(text)) => match text.find('\n') {
                    Some(pos) => is_blank(text[..pos].trim_end_matches('\r')),
                    None => i + 1 == last && is_blank(text),
                },
                Some(Token::Tag(..) | Token::IndentedPartial(..)) => false,
            };
            before_ok && after_ok
        })
        .collect();

    for (i, is_standalone) in standalone.into_iter().enumerate() {
        if !is_standalone {
            continue;
        }
        let mut indent = String::new();
        if let Some(Token::Text(text)) = i.checked_sub(1).and_then(|p| tokens.get_mut(p)) {
            let trimmed = text.trim_end_matches([' ', '\t']).len();
            indent = text.split_off(trimmed);
        }
        let partial = match &tokens[i] {
            Token::Tag(TagKind::Partial, name) => Some(name.clone()),
            _ => None,
        };
        if let Some(name) = partial {
            tokens[i] = Token::IndentedPartial(name, indent);
        }
        if let Some(Token::Text(text)) = tokens.get_mut(i + 1) {
            let start = text.len() - text.trim_start_matches([' ', '\t']).len();
            let rest = &text[start..];
            let cut = if rest.starts_with("\r\n") {
                start + 2
            } else if rest.starts_with('\n') {
                start + 1
            } else {
                start
            };
            text.drain(..cut);
        }
    }
}

fn build(tokens: Vec<Token>) -> Result<Vec<Node>, String> {
    // Each open section keeps its name, inversion and collected children.
    let mut stack: Vec<(String, bool, Vec<Node>)> = Vec::new();
    let mut root = Vec::new();

    for token in tokens {
        let node = match token {
            Token::Text(text) if text.is_empty() => continue,
            Token::Text(text) => Node::Text(text),
            Token::Tag(TagKind::Variable, name) => Node::Variable(name),
            Token::Tag(TagKind::Partial, name) => Node::Partial {
                name,
                indent: String::new(),
            },
            Token::IndentedPartial(name, indent) => Node::Partial { name, indent },
            Token::Tag(TagKind::Comment, _) => continue,
            Token::Tag(TagKind::Open, name) => {
                stack.push((name, false, Vec::new()));
                continue;
            }
            Token::Tag(TagKind::Inverted, name) => {
                stack.push((name, true, Vec::new()));
                continue;
            }
            Token::Tag(TagKind::Close, name) => {
                let (open, inverted, children) = stack
                    .pop()
                    .ok_or_else(|| format!("'{{{{/{}}}}}' closes nothing", name))?;
                if open != name {
                    return Err(format!("'{{{{/{}}}}}' closes section '{}'", name, open));
                }
                Node::Section {
                    name,
                    inverted,
                    children,
                }
            }
        };

        match stack.last_mut() {
            Some((_, _, children)) => children.push(node),
            None => root.push(node),
        }
    }

    if let Some((name, _, _)) = stack.pop() {
        return Err(format!("section '{}' is never closed", name));
    }

    Ok(root)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variables_and_text() {
        let nodes = parse("Hello {{name}}!").unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::Text("Hello ".into()),
                Node::Variable("name".into()),
                Node::Text("!".into()),
            ]
        );
    }

    #[test]
    fn test_standalone_section_lines_vanish() {
        let nodes = parse("a\n{{#items}}\n  x\n{{/items}}\nb\n").unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::Text("a\n".into()),
                Node::Section {
                    name: "items".into(),
                    inverted: false,
                    children: vec![Node::Text("  x\n".into())],
                },
                Node::Text("b\n".into()),
            ]
        );
    }

    #[test]
    fn test_inline_section_keeps_surroundings() {
        let nodes = parse("a{{#f}}, {{/f}}b").unwrap();
        assert_eq!(nodes.len(), 3);
        assert_eq!(nodes[0], Node::Text("a".into()));
    }

    #[test]
    fn test_standalone_partial_keeps_indent() {
        let nodes = parse("{\n    {{>body}}\n}\n").unwrap();
        assert_eq!(
            nodes,
            vec![
                Node::Text("{\n".into()),
                Node::Partial {
                    name: "body".into(),
                    indent: "    ".into(),
                },
                Node::Text("}\n".into()),
            ]
        );
    }

    #[test]
    fn test_inline_partial_has_no_indent() {
        let nodes = parse("x = {{>read}};").unwrap();
        assert_eq!(
            nodes[1],
            Node::Partial {
                name: "read".into(),
                indent: String::new(),
            }
        );
    }

    #[test]
    fn test_comment_is_dropped() {
        assert_eq!(parse("{{! note }}\nx").unwrap(), vec![Node::Text("x".into())]);
    }

    #[test]
    fn test_errors() {
        assert!(parse("{{#a}}x").unwrap_err().contains("never closed"));
        assert!(parse("{{#a}}x{{/b}}").unwrap_err().contains("closes section"));
        assert!(parse("{{/a}}").unwrap_err().contains("closes nothing"));
        assert!(parse("{{name").unwrap_err().contains("unclosed"));
        assert!(parse("{{}}").is_err());
    }
}
