// Copyright (C) 2024 Haiyang Liao <haiyangliao@nju.edu.cn>
//
// This program is free software: you can redistribute it and/or modify it under
// the terms of the GNU General Public License as published by the Free Software
// Foundation, version 3.
//
// This program is distributed in the hope that it will be useful, but WITHOUT
// ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS
// FOR A PARTICULAR PURPOSE. See the GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along with
// this program. If not, see <https://www.gnu.org/licenses/>.
//
use regex::Regex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TemplateError {
    #[error("malformed template: {fragments} fragments cannot surround {values} values")]
    Malformed { fragments: usize, values: usize },
}

/// A substitution value. Nested templates are rendered by the same template
/// function before being spliced in.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Text(String),
    Nested(Template),
}

impl From<&str> for Value {
    fn from(s: &str) -> Value {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Value {
        Value::Text(s)
    }
}

impl From<Template> for Value {
    fn from(t: Template) -> Value {
        Value::Nested(t)
    }
}

/// Literal fragments interleaved with values: fragment, value, fragment, ...,
/// fragment. A well formed template has exactly one more fragment than it
/// has values.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Template {
    fragments: Vec<String>,
    values: Vec<Value>,
}

impl Template {
    pub fn new(fragments: Vec<String>, values: Vec<Value>) -> Template {
        Template { fragments, values }
    }

    /// Interleave `parts` with `separator`.
    pub fn join(parts: Vec<Value>, separator: &str) -> Template {
        let mut fragments = vec![String::new()];
        for _ in 1..parts.len() {
            fragments.push(separator.to_string());
        }

        if !parts.is_empty() {
            fragments.push(String::new());
        }

        Template::new(fragments, parts)
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }
}

/// The interpolation capability a host hands to providers.
pub trait TemplateFunction {
    fn render(&self, template: &Template) -> Result<String, TemplateError>;
}

/// Plain concatenating interpolation.
pub struct Interpolator;

impl TemplateFunction for Interpolator {
    fn render(&self, template: &Template) -> Result<String, TemplateError> {
        let fragments = template.fragments();
        let values = template.values();
        if fragments.len() != values.len() + 1 {
            return Err(TemplateError::Malformed {
                fragments: fragments.len(),
                values: values.len(),
            });
        }

        let mut rendered = fragments[0].clone();
        for (value, fragment) in values.iter().zip(&fragments[1..]) {
            match value {
                Value::Text(text) => rendered.push_str(text),
                Value::Nested(nested) => rendered.push_str(&self.render(nested)?),
            }

            rendered.push_str(fragment);
        }

        Ok(rendered)
    }
}

/// Build a regex matching `rendered` literally, anchored at the start of the
/// input, except that every occurrence of `token` may be any text matched
/// by `replacement`.
pub fn varying_pattern(
    rendered: &str,
    token: &str,
    replacement: &str,
) -> Result<Regex, regex::Error> {
    let escaped = rendered
        // split removes every token, leaving the literal text around them
        .split(token)
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(replacement);

    Regex::new(&format!("^{}", escaped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolation() {
        let template = Template::new(
            vec!["Hello ".to_string(), ", from ".to_string(), "!".to_string()],
            vec![Value::from("world"), Value::from("Nanjing")],
        );
        assert_eq!(
            "Hello world, from Nanjing!",
            Interpolator.render(&template).unwrap()
        );
    }

    #[test]
    fn test_nested_interpolation() {
        let inner = Template::new(
            vec!["<".to_string(), ">".to_string()],
            vec![Value::from("inner")],
        );
        let outer = Template::new(
            vec!["[".to_string(), "]".to_string()],
            vec![Value::from(inner)],
        );
        assert_eq!("[<inner>]", Interpolator.render(&outer).unwrap());
    }

    #[test]
    fn test_malformed_template() {
        let template = Template::new(vec!["a".to_string()], vec![Value::from("b")]);
        assert_eq!(
            Err(TemplateError::Malformed {
                fragments: 1,
                values: 1
            }),
            Interpolator.render(&template)
        );
    }

    #[test]
    fn test_malformed_nested_template_propagates() {
        let broken = Template::new(Vec::new(), Vec::new());
        let outer = Template::new(
            vec!["".to_string(), "".to_string()],
            vec![Value::from(broken)],
        );
        assert!(Interpolator.render(&outer).is_err());
    }

    #[test]
    fn test_join() {
        let joined = Template::join(
            vec![Value::from("one"), Value::from("two"), Value::from("three")],
            "\n",
        );
        assert_eq!("one\ntwo\nthree", Interpolator.render(&joined).unwrap());
        assert_eq!("", Interpolator.render(&Template::join(Vec::new(), ",")).unwrap());
    }

    #[test]
    fn test_varying_pattern() {
        let rgx = varying_pattern("/* date: @DT@ */\n", "@DT@", "[^\n]+").unwrap();
        assert_eq!(rgx.as_str(), "^/\\* date: [^\n]+ \\*/\n");
        assert!(rgx.is_match("/* date: 2024/5/29 08:05:09 */\ncode"));
        assert!(!rgx.is_match("code\n/* date: 2024/5/29 08:05:09 */\n"));
    }
}
