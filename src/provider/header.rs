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
use textwrap::WordSplitter;

use crate::clock::Clock;
use crate::comments::{BlockComment, Comment};
use crate::error::Error;
use crate::provider::timestamp::TimestampFormat;
use crate::provider::{CommentDelimiters, LanguageProvider, Variables};
use crate::template::{varying_pattern, Template, TemplateError, TemplateFunction, Value};

pub const AUTHOR: &str = "Haiyang Liao";
pub const AFFILIATION: &str = "Nanjing University";
pub const EMAIL: &str = "haiyangliao@nju.edu.cn";

pub const LANGUAGES: [&str; 4] = [
    "javascript",
    "typescript",
    "javascriptreact",
    "typescriptreact",
];

// Stands in for the date while building the pattern that recognises an
// existing header, then gets swapped for DATE_RE.
const INTERMEDIATE_DATE_TOKEN: &str = "@DATE@";

const DATE_RE: &str = "[^\n]+";

// Gap between the longest label and the value column.
const LABEL_GAP: usize = 3;

#[derive(Clone, Debug, PartialEq)]
pub struct HeaderFields {
    pub author: String,
    pub affiliation: String,
    pub email: String,
}

impl Default for HeaderFields {
    fn default() -> Self {
        HeaderFields {
            author: AUTHOR.to_string(),
            affiliation: AFFILIATION.to_string(),
            email: EMAIL.to_string(),
        }
    }
}

/// Renders an `@author`/`@affiliation`/`@email`/`@date` block comment.
pub struct HeaderProvider {
    languages: Vec<String>,
    delimiters: CommentDelimiters,
    fields: HeaderFields,
    timestamp: TimestampFormat,
    columns: Option<usize>,
}

impl HeaderProvider {
    pub fn new(
        languages: Vec<String>,
        delimiters: CommentDelimiters,
        fields: HeaderFields,
        timestamp: TimestampFormat,
    ) -> Result<HeaderProvider, Error> {
        if languages.is_empty() {
            return Err(Error::Provider("at least one language is required".to_string()));
        }

        if languages.iter().any(|l| l.trim().is_empty()) {
            return Err(Error::Provider("language identifiers cannot be empty".to_string()));
        }

        delimiters.validate()?;

        Ok(HeaderProvider {
            languages,
            delimiters,
            fields,
            timestamp,
            columns: None,
        })
    }

    /// The provider used when no configuration registers any.
    pub fn builtin() -> HeaderProvider {
        HeaderProvider {
            languages: LANGUAGES.iter().map(|l| l.to_string()).collect(),
            delimiters: CommentDelimiters::c_style(),
            fields: HeaderFields::default(),
            timestamp: TimestampFormat::default(),
            columns: None,
        }
    }

    /// Wrap long author/affiliation/email values so no line runs past
    /// `columns`. The date line is never wrapped.
    pub fn with_columns(mut self, columns: Option<usize>) -> HeaderProvider {
        self.columns = columns;
        self
    }

    fn commenter(&self) -> BlockComment {
        let bc = BlockComment::new(&self.delimiters.start, &self.delimiters.end);
        match &self.delimiters.per_line {
            Some(ch) => bc.with_per_line(ch),
            None => bc,
        }
    }

    // Width taken by " * " in front of each body line.
    fn prefix_width(&self) -> usize {
        match &self.delimiters.per_line {
            Some(ch) => ch.chars().count() + 2,
            None => 0,
        }
    }

    fn wrap_value(&self, value: &str, label_width: usize) -> String {
        let used = self.prefix_width() + label_width;
        match self.columns {
            Some(cols) if cols > used => {
                let continuation = format!("\n{}", " ".repeat(label_width));
                // Names and emails are never split, even when longer than a line.
                let options = textwrap::Options::new(cols - used)
                    .word_splitter(WordSplitter::NoHyphenation)
                    .break_words(false);
                textwrap::wrap(value, options).join(continuation.as_str())
            }
            _ => value.to_string(),
        }
    }

    fn body(&self, stamp: &str) -> Template {
        let labels = ["@author", "@affiliation", "@email", "@date"];
        let label_width = labels.iter().map(|l| l.len()).max().unwrap_or(0) + LABEL_GAP;

        let values = [
            self.wrap_value(&self.fields.author, label_width),
            self.wrap_value(&self.fields.affiliation, label_width),
            self.wrap_value(&self.fields.email, label_width),
            stamp.to_string(),
        ];

        let lines = labels
            .iter()
            .zip(values)
            .map(|(label, value)| {
                Value::from(Template::new(
                    vec![format!("{:<width$}", label, width = label_width), String::new()],
                    vec![Value::from(value)],
                ))
            })
            .collect();

        Template::join(lines, "\n")
    }

    fn render_with_stamp(
        &self,
        tpl: &dyn TemplateFunction,
        stamp: &str,
    ) -> Result<String, TemplateError> {
        let text = tpl.render(&self.body(stamp))?;
        Ok(self.commenter().comment(&text))
    }
}

impl LanguageProvider for HeaderProvider {
    fn languages(&self) -> &[String] {
        &self.languages
    }

    fn delimiters(&self) -> &CommentDelimiters {
        &self.delimiters
    }

    fn render_header(
        &self,
        tpl: &dyn TemplateFunction,
        variables: &Variables,
        clock: &dyn Clock,
    ) -> Result<String, TemplateError> {
        let stamp = self.timestamp.format(clock.now());
        trace!(
            "rendering header for {} dated {} ({})",
            variables.get("file_name").unwrap_or("<unnamed>"),
            stamp,
            self.timestamp
        );
        self.render_with_stamp(tpl, &stamp)
    }

    fn header_pattern(&self, tpl: &dyn TemplateFunction) -> Result<Regex, Error> {
        let rendered = self.render_with_stamp(tpl, INTERMEDIATE_DATE_TOKEN)?;
        Ok(varying_pattern(&rendered, INTERMEDIATE_DATE_TOKEN, DATE_RE)?)
    }
}
