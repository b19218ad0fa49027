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
use std::collections::BTreeMap;

use regex::Regex;

pub use header::{HeaderFields, HeaderProvider};
pub use timestamp::{Locale, TimestampFormat};

use crate::clock::Clock;
use crate::error::Error;
use crate::template::{TemplateError, TemplateFunction};

mod header;
mod timestamp;

#[derive(Clone, Debug, PartialEq)]
pub struct CommentDelimiters {
    pub start: String,
    pub end: String,
    pub per_line: Option<String>,
}

impl CommentDelimiters {
    pub fn new(start: &str, end: &str, per_line: Option<&str>) -> CommentDelimiters {
        CommentDelimiters {
            start: start.to_string(),
            end: end.to_string(),
            per_line: per_line.map(str::to_string),
        }
    }

    /// `/*` ... ` */` with a ` *` gutter.
    pub fn c_style() -> CommentDelimiters {
        CommentDelimiters::new("/*", "*/", Some("*"))
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.start.is_empty() || self.end.is_empty() {
            return Err(Error::Provider(
                "block comment delimiters cannot be empty".to_string(),
            ));
        }

        if let Some(ch) = &self.per_line {
            if ch.is_empty() {
                return Err(Error::Provider("per line character cannot be empty".to_string()));
            }
        }

        Ok(())
    }
}

/// Contextual metadata a host passes along with each render call.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    values: BTreeMap<String, String>,
}

impl Variables {
    pub fn with_value(mut self, key: &str, value: &str) -> Variables {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

pub trait LanguageProvider: Send + Sync {
    fn languages(&self) -> &[String];

    fn delimiters(&self) -> &CommentDelimiters;

    /// Render a fresh header, dated with `clock`.
    fn render_header(
        &self,
        tpl: &dyn TemplateFunction,
        variables: &Variables,
        clock: &dyn Clock,
    ) -> Result<String, TemplateError>;

    /// A pattern matching, at the start of a file, any header this provider
    /// would render regardless of its date.
    fn header_pattern(&self, tpl: &dyn TemplateFunction) -> Result<Regex, Error>;

    fn supports(&self, language: &str) -> bool {
        self.languages().iter().any(|l| l == language)
    }
}

pub fn builtin_providers() -> Vec<Box<dyn LanguageProvider>> {
    vec![Box::new(HeaderProvider::builtin())]
}

/// Providers in registration order. The first one supporting a language
/// wins.
pub struct ProviderRegistry {
    providers: Vec<Box<dyn LanguageProvider>>,
}

impl ProviderRegistry {
    pub fn new(providers: Vec<Box<dyn LanguageProvider>>) -> ProviderRegistry {
        if providers.is_empty() {
            debug!("no providers registered, falling back to the builtin provider");
            return ProviderRegistry {
                providers: builtin_providers(),
            };
        }

        ProviderRegistry { providers }
    }

    pub fn find(&self, language: &str) -> Option<&dyn LanguageProvider> {
        self.providers
            .iter()
            .find(|p| p.supports(language))
            .map(|p| p.as_ref())
    }

    pub fn providers(&self) -> &[Box<dyn LanguageProvider>] {
        &self.providers
    }
}
