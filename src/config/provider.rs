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
use serde::Deserialize;

use crate::error::Error;
use crate::provider::{CommentDelimiters, HeaderFields, HeaderProvider, Locale, TimestampFormat};

fn default_start() -> String {
    "/*".to_string()
}

fn default_end() -> String {
    "*/".to_string()
}

fn default_timezone() -> String {
    "Asia/Shanghai".to_string()
}

#[derive(Deserialize, Debug)]
pub struct DateConfig {
    #[serde(default)]
    locale: Locale,
    #[serde(default = "default_timezone")]
    timezone: String,
}

impl Default for DateConfig {
    fn default() -> Self {
        DateConfig {
            locale: Locale::default(),
            timezone: default_timezone(),
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct Config {
    languages: Vec<String>,

    #[serde(default = "default_start")]
    block_comment_start: String,
    #[serde(default = "default_end")]
    block_comment_end: String,
    per_line_char: Option<String>,

    author: String,
    affiliation: String,
    email: String,

    columns: Option<usize>,

    #[serde(default)]
    date: DateConfig,
}

impl Config {
    pub fn provider(&self) -> Result<HeaderProvider, Error> {
        let delimiters = CommentDelimiters::new(
            &self.block_comment_start,
            &self.block_comment_end,
            self.per_line_char.as_deref(),
        );

        let fields = HeaderFields {
            author: self.author.clone(),
            affiliation: self.affiliation.clone(),
            email: self.email.clone(),
        };

        let timestamp = TimestampFormat::new(self.date.locale, &self.date.timezone)?;

        Ok(
            HeaderProvider::new(self.languages.clone(), delimiters, fields, timestamp)?
                .with_columns(self.columns),
        )
    }
}
