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
use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::template::TemplateError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{action} {file}: {source}")]
    File {
        action: &'static str,
        file: String,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("invalid YAML in {}: {source}", .path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid provider definition: {0}")]
    Provider(String),

    #[error("failed to compile pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("git ls-files failed: {0}")]
    Git(String),

    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl Error {
    pub fn file(action: &'static str, file: &str, source: io::Error) -> Error {
        Error::File {
            action,
            file: file.to_string(),
            source,
        }
    }
}
