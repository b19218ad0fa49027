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

use serde::Deserialize;

pub fn get_filetype(filename: &str) -> &str {
    let iter = filename.split('.');
    match iter.last() {
        Some(s) => s,
        None => "",
    }
}

fn builtin_language(file_type: &str) -> Option<&'static str> {
    match file_type {
        "js" | "mjs" | "cjs" => Some("javascript"),
        "jsx" => Some("javascriptreact"),
        "ts" | "mts" | "cts" => Some("typescript"),
        "tsx" => Some("typescriptreact"),
        _ => None,
    }
}

#[derive(Deserialize, Debug, Default)]
#[serde(from = "BTreeMap<String, String>")]
pub struct ExtensionMap {
    overrides: BTreeMap<String, String>,
}

impl From<BTreeMap<String, String>> for ExtensionMap {
    fn from(overrides: BTreeMap<String, String>) -> ExtensionMap {
        ExtensionMap { overrides }
    }
}

impl ExtensionMap {
    /// The language id for `filename`, configured mappings first.
    pub fn language_for<'a>(&'a self, filename: &str) -> Option<&'a str> {
        let file_type = get_filetype(filename);
        self.overrides
            .get(file_type)
            .map(String::as_str)
            .or_else(|| builtin_language(file_type))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;

    #[test]
    fn test_get_filetype() {
        assert_eq!("ts", get_filetype("src/index.test.ts"))
    }

    #[test]
    fn test_builtin_languages() {
        let map = ExtensionMap::default();
        assert_eq!(Some("javascript"), map.language_for("a.mjs"));
        assert_eq!(Some("javascriptreact"), map.language_for("App.jsx"));
        assert_eq!(Some("typescript"), map.language_for("lib/a.cts"));
        assert_eq!(Some("typescriptreact"), map.language_for("App.tsx"));
        assert_eq!(None, map.language_for("main.rs"));
        assert_eq!(None, map.language_for("Makefile"));
    }

    #[test]
    fn test_overrides() {
        let mut overrides = BTreeMap::new();
        overrides.insert("vue".to_string(), "vue".to_string());
        overrides.insert("js".to_string(), "javascriptreact".to_string());
        let map = ExtensionMap::from(overrides);
        assert_eq!(Some("vue"), map.language_for("App.vue"));
        assert_eq!(Some("javascriptreact"), map.language_for("index.js"));
        assert_eq!(Some("typescript"), map.language_for("index.ts"));
    }
}
