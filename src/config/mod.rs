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
use std::env;
use std::fs::File;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Deserialize;

pub use default::DEFAULT_CONFIG;
pub use language::ExtensionMap;

use crate::config::provider::Config as ProviderConfig;
use crate::error::Error;
use crate::provider::{LanguageProvider, ProviderRegistry};

mod default;
mod language;
mod provider;

const CONFIG_FILE_NAME: &str = ".fileheader.yml";

fn default_off() -> bool {
    false
}

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default = "default_off")]
    pub change_in_place: bool,
    #[serde(default = "default_off")]
    pub refresh_existing: bool,

    #[serde(default)]
    pub excludes: ExcludeList,
    #[serde(default)]
    pub extensions: ExtensionMap,
    #[serde(default)]
    providers: Vec<ProviderConfig>,
}

impl Config {
    pub fn add_exclude(&mut self, pat: &str) -> Result<(), Error> {
        self.excludes.add_exclude(pat)
    }

    /// Build every configured provider, in definition order.
    pub fn registry(&self) -> Result<ProviderRegistry, Error> {
        let mut providers: Vec<Box<dyn LanguageProvider>> = Vec::new();
        for cfg in &self.providers {
            providers.push(Box::new(cfg.provider()?));
        }

        Ok(ProviderRegistry::new(providers))
    }
}

impl Default for Config {
    fn default() -> Self {
        serde_yaml::from_str(DEFAULT_CONFIG).expect("The default config is invalid?")
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct ExcludeList(#[serde(with = "serde_regex")] Vec<Regex>);

impl ExcludeList {
    pub fn is_match(&self, s: &str) -> bool {
        self.0.iter().any(|r| r.is_match(s))
    }

    pub fn add_exclude(&mut self, pat: &str) -> Result<(), Error> {
        self.0.insert(0, Regex::new(pat)?);
        Ok(())
    }
}

pub fn xdg_config_dir() -> Option<PathBuf> {
    match env::var("XDG_CONFIG_HOME") {
        Ok(d) => Some(PathBuf::from(d)),
        Err(_) => match env::var("HOME") {
            Ok(home) => {
                let mut home_dir = PathBuf::from(home);
                home_dir.push(".config");
                Some(home_dir)
            }
            Err(_) => None,
        },
    }
}

/// Walk up from `start` searching for the first .fileheader.yml config
/// file available else find the global config file.
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        dir.push(CONFIG_FILE_NAME);
        if dir.exists() {
            return Some(dir);
        }

        // Pop the .fileheader.yml file we added
        dir.pop();

        // Move up a directory checking if we have hit root yet
        if !dir.pop() {
            break;
        }
    }

    if let Some(mut global) = xdg_config_dir() {
        global.push("fileheader");
        global.push("config.yml");
        if global.exists() {
            return Some(global);
        }
    }

    None
}

pub fn load_config_from(path: &Path) -> Result<Config, Error> {
    let f = File::open(path)
        .map_err(|e| Error::file("failed to open", &path.display().to_string(), e))?;
    serde_yaml::from_reader(f).map_err(|source| Error::Config {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_config() -> Result<Config, Error> {
    let cwd = env::current_dir()?;
    match find_config_file(&cwd) {
        Some(path) => {
            info!("loading config from {}", path.display());
            load_config_from(&path)
        }
        None => {
            info!("no {} found, using the default config", CONFIG_FILE_NAME);
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::prelude::*;

    use super::*;
    use crate::clock::FixedClock;
    use crate::provider::{builtin_providers, Variables};
    use crate::template::Interpolator;

    #[test]
    fn test_default_config_matches_builtin_provider() {
        let config = Config::default();
        let registry = config.registry().unwrap();
        assert_eq!(1, registry.providers().len());

        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 5, 29, 0, 5, 9).unwrap());
        let vars = Variables::default();
        let configured = registry.providers()[0]
            .render_header(&Interpolator, &vars, &clock)
            .unwrap();
        let builtin = builtin_providers()[0]
            .render_header(&Interpolator, &vars, &clock)
            .unwrap();
        assert_eq!(builtin, configured);
    }

    #[test]
    fn test_default_excludes() {
        let config = Config::default();
        assert!(config.excludes.is_match("node_modules/react/index.js"));
        assert!(config.excludes.is_match("dist/app.min.js"));
        assert!(config.excludes.is_match("yarn.lock"));
        assert!(config.excludes.is_match("web/package-lock.json"));
        assert!(config.excludes.is_match("types/foo.d.ts"));
        assert!(config.excludes.is_match(".git/config"));
        assert!(!config.excludes.is_match("src/app.ts"));
        assert!(!config.excludes.is_match("src/components/Block.tsx"));
        assert!(!config.excludes.is_match("src/clock.ts"));
        assert!(!config.excludes.is_match("src/util/unlock.js"));
        assert!(!config.excludes.is_match("types/foo.d.tsx"));
        assert!(!config.excludes.is_match("src/digit/index.js"));
        assert!(!config.change_in_place);
        assert!(!config.refresh_existing);
    }

    #[test]
    fn test_add_exclude() {
        let mut config = Config::default();
        config.add_exclude("^vendor/").unwrap();
        assert!(config.excludes.is_match("vendor/lib.js"));
        assert!(config.add_exclude("(unclosed").is_err());
    }

    #[test]
    fn test_empty_config_falls_back_to_builtin() {
        let config: Config = serde_yaml::from_str("{}").unwrap();
        let registry = config.registry().unwrap();
        assert!(registry.find("javascript").is_some());
        assert!(!config.excludes.is_match("anything"));
    }

    #[test]
    fn test_find_and_load_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "change_in_place: true\nextensions:\n  vue: vue\n",
        )
        .unwrap();

        let found = find_config_file(&nested).unwrap();
        assert_eq!(dir.path().join(CONFIG_FILE_NAME), found);

        let config = load_config_from(&found).unwrap();
        assert!(config.change_in_place);
        assert_eq!(Some("vue"), config.extensions.language_for("App.vue"));
    }

    #[test]
    fn test_invalid_yaml_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "excludes: [").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(err.to_string().contains(CONFIG_FILE_NAME));
    }
}
