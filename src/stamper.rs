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
use std::fs;

use regex::{NoExpand, Regex};

use crate::clock::Clock;
use crate::config::Config;
use crate::error::Error;
use crate::provider::{ProviderRegistry, Variables};
use crate::template::Interpolator;

pub struct Stamper<'a> {
    config: Config,
    registry: ProviderRegistry,
    clock: &'a dyn Clock,
    check_mode: bool,
}

impl<'a> Stamper<'a> {
    pub fn new(config: Config, clock: &'a dyn Clock) -> Result<Stamper<'a>, Error> {
        let registry = config.registry()?;
        Ok(Stamper {
            config,
            registry,
            clock,
            check_mode: false,
        })
    }

    pub fn with_check_mode(mut self, check_mode: bool) -> Stamper<'a> {
        self.check_mode = check_mode;
        self
    }

    pub fn stamp_files(&self, files: &[String]) -> Result<StampStats, Error> {
        let shebang_re = Regex::new(r"^#![^\n]*(\n|$)")?;
        let mut stats = StampStats::new();

        for file in files {
            if self.config.excludes.is_match(file) {
                debug!("skipping {} because it matches an exclude pattern.", file);
                continue;
            }

            let language = match self.config.extensions.language_for(file) {
                Some(l) => l,
                None => {
                    info!("skipping {} because its language is unknown.", file);
                    stats.files_without_provider.push(file.clone());
                    continue;
                }
            };

            let provider = match self.registry.find(language) {
                Some(p) => p,
                None => {
                    info!("skipping {} because no provider handles {}.", file, language);
                    stats.files_without_provider.push(file.clone());
                    continue;
                }
            };

            let variables = Variables::default()
                .with_value("file_name", file)
                .with_value("language", language);
            let header = provider.render_header(&Interpolator, &variables, self.clock)?;

            let mut content =
                fs::read_to_string(file).map_err(|e| Error::file("failed to read", file, e))?;

            // Headers are matched and built with LF endings, CRLF files get
            // their endings restored on output.
            let crlf = content.contains("\r\n");
            if crlf {
                content = content.replace("\r\n", "\n");
            }

            let shebang = match shebang_re.find(&content) {
                Some(m) => {
                    let mut line = m.as_str().to_string();
                    if !line.ends_with('\n') {
                        line.push('\n');
                    }

                    content = content.split_off(m.end());
                    Some(line)
                }
                None => None,
            };

            let existing_re = provider.header_pattern(&Interpolator)?;
            let updated = match existing_re.find(&content) {
                Some(existing) if existing.as_str() == header => {
                    debug!("{} already has an up to date header", file);
                    continue;
                }
                Some(_) if !self.config.refresh_existing => {
                    info!("{} already has a header", file);
                    continue;
                }
                Some(_) => {
                    info!("{} has a header, refreshing its date", file);
                    stats.files_refreshed.push(file.clone());
                    existing_re
                        .replace(&content, NoExpand(header.as_str()))
                        .into_owned()
                }
                None => {
                    info!("{} has no header", file);
                    stats.files_missing_header.push(file.clone());
                    let mut stamped = header;
                    stamped.push_str("\n\n");
                    stamped.push_str(&content);
                    stamped
                }
            };

            if self.check_mode {
                continue;
            }

            let mut output = shebang.unwrap_or_default();
            output.push_str(&updated);
            if crlf {
                output = output.replace('\n', "\r\n");
            }

            if self.config.change_in_place {
                fs::write(file, output.as_bytes())
                    .map_err(|e| Error::file("failed to write", file, e))?;
            } else {
                println!("{}", output);
            }
        }

        Ok(stats)
    }
}

pub struct StampStats {
    pub files_missing_header: Vec<String>,
    pub files_refreshed: Vec<String>,
    pub files_without_provider: Vec<String>,
}

impl StampStats {
    fn new() -> Self {
        Self {
            files_missing_header: Vec::new(),
            files_refreshed: Vec::new(),
            files_without_provider: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use chrono::prelude::*;

    use super::*;
    use crate::clock::FixedClock;

    const MAY_29: &str = "/*
 * @author        Haiyang Liao
 * @affiliation   Nanjing University
 * @email         haiyangliao@nju.edu.cn
 * @date          2024/5/29 08:05:09
 */";

    fn clock(day: u32) -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2024, 5, day, 0, 5, 9).unwrap())
    }

    fn in_place(refresh: bool) -> Config {
        let mut config = Config::default();
        config.change_in_place = true;
        config.refresh_existing = refresh;
        config
    }

    fn write(dir: &Path, name: &str, content: &str) -> String {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path.display().to_string()
    }

    #[test]
    fn test_stamps_missing_header() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "index.ts", "export const x = 1;\n");
        let clock = clock(29);
        let stats = Stamper::new(in_place(false), &clock)
            .unwrap()
            .stamp_files(&[file.clone()])
            .unwrap();

        assert_eq!(vec![file.clone()], stats.files_missing_header);
        assert_eq!(
            format!("{}\n\nexport const x = 1;\n", MAY_29),
            fs::read_to_string(&file).unwrap()
        );
    }

    #[test]
    fn test_stamping_twice_is_a_no_op() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "App.jsx", "export default App;\n");
        let clock = clock(29);
        let stamper = Stamper::new(in_place(false), &clock).unwrap();
        stamper.stamp_files(&[file.clone()]).unwrap();
        let once = fs::read_to_string(&file).unwrap();

        let stats = stamper.stamp_files(&[file.clone()]).unwrap();
        assert!(stats.files_missing_header.is_empty());
        assert_eq!(once, fs::read_to_string(&file).unwrap());
    }

    #[test]
    fn test_existing_header_left_alone_without_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let original = format!("{}\n\nlet a = 2;\n", MAY_29);
        let file = write(dir.path(), "a.js", &original);
        let clock = clock(30);
        let stats = Stamper::new(in_place(false), &clock)
            .unwrap()
            .stamp_files(&[file.clone()])
            .unwrap();

        assert!(stats.files_missing_header.is_empty());
        assert!(stats.files_refreshed.is_empty());
        assert_eq!(original, fs::read_to_string(&file).unwrap());
    }

    #[test]
    fn test_refresh_updates_date_only() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "a.js", &format!("{}\n\nlet a = 2;\n", MAY_29));
        let clock = clock(30);
        let stats = Stamper::new(in_place(true), &clock)
            .unwrap()
            .stamp_files(&[file.clone()])
            .unwrap();

        assert_eq!(vec![file.clone()], stats.files_refreshed);
        assert_eq!(
            format!("{}\n\nlet a = 2;\n", MAY_29.replace("2024/5/29", "2024/5/30")),
            fs::read_to_string(&file).unwrap()
        );
    }

    #[test]
    fn test_shebang_is_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "cli.mjs", "#!/usr/bin/env node\nmain();\n");
        let clock = clock(29);
        Stamper::new(in_place(false), &clock)
            .unwrap()
            .stamp_files(&[file.clone()])
            .unwrap();

        assert_eq!(
            format!("#!/usr/bin/env node\n{}\n\nmain();\n", MAY_29),
            fs::read_to_string(&file).unwrap()
        );

        let bare = write(dir.path(), "bare.mjs", "#!/usr/bin/env node");
        Stamper::new(in_place(false), &clock)
            .unwrap()
            .stamp_files(&[bare.clone()])
            .unwrap();

        assert_eq!(
            format!("#!/usr/bin/env node\n{}\n\n", MAY_29),
            fs::read_to_string(&bare).unwrap()
        );
    }

    #[test]
    fn test_crlf_file_is_stamped_once() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "a.js", "let a = 1;\r\nlet b = 2;\r\n");
        let clock = clock(29);
        let stamper = Stamper::new(in_place(false), &clock).unwrap();
        stamper.stamp_files(&[file.clone()]).unwrap();

        let expected =
            format!("{}\n\nlet a = 1;\nlet b = 2;\n", MAY_29).replace('\n', "\r\n");
        assert_eq!(expected, fs::read_to_string(&file).unwrap());

        let stats = stamper.stamp_files(&[file.clone()]).unwrap();
        assert!(stats.files_missing_header.is_empty());
        assert_eq!(expected, fs::read_to_string(&file).unwrap());
        assert_eq!(1, expected.matches("@author").count());
    }

    #[test]
    fn test_crlf_header_is_refreshed() {
        let dir = tempfile::tempdir().unwrap();
        let original = format!("{}\n\nlet a = 2;\n", MAY_29).replace('\n', "\r\n");
        let file = write(dir.path(), "a.js", &original);
        let clock = clock(30);
        let stats = Stamper::new(in_place(true), &clock)
            .unwrap()
            .stamp_files(&[file.clone()])
            .unwrap();

        assert_eq!(vec![file.clone()], stats.files_refreshed);
        assert_eq!(
            original.replace("2024/5/29", "2024/5/30"),
            fs::read_to_string(&file).unwrap()
        );
    }

    #[test]
    fn test_check_mode_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let file = write(dir.path(), "index.ts", "export {};\n");
        let clock = clock(29);
        let stats = Stamper::new(in_place(false), &clock)
            .unwrap()
            .with_check_mode(true)
            .stamp_files(&[file.clone()])
            .unwrap();

        assert_eq!(vec![file.clone()], stats.files_missing_header);
        assert_eq!("export {};\n", fs::read_to_string(&file).unwrap());
    }

    #[test]
    fn test_unknown_and_excluded_files_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let rust = write(dir.path(), "main.rs", "fn main() {}\n");
        let min = write(dir.path(), "bundle.min.js", "x()\n");
        let clock = clock(29);
        let stats = Stamper::new(in_place(false), &clock)
            .unwrap()
            .stamp_files(&[rust.clone(), min.clone()])
            .unwrap();

        assert_eq!(vec![rust.clone()], stats.files_without_provider);
        assert!(stats.files_missing_header.is_empty());
        assert_eq!("fn main() {}\n", fs::read_to_string(&rust).unwrap());
        assert_eq!("x()\n", fs::read_to_string(&min).unwrap());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let clock = clock(29);
        let result = Stamper::new(in_place(false), &clock)
            .unwrap()
            .stamp_files(&["does/not/exist.ts".to_string()]);
        assert!(result.is_err());
    }
}
