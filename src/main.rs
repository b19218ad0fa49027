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

#[macro_use]
extern crate log;

use std::fs;
use std::path::Path;
use std::process;
use std::process::Command;

use clap::Parser;

use clock::SystemClock;
use config::{Config, DEFAULT_CONFIG};
use error::Error;
use provider::Variables;
use stamper::Stamper;
use template::Interpolator;

mod clock;
mod comments;
mod config;
mod error;
mod provider;
mod stamper;
mod template;

fn get_project_files() -> Result<Vec<String>, Error> {
    let mut files = git_ls_files(Vec::new())?;

    let mut new_unstaged_files = git_ls_files(vec!["--others", "--exclude-standard"])?;
    files.append(&mut new_unstaged_files);

    // A symlinked file is stamped through its target, if the target is
    // part of the project at all.
    files.retain(|x| !Path::new(x).is_symlink());
    Ok(files)
}

fn git_ls_files(extra_args: Vec<&str>) -> Result<Vec<String>, Error> {
    let proc = Command::new("git")
        .arg("ls-files")
        .args(extra_args)
        .output()
        .map_err(|e| Error::Git(format!("make sure you're in a git repo: {}", e)))?;

    if !proc.status.success() {
        return Err(Error::Git(String::from_utf8_lossy(&proc.stderr).trim().to_string()));
    }

    let stdout = String::from_utf8(proc.stdout)
        .map_err(|_| Error::Git("git ls-files output was not UTF-8".to_string()))?;

    Ok(stdout
        .split('\n')
        // deleted but uncommitted files are still listed
        .filter(|s| !s.is_empty() && Path::new(s).exists())
        .map(str::to_string)
        .collect())
}

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[arg(help = "Files to stamp, ignored if --project is supplied")]
    files: Vec<String>,

    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(short, long)]
    in_place: bool,

    #[arg(short, long, help = "Exit non-zero if any file is missing a header")]
    check: bool,

    #[arg(short, long, help = "Refresh the date of headers that already exist")]
    refresh: bool,

    #[arg(
        short,
        long,
        help = "A regex which will be used to determine what files to ignore."
    )]
    exclude: Option<String>,

    #[arg(
        short,
        long,
        help = "When specified will stamp the current project files as returned by git ls-files"
    )]
    project: bool,

    #[arg(short, long, help = "Generate a default fileheader config file")]
    generate_config: bool,

    #[arg(
        short,
        long,
        help = "Print the header rendered right now for the given language"
    )]
    language: Option<String>,

    #[arg(long, help = "List the languages each registered provider handles")]
    list_languages: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => return,
        1 => simplelog::LevelFilter::Info,
        2 => simplelog::LevelFilter::Debug,
        _ => simplelog::LevelFilter::Trace,
    };

    let config = simplelog::ConfigBuilder::new()
        .set_time_level(simplelog::LevelFilter::Debug)
        .set_thread_level(simplelog::LevelFilter::Debug)
        .set_target_level(simplelog::LevelFilter::Debug)
        .set_location_level(simplelog::LevelFilter::Trace)
        .build();

    if let Err(e) = simplelog::SimpleLogger::init(level, config) {
        eprintln!("Unable to initialize logging: {}", e);
    }
}

fn main() {
    let matches = Cli::parse();
    init_logging(matches.verbose);

    if matches.generate_config {
        if let Err(e) = fs::write(".fileheader.yml", DEFAULT_CONFIG) {
            println!("Unable to write .fileheader.yml: {}", e);
            process::exit(1);
        }

        process::exit(0);
    }

    let mut config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            println!("Error loading config file: {}", e);
            process::exit(1);
        }
    };

    if matches.list_languages || matches.language.is_some() {
        if let Err(e) = describe(&config, matches.language.as_deref()) {
            println!("{}", e);
            process::exit(1);
        }

        process::exit(0);
    }

    let files: Vec<String> = if matches.project {
        match get_project_files() {
            Ok(files) => files,
            Err(e) => {
                println!("Failed to list project files: {}", e);
                process::exit(1);
            }
        }
    } else if !matches.files.is_empty() {
        matches.files
    } else {
        eprintln!("ERROR: Must provide files to stamp either as arguments or via --project");
        process::exit(10);
    };

    if let Some(exclude) = matches.exclude {
        if let Err(e) = config.add_exclude(&exclude) {
            println!("Failed to compile exclude pattern: {}", e);
            process::exit(1);
        }
    }

    if matches.in_place {
        config.change_in_place = true;
    }

    if matches.refresh {
        config.refresh_existing = true;
    }

    let clock = SystemClock;
    let stamper = match Stamper::new(config, &clock) {
        Ok(s) => s.with_check_mode(matches.check),
        Err(e) => {
            println!("Error loading config file: {}", e);
            process::exit(1);
        }
    };

    match stamper.stamp_files(&files) {
        Err(e) => {
            println!("Failed to stamp files: {}", e);
            process::exit(1);
        }
        Ok(stats) => {
            if matches.check {
                print_files(
                    &stats.files_refreshed,
                    "The following files have a header that would be refreshed",
                );

                if print_files(
                    &stats.files_missing_header,
                    "The following files are missing a header",
                ) {
                    process::exit(1);
                }
            }
        }
    }
}

/// Print the header a provider would render for `language`, or every
/// registered language when none is given.
fn describe(config: &Config, language: Option<&str>) -> Result<(), Error> {
    let registry = config.registry()?;

    match language {
        Some(language) => match registry.find(language) {
            Some(provider) => {
                let variables = Variables::default().with_value("language", language);
                let header = provider.render_header(&Interpolator, &variables, &SystemClock)?;
                println!("{}", header);
            }
            None => {
                return Err(Error::Provider(format!(
                    "no provider handles the language {}",
                    language
                )))
            }
        },
        None => {
            for provider in registry.providers() {
                let delimiters = provider.delimiters();
                for language in provider.languages() {
                    println!("{} {} {}", language, delimiters.start, delimiters.end);
                }
            }
        }
    }

    Ok(())
}

/// Print the given list of files (if non-empty) with a message "The following X
/// Y" where X is the number of files to be printed and Y is the given message
/// parameter. Returns true if files were printed and false otherwise.
fn print_files(files: &[String], message: &str) -> bool {
    if !files.is_empty() {
        eprintln!("{} ({}):", message, files.len());
        for file in files {
            eprintln!("{}", file);
        }
        true
    } else {
        false
    }
}
