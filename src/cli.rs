use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0-1ba958a` - with a fresh commit
/// * `0.1.0` - when built outside of a git checkout
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| {
    match option_env!("VERGEN_GIT_DESCRIBE") {
        Some(describe) if !describe.is_empty() && describe != "VERGEN_IDEMPOTENT_OUTPUT" => {
            format!("{}-{}", env!("CARGO_PKG_VERSION"), describe)
        }
        _ => env!("CARGO_PKG_VERSION").to_string(),
    }
});

#[derive(Parser, Debug)]
#[command(name="vcf2bedpe",
          version=&**FULL_VERSION,
          about="Convert structural variant VCF records to BEDPE",
          long_about = None,
          help_template = "{name} {version}\n{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Convert(ConvertArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Convert(_) => "convert",
        }
    }
}

#[derive(Parser, Debug, Clone)]
pub struct ConvertArgs {
    /// VCF input, plain or gzip-compressed [default: standard input]
    #[arg(
        short = 'i',
        long = "input",
        value_name = "VCF",
        value_parser = check_file_exists
    )]
    pub input: Option<PathBuf>,

    /// Write BEDPE output to a file, gzip-compressed when it ends in .gz [default: standard output]
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: Option<String>,
}

/// Initializes the logger; `-v` selects debug and `-vv` trace output.
///
/// Log lines go to standard error, so warnings about unpaired breakends never
/// end up in the BEDPE stream.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}
