//! Command line options that are used across applications.

use std::path::{Path, PathBuf};

use clap::{crate_authors, crate_version, value_parser, Arg, ArgAction, ArgMatches, Command};
use dirs::home_dir;
use fern::colors::{Color, ColoredLevelConfig};
use log::LevelFilter;

use crate::{config::Config, errors::KnmiDataErr};

/// Struct to package up command line arguments.
#[derive(Clone, Debug)]
pub struct CommonCmdLineArgs {
    // Path to the root of the store
    root: PathBuf,
    // Loaded configuration
    config: Config,
    // Number of times -v was given
    verbosity: u8,
}

impl CommonCmdLineArgs {
    /// Create a new set of args.
    pub fn new_app(app_name: &'static str, about: &'static str) -> Command {
        Command::new(app_name)
            .author(crate_authors!())
            .about(about)
            .version(crate_version!())
            .arg(
                Arg::new("root")
                    .short('r')
                    .long("root")
                    .global(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Path to the store.")
                    .long_help("Path to the store. Defaults to '${HOME}/knmi/'"),
            )
            .arg(
                Arg::new("config")
                    .short('c')
                    .long("config")
                    .global(true)
                    .value_parser(value_parser!(PathBuf))
                    .help("Path to a configuration file.")
                    .long_help(concat!(
                        "Path to a configuration file. Defaults to 'knmi.toml' in the root of the",
                        " store if it exists, otherwise built in defaults are used."
                    )),
            )
            .arg(
                Arg::new("verbose")
                    .short('v')
                    .long("verbose")
                    .global(true)
                    .action(ArgAction::Count)
                    .help("Log more, may be repeated."),
            )
    }

    /// Process a `Command` to get the parsed values out of it and the matches object so an
    /// application can continue with further argument parsing.
    pub fn matches(app: Command) -> Result<(Self, ArgMatches), KnmiDataErr> {
        let matches = app.get_matches();
        let cmd_line_opts = Self::from_matches(&matches)?;

        Ok((cmd_line_opts, matches))
    }

    /// Get the common values out of matches that have already been parsed.
    pub fn from_matches(matches: &ArgMatches) -> Result<Self, KnmiDataErr> {
        let root = match matches.get_one::<PathBuf>("root") {
            Some(root) => root.clone(),
            None => home_dir().map(|hd| hd.join("knmi")).ok_or_else(|| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "no home directory, use --root",
                )
            })?,
        };

        let config = Config::load(
            matches.get_one::<PathBuf>("config").map(PathBuf::as_path),
            &root,
        )?;
        let verbosity = matches.get_count("verbose");

        Ok(CommonCmdLineArgs {
            root,
            config,
            verbosity,
        })
    }

    /// Get the root of the store
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// How chatty the log should be.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => std::env::var("RUST_LOG")
                .ok()
                .and_then(|level| level.parse().ok())
                .unwrap_or(LevelFilter::Info),
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Send log messages to stderr.
pub fn setup_logging(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    let colors = ColoredLevelConfig::new()
        .trace(Color::White)
        .debug(Color::Cyan)
        .info(Color::Blue)
        .warn(Color::Yellow)
        .error(Color::Magenta);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}] {}: {}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S"),
                colors.color(record.level()),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stderr())
        .apply()
}
