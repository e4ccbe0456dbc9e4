//! Command-line interface for marker.

use clap::Parser;
use std::path::PathBuf;

/// marker - A markdown editor
#[derive(Parser, Debug)]
#[command(name = "marker")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Markdown files to open, one window each
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Start every window in fullscreen
    #[arg(long)]
    pub fullscreen: bool,

    /// Set debug log level (overrides config and RUST_LOG)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Files to open at startup; empty opens one untitled window
    pub files: Vec<PathBuf>,
    /// Force fullscreen regardless of config
    pub fullscreen: bool,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl From<Cli> for RuntimeOptions {
    fn from(cli: Cli) -> Self {
        Self {
            files: cli.files,
            fullscreen: cli.fullscreen,
            log_level: cli.log_level.map(LogLevelArg::to_level_filter),
        }
    }
}

/// Parse the process arguments. Exits on `--help`, `--version` or bad input.
pub fn process_cli() -> RuntimeOptions {
    Cli::parse().into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let options: RuntimeOptions = Cli::try_parse_from(["marker"]).unwrap().into();
        assert!(options.files.is_empty());
        assert!(!options.fullscreen);
        assert_eq!(options.log_level, None);
    }

    #[test]
    fn test_files_and_flags() {
        let cli = Cli::try_parse_from([
            "marker",
            "notes.md",
            "todo.md",
            "--fullscreen",
            "--log-level",
            "debug",
        ])
        .unwrap();
        let options = RuntimeOptions::from(cli);
        assert_eq!(
            options.files,
            [PathBuf::from("notes.md"), PathBuf::from("todo.md")]
        );
        assert!(options.fullscreen);
        assert_eq!(options.log_level, Some(log::LevelFilter::Debug));
    }

    #[test]
    fn test_rejects_unknown_level() {
        assert!(Cli::try_parse_from(["marker", "--log-level", "loud"]).is_err());
    }
}
