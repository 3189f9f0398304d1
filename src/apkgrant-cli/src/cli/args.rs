//! CLI argument structures and parsing.

use std::path::PathBuf;

use apkgrant_adb::ToolOverrides;
use clap::Parser;

use super::styles::{AFTER_HELP, get_styles};
use crate::pipeline::RunOptions;

/// Environment variable consulted when no level flag is given.
pub const LOG_LEVEL_ENV: &str = "APKGRANT_LOG_LEVEL";

/// Log verbosity level for diagnostics on stderr.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    /// Only show errors
    Error,
    /// Show warnings and errors (default)
    #[default]
    Warn,
    /// Show informational messages, warnings, and errors
    Info,
    /// Show debug messages and above, including every external command
    Debug,
    /// Show all messages including captured command output
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string.
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Parse from string (case-insensitive).
    pub fn from_str_loose(s: &str) -> Option<LogLevel> {
        match s.trim().to_lowercase().as_str() {
            "error" => Some(LogLevel::Error),
            "warn" | "warning" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            "trace" => Some(LogLevel::Trace),
            _ => None,
        }
    }
}

/// Pull every third-party APK from an Android device and grant the
/// permissions it declares.
///
/// Without options the run is fully interactive: pick a device from the
/// menu and the rest proceeds on its own.
#[derive(Debug, Parser)]
#[command(name = "apkgrant")]
#[command(author, version)]
#[command(styles = get_styles(), after_help = AFTER_HELP)]
pub struct Cli {
    /// Path to the adb executable (default: search PATH)
    #[arg(long, env = "APKGRANT_ADB", value_name = "PATH")]
    pub adb: Option<PathBuf>,

    /// Path to the aapt executable (default: search PATH)
    #[arg(long, env = "APKGRANT_AAPT", value_name = "PATH")]
    pub aapt: Option<PathBuf>,

    /// Directory where APKs are pulled to while they are inspected
    #[arg(long, value_name = "DIR", default_value = ".")]
    pub work_dir: PathBuf,

    /// Use this device instead of prompting, if it is connected
    #[arg(long, short = 's', value_name = "SERIAL")]
    pub serial: Option<String>,

    /// Log verbosity for diagnostics written to stderr
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Enable verbose output (same as --log-level debug)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Enable trace-level logging, including captured command output
    #[arg(long)]
    pub trace: bool,
}

impl Cli {
    /// Effective log level: `--trace`, then `--verbose`, then
    /// `--log-level`, then `APKGRANT_LOG_LEVEL`, then the default.
    pub fn log_level(&self) -> LogLevel {
        if self.trace {
            LogLevel::Trace
        } else if self.verbose {
            LogLevel::Debug
        } else if let Some(level) = self.log_level {
            level
        } else {
            std::env::var(LOG_LEVEL_ENV)
                .ok()
                .and_then(|value| LogLevel::from_str_loose(&value))
                .unwrap_or_default()
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            tools: ToolOverrides {
                adb: self.adb.clone(),
                aapt: self.aapt.clone(),
            },
            work_dir: self.work_dir.clone(),
            serial: self.serial.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_is_interactive_default() {
        let cli = Cli::try_parse_from(["apkgrant"]).unwrap();
        assert_eq!(cli.work_dir, PathBuf::from("."));
        assert!(cli.serial.is_none());
        assert!(!cli.verbose);

        let options = cli.run_options();
        assert!(options.serial.is_none());
    }

    #[test]
    fn test_flags_map_to_run_options() {
        let cli = Cli::try_parse_from([
            "apkgrant",
            "--adb",
            "/opt/sdk/adb",
            "--aapt",
            "/opt/sdk/aapt",
            "--work-dir",
            "/tmp/apks",
            "-s",
            "R58M",
        ])
        .unwrap();

        let options = cli.run_options();
        assert_eq!(options.tools.adb, Some(PathBuf::from("/opt/sdk/adb")));
        assert_eq!(options.tools.aapt, Some(PathBuf::from("/opt/sdk/aapt")));
        assert_eq!(options.work_dir, PathBuf::from("/tmp/apks"));
        assert_eq!(options.serial.as_deref(), Some("R58M"));
    }

    #[test]
    fn test_log_level_precedence() {
        let cli = Cli::try_parse_from(["apkgrant", "--trace", "-v", "--log-level", "error"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Trace);

        let cli = Cli::try_parse_from(["apkgrant", "-v", "--log-level", "error"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Debug);

        let cli = Cli::try_parse_from(["apkgrant", "--log-level", "error"]).unwrap();
        assert_eq!(cli.log_level(), LogLevel::Error);
    }

    #[test]
    fn test_from_str_loose() {
        assert_eq!(LogLevel::from_str_loose("WARNING"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::from_str_loose(" debug "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::from_str_loose("loud"), None);
    }
}
