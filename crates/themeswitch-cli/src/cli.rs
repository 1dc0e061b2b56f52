//! Argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use themeswitch::{ColorMode, OutputMode};

/// Resolve, toggle and watch the light/dark theme preference
#[derive(Parser, Debug)]
#[command(name = "themeswitch", about, version, propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Config file (default: $THEMESWITCH_CONFIG, then <config dir>/themeswitch/config.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Store file, overriding the per-origin default
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,

    /// Origin the preference is scoped to
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Storage key for the preference
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Platform preference: ask the OS, or force one
    #[arg(long, global = true, value_enum, default_value_t = SystemArg::Auto)]
    pub system: SystemArg,

    /// Output mode
    #[arg(long, global = true, value_enum, default_value_t = OutputArg::Auto)]
    pub output: OutputArg,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the theme that applies at load; storage is not touched
    Resolve,
    /// Invert the current theme and remember the choice
    Toggle,
    /// Show the applied theme, stored preference and platform preference
    Status,
    /// Forget the stored choice and follow the platform again
    Reset,
    /// Follow platform changes until interrupted
    Watch {
        /// Poll interval in milliseconds (default from config)
        #[arg(long, value_name = "MS")]
        interval_ms: Option<u64>,
        /// Stop after this many polls
        #[arg(long, value_name = "N")]
        max_polls: Option<u64>,
    },
    /// Print the toggle control as HTML
    Button {
        /// Element id
        #[arg(long, default_value = "theme-toggle")]
        id: String,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum SystemArg {
    Auto,
    Dark,
    Light,
}

impl SystemArg {
    /// The forced mode, or `None` to ask the OS.
    pub fn forced(self) -> Option<ColorMode> {
        match self {
            SystemArg::Auto => None,
            SystemArg::Dark => Some(ColorMode::Dark),
            SystemArg::Light => Some(ColorMode::Light),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputArg {
    Auto,
    Term,
    Text,
    Json,
}

impl From<OutputArg> for OutputMode {
    fn from(arg: OutputArg) -> Self {
        match arg {
            OutputArg::Auto => OutputMode::Auto,
            OutputArg::Term => OutputMode::Term,
            OutputArg::Text => OutputMode::Text,
            OutputArg::Json => OutputMode::Json,
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
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "themeswitch",
            "toggle",
            "--system",
            "dark",
            "--output",
            "json",
        ])
        .unwrap();
        assert!(matches!(cli.command, Command::Toggle));
        assert_eq!(cli.system.forced(), Some(ColorMode::Dark));
        assert_eq!(OutputMode::from(cli.output), OutputMode::Json);
    }

    #[test]
    fn test_watch_options() {
        let cli = Cli::try_parse_from(["themeswitch", "watch", "--max-polls", "3"]).unwrap();
        match cli.command {
            Command::Watch {
                interval_ms,
                max_polls,
            } => {
                assert_eq!(interval_ms, None);
                assert_eq!(max_polls, Some(3));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
