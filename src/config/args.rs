//! CLI argument parsing using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// audiotray - tray menus for audio devices and streams
///
/// Replays recorded audio-server sessions through the menu state engine
#[derive(Parser, Debug)]
#[command(name = "audiotray")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,

    /// Verbose output (can be repeated for more verbosity)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode - only show errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log output to file
    #[arg(long, global = true)]
    pub log: Option<String>,

    /// Settings file (default: <config dir>/audiotray/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a recorded session and print the resulting menus
    Replay {
        /// TOML script of [[step]] tables
        script: PathBuf,

        /// Also print every call made into the tray shell
        #[arg(long)]
        calls: bool,
    },

    /// Print a sample settings file
    SampleConfig,
}

impl Args {
    /// Get the log level based on verbose/quiet flags, falling back to the
    /// level from the settings file
    pub fn log_level(&self, configured: &str) -> tracing::Level {
        if self.quiet {
            return tracing::Level::ERROR;
        }
        match self.verbose {
            0 => configured.parse().unwrap_or(tracing::Level::INFO),
            1 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_replay() {
        let args = Args::parse_from(["audiotray", "-vv", "replay", "session.toml", "--calls"]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.log_level("warn"), tracing::Level::TRACE);
        match args.command {
            Command::Replay { script, calls } => {
                assert_eq!(script, PathBuf::from("session.toml"));
                assert!(calls);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_log_level_from_settings() {
        let args = Args::parse_from(["audiotray", "sample-config"]);
        assert_eq!(args.log_level("warn"), tracing::Level::WARN);
        assert_eq!(args.log_level("nonsense"), tracing::Level::INFO);

        let quiet = Args::parse_from(["audiotray", "-q", "sample-config"]);
        assert_eq!(quiet.log_level("debug"), tracing::Level::ERROR);
    }
}
