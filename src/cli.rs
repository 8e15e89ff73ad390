use clap::Parser;
use std::path::PathBuf;

/// Routine Editor - edit workout routines and keep them on disk
#[derive(Parser, Debug)]
#[command(name = "routine-editor")]
#[command(about = "Edit workout routines (sets and reps) with local persistence")]
#[command(version)]
pub struct Cli {
    /// Directory holding the stored routines
    #[arg(long, default_value = "routine-data")]
    pub data_dir: PathBuf,

    /// Keep everything in memory; nothing is written to disk
    #[arg(long, conflicts_with = "data_dir")]
    pub memory: bool,

    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn default_log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["routine-editor"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("routine-data"));
        assert!(!cli.memory);
        assert_eq!(cli.default_log_level(), "info");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from(["routine-editor", "--data-dir", "/tmp/r", "-v"]).unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("/tmp/r"));
        assert_eq!(cli.default_log_level(), "debug");

        let cli = Cli::try_parse_from(["routine-editor", "--memory"]).unwrap();
        assert!(cli.memory);
    }

    #[test]
    fn test_memory_conflicts_with_explicit_dir() {
        assert!(Cli::try_parse_from(["routine-editor", "--memory", "--data-dir", "x"]).is_err());
    }
}
