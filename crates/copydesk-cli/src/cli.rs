//! Command-line interface definition using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Copydesk - multi-agent marketing article generator
#[derive(Parser, Debug)]
#[command(name = "copydesk")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Default log level derived from the verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an article for a request
    Write {
        /// What the article should be about
        #[arg(required = true)]
        request: String,

        /// Additional guidance for the generation roles
        #[arg(short, long, default_value = "")]
        instructions: String,

        /// Score the finished article in the background
        #[arg(short, long)]
        evaluate: bool,
    },

    /// Run offline batch evaluation over a JSONL request file
    Eval {
        /// Path to the input rows (one {"request", "instructions"} object per line)
        #[arg(required = true)]
        data: PathBuf,

        /// Where to write per-row results as JSONL
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_command_parses() {
        let cli = Cli::parse_from([
            "copydesk",
            "write",
            "camping trends",
            "--instructions",
            "be brief",
            "--evaluate",
        ]);
        match cli.command {
            Commands::Write {
                request,
                instructions,
                evaluate,
            } => {
                assert_eq!(request, "camping trends");
                assert_eq!(instructions, "be brief");
                assert!(evaluate);
            }
            _ => panic!("expected write command"),
        }
    }

    #[test]
    fn test_eval_command_parses() {
        let cli = Cli::parse_from(["copydesk", "eval", "inputs.jsonl"]);
        match cli.command {
            Commands::Eval { data, output } => {
                assert_eq!(data, PathBuf::from("inputs.jsonl"));
                assert!(output.is_none());
            }
            _ => panic!("expected eval command"),
        }
    }

    #[test]
    fn test_log_level_from_verbosity() {
        let cli = Cli::parse_from(["copydesk", "write", "r"]);
        assert_eq!(cli.log_level(), "info");

        let cli = Cli::parse_from(["copydesk", "-vv", "write", "r"]);
        assert_eq!(cli.log_level(), "trace");
    }
}
