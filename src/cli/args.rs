//! Command line argument parsing for the campus-faq CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::BackendKind;

/// campus-faq - answers student questions about the university
#[derive(Parser, Debug, Clone)]
#[command(name = "campus-faq")]
#[command(about = "Intent-resolution engine for a university FAQ assistant")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct FaqArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Engine configuration file (JSON)
    #[arg(short, long, value_name = "CONFIG_FILE", env = "CAMPUS_FAQ_CONFIG")]
    pub config: Option<PathBuf>,

    /// Primary backend, overriding the configuration
    #[arg(short, long)]
    pub backend: Option<BackendArg>,

    /// Classifier export, overriding the configuration
    #[arg(long, value_name = "MODEL_FILE")]
    pub model: Option<PathBuf>,

    /// Seed for choosing among several answers
    #[arg(long)]
    pub seed: Option<u64>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl FaqArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Answer one question
    Ask(AskArgs),

    /// Interactive session; type 'quit' to leave
    Chat,

    /// Answer every line of a file
    Batch(BatchArgs),

    /// Show what the engine loaded
    Inspect,
}

/// Arguments for a single question
#[derive(Parser, Debug, Clone)]
pub struct AskArgs {
    /// The question
    #[arg(value_name = "QUESTION", required = true, num_args = 1..)]
    pub question: Vec<String>,
}

impl AskArgs {
    /// Words joined back into one utterance.
    pub fn utterance(&self) -> String {
        self.question.join(" ")
    }
}

/// Arguments for batch resolution
#[derive(Parser, Debug, Clone)]
pub struct BatchArgs {
    /// File with one question per line
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Resolve sequentially instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

/// Backend choice on the command line
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendArg {
    /// Keyword rules
    Rules,
    /// Feed-forward classifier
    Classifier,
}

impl From<BackendArg> for BackendKind {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Rules => BackendKind::Rules,
            BackendArg::Classifier => BackendKind::Classifier,
        }
    }
}

/// Output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ask() {
        let args = FaqArgs::try_parse_from([
            "campus-faq", "-vv", "--format", "json", "ask", "when", "are", "exams?",
        ])
        .unwrap();

        assert_eq!(args.verbosity(), 2);
        assert_eq!(args.output_format, OutputFormat::Json);
        match args.command {
            Command::Ask(ask) => assert_eq!(ask.utterance(), "when are exams?"),
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_quiet_overrides_verbose() {
        let args = FaqArgs::try_parse_from(["campus-faq", "-q", "-vvv", "inspect"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_backend_override() {
        let args = FaqArgs::try_parse_from([
            "campus-faq", "--backend", "classifier", "--model", "data.json", "batch", "q.txt",
        ])
        .unwrap();
        assert_eq!(args.backend.map(BackendKind::from), Some(BackendKind::Classifier));
        assert_eq!(args.model, Some(PathBuf::from("data.json")));
    }

    #[test]
    fn test_ask_requires_question() {
        assert!(FaqArgs::try_parse_from(["campus-faq", "ask"]).is_err());
    }
}
