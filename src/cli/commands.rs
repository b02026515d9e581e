//! Command implementations for the campus-faq CLI.

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::EngineConfig;
use crate::engine::FaqEngine;
use crate::intent::ResolutionSource;

/// Execute a CLI command.
pub fn execute_command(args: FaqArgs) -> Result<()> {
    let config = load_config(&args)?;
    let engine = FaqEngine::from_config(&config).context("failed to build the engine")?;

    match &args.command {
        Command::Ask(ask_args) => ask(&engine, ask_args, &args),
        Command::Chat => chat(&engine, &args),
        Command::Batch(batch_args) => batch(&engine, batch_args, &args),
        Command::Inspect => inspect(&engine, &args),
    }
}

/// Read the configuration file, if any, and apply command line overrides.
pub fn load_config(args: &FaqArgs) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("cannot load configuration {}", path.display()))?,
        None => EngineConfig::default(),
    };

    if let Some(backend) = args.backend {
        config.backend = backend.into();
    }
    if let Some(model) = &args.model {
        config.model_path = Some(model.clone());
    }
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

/// Answer one question.
fn ask(engine: &FaqEngine, ask_args: &AskArgs, args: &FaqArgs) -> Result<()> {
    let utterance = ask_args.utterance();
    let reply = ChatReply::now(&utterance, engine.resolve(&utterance));
    output_result(&reply, args)?;
    Ok(())
}

/// Interactive session on stdin.
fn chat(engine: &FaqEngine, args: &FaqArgs) -> Result<()> {
    if args.verbosity() > 0 && args.output_format == OutputFormat::Human {
        println!("ESTIN Bot: Hello! I'm the ESTIN assistant. How can I help you? (Type 'quit' to exit)");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if args.output_format == OutputFormat::Human {
            print!("You: ");
            io::stdout().flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        let line = line.context("cannot read from stdin")?;
        let utterance = line.trim();
        if utterance.is_empty() {
            continue;
        }

        let result = engine.resolve(utterance);
        let leaving = result.source == ResolutionSource::Farewell
            && utterance.eq_ignore_ascii_case("quit");
        output_result(&ChatReply::now(utterance, result), args)?;
        if leaving {
            break;
        }
    }
    Ok(())
}

/// Answer every non-empty line of a file, in input order.
fn batch(engine: &FaqEngine, batch_args: &BatchArgs, args: &FaqArgs) -> Result<()> {
    let content = fs::read_to_string(&batch_args.file)
        .with_context(|| format!("cannot read {}", batch_args.file.display()))?;
    let questions: Vec<&str> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    let replies: Vec<ChatReply> = if batch_args.sequential {
        questions
            .iter()
            .map(|q| ChatReply::now(q, engine.resolve(q)))
            .collect()
    } else {
        questions
            .par_iter()
            .map(|q| ChatReply::now(q, engine.resolve(q)))
            .collect()
    };

    log::info!("Answered {} questions", replies.len());
    output_result(&replies, args)?;
    Ok(())
}

/// Report what the engine loaded.
fn inspect(engine: &FaqEngine, args: &FaqArgs) -> Result<()> {
    let state = engine.state();
    let tables = state.attachment_policy().config();
    let report = EngineReport {
        backends: state.backends(),
        knowledge_entries: state.knowledge().len(),
        document_intents: tables.documents.len(),
        cohorts: tables.cohorts.len(),
    };
    output_result(&report, args)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    use crate::config::BackendKind;

    #[test]
    fn test_overrides_apply_on_top_of_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("engine.json");
        fs::write(&path, r#"{"backend": "rules", "seed": 1}"#).unwrap();

        let args = FaqArgs::try_parse_from([
            "campus-faq",
            "--config",
            path.to_str().unwrap(),
            "--backend",
            "classifier",
            "--seed",
            "9",
            "inspect",
        ])
        .unwrap();
        let config = load_config(&args).unwrap();
        assert_eq!(config.backend, BackendKind::Classifier);
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_missing_config_is_reported() {
        let args =
            FaqArgs::try_parse_from(["campus-faq", "--config", "/nonexistent.json", "inspect"])
                .unwrap();
        let err = load_config(&args).unwrap_err();
        assert!(err.to_string().contains("cannot load configuration"));
    }
}
