//! Output formatting for CLI commands.

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::cli::args::{FaqArgs, OutputFormat};
use crate::error::Result;
use crate::intent::{AttachmentKind, ResolutionResult, ResolutionSource, ResolverSummary};

/// Human-readable rendering of a result.
pub trait HumanOutput {
    /// Lines to print in human mode.
    fn render_human(&self) -> String;
}

/// One answered message, shaped like the chat endpoint's reply.
#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub user_message: String,
    pub bot_response: String,
    /// Local time, `HH:MM`.
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    pub score: f64,
    pub source: ResolutionSource,
}

impl ChatReply {
    /// Build a reply stamped with the given time.
    pub fn new(user_message: &str, result: ResolutionResult, at: DateTime<Local>) -> Self {
        let (pdf, image, file_name) = match result.attachment {
            Some(attachment) => match attachment.kind {
                AttachmentKind::Document => {
                    (Some(attachment.file_id), None, Some(attachment.display_name))
                }
                AttachmentKind::Image => {
                    (None, Some(attachment.file_id), Some(attachment.display_name))
                }
            },
            None => (None, None, None),
        };
        ChatReply {
            user_message: user_message.to_string(),
            bot_response: result.text,
            timestamp: at.format("%H:%M").to_string(),
            pdf,
            image,
            file_name,
            intent: result.intent,
            score: result.score,
            source: result.source,
        }
    }

    /// Build a reply stamped with the current time.
    pub fn now(user_message: &str, result: ResolutionResult) -> Self {
        Self::new(user_message, result, Local::now())
    }
}

impl HumanOutput for ChatReply {
    fn render_human(&self) -> String {
        let mut out = format!("[{}] {}", self.timestamp, self.bot_response);
        if let (Some(file), Some(name)) = (self.pdf.as_ref().or(self.image.as_ref()), &self.file_name) {
            out.push_str(&format!("\n  Attachment: {name} ({file})"));
        }
        out
    }
}

impl HumanOutput for Vec<ChatReply> {
    fn render_human(&self) -> String {
        self.iter()
            .map(|reply| format!("> {}\n{}", reply.user_message, reply.render_human()))
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// What the engine loaded.
#[derive(Debug, Clone, Serialize)]
pub struct EngineReport {
    pub backends: Vec<ResolverSummary>,
    pub knowledge_entries: usize,
    pub document_intents: usize,
    pub cohorts: usize,
}

impl HumanOutput for EngineReport {
    fn render_human(&self) -> String {
        let mut lines = Vec::new();
        for (i, backend) in self.backends.iter().enumerate() {
            let role = if i == 0 { "primary" } else { "stand-in" };
            let status = if backend.available { "available" } else { "unavailable" };
            lines.push(format!("{role}: {} ({status})", backend.name));
            for (key, value) in &backend.details {
                lines.push(format!("  {key}: {value}"));
            }
        }
        lines.push(format!("knowledge entries: {}", self.knowledge_entries));
        lines.push(format!("document intents: {}", self.document_intents));
        lines.push(format!("cohort schedules: {}", self.cohorts));
        lines.join("\n")
    }
}

/// Output a result in the selected format.
pub fn output_result<T: Serialize + HumanOutput>(result: &T, args: &FaqArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            println!("{}", result.render_human());
            Ok(())
        }
        OutputFormat::Json => output_json(result, args),
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &FaqArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}
