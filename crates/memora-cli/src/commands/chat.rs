//! Chat command handler

use std::io::{self, Write};
use std::pin::pin;

use anyhow::Result;
use futures_util::StreamExt;

use memora_core::chat::EXPLAIN_PROMPT;
use memora_core::{CannedResponder, ChatHistory, Config, Responder};

use crate::output::{Output, OutputFormat};

/// Ask the reading assistant a question and stream the reply
pub async fn ask(
    config: &Config,
    message: Option<String>,
    explain: bool,
    output: &Output,
) -> Result<()> {
    let prompt = if explain {
        EXPLAIN_PROMPT.to_string()
    } else {
        message.unwrap_or_default()
    };
    let responder = CannedResponder::new(config.token_delay());

    match output.format {
        OutputFormat::Human => {
            let mut tokens = pin!(responder.respond(&prompt).into_stream());
            let mut stdout = io::stdout();
            while let Some(token) = tokens.next().await {
                write!(stdout, "{}", token)?;
                stdout.flush()?;
            }
            writeln!(stdout)?;
        }
        OutputFormat::Json => {
            let mut history = ChatHistory::new();
            history.ask(&responder, &prompt, |_| {}).await;
            println!("{}", serde_json::to_string_pretty(history.messages())?);
        }
        OutputFormat::Quiet => {
            let reply = responder.respond(&prompt).collect_text().await;
            println!("{}", reply.trim_end());
        }
    }

    Ok(())
}
