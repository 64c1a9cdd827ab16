//! Reading assistant chat
//!
//! A canned responder stands in for a real generation service: replies are
//! picked by keyword and streamed word by word with a fixed delay. The
//! stream is restartable and cancellable so a real backend can slot in
//! behind the same interface.

use std::time::Duration;

use chrono::{DateTime, Utc};
use futures_util::stream::{self, Stream};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Default pause between streamed tokens
pub const DEFAULT_TOKEN_DELAY: Duration = Duration::from_millis(50);

/// Prompt sent by the "Explain selected lines" shortcut
pub const EXPLAIN_PROMPT: &str = "Explain selected lines";

/// Produces replies to free text
pub trait Responder {
    fn respond(&self, input: &str) -> TokenStream;
}

/// Keyword-matched canned replies
#[derive(Debug, Clone)]
pub struct CannedResponder {
    delay: Duration,
}

impl CannedResponder {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Pick the reply text for `input`
    pub fn reply_text(input: &str) -> &'static str {
        let input = input.to_lowercase();
        if input.contains("explain") {
            "This is a simple explanation for the super complicated lines you selected."
        } else if input.contains("paper") {
            "You can upload a paper using the 'Upload Paper' button. I can help you understand it better!"
        } else if input.contains("quiz") || input.contains("test") {
            "Click on the 'Test Knowledge' button to take quizzes on papers you've read or explore your knowledge map."
        } else if input.contains("mode") || input.contains("reading") {
            "We offer three reading modes: Exploratory (for new ideas), Understanding (for comprehensive learning), and Revisiting (for quick review)."
        } else {
            "How can I help you with your academic paper reading experience today? You can ask about reading modes, paper uploads, or knowledge testing."
        }
    }
}

impl Default for CannedResponder {
    fn default() -> Self {
        Self::new(DEFAULT_TOKEN_DELAY)
    }
}

impl Responder for CannedResponder {
    fn respond(&self, input: &str) -> TokenStream {
        TokenStream::new(Self::reply_text(input), self.delay)
    }
}

/// Incremental reply, consumed in order by a single reader
#[derive(Debug, Clone)]
pub struct TokenStream {
    tokens: Vec<String>,
    position: usize,
    delay: Duration,
    cancelled: bool,
}

impl TokenStream {
    /// Split `text` into whitespace-separated tokens, each with a trailing space
    pub fn new(text: &str, delay: Duration) -> Self {
        Self {
            tokens: text.split_whitespace().map(|w| format!("{} ", w)).collect(),
            position: 0,
            delay,
            cancelled: false,
        }
    }

    /// Next token, after the configured delay
    ///
    /// Returns `None` once exhausted or cancelled.
    pub async fn next_token(&mut self) -> Option<String> {
        if self.cancelled {
            return None;
        }
        let token = self.tokens.get(self.position)?.clone();
        self.position += 1;
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Some(token)
    }

    /// Stop producing tokens
    pub fn cancel(&mut self) {
        debug!("Token stream cancelled at {}/{}", self.position, self.tokens.len());
        self.cancelled = true;
    }

    /// Rewind to the first token, clearing cancellation
    pub fn restart(&mut self) {
        self.position = 0;
        self.cancelled = false;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    /// Tokens not yet produced
    pub fn remaining(&self) -> usize {
        if self.cancelled {
            0
        } else {
            self.tokens.len() - self.position
        }
    }

    /// Drain the rest of the stream into one string
    pub async fn collect_text(&mut self) -> String {
        let mut text = String::new();
        while let Some(token) = self.next_token().await {
            text.push_str(&token);
        }
        text
    }

    /// Adapt into a `futures` stream
    pub fn into_stream(self) -> impl Stream<Item = String> {
        stream::unfold(self, |mut tokens| async move {
            let token = tokens.next_token().await?;
            Some((token, tokens))
        })
    }
}

/// Who wrote a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            at: Utc::now(),
        }
    }
}

/// Conversation history for one viewing session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChatHistory {
    messages: Vec<ChatMessage>,
}

impl ChatHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    /// Record `prompt`, stream the reply through `on_token`, record the reply
    pub async fn ask<R, F>(&mut self, responder: &R, prompt: &str, mut on_token: F) -> String
    where
        R: Responder + ?Sized,
        F: FnMut(&str),
    {
        self.push(ChatMessage::new(Role::User, prompt));

        let mut tokens = responder.respond(prompt);
        let mut reply = String::new();
        while let Some(token) = tokens.next_token().await {
            on_token(&token);
            reply.push_str(&token);
        }

        self.push(ChatMessage::new(Role::Assistant, reply.clone()));
        reply
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    #[test]
    fn test_keyword_routing() {
        assert!(CannedResponder::reply_text(EXPLAIN_PROMPT).starts_with("This is a simple explanation"));
        assert!(CannedResponder::reply_text("How do I add a PAPER?").contains("Upload Paper"));
        assert!(CannedResponder::reply_text("can I take a quiz").contains("Test Knowledge"));
        assert!(CannedResponder::reply_text("run a test").contains("Test Knowledge"));
        assert!(CannedResponder::reply_text("which reading modes exist").contains("three reading modes"));
        assert!(CannedResponder::reply_text("hello").starts_with("How can I help"));
    }

    #[test]
    fn test_keyword_priority() {
        // "explain" is checked before "mode"
        assert!(CannedResponder::reply_text("explain this mode").starts_with("This is a simple"));
    }

    #[tokio::test]
    async fn test_tokens_in_order_with_trailing_space() {
        let mut tokens = TokenStream::new("one two  three", Duration::ZERO);
        assert_eq!(tokens.next_token().await.as_deref(), Some("one "));
        assert_eq!(tokens.next_token().await.as_deref(), Some("two "));
        assert_eq!(tokens.next_token().await.as_deref(), Some("three "));
        assert_eq!(tokens.next_token().await, None);
    }

    #[tokio::test]
    async fn test_cancel_and_restart() {
        let mut tokens = TokenStream::new("a b c", Duration::ZERO);
        assert_eq!(tokens.next_token().await.as_deref(), Some("a "));

        tokens.cancel();
        assert!(tokens.is_cancelled());
        assert_eq!(tokens.remaining(), 0);
        assert_eq!(tokens.next_token().await, None);

        tokens.restart();
        assert_eq!(tokens.collect_text().await, "a b c ");
    }

    #[tokio::test]
    async fn test_delay_between_tokens() {
        let mut tokens = TokenStream::new("x y", Duration::from_millis(10));
        let start = tokio::time::Instant::now();
        tokens.collect_text().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_into_stream() {
        let tokens = CannedResponder::new(Duration::ZERO).respond("hello");
        let collected: Vec<String> = tokens.into_stream().collect().await;
        assert_eq!(
            collected.concat().trim_end(),
            CannedResponder::reply_text("hello")
        );
    }

    #[tokio::test]
    async fn test_history_records_both_sides() {
        let responder = CannedResponder::new(Duration::ZERO);
        let mut history = ChatHistory::new();
        let mut streamed = Vec::new();

        let reply = history
            .ask(&responder, "what is a reading mode?", |t| streamed.push(t.to_string()))
            .await;

        assert_eq!(history.messages().len(), 2);
        assert_eq!(history.messages()[0].role, Role::User);
        assert_eq!(history.messages()[0].content, "what is a reading mode?");
        assert_eq!(history.messages()[1].role, Role::Assistant);
        assert_eq!(history.messages()[1].content, reply);
        assert_eq!(streamed.concat(), reply);
    }
}
