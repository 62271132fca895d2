//! Chat completion backends: what turns a conversation into the model's next reply.
use eyre::{Result, eyre};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::Config;
use crate::protocol::Message;

/// Give up after this many retries of a transient failure.
const MAX_RETRIES: u32 = 6;

/// Keep error bodies short; they end up in logs.
const MAX_ERROR_BODY_LEN: usize = 200;

#[async_trait::async_trait]
pub trait ChatBackend: Send + Sync {
    /// Ask for the assistant's next message given the whole conversation so far.
    async fn complete(&self, messages: &[Message]) -> Result<String>;
}

#[derive(Debug)]
pub enum ChatError {
    Transport(reqwest::Error),
    Status { code: u16, body: String },
    Decode(serde_json::Error),
    Empty,
}

impl std::fmt::Display for ChatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatError::Transport(e) => write!(f, "transport error: {e}"),
            ChatError::Status { code, body } => write!(f, "api returned {code}: {body}"),
            ChatError::Decode(e) => write!(f, "cannot decode completion: {e}"),
            ChatError::Empty => write!(f, "completion has no content"),
        }
    }
}

impl std::error::Error for ChatError {}

impl ChatError {
    /// Worth retrying: the same request may well succeed in a moment.
    fn is_transient(&self) -> bool {
        match self {
            ChatError::Transport(e) => e.is_timeout() || e.is_connect(),
            ChatError::Status { code, .. } => *code == 429 || *code >= 500,
            ChatError::Decode(_) | ChatError::Empty => false,
        }
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [Message],
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Pull the first choice's text out of a `/chat/completions` response body.
fn parse_completion(body: &str) -> std::result::Result<String, ChatError> {
    let response: CompletionResponse = serde_json::from_str(body).map_err(ChatError::Decode)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .filter(|c| !c.trim().is_empty())
        .ok_or(ChatError::Empty)
}

fn truncate(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY_LEN) {
        Some((cut, _)) => format!("{}…", &body[..cut]),
        None => body.to_string(),
    }
}

/// OpenAI-compatible chat completions over HTTPS.
pub struct OpenAiChat {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
}

/// Build a configured HTTP client with a descriptive User-Agent.
fn build_http_client() -> Result<reqwest::Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(
        reqwest::header::USER_AGENT,
        reqwest::header::HeaderValue::from_static(concat!("mend/", env!("CARGO_PKG_VERSION"))),
    );
    let client = reqwest::Client::builder()
        .default_headers(headers)
        .use_rustls_tls()
        .connect_timeout(Duration::from_secs(30))
        .timeout(Duration::from_secs(600))
        .build()?;
    Ok(client)
}

impl OpenAiChat {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_http_client()?,
            url: format!("{}/chat/completions", config.api_base),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn attempt(&self, messages: &[Message]) -> std::result::Result<String, ChatError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
        };
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(ChatError::Transport)?;
        let status = response.status();
        let body = response.text().await.map_err(ChatError::Transport)?;
        if !status.is_success() {
            return Err(ChatError::Status {
                code: status.as_u16(),
                body: truncate(&body),
            });
        }
        parse_completion(&body)
    }
}

#[async_trait::async_trait]
impl ChatBackend for OpenAiChat {
    async fn complete(&self, messages: &[Message]) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.attempt(messages).await {
                Ok(reply) => return Ok(reply),
                Err(e) if e.is_transient() && attempt < MAX_RETRIES => {
                    let delay = Duration::from_millis(500u64 << attempt.min(6));
                    tracing::warn!(attempt, error = %e, "chat: transient failure, retrying in {delay:?}");
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(eyre!(e)),
            }
        }
    }
}
