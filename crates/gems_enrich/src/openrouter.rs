use std::fmt;

use async_trait::async_trait;
use gems_core::{Digest, Error, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::prompt::{build_user_prompt, SYSTEM_PROMPT};

const CHAT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
const DEFAULT_MODEL: &str = "openrouter/auto";

/// Produces a digest for one article. A trait so the batch job can run
/// against a stub model in tests.
#[async_trait]
pub trait DigestModel: Send + Sync {
    async fn digest(&self, title: &str, url: &str, excerpt: &str) -> Result<Digest>;
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: String,
}

/// Chat-completion client for the OpenRouter endpoint.
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl fmt::Debug for OpenRouterClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenRouterClient")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl OpenRouterClient {
    pub fn new(api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            base_url: CHAT_COMPLETIONS_URL.to_string(),
        }
    }

    /// Build from `OPENROUTER_API_KEY` (required) and `OPENROUTER_MODEL`
    /// (optional override).
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENROUTER_API_KEY")
            .map_err(|_| Error::Enrichment("OPENROUTER_API_KEY is required".to_string()))?;
        let model = std::env::var("OPENROUTER_MODEL").ok();
        Ok(Self::new(api_key, model))
    }

    /// Point the client at a different chat-completions endpoint.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl DigestModel for OpenRouterClient {
    async fn digest(&self, title: &str, url: &str, excerpt: &str) -> Result<Digest> {
        let body = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage { role: "system".to_string(), content: SYSTEM_PROMPT.to_string() },
                ChatMessage { role: "user".to_string(), content: build_user_prompt(title, url, excerpt) },
            ],
            temperature: 0.3,
            max_tokens: 600,
        };

        let start = std::time::Instant::now();
        debug!("Digest request - model={}, excerpt_chars={}", self.model, excerpt.chars().count());

        let resp = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", "https://github.com/curated-gems")
            .header("X-Title", "Curated Gems RSS Summarizer")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Enrichment(format!("chat completion returned HTTP {}", status.as_u16())));
        }

        let chat: ChatResponse = resp.json().await?;
        let content = chat
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .unwrap_or("{}");

        info!(
            "Digest response received - duration={:.2}s, content_chars={}",
            start.elapsed().as_secs_f32(),
            content.chars().count()
        );

        Ok(parse_digest_content(content))
    }
}

/// Parse the model's message content. Non-JSON replies degrade to an empty
/// digest rather than failing the item.
pub fn parse_digest_content(content: &str) -> Digest {
    match serde_json::from_str(content) {
        Ok(digest) => digest,
        Err(e) => {
            warn!("Model reply was not valid digest JSON ({}), using empty digest", e);
            Digest::default()
        }
    }
}
