//! Blocking client for OpenAI-compatible chat completion endpoints.

use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{JsonCompletion, LlmError, LlmSettings, Provider, parse_reply};

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ReplyMessage,
}

#[derive(Deserialize)]
struct ReplyMessage {
    content: Option<String>,
}

/// Talks to OpenAI or a local Ollama server through the same
/// `/v1/chat/completions` route.
pub struct OpenAiCompatibleClient {
    http: Client,
    provider: Provider,
    model: String,
    endpoint: String,
    api_key: Option<String>,
}

impl OpenAiCompatibleClient {
    pub fn new(settings: LlmSettings) -> Result<Self, LlmError> {
        let api_key = settings.api_key.filter(|k| !k.trim().is_empty());
        if settings.provider.requires_api_key() && api_key.is_none() {
            return Err(LlmError::MissingApiKey {
                env_var: settings.api_key_env,
            });
        }

        let http = Client::builder().timeout(settings.timeout).build()?;

        info!(
            provider = %settings.provider,
            model = %settings.model,
            base_url = %settings.base_url,
            "LLM client initialised"
        );

        Ok(Self {
            http,
            provider: settings.provider,
            model: settings.model,
            endpoint: endpoint(&settings.base_url),
            api_key,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn provider(&self) -> Provider {
        self.provider
    }

    fn request<'a>(&'a self, system: &'a str, user: &'a str, temperature: f32) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature,
            response_format: self
                .provider
                .supports_json_mode()
                .then_some(ResponseFormat {
                    kind: "json_object",
                }),
        }
    }
}

fn endpoint(base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let base = base.strip_suffix("/v1").unwrap_or(base);
    format!("{base}/v1/chat/completions")
}

impl JsonCompletion for OpenAiCompatibleClient {
    #[instrument(skip(self, system, user), fields(model = %self.model, user_chars = user.len()))]
    fn complete_json(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<Value, LlmError> {
        let mut request = self
            .http
            .post(&self.endpoint)
            .json(&self.request(system, user, temperature));
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response: ChatResponse = request.send()?.error_for_status()?.json()?;
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)?;

        debug!(reply_chars = content.len(), "completion received");
        parse_reply(&content)
    }
}
