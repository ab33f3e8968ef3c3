//! LLM-backed collaborators.
//!
//! Every collaborator talks to the model through [`JsonCompletion`]: one
//! system prompt, one user prompt, one JSON object back. The production
//! transport is [`OpenAiCompatibleClient`]; tests substitute
//! `crate::scripted::ScriptedCompletion`.

mod client;
mod critic;
mod interpreter;
mod planner;
pub mod prompts;

use std::{fmt, str::FromStr, time::Duration};

use serde_json::Value;
use thiserror::Error;

pub use client::OpenAiCompatibleClient;
pub use critic::LlmCritic;
pub use interpreter::LlmInterpreter;
pub use planner::LlmPlanner;

/// Transport-level failures. Collaborators fold these into the matching
/// application error.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model response was not valid JSON: {reason}")]
    NotJson { reason: String },

    #[error("API key not found; set {env_var}")]
    MissingApiKey { env_var: String },

    #[error("model unavailable: {reason}")]
    Unavailable { reason: String },
}

/// A chat model that answers with a JSON document.
pub trait JsonCompletion: Send + Sync {
    fn complete_json(&self, system: &str, user: &str, temperature: f32)
    -> Result<Value, LlmError>;
}

/// Parse a reply body. Some models wrap the object in a JSON string.
pub(crate) fn parse_reply(content: &str) -> Result<Value, LlmError> {
    if content.trim().is_empty() {
        return Err(LlmError::EmptyResponse);
    }
    let value: Value = serde_json::from_str(content).map_err(|e| LlmError::NotJson {
        reason: e.to_string(),
    })?;
    match value {
        Value::String(inner) => serde_json::from_str(&inner).map_err(|e| LlmError::NotJson {
            reason: format!("string reply did not contain JSON: {e}"),
        }),
        Value::Object(_) => Ok(value),
        other => Err(LlmError::NotJson {
            reason: format!("expected an object, got {other}"),
        }),
    }
}

// ── Settings ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    OpenAi,
    Ollama,
}

impl Provider {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::OpenAi => "openai",
            Self::Ollama => "ollama",
        }
    }

    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::OpenAi => "gpt-4o-mini",
            Self::Ollama => "llama3.1:8b",
        }
    }

    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenAi => "https://api.openai.com",
            Self::Ollama => "http://localhost:11434",
        }
    }

    /// OpenAI requires a key; Ollama ignores it.
    pub const fn requires_api_key(&self) -> bool {
        matches!(self, Self::OpenAi)
    }

    /// Only OpenAI honours `response_format: json_object`.
    pub const fn supports_json_mode(&self) -> bool {
        matches!(self, Self::OpenAi)
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openai" => Ok(Self::OpenAi),
            "ollama" => Ok(Self::Ollama),
            other => Err(format!("unknown provider '{other}', use 'openai' or 'ollama'")),
        }
    }
}

/// Connection settings for [`OpenAiCompatibleClient`].
#[derive(Debug, Clone)]
pub struct LlmSettings {
    pub provider: Provider,
    pub model: String,
    pub base_url: String,
    pub api_key: Option<String>,
    /// Named in error messages when the key is missing.
    pub api_key_env: String,
    pub timeout: Duration,
}

impl LlmSettings {
    pub fn for_provider(provider: Provider) -> Self {
        Self {
            provider,
            model: provider.default_model().into(),
            base_url: provider.default_base_url().into(),
            api_key: None,
            api_key_env: "OPENAI_API_KEY".into(),
            timeout: Duration::from_secs(60),
        }
    }
}

/// Sampling temperatures per collaborator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Temperatures {
    pub interpret: f32,
    pub plan: f32,
    pub critique: f32,
}

impl Default for Temperatures {
    fn default() -> Self {
        Self {
            interpret: 0.3,
            plan: 0.4,
            critique: 0.3,
        }
    }
}
