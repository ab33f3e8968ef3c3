use std::{collections::VecDeque, sync::Mutex};

use serde_json::Value;

use crate::llm::{JsonCompletion, LlmError};

/// A prompt the scripted model received.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPrompt {
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

#[derive(Debug)]
enum Reply {
    Json(Value),
    Fail(String),
}

/// Replays queued replies; records every prompt.
#[derive(Debug, Default)]
pub struct ScriptedCompletion {
    replies: Mutex<VecDeque<Reply>>,
    prompts: Mutex<Vec<RecordedPrompt>>,
}

impl ScriptedCompletion {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(self, value: Value) -> Self {
        self.push(Reply::Json(value))
    }

    pub fn fail(self, reason: impl Into<String>) -> Self {
        self.push(Reply::Fail(reason.into()))
    }

    fn push(self, reply: Reply) -> Self {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
        self
    }

    pub fn prompts(&self) -> Vec<RecordedPrompt> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl JsonCompletion for ScriptedCompletion {
    fn complete_json(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<Value, LlmError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(RecordedPrompt {
                system: system.into(),
                user: user.into(),
                temperature,
            });
        }

        let next = self
            .replies
            .lock()
            .map_err(|_| LlmError::Unavailable {
                reason: "reply queue poisoned".into(),
            })?
            .pop_front();

        match next {
            Some(Reply::Json(value)) => Ok(value),
            Some(Reply::Fail(reason)) => Err(LlmError::Unavailable { reason }),
            None => Err(LlmError::Unavailable {
                reason: "no scripted replies left".into(),
            }),
        }
    }
}
