//! Infrastructure adapters for Rigwright.
//!
//! This crate implements the ports defined in `rigwright-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod llm;
pub mod parts_data;
pub mod scripted;

// Re-export commonly used adapters
pub use llm::{
    JsonCompletion, LlmCritic, LlmError, LlmInterpreter, LlmPlanner, LlmSettings,
    OpenAiCompatibleClient, Provider, Temperatures,
};
pub use parts_data::{CategoryCount, CleanReport, PartsDataError, clean_parts, clean_parts_data};
pub use scripted::{ScriptedCompletion, ScriptedGenerator, StaticCritic, StaticExtractor};
