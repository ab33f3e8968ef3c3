//! Application layer for Rigwright.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (AdvisorService, RevisionLoop)
//! - **Ports**: Interface definitions (traits) for external collaborators
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! compatibility rules itself. All rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AdvisorService, DEFAULT_MAX_ITERATIONS, LoopState, MIN_REQUEST_CHARS, Recommendation,
    RevisionLoop, RevisionOutcome, check_request_text, quick_validate, render_feedback,
};

// Re-export port traits (for adapter implementation)
pub use ports::{BuildCritic, BuildGenerator, ConstraintExtractor, Revision};

pub use error::ApplicationError;
