//! Rigwright Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Rigwright,
//! a PC build recommender that plans a build, validates it, critiques the
//! failures and revises until the build is compatible.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          rigwright-cli (CLI)            │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │     (AdvisorService, RevisionLoop)      │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Driven: Extractor, Generator, Critic)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   rigwright-adapters (Infrastructure)   │
//! │  (LlmPlanner, LlmCritic, parts data)    │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │  (Build, Constraints, validate, power)  │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rigwright_core::domain::{Build, validate};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string("build.json")?)?;
//! let build = Build::from_json(json)?;
//!
//! let result = validate(&build);
//! if !result.is_valid() {
//!     for message in result.error_messages() {
//!         eprintln!("{message}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        AdvisorService, Recommendation, RevisionLoop, RevisionOutcome,
        ports::{BuildCritic, BuildGenerator, ConstraintExtractor, Revision},
    };
    pub use crate::domain::{
        Build, Component, Constraints, ConstraintsBuilder, CritiqueReport, ErrorKind, Severity,
        ValidationResult, WarningKind, validate,
    };
    pub use crate::error::{RigError, RigResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
