//! Application ports (traits) for external collaborators.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `rigwright-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `ConstraintExtractor`: free text → constraints
//!   - `BuildGenerator`: constraints (+ feedback) → build
//!   - `BuildCritic`: failed build → critique report
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`AdvisorService` and `RevisionLoop`, used directly by the CLI)

pub mod output;

pub use output::{BuildCritic, BuildGenerator, ConstraintExtractor, Revision};

#[cfg(test)]
pub use output::{MockBuildCritic, MockBuildGenerator, MockConstraintExtractor};
