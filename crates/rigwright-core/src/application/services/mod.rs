pub mod advisor;
pub mod feedback;
pub mod revision_loop;

pub use advisor::{
    AdvisorService, MIN_REQUEST_CHARS, Recommendation, check_request_text, quick_validate,
};
pub use feedback::render_feedback;
pub use revision_loop::{DEFAULT_MAX_ITERATIONS, LoopState, RevisionLoop, RevisionOutcome};
