//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, enums, and error types
//! that form the vocabulary of the Feel Forward domain.

mod errors;
mod ids;
mod score;
mod session_status;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{ScenarioId, SessionId};
pub use score::Score;
pub use session_status::SessionStatus;
pub use timestamp::Timestamp;
