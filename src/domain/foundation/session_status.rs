//! SessionStatus enum tagging a reflection session snapshot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a reflection session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    InProgress,
    Completed,
    /// The user left before the last phase; the snapshot can be resumed.
    Interrupted,
}

impl SessionStatus {
    /// Returns true if the session can still be continued.
    pub fn is_resumable(&self) -> bool {
        !matches!(self, SessionStatus::Completed)
    }

    /// Validates a transition from this status to another.
    ///
    /// Valid transitions:
    /// - InProgress -> Completed | Interrupted
    /// - Interrupted -> InProgress
    pub fn can_transition_to(&self, target: &SessionStatus) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (InProgress, Completed) | (InProgress, Interrupted) | (Interrupted, InProgress)
        )
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::InProgress => "In progress",
            SessionStatus::Completed => "Completed",
            SessionStatus::Interrupted => "Interrupted",
        };
        write!(f, "{}", s)
    }
}
