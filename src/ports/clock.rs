//! Clock port - source of the current time.
//!
//! Time-window logic takes a clock instead of reading the system time so
//! tests can advance it explicitly.

use crate::domain::foundation::Timestamp;

/// Port for reading the current time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> Timestamp;
}
