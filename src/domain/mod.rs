//! Domain layer containing the reflection vocabulary and its rules.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `reflection` - Factors, preferences, scenarios, reactions and their fallback rules
//! - `session` - Session snapshots and the markdown report

pub mod foundation;
pub mod reflection;
pub mod session;
