//! Feel Forward - guided self-reflection in five phases.
//!
//! A user names a decision, picks the factors that matter, details how much
//! each matters, reacts to generated scenarios, and receives a synthesis of
//! where their felt reactions diverge from their stated preferences. Every
//! phase uses a language model when one is configured and falls back to
//! deterministic rules otherwise.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
