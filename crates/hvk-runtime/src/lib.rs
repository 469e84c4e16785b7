//! hvk-runtime
//!
//! Composition root. Builds the probes, the aggregator, the lockdown
//! controller and the effect stack from one [`TamperPolicy`], and drives
//! them from the host's timer and event hooks.
//!
//! Everything below this crate is pure and testable in isolation; this is
//! the only crate that executes effects or writes the episode log.
//!
//! [`TamperPolicy`]: hvk_config::TamperPolicy

mod engine;
mod sources;

pub use engine::TamperEngine;
pub use sources::SourceSet;
