//! hvk-lockdown
//!
//! The lockdown controller: a three-state machine (OPEN → SUSPECT → LOCKED)
//! driven by the suspicion score and by discrete key triggers.
//!
//! Goals:
//! - single strong signal locks within one tick, no debounce
//! - weak signals must sustain through a debounce window before SUSPECT
//! - cooldown hysteresis on the way back down, no flapping
//! - LOCKED is sticky; destructive effects commanded exactly once per page
//!   load; the only recovery is a full reload
//!
//! Deterministic, pure logic. No IO, no clock, no DOM. The controller is the
//! sole writer of [`EngineState`]; side effects exist only as commands in the
//! returned [`Decision`] for the runtime to execute.

mod engine;
mod types;

pub use engine::evaluate;
pub use types::*;
