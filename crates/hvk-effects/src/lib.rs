//! hvk-effects
//!
//! The destructive lockdown effect stack: body replacement, input
//! suppression, console neutering, network interception.
//!
//! Effects are global and irreversible within the page lifetime; the only
//! exit is a full navigation reload. They are applied in one well-defined
//! place ([`EffectStack::apply`]) exactly once per page load — never
//! re-patched piecemeal from detection code. The runtime is the only caller.

mod host;
mod network;
mod screen;
mod stack;

pub use host::PageHost;
pub use network::{NetworkBlocked, NetworkGate, NetworkPrimitive};
pub use screen::LockScreen;
pub use stack::{EffectStack, SUPPRESSED_EVENTS};
