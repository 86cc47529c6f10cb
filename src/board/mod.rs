//! Board representation: terminals, their roles, and the registry.
//!
//! A board is the fixed physical side of one experiment. Everything mutable
//! (wires, toggles) lives in the [`engine`](crate::engine) module.

mod registry;
mod types;

pub use registry::TerminalRegistry;
pub use types::{LedGroup, Role, Terminal, TerminalId, ThrowPosition};
