//! The generic circuit engine: wiring state, validation, simulation and
//! the handle the presentation adapter talks to.
//!
//! The engine interprets a [`Descriptor`](crate::topology::Descriptor);
//! it has no knowledge of any particular experiment. Everything runs
//! synchronously on the caller's thread; there is no I/O and no effect
//! beyond the subscribed listeners.

mod event;
mod handle;
mod simulate;
mod validate;
mod wiring;

pub use event::EngineEvent;
pub use handle::CircuitHandle;
pub use simulate::{evaluate_outputs, EnergizedMap, Phase, SimulationDriver};
pub use validate::{can_connect, is_complete};
pub use wiring::{Connection, WiringState};
