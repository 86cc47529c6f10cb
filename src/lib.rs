//! # CircuitLab Core
//!
//! The circuit engine behind a browser game that teaches basic electronics
//! through drag-and-connect wiring puzzles.
//!
//! This library provides:
//! - A terminal registry describing the connection points of one board
//! - Declarative topology descriptors: legal pairings, wiring order,
//!   completion rules and simulation outputs per experiment
//! - A generic validation and simulation engine interpreting those rules
//! - Nine built-in experiment boards, from a single LED to staircase wiring
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`board`] - Terminals, electrical roles and the per-board registry
//! - [`topology`] - Descriptor rule types and the built-in experiment tables
//! - [`engine`] - Wiring state, validator, simulation driver and the
//!   [`CircuitHandle`] consumed by the presentation adapter
//!
//! ## Usage
//!
//! ```
//! use circuitlab_core::{CircuitHandle, ToggleValue};
//!
//! let mut circuit = CircuitHandle::for_experiment("simple_led")?;
//! circuit.dock_power_source();
//! circuit.on_terminal_click("5v")?;
//! circuit.on_terminal_click("led_pos")?;
//! circuit.on_terminal_click("gnd")?;
//! circuit.on_terminal_click("led_neg")?;
//! assert!(circuit.is_complete());
//!
//! circuit.enter_simulation();
//! circuit.set_toggle("power", ToggleValue::OnOff(false));
//! # Ok::<(), circuitlab_core::CircuitLabError>(())
//! ```
//!
//! ## Engine model
//!
//! The engine is a rule interpreter, not an electrical simulator: there is
//! no voltage or current computation, only a boolean "energized" state per
//! LED group derived from the descriptor's output rule and the live toggle
//! inputs. Rendering, animation, sound and celebration are all the
//! presentation adapter's job; the engine only emits events.

pub mod board;
pub mod engine;
pub mod error;
pub mod topology;

// Re-export main types for convenience
pub use board::{LedGroup, Role, Terminal, TerminalId, TerminalRegistry, ThrowPosition};
pub use engine::{CircuitHandle, EngineEvent, EnergizedMap, Phase};
pub use error::{CircuitLabError, Result};
pub use topology::{Descriptor, ToggleValue};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::WasmCircuit;
