//! Events emitted by a circuit instance to its presentation adapter.

use crate::board::TerminalId;
use crate::engine::simulate::EnergizedMap;

/// One observable change in engine state.
///
/// Events are delivered synchronously, on the same call that caused them,
/// in the order the changes happened. The engine itself is effect-free;
/// celebration, sound and animation all live with the subscriber.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// A wire was added between two terminals.
    ConnectionMade { a: TerminalId, b: TerminalId },
    /// A wire was removed (terminal re-click or occupied-terminal click).
    ConnectionRemoved { a: TerminalId, b: TerminalId },
    /// The full, correct topology was assembled. Fired once per completion.
    CircuitCompleted,
    /// The power source was docked or undocked.
    PowerSourceMoved { docked: bool },
    /// The energized state of at least one LED group changed.
    EnergizedChanged { energized: EnergizedMap },
    /// All wiring and selection state was cleared.
    WiringReset,
}

impl EngineEvent {
    /// Short name for logging and the WASM event queue.
    pub fn kind(&self) -> &'static str {
        match self {
            EngineEvent::ConnectionMade { .. } => "ConnectionMade",
            EngineEvent::ConnectionRemoved { .. } => "ConnectionRemoved",
            EngineEvent::CircuitCompleted => "CircuitCompleted",
            EngineEvent::PowerSourceMoved { .. } => "PowerSourceMoved",
            EngineEvent::EnergizedChanged { .. } => "EnergizedChanged",
            EngineEvent::WiringReset => "WiringReset",
        }
    }
}
