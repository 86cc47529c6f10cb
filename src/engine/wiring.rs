//! Mutable wiring state for one play session.

use crate::board::TerminalId;

/// A user-drawn wire linking exactly two terminals.
///
/// The pair is unordered; insertion order is preserved by the containing
/// `Vec`, which matters for seeded-pattern boards where the first wire
/// selects the wiring direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub a: TerminalId,
    pub b: TerminalId,
}

impl Connection {
    pub fn new(a: TerminalId, b: TerminalId) -> Self {
        Connection { a, b }
    }

    /// Does this wire end at the given terminal?
    pub fn touches(&self, id: TerminalId) -> bool {
        self.a == id || self.b == id
    }

    /// Is this the same unordered pair?
    pub fn same_pair(&self, a: TerminalId, b: TerminalId) -> bool {
        (self.a == a && self.b == b) || (self.a == b && self.b == a)
    }
}

/// The live connection set plus the click-gesture selection.
///
/// Owned exclusively by one circuit instance; mutated only through the
/// engine's operations. A reset rebuilds the state wholesale rather than
/// patching it, so no session leaks into the next.
#[derive(Debug, Clone, Default)]
pub struct WiringState {
    connections: Vec<Connection>,
    selected: Option<TerminalId>,
    complete: bool,
    power_docked: bool,
}

impl WiringState {
    pub fn new() -> Self {
        Self::default()
    }

    /// All wires, in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// The wire touching `id`, if any. At most one exists.
    pub fn connection_at(&self, id: TerminalId) -> Option<Connection> {
        self.connections.iter().copied().find(|c| c.touches(id))
    }

    /// Is the terminal already wired?
    pub fn is_occupied(&self, id: TerminalId) -> bool {
        self.connection_at(id).is_some()
    }

    /// Does the exact unordered pair already exist?
    pub fn has_pair(&self, a: TerminalId, b: TerminalId) -> bool {
        self.connections.iter().any(|c| c.same_pair(a, b))
    }

    /// Append a wire. Callers must have validated it first.
    pub(crate) fn push(&mut self, conn: Connection) {
        self.connections.push(conn);
    }

    /// Remove the wire touching `id`, returning it. Clears the completion
    /// flag: breaking any wire always re-hides the simulation entry.
    pub(crate) fn remove_at(&mut self, id: TerminalId) -> Option<Connection> {
        let idx = self.connections.iter().position(|c| c.touches(id))?;
        self.complete = false;
        Some(self.connections.remove(idx))
    }

    pub fn selected(&self) -> Option<TerminalId> {
        self.selected
    }

    pub(crate) fn select(&mut self, id: TerminalId) {
        self.selected = Some(id);
    }

    pub(crate) fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Derived completion flag, maintained by the validator.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub(crate) fn set_complete(&mut self, complete: bool) {
        self.complete = complete;
    }

    /// Whether the battery has been moved into its dock.
    pub fn is_power_docked(&self) -> bool {
        self.power_docked
    }

    pub(crate) fn set_power_docked(&mut self, docked: bool) {
        self.power_docked = docked;
        if !docked {
            self.complete = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_wire_per_terminal_queries() {
        let mut wiring = WiringState::new();
        wiring.push(Connection::new(TerminalId(0), TerminalId(2)));
        assert!(wiring.is_occupied(TerminalId(0)));
        assert!(wiring.is_occupied(TerminalId(2)));
        assert!(!wiring.is_occupied(TerminalId(1)));
        assert!(wiring.has_pair(TerminalId(2), TerminalId(0)));
    }

    #[test]
    fn test_remove_frees_both_terminals() {
        let mut wiring = WiringState::new();
        wiring.push(Connection::new(TerminalId(0), TerminalId(2)));
        wiring.set_complete(true);

        let removed = wiring.remove_at(TerminalId(2)).unwrap();
        assert!(removed.same_pair(TerminalId(0), TerminalId(2)));
        assert!(!wiring.is_occupied(TerminalId(0)));
        assert!(!wiring.is_occupied(TerminalId(2)));
        assert!(!wiring.is_complete());
    }

    #[test]
    fn test_undocking_clears_completion() {
        let mut wiring = WiringState::new();
        wiring.set_power_docked(true);
        wiring.set_complete(true);
        wiring.set_power_docked(false);
        assert!(!wiring.is_complete());
    }
}
