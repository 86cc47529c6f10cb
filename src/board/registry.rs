//! Terminal registry: the fixed set of connection points for one board.

use std::collections::HashMap;

use super::types::{Role, Terminal, TerminalId};
use crate::error::{CircuitLabError, Result};

/// Immutable registry of every terminal on one board.
///
/// Built once when an experiment loads, then only queried. Names are the
/// stable identifiers the presentation adapter uses (`"led1_pos"`, `"gnd"`);
/// ids are dense indices assigned in declaration order.
#[derive(Debug, Clone)]
pub struct TerminalRegistry {
    terminals: Vec<Terminal>,
    name_map: HashMap<String, TerminalId>,
}

impl TerminalRegistry {
    /// Build a registry from `(name, role, position)` rows.
    ///
    /// Fails with [`CircuitLabError::DuplicateTerminal`] if a name repeats.
    pub fn new(rows: &[(&str, Role, (f32, f32))]) -> Result<Self> {
        let mut terminals = Vec::with_capacity(rows.len());
        let mut name_map = HashMap::with_capacity(rows.len());

        for (idx, (name, role, pos)) in rows.iter().enumerate() {
            let id = TerminalId(idx);
            if name_map.insert(name.to_string(), id).is_some() {
                return Err(CircuitLabError::DuplicateTerminal {
                    terminal: name.to_string(),
                });
            }
            terminals.push(Terminal {
                id,
                name: name.to_string(),
                role: *role,
                pos: *pos,
            });
        }

        Ok(TerminalRegistry {
            terminals,
            name_map,
        })
    }

    /// Look up a terminal by id.
    pub fn get(&self, id: TerminalId) -> Result<&Terminal> {
        self.terminals
            .get(id.0)
            .ok_or_else(|| CircuitLabError::not_found(id.to_string()))
    }

    /// Look up a terminal id by name.
    pub fn lookup(&self, name: &str) -> Result<TerminalId> {
        self.name_map
            .get(name)
            .copied()
            .ok_or_else(|| CircuitLabError::not_found(name))
    }

    /// Iterate over all terminals in declaration order.
    pub fn terminals(&self) -> impl Iterator<Item = &Terminal> {
        self.terminals.iter()
    }

    /// Number of terminals on the board.
    pub fn len(&self) -> usize {
        self.terminals.len()
    }

    /// True if the board declares no terminals.
    pub fn is_empty(&self) -> bool {
        self.terminals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::LedGroup;
    use approx::assert_relative_eq;

    fn demo_board() -> TerminalRegistry {
        TerminalRegistry::new(&[
            ("5v", Role::PowerPositive, (590.0, 289.0)),
            ("gnd", Role::PowerGround, (591.0, 309.0)),
            ("led_pos", Role::LedAnode(LedGroup(1)), (275.0, 200.0)),
            ("led_neg", Role::LedCathode(LedGroup(1)), (305.0, 200.0)),
        ])
        .unwrap()
    }

    #[test]
    fn test_lookup_by_name_and_id() {
        let reg = demo_board();
        let id = reg.lookup("led_pos").unwrap();
        let term = reg.get(id).unwrap();
        assert_eq!(term.name, "led_pos");
        assert_eq!(term.role, Role::LedAnode(LedGroup(1)));
        assert_relative_eq!(term.pos.0, 275.0);
        assert_relative_eq!(term.pos.1, 200.0);
    }

    #[test]
    fn test_unknown_name_is_not_found() {
        let reg = demo_board();
        assert!(matches!(
            reg.lookup("led_7"),
            Err(CircuitLabError::TerminalNotFound { .. })
        ));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let result = TerminalRegistry::new(&[
            ("5v", Role::PowerPositive, (0.0, 0.0)),
            ("5v", Role::PowerGround, (0.0, 20.0)),
        ]);
        assert!(matches!(
            result,
            Err(CircuitLabError::DuplicateTerminal { .. })
        ));
    }
}
