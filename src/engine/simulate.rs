//! Simulation driver: toggle inputs and the derived energized map.
//!
//! The driver is a small state machine layered over the pure
//! [`evaluate_outputs`] function. It guards against toggle calls arriving
//! before simulation is entered rather than trusting the adapter to hide
//! its controls.

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};

use crate::board::LedGroup;
use crate::engine::wiring::WiringState;
use crate::topology::{Descriptor, OutputRule, ToggleKind, ToggleValue, POWER_TOGGLE};

/// Per-LED-group energized state.
pub type EnergizedMap = BTreeMap<LedGroup, bool>;

/// Lifecycle of one circuit instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Editing wires; the circuit is not (or no longer) complete.
    Idle,
    /// Complete and waiting for the player to start the simulation.
    ReadyToSimulate,
    /// Toggle inputs are live.
    Simulating,
}

/// Map `(wiring, toggles)` to the energized state of every LED group.
///
/// Pure and deterministic: no call mutates its inputs, and an incomplete
/// wiring state always yields an all-dark map.
pub fn evaluate_outputs(
    descriptor: &Descriptor,
    wiring: &WiringState,
    toggles: &HashMap<&'static str, ToggleValue>,
) -> EnergizedMap {
    let mut map: EnergizedMap = descriptor
        .led_groups
        .iter()
        .map(|g| (*g, false))
        .collect();

    if !wiring.is_complete() {
        return map;
    }
    let powered = toggles
        .get(POWER_TOGGLE)
        .map(ToggleValue::is_on)
        .unwrap_or(false);
    if !powered {
        return map;
    }

    match &descriptor.output {
        OutputRule::AllWhenPowered => {
            for lit in map.values_mut() {
                *lit = true;
            }
        }
        OutputRule::Gated { gate } => {
            let on = toggles.get(gate).map(ToggleValue::is_on).unwrap_or(false);
            for lit in map.values_mut() {
                *lit = on;
            }
        }
        OutputRule::ThrowSelect {
            lever,
            left_group,
            right_group,
        } => {
            if let Some(pos) = toggles.get(lever).and_then(ToggleValue::position) {
                use crate::board::ThrowPosition::*;
                map.insert(*left_group, pos == Left);
                map.insert(*right_group, pos == Right);
            }
        }
        OutputRule::Contacts {
            press,
            open_group,
            closed_group,
        } => {
            let pressed = toggles.get(press).map(ToggleValue::is_on).unwrap_or(false);
            map.insert(*open_group, pressed);
            map.insert(*closed_group, !pressed);
        }
        OutputRule::MatchedThrows { first, second } => {
            let a = toggles.get(first).and_then(ToggleValue::position);
            let b = toggles.get(second).and_then(ToggleValue::position);
            let lit = matches!((a, b), (Some(x), Some(y)) if x == y);
            for v in map.values_mut() {
                *v = lit;
            }
        }
    }

    map
}

/// Toggle inputs and derived outputs for one circuit instance.
#[derive(Debug, Clone)]
pub struct SimulationDriver {
    phase: Phase,
    toggles: HashMap<&'static str, ToggleValue>,
    energized: EnergizedMap,
}

impl SimulationDriver {
    pub fn new() -> Self {
        SimulationDriver {
            phase: Phase::Idle,
            toggles: HashMap::new(),
            energized: EnergizedMap::new(),
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current energized map. Empty until simulation has been entered.
    pub fn energized(&self) -> &EnergizedMap {
        &self.energized
    }

    /// Current value of a toggle, if simulation is active and it exists.
    pub fn toggle_value(&self, id: &str) -> Option<ToggleValue> {
        self.toggles.get(id).copied()
    }

    /// Completion edge: `Idle -> ReadyToSimulate`. Idempotent.
    pub(crate) fn mark_ready(&mut self) {
        if self.phase == Phase::Idle {
            self.phase = Phase::ReadyToSimulate;
        }
    }

    /// Breaking a wire while waiting drops back to editing.
    pub(crate) fn mark_idle(&mut self) {
        if self.phase == Phase::ReadyToSimulate {
            self.phase = Phase::Idle;
        }
    }

    /// Enter simulation, seeding every toggle from its descriptor default.
    /// Returns false (and does nothing) unless the circuit is ready.
    pub(crate) fn enter(&mut self, descriptor: &Descriptor, wiring: &WiringState) -> bool {
        if self.phase != Phase::ReadyToSimulate {
            warn!(
                "enter_simulation ignored in phase {:?} for '{}'",
                self.phase, descriptor.name
            );
            return false;
        }
        self.phase = Phase::Simulating;
        self.toggles = descriptor
            .toggles
            .iter()
            .map(|spec| (spec.id, spec.default))
            .collect();
        self.energized = evaluate_outputs(descriptor, wiring, &self.toggles);
        debug!("simulation entered for '{}'", descriptor.name);
        true
    }

    /// Leave simulation and return to editing. The handle resets wiring.
    pub(crate) fn exit(&mut self) {
        self.phase = Phase::Idle;
        self.toggles.clear();
        self.energized.clear();
    }

    /// Set a toggle and recompute outputs. No-op outside `Simulating`, for
    /// unknown toggles, or for a value of the wrong kind; returns true iff
    /// the energized map changed.
    pub(crate) fn set_toggle(
        &mut self,
        descriptor: &Descriptor,
        wiring: &WiringState,
        id: &str,
        value: ToggleValue,
    ) -> bool {
        if self.phase != Phase::Simulating {
            warn!("set_toggle('{id}') ignored before simulation start");
            return false;
        }
        let Some(spec) = descriptor.toggle(id) else {
            warn!("set_toggle: unknown toggle '{id}' on '{}'", descriptor.name);
            return false;
        };
        let kind_ok = match spec.kind {
            ToggleKind::OnOff | ToggleKind::Momentary => {
                matches!(value, ToggleValue::OnOff(_))
            }
            ToggleKind::TwoWay => matches!(value, ToggleValue::Position(_)),
        };
        if !kind_ok {
            warn!("set_toggle: wrong value kind for '{id}'");
            return false;
        }

        self.toggles.insert(spec.id, value);
        self.recompute(descriptor, wiring)
    }

    /// Release every momentary toggle. The adapter calls this on mouse-up,
    /// mouse-leave and touch-cancel so a held switch can never latch.
    pub(crate) fn release_momentary(
        &mut self,
        descriptor: &Descriptor,
        wiring: &WiringState,
    ) -> bool {
        if self.phase != Phase::Simulating {
            return false;
        }
        for spec in &descriptor.toggles {
            if spec.kind == ToggleKind::Momentary {
                self.toggles.insert(spec.id, ToggleValue::OnOff(false));
            }
        }
        self.recompute(descriptor, wiring)
    }

    fn recompute(&mut self, descriptor: &Descriptor, wiring: &WiringState) -> bool {
        let next = evaluate_outputs(descriptor, wiring, &self.toggles);
        let changed = next != self.energized;
        self.energized = next;
        changed
    }
}

impl Default for SimulationDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::ThrowPosition;
    use crate::engine::validate;
    use crate::engine::wiring::Connection;
    use crate::topology::experiments;
    use crate::board::TerminalRegistry;

    /// Wire an experiment to completion by brute-forcing legal pairs.
    fn completed_wiring(registry: &TerminalRegistry, descriptor: &Descriptor) -> WiringState {
        let mut wiring = WiringState::new();
        wiring.set_power_docked(true);
        let ids: Vec<_> = registry.terminals().map(|t| t.id).collect();
        loop {
            let mut progressed = false;
            for &a in &ids {
                for &b in &ids {
                    if validate::can_connect(registry, descriptor, &wiring, a, b) {
                        wiring.push(Connection::new(a, b));
                        progressed = true;
                    }
                }
            }
            if !progressed {
                break;
            }
        }
        wiring.set_complete(validate::is_complete(registry, descriptor, &wiring));
        assert!(wiring.is_complete(), "could not wire {}", descriptor.name);
        wiring
    }

    fn ready_driver(registry: &TerminalRegistry, descriptor: &Descriptor) -> (WiringState, SimulationDriver) {
        let wiring = completed_wiring(registry, descriptor);
        let mut driver = SimulationDriver::new();
        driver.mark_ready();
        assert!(driver.enter(descriptor, &wiring));
        (wiring, driver)
    }

    #[test]
    fn test_outputs_dark_when_incomplete() {
        let (_registry, descriptor) = experiments::simple_led().unwrap();
        let wiring = WiringState::new();
        let toggles: HashMap<_, _> = [(POWER_TOGGLE, ToggleValue::OnOff(true))].into();
        let map = evaluate_outputs(&descriptor, &wiring, &toggles);
        assert!(map.values().all(|lit| !lit));
    }

    #[test]
    fn test_evaluate_outputs_is_pure() {
        let (registry, descriptor) = experiments::simple_led().unwrap();
        let wiring = completed_wiring(&registry, &descriptor);
        let toggles: HashMap<_, _> = [(POWER_TOGGLE, ToggleValue::OnOff(true))].into();

        let first = evaluate_outputs(&descriptor, &wiring, &toggles);
        let second = evaluate_outputs(&descriptor, &wiring, &toggles);
        assert_eq!(first, second);
        assert!(first.values().all(|lit| *lit));
    }

    #[test]
    fn test_toggles_ignored_before_simulating() {
        let (registry, descriptor) = experiments::simple_led().unwrap();
        let wiring = completed_wiring(&registry, &descriptor);
        let mut driver = SimulationDriver::new();

        assert!(!driver.set_toggle(&descriptor, &wiring, POWER_TOGGLE, ToggleValue::OnOff(true)));
        driver.mark_ready();
        assert!(!driver.set_toggle(&descriptor, &wiring, POWER_TOGGLE, ToggleValue::OnOff(true)));
        assert!(driver.energized().is_empty());
    }

    #[test]
    fn test_enter_seeds_descriptor_defaults() {
        let (registry, descriptor) = experiments::relay().unwrap();
        let (_, driver) = ready_driver(&registry, &descriptor);

        // Relay boards enter simulation unpowered and released.
        assert_eq!(
            driver.toggle_value(POWER_TOGGLE),
            Some(ToggleValue::OnOff(false))
        );
        assert!(driver.energized().values().all(|lit| !lit));
    }

    #[test]
    fn test_relay_contacts_and_momentary_release() {
        let (registry, descriptor) = experiments::relay().unwrap();
        let (wiring, mut driver) = ready_driver(&registry, &descriptor);

        driver.set_toggle(&descriptor, &wiring, POWER_TOGGLE, ToggleValue::OnOff(true));
        // Powered and unpressed: NC side lit, NO side dark.
        assert!(!driver.energized()[&LedGroup(1)]);
        assert!(driver.energized()[&LedGroup(2)]);

        driver.set_toggle(&descriptor, &wiring, "press", ToggleValue::OnOff(true));
        assert!(driver.energized()[&LedGroup(1)]);
        assert!(!driver.energized()[&LedGroup(2)]);

        // Mouse left the button: holds only while continuously pressed.
        assert!(driver.release_momentary(&descriptor, &wiring));
        assert!(!driver.energized()[&LedGroup(1)]);
        assert!(driver.energized()[&LedGroup(2)]);
    }

    #[test]
    fn test_two_way_energizes_exactly_one_group() {
        let (registry, descriptor) = experiments::two_way_switch().unwrap();
        let (wiring, mut driver) = ready_driver(&registry, &descriptor);

        driver.set_toggle(&descriptor, &wiring, POWER_TOGGLE, ToggleValue::OnOff(true));
        for pos in [ThrowPosition::Left, ThrowPosition::Right, ThrowPosition::Left] {
            driver.set_toggle(&descriptor, &wiring, "lever", ToggleValue::Position(pos));
            let lit: Vec<_> = driver.energized().values().filter(|v| **v).collect();
            assert_eq!(lit.len(), 1);
            assert_eq!(
                driver.energized()[&LedGroup(1)],
                pos == ThrowPosition::Left
            );
        }
    }

    #[test]
    fn test_staircase_xnor_over_all_combinations() {
        let (registry, descriptor) = experiments::staircase().unwrap();
        let (wiring, mut driver) = ready_driver(&registry, &descriptor);
        driver.set_toggle(&descriptor, &wiring, POWER_TOGGLE, ToggleValue::OnOff(true));

        use ThrowPosition::*;
        for s1 in [Left, Right] {
            for s2 in [Left, Right] {
                driver.set_toggle(&descriptor, &wiring, "switch1", ToggleValue::Position(s1));
                driver.set_toggle(&descriptor, &wiring, "switch2", ToggleValue::Position(s2));
                assert_eq!(
                    driver.energized()[&LedGroup(1)],
                    s1 == s2,
                    "s1={s1:?} s2={s2:?}"
                );
            }
        }
    }

    #[test]
    fn test_gated_switch_requires_power_and_gate() {
        let (registry, descriptor) = experiments::push_switch().unwrap();
        let (wiring, mut driver) = ready_driver(&registry, &descriptor);

        // Defaults: power on, switch on.
        assert!(driver.energized()[&LedGroup(1)]);
        driver.set_toggle(&descriptor, &wiring, "switch", ToggleValue::OnOff(false));
        assert!(!driver.energized()[&LedGroup(1)]);
        driver.set_toggle(&descriptor, &wiring, "switch", ToggleValue::OnOff(true));
        driver.set_toggle(&descriptor, &wiring, POWER_TOGGLE, ToggleValue::OnOff(false));
        assert!(!driver.energized()[&LedGroup(1)]);
    }

    #[test]
    fn test_wrong_value_kind_is_rejected() {
        let (registry, descriptor) = experiments::staircase().unwrap();
        let (wiring, mut driver) = ready_driver(&registry, &descriptor);

        assert!(!driver.set_toggle(&descriptor, &wiring, "switch1", ToggleValue::OnOff(true)));
        assert_eq!(
            driver.toggle_value("switch1"),
            Some(ToggleValue::Position(ThrowPosition::Left))
        );
    }
}
