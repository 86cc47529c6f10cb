//! The circuit handle: the engine boundary consumed by the presentation
//! adapter.
//!
//! One handle owns the entire mutable state of one experiment instance.
//! All operations run synchronously to completion; listeners are invoked
//! before the call returns. The handle performs no I/O and no effects of
//! its own.

use log::{debug, warn};

use crate::board::{TerminalId, TerminalRegistry};
use crate::engine::event::EngineEvent;
use crate::engine::simulate::{EnergizedMap, Phase, SimulationDriver};
use crate::engine::validate;
use crate::engine::wiring::{Connection, WiringState};
use crate::error::{CircuitLabError, Result};
use crate::topology::{Descriptor, ToggleValue};

type Listener = Box<dyn FnMut(&EngineEvent)>;

/// An interactive circuit instance: one board, one rule set, one session.
pub struct CircuitHandle {
    registry: TerminalRegistry,
    descriptor: Descriptor,
    wiring: WiringState,
    driver: SimulationDriver,
    listeners: Vec<Listener>,
}

impl CircuitHandle {
    /// Create a circuit from a board registry and its rule descriptor.
    pub fn new(registry: TerminalRegistry, descriptor: Descriptor) -> Self {
        CircuitHandle {
            registry,
            descriptor,
            wiring: WiringState::new(),
            driver: SimulationDriver::new(),
            listeners: Vec::new(),
        }
    }

    /// Build a handle for one of the built-in experiments.
    pub fn for_experiment(name: &str) -> Result<Self> {
        let (registry, descriptor) = crate::topology::experiments::by_name(name)
            .ok_or_else(|| CircuitLabError::not_found(name))??;
        Ok(Self::new(registry, descriptor))
    }

    pub fn registry(&self) -> &TerminalRegistry {
        &self.registry
    }

    pub fn descriptor(&self) -> &Descriptor {
        &self.descriptor
    }

    pub fn wiring(&self) -> &WiringState {
        &self.wiring
    }

    pub fn phase(&self) -> Phase {
        self.driver.phase()
    }

    pub fn is_complete(&self) -> bool {
        self.wiring.is_complete()
    }

    pub fn energized(&self) -> &EnergizedMap {
        self.driver.energized()
    }

    /// Register a listener for engine events. Listeners are called in
    /// subscription order, synchronously.
    pub fn subscribe(&mut self, listener: impl FnMut(&EngineEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn emit(&mut self, event: EngineEvent) {
        debug!("{}: {}", self.descriptor.name, event.kind());
        for listener in &mut self.listeners {
            listener(&event);
        }
    }

    /// Would connecting these two terminals be accepted right now?
    /// Useful for hover hints; performs no mutation.
    pub fn can_connect(&self, a: &str, b: &str) -> Result<bool> {
        let a = self.registry.lookup(a)?;
        let b = self.registry.lookup(b)?;
        Ok(validate::can_connect(
            &self.registry,
            &self.descriptor,
            &self.wiring,
            a,
            b,
        ))
    }

    /// The two-click connect gesture.
    ///
    /// First click selects a free terminal; clicking the selection again
    /// deselects it; clicking an occupied terminal removes its wire; a
    /// second click on a different free terminal attempts the connection.
    /// Returns [`CircuitLabError::InvalidConnection`] when the attempted
    /// pairing is illegal; the selection is cleared so the player can
    /// simply try again. Clicks are ignored while simulating.
    pub fn on_terminal_click(&mut self, name: &str) -> Result<()> {
        let id = self.registry.lookup(name)?;
        if self.driver.phase() == Phase::Simulating {
            debug!("click on '{name}' ignored during simulation");
            return Ok(());
        }

        match self.wiring.selected() {
            None => {
                if self.wiring.is_occupied(id) {
                    self.remove_connection_at(id);
                } else {
                    self.wiring.select(id);
                }
                Ok(())
            }
            Some(selected) if selected == id => {
                self.wiring.clear_selection();
                Ok(())
            }
            Some(selected) => {
                self.wiring.clear_selection();
                if self.wiring.is_occupied(id) {
                    self.remove_connection_at(id);
                    return Ok(());
                }
                self.try_connect(selected, id)
            }
        }
    }

    fn try_connect(&mut self, a: TerminalId, b: TerminalId) -> Result<()> {
        if !validate::can_connect(&self.registry, &self.descriptor, &self.wiring, a, b) {
            let name_of = |id: TerminalId| {
                self.registry
                    .get(id)
                    .map(|t| t.name.clone())
                    .unwrap_or_else(|_| id.to_string())
            };
            return Err(CircuitLabError::invalid_connection(name_of(a), name_of(b)));
        }

        self.wiring.push(Connection::new(a, b));
        self.emit(EngineEvent::ConnectionMade { a, b });
        self.refresh_completion();
        Ok(())
    }

    fn remove_connection_at(&mut self, id: TerminalId) {
        if let Some(conn) = self.wiring.remove_at(id) {
            // remove_at already cleared the completion flag.
            self.driver.mark_idle();
            self.emit(EngineEvent::ConnectionRemoved {
                a: conn.a,
                b: conn.b,
            });
        }
    }

    /// Move the power source into its dock. No-op while simulating or on
    /// boards without a dock.
    pub fn dock_power_source(&mut self) {
        self.set_power_dock(true);
    }

    /// Move the power source back out of its dock.
    pub fn undock_power_source(&mut self) {
        self.set_power_dock(false);
    }

    fn set_power_dock(&mut self, docked: bool) {
        if !self.descriptor.needs_power_dock {
            return;
        }
        if self.driver.phase() == Phase::Simulating {
            warn!("power dock change ignored during simulation");
            return;
        }
        if self.wiring.is_power_docked() == docked {
            return;
        }
        self.wiring.set_power_docked(docked);
        self.emit(EngineEvent::PowerSourceMoved { docked });
        if docked {
            self.refresh_completion();
        } else {
            self.driver.mark_idle();
        }
    }

    /// Re-evaluate the completion predicate and fire the `Idle ->
    /// ReadyToSimulate` edge exactly once per completion.
    fn refresh_completion(&mut self) {
        let was = self.wiring.is_complete();
        let now = validate::is_complete(&self.registry, &self.descriptor, &self.wiring);
        self.wiring.set_complete(now);
        if now && !was {
            self.driver.mark_ready();
            self.emit(EngineEvent::CircuitCompleted);
        }
    }

    /// Clear all connections, selection and docking; return to editing.
    pub fn reset(&mut self) {
        self.wiring = WiringState::new();
        self.driver.exit();
        self.emit(EngineEvent::WiringReset);
    }

    /// Start the simulation. Only valid once the circuit is complete;
    /// seeds toggle defaults and announces the initial energized state.
    /// Returns false if the circuit was not ready.
    pub fn enter_simulation(&mut self) -> bool {
        if !self.driver.enter(&self.descriptor, &self.wiring) {
            return false;
        }
        let energized = self.driver.energized().clone();
        self.emit(EngineEvent::EnergizedChanged { energized });
        true
    }

    /// Leave the simulation. Implies a full reset.
    pub fn exit_simulation(&mut self) {
        self.reset();
    }

    /// Set a toggle input. Ignored outside simulation and for unknown
    /// toggles or mismatched value kinds; emits `EnergizedChanged` only
    /// when the output map actually changed.
    pub fn set_toggle(&mut self, id: &str, value: ToggleValue) {
        if self
            .driver
            .set_toggle(&self.descriptor, &self.wiring, id, value)
        {
            let energized = self.driver.energized().clone();
            self.emit(EngineEvent::EnergizedChanged { energized });
        }
    }

    /// Release all momentary toggles (mouse-up, mouse-leave, touch-cancel).
    pub fn release_momentary(&mut self) {
        if self
            .driver
            .release_momentary(&self.descriptor, &self.wiring)
        {
            let energized = self.driver.energized().clone();
            self.emit(EngineEvent::EnergizedChanged { energized });
        }
    }

    /// Current value of a toggle while simulating.
    pub fn toggle_value(&self, id: &str) -> Option<ToggleValue> {
        self.driver.toggle_value(id)
    }
}
