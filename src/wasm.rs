//! WASM bindings for CircuitLab Core.
//!
//! This module provides JavaScript-friendly bindings for the web game's
//! presentation layer (SVG board rendering, wire animation, confetti).
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { WasmCircuit, experiment_names } from 'circuitlab_core';
//!
//! await init();
//!
//! const circuit = new WasmCircuit('simple_led');
//! circuit.dock_power_source();
//! circuit.click('5v');
//! circuit.click('led_pos');       // returns false on an illegal pairing
//!
//! for (const event of circuit.drain_events()) {
//!   if (event === 'CircuitCompleted') showConfetti();
//! }
//!
//! circuit.enter_simulation();
//! circuit.set_toggle('power', 'off');
//! circuit.is_energized(1);
//! ```

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

use crate::board::ThrowPosition;
use crate::engine::{CircuitHandle, Phase};
use crate::error::CircuitLabError;
use crate::topology::experiments::EXPERIMENT_NAMES;
use crate::topology::ToggleValue;

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Names of the built-in experiments, in menu order.
#[wasm_bindgen]
pub fn experiment_names() -> Vec<String> {
    EXPERIMENT_NAMES.iter().map(|s| s.to_string()).collect()
}

/// WASM-compatible circuit instance.
///
/// Wraps the native [`CircuitHandle`] and buffers engine events so the
/// JavaScript side can poll them once per animation frame instead of
/// registering callbacks across the boundary.
#[wasm_bindgen]
pub struct WasmCircuit {
    handle: CircuitHandle,
    events: Rc<RefCell<Vec<String>>>,
}

#[wasm_bindgen]
impl WasmCircuit {
    /// Create a circuit for a built-in experiment by name.
    ///
    /// Throws if the experiment name is unknown.
    #[wasm_bindgen(constructor)]
    pub fn new(experiment: &str) -> Result<WasmCircuit, JsValue> {
        let mut handle = CircuitHandle::for_experiment(experiment)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        handle.subscribe(move |event| sink.borrow_mut().push(event.kind().to_string()));

        Ok(WasmCircuit { handle, events })
    }

    /// Handle a click on a terminal, by name.
    ///
    /// Returns false when the click attempted an illegal connection (the
    /// adapter shows a rejection toast); throws only for a terminal name
    /// the board does not have.
    pub fn click(&mut self, terminal: &str) -> Result<bool, JsValue> {
        match self.handle.on_terminal_click(terminal) {
            Ok(()) => Ok(true),
            Err(CircuitLabError::InvalidConnection { .. }) => Ok(false),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Drain and return the buffered event names, oldest first.
    pub fn drain_events(&mut self) -> Vec<String> {
        self.events.borrow_mut().drain(..).collect()
    }

    pub fn dock_power_source(&mut self) {
        self.handle.dock_power_source();
    }

    pub fn undock_power_source(&mut self) {
        self.handle.undock_power_source();
    }

    pub fn reset(&mut self) {
        self.handle.reset();
    }

    pub fn is_complete(&self) -> bool {
        self.handle.is_complete()
    }

    /// True once the completed circuit is waiting for the player to start.
    pub fn is_ready_to_simulate(&self) -> bool {
        self.handle.phase() == Phase::ReadyToSimulate
    }

    pub fn is_simulating(&self) -> bool {
        self.handle.phase() == Phase::Simulating
    }

    pub fn enter_simulation(&mut self) -> bool {
        self.handle.enter_simulation()
    }

    pub fn exit_simulation(&mut self) {
        self.handle.exit_simulation();
    }

    /// Set a toggle: `"on"`/`"off"` for switches and buttons,
    /// `"left"`/`"right"` for two-way levers. Unknown values are ignored,
    /// matching the engine's guard on unknown toggles.
    pub fn set_toggle(&mut self, name: &str, value: &str) {
        let value = match value {
            "on" => ToggleValue::OnOff(true),
            "off" => ToggleValue::OnOff(false),
            "left" => ToggleValue::Position(ThrowPosition::Left),
            "right" => ToggleValue::Position(ThrowPosition::Right),
            _ => return,
        };
        self.handle.set_toggle(name, value);
    }

    /// Release all held (momentary) controls.
    pub fn release_momentary(&mut self) {
        self.handle.release_momentary();
    }

    /// Energized state of one LED group (groups are numbered from 1).
    pub fn is_energized(&self, group: u8) -> bool {
        self.handle
            .energized()
            .get(&crate::board::LedGroup(group))
            .copied()
            .unwrap_or(false)
    }

    /// Name of the currently selected terminal, if any.
    pub fn selected_terminal(&self) -> Option<String> {
        let id = self.handle.wiring().selected()?;
        self.handle.registry().get(id).ok().map(|t| t.name.clone())
    }

    /// Number of wires currently on the board.
    pub fn connection_count(&self) -> usize {
        self.handle.wiring().connections().len()
    }
}
