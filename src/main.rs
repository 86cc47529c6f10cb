//! CircuitLab - interactive session runner for experiment boards.
//!
//! A debugging harness for descriptor authors: drives one experiment from
//! a line-oriented command stream instead of the web UI.
//!
//! # Usage
//!
//! ```bash
//! circuitlab simple_led
//! > click 5v
//! > click led_pos
//! > dock
//! > state
//! ```

use std::io::{self, BufRead, Write};

use clap::Parser;

use circuitlab_core::{
    board::ThrowPosition,
    engine::{CircuitHandle, Phase},
    error::{CircuitLabError, Result},
    topology::{experiments::EXPERIMENT_NAMES, ToggleValue},
};

/// Interactive runner for CircuitLab experiment boards
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Name of the experiment board to load
    #[arg(value_name = "EXPERIMENT", required_unless_present = "list")]
    experiment: Option<String>,

    /// List the built-in experiment names and exit
    #[arg(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list {
        for name in EXPERIMENT_NAMES {
            println!("{name}");
        }
        return Ok(());
    }

    // required_unless_present guarantees the name is there
    let name = args.experiment.unwrap_or_default();
    let mut circuit = CircuitHandle::for_experiment(&name)?;
    circuit.subscribe(|event| println!("event: {event:?}"));

    println!("loaded '{name}'; type 'help' for commands");
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = line.unwrap_or_default();
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "click" => match parts.next() {
                Some(terminal) => match circuit.on_terminal_click(terminal) {
                    Ok(()) => {}
                    Err(CircuitLabError::InvalidConnection { a, b }) => {
                        println!("rejected: {a} to {b} is not a valid connection");
                    }
                    Err(e) => println!("error: {e}"),
                },
                None => println!("usage: click <terminal>"),
            },
            "dock" => circuit.dock_power_source(),
            "undock" => circuit.undock_power_source(),
            "sim" => {
                if !circuit.enter_simulation() {
                    println!("circuit is not complete yet");
                }
            }
            "exit" => circuit.exit_simulation(),
            "toggle" => match (parts.next(), parts.next().and_then(parse_toggle_value)) {
                (Some(toggle), Some(value)) => circuit.set_toggle(toggle, value),
                _ => println!("usage: toggle <name> <on|off|left|right>"),
            },
            "release" => circuit.release_momentary(),
            "reset" => circuit.reset(),
            "state" => print_state(&circuit),
            "help" => print_help(&circuit),
            "quit" | "q" => break,
            other => println!("unknown command '{other}'; type 'help'"),
        }
        stdout.flush().ok();
    }

    Ok(())
}

fn parse_toggle_value(text: &str) -> Option<ToggleValue> {
    match text {
        "on" => Some(ToggleValue::OnOff(true)),
        "off" => Some(ToggleValue::OnOff(false)),
        "left" => Some(ToggleValue::Position(ThrowPosition::Left)),
        "right" => Some(ToggleValue::Position(ThrowPosition::Right)),
        _ => None,
    }
}

fn print_state(circuit: &CircuitHandle) {
    let phase = match circuit.phase() {
        Phase::Idle => "editing",
        Phase::ReadyToSimulate => "ready to simulate",
        Phase::Simulating => "simulating",
    };
    println!("phase: {phase}");
    println!("complete: {}", circuit.is_complete());

    let registry = circuit.registry();
    for conn in circuit.wiring().connections() {
        let a = registry.get(conn.a).map(|t| t.name.clone()).unwrap_or_default();
        let b = registry.get(conn.b).map(|t| t.name.clone()).unwrap_or_default();
        println!("wire: {a} <-> {b}");
    }
    for (group, lit) in circuit.energized() {
        println!("{group}: {}", if *lit { "lit" } else { "dark" });
    }
}

fn print_help(circuit: &CircuitHandle) {
    println!("commands: click <terminal>, dock, undock, sim, exit,");
    println!("          toggle <name> <on|off|left|right>, release,");
    println!("          state, reset, help, quit");
    let terminals: Vec<_> = circuit
        .registry()
        .terminals()
        .map(|t| t.name.as_str())
        .collect();
    println!("terminals: {}", terminals.join(", "));
    let toggles: Vec<_> = circuit
        .descriptor()
        .toggles
        .iter()
        .map(|t| t.id)
        .collect();
    println!("toggles: {}", toggles.join(", "));
}
