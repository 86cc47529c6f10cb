//! Declarative rule types that parameterize the engine per experiment.
//!
//! A [`Descriptor`] says which terminal pairings are legal, in what order,
//! when the circuit counts as complete, and how toggle inputs map to lit
//! LEDs. The engine interprets these tables; it contains no per-experiment
//! branching of its own.

use crate::board::{LedGroup, Role, Terminal, ThrowPosition};

/// Matches one endpoint of a candidate connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EndpointMatcher {
    /// Exact role match, including group index. Several terminals may share
    /// a role, so this is the "any of N equivalent pins" matcher.
    Role(Role),
    /// LED anode of any group (parallel boards).
    AnyAnode,
    /// LED cathode of any group (parallel boards).
    AnyCathode,
    /// A specific terminal by name. Used where two switches are not
    /// symmetric and role-level matching would accept miswirings.
    Named(&'static str),
}

impl EndpointMatcher {
    /// Does this matcher accept the given terminal?
    pub fn matches(&self, terminal: &Terminal) -> bool {
        match self {
            EndpointMatcher::Role(role) => terminal.role == *role,
            EndpointMatcher::AnyAnode => terminal.role.is_anode(),
            EndpointMatcher::AnyCathode => terminal.role.is_cathode(),
            EndpointMatcher::Named(name) => terminal.name == *name,
        }
    }
}

/// A legal unordered pairing of two endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairRule {
    pub a: EndpointMatcher,
    pub b: EndpointMatcher,
}

impl PairRule {
    pub fn new(a: EndpointMatcher, b: EndpointMatcher) -> Self {
        PairRule { a, b }
    }

    /// Does this rule accept the pair, in either orientation?
    pub fn matches(&self, x: &Terminal, y: &Terminal) -> bool {
        (self.a.matches(x) && self.b.matches(y)) || (self.a.matches(y) && self.b.matches(x))
    }
}

/// Shorthand for a role-to-role pair rule.
pub fn pair(a: Role, b: Role) -> PairRule {
    PairRule::new(EndpointMatcher::Role(a), EndpointMatcher::Role(b))
}

/// Shorthand for a name-to-name pair rule.
pub fn named_pair(a: &'static str, b: &'static str) -> PairRule {
    PairRule::new(EndpointMatcher::Named(a), EndpointMatcher::Named(b))
}

/// An ordered wiring pattern: stage `k` must be wired as `stages[k]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub stages: Vec<PairRule>,
}

impl Pattern {
    pub fn new(stages: Vec<PairRule>) -> Self {
        Pattern { stages }
    }
}

/// How connection order is constrained for one experiment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencePolicy {
    /// Any legal pair, in any order.
    Unordered { legal: Vec<PairRule> },
    /// The first connection selects one of several wiring patterns; every
    /// later connection must match the stage implied by that seed and the
    /// count of existing connections. The active pattern is re-derived from
    /// the first connection on every check, never cached.
    SeededPattern { patterns: Vec<Pattern> },
}

/// When the circuit counts as fully and correctly wired.
///
/// Each rule is an existential check over the connection set, so a single
/// role-level rule per LED group expresses the "some legal power edge AND
/// some legal ground edge per group" requirement of parallel boards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionRule {
    /// Every rule must be satisfied by some connection.
    AllOf(Vec<PairRule>),
    /// Some pattern must have all of its stages satisfied.
    AnyPattern(Vec<Pattern>),
}

/// Kind of a toggle input available during simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleKind {
    /// Latching on/off control (power button, rocker switch).
    OnOff,
    /// Held control that auto-reverts on release (tactile switch, relay coil).
    Momentary,
    /// Two-way lever with a left and a right position.
    TwoWay,
}

/// Current value of a toggle input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleValue {
    OnOff(bool),
    Position(ThrowPosition),
}

impl ToggleValue {
    /// On/off value, treating a lever as "on" (used only where a descriptor
    /// would never mix the two kinds).
    pub fn is_on(&self) -> bool {
        match self {
            ToggleValue::OnOff(on) => *on,
            ToggleValue::Position(_) => true,
        }
    }

    /// Lever position, if this is a two-way toggle.
    pub fn position(&self) -> Option<ThrowPosition> {
        match self {
            ToggleValue::Position(p) => Some(*p),
            ToggleValue::OnOff(_) => None,
        }
    }
}

/// One toggle input declared by a descriptor, with its kind and the value it
/// takes when simulation is entered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleSpec {
    pub id: &'static str,
    pub kind: ToggleKind,
    pub default: ToggleValue,
}

impl ToggleSpec {
    pub fn on_off(id: &'static str, default_on: bool) -> Self {
        ToggleSpec {
            id,
            kind: ToggleKind::OnOff,
            default: ToggleValue::OnOff(default_on),
        }
    }

    pub fn momentary(id: &'static str) -> Self {
        ToggleSpec {
            id,
            kind: ToggleKind::Momentary,
            default: ToggleValue::OnOff(false),
        }
    }

    pub fn two_way(id: &'static str, default: ThrowPosition) -> Self {
        ToggleSpec {
            id,
            kind: ToggleKind::TwoWay,
            default: ToggleValue::Position(default),
        }
    }
}

/// Name of the power toggle every descriptor declares.
pub const POWER_TOGGLE: &str = "power";

/// How toggle inputs map to lit LED groups once the circuit is complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputRule {
    /// Every declared LED group follows the power toggle.
    AllWhenPowered,
    /// Power AND a named gate toggle (push switch, tactile switch).
    Gated { gate: &'static str },
    /// A two-way lever lights exactly one of two groups; mutually exclusive.
    ThrowSelect {
        lever: &'static str,
        left_group: LedGroup,
        right_group: LedGroup,
    },
    /// Relay / limit-switch contacts: the normally-closed group is lit while
    /// powered and unpressed, the normally-open group only while pressed.
    Contacts {
        press: &'static str,
        open_group: LedGroup,
        closed_group: LedGroup,
    },
    /// Staircase wiring: one group, lit when both levers agree.
    MatchedThrows {
        first: &'static str,
        second: &'static str,
    },
}

/// Declarative description of one experiment's circuit.
#[derive(Debug, Clone)]
pub struct Descriptor {
    /// Stable experiment name, used by the CLI and WASM constructors.
    pub name: &'static str,
    /// Ordering policy and legal pairings.
    pub sequence: SequencePolicy,
    /// Full-wiring predicate.
    pub completion: CompletionRule,
    /// Simulation output mapping.
    pub output: OutputRule,
    /// LED groups present on the board, in display order.
    pub led_groups: Vec<LedGroup>,
    /// Toggle inputs available in simulation, with per-descriptor defaults.
    pub toggles: Vec<ToggleSpec>,
    /// Whether the power source must be docked before completion counts.
    pub needs_power_dock: bool,
}

impl Descriptor {
    /// Find a declared toggle by id.
    pub fn toggle(&self, id: &str) -> Option<&ToggleSpec> {
        self.toggles.iter().find(|t| t.id == id)
    }
}
