//! Core types for board representation.

use std::fmt;

/// A unique identifier for a terminal on one board.
///
/// Ids are indices into the owning [`TerminalRegistry`](super::TerminalRegistry)
/// and are only meaningful within that registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TerminalId(pub usize);

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// Identifies one LED on a board when it carries several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LedGroup(pub u8);

impl fmt::Display for LedGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LED{}", self.0)
    }
}

/// Position of a two-way (SPDT) switch lever.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrowPosition {
    Left,
    Right,
}

impl ThrowPosition {
    /// The opposite lever position.
    pub fn flipped(self) -> Self {
        match self {
            ThrowPosition::Left => ThrowPosition::Right,
            ThrowPosition::Right => ThrowPosition::Left,
        }
    }
}

/// Electrical role of a terminal.
///
/// Roles drive connection legality; several terminals may share a role
/// (a parallel board exposes three interchangeable `PowerPositive` pins).
/// The `u8` on the switch variants distinguishes multiple switches on one
/// board, the same way [`LedGroup`] distinguishes LEDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// 5V supply pin.
    PowerPositive,
    /// Ground pin.
    PowerGround,
    /// LED anode (+) of the given group.
    LedAnode(LedGroup),
    /// LED cathode (-) of the given group.
    LedCathode(LedGroup),
    /// Interchangeable pin of a simple push or tactile switch.
    SwitchPole(u8),
    /// Common pin of a two-way switch.
    SwitchCom(u8),
    /// First throw of a two-way switch.
    SwitchThrowA(u8),
    /// Second throw of a two-way switch.
    SwitchThrowB(u8),
    /// Relay / limit-switch common contact.
    RelayCom,
    /// Relay / limit-switch normally-open contact.
    RelayNo,
    /// Relay / limit-switch normally-closed contact.
    RelayNc,
}

impl Role {
    /// True for LED anodes of any group.
    pub fn is_anode(&self) -> bool {
        matches!(self, Role::LedAnode(_))
    }

    /// True for LED cathodes of any group.
    pub fn is_cathode(&self) -> bool {
        matches!(self, Role::LedCathode(_))
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::PowerPositive => write!(f, "5V"),
            Role::PowerGround => write!(f, "GND"),
            Role::LedAnode(g) => write!(f, "{g}+"),
            Role::LedCathode(g) => write!(f, "{g}-"),
            Role::SwitchPole(n) => write!(f, "SW{n}"),
            Role::SwitchCom(n) => write!(f, "SW{n}.COM"),
            Role::SwitchThrowA(n) => write!(f, "SW{n}.A"),
            Role::SwitchThrowB(n) => write!(f, "SW{n}.B"),
            Role::RelayCom => write!(f, "COM"),
            Role::RelayNo => write!(f, "NO"),
            Role::RelayNc => write!(f, "NC"),
        }
    }
}

/// A named connection point on a board.
///
/// Terminals are fixed for the lifetime of one circuit instance; the engine
/// only ever references them. The position is carried for the presentation
/// adapter's convenience and never enters any validation decision.
#[derive(Debug, Clone)]
pub struct Terminal {
    pub id: TerminalId,
    pub name: String,
    pub role: Role,
    pub pos: (f32, f32),
}
