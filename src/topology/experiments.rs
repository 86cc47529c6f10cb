//! Descriptor tables for the nine built-in experiments.
//!
//! Each function builds the terminal registry and the declarative rule set
//! for one experiment board. Terminal positions are in the 1200x600 board
//! viewport the adapter renders; the engine never reads them.
//!
//! Power-on defaults differ by experiment on purpose: switch and series
//! boards enter simulation powered, relay, limit-switch, two-way and
//! staircase boards enter unpowered. The default is part of each table,
//! not a rule the engine infers.

use crate::board::{LedGroup, Role, TerminalRegistry, ThrowPosition};
use crate::error::Result;
use crate::topology::rules::{
    named_pair, pair, CompletionRule, Descriptor, EndpointMatcher, OutputRule, PairRule, Pattern,
    SequencePolicy, ToggleSpec, POWER_TOGGLE,
};

const LED1: LedGroup = LedGroup(1);
const LED2: LedGroup = LedGroup(2);
const LED3: LedGroup = LedGroup(3);

/// One LED, one battery: match 5V to LED+ and GND to LED-.
pub fn simple_led() -> Result<(TerminalRegistry, Descriptor)> {
    let registry = TerminalRegistry::new(&[
        ("5v", Role::PowerPositive, (590.0, 289.0)),
        ("gnd", Role::PowerGround, (591.0, 309.0)),
        ("led_pos", Role::LedAnode(LED1), (275.0, 200.0)),
        ("led_neg", Role::LedCathode(LED1), (305.0, 200.0)),
    ])?;

    let edges = vec![
        pair(Role::PowerPositive, Role::LedAnode(LED1)),
        pair(Role::PowerGround, Role::LedCathode(LED1)),
    ];

    Ok((
        registry,
        Descriptor {
            name: "simple_led",
            sequence: SequencePolicy::Unordered {
                legal: edges.clone(),
            },
            completion: CompletionRule::AllOf(edges),
            output: OutputRule::AllWhenPowered,
            led_groups: vec![LED1],
            toggles: vec![ToggleSpec::on_off(POWER_TOGGLE, true)],
            needs_power_dock: true,
        },
    ))
}

/// Three LEDs chained in series.
pub fn series_leds() -> Result<(TerminalRegistry, Descriptor)> {
    let registry = TerminalRegistry::new(&[
        ("5v", Role::PowerPositive, (590.0, 289.0)),
        ("gnd", Role::PowerGround, (593.0, 309.0)),
        ("led1_pos", Role::LedAnode(LED1), (95.0, 200.0)),
        ("led1_neg", Role::LedCathode(LED1), (125.0, 200.0)),
        ("led2_pos", Role::LedAnode(LED2), (245.0, 200.0)),
        ("led2_neg", Role::LedCathode(LED2), (275.0, 200.0)),
        ("led3_pos", Role::LedAnode(LED3), (395.0, 200.0)),
        ("led3_neg", Role::LedCathode(LED3), (425.0, 200.0)),
    ])?;

    let edges = vec![
        pair(Role::PowerPositive, Role::LedAnode(LED1)),
        pair(Role::LedCathode(LED1), Role::LedAnode(LED2)),
        pair(Role::LedCathode(LED2), Role::LedAnode(LED3)),
        pair(Role::LedCathode(LED3), Role::PowerGround),
    ];

    Ok((
        registry,
        Descriptor {
            name: "series_leds",
            sequence: SequencePolicy::Unordered {
                legal: edges.clone(),
            },
            completion: CompletionRule::AllOf(edges),
            output: OutputRule::AllWhenPowered,
            led_groups: vec![LED1, LED2, LED3],
            toggles: vec![ToggleSpec::on_off(POWER_TOGGLE, true)],
            needs_power_dock: true,
        },
    ))
}

/// Three LEDs wired in parallel: any 5V pin may feed any anode, any GND pin
/// may take any cathode, but every LED needs both edges before the circuit
/// counts as complete.
pub fn parallel_leds() -> Result<(TerminalRegistry, Descriptor)> {
    let registry = TerminalRegistry::new(&[
        ("5v1", Role::PowerPositive, (560.0, 285.0)),
        ("5v2", Role::PowerPositive, (580.0, 285.0)),
        ("5v3", Role::PowerPositive, (600.0, 285.0)),
        ("gnd1", Role::PowerGround, (560.0, 305.0)),
        ("gnd2", Role::PowerGround, (580.0, 305.0)),
        ("gnd3", Role::PowerGround, (600.0, 305.0)),
        ("led1_pos", Role::LedAnode(LED1), (95.0, 200.0)),
        ("led1_neg", Role::LedCathode(LED1), (125.0, 200.0)),
        ("led2_pos", Role::LedAnode(LED2), (245.0, 200.0)),
        ("led2_neg", Role::LedCathode(LED2), (275.0, 200.0)),
        ("led3_pos", Role::LedAnode(LED3), (395.0, 200.0)),
        ("led3_neg", Role::LedCathode(LED3), (425.0, 200.0)),
    ])?;

    let legal = vec![
        PairRule::new(
            EndpointMatcher::Role(Role::PowerPositive),
            EndpointMatcher::AnyAnode,
        ),
        PairRule::new(
            EndpointMatcher::Role(Role::PowerGround),
            EndpointMatcher::AnyCathode,
        ),
    ];

    // One power and one ground rule per group; each is an existential check
    // over the connection set, so any of the three pins satisfies it.
    let completion = CompletionRule::AllOf(
        [LED1, LED2, LED3]
            .iter()
            .flat_map(|g| {
                [
                    pair(Role::PowerPositive, Role::LedAnode(*g)),
                    pair(Role::PowerGround, Role::LedCathode(*g)),
                ]
            })
            .collect(),
    );

    Ok((
        registry,
        Descriptor {
            name: "parallel_leds",
            sequence: SequencePolicy::Unordered { legal },
            completion,
            output: OutputRule::AllWhenPowered,
            led_groups: vec![LED1, LED2, LED3],
            toggles: vec![ToggleSpec::on_off(POWER_TOGGLE, true)],
            needs_power_dock: true,
        },
    ))
}

/// The two mirror wiring patterns shared by the push and tactile switch
/// boards: seed from 5V and wire towards GND, or the reverse.
fn switch_patterns() -> Vec<Pattern> {
    let pole = Role::SwitchPole(1);
    vec![
        Pattern::new(vec![
            pair(Role::PowerPositive, pole),
            pair(pole, Role::LedAnode(LED1)),
            pair(Role::LedCathode(LED1), Role::PowerGround),
        ]),
        Pattern::new(vec![
            pair(Role::PowerGround, pole),
            pair(pole, Role::LedCathode(LED1)),
            pair(Role::LedAnode(LED1), Role::PowerPositive),
        ]),
    ]
}

fn switch_board() -> Result<TerminalRegistry> {
    TerminalRegistry::new(&[
        ("5v", Role::PowerPositive, (590.0, 289.0)),
        ("gnd", Role::PowerGround, (591.0, 309.0)),
        ("led_pos", Role::LedAnode(LED1), (275.0, 200.0)),
        ("led_neg", Role::LedCathode(LED1), (305.0, 200.0)),
        ("t1", Role::SwitchPole(1), (430.0, 330.0)),
        ("t2", Role::SwitchPole(1), (460.0, 330.0)),
    ])
}

/// One LED behind a latching push switch; the first connection picks the
/// wiring direction.
pub fn push_switch() -> Result<(TerminalRegistry, Descriptor)> {
    let patterns = switch_patterns();
    Ok((
        switch_board()?,
        Descriptor {
            name: "push_switch",
            sequence: SequencePolicy::SeededPattern {
                patterns: patterns.clone(),
            },
            completion: CompletionRule::AnyPattern(patterns),
            output: OutputRule::Gated { gate: "switch" },
            led_groups: vec![LED1],
            toggles: vec![
                ToggleSpec::on_off(POWER_TOGGLE, true),
                ToggleSpec::on_off("switch", true),
            ],
            needs_power_dock: true,
        },
    ))
}

/// One LED behind a momentary tactile switch: lit only while held.
pub fn tactile_switch() -> Result<(TerminalRegistry, Descriptor)> {
    let patterns = switch_patterns();
    Ok((
        switch_board()?,
        Descriptor {
            name: "tactile_switch",
            sequence: SequencePolicy::SeededPattern {
                patterns: patterns.clone(),
            },
            completion: CompletionRule::AnyPattern(patterns),
            output: OutputRule::Gated { gate: "press" },
            led_groups: vec![LED1],
            toggles: vec![
                ToggleSpec::on_off(POWER_TOGGLE, true),
                ToggleSpec::momentary("press"),
            ],
            needs_power_dock: true,
        },
    ))
}

/// Relay with COM/NO/NC contacts driving two LEDs. The NC-side LED is lit
/// while powered and unpressed; the NO-side LED only while the coil button
/// is held.
pub fn relay() -> Result<(TerminalRegistry, Descriptor)> {
    let registry = TerminalRegistry::new(&[
        ("5v", Role::PowerPositive, (590.0, 200.0)),
        ("gnd1", Role::PowerGround, (520.0, 215.0)),
        ("gnd2", Role::PowerGround, (660.0, 215.0)),
        ("relay_com", Role::RelayCom, (600.0, 350.0)),
        ("relay_no", Role::RelayNo, (575.0, 350.0)),
        ("relay_nc", Role::RelayNc, (625.0, 350.0)),
        ("led1_pos", Role::LedAnode(LED1), (385.0, 280.0)),
        ("led1_neg", Role::LedCathode(LED1), (405.0, 290.0)),
        ("led2_pos", Role::LedAnode(LED2), (817.0, 280.0)),
        ("led2_neg", Role::LedCathode(LED2), (777.0, 290.0)),
    ])?;

    let legal = vec![
        pair(Role::PowerPositive, Role::RelayCom),
        pair(Role::RelayNo, Role::LedAnode(LED1)),
        pair(Role::RelayNc, Role::LedAnode(LED2)),
        PairRule::new(
            EndpointMatcher::Role(Role::PowerGround),
            EndpointMatcher::AnyCathode,
        ),
    ];

    // Ground returns are pinned per LED: wiring led1 to the far ground pin
    // is accepted as a legal pair but never completes the circuit.
    let completion = CompletionRule::AllOf(vec![
        pair(Role::PowerPositive, Role::RelayCom),
        pair(Role::RelayNo, Role::LedAnode(LED1)),
        pair(Role::RelayNc, Role::LedAnode(LED2)),
        named_pair("gnd1", "led1_neg"),
        named_pair("gnd2", "led2_neg"),
    ]);

    Ok((
        registry,
        Descriptor {
            name: "relay",
            sequence: SequencePolicy::Unordered { legal },
            completion,
            output: OutputRule::Contacts {
                press: "press",
                open_group: LED1,
                closed_group: LED2,
            },
            led_groups: vec![LED1, LED2],
            toggles: vec![
                ToggleSpec::on_off(POWER_TOGGLE, false),
                ToggleSpec::momentary("press"),
            ],
            needs_power_dock: true,
        },
    ))
}

/// Two-way (SPDT) switch selecting between two LEDs. No battery dock on
/// this board; the supply rail is fixed.
pub fn two_way_switch() -> Result<(TerminalRegistry, Descriptor)> {
    let registry = TerminalRegistry::new(&[
        ("5v", Role::PowerPositive, (590.0, 200.0)),
        ("gnd1", Role::PowerGround, (520.0, 215.0)),
        ("gnd2", Role::PowerGround, (660.0, 215.0)),
        ("switch_a", Role::SwitchThrowA(1), (575.0, 350.0)),
        ("switch_com", Role::SwitchCom(1), (600.0, 350.0)),
        ("switch_b", Role::SwitchThrowB(1), (625.0, 350.0)),
        ("led1_pos", Role::LedAnode(LED1), (385.0, 280.0)),
        ("led1_neg", Role::LedCathode(LED1), (405.0, 290.0)),
        ("led2_pos", Role::LedAnode(LED2), (817.0, 280.0)),
        ("led2_neg", Role::LedCathode(LED2), (777.0, 290.0)),
    ])?;

    let legal = vec![
        PairRule::new(
            EndpointMatcher::Role(Role::PowerGround),
            EndpointMatcher::AnyCathode,
        ),
        named_pair("led1_pos", "switch_a"),
        named_pair("led2_pos", "switch_b"),
        pair(Role::SwitchCom(1), Role::PowerPositive),
    ];

    let completion = CompletionRule::AllOf(vec![
        named_pair("gnd1", "led1_neg"),
        named_pair("gnd2", "led2_neg"),
        named_pair("led1_pos", "switch_a"),
        named_pair("led2_pos", "switch_b"),
        pair(Role::SwitchCom(1), Role::PowerPositive),
    ]);

    Ok((
        registry,
        Descriptor {
            name: "two_way_switch",
            sequence: SequencePolicy::Unordered { legal },
            completion,
            output: OutputRule::ThrowSelect {
                lever: "lever",
                left_group: LED1,
                right_group: LED2,
            },
            led_groups: vec![LED1, LED2],
            toggles: vec![
                ToggleSpec::on_off(POWER_TOGGLE, false),
                ToggleSpec::two_way("lever", ThrowPosition::Left),
            ],
            needs_power_dock: false,
        },
    ))
}

/// Limit switch with A/COM/B labels on the same contact block as the relay
/// board. Terminal A is the normally-open side, B the normally-closed side;
/// the binding is part of this table and covered by tests, since the two
/// boards share visual positions but not labels.
pub fn limit_switch() -> Result<(TerminalRegistry, Descriptor)> {
    let registry = TerminalRegistry::new(&[
        ("5v", Role::PowerPositive, (590.0, 200.0)),
        ("gnd1", Role::PowerGround, (520.0, 215.0)),
        ("gnd2", Role::PowerGround, (660.0, 215.0)),
        ("switch_a", Role::RelayNo, (575.0, 350.0)),
        ("switch_com", Role::RelayCom, (600.0, 350.0)),
        ("switch_b", Role::RelayNc, (625.0, 350.0)),
        ("led1_pos", Role::LedAnode(LED1), (385.0, 280.0)),
        ("led1_neg", Role::LedCathode(LED1), (405.0, 290.0)),
        ("led2_pos", Role::LedAnode(LED2), (817.0, 280.0)),
        ("led2_neg", Role::LedCathode(LED2), (777.0, 290.0)),
    ])?;

    let legal = vec![
        pair(Role::PowerPositive, Role::RelayCom),
        named_pair("switch_a", "led1_pos"),
        named_pair("switch_b", "led2_pos"),
        PairRule::new(
            EndpointMatcher::Role(Role::PowerGround),
            EndpointMatcher::AnyCathode,
        ),
    ];

    let completion = CompletionRule::AllOf(vec![
        pair(Role::PowerPositive, Role::RelayCom),
        named_pair("switch_a", "led1_pos"),
        named_pair("switch_b", "led2_pos"),
        named_pair("gnd1", "led1_neg"),
        named_pair("gnd2", "led2_neg"),
    ]);

    Ok((
        registry,
        Descriptor {
            name: "limit_switch",
            sequence: SequencePolicy::Unordered { legal },
            completion,
            output: OutputRule::Contacts {
                press: "press",
                open_group: LED1,
                closed_group: LED2,
            },
            led_groups: vec![LED1, LED2],
            toggles: vec![
                ToggleSpec::on_off(POWER_TOGGLE, false),
                ToggleSpec::momentary("press"),
            ],
            needs_power_dock: true,
        },
    ))
}

/// Staircase wiring: two SPDT switches control one LED. The cross-wiring
/// between the two switches is not symmetric, so every switch edge pins
/// exact terminals rather than roles.
pub fn staircase() -> Result<(TerminalRegistry, Descriptor)> {
    let registry = TerminalRegistry::new(&[
        ("5v", Role::PowerPositive, (581.0, 200.0)),
        ("gnd", Role::PowerGround, (590.0, 220.0)),
        ("led_pos", Role::LedAnode(LED1), (285.0, 210.0)),
        ("led_neg", Role::LedCathode(LED1), (315.0, 220.0)),
        ("switch1_a", Role::SwitchThrowA(1), (475.0, 350.0)),
        ("switch1_com", Role::SwitchCom(1), (500.0, 350.0)),
        ("switch1_b", Role::SwitchThrowB(1), (525.0, 350.0)),
        ("switch2_a", Role::SwitchThrowA(2), (675.0, 350.0)),
        ("switch2_com", Role::SwitchCom(2), (700.0, 350.0)),
        ("switch2_b", Role::SwitchThrowB(2), (725.0, 350.0)),
    ])?;

    let edges = vec![
        pair(Role::PowerGround, Role::LedCathode(LED1)),
        named_pair("5v", "switch2_com"),
        named_pair("switch2_a", "switch1_b"),
        named_pair("switch2_b", "switch1_a"),
        named_pair("switch1_com", "led_pos"),
    ];

    Ok((
        registry,
        Descriptor {
            name: "staircase",
            sequence: SequencePolicy::Unordered {
                legal: edges.clone(),
            },
            completion: CompletionRule::AllOf(edges),
            output: OutputRule::MatchedThrows {
                first: "switch1",
                second: "switch2",
            },
            led_groups: vec![LED1],
            toggles: vec![
                ToggleSpec::on_off(POWER_TOGGLE, false),
                ToggleSpec::two_way("switch1", ThrowPosition::Left),
                ToggleSpec::two_way("switch2", ThrowPosition::Left),
            ],
            needs_power_dock: true,
        },
    ))
}

/// Names of all built-in experiments, in menu order.
pub const EXPERIMENT_NAMES: [&str; 9] = [
    "simple_led",
    "series_leds",
    "parallel_leds",
    "push_switch",
    "tactile_switch",
    "relay",
    "two_way_switch",
    "limit_switch",
    "staircase",
];

/// Build a built-in experiment by name.
pub fn by_name(name: &str) -> Option<Result<(TerminalRegistry, Descriptor)>> {
    match name {
        "simple_led" => Some(simple_led()),
        "series_leds" => Some(series_leds()),
        "parallel_leds" => Some(parallel_leds()),
        "push_switch" => Some(push_switch()),
        "tactile_switch" => Some(tactile_switch()),
        "relay" => Some(relay()),
        "two_way_switch" => Some(two_way_switch()),
        "limit_switch" => Some(limit_switch()),
        "staircase" => Some(staircase()),
        _ => None,
    }
}
