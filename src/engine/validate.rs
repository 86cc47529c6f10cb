//! Connection validation and completion detection.
//!
//! All checks are pure functions over the descriptor and the current wiring
//! state. The seeded-pattern policy re-derives the active pattern from the
//! first connection on every call instead of caching it, so the rule state
//! can never drift from the actual connection list.

use crate::board::{TerminalId, TerminalRegistry};
use crate::engine::wiring::WiringState;
use crate::topology::{CompletionRule, Descriptor, PairRule, Pattern, SequencePolicy};

/// Decide whether connecting `a` to `b` is legal right now.
///
/// Fails closed: self-loops, occupied terminals, duplicate pairs, and
/// unknown ids are all rejected before any rule is consulted.
pub fn can_connect(
    registry: &TerminalRegistry,
    descriptor: &Descriptor,
    wiring: &WiringState,
    a: TerminalId,
    b: TerminalId,
) -> bool {
    if a == b {
        return false;
    }
    if wiring.is_occupied(a) || wiring.is_occupied(b) || wiring.has_pair(a, b) {
        return false;
    }
    let (Ok(ta), Ok(tb)) = (registry.get(a), registry.get(b)) else {
        return false;
    };

    match &descriptor.sequence {
        SequencePolicy::Unordered { legal } => legal.iter().any(|rule| rule.matches(ta, tb)),
        SequencePolicy::SeededPattern { patterns } => {
            let stage = wiring.connections().len();
            active_patterns(registry, patterns, wiring).any(|p| {
                p.stages
                    .get(stage)
                    .map(|rule| rule.matches(ta, tb))
                    .unwrap_or(false)
            })
        }
    }
}

/// Patterns still consistent with the seed connection. With no connections
/// yet, every pattern is live and its first stage is the set of accepted
/// seed pairs.
fn active_patterns<'a>(
    registry: &'a TerminalRegistry,
    patterns: &'a [Pattern],
    wiring: &'a WiringState,
) -> impl Iterator<Item = &'a Pattern> {
    let seed = wiring.connections().first().copied();
    patterns.iter().filter(move |p| match seed {
        None => true,
        Some(conn) => match (registry.get(conn.a), registry.get(conn.b)) {
            (Ok(ta), Ok(tb)) => p
                .stages
                .first()
                .map(|rule| rule.matches(ta, tb))
                .unwrap_or(false),
            _ => false,
        },
    })
}

/// Is some existing connection accepted by the rule?
fn edge_satisfied(registry: &TerminalRegistry, wiring: &WiringState, rule: &PairRule) -> bool {
    wiring.connections().iter().any(|conn| {
        match (registry.get(conn.a), registry.get(conn.b)) {
            (Ok(ta), Ok(tb)) => rule.matches(ta, tb),
            _ => false,
        }
    })
}

/// Evaluate the full-wiring predicate, including the power-dock requirement
/// where the board has one. Every required edge must hold simultaneously.
pub fn is_complete(
    registry: &TerminalRegistry,
    descriptor: &Descriptor,
    wiring: &WiringState,
) -> bool {
    if descriptor.needs_power_dock && !wiring.is_power_docked() {
        return false;
    }
    match &descriptor.completion {
        CompletionRule::AllOf(rules) => rules
            .iter()
            .all(|rule| edge_satisfied(registry, wiring, rule)),
        CompletionRule::AnyPattern(patterns) => patterns.iter().any(|p| {
            p.stages
                .iter()
                .all(|rule| edge_satisfied(registry, wiring, rule))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::wiring::Connection;
    use crate::topology::experiments;

    fn connect_named(
        registry: &TerminalRegistry,
        descriptor: &Descriptor,
        wiring: &mut WiringState,
        a: &str,
        b: &str,
    ) -> bool {
        let a = registry.lookup(a).unwrap();
        let b = registry.lookup(b).unwrap();
        let ok = can_connect(registry, descriptor, wiring, a, b);
        if ok {
            wiring.push(Connection::new(a, b));
        }
        ok
    }

    #[test]
    fn test_rejects_self_loop_and_duplicates() {
        let (registry, descriptor) = experiments::simple_led().unwrap();
        let mut wiring = WiringState::new();
        let five_v = registry.lookup("5v").unwrap();
        let led_pos = registry.lookup("led_pos").unwrap();

        assert!(!can_connect(&registry, &descriptor, &wiring, five_v, five_v));

        assert!(can_connect(&registry, &descriptor, &wiring, five_v, led_pos));
        wiring.push(Connection::new(five_v, led_pos));

        // Both endpoints are now occupied; the pair itself is a duplicate.
        assert!(!can_connect(&registry, &descriptor, &wiring, led_pos, five_v));
        let gnd = registry.lookup("gnd").unwrap();
        assert!(!can_connect(&registry, &descriptor, &wiring, five_v, gnd));
    }

    #[test]
    fn test_simple_led_completes_with_both_edges() {
        let (registry, descriptor) = experiments::simple_led().unwrap();
        let mut wiring = WiringState::new();
        wiring.set_power_docked(true);

        assert!(connect_named(&registry, &descriptor, &mut wiring, "5v", "led_pos"));
        assert!(!is_complete(&registry, &descriptor, &wiring));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd", "led_neg"));
        assert!(is_complete(&registry, &descriptor, &wiring));
    }

    #[test]
    fn test_completion_requires_docked_power_source() {
        let (registry, descriptor) = experiments::simple_led().unwrap();
        let mut wiring = WiringState::new();
        assert!(connect_named(&registry, &descriptor, &mut wiring, "5v", "led_pos"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd", "led_neg"));

        assert!(!is_complete(&registry, &descriptor, &wiring));
        wiring.set_power_docked(true);
        assert!(is_complete(&registry, &descriptor, &wiring));
    }

    #[test]
    fn test_unordered_completion_is_order_independent() {
        let edge_sets: [&[(&str, &str)]; 2] = [
            &[
                ("5v", "led1_pos"),
                ("led1_neg", "led2_pos"),
                ("led2_neg", "led3_pos"),
                ("led3_neg", "gnd"),
            ],
            &[
                ("led3_neg", "gnd"),
                ("led2_neg", "led3_pos"),
                ("5v", "led1_pos"),
                ("led1_neg", "led2_pos"),
            ],
        ];

        for edges in edge_sets {
            let (registry, descriptor) = experiments::series_leds().unwrap();
            let mut wiring = WiringState::new();
            wiring.set_power_docked(true);
            for (a, b) in edges {
                assert!(connect_named(&registry, &descriptor, &mut wiring, a, b));
            }
            assert!(is_complete(&registry, &descriptor, &wiring));
        }
    }

    #[test]
    fn test_parallel_needs_every_led_group() {
        let (registry, descriptor) = experiments::parallel_leds().unwrap();
        let mut wiring = WiringState::new();
        wiring.set_power_docked(true);

        // Only LED2 wired: the existential check fails for groups 1 and 3.
        assert!(connect_named(&registry, &descriptor, &mut wiring, "5v1", "led2_pos"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd3", "led2_neg"));
        assert!(!is_complete(&registry, &descriptor, &wiring));

        assert!(connect_named(&registry, &descriptor, &mut wiring, "5v2", "led1_pos"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd1", "led1_neg"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "5v3", "led3_pos"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd2", "led3_neg"));
        assert!(is_complete(&registry, &descriptor, &wiring));
    }

    #[test]
    fn test_seeded_pattern_from_ground_side() {
        let (registry, descriptor) = experiments::push_switch().unwrap();
        let mut wiring = WiringState::new();
        wiring.set_power_docked(true);

        // Mirror pattern: GND -> switch -> LED- then LED+ -> 5V.
        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd", "t1"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "t2", "led_neg"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "led_pos", "5v"));
        assert!(is_complete(&registry, &descriptor, &wiring));
    }

    #[test]
    fn test_seeded_pattern_rejects_wrong_stage() {
        let (registry, descriptor) = experiments::push_switch().unwrap();
        let mut wiring = WiringState::new();
        wiring.set_power_docked(true);

        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd", "t1"));
        // Stage 1 of the ground-seeded pattern is switch -> LED-, so the
        // 5V-side edge is out of order here.
        assert!(!connect_named(&registry, &descriptor, &mut wiring, "led_pos", "5v"));
        // And the 5V seed edge belongs to the other pattern entirely.
        assert!(!connect_named(&registry, &descriptor, &mut wiring, "5v", "t2"));
    }

    #[test]
    fn test_seeded_first_connection_accepts_either_seed() {
        let (registry, descriptor) = experiments::push_switch().unwrap();
        let wiring = WiringState::new();
        let t1 = registry.lookup("t1").unwrap();
        let five_v = registry.lookup("5v").unwrap();
        let gnd = registry.lookup("gnd").unwrap();
        let led_pos = registry.lookup("led_pos").unwrap();

        assert!(can_connect(&registry, &descriptor, &wiring, five_v, t1));
        assert!(can_connect(&registry, &descriptor, &wiring, gnd, t1));
        assert!(!can_connect(&registry, &descriptor, &wiring, five_v, led_pos));
    }

    #[test]
    fn test_two_way_pins_exact_led_to_throw_wiring() {
        let (registry, descriptor) = experiments::two_way_switch().unwrap();
        let wiring = WiringState::new();
        let led2_pos = registry.lookup("led2_pos").unwrap();
        let switch_a = registry.lookup("switch_a").unwrap();
        let switch_b = registry.lookup("switch_b").unwrap();

        // LED2 belongs on throw B; throw A must reject it.
        assert!(!can_connect(&registry, &descriptor, &wiring, led2_pos, switch_a));
        assert!(can_connect(&registry, &descriptor, &wiring, led2_pos, switch_b));
    }

    #[test]
    fn test_relay_crossed_grounds_legal_but_incomplete() {
        let (registry, descriptor) = experiments::relay().unwrap();
        let mut wiring = WiringState::new();
        wiring.set_power_docked(true);

        assert!(connect_named(&registry, &descriptor, &mut wiring, "5v", "relay_com"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "relay_no", "led1_pos"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "relay_nc", "led2_pos"));
        // Grounds swapped: each edge is a legal role pair, but completion
        // pins the returns per LED.
        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd1", "led2_neg"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd2", "led1_neg"));
        assert!(!is_complete(&registry, &descriptor, &wiring));
    }

    #[test]
    fn test_staircase_cross_wiring_exact() {
        let (registry, descriptor) = experiments::staircase().unwrap();
        let mut wiring = WiringState::new();
        wiring.set_power_docked(true);

        assert!(connect_named(&registry, &descriptor, &mut wiring, "gnd", "led_neg"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "5v", "switch2_com"));
        // Straight-through wiring is not the staircase topology.
        let s1a = registry.lookup("switch1_a").unwrap();
        let s2a = registry.lookup("switch2_a").unwrap();
        assert!(!can_connect(&registry, &descriptor, &wiring, s1a, s2a));

        assert!(connect_named(&registry, &descriptor, &mut wiring, "switch2_a", "switch1_b"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "switch2_b", "switch1_a"));
        assert!(connect_named(&registry, &descriptor, &mut wiring, "switch1_com", "led_pos"));
        assert!(is_complete(&registry, &descriptor, &wiring));
    }
}
