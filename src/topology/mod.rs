//! Topology descriptors: the declarative rule sets that turn the generic
//! engine into one concrete experiment.
//!
//! The engine in [`crate::engine`] is a rule interpreter; everything that
//! differs between experiments lives in a [`Descriptor`] built here. The
//! built-in boards are in [`experiments`].

pub mod experiments;
mod rules;

pub use rules::{
    named_pair, pair, CompletionRule, Descriptor, EndpointMatcher, OutputRule, PairRule, Pattern,
    SequencePolicy, ToggleKind, ToggleSpec, ToggleValue, POWER_TOGGLE,
};
