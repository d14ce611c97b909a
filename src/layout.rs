//! Swim-lane layout of wires next to the network interface container.
//!
//! Each layout pass measures the wire endpoints afresh, normalizes every
//! two-ended wire to run downwards, and packs the wires into vertical swim
//! lanes so that wires sharing a lane never overlap.

mod anchors;
mod engine;
mod lanes;
mod types;

pub use anchors::{resolve_external, resolve_two_ended};
pub use engine::LayoutEngine;
pub use lanes::{assign_lanes, spans_overlap};
pub use types::{ResolvedExternal, ResolvedWire, WiringLayout};
