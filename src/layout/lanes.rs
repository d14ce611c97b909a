//! Lane assignment for two-ended wires.

use std::cmp::Ordering;

use super::types::ResolvedWire;

/// Vertical spans `[from, to]` properly overlap; touching ends don't count.
#[inline]
pub fn spans_overlap(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.1 && a.1 > b.0
}

/// Placement order: shorter wires first, then wires starting further up.
pub fn placement_order(a: &ResolvedWire, b: &ResolvedWire) -> Ordering {
    match a.length.total_cmp(&b.length) {
        Ordering::Equal => a.from.total_cmp(&b.from),
        ord => ord,
    }
}

/// Sort wires into placement order and greedily place each one into the
/// first lane where it doesn't overlap any wire already placed there.
///
/// Returns the number of lanes used.
pub fn assign_lanes(wires: &mut [ResolvedWire]) -> usize {
    wires.sort_by(placement_order);

    let mut lanes: Vec<Vec<(f64, f64)>> = Vec::new();
    for wire in wires.iter_mut() {
        let span = (wire.from, wire.to);
        let free = lanes
            .iter()
            .position(|placed| !placed.iter().any(|&other| spans_overlap(span, other)));
        let lane = match free {
            Some(lane) => lane,
            None => {
                lanes.push(Vec::new());
                lanes.len() - 1
            }
        };
        lanes[lane].push(span);
        wire.lane = lane;
    }
    lanes.len()
}
