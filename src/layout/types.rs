//! Data structures for wiring layout.

use crate::measure::Rect;
use crate::wiring::WireKind;

/// A two-ended wire whose endpoints have been measured and which has been
/// assigned to a swim lane.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedWire {
    pub kind: WireKind,
    pub is_down: bool,
    pub endpoint_a: String,
    pub endpoint_b: String,
    /// Endpoint rectangles relative to the container.
    pub rect_a: Rect,
    pub rect_b: Rect,
    /// Endpoint B lies above endpoint A, so the wire runs from B to A.
    pub reversed: bool,
    /// Upper vertical position where the wire starts.
    pub from: f64,
    /// Lower vertical position where the wire ends.
    pub to: f64,
    /// Rounded vertical length.
    pub length: f64,
    /// Horizontal distance of the upper endpoint from the container's right edge.
    pub inset_from: f64,
    /// Horizontal distance of the lower endpoint from the container's right edge.
    pub inset_to: f64,
    /// Swim lane, counting from 0 next to the container.
    pub lane: usize,
}

/// A wire going from a single network interface to the outside.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedExternal {
    pub is_down: bool,
    pub endpoint: String,
    pub rect: Rect,
    pub from: f64,
    pub inset_from: f64,
}

/// The complete result of one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct WiringLayout {
    /// Two-ended wires, in placement order.
    pub wires: Vec<ResolvedWire>,
    pub externals: Vec<ResolvedExternal>,
    /// Lanes occupied by two-ended wires.
    pub lanes: usize,
    /// Extra lanes reserved for external wires crossing the gutter.
    pub reserved_lanes: usize,
    pub lane_width: f64,
    /// Height of the measured container.
    pub height: f64,
}

impl WiringLayout {
    pub fn empty(lane_width: f64, reserved_lanes: usize) -> Self {
        Self {
            wires: Vec::new(),
            externals: Vec::new(),
            lanes: 0,
            reserved_lanes,
            lane_width,
            height: 0.0,
        }
    }

    pub fn pane_lanes(&self) -> usize {
        self.lanes + self.reserved_lanes
    }

    pub fn pane_width(&self) -> f64 {
        self.pane_lanes() as f64 * self.lane_width
    }

    pub fn is_empty(&self) -> bool {
        self.wires.is_empty() && self.externals.is_empty()
    }
}
