//! Layout engine core implementation.

use crate::measure::EndpointRects;
use crate::wiring::{Wire, WireKind};

use super::anchors::{resolve_external, resolve_two_ended};
use super::lanes::assign_lanes;
use super::types::WiringLayout;

/// Layout engine configuration and computation.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutEngine {
    pub(crate) lane_width: f64,
    pub(crate) reserved_lanes: usize,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self {
            lane_width: 16.0,
            reserved_lanes: 2,
        }
    }
}

impl LayoutEngine {
    pub fn with_lane_width(mut self, lane_width: f64) -> Self {
        self.lane_width = lane_width;
        self
    }

    pub fn with_reserved_lanes(mut self, reserved_lanes: usize) -> Self {
        self.reserved_lanes = reserved_lanes;
        self
    }

    pub fn lane_width(&self) -> f64 {
        self.lane_width
    }

    /// Compute a fresh layout for the given wires from the current
    /// measurements. Nothing is carried over from earlier passes.
    pub fn layout<R: EndpointRects>(&self, wires: &[Wire], rects: R) -> WiringLayout {
        let mut layout = WiringLayout::empty(self.lane_width, self.reserved_lanes);
        let Some(frame) = rects.container() else {
            log::debug!("wiring container not rendered, skipping layout");
            return layout;
        };
        layout.height = frame.height();

        for wire in wires {
            if !wire.is_well_formed() {
                log::debug!("dropping malformed {} wire at {}", wire.kind, wire.endpoint_a);
                continue;
            }
            match wire.kind {
                WireKind::External => {
                    if let Some(ext) = resolve_external(wire, &frame, &rects) {
                        layout.externals.push(ext);
                    }
                }
                _ => {
                    if let Some(resolved) = resolve_two_ended(wire, &frame, &rects) {
                        layout.wires.push(resolved);
                    }
                }
            }
        }

        layout.lanes = assign_lanes(&mut layout.wires);
        layout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::lanes::spans_overlap;
    use crate::measure::{Rect, RectTable};
    use crate::svg::SvgRenderer;

    /// Badges stacked in a column, 20px high with 10px gaps.
    fn column(ids: &[&str]) -> RectTable {
        let mut table = RectTable::new(Rect::new(0.0, 0.0, 1000.0, 300.0));
        for (i, id) in ids.iter().enumerate() {
            let top = i as f64 * 30.0;
            table.insert(*id, Rect::new(top, 20.0, top + 20.0, 200.0));
        }
        table
    }

    #[test]
    fn test_empty() {
        let layout = LayoutEngine::default().layout(&[], column(&[]));
        assert!(layout.is_empty());
        assert_eq!(layout.lanes, 0);
        assert_eq!(layout.pane_lanes(), 2);
    }

    #[test]
    fn test_missing_container() {
        let wires = vec![Wire::external("a")];
        let layout = LayoutEngine::default().layout(&wires, RectTable::default());
        assert!(layout.is_empty());
    }

    #[test]
    fn test_missing_endpoint_dropped() {
        let rects = column(&["a", "b"]);
        let wires = vec![
            Wire::two_ended(WireKind::Veth, "a", "b"),
            Wire::two_ended(WireKind::Veth, "a", "ghost"),
            Wire::external("ghost"),
        ];
        let layout = LayoutEngine::default().layout(&wires, &rects);
        assert_eq!(layout.wires.len(), 1);
        assert!(layout.externals.is_empty());
        assert_eq!(layout.lanes, 1);
    }

    #[test]
    fn test_external_takes_no_lane() {
        let rects = column(&["a", "b", "c"]);
        let wires = vec![
            Wire::external("a"),
            Wire::two_ended(WireKind::Macvlan, "c", "b"),
        ];
        let layout = LayoutEngine::default().layout(&wires, &rects);
        assert_eq!(layout.externals.len(), 1);
        assert_eq!(layout.wires.len(), 1);
        assert_eq!(layout.lanes, 1);
        assert_eq!(layout.pane_width(), 3.0 * 16.0);
    }

    #[test]
    fn test_malformed_dropped() {
        let rects = column(&["a"]);
        let wires = vec![Wire {
            kind: WireKind::Veth,
            is_down: false,
            endpoint_a: "a".into(),
            endpoint_b: None,
        }];
        let layout = LayoutEngine::default().layout(&wires, &rects);
        assert!(layout.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let ids = ["a", "b", "c", "d", "e", "f"];
        let rects = column(&ids);
        let wires = vec![
            Wire::two_ended(WireKind::Veth, "a", "f"),
            Wire::two_ended(WireKind::Veth, "e", "b"),
            Wire::two_ended(WireKind::Macvlan, "c", "d"),
            Wire::two_ended(WireKind::Vxlan, "d", "a"),
            Wire::two_ended(WireKind::PfVf, "b", "c"),
            Wire::external("e"),
        ];
        let engine = LayoutEngine::default();
        let first = engine.layout(&wires, &rects);
        let second = engine.layout(&wires, &rects);
        assert_eq!(first, second);

        let renderer = SvgRenderer::default();
        let hot = vec!["rel-c-d".to_string()];
        assert_eq!(
            renderer.render(&first, "", &hot),
            renderer.render(&second, "", &hot)
        );
        assert_eq!(
            renderer.render(&first, "", &[]),
            renderer.render(&engine.layout(&wires, &rects), "", &[])
        );

        for wire in &first.wires {
            assert!(wire.from <= wire.to);
        }
        for (i, a) in first.wires.iter().enumerate() {
            for b in &first.wires[i + 1..] {
                if a.lane == b.lane {
                    assert!(!spans_overlap((a.from, a.to), (b.from, b.to)));
                }
            }
        }
    }

    #[test]
    fn test_lane_width_config() {
        let engine = LayoutEngine::default()
            .with_lane_width(10.0)
            .with_reserved_lanes(1);
        let layout = engine.layout(&[], column(&[]));
        assert_eq!(layout.lane_width, 10.0);
        assert_eq!(layout.pane_width(), 10.0);
    }
}
