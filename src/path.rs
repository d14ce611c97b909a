//! Wire path geometry: turns laid out wires into SVG path data.

use crate::layout::{ResolvedExternal, ResolvedWire, WiringLayout};
use crate::relation::relation_class_name;
use crate::wiring::WireKind;
use std::fmt;

/// One segment of a wire path. All but the initial move are relative.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    MoveTo { x: f64, y: f64 },
    LineBy { dx: f64, dy: f64 },
    /// Circular quarter turn; `clockwise` is the SVG sweep flag.
    ArcBy {
        radius: f64,
        clockwise: bool,
        dx: f64,
        dy: f64,
    },
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathSegment::MoveTo { x, y } => write!(f, "M {} {}", x, y),
            PathSegment::LineBy { dx, dy } => write!(f, "l {} {}", dx, dy),
            PathSegment::ArcBy {
                radius,
                clockwise,
                dx,
                dy,
            } => write!(
                f,
                "a {} {} 0 0 {} {} {}",
                radius,
                radius,
                u8::from(clockwise),
                dx,
                dy
            ),
        }
    }
}

/// End of the path a wire's marker is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerPlacement {
    Start,
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerKind {
    External,
    Macvlan,
}

impl MarkerKind {
    pub const ALL: [MarkerKind; 2] = [MarkerKind::External, MarkerKind::Macvlan];

    pub fn for_wire(kind: WireKind) -> Option<Self> {
        match kind {
            WireKind::External => Some(Self::External),
            WireKind::Macvlan => Some(Self::Macvlan),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarkerKind::External => "external",
            MarkerKind::Macvlan => "macvlan",
        }
    }

    /// Element id of the marker definition, in its normal or "down" variant.
    pub fn id(self, base: &str, down: bool) -> String {
        format!(
            "{}marker-{}{}",
            base,
            self.as_str(),
            if down { "down" } else { "" }
        )
    }

    fn class_name(self, down: bool) -> &'static str {
        match (self, down) {
            (MarkerKind::External, false) => "ext-marker",
            (MarkerKind::External, true) => "ext-marker-down",
            (MarkerKind::Macvlan, false) => "macvlan-marker",
            (MarkerKind::Macvlan, true) => "macvlan-marker-down",
        }
    }
}

/// A `<marker>` definition, referenced by id from wire paths.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerDef {
    pub id: String,
    pub class_name: &'static str,
    pub width: f64,
    pub height: f64,
    pub ref_x: f64,
    pub ref_y: f64,
    pub path: &'static str,
}

/// All marker definitions a wiring surface needs, two variants per kind.
pub fn marker_defs(base: &str) -> Vec<MarkerDef> {
    MarkerKind::ALL
        .iter()
        .flat_map(|&kind| {
            [false, true].map(|down| {
                let (width, height, ref_x, ref_y, path) = match kind {
                    // Arrowhead pointing off the grid.
                    MarkerKind::External => (3.0, 3.0, 0.0, 1.5, "M 0 3 L 3 1.5 L 0 0 Z"),
                    // Dot at the master interface.
                    MarkerKind::Macvlan => {
                        (2.0, 2.0, 1.0, 1.0, "M 1 2 a 1 1 0 0 0 0 -2 a 1 1 0 0 0 0 2")
                    }
                };
                MarkerDef {
                    id: kind.id(base, down),
                    class_name: kind.class_name(down),
                    width,
                    height,
                    ref_x,
                    ref_y,
                    path,
                }
            })
        })
        .collect()
}

/// A drawable wire.
#[derive(Debug, Clone, PartialEq)]
pub struct PathDescriptor {
    pub kind: WireKind,
    pub is_down: bool,
    /// Relation class name shared with the connected interfaces.
    pub relation: String,
    pub segments: Vec<PathSegment>,
    pub marker_placement: MarkerPlacement,
    /// Marker definition id, if this kind of wire has a marker.
    pub marker: Option<String>,
}

impl PathDescriptor {
    /// SVG path data.
    pub fn d(&self) -> String {
        self.segments
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Classes of the visible wire path.
    pub fn classes(&self, wire_class: &str) -> String {
        let mut classes = format!("{} {} {}", wire_class, self.kind, self.relation);
        if self.is_down {
            classes.push_str(" down");
        }
        classes
    }

    /// Final pen position relative to the start of the path.
    pub fn extent(&self) -> (f64, f64) {
        self.segments.iter().fold((0.0, 0.0), |(x, y), s| match *s {
            PathSegment::MoveTo { .. } => (x, y),
            PathSegment::LineBy { dx, dy } | PathSegment::ArcBy { dx, dy, .. } => (x + dx, y + dy),
        })
    }
}

/// Renders laid out wires into path descriptors.
///
/// Coordinates have their origin at the left edge of the wiring pane, which
/// sits flush against the right edge of the container; lead-in segments
/// reach back into the container using negative x.
pub struct PathRenderer<'a> {
    base: &'a str,
    lane_width: f64,
    lanes: usize,
}

impl<'a> PathRenderer<'a> {
    pub fn new(base: &'a str, lane_width: f64, lanes: usize) -> Self {
        Self {
            base,
            lane_width,
            lanes,
        }
    }

    pub fn for_layout(base: &'a str, layout: &WiringLayout) -> Self {
        Self::new(base, layout.lane_width, layout.lanes)
    }

    /// External wires first, then two-ended wires in placement order.
    pub fn render(&self, layout: &WiringLayout) -> Vec<PathDescriptor> {
        layout
            .externals
            .iter()
            .map(|e| self.external(e))
            .chain(layout.wires.iter().map(|w| self.two_ended(w)))
            .collect()
    }

    pub fn two_ended(&self, w: &ResolvedWire) -> PathDescriptor {
        let lw = self.lane_width;
        let r = lw / 2.0;
        let width = (w.lane as f64 + 0.5) * lw;
        let turn = |clockwise: bool, dx: f64, dy: f64| PathSegment::ArcBy {
            radius: r,
            clockwise,
            dx,
            dy,
        };
        let line = |dx: f64, dy: f64| PathSegment::LineBy { dx, dy };

        let segments = match w.kind {
            // The parent (master, underlay) sits above its dependent: bump at
            // the top.
            kind if kind.is_hierarchical() && w.reversed => vec![
                PathSegment::MoveTo {
                    x: -w.inset_from + r,
                    y: w.from,
                },
                turn(false, r, r),
                line(w.inset_from + width - 3.0 * r, 0.0),
                turn(true, r, r),
                line(0.0, w.length - lw - r),
                turn(true, -r, r),
                line(-(w.inset_to + width - r), 0.0),
            ],
            // The parent sits below: bump at the bottom.
            kind if kind.is_hierarchical() => vec![
                PathSegment::MoveTo {
                    x: -w.inset_from,
                    y: w.from,
                },
                line(w.inset_from + width - r, 0.0),
                turn(true, r, r),
                line(0.0, w.length - lw - r),
                turn(true, -r, r),
                line(-(w.inset_to + width - 3.0 * r), 0.0),
                turn(false, -r, r),
            ],
            _ => vec![
                PathSegment::MoveTo {
                    x: -w.inset_from,
                    y: w.from,
                },
                line(w.inset_from + width - r, 0.0),
                turn(true, r, r),
                line(0.0, w.length - lw),
                turn(true, -r, r),
                line(-(w.inset_to + width - r), 0.0),
            ],
        };

        PathDescriptor {
            kind: w.kind,
            is_down: w.is_down,
            relation: relation_class_name(self.base, &w.endpoint_a, Some(&w.endpoint_b)),
            segments,
            marker_placement: if w.reversed {
                MarkerPlacement::Start
            } else {
                MarkerPlacement::End
            },
            marker: MarkerKind::for_wire(w.kind).map(|m| m.id(self.base, w.is_down)),
        }
    }

    /// Straight line from the interface across the whole gutter.
    pub fn external(&self, e: &ResolvedExternal) -> PathDescriptor {
        let width = (self.lanes as f64 + 0.5) * self.lane_width;
        PathDescriptor {
            kind: WireKind::External,
            is_down: e.is_down,
            relation: relation_class_name(self.base, &e.endpoint, None),
            segments: vec![
                PathSegment::MoveTo {
                    x: -e.inset_from,
                    y: e.from,
                },
                PathSegment::LineBy {
                    dx: width + e.inset_from,
                    dy: 0.0,
                },
            ],
            marker_placement: MarkerPlacement::End,
            marker: Some(MarkerKind::External.id(self.base, e.is_down)),
        }
    }
}
