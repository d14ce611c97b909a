//! Endpoint anchors: measuring wire endpoints and normalizing orientation.

use crate::measure::{EndpointRects, Rect};
use crate::wiring::Wire;

use super::types::{ResolvedExternal, ResolvedWire};

/// Measure both endpoints of a two-ended wire relative to `frame`.
///
/// Returns `None` if an endpoint isn't rendered or the wire loops back onto
/// its own endpoint.
pub fn resolve_two_ended<R: EndpointRects>(
    wire: &Wire,
    frame: &Rect,
    rects: &R,
) -> Option<ResolvedWire> {
    let endpoint_b = wire.endpoint_b.as_deref()?;
    if endpoint_b == wire.endpoint_a {
        log::debug!("dropping self-referential wire at {}", endpoint_b);
        return None;
    }
    let rect_a = measure(&wire.endpoint_a, frame, rects)?;
    let rect_b = measure(endpoint_b, frame, rects)?;

    // Normalize so that the wire always runs downwards; remember when this
    // flips the natural orientation from A to B.
    let reversed = rect_a.center_y() > rect_b.center_y();
    let (upper, lower) = if reversed {
        (&rect_b, &rect_a)
    } else {
        (&rect_a, &rect_b)
    };
    let from = upper.center_y();
    let to = lower.center_y();

    let frame_width = frame.width();
    let inset_a = frame_width - rect_a.right;
    let inset_b = frame_width - rect_b.right;
    let (inset_from, inset_to) = if reversed {
        (inset_b, inset_a)
    } else {
        (inset_a, inset_b)
    };

    Some(ResolvedWire {
        kind: wire.kind,
        is_down: wire.is_down,
        endpoint_a: wire.endpoint_a.clone(),
        endpoint_b: endpoint_b.to_string(),
        rect_a,
        rect_b,
        reversed,
        from,
        to,
        length: (to - from).round(),
        inset_from,
        inset_to,
        lane: 0,
    })
}

/// Measure the single endpoint of an external wire relative to `frame`.
pub fn resolve_external<R: EndpointRects>(
    wire: &Wire,
    frame: &Rect,
    rects: &R,
) -> Option<ResolvedExternal> {
    let rect = measure(&wire.endpoint_a, frame, rects)?;
    Some(ResolvedExternal {
        is_down: wire.is_down,
        endpoint: wire.endpoint_a.clone(),
        rect,
        from: rect.center_y(),
        inset_from: frame.width() - rect.right,
    })
}

fn measure<R: EndpointRects>(id: &str, frame: &Rect, rects: &R) -> Option<Rect> {
    let rect = rects.endpoint(id);
    if rect.is_none() {
        log::debug!("endpoint {} not rendered, dropping its wire", id);
    }
    rect.map(|r| r.relative_to(frame))
}
