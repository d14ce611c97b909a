pub mod breadboard;
pub mod highlight;
pub mod layout;
pub mod measure;
pub mod model;
pub mod path;
pub mod relation;
pub mod svg;
pub mod wiring;

use wasm_bindgen::prelude::*;

use breadboard::{Breadboard, LayoutToken};
use highlight::TagChanges;
use layout::LayoutEngine;
use measure::RectTable;
use model::DomainGraph;
use svg::SvgRenderer;
use wiring::extract_wiring;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn engine(lane_width: Option<f64>) -> LayoutEngine {
    match lane_width {
        Some(w) if w > 0.0 => LayoutEngine::default().with_lane_width(w),
        _ => LayoutEngine::default(),
    }
}

/// Lay out and render the wiring of a discovery result in one go.
#[wasm_bindgen(js_name = "wiringToSvg")]
pub fn wiring_to_svg(
    graph_json: &str,
    rects_json: &str,
    base: Option<String>,
    lane_width: Option<f64>,
) -> Result<String, String> {
    let graph = DomainGraph::from_json(graph_json).map_err(|e| e.to_string())?;
    let rects = RectTable::from_json(rects_json).map_err(|e| e.to_string())?;
    let base = base.unwrap_or_default();

    let wires = extract_wiring(&graph, &base);
    let layout = engine(lane_width).layout(&wires, &rects);
    let svg = SvgRenderer::default().render(&layout, &base, &[]);

    Ok(svg)
}

fn to_js_array(items: &[String]) -> js_sys::Array {
    items.iter().map(|s| JsValue::from_str(s)).collect()
}

/// Class lists of an event target and its ancestors, as an array of arrays
/// of strings. Non-string entries are ignored.
fn from_js_ancestry(ancestry: &js_sys::Array) -> Vec<Vec<String>> {
    ancestry
        .iter()
        .map(|level| {
            js_sys::Array::from(&level)
                .iter()
                .filter_map(|c| c.as_string())
                .collect()
        })
        .collect()
}

/// Relation classes to cool down and to heat up.
#[wasm_bindgen(js_name = "TagChanges")]
pub struct JsTagChanges {
    changes: TagChanges,
}

#[wasm_bindgen(js_class = "TagChanges")]
impl JsTagChanges {
    #[wasm_bindgen(getter)]
    pub fn cool(&self) -> js_sys::Array {
        to_js_array(&self.changes.cool)
    }

    #[wasm_bindgen(getter)]
    pub fn heat(&self) -> js_sys::Array {
        to_js_array(&self.changes.heat)
    }
}

/// Stateful breadboard wiring for a page that re-lays out on resize and
/// highlights on pointer events.
#[wasm_bindgen(js_name = "Breadboard")]
pub struct JsBreadboard {
    inner: Breadboard,
}

#[wasm_bindgen(js_class = "Breadboard")]
impl JsBreadboard {
    #[wasm_bindgen(constructor)]
    pub fn new(base: Option<String>, lane_width: Option<f64>) -> Self {
        Self {
            inner: Breadboard::new(base.unwrap_or_default(), engine(lane_width)),
        }
    }

    #[wasm_bindgen(getter, js_name = "contentId")]
    pub fn content_id(&self) -> String {
        self.inner.content_id()
    }

    /// Returns `undefined` if the wiring didn't change, otherwise the tags
    /// to cool down.
    #[wasm_bindgen(js_name = "setGraph")]
    pub fn set_graph(&mut self, graph_json: &str) -> Result<Option<JsTagChanges>, String> {
        let graph = DomainGraph::from_json(graph_json).map_err(|e| e.to_string())?;
        Ok(self
            .inner
            .set_graph(&graph)
            .map(|changes| JsTagChanges { changes }))
    }

    /// Like `setGraph`, wiring up only the given network namespaces.
    #[wasm_bindgen(js_name = "setGraphFor")]
    pub fn set_graph_for(
        &mut self,
        graph_json: &str,
        netnsids: Vec<f64>,
    ) -> Result<Option<JsTagChanges>, String> {
        let graph = DomainGraph::from_json(graph_json).map_err(|e| e.to_string())?;
        let netnsids: Vec<u64> = netnsids.iter().map(|&id| id as u64).collect();
        Ok(self
            .inner
            .set_graph_for(&graph, &netnsids)
            .map(|changes| JsTagChanges { changes }))
    }

    pub fn relayout(&mut self, token: &str, rects_json: &str) -> Result<bool, String> {
        let rects = RectTable::from_json(rects_json).map_err(|e| e.to_string())?;
        Ok(self.inner.relayout(LayoutToken::from(token), &rects))
    }

    pub fn svg(&self) -> String {
        self.inner.svg()
    }

    #[wasm_bindgen(getter)]
    pub fn hot(&self) -> js_sys::Array {
        to_js_array(self.inner.highlighter().hot())
    }

    #[wasm_bindgen(js_name = "pointerOver")]
    pub fn pointer_over(&mut self, ancestry: js_sys::Array) -> JsTagChanges {
        JsTagChanges {
            changes: self.inner.pointer_over(from_js_ancestry(&ancestry)),
        }
    }

    #[wasm_bindgen(js_name = "pointerOut")]
    pub fn pointer_out(&mut self, ancestry: js_sys::Array) -> JsTagChanges {
        JsTagChanges {
            changes: self.inner.pointer_out(from_js_ancestry(&ancestry)),
        }
    }

    pub fn click(&mut self, ancestry: js_sys::Array) -> JsTagChanges {
        JsTagChanges {
            changes: self.inner.click(from_js_ancestry(&ancestry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GRAPH: &str = r#"{
        "namespaces": [
            { "netnsid": 1, "nifs": [
                { "name": "lo", "isPhysical": false },
                { "name": "eth0", "isPhysical": true, "operstate": "UP" },
                { "name": "veth0", "kind": "veth", "peer": { "netnsid": 2, "name": "eth0" } }
            ]},
            { "netnsid": 2, "nifs": [
                { "name": "eth0", "kind": "veth", "peer": { "netnsid": 1, "name": "veth0" } }
            ]}
        ]
    }"#;

    const RECTS: &str = r#"{
        "container": { "top": 0, "left": 0, "bottom": 200, "right": 300 },
        "endpoints": {
            "nif-1-eth0": { "top": 10, "left": 10, "bottom": 30, "right": 280 },
            "nif-1-veth0": { "top": 40, "left": 10, "bottom": 60, "right": 280 },
            "nif-2-eth0": { "top": 110, "left": 10, "bottom": 130, "right": 280 }
        }
    }"#;

    #[test]
    fn test_wiring_to_svg() {
        let svg = wiring_to_svg(GRAPH, RECTS, None, None).unwrap();
        assert!(svg.contains("wire veth rel-nif-1-veth0-nif-2-eth0"));
        assert!(svg.contains("wire external rel-nif-1-eth0"));
        assert!(!svg.contains("nif-1-lo"));
    }

    #[test]
    fn test_breadboard_set_graph() {
        let mut bb = JsBreadboard::new(None, None);
        let changes = bb.set_graph(GRAPH).unwrap().unwrap();
        assert!(changes.changes.is_empty());
        assert!(bb.set_graph(GRAPH).unwrap().is_none());

        assert!(bb.set_graph_for(GRAPH, vec![2.0]).unwrap().is_some());
        assert_eq!(bb.inner.wires().len(), 1);
        assert_eq!(bb.inner.wires()[0].endpoint_a, "nif-2-eth0");
        assert!(bb.set_graph_for("[", vec![1.0]).is_err());
    }

    #[test]
    fn test_wiring_to_svg_bad_json() {
        let err = wiring_to_svg("[", RECTS, None, None).unwrap_err();
        assert!(err.starts_with("Invalid discovery JSON"));
        let err = wiring_to_svg(GRAPH, "{", None, None).unwrap_err();
        assert!(err.starts_with("Invalid rectangles JSON"));
    }
}
