//! A breadboard: the wiring pane next to a container of network interface
//! badges, kept in sync with discovery results, measurements, and pointer
//! interaction.

use crate::highlight::{Highlighter, MAX_ANCESTOR_DEPTH, TagChanges, locate_relation_classes};
use crate::layout::{LayoutEngine, WiringLayout};
use crate::measure::EndpointRects;
use crate::model::DomainGraph;
use crate::svg::SvgRenderer;
use crate::wiring::{Wire, extract_wiring, extract_wiring_for};
use std::fmt;

/// Opaque value that changes whenever the badge container may have
/// reflowed. Any change triggers a fresh layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutToken(String);

impl LayoutToken {
    /// Token before the container has been measured at all.
    pub fn initial() -> Self {
        Self::default()
    }

    /// Token derived from the (debounced) observed container size.
    pub fn from_size(width: f64, height: f64) -> Self {
        Self(format!("{}x{}", width, height))
    }
}

impl From<String> for LayoutToken {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for LayoutToken {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for LayoutToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub struct Breadboard {
    base: String,
    engine: LayoutEngine,
    renderer: SvgRenderer,
    wires: Vec<Wire>,
    token: Option<LayoutToken>,
    layout: WiringLayout,
    /// Wires changed since the last layout pass.
    stale: bool,
    highlighter: Highlighter,
}

impl Breadboard {
    /// `base` scopes element ids and relation classes to this breadboard.
    pub fn new(base: impl Into<String>, engine: LayoutEngine) -> Self {
        let layout = WiringLayout::empty(engine.lane_width, engine.reserved_lanes);
        Self {
            base: base.into(),
            engine,
            renderer: SvgRenderer::default(),
            wires: Vec::new(),
            token: None,
            layout,
            stale: true,
            highlighter: Highlighter::new(),
        }
    }

    pub fn with_renderer(mut self, renderer: SvgRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// Id of the element holding the network interface badges.
    pub fn content_id(&self) -> String {
        format!("{}breadboard-content", self.base)
    }

    pub fn wires(&self) -> &[Wire] {
        &self.wires
    }

    pub fn layout(&self) -> &WiringLayout {
        &self.layout
    }

    pub fn highlighter(&self) -> &Highlighter {
        &self.highlighter
    }

    /// Wire up all namespaces of a fresh discovery result. Returns `None`
    /// if the wiring is unchanged, otherwise the highlight changes to apply.
    pub fn set_graph(&mut self, graph: &DomainGraph) -> Option<TagChanges> {
        let wires = extract_wiring(graph, &self.base);
        self.set_wires(wires)
    }

    /// Wire up only the given namespaces of a fresh discovery result.
    pub fn set_graph_for(&mut self, graph: &DomainGraph, netnsids: &[u64]) -> Option<TagChanges> {
        let wires = extract_wiring_for(graph, netnsids, &self.base);
        self.set_wires(wires)
    }

    /// Replace the wires. Changed wires drop any highlight, as its relations
    /// may no longer exist; the returned changes cool whatever was hot.
    pub fn set_wires(&mut self, wires: Vec<Wire>) -> Option<TagChanges> {
        // Identical polls keep a pinned selection.
        if wires == self.wires {
            return None;
        }
        log::debug!(
            "{}: wiring changed, {} wires",
            self.content_id(),
            wires.len()
        );
        self.wires = wires;
        self.stale = true;
        Some(self.highlighter.reset())
    }

    /// Run a layout pass if the token changed or the wires did. Returns
    /// whether a new layout was computed.
    pub fn relayout<R: EndpointRects>(&mut self, token: LayoutToken, rects: R) -> bool {
        if !self.stale && self.token.as_ref() == Some(&token) {
            return false;
        }
        self.layout = self.engine.layout(&self.wires, rects);
        log::debug!(
            "{}: layout {} placed {} wires in {} lanes",
            self.content_id(),
            token,
            self.layout.wires.len() + self.layout.externals.len(),
            self.layout.lanes
        );
        self.token = Some(token);
        self.stale = false;
        true
    }

    /// The wiring pane for the current layout and highlight.
    pub fn svg(&self) -> String {
        self.renderer
            .render(&self.layout, &self.base, self.highlighter.hot())
    }

    fn relations<I, C, S>(&self, ancestry: I) -> Vec<String>
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        locate_relation_classes(ancestry, &self.base, MAX_ANCESTOR_DEPTH)
    }

    /// `ancestry` yields the class lists of the event target and its
    /// ancestors, nearest first.
    pub fn pointer_over<I, C, S>(&mut self, ancestry: I) -> TagChanges
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = self.relations(ancestry);
        self.highlighter.pointer_over(tags)
    }

    pub fn pointer_out<I, C, S>(&mut self, ancestry: I) -> TagChanges
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = self.relations(ancestry);
        self.highlighter.pointer_out(&tags)
    }

    pub fn click<I, C, S>(&mut self, ancestry: I) -> TagChanges
    where
        I: IntoIterator<Item = C>,
        C: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = self.relations(ancestry);
        self.highlighter.click(tags)
    }
}

impl Default for Breadboard {
    fn default() -> Self {
        Self::new("", LayoutEngine::default())
    }
}
