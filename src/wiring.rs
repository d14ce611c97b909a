//! Extraction of the wiring plan from the discovered topology.

use crate::model::{DomainGraph, NetworkInterface, NetworkNamespace, NifIndex, NifRef};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Plain,
    Veth,
    Macvlan,
    Vxlan,
    Vlan,
    PfVf,
    /// Goes off the grid; has no second endpoint.
    External,
}

impl WireKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WireKind::Plain => "plain",
            WireKind::Veth => "veth",
            WireKind::Macvlan => "macvlan",
            WireKind::Vxlan => "vxlan",
            WireKind::Vlan => "vlan",
            WireKind::PfVf => "pfvf",
            WireKind::External => "external",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "plain" | "" => Some(Self::Plain),
            "veth" => Some(Self::Veth),
            "macvlan" => Some(Self::Macvlan),
            "vxlan" => Some(Self::Vxlan),
            "vlan" => Some(Self::Vlan),
            "pfvf" => Some(Self::PfVf),
            "external" => Some(Self::External),
            _ => None,
        }
    }

    /// Hierarchical wires run from a dependent interface to its parent
    /// (macvlan to master, vxlan overlay to underlay).
    pub fn is_hierarchical(self) -> bool {
        matches!(self, WireKind::Macvlan | WireKind::Vxlan)
    }
}

impl fmt::Display for WireKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A (virtual) wire, either between two network interfaces or from a single
/// network interface to the outside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wire {
    pub kind: WireKind,
    /// Either endpoint is operationally down.
    pub is_down: bool,
    /// First endpoint; for hierarchical wires the dependent interface.
    pub endpoint_a: String,
    /// Second endpoint; for hierarchical wires the parent interface.
    pub endpoint_b: Option<String>,
}

impl Wire {
    pub fn two_ended(kind: WireKind, a: impl Into<String>, b: impl Into<String>) -> Self {
        Self {
            kind,
            is_down: false,
            endpoint_a: a.into(),
            endpoint_b: Some(b.into()),
        }
    }

    pub fn external(a: impl Into<String>) -> Self {
        Self {
            kind: WireKind::External,
            is_down: false,
            endpoint_a: a.into(),
            endpoint_b: None,
        }
    }

    pub fn down(mut self, is_down: bool) -> Self {
        self.is_down = is_down;
        self
    }

    /// External wires have exactly one endpoint, all others exactly two.
    pub fn is_well_formed(&self) -> bool {
        match self.kind {
            WireKind::External => self.endpoint_b.is_none(),
            _ => self.endpoint_b.is_some(),
        }
    }
}

struct Extractor<'a> {
    index: NifIndex<'a>,
    base: &'a str,
    wires: Vec<Wire>,
    /// Interfaces already wired up as either end of a veth pair.
    visited_peers: HashSet<NifRef>,
}

impl<'a> Extractor<'a> {
    fn endpoint(&self, r: &NifRef) -> String {
        format!("{}{}", self.base, r.endpoint_id())
    }

    /// Resolve a relationship reference, skipping the interface if dangling.
    fn resolve(&self, from: &NifRef, to: &NifRef, relation: &str) -> Option<&'a NetworkInterface> {
        let nif = self.index.get(to);
        if nif.is_none() {
            log::debug!("skipping {} wire of {}: {} not found", relation, from, to);
        }
        nif
    }

    fn two_ended(
        &mut self,
        kind: WireKind,
        this: &NifRef,
        nif: &NetworkInterface,
        other_ref: &NifRef,
    ) {
        let Some(other) = self.resolve(this, other_ref, kind.as_str()) else {
            return;
        };
        if this == other_ref {
            log::debug!("skipping self-referential {} wire of {}", kind, this);
            return;
        }
        let wire = Wire::two_ended(kind, self.endpoint(this), self.endpoint(other_ref))
            .down(nif.operstate.is_down() || other.operstate.is_down());
        self.wires.push(wire);
    }

    fn visit(&mut self, netns: &NetworkNamespace, nif: &NetworkInterface) {
        if nif.is_loopback() {
            return;
        }
        let this = netns.nif_ref(nif);

        if nif.is_physical {
            match &nif.pf {
                Some(pf) => self.two_ended(WireKind::PfVf, &this, nif, pf),
                None if nif.is_vf() => {
                    log::debug!("skipping VF {} without known PF", this);
                }
                None => {
                    let wire = Wire::external(self.endpoint(&this)).down(nif.operstate.is_down());
                    self.wires.push(wire);
                }
            }
            return;
        }

        match WireKind::from_str(&nif.kind) {
            Some(WireKind::Veth) => {
                let Some(peer) = &nif.peer else {
                    return;
                };
                if self.visited_peers.contains(&this) || self.visited_peers.contains(peer) {
                    return;
                }
                let before = self.wires.len();
                self.two_ended(WireKind::Veth, &this, nif, peer);
                if self.wires.len() > before {
                    self.visited_peers.insert(this);
                    self.visited_peers.insert(peer.clone());
                }
            }
            Some(WireKind::Macvlan) => {
                if let Some(master) = &nif.macvlan {
                    self.two_ended(WireKind::Macvlan, &this, nif, master);
                }
            }
            Some(WireKind::Vxlan) => {
                if let Some(underlay) = &nif.underlay {
                    self.two_ended(WireKind::Vxlan, &this, nif, underlay);
                }
            }
            Some(WireKind::Vlan) => {
                if let Some(master) = &nif.master {
                    self.two_ended(WireKind::Vlan, &this, nif, master);
                }
            }
            _ => {}
        }
    }
}

/// Extract the wires for all namespaces of the graph.
///
/// `base` is prepended to every endpoint identifier so that wires resolve
/// against the element ids of one particular breadboard.
pub fn extract_wiring(graph: &DomainGraph, base: &str) -> Vec<Wire> {
    let namespaces: Vec<&NetworkNamespace> = graph.namespaces.iter().collect();
    extract(graph, &namespaces, base)
}

/// Extract the wires for only the given namespaces. Relationships may still
/// point into namespaces outside the selection.
pub fn extract_wiring_for(graph: &DomainGraph, netnsids: &[u64], base: &str) -> Vec<Wire> {
    let namespaces: Vec<&NetworkNamespace> = netnsids
        .iter()
        .filter_map(|id| {
            let netns = graph.netns(*id);
            if netns.is_none() {
                log::debug!("skipping unknown network namespace {}", id);
            }
            netns
        })
        .collect();
    extract(graph, &namespaces, base)
}

fn extract(graph: &DomainGraph, namespaces: &[&NetworkNamespace], base: &str) -> Vec<Wire> {
    let mut extractor = Extractor {
        index: graph.index(),
        base,
        wires: Vec::new(),
        visited_peers: HashSet::new(),
    };
    for netns in namespaces {
        for nif in &netns.nifs {
            extractor.visit(netns, nif);
        }
    }
    extractor.wires
}
