//! Discovered network topology: namespaces holding network interfaces,
//! with relationships between interfaces expressed as identifier references.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Invalid discovery JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Duplicate network namespace: {0}")]
    DuplicateNetns(u64),
}

/// Operational state of a network interface, as reported by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperState {
    #[default]
    Unknown,
    NotPresent,
    Down,
    Up,
    LowerLayerDown,
    Dormant,
    Testing,
}

impl OperState {
    pub fn is_down(self) -> bool {
        self == OperState::Down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SriovRole {
    #[default]
    None,
    Pf,
    Vf,
}

/// Reference to a network interface somewhere in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NifRef {
    pub netnsid: u64,
    pub name: String,
}

impl NifRef {
    pub fn new(netnsid: u64, name: impl Into<String>) -> Self {
        Self {
            netnsid,
            name: name.into(),
        }
    }

    /// Endpoint identifier (without any DOM id base).
    pub fn endpoint_id(&self) -> String {
        format!("nif-{}-{}", self.netnsid, self.name)
    }
}

impl fmt::Display for NifRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.netnsid)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterface {
    pub name: String,
    /// Kind of virtual interface; empty for hardware and loopback interfaces.
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub operstate: OperState,
    /// Has (maybe virtual) hardware attached.
    #[serde(default)]
    pub is_physical: bool,
    #[serde(default)]
    pub sriovrole: SriovRole,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub peer: Option<NifRef>,
    /// Bridge or (for VLANs) the parent interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<NifRef>,
    /// MACVLAN master interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub macvlan: Option<NifRef>,
    /// VXLAN underlay interface.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub underlay: Option<NifRef>,
    /// PF of an SR-IOV VF.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pf: Option<NifRef>,
}

impl NetworkInterface {
    pub fn is_loopback(&self) -> bool {
        self.name == "lo"
    }

    pub fn is_vf(&self) -> bool {
        self.pf.is_some() || self.sriovrole == SriovRole::Vf
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkNamespace {
    pub netnsid: u64,
    #[serde(default)]
    pub is_initial: bool,
    #[serde(default)]
    pub nifs: Vec<NetworkInterface>,
}

impl NetworkNamespace {
    pub fn nif_ref(&self, nif: &NetworkInterface) -> NifRef {
        NifRef::new(self.netnsid, nif.name.clone())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainGraph {
    #[serde(default)]
    pub namespaces: Vec<NetworkNamespace>,
}

impl DomainGraph {
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let graph: DomainGraph = serde_json::from_str(json)?;
        let mut seen = std::collections::HashSet::new();
        for netns in &graph.namespaces {
            if !seen.insert(netns.netnsid) {
                return Err(GraphError::DuplicateNetns(netns.netnsid));
            }
        }
        Ok(graph)
    }

    pub fn netns(&self, netnsid: u64) -> Option<&NetworkNamespace> {
        self.namespaces.iter().find(|n| n.netnsid == netnsid)
    }

    /// Build a lookup from references to interfaces.
    pub fn index(&self) -> NifIndex<'_> {
        let nifs = self
            .namespaces
            .iter()
            .flat_map(|netns| {
                netns
                    .nifs
                    .iter()
                    .map(move |nif| (netns.nif_ref(nif), nif))
            })
            .collect();
        NifIndex { nifs }
    }
}

/// Interface lookup over a borrowed graph.
pub struct NifIndex<'a> {
    nifs: HashMap<NifRef, &'a NetworkInterface>,
}

impl<'a> NifIndex<'a> {
    pub fn get(&self, r: &NifRef) -> Option<&'a NetworkInterface> {
        self.nifs.get(r).copied()
    }

    pub fn len(&self) -> usize {
        self.nifs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nifs.is_empty()
    }
}
