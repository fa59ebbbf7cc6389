use super::{Component, ComponentRegistry, Node, NodeId, Vulnerability};

/// Refs longer than this are abbreviated in cycle paths.
const CYCLE_REF_DISPLAY_LIMIT: usize = 20;

/// DependencyGraph aggregate - registry, designated root and cycle diagnostics
/// for one decomposition request.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    registry: ComponentRegistry,
    root: NodeId,
    vulnerabilities: Vec<Vulnerability>,
    detected_cycles: Vec<Vec<String>>,
    cycle_paths: Vec<Vec<String>>,
    broken_edges: Vec<String>,
    dropped_edges: usize,
}

impl DependencyGraph {
    pub(crate) fn new(
        registry: ComponentRegistry,
        root: NodeId,
        vulnerabilities: Vec<Vulnerability>,
        dropped_edges: usize,
    ) -> Self {
        Self {
            registry,
            root,
            vulnerabilities,
            detected_cycles: Vec::new(),
            cycle_paths: Vec::new(),
            broken_edges: Vec::new(),
            dropped_edges,
        }
    }

    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    pub(crate) fn registry_mut(&mut self) -> &mut ComponentRegistry {
        &mut self.registry
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.registry.node(id)
    }

    pub fn component(&self, id: NodeId) -> &Component {
        self.registry.node(id).component()
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.registry.node(id).children()
    }

    pub fn vulnerabilities(&self) -> &[Vulnerability] {
        &self.vulnerabilities
    }

    /// Vulnerabilities directly affecting the node's component
    pub fn node_vulnerabilities(&self, id: NodeId) -> impl Iterator<Item = &Vulnerability> + '_ {
        self.registry
            .node(id)
            .vulnerability_indices()
            .iter()
            .map(move |i| &self.vulnerabilities[*i])
    }

    /// Highest rating score among the node's own vulnerabilities, 0.0 if none is scored.
    pub fn own_max_severity(&self, id: NodeId) -> f64 {
        self.node_vulnerabilities(id)
            .filter_map(Vulnerability::max_score)
            .fold(0.0, f64::max)
    }

    /// Each detected cycle as a ref path closing back on its first ref
    pub fn detected_cycles(&self) -> &[Vec<String>] {
        &self.detected_cycles
    }

    /// The full traversal path at the moment each cycle was found
    pub fn cycle_paths(&self) -> &[Vec<String>] {
        &self.cycle_paths
    }

    /// `source -> target` labels of the edges removed to break cycles
    pub fn broken_edges(&self) -> &[String] {
        &self.broken_edges
    }

    /// Edges skipped during construction because one end was not registered
    pub fn dropped_edges(&self) -> usize {
        self.dropped_edges
    }

    pub(crate) fn record_cycle(&mut self, cycle: Vec<String>, path: Vec<String>) {
        self.detected_cycles.push(cycle);
        self.cycle_paths.push(path);
    }

    pub(crate) fn record_broken_edge(&mut self, source: &str, target: &str) {
        self.broken_edges.push(format!("{} -> {}", source, target));
    }

    /// Registered components that are not the target of any current edge
    pub fn root_candidates(&self) -> Vec<NodeId> {
        self.registry.root_candidates()
    }

    /// Multi-line report of every detected cycle and its members.
    pub fn cycles_details(&self) -> String {
        if self.detected_cycles.is_empty() {
            return "dependency cycles not found".to_string();
        }

        let mut out = format!("found cycles: {}\n", self.detected_cycles.len());
        for (i, cycle) in self.detected_cycles.iter().enumerate() {
            let members = &cycle[..cycle.len().saturating_sub(1)];
            out.push_str(&format!("\ncycle {}:\n", i + 1));
            out.push_str(&format!("  full path: {}\n", format_cycle_path(cycle)));
            out.push_str(&format!("  nodes ({}):\n", members.len()));
            for (j, bom_ref) in members.iter().enumerate() {
                if let Some(id) = self.registry.lookup(bom_ref) {
                    out.push_str(&format!(
                        "    {}. {} ({})\n",
                        j + 1,
                        self.component(id).name,
                        bom_ref
                    ));
                }
            }
        }
        out
    }
}

/// Renders `a → b → a`. Long member refs are abbreviated; the closing ref is
/// printed in full.
pub fn format_cycle_path(cycle: &[String]) -> String {
    let Some(first) = cycle.first() else {
        return String::new();
    };

    let members = &cycle[..cycle.len().saturating_sub(1).max(1)];
    let mut parts: Vec<String> = members.iter().map(|r| abbreviate(r)).collect();
    parts.push(first.clone());
    parts.join(" → ")
}

fn abbreviate(bom_ref: &str) -> String {
    if bom_ref.chars().count() > CYCLE_REF_DISPLAY_LIMIT {
        let head: String = bom_ref.chars().take(CYCLE_REF_DISPLAY_LIMIT).collect();
        format!("{}...", head)
    } else {
        bom_ref.to_string()
    }
}
