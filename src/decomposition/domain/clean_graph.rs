use super::{Component, Vulnerability};

/// One node of the presentation tree.
///
/// Unlike registry nodes these are owned by their parent: a component
/// shared by several dependents appears once per path that reaches it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedNode {
    pub component: Component,
    /// Own vulnerabilities, most severe first
    pub vulnerabilities: Vec<Vulnerability>,
    pub children: Vec<ProjectedNode>,
    /// Depth from the root (root = 0)
    pub level: usize,
    /// Highest score among own vulnerabilities, 0.0 if none is scored
    pub max_severity: f64,
    /// Self or some dependency carries a rating at or above the threshold
    pub has_transitive_vulnerabilities: bool,
    pub in_cycle: bool,
    pub total_cve_count: usize,
}

impl ProjectedNode {
    /// Number of nodes in this subtree, self included.
    pub fn count(&self) -> usize {
        1 + self.children.iter().map(ProjectedNode::count).sum::<usize>()
    }

    /// Deepest level present in this subtree.
    pub fn max_level(&self) -> usize {
        self.children
            .iter()
            .map(ProjectedNode::max_level)
            .max()
            .unwrap_or(self.level)
    }

    /// Depth-first, pre-order walk over the subtree.
    pub fn walk(&self) -> Vec<&ProjectedNode> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// Result of projecting a resolved dependency graph for presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanGraph {
    pub root: ProjectedNode,
    /// Node count of the output tree, revisits of shared components included
    pub total_nodes: usize,
    /// Root-reachable refs, dependencies before dependents
    pub topological_order: Vec<String>,
    pub detected_cycles: Vec<Vec<String>>,
    pub cycle_paths: Vec<Vec<String>>,
    pub broken_edges: Vec<String>,
    /// Present only when at least one cycle was broken
    pub cycle_summary: Option<String>,
    pub cycles_details: String,
    pub vulnerabilities: Vec<Vulnerability>,
}
