use super::TopologicalOrderer;
use crate::decomposition::domain::vulnerability::by_descending_score;
use crate::decomposition::domain::{
    CleanGraph, DecomposeOptions, DependencyGraph, NodeId, ProjectedNode, Vulnerability,
};
use crate::shared::error::DecompositionError;

/// CleanGraphProjector service - turns a resolved graph into the leveled,
/// severity-annotated presentation tree.
pub struct CleanGraphProjector;

impl CleanGraphProjector {
    /// Projects the graph with the given options.
    ///
    /// Exposure flags are computed on the whole resolved graph before any
    /// pruning, so a node cut off by `max_depth` still reports what lies below it.
    ///
    /// # Errors
    /// [`DecompositionError::CycleDetected`] when the graph still contains a
    /// root-reachable cycle.
    pub fn project(
        graph: &DependencyGraph,
        options: &DecomposeOptions,
    ) -> Result<CleanGraph, DecompositionError> {
        let order = TopologicalOrderer::order_ids(graph)?;
        let exposure = Self::exposure(graph, &order, options.min_transitive_severity);

        let root = Self::project_node(graph, graph.root(), 0, options, &exposure);
        let total_nodes = root.count();

        let cycle_summary = match graph.detected_cycles().len() {
            0 => None,
            n => Some(format!(
                "Automatically broke {} dependency cycle(s) to build an acyclic graph",
                n
            )),
        };

        tracing::debug!(
            total_nodes,
            reachable = order.len(),
            only_vulnerable = options.only_vulnerable,
            max_depth = options.max_depth,
            "projected clean graph"
        );

        Ok(CleanGraph {
            root,
            total_nodes,
            topological_order: order
                .iter()
                .map(|id| graph.node(*id).bom_ref().to_string())
                .collect(),
            detected_cycles: graph.detected_cycles().to_vec(),
            cycle_paths: graph.cycle_paths().to_vec(),
            broken_edges: graph.broken_edges().to_vec(),
            cycle_summary,
            cycles_details: graph.cycles_details(),
            vulnerabilities: graph.vulnerabilities().to_vec(),
        })
    }

    /// Descendant-or-self exposure per node, indexed by `NodeId`.
    ///
    /// `order` lists dependencies before dependents, so every child flag is
    /// final by the time its parent is evaluated.
    fn exposure(graph: &DependencyGraph, order: &[NodeId], threshold: f64) -> Vec<bool> {
        let mut flags = vec![false; graph.registry().node_count()];
        for id in order {
            let own = graph.own_max_severity(*id) >= threshold;
            flags[id.index()] = own || graph.children(*id).iter().any(|c| flags[c.index()]);
        }
        flags
    }

    fn project_node(
        graph: &DependencyGraph,
        id: NodeId,
        level: usize,
        options: &DecomposeOptions,
        exposure: &[bool],
    ) -> ProjectedNode {
        let node = graph.node(id);

        let mut vulnerabilities: Vec<Vulnerability> =
            graph.node_vulnerabilities(id).cloned().collect();
        vulnerabilities.sort_by(by_descending_score);

        let children = if options.is_depth_limit(level) {
            Vec::new()
        } else {
            node.children()
                .iter()
                .filter(|child| !options.only_vulnerable || exposure[child.index()])
                .map(|child| Self::project_node(graph, *child, level + 1, options, exposure))
                .collect()
        };

        ProjectedNode {
            component: node.component().clone(),
            total_cve_count: vulnerabilities.len(),
            vulnerabilities,
            children,
            level,
            max_severity: graph.own_max_severity(id),
            has_transitive_vulnerabilities: exposure[id.index()],
            in_cycle: node.in_cycle(),
        }
    }
}
