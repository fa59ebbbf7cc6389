use crate::decomposition::domain::{DependencyGraph, NodeId};

/// CycleResolver service - finds dependency cycles and cuts one back-edge per cycle.
///
/// Traversal starts from every registered component in ref order, so the
/// result does not depend on the order components were declared in and
/// cycles unreachable from the root are still reported.
pub struct CycleResolver;

struct Detection {
    cycles: Vec<Vec<NodeId>>,
    paths: Vec<Vec<NodeId>>,
}

impl CycleResolver {
    /// Detects and breaks every cycle in the graph. Returns the number of cycles found.
    pub fn resolve(graph: &mut DependencyGraph) -> usize {
        let detection = Self::detect(graph);
        if detection.cycles.is_empty() {
            return 0;
        }

        for (cycle, path) in detection.cycles.iter().zip(&detection.paths) {
            let refs = |ids: &[NodeId]| -> Vec<String> {
                ids.iter()
                    .map(|id| graph.node(*id).bom_ref().to_string())
                    .collect()
            };
            let (cycle_refs, path_refs) = (refs(cycle), refs(path));
            graph.record_cycle(cycle_refs, path_refs);
        }

        for cycle in &detection.cycles {
            Self::break_cycle(graph, cycle);
        }
        for cycle in &detection.cycles {
            Self::mark_members(graph, cycle);
        }

        tracing::info!(
            cycles = detection.cycles.len(),
            broken_edges = graph.broken_edges().len(),
            "resolved dependency cycles"
        );
        detection.cycles.len()
    }

    fn detect(graph: &DependencyGraph) -> Detection {
        let registry = graph.registry();
        let mut visited = vec![false; registry.node_count()];
        let mut on_path = visited.clone();
        let mut detection = Detection {
            cycles: Vec::new(),
            paths: Vec::new(),
        };

        for start in registry.sorted_ids() {
            if visited[start.index()] {
                continue;
            }

            let mut path: Vec<NodeId> = vec![start];
            let mut stack: Vec<(NodeId, usize)> = vec![(start, 0)];
            visited[start.index()] = true;
            on_path[start.index()] = true;

            while let Some((current, cursor)) = stack.last_mut() {
                let children = graph.children(*current);
                if *cursor >= children.len() {
                    on_path[current.index()] = false;
                    stack.pop();
                    path.pop();
                    continue;
                }

                let child = children[*cursor];
                *cursor += 1;

                if on_path[child.index()] {
                    let from = path.iter().position(|id| *id == child).unwrap_or(0);
                    let mut cycle = path[from..].to_vec();
                    cycle.push(child);
                    detection.cycles.push(cycle);
                    detection.paths.push(path.clone());
                } else if !visited[child.index()] {
                    visited[child.index()] = true;
                    on_path[child.index()] = true;
                    path.push(child);
                    stack.push((child, 0));
                }
            }
        }

        detection
    }

    /// Removes the edge closing the cycle, `cycle[len-2] -> cycle[0]`.
    fn break_cycle(graph: &mut DependencyGraph, cycle: &[NodeId]) {
        if cycle.len() < 2 {
            return;
        }
        let source = cycle[cycle.len() - 2];
        let target = cycle[0];

        if graph.registry_mut().node_mut(source).remove_child(target) {
            let source_ref = graph.node(source).bom_ref().to_string();
            let target_ref = graph.node(target).bom_ref().to_string();
            tracing::debug!(source = %source_ref, target = %target_ref, "cut cycle edge");
            graph.record_broken_edge(&source_ref, &target_ref);
        }
    }

    /// Flags cycle members, leaving out the node whose outgoing edge was cut.
    fn mark_members(graph: &mut DependencyGraph, cycle: &[NodeId]) {
        let Some((_, members)) = cycle.split_last() else {
            return;
        };
        let cut_source = members.last().copied();

        for id in members {
            if Some(*id) != cut_source {
                graph.registry_mut().node_mut(*id).mark_in_cycle();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::domain::{Component, ComponentType, Dependency};
    use crate::decomposition::services::GraphBuilder;

    fn library(bom_ref: &str) -> Component {
        Component::new(bom_ref, bom_ref, "1.0.0", ComponentType::Library)
    }

    fn build(refs: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let components: Vec<Component> = refs.iter().map(|r| library(r)).collect();
        let deps: Vec<Dependency> = edges
            .iter()
            .map(|(from, to)| Dependency::new(*from, [*to]))
            .collect();
        let root = Component::new("app", "app", "1.0.0", ComponentType::Application);
        GraphBuilder::assemble(&components, &deps, &[], Some(&root)).unwrap()
    }

    fn strings(refs: &[&str]) -> Vec<String> {
        refs.iter().map(|s| s.to_string()).collect()
    }

    fn in_cycle(graph: &DependencyGraph, bom_ref: &str) -> bool {
        let id = graph.registry().lookup(bom_ref).unwrap();
        graph.node(id).in_cycle()
    }

    #[test]
    fn test_two_node_cycle() {
        let mut graph = build(&["l", "a", "b"], &[("l", "a"), ("a", "b"), ("b", "a")]);

        assert_eq!(CycleResolver::resolve(&mut graph), 1);
        assert_eq!(graph.detected_cycles(), &[strings(&["a", "b", "a"])]);
        assert_eq!(graph.cycle_paths(), &[strings(&["a", "b"])]);
        assert_eq!(graph.broken_edges(), &["b -> a".to_string()]);

        let b = graph.registry().lookup("b").unwrap();
        assert!(graph.children(b).is_empty());
        assert!(in_cycle(&graph, "a"));
        assert!(!in_cycle(&graph, "b"));
        assert!(!in_cycle(&graph, "l"));
    }

    #[test]
    fn test_acyclic_graph_is_untouched() {
        let mut graph = build(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("a", "c")]);

        assert_eq!(CycleResolver::resolve(&mut graph), 0);
        assert!(graph.detected_cycles().is_empty());
        assert!(graph.broken_edges().is_empty());
        let a = graph.registry().lookup("a").unwrap();
        assert_eq!(graph.children(a).len(), 2);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut graph = build(&["l", "a", "b"], &[("l", "a"), ("a", "b"), ("b", "a")]);
        CycleResolver::resolve(&mut graph);
        let cycles_after_first = graph.detected_cycles().to_vec();

        assert_eq!(CycleResolver::resolve(&mut graph), 0);
        assert_eq!(graph.detected_cycles(), cycles_after_first.as_slice());
        assert_eq!(graph.broken_edges().len(), 1);
    }

    #[test]
    fn test_self_loop() {
        let mut graph = build(&["l", "a"], &[("l", "a"), ("a", "a")]);

        assert_eq!(CycleResolver::resolve(&mut graph), 1);
        assert_eq!(graph.detected_cycles(), &[strings(&["a", "a"])]);
        assert_eq!(graph.broken_edges(), &["a -> a".to_string()]);
        let a = graph.registry().lookup("a").unwrap();
        assert!(graph.children(a).is_empty());
    }

    #[test]
    fn test_cycle_unreachable_from_root_is_reported() {
        // x and y only point at each other, so neither hangs below the root
        let mut graph = build(&["a", "x", "y"], &[("x", "y"), ("y", "x")]);

        assert_eq!(CycleResolver::resolve(&mut graph), 1);
        assert_eq!(graph.detected_cycles(), &[strings(&["x", "y", "x"])]);
        assert_eq!(graph.broken_edges(), &["y -> x".to_string()]);
    }

    #[test]
    fn test_detection_follows_ref_order_not_declaration_order() {
        let forward = {
            let mut g = build(
                &["l", "a", "b", "c"],
                &[("l", "a"), ("a", "b"), ("b", "c"), ("c", "a")],
            );
            CycleResolver::resolve(&mut g);
            g.detected_cycles().to_vec()
        };
        let shuffled = {
            let mut g = build(
                &["c", "b", "l", "a"],
                &[("c", "a"), ("b", "c"), ("l", "a"), ("a", "b")],
            );
            CycleResolver::resolve(&mut g);
            g.detected_cycles().to_vec()
        };

        assert_eq!(forward, vec![strings(&["a", "b", "c", "a"])]);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_cycles_sharing_nodes_are_each_broken() {
        // a -> b -> a and a -> c -> a
        let mut graph = build(
            &["l", "a", "b", "c"],
            &[("l", "a"), ("a", "b"), ("b", "a"), ("a", "c"), ("c", "a")],
        );

        assert_eq!(CycleResolver::resolve(&mut graph), 2);
        assert_eq!(
            graph.broken_edges(),
            &["b -> a".to_string(), "c -> a".to_string()]
        );
        let a = graph.registry().lookup("a").unwrap();
        assert_eq!(graph.children(a).len(), 2);
    }
}
