use crate::decomposition::domain::{Component, DependencyGraph, NodeId};
use crate::shared::error::DecompositionError;

/// TopologicalOrderer service - orders root-reachable components so that
/// every dependency precedes its dependents.
///
/// Does not resolve anything: on an unresolved graph it reports the first
/// component found closing a cycle, so callers can resolve and retry.
pub struct TopologicalOrderer;

impl TopologicalOrderer {
    /// Node ids in dependency-first order, root last.
    ///
    /// # Errors
    /// [`DecompositionError::CycleDetected`] when a traversal from the root
    /// reaches a component already on the current path.
    pub fn order_ids(graph: &DependencyGraph) -> Result<Vec<NodeId>, DecompositionError> {
        let mut visited = vec![false; graph.registry().node_count()];
        let mut on_path = visited.clone();
        let mut order = Vec::new();

        let root = graph.root();
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        visited[root.index()] = true;
        on_path[root.index()] = true;

        while let Some((current, cursor)) = stack.last_mut() {
            let children = graph.children(*current);
            if *cursor >= children.len() {
                on_path[current.index()] = false;
                order.push(*current);
                stack.pop();
                continue;
            }

            let child = children[*cursor];
            *cursor += 1;

            if on_path[child.index()] {
                return Err(DecompositionError::CycleDetected {
                    component: graph.component(child).name.clone(),
                });
            }
            if !visited[child.index()] {
                visited[child.index()] = true;
                on_path[child.index()] = true;
                stack.push((child, 0));
            }
        }

        Ok(order)
    }

    /// Components in dependency-first order, root last.
    pub fn order(graph: &DependencyGraph) -> Result<Vec<&Component>, DecompositionError> {
        Ok(Self::order_ids(graph)?
            .into_iter()
            .map(|id| graph.component(id))
            .collect())
    }

    /// Refs in dependency-first order, root last.
    pub fn order_refs(graph: &DependencyGraph) -> Result<Vec<String>, DecompositionError> {
        Ok(Self::order_ids(graph)?
            .into_iter()
            .map(|id| graph.node(id).bom_ref().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::domain::{ComponentType, Dependency};
    use crate::decomposition::services::{CycleResolver, GraphBuilder};

    fn build(refs: &[&str], edges: &[(&str, &str)]) -> DependencyGraph {
        let components: Vec<Component> = refs
            .iter()
            .map(|r| Component::new(*r, format!("{}-name", r), "1.0.0", ComponentType::Library))
            .collect();
        let deps: Vec<Dependency> = edges
            .iter()
            .map(|(from, to)| Dependency::new(*from, [*to]))
            .collect();
        let root = Component::new("app", "app", "1.0.0", ComponentType::Application);
        GraphBuilder::assemble(&components, &deps, &[], Some(&root)).unwrap()
    }

    fn position(order: &[String], bom_ref: &str) -> usize {
        order.iter().position(|r| r == bom_ref).unwrap()
    }

    #[test]
    fn test_dependencies_come_first() {
        let graph = build(
            &["a", "b", "c", "d"],
            &[("a", "b"), ("a", "c"), ("b", "d"), ("c", "d")],
        );

        let order = TopologicalOrderer::order_refs(&graph).unwrap();

        assert_eq!(order, vec!["d", "b", "c", "a", "app"]);
        assert!(position(&order, "d") < position(&order, "b"));
        assert!(position(&order, "d") < position(&order, "c"));
        assert_eq!(order.last().map(String::as_str), Some("app"));
    }

    #[test]
    fn test_each_component_listed_once() {
        let graph = build(&["a", "b", "c"], &[("a", "c"), ("b", "c")]);
        let order = TopologicalOrderer::order_refs(&graph).unwrap();

        assert_eq!(order.len(), 4);
        assert_eq!(order.iter().filter(|r| *r == "c").count(), 1);
    }

    #[test]
    fn test_unreachable_components_are_omitted() {
        let mut graph = build(&["a", "x", "y"], &[("x", "y"), ("y", "x")]);
        CycleResolver::resolve(&mut graph);

        let order = TopologicalOrderer::order_refs(&graph).unwrap();
        assert_eq!(order, vec!["a", "app"]);
    }

    #[test]
    fn test_cycle_detected_before_resolution() {
        let graph = build(&["l", "a", "b"], &[("l", "a"), ("a", "b"), ("b", "a")]);

        let err = TopologicalOrderer::order(&graph).unwrap_err();
        assert_eq!(
            err,
            DecompositionError::CycleDetected {
                component: "a-name".to_string()
            }
        );
    }

    #[test]
    fn test_order_succeeds_after_resolution() {
        let mut graph = build(&["l", "a", "b"], &[("l", "a"), ("a", "b"), ("b", "a")]);
        CycleResolver::resolve(&mut graph);

        let names: Vec<&str> = TopologicalOrderer::order(&graph)
            .unwrap()
            .into_iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["b-name", "a-name", "l-name", "app"]);
    }
}
