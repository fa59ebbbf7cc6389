use crate::decomposition::domain::{
    Bom, Component, ComponentRegistry, Dependency, DependencyGraph, Node, NodeId, Vulnerability,
};
use crate::shared::error::DecompositionError;
use std::collections::HashMap;

/// GraphBuilder service - turns the flat SBOM sections into a rooted graph.
///
/// Pure logic, no I/O. Edges naming refs that are not registered are
/// skipped rather than rejected, since real-world SBOMs are often partial.
pub struct GraphBuilder;

impl GraphBuilder {
    /// Builds the dependency graph of a decoded BOM.
    pub fn build(bom: &Bom) -> Result<DependencyGraph, DecompositionError> {
        Self::assemble(
            &bom.components,
            &bom.dependencies,
            &bom.vulnerabilities,
            bom.declared_root(),
        )
    }

    /// Builds a dependency graph from its parts.
    ///
    /// # Errors
    /// - [`DecompositionError::DuplicateComponentRef`] when two components share a ref
    /// - [`DecompositionError::MissingRootComponent`] when no root is declared, or
    ///   when every component is the target of some edge
    pub fn assemble(
        components: &[Component],
        dependencies: &[Dependency],
        vulnerabilities: &[Vulnerability],
        declared_root: Option<&Component>,
    ) -> Result<DependencyGraph, DecompositionError> {
        let affected = Self::index_affected(vulnerabilities);

        let mut registry = ComponentRegistry::new();
        for component in components {
            let vulns = affected
                .get(component.bom_ref.as_str())
                .cloned()
                .unwrap_or_default();
            registry.register(component.clone(), vulns)?;
        }

        let dropped_edges = Self::wire_edges(&mut registry, dependencies);

        let declared_root =
            declared_root.ok_or_else(|| DecompositionError::MissingRootComponent {
                reason: "the SBOM declares no metadata component".to_string(),
            })?;
        let root = Self::attach_root(&mut registry, declared_root, &affected)?;

        tracing::debug!(
            components = registry.len(),
            vulnerabilities = vulnerabilities.len(),
            dropped_edges,
            root = %declared_root.bom_ref,
            "dependency graph assembled"
        );

        Ok(DependencyGraph::new(
            registry,
            root,
            vulnerabilities.to_vec(),
            dropped_edges,
        ))
    }

    /// Maps each affected ref to the positions of the vulnerabilities naming it.
    fn index_affected(vulnerabilities: &[Vulnerability]) -> HashMap<&str, Vec<usize>> {
        let mut affected: HashMap<&str, Vec<usize>> = HashMap::new();
        for (i, vuln) in vulnerabilities.iter().enumerate() {
            for affect in &vuln.affects {
                let entry = affected.entry(affect.bom_ref.as_str()).or_default();
                if entry.last() != Some(&i) {
                    entry.push(i);
                }
            }
        }
        affected
    }

    /// Appends every resolvable edge in declaration order. Returns how many were skipped.
    fn wire_edges(registry: &mut ComponentRegistry, dependencies: &[Dependency]) -> usize {
        let mut dropped = 0;
        for dependency in dependencies {
            let Some(source) = registry.lookup(&dependency.bom_ref) else {
                tracing::debug!(
                    source = %dependency.bom_ref,
                    targets = dependency.depends_on.len(),
                    "skipping edges from unregistered component"
                );
                dropped += dependency.depends_on.len();
                continue;
            };

            for target_ref in &dependency.depends_on {
                match registry.lookup(target_ref) {
                    Some(target) => registry.node_mut(source).push_child(target),
                    None => {
                        tracing::debug!(
                            source = %dependency.bom_ref,
                            target = %target_ref,
                            "skipping edge to unregistered component"
                        );
                        dropped += 1;
                    }
                }
            }
        }
        dropped
    }

    /// Hangs the in-degree-zero components below the declared root.
    ///
    /// A registered component with the declared root's ref is reused as the root
    /// only while nothing depends on it. Otherwise a separate wrapper node is
    /// created, so the wrapping edges cannot close a cycle through it.
    fn attach_root(
        registry: &mut ComponentRegistry,
        declared_root: &Component,
        affected: &HashMap<&str, Vec<usize>>,
    ) -> Result<NodeId, DecompositionError> {
        let candidates = registry.root_candidates();
        if candidates.is_empty() {
            return Err(DecompositionError::MissingRootComponent {
                reason: "every component is a dependency of another one, no free component to attach"
                    .to_string(),
            });
        }

        match registry.lookup(&declared_root.bom_ref) {
            Some(root) if candidates.contains(&root) => {
                for candidate in candidates.into_iter().filter(|c| *c != root) {
                    registry.node_mut(root).push_child(candidate);
                }
                return Ok(root);
            }
            Some(_) => tracing::debug!(
                root = %declared_root.bom_ref,
                "declared root is a dependency target, wrapping it in a separate node"
            ),
            None => {}
        }

        let vulns = affected
            .get(declared_root.bom_ref.as_str())
            .cloned()
            .unwrap_or_default();
        let mut node = Node::new(declared_root.clone(), vulns);
        for candidate in candidates {
            node.push_child(candidate);
        }
        Ok(registry.insert_unindexed(node))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decomposition::domain::{ComponentType, Rating, ScoringMethod, Severity};

    fn library(bom_ref: &str) -> Component {
        Component::new(bom_ref, bom_ref, "1.0.0", ComponentType::Library)
    }

    fn app() -> Component {
        Component::new("app", "app", "1.0.0", ComponentType::Application)
    }

    fn child_refs<'g>(graph: &'g DependencyGraph, id: NodeId) -> Vec<&'g str> {
        graph
            .children(id)
            .iter()
            .map(|c| graph.node(*c).bom_ref())
            .collect()
    }

    #[test]
    fn test_build_simple_tree() {
        let components = vec![library("a"), library("b"), library("c")];
        let deps = vec![Dependency::new("a", ["b", "c"])];

        let graph = GraphBuilder::assemble(&components, &deps, &[], Some(&app())).unwrap();

        assert_eq!(graph.component(graph.root()).bom_ref, "app");
        assert_eq!(child_refs(&graph, graph.root()), vec!["a"]);
        let a = graph.registry().lookup("a").unwrap();
        assert_eq!(child_refs(&graph, a), vec!["b", "c"]);
        assert_eq!(graph.dropped_edges(), 0);
    }

    #[test]
    fn test_edge_order_is_declaration_order() {
        let components = vec![library("a"), library("z"), library("m"), library("b")];
        let deps = vec![Dependency::new("a", ["z", "b"]), Dependency::new("a", ["m"])];

        let graph = GraphBuilder::assemble(&components, &deps, &[], Some(&app())).unwrap();

        let a = graph.registry().lookup("a").unwrap();
        assert_eq!(child_refs(&graph, a), vec!["z", "b", "m"]);
    }

    #[test]
    fn test_duplicate_component_ref_fails() {
        let components = vec![library("a"), library("a")];
        let err = GraphBuilder::assemble(&components, &[], &[], Some(&app())).unwrap_err();
        assert_eq!(
            err,
            DecompositionError::DuplicateComponentRef {
                bom_ref: "a".to_string()
            }
        );
    }

    #[test]
    fn test_missing_metadata_component_fails() {
        let components = vec![library("a")];
        let err = GraphBuilder::assemble(&components, &[], &[], None).unwrap_err();
        assert!(matches!(
            err,
            DecompositionError::MissingRootComponent { .. }
        ));
    }

    #[test]
    fn test_fully_cyclic_graph_has_no_root() {
        let components = vec![library("a"), library("b")];
        let deps = vec![Dependency::new("a", ["b"]), Dependency::new("b", ["a"])];

        let err = GraphBuilder::assemble(&components, &deps, &[], Some(&app())).unwrap_err();
        assert!(matches!(
            err,
            DecompositionError::MissingRootComponent { .. }
        ));
    }

    #[test]
    fn test_no_edges_puts_every_component_under_root() {
        let components = vec![library("c"), library("a"), library("b")];
        let graph = GraphBuilder::assemble(&components, &[], &[], Some(&app())).unwrap();

        assert_eq!(child_refs(&graph, graph.root()), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_dangling_edges_are_dropped() {
        let components = vec![library("a"), library("b")];
        let deps = vec![
            Dependency::new("a", ["b", "ghost"]),
            Dependency::new("phantom", ["a"]),
        ];

        let graph = GraphBuilder::assemble(&components, &deps, &[], Some(&app())).unwrap();

        let a = graph.registry().lookup("a").unwrap();
        assert_eq!(child_refs(&graph, a), vec!["b"]);
        assert_eq!(child_refs(&graph, graph.root()), vec!["a"]);
        assert_eq!(graph.dropped_edges(), 2);
    }

    #[test]
    fn test_vulnerabilities_attached_by_affected_ref() {
        let components = vec![library("a"), library("b")];
        let vulns = vec![
            Vulnerability::new("CVE-1")
                .with_rating(Rating::new(Severity::High, ScoringMethod::CvssV31, Some(7.5)))
                .affecting("a")
                .affecting("b"),
            Vulnerability::new("CVE-2").affecting("b").affecting("b"),
            Vulnerability::new("CVE-3").affecting("unknown"),
        ];

        let graph = GraphBuilder::assemble(&components, &[], &vulns, Some(&app())).unwrap();

        let a = graph.registry().lookup("a").unwrap();
        let b = graph.registry().lookup("b").unwrap();
        let ids = |id| {
            graph
                .node_vulnerabilities(id)
                .map(|v| v.id.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(ids(a), vec!["CVE-1"]);
        assert_eq!(ids(b), vec!["CVE-1", "CVE-2"]);
        assert_eq!(graph.vulnerabilities().len(), 3);
    }

    #[test]
    fn test_registered_declared_root_is_reused() {
        let components = vec![app(), library("a"), library("b"), library("orphan")];
        let deps = vec![Dependency::new("app", ["a"]), Dependency::new("a", ["b"])];

        let graph = GraphBuilder::assemble(&components, &deps, &[], Some(&app())).unwrap();

        assert_eq!(graph.root(), graph.registry().lookup("app").unwrap());
        assert_eq!(child_refs(&graph, graph.root()), vec!["a", "orphan"]);
    }

    #[test]
    fn test_depended_on_declared_root_gets_wrapper() {
        let components = vec![app(), library("x")];
        let deps = vec![Dependency::new("x", ["app"])];

        let graph = GraphBuilder::assemble(&components, &deps, &[], Some(&app())).unwrap();

        let registered = graph.registry().lookup("app").unwrap();
        let x = graph.registry().lookup("x").unwrap();
        assert_ne!(graph.root(), registered);
        assert_eq!(graph.component(graph.root()).bom_ref, "app");
        assert_eq!(graph.children(graph.root()), &[x]);
        assert_eq!(graph.children(x), &[registered]);
        assert!(graph.children(registered).is_empty());
    }

    #[test]
    fn test_build_from_bom() {
        use crate::decomposition::domain::BomMetadata;

        let bom = Bom {
            metadata: Some(BomMetadata {
                component: Some(app()),
                ..Default::default()
            }),
            components: vec![library("a")],
            ..Default::default()
        };

        let graph = GraphBuilder::build(&bom).unwrap();
        assert_eq!(graph.registry().len(), 1);
        assert_eq!(child_refs(&graph, graph.root()), vec!["a"]);
    }
}
