use super::Component;
use crate::shared::error::DecompositionError;
use std::collections::BTreeMap;

/// Index of a node inside the [`ComponentRegistry`] arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A component placed in the dependency graph.
///
/// Children are ids into the owning registry, never owners: a component
/// reached through several parents (diamond dependency) is one node listed
/// in several child lists.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    component: Component,
    children: Vec<NodeId>,
    vulnerabilities: Vec<usize>,
    in_cycle: bool,
}

impl Node {
    pub fn new(component: Component, vulnerabilities: Vec<usize>) -> Self {
        Self {
            component,
            children: Vec::new(),
            vulnerabilities,
            in_cycle: false,
        }
    }

    pub fn component(&self) -> &Component {
        &self.component
    }

    pub fn bom_ref(&self) -> &str {
        &self.component.bom_ref
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Positions in the owning graph's vulnerability list
    pub fn vulnerability_indices(&self) -> &[usize] {
        &self.vulnerabilities
    }

    pub fn in_cycle(&self) -> bool {
        self.in_cycle
    }

    pub(crate) fn push_child(&mut self, child: NodeId) {
        self.children.push(child);
    }

    /// Removes the first edge to `child`. Returns false when there was none.
    pub(crate) fn remove_child(&mut self, child: NodeId) -> bool {
        match self.children.iter().position(|c| *c == child) {
            Some(pos) => {
                self.children.remove(pos);
                true
            }
            None => false,
        }
    }

    pub(crate) fn mark_in_cycle(&mut self) {
        self.in_cycle = true;
    }
}

/// Owner of every node of one decomposition, keyed by bom-ref.
///
/// The ref index is ordered, so every traversal that starts from
/// [`ComponentRegistry::sorted_ids`] is reproducible run to run.
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    nodes: Vec<Node>,
    index: BTreeMap<String, NodeId>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a component under its bom-ref.
    ///
    /// # Errors
    /// [`DecompositionError::DuplicateComponentRef`] if the ref is already taken.
    pub fn register(
        &mut self,
        component: Component,
        vulnerabilities: Vec<usize>,
    ) -> Result<NodeId, DecompositionError> {
        if self.index.contains_key(&component.bom_ref) {
            return Err(DecompositionError::DuplicateComponentRef {
                bom_ref: component.bom_ref,
            });
        }

        let id = NodeId(self.nodes.len());
        self.index.insert(component.bom_ref.clone(), id);
        self.nodes.push(Node::new(component, vulnerabilities));
        Ok(id)
    }

    /// Stores a node that is reachable by id only (the synthetic root wrapper).
    pub(crate) fn insert_unindexed(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        id
    }

    pub fn lookup(&self, bom_ref: &str) -> Option<NodeId> {
        self.index.get(bom_ref).copied()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Registered node ids in lexicographic bom-ref order
    pub fn sorted_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.index.values().copied()
    }

    /// Number of registered components (the unindexed root is not counted)
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Arena size, unindexed nodes included. Every `NodeId` index is below it.
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Registered components that are not the target of any current edge,
    /// in bom-ref order.
    pub fn root_candidates(&self) -> Vec<NodeId> {
        let mut in_degree = vec![0usize; self.node_count()];
        for id in self.sorted_ids() {
            for child in self.node(id).children() {
                in_degree[child.index()] += 1;
            }
        }

        self.sorted_ids()
            .filter(|id| in_degree[id.index()] == 0)
            .collect()
    }
}
